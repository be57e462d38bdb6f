// Static sample data served in mock mode

use crate::backend::types::{ScanTemplate, Vulnerability};

const TEMPLATES: &[(&str, &str, &str)] = &[
    (
        "Basic Network Scan",
        "731a8e52-3ea6-a291-ec0a-d2ff0619c19d7bd788d6be818b65",
        "A full system scan suitable for any host.",
    ),
    (
        "Advanced Scan",
        "ad629e16-03b6-8c1d-cef6-ef8c9dd3c658d24bd260ef5f9e66",
        "Configure a scan without using any recommendations.",
    ),
    (
        "Host Discovery",
        "bbd4f805-3966-d464-b2d1-0079eb89d69708c3a05ec2812bcf",
        "A simple scan to discover live hosts and open ports.",
    ),
    (
        "Web Application Tests",
        "c3cbcd46-329f-a9ed-1077-554f8c2af33d0d44f09d736969bf",
        "Scan for published and unknown web vulnerabilities.",
    ),
    (
        "Credentialed Patch Audit",
        "0625147c-30fe-d79f-e54f-ce7ccd7523e9b63d84cb81c23c2f",
        "Authenticate to hosts and enumerate missing updates.",
    ),
];

/// Vulnerability catalog, in presentation order
pub static VULNERABILITIES: &[Vulnerability] = &[
    Vulnerability {
        id: "CVE-2021-44228",
        name: "Apache Log4j Remote Code Execution (Log4Shell)",
        severity: "critical",
        cvss_score: 10.0,
        description: "JNDI features used in Log4j2 configuration, log messages and parameters \
                      do not protect against attacker controlled LDAP endpoints, allowing \
                      remote code execution through crafted log input.",
        solution: "Upgrade Log4j to 2.17.1 or later.",
        affected_systems: &["Apache Log4j 2.0-beta9 through 2.15.0"],
        references: &["https://nvd.nist.gov/vuln/detail/CVE-2021-44228"],
    },
    Vulnerability {
        id: "CVE-2023-34362",
        name: "MOVEit Transfer SQL Injection",
        severity: "critical",
        cvss_score: 9.8,
        description: "A SQL injection flaw in the MOVEit Transfer web application lets an \
                      unauthenticated attacker read and modify the backing database.",
        solution: "Apply the vendor patch for your MOVEit Transfer release.",
        affected_systems: &["MOVEit Transfer before 2023.0.1"],
        references: &["https://nvd.nist.gov/vuln/detail/CVE-2023-34362"],
    },
    Vulnerability {
        id: "CVE-2019-0708",
        name: "Remote Desktop Services Remote Code Execution (BlueKeep)",
        severity: "critical",
        cvss_score: 9.8,
        description: "An unauthenticated attacker can execute arbitrary code by sending \
                      specially crafted requests to Remote Desktop Services.",
        solution: "Install the Microsoft security update and enable Network Level Authentication.",
        affected_systems: &["Windows 7", "Windows Server 2008 R2", "Windows XP"],
        references: &["https://nvd.nist.gov/vuln/detail/CVE-2019-0708"],
    },
    Vulnerability {
        id: "CVE-2014-0160",
        name: "OpenSSL Heartbeat Information Disclosure (Heartbleed)",
        severity: "high",
        cvss_score: 7.5,
        description: "The TLS heartbeat extension does not check payload lengths, letting \
                      remote attackers read process memory including private keys.",
        solution: "Upgrade OpenSSL to 1.0.1g or later and reissue certificates.",
        affected_systems: &["OpenSSL 1.0.1 through 1.0.1f"],
        references: &["https://nvd.nist.gov/vuln/detail/CVE-2014-0160"],
    },
    Vulnerability {
        id: "CVE-2021-27101",
        name: "Accellion FTA Host Header Injection",
        severity: "critical",
        cvss_score: 9.8,
        description: "Accellion File Transfer Appliance is vulnerable to SQL injection via a \
                      crafted Host header sent to the document_root endpoint.",
        solution: "Migrate off the legacy appliance or apply FTA_9_12_380.",
        affected_systems: &["Accellion FTA 9_12_370 and earlier"],
        references: &["https://nvd.nist.gov/vuln/detail/CVE-2021-27101"],
    },
    Vulnerability {
        id: "CVE-2017-5638",
        name: "Apache Struts Jakarta Multipart Parser Remote Code Execution",
        severity: "critical",
        cvss_score: 10.0,
        description: "Incorrect exception handling in the Jakarta Multipart parser allows \
                      remote command execution via a crafted Content-Type header.",
        solution: "Upgrade Apache Struts to 2.3.32 or 2.5.10.1.",
        affected_systems: &[
            "Apache Struts 2.3.5 through 2.3.31",
            "Apache Struts 2.5 through 2.5.10",
        ],
        references: &["https://nvd.nist.gov/vuln/detail/CVE-2017-5638"],
    },
    Vulnerability {
        id: "CVE-2020-1938",
        name: "Apache Tomcat AJP File Read/Inclusion (Ghostcat)",
        severity: "critical",
        cvss_score: 9.8,
        description: "The AJP connector trusts incoming connections, allowing an attacker to \
                      read web application files or include them as JSP.",
        solution: "Upgrade Tomcat and disable the AJP connector if unused.",
        affected_systems: &["Apache Tomcat 6.x", "Apache Tomcat 7.0 before 7.0.100"],
        references: &["https://nvd.nist.gov/vuln/detail/CVE-2020-1938"],
    },
    Vulnerability {
        id: "CVE-2023-44487",
        name: "HTTP/2 Rapid Reset Denial of Service",
        severity: "high",
        cvss_score: 7.5,
        description: "Request cancellation in HTTP/2 can be abused to reset many streams \
                      quickly, exhausting server resources.",
        solution: "Upgrade the web server or proxy to a release that limits stream resets.",
        affected_systems: &["nginx before 1.25.3", "Envoy before 1.27.1"],
        references: &["https://nvd.nist.gov/vuln/detail/CVE-2023-44487"],
    },
    Vulnerability {
        id: "CVE-2016-2183",
        name: "SSL Medium Strength Cipher Suites Supported (SWEET32)",
        severity: "medium",
        cvss_score: 5.3,
        description: "The remote service supports 64-bit block ciphers such as 3DES, which \
                      are exposed to birthday attacks on long-lived connections.",
        solution: "Disable 3DES and other 64-bit block cipher suites.",
        affected_systems: &["Any TLS service offering 3DES"],
        references: &["https://sweet32.info/"],
    },
];

/// Scan templates in presentation order
pub fn templates() -> Vec<ScanTemplate> {
    TEMPLATES
        .iter()
        .map(|(title, uuid, desc)| ScanTemplate {
            title: title.to_string(),
            uuid: uuid.to_string(),
            desc: desc.to_string(),
        })
        .collect()
}

/// Exact lookup by identifier (case-insensitive)
pub fn find_vulnerability(id: &str) -> Option<&'static Vulnerability> {
    VULNERABILITIES
        .iter()
        .find(|vuln| vuln.id.eq_ignore_ascii_case(id))
}

/// Case-insensitive substring match on name or description, catalog order
pub fn search_vulnerabilities(keyword: &str) -> Vec<&'static Vulnerability> {
    let needle = keyword.to_lowercase();
    VULNERABILITIES
        .iter()
        .filter(|vuln| {
            vuln.name.to_lowercase().contains(&needle)
                || vuln.description.to_lowercase().contains(&needle)
        })
        .collect()
}
