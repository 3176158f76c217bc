//! Regex-based code pattern scanning.
//!
//! Scans one text blob at a time for data-flow, security, and integration
//! findings. Patterns are fixed and applied independently: one line can
//! produce multiple findings, and nothing is deduplicated here.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::SecurityLevel;

/// Kind of data flow detected in code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFlowKind {
    ApiCall,
    DatabaseQuery,
}

impl std::fmt::Display for DataFlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataFlowKind::ApiCall => write!(f, "API Call"),
            DataFlowKind::DatabaseQuery => write!(f, "Database Query"),
        }
    }
}

/// A data-flow occurrence (API call or database query).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFlowFinding {
    pub kind: DataFlowKind,
    /// Endpoint for API calls, table or query body for database queries
    pub target: String,
    pub security_level: SecurityLevel,
    pub description: String,
}

/// Kind of security issue flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityIssueKind {
    HardcodedSecret,
    SqlInjectionRisk,
    InsecureHttp,
}

impl std::fmt::Display for SecurityIssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecurityIssueKind::HardcodedSecret => write!(f, "Hardcoded Secret"),
            SecurityIssueKind::SqlInjectionRisk => write!(f, "SQL Injection Risk"),
            SecurityIssueKind::InsecureHttp => write!(f, "Insecure HTTP"),
        }
    }
}

/// A flagged security issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityFinding {
    pub kind: SecurityIssueKind,
    pub severity: SecurityLevel,
    pub description: String,
    pub recommendation: String,
}

/// Kind of integration point detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrationKind {
    ExternalApi,
    DatabaseConnection,
}

impl std::fmt::Display for IntegrationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IntegrationKind::ExternalApi => write!(f, "External API"),
            IntegrationKind::DatabaseConnection => write!(f, "Database Connection"),
        }
    }
}

/// An external integration point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationFinding {
    pub kind: IntegrationKind,
    pub endpoint: String,
    pub security_level: SecurityLevel,
    pub description: String,
}

/// Scanner holding the compiled pattern batteries.
pub struct PatternScanner {
    api_patterns: Vec<Regex>,
    db_patterns: Vec<Regex>,
    secret_patterns: Vec<Regex>,
    injection_patterns: Vec<Regex>,
    external_api_patterns: Vec<Regex>,
    db_connection_patterns: Vec<Regex>,
}

/// Truncate a matched snippet for display, as chars not bytes.
fn snippet(text: &str) -> String {
    let truncated: String = text.chars().take(50).collect();
    if truncated.len() < text.len() {
        format!("{truncated}...")
    } else {
        truncated
    }
}

impl PatternScanner {
    /// Compile the fixed pattern set. Patterns are static and known-valid.
    pub fn new() -> Self {
        let compile = |patterns: &[&str]| -> Vec<Regex> {
            patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
        };

        Self {
            api_patterns: compile(&[
                r#"(?i)fetch\s*\(\s*["']([^"']+)["']"#,
                r#"(?i)axios\.[a-z]+\s*\(\s*["']([^"']+)["']"#,
                r#"(?i)\.get\s*\(\s*["']([^"']+)["']"#,
                r#"(?i)\.post\s*\(\s*["']([^"']+)["']"#,
                r#"(?i)\.put\s*\(\s*["']([^"']+)["']"#,
                r#"(?i)\.delete\s*\(\s*["']([^"']+)["']"#,
            ]),
            db_patterns: compile(&[
                r"(?i)SELECT\s+.*?\s+FROM\s+(\w+)",
                r"(?i)INSERT\s+INTO\s+(\w+)",
                r"(?i)UPDATE\s+(\w+)\s+SET",
                r"(?i)DELETE\s+FROM\s+(\w+)",
                r"(?i)\.find\s*\(\s*\{([^}]+)\}",
                r"(?i)\.findOne\s*\(\s*\{([^}]+)\}",
            ]),
            secret_patterns: compile(&[
                r#"(?i)password\s*=\s*["'][^"']+["']"#,
                r#"(?i)api_key\s*=\s*["'][^"']+["']"#,
                r#"(?i)secret\s*=\s*["'][^"']+["']"#,
                r#"(?i)token\s*=\s*["'][^"']+["']"#,
            ]),
            injection_patterns: compile(&[
                r#"(?i)query\s*\(\s*["'][^"']*\+[^"']*["']"#,
                r#"(?i)execute\s*\(\s*["'][^"']*\+[^"']*["']"#,
            ]),
            external_api_patterns: compile(&[
                r"(?i)https?://[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}",
                r"(?i)api\.[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}",
            ]),
            db_connection_patterns: compile(&[
                r#"(?i)mongodb://[^\s'"]+"#,
                r#"(?i)postgresql://[^\s'"]+"#,
                r#"(?i)mysql://[^\s'"]+"#,
                r#"(?i)redis://[^\s'"]+"#,
            ]),
        }
    }

    /// Run the full pattern set over one text blob.
    pub fn scan(
        &self,
        text: &str,
    ) -> (
        Vec<DataFlowFinding>,
        Vec<SecurityFinding>,
        Vec<IntegrationFinding>,
    ) {
        (
            self.scan_data_flows(text),
            self.scan_security(text),
            self.scan_integrations(text),
        )
    }

    /// Extract API call and database query data flows.
    pub fn scan_data_flows(&self, text: &str) -> Vec<DataFlowFinding> {
        let mut flows = Vec::new();

        for pattern in &self.api_patterns {
            for cap in pattern.captures_iter(text) {
                if let Some(endpoint) = cap.get(1) {
                    let endpoint = endpoint.as_str().to_string();
                    flows.push(DataFlowFinding {
                        kind: DataFlowKind::ApiCall,
                        description: format!("API call to {endpoint}"),
                        target: endpoint,
                        security_level: SecurityLevel::Medium,
                    });
                }
            }
        }

        for pattern in &self.db_patterns {
            for cap in pattern.captures_iter(text) {
                if let Some(target) = cap.get(1) {
                    let target = target.as_str().to_string();
                    flows.push(DataFlowFinding {
                        kind: DataFlowKind::DatabaseQuery,
                        description: format!("Database operation on {target}"),
                        target,
                        security_level: SecurityLevel::High,
                    });
                }
            }
        }

        flows
    }

    /// Flag hardcoded secrets, SQL injection risks, and insecure HTTP usage.
    pub fn scan_security(&self, text: &str) -> Vec<SecurityFinding> {
        let mut findings = Vec::new();

        for pattern in &self.secret_patterns {
            for m in pattern.find_iter(text) {
                findings.push(SecurityFinding {
                    kind: SecurityIssueKind::HardcodedSecret,
                    severity: SecurityLevel::High,
                    description: format!(
                        "Potential hardcoded secret found: {}",
                        snippet(m.as_str())
                    ),
                    recommendation: "Use environment variables or secure secret management"
                        .to_string(),
                });
            }
        }

        for pattern in &self.injection_patterns {
            for m in pattern.find_iter(text) {
                findings.push(SecurityFinding {
                    kind: SecurityIssueKind::SqlInjectionRisk,
                    severity: SecurityLevel::High,
                    description: format!(
                        "Potential SQL injection vulnerability: {}",
                        snippet(m.as_str())
                    ),
                    recommendation: "Use parameterized queries or prepared statements".to_string(),
                });
            }
        }

        // Whole-text presence check: one finding per blob, never per match
        if text.contains("http://") && !text.contains("https://") {
            findings.push(SecurityFinding {
                kind: SecurityIssueKind::InsecureHttp,
                severity: SecurityLevel::Medium,
                description: "HTTP protocol detected without HTTPS".to_string(),
                recommendation: "Use HTTPS for all external communications".to_string(),
            });
        }

        findings
    }

    /// Extract external API endpoints and database connection strings.
    pub fn scan_integrations(&self, text: &str) -> Vec<IntegrationFinding> {
        let mut integrations = Vec::new();

        for pattern in &self.external_api_patterns {
            for m in pattern.find_iter(text) {
                let endpoint = m.as_str().to_string();
                integrations.push(IntegrationFinding {
                    kind: IntegrationKind::ExternalApi,
                    description: format!("Integration with external API: {endpoint}"),
                    endpoint,
                    security_level: SecurityLevel::Medium,
                });
            }
        }

        for pattern in &self.db_connection_patterns {
            for m in pattern.find_iter(text) {
                let endpoint = m.as_str().to_string();
                integrations.push(IntegrationFinding {
                    kind: IntegrationKind::DatabaseConnection,
                    description: format!("Database connection: {endpoint}"),
                    endpoint,
                    security_level: SecurityLevel::High,
                });
            }
        }

        integrations
    }
}

impl Default for PatternScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_call_detected() {
        let scanner = PatternScanner::new();
        let flows = scanner.scan_data_flows(r#"fetch("/api/users")"#);

        assert_eq!(flows.len(), 1);
        assert_eq!(flows[0].kind, DataFlowKind::ApiCall);
        assert_eq!(flows[0].target, "/api/users");
        assert_eq!(flows[0].security_level, SecurityLevel::Medium);
    }

    #[test]
    fn test_axios_and_method_calls_detected() {
        let scanner = PatternScanner::new();
        let code = r#"
            axios.post("/api/orders", body);
            client.get("/api/items");
        "#;
        let flows = scanner.scan_data_flows(code);

        let endpoints: Vec<&str> = flows.iter().map(|f| f.target.as_str()).collect();
        assert!(endpoints.contains(&"/api/orders"));
        assert!(endpoints.contains(&"/api/items"));
    }

    #[test]
    fn test_sql_queries_detected() {
        let scanner = PatternScanner::new();
        let code = "SELECT id FROM users; INSERT INTO orders (x) VALUES (1); \
                    UPDATE accounts SET y = 2; DELETE FROM sessions";
        let flows = scanner.scan_data_flows(code);

        let tables: Vec<&str> = flows
            .iter()
            .filter(|f| f.kind == DataFlowKind::DatabaseQuery)
            .map(|f| f.target.as_str())
            .collect();
        assert_eq!(tables, vec!["users", "orders", "accounts", "sessions"]);
        assert!(flows
            .iter()
            .all(|f| f.security_level == SecurityLevel::High));
    }

    #[test]
    fn test_document_store_queries_detected() {
        let scanner = PatternScanner::new();
        let flows = scanner.scan_data_flows(r#"db.users.findOne({ name: "x" })"#);
        assert_eq!(flows.len(), 1);
        assert_eq!(flows[0].kind, DataFlowKind::DatabaseQuery);
        assert!(flows[0].target.contains("name"));
    }

    #[test]
    fn test_hardcoded_secret_detected() {
        let scanner = PatternScanner::new();
        let findings = scanner.scan_security(r#"api_key = "sk-abc123""#);

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].kind, SecurityIssueKind::HardcodedSecret);
        assert_eq!(findings[0].severity, SecurityLevel::High);
    }

    #[test]
    fn test_sql_injection_risk_detected() {
        let scanner = PatternScanner::new();
        let findings =
            scanner.scan_security(r#"query("SELECT * FROM x WHERE id=" + id + " LIMIT 1")"#);

        assert!(findings
            .iter()
            .any(|f| f.kind == SecurityIssueKind::SqlInjectionRisk));
    }

    #[test]
    fn test_insecure_http_exactly_one_finding() {
        let scanner = PatternScanner::new();
        let text = "see http://example.com and http://other.example.com";
        let findings = scanner.scan_security(text);

        let insecure: Vec<_> = findings
            .iter()
            .filter(|f| f.kind == SecurityIssueKind::InsecureHttp)
            .collect();
        assert_eq!(insecure.len(), 1);
        assert_eq!(insecure[0].severity, SecurityLevel::Medium);
    }

    #[test]
    fn test_https_presence_suppresses_insecure_http() {
        let scanner = PatternScanner::new();
        let text = "http://legacy.example.com plus https://example.com";
        let findings = scanner.scan_security(text);

        assert!(!findings
            .iter()
            .any(|f| f.kind == SecurityIssueKind::InsecureHttp));
    }

    #[test]
    fn test_external_api_detected() {
        let scanner = PatternScanner::new();
        let integrations = scanner.scan_integrations("calls https://api.stripe.com/v1/charges");

        assert!(integrations
            .iter()
            .any(|i| i.kind == IntegrationKind::ExternalApi));
    }

    #[test]
    fn test_database_connection_detected() {
        let scanner = PatternScanner::new();
        let integrations =
            scanner.scan_integrations("DATABASE_URL=postgresql://u:p@localhost/db");

        let db: Vec<_> = integrations
            .iter()
            .filter(|i| i.kind == IntegrationKind::DatabaseConnection)
            .collect();
        assert_eq!(db.len(), 1);
        assert_eq!(db[0].security_level, SecurityLevel::High);
        assert!(db[0].endpoint.starts_with("postgresql://"));
    }

    #[test]
    fn test_patterns_are_not_mutually_exclusive() {
        let scanner = PatternScanner::new();
        // One line that is both an injection risk and contains a secret
        let text = r#"password = "hunter2"; execute("DELETE FROM t WHERE n=" + n + " OR 1")"#;
        let findings = scanner.scan_security(text);
        assert!(findings.len() >= 2);
    }

    #[test]
    fn test_empty_text_is_clean() {
        let scanner = PatternScanner::new();
        let (flows, security, integrations) = scanner.scan("");
        assert!(flows.is_empty());
        assert!(security.is_empty());
        assert!(integrations.is_empty());
    }

    #[test]
    fn test_snippet_truncates_long_matches() {
        let long = "x".repeat(80);
        let out = snippet(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 53);
    }
}
