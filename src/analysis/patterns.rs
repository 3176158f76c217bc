//! Static catalog of governed architecture patterns.

use serde::{Deserialize, Serialize};

/// How widely a pattern is used across governed systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for UsageLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UsageLevel::Low => write!(f, "Low"),
            UsageLevel::Medium => write!(f, "Medium"),
            UsageLevel::High => write!(f, "High"),
        }
    }
}

/// An approved architecture pattern with governance metadata.
#[derive(Debug, Clone, Serialize)]
pub struct ArchitecturePattern {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    /// Static compliance rating, 0-100
    pub compliance_score: u8,
    pub usage_level: UsageLevel,
    pub governance_rules: &'static [&'static str],
}

const PATTERNS: &[ArchitecturePattern] = &[
    ArchitecturePattern {
        id: "microservices",
        name: "Microservices Pattern",
        category: "Architecture",
        description: "Decompose applications into small, independent services",
        compliance_score: 95,
        usage_level: UsageLevel::High,
        governance_rules: &["Service independence", "API contracts", "Data isolation"],
    },
    ArchitecturePattern {
        id: "cqrs",
        name: "CQRS Pattern",
        category: "Data",
        description: "Separate read and write operations for better scalability",
        compliance_score: 88,
        usage_level: UsageLevel::Medium,
        governance_rules: &["Command separation", "Event sourcing", "Read models"],
    },
    ArchitecturePattern {
        id: "event_sourcing",
        name: "Event Sourcing",
        category: "Data",
        description: "Store events as the source of truth for state changes",
        compliance_score: 92,
        usage_level: UsageLevel::Medium,
        governance_rules: &["Event store", "Replay capability", "Audit trail"],
    },
    ArchitecturePattern {
        id: "circuit_breaker",
        name: "Circuit Breaker",
        category: "Resilience",
        description: "Prevent cascading failures in distributed systems",
        compliance_score: 90,
        usage_level: UsageLevel::High,
        governance_rules: &["Failure detection", "Fallback mechanisms", "Recovery testing"],
    },
    ArchitecturePattern {
        id: "api_gateway",
        name: "API Gateway",
        category: "Integration",
        description: "Single entry point for client requests to microservices",
        compliance_score: 94,
        usage_level: UsageLevel::High,
        governance_rules: &["Request routing", "Authentication", "Rate limiting"],
    },
];

/// Filter for catalog queries. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct PatternFilter {
    pub category: Option<String>,
    pub usage_level: Option<UsageLevel>,
    pub min_compliance: u8,
}

/// Read-only access to the built-in pattern catalog.
pub struct PatternCatalog;

impl PatternCatalog {
    /// All patterns, in catalog order.
    pub fn all() -> &'static [ArchitecturePattern] {
        PATTERNS
    }

    /// Patterns matching a filter, preserving catalog order.
    pub fn query(filter: &PatternFilter) -> Vec<&'static ArchitecturePattern> {
        PATTERNS
            .iter()
            .filter(|p| {
                filter
                    .category
                    .as_deref()
                    .map_or(true, |c| p.category.eq_ignore_ascii_case(c))
            })
            .filter(|p| filter.usage_level.map_or(true, |u| p.usage_level == u))
            .filter(|p| p.compliance_score >= filter.min_compliance)
            .collect()
    }

    /// Look up one pattern by id.
    pub fn get(id: &str) -> Option<&'static ArchitecturePattern> {
        PATTERNS.iter().find(|p| p.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_five_patterns() {
        assert_eq!(PatternCatalog::all().len(), 5);
    }

    #[test]
    fn test_query_by_category() {
        let filter = PatternFilter {
            category: Some("Data".to_string()),
            ..Default::default()
        };
        let results = PatternCatalog::query(&filter);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|p| p.category == "Data"));
    }

    #[test]
    fn test_query_by_usage_level() {
        let filter = PatternFilter {
            usage_level: Some(UsageLevel::High),
            ..Default::default()
        };
        let results = PatternCatalog::query(&filter);
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_query_by_min_compliance() {
        let filter = PatternFilter {
            min_compliance: 93,
            ..Default::default()
        };
        let results = PatternCatalog::query(&filter);
        let ids: Vec<&str> = results.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["microservices", "api_gateway"]);
    }

    #[test]
    fn test_get_by_id() {
        assert!(PatternCatalog::get("cqrs").is_some());
        assert!(PatternCatalog::get("nope").is_none());
    }

    #[test]
    fn test_all_scores_in_range() {
        assert!(PatternCatalog::all().iter().all(|p| p.compliance_score <= 100));
    }
}
