//! Technology compliance classification and scoring.
//!
//! Policy tables are static and ordered: recommendation output lists
//! categories in table order, so these are slices rather than maps.

use serde::{Deserialize, Serialize};

use super::signatures::DetectedTechnology;

/// Per-category allowlist entry.
#[derive(Debug, Clone)]
struct CategoryPolicy {
    category: &'static str,
    approved: &'static [&'static str],
    core: &'static [&'static str],
}

/// Approved and core technology names per category.
const CATEGORY_POLICIES: &[CategoryPolicy] = &[
    CategoryPolicy {
        category: "Frontend",
        approved: &["React", "Vue.js", "Angular", "Next.js", "Nuxt.js", "Svelte"],
        core: &["React", "Vue.js", "Angular"],
    },
    CategoryPolicy {
        category: "Backend",
        approved: &[
            "Node.js",
            "Python",
            "Java",
            "C#",
            "Go",
            "Rust",
            "Express",
            "FastAPI",
            "Spring Boot",
        ],
        core: &["Node.js", "Python", "Java"],
    },
    CategoryPolicy {
        category: "Database",
        approved: &[
            "PostgreSQL",
            "MySQL",
            "MongoDB",
            "Redis",
            "Elasticsearch",
            "Cassandra",
        ],
        core: &["PostgreSQL", "MySQL", "MongoDB"],
    },
    CategoryPolicy {
        category: "DevOps",
        approved: &[
            "Docker",
            "Kubernetes",
            "Jenkins",
            "GitLab CI",
            "GitHub Actions",
            "Terraform",
        ],
        core: &["Docker"],
    },
    CategoryPolicy {
        category: "Cloud",
        approved: &["AWS", "Azure", "GCP", "Heroku", "DigitalOcean"],
        core: &["AWS", "Azure", "GCP"],
    },
    CategoryPolicy {
        category: "Security",
        approved: &["OAuth", "JWT", "HTTPS", "SSL", "TLS", "Auth0", "Keycloak"],
        core: &["HTTPS", "JWT", "OAuth"],
    },
    CategoryPolicy {
        category: "Testing",
        approved: &["Jest", "Cypress", "Selenium", "Pytest", "JUnit", "Mocha"],
        core: &[],
    },
];

/// Deprecated or risky technology names, independent of category.
const DENYLIST: &[&str] = &[
    "jQuery",
    "Bootstrap 3",
    "AngularJS",
    "Backbone.js",
    "Lodash",
    "Moment.js",
    "PHP 5",
    "MySQL 5.6",
    "MongoDB 3.6",
    "Node.js 12",
    "Python 2.7",
];

/// Penalty applied to the compliance score per non-approved technology.
const NON_APPROVED_PENALTY: i32 = 10;

/// Result of classifying a set of detected technologies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Technologies on the per-category allowlist
    pub approved: Vec<DetectedTechnology>,
    /// Approved technologies that are also category-core
    pub core: Vec<DetectedTechnology>,
    /// Technologies on the denylist
    pub non_approved: Vec<DetectedTechnology>,
    /// Technologies matching no policy table
    pub unknown: Vec<DetectedTechnology>,
    /// Aggregate compliance percentage, 0-100
    pub compliance_score: u8,
    pub total_count: usize,
    pub approved_count: usize,
    pub core_count: usize,
    pub non_approved_count: usize,
    pub unknown_count: usize,
    /// Deterministic, condition-gated recommendations
    pub recommendations: Vec<String>,
}

/// Classifier applying the static policy tables.
pub struct TechnologyClassifier;

impl TechnologyClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify detected technologies into compliance buckets and score them.
    pub fn classify(&self, detected: &[DetectedTechnology]) -> ComplianceReport {
        let mut approved = Vec::new();
        let mut core = Vec::new();
        let mut non_approved = Vec::new();
        let mut unknown = Vec::new();

        for tech in detected {
            match Self::policy_for(&tech.category) {
                Some(policy) if policy.approved.contains(&tech.name.as_str()) => {
                    approved.push(tech.clone());
                    if policy.core.contains(&tech.name.as_str()) {
                        core.push(tech.clone());
                    }
                }
                _ if DENYLIST.contains(&tech.name.as_str()) => {
                    non_approved.push(tech.clone());
                }
                _ => unknown.push(tech.clone()),
            }
        }

        let total_count = detected.len();
        let compliance_score = Self::score(total_count, approved.len(), non_approved.len());
        let recommendations =
            Self::recommendations(&approved, &non_approved, &unknown);

        ComplianceReport {
            compliance_score,
            total_count,
            approved_count: approved.len(),
            core_count: core.len(),
            non_approved_count: non_approved.len(),
            unknown_count: unknown.len(),
            recommendations,
            approved,
            core,
            non_approved,
            unknown,
        }
    }

    fn policy_for(category: &str) -> Option<&'static CategoryPolicy> {
        CATEGORY_POLICIES.iter().find(|p| p.category == category)
    }

    /// Base percentage of approved technologies, minus 10 per non-approved,
    /// saturating at 0. An empty input scores 0.
    fn score(total: usize, approved: usize, non_approved: usize) -> u8 {
        if total == 0 {
            return 0;
        }

        let base = (approved * 100 / total) as i32;
        let penalized = base - NON_APPROVED_PENALTY * non_approved as i32;
        penalized.clamp(0, 100) as u8
    }

    fn recommendations(
        approved: &[DetectedTechnology],
        non_approved: &[DetectedTechnology],
        unknown: &[DetectedTechnology],
    ) -> Vec<String> {
        let mut recommendations = Vec::new();

        if !non_approved.is_empty() {
            recommendations.push(format!(
                "Replace {} non-approved technologies with approved alternatives",
                non_approved.len()
            ));
        }

        if !unknown.is_empty() {
            recommendations.push(format!(
                "Review {} unknown technologies for approval",
                unknown.len()
            ));
        }

        let missing_core: Vec<&str> = CATEGORY_POLICIES
            .iter()
            .filter(|policy| !policy.core.is_empty())
            .filter(|policy| {
                !approved
                    .iter()
                    .any(|tech| policy.core.contains(&tech.name.as_str()))
            })
            .map(|policy| policy.category)
            .collect();

        if !missing_core.is_empty() {
            recommendations.push(format!(
                "Consider adding core technologies for: {}",
                missing_core.join(", ")
            ));
        }

        recommendations
    }
}

impl Default for TechnologyClassifier {
    fn default() -> Self {
        Self::new()
    }
}
