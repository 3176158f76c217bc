//! Architecture layer inference and style classification.

use serde::{Deserialize, Serialize};

use super::scanner::DataFlowFinding;
use super::signatures::DetectedTechnology;

/// Overall architecture style inferred from the technology mix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArchitectureStyle {
    Microservices,
    Monolithic,
    Serverless,
    #[default]
    Unknown,
}

impl std::fmt::Display for ArchitectureStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArchitectureStyle::Microservices => write!(f, "Microservices"),
            ArchitectureStyle::Monolithic => write!(f, "Monolithic"),
            ArchitectureStyle::Serverless => write!(f, "Serverless"),
            ArchitectureStyle::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One inferred layer with the technologies backing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchitectureLayer {
    pub name: String,
    pub technologies: Vec<String>,
    pub description: String,
}

/// Derived architecture summary for a directory or repository scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchitectureAnalysis {
    pub style: ArchitectureStyle,
    pub layers: Vec<ArchitectureLayer>,
    /// 0-100, from technology count, flow count, and category diversity
    pub complexity_score: u8,
}

/// Category-to-layer mapping, emitted in this order.
const LAYER_RULES: &[(&str, &str, &str)] = &[
    (
        "Frontend",
        "Presentation Layer",
        "User interface and client-side logic",
    ),
    ("Backend", "API Layer", "API endpoints and business logic"),
    ("Database", "Data Layer", "Data storage and persistence"),
];

/// Names implying container orchestration.
const MICROSERVICE_MARKERS: &[&str] = &["Docker", "Kubernetes"];
/// Recognized monolith framework names.
const MONOLITH_MARKERS: &[&str] = &["Express", "Django", "Flask"];
/// Recognized function-as-a-service offerings.
const SERVERLESS_MARKERS: &[&str] = &["AWS Lambda", "Azure Functions", "Google Cloud Functions"];

/// Analyzer producing the architecture summary.
pub struct ArchitectureAnalyzer;

impl ArchitectureAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Infer layers, style, and complexity from a deduplicated technology
    /// list and the collected data flows.
    pub fn analyze(
        &self,
        technologies: &[DetectedTechnology],
        flows: &[DataFlowFinding],
    ) -> ArchitectureAnalysis {
        ArchitectureAnalysis {
            style: Self::classify_style(technologies),
            layers: Self::infer_layers(technologies),
            complexity_score: Self::complexity_score(technologies, flows),
        }
    }

    /// Check order matters: orchestration wins over monolith frameworks,
    /// which win over FaaS markers.
    fn classify_style(technologies: &[DetectedTechnology]) -> ArchitectureStyle {
        let has = |names: &[&str]| {
            technologies
                .iter()
                .any(|t| names.contains(&t.name.as_str()))
        };

        if has(MICROSERVICE_MARKERS) {
            ArchitectureStyle::Microservices
        } else if has(MONOLITH_MARKERS) {
            ArchitectureStyle::Monolithic
        } else if has(SERVERLESS_MARKERS) {
            ArchitectureStyle::Serverless
        } else {
            ArchitectureStyle::Unknown
        }
    }

    fn infer_layers(technologies: &[DetectedTechnology]) -> Vec<ArchitectureLayer> {
        LAYER_RULES
            .iter()
            .filter_map(|(category, name, description)| {
                let names: Vec<String> = technologies
                    .iter()
                    .filter(|t| t.category == *category)
                    .map(|t| t.name.clone())
                    .collect();

                if names.is_empty() {
                    return None;
                }

                Some(ArchitectureLayer {
                    name: name.to_string(),
                    technologies: names,
                    description: description.to_string(),
                })
            })
            .collect()
    }

    /// `min(100, 2*techs + 3*flows + 5*distinct_categories)`
    fn complexity_score(technologies: &[DetectedTechnology], flows: &[DataFlowFinding]) -> u8 {
        let mut categories: Vec<&str> = technologies.iter().map(|t| t.category.as_str()).collect();
        categories.sort_unstable();
        categories.dedup();

        let score = 2 * technologies.len() + 3 * flows.len() + 5 * categories.len();
        score.min(100) as u8
    }
}

impl Default for ArchitectureAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
