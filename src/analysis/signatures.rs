//! Technology signature table and confidence-scoring detector.

use serde::{Deserialize, Serialize};

/// A single entry in the static technology signature table.
#[derive(Debug, Clone)]
pub struct TechnologySignature {
    /// Stable identifier (e.g., "react")
    pub id: &'static str,
    /// Display name (e.g., "React")
    pub name: &'static str,
    /// Category used by the compliance policy tables
    pub category: &'static str,
    /// Short description
    pub description: &'static str,
    /// Known version strings, scanned first-match against raw text
    pub known_versions: &'static [&'static str],
    /// Lowercase substrings whose presence raises confidence by 20 each
    pub confidence_factors: &'static [&'static str],
    /// File types that grant the manifest bonus of 30
    pub manifests: &'static [&'static str],
}

/// Confidence increment per matched factor substring.
const FACTOR_SCORE: u8 = 20;
/// Bonus when the scanned file is a manifest the signature expects.
const MANIFEST_BONUS: u8 = 30;
/// Confidence ceiling.
const MAX_CONFIDENCE: u8 = 100;

/// The static signature table. Order matters: stable sorting preserves this
/// order for equal-confidence detections.
pub const SIGNATURES: &[TechnologySignature] = &[
    TechnologySignature {
        id: "react",
        name: "React",
        category: "Frontend",
        description: "A JavaScript library for building user interfaces",
        known_versions: &["18.2.0", "17.0.2", "16.14.0"],
        confidence_factors: &["react", "package.json", "jsx", "import statements"],
        manifests: &["package.json"],
    },
    TechnologySignature {
        id: "vuejs",
        name: "Vue.js",
        category: "Frontend",
        description: "Progressive JavaScript framework for building UIs",
        known_versions: &["3.3.4", "2.7.14"],
        confidence_factors: &["vue", "package.json", "v-bind", "single-file component"],
        manifests: &[],
    },
    TechnologySignature {
        id: "nodejs",
        name: "Node.js",
        category: "Backend",
        description: "JavaScript runtime built on Chrome's V8 JavaScript engine",
        known_versions: &["18.17.0", "16.20.0", "14.21.0"],
        confidence_factors: &["node", "package.json", "server.js", "app.js"],
        manifests: &["package.json"],
    },
    TechnologySignature {
        id: "express",
        name: "Express",
        category: "Backend",
        description: "Minimal and flexible Node.js web application framework",
        known_versions: &["4.18.2", "4.17.1"],
        confidence_factors: &["express", "app.listen", "req, res"],
        manifests: &[],
    },
    TechnologySignature {
        id: "python",
        name: "Python",
        category: "Backend",
        description: "High-level programming language with dynamic semantics",
        known_versions: &["3.11.0", "3.10.0", "3.9.0"],
        confidence_factors: &["python", "requirements.txt", "def ", "import "],
        manifests: &["requirements.txt"],
    },
    TechnologySignature {
        id: "postgresql",
        name: "PostgreSQL",
        category: "Database",
        description: "Open source object-relational database system",
        known_versions: &["15.3", "14.8", "13.11"],
        confidence_factors: &["postgres", "postgresql://", "psql", "migrations"],
        manifests: &[],
    },
    TechnologySignature {
        id: "mongodb",
        name: "MongoDB",
        category: "Database",
        description: "Document-oriented NoSQL database",
        known_versions: &["6.0.6", "5.0.18", "4.4.22"],
        confidence_factors: &["mongodb", "mongodb://", "mongoose", "collection"],
        manifests: &[],
    },
    TechnologySignature {
        id: "redis",
        name: "Redis",
        category: "Database",
        description: "In-memory data structure store used as cache and broker",
        known_versions: &["7.0.11", "6.2.12"],
        confidence_factors: &["redis", "redis://", "cache"],
        manifests: &[],
    },
    TechnologySignature {
        id: "docker",
        name: "Docker",
        category: "DevOps",
        description: "Containerization platform for developing, shipping, and running applications",
        known_versions: &["24.0.0", "23.0.0", "20.10.0"],
        confidence_factors: &["docker", "dockerfile", "docker-compose"],
        manifests: &["dockerfile"],
    },
    TechnologySignature {
        id: "kubernetes",
        name: "Kubernetes",
        category: "DevOps",
        description: "Container orchestration system for automated deployment and scaling",
        known_versions: &["1.27.3", "1.26.6"],
        confidence_factors: &["kubernetes", "kubectl", "apiversion", "kind: deployment"],
        manifests: &[],
    },
    TechnologySignature {
        id: "aws",
        name: "AWS",
        category: "Cloud",
        description: "Amazon Web Services cloud computing platform",
        known_versions: &["Latest"],
        confidence_factors: &["aws", "amazonaws.com", "boto3", "s3://"],
        manifests: &[],
    },
    TechnologySignature {
        id: "streamlit",
        name: "Streamlit",
        category: "Frontend",
        description: "Open-source Python library for creating web applications",
        known_versions: &["1.28.0", "1.27.0", "1.26.0"],
        confidence_factors: &["streamlit", "st.", "app.py"],
        manifests: &["requirements.txt"],
    },
    TechnologySignature {
        id: "jquery",
        name: "jQuery",
        category: "Frontend",
        description: "Legacy JavaScript DOM manipulation library",
        known_versions: &["3.7.0", "2.2.4", "1.12.4"],
        confidence_factors: &["jquery", "$(document)", "$.ajax"],
        manifests: &[],
    },
];

/// A technology detected in a scanned text blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedTechnology {
    /// Signature identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Best-matching known version, or "Unknown"
    pub version: String,
    /// Detection confidence, 0-100
    pub confidence: u8,
    /// Policy category
    pub category: String,
    /// Signature description
    pub description: String,
}

/// Detector that scores the static signature table against text content.
pub struct TechnologyDetector {
    signatures: &'static [TechnologySignature],
}

impl TechnologyDetector {
    /// Create a detector over the built-in signature table.
    pub fn new() -> Self {
        Self {
            signatures: SIGNATURES,
        }
    }

    /// Detect technologies in `text`, ranked by descending confidence.
    ///
    /// `file_type` is either a lowercase extension or a known manifest file
    /// name (e.g., "package.json"); the latter grants the manifest bonus.
    /// Ties keep signature table order (stable sort).
    pub fn detect(&self, text: &str, file_type: &str) -> Vec<DetectedTechnology> {
        if text.is_empty() {
            return Vec::new();
        }

        let lowered = text.to_lowercase();
        let file_type = file_type.to_lowercase();

        let mut detected: Vec<DetectedTechnology> = Vec::new();
        for sig in self.signatures {
            let confidence = Self::confidence_for(sig, &lowered, &file_type);
            if confidence == 0 {
                continue;
            }

            detected.push(DetectedTechnology {
                id: sig.id.to_string(),
                name: sig.name.to_string(),
                version: Self::version_for(sig, text),
                confidence,
                category: sig.category.to_string(),
                description: sig.description.to_string(),
            });
        }

        // Stable: equal confidences stay in table order
        detected.sort_by(|a, b| b.confidence.cmp(&a.confidence));
        detected
    }

    /// Score one signature: 20 per factor substring found, plus a 30 manifest
    /// bonus, clamped to 100.
    fn confidence_for(sig: &TechnologySignature, lowered_text: &str, file_type: &str) -> u8 {
        let mut confidence: u32 = 0;

        for factor in sig.confidence_factors {
            if lowered_text.contains(factor) {
                confidence += u32::from(FACTOR_SCORE);
            }
        }

        if sig.manifests.contains(&file_type) {
            confidence += u32::from(MANIFEST_BONUS);
        }

        confidence.min(u32::from(MAX_CONFIDENCE)) as u8
    }

    /// First known version string found in the raw (case-sensitive) text.
    fn version_for(sig: &TechnologySignature, text: &str) -> String {
        sig.known_versions
            .iter()
            .find(|v| text.contains(**v))
            .map(|v| v.to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

impl Default for TechnologyDetector {
    fn default() -> Self {
        Self::new()
    }
}
