//! Blueprint and repository analysis engine.
//!
//! This module provides the heuristic core of archintel:
//! - Technology detection with confidence scoring
//! - Compliance classification against approved/core/denylist policy tables
//! - Regex-based data-flow, security, and integration scanning
//! - Architecture layer inference and report assembly

pub mod analyzer;
pub mod architecture;
pub mod compliance;
pub mod git;
pub mod output;
pub mod patterns;
pub mod scanner;
pub mod signatures;

pub use analyzer::{AnalysisReport, AnalysisSource, BlueprintAnalyzer, ReportMetadata};
pub use architecture::{ArchitectureAnalysis, ArchitectureAnalyzer, ArchitectureLayer, ArchitectureStyle};
pub use compliance::{ComplianceReport, TechnologyClassifier};
pub use git::GitCloner;
pub use output::{JsonReportWriter, MarkdownReportWriter};
pub use patterns::{ArchitecturePattern, PatternCatalog, PatternFilter, UsageLevel};
pub use scanner::{
    DataFlowFinding, DataFlowKind, IntegrationFinding, IntegrationKind, PatternScanner,
    SecurityFinding, SecurityIssueKind,
};
pub use signatures::{DetectedTechnology, TechnologyDetector, TechnologySignature};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during analysis operations
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid path (neither file nor directory): {0}")]
    InvalidPath(PathBuf),

    #[error("failed to clone repository: {0}")]
    CloneFailed(String),

    #[error("repository clone exceeded the {0:?} time limit")]
    CloneTimeout(Duration),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Security level attached to findings and data flows
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecurityLevel::Low => write!(f, "Low"),
            SecurityLevel::Medium => write!(f, "Medium"),
            SecurityLevel::High => write!(f, "High"),
        }
    }
}
