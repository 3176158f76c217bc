//! Analysis entry points and report assembly.

use chrono::Utc;
use ignore::WalkBuilder;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};

use super::architecture::{ArchitectureAnalysis, ArchitectureAnalyzer};
use super::compliance::{ComplianceReport, TechnologyClassifier};
use super::scanner::{DataFlowFinding, IntegrationFinding, PatternScanner, SecurityFinding};
use super::signatures::{DetectedTechnology, TechnologyDetector};
use super::{AnalysisError, AnalysisResult};
use crate::config::AnalyzerConfig;

/// File names that grant the detector's manifest bonus when scanned.
const MANIFEST_FILE_NAMES: &[&str] = &["package.json", "requirements.txt", "dockerfile"];

/// What was analyzed to produce a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalysisSource {
    File { path: PathBuf },
    Directory { path: PathBuf },
    Repository { url: String, branch: String },
}

/// Metadata about one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Version of the analyzer
    pub analyzer_version: String,
    /// RFC3339 timestamp of the run
    pub timestamp: String,
    /// Duration of the analysis in milliseconds
    pub duration_ms: u64,
    /// Number of files scanned (1 for single-file analysis)
    pub files_scanned: usize,
    /// Number of files skipped due to read errors
    pub files_skipped: usize,
}

/// Complete analysis result for one invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub source: AnalysisSource,
    pub metadata: ReportMetadata,
    /// Detected technologies, deduplicated by (name, version)
    pub technologies: Vec<DetectedTechnology>,
    pub compliance: ComplianceReport,
    pub data_flows: Vec<DataFlowFinding>,
    pub security_findings: Vec<SecurityFinding>,
    pub integration_points: Vec<IntegrationFinding>,
    /// Present for directory and repository scans
    pub architecture: Option<ArchitectureAnalysis>,
}

/// Analyzer over local files, directories, and cloned repositories.
///
/// All consumed tables are static; each call produces fresh, local state,
/// so one analyzer can serve any number of sequential invocations.
pub struct BlueprintAnalyzer {
    config: AnalyzerConfig,
    detector: TechnologyDetector,
    classifier: TechnologyClassifier,
    scanner: PatternScanner,
    architecture: ArchitectureAnalyzer,
}

impl BlueprintAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self {
            config,
            detector: TechnologyDetector::new(),
            classifier: TechnologyClassifier::new(),
            scanner: PatternScanner::new(),
            architecture: ArchitectureAnalyzer::new(),
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze a local path. Files get single-blob analysis; directories get
    /// a recursive scan. Anything else fails immediately.
    pub fn analyze_path(&self, path: &Path) -> AnalysisResult<AnalysisReport> {
        if path.is_file() {
            self.analyze_file(path)
        } else if path.is_dir() {
            self.analyze_directory(path, None)
        } else {
            Err(AnalysisError::InvalidPath(path.to_path_buf()))
        }
    }

    /// Analyze a single file. Read failures here are top-level errors.
    pub fn analyze_file(&self, path: &Path) -> AnalysisResult<AnalysisReport> {
        let start = Instant::now();
        let content = fs::read_to_string(path)?;
        let file_type = Self::file_type_of(path);

        let mut technologies = self.detector.detect(&content, &file_type);
        technologies.retain(|t| t.confidence >= self.config.min_confidence);

        let (data_flows, security_findings, integration_points) = self.scanner.scan(&content);
        let compliance = self.classifier.classify(&technologies);

        Ok(AnalysisReport {
            source: AnalysisSource::File {
                path: path.to_path_buf(),
            },
            metadata: Self::metadata(start, 1, 0),
            technologies,
            compliance,
            data_flows,
            security_findings,
            integration_points,
            architecture: None,
        })
    }

    /// Analyze a directory tree. Individual unreadable files are logged and
    /// skipped; the scan itself only fails on walker-level errors.
    pub fn analyze_directory(
        &self,
        root: &Path,
        source: Option<AnalysisSource>,
    ) -> AnalysisResult<AnalysisReport> {
        let start = Instant::now();

        let mut technologies: Vec<DetectedTechnology> = Vec::new();
        let mut data_flows: Vec<DataFlowFinding> = Vec::new();
        let mut security_findings: Vec<SecurityFinding> = Vec::new();
        let mut integration_points: Vec<IntegrationFinding> = Vec::new();
        let mut files_scanned = 0usize;
        let mut files_skipped = 0usize;

        let skip_dirs = self.config.skip_dirs.clone();
        let walker = WalkBuilder::new(root)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().map_or(false, |t| t.is_dir());
                if !is_dir {
                    return true;
                }
                entry
                    .file_name()
                    .to_str()
                    .map_or(true, |name| !skip_dirs.iter().any(|d| d == name))
            })
            .build();

        for entry in walker.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("")
                .to_lowercase();
            if !self.config.supports_extension(&ext) {
                continue;
            }

            let content = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(err) => {
                    warn!(path = %path.display(), %err, "skipping unreadable file");
                    files_skipped += 1;
                    continue;
                }
            };

            files_scanned += 1;
            let file_type = Self::file_type_of(path);
            debug!(path = %path.display(), %file_type, "scanning file");

            technologies.extend(self.detector.detect(&content, &file_type));

            let (flows, security, integrations) = self.scanner.scan(&content);
            data_flows.extend(flows);
            security_findings.extend(security);
            integration_points.extend(integrations);
        }

        let mut technologies = Self::deduplicate(technologies);
        technologies.retain(|t| t.confidence >= self.config.min_confidence);

        let compliance = self.classifier.classify(&technologies);
        let architecture = self.architecture.analyze(&technologies, &data_flows);

        Ok(AnalysisReport {
            source: source.unwrap_or(AnalysisSource::Directory {
                path: root.to_path_buf(),
            }),
            metadata: Self::metadata(start, files_scanned, files_skipped),
            technologies,
            compliance,
            data_flows,
            security_findings,
            integration_points,
            architecture: Some(architecture),
        })
    }

    /// The detector's `file_type` argument: the file name for known
    /// manifests, otherwise the lowercase extension.
    fn file_type_of(path: &Path) -> String {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            let lowered = name.to_lowercase();
            if MANIFEST_FILE_NAMES.contains(&lowered.as_str()) {
                return lowered;
            }
        }

        path.extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase()
    }

    /// Drop repeat (name, version) detections, keeping discovery order.
    fn deduplicate(technologies: Vec<DetectedTechnology>) -> Vec<DetectedTechnology> {
        let mut seen: HashSet<(String, String)> = HashSet::new();
        technologies
            .into_iter()
            .filter(|t| seen.insert((t.name.clone(), t.version.clone())))
            .collect()
    }

    fn metadata(start: Instant, files_scanned: usize, files_skipped: usize) -> ReportMetadata {
        ReportMetadata {
            analyzer_version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now().to_rfc3339(),
            duration_ms: start.elapsed().as_millis() as u64,
            files_scanned,
            files_skipped,
        }
    }
}

impl Default for BlueprintAnalyzer {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn analyzer() -> BlueprintAnalyzer {
        BlueprintAnalyzer::default()
    }

    #[test]
    fn test_invalid_path_fails_fast() {
        let err = analyzer()
            .analyze_path(Path::new("/definitely/not/here"))
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidPath(_)));
    }

    #[test]
    fn test_single_file_analysis() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, r#"{"dependencies": {"react": "18.2.0"}}"#).unwrap();

        let report = analyzer().analyze_file(&path).unwrap();

        assert!(report.technologies.iter().any(|t| t.name == "React"));
        assert!(report.architecture.is_none());
        assert_eq!(report.metadata.files_scanned, 1);
        assert!(matches!(report.source, AnalysisSource::File { .. }));
    }

    #[test]
    fn test_manifest_file_type_grants_bonus() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("package.json");
        let plain = dir.path().join("notes.json");
        fs::write(&manifest, "react").unwrap();
        fs::write(&plain, "react").unwrap();

        let a = analyzer();
        let with_bonus = a.analyze_file(&manifest).unwrap();
        let without = a.analyze_file(&plain).unwrap();

        let conf = |r: &AnalysisReport| {
            r.technologies
                .iter()
                .find(|t| t.name == "React")
                .unwrap()
                .confidence
        };
        assert_eq!(conf(&with_bonus), conf(&without) + 30);
    }

    #[test]
    fn test_directory_scan_aggregates_and_dedupes() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.js"), "import react from 'react'").unwrap();
        fs::write(dir.path().join("b.js"), "more react here").unwrap();

        let report = analyzer().analyze_path(dir.path()).unwrap();

        let react_count = report
            .technologies
            .iter()
            .filter(|t| t.name == "React")
            .count();
        assert_eq!(react_count, 1);
        assert!(report.architecture.is_some());
    }

    #[test]
    fn test_unreadable_file_is_skipped_not_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("good1.js"), "fetch(\"/api/a\")").unwrap();
        fs::write(dir.path().join("good2.js"), "fetch(\"/api/b\")").unwrap();

        // Invalid UTF-8 makes read_to_string fail for this file
        let mut bad = fs::File::create(dir.path().join("bad.js")).unwrap();
        bad.write_all(&[0xff, 0xfe, 0x00, 0x80, 0xff]).unwrap();

        let report = analyzer().analyze_path(dir.path()).unwrap();

        assert_eq!(report.metadata.files_scanned, 2);
        assert_eq!(report.metadata.files_skipped, 1);
        assert_eq!(report.data_flows.len(), 2);
    }

    #[test]
    fn test_skip_dirs_are_not_scanned() {
        let dir = TempDir::new().unwrap();
        let deps = dir.path().join("node_modules");
        fs::create_dir(&deps).unwrap();
        fs::write(deps.join("index.js"), "fetch(\"/api/hidden\")").unwrap();
        fs::write(dir.path().join("app.js"), "fetch(\"/api/visible\")").unwrap();

        let report = analyzer().analyze_path(dir.path()).unwrap();

        assert_eq!(report.data_flows.len(), 1);
        assert_eq!(report.data_flows[0].target, "/api/visible");
    }

    #[test]
    fn test_unsupported_extensions_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("binary.exe"), "fetch(\"/api/x\")").unwrap();

        let report = analyzer().analyze_path(dir.path()).unwrap();
        assert_eq!(report.metadata.files_scanned, 0);
        assert!(report.data_flows.is_empty());
    }

    #[test]
    fn test_min_confidence_filters_report() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("app.js"), "a stray react mention").unwrap();

        let mut config = AnalyzerConfig::default();
        config.min_confidence = 90;
        let report = BlueprintAnalyzer::new(config)
            .analyze_path(dir.path())
            .unwrap();

        assert!(report.technologies.is_empty());
    }

    #[test]
    fn test_compliance_computed_over_deduped_list() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.js"), "react jsx").unwrap();
        fs::write(dir.path().join("b.js"), "react jsx").unwrap();

        let report = analyzer().analyze_path(dir.path()).unwrap();
        assert_eq!(report.compliance.total_count, report.technologies.len());
    }

    #[test]
    fn test_empty_directory_report() {
        let dir = TempDir::new().unwrap();
        let report = analyzer().analyze_path(dir.path()).unwrap();

        assert!(report.technologies.is_empty());
        assert_eq!(report.compliance.compliance_score, 0);
        let architecture = report.architecture.unwrap();
        assert_eq!(architecture.complexity_score, 0);
        assert!(architecture.layers.is_empty());
    }
}
