//! Markdown output for analysis reports.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

use crate::analysis::{AnalysisReport, AnalysisSource};

/// Errors that can occur during markdown output operations.
#[derive(Error, Debug)]
pub enum MarkdownOutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for markdown output operations.
pub type MarkdownOutputResult<T> = Result<T, MarkdownOutputError>;

/// Writer for markdown-formatted analysis reports.
pub struct MarkdownReportWriter;

impl MarkdownReportWriter {
    /// Write a report to a markdown file.
    pub fn write_to_file<P: AsRef<Path>>(
        report: &AnalysisReport,
        path: P,
    ) -> MarkdownOutputResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(Self::to_markdown_string(report).as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Format a report as a markdown string.
    pub fn to_markdown_string(report: &AnalysisReport) -> String {
        let mut output = String::new();

        output.push_str("# Architecture Intelligence Analysis Report\n\n");
        output.push_str(&Self::format_source(report));
        output.push_str(&Self::format_technology_analysis(report));
        output.push_str(&Self::format_recommendations(report));
        output.push_str(&Self::format_security_analysis(report));
        output.push_str(&Self::format_data_flows(report));
        output.push_str(&Self::format_integration_points(report));
        output.push_str(&Self::format_architecture(report));
        output.push_str(&Self::format_metadata(report));

        output
    }

    fn format_source(report: &AnalysisReport) -> String {
        let described = match &report.source {
            AnalysisSource::File { path } => format!("file `{}`", path.display()),
            AnalysisSource::Directory { path } => format!("directory `{}`", path.display()),
            AnalysisSource::Repository { url, branch } => {
                format!("repository `{url}` (branch `{branch}`)")
            }
        };
        format!("Analyzed {described}.\n\n")
    }

    fn format_technology_analysis(report: &AnalysisReport) -> String {
        let compliance = &report.compliance;
        let mut section = String::from("## Technology Analysis\n\n");

        section.push_str(&format!(
            "**Total Technologies:** {}\n",
            compliance.total_count
        ));
        section.push_str(&format!("**Approved:** {}\n", compliance.approved_count));
        section.push_str(&format!("**Core:** {}\n", compliance.core_count));
        section.push_str(&format!(
            "**Non-Approved:** {}\n",
            compliance.non_approved_count
        ));
        section.push_str(&format!("**Unknown:** {}\n", compliance.unknown_count));
        section.push_str(&format!(
            "**Compliance Score:** {}%\n\n",
            compliance.compliance_score
        ));

        if !report.technologies.is_empty() {
            section.push_str("| Technology | Version | Confidence | Category |\n");
            section.push_str("|------------|---------|------------|----------|\n");
            for tech in &report.technologies {
                section.push_str(&format!(
                    "| {} | {} | {}% | {} |\n",
                    tech.name, tech.version, tech.confidence, tech.category
                ));
            }
            section.push('\n');
        }

        section
    }

    fn format_recommendations(report: &AnalysisReport) -> String {
        if report.compliance.recommendations.is_empty() {
            return String::new();
        }

        let mut section = String::from("## Recommendations\n\n");
        for recommendation in &report.compliance.recommendations {
            section.push_str(&format!("- {recommendation}\n"));
        }
        section.push('\n');
        section
    }

    fn format_security_analysis(report: &AnalysisReport) -> String {
        if report.security_findings.is_empty() {
            return String::new();
        }

        let mut section = String::from("## Security Analysis\n\n");
        for finding in &report.security_findings {
            section.push_str(&format!("**{}** ({})\n", finding.kind, finding.severity));
            section.push_str(&format!("- {}\n", finding.description));
            section.push_str(&format!("- Recommendation: {}\n\n", finding.recommendation));
        }
        section
    }

    fn format_data_flows(report: &AnalysisReport) -> String {
        if report.data_flows.is_empty() {
            return String::new();
        }

        let mut section = String::from("## Data Flows\n\n");
        section.push_str("| Type | Target | Security Level |\n");
        section.push_str("|------|--------|----------------|\n");
        for flow in &report.data_flows {
            section.push_str(&format!(
                "| {} | `{}` | {} |\n",
                flow.kind, flow.target, flow.security_level
            ));
        }
        section.push('\n');
        section
    }

    fn format_integration_points(report: &AnalysisReport) -> String {
        if report.integration_points.is_empty() {
            return String::new();
        }

        let mut section = String::from("## Integration Points\n\n");
        for integration in &report.integration_points {
            section.push_str(&format!(
                "- **{}**: `{}` ({})\n",
                integration.kind, integration.endpoint, integration.security_level
            ));
        }
        section.push('\n');
        section
    }

    fn format_architecture(report: &AnalysisReport) -> String {
        let Some(architecture) = &report.architecture else {
            return String::new();
        };

        let mut section = String::from("## Architecture\n\n");
        section.push_str(&format!("**Style:** {}\n", architecture.style));
        section.push_str(&format!(
            "**Complexity Score:** {}\n\n",
            architecture.complexity_score
        ));

        for layer in &architecture.layers {
            section.push_str(&format!(
                "### {}\n\n{}\n\nTechnologies: {}\n\n",
                layer.name,
                layer.description,
                layer.technologies.join(", ")
            ));
        }

        section
    }

    fn format_metadata(report: &AnalysisReport) -> String {
        let mut section = String::from("## Analysis Metadata\n\n");
        section.push_str(&format!(
            "- Analyzer version: {}\n",
            report.metadata.analyzer_version
        ));
        section.push_str(&format!("- Timestamp: {}\n", report.metadata.timestamp));
        section.push_str(&format!(
            "- Duration: {} ms\n",
            report.metadata.duration_ms
        ));
        section.push_str(&format!(
            "- Files scanned: {} (skipped: {})\n",
            report.metadata.files_scanned, report.metadata.files_skipped
        ));
        section
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::BlueprintAnalyzer;
    use std::fs;
    use tempfile::TempDir;

    fn report_with_findings() -> AnalysisReport {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("app.js"),
            "import react from 'react'\npassword = \"hunter2\"\nfetch(\"http://api.example.com\")",
        )
        .unwrap();
        BlueprintAnalyzer::default().analyze_path(dir.path()).unwrap()
    }

    #[test]
    fn test_contains_required_sections() {
        let markdown = MarkdownReportWriter::to_markdown_string(&report_with_findings());

        assert!(markdown.contains("## Technology Analysis"));
        assert!(markdown.contains("## Recommendations"));
        assert!(markdown.contains("## Security Analysis"));
    }

    #[test]
    fn test_security_findings_rendered() {
        let markdown = MarkdownReportWriter::to_markdown_string(&report_with_findings());
        assert!(markdown.contains("Hardcoded Secret"));
        assert!(markdown.contains("Insecure HTTP"));
    }

    #[test]
    fn test_compliance_score_rendered() {
        let markdown = MarkdownReportWriter::to_markdown_string(&report_with_findings());
        assert!(markdown.contains("Compliance Score:"));
    }

    #[test]
    fn test_empty_report_skips_optional_sections() {
        let dir = TempDir::new().unwrap();
        let report = BlueprintAnalyzer::default().analyze_path(dir.path()).unwrap();
        let markdown = MarkdownReportWriter::to_markdown_string(&report);

        assert!(markdown.contains("## Technology Analysis"));
        assert!(!markdown.contains("## Security Analysis"));
        assert!(!markdown.contains("## Data Flows"));
    }

    #[test]
    fn test_write_to_file() {
        let report = report_with_findings();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("report.md");

        MarkdownReportWriter::write_to_file(&report, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("# Architecture Intelligence Analysis Report"));
    }
}
