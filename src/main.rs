use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

use archintel::analysis::{
    AnalysisReport, BlueprintAnalyzer, JsonReportWriter, MarkdownReportWriter, PatternCatalog,
    PatternFilter, UsageLevel,
};
use archintel::config::AnalyzerConfig;
use archintel::logging::{init_logging, LoggingConfig};

/// Output format for analysis reports
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// JSON structured output
    #[default]
    Json,
    /// Human-readable markdown report
    Markdown,
}

/// Pattern usage level filter
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliUsageLevel {
    Low,
    Medium,
    High,
}

impl From<CliUsageLevel> for UsageLevel {
    fn from(level: CliUsageLevel) -> Self {
        match level {
            CliUsageLevel::Low => UsageLevel::Low,
            CliUsageLevel::Medium => UsageLevel::Medium,
            CliUsageLevel::High => UsageLevel::High,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "archintel")]
#[command(version)]
#[command(about = "Governance-first technology compliance and architecture analysis")]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Suppress all output except errors
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(long, short, action = ArgAction::Count, global = true, conflicts_with = "quiet")]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a local file or directory
    Analyze {
        /// File or directory to analyze
        path: PathBuf,

        /// Report format
        #[arg(long, short, default_value = "json", value_enum)]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Clone and analyze a remote Git repository
    Repo {
        /// Repository URL
        url: String,

        /// Branch to clone
        #[arg(long, short, default_value = "main")]
        branch: String,

        /// Report format
        #[arg(long, short, default_value = "json", value_enum)]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// List the governed architecture pattern catalog
    Patterns {
        /// Filter by category (e.g., Data, Resilience)
        #[arg(long)]
        category: Option<String>,

        /// Filter by usage level
        #[arg(long, value_enum)]
        usage: Option<CliUsageLevel>,

        /// Minimum compliance score
        #[arg(long, default_value = "0")]
        min_compliance: u8,

        /// Report format
        #[arg(long, short, default_value = "json", value_enum)]
        format: OutputFormat,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let logging = if cli.quiet {
        LoggingConfig::quiet()
    } else {
        LoggingConfig::with_verbosity(cli.verbose)
    };
    init_logging(&logging);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };

    match cli.command {
        Commands::Analyze {
            path,
            format,
            output,
        } => {
            let analyzer = BlueprintAnalyzer::new(config);
            let report = analyzer.analyze_path(&path)?;
            emit_report(&report, format, output.as_deref())
        }
        Commands::Repo {
            url,
            branch,
            format,
            output,
        } => {
            let analyzer = BlueprintAnalyzer::new(config);
            let report = analyzer.analyze_git_repo(&url, &branch)?;
            emit_report(&report, format, output.as_deref())
        }
        Commands::Patterns {
            category,
            usage,
            min_compliance,
            format,
        } => {
            let filter = PatternFilter {
                category,
                usage_level: usage.map(UsageLevel::from),
                min_compliance,
            };
            emit_patterns(&filter, format)
        }
    }
}

fn emit_report(
    report: &AnalysisReport,
    format: OutputFormat,
    output: Option<&std::path::Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    match (format, output) {
        (OutputFormat::Json, Some(path)) => JsonReportWriter::write_to_file(report, path)?,
        (OutputFormat::Json, None) => println!("{}", JsonReportWriter::to_json_string(report)?),
        (OutputFormat::Markdown, Some(path)) => MarkdownReportWriter::write_to_file(report, path)?,
        (OutputFormat::Markdown, None) => {
            println!("{}", MarkdownReportWriter::to_markdown_string(report))
        }
    }
    Ok(())
}

fn emit_patterns(
    filter: &PatternFilter,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let patterns = PatternCatalog::query(filter);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&patterns)?),
        OutputFormat::Markdown => {
            println!("# Architecture Pattern Catalog\n");
            println!("| Pattern | Category | Compliance | Usage |");
            println!("|---------|----------|------------|-------|");
            for pattern in patterns {
                println!(
                    "| {} | {} | {}% | {} |",
                    pattern.name, pattern.category, pattern.compliance_score, pattern.usage_level
                );
            }
        }
    }
    Ok(())
}
