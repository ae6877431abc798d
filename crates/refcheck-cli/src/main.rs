use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use refcheck_core::ValidationConfig;
use refcheck_core::config_file::{self, ConfigFile};
use refcheck_metrics::MetricsConfig;
use refcheck_parsing::{ParsingConfig, ParsingConfigBuilder};
use refcheck_reporting::ExportFormat;

mod output;

use output::ColorMode;

/// Reference list checker for Chinese computer-education journal manuscripts (GB/T 7714)
#[derive(Parser, Debug)]
#[command(name = "refcheck", version, about, long_about = None)]
struct Cli {
    /// Config file to layer over the platform and working-directory configs
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify and validate a reference list
    Check {
        /// Text file holding a manuscript or a bare reference list
        #[arg(short, long, conflicts_with = "text", required_unless_present = "text")]
        input: Option<PathBuf>,

        /// Reference list given inline
        #[arg(long)]
        text: Option<String>,

        /// Report format: text, markdown or json
        #[arg(long, default_value = "text")]
        format: ExportFormat,

        /// Write the report to a file instead of stdout (extension follows --format if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        /// Do not append correctly formatted examples to failing reports
        #[arg(long)]
        no_examples: bool,

        /// Exit with status 1 when the report has errors
        #[arg(long)]
        strict: bool,

        /// Author count above which an et-al marker is required
        #[arg(long)]
        max_authors: Option<usize>,

        /// Title length above which a warning is raised
        #[arg(long)]
        max_title_chars: Option<usize>,

        /// Journal name length above which an abbreviation is suggested
        #[arg(long)]
        max_venue_chars: Option<usize>,
    },

    /// Check a manuscript title
    Title {
        /// Title text
        #[arg(required_unless_present = "file")]
        text: Option<String>,

        /// Read the title from the first lines of a manuscript file
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Check an abstract
    Abstract {
        /// Abstract text
        text: String,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Estimate a manuscript's word count
    Wordcount {
        /// Manuscript text
        #[arg(required_unless_present = "file")]
        text: Option<String>,

        /// Read the manuscript from a file
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Word limit (default 6000)
        #[arg(long)]
        limit: Option<usize>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Print correctly formatted reference examples
    Examples,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let file_config = resolve_config(cli.config.as_deref())?;

    match cli.command {
        Command::Check {
            input,
            text,
            format,
            output,
            no_color,
            no_examples,
            strict,
            max_authors,
            max_title_chars,
            max_venue_chars,
        } => {
            let mut validation = file_config.validation_config();
            if let Some(n) = max_authors {
                validation.max_authors = n;
            }
            if let Some(n) = max_title_chars {
                validation.max_title_chars = n;
            }
            if let Some(n) = max_venue_chars {
                validation.max_venue_chars = n;
            }
            let display = file_config.display.clone().unwrap_or_default();
            let opts = CheckOptions {
                format,
                output,
                color: !no_color && display.color.unwrap_or(true),
                show_examples: !no_examples && display.show_examples.unwrap_or(true),
                strict,
            };
            let mut parsing = ParsingConfigBuilder::from_config_file(&file_config);
            if let Some(n) = max_authors {
                parsing = parsing.max_listed_authors(n);
            }
            let parsing = parsing
                .build()
                .map_err(|e| anyhow::anyhow!("invalid pattern in config: {}", e))?;
            check(input, text, &parsing, &validation, opts)
        }
        Command::Title {
            text,
            file,
            no_color,
        } => {
            let title = match (text, file) {
                (Some(t), _) => t,
                (None, Some(path)) => {
                    let content = read_text(&path)?;
                    refcheck_metrics::title_from_text(&content).ok_or_else(|| {
                        anyhow::anyhow!("No title found in {}", path.display())
                    })?
                }
                (None, None) => anyhow::bail!("Provide a title or --file"),
            };
            let config = MetricsConfig::from_config_file(&file_config);
            let report = refcheck_metrics::check_title(&title, &config);
            let mut stdout = std::io::stdout();
            output::print_title_report(
                &mut stdout,
                &report,
                color_mode(no_color, &file_config),
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Abstract { text, no_color } => {
            let config = MetricsConfig::from_config_file(&file_config);
            let report = refcheck_metrics::check_abstract(&text, &config);
            let mut stdout = std::io::stdout();
            output::print_abstract_report(
                &mut stdout,
                &report,
                &config,
                color_mode(no_color, &file_config),
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Wordcount {
            text,
            file,
            limit,
            no_color,
        } => {
            let text = match (text, file) {
                (Some(t), _) => t,
                (None, Some(path)) => read_text(&path)?,
                (None, None) => anyhow::bail!("Provide manuscript text or --file"),
            };
            let mut config = MetricsConfig::from_config_file(&file_config);
            if let Some(limit) = limit {
                config.word_limit = limit;
            }
            let report = refcheck_metrics::check_wordcount(&text, &config);
            let mut stdout = std::io::stdout();
            output::print_wordcount_report(
                &mut stdout,
                &report,
                color_mode(no_color, &file_config),
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Examples => {
            let mut stdout = std::io::stdout();
            output::print_exemplars(&mut stdout, color_mode(false, &file_config))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

struct CheckOptions {
    format: ExportFormat,
    output: Option<PathBuf>,
    color: bool,
    show_examples: bool,
    strict: bool,
}

fn check(
    input: Option<PathBuf>,
    text: Option<String>,
    parsing: &ParsingConfig,
    validation: &ValidationConfig,
    opts: CheckOptions,
) -> anyhow::Result<ExitCode> {
    let report = match (input, text) {
        (Some(path), _) => {
            if !path.exists() {
                anyhow::bail!("File not found: {}", path.display());
            }
            refcheck_parsing::check_references_file(&path, parsing, validation)?
        }
        (None, Some(text)) => {
            refcheck_parsing::check_references_text(&text, parsing, validation)?
        }
        (None, None) => anyhow::bail!("Provide --input or --text"),
    };

    if let Some(ref path) = opts.output {
        let path = report_path(path, opts.format);
        refcheck_reporting::export_report(&report, opts.format, opts.show_examples, &path)?;
        eprintln!("{} report written to {}", opts.format, path.display());
    } else if opts.format == ExportFormat::Text {
        let mut stdout = std::io::stdout();
        output::print_report(
            &mut stdout,
            &report,
            opts.show_examples,
            ColorMode(opts.color),
        )?;
    } else {
        let rendered =
            refcheck_reporting::render_report(&report, opts.format, opts.show_examples)?;
        let mut stdout = std::io::stdout();
        stdout.write_all(rendered.as_bytes())?;
        writeln!(stdout)?;
    }

    if opts.strict && !report.valid {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Report file path, with the format's extension added when `path` has none.
fn report_path(path: &Path, format: ExportFormat) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(format.extension())
    }
}

/// Resolve configuration: platform file < CWD `.refcheck.toml` < `--config`.
fn resolve_config(explicit: Option<&Path>) -> anyhow::Result<ConfigFile> {
    let base = config_file::load_config();
    let Some(path) = explicit else {
        return Ok(base);
    };
    let overlay = config_file::read_config(path)
        .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), "loaded explicit config");
    Ok(config_file::merge(base, overlay))
}

fn color_mode(no_color: bool, config: &ConfigFile) -> ColorMode {
    let configured = config
        .display
        .as_ref()
        .and_then(|d| d.color)
        .unwrap_or(true);
    ColorMode(!no_color && configured)
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))
}
