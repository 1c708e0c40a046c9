//! docsift command-line interface.
//!
//! A thin wrapper around the library: it opens files, runs the pipeline and
//! presents results. All extraction semantics live in `docsift` itself; the
//! CLI's only policy is presentation (stdout for text, stderr for failures,
//! non-zero exit when anything failed).

use anyhow::Context;
use clap::{Parser, Subcommand};
use docsift::{ExtractError, Extraction, ExtractionConfig, MediaType, Pipeline, Sniffer};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "docsift", version, about = "Sniff document formats and extract their text")]
struct Cli {
    /// Increase log verbosity (repeat for more).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract text from one or more documents.
    Extract {
        /// Input files. With none, reads a single document from stdin.
        paths: Vec<PathBuf>,

        /// Emit one JSON record per input instead of raw text.
        #[arg(long)]
        json: bool,

        /// Per-document decode deadline in milliseconds.
        #[arg(long, value_name = "MS")]
        timeout_ms: Option<u64>,

        /// TOML configuration file (sniff_window, timeout_ms, normalize).
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Detect media types without decoding.
    Sniff {
        /// Input files.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// List media types and which decoder, if any, is bound to each.
    Formats,
}

#[derive(Serialize)]
struct Report<'a> {
    path: &'a str,
    #[serde(flatten)]
    extraction: Option<&'a Extraction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
}

#[derive(Serialize)]
struct ErrorReport {
    kind: &'static str,
    message: String,
}

fn error_kind(err: &ExtractError) -> &'static str {
    match err {
        ExtractError::Io(_) => "io",
        ExtractError::UnsupportedFormat { .. } => "unsupported-format",
        ExtractError::DecodeFailed { .. } => "decode-failed",
        ExtractError::Timeout { .. } => "timeout",
        ExtractError::Validation { .. } => "validation",
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Extract {
            paths,
            json,
            timeout_ms,
            config,
        } => {
            let mut config = match config {
                Some(path) => ExtractionConfig::from_file(&path)
                    .with_context(|| format!("failed to load config from {}", path.display()))?,
                None => ExtractionConfig::default(),
            };
            if timeout_ms.is_some() {
                config.timeout_ms = timeout_ms;
            }

            let pipeline = Pipeline::with_default_decoders(config).context("failed to build pipeline")?;
            tracing::debug!(decoders = ?pipeline.registry().list(), "pipeline ready");
            extract_command(&pipeline, &paths, json).await
        }
        Command::Sniff { paths } => Ok(sniff_command(&paths)),
        Command::Formats => {
            formats_command();
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn extract_command(pipeline: &Pipeline, paths: &[PathBuf], json: bool) -> anyhow::Result<ExitCode> {
    if paths.is_empty() {
        let mut content = Vec::new();
        std::io::stdin()
            .read_to_end(&mut content)
            .context("failed to read stdin")?;
        let ok = report_one(pipeline.extract_bytes(&content, None).await, "<stdin>", json);
        return Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    let mut failed = false;
    for path in paths {
        let result = pipeline.extract_file(path).await;
        if !report_one(result, &path.display().to_string(), json) {
            failed = true;
        }
    }

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

/// Print one result; returns false on failure. Text goes to stdout;
/// failures go to stderr with their kind and the offending path.
fn report_one(result: docsift::Result<Extraction>, path: &str, json: bool) -> bool {
    match result {
        Ok(extraction) => {
            if json {
                let report = Report {
                    path,
                    extraction: Some(&extraction),
                    error: None,
                };
                println!("{}", serde_json::to_string(&report).expect("report serializes"));
            } else {
                print!("{}", extraction.text);
                if !extraction.text.ends_with('\n') {
                    println!();
                }
            }
            true
        }
        Err(err) => {
            if json {
                let report = Report {
                    path,
                    extraction: None,
                    error: Some(ErrorReport {
                        kind: error_kind(&err),
                        message: err.to_string(),
                    }),
                };
                println!("{}", serde_json::to_string(&report).expect("report serializes"));
            }
            eprintln!("docsift: {}: {} ({})", path, err, error_kind(&err));
            false
        }
    }
}

fn sniff_command(paths: &[PathBuf]) -> ExitCode {
    let sniffer = Sniffer::new();
    let mut failed = false;

    for path in paths {
        match read_sniff_prefix(path) {
            Ok(prefix) => {
                let hint = path.file_name().and_then(|n| n.to_str());
                let media = sniffer.sniff(&prefix, hint);
                println!("{}\t{}", path.display(), media);
            }
            Err(err) => {
                eprintln!("docsift: {}: {}", path.display(), err);
                failed = true;
            }
        }
    }

    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}

fn read_sniff_prefix(path: &Path) -> std::io::Result<Vec<u8>> {
    let mut file = std::fs::File::open(path)?;
    let mut buf = vec![0u8; docsift::DEFAULT_SNIFF_LEN];
    let mut filled = 0;
    loop {
        let n = file.read(&mut buf[filled..])?;
        if n == 0 || filled == buf.len() {
            break;
        }
        filled += n;
    }
    buf.truncate(filled);
    Ok(buf)
}

fn formats_command() {
    let pipeline = match Pipeline::with_default_decoders(ExtractionConfig::default()) {
        Ok(pipeline) => pipeline,
        Err(err) => {
            eprintln!("docsift: {}", err);
            return;
        }
    };

    let all = [
        MediaType::Pdf,
        MediaType::Docx,
        MediaType::Pptx,
        MediaType::Xlsx,
        MediaType::Html,
        MediaType::Xml,
        MediaType::Markdown,
        MediaType::PlainText,
        MediaType::Zip,
    ];
    for media in all {
        match pipeline.registry().lookup(media) {
            Some(decoder) => println!("{}\t{}", media, decoder.name()),
            None => println!("{}\t(unbound)", media),
        }
    }
}
