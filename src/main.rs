//! tsvgraph CLI: convert typed TSV tables (and RDF) between graph formats.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use miette::{IntoDiagnostic, Result};

use tsvgraph::config::ConvertConfig;
use tsvgraph::convert::{self, ConversionReport};
use tsvgraph::format::{InputFormat, OutputFormat};

#[derive(Parser)]
#[command(name = "tsvgraph", version, about = "Typed TSV to RDF converter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an input file into a graph format.
    Convert {
        /// Input file, or `-` for stdin.
        input: PathBuf,

        /// Input format name (inferred from the file extension if omitted).
        #[arg(long)]
        from: Option<String>,

        /// Output format name.
        #[arg(long, default_value = "turtle")]
        to: String,

        /// Output file (stdout if omitted).
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// IRI prefix for synthesized resources (overrides the config file).
        #[arg(long)]
        namespace: Option<String>,

        /// Input text encoding label (overrides the config file).
        #[arg(long)]
        input_encoding: Option<String>,

        /// Output text encoding label (defaults to the input encoding).
        #[arg(long)]
        output_encoding: Option<String>,

        /// How to print the conversion summary on stderr.
        #[arg(long, value_enum, default_value = "text")]
        report: ReportStyle,
    },

    /// List supported input and output formats.
    Formats,
}

#[derive(Clone, Copy, ValueEnum)]
enum ReportStyle {
    Text,
    Json,
    None,
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set (e.g., in tests)

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Formats => {
            println!("Input formats:");
            for f in InputFormat::ALL {
                println!("  {:<10} {:<28} {}", f.name(), f.mime_type(), f.label());
            }
            println!("Output formats:");
            for f in OutputFormat::ALL {
                println!("  {:<10} {:<28} {}", f.name(), f.mime_type(), f.label());
            }
        }

        Commands::Convert {
            input,
            from,
            to,
            output,
            config,
            namespace,
            input_encoding,
            output_encoding,
            report,
        } => {
            let mut cfg = match &config {
                Some(path) => ConvertConfig::load(path)?,
                None => ConvertConfig::default(),
            };
            if let Some(ns) = namespace {
                cfg.namespace = ns;
            }
            if let Some(enc) = input_encoding {
                cfg.input_encoding = enc;
            }
            if let Some(enc) = output_encoding {
                cfg.output_encoding = Some(enc);
            }

            let input_format = match from {
                Some(name) => InputFormat::from_name(&name)?,
                None => InputFormat::from_path(&input).unwrap_or(InputFormat::Tsv),
            };
            let output_format = OutputFormat::from_name(&to)?;

            let bytes = read_input(&input)?;
            let (graph, summary) = convert::read_graph(&bytes, input_format, &cfg)?;

            match &output {
                Some(path) => {
                    let file = std::fs::File::create(path).into_diagnostic()?;
                    convert::write_graph(&graph, output_format, std::io::BufWriter::new(file), &cfg)?;
                }
                None => {
                    let stdout = std::io::stdout().lock();
                    convert::write_graph(&graph, output_format, stdout, &cfg)?;
                }
            }

            print_report(&summary, report)?;
        }
    }

    Ok(())
}

fn read_input(input: &Path) -> Result<Vec<u8>> {
    if input.as_os_str() == "-" {
        let mut bytes = Vec::new();
        std::io::stdin().read_to_end(&mut bytes).into_diagnostic()?;
        Ok(bytes)
    } else {
        std::fs::read(input).into_diagnostic()
    }
}

fn print_report(summary: &ConversionReport, style: ReportStyle) -> Result<()> {
    let mut stderr = std::io::stderr().lock();
    match style {
        ReportStyle::None => {}
        ReportStyle::Text => {
            writeln!(
                stderr,
                "{} entities, {} statements ({} data rows, {} skipped)",
                summary.entities, summary.statements, summary.data_rows, summary.skipped_rows
            )
            .into_diagnostic()?;
        }
        ReportStyle::Json => {
            let json = serde_json::to_string_pretty(summary).into_diagnostic()?;
            writeln!(stderr, "{json}").into_diagnostic()?;
        }
    }
    Ok(())
}
