use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use serde_json::json;

use docblock_writer::{
    ComposeOptions, DeclarationIndex, DeclarationProvider, DocBlockParser, DocblockWriter,
    LayoutConfig, Result, SourceScanner, TagEntry,
};

#[derive(Parser)]
#[command(name = "docblock-writer", about = "Rewrite the docblock above a class declaration")]
struct Cli {
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Layout config (TOML). Defaults to ./docblock.toml when present
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Source files or directories to scan for declarations
    #[arg(long, required_unless_present = "index", conflicts_with = "index")]
    path: Vec<PathBuf>,

    /// JSON declaration index instead of scanning sources
    #[arg(long)]
    index: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a new docblock and write it into the source file
    Write {
        /// Fully-qualified declaration name, e.g. App\Models\User
        identifier: String,

        #[command(flatten)]
        source: SourceArgs,

        #[arg(long)]
        summary: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Tag to add as "name value", e.g. --tag 'property string $name'
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Discard the existing summary, description and tags
        #[arg(long)]
        truncate: bool,

        /// Keep tags in insertion order
        #[arg(long)]
        no_sort: bool,

        /// Print the resulting file instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Print a declaration and its parsed docblock as JSON
    Show {
        identifier: String,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// List every declaration found
    List {
        #[command(flatten)]
        source: SourceArgs,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else if cli.quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    let config = LayoutConfig::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Write {
            identifier,
            source,
            summary,
            description,
            tags,
            truncate,
            no_sort,
            dry_run,
        } => {
            let provider = build_provider(&source, &config)?;
            let mut writer = DocblockWriter::with_parser(
                &identifier,
                provider.as_ref(),
                Box::new(DocBlockParser),
                &config,
            )?;

            if let Some(summary) = summary {
                writer.set_summary(&summary);
            }
            if let Some(description) = description {
                writer.set_description(&description);
            }
            for arg in &tags {
                let tag = TagEntry::parse(arg)?;
                writer.add_tag(tag.name, tag.value);
            }

            let options = ComposeOptions {
                truncate,
                sort: !no_sort,
            };

            if dry_run {
                println!("{}", writer.render(options)?);
                Ok(true)
            } else {
                writer.compose_with(options)
            }
        }

        Commands::Show { identifier, source } => {
            let provider = build_provider(&source, &config)?;
            let writer = DocblockWriter::with_parser(
                &identifier,
                provider.as_ref(),
                Box::new(DocBlockParser),
                &config,
            )?;
            let mapper = writer.mapper();

            let report = json!({
                "identifier": mapper.identifier(),
                "file": mapper.file_path(),
                "start_line": mapper.start_line(),
                "effective_start_line": mapper.effective_start_line(),
                "indentation": mapper.indentation(),
                "comment": mapper.parsed()?,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(true)
        }

        Commands::List { source } => {
            let provider = build_provider(&source, &config)?;
            for identifier in provider.identifiers() {
                if let Some(decl) = provider.resolve(&identifier) {
                    let file = decl
                        .file_path
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "<unmapped>".to_string());
                    println!("{}\t{}:{}", identifier, file, decl.start_line);
                }
            }
            Ok(true)
        }
    }
}

fn build_provider(
    source: &SourceArgs,
    config: &LayoutConfig,
) -> Result<Box<dyn DeclarationProvider>> {
    if let Some(index) = &source.index {
        return Ok(Box::new(DeclarationIndex::load(index)?));
    }

    let mut scanner = SourceScanner::new(config.clone());
    for path in &source.path {
        scanner.scan_path(path)?;
    }
    Ok(Box::new(scanner))
}
