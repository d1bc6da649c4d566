// ABOUTME: Main entry point for the slidedeck program.
// ABOUTME: Provides CLI interface and executes commands from the library.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render markdown slides into an HTML deck
    Render(RenderArgs),

    /// Create a new deck directory with a starter markdown file and template
    Create(CreateArgs),
}

#[derive(Args)]
struct RenderArgs {
    /// Path to the markdown file (default: slides.md)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to output HTML file (default: slides.html)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Template file (default: built-in template)
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Keep running and re-render when the source changes
    #[arg(short, long)]
    watch: bool,
}

#[derive(Args)]
struct CreateArgs {
    /// Directory to create
    path: PathBuf,

    /// Write into a non-empty directory
    #[arg(short, long)]
    force: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Render(args)) => {
            let config = slidedeck::Config::from_env().with_overrides(
                args.input,
                args.output,
                args.template,
            );

            if args.watch {
                slidedeck::watch_markdown(config.get_watch_config())
                    .context("Watch mode failed")?;
            } else {
                slidedeck::process_slides(
                    &config.markdown_path,
                    &config.output_path,
                    config.template_path.as_deref(),
                )
                .with_context(|| format!("Failed to render {:?}", config.markdown_path))?;
                println!("Slides generated successfully: {:?}", config.output_path);
            }
            Ok(())
        }
        Some(Commands::Create(args)) => {
            let written = slidedeck::create_deck(&args.path, args.force)
                .with_context(|| format!("Failed to create deck in {:?}", args.path))?;
            for path in written {
                println!("Created {:?}", path);
            }
            Ok(())
        }
        None => {
            println!("No command specified. Use --help for usage information.");
            Ok(())
        }
    }
}
