use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use transform2pdf::{AppConfig, ConversionRequest, Dialect, build_pipeline, server};

// Use Mimalloc to avoid heap fragmentation in the long-running server.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

/// Renders e-invoices and orders (UBL, CII, CIO) as PDF.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Config file (defaults to ./transform2pdf.{toml,yaml,json} if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server.
    Serve,
    /// Convert a single XML file.
    Convert {
        input: PathBuf,
        /// Output file (defaults to the input name with `.pdf` or `.html`).
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Label language.
        #[arg(long)]
        lang: Option<String>,
        /// Show business term ids next to labels.
        #[arg(long)]
        show_ids: bool,
        /// Write the rendered HTML instead of a PDF.
        #[arg(long)]
        html: bool,
        /// Skip detection: cii, cio, ubl, ubl-creditnote.
        #[arg(long)]
        dialect: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Serve => server::serve(config).await,
        Command::Convert {
            input,
            output,
            lang,
            show_ids,
            html,
            dialect,
        } => {
            let mut request = ConversionRequest::new(
                tokio::fs::read_to_string(&input)
                    .await
                    .with_context(|| format!("Failed to read '{}'", input.display()))?,
                input.display().to_string(),
            );
            if let Some(lang) = lang {
                request = request.with_language(lang);
            }
            if show_ids {
                request = request.with_show_ids(true);
            }
            if let Some(name) = dialect {
                let Some(dialect) = Dialect::from_name(&name) else {
                    bail!("Unknown dialect '{name}'. Expected cii, cio, ubl or ubl-creditnote.");
                };
                request = request.with_dialect(dialect);
            }

            let pipeline = build_pipeline(&config)?;
            if html {
                let preview = pipeline.render_html(&request).await?;
                let output = output.unwrap_or_else(|| input.with_extension("html"));
                tokio::fs::write(&output, preview.html.as_str()).await?;
                println!("Wrote {}", output.display());
            } else {
                let conversion = pipeline.convert(request).await?;
                let output = output.unwrap_or_else(|| default_pdf_path(&input, conversion.artifact.file_name()));
                let pages = conversion.artifact.page_count();
                let written = conversion.artifact.persist(&output)?;
                println!("Wrote {} ({} pages)", written.display(), pages);
            }
            Ok(())
        }
    }
}

fn default_pdf_path(input: &Path, file_name: &str) -> PathBuf {
    input
        .parent()
        .map(|dir| dir.join(file_name))
        .unwrap_or_else(|| PathBuf::from(file_name))
}
