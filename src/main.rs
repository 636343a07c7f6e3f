use clap::{Parser, Subcommand};
use folio::{DataRecord, Invoice, PipelineError, RendererBuilder, Template};
use std::fs;
use std::path::{Path, PathBuf};

/// Render PDF documents from JSON templates and data.
#[derive(Parser)]
#[command(name = "folio", version, about)]
struct Cli {
    /// JSON configuration file (currency fields, asset root, font defaults).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a template against a JSON data record.
    Render {
        template: PathBuf,
        data: PathBuf,
        output: PathBuf,
    },
    /// Render an invoice with the built-in invoice layout.
    Invoice { invoice: PathBuf, output: PathBuf },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), PipelineError> {
    let mut builder = RendererBuilder::new();
    if let Some(path) = &cli.config {
        log::info!("Loading configuration from {}", path.display());
        builder = builder.with_config_file(path)?;
    }
    let renderer = builder.build()?;

    let (template, record, output) = match cli.command {
        Command::Render {
            template,
            data,
            output,
        } => {
            log::info!("Loading template from {}", template.display());
            let template = Template::from_file(&template)?;
            log::info!("Loading data from {}", data.display());
            let record = DataRecord::from_json_str(&read(&data)?)?;
            (template, record, output)
        }
        Command::Invoice { invoice, output } => {
            log::info!("Loading invoice from {}", invoice.display());
            let invoice = Invoice::from_json_str(&read(&invoice)?)?;
            (invoice.standard_template(), invoice.to_record()?, output)
        }
    };

    let result = renderer.render_to_file(&template, &record, &output)?;
    if !result.skipped.is_empty() {
        eprintln!("{} element(s) skipped", result.skipped.len());
    }
    println!("Successfully generated {}", output.display());
    Ok(())
}

fn read(path: &Path) -> Result<String, PipelineError> {
    fs::read_to_string(path).map_err(|e| {
        PipelineError::Io(std::io::Error::new(
            e.kind(),
            format!("failed to read '{}': {}", path.display(), e),
        ))
    })
}
