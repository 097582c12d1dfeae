//! Write the OpenAPI document as JSON to stdout or a file.

use std::io::Write;
use std::path::PathBuf;

use backend::doc::ApiDoc;
use clap::Parser;
use color_eyre::eyre::{Context, Result};
use utoipa::OpenApi;

#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Export the Ask a Local OpenAPI document")]
struct Args {
    /// Destination file; stdout when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .wrap_err("failed to serialise OpenAPI document")?;

    match args.output {
        Some(path) => std::fs::write(&path, json)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").wrap_err("failed to write to stdout")?;
        }
    }
    Ok(())
}
