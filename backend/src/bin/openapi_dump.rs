//! Print the OpenAPI document as JSON, or YAML with `--yaml`.

use std::io::Write;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use users_service::ApiDoc;
use utoipa::OpenApi;

#[derive(Debug, Parser)]
#[command(name = "openapi-dump", about = "Print the users service OpenAPI document")]
struct Cli {
    /// Emit YAML instead of pretty-printed JSON.
    #[arg(long)]
    yaml: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let doc = ApiDoc::openapi();

    let rendered = if cli.yaml {
        doc.to_yaml().wrap_err("render OpenAPI as YAML")?
    } else {
        doc.to_pretty_json().wrap_err("render OpenAPI as JSON")?
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{rendered}").wrap_err("write OpenAPI document")?;
    Ok(())
}
