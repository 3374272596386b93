use crate::api::openapi;
use crate::cli::OutputFormat;
use crate::config::config;

/// Print the OpenAPI document for the configured base path
pub fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let document = openapi::document(&config().api.base_path);
    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&document)?),
        OutputFormat::Text => print!("{}", serde_yaml::to_string(&document)?),
    }
    Ok(())
}
