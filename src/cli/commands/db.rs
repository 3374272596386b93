use clap::Subcommand;
use serde_json::json;

use crate::cli::utils::{output_error, output_success};
use crate::cli::OutputFormat;
use crate::config::config;
use crate::database::{DatabaseManager, PgProductStore, ProductStore};

#[derive(Subcommand)]
pub enum DbCommands {
    #[command(about = "Drop and recreate the products table")]
    Clear,

    #[command(about = "Create the products table if it does not exist")]
    Sync,
}

pub async fn handle(cmd: DbCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    let pool = DatabaseManager::pool(&config().database)?;
    let store = PgProductStore::new(pool);

    let (result, message) = match cmd {
        DbCommands::Clear => (store.clear().await, "Datos eliminados correctamente"),
        DbCommands::Sync => (store.sync().await, "Tabla de productos sincronizada"),
    };

    match result {
        Ok(()) => output_success(output_format, message, Some(json!({ "store": store.backend() }))),
        Err(e) => {
            output_error(output_format, &e.to_string(), Some("DATABASE_ERROR"))?;
            std::process::exit(1);
        }
    }
}
