use std::path::PathBuf;

use agrirecords::config::{AppConfig, Environment};
use agrirecords::server;
use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    /// Overrides AGRIRECORDS_ENV
    #[clap(long, global = true)]
    environment: Option<Environment>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Serve {
        #[clap(short, long, default_value = "3000")]
        port: u16,
        #[clap(short, long, default_value = "agrirecords.db")]
        database: String,
        #[clap(long)]
        cors_origin: Option<String>,
        /// Also write exported workbooks here
        #[clap(long)]
        export_dir: Option<PathBuf>,
    },
    Db {
        #[clap(subcommand)]
        command: DbCommands,
    },
    /// Create the administrator role and user from AGRIRECORDS_ADMIN_*
    SeedAdmin {
        #[clap(short, long, default_value = "agrirecords.db")]
        database: String,
    },
}

#[derive(Subcommand, Debug)]
enum DbCommands {
    Migrate {
        #[clap(subcommand)]
        direction: server::MigrateDirection,
        #[clap(short, long, default_value = "agrirecords.db")]
        database: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    let mut config = AppConfig::from_env()?;
    if let Some(environment) = args.environment {
        config.environment = environment;
    }

    match args.command {
        Commands::Serve {
            port,
            database,
            cors_origin,
            export_dir,
        } => {
            if export_dir.is_some() {
                config.export_dir = export_dir;
            }
            info!(
                "Starting server on port {} ({:?})",
                port, config.environment
            );
            server::start_server(port, &database, cors_origin.as_deref(), config).await?;
        }
        Commands::Db { command } => match command {
            DbCommands::Migrate {
                direction,
                database,
            } => {
                info!("Running database migration: {:?}", direction);
                server::migrate_database(&database, direction).await?;
            }
        },
        Commands::SeedAdmin { database } => {
            info!("Seeding administrator into {}", database);
            server::seed_admin(&database, config).await?;
        }
    }

    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!(
            "sqlx=warn,sea_orm_migration=warn,{}",
            log_level
        )))
        .init();
}
