use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use dfz::config::AppConfig;
use dfz::database::{establish_connection, get_database_url, seed_data, setup_database};
use dfz::server;
use dfz::services::{
    CalculationMetaService, LineService, SensitivityAnalysisService, SettingsCalculationService,
};

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    /// YAML file with database, port and factor overrides
    #[clap(long, global = true)]
    config: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Serve {
        #[clap(short, long)]
        port: Option<u16>,
        #[clap(short, long)]
        database: Option<String>,
    },
    Db {
        #[clap(subcommand)]
        command: DbCommands,
    },
    /// Replace reference data with the demonstration lines
    Seed {
        #[clap(short, long)]
        database: Option<String>,
    },
    /// Open a calculation run for a line and compute its settings
    Calculate {
        /// Dispatch name of the line
        #[clap(long)]
        line: String,
        #[clap(short, long)]
        database: Option<String>,
    },
    /// Run the sensitivity analysis of a calculation run
    Sensitivity {
        /// Calculation run id
        #[clap(short, long)]
        calculation: i32,
        #[clap(short, long)]
        database: Option<String>,
    },
    /// List calculation runs
    List {
        #[clap(short, long)]
        database: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum DbCommands {
    Init {
        #[clap(short, long)]
        database: Option<String>,
    },
    Migrate {
        #[clap(subcommand)]
        direction: server::MigrateDirection,
        #[clap(short, long)]
        database: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    let config = AppConfig::load(args.config.as_deref())?;
    let database_for = |database: Option<String>| database.unwrap_or_else(|| config.database.clone());

    match args.command {
        Commands::Serve { port, database } => {
            let port = port.unwrap_or(config.port);
            info!("Starting server on port {}", port);
            server::start_server(port, &database_for(database), config.factors.clone()).await?;
        }
        Commands::Db { command } => match command {
            DbCommands::Init { database } => {
                let database = database_for(database);
                info!("Initializing database: {}", database);
                server::migrate_database(&database, server::MigrateDirection::Up).await?;
            }
            DbCommands::Migrate {
                direction,
                database,
            } => {
                info!("Running database migration: {:?}", direction);
                server::migrate_database(&database_for(database), direction).await?;
            }
        },
        Commands::Seed { database } => {
            let db = open_database(&database_for(database)).await?;
            let summary = seed_data::seed_reference_data(&db).await?;
            info!(
                "Seeded {} lines, {} substations, {} half-sets, {} fault calculations",
                summary.lines, summary.substations, summary.half_sets, summary.fault_calculations
            );
        }
        Commands::Calculate { line, database } => {
            let db = open_database(&database_for(database)).await?;
            let line = LineService::new(db.clone())
                .find_by_dispatch_name(&line)
                .await?;

            let metas = CalculationMetaService::new(db.clone());
            let meta = metas.create_for_line(line.id).await?;
            let summary = SettingsCalculationService::new(db.clone(), config.factors.clone())
                .run(&meta)
                .await?;
            if !summary.skipped.is_empty() {
                info!("Skipped components: {}", summary.skipped.join(", "));
            }

            println!(
                "Calculation #{} (id {}) for {}",
                meta.calculation_number, meta.id, line.dispatch_name
            );
            for row in metas.settings_results(meta.id).await? {
                println!(
                    "{:<30} {:<10} {:>12}",
                    row.substation, row.designation, row.result_value
                );
            }
        }
        Commands::Sensitivity {
            calculation,
            database,
        } => {
            let db = open_database(&database_for(database)).await?;
            let metas = CalculationMetaService::new(db.clone());
            let meta = metas.get_calculation(calculation).await?;
            SensitivityAnalysisService::new(db.clone()).run(&meta).await?;

            for row in metas.sensitivity_results(meta.id).await? {
                println!(
                    "{:<30} {:<10} {:<7} {:<45} {:>8.2}",
                    row.substation,
                    row.designation,
                    row.fault_type,
                    row.network_topology,
                    row.sensitivity_rate
                );
            }
        }
        Commands::List { database } => {
            let db = open_database(&database_for(database)).await?;
            for item in CalculationMetaService::new(db).list_calculations().await? {
                println!(
                    "#{:<5} id {:<5} {}  {}",
                    item.calculation_number, item.id, item.created_at, item.line_name
                );
            }
        }
    }

    Ok(())
}

async fn open_database(database_path: &str) -> Result<sea_orm::DatabaseConnection> {
    let db = establish_connection(&get_database_url(Some(database_path))).await?;
    setup_database(&db).await?;
    Ok(db)
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
            "handlebars=off,sqlx=warn,{}",
            log_level
        )))
        .without_time()
        .init();
}
