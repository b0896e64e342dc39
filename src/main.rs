use clap::{Args, Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use configuration::{LogFormat, Settings};
use core_types::{RoastLevel, Shot};
use database::DbContext;
use service::Services;
use std::path::PathBuf;

/// The main entry point for the crema espresso journal.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be populated.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut settings = configuration::load_config(&cli.config)?;
    if let Some(format) = cli.log_format {
        settings.logging.format = format;
    }
    // Held until exit so the file writer flushes.
    let _guard = configuration::init_tracing(&settings.logging)?;
    tracing::info!(config = %cli.config.display(), "Settings loaded.");

    let pool = database::connect(&settings.database).await?;
    let services = Services::mysql(DbContext::new(pool, settings.database.query_timeout()));

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => handle_serve(args, settings, services).await,
        Commands::Ping => handle_ping(&services).await,
        Commands::Shots(args) => handle_shots(args, &services).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Record espresso shots against sheets, beans and roasters.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML settings file.
    #[arg(long, global = true, default_value = "crema.toml")]
    config: PathBuf,

    /// Overrides `logging.format` from the settings.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the JSON API.
    Serve(ServeArgs),
    /// Check that the database answers.
    Ping,
    /// Print recorded shots as a table.
    Shots(ShotsArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Overrides `server.host`.
    #[arg(long)]
    host: Option<String>,

    /// Overrides `server.port`.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args)]
struct ShotsArgs {
    /// Only list the shots of this sheet.
    #[arg(long)]
    sheet: Option<u64>,

    /// Only list shots pulled with beans of this roast, e.g. `medium-to-dark`.
    #[arg(long)]
    roast_level: Option<RoastLevel>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(args: ServeArgs, mut settings: Settings, services: Services) -> anyhow::Result<()> {
    if let Some(host) = args.host {
        settings.server.host = host;
    }
    if let Some(port) = args.port {
        settings.server.port = port;
    }
    web_server::run_server(&settings.server, services).await
}

async fn handle_ping(services: &Services) -> anyhow::Result<()> {
    services.ping().await?;
    println!("healthy");
    Ok(())
}

async fn handle_shots(args: ShotsArgs, services: &Services) -> anyhow::Result<()> {
    let mut shots = match args.sheet {
        Some(sheet_id) => services.shots.get_all_by_sheet(sheet_id).await?,
        None => services.shots.get_all().await?,
    };
    if let Some(level) = args.roast_level {
        shots.retain(|shot| shot.beans.roast_level == level);
    }

    if shots.is_empty() {
        println!("No shots recorded.");
        return Ok(());
    }
    println!("{}", shots_table(&shots));
    Ok(())
}

fn shots_table(shots: &[Shot]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "ID", "Sheet", "Beans", "Roast", "Roaster", "Grind", "In (g)", "Out (g)", "Ratio", "Time (s)",
        "Temp (°C)", "Rating", "vs. previous", "Notes",
    ]);

    for shot in shots {
        let ratio = shot
            .brew_ratio()
            .map(|ratio| format!("1:{ratio:.1}"))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            shot.id.to_string(),
            shot.sheet.name.clone(),
            shot.beans.name.clone(),
            shot.beans.roast_level.to_string(),
            shot.beans.roaster.name.clone(),
            shot.grind_setting.to_string(),
            format!("{:.1}", shot.quantity_in),
            format!("{:.1}", shot.quantity_out),
            ratio,
            format!("{:.1}", shot.shot_time.as_secs_f64()),
            format!("{:.1}", shot.water_temperature),
            format!("{:.1}", shot.rating),
            shot.comparison_with_previous.to_string(),
            shot.additional_notes.clone(),
        ]);
    }
    table
}
