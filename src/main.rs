use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use biendit::connector::api::controller::GenerateController;
use biendit::{build_router, Container, ContainerConfig, ListingInput, Provider};

#[derive(Parser)]
#[command(name = "biendit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Text-generation provider: "gemini" or "openai".
    #[arg(long, global = true, default_value = "gemini")]
    provider: String,

    /// Google spreadsheet receiving the append-only log.
    #[arg(long, global = true, default_value = "DB_BienDit_MVP")]
    spreadsheet: String,

    /// Use the canned-text generator instead of a hosted provider.
    #[arg(long, global = true)]
    mock_generator: bool,

    /// Keep log rows in memory instead of Google Sheets.
    #[arg(long, global = true)]
    memory_log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the listing form.
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: String,
    },

    /// Generate one listing from the command line.
    Generate {
        #[arg(long)]
        property_type: String,

        #[arg(long)]
        city: String,

        #[arg(long, default_value_t = 0)]
        surface: u32,

        #[arg(long, default_value = "")]
        price: String,

        #[arg(long)]
        strengths: String,

        #[arg(long, default_value = "")]
        weaknesses: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = ContainerConfig {
        provider: Provider::from_str(&cli.provider),
        spreadsheet_name: cli.spreadsheet,
        mock_generator: cli.mock_generator,
        memory_log: cli.memory_log,
    };
    let container = Arc::new(Container::new(config));

    match cli.command {
        Commands::Serve { addr } => {
            let app = build_router(Arc::clone(&container));
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            info!(
                "Serving the BienDit form on http://{addr} (provider: {})",
                container.provider_name()
            );
            axum::serve(listener, app).await?;
        }

        Commands::Generate {
            property_type,
            city,
            surface,
            price,
            strengths,
            weaknesses,
        } => {
            let controller = GenerateController::new(&container);
            let input = ListingInput {
                property_type,
                city,
                surface_area: surface,
                price,
                strengths,
                weaknesses,
            };
            let output = controller.generate(input).await?;
            println!("{output}");
        }
    }

    Ok(())
}
