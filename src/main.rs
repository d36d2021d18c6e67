use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yoga_studio::cli::{self, commands, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yoga_studio=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init().await,
        Commands::Serve { host, port } => commands::serve(host, port).await,
        Commands::Migrate => commands::migrate().await,
        Commands::CreateAdmin {
            email,
            first_name,
            last_name,
            password,
        } => commands::create_admin(&email, &first_name, &last_name, password).await,
        Commands::AddTeacher {
            first_name,
            last_name,
        } => commands::add_teacher(&first_name, &last_name).await,
        Commands::Teachers { format } => commands::teachers(format).await,
        Commands::Sessions { format } => commands::sessions(format).await,
    };

    if let Err(e) = result {
        cli::error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
