//! CLI interface for the yoga studio server

pub mod commands;
mod output;

pub use output::*;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "yoga-studio")]
#[command(version)]
#[command(about = "Yoga studio session booking API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new yoga.toml configuration file
    Init,

    /// Start the HTTP API server
    Serve {
        /// Host to bind to (defaults to server.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to server.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Create the PostgreSQL tables
    Migrate,

    /// Create an admin account, prompting for its password
    CreateAdmin {
        #[arg(short, long)]
        email: String,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        /// Password, read from the environment instead of a prompt
        #[arg(long, env = "YOGA_ADMIN_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Add a teacher
    AddTeacher {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,
    },

    /// List teachers
    Teachers {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// List sessions
    Sessions {
        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}
