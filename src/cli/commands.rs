//! CLI command implementations

use anyhow::{bail, Context, Result};
use dialoguer::{theme::ColorfulTheme, Password};
use std::fs;

use crate::api;
use crate::auth::PasswordEncoder;
use crate::cli::{info, print_session_table, print_teacher_table, success, warn, OutputFormat};
use crate::config::{self, Config};
use crate::dto::{SessionDto, TeacherDto};
use crate::models::{Teacher, User};
use crate::store::{PgStore, SessionRepository, Store, TeacherRepository, UserRepository};

/// Initialize a new yoga.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new(config::loader::CONFIG_FILENAME);

    if config_path.exists() {
        warn("yoga.toml already exists");
        return Ok(());
    }

    let secret = config::loader::generate_secret();
    fs::write(config_path, config::loader::default_config_content(&secret))?;

    success("Created yoga.toml");
    info("Set database.url to use PostgreSQL, then run 'yoga-studio migrate'");

    Ok(())
}

/// Start the API server
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = load_config()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!("Starting yoga studio API on {}:{}", host, port));
    api::run_server(config, &host, port).await?;

    Ok(())
}

/// Create the database tables
pub async fn migrate() -> Result<()> {
    let config = load_config()?;
    let Some(url) = config.database.url.as_deref() else {
        bail!("database.url is not set; the in-memory store needs no migration");
    };

    let store = PgStore::connect(url).await?;
    store.migrate().await?;

    success("Database schema is up to date");
    Ok(())
}

/// Create an admin account
pub async fn create_admin(
    email: &str,
    first_name: &str,
    last_name: &str,
    password: Option<String>,
) -> Result<()> {
    let config = load_config()?;
    let store = open_store(&config).await?;

    if store.users.exists_by_email(email).await? {
        bail!("A user with email {} already exists", email);
    }

    let password = match password {
        Some(password) => password,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Admin password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()
            .context("Failed to read password")?,
    };

    if password.chars().count() < 6 {
        bail!("Password must be at least 6 characters");
    }

    let encoder = PasswordEncoder::new(config.security.bcrypt_cost);
    let hash = encoder.encode(&password).await?;
    let user = store
        .users
        .save(User::new(email, last_name, first_name, hash, true))
        .await?;

    success(&format!(
        "Created admin {} (id {})",
        user.email,
        user.id.unwrap_or_default()
    ));
    Ok(())
}

/// Add a teacher
pub async fn add_teacher(first_name: &str, last_name: &str) -> Result<()> {
    let config = load_config()?;
    let store = open_store(&config).await?;

    let teacher = store
        .teachers
        .save(Teacher::new(last_name, first_name))
        .await?;

    success(&format!(
        "Added teacher {} {} (id {})",
        teacher.first_name,
        teacher.last_name,
        teacher.id.unwrap_or_default()
    ));
    Ok(())
}

/// List teachers
pub async fn teachers(format: OutputFormat) -> Result<()> {
    let config = load_config()?;
    let store = open_store(&config).await?;
    let teachers = store.teachers.find_all().await?;

    match format {
        OutputFormat::Table => print_teacher_table(&teachers),
        OutputFormat::Json => {
            let dtos: Vec<TeacherDto> = teachers.iter().map(TeacherDto::from).collect();
            println!("{}", serde_json::to_string_pretty(&dtos)?);
        }
        OutputFormat::Yaml => {
            let dtos: Vec<TeacherDto> = teachers.iter().map(TeacherDto::from).collect();
            println!("{}", serde_yaml::to_string(&dtos)?);
        }
    }

    Ok(())
}

/// List sessions
pub async fn sessions(format: OutputFormat) -> Result<()> {
    let config = load_config()?;
    let store = open_store(&config).await?;
    let sessions = store.sessions.find_all().await?;

    match format {
        OutputFormat::Table => print_session_table(&sessions),
        OutputFormat::Json => {
            let dtos: Vec<SessionDto> = sessions.iter().map(SessionDto::from).collect();
            println!("{}", serde_json::to_string_pretty(&dtos)?);
        }
        OutputFormat::Yaml => {
            let dtos: Vec<SessionDto> = sessions.iter().map(SessionDto::from).collect();
            println!("{}", serde_yaml::to_string(&dtos)?);
        }
    }

    Ok(())
}

fn load_config() -> Result<Config> {
    config::load_config().context("Failed to load configuration")
}

async fn open_store(config: &Config) -> Result<Store> {
    if config.database.url.is_none() {
        warn("database.url is not set; changes are kept in memory and lost on exit");
    }

    let encoder = PasswordEncoder::new(config.security.bcrypt_cost);
    Ok(Store::open(&config.database, &encoder).await?)
}
