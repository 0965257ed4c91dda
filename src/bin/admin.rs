//! Outil d'administration LocaMali
//!
//!   locamali-admin upsert <email> <password>
//!       crée ou met à jour l'admin en base (DATABASE_URL)
//!   locamali-admin env <email> <password> [--write]
//!       affiche les lignes ADMIN_EMAIL / ADMIN_PASSWORD_HASH,
//!       ou les écrit dans ./.env avec --write

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};

use locamali::config::AppConfig;
use locamali::db;
use locamali::services::admin_service::AdminService;
use locamali::utils::{env_file, password};

#[derive(Parser, Debug)]
#[command(name = "locamali-admin", version, about = "Gestion du compte administrateur LocaMali")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Hash le mot de passe et crée / met à jour l'admin en base
    Upsert { email: String, password: String },

    /// Affiche les lignes à ajouter au .env
    Env {
        email: String,
        password: String,

        /// Met à jour ./.env au lieu d'afficher les lignes
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    match Args::parse().command {
        Command::Upsert { email, password } => upsert(&email, &password).await,
        Command::Env { email, password, write } => env_lines(&email, &password, write),
    }
}

async fn upsert(email: &str, plain: &str) -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let db = db::establish_connection(&config)
        .await
        .context("Failed to connect to database")?;
    db::create_schema(&db).await?;

    let admin = AdminService::upsert(&db, email, plain, config.password_iterations).await?;
    println!("Admin upserted: {}", admin.email);
    Ok(())
}

fn env_lines(email: &str, plain: &str, write: bool) -> anyhow::Result<()> {
    let iterations = AppConfig::password_iterations_from_env()?;
    let hash = password::hash_password(plain, iterations).map_err(anyhow::Error::msg)?;

    let email_line = format!("ADMIN_EMAIL=\"{}\"", email);
    // Guillemets simples : pas de substitution des `$` du hash par dotenv
    let hash_line = format!("ADMIN_PASSWORD_HASH='{}'", hash);

    if !write {
        println!("\nAdd the following lines to your .env file (replace existing ones if present):\n");
        println!("{}\n{}", email_line, hash_line);
        println!("\nDone.");
        return Ok(());
    }

    let env_path = PathBuf::from(".env");
    if !env_path.exists() {
        bail!(".env not found at {}. Create it first.", env_path.display());
    }

    let content = fs::read_to_string(&env_path).context("Failed to read .env")?;
    let content = env_file::set_or_append(&content, "ADMIN_EMAIL", &email_line);
    let content = env_file::set_or_append(&content, "ADMIN_PASSWORD_HASH", &hash_line);
    fs::write(&env_path, content).context("Failed to write .env")?;

    println!("Updated .env with new ADMIN_EMAIL and ADMIN_PASSWORD_HASH");
    Ok(())
}
