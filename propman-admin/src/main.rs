//! # Propman Admin
//!
//! Maintenance commands for the propman database.
//!
//! ## Usage
//!
//! ```bash
//! propman-admin migrate [--create-database]
//! propman-admin status
//! propman-admin create-admin --email ops@example.com --password '...'
//! ```
//!
//! Connection settings come from `DB_*` environment variables (a `.env` file
//! is loaded if present).

use anyhow::Context;
use clap::{Parser, Subcommand};
use propman_shared::config::DatabaseSettings;
use propman_shared::db::{migrations, pool};
use propman_shared::dto::CreateUserRequest;
use propman_shared::models::user::UserRole;
use propman_shared::repository::PgUserRepository;
use propman_shared::service::{Service, UserService};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "propman-admin")]
#[command(about = "Propman database administration")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending migrations
    Migrate {
        /// Create the database first if it does not exist
        #[arg(long)]
        create_database: bool,
    },
    /// Show applied and pending migrations
    Status,
    /// Create an administrator account
    CreateAdmin {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,

        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "propman_admin=info,propman_shared=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let settings = DatabaseSettings::from_env().context("Failed to load database settings")?;

    match cli.command {
        Commands::Migrate { create_database } => migrate(&settings, create_database).await,
        Commands::Status => status(&settings).await,
        Commands::CreateAdmin {
            email,
            password,
            first_name,
            last_name,
        } => {
            let request = CreateUserRequest {
                email,
                password,
                first_name,
                last_name,
                phone: None,
                role: Some(UserRole::Admin),
            };
            create_admin(&settings, request).await
        }
    }
}

async fn migrate(settings: &DatabaseSettings, create_database: bool) -> anyhow::Result<()> {
    if create_database {
        migrations::ensure_database_exists(&settings.url())
            .await
            .context("Failed to create database")?;
    }

    let pool = pool::create_pool(settings.pool_config())
        .await
        .context("Failed to connect to database")?;

    migrations::run_migrations(&pool)
        .await
        .context("Failed to run migrations")?;

    let status = migrations::get_migration_status(&pool).await?;
    tracing::info!(
        applied = status.applied_migrations,
        latest = ?status.latest_version,
        "Database is up to date"
    );

    pool::close_pool(pool).await;
    Ok(())
}

async fn status(settings: &DatabaseSettings) -> anyhow::Result<()> {
    let pool = pool::create_pool(settings.pool_config())
        .await
        .context("Failed to connect to database")?;

    let status = migrations::get_migration_status(&pool).await?;
    let stats = pool::get_pool_stats(&pool);

    println!(
        "migrations: {}/{} applied{}",
        status.applied_migrations,
        status.known_migrations,
        if status.is_up_to_date { "" } else { " (pending)" }
    );
    if let Some(version) = status.latest_version {
        println!("latest:     {}", version);
    }
    println!(
        "pool:       {} open, {} idle",
        stats.total_connections, stats.idle_connections
    );

    pool::close_pool(pool).await;
    Ok(())
}

async fn create_admin(settings: &DatabaseSettings, request: CreateUserRequest) -> anyhow::Result<()> {
    let pool = pool::create_pool(settings.pool_config())
        .await
        .context("Failed to connect to database")?;

    let users: UserService = UserService::new(PgUserRepository::new(pool.clone()));

    match users.create(request).await {
        Ok(user) => {
            tracing::info!(user_id = user.id, email = %user.email, "Administrator created");
            println!("created admin {} ({})", user.id, user.email);
        }
        Err(e) if e.is_conflict() => {
            pool::close_pool(pool).await;
            anyhow::bail!("A user with that email already exists");
        }
        Err(e) => {
            pool::close_pool(pool).await;
            return Err(e).context("Failed to create administrator");
        }
    }

    pool::close_pool(pool).await;
    Ok(())
}
