/// Database layer
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool management with health checks
/// - `migrations`: Embedded schema migrations (one per entity table)
///
/// Entity row definitions are in `models`; queries are in `repository`.
///
/// # Example
///
/// ```no_run
/// use propman_shared::config::Config;
/// use propman_shared::db::{migrations::run_migrations, pool::create_pool};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config::from_env()?;
///     let pool = create_pool(config.database.pool_config()).await?;
///     run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
