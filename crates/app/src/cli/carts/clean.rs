use clap::Args;
use storefront_app::{
    database::{self, Db},
    domain::carts::{CartsService, PgCartsService},
};

#[derive(Debug, Args)]
pub(crate) struct CleanArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: CleanArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let deleted = PgCartsService::new(Db::new(pool))
        .clean_old_carts()
        .await
        .map_err(|error| format!("failed to clean carts: {error}"))?;

    tracing::info!(deleted, "cart sweep finished");

    Ok(())
}
