use clap::Args;

use appraise_app::database;

#[derive(Debug, Args)]
pub(crate) struct InitArgs {
    /// `SQLite` connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://products.db")]
    database_url: String,
}

pub(crate) async fn run(args: InitArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url, 1)
        .await
        .map_err(|error| format!("failed to open database: {error}"))?;

    database::ensure_schema(&pool)
        .await
        .map_err(|error| format!("failed to create products table: {error}"))?;

    pool.close().await;

    #[expect(clippy::print_stdout, reason = "CLI output")]
    {
        println!("products table ready: {}", args.database_url);
    }

    Ok(())
}
