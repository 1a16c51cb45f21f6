use clap::Args;

use appraise_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct HistoryArgs {
    /// `SQLite` connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://products.db")]
    database_url: String,
}

#[expect(clippy::print_stdout, reason = "CLI output")]
pub(crate) async fn run(args: HistoryArgs) -> Result<(), String> {
    let app = AppContext::from_database_url(&args.database_url, 1)
        .await
        .map_err(|error| format!("failed to open database: {error}"))?;

    let history = app
        .products
        .list_history()
        .await
        .map_err(|error| format!("failed to fetch history: {error}"));

    app.close().await;

    for product in history? {
        println!(
            "{}\t{}\t{:.2}\t{}\t{}",
            product.id, product.created_at, product.price, product.quality, product.name
        );
    }

    Ok(())
}
