use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), tomiko_revoke::util::cli::Error> {
    use tomiko_revoke::util::cli::*;

    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let opts = Options::parse();
    run(opts).await.map_err(|e| {
        tracing::error!(error = %e, "revoked failed");
        e
    })
}
