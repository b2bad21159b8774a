use anyhow::Result;
use common::Config;
use orchestrator::Agent;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    let _ = dotenv::dotenv();

    // Configure tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config::from_env()?;
    let agent = Agent::new(&config)?;

    agent.verify_connection().await;
    agent.run_post_cycle().await?;

    info!("Done. {} posts in history", agent.post_count().await);
    Ok(())
}
