mod scheduler;

use anyhow::Result;
use common::Config;
use orchestrator::{analytics, Agent};
use scheduler::PostScheduler;
use std::sync::Arc;
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

    info!("Starting post scheduler");

    let config = Config::from_env()?;
    let agent = Arc::new(Agent::new(&config)?);
    agent.verify_connection().await;

    let post_scheduler = PostScheduler::new().await?;

    post_scheduler
        .add_post_jobs(&config.schedule, {
            let agent = agent.clone();
            move || {
                let agent = agent.clone();
                async move { agent.run_post_cycle().await }
            }
        })
        .await?;

    post_scheduler
        .add_analytics_job(|| async {
            analytics::report_post_performance();
            Ok(())
        })
        .await?;

    info!(
        "Weekday posts: {}",
        config.schedule.weekday_times.join(", ")
    );
    info!(
        "Weekend posts: {}",
        config.schedule.weekend_times.join(", ")
    );
    info!("Press Ctrl+C to stop the scheduler");

    tokio::select! {
        result = post_scheduler.run_until_stopped() => {
            result?;
            info!("Scheduler stopped");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Received interrupt signal, shutting down...");
            post_scheduler.stop().await?;
        }
    }

    Ok(())
}
