use anyhow::{bail, Result};
use common::ScheduleConfig;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{error, info};
use uuid::Uuid;

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Fires the posting pipeline at fixed times of day, with separate weekday
/// and weekend slots, plus a daily analytics job. Built on a cron runtime;
/// the run loop itself only polls a stop flag.
pub struct PostScheduler {
    scheduler: JobScheduler,
    job_ids: Mutex<Vec<Uuid>>,
    running: Arc<AtomicBool>,
    poll_interval: Duration,
}

impl PostScheduler {
    pub async fn new() -> Result<Self> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            scheduler,
            job_ids: Mutex::new(Vec::new()),
            running: Arc::new(AtomicBool::new(true)),
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Overrides how often the run loop checks the stop flag.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Registers one job per configured weekday and weekend time slot, all
    /// running the same pipeline closure.
    pub async fn add_post_jobs<F, Fut>(&self, schedule: &ScheduleConfig, job_fn: F) -> Result<()>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        let job_fn = Arc::new(job_fn);

        for slot in &schedule.weekday_times {
            let (hour, minute) = parse_time_of_day(slot)?;
            self.add_cron_job(&format!("0 {} {} * * Mon-Fri", minute, hour), job_fn.clone())
                .await?;
        }

        for slot in &schedule.weekend_times {
            let (hour, minute) = parse_time_of_day(slot)?;
            self.add_cron_job(&format!("0 {} {} * * Sat,Sun", minute, hour), job_fn.clone())
                .await?;
        }

        info!(
            "Scheduled {} weekday and {} weekend post slots",
            schedule.weekday_times.len(),
            schedule.weekend_times.len()
        );
        Ok(())
    }

    /// Registers the daily analytics job at 23:00.
    pub async fn add_analytics_job<F, Fut>(&self, job_fn: F) -> Result<()>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.add_cron_job("0 0 23 * * *", Arc::new(job_fn)).await
    }

    async fn add_cron_job<F, Fut>(&self, cron_expression: &str, job_fn: Arc<F>) -> Result<()>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        info!("Scheduling job with cron: {}", cron_expression);

        let job = Job::new_async(cron_expression, move |_uuid, _lock| {
            let job_fn = job_fn.clone();
            Box::pin(async move {
                match job_fn().await {
                    Ok(()) => info!("Scheduled job completed successfully"),
                    Err(e) => error!("Scheduled job failed: {}", e),
                }
            })
        })?;

        let id = self.scheduler.add(job).await?;
        self.job_ids.lock().await.push(id);
        Ok(())
    }

    pub async fn job_count(&self) -> usize {
        self.job_ids.lock().await.len()
    }

    /// Starts the cron runtime and blocks until `stop` is called. The loop
    /// re-checks the flag once per poll interval.
    pub async fn run_until_stopped(&self) -> Result<()> {
        info!("Starting scheduler");
        self.scheduler.start().await?;

        while self.running.load(Ordering::SeqCst) {
            tokio::time::sleep(self.poll_interval).await;
        }

        info!("Scheduler loop exited");
        Ok(())
    }

    /// Signals the run loop to exit and unregisters every job. An in-flight
    /// pipeline run is not interrupted; only future firings are suppressed.
    pub async fn stop(&self) -> Result<()> {
        info!("Stopping scheduler");
        self.running.store(false, Ordering::SeqCst);

        let ids: Vec<Uuid> = self.job_ids.lock().await.drain(..).collect();
        for id in &ids {
            self.scheduler.remove(id).await?;
        }

        let mut scheduler = self.scheduler.clone();
        scheduler.shutdown().await?;
        Ok(())
    }
}

/// Parses an "HH:MM" time-of-day string.
fn parse_time_of_day(slot: &str) -> Result<(u32, u32)> {
    let Some((hour_raw, minute_raw)) = slot.split_once(':') else {
        bail!("Invalid time slot '{}': expected HH:MM", slot);
    };

    let hour: u32 = hour_raw
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid hour in time slot '{}'", slot))?;
    let minute: u32 = minute_raw
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid minute in time slot '{}'", slot))?;

    if hour >= 24 || minute >= 60 {
        bail!("Time slot '{}' out of range", slot);
    }
    Ok((hour, minute))
}
