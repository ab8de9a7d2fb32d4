// File: src/scheduler/publication.rs
use super::TickSummary;
use crate::constants::schedule;
use crate::errors::PublishError;
use crate::services::{Notifier, PostPublisher, PublishedPost};
use crate::store::{PostStatus, PostStore, ScheduledPost};
use anyhow::{anyhow, Result};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, error, info, warn};

/// The tick body, separated from the cron wiring so tests can drive it
/// directly.
#[derive(Clone)]
pub struct TickRunner {
    store: Arc<PostStore>,
    publisher: Arc<PostPublisher>,
    notifier: Arc<Notifier>,
    failed_retention_days: Option<u32>,
    // Held across a whole tick; try_lock makes overlapping firings skip
    tick_guard: Arc<Mutex<()>>,
}

impl TickRunner {
    pub fn new(
        store: Arc<PostStore>,
        publisher: Arc<PostPublisher>,
        notifier: Arc<Notifier>,
        failed_retention_days: Option<u32>,
    ) -> Self {
        Self {
            store,
            publisher,
            notifier,
            failed_retention_days,
            tick_guard: Arc::new(Mutex::new(())),
        }
    }

    /// One execution of the due-post scan.
    ///
    /// Posts are processed strictly in store insertion order, one fully
    /// to completion (through persistence) before the next begins.
    pub async fn run_tick(&self) -> TickSummary {
        let Ok(_guard) = self.tick_guard.try_lock() else {
            warn!("Previous tick still running, skipping this firing");
            return TickSummary::skipped();
        };

        let now = Utc::now().timestamp_millis();
        let due: Vec<ScheduledPost> = self
            .store
            .snapshot()
            .await
            .into_iter()
            .filter(|post| post.is_due(now))
            .collect();

        let mut summary = TickSummary::default();

        if due.is_empty() {
            debug!("No posts to publish this tick");
            return summary;
        }

        info!("{} due post(s) found at tick start", due.len());

        for post in due {
            info!(
                "Publishing post {} scheduled for {}",
                post.id, post.schedule_time
            );

            match self.publisher
                .publish(&post.message, post.link.as_deref(), post.media().as_ref())
                .await
            {
                Ok(published) => {
                    self.delete_local_media(&post).await;
                    if self.record_published(&post, &published).await.is_err() {
                        summary.halted = true;
                        return summary;
                    }
                    summary.published += 1;
                    info!("Published {} as {}", post.id, published.post_id);
                    self.notifier
                        .notify_success(&published.post_id, &published.page_name, &post.message)
                        .await;
                }
                Err(e) => {
                    let cause = e.to_string();
                    error!("Publish failed for {}: {}", post.id, cause);
                    if self.record_failed(&post, &cause).await.is_err() {
                        summary.halted = true;
                        return summary;
                    }
                    summary.failed += 1;
                    self.notifier.notify_failure(&cause).await;
                }
            }
        }

        summary
    }

    /// Daily retention pass
    pub async fn run_prune(&self) {
        match self.store.prune_completed(self.failed_retention_days).await {
            Ok(removed) => info!("Retention prune removed {} post(s)", removed),
            Err(e) => error!("Retention prune failed: {}", e),
        }
    }

    async fn record_published(
        &self,
        post: &ScheduledPost,
        published: &PublishedPost,
    ) -> Result<(), PublishError> {
        let post_id = published.post_id.clone();
        let result = self
            .store
            .update(&post.id, |p| {
                p.status = PostStatus::Published;
                p.post_id = Some(post_id);
                p.published_at = Some(Utc::now().timestamp_millis());
            })
            .await;

        if let Err(e) = &result {
            error!(
                "Store could not record published outcome for {}: {} - halting tick",
                post.id, e
            );
        }
        result
    }

    async fn record_failed(&self, post: &ScheduledPost, cause: &str) -> Result<(), PublishError> {
        let cause = cause.to_string();
        let result = self
            .store
            .update(&post.id, |p| {
                p.status = PostStatus::Failed;
                p.error = Some(cause);
            })
            .await;

        if let Err(e) = &result {
            error!(
                "Store could not record failed outcome for {}: {} - halting tick",
                post.id, e
            );
        }
        result
    }

    /// Remove the post's local media file after a fully successful
    /// publish. Best-effort: a leftover file is not worth failing a post
    /// that is already live.
    async fn delete_local_media(&self, post: &ScheduledPost) {
        if let Some(media) = post.media() {
            let path = self.publisher.local_path(&media.path);
            match tokio::fs::remove_file(&path).await {
                Ok(()) => debug!("Deleted local media {:?}", path),
                Err(e) => warn!("Failed to delete local media {:?}: {}", path, e),
            }
        }
    }
}

pub struct PublicationScheduler {
    runner: TickRunner,
    scheduler: JobScheduler,
}

impl PublicationScheduler {
    pub async fn new(runner: TickRunner) -> Result<Self> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| anyhow!("Failed to create JobScheduler: {}", e))?;

        Ok(Self { runner, scheduler })
    }

    pub async fn start(&self) -> Result<()> {
        info!(
            "Starting publication scheduler: tick '{}', prune '{}'",
            schedule::TICK_CRON,
            schedule::PRUNE_CRON
        );

        let tick_runner = self.runner.clone();
        let tick_job = Job::new_async(schedule::TICK_CRON, move |_uuid, _scheduler| {
            let runner = tick_runner.clone();
            Box::pin(async move {
                let summary = runner.run_tick().await;
                if summary.published > 0 || summary.failed > 0 {
                    info!(
                        "Tick complete: {} published, {} failed",
                        summary.published, summary.failed
                    );
                }
            })
        })
        .map_err(|e| anyhow!("Failed to create tick job: {}", e))?;

        self.scheduler
            .add(tick_job)
            .await
            .map_err(|e| anyhow!("Failed to add tick job to scheduler: {}", e))?;

        let prune_runner = self.runner.clone();
        let prune_job = Job::new_async(schedule::PRUNE_CRON, move |_uuid, _scheduler| {
            let runner = prune_runner.clone();
            Box::pin(async move {
                runner.run_prune().await;
            })
        })
        .map_err(|e| anyhow!("Failed to create prune job: {}", e))?;

        self.scheduler
            .add(prune_job)
            .await
            .map_err(|e| anyhow!("Failed to add prune job to scheduler: {}", e))?;

        self.scheduler.start().await?;
        info!("Publication scheduler started");

        Ok(())
    }
}
