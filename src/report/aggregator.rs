//! The metrics aggregator.
//!
//! Owns the snapshot, applies task outcomes to it, and rewrites the output
//! document after every change.

use crate::error::{FetchError, RenderError};
use crate::models::{Metric, Snapshot, TaskOutcome};
use crate::report::template;
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

/// Single owner of the profile snapshot and its rendered projection.
pub struct MetricsAggregator {
    snapshot: Snapshot,
    template_path: PathBuf,
    output_path: PathBuf,
    renders: usize,
}

impl MetricsAggregator {
    pub fn new(snapshot: Snapshot, template_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            snapshot,
            template_path,
            output_path,
            renders: 0,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Number of render passes attempted so far.
    pub fn renders(&self) -> usize {
        self.renders
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Render the snapshot and overwrite the output file.
    pub async fn try_render(&self) -> Result<(), RenderError> {
        let source = tokio::fs::read_to_string(&self.template_path)
            .await
            .map_err(|source| RenderError::ReadTemplate {
                path: self.template_path.clone(),
                source,
            })?;

        let output = template::render(&source, &self.snapshot)?;

        tokio::fs::write(&self.output_path, output)
            .await
            .map_err(|source| RenderError::WriteOutput {
                path: self.output_path.clone(),
                source,
            })?;

        Ok(())
    }

    /// Render, logging instead of returning any failure.
    pub async fn render(&mut self) {
        self.renders += 1;
        match self.try_render().await {
            Ok(()) => debug!(
                "Rendered {} (pass {})",
                self.output_path.display(),
                self.renders
            ),
            Err(e) => error!("Render failed: {}", e),
        }
    }

    /// Append a failure to the visible error log and re-render.
    pub async fn record_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        warn!("{}", message);
        self.snapshot.error.push(message);
        self.render().await;
    }

    /// Fold one finished task into the snapshot.
    pub async fn apply(&mut self, outcome: TaskOutcome) {
        let TaskOutcome { metric, result } = outcome;
        match result {
            Ok(Some(value)) => {
                debug!("Fetched {}: {:?}", metric, value);
                self.snapshot.apply(value);
                self.render().await;
            }
            Ok(None) => {
                debug!("Nothing to update for {}", metric);
            }
            Err(e) => {
                self.snapshot.reset(metric);
                self.record_error(format!("{}: {}", metric, e)).await;
            }
        }
    }

    /// Record `reason` against every metric when no fetch can be attempted.
    pub async fn fail_all(&mut self, reason: &str) {
        for metric in Metric::ALL {
            let outcome = TaskOutcome::new(metric, Err(FetchError::Client(reason.to_string())));
            self.apply(outcome).await;
        }
    }

    /// Consume outcomes until every task has reported, then reap the tasks.
    ///
    /// A task that panicked never sends an outcome; its join error is
    /// recorded in the error log instead.
    pub async fn collect(
        &mut self,
        mut tasks: JoinSet<()>,
        mut outcomes: UnboundedReceiver<TaskOutcome>,
        progress: &ProgressBar,
    ) {
        while let Some(outcome) = outcomes.recv().await {
            progress.set_message(outcome.metric.to_string());
            self.apply(outcome).await;
            progress.inc(1);
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                progress.inc(1);
                self.record_error(format!("fetch task crashed: {}", e)).await;
            }
        }

        progress.finish_and_clear();
        info!(
            "All fetch tasks finished after {} renders ({} errors)",
            self.renders,
            self.snapshot.error.len()
        );
    }
}
