//! Fetch tasks, one per profile metric.
//!
//! Every task is spawned on its own, performs its lookups exactly once and
//! reports a single [`TaskOutcome`] over the channel. Tasks never touch the
//! snapshot themselves.

use super::client::DataSource;
use crate::analysis::{
    bio_or_default, describe_push, format_account_age, latest_push, most_starred_name,
    total_stars,
};
use crate::error::FetchError;
use crate::models::{Event, GitHubUser, Metric, MetricValue, Repo, TaskOutcome, ZenQuote};
use chrono::Utc;
use serde::de::{DeserializeOwned, IgnoredAny};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::task::JoinSet;
use tracing::debug;

/// Where the tasks look things up.
#[derive(Debug, Clone)]
pub struct Endpoints {
    /// API root, without trailing slash.
    pub base_url: String,
    /// User whose profile is described.
    pub subject: String,
    /// Random quote endpoint.
    pub quote_url: String,
}

impl Endpoints {
    pub fn new(base_url: &str, subject: &str, quote_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            subject: subject.to_string(),
            quote_url: quote_url.to_string(),
        }
    }

    pub fn user(&self) -> String {
        format!("{}/users/{}", self.base_url, self.subject)
    }

    pub fn events(&self) -> String {
        format!("{}/events/public", self.user())
    }

    pub fn repos(&self) -> String {
        format!("{}/repos", self.user())
    }

    pub fn starred(&self) -> String {
        format!("{}/starred", self.user())
    }
}

/// Launch every metric task without waiting on any of them.
///
/// The receiver yields one outcome per task that ran to completion and
/// closes once all tasks are gone.
pub fn spawn_all(
    source: Arc<dyn DataSource>,
    endpoints: &Endpoints,
) -> (JoinSet<()>, UnboundedReceiver<TaskOutcome>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let mut tasks = JoinSet::new();

    for metric in Metric::ALL {
        let tx = tx.clone();
        let source = Arc::clone(&source);
        let endpoints = endpoints.clone();

        tasks.spawn(async move {
            let result = run_task(metric, source.as_ref(), &endpoints).await;
            debug!("Task {} finished (ok: {})", metric, result.is_ok());
            // The aggregator only hangs up at shutdown.
            let _ = tx.send(TaskOutcome::new(metric, result));
        });
    }

    (tasks, rx)
}

/// Run the lookup behind a single metric.
pub async fn run_task(
    metric: Metric,
    source: &dyn DataSource,
    endpoints: &Endpoints,
) -> Result<Option<MetricValue>, FetchError> {
    match metric {
        Metric::Bio => fetch_bio(source, endpoints).await.map(Some),
        Metric::LatestActivity => fetch_latest_activity(source, endpoints).await,
        Metric::MostStarred => fetch_most_starred(source, endpoints).await.map(Some),
        Metric::AccountAge => fetch_account_age(source, endpoints).await.map(Some),
        Metric::RepoCount => fetch_repo_count(source, endpoints).await.map(Some),
        Metric::StarsOwned => fetch_stars_owned(source, endpoints).await.map(Some),
        Metric::StarsGiven => fetch_stars_given(source, endpoints).await.map(Some),
        Metric::Quote => fetch_quote(source, endpoints).await.map(Some),
    }
}

async fn fetch_json<T: DeserializeOwned>(
    source: &dyn DataSource,
    url: &str,
) -> Result<T, FetchError> {
    let value = source.fetch(url).await?;
    Ok(serde_json::from_value(value)?)
}

async fn fetch_bio(source: &dyn DataSource, ep: &Endpoints) -> Result<MetricValue, FetchError> {
    let user: GitHubUser = fetch_json(source, &ep.user()).await?;
    Ok(MetricValue::Bio(bio_or_default(user.bio.as_deref())))
}

async fn fetch_latest_activity(
    source: &dyn DataSource,
    ep: &Endpoints,
) -> Result<Option<MetricValue>, FetchError> {
    let events: Vec<Event> = fetch_json(source, &ep.events()).await?;
    let now = Utc::now();
    Ok(latest_push(&events).map(|push| MetricValue::LatestActivity(describe_push(push, now))))
}

async fn fetch_most_starred(
    source: &dyn DataSource,
    ep: &Endpoints,
) -> Result<MetricValue, FetchError> {
    let repos: Vec<Repo> = fetch_json(source, &ep.repos()).await?;
    Ok(MetricValue::MostStarred(most_starred_name(&repos)))
}

async fn fetch_account_age(
    source: &dyn DataSource,
    ep: &Endpoints,
) -> Result<MetricValue, FetchError> {
    let user: GitHubUser = fetch_json(source, &ep.user()).await?;
    let created_at = user
        .created_at
        .ok_or(FetchError::Empty("account creation date"))?;
    Ok(MetricValue::AccountAge(format_account_age(
        Utc::now() - created_at,
    )))
}

async fn fetch_repo_count(
    source: &dyn DataSource,
    ep: &Endpoints,
) -> Result<MetricValue, FetchError> {
    let repos: Vec<IgnoredAny> = fetch_json(source, &ep.repos()).await?;
    Ok(MetricValue::RepoCount(repos.len()))
}

async fn fetch_stars_owned(
    source: &dyn DataSource,
    ep: &Endpoints,
) -> Result<MetricValue, FetchError> {
    let repos: Vec<Repo> = fetch_json(source, &ep.repos()).await?;
    Ok(MetricValue::StarsOwned(total_stars(&repos)))
}

async fn fetch_stars_given(
    source: &dyn DataSource,
    ep: &Endpoints,
) -> Result<MetricValue, FetchError> {
    let starred: Vec<IgnoredAny> = fetch_json(source, &ep.starred()).await?;
    Ok(MetricValue::StarsGiven(starred.len()))
}

async fn fetch_quote(source: &dyn DataSource, ep: &Endpoints) -> Result<MetricValue, FetchError> {
    let quotes: Vec<ZenQuote> = fetch_json(source, &ep.quote_url).await?;
    let quote = quotes.into_iter().next().ok_or(FetchError::Empty("quotes"))?;
    Ok(MetricValue::Quote(quote.into()))
}
