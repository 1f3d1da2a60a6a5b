//! Data models for the profile generator.
//!
//! This module contains the remote API records, the snapshot that drives
//! the rendered document, and the messages fetch tasks send back to the
//! aggregator.

use crate::error::FetchError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Placeholder shown for any field whose fetch has not succeeded.
pub const COULDNT_FETCH: &str = "Couldn't fetch";

/// Error log text while nothing has gone wrong.
pub const NO_ERRORS: &str = "No errors. Hooray!";

/// Separator between entries of the rendered error log.
pub const ERROR_SEPARATOR: &str = "; ";

/// Odds of swapping the greeting for its evil twin.
pub const EASTER_EGG_PROBABILITY: f64 = 0.00001;

/// A user record from `GET /users/{user}`.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubUser {
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One entry of `GET /users/{user}/events/public`.
#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    pub repo: EventRepo,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventRepo {
    pub name: String,
}

impl Event {
    /// Whether this event is a push to some repository.
    pub fn is_push(&self) -> bool {
        self.kind == "PushEvent"
    }
}

/// One entry of `GET /users/{user}/repos`.
#[derive(Debug, Clone, Deserialize)]
pub struct Repo {
    pub name: String,
    #[serde(default)]
    pub stargazers_count: u64,
}

/// One entry of the zenquotes `/api/random` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ZenQuote {
    pub q: String,
    pub a: String,
}

/// An inspirational quote with its attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

impl Default for Quote {
    fn default() -> Self {
        Self {
            text: "The best way to get started is to quit talking and begin doing.".to_string(),
            author: "Walt Disney".to_string(),
        }
    }
}

impl From<ZenQuote> for Quote {
    fn from(q: ZenQuote) -> Self {
        Self {
            text: q.q,
            author: q.a,
        }
    }
}

/// Append-only list of failure messages.
///
/// Serializes as a single string so templates can use `{{error}}` directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorLog {
    entries: Vec<String>,
}

impl ErrorLog {
    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push(message.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }
}

impl fmt::Display for ErrorLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            f.write_str(NO_ERRORS)
        } else {
            f.write_str(&self.entries.join(ERROR_SEPARATOR))
        }
    }
}

impl Serialize for ErrorLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Everything the template can see.
///
/// Field names are serialized in camelCase to match the template keys.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub emoji: String,
    pub greeting: String,
    pub bio: String,
    pub date: String,
    pub latest_contribution: String,
    pub ip: String,
    pub most_contributed: String,
    pub github_time: String,
    pub repo_count: String,
    pub star_count: String,
    pub given_star_count: String,
    pub quote: Quote,
    pub error: ErrorLog,
}

impl Snapshot {
    /// Creates a snapshot holding only placeholders.
    ///
    /// `generated_at` is frozen into the `date` field; `evil` selects the
    /// easter-egg greeting.
    pub fn new(generated_at: DateTime<Utc>, evil: bool) -> Self {
        let (emoji, greeting) = if evil {
            ("🔫", "Goodbye")
        } else {
            ("👋", "Hello")
        };

        Self {
            emoji: emoji.to_string(),
            greeting: greeting.to_string(),
            bio: COULDNT_FETCH.to_string(),
            date: format_generated_at(generated_at),
            latest_contribution: COULDNT_FETCH.to_string(),
            ip: "Why the hell do you want this?".to_string(),
            most_contributed: COULDNT_FETCH.to_string(),
            github_time: COULDNT_FETCH.to_string(),
            repo_count: COULDNT_FETCH.to_string(),
            star_count: COULDNT_FETCH.to_string(),
            given_star_count: COULDNT_FETCH.to_string(),
            quote: Quote::default(),
            error: ErrorLog::default(),
        }
    }

    /// Writes a freshly fetched value into the field its task owns.
    pub fn apply(&mut self, value: MetricValue) {
        match value {
            MetricValue::Bio(bio) => self.bio = bio,
            MetricValue::LatestActivity(text) => self.latest_contribution = text,
            MetricValue::MostStarred(name) => self.most_contributed = name,
            MetricValue::AccountAge(age) => self.github_time = age,
            MetricValue::RepoCount(n) => self.repo_count = n.to_string(),
            MetricValue::StarsOwned(n) => self.star_count = n.to_string(),
            MetricValue::StarsGiven(n) => self.given_star_count = n.to_string(),
            MetricValue::Quote(quote) => self.quote = quote,
        }
    }

    /// Puts a metric's field back to its fallback value after a failure.
    pub fn reset(&mut self, metric: Metric) {
        let fallback = COULDNT_FETCH.to_string();
        match metric {
            Metric::Bio => self.bio = fallback,
            Metric::LatestActivity => self.latest_contribution = fallback,
            Metric::MostStarred => self.most_contributed = fallback,
            Metric::AccountAge => self.github_time = fallback,
            Metric::RepoCount => self.repo_count = fallback,
            Metric::StarsOwned => self.star_count = fallback,
            Metric::StarsGiven => self.given_star_count = fallback,
            Metric::Quote => self.quote = Quote::default(),
        }
    }
}

/// Formats the generation time like `Monday, October 19, 2026 at 14:05:09`.
pub fn format_generated_at(at: DateTime<Utc>) -> String {
    at.format("%A, %B %-d, %Y at %H:%M:%S").to_string()
}

/// The metrics fetched for the profile, one per task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Bio,
    LatestActivity,
    MostStarred,
    AccountAge,
    RepoCount,
    StarsOwned,
    StarsGiven,
    Quote,
}

impl Metric {
    /// Every metric, in launch order.
    pub const ALL: [Metric; 8] = [
        Metric::Bio,
        Metric::LatestActivity,
        Metric::MostStarred,
        Metric::AccountAge,
        Metric::RepoCount,
        Metric::StarsOwned,
        Metric::StarsGiven,
        Metric::Quote,
    ];
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Bio => write!(f, "bio"),
            Metric::LatestActivity => write!(f, "latest contribution"),
            Metric::MostStarred => write!(f, "most starred repository"),
            Metric::AccountAge => write!(f, "account age"),
            Metric::RepoCount => write!(f, "repository count"),
            Metric::StarsOwned => write!(f, "star count"),
            Metric::StarsGiven => write!(f, "given star count"),
            Metric::Quote => write!(f, "quote"),
        }
    }
}

/// A successfully derived field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricValue {
    Bio(String),
    LatestActivity(String),
    MostStarred(String),
    AccountAge(String),
    RepoCount(usize),
    StarsOwned(u64),
    StarsGiven(usize),
    Quote(Quote),
}

/// What a finished fetch task reports to the aggregator.
///
/// `Ok(None)` means the task completed but has nothing to write.
#[derive(Debug)]
pub struct TaskOutcome {
    pub metric: Metric,
    pub result: Result<Option<MetricValue>, FetchError>,
}

impl TaskOutcome {
    pub fn new(metric: Metric, result: Result<Option<MetricValue>, FetchError>) -> Self {
        Self { metric, result }
    }
}
