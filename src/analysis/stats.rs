//! Derived profile statistics.
//!
//! Pure functions turning parsed API records into the text that ends up in
//! the snapshot. Nothing here touches the network.

use crate::models::{Event, Repo};
use chrono::{DateTime, Duration, Utc};

const MS_PER_MINUTE: i64 = 60 * 1000;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;
const MS_PER_YEAR: i64 = 365 * MS_PER_DAY;
const MS_PER_MONTH: i64 = 30 * MS_PER_DAY;

/// Shown when the user owns no repositories.
pub const NO_CONTRIBUTIONS: &str = "No contributions found";

/// Shown when the user has an empty bio.
pub const NO_BIO: &str = "No bio available";

/// Find the most recent push in an event feed.
///
/// The feed is ordered newest first, so this is the first push encountered.
pub fn latest_push(events: &[Event]) -> Option<&Event> {
    events.iter().find(|e| e.is_push())
}

/// Human-readable age of an event: minutes under an hour, hours under a
/// day, days otherwise.
pub fn format_elapsed(delta: Duration) -> String {
    let ms = delta.num_milliseconds().abs();

    if ms < MS_PER_HOUR {
        format!("{} minutes ago", ms / MS_PER_MINUTE)
    } else if ms < MS_PER_DAY {
        format!("{} hours ago", ms / MS_PER_HOUR)
    } else {
        format!("{} days ago", ms / MS_PER_DAY)
    }
}

/// `"<elapsed> in <repo>"` for a push event relative to `now`.
pub fn describe_push(event: &Event, now: DateTime<Utc>) -> String {
    format!(
        "{} in {}",
        format_elapsed(now - event.created_at),
        event.repo.name
    )
}

/// Account age as whole years plus leftover whole months.
///
/// Uses 365-day years and 30-day months, so it drifts from the calendar.
pub fn format_account_age(delta: Duration) -> String {
    let ms = delta.num_milliseconds().abs();
    let years = ms / MS_PER_YEAR;
    let months = (ms % MS_PER_YEAR) / MS_PER_MONTH;
    format!("{} years and {} months", years, months)
}

/// Name of the repository with the most stars.
///
/// Ties go to the repository listed first.
pub fn most_starred(repos: &[Repo]) -> Option<&Repo> {
    let mut iter = repos.iter();
    let first = iter.next()?;
    Some(iter.fold(first, |best, repo| {
        if repo.stargazers_count > best.stargazers_count {
            repo
        } else {
            best
        }
    }))
}

/// Display text for the most-starred repository.
pub fn most_starred_name(repos: &[Repo]) -> String {
    most_starred(repos)
        .map(|r| r.name.clone())
        .unwrap_or_else(|| NO_CONTRIBUTIONS.to_string())
}

/// Sum of stars across all repositories.
pub fn total_stars(repos: &[Repo]) -> u64 {
    repos.iter().map(|r| r.stargazers_count).sum()
}

/// Bio text, or the fallback when it is missing or blank.
pub fn bio_or_default(bio: Option<&str>) -> String {
    match bio {
        Some(b) if !b.is_empty() => b.to_string(),
        _ => NO_BIO.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventRepo;
    use chrono::TimeZone;

    fn repo(name: &str, stars: u64) -> Repo {
        Repo {
            name: name.to_string(),
            stargazers_count: stars,
        }
    }

    fn event(kind: &str, repo: &str, created_at: DateTime<Utc>) -> Event {
        Event {
            kind: kind.to_string(),
            repo: EventRepo {
                name: repo.to_string(),
            },
            created_at,
        }
    }

    #[test]
    fn test_format_elapsed_units() {
        assert_eq!(format_elapsed(Duration::minutes(30)), "30 minutes ago");
        assert_eq!(format_elapsed(Duration::hours(5)), "5 hours ago");
        assert_eq!(format_elapsed(Duration::days(3)), "3 days ago");
        assert_eq!(format_elapsed(Duration::seconds(20)), "0 minutes ago");
    }

    #[test]
    fn test_format_elapsed_tolerates_clock_skew() {
        assert_eq!(format_elapsed(Duration::minutes(-30)), "30 minutes ago");
        assert_eq!(format_elapsed(Duration::days(-2)), "2 days ago");
    }

    #[test]
    fn test_describe_push() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();
        let pushed = event("PushEvent", "me/site", now - Duration::hours(5));
        assert_eq!(describe_push(&pushed, now), "5 hours ago in me/site");
    }

    #[test]
    fn test_latest_push_skips_other_events() {
        let now = Utc::now();
        let events = vec![
            event("WatchEvent", "a/watched", now),
            event("PushEvent", "a/first", now),
            event("PushEvent", "a/second", now),
        ];
        assert_eq!(latest_push(&events).map(|e| e.repo.name.as_str()), Some("a/first"));

        let no_pushes = vec![event("IssuesEvent", "a/b", now)];
        assert!(latest_push(&no_pushes).is_none());
        assert!(latest_push(&[]).is_none());
    }

    #[test]
    fn test_account_age() {
        assert_eq!(format_account_age(Duration::days(400)), "1 years and 1 months");
        assert_eq!(format_account_age(Duration::days(29)), "0 years and 0 months");
        assert_eq!(format_account_age(Duration::days(-800)), "2 years and 2 months");
    }

    #[test]
    fn test_total_stars() {
        let repos = vec![repo("a", 3), repo("b", 0), repo("c", 7)];
        assert_eq!(total_stars(&repos), 10);
        assert_eq!(total_stars(&[]), 0);
    }

    #[test]
    fn test_most_starred_ties_go_to_first() {
        let repos = vec![repo("a", 2), repo("b", 9), repo("c", 9)];
        assert_eq!(most_starred_name(&repos), "b");
    }

    #[test]
    fn test_most_starred_empty() {
        assert_eq!(most_starred_name(&[]), NO_CONTRIBUTIONS);
    }

    #[test]
    fn test_bio_or_default() {
        assert_eq!(bio_or_default(Some("Rustacean")), "Rustacean");
        assert_eq!(bio_or_default(Some("")), NO_BIO);
        assert_eq!(bio_or_default(None), NO_BIO);
    }
}
