//! Observable account records
//!
//! An observable is a Twitter account the pipeline monitors on a schedule.
//! The storage service keys observables by `account_name`.

use serde::{Deserialize, Serialize};

/// An account registered for ongoing monitoring.
///
/// # Examples
///
/// ```
/// use twitter_model::ObservableTwitter;
///
/// let observable = ObservableTwitter::new("acme", "daily", "en");
/// let json = serde_json::to_value(&observable).unwrap();
/// assert_eq!(json["account_name"], "acme");
/// assert_eq!(json["interval"], "daily");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservableTwitter {
    /// Twitter screen name, unique from the storage service's perspective
    pub account_name: String,

    /// Crawl schedule understood by the orchestrator (e.g. "2h", "daily")
    pub interval: String,

    /// Language code of the tweets to collect
    pub lang: String,
}

impl ObservableTwitter {
    /// Creates a new observable account record.
    pub fn new(
        account_name: impl Into<String>,
        interval: impl Into<String>,
        lang: impl Into<String>,
    ) -> Self {
        Self {
            account_name: account_name.into(),
            interval: interval.into(),
            lang: lang.into(),
        }
    }
}
