//! Tweet records
//!
//! A tweet is produced by the collection service, persisted by the storage
//! service, and decorated with a class and sentiment by the analytics
//! service. Every tweet belongs to exactly one tracked account and one
//! language; the storage service, not this crate, enforces that.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single post addressed to a tracked account.
///
/// Classification fields are empty until the analytics service has
/// processed the tweet. Fields unknown to this struct are carried in
/// [`Tweet::extra`] and written back out unchanged.
///
/// # Examples
///
/// ```
/// use twitter_model::Tweet;
///
/// let mut tweet = Tweet::new("42", "acme", "en", "@acme please add dark mode");
/// assert!(!tweet.is_classified());
///
/// tweet.tweet_class = "feature_request".to_string();
/// assert!(tweet.is_classified());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tweet {
    /// Twitter status ID
    pub status_id: String,

    /// Author's screen name
    pub user_name: String,

    /// Tracked account the tweet mentions
    pub in_reply_to_screen_name: String,

    /// Language code (e.g. "en", "it")
    pub lang: String,

    /// Tweet text
    pub text: String,

    /// Creation time as unix seconds
    pub created_at: i64,

    /// Creation time as reported by Twitter
    pub created_at_full: String,

    /// Number of likes at crawl time
    pub favorite_count: i64,

    /// Number of retweets at crawl time
    pub retweet_count: i64,

    /// Hashtags contained in the text
    pub hashtags: Vec<String>,

    /// Classification label assigned by the analytics service
    pub tweet_class: String,

    /// Classifier confidence for `tweet_class`
    pub classifier_certainty: i64,

    /// Sentiment label (e.g. "POSITIVE", "NEGATIVE", "NEUTRAL")
    pub sentiment: String,

    /// Sentiment strength
    pub sentiment_score: i64,

    /// Fields owned by the services that this struct does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tweet {
    /// Creates an unclassified tweet.
    pub fn new(
        status_id: impl Into<String>,
        account_name: impl Into<String>,
        lang: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            status_id: status_id.into(),
            in_reply_to_screen_name: account_name.into(),
            lang: lang.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Check whether the analytics service has assigned a class.
    pub fn is_classified(&self) -> bool {
        !self.tweet_class.is_empty()
    }
}
