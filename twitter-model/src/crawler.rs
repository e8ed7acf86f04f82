//! Crawler status envelope

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Response of the collection service's account existence check.
///
/// The zero value (`status_code == 0`, empty message) is what callers see
/// when the check could not be performed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlerResponseMessage {
    /// 200 when the account exists on Twitter
    pub status_code: i64,

    /// Human readable status or error detail
    pub message: String,

    /// Additional fields sent by the crawler
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CrawlerResponseMessage {
    /// Check whether the crawler confirmed the account exists.
    pub fn account_exists(&self) -> bool {
        self.status_code == 200
    }
}
