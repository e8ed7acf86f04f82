//! Typed endpoint builder.
//!
//! Each remote operation is one [`Endpoint`] variant carrying its path
//! arguments by name. Account names and language codes are substituted as
//! given; callers must pass values that are valid path segments.

use reqwest::Method;

/// Downstream backend an endpoint belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Crawls tweets and checks account existence.
    Collection,
    /// Service of record for observables and tweets.
    Storage,
    /// Classifies tweets.
    Analytics,
}

impl Backend {
    /// Path prefix routing to this backend.
    pub fn path_prefix(&self) -> &'static str {
        match self {
            Backend::Collection => "/ri-collection-explicit-feedback-twitter",
            Backend::Storage => "/ri-storage-twitter",
            Backend::Analytics => "/ri-analytics-classification-twitter",
        }
    }
}

/// A remote operation together with its path arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// Register an observable account.
    StoreObservable,
    /// List all observable accounts.
    ListObservables,
    /// Check whether an account exists on Twitter.
    AccountExists { account: &'a str },
    /// Stored tweets of an account that have not been classified yet.
    UnclassifiedTweets { account: &'a str, lang: &'a str },
    /// Crawl recent tweets mentioning an account.
    CrawlTweets { account: &'a str, lang: &'a str },
    /// Crawl as many tweets mentioning an account as are available.
    CrawlAllTweets { account: &'a str, lang: &'a str },
    /// Classify a batch of tweets.
    ClassifyTweets { lang: &'a str },
    /// Persist crawled tweets.
    StoreTweets,
    /// Persist classified tweets.
    StoreClassifiedTweets,
}

impl Endpoint<'_> {
    /// HTTP method of the endpoint.
    pub fn method(&self) -> Method {
        match self {
            Endpoint::StoreObservable
            | Endpoint::ClassifyTweets { .. }
            | Endpoint::StoreTweets
            | Endpoint::StoreClassifiedTweets => Method::POST,
            Endpoint::ListObservables
            | Endpoint::AccountExists { .. }
            | Endpoint::UnclassifiedTweets { .. }
            | Endpoint::CrawlTweets { .. }
            | Endpoint::CrawlAllTweets { .. } => Method::GET,
        }
    }

    /// Backend serving the endpoint.
    pub fn backend(&self) -> Backend {
        match self {
            Endpoint::AccountExists { .. }
            | Endpoint::CrawlTweets { .. }
            | Endpoint::CrawlAllTweets { .. } => Backend::Collection,
            Endpoint::ClassifyTweets { .. } => Backend::Analytics,
            Endpoint::StoreObservable
            | Endpoint::ListObservables
            | Endpoint::UnclassifiedTweets { .. }
            | Endpoint::StoreTweets
            | Endpoint::StoreClassifiedTweets => Backend::Storage,
        }
    }

    /// Path relative to the base URL, starting with `/`.
    pub fn path(&self) -> String {
        let prefix = self.backend().path_prefix();
        match self {
            Endpoint::StoreObservable => format!("{}/store/observable/", prefix),
            Endpoint::ListObservables => format!("{}/observables", prefix),
            Endpoint::AccountExists { account } => format!("{}/{}/exists", prefix, account),
            Endpoint::UnclassifiedTweets { account, lang } => {
                format!("{}/account_name/{}/lang/{}/unclassified", prefix, account, lang)
            }
            Endpoint::CrawlTweets { account, lang } => {
                format!("{}/mention/{}/lang/{}/fast", prefix, account, lang)
            }
            Endpoint::CrawlAllTweets { account, lang } => {
                format!("{}/mention/{}/lang/{}", prefix, account, lang)
            }
            Endpoint::ClassifyTweets { lang } => format!("{}/lang/{}", prefix, lang),
            Endpoint::StoreTweets => format!("{}/store/tweet/", prefix),
            Endpoint::StoreClassifiedTweets => format!("{}/store/classified/tweet/", prefix),
        }
    }
}
