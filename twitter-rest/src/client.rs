//! Pipeline REST client.
//!
//! `RestClient` exposes one method per remote operation of the collection,
//! storage, and analytics services. Every operation comes in two forms:
//!
//! - `try_*` returns a [`ClientResult`] so callers can tell a refusing
//!   service from an unreachable one or a malformed answer.
//! - The plain form logs the failure and degrades to `false`, an empty
//!   `Vec`, or a zero-value message.
//!
//! Each call is one independent request. Nothing is retried and no state is
//! kept between calls.

use crate::config::{join_url, ServiceConfig};
use crate::endpoints::Endpoint;
use crate::error::{ClientError, ClientResult, StartupError, TransportError};
use crate::transport::{exit_fatal, Transport};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, instrument, warn};
use twitter_model::{CrawlerResponseMessage, ObservableTwitter, Tweet};

/// Content type of every request body.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Client for the Twitter monitoring pipeline services.
#[derive(Debug, Clone)]
pub struct RestClient {
    /// Shared HTTP transport.
    transport: Transport,

    /// Base URL prefixed to every endpoint path.
    base_url: String,
}

impl RestClient {
    /// Create a client for `base_url` on top of `transport`.
    pub fn new(base_url: impl Into<String>, transport: Transport) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
        }
    }

    /// Create a client from configuration, loading the CA bundle.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, TransportError> {
        let transport = Transport::from_config(config)?;
        Ok(Self::new(config.base_url.clone(), transport))
    }

    /// Create a client from `BASE_URL` and `ca_chain.crt` in the working directory.
    pub fn from_env() -> Result<Self, StartupError> {
        let config = ServiceConfig::from_env()?;
        Ok(Self::from_config(&config)?)
    }

    /// Create a client from the environment or terminate the process.
    ///
    /// Missing configuration and an unreadable CA bundle are both fatal.
    pub fn from_env_or_exit() -> Self {
        Self::from_env().unwrap_or_else(|e| exit_fatal(&e))
    }

    /// Base URL of the pipeline gateway.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of an endpoint.
    pub fn url(&self, endpoint: &Endpoint<'_>) -> String {
        join_url(&self.base_url, &endpoint.path())
    }

    // =========================================================================
    // Storage: observables
    // =========================================================================

    /// Register an account for monitoring.
    #[instrument(skip(self, observable), fields(account = %observable.account_name))]
    pub async fn try_store_observable(&self, observable: &ObservableTwitter) -> ClientResult<()> {
        let response = self.post(Endpoint::StoreObservable, observable).await?;
        expect_ok(&response)
    }

    /// Register an account for monitoring; `true` iff the service answered 200.
    pub async fn store_observable(&self, observable: &ObservableTwitter) -> bool {
        let result = self.try_store_observable(observable).await;
        degrade(result.map(|()| true), "post store observable")
    }

    /// List all monitored accounts.
    #[instrument(skip(self))]
    pub async fn try_list_observables(&self) -> ClientResult<Vec<ObservableTwitter>> {
        self.get(Endpoint::ListObservables).await
    }

    /// List all monitored accounts, empty on failure.
    pub async fn list_observables(&self) -> Vec<ObservableTwitter> {
        degrade(self.try_list_observables().await, "cannot get twitter observables")
    }

    // =========================================================================
    // Collection
    // =========================================================================

    /// Ask the crawler whether `account` exists on Twitter.
    #[instrument(skip(self))]
    pub async fn try_account_exists(&self, account: &str) -> ClientResult<CrawlerResponseMessage> {
        self.get(Endpoint::AccountExists { account }).await
    }

    /// Ask the crawler whether `account` exists; zero-value message on failure.
    pub async fn account_exists(&self, account: &str) -> CrawlerResponseMessage {
        degrade(
            self.try_account_exists(account).await,
            "cannot check if twitter account exists",
        )
    }

    /// Crawl recent tweets mentioning `account`.
    #[instrument(skip(self))]
    pub async fn try_crawl_tweets(&self, account: &str, lang: &str) -> ClientResult<Vec<Tweet>> {
        self.get(Endpoint::CrawlTweets { account, lang }).await
    }

    /// Crawl recent tweets mentioning `account`, empty on failure.
    pub async fn crawl_tweets(&self, account: &str, lang: &str) -> Vec<Tweet> {
        degrade(self.try_crawl_tweets(account, lang).await, "cannot crawl tweets")
    }

    /// Crawl every available tweet mentioning `account`.
    #[instrument(skip(self))]
    pub async fn try_crawl_all_tweets(
        &self,
        account: &str,
        lang: &str,
    ) -> ClientResult<Vec<Tweet>> {
        self.get(Endpoint::CrawlAllTweets { account, lang }).await
    }

    /// Crawl every available tweet mentioning `account`, empty on failure.
    pub async fn crawl_all_tweets(&self, account: &str, lang: &str) -> Vec<Tweet> {
        degrade(
            self.try_crawl_all_tweets(account, lang).await,
            "cannot crawl max number of tweets",
        )
    }

    // =========================================================================
    // Storage: tweets
    // =========================================================================

    /// Fetch stored tweets of `account` that have not been classified yet.
    #[instrument(skip(self))]
    pub async fn try_unclassified_tweets(
        &self,
        account: &str,
        lang: &str,
    ) -> ClientResult<Vec<Tweet>> {
        self.get(Endpoint::UnclassifiedTweets { account, lang }).await
    }

    /// Fetch unclassified tweets of `account`, empty on failure.
    pub async fn unclassified_tweets(&self, account: &str, lang: &str) -> Vec<Tweet> {
        degrade(
            self.try_unclassified_tweets(account, lang).await,
            "cannot get unclassified tweets",
        )
    }

    /// Persist crawled tweets.
    #[instrument(skip(self, tweets), fields(count = tweets.len()))]
    pub async fn try_store_tweets(&self, tweets: &[Tweet]) -> ClientResult<()> {
        let response = self.post(Endpoint::StoreTweets, tweets).await?;
        expect_ok(&response)
    }

    /// Persist crawled tweets; `true` iff the service answered 200.
    pub async fn store_tweets(&self, tweets: &[Tweet]) -> bool {
        let result = self.try_store_tweets(tweets).await;
        degrade(result.map(|()| true), "cannot store tweets")
    }

    /// Persist classified tweets.
    #[instrument(skip(self, tweets), fields(count = tweets.len()))]
    pub async fn try_store_classified_tweets(&self, tweets: &[Tweet]) -> ClientResult<()> {
        let response = self.post(Endpoint::StoreClassifiedTweets, tweets).await?;
        expect_ok(&response)
    }

    /// Persist classified tweets; `true` iff the service answered 200.
    pub async fn store_classified_tweets(&self, tweets: &[Tweet]) -> bool {
        let result = self.try_store_classified_tweets(tweets).await;
        degrade(result.map(|()| true), "cannot store classified tweets")
    }

    // =========================================================================
    // Analytics
    // =========================================================================

    /// Classify a batch of tweets written in `lang`.
    ///
    /// The response is decoded whatever its status; the analytics service
    /// reports failures in the body.
    #[instrument(skip(self, tweets), fields(count = tweets.len()))]
    pub async fn try_classify_tweets(
        &self,
        tweets: &[Tweet],
        lang: &str,
    ) -> ClientResult<Vec<Tweet>> {
        let response = self.post(Endpoint::ClassifyTweets { lang }, tweets).await?;
        decode(response).await
    }

    /// Classify a batch of tweets, empty on failure.
    pub async fn classify_tweets(&self, tweets: &[Tweet], lang: &str) -> Vec<Tweet> {
        degrade(
            self.try_classify_tweets(tweets, lang).await,
            "cannot classify tweets",
        )
    }

    // =========================================================================
    // Request plumbing
    // =========================================================================

    async fn get<T>(&self, endpoint: Endpoint<'_>) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let url = self.url(&endpoint);
        debug!(method = %endpoint.method(), %url, "Sending request");

        let response = self
            .transport
            .client()
            .request(endpoint.method(), &url)
            .send()
            .await?;
        decode(response).await
    }

    async fn post<B>(&self, endpoint: Endpoint<'_>, body: &B) -> ClientResult<Response>
    where
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(body).map_err(ClientError::Encode)?;
        let url = self.url(&endpoint);
        debug!(method = %endpoint.method(), %url, bytes = body.len(), "Sending request");

        let response = self
            .transport
            .client()
            .request(endpoint.method(), &url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;
        Ok(response)
    }
}

/// Only a plain 200 counts as success for store operations.
fn expect_ok(response: &Response) -> ClientResult<()> {
    let status = response.status();
    if status == StatusCode::OK {
        Ok(())
    } else {
        Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
        })
    }
}

async fn decode<T>(response: Response) -> ClientResult<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        warn!(status = status.as_u16(), "Service answered with an error status");
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
        status: status.as_u16(),
        source,
    })
}

/// Log a failed call under `message` and fall back to the zero value.
fn degrade<T: Default>(result: ClientResult<T>, message: &str) -> T {
    result.unwrap_or_else(|e| {
        error!(category = ?e.category(), status = ?e.status(), "{}: {}", message, e);
        T::default()
    })
}
