//! # Twitter Pipeline REST Client
//!
//! This crate provides the typed client an orchestrator uses to drive the
//! Twitter monitoring pipeline.
//!
//! ## Overview
//!
//! The pipeline consists of three services behind one gateway:
//! - **Collection** (`ri-collection-explicit-feedback-twitter`): crawls tweets
//!   mentioning an account and checks whether an account exists
//! - **Storage** (`ri-storage-twitter`): stores observables, tweets, and
//!   classification results
//! - **Analytics** (`ri-analytics-classification-twitter`): classifies tweets
//!
//! All calls share one [`Transport`] that trusts only the CA chain in
//! `ca_chain.crt`. A missing or unreadable chain is fatal at startup.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use twitter_rest::{RestClient, ServiceConfig};
//!
//! async fn run() {
//!     twitter_rest::telemetry::init_tracing();
//!
//!     let config = ServiceConfig::from_env().expect("BASE_URL must be set");
//!     let client = RestClient::from_config(&config).expect("CA bundle must be readable");
//!
//!     for observable in client.list_observables().await {
//!         let tweets = client
//!             .crawl_tweets(&observable.account_name, &observable.lang)
//!             .await;
//!         if client.store_tweets(&tweets).await {
//!             let classified = client.classify_tweets(&tweets, &observable.lang).await;
//!             client.store_classified_tweets(&classified).await;
//!         }
//!     }
//! }
//! ```
//!
//! ## Error Handling
//!
//! Each operation has a `try_*` form returning [`ClientResult`] and a plain
//! form that logs the failure and returns `false`, an empty `Vec`, or a
//! zero-value [`CrawlerResponseMessage`].

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod telemetry;
pub mod transport;

pub use client::{RestClient, JSON_CONTENT_TYPE};
pub use config::{ConfigError, ServiceConfig};
pub use endpoints::{Backend, Endpoint};
pub use error::{ClientError, ClientResult, FailureCategory, StartupError, TransportError};
pub use transport::Transport;

// Re-export wire records
pub use twitter_model::{CrawlerResponseMessage, ObservableTwitter, Tweet};
