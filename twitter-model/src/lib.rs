//! # Twitter Pipeline Model
//!
//! Wire records exchanged between the orchestrator and the downstream
//! collection, storage, and analytics services of the Twitter monitoring
//! pipeline.
//!
//! ## Overview
//!
//! - **ObservableTwitter**: An account registered for ongoing monitoring
//! - **Tweet**: A single post, optionally carrying a classification
//! - **CrawlerResponseMessage**: Status envelope from the crawler's existence check
//!
//! All records are owned by the downstream services. This crate only gives
//! them a typed shape; fields it does not know about are kept in an `extra`
//! map so that a record forwarded from one service to another arrives intact.
//!
//! ## Usage
//!
//! ```rust
//! use twitter_model::{ObservableTwitter, Tweet};
//!
//! let observable = ObservableTwitter::new("acme", "2h", "en");
//! assert_eq!(observable.account_name, "acme");
//!
//! let tweet = Tweet::new("1050118621198921728", "acme", "en", "@acme the app keeps crashing");
//! assert!(!tweet.is_classified());
//! ```

pub mod crawler;
pub mod observable;
pub mod tweet;

pub use crawler::CrawlerResponseMessage;
pub use observable::ObservableTwitter;
pub use tweet::Tweet;
