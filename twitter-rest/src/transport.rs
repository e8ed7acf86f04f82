//! Shared HTTP transport.
//!
//! Every pipeline call goes through one `reqwest::Client` that trusts only
//! the certificate authorities listed in the configured CA bundle. The
//! built-in root store is disabled, so first-party services signed by a
//! private CA verify and nothing else does.
//!
//! The transport is built once at startup and is immutable afterwards.
//! Cloning it shares the underlying connection pool.

use crate::config::ServiceConfig;
use crate::error::TransportError;
use reqwest::{Certificate, Client};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info};

/// Immutable HTTP transport shared by all operations.
#[derive(Debug, Clone)]
pub struct Transport {
    client: Client,
}

impl Transport {
    /// Build the transport described by `config`.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, TransportError> {
        Self::from_ca_bundle(&config.ca_bundle_path, config.timeout())
    }

    /// Build a transport trusting only the PEM certificates in `path`.
    pub fn from_ca_bundle(path: &Path, timeout: Duration) -> Result<Self, TransportError> {
        let pem = std::fs::read(path).map_err(|source| TransportError::CaBundleUnreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let certificates =
            Certificate::from_pem_bundle(&pem).map_err(TransportError::InvalidCaBundle)?;
        if certificates.is_empty() {
            return Err(TransportError::EmptyCaBundle {
                path: path.to_path_buf(),
            });
        }
        debug!(
            path = %path.display(),
            certificates = certificates.len(),
            "Loaded CA bundle"
        );

        let builder = certificates.into_iter().fold(
            Client::builder()
                .use_rustls_tls()
                .tls_built_in_root_certs(false)
                .timeout(timeout),
            |builder, certificate| builder.add_root_certificate(certificate),
        );

        let client = builder.build().map_err(TransportError::Build)?;
        Ok(Self { client })
    }

    /// Wrap an already configured client.
    ///
    /// Used to point the pipeline client at a local fake service.
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }

    /// Build the transport or terminate the process.
    ///
    /// Without a trusted channel no downstream service can be reached, so a
    /// bad CA bundle ends the process with exit status 1.
    pub fn load_or_exit(config: &ServiceConfig) -> Self {
        match Self::from_config(config) {
            Ok(transport) => {
                info!(
                    ca_bundle = %config.ca_bundle_path.display(),
                    timeout_secs = config.timeout_secs,
                    "HTTP transport ready"
                );
                transport
            }
            Err(e) => exit_fatal(&e),
        }
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }
}

/// Log a startup failure and end the process with exit status 1.
///
/// Every fatal startup path of the crate ends here.
pub(crate) fn exit_fatal(error: &dyn std::fmt::Display) -> ! {
    error!(error = %error, "Pipeline client cannot start, exiting");
    std::process::exit(1);
}
