//! TLS trust tests for the shared transport.
//!
//! A local HTTPS gateway is started with a certificate issued either by the
//! CA in `fixtures/ca_chain.crt` or by an unrelated CA. The transport built
//! from the bundle must reach the first and refuse the second.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio_rustls::rustls::pki_types::{CertificateDer, PrivateKeyDer, PrivatePkcs8KeyDer};
use tokio_rustls::rustls::{self, ServerConfig};
use tokio_rustls::TlsAcceptor;
use twitter_rest::{FailureCategory, ObservableTwitter, RestClient, Transport};

const GATEWAY_CERT: &[u8] = include_bytes!("fixtures/gateway.der");
const GATEWAY_KEY: &[u8] = include_bytes!("fixtures/gateway.key.der");
const ROGUE_CERT: &[u8] = include_bytes!("fixtures/rogue.der");
const ROGUE_KEY: &[u8] = include_bytes!("fixtures/rogue.key.der");

const OBSERVABLES_BODY: &str = r#"[{"account_name":"acme","interval":"2h","lang":"en"}]"#;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Start an HTTPS gateway presenting `cert` and answering every request
/// with the observables list. Returns its base URL.
async fn start_gateway(cert: &'static [u8], key: &'static [u8]) -> String {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(
            vec![CertificateDer::from(cert.to_vec())],
            PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(key.to_vec())),
        )
        .unwrap();
    let acceptor = TlsAcceptor::from(Arc::new(config));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let acceptor = acceptor.clone();
            tokio::spawn(async move {
                // Handshake failures are expected for untrusted clients.
                let Ok(mut tls) = acceptor.accept(stream).await else {
                    return;
                };

                let mut request = Vec::new();
                let mut chunk = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match tls.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&chunk[..n]),
                    }
                }

                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    OBSERVABLES_BODY.len(),
                    OBSERVABLES_BODY
                );
                let _ = tls.write_all(response.as_bytes()).await;
                let _ = tls.shutdown().await;
            });
        }
    });

    format!("https://127.0.0.1:{}", port)
}

fn client_trusting(bundle: &str, base_url: String) -> RestClient {
    let transport = Transport::from_ca_bundle(&fixture(bundle), Duration::from_secs(10))
        .expect("bundle fixture should load");
    RestClient::new(base_url, transport)
}

#[tokio::test]
async fn test_gateway_signed_by_bundled_ca_is_trusted() {
    let base_url = start_gateway(GATEWAY_CERT, GATEWAY_KEY).await;
    let client = client_trusting("ca_chain.crt", base_url);

    let observables = client.try_list_observables().await.unwrap();
    assert_eq!(observables, vec![ObservableTwitter::new("acme", "2h", "en")]);
}

#[tokio::test]
async fn test_gateway_signed_by_other_ca_is_rejected() {
    let base_url = start_gateway(ROGUE_CERT, ROGUE_KEY).await;
    let client = client_trusting("ca_chain.crt", base_url);

    let err = client.try_list_observables().await.unwrap_err();
    assert_eq!(err.category(), FailureCategory::Transport);
    assert_eq!(err.status(), None);

    assert!(client.list_observables().await.is_empty());
}

#[tokio::test]
async fn test_trust_follows_the_bundle() {
    let base_url = start_gateway(ROGUE_CERT, ROGUE_KEY).await;
    let client = client_trusting("rogue_ca.crt", base_url);

    assert_eq!(client.list_observables().await.len(), 1);
}
