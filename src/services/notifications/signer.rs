//! Boxcar request signing.
//!
//! Signature: lowercase hex HMAC-SHA1(secret, "{method}\n{host}\n{path}\n{body}").
//! Host and path are taken from the endpoint once, at construction.

use hmac::{Hmac, Mac};
use reqwest::Url;
use sha1::Sha1;

use crate::error::{AppError, AppResult};

type HmacSha1 = Hmac<Sha1>;

#[derive(Clone)]
pub struct RequestSigner {
    secret_key: String,
    host: String,
    path: String,
}

impl RequestSigner {
    pub fn new(secret_key: impl Into<String>, endpoint: &Url) -> Self {
        Self {
            secret_key: secret_key.into(),
            host: signing_host(endpoint),
            path: signing_path(endpoint),
        }
    }

    /// Hostname part of the signed string (no port)
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Path part of the signed string, including `?query` if the endpoint has one
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Sign `body` exactly as it will be transmitted.
    pub fn sign(&self, method: &str, body: &str) -> AppResult<String> {
        let mut mac = HmacSha1::new_from_slice(self.secret_key.as_bytes()).map_err(|e| {
            AppError::Internal {
                source: anyhow::anyhow!("Failed to initialise HMAC: {}", e),
            }
        })?;

        mac.update(method.as_bytes());
        mac.update(b"\n");
        mac.update(self.host.as_bytes());
        mac.update(b"\n");
        mac.update(self.path.as_bytes());
        mac.update(b"\n");
        mac.update(body.as_bytes());

        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl std::fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestSigner")
            .field("host", &self.host)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

fn signing_host(endpoint: &Url) -> String {
    endpoint
        .host_str()
        .unwrap_or_default()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .to_string()
}

fn signing_path(endpoint: &Url) -> String {
    match endpoint.query() {
        Some(query) => format!("{}?{}", endpoint.path(), query),
        None => endpoint.path().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn signer(endpoint: &str) -> RequestSigner {
        RequestSigner::new("SK", &Url::parse(endpoint).unwrap())
    }

    #[test]
    fn test_known_signature() {
        let signature = signer("https://api.example.com/push").sign("POST", "{}").unwrap();
        assert_eq!(signature, "d2a606ac47083dcaef35e17504f6f12ae5bbb85b");
    }

    #[test]
    fn test_query_is_part_of_signed_path() {
        let signer = signer("https://api.example.com/push?v=2");
        assert_eq!(signer.path(), "/push?v=2");
        assert_eq!(
            signer.sign("POST", r#"{"a":1}"#).unwrap(),
            "ed7a08020965f1f64670daf47482f8ac0f9849fd"
        );
    }

    #[test]
    fn test_host_excludes_port() {
        let signer = signer("http://127.0.0.1:8080/api/push");
        assert_eq!(signer.host(), "127.0.0.1");
        assert_eq!(signer.path(), "/api/push");
    }

    #[test]
    fn test_root_endpoint_path() {
        assert_eq!(signer("https://api.example.com").path(), "/");
    }

    #[test]
    fn test_method_is_signed() {
        let signer = signer("https://api.example.com/push");
        assert_ne!(
            signer.sign("POST", "{}").unwrap(),
            signer.sign("PUT", "{}").unwrap()
        );
    }

    #[test]
    fn test_debug_hides_secret() {
        let debug = format!("{:?}", signer("https://api.example.com/push"));
        assert!(!debug.contains("SK"));
    }

    proptest! {
        #[test]
        fn prop_signature_is_stable_lowercase_hex(body in ".{0,64}") {
            let signer = signer("https://api.example.com/push");
            let first = signer.sign("POST", &body).unwrap();
            let second = signer.sign("POST", &body).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.len(), 40);
            prop_assert!(first.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }

        #[test]
        fn prop_one_char_change_changes_signature(body in "[a-z]{1,64}", index in any::<prop::sample::Index>()) {
            let signer = signer("https://api.example.com/push");
            let mut bytes = body.clone().into_bytes();
            let i = index.index(bytes.len());
            bytes[i] = if bytes[i] == b'z' { b'a' } else { bytes[i] + 1 };
            let changed = String::from_utf8(bytes).unwrap();
            prop_assert_ne!(
                signer.sign("POST", &body).unwrap(),
                signer.sign("POST", &changed).unwrap()
            );
        }
    }
}
