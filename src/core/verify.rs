use axum::http::HeaderMap;
use ring::signature::{UnparsedPublicKey, ED25519};
use thiserror::Error;

pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";
pub const AUTHORIZATION_HEADER: &str = "authorization";

#[derive(Debug, Error, PartialEq)]
pub enum VerifyError {
    #[error("Missing header {0}")]
    MissingHeader(&'static str),

    #[error("Header {0} is not valid hex")]
    InvalidEncoding(&'static str),

    #[error("Signature does not match")]
    BadSignature,

    #[error("Bearer token does not match")]
    BadToken,
}

/// Checks that an inbound interaction really came from the chat platform
pub trait Verifier: Send + Sync {
    fn verify(&self, headers: &HeaderMap, body: &[u8]) -> Result<(), VerifyError>;
}

/// Ed25519 verification of `timestamp || body` against the application's public key
pub struct Ed25519Verifier {
    public_key: Vec<u8>,
}

impl Ed25519Verifier {
    pub fn from_hex(public_key: &str) -> Result<Self, VerifyError> {
        let public_key =
            hex::decode(public_key).map_err(|_| VerifyError::InvalidEncoding("public key"))?;
        Ok(Self { public_key })
    }
}

impl Verifier for Ed25519Verifier {
    fn verify(&self, headers: &HeaderMap, body: &[u8]) -> Result<(), VerifyError> {
        let signature = header(headers, SIGNATURE_HEADER)?;
        let timestamp = header(headers, TIMESTAMP_HEADER)?;

        let signature =
            hex::decode(signature).map_err(|_| VerifyError::InvalidEncoding(SIGNATURE_HEADER))?;

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        UnparsedPublicKey::new(&ED25519, &self.public_key)
            .verify(&message, &signature)
            .map_err(|_| VerifyError::BadSignature)
    }
}

/// Accepts everything; for local development only
pub struct NoopVerifier;

impl Verifier for NoopVerifier {
    fn verify(&self, _headers: &HeaderMap, _body: &[u8]) -> Result<(), VerifyError> {
        Ok(())
    }
}

/// Checks `Authorization: Bearer <token>` against a shared secret
pub fn verify_bearer(headers: &HeaderMap, token: &str) -> Result<(), VerifyError> {
    let presented = header(headers, AUTHORIZATION_HEADER)?
        .strip_prefix("Bearer ")
        .ok_or(VerifyError::BadToken)?;
    if token.is_empty() || !constant_time_eq(presented.as_bytes(), token.as_bytes()) {
        return Err(VerifyError::BadToken);
    }
    Ok(())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let diff = a
        .iter()
        .zip(b)
        .fold(0u8, |acc, (left, right)| acc | (left ^ right));
    std::hint::black_box(diff) == 0
}

fn header<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, VerifyError> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .ok_or(VerifyError::MissingHeader(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use ring::rand::SystemRandom;
    use ring::signature::{Ed25519KeyPair, KeyPair};

    fn key_pair() -> Ed25519KeyPair {
        let rng = SystemRandom::new();
        let pkcs8 = Ed25519KeyPair::generate_pkcs8(&rng).unwrap();
        Ed25519KeyPair::from_pkcs8(pkcs8.as_ref()).unwrap()
    }

    fn signed_headers(key_pair: &Ed25519KeyPair, timestamp: &str, body: &[u8]) -> HeaderMap {
        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(body);
        let signature = key_pair.sign(&message);

        let mut headers = HeaderMap::new();
        headers.insert(
            SIGNATURE_HEADER,
            HeaderValue::from_str(&hex::encode(signature.as_ref())).unwrap(),
        );
        headers.insert(TIMESTAMP_HEADER, HeaderValue::from_str(timestamp).unwrap());
        headers
    }

    #[test]
    fn accepts_valid_signature() {
        let key_pair = key_pair();
        let verifier =
            Ed25519Verifier::from_hex(&hex::encode(key_pair.public_key().as_ref())).unwrap();
        let body = br#"{"type":1}"#;

        let headers = signed_headers(&key_pair, "1700000000", body);
        assert_eq!(verifier.verify(&headers, body), Ok(()));
    }

    #[test]
    fn rejects_tampered_body() {
        let key_pair = key_pair();
        let verifier =
            Ed25519Verifier::from_hex(&hex::encode(key_pair.public_key().as_ref())).unwrap();

        let headers = signed_headers(&key_pair, "1700000000", br#"{"type":1}"#);
        assert_eq!(
            verifier.verify(&headers, br#"{"type":2}"#),
            Err(VerifyError::BadSignature)
        );
    }

    #[test]
    fn rejects_missing_headers() {
        let verifier = Ed25519Verifier::from_hex("00").unwrap();
        assert_eq!(
            verifier.verify(&HeaderMap::new(), b"{}"),
            Err(VerifyError::MissingHeader(SIGNATURE_HEADER))
        );
    }

    fn bearer(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION_HEADER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_must_match() {
        assert_eq!(verify_bearer(&bearer("Bearer secret"), "secret"), Ok(()));
        assert_eq!(
            verify_bearer(&bearer("Bearer secreT"), "secret"),
            Err(VerifyError::BadToken)
        );
        assert_eq!(
            verify_bearer(&bearer("Bearer secret-but-longer"), "secret"),
            Err(VerifyError::BadToken)
        );
        assert_eq!(
            verify_bearer(&bearer("secret"), "secret"),
            Err(VerifyError::BadToken)
        );
        assert_eq!(
            verify_bearer(&HeaderMap::new(), "secret"),
            Err(VerifyError::MissingHeader(AUTHORIZATION_HEADER))
        );
    }

    #[test]
    fn empty_bearer_token_matches_nothing() {
        assert_eq!(verify_bearer(&bearer("Bearer "), ""), Err(VerifyError::BadToken));
    }

    #[test]
    fn noop_verifier_accepts_anything() {
        assert!(NoopVerifier.verify(&HeaderMap::new(), b"").is_ok());
    }
}
