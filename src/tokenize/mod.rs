//! Signed payload envelopes.
//!
//! Payloads travel as compact HS256 JSON web tokens
//! (`header.claims.signature`, base64url without padding). Signing is for
//! integrity only: the claims are readable by anyone holding the token.
//!
//! On encode the signer adds `iat` and, when a lifetime is configured,
//! `exp`. On decode both are verified and stripped, so a round trip yields
//! the caller's original object.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Map, Value};
use sha2::Sha256;
use thiserror::Error;

use crate::errors::CoreError;

const ALGORITHM: &str = "HS256";
const ISSUED_AT: &str = "iat";
const EXPIRES_AT: &str = "exp";

type HmacSha256 = Hmac<Sha256>;

/// Errors raised while signing or verifying a token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    InvalidFormat,
    #[error("unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("token payload must be a JSON object")]
    NotAnObject,
    #[error("token payload does not match the expected shape: {0}")]
    Payload(String),
}

impl From<TokenError> for CoreError {
    fn from(err: TokenError) -> Self {
        let message = match err {
            TokenError::Expired => "Tokenized payload expired",
            TokenError::NotAnObject | TokenError::Payload(_) => "Invalid tokenized payload",
            _ => "Invalid tokenized payload signature",
        };
        CoreError::unauthorized(message).with_source(err)
    }
}

/// HMAC-SHA256 signer bound to a single shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    key: Vec<u8>,
    ttl: Option<Duration>,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    /// `ttl` of `None` issues tokens without an `exp` claim.
    pub fn new(secret: impl AsRef<[u8]>, ttl: Option<Duration>) -> Self {
        Self {
            key: secret.as_ref().to_vec(),
            ttl,
        }
    }

    /// Sign `payload`, which must serialize to a JSON object.
    pub fn encode<T: Serialize + ?Sized>(&self, payload: &T) -> Result<String, TokenError> {
        self.encode_at(payload, Utc::now().timestamp())
    }

    pub(crate) fn encode_at<T: Serialize + ?Sized>(
        &self,
        payload: &T,
        issued_at: i64,
    ) -> Result<String, TokenError> {
        let mut claims = match serde_json::to_value(payload) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(TokenError::NotAnObject),
            Err(err) => return Err(TokenError::Payload(err.to_string())),
        };
        claims.insert(ISSUED_AT.to_string(), json!(issued_at));
        if let Some(ttl) = self.ttl {
            claims.insert(
                EXPIRES_AT.to_string(),
                json!(issued_at + ttl.num_seconds()),
            );
        }

        let header = json!({ "alg": ALGORITHM, "typ": "JWT" });
        let header = URL_SAFE_NO_PAD.encode(header.to_string());
        let body = URL_SAFE_NO_PAD.encode(Value::Object(claims).to_string());
        let signing_input = format!("{}.{}", header, body);
        let signature = URL_SAFE_NO_PAD.encode(self.sign(signing_input.as_bytes())?);

        Ok(format!("{}.{}", signing_input, signature))
    }

    /// Verify `token` and return its claims without `iat`/`exp`.
    pub fn decode(&self, token: &str) -> Result<Map<String, Value>, TokenError> {
        self.decode_at(token, Utc::now().timestamp())
    }

    pub(crate) fn decode_at(&self, token: &str, now: i64) -> Result<Map<String, Value>, TokenError> {
        let mut parts = token.trim().split('.');
        let (header, body, signature) = match (parts.next(), parts.next(), parts.next(), parts.next())
        {
            (Some(h), Some(b), Some(s), None) if !h.is_empty() && !b.is_empty() => (h, b, s),
            _ => return Err(TokenError::InvalidFormat),
        };

        let header_json: Value = decode_segment(header)?;
        match header_json.get("alg").and_then(Value::as_str) {
            Some(ALGORITHM) => {}
            Some(other) => return Err(TokenError::UnsupportedAlgorithm(other.to_string())),
            None => return Err(TokenError::InvalidFormat),
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| TokenError::InvalidFormat)?;
        let mut mac = self.mac()?;
        mac.update(format!("{}.{}", header, body).as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::InvalidSignature)?;

        let mut claims = match decode_segment(body)? {
            Value::Object(map) => map,
            _ => return Err(TokenError::NotAnObject),
        };

        if let Some(exp) = claims.get(EXPIRES_AT) {
            let exp = exp.as_i64().ok_or(TokenError::InvalidFormat)?;
            if now >= exp {
                return Err(TokenError::Expired);
            }
        }

        claims.remove(ISSUED_AT);
        claims.remove(EXPIRES_AT);
        Ok(claims)
    }

    /// Verify `token` and deserialize its claims into `T`.
    pub fn decode_as<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        let claims = self.decode(token)?;
        serde_json::from_value(Value::Object(claims))
            .map_err(|err| TokenError::Payload(err.to_string()))
    }

    fn mac(&self) -> Result<HmacSha256, TokenError> {
        // new_from_slice accepts keys of any length for HMAC
        HmacSha256::new_from_slice(&self.key).map_err(|_| TokenError::InvalidFormat)
    }

    fn sign(&self, input: &[u8]) -> Result<Vec<u8>, TokenError> {
        let mut mac = self.mac()?;
        mac.update(input);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

fn decode_segment(segment: &str) -> Result<Value, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::InvalidFormat)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::InvalidFormat)
}
