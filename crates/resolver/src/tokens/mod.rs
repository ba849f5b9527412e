//! Order access tokens.
//!
//! A token grants its bearer access to one order until it expires, without a
//! login session. Tokens are opaque strings of the form
//! `hex(iv):hex(ciphertext || tag)`:
//!
//! - the plaintext `"<orderId>:<expiresAtEpochMs>"` is encrypted with
//!   AES-256-CBC (PKCS#7) under `SHA-256(secret)`, with a fresh random IV
//! - `tag` is HMAC-SHA256 over `iv || ciphertext`, keyed by a separate
//!   derivation of the same secret
//!
//! Verification checks the tag in constant time before decrypting anything,
//! so a forged or altered token is rejected without ever reaching the padding
//! check. Every failure, including expiry, yields `None`; the reason is only
//! logged at debug level.

use aes::Aes256;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, Key, KeyIvInit, block_padding::Pkcs7};
use chrono::{DateTime, Duration, Utc};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use sha2::{Digest, Sha256, Sha512};
use shopfront_core::OrderId;
use thiserror::Error;
use tracing::instrument;

use crate::config::ResolverConfig;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;
type HmacSha256 = Hmac<Sha256>;

const IV_LEN: usize = 16;
const BLOCK_LEN: usize = 16;
const TAG_LEN: usize = 32;
const DEFAULT_TTL_DAYS: i64 = 30;

/// Domain separation for the MAC key derivation.
const MAC_KEY_CONTEXT: &[u8] = b"shopfront.order-token.mac";

/// Why a token was rejected. Logged, never returned to callers.
#[derive(Debug, Error)]
enum Rejection {
    #[error("malformed token")]
    Malformed,
    #[error("invalid hex")]
    Hex(#[from] hex::FromHexError),
    #[error("bad ciphertext length {0}")]
    Length(usize),
    #[error("signature mismatch")]
    Signature,
    #[error("decryption failed")]
    Decrypt,
    #[error("malformed plaintext")]
    Plaintext,
    #[error("expired at {0}")]
    Expired(DateTime<Utc>),
}

/// A successfully verified token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderGrant {
    /// The order the bearer may access.
    pub order_id: OrderId,
    /// When the grant stops being valid.
    pub expires_at: DateTime<Utc>,
    /// The decrypted `"<orderId>:<expiresAtEpochMs>"` payload.
    pub plaintext: String,
}

/// Signs and verifies order access tokens.
///
/// Implements `Debug` manually so derived keys never reach logs.
#[derive(Clone)]
pub struct OrderTokenCodec {
    cipher_key: Key<Aes256CbcEnc>,
    mac: HmacSha256,
    ttl: Duration,
}

impl std::fmt::Debug for OrderTokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderTokenCodec")
            .field("keys", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl OrderTokenCodec {
    /// Derive keys from a server-held secret. Tokens live 30 days.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let secret = secret.expose_secret().as_bytes();
        let cipher_key = Sha256::digest(secret);
        // A 64-byte key fills exactly one SHA-256 block, so HMAC uses it as-is.
        let mac_key = Sha512::new()
            .chain_update(MAC_KEY_CONTEXT)
            .chain_update(secret)
            .finalize();

        Self {
            cipher_key,
            mac: HmacSha256::new(&mac_key),
            ttl: Duration::days(DEFAULT_TTL_DAYS),
        }
    }

    /// Build a codec from loaded configuration.
    #[must_use]
    pub fn from_config(config: &ResolverConfig) -> Self {
        Self::new(&config.order_token_secret).with_ttl(config.order_token_ttl)
    }

    /// Override how long new tokens stay valid.
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sign a token for `order_id`, expiring one TTL from now.
    #[must_use]
    pub fn sign(&self, order_id: &str) -> String {
        self.sign_at(order_id, Utc::now())
    }

    /// Sign a token as if the current time were `now`.
    ///
    /// An expiry past the representable range saturates at
    /// [`DateTime::<Utc>::MAX_UTC`].
    #[must_use]
    #[instrument(skip(self))]
    pub fn sign_at(&self, order_id: &str, now: DateTime<Utc>) -> String {
        let expires_at = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let plaintext = format!("{order_id}:{}", expires_at.timestamp_millis());

        let iv: [u8; IV_LEN] = rand::random();
        let mut body = Aes256CbcEnc::new(&self.cipher_key, &iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());
        let tag = self.tag(&iv, &body);
        body.extend_from_slice(&tag);

        tracing::debug!(%expires_at, "Signed order token");
        format!("{}:{}", hex::encode(iv), hex::encode(body))
    }

    /// Verify a token against the current time.
    ///
    /// Returns `None` for anything not minted by this codec's secret, for
    /// altered tokens, and for expired ones.
    #[must_use]
    pub fn verify(&self, token: &str) -> Option<OrderGrant> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`.
    #[must_use]
    #[instrument(skip(self, token))]
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Option<OrderGrant> {
        match self.open(token, now) {
            Ok(grant) => Some(grant),
            Err(reason) => {
                tracing::debug!(%reason, "Rejected order token");
                None
            }
        }
    }

    fn open(&self, token: &str, now: DateTime<Utc>) -> Result<OrderGrant, Rejection> {
        let (iv_hex, body_hex) = token.trim().split_once(':').ok_or(Rejection::Malformed)?;
        if body_hex.contains(':') {
            return Err(Rejection::Malformed);
        }

        let iv: [u8; IV_LEN] = hex::decode(iv_hex)?
            .try_into()
            .map_err(|_| Rejection::Malformed)?;
        let body = hex::decode(body_hex)?;

        let ciphertext_len = body.len().saturating_sub(TAG_LEN);
        if ciphertext_len == 0 || ciphertext_len % BLOCK_LEN != 0 {
            return Err(Rejection::Length(body.len()));
        }
        let (ciphertext, tag) = body.split_at(ciphertext_len);

        let mut mac = self.mac.clone();
        mac.update(&iv);
        mac.update(ciphertext);
        mac.verify_slice(tag).map_err(|_| Rejection::Signature)?;

        let plaintext = Aes256CbcDec::new(&self.cipher_key, &iv.into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| Rejection::Decrypt)?;
        let plaintext = String::from_utf8(plaintext).map_err(|_| Rejection::Plaintext)?;

        let (order_id, expires_at) = parse_plaintext(&plaintext).ok_or(Rejection::Plaintext)?;
        if expires_at <= now {
            return Err(Rejection::Expired(expires_at));
        }

        Ok(OrderGrant {
            order_id: OrderId::new(order_id),
            expires_at,
            plaintext,
        })
    }

    fn tag(&self, iv: &[u8], ciphertext: &[u8]) -> [u8; TAG_LEN] {
        let mut mac = self.mac.clone();
        mac.update(iv);
        mac.update(ciphertext);
        mac.finalize().into_bytes().into()
    }
}

/// Split `"<orderId>:<expiresAtEpochMs>"`. Order ids may contain `:` or be
/// empty.
fn parse_plaintext(plaintext: &str) -> Option<(&str, DateTime<Utc>)> {
    let (order_id, millis) = plaintext.rsplit_once(':')?;
    if millis.is_empty() || !millis.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let expires_at = DateTime::from_timestamp_millis(millis.parse().ok()?)?;
    Some((order_id, expires_at))
}
