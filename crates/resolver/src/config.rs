//! Resolver configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ORDER_TOKEN_SECRET` - Secret the order token keys are derived from (min 32 chars, high entropy)
//!
//! ## Optional
//! - `ORDER_TOKEN_TTL_DAYS` - Order token lifetime in days (default: 30, max: 365)
//! - `SEARCH_ALLOW_COLLECTION_FILTER` - Honor the `collection` query parameter (default: true)

use std::collections::HashMap;

use chrono::Duration;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const ORDER_TOKEN_SECRET: &str = "ORDER_TOKEN_SECRET";
const ORDER_TOKEN_TTL_DAYS: &str = "ORDER_TOKEN_TTL_DAYS";
const SEARCH_ALLOW_COLLECTION_FILTER: &str = "SEARCH_ALLOW_COLLECTION_FILTER";

const MIN_SECRET_CHARS: usize = 32;
/// Random alphanumeric-plus-symbol strings sit well above this.
const MIN_SECRET_ENTROPY: f64 = 3.3;
const DEFAULT_TOKEN_TTL_DAYS: i64 = 30;
const MAX_TOKEN_TTL_DAYS: i64 = 365;

/// Fragments that mark a value copied from a template rather than generated.
const PLACEHOLDER_FRAGMENTS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    MissingEnvVar(&'static str),
    #[error("{0} is invalid: {1}")]
    InvalidEnvVar(&'static str, String),
    #[error("{0} is not safe to use: {1}")]
    InsecureSecret(&'static str, String),
}

/// Resolver configuration.
///
/// Implements `Debug` manually to redact the token secret.
#[derive(Clone)]
pub struct ResolverConfig {
    /// Secret the order token encryption and MAC keys are derived from
    pub order_token_secret: SecretString,
    /// How long a freshly signed order token stays valid
    pub order_token_ttl: Duration,
    /// Whether search honors the `collection` query parameter
    pub allow_collection_filter: bool,
}

impl std::fmt::Debug for ResolverConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverConfig")
            .field("order_token_secret", &"[REDACTED]")
            .field("order_token_ttl", &self.order_token_ttl)
            .field("allow_collection_filter", &self.allow_collection_filter)
            .finish()
    }
}

impl ResolverConfig {
    /// Load configuration from the environment, reading `.env` first when
    /// one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the token secret is missing or weak, or if an
    /// optional variable is set to something unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let secret = std::env::var(ORDER_TOKEN_SECRET)
            .map_err(|_| ConfigError::MissingEnvVar(ORDER_TOKEN_SECRET))?;
        check_secret(&secret)
            .map_err(|reason| ConfigError::InsecureSecret(ORDER_TOKEN_SECRET, reason))?;

        let ttl_days = match std::env::var(ORDER_TOKEN_TTL_DAYS) {
            Ok(raw) => parse_ttl_days(&raw)
                .map_err(|reason| ConfigError::InvalidEnvVar(ORDER_TOKEN_TTL_DAYS, reason))?,
            Err(_) => DEFAULT_TOKEN_TTL_DAYS,
        };

        Ok(Self {
            order_token_secret: SecretString::from(secret),
            order_token_ttl: Duration::days(ttl_days),
            allow_collection_filter: allow_collection_filter_from_env()?,
        })
    }

    /// Build a configuration around an already loaded secret, with defaults
    /// for everything else. The secret is not checked.
    #[must_use]
    pub fn with_secret(order_token_secret: SecretString) -> Self {
        Self {
            order_token_secret,
            order_token_ttl: Duration::days(DEFAULT_TOKEN_TTL_DAYS),
            allow_collection_filter: true,
        }
    }

    /// Run the same strength checks `from_env` applies to the token secret.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InsecureSecret` describing the first failed check.
    pub fn validate_secret(&self) -> Result<(), ConfigError> {
        check_secret(self.order_token_secret.expose_secret())
            .map_err(|reason| ConfigError::InsecureSecret(ORDER_TOKEN_SECRET, reason))
    }
}

/// Read only `SEARCH_ALLOW_COLLECTION_FILTER`, for callers that compile search
/// filters without handling order tokens.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if the value is not a boolean.
pub fn allow_collection_filter_from_env() -> Result<bool, ConfigError> {
    let _ = dotenvy::dotenv();
    std::env::var(SEARCH_ALLOW_COLLECTION_FILTER).map_or(Ok(true), |raw| {
        parse_bool(&raw)
            .map_err(|reason| ConfigError::InvalidEnvVar(SEARCH_ALLOW_COLLECTION_FILTER, reason))
    })
}

// =============================================================================
// Parsing and validation
// =============================================================================

fn parse_ttl_days(raw: &str) -> Result<i64, String> {
    let days: i64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("expected whole days ({e})"))?;
    if (1..=MAX_TOKEN_TTL_DAYS).contains(&days) {
        Ok(days)
    } else {
        Err(format!("{days} is outside 1..={MAX_TOKEN_TTL_DAYS} days"))
    }
}

/// Accepts `true`/`false`, `1`/`0` and `yes`/`no`, case-insensitively.
fn parse_bool(raw: &str) -> Result<bool, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        other => Err(format!("expected a boolean, got '{other}'")),
    }
}

/// Length, then placeholder fragments, then character entropy.
fn check_secret(secret: &str) -> Result<(), String> {
    let chars = secret.chars().count();
    if chars < MIN_SECRET_CHARS {
        return Err(format!("needs at least {MIN_SECRET_CHARS} characters, has {chars}"));
    }

    let lowered = secret.to_lowercase();
    if let Some(fragment) = PLACEHOLDER_FRAGMENTS
        .iter()
        .find(|fragment| lowered.contains(**fragment))
    {
        return Err(format!("looks like a placeholder (contains '{fragment}')"));
    }

    let entropy = entropy_bits_per_char(secret);
    if entropy < MIN_SECRET_ENTROPY {
        return Err(format!(
            "too predictable ({entropy:.2} bits/char, want {MIN_SECRET_ENTROPY:.1}); generate it randomly"
        ));
    }
    Ok(())
}

/// Shannon entropy of the character distribution.
#[allow(clippy::cast_precision_loss)] // secrets are far below 2^52 characters
fn entropy_bits_per_char(s: &str) -> f64 {
    let mut counts: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *counts.entry(c).or_default() += 1;
    }

    let total = counts.values().sum::<usize>() as f64;
    counts
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum()
}
