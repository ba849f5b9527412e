//! Order token commands.
//!
//! # Usage
//!
//! ```bash
//! sf-cli token sign order-1042
//! sf-cli token verify <TOKEN>
//! ```
//!
//! # Environment Variables
//!
//! - `ORDER_TOKEN_SECRET` - Secret the token keys are derived from
//! - `ORDER_TOKEN_TTL_DAYS` - Lifetime of signed tokens (default: 30)

use shopfront_resolver::{OrderTokenCodec, ResolverConfig};

use super::{CliError, print_json};

fn codec() -> Result<OrderTokenCodec, CliError> {
    let config = ResolverConfig::from_env()?;
    tracing::debug!(ttl_days = config.order_token_ttl.num_days(), "Loaded token configuration");
    Ok(OrderTokenCodec::from_config(&config))
}

/// Sign a token for `order_id` and print it.
#[allow(clippy::print_stdout)]
pub fn sign(order_id: &str) -> Result<(), CliError> {
    let token = codec()?.sign(order_id);
    tracing::info!(order_id, "Signed order token");
    println!("{token}");
    Ok(())
}

/// Verify `token` and print the grant as JSON.
pub fn verify(token: &str) -> Result<(), CliError> {
    let grant = codec()?.verify(token).ok_or(CliError::InvalidToken)?;
    tracing::info!(order_id = %grant.order_id, expires_at = %grant.expires_at, "Token is valid");
    print_json(&grant)
}
