//! Shared types for the mev-flood argument engine.
//!
//! Values produced by the flag coercer, wallet material handed to the
//! deployment routine, the deployment payload it returns, and the
//! domain error enums.

use rust_decimal::prelude::*;
use rust_decimal_macros::dec;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Numeric
// ---------------------------------------------------------------------------

const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// A number coerced from a CLI token.
///
/// Tokens with a zero fractional part become `Int`, everything else
/// stays `Float`, so `"5"` and `"5.0"` both read as the integer 5 while
/// `"5.1"` keeps its fraction. Downstream consumers use the distinction
/// for unit semantics (pair counts vs. ETH amounts).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Int(i64),
    Float(f64),
}

impl Numeric {
    /// Parse a token. Returns `None` for anything that is not a finite number.
    pub fn parse(token: &str) -> Option<Self> {
        let value: f64 = token.trim().parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
            Some(Numeric::Int(value as i64))
        } else {
            Some(Numeric::Float(value))
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Numeric::Int(v) => v as f64,
            Numeric::Float(v) => v,
        }
    }

    /// Larger of the two values, keeping the winner's representation.
    pub fn max(self, other: Numeric) -> Numeric {
        if other.as_f64() > self.as_f64() {
            other
        } else {
            self
        }
    }

    /// Convert an ether amount to wei (18 decimals) with exact decimal
    /// arithmetic. Digits past the 18th decimal are truncated.
    ///
    /// The whole part is scaled in `u128` so amounts beyond `Decimal`'s
    /// 96-bit mantissa still convert; only the fraction goes through
    /// `Decimal`.
    pub fn to_wei(self) -> Option<u128> {
        let ether = Decimal::from_str(&self.to_string()).ok()?;
        if ether.is_sign_negative() {
            return None;
        }
        let whole = ether.trunc().to_u128()?.checked_mul(WEI_PER_ETHER)?;
        let fraction = (ether.fract() * dec!(1000000000000000000)).trunc().to_u128()?;
        whole.checked_add(fraction)
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Int(v) => write!(f, "{v}"),
            Numeric::Float(v) => write!(f, "{v}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Wallets
// ---------------------------------------------------------------------------

/// An account the scripts sign with. The key never leaves this struct
/// except when handed to the external deployment routine.
#[derive(Debug, Clone)]
pub struct Wallet {
    pub address: String,
    pub private_key: SecretString,
}

impl Wallet {
    pub fn new(address: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            private_key: SecretString::new(private_key.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Deployment
// ---------------------------------------------------------------------------

/// Result of one run of the external deployment routine.
///
/// `deployment` is opaque to this crate (contract addresses, pair
/// metadata); only `signed_txs` decides whether an artifact is written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    #[serde(default)]
    pub deployment: serde_json::Value,
    #[serde(default)]
    pub signed_txs: Vec<String>,
}

impl Deployment {
    pub fn has_signed_txs(&self) -> bool {
        !self.signed_txs.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Failures while turning tokens into parameters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ArgError {
    #[error("option '{flag}' was not specified")]
    MissingOptionValue { flag: String },

    /// Carries the verb's help text so the caller can print both.
    #[error("{message}")]
    MissingPositionalArgument { message: String, help: String },

    #[error("invalid number '{value}' for {flag}")]
    InvalidNumber { flag: String, value: String },

    #[error("unknown verb '{0}'")]
    UnknownVerb(String),
}

/// Failures of the liquidity orchestration run.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("failed to connect to {url}.")]
    UnreachableEndpoint { url: String, reason: String },

    #[error("deployment routine failed: {0}")]
    Deployer(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
