//! Business readiness flags.
//!
//! Projects a business snapshot onto a set of independent booleans that
//! summarise whether the store can take payments, ship, run AI automations,
//! and withdraw funds. Flags never block exploring the dashboard; they only
//! gate specific actions (see [`crate::gates`]).
//!
//! The projection is best-effort: absent fields degrade the affected flag to
//! `false` and nothing here returns an error.

use serde::{Deserialize, Serialize};

use crate::business_access::BusinessAccessState;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Token balance that must be exceeded for `ai_energy_ok`.
pub const MIN_AI_TOKENS_FOR_OK: u64 = 10;

/// Environment variable overriding [`MIN_AI_TOKENS_FOR_OK`].
pub const ENV_MIN_AI_TOKENS: &str = "STOREX_MIN_AI_TOKENS";

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Tunables for the readiness projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessConfig {
    /// Balance must be strictly greater than this for `ai_energy_ok`.
    pub min_ai_tokens: u64,
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            min_ai_tokens: MIN_AI_TOKENS_FOR_OK,
        }
    }
}

impl ReadinessConfig {
    /// Load the config from `STOREX_MIN_AI_TOKENS`, falling back to the
    /// default when the variable is unset.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_env_value(std::env::var(ENV_MIN_AI_TOKENS).ok().as_deref())
    }

    /// Build a config from the raw value of `STOREX_MIN_AI_TOKENS`.
    pub fn from_env_value(raw: Option<&str>) -> Result<Self, CoreError> {
        let Some(raw) = raw else {
            return Ok(Self::default());
        };
        let min_ai_tokens = raw.trim().parse::<u64>().map_err(|_| {
            CoreError::Validation(format!(
                "{ENV_MIN_AI_TOKENS} must be a non-negative integer, got '{raw}'"
            ))
        })?;
        Ok(Self { min_ai_tokens })
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Minimal product reference; only presence matters here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetails {
    pub account_number: Option<String>,
}

/// Fulfillment settings as stored on the store record. When present, its
/// lists take precedence over the top-level snapshot fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fulfillment {
    pub payment_methods: Option<Vec<String>>,
    pub delivery_types: Option<Vec<String>>,
    pub bank_details: Option<BankDetails>,
}

/// Balances are stored as plain JSON numbers and may be fractional or
/// negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub balance: f64,
}

/// Read-only view of a business, supplied fresh by the caller on each call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessSnapshot {
    pub status: BusinessAccessState,
    #[serde(default)]
    pub payment_methods: Option<Vec<String>>,
    #[serde(default)]
    pub delivery_types: Option<Vec<String>>,
    #[serde(default)]
    pub products: Option<Vec<ProductRef>>,
    #[serde(default)]
    pub ai_tokens: Option<f64>,
    #[serde(default)]
    pub fulfillment: Option<Fulfillment>,
    #[serde(default)]
    pub token_usage: Option<TokenUsage>,
    #[serde(default)]
    pub identity_verified: Option<bool>,
}

impl BusinessSnapshot {
    /// A snapshot carrying only a status.
    pub fn new(status: BusinessAccessState) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    fn effective_payment_methods(&self) -> Option<&[String]> {
        self.fulfillment
            .as_ref()
            .and_then(|f| f.payment_methods.as_deref())
            .or(self.payment_methods.as_deref())
    }

    fn effective_delivery_types(&self) -> Option<&[String]> {
        self.fulfillment
            .as_ref()
            .and_then(|f| f.delivery_types.as_deref())
            .or(self.delivery_types.as_deref())
    }

    fn effective_ai_tokens(&self) -> Option<f64> {
        self.token_usage.map(|t| t.balance).or(self.ai_tokens)
    }

    fn has_bank_account(&self) -> bool {
        self.fulfillment
            .as_ref()
            .and_then(|f| f.bank_details.as_ref())
            .and_then(|b| b.account_number.as_deref())
            .is_some_and(|n| !n.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Flags
// ---------------------------------------------------------------------------

/// Independent readiness booleans. No identity of their own; recompute
/// whenever the snapshot changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReadinessFlags {
    pub payment_enabled: bool,
    pub delivery_configured: bool,
    pub products_available: bool,
    pub ai_energy_ok: bool,
    pub payout_ready: bool,
}

impl ReadinessFlags {
    /// Whether every flag is satisfied.
    pub fn all_ready(&self) -> bool {
        self.payment_enabled
            && self.delivery_configured
            && self.products_available
            && self.ai_energy_ok
            && self.payout_ready
    }
}

/// Compute readiness flags with the default config.
pub fn update_readiness_flags(business: &BusinessSnapshot) -> ReadinessFlags {
    update_readiness_flags_with(business, &ReadinessConfig::default())
}

/// Compute readiness flags against an explicit config.
pub fn update_readiness_flags_with(
    business: &BusinessSnapshot,
    config: &ReadinessConfig,
) -> ReadinessFlags {
    let non_empty = |list: Option<&[String]>| list.is_some_and(|l| !l.is_empty());

    ReadinessFlags {
        payment_enabled: non_empty(business.effective_payment_methods()),
        delivery_configured: non_empty(business.effective_delivery_types()),
        products_available: business.products.as_ref().is_some_and(|p| !p.is_empty()),
        ai_energy_ok: business
            .effective_ai_tokens()
            .is_some_and(|balance| balance > config.min_ai_tokens as f64),
        payout_ready: business
            .identity_verified
            .unwrap_or_else(|| business.has_bank_account()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
