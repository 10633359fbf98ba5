//! Business access state machine (referral-gated onboarding).
//!
//! Tracks how far an authenticated user's store has progressed from "no
//! business" to "active". Referral validity is decided by the caller and
//! signalled purely by which action is dispatched; payload fields are carried
//! for bookkeeping and never influence the next state.
//!
//! `ACCESS_REQUESTED` has no outgoing transition. Approval of a pending
//! access request happens outside this module.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// State constants
// ---------------------------------------------------------------------------

pub const STATE_NO_BUSINESS: &str = "NO_BUSINESS";
pub const STATE_REFERRAL_REQUIRED: &str = "REFERRAL_REQUIRED";
pub const STATE_ACCESS_REQUESTED: &str = "ACCESS_REQUESTED";
pub const STATE_BUSINESS_CREATED: &str = "BUSINESS_CREATED";
pub const STATE_ACTIVE: &str = "ACTIVE";

/// All valid business access state strings.
pub const VALID_BUSINESS_STATES: &[&str] = &[
    STATE_NO_BUSINESS,
    STATE_REFERRAL_REQUIRED,
    STATE_ACCESS_REQUESTED,
    STATE_BUSINESS_CREATED,
    STATE_ACTIVE,
];

// ---------------------------------------------------------------------------
// Action constants
// ---------------------------------------------------------------------------

pub const ACTION_ATTEMPT_CREATE_BUSINESS: &str = "ATTEMPT_CREATE_BUSINESS";
pub const ACTION_SUBMIT_VALID_REFERRAL: &str = "SUBMIT_VALID_REFERRAL";
pub const ACTION_SUBMIT_INVALID_REFERRAL: &str = "SUBMIT_INVALID_REFERRAL";
pub const ACTION_REQUEST_ACCESS: &str = "REQUEST_ACCESS";
pub const ACTION_COMPLETE_BUSINESS_SETUP: &str = "COMPLETE_BUSINESS_SETUP";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Onboarding progress of a store owned by an authenticated user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessAccessState {
    #[default]
    NoBusiness,
    ReferralRequired,
    AccessRequested,
    BusinessCreated,
    Active,
}

impl BusinessAccessState {
    /// Parse a stored state string.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            STATE_NO_BUSINESS => Ok(Self::NoBusiness),
            STATE_REFERRAL_REQUIRED => Ok(Self::ReferralRequired),
            STATE_ACCESS_REQUESTED => Ok(Self::AccessRequested),
            STATE_BUSINESS_CREATED => Ok(Self::BusinessCreated),
            STATE_ACTIVE => Ok(Self::Active),
            _ => Err(CoreError::Validation(format!(
                "Invalid business access state '{s}'. Must be one of: {}",
                VALID_BUSINESS_STATES.join(", ")
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoBusiness => STATE_NO_BUSINESS,
            Self::ReferralRequired => STATE_REFERRAL_REQUIRED,
            Self::AccessRequested => STATE_ACCESS_REQUESTED,
            Self::BusinessCreated => STATE_BUSINESS_CREATED,
            Self::Active => STATE_ACTIVE,
        }
    }

    /// Whether no action can move the business out of this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::AccessRequested | Self::Active)
    }
}

/// Actions that drive the business access machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BusinessAction {
    AttemptCreateBusiness,
    #[serde(rename_all = "camelCase")]
    SubmitValidReferral {
        referral_code: String,
    },
    SubmitInvalidReferral,
    /// Skip the referral step and ask for manual approval.
    #[serde(rename_all = "camelCase")]
    RequestAccess {
        business_name: String,
        business_category: String,
    },
    CompleteBusinessSetup {
        name: String,
        category: String,
    },
}

impl BusinessAction {
    /// The action's wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AttemptCreateBusiness => ACTION_ATTEMPT_CREATE_BUSINESS,
            Self::SubmitValidReferral { .. } => ACTION_SUBMIT_VALID_REFERRAL,
            Self::SubmitInvalidReferral => ACTION_SUBMIT_INVALID_REFERRAL,
            Self::RequestAccess { .. } => ACTION_REQUEST_ACCESS,
            Self::CompleteBusinessSetup { .. } => ACTION_COMPLETE_BUSINESS_SETUP,
        }
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Returns the action tags accepted from `state`.
///
/// Transition rules:
/// - `NO_BUSINESS`       -> `REFERRAL_REQUIRED` on `ATTEMPT_CREATE_BUSINESS`
/// - `REFERRAL_REQUIRED` -> `BUSINESS_CREATED` on `SUBMIT_VALID_REFERRAL`
/// - `REFERRAL_REQUIRED` -> `ACCESS_REQUESTED` on `SUBMIT_INVALID_REFERRAL`
///   or `REQUEST_ACCESS`
/// - `BUSINESS_CREATED`  -> `ACTIVE` on `COMPLETE_BUSINESS_SETUP`
/// - `ACCESS_REQUESTED`, `ACTIVE` -> (none)
pub fn allowed_business_actions(state: BusinessAccessState) -> &'static [&'static str] {
    match state {
        BusinessAccessState::NoBusiness => &[ACTION_ATTEMPT_CREATE_BUSINESS],
        BusinessAccessState::ReferralRequired => &[
            ACTION_SUBMIT_VALID_REFERRAL,
            ACTION_SUBMIT_INVALID_REFERRAL,
            ACTION_REQUEST_ACCESS,
        ],
        BusinessAccessState::BusinessCreated => &[ACTION_COMPLETE_BUSINESS_SETUP],
        BusinessAccessState::AccessRequested | BusinessAccessState::Active => &[],
    }
}

/// Compute the next business access state.
///
/// Pairs outside the transition table, including every action dispatched
/// against `ACCESS_REQUESTED` or `ACTIVE`, are rejected with
/// [`CoreError::InvalidTransition`].
pub fn transition_business_state(
    current: BusinessAccessState,
    action: &BusinessAction,
) -> Result<BusinessAccessState, CoreError> {
    use BusinessAccessState::*;

    let next = match (current, action) {
        (NoBusiness, BusinessAction::AttemptCreateBusiness) => ReferralRequired,
        (ReferralRequired, BusinessAction::SubmitValidReferral { .. }) => BusinessCreated,
        (
            ReferralRequired,
            BusinessAction::SubmitInvalidReferral | BusinessAction::RequestAccess { .. },
        ) => AccessRequested,
        (BusinessCreated, BusinessAction::CompleteBusinessSetup { .. }) => Active,
        _ => {
            tracing::warn!(
                from = current.as_str(),
                action = action.as_str(),
                "Rejected business access transition",
            );
            return Err(CoreError::InvalidTransition {
                machine: "business",
                from: current.as_str(),
                action: action.as_str(),
            });
        }
    };

    tracing::debug!(
        from = current.as_str(),
        to = next.as_str(),
        action = action.as_str(),
        "Business access transition",
    );
    Ok(next)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
