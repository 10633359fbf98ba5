//! Action gates.
//!
//! Which dashboard actions are blocked by which state. Blocking is kept
//! minimal: an inactive business cannot reach the main app, and individual
//! readiness flags only block the single action that depends on them.

use serde::{Deserialize, Serialize};

use crate::business_access::BusinessAccessState;
use crate::readiness::ReadinessFlags;
use crate::user_access::UserAccessState;

/// Outcome of an identity verification attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    #[default]
    Unverified,
    Pending,
    Verified,
    Failed,
}

/// Latest identity verification result for the merchant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityVerification {
    pub status: VerificationStatus,
}

/// Only an authenticated user may start creating a business. Whether the
/// referral code they hold is any good is the caller's call.
pub fn can_create_business(user: UserAccessState) -> bool {
    user == UserAccessState::Authenticated
}

/// The main dashboard is only reachable once the business is active.
pub fn can_access_main_app(business: BusinessAccessState) -> bool {
    business == BusinessAccessState::Active
}

/// Orders may be created before payments are configured.
pub fn can_create_order(business: BusinessAccessState) -> bool {
    business == BusinessAccessState::Active
}

/// Checkout needs at least one payment method.
pub fn can_complete_checkout(flags: &ReadinessFlags) -> bool {
    flags.payment_enabled
}

/// Marking an order paid needs at least one payment method.
pub fn can_complete_payment(flags: &ReadinessFlags) -> bool {
    flags.payment_enabled
}

/// Shipping needs at least one delivery type.
pub fn can_fulfill_delivery(flags: &ReadinessFlags) -> bool {
    flags.delivery_configured
}

/// Withdrawals need a verified identity or a bank account on file.
pub fn can_withdraw_funds(flags: &ReadinessFlags) -> bool {
    flags.payout_ready
}

/// AI automations need both energy and the merchant's toggle.
pub fn can_automate(flags: &ReadinessFlags, automation_enabled: bool) -> bool {
    flags.ai_energy_ok && automation_enabled
}

/// Payout requests need a completed identity verification.
pub fn can_request_payout(verification: &IdentityVerification) -> bool {
    verification.status == VerificationStatus::Verified
}
