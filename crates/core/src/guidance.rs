//! Human-readable onboarding guidance.
//!
//! Pure lookups the dashboard uses for its status banner and its single
//! "what to do next" prompt.

use crate::business_access::BusinessAccessState;
use crate::readiness::ReadinessFlags;

/// One-line description of a business access state.
pub fn state_description(state: BusinessAccessState) -> &'static str {
    match state {
        BusinessAccessState::NoBusiness => "No business created yet",
        BusinessAccessState::ReferralRequired => "Referral code required to create business",
        BusinessAccessState::AccessRequested => "Access request submitted, awaiting approval",
        BusinessAccessState::BusinessCreated => "Business created, completing setup",
        BusinessAccessState::Active => "Business is active and ready to sell",
    }
}

/// The most important next step for the merchant, or `None` when the
/// business is active and every readiness flag is satisfied.
///
/// Onboarding comes first. Once active, flags are checked in order:
/// payment, products, delivery, AI energy, payout.
pub fn next_action(state: BusinessAccessState, flags: &ReadinessFlags) -> Option<&'static str> {
    match state {
        BusinessAccessState::NoBusiness => return Some("Create your business to start selling"),
        BusinessAccessState::ReferralRequired => {
            return Some("Enter your referral code to continue")
        }
        BusinessAccessState::AccessRequested => {
            return Some("Your access request is being reviewed")
        }
        BusinessAccessState::BusinessCreated => {
            return Some("Complete business setup to activate")
        }
        BusinessAccessState::Active => {}
    }

    if !flags.payment_enabled {
        Some("Enable payments to complete sales")
    } else if !flags.products_available {
        Some("Add products to start selling")
    } else if !flags.delivery_configured {
        Some("Configure delivery options")
    } else if !flags.ai_energy_ok {
        Some("Add AI energy to continue automations")
    } else if !flags.payout_ready {
        Some("Complete identity verification to withdraw funds")
    } else {
        None
    }
}
