//! User access state machine.
//!
//! Tracks the authentication posture of a visiting user. Credentials are
//! checked upstream; by the time an action reaches this module it is only a
//! tag. The caller persists whatever state comes back.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// State constants
// ---------------------------------------------------------------------------

pub const STATE_ANONYMOUS: &str = "ANONYMOUS";
pub const STATE_AUTHENTICATED: &str = "AUTHENTICATED";
pub const STATE_PASSWORD_RESET: &str = "PASSWORD_RESET";

/// All valid user access state strings.
pub const VALID_USER_STATES: &[&str] =
    &[STATE_ANONYMOUS, STATE_AUTHENTICATED, STATE_PASSWORD_RESET];

// ---------------------------------------------------------------------------
// Action constants
// ---------------------------------------------------------------------------

pub const ACTION_SIGN_UP: &str = "SIGN_UP";
pub const ACTION_LOG_IN: &str = "LOG_IN";
pub const ACTION_LOG_OUT: &str = "LOG_OUT";
pub const ACTION_REQUEST_PASSWORD_RESET: &str = "REQUEST_PASSWORD_RESET";
pub const ACTION_COMPLETE_PASSWORD_RESET: &str = "COMPLETE_PASSWORD_RESET";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Authentication posture of the current visitor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserAccessState {
    #[default]
    Anonymous,
    Authenticated,
    PasswordReset,
}

impl UserAccessState {
    /// Parse a stored state string.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            STATE_ANONYMOUS => Ok(Self::Anonymous),
            STATE_AUTHENTICATED => Ok(Self::Authenticated),
            STATE_PASSWORD_RESET => Ok(Self::PasswordReset),
            _ => Err(CoreError::Validation(format!(
                "Invalid user access state '{s}'. Must be one of: {}",
                VALID_USER_STATES.join(", ")
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anonymous => STATE_ANONYMOUS,
            Self::Authenticated => STATE_AUTHENTICATED,
            Self::PasswordReset => STATE_PASSWORD_RESET,
        }
    }
}

/// Actions that drive the user access machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserAction {
    SignUp,
    LogIn,
    LogOut,
    RequestPasswordReset,
    CompletePasswordReset,
}

impl UserAction {
    /// The action's wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SignUp => ACTION_SIGN_UP,
            Self::LogIn => ACTION_LOG_IN,
            Self::LogOut => ACTION_LOG_OUT,
            Self::RequestPasswordReset => ACTION_REQUEST_PASSWORD_RESET,
            Self::CompletePasswordReset => ACTION_COMPLETE_PASSWORD_RESET,
        }
    }
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Returns the action tags accepted from `state`.
///
/// Transition rules:
/// - `ANONYMOUS`      -> `AUTHENTICATED` on `SIGN_UP` or `LOG_IN`
/// - `AUTHENTICATED`  -> `ANONYMOUS` on `LOG_OUT`
/// - `AUTHENTICATED`  -> `PASSWORD_RESET` on `REQUEST_PASSWORD_RESET`
/// - `PASSWORD_RESET` -> `AUTHENTICATED` on `COMPLETE_PASSWORD_RESET`
pub fn allowed_user_actions(state: UserAccessState) -> &'static [&'static str] {
    match state {
        UserAccessState::Anonymous => &[ACTION_SIGN_UP, ACTION_LOG_IN],
        UserAccessState::Authenticated => &[ACTION_LOG_OUT, ACTION_REQUEST_PASSWORD_RESET],
        UserAccessState::PasswordReset => &[ACTION_COMPLETE_PASSWORD_RESET],
    }
}

/// Compute the next user access state.
///
/// Pairs outside the transition table are rejected with
/// [`CoreError::InvalidTransition`]; the current state is never echoed back
/// as a silent no-op.
pub fn transition_user_state(
    current: UserAccessState,
    action: &UserAction,
) -> Result<UserAccessState, CoreError> {
    use UserAccessState::*;

    let next = match (current, action) {
        (Anonymous, UserAction::SignUp | UserAction::LogIn) => Authenticated,
        (Authenticated, UserAction::LogOut) => Anonymous,
        (Authenticated, UserAction::RequestPasswordReset) => PasswordReset,
        (PasswordReset, UserAction::CompletePasswordReset) => Authenticated,
        _ => {
            tracing::warn!(
                from = current.as_str(),
                action = action.as_str(),
                "Rejected user access transition",
            );
            return Err(CoreError::InvalidTransition {
                machine: "user",
                from: current.as_str(),
                action: action.as_str(),
            });
        }
    };

    tracing::debug!(
        from = current.as_str(),
        to = next.as_str(),
        action = action.as_str(),
        "User access transition",
    );
    Ok(next)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const ALL_STATES: [UserAccessState; 3] = [
        UserAccessState::Anonymous,
        UserAccessState::Authenticated,
        UserAccessState::PasswordReset,
    ];

    const ALL_ACTIONS: [UserAction; 5] = [
        UserAction::SignUp,
        UserAction::LogIn,
        UserAction::LogOut,
        UserAction::RequestPasswordReset,
        UserAction::CompletePasswordReset,
    ];

    // -- transition table -----------------------------------------------------

    #[test]
    fn anonymous_sign_up_authenticates() {
        assert_eq!(
            transition_user_state(UserAccessState::Anonymous, &UserAction::SignUp).unwrap(),
            UserAccessState::Authenticated
        );
    }

    #[test]
    fn anonymous_log_in_authenticates() {
        assert_eq!(
            transition_user_state(UserAccessState::Anonymous, &UserAction::LogIn).unwrap(),
            UserAccessState::Authenticated
        );
    }

    #[test]
    fn authenticated_log_out_is_anonymous() {
        assert_eq!(
            transition_user_state(UserAccessState::Authenticated, &UserAction::LogOut).unwrap(),
            UserAccessState::Anonymous
        );
    }

    #[test]
    fn authenticated_request_reset_enters_password_reset() {
        assert_eq!(
            transition_user_state(
                UserAccessState::Authenticated,
                &UserAction::RequestPasswordReset
            )
            .unwrap(),
            UserAccessState::PasswordReset
        );
    }

    #[test]
    fn password_reset_complete_returns_to_authenticated() {
        assert_eq!(
            transition_user_state(
                UserAccessState::PasswordReset,
                &UserAction::CompletePasswordReset
            )
            .unwrap(),
            UserAccessState::Authenticated
        );
    }

    // -- rejected pairs -------------------------------------------------------

    #[test]
    fn anonymous_log_out_is_rejected() {
        let result = transition_user_state(UserAccessState::Anonymous, &UserAction::LogOut);
        assert_matches!(
            result,
            Err(CoreError::InvalidTransition {
                machine: "user",
                from: "ANONYMOUS",
                action: "LOG_OUT",
            })
        );
    }

    #[test]
    fn authenticated_cannot_log_in_again() {
        assert!(transition_user_state(UserAccessState::Authenticated, &UserAction::LogIn).is_err());
        assert!(
            transition_user_state(UserAccessState::Authenticated, &UserAction::SignUp).is_err()
        );
    }

    #[test]
    fn password_reset_cannot_log_out() {
        assert!(transition_user_state(UserAccessState::PasswordReset, &UserAction::LogOut).is_err());
    }

    #[test]
    fn error_message_names_state_and_action() {
        let err = transition_user_state(UserAccessState::PasswordReset, &UserAction::SignUp)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid user transition: SIGN_UP is not allowed from PASSWORD_RESET"
        );
    }

    // -- allowed_user_actions -------------------------------------------------

    #[test]
    fn allowed_actions_agree_with_reducer() {
        for state in ALL_STATES {
            for action in ALL_ACTIONS {
                let allowed = allowed_user_actions(state).contains(&action.as_str());
                assert_eq!(
                    transition_user_state(state, &action).is_ok(),
                    allowed,
                    "{} + {}",
                    state.as_str(),
                    action.as_str()
                );
            }
        }
    }

    #[test]
    fn repeated_calls_are_deterministic() {
        for _ in 0..3 {
            let _ = transition_user_state(UserAccessState::Authenticated, &UserAction::LogOut);
            assert_eq!(
                transition_user_state(UserAccessState::Anonymous, &UserAction::SignUp).unwrap(),
                UserAccessState::Authenticated
            );
        }
    }

    // -- string conversion ----------------------------------------------------

    #[test]
    fn from_str_db_round_trip() {
        for state in ALL_STATES {
            assert_eq!(UserAccessState::from_str_db(state.as_str()).unwrap(), state);
        }
    }

    #[test]
    fn from_str_db_rejects_unknown() {
        let result = UserAccessState::from_str_db("anonymous");
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("Invalid user access state"));
    }

    #[test]
    fn default_state_is_anonymous() {
        assert_eq!(UserAccessState::default(), UserAccessState::Anonymous);
    }

    #[test]
    fn action_deserializes_from_type_tag() {
        let action: UserAction =
            serde_json::from_value(serde_json::json!({ "type": "REQUEST_PASSWORD_RESET" }))
                .unwrap();
        assert_eq!(action, UserAction::RequestPasswordReset);
    }

    #[test]
    fn state_serializes_to_screaming_snake_case() {
        assert_eq!(
            serde_json::to_value(UserAccessState::PasswordReset).unwrap(),
            serde_json::json!("PASSWORD_RESET")
        );
    }
}
