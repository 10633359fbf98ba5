#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid {machine} transition: {action} is not allowed from {from}")]
    InvalidTransition {
        machine: &'static str,
        from: &'static str,
        action: &'static str,
    },

    #[error("Validation failed: {0}")]
    Validation(String),
}
