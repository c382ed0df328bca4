use thiserror::Error;

/// Failures surfaced to the caller. Invariant guards (duplicate enqueue,
/// out-of-range stress) are absorbed locally by no-op or clamping and never
/// appear here.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An administrative operation referenced an unknown identity; no state
    /// was mutated.
    #[error("no character named `{identity}` exists")]
    NotFound { identity: String },

    /// Persisted state could not be decoded.
    #[error("persisted population state is unreadable: {0}")]
    Parse(#[from] serde_json::Error),

    /// A loaded snapshot holds zero character records; the host must run its
    /// one-time population bootstrap before ticking the simulation.
    #[error("snapshot holds no character records; population bootstrap required")]
    EmptyPopulation,
}

impl CoreError {
    pub fn not_found(identity: impl Into<String>) -> Self {
        Self::NotFound {
            identity: identity.into(),
        }
    }
}
