use thiserror::Error;

/// Failures raised by helpers that need a component context or an injected
/// dependency.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An instance-scoped helper ran outside `Instance::run`.
    #[error("'{name}' must be called from inside a setup function")]
    MissingContext { name: String },

    /// Injection yielded nothing usable for `key`.
    #[error("Could not resolve {key}")]
    Unresolved { key: String },
}

impl Error {
    pub fn missing_context(name: impl Into<String>) -> Self {
        Self::MissingContext { name: name.into() }
    }

    pub fn unresolved(key: impl Into<String>) -> Self {
        Self::Unresolved { key: key.into() }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
