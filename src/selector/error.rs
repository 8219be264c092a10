use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by the LLM disambiguator call.
///
/// A malformed or out-of-set verdict is not an error: the contract maps it
/// to "no pick". Only transport/provider failures surface here.
pub enum SelectorError {
    /// The provider call failed (network, auth, model error).
    #[error("disambiguator call failed: {message}")]
    ProviderFailed {
        /// Error detail.
        message: String,
    },
}
