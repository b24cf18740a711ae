use thiserror::Error;

/// Why a lookup produced no weather. `Display` is the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("City name is required")]
    MissingCity,

    #[error("City \"{0}\" not found")]
    CityNotFound(String),

    /// Transport error, bad status, timeout or malformed payload from either
    /// upstream call. Carries no upstream detail.
    #[error("An error occurred while fetching weather data")]
    UpstreamFailure,
}
