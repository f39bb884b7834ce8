/// Type alias for Result with anyhow::Error as the error type.
/// Used by configuration loading and the CLI driver; the query pipeline
/// itself works with the typed errors in [`crate::shared::error`].
pub type Result<T> = std::result::Result<T, anyhow::Error>;
