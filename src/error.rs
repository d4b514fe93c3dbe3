//! Error types.

use thiserror::Error;

/// Error returned by a [`TickTarget`](crate::animation::TickTarget).
pub type TickError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure to parse a color literal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// The literal does not start with `#`.
    #[error("color literal `{0}` must start with '#'")]
    MissingHash(String),
    /// The literal has a length other than 3, 4, 6 or 8 hex digits.
    #[error("color literal `{0}` has an unsupported length")]
    BadLength(String),
    /// The literal contains a non-hex character.
    #[error("color literal `{0}` contains a non-hex digit")]
    BadDigit(String),
}

/// Errors surfaced by the animation driver.
#[derive(Debug, Error)]
pub enum AnimationError {
    /// The tick target failed while handling a frame.
    ///
    /// The run keeps its schedule; the error is only reported.
    #[error("tick target failed at progress {progress}")]
    Tick {
        /// Progress value passed to the failing tick.
        progress: f32,
        /// Underlying failure.
        #[source]
        source: TickError,
    },
}
