/// Violations of the scheduling contract.
///
/// All of these are programming errors in the model driving the engine: the run must stop when
/// one occurs, and the values involved are never adjusted to make it pass.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Attempted to move the clock to a time before the current one.
    #[error("clock cannot move backward from {now} to {target}")]
    ClockBackward {
        /// Current time.
        now: f64,
        /// Requested time.
        target: f64,
    },
    /// Scheduling delay was negative or not a number.
    #[error("invalid scheduling delay: {delay}")]
    InvalidDelay {
        /// Requested delay.
        delay: f64,
    },
    /// A sampled duration was zero, negative, or not finite.
    #[error("timeout must be a positive finite duration, got {duration}")]
    NonPositiveTimeout {
        /// Requested duration.
        duration: f64,
    },
    /// An event was addressed to a component that was never registered.
    #[error("no component registered with ID {0}")]
    UnknownComponent(usize),
    /// An event reached a component that handles a different event type.
    #[error("event type does not match the type handled by component {0}")]
    EventTypeMismatch(usize),
}
