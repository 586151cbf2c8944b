//! Error types for display operations.

use thiserror::Error;

/// Errors that can occur while talking to the display controller.
///
/// `E` is the error type of the underlying [`Gpio`](crate::traits::Gpio)
/// implementation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E: core::fmt::Debug> {
    /// A pin operation failed.
    #[error("GPIO error: {0:?}")]
    Gpio(E),

    /// The controller did not acknowledge a byte.
    ///
    /// Only returned under [`AckPolicy::Strict`](crate::config::AckPolicy::Strict).
    #[error("byte {byte:#04x} was not acknowledged")]
    Nack {
        /// The byte that went unacknowledged.
        byte: u8,
    },
}

impl<E: core::fmt::Debug> Error<E> {
    /// Returns true if this is an acknowledgement failure.
    pub fn is_nack(&self) -> bool {
        matches!(self, Error::Nack { .. })
    }
}

impl<E: core::fmt::Debug> From<E> for Error<E> {
    fn from(err: E) -> Self {
        Error::Gpio(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_gpio_error() {
        let err: Error<&str> = "pin busy".into();
        assert_eq!(err, Error::Gpio("pin busy"));
        assert!(!err.is_nack());
    }

    #[test]
    fn nack_display() {
        let err: Error<()> = Error::Nack { byte: 0x40 };
        assert!(err.is_nack());
        assert_eq!(format!("{}", err), "byte 0x40 was not acknowledged");
    }

    #[test]
    fn gpio_display() {
        let err: Error<u8> = Error::Gpio(7);
        assert_eq!(format!("{}", err), "GPIO error: 7");
    }
}
