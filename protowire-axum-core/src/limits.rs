//! Body read limits.
//!
//! Both the server `Encoder` and the client `Codec` drain a body fully before
//! parsing it. [`MessageLimits`] bounds that read; a body over the bound fails
//! as a read error, not a format error.

/// Default maximum message size (4 MB).
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 4 * 1024 * 1024;

/// Upper bound on the size of a body read for decoding.
///
/// ```rust
/// use protowire_axum_core::MessageLimits;
///
/// assert_eq!(MessageLimits::default().read_limit(), 4 * 1024 * 1024);
/// assert_eq!(MessageLimits::new(1024).max_message_size(), Some(1024));
/// assert_eq!(MessageLimits::unlimited().read_limit(), usize::MAX);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessageLimits {
    /// `None` means unbounded.
    max_message_size: Option<usize>,
}

impl Default for MessageLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl MessageLimits {
    /// [`DEFAULT_MAX_MESSAGE_SIZE`], usable in const contexts.
    pub const DEFAULT: Self = Self::new(DEFAULT_MAX_MESSAGE_SIZE);

    pub const fn new(max_message_size: usize) -> Self {
        Self {
            max_message_size: Some(max_message_size),
        }
    }

    /// No bound. A peer can then make the decoder buffer any amount of data.
    pub const fn unlimited() -> Self {
        Self {
            max_message_size: None,
        }
    }

    pub fn max_message_size(&self) -> Option<usize> {
        self.max_message_size
    }

    /// Byte bound handed to the body collector.
    pub fn read_limit(&self) -> usize {
        self.max_message_size.unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = MessageLimits::default();
        assert_eq!(limits, MessageLimits::DEFAULT);
        assert_eq!(limits.max_message_size(), Some(DEFAULT_MAX_MESSAGE_SIZE));
        assert_eq!(limits.read_limit(), DEFAULT_MAX_MESSAGE_SIZE);
    }

    #[test]
    fn test_unlimited_read_limit() {
        let limits = MessageLimits::unlimited();
        assert_eq!(limits.max_message_size(), None);
        assert_eq!(limits.read_limit(), usize::MAX);
    }
}
