//! Proof wrapper for values that passed request validation.

/// Proof wrapper indicating a value has been validated.
///
/// Only the validation pipeline constructs these for request DTOs, so a
/// use-case taking `Validated<T>` can never observe a raw payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated<T>(T);

impl<T> Validated<T> {
    /// Wrap a validated value.
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    /// Consume and return the inner value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
