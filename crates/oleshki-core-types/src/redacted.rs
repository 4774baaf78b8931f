//! Redaction marker for personal data
//!
//! Records carry names, phone numbers and addresses of people waiting for
//! evacuation. Values from those fields are wrapped in [`Redacted`] before
//! they reach a log line; only the character count survives.

use std::fmt;

/// Wrapper that hides its contents in Debug and Display output
///
/// # Example
///
/// ```
/// use oleshki_core_types::Redacted;
///
/// let phone = Redacted::new("+380 50 000 00 00");
/// assert_eq!(format!("{}", phone), "<redacted 17 chars>");
/// assert_eq!(phone.expose(), &"+380 50 000 00 00");
/// ```
pub struct Redacted<T>(T);

impl<T> Redacted<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Access the underlying value
    pub fn expose(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T: fmt::Display> Redacted<T> {
    fn char_count(&self) -> usize {
        self.0.to_string().chars().count()
    }
}

impl<T: fmt::Display> fmt::Debug for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<redacted {} chars>", self.char_count())
    }
}

impl<T: fmt::Display> fmt::Display for Redacted<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<redacted {} chars>", self.char_count())
    }
}

impl<T: Clone> Clone for Redacted<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}
