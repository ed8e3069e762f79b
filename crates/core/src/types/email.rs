//! Validated email address.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Why a string was rejected as an [`Email`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    /// Nothing was supplied.
    #[error("email must not be empty")]
    Empty,
    /// Longer than [`Email::MAX_LEN`] characters.
    #[error("email is longer than {} characters", Email::MAX_LEN)]
    TooLong,
    /// Not of the form `local@domain` with both sides non-empty.
    #[error("email must look like local@domain")]
    Malformed,
}

/// An email address that passed structural validation.
///
/// Validation is deliberately shallow: the address must fit in the RFC 5321
/// length limit and split into a non-empty local part and domain around an
/// `@`. Deliverability is the mail server's problem, not ours.
///
/// ```
/// use clementine_core::Email;
///
/// let email = Email::parse("ada@example.com")?;
/// assert_eq!(email.as_str(), "ada@example.com");
/// # Ok::<(), clementine_core::EmailError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// RFC 5321 upper bound on address length.
    pub const MAX_LEN: usize = 254;

    /// Validate a string and wrap it.
    ///
    /// # Errors
    ///
    /// Returns [`EmailError`] when the input is empty, too long, or does not
    /// split into `local@domain`.
    pub fn parse(raw: &str) -> Result<Self, EmailError> {
        if raw.is_empty() {
            return Err(EmailError::Empty);
        }
        if raw.len() > Self::MAX_LEN {
            return Err(EmailError::TooLong);
        }

        match raw.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {
                Ok(Self(raw.to_owned()))
            }
            _ => Err(EmailError::Malformed),
        }
    }

    /// The address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the owned string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
