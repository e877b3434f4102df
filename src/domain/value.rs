use crate::domain::validation::ValidationError;

use phonenumber::country;

/// Maximum sender id length for alphanumeric values.
pub const SENDER_ID_MAX_ALPHA: usize = 11;
/// Maximum sender id length for purely numeric values.
pub const SENDER_ID_MAX_NUMERIC: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message originator (`sender`).
///
/// Invariant: no longer than 11 characters for alphanumeric or 15 characters
/// for numeric sender ids; no spaces or special characters.
pub struct SenderId(String);

impl SenderId {
    /// JSON field name used by The SMS Works (`sender`).
    pub const FIELD: &'static str = "sender";

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let numeric = trimmed.chars().all(|c| c.is_ascii_digit());
        let alphanumeric = trimmed.chars().all(|c| c.is_ascii_alphanumeric());
        let max = if numeric {
            SENDER_ID_MAX_NUMERIC
        } else {
            SENDER_ID_MAX_ALPHA
        };

        if !alphanumeric || trimmed.chars().count() > max {
            return Err(ValidationError::InvalidSenderId {
                input: trimmed.to_owned(),
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Recipient telephone number (`destination`).
///
/// Invariant: non-empty after trimming. [`Destination::new`] does not
/// normalize; use [`Destination::parse`] for E.164 normalization against a
/// default region.
pub struct Destination(String);

impl Destination {
    /// JSON field name used by The SMS Works (`destination`).
    pub const FIELD: &'static str = "destination";

    /// Create a validated (non-empty) raw destination number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Parse and normalize a destination number into E.164.
    ///
    /// `default_region` is used when the input does not carry an explicit
    /// country prefix (The SMS Works assumes UK numbers by default).
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self(e164))
    }

    /// Raw (trimmed or normalized) value as sent to The SMS Works.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

/// Maximum message content length accepted by the API.
pub const MESSAGE_CONTENT_MAX_LEN: usize = 1280;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message body (`content`).
///
/// Invariant: non-empty after trimming and at most 1280 characters. Messages
/// longer than 160 characters are split into 153-character parts by the
/// service, each part billed separately.
pub struct MessageContent(String);

impl MessageContent {
    /// JSON field name used by The SMS Works (`content`).
    pub const FIELD: &'static str = "content";

    /// Create validated message content.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let chars = value.chars().count();
        if chars > MESSAGE_CONTENT_MAX_LEN {
            return Err(ValidationError::TooLong {
                field: Self::FIELD,
                max: MESSAGE_CONTENT_MAX_LEN,
                actual: chars,
            });
        }
        Ok(Self(value))
    }

    /// Borrow the message content as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Message id (`messageid`) assigned by The SMS Works.
///
/// Invariant: non-empty after trimming.
pub struct MessageId(String);

impl MessageId {
    /// JSON field and path-parameter name (`messageid`).
    pub const FIELD: &'static str = "messageid";

    /// Create a validated [`MessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated message id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Batch id (`batchid`) assigned by The SMS Works.
///
/// Invariant: non-empty after trimming.
pub struct BatchId(String);

impl BatchId {
    /// JSON field and path-parameter name (`batchid`).
    pub const FIELD: &'static str = "batchid";

    /// Create a validated [`BatchId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated batch id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Account customer id (`customerid`), from the account area.
///
/// Invariant: non-empty after trimming.
pub struct CustomerId(String);

impl CustomerId {
    /// JSON field and query-parameter name (`customerid`).
    pub const FIELD: &'static str = "customerid";

    /// Create a validated [`CustomerId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated customer id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// API key (`key`) issued for an account.
///
/// Invariant: non-empty after trimming.
pub struct ApiKey(String);

impl ApiKey {
    /// JSON field name (`key`).
    pub const FIELD: &'static str = "key";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// API secret (`secret`) issued for an account.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct ApiSecret(String);

impl ApiSecret {
    /// JSON field name (`secret`).
    pub const FIELD: &'static str = "secret";

    /// Create a validated [`ApiSecret`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the secret as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Maximum tag length accepted by the API.
pub const TAG_MAX_LEN: usize = 280;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Free-form label attached to a message (`tag`).
///
/// Invariant: non-empty after trimming and at most 280 characters.
pub struct Tag(String);

impl Tag {
    /// JSON field name (`tag`).
    pub const FIELD: &'static str = "tag";

    /// Create a validated [`Tag`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let chars = trimmed.chars().count();
        if chars > TAG_MAX_LEN {
            return Err(ValidationError::TooLong {
                field: Self::FIELD,
                max: TAG_MAX_LEN,
                actual: chars,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// One-time-password code (`passcode`).
///
/// Invariant: non-empty after trimming.
pub struct Passcode(String);

impl Passcode {
    /// JSON field name (`passcode`).
    pub const FIELD: &'static str = "passcode";

    /// Create a validated [`Passcode`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated passcode.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Message validity window in minutes (`validity`, also the legacy `ttl`).
///
/// Invariant: `1..=2880` (the service caps validity at 48 hours).
pub struct ValidityMinutes(u32);

impl ValidityMinutes {
    /// JSON field name (`validity`).
    pub const FIELD: &'static str = "validity";

    /// Minimum allowed validity value.
    pub const MIN: u32 = 1;
    /// Maximum allowed validity value.
    pub const MAX: u32 = 2880;

    /// Create a validated validity window.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::TtlOutOfRange {
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    /// Get the underlying validity value in minutes.
    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Error code used by `/utils/errors/{errorcode}`.
///
/// Invariant: non-empty after trimming. The value is preserved as-is even
/// when unknown to this crate.
pub struct ErrorCode(String);

impl ErrorCode {
    /// Path-parameter name (`errorcode`).
    pub const FIELD: &'static str = "errorcode";

    /// Create a validated [`ErrorCode`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated error code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
