use chrono::{DateTime, Utc};
use serde_json::Value;
use url::Url;

use crate::domain::validation::ValidationError;
use crate::domain::value::{
    ApiKey, ApiSecret, CustomerId, Destination, MessageContent, Passcode, SenderId, Tag,
    ValidityMinutes,
};

/// Batches may contain up to 5000 messages at a time.
pub const BATCH_MAX_DESTINATIONS: usize = 5000;

#[derive(Debug, Clone, Default)]
/// Optional properties shared by single and batch sends.
pub struct MessageOptions {
    /// URL called by the service with the delivery report for the message.
    pub deliveryreporturl: Option<Url>,
    /// Date-time at which the message should be sent. Only honored by the
    /// schedule operations.
    pub schedule: Option<DateTime<Utc>>,
    /// Free-form label returned with delivery reports and queries.
    pub tag: Option<Tag>,
    /// Legacy alias for `validity`; kept because the service still accepts it.
    pub ttl: Option<ValidityMinutes>,
    /// Email addresses notified when the recipient replies.
    pub responseemail: Vec<String>,
    /// Arbitrary key/value metadata echoed back in responses.
    pub metadata: Option<Value>,
    /// Validity window in minutes after which delivery is abandoned.
    pub validity: Option<ValidityMinutes>,
    /// Opt out of AI content scanning when `Some(false)`.
    pub ai: Option<bool>,
}

#[derive(Debug, Clone)]
/// A single SMS message for `/message/send`, `/message/flash`, and
/// `/message/schedule`.
pub struct Message {
    sender: SenderId,
    destination: Destination,
    content: MessageContent,
    options: MessageOptions,
}

impl Message {
    /// Build a message from its required parts.
    pub fn new(
        sender: SenderId,
        destination: Destination,
        content: MessageContent,
        options: MessageOptions,
    ) -> Self {
        Self {
            sender,
            destination,
            content,
            options,
        }
    }

    pub fn sender(&self) -> &SenderId {
        &self.sender
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    pub fn options(&self) -> &MessageOptions {
        &self.options
    }
}

#[derive(Debug, Clone)]
/// One message body delivered to many recipients, for `/batch/send` and
/// `/batch/schedule`.
pub struct BatchMessage {
    sender: SenderId,
    destinations: Vec<Destination>,
    content: MessageContent,
    options: MessageOptions,
}

impl BatchMessage {
    /// Build a batch from its required parts.
    ///
    /// Fails when `destinations` is empty or holds more than
    /// [`BATCH_MAX_DESTINATIONS`] entries.
    pub fn new(
        sender: SenderId,
        destinations: Vec<Destination>,
        content: MessageContent,
        options: MessageOptions,
    ) -> Result<Self, ValidationError> {
        if destinations.is_empty() {
            return Err(ValidationError::Empty {
                field: Destination::FIELD,
            });
        }
        if destinations.len() > BATCH_MAX_DESTINATIONS {
            return Err(ValidationError::TooManyDestinations {
                max: BATCH_MAX_DESTINATIONS,
                actual: destinations.len(),
            });
        }
        Ok(Self {
            sender,
            destinations,
            content,
            options,
        })
    }

    pub fn sender(&self) -> &SenderId {
        &self.sender
    }

    pub fn destinations(&self) -> &[Destination] {
        &self.destinations
    }

    pub fn content(&self) -> &MessageContent {
        &self.content
    }

    pub fn options(&self) -> &MessageOptions {
        &self.options
    }
}

#[derive(Debug, Clone, Default)]
/// Search criteria for `/messages`, `/messages/inbox`, and `/messages/failed`.
///
/// Every field is optional; an empty query matches everything (the service
/// caps results at 1000 messages).
pub struct MessageQuery {
    pub status: Option<String>,
    pub credits: Option<f64>,
    pub destination: Option<Destination>,
    pub sender: Option<SenderId>,
    pub keyword: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
    pub skip: Option<u32>,
    pub unread: Option<bool>,
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Default)]
/// Optional properties for one-time-password generation.
pub struct OtpOptions {
    /// Number of digits in the generated passcode.
    pub length: Option<u8>,
    /// Message template; `{{passcode}}` is substituted by the service.
    pub template: Option<String>,
    /// Validity window in minutes for the passcode.
    pub validity: Option<ValidityMinutes>,
    /// Supply a passcode instead of having the service generate one.
    pub passcode: Option<Passcode>,
    /// Arbitrary key/value metadata echoed back in responses.
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone)]
/// One-time-password request for `/otp/send`.
pub struct Otp {
    sender: SenderId,
    destination: Destination,
    options: OtpOptions,
}

impl Otp {
    /// Build an OTP request from its required parts.
    pub fn new(sender: SenderId, destination: Destination, options: OtpOptions) -> Self {
        Self {
            sender,
            destination,
            options,
        }
    }

    pub fn sender(&self) -> &SenderId {
        &self.sender
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    pub fn options(&self) -> &OtpOptions {
        &self.options
    }
}

#[derive(Debug, Clone)]
/// Passcode verification request for `/otp/verify`.
pub struct OtpVerify {
    passcode: Passcode,
}

impl OtpVerify {
    pub fn new(passcode: Passcode) -> Self {
        Self { passcode }
    }

    pub fn passcode(&self) -> &Passcode {
        &self.passcode
    }
}

#[derive(Debug, Clone)]
/// Credentials for `/auth/token`.
pub struct Login {
    customerid: CustomerId,
    key: ApiKey,
    secret: ApiSecret,
}

impl Login {
    pub fn new(customerid: CustomerId, key: ApiKey, secret: ApiSecret) -> Self {
        Self {
            customerid,
            key,
            secret,
        }
    }

    pub fn customerid(&self) -> &CustomerId {
        &self.customerid
    }

    pub fn key(&self) -> &ApiKey {
        &self.key
    }

    pub fn secret(&self) -> &ApiSecret {
        &self.secret
    }
}
