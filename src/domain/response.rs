//! Response models mirroring the service's JSON schemas.
//!
//! Every field is optional: the service marks some fields as required, but
//! required-ness is documentation-level only and deliberately not enforced
//! during deserialization. Models carrying required fields expose a
//! `has_required_fields` check for callers who want to validate a payload;
//! nothing in this crate calls it automatically.

use chrono::{DateTime, Utc};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
/// Result of `/message/send` and `/message/flash`.
pub struct SendMessageResponse {
    pub messageid: Option<String>,
    pub status: Option<String>,
    /// Remaining account credits. Floating point.
    pub credits: Option<f64>,
    /// Credits consumed by this message. Floating point.
    pub credits_used: Option<f64>,
}

impl SendMessageResponse {
    pub fn has_required_fields(&self) -> bool {
        self.messageid.is_some()
            && self.status.is_some()
            && self.credits.is_some()
            && self.credits_used.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Result of `/batch/send` and `/batch/any`.
pub struct BatchMessageResponse {
    pub batchid: Option<String>,
    pub status: Option<String>,
}

impl BatchMessageResponse {
    pub fn has_required_fields(&self) -> bool {
        self.batchid.is_some() && self.status.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// One entry in the result of `/message/schedule`.
pub struct ScheduledMessageResponse {
    pub messageid: Option<String>,
    pub status: Option<String>,
}

impl ScheduledMessageResponse {
    pub fn has_required_fields(&self) -> bool {
        self.messageid.is_some() && self.status.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Result of `/batch/schedule`.
pub struct ScheduledBatchResponse {
    pub batchid: Option<String>,
    pub status: Option<String>,
}

impl ScheduledBatchResponse {
    pub fn has_required_fields(&self) -> bool {
        self.batchid.is_some() && self.status.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Result of cancelling a scheduled message or batch.
pub struct CancelledMessageResponse {
    pub messageid: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Result of `DELETE /messages/{messageid}`.
pub struct DeletedMessageResponse {
    pub messageid: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Result of `/credits/balance`.
pub struct CreditsResponse {
    /// Remaining account credits. Floating point.
    pub credits: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Why a message failed, nested inside [`MessageResponse`].
pub struct FailureReason {
    pub code: Option<i64>,
    pub details: Option<String>,
    /// `true` when retrying the same message can never succeed.
    pub permanent: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// A logged message returned by the fetch and query operations.
///
/// `destination` arrives from the service as either a JSON number or a
/// string; it is always surfaced as a string here because telephone numbers
/// are identifiers, not quantities.
pub struct MessageResponse {
    pub batchid: Option<String>,
    pub content: Option<String>,
    pub created: Option<DateTime<Utc>>,
    pub customerid: Option<String>,
    pub deliveryreporturl: Option<String>,
    pub destination: Option<String>,
    pub failurereason: Option<FailureReason>,
    pub id: Option<String>,
    pub identifier: Option<String>,
    pub keyword: Option<String>,
    pub messageid: Option<String>,
    pub modified: Option<DateTime<Utc>>,
    pub schedule: Option<DateTime<Utc>>,
    pub status: Option<String>,
    pub sender: Option<String>,
    pub tag: Option<String>,
}

impl MessageResponse {
    pub fn has_required_fields(&self) -> bool {
        self.content.is_some()
            && self.created.is_some()
            && self.customerid.is_some()
            && self.destination.is_some()
            && self.messageid.is_some()
            && self.modified.is_some()
            && self.schedule.is_some()
            && self.status.is_some()
            && self.sender.is_some()
            && self.tag.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Result of `GET /messages/schedule`.
pub struct ScheduledMessagesResponse {
    pub status: Option<String>,
    pub id: Option<String>,
    pub batch: Option<bool>,
    /// Message body as scheduled; shape varies between single and batch
    /// entries, so it is passed through unconverted.
    pub message: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Result of `/otp/send`.
pub struct OtpResponse {
    pub messageid: Option<String>,
    pub status: Option<String>,
    pub credits: Option<f64>,
    pub credits_used: Option<f64>,
    pub messageparts: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Result of `/otp/verify` and `GET /otp/{messageid}`.
pub struct OtpVerifyResponse {
    pub destination: Option<String>,
    pub status: Option<String>,
    pub passcode: Option<String>,
    pub validity: Option<i64>,
    pub metadata: Option<Value>,
    pub created: Option<DateTime<Utc>>,
    pub expires: Option<DateTime<Utc>>,
    pub modified: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// JSON Web Token issued by `/auth/token`.
pub struct TokenResponse {
    pub token: Option<String>,
}

impl TokenResponse {
    pub fn has_required_fields(&self) -> bool {
        self.token.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Key/secret pair issued by `/auth/getApiKey`.
pub struct ApiKeyResponse {
    pub key: Option<String>,
    pub secret: Option<String>,
}

impl ApiKeyResponse {
    pub fn has_required_fields(&self) -> bool {
        self.key.is_some() && self.secret.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Result of `GET /utils/test`.
pub struct TestResponse {
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Error payload carried by non-2xx responses and by
/// `GET /utils/errors/{errorcode}`.
pub struct ErrorResponse {
    pub message: Option<String>,
    /// Numeric code identifying the error.
    pub error_code: Option<i64>,
    pub status: Option<String>,
    /// `true` when the failure is permanent and a retry cannot succeed.
    pub permanent: Option<bool>,
}

impl ErrorResponse {
    pub fn has_required_fields(&self) -> bool {
        self.message.is_some() && self.error_code.is_some() && self.status.is_some()
    }
}
