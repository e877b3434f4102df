//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{
    BATCH_MAX_DESTINATIONS, BatchMessage, Login, Message, MessageOptions, MessageQuery, Otp,
    OtpOptions, OtpVerify,
};
pub use response::{
    ApiKeyResponse, BatchMessageResponse, CancelledMessageResponse, CreditsResponse,
    DeletedMessageResponse, ErrorResponse, FailureReason, MessageResponse, OtpResponse,
    OtpVerifyResponse, ScheduledBatchResponse, ScheduledMessageResponse,
    ScheduledMessagesResponse, SendMessageResponse, TestResponse, TokenResponse,
};
pub use validation::ValidationError;
pub use value::{
    ApiKey, ApiSecret, BatchId, CustomerId, Destination, ErrorCode, MESSAGE_CONTENT_MAX_LEN,
    MessageContent, MessageId, Passcode, SENDER_ID_MAX_ALPHA, SENDER_ID_MAX_NUMERIC, SenderId,
    TAG_MAX_LEN, Tag, ValidityMinutes,
};
