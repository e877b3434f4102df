//! Transport layer: wire-format details (marshalling and JSON codecs).

pub mod marshal;

mod auth;
mod batch;
mod credits;
mod messages;
mod otp;
mod utils;

pub use auth::{decode_api_key_response, decode_token_response, encode_login};
pub use batch::{
    decode_batch_message_response, decode_scheduled_batch_response, encode_batch_message,
    encode_message_list,
};
pub use credits::decode_credits_response;
pub use messages::{
    decode_cancelled_message_response, decode_deleted_message_response, decode_message_list,
    decode_message_response, decode_scheduled_message_list, decode_scheduled_messages_response,
    decode_send_message_response, encode_message, encode_query,
};
pub use otp::{
    decode_otp_response, decode_otp_verify_response, encode_otp, encode_otp_verify,
};
pub use utils::{decode_error_response, decode_test_response};

use chrono::{DateTime, Utc};
use serde_json::Value;

// Field readers for values that already went through `marshal::convert`,
// where scalars are canonical and failed coercions are null.

pub(crate) fn opt_str(value: &Value, field: &str) -> Option<String> {
    value.get(field).and_then(Value::as_str).map(str::to_owned)
}

pub(crate) fn opt_f64(value: &Value, field: &str) -> Option<f64> {
    value.get(field).and_then(Value::as_f64)
}

pub(crate) fn opt_i64(value: &Value, field: &str) -> Option<i64> {
    value.get(field).and_then(Value::as_i64)
}

pub(crate) fn opt_bool(value: &Value, field: &str) -> Option<bool> {
    value.get(field).and_then(Value::as_bool)
}

pub(crate) fn opt_date(value: &Value, field: &str) -> Option<DateTime<Utc>> {
    value
        .get(field)
        .and_then(Value::as_str)
        .and_then(marshal::parse_date)
}

pub(crate) fn opt_value(value: &Value, field: &str) -> Option<Value> {
    value.get(field).filter(|entry| !entry.is_null()).cloned()
}
