use serde_json::Value;

use crate::domain::{ErrorResponse, TestResponse};
use crate::transport::marshal::{Field, TypeDescriptor, convert};
use crate::transport::{opt_bool, opt_i64, opt_str};

const ERROR_RESPONSE_FIELDS: &[Field] = &[
    Field::new("message", TypeDescriptor::String),
    Field::new("errorCode", TypeDescriptor::Integer),
    Field::new("status", TypeDescriptor::String),
    Field::new("permanent", TypeDescriptor::Boolean),
];

const TEST_RESPONSE_FIELDS: &[Field] = &[Field::new("message", TypeDescriptor::String)];

pub fn decode_error_response(raw: &Value) -> ErrorResponse {
    let value = convert(raw, &TypeDescriptor::Model(ERROR_RESPONSE_FIELDS));
    ErrorResponse {
        message: opt_str(&value, "message"),
        error_code: opt_i64(&value, "errorCode"),
        status: opt_str(&value, "status"),
        permanent: opt_bool(&value, "permanent"),
    }
}

pub fn decode_test_response(raw: &Value) -> TestResponse {
    let value = convert(raw, &TypeDescriptor::Model(TEST_RESPONSE_FIELDS));
    TestResponse {
        message: opt_str(&value, "message"),
    }
}
