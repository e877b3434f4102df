use serde_json::Value;

use crate::domain::CreditsResponse;
use crate::transport::marshal::{Field, TypeDescriptor, convert};
use crate::transport::opt_f64;

const CREDITS_RESPONSE_FIELDS: &[Field] = &[Field::new("credits", TypeDescriptor::Number)];

pub fn decode_credits_response(raw: &Value) -> CreditsResponse {
    let value = convert(raw, &TypeDescriptor::Model(CREDITS_RESPONSE_FIELDS));
    CreditsResponse {
        credits: opt_f64(&value, "credits"),
    }
}
