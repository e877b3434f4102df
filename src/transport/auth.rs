use serde_json::{Value, json};

use crate::domain::{ApiKeyResponse, Login, TokenResponse};
use crate::transport::marshal::{Field, TypeDescriptor, convert};
use crate::transport::opt_str;

const TOKEN_RESPONSE_FIELDS: &[Field] = &[Field::new("token", TypeDescriptor::String)];

const API_KEY_RESPONSE_FIELDS: &[Field] = &[
    Field::new("key", TypeDescriptor::String),
    Field::new("secret", TypeDescriptor::String),
];

pub fn encode_login(login: &Login) -> Value {
    json!({
        "customerid": login.customerid().as_str(),
        "key": login.key().as_str(),
        "secret": login.secret().as_str(),
    })
}

pub fn decode_token_response(raw: &Value) -> TokenResponse {
    let value = convert(raw, &TypeDescriptor::Model(TOKEN_RESPONSE_FIELDS));
    TokenResponse {
        token: opt_str(&value, "token"),
    }
}

pub fn decode_api_key_response(raw: &Value) -> ApiKeyResponse {
    let value = convert(raw, &TypeDescriptor::Model(API_KEY_RESPONSE_FIELDS));
    ApiKeyResponse {
        key: opt_str(&value, "key"),
        secret: opt_str(&value, "secret"),
    }
}
