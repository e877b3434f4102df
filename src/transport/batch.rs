use serde_json::{Map, Value, json};

use crate::domain::{BatchMessage, BatchMessageResponse, Message, ScheduledBatchResponse};
use crate::transport::marshal::{Field, TypeDescriptor, convert};
use crate::transport::messages::{encode_message, push_message_options};
use crate::transport::opt_str;

const BATCH_ID_STATUS_FIELDS: &[Field] = &[
    Field::new("batchid", TypeDescriptor::String),
    Field::new("status", TypeDescriptor::String),
];

pub fn encode_batch_message(batch: &BatchMessage) -> Value {
    let mut body = Map::new();
    body.insert("sender".to_owned(), json!(batch.sender().as_str()));
    body.insert(
        "destinations".to_owned(),
        Value::Array(
            batch
                .destinations()
                .iter()
                .map(|destination| json!(destination.raw()))
                .collect(),
        ),
    );
    body.insert("content".to_owned(), json!(batch.content().as_str()));
    push_message_options(&mut body, batch.options());
    Value::Object(body)
}

/// Body for `/batch/any`: a collection of fully distinct messages.
pub fn encode_message_list(messages: &[Message]) -> Value {
    Value::Array(messages.iter().map(encode_message).collect())
}

pub fn decode_batch_message_response(raw: &Value) -> BatchMessageResponse {
    let value = convert(raw, &TypeDescriptor::Model(BATCH_ID_STATUS_FIELDS));
    BatchMessageResponse {
        batchid: opt_str(&value, "batchid"),
        status: opt_str(&value, "status"),
    }
}

pub fn decode_scheduled_batch_response(raw: &Value) -> ScheduledBatchResponse {
    let value = convert(raw, &TypeDescriptor::Model(BATCH_ID_STATUS_FIELDS));
    ScheduledBatchResponse {
        batchid: opt_str(&value, "batchid"),
        status: opt_str(&value, "status"),
    }
}
