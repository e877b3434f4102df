use serde_json::{Map, Value, json};

use crate::domain::{
    CancelledMessageResponse, DeletedMessageResponse, FailureReason, Message, MessageOptions,
    MessageQuery, MessageResponse, ScheduledMessageResponse, ScheduledMessagesResponse,
    SendMessageResponse,
};
use crate::transport::marshal::{Field, TypeDescriptor, convert, format_date};
use crate::transport::{opt_bool, opt_date, opt_f64, opt_i64, opt_str, opt_value};

const SEND_MESSAGE_RESPONSE_FIELDS: &[Field] = &[
    Field::new("messageid", TypeDescriptor::String),
    Field::new("status", TypeDescriptor::String),
    Field::new("credits", TypeDescriptor::Number),
    Field::new("creditsUsed", TypeDescriptor::Number),
];

const FAILURE_REASON_FIELDS: &[Field] = &[
    Field::new("code", TypeDescriptor::Integer),
    Field::new("details", TypeDescriptor::String),
    Field::new("permanent", TypeDescriptor::Boolean),
];

const MESSAGE_RESPONSE_FIELDS: &[Field] = &[
    Field::new("batchid", TypeDescriptor::String),
    Field::new("content", TypeDescriptor::String),
    Field::new("created", TypeDescriptor::DateTime),
    Field::new("customerid", TypeDescriptor::String),
    Field::new("deliveryreporturl", TypeDescriptor::String),
    // The service emits destination as a JSON number for numeric senders;
    // it is a telephone number, so it is always coerced to a string.
    Field::new("destination", TypeDescriptor::String),
    Field::new("failurereason", TypeDescriptor::Model(FAILURE_REASON_FIELDS)),
    Field::new("id", TypeDescriptor::String),
    Field::new("identifier", TypeDescriptor::String),
    Field::new("keyword", TypeDescriptor::String),
    Field::new("messageid", TypeDescriptor::String),
    Field::new("modified", TypeDescriptor::DateTime),
    Field::new("schedule", TypeDescriptor::DateTime),
    Field::new("status", TypeDescriptor::String),
    Field::new("sender", TypeDescriptor::String),
    Field::new("tag", TypeDescriptor::String),
];

const MESSAGE_RESPONSE_MODEL: &TypeDescriptor = &TypeDescriptor::Model(MESSAGE_RESPONSE_FIELDS);

const MESSAGE_ID_STATUS_FIELDS: &[Field] = &[
    Field::new("messageid", TypeDescriptor::String),
    Field::new("status", TypeDescriptor::String),
];

const SCHEDULED_MESSAGE_RESPONSE_MODEL: &TypeDescriptor =
    &TypeDescriptor::Model(MESSAGE_ID_STATUS_FIELDS);

const SCHEDULED_MESSAGES_RESPONSE_FIELDS: &[Field] = &[
    Field::new("status", TypeDescriptor::String),
    Field::new("id", TypeDescriptor::String),
    Field::new("batch", TypeDescriptor::Boolean),
    Field::new("message", TypeDescriptor::Object),
];

pub fn encode_message(message: &Message) -> Value {
    let mut body = Map::new();
    body.insert("sender".to_owned(), json!(message.sender().as_str()));
    body.insert(
        "destination".to_owned(),
        json!(message.destination().raw()),
    );
    body.insert("content".to_owned(), json!(message.content().as_str()));
    push_message_options(&mut body, message.options());
    Value::Object(body)
}

pub(crate) fn push_message_options(body: &mut Map<String, Value>, options: &MessageOptions) {
    if let Some(url) = options.deliveryreporturl.as_ref() {
        body.insert("deliveryreporturl".to_owned(), json!(url.as_str()));
    }
    if let Some(schedule) = options.schedule.as_ref() {
        body.insert("schedule".to_owned(), json!(format_date(schedule)));
    }
    if let Some(tag) = options.tag.as_ref() {
        body.insert("tag".to_owned(), json!(tag.as_str()));
    }
    if let Some(ttl) = options.ttl {
        body.insert("ttl".to_owned(), json!(ttl.value()));
    }
    if !options.responseemail.is_empty() {
        body.insert("responseemail".to_owned(), json!(options.responseemail));
    }
    if let Some(metadata) = options.metadata.as_ref() {
        body.insert("metadata".to_owned(), metadata.clone());
    }
    if let Some(validity) = options.validity {
        body.insert("validity".to_owned(), json!(validity.value()));
    }
    if let Some(ai) = options.ai {
        body.insert("ai".to_owned(), json!(ai));
    }
}

pub fn encode_query(query: &MessageQuery) -> Value {
    let mut body = Map::new();
    if let Some(status) = query.status.as_ref() {
        body.insert("status".to_owned(), json!(status));
    }
    if let Some(credits) = query.credits {
        body.insert("credits".to_owned(), json!(credits));
    }
    if let Some(destination) = query.destination.as_ref() {
        body.insert("destination".to_owned(), json!(destination.raw()));
    }
    if let Some(sender) = query.sender.as_ref() {
        body.insert("sender".to_owned(), json!(sender.as_str()));
    }
    if let Some(keyword) = query.keyword.as_ref() {
        body.insert("keyword".to_owned(), json!(keyword));
    }
    if let Some(from) = query.from.as_ref() {
        body.insert("from".to_owned(), json!(format_date(from)));
    }
    if let Some(to) = query.to.as_ref() {
        body.insert("to".to_owned(), json!(format_date(to)));
    }
    if let Some(limit) = query.limit {
        body.insert("limit".to_owned(), json!(limit));
    }
    if let Some(skip) = query.skip {
        body.insert("skip".to_owned(), json!(skip));
    }
    if let Some(unread) = query.unread {
        body.insert("unread".to_owned(), json!(unread));
    }
    if let Some(metadata) = query.metadata.as_ref() {
        body.insert("metadata".to_owned(), metadata.clone());
    }
    Value::Object(body)
}

pub fn decode_send_message_response(raw: &Value) -> SendMessageResponse {
    let value = convert(raw, &TypeDescriptor::Model(SEND_MESSAGE_RESPONSE_FIELDS));
    SendMessageResponse {
        messageid: opt_str(&value, "messageid"),
        status: opt_str(&value, "status"),
        credits: opt_f64(&value, "credits"),
        credits_used: opt_f64(&value, "creditsUsed"),
    }
}

pub fn decode_message_response(raw: &Value) -> MessageResponse {
    let value = convert(raw, MESSAGE_RESPONSE_MODEL);
    message_response_from_converted(&value)
}

pub fn decode_message_list(raw: &Value) -> Vec<MessageResponse> {
    let value = convert(raw, &TypeDescriptor::ArrayOf(MESSAGE_RESPONSE_MODEL));
    value
        .as_array()
        .map(|items| items.iter().map(message_response_from_converted).collect())
        .unwrap_or_default()
}

fn message_response_from_converted(value: &Value) -> MessageResponse {
    MessageResponse {
        batchid: opt_str(value, "batchid"),
        content: opt_str(value, "content"),
        created: opt_date(value, "created"),
        customerid: opt_str(value, "customerid"),
        deliveryreporturl: opt_str(value, "deliveryreporturl"),
        destination: opt_str(value, "destination"),
        failurereason: value
            .get("failurereason")
            .filter(|reason| !reason.is_null())
            .map(|reason| FailureReason {
                code: opt_i64(reason, "code"),
                details: opt_str(reason, "details"),
                permanent: opt_bool(reason, "permanent"),
            }),
        id: opt_str(value, "id"),
        identifier: opt_str(value, "identifier"),
        keyword: opt_str(value, "keyword"),
        messageid: opt_str(value, "messageid"),
        modified: opt_date(value, "modified"),
        schedule: opt_date(value, "schedule"),
        status: opt_str(value, "status"),
        sender: opt_str(value, "sender"),
        tag: opt_str(value, "tag"),
    }
}

pub fn decode_scheduled_message_list(raw: &Value) -> Vec<ScheduledMessageResponse> {
    let value = convert(raw, &TypeDescriptor::ArrayOf(SCHEDULED_MESSAGE_RESPONSE_MODEL));
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|entry| ScheduledMessageResponse {
                    messageid: opt_str(entry, "messageid"),
                    status: opt_str(entry, "status"),
                })
                .collect()
        })
        .unwrap_or_default()
}

pub fn decode_scheduled_messages_response(raw: &Value) -> ScheduledMessagesResponse {
    let value = convert(
        raw,
        &TypeDescriptor::Model(SCHEDULED_MESSAGES_RESPONSE_FIELDS),
    );
    ScheduledMessagesResponse {
        status: opt_str(&value, "status"),
        id: opt_str(&value, "id"),
        batch: opt_bool(&value, "batch"),
        message: opt_value(&value, "message"),
    }
}

pub fn decode_cancelled_message_response(raw: &Value) -> CancelledMessageResponse {
    let value = convert(raw, &TypeDescriptor::Model(MESSAGE_ID_STATUS_FIELDS));
    CancelledMessageResponse {
        messageid: opt_str(&value, "messageid"),
        status: opt_str(&value, "status"),
    }
}

pub fn decode_deleted_message_response(raw: &Value) -> DeletedMessageResponse {
    let value = convert(raw, &TypeDescriptor::Model(MESSAGE_ID_STATUS_FIELDS));
    DeletedMessageResponse {
        messageid: opt_str(&value, "messageid"),
        status: opt_str(&value, "status"),
    }
}
