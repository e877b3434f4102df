use serde_json::{Map, Value, json};

use crate::domain::{Otp, OtpResponse, OtpVerify, OtpVerifyResponse};
use crate::transport::marshal::{Field, TypeDescriptor, convert};
use crate::transport::{opt_date, opt_f64, opt_i64, opt_str, opt_value};

const OTP_RESPONSE_FIELDS: &[Field] = &[
    Field::new("messageid", TypeDescriptor::String),
    Field::new("status", TypeDescriptor::String),
    Field::new("credits", TypeDescriptor::Number),
    Field::new("creditsUsed", TypeDescriptor::Number),
    Field::new("messageparts", TypeDescriptor::Integer),
];

const OTP_VERIFY_RESPONSE_FIELDS: &[Field] = &[
    Field::new("destination", TypeDescriptor::String),
    Field::new("status", TypeDescriptor::String),
    Field::new("passcode", TypeDescriptor::String),
    Field::new("validity", TypeDescriptor::Integer),
    Field::new("metadata", TypeDescriptor::Object),
    Field::new("created", TypeDescriptor::DateTime),
    Field::new("expires", TypeDescriptor::DateTime),
    Field::new("modified", TypeDescriptor::DateTime),
];

pub fn encode_otp(otp: &Otp) -> Value {
    let mut body = Map::new();
    body.insert("sender".to_owned(), json!(otp.sender().as_str()));
    body.insert("destination".to_owned(), json!(otp.destination().raw()));

    let options = otp.options();
    if let Some(length) = options.length {
        body.insert("length".to_owned(), json!(length));
    }
    if let Some(template) = &options.template {
        body.insert("template".to_owned(), json!(template));
    }
    if let Some(validity) = options.validity {
        body.insert("validity".to_owned(), json!(validity.value()));
    }
    if let Some(passcode) = &options.passcode {
        body.insert("passcode".to_owned(), json!(passcode.as_str()));
    }
    if let Some(metadata) = &options.metadata {
        body.insert("metadata".to_owned(), metadata.clone());
    }
    Value::Object(body)
}

pub fn encode_otp_verify(verify: &OtpVerify) -> Value {
    json!({ "passcode": verify.passcode().as_str() })
}

pub fn decode_otp_response(raw: &Value) -> OtpResponse {
    let value = convert(raw, &TypeDescriptor::Model(OTP_RESPONSE_FIELDS));
    OtpResponse {
        messageid: opt_str(&value, "messageid"),
        status: opt_str(&value, "status"),
        credits: opt_f64(&value, "credits"),
        credits_used: opt_f64(&value, "creditsUsed"),
        messageparts: opt_i64(&value, "messageparts"),
    }
}

pub fn decode_otp_verify_response(raw: &Value) -> OtpVerifyResponse {
    let value = convert(raw, &TypeDescriptor::Model(OTP_VERIFY_RESPONSE_FIELDS));
    OtpVerifyResponse {
        destination: opt_str(&value, "destination"),
        status: opt_str(&value, "status"),
        passcode: opt_str(&value, "passcode"),
        validity: opt_i64(&value, "validity"),
        metadata: opt_value(&value, "metadata"),
        created: opt_date(&value, "created"),
        expires: opt_date(&value, "expires"),
        modified: opt_date(&value, "modified"),
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::{Destination, OtpOptions, Passcode, SenderId, ValidityMinutes};

    use super::*;

    #[test]
    fn encode_otp_includes_only_set_options() {
        let otp = Otp::new(
            SenderId::new("SMSWorks").unwrap(),
            Destination::new("447777777777").unwrap(),
            OtpOptions {
                length: Some(6),
                template: Some("Your code is {{passcode}}".to_owned()),
                validity: Some(ValidityMinutes::new(10).unwrap()),
                ..OtpOptions::default()
            },
        );

        let body = encode_otp(&otp);
        assert_eq!(
            body,
            json!({
                "sender": "SMSWorks",
                "destination": "447777777777",
                "length": 6,
                "template": "Your code is {{passcode}}",
                "validity": 10,
            })
        );
    }

    #[test]
    fn encode_otp_verify_carries_the_passcode() {
        let verify = OtpVerify::new(Passcode::new("123456").unwrap());
        assert_eq!(encode_otp_verify(&verify), json!({"passcode": "123456"}));
    }

    #[test]
    fn decode_otp_response_coerces_string_credits() {
        let resp = decode_otp_response(&json!({
            "messageid": "otp-1",
            "status": "SENT",
            "credits": "49.5",
            "creditsUsed": 1,
            "messageparts": "1",
        }));
        assert_eq!(resp.messageid.as_deref(), Some("otp-1"));
        assert_eq!(resp.credits, Some(49.5));
        assert_eq!(resp.credits_used, Some(1.0));
        assert_eq!(resp.messageparts, Some(1));
    }

    #[test]
    fn decode_otp_verify_response_parses_dates_and_metadata() {
        let resp = decode_otp_verify_response(&json!({
            "destination": 447777777777_i64,
            "status": "VERIFIED",
            "passcode": "123456",
            "validity": 10,
            "metadata": {"orderid": "o-9"},
            "created": "2024-05-01T10:00:00.000Z",
            "expires": 1714557000000_i64,
        }));
        assert_eq!(resp.destination.as_deref(), Some("447777777777"));
        assert_eq!(resp.validity, Some(10));
        assert_eq!(resp.metadata, Some(json!({"orderid": "o-9"})));
        assert!(resp.created.is_some());
        assert!(resp.expires.is_some());
        assert!(resp.modified.is_none());
    }
}
