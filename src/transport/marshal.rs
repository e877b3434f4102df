//! Request marshalling: URL building, parameter normalization, MIME
//! negotiation, and lenient JSON type coercion.
//!
//! Everything in this module is pure: no I/O, no shared state, inputs are
//! never mutated.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use serde_json::{Map, Value};

/// Content type assumed when an operation declares none.
pub const JSON_MIME: &str = "application/json";

#[derive(Debug, Clone, PartialEq)]
/// A single request parameter value before normalization.
pub enum ParamValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(DateTime<Utc>),
    Array(Vec<ParamValue>),
    File { filename: String, bytes: Vec<u8> },
}

impl ParamValue {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<DateTime<Utc>> for ParamValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// String form of a parameter: empty for [`ParamValue::Null`], canonical
/// RFC 3339 for dates, default formatting otherwise.
pub fn param_to_string(param: &ParamValue) -> String {
    match param {
        ParamValue::Null => String::new(),
        ParamValue::Bool(value) => value.to_string(),
        ParamValue::Int(value) => value.to_string(),
        ParamValue::Float(value) => value.to_string(),
        ParamValue::Str(value) => value.clone(),
        ParamValue::Date(value) => format_date(value),
        ParamValue::Array(items) => items
            .iter()
            .map(param_to_string)
            .collect::<Vec<_>>()
            .join(","),
        ParamValue::File { filename, .. } => filename.clone(),
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A parameter ready to be placed on the wire.
pub enum NormalizedParam {
    /// One `name=value` entry.
    Single(String),
    /// One entry per element (multi-value query/form parameter).
    Multi(Vec<String>),
    /// A multipart file field.
    File { filename: String, bytes: Vec<u8> },
}

/// Drops null entries, passes arrays and files through, and stringifies
/// everything else, so that literal `"null"` values never reach the wire
/// while multi-value and binary semantics survive.
pub fn normalize_params(params: &[(&str, ParamValue)]) -> Vec<(String, NormalizedParam)> {
    params
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, value)| {
            let normalized = match value {
                ParamValue::Array(items) => {
                    NormalizedParam::Multi(items.iter().map(param_to_string).collect())
                }
                ParamValue::File { filename, bytes } => NormalizedParam::File {
                    filename: filename.clone(),
                    bytes: bytes.clone(),
                },
                other => NormalizedParam::Single(param_to_string(other)),
            };
            ((*name).to_owned(), normalized)
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Delimiter strategy for serializing an array-valued parameter.
pub enum CollectionFormat {
    #[default]
    Csv,
    Ssv,
    Tsv,
    Pipes,
    /// One query entry per element; the collection is not joined.
    Multi,
}

#[derive(Debug, Clone, PartialEq)]
/// Result of [`build_collection_param`].
pub enum CollectionParam {
    Joined(String),
    Exploded(Vec<String>),
}

/// Serialize an array parameter per the collection format. `Multi` returns
/// the stringified elements unjoined; the caller emits one entry each.
pub fn build_collection_param(items: &[ParamValue], format: CollectionFormat) -> CollectionParam {
    let strings = || items.iter().map(param_to_string).collect::<Vec<_>>();
    match format {
        CollectionFormat::Csv => CollectionParam::Joined(strings().join(",")),
        CollectionFormat::Ssv => CollectionParam::Joined(strings().join(" ")),
        CollectionFormat::Tsv => CollectionParam::Joined(strings().join("\t")),
        CollectionFormat::Pipes => CollectionParam::Joined(strings().join("|")),
        CollectionFormat::Multi => CollectionParam::Exploded(strings()),
    }
}

/// Build the full request URL: substitute `{name}` placeholders with the
/// percent-encoded string form of the matching path parameter (placeholders
/// with no supplied value are left untouched), then prefix with the
/// effective base path: the override when non-empty, otherwise the
/// configured base path with any trailing slash trimmed.
pub fn build_url(
    base_path: &str,
    path_template: &str,
    path_params: &[(&str, ParamValue)],
    base_path_override: Option<&str>,
) -> String {
    let mut path = path_template.to_owned();
    for (name, value) in path_params {
        let placeholder = format!("{{{name}}}");
        if path.contains(&placeholder) {
            let encoded = urlencoding::encode(&param_to_string(value)).into_owned();
            path = path.replace(&placeholder, &encoded);
        }
    }

    let base = match base_path_override {
        Some(override_path) if !override_path.is_empty() => override_path,
        _ => base_path.trim_end_matches('/'),
    };

    format!("{base}{path}")
}

/// Whether the content type represents JSON: `application/json` or any
/// `*/json` / `*+json` subtype, parameters and case ignored.
pub fn is_json_mime(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.split_once('/') {
        Some((kind, subtype)) if !kind.is_empty() && !subtype.is_empty() => {
            subtype == "json" || subtype.ends_with("+json")
        }
        _ => false,
    }
}

/// Pick a content type with JSON preferred: the first JSON entry if any,
/// otherwise the first entry, otherwise [`JSON_MIME`].
pub fn json_preferred_mime(content_types: &[&str]) -> String {
    content_types
        .iter()
        .find(|mime| is_json_mime(mime))
        .or_else(|| content_types.first())
        .map_or_else(|| JSON_MIME.to_owned(), |mime| (*mime).to_owned())
}

/// Whether the parameter carries file content and must be sent as a
/// multipart field rather than a string.
pub fn is_file_param(param: &ParamValue) -> bool {
    matches!(param, ParamValue::File { .. })
}

/// Whether the body value should be JSON-encoded. String bodies are sent
/// verbatim so callers can supply pre-serialized payloads; binary content
/// never reaches a JSON value in this crate.
pub fn can_be_jsonified(value: &Value) -> bool {
    !value.is_string()
}

/// Canonical RFC 3339 form with millisecond precision, e.g.
/// `2024-01-02T03:04:05.000Z`.
pub fn format_date(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse an ISO-8601 / RFC 3339 string or an epoch-milliseconds value.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    if trimmed
        .strip_prefix('-')
        .unwrap_or(trimmed)
        .chars()
        .all(|c| c.is_ascii_digit())
    {
        if let Ok(millis) = trimmed.parse::<i64>() {
            return Utc.timestamp_millis_opt(millis).single();
        }
    }

    None
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Closed description of the shape a response value should be coerced into.
///
/// Shapes are plain consts; nesting goes through `&'static` references so
/// model descriptions can be declared next to the codec that uses them.
pub enum TypeDescriptor {
    String,
    Integer,
    Number,
    Boolean,
    DateTime,
    /// Pass-through: the value is kept as-is.
    Object,
    /// Pass-through: binary payloads are never coerced.
    Binary,
    ArrayOf(&'static TypeDescriptor),
    MapOf(&'static TypeDescriptor),
    Model(&'static [Field]),
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// One declared field of a model shape.
pub struct Field {
    pub name: &'static str,
    pub ty: TypeDescriptor,
}

impl Field {
    pub const fn new(name: &'static str, ty: TypeDescriptor) -> Self {
        Self { name, ty }
    }
}

/// Recursively coerce `data` into the shape named by `ty`, producing a new
/// value and never mutating the input.
///
/// Coercion is lenient by design: a numeric or boolean field that cannot be
/// converted becomes `Value::Null` (the JSON analog of `NaN`) instead of an
/// error, a non-array input to `ArrayOf` is wrapped as a single-element
/// array, and `Model` copies only declared fields — a declared field missing
/// from the input is simply absent from the output.
pub fn convert(data: &Value, ty: &TypeDescriptor) -> Value {
    if data.is_null() {
        return Value::Null;
    }

    match ty {
        TypeDescriptor::String => match data {
            Value::String(value) => Value::String(value.clone()),
            Value::Number(value) => Value::String(value.to_string()),
            Value::Bool(value) => Value::String(value.to_string()),
            other => other.clone(),
        },
        TypeDescriptor::Integer => match data {
            Value::Number(value) => value
                .as_i64()
                .or_else(|| value.as_f64().map(|f| f.trunc() as i64))
                .map_or(Value::Null, Value::from),
            Value::String(value) => value
                .trim()
                .parse::<i64>()
                .map_or(Value::Null, Value::from),
            _ => Value::Null,
        },
        TypeDescriptor::Number => match data {
            Value::Number(value) => Value::Number(value.clone()),
            Value::String(value) => value
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map_or(Value::Null, Value::Number),
            _ => Value::Null,
        },
        TypeDescriptor::Boolean => match data {
            Value::Bool(value) => Value::Bool(*value),
            Value::String(value) => match value.trim() {
                "true" => Value::Bool(true),
                "false" => Value::Bool(false),
                _ => Value::Null,
            },
            _ => Value::Null,
        },
        TypeDescriptor::DateTime => match data {
            Value::String(value) => parse_date(value)
                .map_or(Value::Null, |date| Value::String(format_date(&date))),
            Value::Number(value) => value
                .as_i64()
                .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
                .map_or(Value::Null, |date| Value::String(format_date(&date))),
            _ => Value::Null,
        },
        TypeDescriptor::Object | TypeDescriptor::Binary => data.clone(),
        TypeDescriptor::ArrayOf(item) => match data {
            Value::Array(items) => {
                Value::Array(items.iter().map(|entry| convert(entry, item)).collect())
            }
            other => Value::Array(vec![convert(other, item)]),
        },
        TypeDescriptor::MapOf(value_ty) => match data {
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), convert(value, value_ty)))
                    .collect(),
            ),
            other => other.clone(),
        },
        TypeDescriptor::Model(fields) => match data {
            Value::Object(map) => {
                let mut out = Map::new();
                for field in *fields {
                    if let Some(value) = map.get(field.name) {
                        out.insert(field.name.to_owned(), convert(value, &field.ty));
                    }
                }
                Value::Object(out)
            }
            other => other.clone(),
        },
    }
}

#[derive(Debug, Clone, Default)]
/// Fixed metadata describing one REST endpoint call.
pub struct Operation {
    /// Path template relative to the base path; may contain `{name}`
    /// placeholders.
    pub path: &'static str,
    pub method: reqwest::Method,
    pub path_params: Vec<(&'static str, ParamValue)>,
    pub query_params: Vec<(&'static str, ParamValue)>,
    pub header_params: Vec<(&'static str, ParamValue)>,
    pub form_params: Vec<(&'static str, ParamValue)>,
    /// JSON body; `None` for body-less operations.
    pub body: Option<Value>,
    /// Names of authentication schemes this operation requires.
    pub auth_names: &'static [&'static str],
    /// Request content types the operation accepts, JSON preferred.
    pub content_types: &'static [&'static str],
    /// Acceptable response content types.
    pub accepts: &'static [&'static str],
    /// Operation-level base path overriding the client's configured one.
    pub base_path_override: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const STRING: &TypeDescriptor = &TypeDescriptor::String;
    const INTEGER: &TypeDescriptor = &TypeDescriptor::Integer;

    #[test]
    fn param_to_string_handles_null_and_dates() {
        assert_eq!(param_to_string(&ParamValue::Null), "");
        assert_eq!(param_to_string(&ParamValue::Int(5)), "5");
        assert_eq!(param_to_string(&ParamValue::Bool(true)), "true");

        let date = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(
            param_to_string(&ParamValue::Date(date)),
            "2024-01-02T03:04:05.000Z"
        );
    }

    #[test]
    fn normalize_params_drops_nulls_and_keeps_arrays() {
        let params = [
            ("a", ParamValue::Null),
            ("b", ParamValue::from(Option::<i64>::None)),
            ("c", ParamValue::Int(5)),
            ("d", ParamValue::Array(vec![ParamValue::Int(1), ParamValue::Int(2)])),
        ];

        let normalized = normalize_params(&params);
        assert_eq!(
            normalized,
            vec![
                ("c".to_owned(), NormalizedParam::Single("5".to_owned())),
                (
                    "d".to_owned(),
                    NormalizedParam::Multi(vec!["1".to_owned(), "2".to_owned()])
                ),
            ]
        );
    }

    #[test]
    fn normalize_params_keeps_files() {
        let params = [(
            "report",
            ParamValue::File {
                filename: "report.csv".to_owned(),
                bytes: vec![1, 2, 3],
            },
        )];

        let normalized = normalize_params(&params);
        assert!(matches!(
            normalized[0].1,
            NormalizedParam::File { ref filename, .. } if filename == "report.csv"
        ));
    }

    #[test]
    fn collection_param_formats() {
        let items = vec![
            ParamValue::from("a"),
            ParamValue::from("b"),
            ParamValue::from("c"),
        ];

        assert_eq!(
            build_collection_param(&items, CollectionFormat::Csv),
            CollectionParam::Joined("a,b,c".to_owned())
        );
        assert_eq!(
            build_collection_param(&items, CollectionFormat::Ssv),
            CollectionParam::Joined("a b c".to_owned())
        );
        assert_eq!(
            build_collection_param(&items, CollectionFormat::Tsv),
            CollectionParam::Joined("a\tb\tc".to_owned())
        );
        assert_eq!(
            build_collection_param(&items, CollectionFormat::Pipes),
            CollectionParam::Joined("a|b|c".to_owned())
        );
        assert_eq!(
            build_collection_param(&items, CollectionFormat::Multi),
            CollectionParam::Exploded(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()])
        );
    }

    #[test]
    fn build_url_substitutes_and_encodes_path_params() {
        let url = build_url(
            "https://api.example.com/v1",
            "/messages/{id}",
            &[("id", ParamValue::from("abc 1"))],
            None,
        );
        assert_eq!(url, "https://api.example.com/v1/messages/abc%201");
    }

    #[test]
    fn build_url_trims_trailing_slash_and_keeps_unmatched_placeholders() {
        let url = build_url("https://api.example.com/v1/", "/messages/{id}", &[], None);
        assert_eq!(url, "https://api.example.com/v1/messages/{id}");
    }

    #[test]
    fn build_url_prefers_non_empty_override() {
        let url = build_url(
            "https://api.example.com/v1",
            "/utils/test",
            &[],
            Some("https://staging.example.com/v1"),
        );
        assert_eq!(url, "https://staging.example.com/v1/utils/test");

        let url = build_url("https://api.example.com/v1", "/utils/test", &[], Some(""));
        assert_eq!(url, "https://api.example.com/v1/utils/test");
    }

    #[test]
    fn json_mime_detection() {
        assert!(is_json_mime("application/json"));
        assert!(is_json_mime("application/json; charset=UTF8"));
        assert!(is_json_mime("APPLICATION/JSON"));
        assert!(is_json_mime("application/problem+json"));
        assert!(is_json_mime("text/json"));
        assert!(!is_json_mime("text/plain"));
        assert!(!is_json_mime("json"));
        assert!(!is_json_mime(""));
    }

    #[test]
    fn json_preferred_mime_picks_json_then_first_then_default() {
        assert_eq!(
            json_preferred_mime(&["text/plain", "application/json"]),
            "application/json"
        );
        assert_eq!(json_preferred_mime(&["text/plain"]), "text/plain");
        assert_eq!(json_preferred_mime(&[]), "application/json");
        assert_eq!(
            json_preferred_mime(&["application/json;charset=UTF-8"]),
            "application/json;charset=UTF-8"
        );
    }

    #[test]
    fn can_be_jsonified_rejects_strings_only() {
        assert!(can_be_jsonified(&json!({"a": 1})));
        assert!(can_be_jsonified(&json!([1, 2])));
        assert!(can_be_jsonified(&json!(5)));
        assert!(!can_be_jsonified(&json!("raw body")));
    }

    #[test]
    fn parse_date_accepts_rfc3339_and_epoch_millis() {
        let parsed = parse_date("2024-01-02T03:04:05.000Z").unwrap();
        assert_eq!(format_date(&parsed), "2024-01-02T03:04:05.000Z");

        let parsed = parse_date("2024-01-02T03:04:05+02:00").unwrap();
        assert_eq!(format_date(&parsed), "2024-01-02T01:04:05.000Z");

        let parsed = parse_date("1704164645000").unwrap();
        assert_eq!(format_date(&parsed), "2024-01-02T03:04:05.000Z");

        let parsed = parse_date("2024-01-02").unwrap();
        assert_eq!(format_date(&parsed), "2024-01-02T00:00:00.000Z");

        assert!(parse_date("not a date").is_none());
        assert!(parse_date("").is_none());
    }

    #[test]
    fn convert_passes_null_through_for_all_primitives() {
        for ty in [
            TypeDescriptor::String,
            TypeDescriptor::Integer,
            TypeDescriptor::Number,
            TypeDescriptor::Boolean,
            TypeDescriptor::DateTime,
            TypeDescriptor::Object,
        ] {
            assert_eq!(convert(&Value::Null, &ty), Value::Null);
        }
    }

    #[test]
    fn convert_coerces_scalars() {
        assert_eq!(convert(&json!(5), STRING), json!("5"));
        assert_eq!(convert(&json!("5"), INTEGER), json!(5));
        assert_eq!(convert(&json!("2.5"), &TypeDescriptor::Number), json!(2.5));
        assert_eq!(
            convert(&json!("true"), &TypeDescriptor::Boolean),
            json!(true)
        );
    }

    #[test]
    fn convert_degrades_to_null_on_failed_coercion() {
        assert_eq!(convert(&json!("abc"), INTEGER), Value::Null);
        assert_eq!(convert(&json!("abc"), &TypeDescriptor::Number), Value::Null);
        assert_eq!(convert(&json!("abc"), &TypeDescriptor::Boolean), Value::Null);
        assert_eq!(
            convert(&json!("abc"), &TypeDescriptor::DateTime),
            Value::Null
        );
    }

    #[test]
    fn convert_array_maps_elements_and_wraps_scalars() {
        let data = json!(["1", "2", "3"]);
        assert_eq!(
            convert(&data, &TypeDescriptor::ArrayOf(INTEGER)),
            json!([1, 2, 3])
        );

        assert_eq!(
            convert(&json!("1"), &TypeDescriptor::ArrayOf(INTEGER)),
            json!([1])
        );
    }

    #[test]
    fn convert_map_converts_every_value() {
        let data = json!({"a": "1", "b": "2"});
        assert_eq!(
            convert(&data, &TypeDescriptor::MapOf(INTEGER)),
            json!({"a": 1, "b": 2})
        );
    }

    #[test]
    fn convert_model_copies_declared_fields_only() {
        const FIELDS: &[Field] = &[
            Field::new("messageid", TypeDescriptor::String),
            Field::new("credits", TypeDescriptor::Number),
        ];

        let data = json!({"messageid": 42, "credits": "9.5", "extra": true});
        let converted = convert(&data, &TypeDescriptor::Model(FIELDS));
        assert_eq!(converted, json!({"messageid": "42", "credits": 9.5}));
    }

    #[test]
    fn convert_model_tolerates_missing_required_fields() {
        const FIELDS: &[Field] = &[
            Field::new("messageid", TypeDescriptor::String),
            Field::new("status", TypeDescriptor::String),
        ];

        let converted = convert(&json!({}), &TypeDescriptor::Model(FIELDS));
        assert_eq!(converted, json!({}));
    }

    #[test]
    fn convert_does_not_mutate_input() {
        let data = json!({"a": "1"});
        let snapshot = data.clone();
        let _ = convert(&data, &TypeDescriptor::MapOf(INTEGER));
        assert_eq!(data, snapshot);
    }

    #[test]
    fn convert_nested_model_shapes() {
        const INNER: &[Field] = &[Field::new("code", TypeDescriptor::Integer)];
        const OUTER: &[Field] = &[
            Field::new("id", TypeDescriptor::String),
            Field::new("failure", TypeDescriptor::Model(INNER)),
        ];

        let data = json!({"id": 7, "failure": {"code": "34", "noise": 1}});
        let converted = convert(&data, &TypeDescriptor::Model(OUTER));
        assert_eq!(converted, json!({"id": "7", "failure": {"code": 34}}));
    }
}
