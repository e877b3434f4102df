//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::domain::{
    ApiKeyResponse, BATCH_MAX_DESTINATIONS, BatchId, BatchMessage, BatchMessageResponse,
    CancelledMessageResponse, CreditsResponse, CustomerId, DeletedMessageResponse, ErrorCode,
    ErrorResponse, Login, Message, MessageId, MessageQuery, MessageResponse, Otp, OtpResponse,
    OtpVerify, OtpVerifyResponse, ScheduledBatchResponse, ScheduledMessageResponse,
    ScheduledMessagesResponse, SendMessageResponse, TestResponse, TokenResponse, ValidationError,
};
use crate::transport::marshal::{
    NormalizedParam, Operation, build_url, can_be_jsonified, is_json_mime, json_preferred_mime,
    normalize_params,
};
use crate::transport::{
    decode_api_key_response, decode_batch_message_response, decode_cancelled_message_response,
    decode_credits_response, decode_deleted_message_response, decode_error_response,
    decode_message_list, decode_message_response, decode_otp_response, decode_otp_verify_response,
    decode_scheduled_batch_response, decode_scheduled_message_list,
    decode_scheduled_messages_response, decode_send_message_response, decode_test_response,
    decode_token_response, encode_batch_message, encode_login, encode_message,
    encode_message_list, encode_otp, encode_otp_verify, encode_query,
};

const DEFAULT_BASE_PATH: &str = "https://api.thesmsworks.co.uk/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
const DEFAULT_USER_AGENT: &str = concat!("smsworks-rust/", env!("CARGO_PKG_VERSION"));

/// Name under which the default JWT credential is registered.
const JWT_SCHEME: &str = "JWT";

const JWT_AUTH: &[&str] = &["JWT"];
const NO_AUTH: &[&str] = &[];
const ACCEPT_JSON: &[&str] = &["application/json;charset=UTF-8"];
const NO_CONTENT_TYPES: &[&str] = &[];

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
enum MultipartValue {
    Text(String),
    File { filename: String, bytes: Vec<u8> },
}

#[derive(Debug, Clone)]
enum RequestBody {
    Empty,
    Json(Value),
    /// Pre-serialized body sent verbatim.
    Raw(String),
    Form(Vec<(String, String)>),
    Multipart(Vec<(String, MultipartValue)>),
}

#[derive(Debug, Clone)]
struct HttpRequest {
    method: reqwest::Method,
    url: String,
    headers: Vec<(String, String)>,
    body: RequestBody,
}

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    content_type: Option<String>,
    body: String,
}

trait HttpTransport: Send + Sync + std::fmt::Debug {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> BoxFuture<'_, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> BoxFuture<'_, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut builder = self.client.request(request.method, &request.url);
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            builder = match request.body {
                RequestBody::Empty => builder,
                RequestBody::Json(value) => builder.json(&value),
                RequestBody::Raw(text) => builder.body(text),
                RequestBody::Form(fields) => builder.form(&fields),
                RequestBody::Multipart(fields) => {
                    let mut form = reqwest::multipart::Form::new();
                    for (name, value) in fields {
                        form = match value {
                            MultipartValue::Text(text) => form.text(name, text),
                            MultipartValue::File { filename, bytes } => form.part(
                                name,
                                reqwest::multipart::Part::bytes(bytes).file_name(filename),
                            ),
                        };
                    }
                    builder.multipart(form)
                }
            };

            let response = builder.send().await?;
            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);
            let body = response.text().await?;
            Ok(HttpResponse {
                status,
                content_type,
                body,
            })
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Where an API-key credential is placed on the request.
pub enum ApiKeyLocation {
    Header,
    Query,
}

#[derive(Debug, Clone)]
/// A registered authentication credential.
///
/// Schemes are registered by name on the builder; each operation names the
/// schemes it requires and any name without a registered scheme is skipped.
/// The SMS Works uses a single scheme, [`JWT`](SmsWorksClientBuilder::jwt):
/// an API-key credential carried in the `Authorization` header.
pub enum AuthScheme {
    ApiKey {
        location: ApiKeyLocation,
        /// Header or query parameter name carrying the key.
        name: String,
        /// Optional prefix prepended to the key, separated by a space.
        prefix: Option<String>,
        key: String,
    },
    Basic {
        username: String,
        password: String,
    },
    Bearer {
        token: String,
    },
}

impl AuthScheme {
    fn jwt(token: impl Into<String>) -> Self {
        Self::ApiKey {
            location: ApiKeyLocation::Header,
            name: "Authorization".to_owned(),
            prefix: None,
            key: token.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`SmsWorksClient`].
///
/// This error preserves:
/// - HTTP-level failures (non-2xx status or transport failures),
/// - parse failures for malformed response bodies,
/// - validation failures raised before any request is sent.
pub enum SmsWorksError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The configured base path or the assembled request URL is not valid.
    #[error("invalid request URL: {0}")]
    Url(#[source] url::ParseError),

    /// Non-successful HTTP status code returned by the service, with the
    /// decoded error payload when the body carried one.
    #[error("unexpected HTTP status: {status}")]
    Status {
        status: u16,
        error: Option<ErrorResponse>,
        body: Option<String>,
    },

    /// Response body could not be parsed as the expected format.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`SmsWorksClient`].
///
/// Use this when you need to customize the base path, timeout, user-agent,
/// default headers, or authentication.
pub struct SmsWorksClientBuilder {
    base_path: String,
    timeout: Duration,
    user_agent: String,
    default_headers: Vec<(String, String)>,
    auth: BTreeMap<String, AuthScheme>,
    cache: bool,
    cookies: bool,
}

impl Default for SmsWorksClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SmsWorksClientBuilder {
    /// Create a builder with the production base path and default settings.
    pub fn new() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            default_headers: Vec::new(),
            auth: BTreeMap::new(),
            cache: true,
            cookies: false,
        }
    }

    /// Override the base path all operation paths are resolved against.
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    /// Set the JWT issued by The SMS Works for your account.
    pub fn jwt(mut self, token: impl Into<String>) -> Self {
        self.auth
            .insert(JWT_SCHEME.to_owned(), AuthScheme::jwt(token));
        self
    }

    /// Register an authentication scheme under a name.
    pub fn auth_scheme(mut self, name: impl Into<String>, scheme: AuthScheme) -> Self {
        self.auth.insert(name.into(), scheme);
        self
    }

    /// Add a header sent with every request.
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// When disabled, GET requests carry a timestamp query parameter named
    /// `_` so intermediaries cannot serve a cached response.
    pub fn cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }

    /// Store cookies set by the service and send them on later requests.
    pub fn enable_cookies(mut self, cookies: bool) -> Self {
        self.cookies = cookies;
        self
    }

    /// Build a [`SmsWorksClient`].
    pub fn build(self) -> Result<SmsWorksClient, SmsWorksError> {
        Url::parse(&self.base_path).map_err(SmsWorksError::Url)?;

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .cookie_store(self.cookies)
            .build()
            .map_err(|err| SmsWorksError::Transport(Box::new(err)))?;

        Ok(SmsWorksClient {
            base_path: self.base_path,
            default_headers: self.default_headers,
            auth: self.auth,
            cache: self.cache,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone, Debug)]
/// High-level client for The SMS Works JSON API.
///
/// This type orchestrates URL building, parameter normalization,
/// authentication, and response decoding. By default it talks to
/// `https://api.thesmsworks.co.uk/v1`.
pub struct SmsWorksClient {
    base_path: String,
    default_headers: Vec<(String, String)>,
    auth: BTreeMap<String, AuthScheme>,
    cache: bool,
    http: Arc<dyn HttpTransport>,
}

impl SmsWorksClient {
    /// Create a client for the production service authenticated with a JWT.
    ///
    /// For more customization, use [`SmsWorksClient::builder`].
    pub fn new(jwt: impl Into<String>) -> Result<Self, SmsWorksError> {
        Self::builder().jwt(jwt).build()
    }

    /// Start building a client with custom settings.
    pub fn builder() -> SmsWorksClientBuilder {
        SmsWorksClientBuilder::new()
    }

    fn apply_auth(&self, auth_names: &[&str], url: &mut Url, headers: &mut Vec<(String, String)>) {
        for scheme_name in auth_names {
            let Some(scheme) = self.auth.get(*scheme_name) else {
                continue;
            };
            match scheme {
                AuthScheme::ApiKey {
                    location,
                    name,
                    prefix,
                    key,
                } => {
                    if key.is_empty() {
                        continue;
                    }
                    let value = match prefix {
                        Some(prefix) => format!("{prefix} {key}"),
                        None => key.clone(),
                    };
                    match location {
                        ApiKeyLocation::Header => headers.push((name.clone(), value)),
                        ApiKeyLocation::Query => {
                            url.query_pairs_mut().append_pair(name, &value);
                        }
                    }
                }
                AuthScheme::Basic { username, password } => {
                    if username.is_empty() && password.is_empty() {
                        continue;
                    }
                    let encoded = BASE64.encode(format!("{username}:{password}"));
                    headers.push(("Authorization".to_owned(), format!("Basic {encoded}")));
                }
                AuthScheme::Bearer { token } => {
                    if token.is_empty() {
                        continue;
                    }
                    headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
                }
            }
        }
    }

    /// Perform one REST call: assemble the URL and parameters, attach
    /// authentication and the body, dispatch, and surface the response as a
    /// JSON value (`None` for 204 / empty bodies).
    async fn execute(&self, op: Operation) -> Result<Option<Value>, SmsWorksError> {
        let raw_url = build_url(
            &self.base_path,
            op.path,
            &op.path_params,
            op.base_path_override.as_deref(),
        );
        let mut url = Url::parse(&raw_url).map_err(SmsWorksError::Url)?;

        for (name, param) in normalize_params(&op.query_params) {
            match param {
                NormalizedParam::Single(value) => {
                    url.query_pairs_mut().append_pair(&name, &value);
                }
                NormalizedParam::Multi(values) => {
                    for value in values {
                        url.query_pairs_mut().append_pair(&name, &value);
                    }
                }
                NormalizedParam::File { filename, .. } => {
                    url.query_pairs_mut().append_pair(&name, &filename);
                }
            }
        }
        if !self.cache && op.method == reqwest::Method::GET {
            url.query_pairs_mut()
                .append_pair("_", &Utc::now().timestamp_millis().to_string());
        }

        let mut headers = self.default_headers.clone();
        for (name, param) in normalize_params(&op.header_params) {
            let value = match param {
                NormalizedParam::Single(value) => value,
                NormalizedParam::Multi(values) => values.join(","),
                NormalizedParam::File { filename, .. } => filename,
            };
            headers.push((name, value));
        }
        if !op.accepts.is_empty() {
            headers.push(("Accept".to_owned(), json_preferred_mime(op.accepts)));
        }
        self.apply_auth(op.auth_names, &mut url, &mut headers);

        let content_type = json_preferred_mime(op.content_types);
        let body = match op.body {
            Some(payload) => {
                if is_json_mime(&content_type) && can_be_jsonified(&payload) {
                    RequestBody::Json(payload)
                } else {
                    let text = match payload {
                        Value::String(text) => text,
                        other => other.to_string(),
                    };
                    headers.push(("Content-Type".to_owned(), content_type));
                    RequestBody::Raw(text)
                }
            }
            None if !op.form_params.is_empty() => {
                let normalized = normalize_params(&op.form_params);
                let has_files = normalized
                    .iter()
                    .any(|(_, param)| matches!(param, NormalizedParam::File { .. }));
                if has_files {
                    let mut fields = Vec::new();
                    for (name, param) in normalized {
                        match param {
                            NormalizedParam::Single(value) => {
                                fields.push((name, MultipartValue::Text(value)));
                            }
                            NormalizedParam::Multi(values) => {
                                for value in values {
                                    fields.push((name.clone(), MultipartValue::Text(value)));
                                }
                            }
                            NormalizedParam::File { filename, bytes } => {
                                fields.push((name, MultipartValue::File { filename, bytes }));
                            }
                        }
                    }
                    RequestBody::Multipart(fields)
                } else {
                    let mut fields = Vec::new();
                    for (name, param) in normalized {
                        match param {
                            NormalizedParam::Single(value) => fields.push((name, value)),
                            NormalizedParam::Multi(values) => {
                                for value in values {
                                    fields.push((name.clone(), value));
                                }
                            }
                            NormalizedParam::File { .. } => {}
                        }
                    }
                    RequestBody::Form(fields)
                }
            }
            None => RequestBody::Empty,
        };

        let request = HttpRequest {
            method: op.method,
            url: url.to_string(),
            headers,
            body,
        };
        debug!(method = %request.method, url = %request.url, "sending request");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(SmsWorksError::Transport)?;
        debug!(status = response.status, "response received");

        if !(200..=299).contains(&response.status) {
            let error = response
                .content_type
                .as_deref()
                .is_some_and(is_json_mime)
                .then(|| serde_json::from_str::<Value>(&response.body).ok())
                .flatten()
                .map(|value| decode_error_response(&value));
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(SmsWorksError::Status {
                status: response.status,
                error,
                body,
            });
        }

        if response.status == 204 || response.body.trim().is_empty() {
            return Ok(None);
        }

        // Only bodies declared as JSON are parsed; anything else is
        // surfaced as raw text.
        if response.content_type.as_deref().is_none_or(is_json_mime) {
            let value = serde_json::from_str(&response.body)
                .map_err(|err| SmsWorksError::Parse(Box::new(err)))?;
            Ok(Some(value))
        } else {
            Ok(Some(Value::String(response.body)))
        }
    }

    /// Fetch the API key and secret for a customer id.
    pub async fn get_api_key(
        &self,
        customerid: &CustomerId,
    ) -> Result<ApiKeyResponse, SmsWorksError> {
        let raw = self
            .execute(Operation {
                path: "/auth/getApiKey",
                method: reqwest::Method::GET,
                query_params: vec![("customerid", customerid.as_str().into())],
                auth_names: NO_AUTH,
                content_types: NO_CONTENT_TYPES,
                accepts: ACCEPT_JSON,
                ..Operation::default()
            })
            .await?;
        Ok(decode_api_key_response(&raw.unwrap_or(Value::Null)))
    }

    /// Exchange customer credentials for a JWT.
    ///
    /// The returned token does not expire and should be passed to
    /// [`SmsWorksClientBuilder::jwt`] on subsequent clients.
    pub async fn login(&self, login: &Login) -> Result<TokenResponse, SmsWorksError> {
        let raw = self
            .execute(Operation {
                path: "/auth/token",
                method: reqwest::Method::POST,
                body: Some(encode_login(login)),
                auth_names: NO_AUTH,
                content_types: NO_CONTENT_TYPES,
                accepts: ACCEPT_JSON,
                ..Operation::default()
            })
            .await?;
        Ok(decode_token_response(&raw.unwrap_or(Value::Null)))
    }

    /// Send an SMS message.
    pub async fn send_message(
        &self,
        message: &Message,
    ) -> Result<SendMessageResponse, SmsWorksError> {
        let raw = self
            .execute(Operation {
                path: "/message/send",
                method: reqwest::Method::POST,
                body: Some(encode_message(message)),
                auth_names: JWT_AUTH,
                content_types: NO_CONTENT_TYPES,
                accepts: ACCEPT_JSON,
                ..Operation::default()
            })
            .await?;
        Ok(decode_send_message_response(&raw.unwrap_or(Value::Null)))
    }

    /// Send a flash message, displayed immediately on the handset instead of
    /// being stored in the inbox.
    pub async fn send_flash_message(
        &self,
        message: &Message,
    ) -> Result<SendMessageResponse, SmsWorksError> {
        let raw = self
            .execute(Operation {
                path: "/message/flash",
                method: reqwest::Method::POST,
                body: Some(encode_message(message)),
                auth_names: JWT_AUTH,
                content_types: NO_CONTENT_TYPES,
                accepts: ACCEPT_JSON,
                ..Operation::default()
            })
            .await?;
        Ok(decode_send_message_response(&raw.unwrap_or(Value::Null)))
    }

    /// Schedule an SMS message for a later date-time.
    ///
    /// Set [`MessageOptions::schedule`](crate::domain::MessageOptions) on the
    /// message; the service rejects requests without it.
    pub async fn schedule_message(
        &self,
        message: &Message,
    ) -> Result<Vec<ScheduledMessageResponse>, SmsWorksError> {
        let raw = self
            .execute(Operation {
                path: "/message/schedule",
                method: reqwest::Method::POST,
                body: Some(encode_message(message)),
                auth_names: JWT_AUTH,
                content_types: NO_CONTENT_TYPES,
                accepts: ACCEPT_JSON,
                ..Operation::default()
            })
            .await?;
        Ok(decode_scheduled_message_list(&raw.unwrap_or(Value::Null)))
    }

    /// Fetch a logged message by its message id.
    pub async fn get_message(
        &self,
        messageid: &MessageId,
    ) -> Result<MessageResponse, SmsWorksError> {
        let raw = self
            .execute(Operation {
                path: "/messages/{messageid}",
                method: reqwest::Method::GET,
                path_params: vec![("messageid", messageid.as_str().into())],
                auth_names: JWT_AUTH,
                content_types: NO_CONTENT_TYPES,
                accepts: ACCEPT_JSON,
                ..Operation::default()
            })
            .await?;
        Ok(decode_message_response(&raw.unwrap_or(Value::Null)))
    }

    /// Delete a logged message by its message id.
    pub async fn delete_message(
        &self,
        messageid: &MessageId,
    ) -> Result<DeletedMessageResponse, SmsWorksError> {
        let raw = self
            .execute(Operation {
                path: "/messages/{messageid}",
                method: reqwest::Method::DELETE,
                path_params: vec![("messageid", messageid.as_str().into())],
                auth_names: JWT_AUTH,
                content_types: NO_CONTENT_TYPES,
                accepts: ACCEPT_JSON,
                ..Operation::default()
            })
            .await?;
        Ok(decode_deleted_message_response(&raw.unwrap_or(Value::Null)))
    }

    /// Search sent and received messages matching the query.
    pub async fn query_messages(
        &self,
        query: &MessageQuery,
    ) -> Result<Vec<MessageResponse>, SmsWorksError> {
        self.query("/messages", query).await
    }

    /// Search unread received messages matching the query.
    pub async fn query_inbox(
        &self,
        query: &MessageQuery,
    ) -> Result<Vec<MessageResponse>, SmsWorksError> {
        self.query("/messages/inbox", query).await
    }

    /// Search failed messages matching the query.
    pub async fn query_failed(
        &self,
        query: &MessageQuery,
    ) -> Result<Vec<MessageResponse>, SmsWorksError> {
        self.query("/messages/failed", query).await
    }

    async fn query(
        &self,
        path: &'static str,
        query: &MessageQuery,
    ) -> Result<Vec<MessageResponse>, SmsWorksError> {
        let raw = self
            .execute(Operation {
                path,
                method: reqwest::Method::POST,
                body: Some(encode_query(query)),
                auth_names: JWT_AUTH,
                content_types: NO_CONTENT_TYPES,
                accepts: ACCEPT_JSON,
                ..Operation::default()
            })
            .await?;
        Ok(decode_message_list(&raw.unwrap_or(Value::Null)))
    }

    /// Fetch the messages scheduled for later delivery and not yet sent.
    pub async fn scheduled_messages(&self) -> Result<ScheduledMessagesResponse, SmsWorksError> {
        let raw = self
            .execute(Operation {
                path: "/messages/schedule",
                method: reqwest::Method::GET,
                auth_names: JWT_AUTH,
                content_types: NO_CONTENT_TYPES,
                accepts: ACCEPT_JSON,
                ..Operation::default()
            })
            .await?;
        Ok(decode_scheduled_messages_response(
            &raw.unwrap_or(Value::Null),
        ))
    }

    /// Cancel a scheduled message before it is sent.
    pub async fn cancel_scheduled_message(
        &self,
        messageid: &MessageId,
    ) -> Result<CancelledMessageResponse, SmsWorksError> {
        let raw = self
            .execute(Operation {
                path: "/messages/schedule/{messageid}",
                method: reqwest::Method::DELETE,
                path_params: vec![("messageid", messageid.as_str().into())],
                auth_names: JWT_AUTH,
                content_types: NO_CONTENT_TYPES,
                accepts: ACCEPT_JSON,
                ..Operation::default()
            })
            .await?;
        Ok(decode_cancelled_message_response(
            &raw.unwrap_or(Value::Null),
        ))
    }

    /// Send one message body to a batch of recipients.
    pub async fn send_batch(
        &self,
        batch: &BatchMessage,
    ) -> Result<BatchMessageResponse, SmsWorksError> {
        let raw = self
            .execute(Operation {
                path: "/batch/send",
                method: reqwest::Method::POST,
                body: Some(encode_batch_message(batch)),
                auth_names: JWT_AUTH,
                content_types: NO_CONTENT_TYPES,
                accepts: ACCEPT_JSON,
                ..Operation::default()
            })
            .await?;
        Ok(decode_batch_message_response(&raw.unwrap_or(Value::Null)))
    }

    /// Send a batch of fully distinct messages, each with its own sender,
    /// destination, and content.
    pub async fn send_mixed_batch(
        &self,
        messages: &[Message],
    ) -> Result<BatchMessageResponse, SmsWorksError> {
        if messages.is_empty() {
            return Err(ValidationError::Empty { field: "messages" }.into());
        }
        if messages.len() > BATCH_MAX_DESTINATIONS {
            return Err(ValidationError::TooManyDestinations {
                max: BATCH_MAX_DESTINATIONS,
                actual: messages.len(),
            }
            .into());
        }

        let raw = self
            .execute(Operation {
                path: "/batch/any",
                method: reqwest::Method::POST,
                body: Some(encode_message_list(messages)),
                auth_names: JWT_AUTH,
                content_types: NO_CONTENT_TYPES,
                accepts: ACCEPT_JSON,
                ..Operation::default()
            })
            .await?;
        Ok(decode_batch_message_response(&raw.unwrap_or(Value::Null)))
    }

    /// Schedule a batch for a later date-time.
    ///
    /// Set [`MessageOptions::schedule`](crate::domain::MessageOptions) on the
    /// batch; the service rejects requests without it.
    pub async fn schedule_batch(
        &self,
        batch: &BatchMessage,
    ) -> Result<ScheduledBatchResponse, SmsWorksError> {
        let raw = self
            .execute(Operation {
                path: "/batch/schedule",
                method: reqwest::Method::POST,
                body: Some(encode_batch_message(batch)),
                auth_names: JWT_AUTH,
                content_types: NO_CONTENT_TYPES,
                accepts: ACCEPT_JSON,
                ..Operation::default()
            })
            .await?;
        Ok(decode_scheduled_batch_response(&raw.unwrap_or(Value::Null)))
    }

    /// Fetch all messages in a batch by its batch id.
    pub async fn get_batch(
        &self,
        batchid: &BatchId,
    ) -> Result<Vec<MessageResponse>, SmsWorksError> {
        let raw = self
            .execute(Operation {
                path: "/batch/{batchid}",
                method: reqwest::Method::GET,
                path_params: vec![("batchid", batchid.as_str().into())],
                auth_names: JWT_AUTH,
                content_types: NO_CONTENT_TYPES,
                accepts: ACCEPT_JSON,
                ..Operation::default()
            })
            .await?;
        Ok(decode_message_list(&raw.unwrap_or(Value::Null)))
    }

    /// Cancel a scheduled batch before it is sent.
    pub async fn cancel_scheduled_batch(
        &self,
        batchid: &BatchId,
    ) -> Result<CancelledMessageResponse, SmsWorksError> {
        let raw = self
            .execute(Operation {
                path: "/batches/schedule/{batchid}",
                method: reqwest::Method::DELETE,
                path_params: vec![("batchid", batchid.as_str().into())],
                auth_names: JWT_AUTH,
                content_types: NO_CONTENT_TYPES,
                accepts: ACCEPT_JSON,
                ..Operation::default()
            })
            .await?;
        Ok(decode_cancelled_message_response(
            &raw.unwrap_or(Value::Null),
        ))
    }

    /// Fetch the number of credits remaining on the account.
    pub async fn credits_balance(&self) -> Result<CreditsResponse, SmsWorksError> {
        let raw = self
            .execute(Operation {
                path: "/credits/balance",
                method: reqwest::Method::GET,
                auth_names: JWT_AUTH,
                content_types: NO_CONTENT_TYPES,
                accepts: ACCEPT_JSON,
                ..Operation::default()
            })
            .await?;
        Ok(decode_credits_response(&raw.unwrap_or(Value::Null)))
    }

    /// Generate and send a one-time password.
    pub async fn send_otp(&self, otp: &Otp) -> Result<OtpResponse, SmsWorksError> {
        let raw = self
            .execute(Operation {
                path: "/otp/send",
                method: reqwest::Method::POST,
                body: Some(encode_otp(otp)),
                auth_names: JWT_AUTH,
                content_types: NO_CONTENT_TYPES,
                accepts: ACCEPT_JSON,
                ..Operation::default()
            })
            .await?;
        Ok(decode_otp_response(&raw.unwrap_or(Value::Null)))
    }

    /// Verify a one-time password entered by the user.
    pub async fn verify_otp(
        &self,
        verify: &OtpVerify,
    ) -> Result<OtpVerifyResponse, SmsWorksError> {
        let raw = self
            .execute(Operation {
                path: "/otp/verify",
                method: reqwest::Method::POST,
                body: Some(encode_otp_verify(verify)),
                auth_names: JWT_AUTH,
                content_types: NO_CONTENT_TYPES,
                accepts: ACCEPT_JSON,
                ..Operation::default()
            })
            .await?;
        Ok(decode_otp_verify_response(&raw.unwrap_or(Value::Null)))
    }

    /// Fetch a one-time password by the message id it was sent with.
    pub async fn get_otp(
        &self,
        messageid: &MessageId,
    ) -> Result<OtpVerifyResponse, SmsWorksError> {
        let raw = self
            .execute(Operation {
                path: "/otp/{messageid}",
                method: reqwest::Method::GET,
                path_params: vec![("messageid", messageid.as_str().into())],
                auth_names: JWT_AUTH,
                content_types: NO_CONTENT_TYPES,
                accepts: ACCEPT_JSON,
                ..Operation::default()
            })
            .await?;
        Ok(decode_otp_verify_response(&raw.unwrap_or(Value::Null)))
    }

    /// Fetch a sample error response for an error code, useful when testing
    /// error handling.
    pub async fn error_sample(
        &self,
        errorcode: &ErrorCode,
    ) -> Result<ErrorResponse, SmsWorksError> {
        let raw = self
            .execute(Operation {
                path: "/utils/errors/{errorcode}",
                method: reqwest::Method::GET,
                path_params: vec![("errorcode", errorcode.as_str().into())],
                auth_names: NO_AUTH,
                content_types: NO_CONTENT_TYPES,
                accepts: ACCEPT_JSON,
                ..Operation::default()
            })
            .await?;
        Ok(decode_error_response(&raw.unwrap_or(Value::Null)))
    }

    /// Check connectivity to the service without sending anything.
    pub async fn connectivity_test(&self) -> Result<TestResponse, SmsWorksError> {
        let raw = self
            .execute(Operation {
                path: "/utils/test",
                method: reqwest::Method::GET,
                auth_names: NO_AUTH,
                content_types: NO_CONTENT_TYPES,
                accepts: ACCEPT_JSON,
                ..Operation::default()
            })
            .await?;
        Ok(decode_test_response(&raw.unwrap_or(Value::Null)))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use crate::domain::{Destination, MessageContent, MessageOptions, SenderId};

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        last_request: Option<HttpRequest>,
        response_status: u16,
        response_content_type: Option<String>,
        response_body: String,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    last_request: None,
                    response_status,
                    response_content_type: Some("application/json;charset=UTF-8".to_owned()),
                    response_body: response_body.into(),
                })),
            }
        }

        fn without_content_type(self) -> Self {
            self.state.lock().unwrap().response_content_type = None;
            self
        }

        fn last_request(&self) -> HttpRequest {
            self.state
                .lock()
                .unwrap()
                .last_request
                .clone()
                .expect("no request recorded")
        }
    }

    impl HttpTransport for FakeTransport {
        fn execute(
            &self,
            request: HttpRequest,
        ) -> BoxFuture<'_, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let (status, content_type, body) = {
                    let mut state = self.state.lock().unwrap();
                    state.last_request = Some(request);
                    (
                        state.response_status,
                        state.response_content_type.clone(),
                        state.response_body.clone(),
                    )
                };
                Ok(HttpResponse {
                    status,
                    content_type,
                    body,
                })
            })
        }
    }

    fn make_client(transport: FakeTransport) -> SmsWorksClient {
        make_client_with(transport, |builder| builder.jwt("jwt-token"))
    }

    fn make_client_with(
        transport: FakeTransport,
        configure: impl FnOnce(SmsWorksClientBuilder) -> SmsWorksClientBuilder,
    ) -> SmsWorksClient {
        let builder = configure(
            SmsWorksClient::builder().base_path("https://example.invalid/v1"),
        );
        SmsWorksClient {
            base_path: builder.base_path,
            default_headers: builder.default_headers,
            auth: builder.auth,
            cache: builder.cache,
            http: Arc::new(transport),
        }
    }

    fn message() -> Message {
        Message::new(
            SenderId::new("SMSWorks").unwrap(),
            Destination::new("447777777777").unwrap(),
            MessageContent::new("hello").unwrap(),
            MessageOptions::default(),
        )
    }

    fn header<'a>(request: &'a HttpRequest, name: &str) -> Option<&'a str> {
        request
            .headers
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    #[tokio::test]
    async fn send_message_posts_json_and_decodes_the_response() {
        let transport = FakeTransport::new(
            200,
            r#"{"messageid": "m1", "status": "SENT", "credits": 10, "creditsUsed": 1}"#,
        );
        let client = make_client(transport.clone());

        let response = client.send_message(&message()).await.unwrap();
        assert_eq!(response.messageid.as_deref(), Some("m1"));
        assert_eq!(response.status.as_deref(), Some("SENT"));
        assert_eq!(response.credits, Some(10.0));
        assert_eq!(response.credits_used, Some(1.0));
        assert!(response.has_required_fields());

        let request = transport.last_request();
        assert_eq!(request.method, reqwest::Method::POST);
        assert_eq!(request.url, "https://example.invalid/v1/message/send");
        assert_eq!(header(&request, "Authorization"), Some("jwt-token"));
        assert_eq!(
            header(&request, "Accept"),
            Some("application/json;charset=UTF-8")
        );
        match &request.body {
            RequestBody::Json(body) => {
                assert_eq!(body["sender"], json!("SMSWorks"));
                assert_eq!(body["destination"], json!("447777777777"));
                assert_eq!(body["content"], json!("hello"));
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[tokio::test]
    async fn unregistered_auth_scheme_is_skipped() {
        let transport = FakeTransport::new(200, "{}");
        let client = make_client_with(transport.clone(), |builder| builder);

        client.send_message(&message()).await.unwrap();
        assert!(header(&transport.last_request(), "Authorization").is_none());
    }

    #[tokio::test]
    async fn basic_scheme_sends_encoded_credentials() {
        let transport = FakeTransport::new(200, "{}");
        let client = make_client_with(transport.clone(), |builder| {
            builder.auth_scheme(
                "JWT",
                AuthScheme::Basic {
                    username: "u".to_owned(),
                    password: "p".to_owned(),
                },
            )
        });

        client.send_message(&message()).await.unwrap();
        assert_eq!(
            header(&transport.last_request(), "Authorization"),
            Some("Basic dTpw")
        );
    }

    #[tokio::test]
    async fn api_key_prefix_is_prepended() {
        let transport = FakeTransport::new(200, "{}");
        let client = make_client_with(transport.clone(), |builder| {
            builder.auth_scheme(
                "JWT",
                AuthScheme::ApiKey {
                    location: ApiKeyLocation::Header,
                    name: "Authorization".to_owned(),
                    prefix: Some("Token".to_owned()),
                    key: "abc".to_owned(),
                },
            )
        });

        client.send_message(&message()).await.unwrap();
        assert_eq!(
            header(&transport.last_request(), "Authorization"),
            Some("Token abc")
        );
    }

    #[tokio::test]
    async fn get_message_encodes_path_params() {
        let transport = FakeTransport::new(200, "{}");
        let client = make_client(transport.clone());

        let messageid = MessageId::new("abc 1").unwrap();
        client.get_message(&messageid).await.unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, reqwest::Method::GET);
        assert_eq!(request.url, "https://example.invalid/v1/messages/abc%201");
    }

    #[tokio::test]
    async fn get_api_key_sends_customerid_as_query_without_auth() {
        let transport =
            FakeTransport::new(200, r#"{"key": "key-1", "secret": "s3cret"}"#);
        let client = make_client(transport.clone());

        let response = client
            .get_api_key(&CustomerId::new("cust-1").unwrap())
            .await
            .unwrap();
        assert_eq!(response.key.as_deref(), Some("key-1"));
        assert_eq!(response.secret.as_deref(), Some("s3cret"));

        let request = transport.last_request();
        assert_eq!(
            request.url,
            "https://example.invalid/v1/auth/getApiKey?customerid=cust-1"
        );
        assert!(header(&request, "Authorization").is_none());
    }

    #[tokio::test]
    async fn disabling_the_cache_adds_a_timestamp_to_gets() {
        let transport = FakeTransport::new(200, r#"{"credits": 50}"#);
        let client = make_client_with(transport.clone(), |builder| {
            builder.jwt("jwt-token").cache(false)
        });

        let response = client.credits_balance().await.unwrap();
        assert_eq!(response.credits, Some(50.0));
        assert!(transport.last_request().url.contains("_="));

        // POSTs are never cache-busted.
        client.send_message(&message()).await.unwrap();
        assert!(!transport.last_request().url.contains("_="));
    }

    #[tokio::test]
    async fn non_success_status_carries_the_decoded_error() {
        let transport = FakeTransport::new(
            402,
            r#"{"message": "Insufficient credits", "errorCode": 301, "status": "FAILED"}"#,
        );
        let client = make_client(transport);

        let err = client.send_message(&message()).await.unwrap_err();
        match err {
            SmsWorksError::Status {
                status,
                error: Some(error),
                body: Some(_),
            } => {
                assert_eq!(status, 402);
                assert_eq!(error.message.as_deref(), Some("Insufficient credits"));
                assert_eq!(error.error_code, Some(301));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_json_error_body_is_kept_raw() {
        let transport = FakeTransport::new(500, "gateway exploded").without_content_type();
        let client = make_client(transport);

        let err = client.send_message(&message()).await.unwrap_err();
        assert!(matches!(
            err,
            SmsWorksError::Status {
                status: 500,
                error: None,
                body: Some(_)
            }
        ));
    }

    #[tokio::test]
    async fn empty_body_decodes_to_an_empty_model() {
        let transport = FakeTransport::new(204, "");
        let client = make_client(transport);

        let messageid = MessageId::new("m1").unwrap();
        let response = client.cancel_scheduled_message(&messageid).await.unwrap();
        assert_eq!(response, CancelledMessageResponse::default());
    }

    #[tokio::test]
    async fn invalid_json_maps_to_parse_error() {
        let transport = FakeTransport::new(200, "{ not json }");
        let client = make_client(transport);

        let err = client.credits_balance().await.unwrap_err();
        assert!(matches!(err, SmsWorksError::Parse(_)));
    }

    #[tokio::test]
    async fn schedule_message_decodes_a_list() {
        let transport = FakeTransport::new(
            200,
            r#"[{"messageid": "m1", "status": "SCHEDULED"}]"#,
        );
        let client = make_client(transport.clone());

        let responses = client.schedule_message(&message()).await.unwrap();
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].messageid.as_deref(), Some("m1"));

        let request = transport.last_request();
        assert_eq!(request.url, "https://example.invalid/v1/message/schedule");
    }

    #[tokio::test]
    async fn send_mixed_batch_validates_the_message_count() {
        let transport = FakeTransport::new(200, "{}");
        let client = make_client(transport);

        let err = client.send_mixed_batch(&[]).await.unwrap_err();
        assert!(matches!(
            err,
            SmsWorksError::Validation(ValidationError::Empty { field: "messages" })
        ));
    }

    #[tokio::test]
    async fn cancel_scheduled_batch_targets_the_batches_path() {
        let transport =
            FakeTransport::new(200, r#"{"messageid": "b1", "status": "CANCELLED"}"#);
        let client = make_client(transport.clone());

        let batchid = BatchId::new("b1").unwrap();
        let response = client.cancel_scheduled_batch(&batchid).await.unwrap();
        assert_eq!(response.status.as_deref(), Some("CANCELLED"));

        let request = transport.last_request();
        assert_eq!(request.method, reqwest::Method::DELETE);
        assert_eq!(
            request.url,
            "https://example.invalid/v1/batches/schedule/b1"
        );
    }

    #[tokio::test]
    async fn default_headers_are_sent_with_every_request() {
        let transport = FakeTransport::new(200, "{}");
        let client = make_client_with(transport.clone(), |builder| {
            builder.jwt("jwt-token").default_header("X-Env", "staging")
        });

        client.connectivity_test().await.unwrap();
        assert_eq!(header(&transport.last_request(), "X-Env"), Some("staging"));
    }

    #[tokio::test]
    async fn form_params_without_files_become_a_urlencoded_body() {
        use crate::transport::marshal::{Operation, ParamValue};

        let transport = FakeTransport::new(200, "{}");
        let client = make_client(transport.clone());

        client
            .execute(Operation {
                path: "/utils/test",
                method: reqwest::Method::POST,
                form_params: vec![
                    ("a", ParamValue::from("1")),
                    ("skip", ParamValue::Null),
                    ("b", ParamValue::from(2_i64)),
                ],
                ..Operation::default()
            })
            .await
            .unwrap();

        match &transport.last_request().body {
            RequestBody::Form(fields) => {
                assert_eq!(
                    fields,
                    &vec![
                        ("a".to_owned(), "1".to_owned()),
                        ("b".to_owned(), "2".to_owned()),
                    ]
                );
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[tokio::test]
    async fn a_file_param_switches_the_body_to_multipart() {
        use crate::transport::marshal::{Operation, ParamValue};

        let transport = FakeTransport::new(200, "{}");
        let client = make_client(transport.clone());

        client
            .execute(Operation {
                path: "/utils/test",
                method: reqwest::Method::POST,
                form_params: vec![
                    ("label", ParamValue::from("report")),
                    (
                        "data",
                        ParamValue::File {
                            filename: "report.csv".to_owned(),
                            bytes: vec![1, 2, 3],
                        },
                    ),
                ],
                ..Operation::default()
            })
            .await
            .unwrap();

        match &transport.last_request().body {
            RequestBody::Multipart(fields) => {
                assert_eq!(fields.len(), 2);
                assert!(matches!(
                    &fields[1].1,
                    MultipartValue::File { filename, .. } if filename == "report.csv"
                ));
            }
            other => panic!("unexpected body: {other:?}"),
        }
    }

    #[tokio::test]
    async fn operation_base_path_override_wins() {
        use crate::transport::marshal::Operation;

        let transport = FakeTransport::new(200, "{}");
        let client = make_client(transport.clone());

        client
            .execute(Operation {
                path: "/utils/test",
                base_path_override: Some("https://staging.invalid/v1".to_owned()),
                ..Operation::default()
            })
            .await
            .unwrap();

        assert_eq!(
            transport.last_request().url,
            "https://staging.invalid/v1/utils/test"
        );
    }

    #[test]
    fn builder_rejects_an_invalid_base_path() {
        let err = SmsWorksClient::builder()
            .base_path("not a url")
            .build()
            .unwrap_err();
        assert!(matches!(err, SmsWorksError::Url(_)));
    }
}
