//! Typed Rust client for The SMS Works JSON API.
//!
//! The crate is split into a domain layer of strong types, a transport layer
//! for wire-format quirks (URL building, parameter normalization, and the
//! lenient JSON coercion the service's responses call for), and a client
//! layer orchestrating requests.
//!
//! ```rust,no_run
//! use smsworks::{Destination, Message, MessageContent, MessageOptions, SenderId, SmsWorksClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), smsworks::SmsWorksError> {
//!     let client = SmsWorksClient::new("your-jwt")?;
//!     let message = Message::new(
//!         SenderId::new("SMSWorks")?,
//!         Destination::new("447777777777")?,
//!         MessageContent::new("hello")?,
//!         MessageOptions::default(),
//!     );
//!     let response = client.send_message(&message).await?;
//!     println!("sent: {:?}", response.messageid);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    ApiKeyLocation, AuthScheme, SmsWorksClient, SmsWorksClientBuilder, SmsWorksError,
};
pub use domain::{
    ApiKey, ApiSecret, BatchId, BatchMessage, CustomerId, Destination, ErrorCode, ErrorResponse,
    Login, Message, MessageContent, MessageId, MessageOptions, MessageQuery, MessageResponse,
    Otp, OtpOptions, OtpVerify, Passcode, SenderId, SendMessageResponse, Tag, ValidationError,
    ValidityMinutes,
};
pub use transport::marshal;
