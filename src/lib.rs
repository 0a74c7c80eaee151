//! Typed Rust client for the Tencent Cloud SMS and voice HTTP API (`yun.tim.qq.com/v5`).
//!
//! The crate is split into a domain layer of strong types, a signing layer that derives the
//! per-call signature and URL, a transport layer for wire-format quirks, and a small client
//! layer orchestrating requests.
//!
//! ```rust,no_run
//! use qcloudsms::{Credentials, MessageText, QcloudClient, SendSms, SmsContent, Tel};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), qcloudsms::QcloudError> {
//!     let client = QcloudClient::new(Credentials::new("1400000000", "...")?)?;
//!     let tel = Tel::china("13800000000")?;
//!     let msg = MessageText::new("Your code is 1234")?;
//!     let resp = client.send_sms(SendSms::new(tel, SmsContent::text(msg))).await?;
//!     println!("{:?}", resp.sid);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod signing;
mod transport;

pub use client::{QcloudClient, QcloudClientBuilder, QcloudError};
pub use domain::{
    AppId, AppKey, FailureKind, KnownResultCode, MessageText, Mobile, NationCode, Nonce,
    Operation, ResultCode, SendMultiSms, SendOptions, SendSms, SendSmsResponse, SendVoice,
    SignName, SmsContent, Tel, TemplateId, UnixTimestamp, ValidationError,
};
pub use signing::{CallContext, Credentials, MobileScope, Signature, SignedRequest};
