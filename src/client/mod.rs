//! Client layer: signs each call, dispatches it, and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::domain::{
    CallbackStatistics, DeliveryStatusResponse, MobileStatusQuery, Nonce, Operation, PullKind,
    PullLimit, ReplyResponse, ResultCode, SendMultiSms, SendMultiSmsResponse, SendSms,
    SendSmsResponse, SendStatistics, SendVoice, SendVoiceResponse, SenderSignDraft, SenderSignId,
    SenderSignListResponse, SenderSignResponse, SignName, StatisticsRange, TemplateDraft,
    TemplateId, TemplateListResponse, TemplatePage, TemplateResponse, ValidationError,
    require_sign_ids, require_template_ids,
};
use crate::signing::{
    BaseUrl, CallContext, Credentials, DEFAULT_BASE_URL, MobileScope, SignedRequest,
};
use crate::transport::{self, Decoded};

/// Crate name, used in the default `User-Agent`.
pub const SDK_NAME: &str = env!("CARGO_PKG_NAME");
/// Crate version, used in the default `User-Agent`.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const JSON_CONTENT_TYPE: &str = "application/json";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a Url,
        body: &'a serde_json::Value,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a Url,
        body: &'a serde_json::Value,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url.as_str())
                .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
                .json(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`QcloudClient`].
///
/// Nothing is retried; every failure is handed back to the caller.
pub enum QcloudError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The server answered with a status other than `200 OK`.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16, body: Option<String> },

    /// The platform returned a non-zero `result`.
    #[error("API error {}: {message}", code.as_i32())]
    Api { code: ResultCode, message: String },

    /// Response body is not JSON or has no usable `result` field.
    #[error("parse error: {0}")]
    Parse(#[source] Box<dyn StdError + Send + Sync>),

    /// The request payload could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl QcloudError {
    /// Platform result code, for [`QcloudError::Api`] only.
    pub fn result_code(&self) -> Option<ResultCode> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
/// Builder for [`QcloudClient`].
///
/// Defaults: nonce length 6, `User-Agent` `qcloudsms/<version>`, 10 s timeout, debug off,
/// production base URL.
pub struct QcloudClientBuilder {
    credentials: Credentials,
    sign_name: Option<SignName>,
    nonce_len: usize,
    user_agent: String,
    timeout: Duration,
    debug: bool,
    base_url: Option<String>,
    context: Option<CallContext>,
}

impl QcloudClientBuilder {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            sign_name: None,
            nonce_len: Nonce::DEFAULT_LEN,
            user_agent: format!("{SDK_NAME}/{SDK_VERSION}"),
            timeout: DEFAULT_TIMEOUT,
            debug: false,
            base_url: None,
            context: None,
        }
    }

    /// Sender sign used for template messages that don't carry their own.
    pub fn sign_name(mut self, sign_name: SignName) -> Self {
        self.sign_name = Some(sign_name);
        self
    }

    /// Number of digits in the generated nonce.
    pub fn nonce_len(mut self, nonce_len: usize) -> Self {
        self.nonce_len = nonce_len;
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Log every request URL, payload and raw response at `debug` level.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Override the API root (`https://yun.tim.qq.com/v5`).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Use a fixed nonce and timestamp instead of generating them.
    pub fn call_context(mut self, context: CallContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Build a [`QcloudClient`].
    pub fn build(self) -> Result<QcloudClient, QcloudError> {
        let base_url = BaseUrl::parse(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let context = match self.context {
            Some(context) => context,
            None => CallContext::generate(self.nonce_len)?,
        };

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()
            .map_err(|err| QcloudError::Transport(Box::new(err)))?;

        Ok(QcloudClient {
            credentials: self.credentials,
            sign_name: self.sign_name,
            nonce_len: self.nonce_len,
            base_url,
            context,
            debug: self.debug,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level SMS and voice client.
///
/// A nonce and timestamp are generated once at construction and reused for every call
/// until [`QcloudClient::refresh_context`]. Each call computes its own signature and URL,
/// so a shared `&QcloudClient` can be used from concurrent tasks.
pub struct QcloudClient {
    credentials: Credentials,
    sign_name: Option<SignName>,
    nonce_len: usize,
    base_url: BaseUrl,
    context: CallContext,
    debug: bool,
    http: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for QcloudClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QcloudClient")
            .field("app_id", self.credentials.app_id())
            .field("sign_name", &self.sign_name)
            .field("base_url", &self.base_url)
            .field("context", &self.context)
            .field("debug", &self.debug)
            .finish_non_exhaustive()
    }
}

impl QcloudClient {
    /// Create a client with default settings.
    ///
    /// For more customization, use [`QcloudClient::builder`].
    pub fn new(credentials: Credentials) -> Result<Self, QcloudError> {
        QcloudClientBuilder::new(credentials).build()
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> QcloudClientBuilder {
        QcloudClientBuilder::new(credentials)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Replace the application id and key used to sign and address later calls.
    pub fn set_credentials(&mut self, credentials: Credentials) {
        self.credentials = credentials;
    }

    /// Nonce and timestamp used by the next call.
    pub fn context(&self) -> &CallContext {
        &self.context
    }

    /// Generate a new nonce and capture the current time.
    pub fn refresh_context(&mut self) -> Result<(), ValidationError> {
        self.context = CallContext::generate(self.nonce_len)?;
        Ok(())
    }

    pub fn sign_name(&self) -> Option<&SignName> {
        self.sign_name.as_ref()
    }

    pub fn set_sign_name(&mut self, sign_name: Option<SignName>) {
        self.sign_name = sign_name;
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Sign and address one request for `operation`.
    pub fn prepare(&self, operation: Operation, scope: &MobileScope<'_>) -> SignedRequest {
        SignedRequest::prepare(
            &self.credentials,
            &self.base_url,
            &self.context,
            operation,
            scope,
        )
    }

    /// Send one SMS. The signature covers the recipient's mobile.
    pub async fn send_sms(&self, request: SendSms) -> Result<SendSmsResponse, QcloudError> {
        let signed = self.prepare(
            Operation::SendSms,
            &MobileScope::single(request.tel.mobile()),
        );
        let body = transport::encode_send_sms_body(&request, self.sign_name.as_ref(), &signed);
        self.execute::<_, transport::SendSmsPayload, _>(Operation::SendSms, &signed, &body)
            .await
    }

    /// Send the same content to up to 200 recipients. The signature covers all mobiles in
    /// request order.
    ///
    /// A successful call can still carry failed entries in
    /// [`SendMultiSmsResponse::detail`].
    pub async fn send_multi_sms(
        &self,
        request: SendMultiSms,
    ) -> Result<SendMultiSmsResponse, QcloudError> {
        let signed = self.prepare(
            Operation::SendMultiSms,
            &MobileScope::from_tels(request.tels()),
        );
        let body =
            transport::encode_send_multi_sms_body(&request, self.sign_name.as_ref(), &signed);
        self.execute::<_, transport::SendMultiSmsPayload, _>(
            Operation::SendMultiSms,
            &signed,
            &body,
        )
        .await
    }

    /// Place a voice call: a notification when `prompt_type` is `2`, a verification code
    /// otherwise.
    pub async fn send_voice(&self, request: SendVoice) -> Result<SendVoiceResponse, QcloudError> {
        let operation = Operation::for_voice_prompt_type(request.prompt_type());
        let signed = self.prepare(operation, &MobileScope::single(request.tel.mobile()));
        let body = transport::encode_send_voice_body(&request, &signed);
        self.execute::<_, transport::SendVoicePayload, _>(operation, &signed, &body)
            .await
    }

    pub async fn add_template(
        &self,
        draft: TemplateDraft,
    ) -> Result<TemplateResponse, QcloudError> {
        let signed = self.prepare(Operation::AddTemplate, &MobileScope::none());
        let body = transport::encode_template_draft_body(None, &draft, &signed);
        self.execute::<_, transport::TemplatePayload, _>(Operation::AddTemplate, &signed, &body)
            .await
    }

    pub async fn modify_template(
        &self,
        id: TemplateId,
        draft: TemplateDraft,
    ) -> Result<TemplateResponse, QcloudError> {
        let signed = self.prepare(Operation::ModifyTemplate, &MobileScope::none());
        let body = transport::encode_template_draft_body(Some(id), &draft, &signed);
        self.execute::<_, transport::TemplatePayload, _>(
            Operation::ModifyTemplate,
            &signed,
            &body,
        )
        .await
    }

    pub async fn delete_templates(
        &self,
        ids: Vec<TemplateId>,
    ) -> Result<TemplateResponse, QcloudError> {
        let ids = require_template_ids(ids)?;
        let signed = self.prepare(Operation::DeleteTemplate, &MobileScope::none());
        let body = transport::encode_template_ids_body(&ids, &signed);
        self.execute::<_, transport::TemplatePayload, _>(
            Operation::DeleteTemplate,
            &signed,
            &body,
        )
        .await
    }

    /// Review status of specific templates.
    pub async fn get_templates_by_id(
        &self,
        ids: Vec<TemplateId>,
    ) -> Result<TemplateListResponse, QcloudError> {
        let ids = require_template_ids(ids)?;
        let signed = self.prepare(Operation::GetTemplate, &MobileScope::none());
        let body = transport::encode_template_query_by_id_body(&ids, &signed);
        self.execute::<_, transport::TemplateListPayload, _>(
            Operation::GetTemplate,
            &signed,
            &body,
        )
        .await
    }

    /// Page through all templates of the application.
    pub async fn get_templates_by_page(
        &self,
        page: TemplatePage,
    ) -> Result<TemplateListResponse, QcloudError> {
        let signed = self.prepare(Operation::GetTemplate, &MobileScope::none());
        let body = transport::encode_template_query_by_page_body(page, &signed);
        self.execute::<_, transport::TemplateListPayload, _>(
            Operation::GetTemplate,
            &signed,
            &body,
        )
        .await
    }

    pub async fn add_sender_sign(
        &self,
        draft: SenderSignDraft,
    ) -> Result<SenderSignResponse, QcloudError> {
        let signed = self.prepare(Operation::AddSign, &MobileScope::none());
        let body = transport::encode_sender_sign_draft_body(None, &draft, &signed);
        self.execute::<_, transport::SenderSignPayload, _>(Operation::AddSign, &signed, &body)
            .await
    }

    pub async fn modify_sender_sign(
        &self,
        id: SenderSignId,
        draft: SenderSignDraft,
    ) -> Result<SenderSignResponse, QcloudError> {
        let signed = self.prepare(Operation::ModifySign, &MobileScope::none());
        let body = transport::encode_sender_sign_draft_body(Some(id), &draft, &signed);
        self.execute::<_, transport::SenderSignPayload, _>(Operation::ModifySign, &signed, &body)
            .await
    }

    pub async fn delete_sender_signs(
        &self,
        ids: Vec<SenderSignId>,
    ) -> Result<SenderSignResponse, QcloudError> {
        let ids = require_sign_ids(ids)?;
        let signed = self.prepare(Operation::DeleteSign, &MobileScope::none());
        let body = transport::encode_sender_sign_ids_body(&ids, &signed);
        self.execute::<_, transport::SenderSignPayload, _>(Operation::DeleteSign, &signed, &body)
            .await
    }

    pub async fn get_sender_signs(
        &self,
        ids: Vec<SenderSignId>,
    ) -> Result<SenderSignListResponse, QcloudError> {
        let ids = require_sign_ids(ids)?;
        let signed = self.prepare(Operation::GetSign, &MobileScope::none());
        let body = transport::encode_sender_sign_ids_body(&ids, &signed);
        self.execute::<_, transport::SenderSignListPayload, _>(Operation::GetSign, &signed, &body)
            .await
    }

    /// Delivery reports not yet pulled. Reports are returned only once.
    pub async fn pull_delivery_status(
        &self,
        limit: PullLimit,
    ) -> Result<DeliveryStatusResponse, QcloudError> {
        let signed = self.prepare(Operation::PullStatus, &MobileScope::none());
        let body = transport::encode_pull_status_body(PullKind::Delivery, limit, &signed);
        self.execute::<_, transport::DeliveryStatusPayload, _>(
            Operation::PullStatus,
            &signed,
            &body,
        )
        .await
    }

    /// Subscriber replies not yet pulled. Replies are returned only once.
    pub async fn pull_replies(&self, limit: PullLimit) -> Result<ReplyResponse, QcloudError> {
        let signed = self.prepare(Operation::PullStatus, &MobileScope::none());
        let body = transport::encode_pull_status_body(PullKind::Reply, limit, &signed);
        self.execute::<_, transport::ReplyPayload, _>(Operation::PullStatus, &signed, &body)
            .await
    }

    pub async fn pull_delivery_status_for_mobile(
        &self,
        query: &MobileStatusQuery,
    ) -> Result<DeliveryStatusResponse, QcloudError> {
        let signed = self.prepare(Operation::PullStatusForMobile, &MobileScope::none());
        let body = transport::encode_mobile_status_body(PullKind::Delivery, query, &signed);
        self.execute::<_, transport::DeliveryStatusPayload, _>(
            Operation::PullStatusForMobile,
            &signed,
            &body,
        )
        .await
    }

    pub async fn pull_replies_for_mobile(
        &self,
        query: &MobileStatusQuery,
    ) -> Result<ReplyResponse, QcloudError> {
        let signed = self.prepare(Operation::PullStatusForMobile, &MobileScope::none());
        let body = transport::encode_mobile_status_body(PullKind::Reply, query, &signed);
        self.execute::<_, transport::ReplyPayload, _>(
            Operation::PullStatusForMobile,
            &signed,
            &body,
        )
        .await
    }

    /// Request and billing counters for an hour range.
    pub async fn pull_send_statistics(
        &self,
        range: StatisticsRange,
    ) -> Result<SendStatistics, QcloudError> {
        let signed = self.prepare(Operation::PullSendStatus, &MobileScope::none());
        let body = transport::encode_statistics_body(range, &signed);
        self.execute::<_, transport::SendStatisticsPayload, _>(
            Operation::PullSendStatus,
            &signed,
            &body,
        )
        .await
    }

    /// Delivery receipt counters for an hour range.
    pub async fn pull_callback_statistics(
        &self,
        range: StatisticsRange,
    ) -> Result<CallbackStatistics, QcloudError> {
        let signed = self.prepare(Operation::PullCallbackStatus, &MobileScope::none());
        let body = transport::encode_statistics_body(range, &signed);
        self.execute::<_, transport::CallbackStatisticsPayload, _>(
            Operation::PullCallbackStatus,
            &signed,
            &body,
        )
        .await
    }

    async fn execute<B, P, R>(
        &self,
        operation: Operation,
        signed: &SignedRequest,
        body: &B,
    ) -> Result<R, QcloudError>
    where
        B: Serialize,
        P: DeserializeOwned,
        R: From<P>,
    {
        let payload = serde_json::to_value(body).map_err(QcloudError::Encode)?;
        let raw = self.dispatch(signed, &payload).await?;

        let decoded: Decoded<P> = transport::decode_envelope(&raw)
            .map_err(|err| QcloudError::Parse(Box::new(err)))?;

        if !decoded.result.is_success() {
            tracing::warn!(
                operation = operation.name(),
                code = decoded.result.as_i32(),
                message = %decoded.message,
                "platform rejected request"
            );
            return Err(QcloudError::Api {
                code: decoded.result,
                message: decoded.message,
            });
        }

        Ok(R::from(decoded.payload))
    }

    async fn dispatch(
        &self,
        signed: &SignedRequest,
        payload: &serde_json::Value,
    ) -> Result<String, QcloudError> {

        let response = self
            .http
            .post_json(&signed.url, payload)
            .await
            .map_err(QcloudError::Transport)?;

        if response.status != 200 {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(QcloudError::HttpStatus {
                status: response.status,
                body,
            });
        }

        if self.debug {
            tracing::debug!(
                url = %signed.url,
                payload = %payload,
                response = %response.body,
                "request completed"
            );
        }

        Ok(response.body)
    }
}
