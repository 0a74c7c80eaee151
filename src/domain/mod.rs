//! Domain layer: strong types with validation and invariants (no I/O).

mod operation;
mod request;
mod response;
mod validation;
mod value;

pub use operation::{Operation, Service};
pub(crate) use request::{require_sign_ids, require_template_ids};
pub use request::{
    MobileStatusQuery, PullKind, SEND_MULTI_SMS_MAX_RECIPIENTS, SendMultiSms, SendOptions,
    SendSms, SendVoice, SenderSignDraft, SmsContent, SmsKind, StatisticsRange, TemplateDraft,
    TemplatePage, VoiceMessage,
};
pub use response::{
    CallbackStatistics, DeliveryReport, DeliveryStatusResponse, RecipientResult, Reply,
    ReplyResponse, ReviewStatus, SendMultiSmsResponse, SendSmsResponse, SendStatistics,
    SendVoiceResponse, SenderSign, SenderSignListResponse, SenderSignResponse, Template,
    TemplateListResponse, TemplateResponse,
};
pub use validation::ValidationError;
pub use value::{
    AppId, AppKey, DateHour, FailureKind, KnownResultCode, MessageText, Mobile, NationCode,
    Nonce, PullLimit, ResultCode, SenderSignId, SignName, Tel, TemplateId, UnixTimestamp,
};
