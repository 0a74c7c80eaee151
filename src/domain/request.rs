use crate::domain::validation::ValidationError;
use crate::domain::value::{
    DateHour, MessageText, PullLimit, SenderSignId, SignName, Tel, TemplateId, UnixTimestamp,
};

/// Hard platform cap on recipients of one `sendmultisms2` call.
pub const SEND_MULTI_SMS_MAX_RECIPIENTS: usize = 200;

/// Message category (`type`): ordinary notifications or marketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmsKind {
    #[default]
    Normal,
    Marketing,
}

impl SmsKind {
    pub fn code(self) -> u32 {
        match self {
            Self::Normal => 0,
            Self::Marketing => 1,
        }
    }
}

/// What a message carries: literal text or a template reference with positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmsContent {
    Text {
        msg: MessageText,
        kind: SmsKind,
    },
    Template {
        tpl_id: TemplateId,
        params: Vec<String>,
        /// Falls back to the client's configured sign when `None`.
        sign: Option<SignName>,
    },
}

impl SmsContent {
    pub fn text(msg: MessageText) -> Self {
        Self::Text {
            msg,
            kind: SmsKind::Normal,
        }
    }

    pub fn marketing(msg: MessageText) -> Self {
        Self::Text {
            msg,
            kind: SmsKind::Marketing,
        }
    }

    pub fn template(tpl_id: TemplateId, params: Vec<String>) -> Self {
        Self::Template {
            tpl_id,
            params,
            sign: None,
        }
    }

    /// Pin the sender sign of a template message. Text messages are left untouched.
    pub fn with_sign(mut self, value: SignName) -> Self {
        if let Self::Template { sign, .. } = &mut self {
            *sign = Some(value);
        }
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendOptions {
    /// Extension code (`extend`), echoed in reply reports.
    pub extend: String,
    /// Opaque user data (`ext`), echoed in the response.
    pub ext: String,
}

/// Single-recipient SMS (`sendsms`).
#[derive(Debug, Clone)]
pub struct SendSms {
    pub tel: Tel,
    pub content: SmsContent,
    pub options: SendOptions,
}

impl SendSms {
    pub fn new(tel: Tel, content: SmsContent) -> Self {
        Self {
            tel,
            content,
            options: SendOptions::default(),
        }
    }

    pub fn with_options(mut self, options: SendOptions) -> Self {
        self.options = options;
        self
    }
}

/// Same content to many recipients (`sendmultisms2`).
#[derive(Debug, Clone)]
pub struct SendMultiSms {
    tels: Vec<Tel>,
    content: SmsContent,
    options: SendOptions,
}

impl SendMultiSms {
    /// Recipients keep the given order; it is part of the request signature.
    pub fn new(
        tels: Vec<Tel>,
        content: SmsContent,
        options: SendOptions,
    ) -> Result<Self, ValidationError> {
        if tels.is_empty() {
            return Err(ValidationError::Empty { field: Tel::FIELD });
        }
        if tels.len() > SEND_MULTI_SMS_MAX_RECIPIENTS {
            return Err(ValidationError::TooManyRecipients {
                max: SEND_MULTI_SMS_MAX_RECIPIENTS,
                actual: tels.len(),
            });
        }
        Ok(Self {
            tels,
            content,
            options,
        })
    }

    pub fn tels(&self) -> &[Tel] {
        &self.tels
    }

    pub fn content(&self) -> &SmsContent {
        &self.content
    }

    pub fn options(&self) -> &SendOptions {
        &self.options
    }
}

/// Voice payload: a spoken verification code or a notification prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceMessage {
    /// Verification code read out to the callee (`msg`, digits only on the platform side).
    Code(MessageText),
    /// Notification text (`promptfile`).
    Prompt(MessageText),
}

/// Voice call (`sendvoice` / `sendvoiceprompt`).
#[derive(Debug, Clone)]
pub struct SendVoice {
    pub tel: Tel,
    pub message: VoiceMessage,
    /// How many times the message is played.
    pub playtimes: u32,
    pub ext: String,
}

impl SendVoice {
    pub const DEFAULT_PLAYTIMES: u32 = 2;

    pub fn code(tel: Tel, code: MessageText) -> Self {
        Self {
            tel,
            message: VoiceMessage::Code(code),
            playtimes: Self::DEFAULT_PLAYTIMES,
            ext: String::new(),
        }
    }

    pub fn prompt(tel: Tel, text: MessageText) -> Self {
        Self {
            tel,
            message: VoiceMessage::Prompt(text),
            playtimes: Self::DEFAULT_PLAYTIMES,
            ext: String::new(),
        }
    }

    /// Wire `prompttype`: `2` for notifications, `0` (omitted) for verification codes.
    pub fn prompt_type(&self) -> u32 {
        match self.message {
            VoiceMessage::Prompt(_) => crate::domain::Operation::VOICE_PROMPT_TYPE,
            VoiceMessage::Code(_) => 0,
        }
    }
}

/// Content of a template being created or modified.
#[derive(Debug, Clone)]
pub struct TemplateDraft {
    pub title: String,
    pub remark: String,
    pub international: bool,
    /// Template body with `{1}`, `{2}`, ... placeholders.
    pub text: MessageText,
    pub kind: SmsKind,
}

impl TemplateDraft {
    pub fn new(text: MessageText) -> Self {
        Self {
            title: String::new(),
            remark: String::new(),
            international: false,
            text,
            kind: SmsKind::Normal,
        }
    }
}

/// Window of a paged template listing (`tpl_page`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TemplatePage {
    pub offset: u32,
    pub max: u32,
}

/// Content of a sender sign being created or modified.
#[derive(Debug, Clone)]
pub struct SenderSignDraft {
    pub text: SignName,
    pub remark: String,
    pub international: bool,
    /// Base64-encoded supporting document image (`pic`).
    pub pic: Option<String>,
}

impl SenderSignDraft {
    pub fn new(text: SignName) -> Self {
        Self {
            text,
            remark: String::new(),
            international: false,
            pic: None,
        }
    }
}

/// Which report stream a pull call reads (`type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PullKind {
    Delivery,
    Reply,
}

impl PullKind {
    pub fn code(self) -> u32 {
        match self {
            Self::Delivery => 0,
            Self::Reply => 1,
        }
    }
}

/// Reports for one phone over a time window (`pullstatus4mobile`).
#[derive(Debug, Clone)]
pub struct MobileStatusQuery {
    tel: Tel,
    begin: UnixTimestamp,
    end: UnixTimestamp,
    limit: PullLimit,
}

impl MobileStatusQuery {
    pub fn new(
        tel: Tel,
        begin: UnixTimestamp,
        end: UnixTimestamp,
        limit: PullLimit,
    ) -> Result<Self, ValidationError> {
        if begin > end {
            return Err(ValidationError::InvertedRange {
                field: "begin_time",
                begin: begin.value(),
                end: end.value(),
            });
        }
        Ok(Self {
            tel,
            begin,
            end,
            limit,
        })
    }

    pub fn tel(&self) -> &Tel {
        &self.tel
    }

    pub fn begin(&self) -> UnixTimestamp {
        self.begin
    }

    pub fn end(&self) -> UnixTimestamp {
        self.end
    }

    pub fn limit(&self) -> PullLimit {
        self.limit
    }
}

/// Hour range for the statistics calls (`begin_date` / `end_date`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatisticsRange {
    begin: DateHour,
    end: DateHour,
}

impl StatisticsRange {
    pub fn new(begin: DateHour, end: DateHour) -> Result<Self, ValidationError> {
        if begin > end {
            return Err(ValidationError::InvertedRange {
                field: "begin_date",
                begin: u64::from(begin.value()),
                end: u64::from(end.value()),
            });
        }
        Ok(Self { begin, end })
    }

    pub fn begin(self) -> DateHour {
        self.begin
    }

    pub fn end(self) -> DateHour {
        self.end
    }
}

pub(crate) fn require_template_ids(ids: Vec<TemplateId>) -> Result<Vec<TemplateId>, ValidationError> {
    if ids.is_empty() {
        return Err(ValidationError::Empty {
            field: TemplateId::FIELD,
        });
    }
    Ok(ids)
}

pub(crate) fn require_sign_ids(ids: Vec<SenderSignId>) -> Result<Vec<SenderSignId>, ValidationError> {
    if ids.is_empty() {
        return Err(ValidationError::Empty {
            field: SenderSignId::FIELD,
        });
    }
    Ok(ids)
}
