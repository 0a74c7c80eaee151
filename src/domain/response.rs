use crate::domain::value::{ResultCode, SenderSignId, TemplateId, UnixTimestamp};

/// Review state of a template or sender sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReviewStatus {
    Approved,
    Pending,
    Rejected,
    Unknown(u32),
}

impl ReviewStatus {
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => Self::Approved,
            1 => Self::Pending,
            2 => Self::Rejected,
            other => Self::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendSmsResponse {
    pub ext: String,
    pub sid: Option<String>,
    pub fee: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendMultiSmsResponse {
    pub ext: String,
    pub detail: Vec<RecipientResult>,
}

/// Per-recipient outcome of a multi-recipient send. A successful call may still contain
/// failed entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipientResult {
    /// `None` when the entry carried no usable `result`.
    pub result: Option<ResultCode>,
    pub errmsg: String,
    pub nationcode: String,
    pub mobile: String,
    pub sid: Option<String>,
    pub fee: Option<u32>,
}

impl RecipientResult {
    pub fn is_success(&self) -> bool {
        self.result.is_some_and(ResultCode::is_success)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendVoiceResponse {
    pub ext: String,
    pub callid: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub id: TemplateId,
    pub text: String,
    pub status: ReviewStatus,
    /// Reviewer comment, set on rejection.
    pub reply: String,
    pub kind: u32,
    pub international: bool,
    pub apply_time: String,
}

/// Result of adding, modifying or deleting a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateResponse {
    pub template: Option<Template>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateListResponse {
    pub total: u32,
    pub count: u32,
    pub templates: Vec<Template>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderSign {
    pub id: SenderSignId,
    pub text: String,
    pub international: bool,
    pub status: ReviewStatus,
    pub reply: String,
    pub apply_time: String,
}

/// Result of adding, modifying or deleting a sender sign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderSignResponse {
    pub sign: Option<SenderSign>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SenderSignListResponse {
    pub count: u32,
    pub signs: Vec<SenderSign>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub user_receive_time: String,
    pub nationcode: String,
    pub mobile: String,
    /// `SUCCESS` or `FAIL`.
    pub report_status: String,
    pub errmsg: String,
    pub description: String,
    pub sid: String,
}

impl DeliveryReport {
    pub fn is_delivered(&self) -> bool {
        self.report_status.eq_ignore_ascii_case("SUCCESS")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryStatusResponse {
    pub count: u32,
    pub reports: Vec<DeliveryReport>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub nationcode: String,
    pub mobile: String,
    pub text: String,
    pub sign: String,
    pub time: UnixTimestamp,
    pub extend: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyResponse {
    pub count: u32,
    pub replies: Vec<Reply>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SendStatistics {
    pub request: u64,
    pub success: u64,
    pub bill_number: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallbackStatistics {
    /// Messages accepted for delivery.
    pub success: u64,
    /// Delivery receipts received.
    pub status: u64,
    pub status_success: u64,
    pub status_fail: u64,
    pub fail_operator_error: u64,
    pub fail_invalid_number: u64,
    pub fail_unreachable: u64,
    pub fail_blacklisted: u64,
    pub fail_operator_rate_limit: u64,
}
