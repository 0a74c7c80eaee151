/// Service family an operation is served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    /// `tlssmssvr`: messaging, templates, signs, status and statistics.
    Sms,
    /// `tlsvoicesvr`: voice verification codes and voice notifications.
    Voice,
}

impl Service {
    pub fn path(self) -> &'static str {
        match self {
            Self::Sms => "tlssmssvr",
            Self::Voice => "tlsvoicesvr",
        }
    }
}

/// Remote operation, one per API path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SendSms,
    SendMultiSms,
    SendVoice,
    SendVoicePrompt,
    AddTemplate,
    GetTemplate,
    DeleteTemplate,
    ModifyTemplate,
    AddSign,
    GetSign,
    ModifySign,
    DeleteSign,
    PullStatus,
    PullStatusForMobile,
    PullSendStatus,
    PullCallbackStatus,
}

impl Operation {
    /// `prompttype` value that selects the voice notification API.
    pub const VOICE_PROMPT_TYPE: u32 = 2;

    pub const ALL: [Self; 16] = [
        Self::SendSms,
        Self::SendMultiSms,
        Self::SendVoice,
        Self::SendVoicePrompt,
        Self::AddTemplate,
        Self::GetTemplate,
        Self::DeleteTemplate,
        Self::ModifyTemplate,
        Self::AddSign,
        Self::GetSign,
        Self::ModifySign,
        Self::DeleteSign,
        Self::PullStatus,
        Self::PullStatusForMobile,
        Self::PullSendStatus,
        Self::PullCallbackStatus,
    ];

    /// Last path segment of the operation URL.
    pub fn name(self) -> &'static str {
        match self {
            Self::SendSms => "sendsms",
            Self::SendMultiSms => "sendmultisms2",
            Self::SendVoice => "sendvoice",
            Self::SendVoicePrompt => "sendvoiceprompt",
            Self::AddTemplate => "add_template",
            Self::GetTemplate => "get_template",
            Self::DeleteTemplate => "del_template",
            Self::ModifyTemplate => "mod_template",
            Self::AddSign => "add_sign",
            Self::GetSign => "get_sign",
            Self::ModifySign => "mod_sign",
            Self::DeleteSign => "del_sign",
            Self::PullStatus => "pullstatus",
            Self::PullStatusForMobile => "pullstatus4mobile",
            Self::PullSendStatus => "pullsendstatus",
            Self::PullCallbackStatus => "pullcallbackstatus",
        }
    }

    pub fn service(self) -> Service {
        match self {
            Self::SendVoice | Self::SendVoicePrompt => Service::Voice,
            _ => Service::Sms,
        }
    }

    /// Voice API for a given `prompttype`: notification for `2`, verification code otherwise.
    pub fn for_voice_prompt_type(prompt_type: u32) -> Self {
        if prompt_type == Self::VOICE_PROMPT_TYPE {
            Self::SendVoicePrompt
        } else {
            Self::SendVoice
        }
    }
}
