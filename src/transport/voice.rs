use serde::{Deserialize, Serialize};

use crate::domain::{SendVoice, SendVoiceResponse, VoiceMessage};
use crate::signing::SignedRequest;
use crate::transport::envelope::{TelBody, lenient};

#[derive(Debug, Serialize)]
pub struct VoiceBody<'a> {
    tel: TelBody<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prompttype: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    promptfile: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    msg: Option<&'a str>,
    playtimes: u32,
    sig: &'a str,
    time: u64,
    ext: &'a str,
}

pub fn encode_send_voice_body<'a>(
    request: &'a SendVoice,
    signed: &'a SignedRequest,
) -> VoiceBody<'a> {
    let prompt_type = request.prompt_type();
    let (promptfile, msg) = match &request.message {
        VoiceMessage::Prompt(text) => (Some(text.as_str()), None),
        VoiceMessage::Code(code) => (None, Some(code.as_str())),
    };

    VoiceBody {
        tel: TelBody::from(&request.tel),
        prompttype: (prompt_type != 0).then_some(prompt_type),
        promptfile,
        msg,
        playtimes: request.playtimes,
        sig: signed.sig.as_str(),
        time: signed.time.value(),
        ext: &request.ext,
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SendVoicePayload {
    #[serde(deserialize_with = "lenient")]
    ext: String,
    #[serde(deserialize_with = "lenient")]
    callid: String,
}

impl From<SendVoicePayload> for SendVoiceResponse {
    fn from(value: SendVoicePayload) -> Self {
        Self {
            ext: value.ext,
            callid: value.callid,
        }
    }
}
