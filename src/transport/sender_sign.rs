use serde::{Deserialize, Serialize};

use crate::domain::{
    ReviewStatus, SenderSign, SenderSignDraft, SenderSignId, SenderSignListResponse,
    SenderSignResponse,
};
use crate::signing::SignedRequest;
use crate::transport::envelope::{lenient, lenient_list};

/// `add_sign` / `mod_sign` body. `sign_id` is only present when modifying.
#[derive(Debug, Serialize)]
pub struct SenderSignDraftBody<'a> {
    sig: &'a str,
    time: u64,
    remark: &'a str,
    international: u32,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pic: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sign_id: Option<u32>,
}

pub fn encode_sender_sign_draft_body<'a>(
    id: Option<SenderSignId>,
    draft: &'a SenderSignDraft,
    signed: &'a SignedRequest,
) -> SenderSignDraftBody<'a> {
    SenderSignDraftBody {
        sig: signed.sig.as_str(),
        time: signed.time.value(),
        remark: &draft.remark,
        international: u32::from(draft.international),
        text: draft.text.as_str(),
        pic: draft.pic.as_deref().filter(|pic| !pic.is_empty()),
        sign_id: id.map(SenderSignId::value),
    }
}

#[derive(Debug, Serialize)]
pub struct SenderSignIdsBody<'a> {
    sig: &'a str,
    time: u64,
    sign_id: Vec<u32>,
}

pub fn encode_sender_sign_ids_body<'a>(
    ids: &[SenderSignId],
    signed: &'a SignedRequest,
) -> SenderSignIdsBody<'a> {
    SenderSignIdsBody {
        sig: signed.sig.as_str(),
        time: signed.time.value(),
        sign_id: ids.iter().map(|id| id.value()).collect(),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SenderSignItem {
    #[serde(deserialize_with = "lenient")]
    id: u32,
    #[serde(deserialize_with = "lenient")]
    text: String,
    #[serde(deserialize_with = "lenient")]
    international: u32,
    #[serde(deserialize_with = "lenient")]
    status: u32,
    #[serde(deserialize_with = "lenient")]
    reply: String,
    #[serde(deserialize_with = "lenient")]
    apply_time: String,
}

impl From<SenderSignItem> for SenderSign {
    fn from(value: SenderSignItem) -> Self {
        Self {
            id: SenderSignId::new(value.id),
            text: value.text,
            international: value.international != 0,
            status: ReviewStatus::from_code(value.status),
            reply: value.reply,
            apply_time: value.apply_time,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SenderSignPayload {
    #[serde(deserialize_with = "lenient")]
    data: Option<SenderSignItem>,
}

impl From<SenderSignPayload> for SenderSignResponse {
    fn from(value: SenderSignPayload) -> Self {
        Self {
            sign: value.data.map(SenderSign::from),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SenderSignListPayload {
    #[serde(deserialize_with = "lenient")]
    count: u32,
    #[serde(deserialize_with = "lenient_list")]
    data: Vec<SenderSignItem>,
}

impl From<SenderSignListPayload> for SenderSignListResponse {
    fn from(value: SenderSignListPayload) -> Self {
        Self {
            count: value.count,
            signs: value.data.into_iter().map(SenderSign::from).collect(),
        }
    }
}
