use serde::{Deserialize, Serialize};

use crate::domain::{
    ReviewStatus, Template, TemplateDraft, TemplateId, TemplateListResponse, TemplatePage,
    TemplateResponse,
};
use crate::signing::SignedRequest;
use crate::transport::envelope::{lenient, lenient_list};

/// `add_template` / `mod_template` body. `tpl_id` is only present when modifying.
#[derive(Debug, Serialize)]
pub struct TemplateDraftBody<'a> {
    sig: &'a str,
    time: u64,
    title: &'a str,
    remark: &'a str,
    international: u32,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    tpl_id: Option<u32>,
    #[serde(rename = "type")]
    kind: u32,
}

pub fn encode_template_draft_body<'a>(
    id: Option<TemplateId>,
    draft: &'a TemplateDraft,
    signed: &'a SignedRequest,
) -> TemplateDraftBody<'a> {
    TemplateDraftBody {
        sig: signed.sig.as_str(),
        time: signed.time.value(),
        title: &draft.title,
        remark: &draft.remark,
        international: u32::from(draft.international),
        text: draft.text.as_str(),
        tpl_id: id.map(TemplateId::value),
        kind: draft.kind.code(),
    }
}

#[derive(Debug, Serialize)]
pub struct TemplateIdsBody<'a> {
    sig: &'a str,
    time: u64,
    tpl_id: Vec<u32>,
}

pub fn encode_template_ids_body<'a>(
    ids: &[TemplateId],
    signed: &'a SignedRequest,
) -> TemplateIdsBody<'a> {
    TemplateIdsBody {
        sig: signed.sig.as_str(),
        time: signed.time.value(),
        tpl_id: ids.iter().map(|id| id.value()).collect(),
    }
}

/// `get_template` body. The platform expects `tpl_page` even for lookups by id.
#[derive(Debug, Serialize)]
pub struct TemplateQueryBody<'a> {
    sig: &'a str,
    time: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tpl_id: Vec<u32>,
    tpl_page: TemplatePageBody,
}

#[derive(Debug, Serialize)]
struct TemplatePageBody {
    offset: u32,
    max: u32,
}

pub fn encode_template_query_by_id_body<'a>(
    ids: &[TemplateId],
    signed: &'a SignedRequest,
) -> TemplateQueryBody<'a> {
    TemplateQueryBody {
        sig: signed.sig.as_str(),
        time: signed.time.value(),
        tpl_id: ids.iter().map(|id| id.value()).collect(),
        tpl_page: TemplatePageBody { offset: 0, max: 0 },
    }
}

pub fn encode_template_query_by_page_body(
    page: TemplatePage,
    signed: &SignedRequest,
) -> TemplateQueryBody<'_> {
    TemplateQueryBody {
        sig: signed.sig.as_str(),
        time: signed.time.value(),
        tpl_id: Vec::new(),
        tpl_page: TemplatePageBody {
            offset: page.offset,
            max: page.max,
        },
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TemplateItem {
    #[serde(deserialize_with = "lenient")]
    id: u32,
    #[serde(deserialize_with = "lenient")]
    text: String,
    #[serde(deserialize_with = "lenient")]
    status: u32,
    #[serde(deserialize_with = "lenient")]
    reply: String,
    #[serde(rename = "type", deserialize_with = "lenient")]
    kind: u32,
    #[serde(deserialize_with = "lenient")]
    international: u32,
    #[serde(deserialize_with = "lenient")]
    apply_time: String,
}

impl From<TemplateItem> for Template {
    fn from(value: TemplateItem) -> Self {
        Self {
            id: TemplateId::new(value.id),
            text: value.text,
            status: ReviewStatus::from_code(value.status),
            reply: value.reply,
            kind: value.kind,
            international: value.international != 0,
            apply_time: value.apply_time,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TemplatePayload {
    #[serde(deserialize_with = "lenient")]
    data: Option<TemplateItem>,
}

impl From<TemplatePayload> for TemplateResponse {
    fn from(value: TemplatePayload) -> Self {
        Self {
            template: value.data.map(Template::from),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TemplateListPayload {
    #[serde(deserialize_with = "lenient")]
    total: u32,
    #[serde(deserialize_with = "lenient")]
    count: u32,
    #[serde(deserialize_with = "lenient_list")]
    data: Vec<TemplateItem>,
}

impl From<TemplateListPayload> for TemplateListResponse {
    fn from(value: TemplateListPayload) -> Self {
        Self {
            total: value.total,
            count: value.count,
            templates: value.data.into_iter().map(Template::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{MessageText, Nonce, Operation, SmsKind, UnixTimestamp};
    use crate::signing::{BaseUrl, CallContext, Credentials, DEFAULT_BASE_URL, MobileScope};
    use crate::transport::envelope::decode_envelope;

    fn signed() -> SignedRequest {
        let credentials = Credentials::new("1", "k").unwrap();
        let ctx = CallContext::new(Nonce::new("1234").unwrap(), UnixTimestamp::new(100));
        SignedRequest::prepare(
            &credentials,
            &BaseUrl::parse(DEFAULT_BASE_URL).unwrap(),
            &ctx,
            Operation::AddTemplate,
            &MobileScope::none(),
        )
    }

    fn draft() -> TemplateDraft {
        TemplateDraft {
            title: "login".to_owned(),
            remark: "otp".to_owned(),
            international: false,
            text: MessageText::new("your code is {1}").unwrap(),
            kind: SmsKind::Normal,
        }
    }

    #[test]
    fn add_template_body_omits_tpl_id() {
        let signed = signed();
        let draft = draft();
        let body = serde_json::to_value(encode_template_draft_body(None, &draft, &signed)).unwrap();
        assert_eq!(
            body,
            json!({
                "sig": signed.sig.as_str(),
                "time": 100,
                "title": "login",
                "remark": "otp",
                "international": 0,
                "text": "your code is {1}",
                "type": 0
            })
        );
    }

    #[test]
    fn modify_template_body_carries_tpl_id() {
        let signed = signed();
        let mut draft = draft();
        draft.international = true;
        draft.kind = SmsKind::Marketing;
        let body = serde_json::to_value(encode_template_draft_body(
            Some(TemplateId::new(180101)),
            &draft,
            &signed,
        ))
        .unwrap();
        assert_eq!(body["tpl_id"], json!(180101));
        assert_eq!(body["international"], json!(1));
        assert_eq!(body["type"], json!(1));
    }

    #[test]
    fn query_bodies_always_carry_page() {
        let signed = signed();
        let by_id = serde_json::to_value(encode_template_query_by_id_body(
            &[TemplateId::new(1), TemplateId::new(2)],
            &signed,
        ))
        .unwrap();
        assert_eq!(by_id["tpl_id"], json!([1, 2]));
        assert_eq!(by_id["tpl_page"], json!({"offset": 0, "max": 0}));

        let by_page = serde_json::to_value(encode_template_query_by_page_body(
            TemplatePage {
                offset: 10,
                max: 20,
            },
            &signed,
        ))
        .unwrap();
        assert!(by_page.get("tpl_id").is_none());
        assert_eq!(by_page["tpl_page"], json!({"offset": 10, "max": 20}));
    }

    #[test]
    fn delete_body_lists_ids() {
        let signed = signed();
        let body =
            serde_json::to_value(encode_template_ids_body(&[TemplateId::new(7)], &signed))
                .unwrap();
        assert_eq!(body["tpl_id"], json!([7]));
    }

    #[test]
    fn decode_template_list() {
        let json = r#"
        {
          "result": 0,
          "msg": "",
          "total": 2,
          "count": 1,
          "data": [
            {"id": 123, "text": "code {1}", "status": 2, "reply": "too vague",
             "type": 0, "international": 1, "apply_time": "2024-01-01 10:00:00"}
          ]
        }
        "#;
        let decoded = decode_envelope::<TemplateListPayload>(json).unwrap();
        let response = TemplateListResponse::from(decoded.payload);
        assert_eq!(response.total, 2);
        assert_eq!(response.count, 1);
        let template = &response.templates[0];
        assert_eq!(template.id, TemplateId::new(123));
        assert_eq!(template.status, ReviewStatus::Rejected);
        assert_eq!(template.reply, "too vague");
        assert!(template.international);
    }

    #[test]
    fn decode_template_without_data() {
        let decoded = decode_envelope::<TemplatePayload>(r#"{"result":0,"msg":""}"#).unwrap();
        assert_eq!(TemplateResponse::from(decoded.payload).template, None);
    }
}
