use serde::{Deserialize, Serialize};

use crate::domain::{
    RecipientResult, ResultCode, SendMultiSms, SendMultiSmsResponse, SendOptions, SendSms,
    SendSmsResponse, SignName, SmsContent, SmsKind,
};
use crate::signing::SignedRequest;
use crate::transport::envelope::{TelBody, lenient, lenient_list, non_empty};

/// `sendsms` / `sendmultisms2` body; `T` is one `tel` object or an array of them.
#[derive(Debug, Serialize)]
pub struct SmsBody<'a, T> {
    tel: T,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sign: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tpl_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    msg: Option<&'a str>,
    sig: &'a str,
    time: u64,
    extend: &'a str,
    ext: &'a str,
}

pub fn encode_send_sms_body<'a>(
    request: &'a SendSms,
    default_sign: Option<&'a SignName>,
    signed: &'a SignedRequest,
) -> SmsBody<'a, TelBody<'a>> {
    sms_body(
        TelBody::from(&request.tel),
        &request.content,
        &request.options,
        default_sign,
        signed,
    )
}

pub fn encode_send_multi_sms_body<'a>(
    request: &'a SendMultiSms,
    default_sign: Option<&'a SignName>,
    signed: &'a SignedRequest,
) -> SmsBody<'a, Vec<TelBody<'a>>> {
    sms_body(
        request.tels().iter().map(TelBody::from).collect(),
        request.content(),
        request.options(),
        default_sign,
        signed,
    )
}

fn sms_body<'a, T>(
    tel: T,
    content: &'a SmsContent,
    options: &'a SendOptions,
    default_sign: Option<&'a SignName>,
    signed: &'a SignedRequest,
) -> SmsBody<'a, T> {
    let mut body = SmsBody {
        tel,
        kind: None,
        sign: None,
        tpl_id: None,
        params: None,
        msg: None,
        sig: signed.sig.as_str(),
        time: signed.time.value(),
        extend: &options.extend,
        ext: &options.ext,
    };

    match content {
        SmsContent::Text { msg, kind } => {
            // `type` is omitted for ordinary messages.
            body.kind = (*kind != SmsKind::Normal).then(|| kind.code());
            body.msg = Some(msg.as_str());
        }
        SmsContent::Template {
            tpl_id,
            params,
            sign,
        } => {
            body.sign = sign.as_ref().or(default_sign).map(SignName::as_str);
            body.tpl_id = Some(tpl_id.value());
            body.params = (!params.is_empty()).then_some(params.as_slice());
        }
    }

    body
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SendSmsPayload {
    #[serde(deserialize_with = "lenient")]
    ext: String,
    #[serde(deserialize_with = "lenient")]
    sid: Option<String>,
    #[serde(deserialize_with = "lenient")]
    fee: Option<u32>,
}

impl From<SendSmsPayload> for SendSmsResponse {
    fn from(value: SendSmsPayload) -> Self {
        Self {
            ext: value.ext,
            sid: non_empty(value.sid),
            fee: value.fee,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SendMultiSmsPayload {
    #[serde(deserialize_with = "lenient")]
    ext: String,
    #[serde(deserialize_with = "lenient_list")]
    detail: Vec<RecipientPayload>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RecipientPayload {
    #[serde(deserialize_with = "lenient")]
    result: Option<i32>,
    #[serde(deserialize_with = "lenient")]
    errmsg: String,
    #[serde(deserialize_with = "lenient")]
    mobile: String,
    #[serde(deserialize_with = "lenient")]
    nationcode: String,
    #[serde(deserialize_with = "lenient")]
    sid: Option<String>,
    #[serde(deserialize_with = "lenient")]
    fee: Option<u32>,
}

impl From<SendMultiSmsPayload> for SendMultiSmsResponse {
    fn from(value: SendMultiSmsPayload) -> Self {
        Self {
            ext: value.ext,
            detail: value
                .detail
                .into_iter()
                .map(|item| RecipientResult {
                    result: item.result.map(ResultCode::new),
                    errmsg: item.errmsg,
                    nationcode: item.nationcode,
                    mobile: item.mobile,
                    sid: non_empty(item.sid),
                    fee: item.fee,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{MessageText, Nonce, Operation, Tel, TemplateId, UnixTimestamp};
    use crate::signing::{BaseUrl, CallContext, Credentials, DEFAULT_BASE_URL, MobileScope};
    use crate::transport::envelope::decode_envelope;

    fn signed() -> SignedRequest {
        let credentials = Credentials::new("1", "k").unwrap();
        let ctx = CallContext::new(Nonce::new("1234").unwrap(), UnixTimestamp::new(100));
        SignedRequest::prepare(
            &credentials,
            &BaseUrl::parse(DEFAULT_BASE_URL).unwrap(),
            &ctx,
            Operation::SendSms,
            &MobileScope::none(),
        )
    }

    #[test]
    fn text_body_omits_template_fields_and_normal_type() {
        let signed = signed();
        let request = SendSms::new(
            Tel::china("13800000000").unwrap(),
            SmsContent::text(MessageText::new("hello").unwrap()),
        );
        let body = serde_json::to_value(encode_send_sms_body(&request, None, &signed)).unwrap();
        assert_eq!(
            body,
            json!({
                "tel": {"nationcode": "86", "mobile": "13800000000"},
                "msg": "hello",
                "sig": signed.sig.as_str(),
                "time": 100,
                "extend": "",
                "ext": ""
            })
        );
    }

    #[test]
    fn marketing_text_sets_type() {
        let signed = signed();
        let request = SendSms::new(
            Tel::china("13800000000").unwrap(),
            SmsContent::marketing(MessageText::new("sale").unwrap()),
        );
        let body = serde_json::to_value(encode_send_sms_body(&request, None, &signed)).unwrap();
        assert_eq!(body["type"], json!(1));
    }

    #[test]
    fn template_body_uses_default_sign_unless_pinned() {
        let signed = signed();
        let default_sign = SignName::new("Default").unwrap();
        let request = SendSms::new(
            Tel::china("13800000000").unwrap(),
            SmsContent::template(TemplateId::new(42), vec!["1234".to_owned(), "5".to_owned()]),
        )
        .with_options(SendOptions {
            extend: "01".to_owned(),
            ext: "order-9".to_owned(),
        });

        let body = serde_json::to_value(encode_send_sms_body(
            &request,
            Some(&default_sign),
            &signed,
        ))
        .unwrap();
        assert_eq!(
            body,
            json!({
                "tel": {"nationcode": "86", "mobile": "13800000000"},
                "sign": "Default",
                "tpl_id": 42,
                "params": ["1234", "5"],
                "sig": signed.sig.as_str(),
                "time": 100,
                "extend": "01",
                "ext": "order-9"
            })
        );

        let pinned = SendSms::new(
            Tel::china("13800000000").unwrap(),
            SmsContent::template(TemplateId::new(42), Vec::new())
                .with_sign(SignName::new("Pinned").unwrap()),
        );
        let body = serde_json::to_value(encode_send_sms_body(
            &pinned,
            Some(&default_sign),
            &signed,
        ))
        .unwrap();
        assert_eq!(body["sign"], json!("Pinned"));
        assert!(body.get("params").is_none());
    }

    #[test]
    fn multi_body_lists_tels_in_order() {
        let signed = signed();
        let request = SendMultiSms::new(
            vec![
                Tel::china("13800000002").unwrap(),
                Tel::china("13800000001").unwrap(),
            ],
            SmsContent::text(MessageText::new("hi").unwrap()),
            SendOptions::default(),
        )
        .unwrap();
        let body =
            serde_json::to_value(encode_send_multi_sms_body(&request, None, &signed)).unwrap();
        assert_eq!(
            body["tel"],
            json!([
                {"nationcode": "86", "mobile": "13800000002"},
                {"nationcode": "86", "mobile": "13800000001"}
            ])
        );
    }

    #[test]
    fn decode_send_sms_response() {
        let decoded = decode_envelope::<SendSmsPayload>(
            r#"{"result":0,"errmsg":"OK","ext":"","sid":"xxxxxxx","fee":1}"#,
        )
        .unwrap();
        let response = SendSmsResponse::from(decoded.payload);
        assert_eq!(response.sid.as_deref(), Some("xxxxxxx"));
        assert_eq!(response.fee, Some(1));
    }

    #[test]
    fn decode_multi_response_details() {
        let json = r#"
        {
          "result": 0,
          "errmsg": "OK",
          "ext": "",
          "detail": [
            {"result": 0, "errmsg": "OK", "mobile": "13800000001", "nationcode": "86", "sid": "a", "fee": 1},
            {"result": 1016, "errmsg": "mobile format error", "mobile": "1", "nationcode": "86"}
          ]
        }
        "#;
        let decoded = decode_envelope::<SendMultiSmsPayload>(json).unwrap();
        let response = SendMultiSmsResponse::from(decoded.payload);
        assert_eq!(response.detail.len(), 2);
        assert!(response.detail[0].is_success());
        assert_eq!(response.detail[0].sid.as_deref(), Some("a"));
        assert!(!response.detail[1].is_success());
        assert_eq!(response.detail[1].result, Some(ResultCode::new(1016)));
        assert_eq!(response.detail[1].sid, None);
    }

    #[test]
    fn detail_without_usable_result_is_not_success() {
        let json = r#"
        {
          "result": 0,
          "errmsg": "OK",
          "msg": "",
          "detail": [
            {"mobile": "13800000001", "errmsg": "bad"},
            {"result": "0", "mobile": "13800000002"},
            "garbage",
            {"result": 0, "mobile": "13800000003", "sid": "c"}
          ]
        }
        "#;
        let decoded = decode_envelope::<SendMultiSmsPayload>(json).unwrap();
        assert_eq!(decoded.message, "OK");
        let response = SendMultiSmsResponse::from(decoded.payload);
        assert_eq!(response.detail.len(), 3);
        assert_eq!(response.detail[0].result, None);
        assert!(!response.detail[0].is_success());
        assert_eq!(response.detail[0].errmsg, "bad");
        assert!(!response.detail[1].is_success());
        assert!(response.detail[2].is_success());
        assert_eq!(response.detail[2].mobile, "13800000003");
    }
}
