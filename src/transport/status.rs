use serde::{Deserialize, Serialize};

use crate::domain::{
    CallbackStatistics, DeliveryReport, DeliveryStatusResponse, MobileStatusQuery, PullKind,
    PullLimit, Reply, ReplyResponse, SendStatistics, StatisticsRange, UnixTimestamp,
};
use crate::signing::SignedRequest;
use crate::transport::envelope::{lenient, lenient_list};

#[derive(Debug, Serialize)]
pub struct PullStatusBody<'a> {
    sig: &'a str,
    time: u64,
    #[serde(rename = "type")]
    kind: u32,
    max: u32,
}

pub fn encode_pull_status_body(
    kind: PullKind,
    limit: PullLimit,
    signed: &SignedRequest,
) -> PullStatusBody<'_> {
    PullStatusBody {
        sig: signed.sig.as_str(),
        time: signed.time.value(),
        kind: kind.code(),
        max: limit.value(),
    }
}

#[derive(Debug, Serialize)]
pub struct MobileStatusBody<'a> {
    sig: &'a str,
    time: u64,
    #[serde(rename = "type")]
    kind: u32,
    max: u32,
    begin_time: u64,
    end_time: u64,
    nationcode: &'a str,
    mobile: &'a str,
}

pub fn encode_mobile_status_body<'a>(
    kind: PullKind,
    query: &'a MobileStatusQuery,
    signed: &'a SignedRequest,
) -> MobileStatusBody<'a> {
    MobileStatusBody {
        sig: signed.sig.as_str(),
        time: signed.time.value(),
        kind: kind.code(),
        max: query.limit().value(),
        begin_time: query.begin().value(),
        end_time: query.end().value(),
        nationcode: query.tel().nationcode().as_str(),
        mobile: query.tel().mobile().as_str(),
    }
}

/// `pullsendstatus` / `pullcallbackstatus` body.
#[derive(Debug, Serialize)]
pub struct StatisticsBody<'a> {
    sig: &'a str,
    time: u64,
    begin_date: u32,
    end_date: u32,
}

pub fn encode_statistics_body(range: StatisticsRange, signed: &SignedRequest) -> StatisticsBody<'_> {
    StatisticsBody {
        sig: signed.sig.as_str(),
        time: signed.time.value(),
        begin_date: range.begin().value(),
        end_date: range.end().value(),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DeliveryItem {
    #[serde(deserialize_with = "lenient")]
    user_receive_time: String,
    #[serde(deserialize_with = "lenient")]
    nationcode: String,
    #[serde(deserialize_with = "lenient")]
    mobile: String,
    #[serde(deserialize_with = "lenient")]
    report_status: String,
    #[serde(deserialize_with = "lenient")]
    errmsg: String,
    #[serde(deserialize_with = "lenient")]
    description: String,
    #[serde(deserialize_with = "lenient")]
    sid: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeliveryStatusPayload {
    #[serde(deserialize_with = "lenient")]
    count: u32,
    #[serde(deserialize_with = "lenient_list")]
    data: Vec<DeliveryItem>,
}

impl From<DeliveryStatusPayload> for DeliveryStatusResponse {
    fn from(value: DeliveryStatusPayload) -> Self {
        Self {
            count: value.count,
            reports: value
                .data
                .into_iter()
                .map(|item| DeliveryReport {
                    user_receive_time: item.user_receive_time,
                    nationcode: item.nationcode,
                    mobile: item.mobile,
                    report_status: item.report_status,
                    errmsg: item.errmsg,
                    description: item.description,
                    sid: item.sid,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReplyItem {
    #[serde(deserialize_with = "lenient")]
    nationcode: String,
    #[serde(deserialize_with = "lenient")]
    mobile: String,
    #[serde(deserialize_with = "lenient")]
    text: String,
    #[serde(deserialize_with = "lenient")]
    sign: String,
    #[serde(deserialize_with = "lenient")]
    time: u64,
    #[serde(deserialize_with = "lenient")]
    extend: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReplyPayload {
    #[serde(deserialize_with = "lenient")]
    count: u32,
    #[serde(deserialize_with = "lenient_list")]
    data: Vec<ReplyItem>,
}

impl From<ReplyPayload> for ReplyResponse {
    fn from(value: ReplyPayload) -> Self {
        Self {
            count: value.count,
            replies: value
                .data
                .into_iter()
                .map(|item| Reply {
                    nationcode: item.nationcode,
                    mobile: item.mobile,
                    text: item.text,
                    sign: item.sign,
                    time: UnixTimestamp::new(item.time),
                    extend: item.extend,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SendStatisticsData {
    #[serde(deserialize_with = "lenient")]
    request: u64,
    #[serde(deserialize_with = "lenient")]
    success: u64,
    #[serde(deserialize_with = "lenient")]
    bill_number: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SendStatisticsPayload {
    #[serde(deserialize_with = "lenient")]
    data: SendStatisticsData,
}

impl From<SendStatisticsPayload> for SendStatistics {
    fn from(value: SendStatisticsPayload) -> Self {
        Self {
            request: value.data.request,
            success: value.data.success,
            bill_number: value.data.bill_number,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CallbackStatisticsData {
    #[serde(deserialize_with = "lenient")]
    success: u64,
    #[serde(deserialize_with = "lenient")]
    status: u64,
    #[serde(deserialize_with = "lenient")]
    status_success: u64,
    #[serde(deserialize_with = "lenient")]
    status_fail: u64,
    #[serde(deserialize_with = "lenient")]
    status_fail_0: u64,
    #[serde(deserialize_with = "lenient")]
    status_fail_1: u64,
    #[serde(deserialize_with = "lenient")]
    status_fail_2: u64,
    #[serde(deserialize_with = "lenient")]
    status_fail_3: u64,
    #[serde(deserialize_with = "lenient")]
    status_fail_4: u64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CallbackStatisticsPayload {
    #[serde(deserialize_with = "lenient")]
    data: CallbackStatisticsData,
}

impl From<CallbackStatisticsPayload> for CallbackStatistics {
    fn from(value: CallbackStatisticsPayload) -> Self {
        let data = value.data;
        Self {
            success: data.success,
            status: data.status,
            status_success: data.status_success,
            status_fail: data.status_fail,
            fail_operator_error: data.status_fail_0,
            fail_invalid_number: data.status_fail_1,
            fail_unreachable: data.status_fail_2,
            fail_blacklisted: data.status_fail_3,
            fail_operator_rate_limit: data.status_fail_4,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::{DateHour, Nonce, Operation, Tel};
    use crate::signing::{BaseUrl, CallContext, Credentials, DEFAULT_BASE_URL, MobileScope};
    use crate::transport::envelope::decode_envelope;

    fn signed() -> SignedRequest {
        let credentials = Credentials::new("1", "k").unwrap();
        let ctx = CallContext::new(Nonce::new("1234").unwrap(), UnixTimestamp::new(100));
        SignedRequest::prepare(
            &credentials,
            &BaseUrl::parse(DEFAULT_BASE_URL).unwrap(),
            &ctx,
            Operation::PullStatus,
            &MobileScope::none(),
        )
    }

    #[test]
    fn pull_status_body() {
        let signed = signed();
        let body = serde_json::to_value(encode_pull_status_body(
            PullKind::Reply,
            PullLimit::new(50).unwrap(),
            &signed,
        ))
        .unwrap();
        assert_eq!(
            body,
            json!({"sig": signed.sig.as_str(), "time": 100, "type": 1, "max": 50})
        );
    }

    #[test]
    fn mobile_status_body() {
        let signed = signed();
        let query = MobileStatusQuery::new(
            Tel::china("13800000000").unwrap(),
            UnixTimestamp::new(1_700_000_000),
            UnixTimestamp::new(1_700_003_600),
            PullLimit::new(10).unwrap(),
        )
        .unwrap();
        let body =
            serde_json::to_value(encode_mobile_status_body(PullKind::Delivery, &query, &signed))
                .unwrap();
        assert_eq!(
            body,
            json!({
                "sig": signed.sig.as_str(),
                "time": 100,
                "type": 0,
                "max": 10,
                "begin_time": 1_700_000_000u64,
                "end_time": 1_700_003_600u64,
                "nationcode": "86",
                "mobile": "13800000000"
            })
        );
    }

    #[test]
    fn statistics_body_uses_packed_hours() {
        let signed = signed();
        let range = StatisticsRange::new(
            DateHour::new(2024, 5, 1, 0).unwrap(),
            DateHour::new(2024, 5, 1, 23).unwrap(),
        )
        .unwrap();
        let body = serde_json::to_value(encode_statistics_body(range, &signed)).unwrap();
        assert_eq!(body["begin_date"], json!(2024050100));
        assert_eq!(body["end_date"], json!(2024050123));
    }

    #[test]
    fn decode_delivery_reports() {
        let json = r#"
        {
          "result": 0,
          "errmsg": "ok",
          "count": 1,
          "data": [
            {"user_receive_time": "2024-05-01 10:00:01", "nationcode": "86",
             "mobile": "13800000000", "report_status": "SUCCESS", "errmsg": "DELIVRD",
             "description": "delivered", "sid": "s-1"}
          ]
        }
        "#;
        let decoded = decode_envelope::<DeliveryStatusPayload>(json).unwrap();
        let response = DeliveryStatusResponse::from(decoded.payload);
        assert_eq!(response.count, 1);
        assert!(response.reports[0].is_delivered());
        assert_eq!(response.reports[0].sid, "s-1");
    }

    #[test]
    fn decode_replies() {
        let json = r#"
        {
          "result": 0,
          "errmsg": "ok",
          "count": 1,
          "data": [
            {"nationcode": "86", "mobile": "13800000000", "text": "STOP",
             "sign": "Acme", "time": 1700000000, "extend": ""}
          ]
        }
        "#;
        let decoded = decode_envelope::<ReplyPayload>(json).unwrap();
        let response = ReplyResponse::from(decoded.payload);
        assert_eq!(response.replies[0].text, "STOP");
        assert_eq!(response.replies[0].time, UnixTimestamp::new(1_700_000_000));
    }

    #[test]
    fn decode_statistics() {
        let decoded = decode_envelope::<SendStatisticsPayload>(
            r#"{"result":0,"errmsg":"","data":{"request":10,"success":9,"bill_number":12}}"#,
        )
        .unwrap();
        assert_eq!(
            SendStatistics::from(decoded.payload),
            SendStatistics {
                request: 10,
                success: 9,
                bill_number: 12
            }
        );

        let decoded = decode_envelope::<CallbackStatisticsPayload>(
            r#"{"result":0,"errmsg":"","data":{"success":9,"status":8,"status_success":6,
               "status_fail":2,"status_fail_1":1,"status_fail_3":1}}"#,
        )
        .unwrap();
        let stats = CallbackStatistics::from(decoded.payload);
        assert_eq!(stats.status_fail, 2);
        assert_eq!(stats.fail_invalid_number, 1);
        assert_eq!(stats.fail_blacklisted, 1);
        assert_eq!(stats.fail_operator_error, 0);
    }

    #[test]
    fn malformed_report_does_not_drop_the_rest() {
        let decoded = decode_envelope::<DeliveryStatusPayload>(
            r#"{"result":0,"count":2,"data":[{"mobile":"1","sid":"a"},"garbage"]}"#,
        )
        .unwrap();
        let response = DeliveryStatusResponse::from(decoded.payload);
        assert_eq!(response.count, 2);
        assert_eq!(response.reports.len(), 1);
        assert_eq!(response.reports[0].sid, "a");
        assert_eq!(response.reports[0].mobile, "1");
    }
}
