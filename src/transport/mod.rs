//! Transport layer: JSON wire format (serialization/deserialization).

mod envelope;
mod sender_sign;
mod sms;
mod status;
mod template;
mod voice;

pub use envelope::{Decoded, TransportError, decode_envelope};
pub use sender_sign::{
    SenderSignListPayload, SenderSignPayload, encode_sender_sign_draft_body,
    encode_sender_sign_ids_body,
};
pub use sms::{
    SendMultiSmsPayload, SendSmsPayload, encode_send_multi_sms_body, encode_send_sms_body,
};
pub use status::{
    CallbackStatisticsPayload, DeliveryStatusPayload, ReplyPayload, SendStatisticsPayload,
    encode_mobile_status_body, encode_pull_status_body, encode_statistics_body,
};
pub use template::{
    TemplateListPayload, TemplatePayload, encode_template_draft_body, encode_template_ids_body,
    encode_template_query_by_id_body, encode_template_query_by_page_body,
};
pub use voice::{SendVoicePayload, encode_send_voice_body};
