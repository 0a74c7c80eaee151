use std::io;

use qcloudsms::{Credentials, MessageText, QcloudClient, SendSms, SignName, SmsContent, Tel, TemplateId};
use tracing_subscriber::EnvFilter;

fn require_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let app_id = require_env("QCLOUDSMS_APP_ID")?;
    let app_key = require_env("QCLOUDSMS_APP_KEY")?;
    let phone = require_env("QCLOUDSMS_PHONE")?;

    let mut builder = QcloudClient::builder(Credentials::new(app_id, app_key)?).debug(true);
    if let Ok(sign) = std::env::var("QCLOUDSMS_SIGN") {
        builder = builder.sign_name(SignName::new(sign)?);
    }
    let client = builder.build()?;

    // `+8613800000000` or a bare mainland number.
    let tel = Tel::parse(None, &phone).or_else(|_| Tel::china(phone.clone()))?;

    let content = match std::env::var("QCLOUDSMS_TEMPLATE_ID") {
        Ok(id) => {
            let params = std::env::var("QCLOUDSMS_TEMPLATE_PARAMS")
                .map(|raw| raw.split(',').map(str::to_owned).collect())
                .unwrap_or_default();
            SmsContent::template(TemplateId::new(id.parse()?), params)
        }
        Err(_) => {
            let message = std::env::var("QCLOUDSMS_MESSAGE")
                .unwrap_or_else(|_| "Hello from the qcloudsms demo.".to_owned());
            SmsContent::text(MessageText::new(message)?)
        }
    };

    let response = client.send_sms(SendSms::new(tel, content)).await?;
    println!("sid: {:?}, fee: {:?}", response.sid, response.fee);

    Ok(())
}
