use std::io;

use qcloudsms::{
    Credentials, MessageText, QcloudClient, SendMultiSms, SendOptions, SmsContent, Tel,
};
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
    // Comma-separated mainland numbers.
    let phones = require_env("QCLOUDSMS_PHONES")?;
    let message = std::env::var("QCLOUDSMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the qcloudsms demo.".to_owned());

    let client = QcloudClient::new(Credentials::new(app_id, app_key)?)?;
    let tels = phones
        .split(',')
        .map(Tel::china)
        .collect::<Result<Vec<_>, _>>()?;
    let request = SendMultiSms::new(
        tels,
        SmsContent::text(MessageText::new(message)?),
        SendOptions::default(),
    )?;

    let response = client.send_multi_sms(request).await?;
    for entry in response.detail {
        println!(
            "{}{}: result={:?} {} sid={:?}",
            entry.nationcode,
            entry.mobile,
            entry.result.map(|code| code.as_i32()),
            entry.errmsg,
            entry.sid
        );
    }

    Ok(())
}
