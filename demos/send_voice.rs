use std::io;

use qcloudsms::{Credentials, MessageText, QcloudClient, SendVoice, Tel};
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

    let client = QcloudClient::new(Credentials::new(app_id, app_key)?)?;
    let tel = Tel::china(phone)?;

    // With QCLOUDSMS_PROMPT set the text is read out as a notification,
    // otherwise QCLOUDSMS_CODE is spoken as a verification code.
    let request = match std::env::var("QCLOUDSMS_PROMPT") {
        Ok(text) => SendVoice::prompt(tel, MessageText::new(text)?),
        Err(_) => SendVoice::code(tel, MessageText::new(require_env("QCLOUDSMS_CODE")?)?),
    };

    let response = client.send_voice(request).await?;
    println!("callid: {}", response.callid);

    Ok(())
}
