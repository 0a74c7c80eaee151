use std::io;

use qcloudsms::domain::{DateHour, StatisticsRange};
use qcloudsms::{Credentials, QcloudClient};
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
    // YYYYMMDDHH
    let begin = require_env("QCLOUDSMS_BEGIN")?.parse()?;
    let end = require_env("QCLOUDSMS_END")?.parse()?;

    let client = QcloudClient::new(Credentials::new(app_id, app_key)?)?;
    let range = StatisticsRange::new(DateHour::from_packed(begin)?, DateHour::from_packed(end)?)?;

    let sent = client.pull_send_statistics(range).await?;
    println!(
        "requests: {}, success: {}, billed: {}",
        sent.request, sent.success, sent.bill_number
    );

    let callbacks = client.pull_callback_statistics(range).await?;
    println!(
        "receipts: {}, delivered: {}, failed: {}",
        callbacks.status, callbacks.status_success, callbacks.status_fail
    );

    Ok(())
}
