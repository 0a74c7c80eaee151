use std::io;

use qcloudsms::domain::TemplatePage;
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

    let client = QcloudClient::new(Credentials::new(app_id, app_key)?)?;
    let response = client
        .get_templates_by_page(TemplatePage { offset: 0, max: 20 })
        .await?;

    println!("{} of {} templates", response.count, response.total);
    for template in response.templates {
        println!(
            "#{} {:?} {}",
            template.id.value(),
            template.status,
            template.text
        );
    }

    Ok(())
}
