use std::io;

use infobip::{AuthConfig, InfobipClient, Params};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let api_key = std::env::var("INFOBIP_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "INFOBIP_API_KEY environment variable is required",
        )
    })?;
    let to = std::env::var("INFOBIP_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "INFOBIP_TO environment variable is required (comma-separated for many)",
        )
    })?;
    let text =
        std::env::var("INFOBIP_TEXT").unwrap_or_else(|_| "Hello from the infobip demo.".to_owned());

    let recipients = to
        .split(',')
        .map(str::trim)
        .filter(|it| !it.is_empty())
        .collect::<Vec<_>>();
    let params = match recipients.as_slice() {
        [single] => Params::new().with("to", *single),
        many => Params::new().with("to", many.to_vec()),
    }
    .with("text", text);

    let client = InfobipClient::new(api_key, false, &AuthConfig::default());
    let response = client.send(&params).await?;
    println!("status: {}, body: {}", response.status, response.body);

    Ok(())
}
