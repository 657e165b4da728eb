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
    let limit = std::env::var("INFOBIP_LIMIT")
        .ok()
        .and_then(|it| it.parse::<u32>().ok())
        .unwrap_or(10);

    let mut params = Params::new().with("limit", limit);
    if let Ok(country) = std::env::var("INFOBIP_COUNTRY") {
        params.set("country", country);
    }

    let client = InfobipClient::new(api_key, false, &AuthConfig::default());
    let response = client.numbers(&params).await?;
    println!("status: {}, body: {}", response.status, response.body);

    Ok(())
}
