use std::io;

use infobip::{AuthConfig, InfobipClient, Params};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("INFOBIP_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "INFOBIP_API_KEY environment variable is required",
        )
    })?;
    let number_key = std::env::var("INFOBIP_NUMBER_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "INFOBIP_NUMBER_KEY environment variable is required",
        )
    })?;

    let client = InfobipClient::new(api_key, false, &AuthConfig::default());
    let response = client
        .purchase_number(&Params::new().with("numberKey", number_key))
        .await?;
    println!("status: {}, body: {}", response.status, response.body);

    Ok(())
}
