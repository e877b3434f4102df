use std::io;

use smsworks::SmsWorksClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let jwt = std::env::var("SMSWORKS_JWT").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSWORKS_JWT environment variable is required",
        )
    })?;

    let client = SmsWorksClient::new(jwt)?;
    let response = client.credits_balance().await?;
    println!("credits: {:?}", response.credits);

    Ok(())
}
