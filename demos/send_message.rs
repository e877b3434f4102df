use std::io;

use smsworks::{Destination, Message, MessageContent, MessageOptions, SenderId, SmsWorksClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let jwt = std::env::var("SMSWORKS_JWT").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSWORKS_JWT environment variable is required",
        )
    })?;
    let destination_raw = std::env::var("SMSWORKS_DESTINATION").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSWORKS_DESTINATION environment variable is required",
        )
    })?;
    let content = std::env::var("SMSWORKS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the smsworks demo.".to_owned());

    let client = SmsWorksClient::new(jwt)?;
    let message = Message::new(
        SenderId::new("SMSWorks")?,
        Destination::new(destination_raw)?,
        MessageContent::new(content)?,
        MessageOptions::default(),
    );

    let response = client.send_message(&message).await?;
    println!(
        "messageid: {:?}, status: {:?}, credits: {:?}, creditsUsed: {:?}",
        response.messageid, response.status, response.credits, response.credits_used
    );

    Ok(())
}
