use std::io;

use smsworks::{Destination, Otp, OtpOptions, SenderId, SmsWorksClient};

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

    let client = SmsWorksClient::new(jwt)?;
    let otp = Otp::new(
        SenderId::new("SMSWorks")?,
        Destination::new(destination_raw)?,
        OtpOptions {
            length: Some(6),
            template: Some("Your verification code is {{passcode}}".to_owned()),
            ..OtpOptions::default()
        },
    );

    let response = client.send_otp(&otp).await?;
    println!(
        "messageid: {:?}, status: {:?}, credits: {:?}",
        response.messageid, response.status, response.credits
    );

    Ok(())
}
