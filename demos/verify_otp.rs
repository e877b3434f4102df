use std::io;

use smsworks::{OtpVerify, Passcode, SmsWorksClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let jwt = std::env::var("SMSWORKS_JWT").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSWORKS_JWT environment variable is required",
        )
    })?;
    let passcode_raw = std::env::var("SMSWORKS_PASSCODE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSWORKS_PASSCODE environment variable is required",
        )
    })?;

    let client = SmsWorksClient::new(jwt)?;
    let verify = OtpVerify::new(Passcode::new(passcode_raw)?);

    let response = client.verify_otp(&verify).await?;
    println!(
        "destination: {:?}, status: {:?}",
        response.destination, response.status
    );

    Ok(())
}
