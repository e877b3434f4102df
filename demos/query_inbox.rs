use std::io;

use smsworks::{MessageQuery, SmsWorksClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let jwt = std::env::var("SMSWORKS_JWT").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSWORKS_JWT environment variable is required",
        )
    })?;

    let client = SmsWorksClient::new(jwt)?;
    let query = MessageQuery {
        unread: Some(true),
        limit: Some(50),
        ..MessageQuery::default()
    };

    let messages = client.query_inbox(&query).await?;
    for message in &messages {
        println!(
            "{:?} from {:?}: {:?}",
            message.messageid, message.sender, message.content
        );
    }
    println!("{} message(s)", messages.len());

    Ok(())
}
