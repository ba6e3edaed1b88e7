//! Submit and Query Example
//!
//! Sends one transaction to a running validator, then walks its state stores.
//!
//! Run with: cargo run --example submit_and_query -- <host> <port>

use ledgerlink_rs::{ClientError, ValidatorClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "localhost".to_string());
    let port: u16 = args.next().map(|p| p.parse()).transpose()?.unwrap_or(8800);

    let client = ValidatorClient::new(host, port)?;
    println!("Connected to {}:{}\n", client.host(), client.port());

    let txn = serde_json::json!({
        "Updates": [{
            "UpdateType": "/IntegerKeyTransaction/Update",
            "Verb": "set",
            "Name": "a",
            "Value": 1
        }]
    });
    match client.send_transaction("/IntegerKeyTransaction", txn).await {
        Ok(id) => println!("📝 Submitted transaction {}", id),
        Err(ClientError::Application {
            error_type_message,
            error_message,
            ..
        }) => println!(
            "⚠️  Rejected: {} ({})",
            error_type_message.unwrap_or_default(),
            error_message.unwrap_or_default()
        ),
        Err(e) => return Err(e.into()),
    }

    let Some(stores) = client.get_store_names().await? else {
        println!("No store API on this validator");
        return Ok(());
    };

    for store in &stores {
        println!("\n📦 {}", store);
        match client.get_store_objects(store).await? {
            Some(objects) => {
                println!("   {}", serde_json::to_string_pretty(&objects.into_json()?)?)
            }
            None => println!("   (empty)"),
        }
    }

    Ok(())
}
