//! Build a client from options and print the effective transport settings.
//!
//! Run with: cargo run --example client_options -p lighter-adapter

use std::time::Duration;

use lighter_adapter::LighterClient;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let client = LighterClient::builder("https://mainnet.zklighter.elliot.ai")
        .custom_headers([("X-Channel", "example")])
        .local_addr("127.0.0.1")
        .timeout(Duration::from_secs(15))
        .fat_finger_protection(false)
        .build()?;

    println!("endpoint: {}", client.endpoint());
    println!("fat finger protection: {}", client.fat_finger_protection());
    if let Some(settings) = client.transport_settings() {
        println!("transport: {settings:#?}");
    }

    match LighterClient::builder(client.endpoint())
        .proxy("::::not a url")
        .build()
    {
        Ok(_) => println!("unexpected success"),
        Err(err) => println!("rejected proxy: {err}"),
    }

    Ok(())
}
