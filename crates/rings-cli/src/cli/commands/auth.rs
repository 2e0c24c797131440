//! Pairing commands for rings-cli

use crate::client::AccessToken;
use crate::config::{CredentialStore, GatewaySettings};
use crate::error::Result;
use crate::provider::{HealthGateway, SummaryProvider};
use std::io::{self, Write};

/// Pair with a health gateway and store the access token
pub async fn login(
    gateway_url: Option<String>,
    token: Option<String>,
    profile: Option<String>,
) -> Result<()> {
    let store = CredentialStore::new(profile)?;

    if store.has_credentials() {
        println!("Already paired. Use 'rings auth logout' to unpair first.");
        return Ok(());
    }

    let gateway_url = match gateway_url {
        Some(url) => url,
        None => prompt("Gateway URL: ")?,
    };

    let token = match token {
        Some(t) => t,
        None => prompt("Access token: ")?,
    };

    let token = AccessToken::new(token);

    // Probe the gateway before persisting anything
    println!("Checking gateway...");
    let gateway = HealthGateway::new(&gateway_url, token.clone());
    let availability = gateway.availability().await?;

    store.save_gateway(&GatewaySettings {
        url: gateway_url.clone(),
    })?;
    store.save_token(&token)?;

    println!("Successfully paired with {}", gateway_url);
    println!("Profile: {}", store.profile());
    if !availability.available {
        println!("Note: the gateway reports activity summaries as unavailable right now.");
    }

    Ok(())
}

/// Unpair and clear stored credentials
pub async fn logout(profile: Option<String>) -> Result<()> {
    let store = CredentialStore::new(profile)?;

    if !store.has_credentials() {
        println!("Not paired.");
        return Ok(());
    }

    store.clear()?;

    println!("Successfully unpaired.");
    Ok(())
}

/// Show pairing status without touching the network
pub async fn status(profile: Option<String>) -> Result<()> {
    let store = CredentialStore::new(profile)?;

    match store.load_credentials()? {
        Some((settings, _token)) => {
            println!("Status: Paired");
            println!("Profile: {}", store.profile());
            println!("Gateway: {}", settings.url);
        }
        None => {
            println!("Status: Not paired");
            println!("Run 'rings auth login' to pair with a gateway.");
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
