//! Gateway status command for rings-cli

use crate::config::CredentialStore;
use crate::error::{Result, RingsError};
use crate::provider::{HealthGateway, SummaryProvider};

/// Probe the paired gateway and report availability
pub async fn run(profile: Option<String>) -> Result<()> {
    let store = CredentialStore::new(profile)?;
    let (settings, token) = store
        .load_credentials()?
        .ok_or(RingsError::NotAuthenticated)?;

    let gateway = HealthGateway::new(&settings.url, token);
    let availability = gateway.availability().await?;

    println!("Gateway: {}", settings.url);
    if availability.available {
        println!("Activity summaries: available");
    } else {
        println!("Activity summaries: unavailable");
    }

    match availability.earliest_permitted() {
        Some(date) => println!("Earliest permitted date: {}", date),
        None => println!("Earliest permitted date: unknown"),
    }

    Ok(())
}
