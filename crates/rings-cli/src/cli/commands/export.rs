//! Export command for rings-cli
//!
//! The command layer owns all presentation: it validates the range against
//! the gateway's bounds, subscribes to the pipeline's event stream, prints
//! warnings to stderr, and hands the payload to the share target (stdout or
//! a file). The pipeline itself never prints.

use chrono::Local;
use tokio::sync::mpsc;

use crate::config::CredentialStore;
use crate::error::{Result, RingsError};
use crate::export::{self, ExportEvent};
use crate::provider::{parse_date, DateRange, HealthGateway, SummaryProvider};

/// Run one export over the given date range
pub async fn run(
    from: String,
    to: Option<String>,
    output: Option<String>,
    profile: Option<String>,
) -> Result<()> {
    let store = CredentialStore::new(profile)?;
    let (settings, token) = store
        .load_credentials()?
        .ok_or(RingsError::NotAuthenticated)?;

    let today = Local::now().date_naive();
    let start = parse_date(&from)?;
    let end = match to {
        Some(t) => parse_date(&t)?,
        None => today,
    };

    if end > today {
        return Err(RingsError::invalid_param(format!(
            "end date {} is in the future",
            end
        )));
    }

    let range = DateRange::new(start, end)?;
    let gateway = HealthGateway::new(&settings.url, token);

    // The gateway's earliest permitted date bounds the range start; the
    // adapter itself does not re-check this.
    let availability = gateway.availability().await?;
    if !availability.available {
        return Err(RingsError::unavailable(
            "gateway reports activity summaries as unavailable",
        ));
    }
    if let Some(earliest) = availability.earliest_permitted() {
        if start < earliest {
            return Err(RingsError::invalid_param(format!(
                "start date {} precedes the gateway's earliest permitted date {}",
                start, earliest
            )));
        }
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                ExportEvent::Started { range } => eprintln!("Exporting {}...", range),
                ExportEvent::Warning(message) => eprintln!("Warning: {}", message),
                ExportEvent::Succeeded { record_count } => {
                    eprintln!("Exported {} record(s)", record_count);
                }
                // The failure is reported through the returned error
                ExportEvent::Failed(_) => {}
            }
        }
    });

    let result = export::run(&gateway, range, &tx).await;
    drop(tx);
    let _ = printer.await;

    let payload = result?;

    match output {
        Some(path) => {
            tokio::fs::write(&path, &payload.json).await?;
            eprintln!("Saved to {}", path);
        }
        None => println!("{}", payload.json),
    }

    Ok(())
}
