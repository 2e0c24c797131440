//! Export pipeline: authorize, query, transform, serialize
//!
//! One logical operation per invocation, composed as two awaited provider
//! calls followed by a synchronous transform. Progress is reported as events
//! over a channel so the caller owns all presentation state; the pipeline
//! never touches the terminal itself.

pub mod transform;

pub use transform::{serialize_records, transform};

use tokio::sync::mpsc;

use crate::error::Result;
use crate::provider::{DateRange, SummaryProvider};

/// Final serialized export, handed to the share target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    /// JSON array of per-day records, in provider order
    pub json: String,
    /// Number of records in the payload
    pub record_count: usize,
}

/// Events emitted over the lifetime of one export operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportEvent {
    /// The export was triggered for the given range
    Started { range: String },
    /// Non-fatal problem with a single record; the export continues
    Warning(String),
    /// The payload was built; mirrors the Ok return
    Succeeded { record_count: usize },
    /// The export aborted; mirrors the Err return
    Failed(String),
}

/// Sender half of the export event stream
pub type EventSender = mpsc::UnboundedSender<ExportEvent>;

/// Run one export: request authorization, issue the range query, transform
/// the results, and serialize them.
///
/// Every fatal error aborts the remaining steps and is both returned and
/// mirrored as a `Failed` event; warnings are emitted per affected record and
/// never abort. Event send failures are ignored since a dropped receiver
/// just means nobody is watching.
pub async fn run<P: SummaryProvider>(
    provider: &P,
    range: DateRange,
    events: &EventSender,
) -> Result<ExportPayload> {
    let _ = events.send(ExportEvent::Started {
        range: range.to_string(),
    });

    let result = run_inner(provider, range, events).await;

    match &result {
        Ok(payload) => {
            let _ = events.send(ExportEvent::Succeeded {
                record_count: payload.record_count,
            });
        }
        Err(err) => {
            let _ = events.send(ExportEvent::Failed(err.to_string()));
        }
    }

    result
}

async fn run_inner<P: SummaryProvider>(
    provider: &P,
    range: DateRange,
    events: &EventSender,
) -> Result<ExportPayload> {
    provider.authorize().await?;

    let raw = provider.fetch_summaries(&range).await?;

    let (records, warnings) = transform(&raw);
    for warning in warnings {
        let _ = events.send(ExportEvent::Warning(warning));
    }

    let json = serialize_records(&records)?;

    Ok(ExportPayload {
        record_count: records.len(),
        json,
    })
}

/// Convenience wrapper that discards events, for callers that only need the
/// payload
pub async fn run_silent<P: SummaryProvider>(
    provider: &P,
    range: DateRange,
) -> Result<ExportPayload> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    rx.close();
    run(provider, range, &tx).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RingsError;
    use crate::models::{
        CountUnit, DateComponents, DurationUnit, EnergyUnit, Quantity, RawDailySummary,
    };
    use crate::provider::Availability;
    use chrono::NaiveDate;

    /// Scripted provider double
    struct ScriptedProvider {
        authorize_result: Option<&'static str>,
        summaries: std::result::Result<Vec<RawDailySummary>, &'static str>,
    }

    impl SummaryProvider for ScriptedProvider {
        async fn availability(&self) -> Result<Availability> {
            Ok(Availability {
                available: true,
                earliest_permitted_date: None,
            })
        }

        async fn authorize(&self) -> Result<()> {
            match self.authorize_result {
                None => Ok(()),
                Some(reason) => Err(RingsError::denied(reason)),
            }
        }

        async fn fetch_summaries(&self, _range: &DateRange) -> Result<Vec<RawDailySummary>> {
            match &self.summaries {
                Ok(records) => Ok(records.clone()),
                Err(message) => Err(RingsError::query(*message)),
            }
        }
    }

    fn raw_summary(with_date: bool) -> RawDailySummary {
        RawDailySummary {
            active_energy_burned: Quantity {
                value: 500.0,
                unit: EnergyUnit::Kilocalories,
            },
            active_energy_burned_goal: Quantity {
                value: 600.0,
                unit: EnergyUnit::Kilocalories,
            },
            exercise_time: Quantity {
                value: 30.0,
                unit: DurationUnit::Minutes,
            },
            exercise_time_goal: Quantity {
                value: 30.0,
                unit: DurationUnit::Minutes,
            },
            stand_hours: Quantity {
                value: 8.0,
                unit: CountUnit::Count,
            },
            stand_hours_goal: Quantity {
                value: 12.0,
                unit: CountUnit::Count,
            },
            date_components: with_date.then(|| DateComponents {
                era: 1,
                year: 2023,
                month: 3,
                day: 5,
                calendar: "gregorian".to_string(),
            }),
        }
    }

    fn test_range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2023, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 3, 5).unwrap(),
        )
        .unwrap()
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<ExportEvent>) -> Vec<ExportEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_successful_export_event_sequence() {
        let provider = ScriptedProvider {
            authorize_result: None,
            summaries: Ok(vec![raw_summary(true), raw_summary(true)]),
        };
        let (tx, mut rx) = mpsc::unbounded_channel();

        let payload = run(&provider, test_range(), &tx).await.unwrap();
        assert_eq!(payload.record_count, 2);

        let events = drain(&mut rx);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ExportEvent::Started { .. }));
        assert_eq!(events[1], ExportEvent::Succeeded { record_count: 2 });
    }

    #[tokio::test]
    async fn test_missing_date_emits_single_warning() {
        let provider = ScriptedProvider {
            authorize_result: None,
            summaries: Ok(vec![raw_summary(true), raw_summary(false)]),
        };
        let (tx, mut rx) = mpsc::unbounded_channel();

        let payload = run(&provider, test_range(), &tx).await.unwrap();
        assert_eq!(payload.record_count, 2);
        assert!(payload.json.contains("1970-01-01"));

        let events = drain(&mut rx);
        let warnings: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, ExportEvent::Warning(_)))
            .collect();
        assert_eq!(warnings.len(), 1);
        // Warning precedes the terminal event
        assert!(matches!(events.last(), Some(ExportEvent::Succeeded { .. })));
    }

    #[tokio::test]
    async fn test_authorization_denied_aborts_before_query() {
        let provider = ScriptedProvider {
            authorize_result: Some("read scope rejected"),
            summaries: Ok(vec![raw_summary(true)]),
        };
        let (tx, mut rx) = mpsc::unbounded_channel();

        let err = run(&provider, test_range(), &tx).await.unwrap_err();
        assert!(matches!(err, RingsError::AuthorizationDenied(_)));

        let events = drain(&mut rx);
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], ExportEvent::Started { .. }));
        assert!(matches!(events[1], ExportEvent::Failed(_)));
    }

    #[tokio::test]
    async fn test_query_failure_produces_single_failed_event() {
        let provider = ScriptedProvider {
            authorize_result: None,
            summaries: Err("backing store offline"),
        };
        let (tx, mut rx) = mpsc::unbounded_channel();

        let err = run(&provider, test_range(), &tx).await.unwrap_err();
        assert!(matches!(err, RingsError::QueryFailed(_)));

        let events = drain(&mut rx);
        let failures: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, ExportEvent::Failed(_)))
            .collect();
        assert_eq!(failures.len(), 1);
        if let ExportEvent::Failed(message) = failures[0] {
            assert!(message.contains("backing store offline"));
        }
    }

    #[tokio::test]
    async fn test_empty_result_is_well_formed() {
        let provider = ScriptedProvider {
            authorize_result: None,
            summaries: Ok(vec![]),
        };
        let (tx, _rx) = mpsc::unbounded_channel();

        let payload = run(&provider, test_range(), &tx).await.unwrap();
        assert_eq!(payload.record_count, 0);
        assert_eq!(payload.json, "[]");
    }

    #[tokio::test]
    async fn test_run_silent_survives_dropped_receiver() {
        let provider = ScriptedProvider {
            authorize_result: None,
            summaries: Ok(vec![raw_summary(false)]),
        };

        let payload = run_silent(&provider, test_range()).await.unwrap();
        assert_eq!(payload.record_count, 1);
    }

    #[tokio::test]
    async fn test_repeated_runs_yield_identical_payloads() {
        let provider = ScriptedProvider {
            authorize_result: None,
            summaries: Ok(vec![raw_summary(true), raw_summary(false)]),
        };

        let first = run_silent(&provider, test_range()).await.unwrap();
        let second = run_silent(&provider, test_range()).await.unwrap();
        assert_eq!(first.json, second.json);
    }
}
