//! HTTP health gateway implementation of the provider seam

use serde::{Deserialize, Serialize};

use crate::client::{AccessToken, GatewayClient};
use crate::error::{Result, RingsError};
use crate::models::{DateComponents, RawDailySummary};
use crate::provider::{Availability, DateRange, SummaryProvider};

/// Data category for the authorization request
const ACTIVITY_SUMMARY_SCOPE: &str = "activity-summary";

/// Body of the authorization request: read-only access, nothing shared back
#[derive(Debug, Serialize)]
struct AuthorizeRequest<'a> {
    read: Vec<&'a str>,
    share: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct AuthorizeResponse {
    granted: bool,
    #[serde(default)]
    reason: Option<String>,
}

/// Range query body, keyed by explicit gregorian calendar components the way
/// the gateway indexes its summaries
#[derive(Debug, Serialize)]
struct RangeQuery {
    start: DateComponents,
    end: DateComponents,
}

/// Health gateway as a [`SummaryProvider`]
pub struct HealthGateway {
    client: GatewayClient,
    token: AccessToken,
}

impl HealthGateway {
    pub fn new(base_url: &str, token: AccessToken) -> Self {
        Self {
            client: GatewayClient::new(base_url),
            token,
        }
    }
}

impl SummaryProvider for HealthGateway {
    async fn availability(&self) -> Result<Availability> {
        self.client
            .get_json(&self.token, "/activity-service/availability")
            .await
    }

    async fn authorize(&self) -> Result<()> {
        let request = AuthorizeRequest {
            read: vec![ACTIVITY_SUMMARY_SCOPE],
            share: vec![],
        };

        let response: AuthorizeResponse = self
            .client
            .post_json(&self.token, "/auth-service/authorize", &request)
            .await?;

        if response.granted {
            Ok(())
        } else {
            Err(RingsError::denied(
                response
                    .reason
                    .unwrap_or_else(|| "gateway declined read access".to_string()),
            ))
        }
    }

    async fn fetch_summaries(&self, range: &DateRange) -> Result<Vec<RawDailySummary>> {
        let query = RangeQuery {
            start: DateComponents::from_date(range.start()),
            end: DateComponents::from_date(range.end()),
        };

        self.client
            .post_json(&self.token, "/activity-service/summaries/range", &query)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_range_query_serialization() {
        let start = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2023, 3, 5).unwrap();
        let query = RangeQuery {
            start: DateComponents::from_date(start),
            end: DateComponents::from_date(end),
        };

        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["start"]["year"], 2023);
        assert_eq!(json["start"]["month"], 3);
        assert_eq!(json["start"]["day"], 1);
        assert_eq!(json["start"]["era"], 1);
        assert_eq!(json["start"]["calendar"], "gregorian");
        assert_eq!(json["end"]["day"], 5);
    }

    #[test]
    fn test_authorize_request_shape() {
        let request = AuthorizeRequest {
            read: vec![ACTIVITY_SUMMARY_SCOPE],
            share: vec![],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["read"][0], "activity-summary");
        assert_eq!(json["share"].as_array().unwrap().len(), 0);
    }
}
