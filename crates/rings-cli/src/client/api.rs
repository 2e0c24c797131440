//! Health gateway API client for authenticated requests
//!
//! This module provides a thin client for the health gateway's HTTP API,
//! attaching the bearer token and mapping response statuses to the error
//! taxonomy in one place.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::client::tokens::AccessToken;
use crate::error::{Result, RingsError};

/// User agent for gateway requests
const GATEWAY_USER_AGENT: &str = "rings-cli/0.1";

/// Health gateway API client
pub struct GatewayClient {
    client: Client,
    base_url: String,
}

impl GatewayClient {
    /// Create a new client for the given base URL
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build the full URL for a given path
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build headers with authorization
    fn build_headers(&self, token: &AccessToken) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(GATEWAY_USER_AGENT));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&token.authorization_header())
                .map_err(|e| RingsError::config(format!("Invalid access token: {}", e)))?,
        );
        Ok(headers)
    }

    /// Make an authenticated GET request and deserialize the JSON response
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        path: &str,
    ) -> Result<T> {
        let url = self.build_url(path);
        let headers = self.build_headers(token)?;

        let response = self.client.get(&url).headers(headers).send().await?;
        let response = self.handle_response_status(response).await?;

        response.json().await.map_err(|e| {
            RingsError::query(format!("Failed to parse gateway response: {}", e))
        })
    }

    /// Make an authenticated POST request with a JSON body and deserialize
    /// the JSON response
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.build_url(path);
        let headers = self.build_headers(token)?;

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(body)
            .send()
            .await?;
        let response = self.handle_response_status(response).await?;

        response.json().await.map_err(|e| {
            RingsError::query(format!("Failed to parse gateway response: {}", e))
        })
    }

    /// Handle response status codes and convert to errors
    async fn handle_response_status(&self, response: Response) -> Result<Response> {
        let status = response.status();

        match status {
            StatusCode::OK | StatusCode::CREATED | StatusCode::NO_CONTENT => Ok(response),
            StatusCode::UNAUTHORIZED => Err(RingsError::NotAuthenticated),
            StatusCode::FORBIDDEN => {
                let body = response.text().await.unwrap_or_default();
                Err(RingsError::denied(if body.is_empty() {
                    "gateway rejected the request".to_string()
                } else {
                    body
                }))
            }
            StatusCode::SERVICE_UNAVAILABLE => {
                let body = response.text().await.unwrap_or_default();
                Err(RingsError::unavailable(if body.is_empty() {
                    "gateway reported service unavailable".to_string()
                } else {
                    body
                }))
            }
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(RingsError::query(format!(
                    "gateway error {}: {}",
                    status, body
                )))
            }
        }
    }
}
