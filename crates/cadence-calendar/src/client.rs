//! Remote calendar service client

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use crate::error::{CalendarError, Result};
use crate::models::{EventsPage, TimeWindow};

/// Maximum items requested per page
pub const PAGE_SIZE: u32 = 2500;

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/calendar/v3";

/// Remote event listing, one page per call.
///
/// The seam between ingestion and the calendar service; tests substitute
/// an in-memory implementation.
#[async_trait]
pub trait EventSource {
    /// Fetch one page of events within the window.
    ///
    /// Results are ordered by start time with recurring events expanded
    /// into single instances. `page_token` is absent on the first call;
    /// afterwards it is the cursor from the previous response.
    async fn list_events(
        &self,
        calendar_id: Option<&str>,
        window: TimeWindow,
        page_token: Option<&str>,
    ) -> Result<EventsPage>;
}

/// HTTP client for the calendar REST API.
///
/// Authenticates with an opaque bearer token acquired elsewhere; this
/// crate never constructs or refreshes credentials.
pub struct CalendarClient {
    client: Client,
    access_token: String,
    base_url: String,
}

impl CalendarClient {
    /// Create a client from an authenticated session token.
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(CalendarError::Http)?;

        Ok(Self {
            client,
            access_token: access_token.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Override the API endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl EventSource for CalendarClient {
    async fn list_events(
        &self,
        calendar_id: Option<&str>,
        window: TimeWindow,
        page_token: Option<&str>,
    ) -> Result<EventsPage> {
        let calendar = calendar_id.unwrap_or("primary");
        let url = format!("{}/calendars/{}/events", self.base_url, calendar);

        let mut params: Vec<(&str, String)> = vec![
            ("timeMin", window.start.to_rfc3339()),
            ("timeMax", window.end.to_rfc3339()),
            ("maxResults", PAGE_SIZE.to_string()),
            ("orderBy", "startTime".to_string()),
            ("singleEvents", "true".to_string()),
        ];
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }

        debug!("Fetching events page from: {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&params)
            .send()
            .await
            .map_err(CalendarError::Http)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Event listing failed: {} - {}", status, error_text);
            return Err(CalendarError::Api(format!("{}: {}", status, error_text)));
        }

        response
            .json::<EventsPage>()
            .await
            .map_err(|e| CalendarError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = CalendarClient::new("ya29.test-token");
        assert!(client.is_ok());
    }

    #[test]
    fn test_base_url_override() {
        let client = CalendarClient::new("t")
            .unwrap()
            .with_base_url("http://localhost:9999");
        assert_eq!(client.base_url, "http://localhost:9999");
    }
}
