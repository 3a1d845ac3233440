// src/sheet_handler.rs
use reqwest::{Client, RequestBuilder};
use tracing::{debug, warn};

use crate::csv_handler::parse_csv;
use crate::data_types::{LoadError, TableData};

/// Public CORS relay; the export endpoint does not serve cross-origin
/// requests directly, so it is passed through as a query parameter.
const RELAY_URL: &str = "https://api.allorigins.win/raw";

/// Fetches a sheet's CSV export through the relay and parses it.
#[derive(Debug, Clone)]
pub struct SheetHandler {
    client: Client,
}

impl SheetHandler {
    pub fn new() -> Self {
        SheetHandler {
            client: Client::new(),
        }
    }

    /// One GET per invocation, no retry. An empty URL fails before any
    /// network I/O. Transport details stay in the diagnostic trace; callers
    /// only ever see the fixed `LoadError` variants.
    pub async fn fetch_data(&self, csv_url: &str) -> Result<TableData, LoadError> {
        if csv_url.is_empty() {
            return Err(LoadError::MissingUrl);
        }

        debug!(%csv_url, "fetching sheet through the relay");
        let response = self
            .relay_request(csv_url)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "relay request failed");
                LoadError::FetchFailed
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "relay returned a non-success status");
            return Err(LoadError::FetchFailed);
        }

        let text = response.text().await.map_err(|err| {
            warn!(error = %err, "reading the relay response body failed");
            LoadError::FetchFailed
        })?;

        parse_csv(&text)
    }

    fn relay_request(&self, csv_url: &str) -> RequestBuilder {
        self.client.get(RELAY_URL).query(&[("url", csv_url)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_url_fails_without_any_network_call() {
        let handler = SheetHandler::new();
        assert_eq!(handler.fetch_data("").await, Err(LoadError::MissingUrl));
    }

    #[test]
    fn relay_request_percent_encodes_the_export_url() {
        let handler = SheetHandler::new();
        let request = handler
            .relay_request("https://docs.google.com/spreadsheets/d/ABC123/export?format=csv&gid=0")
            .build()
            .expect("request");
        assert_eq!(
            request.url().as_str(),
            "https://api.allorigins.win/raw?url=\
             https%3A%2F%2Fdocs.google.com%2Fspreadsheets%2Fd%2FABC123%2Fexport%3Fformat%3Dcsv%26gid%3D0"
        );
    }
}
