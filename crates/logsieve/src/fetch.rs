//! Blacklist download and CSV export.
//!
//! A one-shot HTTP fetch of a newline-delimited IP blacklist, written out
//! as a single-column CSV. All outcomes, including failures, are reported
//! through the redacting pipeline, so error payloads that embed the API key
//! or headers never reach the sink unmasked.

use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;

use crate::error::{Error, Result};
use crate::pipeline::Logger;

/// Default blacklist endpoint.
pub const DEFAULT_BLACKLIST_URL: &str = "https://api.abuseipdb.com/api/v2/blacklist";

/// Header row of the exported CSV.
pub const CSV_HEADER: &str = "ipv4_address";

/// Request timeout for the one-shot fetch.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the blacklist endpoint.
#[derive(Debug)]
pub struct BlacklistClient {
    http: Client,
    url: String,
    api_key: String,
    limit: u32,
}

impl BlacklistClient {
    /// Create a client for the given endpoint and API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(url: impl Into<String>, api_key: impl Into<String>, limit: u32) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            url: url.into(),
            api_key: api_key.into(),
            limit,
        })
    }

    /// The endpoint this client fetches from.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the blacklist as a list of trimmed, non-empty addresses.
    ///
    /// The response body is read before success is decided, so the error
    /// branch only ever references a body it actually has.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails in transit or the endpoint
    /// answers with a non-success status.
    pub fn fetch(&self) -> Result<Vec<String>> {
        let response = self
            .http
            .get(&self.url)
            .header(ACCEPT, "text/plain")
            .header("Key", &self.api_key)
            .query(&[("limit", self.limit.to_string())])
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(Error::BlacklistStatus { status, body });
        }

        Ok(body
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }
}

/// Write the addresses to `path` as CSV with an `ipv4_address` header.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_csv(path: &Path, addresses: &[String]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([CSV_HEADER])?;
    for address in addresses {
        writer.write_record([address.as_str()])?;
    }
    writer.flush().map_err(Error::from)?;
    Ok(())
}

/// Fetch the blacklist and store it as CSV, reporting through `logger`.
///
/// Fetch and CSV failures are caught here: they are logged at Warn through
/// the redacting pipeline and the operation reports zero results instead of
/// failing. The returned count is the number of addresses stored.
///
/// # Errors
///
/// Returns an error only if logging itself fails (sink I/O).
pub fn fetch_and_store(client: &BlacklistClient, output: &Path, logger: &Logger) -> Result<usize> {
    logger.info(
        "fetch_and_store",
        format!("Attempting to fetch blacklist from {}", client.url()),
    )?;

    let addresses = match client.fetch() {
        Ok(addresses) => addresses,
        Err(e) => {
            logger.warn("fetch_and_store", format!("An error occurred: {e}"))?;
            if let Error::BlacklistStatus { body, .. } = &e {
                logger.warn("fetch_and_store", format!("Error response: {body}"))?;
            }
            return Ok(0);
        }
    };

    if let Err(e) = write_csv(output, &addresses) {
        logger.warn("fetch_and_store", format!("An error occurred: {e}"))?;
        return Ok(0);
    }

    logger.info(
        "fetch_and_store",
        format!(
            "Successfully saved {} addresses to {}",
            addresses.len(),
            output.display()
        ),
    )?;
    Ok(addresses.len())
}
