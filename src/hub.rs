//! Partner hub settings.

use crate::client::Client;
use crate::error::{NopaperError, Result};
use reqwest::Method;

/// Client for partner-level settings.
///
/// Access via `client.hub()`.
pub struct HubClient {
    client: Client,
}

impl HubClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Set the URI Nopaper posts document events to.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use nopaper::Client;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::new("partner-api-key")?;
    ///     client.hub().set_callback_uri("https://partner.example.com/nopaper/events").await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn set_callback_uri(&self, uri: &str) -> Result<()> {
        if uri.is_empty() {
            return Err(NopaperError::invalid("callback uri can not be empty"));
        }

        self.client
            .send_empty(
                self.client
                    .request(Method::PATCH, "/hub/callback-uri")
                    .query(&[("uri", uri)]),
            )
            .await
    }
}
