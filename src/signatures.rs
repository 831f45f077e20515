//! Signature (certificate) operations.
//!
//! This module provides the SignaturesClient for issuing, listing and
//! activating the certificates users sign documents with.

use crate::client::Client;
use crate::error::{NopaperError, Result};
use crate::profiles::require_user;
use crate::types::{CertificateInfo, CreateSignatureRequest};
use reqwest::Method;
use serde::Deserialize;
use uuid::Uuid;

/// Client for signature operations.
///
/// Access via `client.signatures()`.
pub struct SignaturesClient {
    client: Client,
}

impl SignaturesClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Issue a new certificate for a user and return its id.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use nopaper::{AcceptanceActParty, Client, CreateSignatureRequest, SignatureType};
    /// use uuid::Uuid;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::new("partner-api-key")?;
    ///     let user_id = Uuid::parse_str("...")?;
    ///
    ///     let certificate_id = client.signatures().create(CreateSignatureRequest {
    ///         user_id,
    ///         acceptance_act_party: AcceptanceActParty::Client,
    ///         signature_type: SignatureType::Sms,
    ///     }).await?;
    ///
    ///     client.signatures().activate(&certificate_id).await?;
    ///     Ok(())
    /// }
    /// ```
    pub async fn create(&self, request: CreateSignatureRequest) -> Result<Uuid> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            certificate_id: Uuid,
        }

        require_user(&request.user_id)?;

        let response: Response = self
            .client
            .send(
                self.client
                    .request(
                        Method::POST,
                        &format!("/certificate/pay-control/{}", request.signature_type),
                    )
                    .query(&[
                        ("userGuid", request.user_id.to_string()),
                        (
                            "responsiblePartyForAcceptanceAct",
                            request.acceptance_act_party.as_u8().to_string(),
                        ),
                    ]),
            )
            .await?;

        Ok(response.certificate_id)
    }

    /// List the certificates of a user.
    pub async fn list(&self, user_id: &Uuid) -> Result<Vec<CertificateInfo>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            #[serde(default)]
            certificate_info_list: Option<Vec<CertificateInfo>>,
        }

        require_user(user_id)?;

        let response: Response = self
            .client
            .send(
                self.client
                    .request(Method::GET, "/certificate/list")
                    .query(&[("userGuid", user_id.to_string())]),
            )
            .await?;

        Ok(response.certificate_info_list.unwrap_or_default())
    }

    /// Activate a certificate.
    pub async fn activate(&self, certificate_id: &Uuid) -> Result<()> {
        if certificate_id.is_nil() {
            return Err(NopaperError::invalid("certificate id can not be nil"));
        }

        self.client
            .send_empty(self.client.request(
                Method::PATCH,
                &format!("/certificate/pay-control/{}/activate", certificate_id),
            ))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AcceptanceActParty, SignatureType};

    #[tokio::test]
    async fn test_nil_ids_rejected() {
        let client = Client::new("test_key").unwrap();
        let signatures = client.signatures();

        let created = signatures
            .create(CreateSignatureRequest {
                user_id: Uuid::nil(),
                acceptance_act_party: AcceptanceActParty::Client,
                signature_type: SignatureType::Server,
            })
            .await;
        assert!(matches!(created, Err(NopaperError::InvalidRequest(_))));

        assert!(matches!(
            signatures.list(&Uuid::nil()).await,
            Err(NopaperError::InvalidRequest(_))
        ));
        assert!(matches!(
            signatures.activate(&Uuid::nil()).await,
            Err(NopaperError::InvalidRequest(_))
        ));
    }
}
