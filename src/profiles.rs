//! Individual profile operations.
//!
//! This module provides the ProfilesClient for looking up, registering and
//! updating users, and for managing their employment in the partner company.

use crate::client::Client;
use crate::error::{NopaperError, Result};
use crate::types::{PatchUserInfoRequest, RegisterUserRequest};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client for profile operations.
///
/// Access via `client.profiles()`.
pub struct ProfilesClient {
    client: Client,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserGuidResponse {
    user_guid: Uuid,
}

impl ProfilesClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Look up the user registered for a phone number.
    ///
    /// Fails with [`ProviderError::ProfileNotFound`](crate::ProviderError::ProfileNotFound)
    /// when nobody is registered.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use nopaper::{Client, NopaperError, ProviderError};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::new("partner-api-key")?;
    ///
    ///     match client.profiles().user_id_by_phone("71234567890").await {
    ///         Ok(user_id) => println!("Registered: {}", user_id),
    ///         Err(NopaperError::Provider(ProviderError::ProfileNotFound)) => {
    ///             println!("Not registered yet")
    ///         }
    ///         Err(e) => return Err(e.into()),
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn user_id_by_phone(&self, phone: &str) -> Result<Uuid> {
        if phone.is_empty() {
            return Err(NopaperError::invalid("user phone can not be empty"));
        }

        let response: UserGuidResponse = self
            .client
            .send(
                self.client
                    .request(Method::GET, "/profile-fl/user-guid/by-phone")
                    .query(&[("userPhone", phone)]),
            )
            .await?;

        Ok(response.user_guid)
    }

    /// Register a new individual profile and return its id.
    ///
    /// The phone must be in `7XXXXXXXXXX` form.
    pub async fn register(&self, request: RegisterUserRequest) -> Result<Uuid> {
        if !request.user_phone.starts_with('7') {
            return Err(NopaperError::invalid("user phone must start with 7"));
        }

        let response: UserGuidResponse = self
            .client
            .send(
                self.client
                    .request(Method::POST, "/profile-fl")
                    .json(&request),
            )
            .await?;

        Ok(response.user_guid)
    }

    /// Update personal data of an existing profile.
    pub async fn patch(&self, request: PatchUserInfoRequest) -> Result<()> {
        require_user(&request.user_id)?;

        self.client
            .send_empty(
                self.client
                    .request(Method::PATCH, "/profile-fl")
                    .json(&request),
            )
            .await
    }

    /// Make a user an employee of the partner company.
    pub async fn employ(&self, user_id: &Uuid) -> Result<()> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Request<'a> {
            user_guid: &'a Uuid,
        }

        require_user(user_id)?;

        self.client
            .send_empty(
                self.client
                    .request(Method::POST, "/hub/employee")
                    .json(&Request { user_guid: user_id }),
            )
            .await
    }

    /// Remove a user from the partner company's employees.
    pub async fn fire(&self, user_id: &Uuid) -> Result<()> {
        require_user(user_id)?;

        self.client
            .send_empty(
                self.client
                    .request(Method::DELETE, "/hub/employee")
                    .query(&[("userGuid", user_id.to_string())]),
            )
            .await
    }
}

pub(crate) fn require_user(user_id: &Uuid) -> Result<()> {
    if user_id.is_nil() {
        return Err(NopaperError::invalid("user id can not be nil"));
    }
    Ok(())
}
