//! Document operations.
//!
//! This module provides the DocumentsClient for the document lifecycle:
//! creating a draft, attaching files, sending it to recipients and signing.

use crate::client::Client;
use crate::error::{NopaperError, Result};
use crate::types::{
    AttachFileRequest, CreateDraftDocumentRequest, DocumentFileIds, DocumentId, FileContent,
    FileReference,
};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Client for document operations.
///
/// Access via `client.documents()`.
pub struct DocumentsClient {
    client: Client,
}

impl DocumentsClient {
    pub(crate) fn new(client: Client) -> Self {
        Self { client }
    }

    /// Create a new draft document.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use nopaper::{Client, CreateDraftDocumentRequest, DocumentRouteType, RecipientInfo};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::new("partner-api-key")?;
    ///
    ///     let document_id = client.documents().create_draft(CreateDraftDocumentRequest {
    ///         title: Some("Lease agreement".to_string()),
    ///         recipient_info_list: vec![RecipientInfo {
    ///             user_phone: Some("71234567890".to_string()),
    ///             ..Default::default()
    ///         }],
    ///         document_route_type: Some(DocumentRouteType::Consistent),
    ///         ..Default::default()
    ///     }).await?;
    ///
    ///     println!("Draft: {}", document_id);
    ///     Ok(())
    /// }
    /// ```
    pub async fn create_draft(&self, request: CreateDraftDocumentRequest) -> Result<DocumentId> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            document_id: DocumentId,
        }

        let response: Response = self
            .client
            .send(
                self.client
                    .request(Method::POST, "/document/draft")
                    .json(&request),
            )
            .await?;

        Ok(response.document_id)
    }

    /// Attach a file to a draft document.
    pub async fn attach_file(
        &self,
        document_id: DocumentId,
        request: AttachFileRequest,
    ) -> Result<()> {
        require_document(document_id)?;
        if request.file_info.file_name_with_extension.is_empty() {
            return Err(NopaperError::invalid(
                "filename with extension can not be empty",
            ));
        }
        if request.file_info.file_base64.is_empty() {
            return Err(NopaperError::invalid("filebase64 can not be empty"));
        }

        self.client
            .send_empty(
                self.client
                    .request(Method::POST, &format!("/document/{}/file", document_id))
                    .json(&request),
            )
            .await
    }

    /// Activate a document, sending it to its recipients.
    pub async fn activate(&self, document_id: DocumentId) -> Result<()> {
        require_document(document_id)?;

        self.client
            .send_empty(
                self.client
                    .request(Method::POST, &format!("/document/{}/send", document_id)),
            )
            .await
    }

    /// Send the signing SMS to a recipient.
    ///
    /// The recipient then passes the received code to
    /// [`confirm_sms_signature`](Self::confirm_sms_signature).
    pub async fn start_sms_signature(
        &self,
        document_id: DocumentId,
        signature_id: &Uuid,
    ) -> Result<()> {
        require_document(document_id)?;
        require_signature(signature_id)?;

        self.client
            .send_empty(self.client.request(
                Method::POST,
                &format!("/document/{}/sign/pc-sms/{}", document_id, signature_id),
            ))
            .await
    }

    /// Confirm an SMS signature with the code the recipient received.
    pub async fn confirm_sms_signature(
        &self,
        document_id: DocumentId,
        signature_id: &Uuid,
        code: &str,
    ) -> Result<()> {
        #[derive(Serialize)]
        struct Request<'a> {
            code: &'a str,
        }

        require_document(document_id)?;
        require_signature(signature_id)?;
        if code.is_empty() {
            return Err(NopaperError::invalid("sms code can not be empty"));
        }

        self.client
            .send_empty(
                self.client
                    .request(
                        Method::POST,
                        &format!(
                            "/document/{}/sign/pc-sms/{}/confirm",
                            document_id, signature_id
                        ),
                    )
                    .json(&Request { code }),
            )
            .await
    }

    /// Sign a document with an organization (server) signature.
    pub async fn sign_with_server_signature(
        &self,
        document_id: DocumentId,
        signature_id: &Uuid,
    ) -> Result<()> {
        require_document(document_id)?;
        require_signature(signature_id)?;

        self.client
            .send_empty(self.client.request(
                Method::PUT,
                &format!("/document/{}/sign/pc-server/{}", document_id, signature_id),
            ))
            .await
    }

    /// List identifiers of all files in a document.
    pub async fn file_ids(&self, document_id: DocumentId) -> Result<DocumentFileIds> {
        require_document(document_id)?;

        self.client
            .send(self.client.request(
                Method::GET,
                &format!("/document/{}/file-info/list", document_id),
            ))
            .await
    }

    /// Download files by their identifiers.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use nopaper::{Client, FileReference};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = Client::new("partner-api-key")?;
    ///
    ///     let ids = client.documents().file_ids(42).await?;
    ///     let refs = ids
    ///         .origin_file_list
    ///         .iter()
    ///         .map(|f| FileReference { file_id: f.file_id.clone(), document_id: 42 })
    ///         .collect();
    ///
    ///     for file in client.documents().files_by_id(refs).await? {
    ///         std::fs::write(&file.file_name_with_extension, file.decode()?)?;
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn files_by_id(&self, files: Vec<FileReference>) -> Result<Vec<FileContent>> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Request {
            document_file_info_list: Vec<FileReference>,
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            #[serde(default)]
            file_info_list: Option<Vec<FileContent>>,
        }

        if files.is_empty() {
            return Err(NopaperError::invalid("file list can not be empty"));
        }

        let response: Response = self
            .client
            .send(
                self.client
                    .request(Method::POST, "/document/file/list")
                    .json(&Request {
                        document_file_info_list: files,
                    }),
            )
            .await?;

        Ok(response.file_info_list.unwrap_or_default())
    }
}

fn require_document(document_id: DocumentId) -> Result<()> {
    if document_id == 0 {
        return Err(NopaperError::invalid("document id is required"));
    }
    Ok(())
}

fn require_signature(signature_id: &Uuid) -> Result<()> {
    if signature_id.is_nil() {
        return Err(NopaperError::invalid("signature id can not be empty"));
    }
    Ok(())
}
