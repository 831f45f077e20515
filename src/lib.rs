//! # Nopaper Rust SDK
//!
//! Rust SDK for the Nopaper partner API: electronic documents and digital
//! signatures.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nopaper::{Client, CreateDraftDocumentRequest, FileInfo, RecipientInfo};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a client with your partner API key
//!     let client = Client::new("partner-api-key")?;
//!
//!     // Create a draft and attach a file
//!     let document_id = client.documents().create_draft(CreateDraftDocumentRequest {
//!         title: Some("Lease agreement".to_string()),
//!         recipient_info_list: vec![RecipientInfo {
//!             user_phone: Some("71234567890".to_string()),
//!             ..Default::default()
//!         }],
//!         ..Default::default()
//!     }).await?;
//!
//!     let file = FileInfo::from_bytes("lease.pdf", &std::fs::read("lease.pdf")?);
//!     client.documents().attach_file(document_id, file.into()).await?;
//!
//!     // Send it to the recipients
//!     client.documents().activate(document_id).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Documents**: drafts, file upload and download, activation, SMS and
//!   server signing
//! - **Profiles**: lookup by phone, registration, updates, employment
//! - **Signatures**: issue, list and activate certificates
//! - **Hub**: callback URI
//!
//! ## Error Handling
//!
//! All operations return `Result<T, NopaperError>`. Provider error codes the
//! SDK knows map to [`ProviderError`]:
//!
//! ```rust,no_run
//! use nopaper::{Client, NopaperError, ProviderError};
//!
//! #[tokio::main]
//! async fn main() {
//!     let client = Client::new("partner-api-key").unwrap();
//!
//!     match client.profiles().user_id_by_phone("71234567890").await {
//!         Ok(id) => println!("User {}", id),
//!         Err(NopaperError::Provider(ProviderError::ProfileNotFound)) => println!("Unknown phone"),
//!         Err(NopaperError::Api { status_code, body, .. }) => println!("{}: {}", status_code, body),
//!         Err(e) => println!("Error: {}", e),
//!     }
//! }
//! ```

pub mod client;
pub mod documents;
pub mod error;
pub mod hub;
pub mod profiles;
pub mod signatures;
pub mod types;

// Re-export main types at the crate root
pub use client::{Client, ClientConfig};
pub use error::{ErrorCodeTable, NopaperError, ProviderError, Result};

pub use types::{
    AcceptanceActParty, AttachFileRequest, CertificateCustomData, CertificateInfo,
    CertificateStatus, CreateDraftDocumentRequest, CreateSignatureRequest, DocumentFileIds,
    DocumentId, DocumentRouteType, FileContent, FileIdInfo, FileInfo, FileReference,
    PassportData, PatchUserInfoRequest, RecipientInfo, RegisterUserRequest, SignatureType,
    UserInfo,
};
