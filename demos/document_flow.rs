//! Document signing flow against the Nopaper demo stand.
//!
//! This example demonstrates:
//! - Creating a draft document for a recipient
//! - Attaching a PDF
//! - Activating the document
//! - Signing it with an SMS signature
//!
//! Run with:
//! ```bash
//! NOPAPER_TOKEN=xxx SIGNER_PHONE=7XXXXXXXXXX PDF_PATH=contract.pdf \
//!     cargo run --example document_flow
//! ```

use nopaper::{
    Client, ClientConfig, CreateDraftDocumentRequest, DocumentRouteType, FileInfo, RecipientInfo,
};
use std::io::BufRead;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let token = std::env::var("NOPAPER_TOKEN")?;
    let phone = std::env::var("SIGNER_PHONE")?;
    let pdf_path = std::env::var("PDF_PATH")?;

    let client = Client::with_config(ClientConfig {
        url: std::env::var("NOPAPER_URL").unwrap_or_else(|_| nopaper::client::DEFAULT_BASE_URL.to_string()),
        token,
        ..Default::default()
    })?;

    println!("Looking up signer {}...", phone);
    let user_id = client.profiles().user_id_by_phone(&phone).await?;

    let certificates = client.signatures().list(&user_id).await?;
    let Some(certificate) = certificates.first() else {
        println!("Signer has no certificates, run the onboarding example first.");
        return Ok(());
    };

    println!("\nCreating draft...");
    let document_id = client
        .documents()
        .create_draft(CreateDraftDocumentRequest {
            title: Some("SDK example".to_string()),
            recipient_info_list: vec![RecipientInfo {
                user_phone: Some(phone.clone()),
                ..Default::default()
            }],
            document_route_type: Some(DocumentRouteType::Consistent),
            ..Default::default()
        })
        .await?;
    println!("  Document: {}", document_id);

    let file_name = std::path::Path::new(&pdf_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.pdf".to_string());
    let file = FileInfo::from_bytes(file_name, &std::fs::read(&pdf_path)?);
    client.documents().attach_file(document_id, file.into()).await?;
    client.documents().activate(document_id).await?;

    println!("\nSending signing SMS...");
    client
        .documents()
        .start_sms_signature(document_id, &certificate.id)
        .await?;

    println!("Enter the SMS code:");
    let mut code = String::new();
    std::io::stdin().lock().read_line(&mut code)?;
    client
        .documents()
        .confirm_sms_signature(document_id, &certificate.id, code.trim())
        .await?;

    let ids = client.documents().file_ids(document_id).await?;
    println!("\nSigned. Stamped files: {}", ids.origin_file_with_stamp_list.len());
    for file in &ids.origin_file_with_stamp_list {
        println!("  - {} ({} KB)", file.origin_name_with_extension, file.size_kb);
    }

    Ok(())
}
