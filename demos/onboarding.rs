//! Onboarding a signer.
//!
//! Registers the user if Nopaper does not know the phone yet, makes them an
//! employee of the partner company and issues an SMS certificate.
//!
//! Run with:
//! ```bash
//! NOPAPER_TOKEN=xxx SIGNER_PHONE=7XXXXXXXXXX cargo run --example onboarding
//! ```

use nopaper::{
    AcceptanceActParty, Client, CreateSignatureRequest, NopaperError, ProviderError,
    RegisterUserRequest, SignatureType, UserInfo,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = Client::new(std::env::var("NOPAPER_TOKEN")?)?;
    let phone = std::env::var("SIGNER_PHONE")?;

    let user_id = match client.profiles().user_id_by_phone(&phone).await {
        Ok(user_id) => {
            println!("Found existing profile {}", user_id);
            user_id
        }
        Err(NopaperError::Provider(ProviderError::ProfileNotFound)) => {
            println!("Registering {}...", phone);
            client
                .profiles()
                .register(RegisterUserRequest {
                    user_phone: phone.clone(),
                    user_info: UserInfo {
                        name: Some("Ivan".to_string()),
                        surname: Some("Ivanov".to_string()),
                        ..Default::default()
                    },
                    ..Default::default()
                })
                .await?
        }
        Err(e) => return Err(e.into()),
    };

    client.profiles().employ(&user_id).await?;

    let certificate_id = client
        .signatures()
        .create(CreateSignatureRequest {
            user_id,
            acceptance_act_party: AcceptanceActParty::Client,
            signature_type: SignatureType::Sms,
        })
        .await?;
    client.signatures().activate(&certificate_id).await?;

    for certificate in client.signatures().list(&user_id).await? {
        println!(
            "  {} status={:?} valid until {}",
            certificate.id,
            certificate.certificate_status(),
            certificate.valid_until_date_time_utc
        );
    }

    Ok(())
}
