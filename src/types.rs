//! Type definitions for the Nopaper SDK.
//!
//! Request and response records mirror the provider's wire schema. Field
//! names are camelCase on the wire.

use crate::error::{NopaperError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use uuid::Uuid;

/// Provider identifier of a document chain.
pub type DocumentId = i64;

/// Signing route of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRouteType {
    /// Recipients sign in the order of the recipient list.
    Consistent,
    /// Recipients may sign in any order.
    Parallel,
}

impl DocumentRouteType {
    /// Wire value.
    pub fn as_u8(self) -> u8 {
        match self {
            DocumentRouteType::Consistent => 1,
            DocumentRouteType::Parallel => 2,
        }
    }
}

impl Serialize for DocumentRouteType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for DocumentRouteType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            1 => Ok(DocumentRouteType::Consistent),
            2 => Ok(DocumentRouteType::Parallel),
            other => Err(serde::de::Error::custom(format!(
                "unknown document route type {}",
                other
            ))),
        }
    }
}

/// Request to create a draft document.
///
/// A document is a chain of Word or PDF files.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDraftDocumentRequest {
    /// Name of the chain in the Nopaper UI.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// User creating the draft.
    #[serde(rename = "userGuid", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    /// Participants of the deal.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub recipient_info_list: Vec<RecipientInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_route_type: Option<DocumentRouteType>,
    /// Forbid route editing except by the document owner (or, for a legal
    /// entity owner, its authorized employees).
    #[serde(rename = "isDisableChange")]
    pub disable_change: bool,
}

/// A document participant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipientInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_inn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_type: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sign_type: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_kpp: Option<String>,
}

/// A file to upload, base64-encoded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileInfo {
    #[serde(rename = "fileNameWithExtension")]
    pub file_name_with_extension: String,
    #[serde(rename = "filebase64")]
    pub file_base64: String,
}

impl FileInfo {
    /// Encode raw file contents.
    pub fn from_bytes(file_name_with_extension: impl Into<String>, data: &[u8]) -> Self {
        Self {
            file_name_with_extension: file_name_with_extension.into(),
            file_base64: BASE64.encode(data),
        }
    }
}

/// Request to attach a file to a draft document.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachFileRequest {
    pub file_info: FileInfo,
}

impl From<FileInfo> for AttachFileRequest {
    fn from(file_info: FileInfo) -> Self {
        Self { file_info }
    }
}

/// File identifiers of a document, grouped by kind.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFileIds {
    #[serde(default, deserialize_with = "nullable")]
    pub origin_file_list: Vec<FileIdInfo>,
    #[serde(default, deserialize_with = "nullable")]
    pub origin_file_with_stamp_list: Vec<FileIdInfo>,
    #[serde(default, deserialize_with = "nullable")]
    pub oferta_list: Vec<FileIdInfo>,
    #[serde(default, deserialize_with = "nullable")]
    pub oferta_with_stamp_list: Vec<FileIdInfo>,
    #[serde(default, deserialize_with = "nullable")]
    pub procuratory_list: Vec<FileIdInfo>,
    #[serde(default, deserialize_with = "nullable")]
    pub procuratory_with_stamp_list: Vec<FileIdInfo>,
}

/// Identifier and metadata of a stored file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileIdInfo {
    /// Provider file id, not always a UUID.
    #[serde(deserialize_with = "nullable")]
    pub file_id: String,
    #[serde(deserialize_with = "nullable")]
    pub origin_name_with_extension: String,
    #[serde(deserialize_with = "nullable")]
    pub size_kb: i64,
    pub original_file_id: Option<Uuid>,
}

/// Reference to a file for download.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReference {
    pub file_id: String,
    pub document_id: DocumentId,
}

/// Downloaded file.
///
/// The download endpoint returns `fileId` as a UUID while the listing
/// endpoint returns it as a plain string, so compare via
/// `file_id.to_string()` against [`FileIdInfo::file_id`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileContent {
    #[serde(deserialize_with = "nullable")]
    pub file_id: Uuid,
    #[serde(deserialize_with = "nullable")]
    pub file_base64: String,
    #[serde(deserialize_with = "nullable")]
    pub file_name_with_extension: String,
}

impl FileContent {
    /// Decode the base64 payload.
    pub fn decode(&self) -> Result<Vec<u8>> {
        BASE64
            .decode(&self.file_base64)
            .map_err(|e| NopaperError::Decode(e.to_string()))
    }
}

/// Personal data of an individual profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patronymic: Option<String>,
    #[serde(default)]
    pub is_short_time_password: bool,
    /// Provider date-time string, e.g. `1990-01-01T00:00:00Z`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport_data: Option<PassportData>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassportData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuing_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer_department_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_place: Option<String>,
}

/// Request to register an individual profile.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserRequest {
    /// Phone in `7XXXXXXXXXX` form.
    pub user_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub user_info: UserInfo,
}

/// Request to update an existing profile.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchUserInfoRequest {
    #[serde(rename = "userGuid")]
    pub user_id: Uuid,
    #[serde(flatten)]
    pub user_info: UserInfo,
}

/// Kind of signature a certificate is issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureType {
    /// Organization signature, applied by the server.
    Server,
    /// Client signature confirmed by SMS code.
    Sms,
}

impl SignatureType {
    /// Path segment used by the API.
    pub fn as_str(self) -> &'static str {
        match self {
            SignatureType::Server => "pc-server",
            SignatureType::Sms => "pc-sms",
        }
    }
}

impl fmt::Display for SignatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side that generates the acceptance act for a new certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptanceActParty {
    /// Nopaper generates the act.
    Provider,
    /// The partner generates the act.
    Client,
}

impl AcceptanceActParty {
    /// Wire value.
    pub fn as_u8(self) -> u8 {
        match self {
            AcceptanceActParty::Provider => 1,
            AcceptanceActParty::Client => 2,
        }
    }
}

/// Request to issue a certificate for a user.
#[derive(Debug, Clone)]
pub struct CreateSignatureRequest {
    pub user_id: Uuid,
    pub acceptance_act_party: AcceptanceActParty,
    pub signature_type: SignatureType,
}

/// Lifecycle status of a certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateStatus {
    Template,
    Initialization,
    InitializationError,
    Available,
    Blocked,
    Revoked,
}

impl TryFrom<i32> for CertificateStatus {
    type Error = i32;

    fn try_from(value: i32) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(CertificateStatus::Template),
            2 => Ok(CertificateStatus::Initialization),
            3 => Ok(CertificateStatus::InitializationError),
            4 => Ok(CertificateStatus::Available),
            5 => Ok(CertificateStatus::Blocked),
            6 => Ok(CertificateStatus::Revoked),
            other => Err(other),
        }
    }
}

/// A signature certificate.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CertificateInfo {
    #[serde(rename = "certificateId", deserialize_with = "nullable")]
    pub id: Uuid,
    /// Raw status, see [`CertificateInfo::certificate_status`].
    #[serde(deserialize_with = "nullable")]
    pub status: i32,
    #[serde(deserialize_with = "nullable")]
    pub issued_date_time_utc: String,
    #[serde(deserialize_with = "nullable")]
    pub valid_until_date_time_utc: String,
    #[serde(deserialize_with = "nullable")]
    pub owner_name: String,
    #[serde(rename = "ownerGuid", deserialize_with = "nullable")]
    pub owner_id: Uuid,
    #[serde(deserialize_with = "nullable")]
    pub custom_data: CertificateCustomData,
    #[serde(deserialize_with = "nullable")]
    pub provider_type: i32,
}

impl CertificateInfo {
    /// Typed status, `None` for values the SDK does not know.
    pub fn certificate_status(&self) -> Option<CertificateStatus> {
        CertificateStatus::try_from(self.status).ok()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CertificateCustomData {
    #[serde(rename = "PCUserId", deserialize_with = "nullable")]
    pub pc_user_id: String,
    #[serde(rename = "SystemId", deserialize_with = "nullable")]
    pub system_id: String,
    #[serde(rename = "PublicKey", deserialize_with = "nullable")]
    pub public_key: String,
    #[serde(rename = "IssuingType", deserialize_with = "nullable")]
    pub issuing_type: i32,
}

/// Explicit `null` decodes as the default value.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
