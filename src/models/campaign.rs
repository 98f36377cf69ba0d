use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::models::error::ApiError;

/// The closed set of campaign variants. Dispatch, validation, and child-table
/// routing all match on this enum, so the variant set cannot drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignType {
    #[serde(rename = "on-site")]
    OnSite,
    #[serde(rename = "sms")]
    Sms,
    #[serde(rename = "email")]
    Email,
    #[serde(rename = "voice")]
    Voice,
    #[serde(rename = "push")]
    Push,
}

impl CampaignType {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "on-site" => Some(CampaignType::OnSite),
            "sms" => Some(CampaignType::Sms),
            "email" => Some(CampaignType::Email),
            "voice" => Some(CampaignType::Voice),
            "push" => Some(CampaignType::Push),
            _ => None,
        }
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            CampaignType::OnSite => "on-site",
            CampaignType::Sms => "sms",
            CampaignType::Email => "email",
            CampaignType::Voice => "voice",
            CampaignType::Push => "push",
        }
    }

    pub fn child_table(&self) -> &'static str {
        match self {
            CampaignType::OnSite => "campaign_onsite",
            CampaignType::Sms => "campaign_sms",
            CampaignType::Email => "campaign_email",
            CampaignType::Voice => "campaign_voice",
            CampaignType::Push => "campaign_push",
        }
    }
}

impl Display for CampaignType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_tag())
    }
}

/// Inbound `POST /campaigns` body. The envelope fields are optional so that
/// their absence surfaces as a validation error rather than a deserialization
/// rejection; everything else is collected for the variant parser.
#[derive(Debug, Deserialize)]
pub struct CreateCampaignRequest {
    #[serde(rename = "type")]
    pub campaign_type: Option<String>,
    pub name: Option<String>,

    #[serde(flatten)]
    pub fields: Map<String, JsonValue>,
}

impl CreateCampaignRequest {
    /// Validates the envelope, then the variant payload. Envelope presence is
    /// checked before the type tag, and the type tag before any variant
    /// fields, so error precedence matches the API contract.
    pub fn validate(self) -> Result<(String, CampaignDetails), ApiError> {
        let (Some(tag), Some(name)) = (self.campaign_type, self.name) else {
            return Err(ApiError::MissingFields);
        };

        let campaign_type = CampaignType::from_tag(&tag).ok_or(ApiError::InvalidType)?;
        let details = CampaignDetails::from_payload(campaign_type, self.fields)?;

        Ok((name, details))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnSiteDetails {
    pub placeholder: String,
    pub component: String,
    pub width: String,
    pub height: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SmsDetails {
    pub message: String,
    pub sender_name: String,
    pub sender_phone: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailDetails {
    pub message: String,
    pub sender_name: String,
    pub sender_email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceDetails {
    pub audio_name: String,
    pub caller_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushDetails {
    pub message: String,
    pub sender: String,
}

// Wire shapes for sms and email: callers submit the sender as a nested
// object, which is flattened into sender_* columns on storage.

#[derive(Debug, Deserialize)]
struct SmsPayload {
    message: String,
    sender: SmsSender,
}

#[derive(Debug, Deserialize)]
struct SmsSender {
    name: String,
    phone: String,
}

#[derive(Debug, Deserialize)]
struct EmailPayload {
    message: String,
    sender: EmailSender,
}

#[derive(Debug, Deserialize)]
struct EmailSender {
    name: String,
    email: String,
}

/// Type-specific campaign fields, one variant per campaign type. Serializes
/// untagged so views stay flat.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum CampaignDetails {
    OnSite(OnSiteDetails),
    Sms(SmsDetails),
    Email(EmailDetails),
    Voice(VoiceDetails),
    Push(PushDetails),
}

impl CampaignDetails {
    /// Parses the variant payload selected by the type tag. Any missing or
    /// malformed required field maps to [`ApiError::MissingFields`].
    pub fn from_payload(
        campaign_type: CampaignType,
        fields: Map<String, JsonValue>,
    ) -> Result<Self, ApiError> {
        let fields = JsonValue::Object(fields);

        let details = match campaign_type {
            CampaignType::OnSite => CampaignDetails::OnSite(
                serde_json::from_value(fields).map_err(|_| ApiError::MissingFields)?,
            ),
            CampaignType::Sms => {
                let payload: SmsPayload =
                    serde_json::from_value(fields).map_err(|_| ApiError::MissingFields)?;
                CampaignDetails::Sms(SmsDetails {
                    message: payload.message,
                    sender_name: payload.sender.name,
                    sender_phone: payload.sender.phone,
                })
            }
            CampaignType::Email => {
                let payload: EmailPayload =
                    serde_json::from_value(fields).map_err(|_| ApiError::MissingFields)?;
                CampaignDetails::Email(EmailDetails {
                    message: payload.message,
                    sender_name: payload.sender.name,
                    sender_email: payload.sender.email,
                })
            }
            CampaignType::Voice => CampaignDetails::Voice(
                serde_json::from_value(fields).map_err(|_| ApiError::MissingFields)?,
            ),
            CampaignType::Push => CampaignDetails::Push(
                serde_json::from_value(fields).map_err(|_| ApiError::MissingFields)?,
            ),
        };

        Ok(details)
    }

    pub fn campaign_type(&self) -> CampaignType {
        match self {
            CampaignDetails::OnSite(_) => CampaignType::OnSite,
            CampaignDetails::Sms(_) => CampaignType::Sms,
            CampaignDetails::Email(_) => CampaignType::Email,
            CampaignDetails::Voice(_) => CampaignType::Voice,
            CampaignDetails::Push(_) => CampaignType::Push,
        }
    }
}

/// Merged read model: parent envelope plus the flat variant fields.
#[derive(Debug, Clone, Serialize)]
pub struct CampaignView {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub campaign_type: CampaignType,

    #[serde(flatten)]
    pub details: CampaignDetails,
}
