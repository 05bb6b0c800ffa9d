//! Card Data Model
//!
//! The backend stores multi-valued card attributes (phones, emails, ...) as
//! JSON-encoded strings inside an otherwise flat record. [`Card`] keeps those
//! columns raw so a record round-trips unchanged, and exposes decoded
//! accessors on top of the defensive list codec.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// A business-card contact record, OCR-derived or manually authored.
///
/// Every field except `id` is optional or defaulted: the client must accept
/// whatever shape the backend returns without failing deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Card {
    /// Server-assigned identifier
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,

    /// JSON-encoded list of strings, as stored by the backend
    #[serde(default)]
    pub phones: Option<String>,
    #[serde(default)]
    pub emails: Option<String>,
    #[serde(default)]
    pub websites: Option<String>,
    #[serde(default)]
    pub addresses: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,

    /// Whether this card represents the authenticated user's own identity.
    /// At most one card per user is the owner; the backend enforces it.
    #[serde(default)]
    pub is_owner: bool,
    #[serde(default)]
    pub is_favorite: bool,

    /// Capture-context metadata, set at creation and immutable afterwards
    #[serde(default)]
    pub event_name: Option<String>,
    #[serde(default)]
    pub location_lat: Option<f64>,
    #[serde(default)]
    pub location_lng: Option<f64>,
    #[serde(default)]
    pub location_name: Option<String>,

    /// Mean OCR confidence in 0.0..=1.0; zero for manually created cards
    #[serde(default)]
    pub ocr_avg_confidence: f64,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Card {
    /// Decoded phone numbers
    pub fn phone_list(&self) -> Vec<String> {
        decode_list(self.phones.as_deref())
    }

    /// Decoded email addresses
    pub fn email_list(&self) -> Vec<String> {
        decode_list(self.emails.as_deref())
    }

    /// Decoded website URLs
    pub fn website_list(&self) -> Vec<String> {
        decode_list(self.websites.as_deref())
    }

    /// Decoded postal addresses
    pub fn address_list(&self) -> Vec<String> {
        decode_list(self.addresses.as_deref())
    }

    /// Decoded tags
    pub fn tag_list(&self) -> Vec<String> {
        decode_list(self.tags.as_deref())
    }

    /// Display name or a placeholder for cards the OCR could not name
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}

/// Decode a JSON-encoded list column.
///
/// Absent, empty, or malformed input yields an empty list; this never fails.
pub fn decode_list(raw: Option<&str>) -> Vec<String> {
    let raw = match raw {
        Some(s) if !s.is_empty() => s,
        _ => return Vec::new(),
    };
    serde_json::from_str(raw).unwrap_or_default()
}

/// Encode a list of strings into the backend's JSON column format.
///
/// Entries are trimmed and blank ones dropped, matching how edit payloads
/// are built from comma-separated free text.
pub fn encode_list<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let cleaned: Vec<String> = items
        .into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    serde_json::to_string(&cleaned).unwrap_or_else(|_| "[]".to_string())
}

/// Split comma-separated free text into list entries (edit-form input)
pub fn split_free_text(text: &str) -> Vec<String> {
    text.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn serialize_encoded_list<S: Serializer>(items: &[String], ser: S) -> Result<S::Ok, S::Error> {
    ser.serialize_str(&encode_list(items))
}

/// Payload for creating or updating a card (full-record overwrite).
///
/// List-typed attributes are held decoded and JSON-encoded on serialization,
/// so a draft built from a fetched [`Card`] round-trips symmetrically.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct CardDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(serialize_with = "serialize_encoded_list")]
    pub phones: Vec<String>,
    #[serde(serialize_with = "serialize_encoded_list")]
    pub emails: Vec<String>,
    #[serde(serialize_with = "serialize_encoded_list")]
    pub websites: Vec<String>,
    #[serde(serialize_with = "serialize_encoded_list")]
    pub addresses: Vec<String>,
    #[serde(serialize_with = "serialize_encoded_list")]
    pub tags: Vec<String>,
}

impl CardDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an edit draft from an existing card
    pub fn from_card(card: &Card) -> Self {
        Self {
            name: card.name.clone(),
            designation: card.designation.clone(),
            company: card.company.clone(),
            notes: card.notes.clone(),
            phones: card.phone_list(),
            emails: card.email_list(),
            websites: card.website_list(),
            addresses: card.address_list(),
            tags: card.tag_list(),
        }
    }
}

/// Image payload for an OCR scan upload
#[derive(Debug, Clone)]
pub struct ScanImage {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

impl ScanImage {
    /// JPEG capture, named the way the mobile uploader names files
    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            file_name: "upload.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
        }
    }

    pub fn png(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            file_name: "upload.png".to_string(),
            mime_type: "image/png".to_string(),
        }
    }
}

/// Optional capture context attached to a scan
#[derive(Debug, Clone, Default)]
pub struct ScanContext {
    pub event_name: Option<String>,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub location_name: Option<String>,
}
