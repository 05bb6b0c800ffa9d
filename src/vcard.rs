//! Local vCard Generator
//!
//! Builds a minimal vCard 3.0 string from a card for the local QR-sharing
//! path. This is deliberately a separate codepath from the server's
//! `GET /cards/{id}/vcard` export and carries no byte-equality contract
//! with it.

use crate::card::Card;

/// NOTE line fallback for cards without notes
pub const NOTE_FALLBACK: &str = "Scanned with CardMate";

/// Render a card as a minimal vCard 3.0 QR payload.
///
/// Missing fields render as blank values rather than omitted lines; only the
/// first phone and email are included.
pub fn qr_payload(card: &Card) -> String {
    let phones = card.phone_list();
    let emails = card.email_list();
    let note = match card.notes.as_deref() {
        Some(n) if !n.is_empty() => n,
        _ => NOTE_FALLBACK,
    };
    format!(
        "BEGIN:VCARD\n\
         VERSION:3.0\n\
         FN:{}\n\
         ORG:{}\n\
         TITLE:{}\n\
         TEL:{}\n\
         EMAIL:{}\n\
         NOTE:{}\n\
         END:VCARD",
        card.name.as_deref().unwrap_or(""),
        card.company.as_deref().unwrap_or(""),
        card.designation.as_deref().unwrap_or(""),
        phones.first().map(String::as_str).unwrap_or(""),
        emails.first().map(String::as_str).unwrap_or(""),
        note,
    )
}
