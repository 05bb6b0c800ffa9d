//! Card Client
//!
//! Card operations against the backend: OCR scan upload, CRUD, owner and
//! favorite toggles, server vCard export, clear-all. Failure semantics
//! follow the app's propagation policy: write operations surface typed
//! errors, read operations degrade silently to sentinels so the view layer
//! never needs a catch around them.

use crate::card::{Card, CardDraft, ScanContext, ScanImage};
use crate::config::Config;
use crate::error::CardError;
use crate::http::backend_message;
use crate::session::SessionHandle;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

/// Envelope the backend wraps single-card responses in
#[derive(Debug, Deserialize)]
struct CardEnvelope {
    data: Card,
}

/// Scan responses are either `{data: Card}` or `{error: "..."}`, the latter
/// sometimes arriving with a 2xx status
#[derive(Debug, Deserialize)]
struct ScanEnvelope {
    #[serde(default)]
    data: Option<Card>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FavoriteResponse {
    is_favorite: bool,
}

/// Client for the card endpoints.
///
/// Holds a read-only [`SessionHandle`]; the bearer token is looked up at
/// call time, so a logout is observed by every request issued afterwards.
pub struct CardClient {
    http: reqwest::Client,
    config: Config,
    session: SessionHandle,
}

impl CardClient {
    pub fn new(config: Config, session: SessionHandle) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            session,
        }
    }

    /// Attach the bearer token when a session exists. Without one the
    /// request goes out unauthenticated and the 401 is handled per policy.
    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Upload an image for OCR, returning the created card.
    ///
    /// The backend's `{error}` body comes back as [`CardError::Backend`]
    /// with the message verbatim; timeouts map to [`CardError::Network`].
    pub async fn scan_card(
        &self,
        image: ScanImage,
        context: Option<ScanContext>,
    ) -> Result<Card, CardError> {
        tracing::debug!(file = %image.file_name, "uploading scan");
        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.mime_type)
            .map_err(|e| {
                tracing::warn!(error = %e, "invalid scan mime type");
                CardError::Network
            })?;
        let mut form = Form::new().part("file", part);
        if let Some(context) = context {
            if let Some(event_name) = context.event_name {
                form = form.text("event_name", event_name);
            }
            if let Some(lat) = context.location_lat {
                form = form.text("location_lat", lat.to_string());
            }
            if let Some(lng) = context.location_lng {
                form = form.text("location_lng", lng.to_string());
            }
            if let Some(location_name) = context.location_name {
                form = form.text("location_name", location_name);
            }
        }

        let response = self
            .authorized(self.http.post(self.config.api_url("/scan")))
            .timeout(self.config.get_scan_timeout())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "scan upload failed");
                CardError::Network
            })?;

        if !response.status().is_success() {
            return Err(CardError::backend(backend_message(response).await));
        }
        let envelope: ScanEnvelope = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "malformed scan response");
            CardError::Network
        })?;
        match (envelope.data, envelope.error) {
            (Some(card), _) => Ok(card),
            (None, Some(message)) => Err(CardError::backend(message)),
            (None, None) => {
                tracing::warn!("scan response carried neither data nor error");
                Err(CardError::Network)
            }
        }
    }

    /// Fetch all cards for the authenticated user, in server order.
    ///
    /// Empty on 401 or network failure; the backend is the source of truth
    /// and a reload goes through here.
    pub async fn list_cards(&self) -> Vec<Card> {
        let response = match self
            .authorized(self.http.get(self.config.api_url("/cards")))
            .timeout(self.config.get_request_timeout())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(error = %e, "card list fetch failed");
                return Vec::new();
            }
        };
        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "card list fetch degraded to empty");
            return Vec::new();
        }
        response.json().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "malformed card list response");
            Vec::new()
        })
    }

    /// Create a card manually (owner-authored e-card or hand-entered contact)
    pub async fn create_card(&self, draft: &CardDraft) -> Result<Card, CardError> {
        self.send_card(self.http.post(self.config.api_url("/cards")), draft)
            .await
    }

    /// Full-record overwrite of an existing card
    pub async fn update_card(&self, id: i64, draft: &CardDraft) -> Result<Card, CardError> {
        self.send_card(
            self.http.put(self.config.api_url(&format!("/cards/{}", id))),
            draft,
        )
        .await
    }

    async fn send_card(
        &self,
        request: reqwest::RequestBuilder,
        draft: &CardDraft,
    ) -> Result<Card, CardError> {
        let response = self
            .authorized(request)
            .timeout(self.config.get_request_timeout())
            .json(draft)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "card write failed");
                CardError::Network
            })?;

        if !response.status().is_success() {
            return Err(CardError::backend(backend_message(response).await));
        }
        let envelope: CardEnvelope = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "malformed card response");
            CardError::Network
        })?;
        Ok(envelope.data)
    }

    /// Delete a card. Idempotent from the client's view: a card that is
    /// already gone still reports success; only transport failure is false.
    pub async fn delete_card(&self, id: i64) -> bool {
        let response = match self
            .authorized(
                self.http
                    .delete(self.config.api_url(&format!("/cards/{}", id))),
            )
            .timeout(self.config.get_request_timeout())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, card_id = id, "card delete failed");
                return false;
            }
        };
        response.status().is_success() || response.status() == reqwest::StatusCode::NOT_FOUND
    }

    /// Flag a card as the user's own identity card.
    ///
    /// The backend flips the flag atomically (exactly one owner per user);
    /// local state is never updated optimistically. The fresh list returned
    /// here is the re-fetched authoritative state.
    pub async fn set_card_as_owner(&self, id: i64) -> Result<Vec<Card>, CardError> {
        let response = self
            .authorized(
                self.http
                    .post(self.config.api_url(&format!("/cards/{}/set-owner", id))),
            )
            .timeout(self.config.get_request_timeout())
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, card_id = id, "set-owner request failed");
                CardError::Network
            })?;

        if !response.status().is_success() {
            return Err(CardError::backend(backend_message(response).await));
        }
        Ok(self.list_cards().await)
    }

    /// Toggle a card's favorite flag, returning the resulting state from the
    /// server (not a local flip, so lost or duplicated toggles cannot drift).
    /// `None` on failure.
    pub async fn toggle_favorite(&self, id: i64) -> Option<bool> {
        let response = self
            .authorized(
                self.http
                    .post(self.config.api_url(&format!("/cards/{}/favorite", id))),
            )
            .timeout(self.config.get_request_timeout())
            .send()
            .await
            .map_err(|e| tracing::debug!(error = %e, card_id = id, "favorite toggle failed"))
            .ok()?;

        if !response.status().is_success() {
            return None;
        }
        let body: FavoriteResponse = response.json().await.ok()?;
        Some(body.is_favorite)
    }

    /// Fetch the server-rendered vCard export for a card.
    ///
    /// Distinct from [`crate::vcard::qr_payload`]; the two are not required
    /// to match byte-for-byte.
    pub async fn export_vcard(&self, id: i64) -> Option<String> {
        let response = self
            .authorized(
                self.http
                    .get(self.config.api_url(&format!("/cards/{}/vcard", id))),
            )
            .timeout(self.config.get_request_timeout())
            .send()
            .await
            .map_err(|e| tracing::debug!(error = %e, card_id = id, "vcard export failed"))
            .ok()?;

        if !response.status().is_success() {
            return None;
        }
        response.text().await.ok()
    }

    /// Delete every card belonging to the authenticated user
    pub async fn clear_cards(&self) -> bool {
        let response = match self
            .authorized(self.http.post(self.config.api_url("/cards/clear")))
            .timeout(self.config.get_request_timeout())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "clear-cards request failed");
                return false;
            }
        };
        response.status().is_success()
    }
}
