//! CardMate Client Library
//!
//! A thin typed client for the CardMate business-card scanning backend:
//! capture an image, let the backend OCR it into a contact card, then
//! browse, edit, favorite, and export the results.
//!
//! # Overview
//!
//! The crate mirrors the app's three thin layers:
//!
//! - **`auth`** - register/login/logout, session persistence, current-user
//!   check, account deletion
//! - **`cards`** - OCR scan upload, card CRUD, favorite/owner toggles,
//!   server vCard export
//! - **`card`** / **`vcard`** - the card data model, the defensive
//!   JSON-list codec, and the local QR vCard builder
//!
//! All OCR and parsing happens server-side; this crate is request/response
//! plumbing plus data normalization.
//!
//! # Usage
//!
//! ```rust,no_run
//! use cardmate::{AuthClient, CardClient, Config};
//!
//! # async fn example() {
//! let auth = AuthClient::new(Config::with_base_url("http://10.0.0.5:5000"));
//! let session = auth.login("jane@acme.com", "hunter2").await.unwrap();
//! let cards = CardClient::new(Config::with_base_url("http://10.0.0.5:5000"), auth.session());
//! for card in cards.list_cards().await {
//!     println!("{}", card.display_name());
//! }
//! # }
//! ```
//!
//! # Error Handling
//!
//! Write operations surface typed errors ([`AuthError`], [`AccountError`],
//! [`CardError`]); read operations degrade silently to sentinels (empty
//! list, `None`, `false`) so session expiry never turns into an alert. No
//! operation is retried automatically, and rapid duplicate submissions are
//! not deduplicated.

/// Auth client and user settings
pub mod auth;
/// Card data model and list-field codec
pub mod card;
/// Card client
pub mod cards;
/// Client configuration
pub mod config;
/// Error taxonomy
pub mod error;
/// Session state and persistence
pub mod session;
/// Local QR vCard builder
pub mod vcard;

mod http;

pub use auth::{AuthClient, UserSettings};
pub use card::{Card, CardDraft, ScanContext, ScanImage};
pub use cards::CardClient;
pub use config::Config;
pub use error::{AccountError, AuthError, CardError};
pub use session::{Session, SessionHandle, SessionStore, User};
