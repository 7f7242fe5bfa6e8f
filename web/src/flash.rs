//! One-shot flash messages stored in the session.
//!
//! A mutating handler pushes a message before redirecting; the next list
//! render takes every pending message, which removes them from the session.

use crate::WebResult;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use tower_sessions::{cookie::SameSite, Expiry, MemoryStore, Session, SessionManagerLayer};

/// Shown after a successful add.
pub const TODO_ADDED: &str = "New todo added!";
/// Shown after a successful edit.
pub const TODO_EDITED: &str = "Todo edited!";
/// Shown after a todo is marked done.
pub const TODO_DONE: &str = "Todo done!";

const FLASH_KEY: &str = "flash.msg";

/// Build the session layer backing flash messages.
///
/// Sessions expire after `ttl_secs` of inactivity. Set `secure` when the app
/// is served over HTTPS.
#[must_use]
pub fn session_layer(ttl_secs: i64, secure: bool) -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_secure(secure)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::seconds(ttl_secs)))
}

/// Flash message access for a handler.
#[derive(Debug, Clone)]
pub struct Flash(Session);

impl Flash {
    /// Queue `message` for the next list render.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn push(&self, message: &str) -> WebResult<()> {
        let mut pending: Vec<String> = self.0.get(FLASH_KEY).await?.unwrap_or_default();
        pending.push(message.to_string());
        self.0.insert(FLASH_KEY, pending).await?;
        Ok(())
    }

    /// Take all pending messages, clearing them.
    ///
    /// A session left empty is deleted from the store, since the session
    /// layer only drops the cookie.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn take(&self) -> WebResult<Vec<String>> {
        let taken: Option<Vec<String>> = self.0.remove(FLASH_KEY).await?;
        if taken.is_some() && self.0.id().is_some() && self.0.is_empty().await {
            self.0.delete().await?;
        }
        Ok(taken.unwrap_or_default())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Session::from_request_parts(parts, state).await.map(Self)
    }
}
