//! One-shot flash messages kept in the session.
//!
//! A handler pushes a message before redirecting; the next rendered page
//! takes (and thereby clears) every pending message. Flash storage is best
//! effort: session errors are logged and never fail the request.

use tower_sessions::Session;

use crate::models::session_keys;

/// Queue a message for the next rendered page.
pub async fn push_flash(session: &Session, message: impl Into<String>) {
    let mut messages = session
        .get::<Vec<String>>(session_keys::FLASH)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    messages.push(message.into());

    if let Err(e) = session.insert(session_keys::FLASH, messages).await {
        tracing::warn!("Failed to store flash message: {}", e);
    }
}

/// Take every pending message, leaving none behind.
pub async fn take_flashes(session: &Session) -> Vec<String> {
    match session.remove::<Vec<String>>(session_keys::FLASH).await {
        Ok(messages) => messages.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Failed to read flash messages: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_flashes_are_taken_once() {
        let session = session();
        push_flash(&session, "Account Created").await;
        push_flash(&session, "Welcome").await;

        assert_eq!(take_flashes(&session).await, ["Account Created", "Welcome"]);
        assert!(take_flashes(&session).await.is_empty());
    }
}
