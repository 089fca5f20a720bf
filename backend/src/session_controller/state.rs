//! Tracks the bearer tokens handed out to logged-in administrators.
//!
//! - `AdminSessions`: a clonable, thread-safe set of live tokens, shared with
//!   every actix worker through `AppState`. Tokens expire after a fixed
//!   lifetime even when nobody logs out.
//! - `password_matches`: the server-side password check. The secret never
//!   leaves the server.

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct AdminSessions {
    /// Tokens issued by `/api/admin/login` and not yet revoked, with the
    /// instant each one stops being accepted.
    ///
    /// Reads (token checks on upload) vastly outnumber writes, hence the
    /// `RwLock`.
    tokens: Arc<RwLock<HashMap<String, Instant>>>,
    ttl: Duration,
}

impl AdminSessions {
    pub fn new(ttl: Duration) -> Self {
        Self {
            tokens: Arc::default(),
            ttl,
        }
    }

    /// Issues a fresh random token and remembers it. Expired tokens are
    /// swept out on the way.
    pub async fn issue(&self) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        let now = Instant::now();
        let mut tokens = self.tokens.write().await;
        tokens.retain(|_, expires| *expires > now);
        tokens.insert(token.clone(), now + self.ttl);
        token
    }

    pub async fn is_valid(&self, token: &str) -> bool {
        self.tokens
            .read()
            .await
            .get(token)
            .is_some_and(|expires| *expires > Instant::now())
    }

    /// Forgets `token`. Returns whether it was live.
    pub async fn revoke(&self, token: &str) -> bool {
        self.tokens
            .write()
            .await
            .remove(token)
            .is_some_and(|expires| expires > Instant::now())
    }
}

/// Compares the MD5 digests of both inputs in constant time, so the time
/// taken does not depend on where the first differing byte is.
pub fn password_matches(candidate: &str, secret: &str) -> bool {
    let a = md5::compute(candidate.as_bytes());
    let b = md5::compute(secret.as_bytes());
    a.0.iter().zip(b.0.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
