/// Session context: credential decoding and lifecycle
///
/// This module decodes an opaque bearer credential into a read-only
/// identity and tracks the process-wide session state around it.
///
/// # Decoding
///
/// The credential is a three-part, `.`-delimited token whose middle
/// segment is base64url-encoded JSON with a `sub` claim (username) and a
/// `role` claim. Decoding is purely for UI gating: the signature is never
/// verified and expiry is never checked — that is the issuing service's
/// responsibility. Every parse failure recovers to "no identity".
///
/// # Lifecycle
///
/// ```text
/// new(store)  → restore persisted credential, decode
/// login(cred) → persist + decode
/// logout()    → erase + clear
/// ```
///
/// A credential that fails to decode stays persisted but leaves the
/// session unauthenticated: `is_authenticated` requires both the raw
/// credential and a decoded identity.
///
/// # Example
///
/// ```
/// use boardsync_shared::auth::session::{MemoryCredentialStore, SessionContext};
///
/// let mut session = SessionContext::new(Box::new(MemoryCredentialStore::default()));
/// assert!(!session.is_authenticated());
///
/// session.login("not-a-token");
/// assert!(!session.is_authenticated()); // stored, but undecodable
///
/// session.logout();
/// assert!(session.credential().is_none());
/// ```

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

use crate::models::Role;

/// Decoded identity derived from a credential
///
/// Never persisted; recomputed whenever the credential changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Username (the token's subject)
    pub username: String,

    /// Role claim, `Role::Unknown` when absent or unrecognized
    pub role: Role,
}

/// Claims the core cares about inside the token payload
#[derive(Debug, Deserialize)]
struct TokenClaims {
    sub: String,

    #[serde(default)]
    role: Role,
}

/// Decodes a bearer credential into an identity
///
/// Fails softly: a missing segment, bad base64, invalid JSON, or a
/// missing subject all yield `None`, never an error.
///
/// # Example
///
/// ```
/// use boardsync_shared::auth::session::decode_identity;
///
/// assert!(decode_identity(None).is_none());
/// assert!(decode_identity(Some("garbage")).is_none());
/// ```
pub fn decode_identity(credential: Option<&str>) -> Option<Identity> {
    let credential = credential?;
    let payload = credential.split('.').nth(1)?;

    // Tokens arrive unpadded, but stored copies may carry padding.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: TokenClaims = serde_json::from_slice(&bytes).ok()?;

    Some(Identity {
        username: claims.sub,
        role: claims.role,
    })
}

/// Persistence boundary for the session credential
///
/// Browser embedders back this with local storage; tests and other
/// embedders supply whatever backing they need.
pub trait CredentialStore: Send + Sync {
    /// Returns the persisted credential, if any
    fn load(&self) -> Option<String>;

    /// Persists the credential
    fn save(&self, credential: &str);

    /// Erases the persisted credential
    fn clear(&self);
}

/// In-memory credential store
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credential: std::sync::Mutex<Option<String>>,
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<String> {
        self.lock().clone()
    }

    fn save(&self, credential: &str) {
        *self.lock() = Some(credential.to_string());
    }

    fn clear(&self) {
        *self.lock() = None;
    }
}

impl MemoryCredentialStore {
    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.credential
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

/// Process-wide session state
///
/// Injected into the controller rather than reached through an ambient
/// singleton, so tests can run independent sessions side by side.
pub struct SessionContext {
    store: Box<dyn CredentialStore>,
    credential: Option<String>,
    identity: Option<Identity>,
}

impl SessionContext {
    /// Creates a session, restoring any persisted credential
    pub fn new(store: Box<dyn CredentialStore>) -> Self {
        let credential = store.load();
        let identity = decode_identity(credential.as_deref());

        if credential.is_some() && identity.is_none() {
            tracing::warn!("persisted credential failed to decode, treating as unauthenticated");
        }

        SessionContext {
            store,
            credential,
            identity,
        }
    }

    /// Stores a fresh credential and decodes it
    pub fn login(&mut self, credential: &str) {
        self.store.save(credential);
        self.credential = Some(credential.to_string());
        self.identity = decode_identity(Some(credential));

        match &self.identity {
            Some(identity) => {
                tracing::info!(username = %identity.username, role = identity.role.as_str(), "session started")
            }
            None => tracing::warn!("login credential failed to decode"),
        }
    }

    /// Erases the credential and clears the identity
    pub fn logout(&mut self) {
        self.store.clear();
        self.credential = None;
        self.identity = None;
        tracing::info!("session cleared");
    }

    /// Raw credential for the transport layer's Authorization header
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    /// Decoded identity, if the credential decoded
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Effective role for authorization checks
    ///
    /// Anonymous and undecodable sessions act as `Role::Unknown`.
    pub fn role(&self) -> Role {
        self.identity.as_ref().map(|i| i.role).unwrap_or(Role::Unknown)
    }

    /// True iff both a raw credential and a decoded identity are present
    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some() && self.identity.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_payload(payload: &str) -> String {
        format!("header.{}.signature", URL_SAFE_NO_PAD.encode(payload))
    }

    #[test]
    fn test_decode_valid_token() {
        let token = token_with_payload(r#"{"sub":"alice","role":"manager","exp":1}"#);
        let identity = decode_identity(Some(&token)).unwrap();
        assert_eq!(identity.username, "alice");
        assert_eq!(identity.role, Role::Manager);
    }

    #[test]
    fn test_decode_missing_role_defaults_to_unknown() {
        let token = token_with_payload(r#"{"sub":"bob"}"#);
        let identity = decode_identity(Some(&token)).unwrap();
        assert_eq!(identity.role, Role::Unknown);
    }

    #[test]
    fn test_decode_never_raises() {
        assert!(decode_identity(None).is_none());
        assert!(decode_identity(Some("")).is_none());
        assert!(decode_identity(Some("no-dots-here")).is_none());
        assert!(decode_identity(Some("a.!!!not-base64!!!.c")).is_none());

        // Valid base64, invalid JSON
        let token = format!("a.{}.c", URL_SAFE_NO_PAD.encode("not json"));
        assert!(decode_identity(Some(&token)).is_none());

        // Valid JSON, no subject
        let token = token_with_payload(r#"{"role":"admin"}"#);
        assert!(decode_identity(Some(&token)).is_none());
    }

    #[test]
    fn test_decode_tolerates_padded_payload() {
        use base64::engine::general_purpose::URL_SAFE;
        let padded = URL_SAFE.encode(r#"{"sub":"carol","role":"ceo"}"#);
        let token = format!("h.{}.s", padded);
        let identity = decode_identity(Some(&token)).unwrap();
        assert_eq!(identity.username, "carol");
        assert_eq!(identity.role, Role::Ceo);
    }

    #[test]
    fn test_session_restores_persisted_credential() {
        let store = MemoryCredentialStore::default();
        let token = token_with_payload(r#"{"sub":"alice","role":"admin"}"#);
        store.save(&token);

        let session = SessionContext::new(Box::new(store));
        assert!(session.is_authenticated());
        assert_eq!(session.role(), Role::Admin);
    }

    #[test]
    fn test_login_persists_and_decodes() {
        let mut session = SessionContext::new(Box::new(MemoryCredentialStore::default()));
        let token = token_with_payload(r#"{"sub":"alice","role":"manager"}"#);

        session.login(&token);
        assert!(session.is_authenticated());
        assert_eq!(session.identity().unwrap().username, "alice");
        assert_eq!(session.credential(), Some(token.as_str()));
    }

    #[test]
    fn test_undecodable_credential_is_stored_but_unauthenticated() {
        let mut session = SessionContext::new(Box::new(MemoryCredentialStore::default()));

        session.login("garbled");
        assert_eq!(session.credential(), Some("garbled"));
        assert!(session.identity().is_none());
        assert!(!session.is_authenticated());
        assert_eq!(session.role(), Role::Unknown);
    }

    #[test]
    fn test_logout_erases_everything() {
        let mut session = SessionContext::new(Box::new(MemoryCredentialStore::default()));
        session.login(&token_with_payload(r#"{"sub":"alice","role":"admin"}"#));
        assert!(session.is_authenticated());

        session.logout();
        assert!(!session.is_authenticated());
        assert!(session.credential().is_none());
        assert!(session.identity().is_none());
    }
}
