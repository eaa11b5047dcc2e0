use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use tracing::debug;

use painkiller_types::api::Claims;

use crate::error::CredentialError;

/// HS256 signing and verification keys derived from one shared secret.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenKeys {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: a token is dead the second its `exp` passes.
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issue a token for `subject` that expires `ttl` from now.
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, CredentialError> {
        self.issue_at(subject, Utc::now(), ttl)
    }

    fn issue_at(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, CredentialError> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(CredentialError::ExpiryOutOfRange)?;
        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at.timestamp().max(0) as usize,
            exp: expires_at.timestamp().max(0) as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(CredentialError::Sign)
    }

    /// Check signature and expiry, returning the claims on success.
    pub fn validate(&self, token: &str) -> Result<Claims, CredentialError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!("Token rejected: {}", e);
                match e.kind() {
                    ErrorKind::ExpiredSignature => CredentialError::Expired,
                    _ => CredentialError::InvalidToken,
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_validates_to_subject() {
        let keys = TokenKeys::new("test-secret");
        let token = keys.issue("alice", Duration::minutes(30)).unwrap();

        let claims = keys.validate(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = TokenKeys::new("test-secret");
        let issued_at = Utc::now() - Duration::hours(2);
        let token = keys.issue_at("alice", issued_at, Duration::hours(1)).unwrap();

        assert!(matches!(keys.validate(&token), Err(CredentialError::Expired)));
    }

    #[test]
    fn oversized_ttl_is_an_error() {
        let keys = TokenKeys::new("test-secret");
        let res = keys.issue("alice", Duration::days(365 * 1_000_000));
        assert!(matches!(res, Err(CredentialError::ExpiryOutOfRange)));
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let ours = TokenKeys::new("test-secret");
        let theirs = TokenKeys::new("another-secret");
        let token = theirs.issue("alice", Duration::minutes(30)).unwrap();

        assert!(matches!(ours.validate(&token), Err(CredentialError::InvalidToken)));
    }

    #[test]
    fn garbage_is_rejected() {
        let keys = TokenKeys::new("test-secret");
        assert!(matches!(keys.validate("not.a.jwt"), Err(CredentialError::InvalidToken)));
        assert!(matches!(keys.validate(""), Err(CredentialError::InvalidToken)));
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let keys = TokenKeys::new("test-secret");
        let token = keys.issue("alice", Duration::minutes(30)).unwrap();
        let forged = keys.issue("mallory", Duration::minutes(30)).unwrap();

        // Splice mallory's payload onto alice's signature.
        let parts: Vec<&str> = token.split('.').collect();
        let forged_parts: Vec<&str> = forged.split('.').collect();
        let spliced = format!("{}.{}.{}", parts[0], forged_parts[1], parts[2]);

        assert!(matches!(keys.validate(&spliced), Err(CredentialError::InvalidToken)));
    }
}
