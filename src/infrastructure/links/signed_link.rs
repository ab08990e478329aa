use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    errors::AppError,
    settings::{AppConfig, LinkKeys},
};

/// Claims carried by a signed update-form link. `sub` is the student number
/// the capability is scoped to.
#[derive(Debug, Serialize, Deserialize)]
struct LinkClaims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Issues and verifies the capability tokens embedded in emailed
/// self-service links. A token grants a one-off update of exactly one
/// record, without any login session.
#[derive(Clone)]
pub struct SignedLinkService {
    keys: LinkKeys,
    expiry: Duration,
    base_url: Url,
}

impl SignedLinkService {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let base_url = Url::parse(&config.public_base_url)
            .map_err(|e| AppError::InternalError(format!("invalid public base URL: {e}")))?;

        Ok(SignedLinkService {
            keys: LinkKeys::from(config),
            expiry: Duration::days(config.link_expiry_days),
            base_url,
        })
    }

    pub fn issue(&self, student_number: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = LinkClaims {
            sub: student_number.to_string(),
            iat: now.timestamp(),
            exp: (now + self.expiry).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| AppError::InternalError(format!("failed to sign link token: {e}")))
    }

    /// Rejects expired tokens, bad signatures, and tokens minted for a
    /// different student number.
    pub fn verify(&self, token: &str, student_number: &str) -> Result<(), AppError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<LinkClaims>(token, &self.keys.decoding, &validation)
            .map_err(|_| AppError::Forbidden("Invalid or expired link.".into()))?;

        if data.claims.sub != student_number {
            return Err(AppError::Forbidden("Invalid or expired link.".into()));
        }

        Ok(())
    }

    /// Full signed URL for one record's update form, the thing the bulk
    /// mailer drops into an email.
    pub fn update_url(&self, student_number: &str) -> Result<Url, AppError> {
        let token = self.issue(student_number)?;

        let mut url = self
            .base_url
            .join(&format!("alumni-update-form/{student_number}"))
            .map_err(|e| AppError::InternalError(format!("failed to build update link: {e}")))?;
        url.query_pairs_mut().append_pair("signature", &token);

        Ok(url)
    }
}
