//! Signed invoice download links.
//!
//! A link is a JWT naming one invoice file. Only bare file names are ever
//! signed or served, so a token can never point outside the output directory.
//!
//! ```text
//! record sale ──► issue("Factura_000007_....pdf") ──► /api/invoices/<token>
//!                                                          │
//!                           resolve(token) ◄───────────────┘
//!                                │
//!                 bad signature / expired ──► InvalidInput
//!                 ok ──► file name ──► output_dir/<file name>
//! ```

use std::path::{Component, Path};

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Download link claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Invoice file name
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    pub jti: String,
}

/// Issues and checks invoice download tokens.
pub struct DownloadLinks {
    secret: String,
    lifetime_secs: i64,
}

impl DownloadLinks {
    pub fn new(secret: impl Into<String>, lifetime_secs: i64) -> Self {
        DownloadLinks {
            secret: secret.into(),
            lifetime_secs,
        }
    }

    /// Signs a token for `file_name`.
    pub fn issue(&self, file_name: &str) -> AppResult<String> {
        if !is_bare_file_name(file_name) {
            return Err(AppError::invalid_input(format!(
                "'{file_name}' is not a plain file name"
            )));
        }

        let now = Utc::now();
        let exp = now + Duration::seconds(self.lifetime_secs);
        let claims = Claims {
            sub: file_name.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::DocumentGenerationFailure(format!("Failed to sign link: {e}")))
    }

    /// Verifies `token` and returns the file name it grants.
    pub fn resolve(&self, token: &str) -> AppResult<String> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| AppError::invalid_input(format!("Invalid download link: {e}")))?;

        let file_name = data.claims.sub;
        if !is_bare_file_name(&file_name) {
            return Err(AppError::invalid_input("Invalid download link"));
        }
        Ok(file_name)
    }

    /// `/api/invoices/<token>` for `file_name`.
    pub fn download_url(&self, file_name: &str) -> AppResult<String> {
        Ok(format!("/api/invoices/{}", self.issue(file_name)?))
    }
}

/// True when `name` is a single normal path component.
fn is_bare_file_name(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
