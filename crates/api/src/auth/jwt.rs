//! Validation of the HS256 access tokens issued by the identity provider.
//!
//! The provider and this server share a secret. Users are identified by the
//! provider's UUID (`sub`); there are no passwords or refresh tokens here.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use survex_core::types::UserId;

/// The only signing algorithm accepted.
const ALGORITHM: Algorithm = Algorithm::HS256;

const DEFAULT_LEEWAY_SECS: u64 = 60;

/// Claims the provider puts in every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: UserId,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Unix seconds.
    pub exp: i64,
    /// Unix seconds.
    pub iat: i64,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret shared with the identity provider.
    pub secret: String,
    /// Clock skew tolerated on `exp`, in seconds.
    pub leeway_secs: u64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required, non-empty) and `JWT_LEEWAY_SECS`
    /// (default 60).
    ///
    /// # Panics
    ///
    /// Panics when the secret is missing or empty, or the leeway is not a
    /// number.
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET").unwrap_or_default();
        assert!(!secret.is_empty(), "JWT_SECRET must be set and non-empty");

        let leeway_secs = match std::env::var("JWT_LEEWAY_SECS") {
            Ok(raw) => raw
                .parse()
                .unwrap_or_else(|_| panic!("JWT_LEEWAY_SECS must be a whole number, got {raw:?}")),
            Err(_) => DEFAULT_LEEWAY_SECS,
        };

        Self {
            secret,
            leeway_secs,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = self.leeway_secs;
        validation.set_required_spec_claims(&["exp", "sub"]);
        validation
    }
}

/// Sign a token the way the provider does, valid for `ttl_secs`.
///
/// Real tokens come from the provider; tests and local tooling that know the
/// secret use this.
pub fn generate_token(
    user_id: UserId,
    email: &str,
    full_name: Option<&str>,
    ttl_secs: i64,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        email: email.to_owned(),
        full_name: full_name.map(str::to_owned),
        exp: iat + ttl_secs,
        iat,
    };
    encode(
        &Header::new(ALGORITHM),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check signature, algorithm and expiry, and return the claims.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(config.secret.as_bytes());
    decode::<Claims>(token, &key, &config.validation()).map(|data| data.claims)
}
