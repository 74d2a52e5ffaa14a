//! Minting and validation of signed, time-bound credentials.
//!
//! Credentials are standard three-segment JWS strings signed with an
//! HMAC-SHA-2 key, so any compliant library holding the secret can decode
//! them. Nothing is stored server-side: validity is the signature plus the
//! `exp` claim, checked with zero leeway.

use std::time::Duration;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::Serialize;

use super::claims::{ClaimsInput, TokenClaims, TokenKind};
use super::error::TokenError;
use crate::config::{env_optional, env_or, env_required, ConfigError};

/// Default access token lifetime in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: u64 = 30;
/// Default refresh token lifetime in minutes (7 days).
const DEFAULT_REFRESH_EXPIRY_MINS: u64 = 60 * 24 * 7;
/// Default email verification token lifetime in minutes.
const DEFAULT_VERIFICATION_EXPIRY_MINS: u64 = 5;

/// Configuration for token signing and lifetimes.
#[derive(Clone)]
pub struct JwtConfig {
    /// Symmetric key used to sign and verify tokens.
    pub secret: String,
    /// Signing algorithm; always one of the HMAC-SHA-2 family.
    pub algorithm: Algorithm,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub verification_token_ttl: Duration,
    /// Written as `iss` and required on decode when set.
    pub issuer: Option<String>,
    /// Written as `aud` and required on decode when set.
    pub audience: Option<String>,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("verification_token_ttl", &self.verification_token_ttl)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl JwtConfig {
    /// Config with the given secret, HS256 and the default lifetimes.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: Algorithm::HS256,
            access_token_ttl: minutes(DEFAULT_ACCESS_EXPIRY_MINS),
            refresh_token_ttl: minutes(DEFAULT_REFRESH_EXPIRY_MINS),
            verification_token_ttl: minutes(DEFAULT_VERIFICATION_EXPIRY_MINS),
            issuer: None,
            audience: None,
        }
    }

    /// Load token configuration from environment variables.
    ///
    /// | Env Var                             | Required | Default  |
    /// |-------------------------------------|----------|----------|
    /// | `SECRET_KEY`                        | **yes**  | --       |
    /// | `ALGORITHM`                         | no       | `HS256`  |
    /// | `ACCESS_TOKEN_EXPIRE_MINUTES`       | no       | `30`     |
    /// | `REFRESH_TOKEN_EXPIRE_MINUTES`      | no       | `10080`  |
    /// | `VERIFICATION_TOKEN_EXPIRE_MINUTES` | no       | `5`      |
    /// | `JWT_ISSUER`                        | no       | --       |
    /// | `JWT_AUDIENCE`                      | no       | --       |
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("SECRET_KEY")?;
        let raw_algorithm: String = env_or("ALGORITHM", "HS256".to_string())?;
        let algorithm = parse_hmac_algorithm(&raw_algorithm)?;

        let access_mins = positive_minutes(
            "ACCESS_TOKEN_EXPIRE_MINUTES",
            env_or("ACCESS_TOKEN_EXPIRE_MINUTES", DEFAULT_ACCESS_EXPIRY_MINS)?,
        )?;
        let refresh_mins = positive_minutes(
            "REFRESH_TOKEN_EXPIRE_MINUTES",
            env_or("REFRESH_TOKEN_EXPIRE_MINUTES", DEFAULT_REFRESH_EXPIRY_MINS)?,
        )?;
        let verification_mins = positive_minutes(
            "VERIFICATION_TOKEN_EXPIRE_MINUTES",
            env_or(
                "VERIFICATION_TOKEN_EXPIRE_MINUTES",
                DEFAULT_VERIFICATION_EXPIRY_MINS,
            )?,
        )?;

        Ok(Self {
            secret,
            algorithm,
            access_token_ttl: minutes(access_mins),
            refresh_token_ttl: minutes(refresh_mins),
            verification_token_ttl: minutes(verification_mins),
            issuer: env_optional("JWT_ISSUER"),
            audience: env_optional("JWT_AUDIENCE"),
        })
    }
}

fn minutes(mins: u64) -> Duration {
    Duration::from_secs(mins * 60)
}

fn positive_minutes(key: &'static str, mins: u64) -> Result<u64, ConfigError> {
    if mins == 0 {
        return Err(ConfigError::Invalid {
            key,
            value: "0".into(),
            reason: "lifetime must be at least one minute".into(),
        });
    }
    Ok(mins)
}

/// Accept only `HS256`, `HS384` or `HS512`.
pub fn parse_hmac_algorithm(raw: &str) -> Result<Algorithm, ConfigError> {
    match raw {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(ConfigError::Invalid {
            key: "ALGORITHM",
            value: other.to_string(),
            reason: "expected one of HS256, HS384, HS512".into(),
        }),
    }
}

/// An access/refresh credential pair returned at login and refresh.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
}

/// Wire payload: the kind-tagged claims plus the optional `iss` and `aud`.
#[derive(Serialize)]
struct SignedClaims<'a> {
    #[serde(flatten)]
    claims: &'a TokenClaims,
    #[serde(skip_serializing_if = "Option::is_none")]
    iss: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aud: Option<&'a str>,
}

/// Mints and validates credentials with an injected [`JwtConfig`].
///
/// Holds only immutable keys and configuration; share it behind an `Arc`.
#[derive(Clone)]
pub struct TokenService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        // Only the configured algorithm is accepted; `iat` and `kind` are
        // enforced by deserializing into `TokenClaims`.
        let mut validation = Validation::new(config.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;

        let mut required = vec!["exp", "sub"];
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
            required.push("iss");
        }
        if let Some(audience) = &config.audience {
            validation.set_audience(&[audience]);
            required.push("aud");
        }
        validation.set_required_spec_claims(&required);

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Access token lifetime in whole seconds, reported as `expires_in`.
    pub fn access_ttl_secs(&self) -> u64 {
        self.config.access_token_ttl.as_secs()
    }

    /// Sign a `kind` credential for `input` valid for `ttl` from now.
    pub fn mint(
        &self,
        input: &ClaimsInput,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let ttl_secs = i64::try_from(ttl.as_secs()).map_err(|_| TokenError::InvalidTtl(ttl))?;
        if ttl_secs < 1 {
            return Err(TokenError::InvalidTtl(ttl));
        }

        let iat = now();
        let exp = iat.checked_add(ttl_secs).ok_or(TokenError::InvalidTtl(ttl))?;
        let claims = TokenClaims::new(input, kind, iat, exp);

        self.sign(&SignedClaims {
            claims: &claims,
            iss: self.config.issuer.as_deref(),
            aud: self.config.audience.as_deref(),
        })
    }

    /// Mint an access token with the full claims and a subject-only refresh
    /// token, each with its configured lifetime.
    pub fn mint_pair(&self, input: &ClaimsInput) -> Result<TokenPair, TokenError> {
        let access_token = self.mint(input, TokenKind::Access, self.config.access_token_ttl)?;
        let refresh_token = self.mint(
            &ClaimsInput::subject_only(input.subject.clone()),
            TokenKind::Refresh,
            self.config.refresh_token_ttl,
        )?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: "bearer",
        })
    }

    /// Mint an email verification token for `subject`.
    pub fn mint_verification(&self, subject: &str) -> Result<String, TokenError> {
        self.mint(
            &ClaimsInput::subject_only(subject),
            TokenKind::Verification,
            self.config.verification_token_ttl,
        )
    }

    /// Verify the signature and expiry of `token` and return its claims.
    ///
    /// Returns [`TokenError::Expired`] only when the signature is valid and
    /// `now >= exp`; every other failure is [`TokenError::Invalid`].
    pub fn decode(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let claims = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })?;

        // The library accepts `exp == now`; the validity window is half-open.
        if claims.expires_at() <= now() {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    /// [`decode`](Self::decode), then require the credential to be of `expected` kind.
    pub fn decode_kind(
        &self,
        token: &str,
        expected: TokenKind,
    ) -> Result<TokenClaims, TokenError> {
        let claims = self.decode(token)?;
        if claims.kind() != expected {
            return Err(TokenError::Invalid(format!(
                "expected {expected} token, got {}",
                claims.kind()
            )));
        }
        Ok(claims)
    }

    /// Boolean gate: `true` only if `token` decodes and is of `expected` kind.
    pub fn verify_kind(&self, token: &str, expected: TokenKind) -> bool {
        matches!(self.decode(token), Ok(claims) if claims.kind() == expected)
    }

    fn sign<T: Serialize>(&self, claims: &T) -> Result<String, TokenError> {
        encode(
            &Header::new(self.config.algorithm),
            claims,
            &self.encoding_key,
        )
        .map_err(|e| TokenError::Encoding(e.to_string()))
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}
