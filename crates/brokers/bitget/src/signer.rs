use hmac::{Hmac, Mac};
use relay_core::ExchangeError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

pub const ACCESS_KEY: &str = "ACCESS-KEY";
pub const ACCESS_SIGN: &str = "ACCESS-SIGN";
pub const ACCESS_TIMESTAMP: &str = "ACCESS-TIMESTAMP";
pub const ACCESS_PASSPHRASE: &str = "ACCESS-PASSPHRASE";
pub const LOCALE: &str = "locale";
pub const DEFAULT_LOCALE: &str = "en-US";

/// API credentials for a Bitget account.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    secret: String,
    passphrase: String,
}

impl Credentials {
    pub fn new(
        api_key: impl Into<String>,
        secret: impl Into<String>,
        passphrase: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            secret: secret.into(),
            passphrase: passphrase.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret", &"<redacted>")
            .field("passphrase", &"<redacted>")
            .finish()
    }
}

/// Computes `ACCESS-SIGN` and assembles the authentication headers.
///
/// The prehash string is `timestamp + METHOD + path + body`, signed with
/// HMAC-SHA256 under the API secret and hex encoded.
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha256,
    api_key: HeaderValue,
    passphrase: HeaderValue,
}

impl Signer {
    pub fn new(credentials: &Credentials) -> Result<Self, ExchangeError> {
        if credentials.secret.is_empty() {
            return Err(ExchangeError::Configuration(
                "API secret is not set".to_string(),
            ));
        }
        if credentials.api_key.is_empty() {
            return Err(ExchangeError::Configuration("API key is not set".to_string()));
        }
        if credentials.passphrase.is_empty() {
            return Err(ExchangeError::Configuration(
                "API passphrase is not set".to_string(),
            ));
        }

        let mac = HmacSha256::new_from_slice(credentials.secret.as_bytes())
            .map_err(|e| ExchangeError::Configuration(format!("Invalid API secret: {}", e)))?;
        let api_key = HeaderValue::from_str(&credentials.api_key)
            .map_err(|_| ExchangeError::Configuration("API key is not valid header text".to_string()))?;
        let mut passphrase = HeaderValue::from_str(&credentials.passphrase).map_err(|_| {
            ExchangeError::Configuration("API passphrase is not valid header text".to_string())
        })?;
        passphrase.set_sensitive(true);

        Ok(Self {
            mac,
            api_key,
            passphrase,
        })
    }

    /// Hex-encoded signature over `timestamp + method + path + body`.
    pub fn sign(&self, timestamp: i64, method: &str, path: &str, body: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(timestamp.to_string().as_bytes());
        mac.update(method.as_bytes());
        mac.update(path.as_bytes());
        mac.update(body.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Full header set for a signed request.
    pub fn headers(&self, timestamp: i64, method: &str, path: &str, body: &str) -> HeaderMap {
        let signature = self.sign(timestamp, method, path, body);

        let mut headers = HeaderMap::with_capacity(6);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static("access-key"), self.api_key.clone());
        // hex output is always valid header text
        headers.insert(
            HeaderName::from_static("access-sign"),
            HeaderValue::from_str(&signature).unwrap_or_else(|_| HeaderValue::from_static("")),
        );
        headers.insert(
            HeaderName::from_static("access-timestamp"),
            HeaderValue::from(timestamp),
        );
        headers.insert(
            HeaderName::from_static("access-passphrase"),
            self.passphrase.clone(),
        );
        headers.insert(
            HeaderName::from_static("locale"),
            HeaderValue::from_static(DEFAULT_LOCALE),
        );
        headers
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer")
            .field("api_key", &self.api_key)
            .finish_non_exhaustive()
    }
}
