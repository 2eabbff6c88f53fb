//! Deployment credentials.

use serde::{Deserialize, Serialize};

/// API credentials and signing keys for the Mux account.
///
/// Read-only for this crate. Only `enable_signed_urls` influences the upload
/// configuration: it decides whether editors may toggle signed playback.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Secrets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(alias = "secretKey", skip_serializing_if = "Option::is_none")]
    pub secret_key: Option<String>,
    #[serde(alias = "enableSignedUrls")]
    pub enable_signed_urls: bool,
    #[serde(alias = "signingKeyId", skip_serializing_if = "Option::is_none")]
    pub signing_key_id: Option<String>,
    #[serde(alias = "signingKeyPrivate", skip_serializing_if = "Option::is_none")]
    pub signing_key_private: Option<String>,
}

impl Secrets {
    /// Both halves of a signing key are present, so signed assets can be
    /// played back even if new uploads are public.
    pub fn has_signing_keys(&self) -> bool {
        self.signing_key_id.is_some() && self.signing_key_private.is_some()
    }
}

// Hand-written so token material never ends up in logs.
impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn redact(v: &Option<String>) -> &'static str {
            if v.is_some() { "<redacted>" } else { "<unset>" }
        }

        f.debug_struct("Secrets")
            .field("token", &redact(&self.token))
            .field("secret_key", &redact(&self.secret_key))
            .field("enable_signed_urls", &self.enable_signed_urls)
            .field("signing_key_id", &self.signing_key_id)
            .field("signing_key_private", &redact(&self.signing_key_private))
            .finish()
    }
}
