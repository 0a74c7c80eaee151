//! Request signing and target URL construction.
//!
//! Everything here is a pure function of its inputs. A [`SignedRequest`] is computed once
//! per outgoing call from the client's [`CallContext`] and the exact set of mobiles the
//! payload addresses; nothing is cached between calls.

use rand::Rng;
use sha2::{Digest, Sha256};
use url::Url;

use crate::domain::{AppId, AppKey, Mobile, Nonce, Operation, Tel, UnixTimestamp, ValidationError};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://yun.tim.qq.com/v5";

#[derive(Debug, Clone)]
/// Application credentials used for every call.
pub struct Credentials {
    app_id: AppId,
    app_key: AppKey,
}

impl Credentials {
    /// Validate and pair an application id with its key.
    pub fn new(
        app_id: impl Into<String>,
        app_key: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            app_id: AppId::new(app_id)?,
            app_key: AppKey::new(app_key)?,
        })
    }

    pub fn app_id(&self) -> &AppId {
        &self.app_id
    }

    pub fn app_key(&self) -> &AppKey {
        &self.app_key
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Nonce and timestamp shared by every call of one client until refreshed.
pub struct CallContext {
    nonce: Nonce,
    time: UnixTimestamp,
}

impl CallContext {
    pub fn new(nonce: Nonce, time: UnixTimestamp) -> Self {
        Self { nonce, time }
    }

    /// Fresh nonce from the thread-local RNG, stamped with the current time.
    pub fn generate(nonce_len: usize) -> Result<Self, ValidationError> {
        Self::generate_with(nonce_len, &mut rand::thread_rng(), UnixTimestamp::now())
    }

    pub fn generate_with<R: Rng + ?Sized>(
        nonce_len: usize,
        rng: &mut R,
        time: UnixTimestamp,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            nonce: Nonce::generate(nonce_len, rng)?,
            time,
        })
    }

    pub fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    pub fn time(&self) -> UnixTimestamp {
        self.time
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Ordered mobiles a request addresses. Empty for management and reporting calls.
pub struct MobileScope<'a> {
    mobiles: Vec<&'a str>,
}

impl<'a> MobileScope<'a> {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn single(mobile: &'a Mobile) -> Self {
        Self {
            mobiles: vec![mobile.as_str()],
        }
    }

    /// Keeps the order of `tels`.
    pub fn from_tels(tels: &'a [Tel]) -> Self {
        Self {
            mobiles: tels.iter().map(|tel| tel.mobile().as_str()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mobiles.is_empty()
    }

    /// Comma-joined form used in the signing string.
    pub fn joined(&self) -> String {
        self.mobiles.join(",")
    }
}

/// Canonical string the signature is computed over.
pub fn signing_string(app_key: &AppKey, context: &CallContext, scope: &MobileScope<'_>) -> String {
    let mut content = format!(
        "{}={}&{}={}&{}={}",
        AppKey::FIELD,
        app_key.as_str(),
        Nonce::FIELD,
        context.nonce().as_str(),
        UnixTimestamp::FIELD,
        context.time().value(),
    );
    if !scope.is_empty() {
        content.push_str("&mobile=");
        content.push_str(&scope.joined());
    }
    content
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Lowercase hex SHA-256 request signature (`sig`).
pub struct Signature(String);

impl Signature {
    /// JSON field name (`sig`).
    pub const FIELD: &'static str = "sig";

    pub fn compute(app_key: &AppKey, context: &CallContext, scope: &MobileScope<'_>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(signing_string(app_key, context, scope).as_bytes());
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// API root every operation URL is derived from.
///
/// Invariant: an absolute URL that can carry path segments.
pub struct BaseUrl(Url);

impl BaseUrl {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidUrl {
            input: input.to_owned(),
        };
        let url = Url::parse(input).map_err(|_| invalid())?;
        if url.cannot_be_a_base() {
            return Err(invalid());
        }
        Ok(Self(url))
    }

    /// `<base>/<service>/<operation>?sdkappid=<appid>&random=<nonce>`.
    pub fn operation_url(&self, app_id: &AppId, nonce: &Nonce, operation: Operation) -> Url {
        let mut url = self.0.clone();
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .push(operation.service().path())
                .push(operation.name());
        }
        url.query_pairs_mut()
            .clear()
            .append_pair(AppId::FIELD, app_id.as_str())
            .append_pair(Nonce::FIELD, nonce.as_str());
        url
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Everything a single outgoing call needs besides its payload.
pub struct SignedRequest {
    pub url: Url,
    pub sig: Signature,
    pub time: UnixTimestamp,
}

impl SignedRequest {
    /// Sign against `scope` and target `operation`. Call once per request, after the
    /// payload's recipients are final.
    pub fn prepare(
        credentials: &Credentials,
        base: &BaseUrl,
        context: &CallContext,
        operation: Operation,
        scope: &MobileScope<'_>,
    ) -> Self {
        Self {
            url: base.operation_url(credentials.app_id(), context.nonce(), operation),
            sig: Signature::compute(credentials.app_key(), context, scope),
            time: context.time(),
        }
    }
}
