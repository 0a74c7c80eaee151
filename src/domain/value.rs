use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::validation::ValidationError;

use phonenumber::country;
use rand::Rng;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Application id (`sdkappid`) issued by the platform console.
///
/// Invariant: non-empty after trimming.
pub struct AppId(String);

impl AppId {
    /// Query parameter name used by the platform (`sdkappid`).
    pub const FIELD: &'static str = "sdkappid";

    /// Create a validated [`AppId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Application key, the shared secret every signature is derived from.
///
/// Invariant: must not be empty (the value is used verbatim).
pub struct AppKey(String);

impl AppKey {
    /// Name of the key in the signing string (`appkey`).
    pub const FIELD: &'static str = "appkey";

    /// Create a validated [`AppKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the key as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Approved sender sign (`sign`), shown in brackets in front of a message.
///
/// Invariant: non-empty after trimming. Pass the text without the surrounding brackets.
pub struct SignName(String);

impl SignName {
    /// JSON field name (`sign`).
    pub const FIELD: &'static str = "sign";

    /// Create a validated [`SignName`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sign text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message text (`msg`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// JSON field name (`msg`).
    pub const FIELD: &'static str = "msg";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Country calling code without the leading `+` (`nationcode`).
///
/// Invariant: one or more decimal digits.
pub struct NationCode(String);

impl NationCode {
    /// JSON field name (`nationcode`).
    pub const FIELD: &'static str = "nationcode";

    /// Create a validated [`NationCode`]; a leading `+` is stripped.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if digits.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        if !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::NotDigits {
                field: Self::FIELD,
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(digits.to_owned()))
    }

    /// Mainland China (`86`), the platform's home region.
    pub fn china() -> Self {
        Self("86".to_owned())
    }

    /// Borrow the digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NationCode {
    fn default() -> Self {
        Self::china()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Subscriber number within its nation code (`mobile`).
///
/// Invariant: non-empty after trimming. This is exactly what goes into the signature's
/// mobile scope.
pub struct Mobile(String);

impl Mobile {
    /// JSON field name (`mobile`).
    pub const FIELD: &'static str = "mobile";

    /// Create a validated (non-empty) mobile number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the trimmed number.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Recipient phone (`tel`): nation code plus subscriber number.
pub struct Tel {
    nationcode: NationCode,
    mobile: Mobile,
}

impl Tel {
    /// JSON field name (`tel`).
    pub const FIELD: &'static str = "tel";

    /// Combine an already split nation code and mobile number.
    pub fn new(nationcode: NationCode, mobile: Mobile) -> Self {
        Self { nationcode, mobile }
    }

    /// Mainland China number (`86`).
    pub fn china(mobile: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self::new(NationCode::china(), Mobile::new(mobile)?))
    }

    /// Parse a free-form phone number and split it into nation code and national number.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let code = parsed.code().value().to_string();
        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();
        let national = e164
            .strip_prefix('+')
            .and_then(|rest| rest.strip_prefix(code.as_str()))
            .filter(|rest| !rest.is_empty())
            .ok_or_else(|| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        Ok(Self {
            mobile: Mobile(national.to_owned()),
            nationcode: NationCode(code),
        })
    }

    pub fn nationcode(&self) -> &NationCode {
        &self.nationcode
    }

    pub fn mobile(&self) -> &Mobile {
        &self.mobile
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Server-side template id (`tpl_id`).
pub struct TemplateId(u32);

impl TemplateId {
    /// JSON field name (`tpl_id`).
    pub const FIELD: &'static str = "tpl_id";

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Server-side sender sign id (`sign_id`).
pub struct SenderSignId(u32);

impl SenderSignId {
    /// JSON field name (`sign_id`).
    pub const FIELD: &'static str = "sign_id";

    pub fn new(value: u32) -> Self {
        Self(value)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Random decimal string (`random`) that diversifies the signature input.
///
/// Invariant: `Nonce::MIN_LEN..=Nonce::MAX_LEN` ASCII digits.
pub struct Nonce(String);

impl Nonce {
    /// Query parameter and signing-string name (`random`).
    pub const FIELD: &'static str = "random";

    /// Default length used by the client.
    pub const DEFAULT_LEN: usize = 6;
    /// Minimum allowed length.
    pub const MIN_LEN: usize = 1;
    /// Maximum allowed length.
    pub const MAX_LEN: usize = 32;

    /// Generate `len` random decimal digits from `rng`.
    pub fn generate<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Result<Self, ValidationError> {
        Self::check_len(len)?;
        let digits = (0..len)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect::<String>();
        Ok(Self(digits))
    }

    /// Wrap an existing digit string, e.g. to replay a known request.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        Self::check_len(value.len())?;
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::NotDigits {
                field: Self::FIELD,
                input: value,
            });
        }
        Ok(Self(value))
    }

    fn check_len(len: usize) -> Result<(), ValidationError> {
        if !(Self::MIN_LEN..=Self::MAX_LEN).contains(&len) {
            return Err(ValidationError::InvalidNonceLength {
                min: Self::MIN_LEN,
                max: Self::MAX_LEN,
                actual: len,
            });
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unix timestamp in seconds (`time`).
pub struct UnixTimestamp(u64);

impl UnixTimestamp {
    /// JSON field and signing-string name (`time`).
    pub const FIELD: &'static str = "time";

    /// Create a timestamp value (no range validation is performed).
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Current wall-clock time. A clock set before the epoch yields `0`.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        Self(secs)
    }

    /// Get the underlying timestamp in seconds.
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Maximum number of records returned by a pull call (`max`).
///
/// Invariant: `1..=100`.
pub struct PullLimit(u32);

impl PullLimit {
    /// JSON field name (`max`).
    pub const FIELD: &'static str = "max";

    /// Minimum allowed value.
    pub const MIN: u32 = 1;
    /// Maximum allowed value.
    pub const MAX: u32 = 100;

    /// Create a validated limit.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::OutOfRange {
                field: Self::FIELD,
                min: Self::MIN,
                max: Self::MAX,
                actual: value,
            });
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for PullLimit {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Hour-granular date used by the statistics calls, encoded as `YYYYMMDDHH`.
pub struct DateHour(u32);

impl DateHour {
    /// Create a validated value from its parts.
    pub fn new(year: u32, month: u32, day: u32, hour: u32) -> Result<Self, ValidationError> {
        check_range("year", 1970, 4293, year)?;
        check_range("month", 1, 12, month)?;
        check_range("day", 1, 31, day)?;
        check_range("hour", 0, 23, hour)?;
        Ok(Self(year * 1_000_000 + month * 10_000 + day * 100 + hour))
    }

    /// Parse the packed `YYYYMMDDHH` form.
    pub fn from_packed(value: u32) -> Result<Self, ValidationError> {
        let hour = value % 100;
        let day = (value / 100) % 100;
        let month = (value / 10_000) % 100;
        let year = value / 1_000_000;
        Self::new(year, month, day, hour)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

fn check_range(field: &'static str, min: u32, max: u32, actual: u32) -> Result<(), ValidationError> {
    if !(min..=max).contains(&actual) {
        return Err(ValidationError::OutOfRange {
            field,
            min,
            max,
            actual,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Platform result code (`result`). `0` means success.
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct ResultCode(i32);

impl ResultCode {
    /// The code every successful call returns.
    pub const SUCCESS: Self = Self(0);

    /// Construct a result code from its integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by the platform.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    /// Map this code to a known variant, if one exists.
    pub fn known(self) -> Option<KnownResultCode> {
        KnownResultCode::from_code(self.0)
    }

    /// Classify this code. Unknown codes are [`FailureKind::Other`].
    pub fn kind(self) -> FailureKind {
        self.known().map_or(FailureKind::Other, KnownResultCode::kind)
    }

    /// Returns `true` if the request failed authentication (bad signature, app id or clock).
    pub fn is_auth_error(self) -> bool {
        self.kind() == FailureKind::Authentication
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Coarse classification of platform failures.
pub enum FailureKind {
    Authentication,
    Permission,
    Content,
    InvalidRequest,
    Recipient,
    RateLimited,
    Account,
    Timeout,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Result codes documented by the platform.
///
/// Unknown codes are preserved as [`ResultCode`] and return `None` from [`KnownResultCode::from_code`].
pub enum KnownResultCode {
    SignatureMismatch,
    SensitiveWords,
    MissingSignature,
    MalformedBody,
    PermissionDenied,
    Unspecified,
    DeliveryTimeout,
    IpNotWhitelisted,
    UnknownApi,
    SignNotApproved,
    FrequencyLimited,
    TemplateMismatch,
    MobileBlacklisted,
    InvalidMobile,
    ContentTooLong,
    InvalidVoiceCode,
    AppIdNotFound,
    AppIdDisabled,
    RequestTimeSkewed,
    DailyLimitExceeded,
    MobileLimitPer30Seconds,
    MobileLimitPerHour,
    MobileDailyLimit,
    DuplicateContentLimit,
    MarketingHoursRestricted,
    UnsupportedRequest,
    PackageExhausted,
    MarketingNotPermitted,
    ServiceSuspended,
    MixedDomesticInternational,
    UrlInContent,
    RegionNotSupported,
    TooManyRecipients,
    InternationalDailyLimit,
    ProcessingTimeout,
}

impl KnownResultCode {
    /// Convert a raw platform code into a known variant.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            1001 => Self::SignatureMismatch,
            1002 => Self::SensitiveWords,
            1003 => Self::MissingSignature,
            1004 => Self::MalformedBody,
            1006 => Self::PermissionDenied,
            1007 => Self::Unspecified,
            1008 => Self::DeliveryTimeout,
            1009 => Self::IpNotWhitelisted,
            1011 => Self::UnknownApi,
            1012 => Self::SignNotApproved,
            1013 => Self::FrequencyLimited,
            1014 => Self::TemplateMismatch,
            1015 => Self::MobileBlacklisted,
            1016 => Self::InvalidMobile,
            1017 => Self::ContentTooLong,
            1018 => Self::InvalidVoiceCode,
            1019 => Self::AppIdNotFound,
            1020 => Self::AppIdDisabled,
            1021 => Self::RequestTimeSkewed,
            1022 => Self::DailyLimitExceeded,
            1023 => Self::MobileLimitPer30Seconds,
            1024 => Self::MobileLimitPerHour,
            1025 => Self::MobileDailyLimit,
            1026 => Self::DuplicateContentLimit,
            1029 => Self::MarketingHoursRestricted,
            1030 => Self::UnsupportedRequest,
            1031 => Self::PackageExhausted,
            1032 => Self::MarketingNotPermitted,
            1033 => Self::ServiceSuspended,
            1034 => Self::MixedDomesticInternational,
            1036 => Self::UrlInContent,
            1045 => Self::RegionNotSupported,
            1046 => Self::TooManyRecipients,
            1047 => Self::InternationalDailyLimit,
            60008 => Self::ProcessingTimeout,
            _ => return None,
        })
    }

    pub fn kind(self) -> FailureKind {
        match self {
            Self::SignatureMismatch
            | Self::MissingSignature
            | Self::AppIdNotFound
            | Self::AppIdDisabled
            | Self::RequestTimeSkewed => FailureKind::Authentication,
            Self::PermissionDenied | Self::IpNotWhitelisted | Self::MarketingNotPermitted => {
                FailureKind::Permission
            }
            Self::SensitiveWords
            | Self::SignNotApproved
            | Self::TemplateMismatch
            | Self::ContentTooLong
            | Self::InvalidVoiceCode
            | Self::UrlInContent => FailureKind::Content,
            Self::MalformedBody
            | Self::UnknownApi
            | Self::UnsupportedRequest
            | Self::MixedDomesticInternational
            | Self::RegionNotSupported
            | Self::TooManyRecipients => FailureKind::InvalidRequest,
            Self::MobileBlacklisted | Self::InvalidMobile => FailureKind::Recipient,
            Self::FrequencyLimited
            | Self::DailyLimitExceeded
            | Self::MobileLimitPer30Seconds
            | Self::MobileLimitPerHour
            | Self::MobileDailyLimit
            | Self::DuplicateContentLimit
            | Self::MarketingHoursRestricted
            | Self::InternationalDailyLimit => FailureKind::RateLimited,
            Self::PackageExhausted | Self::ServiceSuspended => FailureKind::Account,
            Self::DeliveryTimeout | Self::ProcessingTimeout => FailureKind::Timeout,
            Self::Unspecified => FailureKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn string_newtypes_trim_or_validate() {
        let app_id = AppId::new("  1400000000 ").unwrap();
        assert_eq!(app_id.as_str(), "1400000000");
        assert!(AppId::new("  ").is_err());

        let key = AppKey::new(" secret ").unwrap();
        assert_eq!(key.as_str(), " secret ");
        assert!(AppKey::new("").is_err());

        let sign = SignName::new(" Acme ").unwrap();
        assert_eq!(sign.as_str(), "Acme");

        let msg = MessageText::new(" hi ").unwrap();
        assert_eq!(msg.as_str(), " hi ");
        assert!(MessageText::new("  ").is_err());

        let mobile = Mobile::new(" 13800000000 ").unwrap();
        assert_eq!(mobile.as_str(), "13800000000");
        assert!(Mobile::new("").is_err());
    }

    #[test]
    fn nation_code_strips_plus_and_requires_digits() {
        assert_eq!(NationCode::new("+852").unwrap().as_str(), "852");
        assert_eq!(NationCode::new("86").unwrap(), NationCode::china());
        assert!(matches!(
            NationCode::new("8a"),
            Err(ValidationError::NotDigits { .. })
        ));
        assert!(NationCode::new("+").is_err());
    }

    #[test]
    fn tel_parse_splits_country_code() {
        let tel = Tel::parse(None, "+86 138 0013 8000").unwrap();
        assert_eq!(tel.nationcode().as_str(), "86");
        assert_eq!(tel.mobile().as_str(), "13800138000");

        let tel = Tel::parse(Some(country::Id::CN), "13800138000").unwrap();
        assert_eq!(tel.nationcode().as_str(), "86");
        assert_eq!(tel.mobile().as_str(), "13800138000");

        assert!(Tel::parse(None, "not-a-number").is_err());
        assert!(Tel::parse(None, "  ").is_err());
    }

    #[test]
    fn nonce_generation_yields_requested_digit_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let nonce = Nonce::generate(4, &mut rng).unwrap();
        assert_eq!(nonce.as_str().len(), 4);
        assert!(nonce.as_str().bytes().all(|b| b.is_ascii_digit()));

        assert!(Nonce::generate(0, &mut rng).is_err());
        assert!(Nonce::generate(Nonce::MAX_LEN + 1, &mut rng).is_err());
    }

    #[test]
    fn nonce_new_rejects_non_digits() {
        assert_eq!(Nonce::new("0042").unwrap().as_str(), "0042");
        assert!(matches!(
            Nonce::new("12a4"),
            Err(ValidationError::NotDigits { .. })
        ));
        assert!(matches!(
            Nonce::new(""),
            Err(ValidationError::InvalidNonceLength { .. })
        ));
    }

    #[test]
    fn pull_limit_enforces_range() {
        assert!(PullLimit::new(PullLimit::MIN).is_ok());
        assert!(PullLimit::new(PullLimit::MAX).is_ok());
        assert!(PullLimit::new(0).is_err());
        assert!(PullLimit::new(PullLimit::MAX + 1).is_err());
        assert_eq!(PullLimit::default().value(), 100);
    }

    #[test]
    fn date_hour_packs_and_validates() {
        let hour = DateHour::new(2024, 3, 9, 17).unwrap();
        assert_eq!(hour.value(), 2024030917);
        assert_eq!(DateHour::from_packed(2024030917).unwrap(), hour);
        assert!(DateHour::new(2024, 13, 1, 0).is_err());
        assert!(DateHour::new(2024, 1, 1, 24).is_err());
        assert!(DateHour::from_packed(2024000100).is_err());
    }

    #[test]
    fn result_code_classification() {
        assert!(ResultCode::new(0).is_success());
        assert!(!ResultCode::new(1001).is_success());

        let auth = ResultCode::new(1001);
        assert_eq!(auth.known(), Some(KnownResultCode::SignatureMismatch));
        assert!(auth.is_auth_error());

        assert_eq!(ResultCode::new(1025).kind(), FailureKind::RateLimited);
        assert_eq!(ResultCode::new(1016).kind(), FailureKind::Recipient);
        assert_eq!(ResultCode::new(60008).kind(), FailureKind::Timeout);

        let unknown = ResultCode::new(424242);
        assert!(unknown.known().is_none());
        assert_eq!(unknown.kind(), FailureKind::Other);
        assert!(!unknown.is_auth_error());
    }
}
