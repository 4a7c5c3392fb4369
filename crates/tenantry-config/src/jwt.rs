use std::env;

use crate::error::ConfigError;
use crate::lookup_non_blank;

/// Header carrying the token in both directions unless overridden.
pub const DEFAULT_TOKEN_HEADER: &str = "x-auth-token";

/// Token signing and transport settings.
///
/// The secret and lifetime are required. A missing or malformed value is a
/// start-up error, there is no fallback secret.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JwtConfig {
    pub secret: String,
    /// Lifetime of every issued token, in seconds. Each authenticated
    /// request re-issues the token, so this is a sliding window.
    pub expiration_secs: i64,
    /// Header the client sends its token in.
    pub request_header: String,
    /// Header the rotated token is returned in.
    pub response_header: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>, expiration_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            expiration_secs,
            request_header: DEFAULT_TOKEN_HEADER.to_string(),
            response_header: DEFAULT_TOKEN_HEADER.to_string(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup_non_blank(&lookup, "JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let expiration = lookup_non_blank(&lookup, "JWT_EXPIRATION")
            .ok_or(ConfigError::Missing("JWT_EXPIRATION"))?;
        let expiration_secs = parse_duration_secs(&expiration)
            .map_err(|reason| ConfigError::invalid("JWT_EXPIRATION", reason))?;

        let request_header = header_name(&lookup, "TOKEN_REQUEST_HEADER")?;
        let response_header = header_name(&lookup, "TOKEN_RESPONSE_HEADER")?;

        Ok(Self {
            secret,
            expiration_secs,
            request_header,
            response_header,
        })
    }
}

fn header_name<F>(lookup: &F, name: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup_non_blank(lookup, name) else {
        return Ok(DEFAULT_TOKEN_HEADER.to_string());
    };

    // RFC 9110 token characters
    let valid = value.chars().all(|c| {
        c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
    });
    if !valid {
        return Err(ConfigError::invalid(name, format!("'{value}' is not a header name")));
    }

    Ok(value.to_ascii_lowercase())
}

/// Parses a token lifetime such as `3600`, `90s`, `30m`, `12h`, `7d` or `2w`
/// into seconds. The result must be positive.
pub fn parse_duration_secs(raw: &str) -> Result<i64, String> {
    let raw = raw.trim();
    let split = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let (digits, unit) = raw.split_at(split);

    let value: i64 = digits
        .parse()
        .map_err(|_| format!("'{raw}' does not start with a number"))?;

    let multiplier = match unit.trim() {
        "" | "s" | "sec" | "secs" | "seconds" => 1,
        "m" | "min" | "mins" | "minutes" => 60,
        "h" | "hr" | "hrs" | "hours" => 3_600,
        "d" | "day" | "days" => 86_400,
        "w" | "week" | "weeks" => 604_800,
        other => return Err(format!("unknown unit '{other}'")),
    };

    let secs = value
        .checked_mul(multiplier)
        .ok_or_else(|| format!("'{raw}' is too large"))?;
    if secs <= 0 {
        return Err("lifetime must be greater than zero".to_string());
    }

    Ok(secs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_success() {
        let config = JwtConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "test-secret"),
            ("JWT_EXPIRATION", "3600"),
        ]))
        .unwrap();

        assert_eq!(config.secret, "test-secret");
        assert_eq!(config.expiration_secs, 3600);
        assert_eq!(config.request_header, "x-auth-token");
        assert_eq!(config.response_header, "x-auth-token");
    }

    #[test]
    fn test_missing_secret_is_fatal() {
        let result = JwtConfig::from_lookup(lookup_from(&[("JWT_EXPIRATION", "3600")]));
        assert_eq!(result, Err(ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn test_blank_secret_is_missing() {
        let result = JwtConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "   "),
            ("JWT_EXPIRATION", "3600"),
        ]));
        assert_eq!(result, Err(ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn test_missing_expiration_is_fatal() {
        let result = JwtConfig::from_lookup(lookup_from(&[("JWT_SECRET", "s")]));
        assert_eq!(result, Err(ConfigError::Missing("JWT_EXPIRATION")));
    }

    #[test]
    fn test_custom_headers_are_lowercased() {
        let config = JwtConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s"),
            ("JWT_EXPIRATION", "1h"),
            ("TOKEN_REQUEST_HEADER", "X-Session"),
            ("TOKEN_RESPONSE_HEADER", "X-Session-Renewed"),
        ]))
        .unwrap();

        assert_eq!(config.request_header, "x-session");
        assert_eq!(config.response_header, "x-session-renewed");
    }

    #[test]
    fn test_invalid_header_name() {
        let result = JwtConfig::from_lookup(lookup_from(&[
            ("JWT_SECRET", "s"),
            ("JWT_EXPIRATION", "1h"),
            ("TOKEN_REQUEST_HEADER", "x auth token"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                name: "TOKEN_REQUEST_HEADER",
                ..
            })
        ));
    }

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration_secs("45"), Ok(45));
        assert_eq!(parse_duration_secs("90s"), Ok(90));
        assert_eq!(parse_duration_secs("30m"), Ok(1_800));
        assert_eq!(parse_duration_secs("12h"), Ok(43_200));
        assert_eq!(parse_duration_secs("5 days"), Ok(432_000));
        assert_eq!(parse_duration_secs("2w"), Ok(1_209_600));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert!(parse_duration_secs("").is_err());
        assert!(parse_duration_secs("h").is_err());
        assert!(parse_duration_secs("10 fortnights").is_err());
        assert!(parse_duration_secs("0").is_err());
        assert!(parse_duration_secs("-5").is_err());
    }
}
