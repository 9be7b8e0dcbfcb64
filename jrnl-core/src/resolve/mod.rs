//! Turning an entry's `when` expression into a point in time.

mod keyword;
mod wolfram;

pub use keyword::{KeywordResolver, parse_date_token, parse_time_token};
pub use wolfram::{DEFAULT_WOLFRAM_URL, WolframConfig, WolframResolver};

use chrono::NaiveDateTime;
use strum_macros::{AsRefStr, EnumString};

use crate::errors::ResolveError;

/// Resolves a natural-language time expression.
///
/// Called once per entry. Implementations may block; they must not retry on
/// behalf of the caller.
pub trait TimeResolver {
    fn resolve(&self, expression: &str) -> Result<NaiveDateTime, ResolveError>;
}

/// Resolves every expression to the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl TimeResolver for FixedClock {
    fn resolve(&self, _expression: &str) -> Result<NaiveDateTime, ResolveError> {
        Ok(self.0)
    }
}

/// Which resolver to build from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Backend {
    /// WolframAlpha's query API.
    Wolfram,
    /// [`KeywordResolver`], no network.
    Local,
}

/// Builds the resolver for `backend`. `reference` anchors relative words for
/// the local resolver.
pub fn build_resolver(
    backend: Backend,
    wolfram: &WolframConfig,
    reference: NaiveDateTime,
) -> Result<Box<dyn TimeResolver>, ResolveError> {
    Ok(match backend {
        Backend::Wolfram => Box::new(WolframResolver::new(wolfram.clone())?),
        Backend::Local => Box::new(KeywordResolver::new(reference)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    #[test]
    fn backend_from_str() {
        assert_eq!(Backend::from_str("wolfram").unwrap(), Backend::Wolfram);
        assert_eq!(Backend::from_str("Local").unwrap(), Backend::Local);
        assert!(Backend::from_str("carrier-pigeon").is_err());
        assert_eq!(Backend::Local.as_ref(), "local");
    }

    #[test]
    fn fixed_clock_ignores_expression() {
        let t = NaiveDate::from_ymd_opt(2020, 2, 29)
            .unwrap()
            .and_hms_opt(23, 59, 0)
            .unwrap();
        let clock = FixedClock(t);
        assert_eq!(clock.resolve("today").unwrap(), t);
        assert_eq!(clock.resolve("").unwrap(), t);
    }

    #[test]
    fn build_local_resolver() {
        let reference = NaiveDate::from_ymd_opt(2025, 8, 20)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let resolver =
            build_resolver(Backend::Local, &WolframConfig::default(), reference).unwrap();
        assert_eq!(resolver.resolve("today").unwrap(), reference);
    }
}
