//! WolframAlpha-backed time resolution.
//!
//! The expression is sent to the v2 query API as-is and the answer is read
//! from the primary pod, falling back to the `Input interpretation` pod.

use chrono::{NaiveDate, NaiveDateTime};
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::TimeResolver;
use crate::errors::ResolveError;

pub const DEFAULT_WOLFRAM_URL: &str = "https://api.wolframalpha.com/v2/query";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const INPUT_INTERPRETATION: &str = "Input interpretation";

/// Answer shapes WolframAlpha uses for points in time. Zone names are
/// skipped; times are taken as local wall-clock times.
const ANSWER_LAYOUTS: &[&str] = &[
    "%A, %B %d, %Y at %I:%M %p %Z",
    "%I:%M %p %Z | %A, %B %d, %Y",
    "%I:%M:%S %p %Z | %A, %B %d, %Y",
];

/// A bare date answer resolves to midnight.
const DATE_LAYOUT: &str = "%A, %B %d, %Y";

/// Settings for [`WolframResolver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WolframConfig {
    /// WolframAlpha app id. Resolution fails without one.
    pub app_id: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for WolframConfig {
    fn default() -> Self {
        Self {
            app_id: None,
            base_url: DEFAULT_WOLFRAM_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(rename = "queryresult")]
    result: QueryResult,
}

#[derive(Debug, Default, Deserialize)]
struct QueryResult {
    #[serde(default)]
    pods: Vec<Pod>,
}

#[derive(Debug, Deserialize)]
struct Pod {
    #[serde(default)]
    title: String,
    /// Marks the pod closest to a plain answer.
    #[serde(default)]
    primary: bool,
    #[serde(default)]
    subpods: Vec<SubPod>,
}

#[derive(Debug, Deserialize)]
struct SubPod {
    #[serde(default)]
    plaintext: String,
}

impl Pod {
    fn answer(&self) -> &str {
        self.subpods
            .first()
            .map(|sub| sub.plaintext.as_str())
            .unwrap_or_default()
    }
}

/// Client for the WolframAlpha query API.
pub struct WolframResolver {
    config: WolframConfig,
    client: Client,
}

impl WolframResolver {
    pub fn new(config: WolframConfig) -> Result<Self, ResolveError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|source| ResolveError::Http {
                url: config.base_url.clone(),
                source,
            })?;
        Ok(Self { config, client })
    }
}

impl TimeResolver for WolframResolver {
    fn resolve(&self, expression: &str) -> Result<NaiveDateTime, ResolveError> {
        let app_id = self
            .config
            .app_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(ResolveError::MissingAppId)?;

        debug!(expression, url = %self.config.base_url, "querying WolframAlpha");
        let response = self
            .client
            .get(&self.config.base_url)
            .query(&[("appid", app_id), ("output", "JSON"), ("input", expression)])
            .send()
            .map_err(|source| ResolveError::Http {
                url: self.config.base_url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolveError::Status {
                status: status.as_u16(),
            });
        }

        let data: QueryResponse = response.json().map_err(ResolveError::Decode)?;
        answer_time(&data.result, expression)
    }
}

fn answer_time(result: &QueryResult, expression: &str) -> Result<NaiveDateTime, ResolveError> {
    if let Some(time) = result
        .pods
        .iter()
        .filter(|pod| pod.primary)
        .find_map(|pod| parse_answer(pod.answer()))
    {
        return Ok(time);
    }

    if let Some(pod) = result.pods.iter().find(|pod| pod.title == INPUT_INTERPRETATION) {
        let answer = pod.answer();
        return parse_answer(answer).ok_or_else(|| ResolveError::Unparseable {
            answer: answer.to_string(),
        });
    }

    Err(ResolveError::NoAnswer {
        expression: expression.to_string(),
    })
}

/// Parses one of WolframAlpha's plaintext time answers.
fn parse_answer(answer: &str) -> Option<NaiveDateTime> {
    let answer = answer.trim();
    ANSWER_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(answer, layout).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(answer, DATE_LAYOUT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const APP_ID: &str = "TEST-APP-ID";

    fn resolver_for(server: &mockito::ServerGuard, app_id: Option<&str>) -> WolframResolver {
        WolframResolver::new(WolframConfig {
            app_id: app_id.map(str::to_string),
            base_url: format!("{}/v2/query", server.url()),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    fn moon_landing() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(1969, 7, 20)
            .unwrap()
            .and_hms_opt(20, 17, 0)
            .unwrap()
    }

    #[test]
    fn primary_pod_answer() {
        let mut server = mockito::Server::new();
        let body = r#"{"queryresult":{"success":true,"numpods":2,"pods":[
            {"title":"Input interpretation","primary":false,"subpods":[{"plaintext":"8:17 pm EDT on July 20th, 1969"}]},
            {"title":"Result","primary":true,"subpods":[{"plaintext":"Sunday, July 20, 1969 at 8:17 pm EDT"}]}
        ]}}"#;
        let mock = server
            .mock("GET", "/v2/query")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("appid".into(), APP_ID.into()),
                Matcher::UrlEncoded("output".into(), "JSON".into()),
                Matcher::UrlEncoded("input".into(), "8:17pm EDT on July 20th, 1969".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create();

        let resolver = resolver_for(&server, Some(APP_ID));
        let time = resolver.resolve("8:17pm EDT on July 20th, 1969").unwrap();

        mock.assert();
        assert_eq!(time, moon_landing());
    }

    #[test]
    fn falls_back_to_input_interpretation() {
        let mut server = mockito::Server::new();
        let body = r#"{"queryresult":{"pods":[
            {"title":"Input interpretation","subpods":[{"plaintext":"8:17 pm EDT | Sunday, July 20, 1969"}]},
            {"title":"Result","primary":true,"subpods":[{"plaintext":"50 years ago"}]}
        ]}}"#;
        server
            .mock("GET", "/v2/query")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(body)
            .create();

        let resolver = resolver_for(&server, Some(APP_ID));
        assert_eq!(resolver.resolve("moon landing").unwrap(), moon_landing());
    }

    #[test]
    fn unparseable_interpretation() {
        let mut server = mockito::Server::new();
        let body = r#"{"queryresult":{"pods":[
            {"title":"Input interpretation","subpods":[{"plaintext":"party time"}]}
        ]}}"#;
        server
            .mock("GET", "/v2/query")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(body)
            .create();

        let err = resolver_for(&server, Some(APP_ID))
            .resolve("party time")
            .unwrap_err();
        assert!(matches!(err, ResolveError::Unparseable { answer } if answer == "party time"));
    }

    #[test]
    fn no_pods_is_no_answer() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/v2/query")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"queryresult":{"success":false,"numpods":0}}"#)
            .create();

        let err = resolver_for(&server, Some(APP_ID)).resolve("whenever").unwrap_err();
        assert!(matches!(err, ResolveError::NoAnswer { .. }));
    }

    #[test]
    fn error_status() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/v2/query")
            .match_query(Matcher::Any)
            .with_status(501)
            .create();

        let err = resolver_for(&server, Some(APP_ID)).resolve("today").unwrap_err();
        assert!(matches!(err, ResolveError::Status { status: 501 }));
    }

    #[test]
    fn garbage_body_is_decode_error() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/v2/query")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>nope</html>")
            .create();

        let err = resolver_for(&server, Some(APP_ID)).resolve("today").unwrap_err();
        assert!(matches!(err, ResolveError::Decode(_)));
    }

    #[test]
    fn missing_app_id_skips_request() {
        let mut server = mockito::Server::new();
        let mock = server.mock("GET", Matcher::Any).expect(0).create();

        for app_id in [None, Some("")] {
            let err = resolver_for(&server, app_id).resolve("today").unwrap_err();
            assert!(matches!(err, ResolveError::MissingAppId));
        }
        mock.assert();
    }

    #[test]
    fn answer_layouts() {
        let dt = |h, m, s| {
            NaiveDate::from_ymd_opt(2019, 6, 11)
                .unwrap()
                .and_hms_opt(h, m, s)
        };
        assert_eq!(parse_answer("Tuesday, June 11, 2019 at 3:32 pm EDT"), dt(15, 32, 0));
        assert_eq!(parse_answer("3:32 pm EDT | Tuesday, June 11, 2019"), dt(15, 32, 0));
        assert_eq!(parse_answer("3:32:07 am CEST | Tuesday, June 11, 2019"), dt(3, 32, 7));
        assert_eq!(parse_answer("Tuesday, June 11, 2019"), dt(0, 0, 0));
        assert_eq!(parse_answer("June 2019"), None);
    }
}
