use chrono::{Local, NaiveDateTime};
use tracing::{debug, warn};

use crate::errors::ResolveError;
use crate::resolve::TimeResolver;

/// The `when` used when the input carries no explicit time expression.
pub const DEFAULT_WHEN: &str = "today";

/// One journal entry, split out of a single line of user input.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEntry {
    /// Original, untrimmed input.
    pub raw_input: String,
    /// Text handed to time resolution. Never empty.
    pub when_expression: String,
    pub title: String,
    pub body: String,
    /// Tags with their marker, in order of appearance.
    pub tags: Vec<String>,
    pub resolved_time: NaiveDateTime,
    /// Set when `when_expression` could not be resolved; the renderer then
    /// shows it next to the timestamp.
    pub time_resolution_failed: bool,
}

impl ParsedEntry {
    pub(crate) fn new(
        raw_input: &str,
        when_expression: String,
        title: String,
        body: String,
        tags: Vec<String>,
    ) -> Self {
        Self {
            raw_input: raw_input.to_string(),
            when_expression,
            title,
            body,
            tags,
            resolved_time: Local::now().naive_local(),
            time_resolution_failed: false,
        }
    }

    /// Resolves `when_expression` once with `resolver`, falling back to `now`.
    pub fn resolve_with(&mut self, resolver: &dyn TimeResolver, now: NaiveDateTime) {
        let result = resolver.resolve(&self.when_expression);
        self.apply_resolution(result, now);
    }

    /// Stores the outcome of time resolution.
    ///
    /// On failure the entry keeps `now` and is flagged so the unresolved
    /// expression ends up in the rendered output.
    pub fn apply_resolution(
        &mut self,
        result: Result<NaiveDateTime, ResolveError>,
        now: NaiveDateTime,
    ) {
        match result {
            Ok(time) => {
                debug!(when = %self.when_expression, %time, "resolved entry time");
                self.resolved_time = time;
                self.time_resolution_failed = false;
            }
            Err(error) => {
                warn!(when = %self.when_expression, %error, "could not resolve time, using now");
                self.resolved_time = now;
                self.time_resolution_failed = true;
            }
        }
    }
}
