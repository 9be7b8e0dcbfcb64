//! Error types for entry construction and time resolution.

use thiserror::Error;

/// Failures while turning raw input into a [`ParsedEntry`](crate::entry::ParsedEntry).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    /// The input was empty or only whitespace.
    #[error("empty entry")]
    EmptyInput,

    /// Two of the configured delimiter characters are the same, so a split
    /// point could not be told apart from another.
    #[error("delimiters must be distinct: when '{when}', title '{title}', tag '{tag}'")]
    AmbiguousDelimiters { when: char, title: char, tag: char },

    /// The tag pattern built from the configured marker did not compile.
    #[error("invalid tag pattern for marker '{marker}': {message}")]
    InvalidTagPattern { marker: char, message: String },
}

/// Failures of a [`TimeResolver`](crate::resolve::TimeResolver).
///
/// None of these are fatal: the entry falls back to the current time and
/// shows the unresolved expression in its timestamp line.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no WolframAlpha app id configured (set WOLFRAMAPPID)")]
    MissingAppId,

    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("WolframAlpha answered with status {status}")]
    Status { status: u16 },

    #[error("could not decode WolframAlpha response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("could not parse returned time '{answer}'")]
    Unparseable { answer: String },

    #[error("no primary answer for '{expression}'")]
    NoAnswer { expression: String },

    #[error("'{expression}' is not a recognised time expression")]
    Unrecognized { expression: String },
}
