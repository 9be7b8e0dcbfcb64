//! Splits one line of user input into when, title, body and tags.
//!
//! Input has the shape `[when:] [title.] body`, where tags (`@tag`) may show
//! up anywhere. The two terminators and the tag marker are configurable; the
//! defaults are `:`, `.` and `@`.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::entry::{DEFAULT_WHEN, ParsedEntry};
use crate::errors::EntryError;

/// The characters that delimit the parts of an entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Delimiters {
    /// Ends the time expression (`friday at 9am:`).
    pub when_terminator: char,
    /// Ends the title (`Standup.`).
    pub title_terminator: char,
    /// Starts a tag (`@work`).
    pub tag_marker: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            when_terminator: ':',
            title_terminator: '.',
            tag_marker: '@',
        }
    }
}

/// Splits raw input into a [`ParsedEntry`] using a fixed set of [`Delimiters`].
#[derive(Debug, Clone)]
pub struct FieldSplitter {
    delimiters: Delimiters,
    tag_re: Regex,
}

static DEFAULT_SPLITTER: Lazy<FieldSplitter> = Lazy::new(|| {
    FieldSplitter::new(Delimiters::default()).expect("default delimiters are distinct")
});

impl FieldSplitter {
    /// Builds a splitter, rejecting delimiter sets that reuse a character.
    pub fn new(delimiters: Delimiters) -> Result<Self, EntryError> {
        let Delimiters {
            when_terminator,
            title_terminator,
            tag_marker,
        } = delimiters;
        if when_terminator == title_terminator
            || when_terminator == tag_marker
            || title_terminator == tag_marker
        {
            return Err(EntryError::AmbiguousDelimiters {
                when: when_terminator,
                title: title_terminator,
                tag: tag_marker,
            });
        }

        let pattern = format!("{}[A-Za-z0-9_]+", regex::escape(&tag_marker.to_string()));
        let tag_re = Regex::new(&pattern).map_err(|e| EntryError::InvalidTagPattern {
            marker: tag_marker,
            message: e.to_string(),
        })?;

        Ok(Self { delimiters, tag_re })
    }

    /// Splits `raw` into its fields.
    ///
    /// - Tags are collected from the whole trimmed input and stay in the text.
    /// - Everything before the first when terminator is the time expression,
    ///   passed on untouched. A terminator in first position is dropped and
    ///   the expression defaults to `today`, as it does when there is none.
    /// - In what is left, everything before the first title terminator is the
    ///   title and the rest is the body. Without a terminator the whole
    ///   remainder is body.
    ///
    /// A title terminator meant as body punctuation still splits off a title:
    /// `went out. got milk` has the title `went out`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use jrnl_core::parse_input::FieldSplitter;
    /// # use jrnl_core::parse_input::Delimiters;
    /// let splitter = FieldSplitter::new(Delimiters::default()).unwrap();
    /// let entry = splitter
    ///     .split("yesterday at 8pm: Project kickoff. It went   well @work")
    ///     .unwrap();
    ///
    /// assert_eq!(entry.when_expression, "yesterday at 8pm");
    /// assert_eq!(entry.title, "Project kickoff");
    /// assert_eq!(entry.body, "It went well @work");
    /// assert_eq!(entry.tags, vec!["@work"]);
    /// ```
    pub fn split(&self, raw: &str) -> Result<ParsedEntry, EntryError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EntryError::EmptyInput);
        }

        let tags: Vec<String> = self
            .tag_re
            .find_iter(trimmed)
            .map(|m| m.as_str().to_string())
            .collect();

        let (when_expression, rest) = split_when(trimmed, self.delimiters.when_terminator);
        let (title, body) = split_title_body(rest, self.delimiters.title_terminator);
        debug!(when = %when_expression, %title, tags = tags.len(), "split entry");

        Ok(ParsedEntry::new(raw, when_expression, title, body, tags))
    }
}

/// Splits `raw` with the default delimiters.
pub fn split_entry(raw: &str) -> Result<ParsedEntry, EntryError> {
    DEFAULT_SPLITTER.split(raw)
}

/// Returns `(when, remainder)`.
fn split_when(text: &str, terminator: char) -> (String, &str) {
    match text.find(terminator) {
        Some(0) => (DEFAULT_WHEN.to_string(), &text[terminator.len_utf8()..]),
        Some(idx) => (
            text[..idx].to_string(),
            &text[idx + terminator.len_utf8()..],
        ),
        None => (DEFAULT_WHEN.to_string(), text),
    }
}

/// Returns normalized `(title, body)`.
fn split_title_body(text: &str, terminator: char) -> (String, String) {
    match text.find(terminator) {
        Some(idx) => (
            normalize_whitespace(&text[..idx]),
            normalize_whitespace(&text[idx + terminator.len_utf8()..]),
        ),
        None => (String::new(), normalize_whitespace(text)),
    }
}

/// Collapses whitespace runs into single spaces and trims the ends.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const TITLE: &str = "This is the title";
    const TEXT: &str = "First sentence.      Second one!";
    const TEXT_NORMALIZED: &str = "First sentence. Second one!";

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(split_entry(""), Err(EntryError::EmptyInput));
        assert_eq!(split_entry("   "), Err(EntryError::EmptyInput));
        assert_eq!(split_entry("\n\t "), Err(EntryError::EmptyInput));
    }

    #[test]
    fn when_defaults_to_today() {
        for input in ["text", "title. body", ":text", "@tag", "."] {
            let entry = split_entry(input).unwrap();
            assert_eq!(entry.when_expression, "today", "input {input:?}");
        }
    }

    #[test]
    fn title_only() {
        let entry = split_entry(&format!("{TITLE}.")).unwrap();
        assert_eq!(entry.title, TITLE);
        assert_eq!(entry.body, "");
    }

    #[test]
    fn body_whitespace_is_collapsed() {
        let entry = split_entry(&format!("{TITLE}.{TEXT}")).unwrap();
        assert_eq!(entry.title, TITLE);
        assert_eq!(entry.body, TEXT_NORMALIZED);
    }

    #[test]
    fn when_title_and_body() {
        let entry = split_entry("friday:   Lunch   with Sam. Tacos,   again.").unwrap();
        assert_eq!(entry.when_expression, "friday");
        assert_eq!(entry.title, "Lunch with Sam");
        assert_eq!(entry.body, "Tacos, again.");
    }

    #[test]
    fn when_expression_is_passed_through_untouched() {
        let entry = split_entry("next   friday  : x. y").unwrap();
        assert_eq!(entry.when_expression, "next   friday  ");
    }

    #[test]
    fn raw_input_is_kept_untrimmed() {
        let entry = split_entry("  hello world  ").unwrap();
        assert_eq!(entry.raw_input, "  hello world  ");
        assert_eq!(entry.body, "hello world");
    }

    #[test]
    fn single_tag_excludes_trailing_punctuation() {
        let entry = split_entry("today: title. has @tag.").unwrap();
        assert_eq!(entry.tags, vec!["@tag"]);
        assert_eq!(entry.title, "title");
        assert_eq!(entry.body, "has @tag.");
    }

    #[test]
    fn tags_are_found_anywhere_and_duplicates_kept() {
        let entry = split_entry("meeting @work: Standup @team. notes @work_2 @work").unwrap();
        assert_eq!(entry.when_expression, "meeting @work");
        assert_eq!(entry.tags, vec!["@work", "@team", "@work_2", "@work"]);
        assert_eq!(entry.title, "Standup @team");
    }

    #[test]
    fn bare_marker_is_not_a_tag() {
        let entry = split_entry("meet @ noon @-dash").unwrap();
        assert!(entry.tags.is_empty());
    }

    #[test]
    fn title_terminator_first_vs_absent() {
        let leading = split_entry(".text").unwrap();
        let absent = split_entry("text").unwrap();
        assert_eq!(leading.title, "");
        assert_eq!(leading.body, "text");
        assert_eq!(absent.title, "");
        assert_eq!(absent.body, "text");
    }

    #[test]
    fn when_terminator_first_is_consumed() {
        let leading = split_entry(":text").unwrap();
        let absent = split_entry("text").unwrap();
        assert_eq!(leading.when_expression, "today");
        assert_eq!(absent.when_expression, "today");
        assert_eq!((leading.title, leading.body), (absent.title, absent.body));

        let leading = split_entry(":Title. body").unwrap();
        let absent = split_entry("Title. body").unwrap();
        assert_eq!(leading.title, "Title");
        assert_eq!((leading.title, leading.body), (absent.title, absent.body));
    }

    #[test]
    fn title_terminator_in_body_splits_title() {
        // No title was intended here, but the first period still ends one.
        let entry = split_entry("today: went to the store. bought milk").unwrap();
        assert_eq!(entry.title, "went to the store");
        assert_eq!(entry.body, "bought milk");
    }

    #[test]
    fn when_terminator_in_body_is_taken_as_when() {
        let entry = split_entry("Meeting notes. agenda: budget").unwrap();
        assert_eq!(entry.when_expression, "Meeting notes. agenda");
        assert_eq!(entry.title, "");
        assert_eq!(entry.body, "budget");
    }

    #[test]
    fn swapped_delimiters() {
        let splitter = FieldSplitter::new(Delimiters {
            when_terminator: '.',
            title_terminator: ':',
            tag_marker: '#',
        })
        .unwrap();
        let entry = splitter.split("friday. title is here: text with #one and #two").unwrap();
        assert_eq!(entry.when_expression, "friday");
        assert_eq!(entry.title, "title is here");
        assert_eq!(entry.body, "text with #one and #two");
        assert_eq!(entry.tags, vec!["#one", "#two"]);
    }

    #[test]
    fn regex_metacharacter_marker_is_escaped() {
        let splitter = FieldSplitter::new(Delimiters {
            tag_marker: '+',
            ..Default::default()
        })
        .unwrap();
        let entry = splitter.split("a +plus tag").unwrap();
        assert_eq!(entry.tags, vec!["+plus"]);
    }

    #[test]
    fn repeated_delimiters_are_rejected() {
        let err = FieldSplitter::new(Delimiters {
            when_terminator: ':',
            title_terminator: ':',
            tag_marker: '@',
        })
        .unwrap_err();
        assert!(matches!(err, EntryError::AmbiguousDelimiters { .. }));
    }

    #[test]
    fn multibyte_text_splits_on_char_boundaries() {
        let entry = split_entry("mañana: Café con Íñigo. ¡Qué   bien!").unwrap();
        assert_eq!(entry.when_expression, "mañana");
        assert_eq!(entry.title, "Café con Íñigo");
        assert_eq!(entry.body, "¡Qué bien!");
    }

    #[test]
    fn normalized_fields_have_no_double_whitespace() {
        let entry = split_entry("x:  a \t b  \n c .  d   e\n\nf ").unwrap();
        for field in [&entry.title, &entry.body] {
            assert!(!field.contains("  "));
            assert!(!field.contains('\n'));
            assert!(!field.contains('\t'));
        }
        assert_eq!(entry.title, "a b c");
        assert_eq!(entry.body, "d e f");
    }
}
