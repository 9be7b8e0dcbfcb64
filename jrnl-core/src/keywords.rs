use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::sync::RwLock;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// Words the local time resolver understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Keyword {
    At,
    Now,
    Today,
    Yesterday,
    Tomorrow,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
    Morning,
    Noon,
    Evening,
    Night,
    Midnight,
}

pub struct Keywords;

impl Keywords {
    /// Global registry mapping lowercased input words to their keyword.
    ///
    /// Seeded with every canonical word on first access; user synonyms are
    /// added through [`extend`](Self::extend).
    fn registry() -> &'static RwLock<HashMap<String, Keyword>> {
        static REGISTRY: Lazy<RwLock<HashMap<String, Keyword>>> = Lazy::new(|| {
            let m = Keyword::iter()
                .map(|keyword| (keyword.as_ref().to_string(), keyword))
                .collect();
            RwLock::new(m)
        });
        &REGISTRY
    }

    /// Adds `(alias, target)` synonyms. Targets that are not already known are
    /// skipped. Keys are lowercased so lookups stay case-insensitive.
    ///
    /// ```toml
    /// [synonyms]
    /// ytd = "yesterday"
    /// ayer = "yesterday"
    /// ```
    pub fn extend(synonyms: &[(String, String)]) {
        let mut reg = match Self::registry().write() {
            Ok(reg) => reg,
            Err(poisoned) => poisoned.into_inner(),
        };
        for (alias, target) in synonyms {
            if let Some(&canonical) = reg.get(&target.to_ascii_lowercase()) {
                reg.insert(alias.to_ascii_lowercase(), canonical);
            }
        }
    }

    /// Returns `true` if `word` is a canonical word (eg "today").
    pub fn is_canonical(word: &str) -> bool {
        let word = word.to_ascii_lowercase();
        Keyword::iter().any(|key| key.as_ref() == word)
    }

    /// Returns `true` if `input` is, case-insensitively, `keyword` or one of
    /// its synonyms.
    pub fn matches(keyword: Keyword, input: &str) -> bool {
        let reg = match Self::registry().read() {
            Ok(reg) => reg,
            Err(poisoned) => poisoned.into_inner(),
        };
        reg.get(&input.trim().to_ascii_lowercase())
            .map(|&canon| canon == keyword)
            .unwrap_or(false)
    }

    /// Byte offset of `keyword` as a whole word in `input`.
    pub fn find_position(keyword: Keyword, input: &str) -> Option<usize> {
        let lower = input.to_ascii_lowercase();
        let pattern = format!(r"\b{}\b", regex::escape(keyword.as_ref()));
        let re = Regex::new(&pattern).ok()?;
        re.find(&lower).map(|m| m.start())
    }
}
