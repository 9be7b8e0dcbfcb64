use anyhow::{Context, Result, anyhow};
use directories::BaseDirs;
use serde::Deserialize;
use std::{collections::HashMap, fs, path::PathBuf, str::FromStr, time::Duration};

use crate::errors::EntryError;
use crate::keywords::Keywords;
use crate::parse_input::{Delimiters, FieldSplitter};
use crate::render::TAG_COLUMN;
use crate::resolve::{Backend, DEFAULT_WOLFRAM_URL, WolframConfig};

/// Overrides the journal file.
pub const JOURNAL_FILE_ENV: &str = "JRNLFILE";
/// WolframAlpha app id.
pub const WOLFRAM_APP_ID_ENV: &str = "WOLFRAMAPPID";

const DEFAULT_JOURNAL_FILE: &str = "./jrnl.org";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    /// Org file entries are appended to.
    pub journal_file: PathBuf,
    /// Preferred editor binary. Optional; the CLI falls back to $VISUAL/$EDITOR.
    pub editor: Option<String>,
    pub delimiters: Delimiters,
    /// Column the headline tags are right-aligned to.
    pub tag_column: usize,
    pub backend: Backend,
    pub wolfram: WolframConfig,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    journal_file: Option<PathBuf>,
    editor: Option<String>,
    when_terminator: Option<char>,
    title_terminator: Option<char>,
    tag_marker: Option<char>,
    tag_column: Option<usize>,
    /// `wolfram` or `local`.
    backend: Option<String>,
    wolfram_app_id: Option<String>,
    wolfram_url: Option<String>,
    timeout_secs: Option<u64>,
    /// Optional table:
    /// [synonyms]
    /// ytd = "yesterday"
    /// ayer = "yesterday"
    synonyms: Option<HashMap<String, String>>,
}

impl Config {
    /// Loads config from disk (first XDG path, then native), applies
    /// environment overrides and defaults, and registers `[synonyms]` with
    /// the global keyword registry.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config()?;
        Self::load_synonyms(&file_config.synonyms);
        Self::from_parts(file_config, |key| std::env::var(key).ok())
    }

    fn from_parts(file_config: FileConfig, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Delimiters::default();
        let delimiters = Delimiters {
            when_terminator: file_config
                .when_terminator
                .unwrap_or(defaults.when_terminator),
            title_terminator: file_config
                .title_terminator
                .unwrap_or(defaults.title_terminator),
            tag_marker: file_config.tag_marker.unwrap_or(defaults.tag_marker),
        };

        let journal_file = env(JOURNAL_FILE_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or(file_config.journal_file)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_JOURNAL_FILE));

        let app_id = env(WOLFRAM_APP_ID_ENV)
            .filter(|v| !v.is_empty())
            .or(file_config.wolfram_app_id);

        // Without an explicit choice, go online only when there are credentials.
        let backend = match file_config.backend.as_deref() {
            Some(name) => {
                Backend::from_str(name).map_err(|_| anyhow!("unknown time backend `{name}`"))?
            }
            None if app_id.is_some() => Backend::Wolfram,
            None => Backend::Local,
        };

        let wolfram = WolframConfig {
            app_id,
            base_url: file_config
                .wolfram_url
                .unwrap_or_else(|| DEFAULT_WOLFRAM_URL.to_string()),
            timeout: Duration::from_secs(file_config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        };

        Ok(Self {
            journal_file,
            editor: file_config.editor,
            delimiters,
            tag_column: file_config.tag_column.unwrap_or(TAG_COLUMN),
            backend,
            wolfram,
        })
    }

    /// A splitter for the configured delimiters.
    pub fn splitter(&self) -> Result<FieldSplitter, EntryError> {
        FieldSplitter::new(self.delimiters)
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b.home_dir().join(".config").join("jrnl").join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("jrnl").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Reads the first existing config file. No file means all defaults.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }

    /// Merge `[synonyms]` into the global keyword registry, skipping aliases
    /// that would shadow a canonical word.
    fn load_synonyms(synonyms: &Option<HashMap<String, String>>) {
        let Some(map) = synonyms else {
            return;
        };
        let pairs: Vec<(String, String)> = map
            .iter()
            .filter(|(alias, _)| !Keywords::is_canonical(alias))
            .map(|(a, t)| (a.clone(), t.clone()))
            .collect();
        if !pairs.is_empty() {
            Keywords::extend(&pairs);
        }
    }
}
