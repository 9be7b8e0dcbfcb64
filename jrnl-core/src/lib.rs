pub mod config;
pub mod entry;
pub mod errors;
pub mod journal;
pub mod keywords;
pub mod parse_input;
pub mod render;
pub mod resolve;

pub use config::Config;
pub use entry::ParsedEntry;
pub use errors::{EntryError, ResolveError};
pub use journal::{EntryRef, Journal};
pub use parse_input::{Delimiters, FieldSplitter, split_entry};
pub use render::{Renderer, render_entry};
pub use resolve::{Backend, FixedClock, KeywordResolver, TimeResolver, WolframConfig, WolframResolver};
