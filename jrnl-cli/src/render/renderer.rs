use super::theme::OneDark;
use jrnl_core::EntryRef;
use jrnl_core::render::TIMESTAMP_FORMAT;
use termimad::{MadSkin, crossterm::style::Stylize};

/// Status output for the terminal.
pub struct Renderer {
    skin: MadSkin,
    use_color: bool,
}

impl Renderer {
    pub fn new(use_color: bool) -> Self {
        Self {
            skin: OneDark::default_onedark_skin(),
            use_color,
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    /// `2019/06/11 Tue 15:32 - Title [@tag]`, plus a note when the time
    /// could not be resolved.
    pub fn print_entry_line(&self, entry: &EntryRef) {
        let mut time = entry.time.format(TIMESTAMP_FORMAT).to_string();
        let mut title = if entry.title.is_empty() {
            "(untitled)".to_string()
        } else {
            entry.title.clone()
        };
        let mut tags = String::new();
        if !entry.tags.is_empty() {
            tags = format!(" [{}]", entry.tags.join(", "));
        }
        let mut note = String::new();
        if entry.time_resolution_failed {
            note = format!(" (could not resolve `{}`, used current time)", entry.when_expression);
        }
        if self.use_color {
            time = time.with(OneDark::CYAN).to_string();
            title = title.with(OneDark::YELLOW).to_string();
            tags = tags.with(OneDark::GREEN).to_string();
            note = note.with(OneDark::RED).to_string();
        }
        println!("{time} - {title}{tags}{note}");
    }

    /// Prints a rendered entry as it would be written.
    pub fn print_preview(&self, rendered: &str) {
        if self.use_color {
            print!("{}", rendered.with(OneDark::BLUE));
        } else {
            print!("{rendered}");
        }
    }
}
