mod editor_utils;
mod use_color;
mod write_mode;

pub use use_color::use_color;
pub use write_mode::write_mode;
