use ratatui::style::Color;

pub const BORDER_COLOR: Color = Color::Reset;
pub const FOCUS_BORDER: Color = Color::Green;
pub const SELECTION_BG: Color = Color::Rgb(106, 159, 181);
pub const SELECTION_FG: Color = Color::White;

pub const TEXT_PRIMARY: Color = Color::Reset;
pub const TEXT_SECONDARY: Color = Color::DarkGray;

pub const ACCENT_DIRECTORY: Color = Color::Cyan;
pub const ACCENT_APPLIED: Color = Color::Green;
pub const ACCENT_HIGHLIGHT: Color = Color::Yellow;
pub const ACCENT_ERROR: Color = Color::Red;
