use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Represents the result of handling a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Quit the application
    Quit,
    /// Focus the Available panel
    FocusAvailable,
    /// Focus the Applied panel
    FocusApplied,
    /// Cycle to the next panel
    NextPanel,
    /// Cycle to the previous panel
    PrevPanel,
    /// Move the cursor down
    CursorDown,
    /// Move the cursor up
    CursorUp,
    /// Scroll the preview down one line
    ScrollPreviewDown,
    /// Scroll the preview up one line
    ScrollPreviewUp,
    /// Switch to the next category tab
    NextTab,
    /// Switch to the previous category tab
    PrevTab,
    /// Apply or remove the selected item
    Toggle,
    /// Show the tree overlay for a directory item
    ShowTree,
    /// Show the help overlay
    Help,
    /// Close the open overlay
    CloseOverlay,
    /// No action
    None,
}

/// Maps keyboard events to actions while browsing.
///
/// Shift is ignored so `J`, `K` and `?` work regardless of how the terminal
/// reports them.
pub fn handle_key_event(key: KeyEvent) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => KeyAction::Quit,
            _ => KeyAction::None,
        };
    }

    match key.code {
        // Quit: q or Esc
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,

        // Panels
        KeyCode::Char('1') => KeyAction::FocusAvailable,
        KeyCode::Char('2') => KeyAction::FocusApplied,
        KeyCode::Tab | KeyCode::Char('l') => KeyAction::NextPanel,
        KeyCode::BackTab | KeyCode::Char('h') => KeyAction::PrevPanel,

        // Cursor
        KeyCode::Down | KeyCode::Char('j') => KeyAction::CursorDown,
        KeyCode::Up | KeyCode::Char('k') => KeyAction::CursorUp,

        // Preview scrolling
        KeyCode::Char('J') => KeyAction::ScrollPreviewDown,
        KeyCode::Char('K') => KeyAction::ScrollPreviewUp,

        // Category tabs
        KeyCode::Char(']') => KeyAction::NextTab,
        KeyCode::Char('[') => KeyAction::PrevTab,

        // Actions
        KeyCode::Char(' ') | KeyCode::Enter => KeyAction::Toggle,
        KeyCode::Char('t') => KeyAction::ShowTree,
        KeyCode::Char('?') => KeyAction::Help,

        _ => KeyAction::None,
    }
}

/// Maps keyboard events while an overlay is open: closing and scrolling
pub fn handle_overlay_input(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::CloseOverlay,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::CursorDown,
        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::CursorUp,
        _ => KeyAction::None,
    }
}
