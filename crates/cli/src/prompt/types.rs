//! State for the list widget.
//!
//! Rows are always referred to by their position in the options slice the
//! widget was given, so filtering never changes what a row means.

/// Direction to cycle through rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleDirection {
    Up,
    Down,
}

/// The visible window onto the (possibly filtered) rows.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ViewportState {
    pub offset: usize,
    pub height: u16,
    pub width: u16,
}

/// Everything needed to draw one frame of the widget.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct UiState {
    /// Highlighted position within the visible rows
    pub selected_index: usize,
    pub viewport: ViewportState,
    pub is_filtering: bool,
    pub filter_text: String,
}

impl UiState {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            selected_index: 0,
            viewport: ViewportState {
                offset: 0,
                height: viewport_height(height),
                width,
            },
            is_filtering: false,
            filter_text: String::new(),
        }
    }
}

/// Rows available for options once the label, header and filter lines are drawn.
#[must_use]
pub fn viewport_height(terminal_height: u16) -> u16 {
    terminal_height.saturating_sub(3).max(1)
}

/// What a key press means for the widget.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum KeyOutcome {
    /// The row at this position in the original options was activated.
    Activate(usize),
    /// The user backed out of the prompt.
    Abort,
    Move(CycleDirection),
    Update(UiState),
    Ignore,
}
