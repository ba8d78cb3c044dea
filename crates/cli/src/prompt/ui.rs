use std::fmt::Display;
use std::io::{stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Color::{DarkBlue, DarkGreen, Reset, Yellow};
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{cursor, event, execute, queue, terminal, ExecutableCommand};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use log::debug;

use super::types::CycleDirection::{Down, Up};
use super::types::{viewport_height, CycleDirection, KeyOutcome, UiState, ViewportState};
use skaffold_runner_core::error::{Error, Result};
use skaffold_runner_core::selection::Prompter;

/// First terminal row used for options; the label and header sit above it.
const FIRST_OPTION_ROW: u16 = 2;

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = stdout();
        let _ = stdout.execute(Show);
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}

/// A full-screen crossterm list that returns the activated row.
///
/// Up/Down (or `k`/`j`) move, Enter activates, `/` starts fuzzy filtering,
/// and `q`, Esc or Ctrl-C abort the prompt.
#[derive(Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select(&mut self, label: &str, options: &[String]) -> Result<usize> {
        let row = run_list(label, options)?;
        if let Some(option) = options.get(row) {
            println!("{label} {option}");
        }
        Ok(row)
    }
}

fn run_list(label: &str, options: &[String]) -> Result<usize> {
    let mut stdout = stdout();
    stdout.execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    let _raw_mode_guard = RawModeGuard; // Restores the terminal however we leave
    stdout.execute(Hide)?;

    let (width, height) = terminal::size()?;
    let mut ui_state = UiState::new(width, height);
    let mut visible_rows = filter_options(options, &ui_state.filter_text);
    let mut new_ui_state = Some(ui_state.clone());

    loop {
        if let Some(state) = new_ui_state.take() {
            if state.filter_text != ui_state.filter_text {
                visible_rows = filter_options(options, &state.filter_text);
            }
            ui_state = clamp_selection(state, visible_rows.len());
            redraw_ui(label, &ui_state, &visible_rows, options)?;
        }

        if !event::poll(Duration::from_millis(500))? {
            continue;
        }

        match event::read()? {
            Event::Key(key_event) => match handle_key_event(key_event, &ui_state, &visible_rows) {
                KeyOutcome::Activate(row) => {
                    debug!("`{label}`: activated row {row}");
                    return Ok(row);
                }
                KeyOutcome::Abort => {
                    return Err(Error::PromptAborted(format!("`{label}` was cancelled")));
                }
                KeyOutcome::Move(direction) => {
                    new_ui_state = Some(move_selected_index(
                        &ui_state,
                        visible_rows.len(),
                        direction,
                    ));
                }
                KeyOutcome::Update(state) => new_ui_state = Some(state),
                KeyOutcome::Ignore => {}
            },
            Event::Resize(width, height) => {
                new_ui_state = Some(handle_resize(width, height, &ui_state, visible_rows.len()));
            }
            _ => {}
        }
    }
}

fn redraw_ui(label: &str, ui_state: &UiState, visible_rows: &[usize], options: &[String]) -> Result<()> {
    let mut stdout = stdout();

    queue!(
        stdout,
        Clear(ClearType::All),
        MoveTo(0, 0),
        SetAttribute(Attribute::Bold),
        Print(label),
        SetAttribute(Attribute::Reset),
    )?;

    print_header(ui_state, visible_rows.len())?;

    if visible_rows.is_empty() {
        queue!(
            stdout,
            MoveTo(0, FIRST_OPTION_ROW),
            SetForegroundColor(Color::Red),
            Print("No matching options!"),
            SetAttribute(Attribute::Reset),
            SetForegroundColor(Reset),
        )?;
    } else {
        print_rows_with_selection(ui_state, visible_rows, options)?;
    }

    if ui_state.is_filtering {
        let filter_row = FIRST_OPTION_ROW + ui_state.viewport.height;
        queue!(
            stdout,
            MoveTo(0, filter_row),
            SetAttribute(Attribute::Bold),
            Print(format!("Filter: {}", ui_state.filter_text)),
            SetAttribute(Attribute::Reset)
        )?;
    }

    stdout.flush()?;
    Ok(())
}

fn print_header(ui_state: &UiState, visible_count: usize) -> Result<()> {
    let mut stdout = stdout();
    let left_padding = "  ";

    let instructions = if ui_state.is_filtering {
        "<esc>: Stop Filtering".to_string()
    } else {
        let position = if visible_count == 0 {
            0
        } else {
            ui_state.selected_index + 1
        };
        format!(
            "/: Begin Filtering   |   {}/{}   |   q: Quit",
            pad_to_width_of(position, visible_count),
            visible_count
        )
    };

    let used = left_padding.len() + instructions.len();
    let right_padding = " ".repeat((ui_state.viewport.width as usize).saturating_sub(used));

    queue!(
        stdout,
        MoveTo(0, 1),
        SetBackgroundColor(DarkGreen),
        Print(left_padding),
        Print(instructions),
        Print(right_padding),
        SetBackgroundColor(Reset),
        SetForegroundColor(Reset),
    )?;

    Ok(())
}

/// Right-aligns `value` to the width of `max_number`.
fn pad_to_width_of<T: Display>(value: T, max_number: usize) -> String {
    let width = max_number.to_string().len();
    format!("{:>width$}", value.to_string())
}

fn print_rows_with_selection(
    ui_state: &UiState,
    visible_rows: &[usize],
    options: &[String],
) -> Result<()> {
    let mut stdout = stdout();
    let viewport = &ui_state.viewport;

    let window = visible_rows
        .iter()
        .enumerate()
        .skip(viewport.offset)
        .take(viewport.height as usize);

    for (line, (position, row)) in window.enumerate() {
        let is_selected = position == ui_state.selected_index;
        let number = pad_to_width_of(row + 1, options.len());
        let content = format!("[{number}] {}", options[*row]);
        let padding = " ".repeat((viewport.width as usize).saturating_sub(content.len()));

        queue!(stdout, MoveTo(0, FIRST_OPTION_ROW + line as u16))?;

        if is_selected {
            queue!(
                stdout,
                SetAttribute(Attribute::Bold),
                SetBackgroundColor(DarkBlue),
                SetForegroundColor(Yellow),
            )?;
        }

        queue!(
            stdout,
            Print(content),
            Print(padding),
            SetAttribute(Attribute::Reset),
            SetBackgroundColor(Reset),
            SetForegroundColor(Reset),
            cursor::MoveToNextLine(1),
        )?;
    }

    Ok(())
}

/// Maps a key press onto the widget; never touches the terminal except to ring the bell.
#[must_use]
pub fn handle_key_event(key_event: KeyEvent, ui_state: &UiState, visible_rows: &[usize]) -> KeyOutcome {
    if key_event.kind != KeyEventKind::Press {
        return KeyOutcome::Ignore;
    }

    match key_event.code {
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyOutcome::Abort
        }
        KeyCode::Up => KeyOutcome::Move(Up),
        KeyCode::Down => KeyOutcome::Move(Down),
        KeyCode::Enter => match visible_rows.get(ui_state.selected_index) {
            Some(row) => KeyOutcome::Activate(*row),
            None => {
                let _ = execute!(stdout(), Print("\x07"));
                KeyOutcome::Ignore
            }
        },
        KeyCode::Backspace if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            if updated_state.filter_text.pop().is_none() {
                return KeyOutcome::Ignore;
            }
            KeyOutcome::Update(updated_state)
        }
        KeyCode::Esc if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = false;
            updated_state.filter_text.clear();
            KeyOutcome::Update(updated_state)
        }
        KeyCode::Char(c) if ui_state.is_filtering => {
            let mut updated_state = ui_state.clone();
            updated_state.filter_text.push(c);
            KeyOutcome::Update(updated_state)
        }
        KeyCode::Char('/') => {
            let mut updated_state = ui_state.clone();
            updated_state.is_filtering = true;
            KeyOutcome::Update(updated_state)
        }
        KeyCode::Char('k') => KeyOutcome::Move(Up),
        KeyCode::Char('j') => KeyOutcome::Move(Down),
        KeyCode::Char('q') | KeyCode::Esc => KeyOutcome::Abort,
        _ => KeyOutcome::Ignore,
    }
}

/// Keeps the selection visible after the terminal changes size.
#[must_use]
pub fn handle_resize(width: u16, height: u16, ui_state: &UiState, visible_count: usize) -> UiState {
    let new_height = viewport_height(height);
    let mut ui_state = ui_state.clone();
    let mut new_viewport = ViewportState {
        width,
        height: new_height,
        offset: ui_state.viewport.offset,
    };

    match new_height.cmp(&ui_state.viewport.height) {
        std::cmp::Ordering::Greater if new_viewport.offset > 0 => {
            let height_increase = new_height - ui_state.viewport.height;
            new_viewport.offset = new_viewport.offset.saturating_sub(height_increase as usize);
        }
        std::cmp::Ordering::Less
            if ui_state.selected_index >= new_viewport.offset + new_height as usize =>
        {
            new_viewport.offset = ui_state.selected_index + 1 - new_height as usize;

            if new_viewport.offset + new_height as usize > visible_count {
                new_viewport.offset = visible_count.saturating_sub(new_height as usize);
            }
        }
        _ => {}
    }

    ui_state.viewport = new_viewport;
    ui_state
}

/// Moves the highlight one row, wrapping at either end.
#[must_use]
pub fn move_selected_index(
    ui_state: &UiState,
    visible_count: usize,
    direction: CycleDirection,
) -> UiState {
    if visible_count == 0 {
        return ui_state.clone();
    }

    let mut ui_state = ui_state.clone();
    let height = ui_state.viewport.height as usize;
    let previous_index = ui_state.selected_index;

    let new_index = match direction {
        Up if previous_index == 0 => {
            let last = visible_count - 1;
            ui_state.viewport.offset = last.saturating_sub(height - 1);
            last
        }
        Up => {
            let new_index = previous_index - 1;
            if new_index < ui_state.viewport.offset {
                ui_state.viewport.offset = new_index;
            }
            new_index
        }
        Down => {
            let new_index = (previous_index + 1) % visible_count;
            if new_index < previous_index {
                ui_state.viewport.offset = 0;
            } else if new_index >= ui_state.viewport.offset + height {
                ui_state.viewport.offset = new_index + 1 - height;
            }
            new_index
        }
    };

    ui_state.selected_index = new_index;
    ui_state
}

/// Pulls the highlight back inside the visible rows after a filter change.
#[must_use]
pub fn clamp_selection(mut ui_state: UiState, visible_count: usize) -> UiState {
    let last = visible_count.saturating_sub(1);
    if ui_state.selected_index > last {
        ui_state.selected_index = last;
    }
    if ui_state.viewport.offset > ui_state.selected_index {
        ui_state.viewport.offset = ui_state.selected_index;
    }
    ui_state
}

/// Positions of the options matching `predicate`, best match first.
///
/// An empty predicate keeps every option in its original order.
#[must_use]
pub fn filter_options(options: &[String], predicate: &str) -> Vec<usize> {
    if predicate.is_empty() {
        return (0..options.len()).collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, usize)> = options
        .iter()
        .enumerate()
        .filter_map(|(row, option)| {
            matcher
                .fuzzy_match(option, predicate)
                .map(|score| (score, row))
        })
        .collect();

    scored.sort_by(|(score1, row1), (score2, row2)| score2.cmp(score1).then(row1.cmp(row2)));
    scored.into_iter().map(|(_, row)| row).collect()
}
