//! Single and repeated multi-choice prompts over an in-memory list.
//!
//! Rendering is delegated to a [`Prompter`], which only has to show a list
//! and report which row was activated. Everything else (the "done" row,
//! shrinking the list between rounds, collecting picks) lives here so it can
//! be driven without a terminal.

use log::debug;

use crate::error::{Error, Result};

/// Text of the synthetic row that ends a multi-choice prompt.
pub const SENTINEL: &str = "I'm done selecting items";

/// The single-choice primitive backing every prompt.
pub trait Prompter {
    /// Shows `options` under `label` and returns the position of the activated row.
    ///
    /// # Errors
    ///
    /// Implementations return [`Error::PromptAborted`] when the user cancels,
    /// or [`Error::Terminal`] when the terminal fails.
    fn select(&mut self, label: &str, options: &[String]) -> Result<usize>;
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn select(&mut self, label: &str, options: &[String]) -> Result<usize> {
        (**self).select(label, options)
    }
}

/// What the user activated in one multi-choice round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Item(usize),
    Done,
}

/// The working list of a multi-choice prompt.
///
/// Each round consumes the value and hands back a strictly smaller one, so
/// the list is never shared or mutated in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidates {
    items: Vec<String>,
}

impl Candidates {
    /// # Errors
    ///
    /// Returns [`Error::ReservedCandidate`] if any item equals [`SENTINEL`].
    pub fn new(items: Vec<String>) -> Result<Self> {
        if let Some(reserved) = items.iter().find(|item| item.as_str() == SENTINEL) {
            return Err(Error::ReservedCandidate(reserved.clone()));
        }
        Ok(Self { items })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rows offered for this round: the remaining items followed by the sentinel.
    #[must_use]
    pub fn rows(&self) -> Vec<String> {
        let mut rows = self.items.clone();
        rows.push(SENTINEL.to_string());
        rows
    }

    /// Maps an activated row back to a [`Pick`]. `None` if the row does not exist.
    #[must_use]
    pub fn pick_at(&self, row: usize) -> Option<Pick> {
        match row.cmp(&self.items.len()) {
            std::cmp::Ordering::Less => Some(Pick::Item(row)),
            std::cmp::Ordering::Equal => Some(Pick::Done),
            std::cmp::Ordering::Greater => None,
        }
    }

    /// Removes the item at `position`, returning it with the remaining list,
    /// or `None` if `position` is not an item.
    #[must_use]
    pub fn take(mut self, position: usize) -> Option<(String, Self)> {
        (position < self.items.len()).then(|| {
            let item = self.items.remove(position);
            (item, self)
        })
    }
}

pub struct SelectionEngine<P: Prompter> {
    prompter: P,
}

impl<P: Prompter> SelectionEngine<P> {
    pub fn new(prompter: P) -> Self {
        Self { prompter }
    }

    pub fn into_prompter(self) -> P {
        self.prompter
    }

    /// Asks the user to pick exactly one of `candidates`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCandidates`] when there is nothing to offer; prompter
    /// failures are passed through unchanged.
    pub fn single_select(&mut self, label: &str, candidates: &[String]) -> Result<String> {
        if candidates.is_empty() {
            return Err(Error::empty_candidates(label));
        }

        let row = self.prompter.select(label, candidates)?;
        candidates.get(row).cloned().ok_or_else(|| {
            Error::PromptAborted(format!("row {row} is not one of the options for `{label}`"))
        })
    }

    /// Lets the user pick items one at a time until they choose [`SENTINEL`]
    /// or run out of items. Picks are returned in the order they were made.
    ///
    /// # Errors
    ///
    /// [`Error::NoSelection`] if nothing was picked, [`Error::ReservedCandidate`]
    /// if a candidate collides with the sentinel, and prompter failures.
    pub fn multi_select(&mut self, label: &str, candidates: Vec<String>) -> Result<Vec<String>> {
        let mut working = Candidates::new(candidates)?;
        let mut selections = Vec::with_capacity(working.len());

        while !working.is_empty() {
            match self.pick(label, &working)? {
                Pick::Done => break,
                Pick::Item(position) => {
                    let (item, remaining) = working.take(position).ok_or_else(|| {
                        Error::PromptAborted(format!(
                            "position {position} is not one of the options for `{label}`"
                        ))
                    })?;
                    debug!("`{label}`: picked `{item}`, {} left", remaining.len());
                    selections.push(item);
                    working = remaining;
                }
            }
        }

        if selections.is_empty() {
            return Err(Error::no_selection(label));
        }
        Ok(selections)
    }

    fn pick(&mut self, label: &str, working: &Candidates) -> Result<Pick> {
        let rows = working.rows();
        let row = self.prompter.select(label, &rows)?;
        working.pick_at(row).ok_or_else(|| {
            Error::PromptAborted(format!("row {row} is not one of the options for `{label}`"))
        })
    }
}
