// std imports
use std::collections::BTreeMap;

/// Which buffer is currently being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Active {
    /// The new line buffer, nothing is recalled.
    #[default]
    Fresh,
    /// History entry with the given index.
    Recalled(usize),
}

/// Committed input lines with uncommitted edits kept aside.
///
/// Entries are never modified once appended. Editing a recalled entry edits
/// a clone of it stored in a sparse overlay, which is dropped as a whole on
/// the next [`append`](Self::append). Every read or write of the active
/// buffer goes through [`active`](Self::active) or
/// [`active_mut`](Self::active_mut), so there is no long-lived reference into
/// the overlay or the entries.
#[derive(Debug, Clone, Default)]
pub struct HistoryStore {
    entries: Vec<String>,
    dirty: BTreeMap<usize, String>,
    fresh: String,
    active: Active,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Committed entry at `index`.
    pub fn entry(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn entries(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Recall pointer, equal to [`len`](Self::len) when nothing is recalled.
    pub fn pointer(&self) -> usize {
        match self.active {
            Active::Fresh => self.entries.len(),
            Active::Recalled(index) => index,
        }
    }

    pub fn active_tag(&self) -> Active {
        self.active
    }

    /// Number of recalled entries with uncommitted edits.
    pub fn dirty_len(&self) -> usize {
        self.dirty.len()
    }

    /// Commits a line and resets editing to a fresh empty buffer.
    pub fn append(&mut self, text: impl Into<String>) {
        let text = text.into();
        log::debug!(
            "history: commit entry {} ({} uncommitted edits dropped)",
            self.entries.len(),
            self.dirty.len()
        );
        self.entries.push(text);
        self.dirty.clear();
        self.fresh.clear();
        self.active = Active::Fresh;
    }

    /// Switches to an empty fresh buffer, keeping uncommitted edits of recalled entries.
    pub fn restart(&mut self) {
        self.fresh.clear();
        self.active = Active::Fresh;
    }

    /// Commits the active buffer and returns the committed text.
    pub fn commit(&mut self) -> String {
        let text = self.active().to_owned();
        self.append(text.clone());
        text
    }

    /// Steps to the previous entry.
    ///
    /// Returns the text of the newly active buffer, or `None` if already at
    /// the oldest entry.
    pub fn recall_up(&mut self) -> Option<&str> {
        let pointer = self.pointer();
        if pointer == 0 {
            return None;
        }
        self.active = Active::Recalled(pointer - 1);
        Some(self.active())
    }

    /// Steps to the next entry, or back to the fresh buffer after the newest one.
    ///
    /// Returns the text of the newly active buffer, or `None` if nothing is recalled.
    pub fn recall_down(&mut self) -> Option<&str> {
        let pointer = self.pointer();
        if pointer >= self.entries.len() {
            return None;
        }
        self.active = if pointer + 1 == self.entries.len() {
            Active::Fresh
        } else {
            Active::Recalled(pointer + 1)
        };
        Some(self.active())
    }

    /// Text of the active buffer.
    pub fn active(&self) -> &str {
        match self.active {
            Active::Fresh => &self.fresh,
            Active::Recalled(index) => self
                .dirty
                .get(&index)
                .or_else(|| self.entries.get(index))
                .map(String::as_str)
                .unwrap_or_default(),
        }
    }

    /// Mutable access to the active buffer.
    ///
    /// For a recalled entry, the first call clones it into the overlay and
    /// later calls return that same clone.
    pub fn active_mut(&mut self) -> &mut String {
        match self.active {
            Active::Fresh => &mut self.fresh,
            Active::Recalled(index) => {
                let entries = &self.entries;
                self.dirty.entry(index).or_insert_with(|| {
                    log::trace!("history: start editing entry {index}");
                    entries.get(index).cloned().unwrap_or_default()
                })
            }
        }
    }
}
