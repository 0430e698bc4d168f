// std imports
use std::cell::RefCell;

// local imports
use crate::geometry::Mapper;

/// What a transcript line shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineKind {
    /// Committed input, shown after its prompt.
    #[default]
    Input,
    /// Command result.
    Output,
    /// Error message.
    Error,
}

/// A rendered line, with the prompt it was entered at if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranscriptLine {
    pub prompt: String,
    pub text: String,
    pub kind: LineKind,
}

impl TranscriptLine {
    pub fn prompted(prompt: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            text: text.into(),
            kind: LineKind::Input,
        }
    }

    /// Line without a prompt.
    pub fn plain(text: impl Into<String>, kind: LineKind) -> Self {
        Self {
            prompt: String::new(),
            text: text.into(),
            kind,
        }
    }

    pub fn is_prompted(&self) -> bool {
        !self.prompt.is_empty()
    }

    /// Length in cells, prompt included.
    pub fn len(&self) -> usize {
        self.prompt.chars().count() + self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.prompt.is_empty() && self.text.is_empty()
    }
}

/// Everything shown so far, in order, for redrawing.
///
/// Each line starts on the logical row right after the last physical row of
/// the line before it. Those rows depend on the width, so they are computed
/// lazily and cached until the width changes.
#[derive(Debug, Clone, Default)]
pub struct TranscriptLog {
    lines: Vec<TranscriptLine>,
    mapper: Mapper,
    layout: RefCell<Layout>,
}

#[derive(Debug, Clone, Default)]
struct Layout {
    width: usize,
    rows: Vec<usize>,
    next: usize,
}

impl TranscriptLog {
    pub fn new(mapper: Mapper) -> Self {
        Self {
            lines: Vec::new(),
            mapper,
            layout: RefCell::default(),
        }
    }

    pub fn push(&mut self, line: TranscriptLine) {
        let layout = self.layout.get_mut();
        if layout.width != 0 {
            let span = self.mapper.rows_spanned(line.len(), layout.width);
            layout.rows.push(layout.next);
            layout.next += span;
        }
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }

    /// Logical row where the next line starts.
    pub fn next_row(&self, width: usize) -> usize {
        self.relayout(width);
        self.layout.borrow().next
    }

    /// Lines paired with the logical row each one starts at.
    pub fn rows(&self, width: usize) -> impl Iterator<Item = (usize, &TranscriptLine)> {
        self.relayout(width);
        let rows = self.layout.borrow().rows.clone();
        rows.into_iter().zip(self.lines.iter())
    }

    fn relayout(&self, width: usize) {
        let width = width.max(1);
        if self.layout.borrow().width == width {
            return;
        }

        log::trace!("transcript: layout {} lines for width {}", self.lines.len(), width);
        let mut rows = Vec::with_capacity(self.lines.len());
        let mut next = 0;
        for line in &self.lines {
            rows.push(next);
            next += self.mapper.rows_spanned(line.len(), width);
        }
        self.layout.replace(Layout { width, rows, next });
    }
}
