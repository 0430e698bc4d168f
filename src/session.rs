// third-party imports
use thiserror::Error;

// local imports
use crate::{
    editor::{LineEditor, Repaint},
    error::Result,
    geometry::{LogicalPosition, MapMode, Mapper, PhysicalPosition},
    history::HistoryStore,
    scroll::ScrollController,
    surface::{Event, Key, KeySource, Screen, Style},
    transcript::{LineKind, TranscriptLine, TranscriptLog},
};

// ---

/// Session parameters.
#[derive(Debug, Clone)]
pub struct Options {
    pub prompt: String,
    pub wrap: MapMode,
    pub replace: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            prompt: "> ".into(),
            wrap: MapMode::WrapAround,
            replace: false,
        }
    }
}

/// Non-fatal input problem, shown in place and otherwise ignored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    #[error("unrecognized key {0}")]
    UnrecognizedKey(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Editing,
}

/// Interactive transcript on a character grid.
///
/// [`get_line`](Self::get_line) reads one line with editing and history
/// recall, [`put_line`](Self::put_line) appends output. All positions are
/// logical until they reach the screen, so long lines wrap and a resized
/// screen is handled by simply redrawing.
pub struct Session<S> {
    screen: S,
    prompt: String,
    prompt_len: usize,
    mapper: Mapper,
    scroll: ScrollController,
    history: HistoryStore,
    editor: LineEditor,
    transcript: TranscriptLog,
    state: State,
    diagnostic: Option<Diagnostic>,
}

impl<S: Screen> Session<S> {
    pub fn new(screen: S, options: Options) -> Self {
        let mapper = Mapper::new(options.wrap);
        Self {
            screen,
            prompt_len: options.prompt.chars().count(),
            prompt: options.prompt,
            mapper,
            scroll: ScrollController::new(),
            history: HistoryStore::new(),
            editor: LineEditor::new(options.replace),
            transcript: TranscriptLog::new(mapper),
            state: State::Idle,
            diagnostic: None,
        }
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn transcript(&self) -> &TranscriptLog {
        &self.transcript
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll.offset()
    }

    pub fn is_editing(&self) -> bool {
        self.state == State::Editing
    }

    /// Logical position of the cursor.
    pub fn cursor(&self) -> LogicalPosition {
        let row = self.next_row();
        match self.state {
            State::Editing => LogicalPosition::new(row, self.editor.cursor()),
            State::Idle => LogicalPosition::new(row, 0),
        }
    }

    /// Whether the cursor row is inside the viewport.
    pub fn is_cursor_in_screen(&self) -> bool {
        let (width, height) = self.screen.viewport_size();
        let cursor = self.cursor();
        let row = self.mapper.row(cursor.row, cursor.col, width);
        self.scroll.is_visible(row, height)
    }

    /// Reads one line interactively and commits it to the history.
    pub fn get_line(&mut self, keys: &mut impl KeySource) -> Result<String> {
        self.read_line_with(|_| keys.next_event())
    }

    /// Same as [`get_line`](Self::get_line) with the screen as the key source.
    pub fn read_line(&mut self) -> Result<String>
    where
        S: KeySource,
    {
        self.read_line_with(|screen| screen.next_event())
    }

    fn read_line_with<F>(&mut self, mut next_event: F) -> Result<String>
    where
        F: FnMut(&mut S) -> Result<Event>,
    {
        self.begin_line();

        loop {
            self.place_cursor(true);
            self.screen.present()?;

            let event = next_event(&mut self.screen)?;
            self.place_cursor(false);
            self.clear_diagnostic();

            match event {
                Event::Key(Key::Enter) => break,
                Event::Key(key) => self.dispatch(key),
                Event::Resize => self.resize(),
            }
        }

        let line = self.end_line();
        self.screen.present()?;
        Ok(line)
    }

    /// Appends a line without a prompt at the cursor row.
    pub fn put_line(&mut self, text: &str, kind: LineKind) {
        let width = self.width();
        let row = self.next_row();
        let line = TranscriptLine::plain(text, kind);
        let last = self.mapper.row(row, line.len().saturating_sub(1), width);
        let style = line_style(kind);
        self.transcript.push(line);

        if !self.ensure_visible(last) {
            self.paint_line(row, "", text, style);
        }
    }

    /// Redraws everything visible from the transcript.
    pub fn redraw(&mut self) {
        let (width, height) = self.screen.viewport_size();
        let top = self.scroll.offset();
        let bottom = top + height;
        log::trace!("session: redraw rows {top}..{bottom} at width {width}");

        let mapper = self.mapper;
        let visible: Vec<(usize, TranscriptLine)> = self
            .transcript
            .rows(width)
            .filter(|(row, line)| *row < bottom && row + mapper.rows_spanned(line.len(), width) > top)
            .map(|(row, line)| (row, line.clone()))
            .collect();

        self.screen.clear();
        for (row, line) in visible {
            self.paint_line(row, &line.prompt, &line.text, line_style(line.kind));
        }

        if self.state == State::Editing {
            let row = self.next_row();
            let text = self.history.active().to_owned();
            let prompt = self.prompt.clone();
            self.paint_line(row, &prompt, &text, Style::Input);
        }
    }

    fn begin_line(&mut self) {
        self.state = State::Editing;
        self.history.restart();
        self.editor.start(self.prompt_len);

        let row = self.next_row();
        let prompt = self.prompt.clone();
        if !self.ensure_visible(row) {
            self.paint_line(row, &prompt, "", Style::Input);
        }
    }

    fn end_line(&mut self) -> String {
        let text = self.history.commit();
        log::debug!("session: line committed: {text:?}");
        self.transcript
            .push(TranscriptLine::prompted(self.prompt.clone(), text.clone()));
        self.state = State::Idle;
        text
    }

    fn dispatch(&mut self, key: Key) {
        log::trace!("session: key {key}");
        if self.handle_motion(&key) || self.handle_edit(&key) || self.handle_visible(&key) {
            return;
        }
        self.show_diagnostic(Diagnostic::UnrecognizedKey(key.to_string()));
    }

    fn handle_motion(&mut self, key: &Key) -> bool {
        match key {
            Key::Left => {
                if self.editor.move_left() {
                    self.follow_cursor();
                }
            }
            Key::Right => {
                let len = self.active_len();
                if self.editor.move_right(len) {
                    self.follow_cursor();
                }
            }
            Key::ScrollForward => {
                let max = self.max_row();
                self.scroll.scroll_forward(max);
                self.redraw();
            }
            Key::ScrollBack => {
                self.scroll.scroll_back();
                self.redraw();
            }
            _ => return false,
        }
        true
    }

    fn handle_edit(&mut self, key: &Key) -> bool {
        match key {
            Key::Backspace => {
                if self.editor.position() > 0 {
                    let buffer = self.history.active_mut();
                    if let Some(repaint) = self.editor.delete_back(buffer) {
                        self.repaint(repaint);
                    }
                }
            }
            Key::Up => {
                let old = self.active_len();
                if self.history.recall_up().is_some() {
                    self.replace_edit(old);
                }
            }
            Key::Down => {
                let old = self.active_len();
                if self.history.recall_down().is_some() {
                    self.replace_edit(old);
                }
            }
            Key::Insert => {
                let replace = self.editor.toggle_replace();
                log::debug!("session: replace mode {}", if replace { "on" } else { "off" });
            }
            _ => return false,
        }
        true
    }

    fn handle_visible(&mut self, key: &Key) -> bool {
        let Key::Char(c) = *key else {
            return false;
        };
        if !LineEditor::is_visible(c) {
            return false;
        }

        let buffer = self.history.active_mut();
        let repaint = self.editor.insert_char(buffer, c);
        self.repaint(repaint);
        true
    }

    /// Shows the newly active buffer in place of one of `old` characters.
    fn replace_edit(&mut self, old: usize) {
        let len = self.active_len();
        self.editor.move_to_end(len);
        if self.follow_cursor() {
            return;
        }

        let row = self.next_row();
        let text = self.history.active().to_owned();
        self.write_logical(row, self.prompt_len, &" ".repeat(old), Style::Input);
        self.write_logical(row, self.prompt_len, &text, Style::Input);
    }

    fn repaint(&mut self, repaint: Repaint) {
        if self.follow_cursor() {
            return;
        }

        let row = self.next_row();
        let mut text: String = self.history.active().chars().skip(repaint.from).collect();
        text.extend(std::iter::repeat_n(' ', repaint.blank));
        self.write_logical(row, self.prompt_len + repaint.from, &text, Style::Input);
    }

    fn resize(&mut self) {
        let (width, height) = self.screen.viewport_size();
        log::debug!("session: resized to {width}x{height}");
        let cursor = self.cursor();
        let row = self.mapper.row(cursor.row, cursor.col, width);
        self.scroll.auto_scroll(row, height);
        self.redraw();
    }

    fn show_diagnostic(&mut self, diagnostic: Diagnostic) {
        log::debug!("session: {diagnostic}");
        let (width, _) = self.screen.viewport_size();
        let text = format!("[{diagnostic}]");
        let col = width.saturating_sub(text.chars().count());
        self.screen
            .write_at(PhysicalPosition::new(0, col), &text, Style::Diagnostic);
        self.diagnostic = Some(diagnostic);
    }

    /// Restores the row covered by a diagnostic, if one is shown.
    fn clear_diagnostic(&mut self) {
        if let Some(diagnostic) = self.diagnostic.take() {
            log::trace!("session: clear {diagnostic}");
            self.redraw();
        }
    }

    /// Scrolls to the cursor if needed, returns `true` if that caused a full redraw.
    fn follow_cursor(&mut self) -> bool {
        let width = self.width();
        let cursor = self.cursor();
        let row = self.mapper.row(cursor.row, cursor.col, width);
        self.ensure_visible(row)
    }

    /// Scrolls to `row` if needed, returns `true` if that caused a full redraw.
    fn ensure_visible(&mut self, row: usize) -> bool {
        let (_, height) = self.screen.viewport_size();
        if self.scroll.auto_scroll(row, height) {
            self.redraw();
            true
        } else {
            false
        }
    }

    /// Highlights the cursor cell, or removes the highlight, if it is visible.
    fn place_cursor(&mut self, on: bool) {
        if self.state != State::Editing {
            return;
        }

        let (width, height) = self.screen.viewport_size();
        let cursor = self.cursor();
        let pos = self.mapper.map(cursor, width);
        let Some(row) = self.scroll.physical_row(pos.row, height) else {
            return;
        };
        if pos.col >= width {
            return;
        }

        let pos = PhysicalPosition::new(row, pos.col);
        if on {
            self.screen.move_cursor(pos);
        }
        self.screen.set_highlight(pos, 1, on);
    }

    /// Writes a whole line and blanks the rest of its last physical row.
    fn paint_line(&mut self, row: usize, prompt: &str, text: &str, style: Style) {
        let width = self.width();
        let prompt_len = prompt.chars().count();
        let len = prompt_len + text.chars().count();

        self.write_logical(row, 0, prompt, Style::Prompt);
        self.write_logical(row, prompt_len, text, style);

        let blank = match self.mapper.mode() {
            MapMode::None => width.saturating_sub(len),
            MapMode::WrapAround if len > 0 && len % width == 0 => 0,
            MapMode::WrapAround => width - len % width,
        };
        self.write_logical(row, len, &" ".repeat(blank), style);
    }

    /// Writes text at a logical position, splitting it at row boundaries and
    /// skipping the parts outside the viewport.
    fn write_logical(&mut self, row: usize, col: usize, text: &str, style: Style) {
        let (width, height) = self.screen.viewport_size();
        let chars: Vec<char> = text.chars().collect();

        let mut start = 0;
        while start < chars.len() {
            let pos = self.mapper.map(LogicalPosition::new(row, col + start), width);
            let room = width.saturating_sub(pos.col);
            if room == 0 {
                break;
            }

            let end = chars.len().min(start + room);
            if let Some(screen_row) = self.scroll.physical_row(pos.row, height) {
                let chunk: String = chars[start..end].iter().collect();
                self.screen
                    .write_at(PhysicalPosition::new(screen_row, pos.col), &chunk, style);
            }
            start = end;
        }
    }

    /// Highest logical row with content, including the line being edited.
    fn max_row(&self) -> usize {
        let width = self.width();
        let row = self.next_row();
        match self.state {
            State::Editing => {
                let end = self.prompt_len + self.active_len();
                self.mapper.row(row, end.max(self.editor.cursor()), width)
            }
            State::Idle => row.saturating_sub(1),
        }
    }

    fn next_row(&self) -> usize {
        let width = self.width();
        self.transcript.next_row(width)
    }

    fn active_len(&self) -> usize {
        self.history.active().chars().count()
    }

    fn width(&self) -> usize {
        self.screen.viewport_size().0.max(1)
    }
}

fn line_style(kind: LineKind) -> Style {
    match kind {
        LineKind::Input => Style::Input,
        LineKind::Output => Style::Output,
        LineKind::Error => Style::Error,
    }
}
