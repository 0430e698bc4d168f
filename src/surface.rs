// std imports
use std::{collections::VecDeque, fmt};

// third-party imports
use serde::Deserialize;
use strum::{Display, EnumString};
use termwiz::{
    cell::CellAttributes,
    color::ColorAttribute,
    surface::{Change, Position, Surface},
};

// local imports
use crate::{
    error::{Error, Result},
    geometry::PhysicalPosition,
};

// ---

/// Character grid the session draws on.
///
/// Positions are physical and relative to the top-left cell of the visible
/// viewport. Implementations must tolerate positions outside the grid by
/// ignoring them.
pub trait Screen {
    /// Current `(width, height)` of the grid.
    fn viewport_size(&self) -> (usize, usize);

    fn move_cursor(&mut self, pos: PhysicalPosition);

    /// Writes `text` starting at `pos` without wrapping.
    fn write_at(&mut self, pos: PhysicalPosition, text: &str, style: Style);

    /// Turns the highlight of `len` cells starting at `pos` on or off,
    /// keeping the cell contents.
    fn set_highlight(&mut self, pos: PhysicalPosition, len: usize, on: bool);

    /// Blanks the whole grid.
    fn clear(&mut self);

    /// Makes pending changes visible.
    fn present(&mut self) -> Result<()>;
}

/// Visual role of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Prompt,
    Input,
    Output,
    Error,
    Diagnostic,
}

/// Terminal palette colors used by styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl From<Color> for ColorAttribute {
    fn from(color: Color) -> Self {
        match color {
            Color::Default => ColorAttribute::Default,
            Color::Black => ColorAttribute::PaletteIndex(0),
            Color::Red => ColorAttribute::PaletteIndex(1),
            Color::Green => ColorAttribute::PaletteIndex(2),
            Color::Yellow => ColorAttribute::PaletteIndex(3),
            Color::Blue => ColorAttribute::PaletteIndex(4),
            Color::Magenta => ColorAttribute::PaletteIndex(5),
            Color::Cyan => ColorAttribute::PaletteIndex(6),
            Color::White => ColorAttribute::PaletteIndex(7),
        }
    }
}

/// Colors assigned to each [`Style`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StyleSheet {
    pub prompt: Color,
    pub input: Color,
    pub output: Color,
    pub error: Color,
    pub diagnostic: Color,
}

impl StyleSheet {
    pub fn color(&self, style: Style) -> Color {
        match style {
            Style::Prompt => self.prompt,
            Style::Input => self.input,
            Style::Output => self.output,
            Style::Error => self.error,
            Style::Diagnostic => self.diagnostic,
        }
    }

    pub fn attributes(&self, style: Style) -> CellAttributes {
        let mut attrs = CellAttributes::default();
        attrs.set_foreground(self.color(style));
        attrs
    }
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            prompt: Color::Blue,
            input: Color::Default,
            output: Color::Default,
            error: Color::Red,
            diagnostic: Color::Yellow,
        }
    }
}

// ---

/// Key as seen by the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Left,
    Right,
    Up,
    Down,
    Backspace,
    Enter,
    Insert,
    ScrollForward,
    ScrollBack,
    /// Anything else, with a printable name.
    Other(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{:?}", c),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Backspace => write!(f, "backspace"),
            Self::Enter => write!(f, "enter"),
            Self::Insert => write!(f, "insert"),
            Self::ScrollForward => write!(f, "ctrl-f"),
            Self::ScrollBack => write!(f, "ctrl-b"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Input event delivered to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key(Key),
    /// The viewport size changed, everything must be redrawn.
    Resize,
}

impl From<Key> for Event {
    fn from(key: Key) -> Self {
        Self::Key(key)
    }
}

/// Blocking source of input events.
pub trait KeySource {
    fn next_event(&mut self) -> Result<Event>;
}

/// Replays a fixed sequence of events, then reports closed input.
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    events: VecDeque<Event>,
}

impl ScriptedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one event.
    pub fn push(mut self, event: impl Into<Event>) -> Self {
        self.events.push_back(event.into());
        self
    }

    /// Adds one character key per character of `text`.
    pub fn text(mut self, text: &str) -> Self {
        self.events.extend(text.chars().map(|c| Event::Key(Key::Char(c))));
        self
    }

    /// Adds `text` followed by Enter.
    pub fn line(self, text: &str) -> Self {
        self.text(text).push(Key::Enter)
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl KeySource for ScriptedKeys {
    fn next_event(&mut self) -> Result<Event> {
        self.events.pop_front().ok_or(Error::InputClosed)
    }
}

// ---

/// Screen kept in memory, for tests and for rendering without a terminal.
pub struct MemoryScreen {
    surface: Surface,
    styles: StyleSheet,
    presented: usize,
}

impl MemoryScreen {
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_styles(width, height, StyleSheet::default())
    }

    pub fn with_styles(width: usize, height: usize, styles: StyleSheet) -> Self {
        Self {
            surface: Surface::new(width, height),
            styles,
            presented: 0,
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.surface.resize(width, height);
    }

    /// Number of times [`Screen::present`] was called.
    pub fn presented(&self) -> usize {
        self.presented
    }

    /// Visible text, one string per row with trailing blanks removed.
    pub fn rows(&self) -> Vec<String> {
        self.surface
            .screen_lines()
            .iter()
            .map(|line| {
                line.visible_cells()
                    .map(|cell| cell.str().to_string())
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .collect()
    }

    /// Visible text of a single row.
    pub fn row(&self, row: usize) -> String {
        self.rows().get(row).cloned().unwrap_or_default()
    }

    /// Whether the cell at `pos` is highlighted.
    pub fn is_highlighted(&self, pos: PhysicalPosition) -> bool {
        cell_attributes(&self.surface, pos).is_some_and(|attrs| attrs.reverse())
    }

    /// Foreground color attribute of the cell at `pos`.
    pub fn foreground(&self, pos: PhysicalPosition) -> Option<ColorAttribute> {
        cell_attributes(&self.surface, pos).map(|attrs| attrs.foreground())
    }
}

impl Screen for MemoryScreen {
    fn viewport_size(&self) -> (usize, usize) {
        self.surface.dimensions()
    }

    fn move_cursor(&mut self, pos: PhysicalPosition) {
        move_cursor(&mut self.surface, pos);
    }

    fn write_at(&mut self, pos: PhysicalPosition, text: &str, style: Style) {
        let attrs = self.styles.attributes(style);
        write_at(&mut self.surface, pos, text, attrs);
    }

    fn set_highlight(&mut self, pos: PhysicalPosition, len: usize, on: bool) {
        set_highlight(&mut self.surface, pos, len, on);
    }

    fn clear(&mut self) {
        clear(&mut self.surface);
    }

    fn present(&mut self) -> Result<()> {
        self.presented += 1;
        Ok(())
    }
}

// ---

pub(crate) fn move_cursor(surface: &mut Surface, pos: PhysicalPosition) {
    surface.add_change(Change::CursorPosition {
        x: Position::Absolute(pos.col),
        y: Position::Absolute(pos.row),
    });
}

pub(crate) fn write_at(surface: &mut Surface, pos: PhysicalPosition, text: &str, attrs: CellAttributes) {
    let (width, height) = surface.dimensions();
    if pos.row >= height || pos.col >= width {
        return;
    }

    let text: String = text.chars().take(width - pos.col).collect();
    move_cursor(surface, pos);
    surface.add_change(Change::AllAttributes(attrs));
    surface.add_change(Change::Text(text));
    surface.add_change(Change::AllAttributes(CellAttributes::default()));
}

pub(crate) fn set_highlight(surface: &mut Surface, pos: PhysicalPosition, len: usize, on: bool) {
    let cells: Vec<(usize, String, CellAttributes)> = {
        let lines = surface.screen_lines();
        let Some(line) = lines.get(pos.row) else {
            return;
        };
        line.visible_cells()
            .skip_while(|cell| cell.cell_index() < pos.col)
            .take(len)
            .map(|cell| (cell.cell_index(), cell.str().to_string(), cell.attrs().clone()))
            .collect()
    };

    for (col, text, mut attrs) in cells {
        attrs.set_reverse(on);
        move_cursor(surface, PhysicalPosition::new(pos.row, col));
        surface.add_change(Change::AllAttributes(attrs));
        surface.add_change(Change::Text(text));
    }
    surface.add_change(Change::AllAttributes(CellAttributes::default()));
    move_cursor(surface, pos);
}

pub(crate) fn clear(surface: &mut Surface) {
    surface.add_change(Change::AllAttributes(CellAttributes::default()));
    surface.add_change(Change::ClearScreen(ColorAttribute::Default));
}

fn cell_attributes(surface: &Surface, pos: PhysicalPosition) -> Option<CellAttributes> {
    let lines = surface.screen_lines();
    let line = lines.get(pos.row)?;
    line.visible_cells()
        .find(|cell| cell.cell_index() == pos.col)
        .map(|cell| cell.attrs().clone())
}
