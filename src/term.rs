// third-party imports
use termwiz::{
    caps::Capabilities,
    input::{InputEvent, KeyCode, KeyEvent, Modifiers},
    terminal::{SystemTerminal, Terminal as _, buffered::BufferedTerminal},
};

// local imports
use crate::{
    error::{Error, Result},
    geometry::PhysicalPosition,
    surface::{self, Event, Key, KeySource, Screen, Style, StyleSheet},
};

// ---

/// The process terminal in raw mode on the alternate screen.
///
/// Drawing goes to an off-screen surface and reaches the terminal on
/// [`present`](Screen::present). Dropping the value restores the terminal.
pub struct Terminal {
    buffer: BufferedTerminal<SystemTerminal>,
    styles: StyleSheet,
}

impl Terminal {
    pub fn new(styles: StyleSheet) -> Result<Self> {
        let caps = Capabilities::new_from_env()?;
        let mut terminal = SystemTerminal::new(caps)?;
        terminal.set_raw_mode()?;
        terminal.enter_alternate_screen()?;

        let buffer = BufferedTerminal::new(terminal)?;
        let (width, height) = buffer.dimensions();
        log::debug!("terminal: {width}x{height}");

        Ok(Self { buffer, styles })
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let terminal = self.buffer.terminal();
        if let Err(e) = terminal.exit_alternate_screen() {
            log::warn!("terminal: failed to leave alternate screen: {e}");
        }
        if let Err(e) = terminal.set_cooked_mode() {
            log::warn!("terminal: failed to restore mode: {e}");
        }
    }
}

impl Screen for Terminal {
    fn viewport_size(&self) -> (usize, usize) {
        self.buffer.dimensions()
    }

    fn move_cursor(&mut self, pos: PhysicalPosition) {
        surface::move_cursor(&mut self.buffer, pos);
    }

    fn write_at(&mut self, pos: PhysicalPosition, text: &str, style: Style) {
        let attrs = self.styles.attributes(style);
        surface::write_at(&mut self.buffer, pos, text, attrs);
    }

    fn set_highlight(&mut self, pos: PhysicalPosition, len: usize, on: bool) {
        surface::set_highlight(&mut self.buffer, pos, len, on);
    }

    fn clear(&mut self) {
        surface::clear(&mut self.buffer);
    }

    fn present(&mut self) -> Result<()> {
        self.buffer.flush()?;
        Ok(())
    }
}

impl KeySource for Terminal {
    fn next_event(&mut self) -> Result<Event> {
        loop {
            let Some(event) = self.buffer.terminal().poll_input(None)? else {
                continue;
            };

            match event {
                InputEvent::Resized { cols, rows } => {
                    self.buffer.resize(cols, rows);
                    return Ok(Event::Resize);
                }
                InputEvent::Key(key) => match translate_key(&key) {
                    Input::Key(key) => return Ok(Event::Key(key)),
                    Input::Interrupt => return Err(Error::InputClosed),
                },
                other => log::trace!("terminal: ignored {other:?}"),
            }
        }
    }
}

// ---

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Key(Key),
    Interrupt,
}

fn translate_key(event: &KeyEvent) -> Input {
    let ctrl = event.modifiers.contains(Modifiers::CTRL);

    let key = match event.key {
        KeyCode::Char('c' | 'd') if ctrl => return Input::Interrupt,
        KeyCode::Char('\x03' | '\x04') => return Input::Interrupt,
        KeyCode::Char('f') if ctrl => Key::ScrollForward,
        KeyCode::Char('b') if ctrl => Key::ScrollBack,
        KeyCode::Char('\x06') => Key::ScrollForward,
        KeyCode::Char('\x02') => Key::ScrollBack,
        KeyCode::Char('\r' | '\n') | KeyCode::Enter => Key::Enter,
        KeyCode::Char('\x7f' | '\x08') | KeyCode::Backspace => Key::Backspace,
        KeyCode::Char(c) if ctrl => Key::Other(format!("ctrl-{c}")),
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::LeftArrow => Key::Left,
        KeyCode::RightArrow => Key::Right,
        KeyCode::UpArrow => Key::Up,
        KeyCode::DownArrow => Key::Down,
        KeyCode::Insert => Key::Insert,
        KeyCode::Function(n) => Key::Other(format!("f{n}")),
        other => Key::Other(format!("{other:?}").to_lowercase()),
    };

    Input::Key(key)
}
