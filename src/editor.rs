/// Part of the edit line that has to be written again after an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Repaint {
    /// Buffer index of the first character to write.
    pub from: usize,
    /// Number of blank cells to write after the end of the buffer.
    pub blank: usize,
}

/// Cursor and edit operations over the active buffer.
///
/// The cursor is a logical column that includes the prompt, so it never goes
/// below the prompt length. Buffer positions are counted in characters.
#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    prompt_len: usize,
    cursor: usize,
    replace: bool,
}

impl LineEditor {
    pub fn new(replace: bool) -> Self {
        Self {
            prompt_len: 0,
            cursor: 0,
            replace,
        }
    }

    /// Starts a new line after a prompt of `prompt_len` cells.
    pub fn start(&mut self, prompt_len: usize) {
        self.prompt_len = prompt_len;
        self.cursor = prompt_len;
    }

    pub fn prompt_len(&self) -> usize {
        self.prompt_len
    }

    /// Logical column of the cursor.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Cursor position within the buffer.
    pub fn position(&self) -> usize {
        self.cursor - self.prompt_len
    }

    pub fn replace_mode(&self) -> bool {
        self.replace
    }

    pub fn toggle_replace(&mut self) -> bool {
        self.replace = !self.replace;
        self.replace
    }

    /// Only printable ASCII is accepted as text input.
    pub fn is_visible(c: char) -> bool {
        (' '..='~').contains(&c)
    }

    pub fn move_left(&mut self) -> bool {
        if self.position() == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn move_right(&mut self, len: usize) -> bool {
        if self.position() >= len {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Moves the cursor to the end of a buffer of `len` characters.
    pub fn move_to_end(&mut self, len: usize) {
        self.cursor = self.prompt_len + len;
    }

    pub fn insert_char(&mut self, buffer: &mut String, c: char) -> Repaint {
        let pos = self.position();
        let len = buffer.chars().count();

        if pos >= len {
            buffer.push(c);
        } else if self.replace {
            let at = byte_offset(buffer, pos);
            let end = at + buffer[at..].chars().next().map_or(0, char::len_utf8);
            buffer.replace_range(at..end, c.encode_utf8(&mut [0; 4]));
        } else {
            buffer.insert(byte_offset(buffer, pos), c);
        }

        self.cursor = self.prompt_len + pos.min(len) + 1;
        Repaint {
            from: pos.min(len),
            blank: 0,
        }
    }

    /// Removes the character before the cursor.
    ///
    /// Returns `None` if the cursor is at the start of the buffer.
    pub fn delete_back(&mut self, buffer: &mut String) -> Option<Repaint> {
        let pos = self.position();
        if pos == 0 {
            return None;
        }

        let len = buffer.chars().count();
        if pos > len {
            self.cursor = self.prompt_len + len;
            return self.delete_back(buffer);
        }

        buffer.remove(byte_offset(buffer, pos - 1));
        self.cursor -= 1;
        Some(Repaint {
            from: pos - 1,
            blank: 1,
        })
    }
}

/// Byte offset of the character at `pos`, or the buffer length past the end.
fn byte_offset(buffer: &str, pos: usize) -> usize {
    buffer
        .char_indices()
        .nth(pos)
        .map_or(buffer.len(), |(offset, _)| offset)
}

#[cfg(test)]
mod tests;
