/// Vertical viewport over logical rows.
///
/// Only the offset of the topmost visible row is kept; the viewport height
/// is supplied by the caller on every call since the terminal may be resized
/// at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollController {
    offset: usize,
}

impl ScrollController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Topmost visible logical row.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Moves the viewport just enough for `row` to become visible.
    ///
    /// Returns `true` if the offset changed, in which case the caller must
    /// redraw the whole viewport.
    pub fn auto_scroll(&mut self, row: usize, height: usize) -> bool {
        let height = height.max(1);
        let offset = if row < self.offset {
            row
        } else if row >= self.offset + height {
            row - height + 1
        } else {
            return false;
        };

        log::trace!("auto scroll from {} to {} for row {}", self.offset, offset, row);
        self.offset = offset;
        true
    }

    /// Scrolls one row forward unless `max_row` is already the topmost row.
    pub fn scroll_forward(&mut self, max_row: usize) -> bool {
        if self.offset >= max_row {
            return false;
        }
        self.offset += 1;
        true
    }

    /// Scrolls one row back unless already at the top.
    pub fn scroll_back(&mut self) -> bool {
        if self.offset == 0 {
            return false;
        }
        self.offset -= 1;
        true
    }

    pub fn is_visible(&self, row: usize, height: usize) -> bool {
        row >= self.offset && row < self.offset + height
    }

    /// Physical row of a logical row, if it is inside the viewport.
    pub fn physical_row(&self, row: usize, height: usize) -> Option<usize> {
        self.is_visible(row, height).then(|| row - self.offset)
    }
}
