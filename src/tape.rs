use crate::engine::EngineError;

/// A fixed-length, zero-initialized byte tape with a single access cursor.
///
/// The cursor wraps in both directions: moving right from the last cell lands
/// on cell 0 and moving left from cell 0 lands on the last cell. Programs
/// should not rely on this, but it is kept stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tape {
    cells: Vec<u8>,
    pointer: usize,
}

impl Tape {
    /// Allocate `len` zeroed cells with the cursor on cell 0.
    pub fn new(len: usize) -> Result<Self, EngineError> {
        if len == 0 {
            return Err(EngineError::ZeroLengthTape);
        }

        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| EngineError::ResourceExhausted { cells: len })?;
        cells.resize(len, 0);

        Ok(Self { cells, pointer: 0 })
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false; a tape has at least one cell.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Index of the cell under the cursor.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn current(&self) -> u8 {
        self.cells[self.pointer]
    }

    pub fn set_current(&mut self, value: u8) {
        self.cells[self.pointer] = value;
    }

    pub fn increment(&mut self) -> u8 {
        let after = self.current().wrapping_add(1);
        self.set_current(after);
        after
    }

    pub fn decrement(&mut self) -> u8 {
        let after = self.current().wrapping_sub(1);
        self.set_current(after);
        after
    }

    pub fn move_right(&mut self) -> usize {
        self.pointer = (self.pointer + 1) % self.cells.len();
        self.pointer
    }

    pub fn move_left(&mut self) -> usize {
        let len = self.cells.len();
        self.pointer = (self.pointer + len - 1) % len;
        self.pointer
    }
}
