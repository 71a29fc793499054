//! External iteration.
//!
//! Each store carries one cursor. Its position is explicit state, never
//! inferred from the value it points at, so a stored `false`, `0` or null is
//! a perfectly valid current value.
//!
//! ```text
//!   Unstarted ──rewind──▶ At(0) ──next──▶ At(i) ──next──▶ Exhausted
//!       │                                                    │
//!       └──────── reads as position 0 ◀──────rewind──────────┘
//! ```

use orderly_core::Key;

use crate::store::Store;

/// Where a cursor points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorState {
    /// Never positioned; reads as the first entry.
    #[default]
    Unstarted,
    /// At an entry position.
    At(usize),
    /// Past the last entry. Sticky until rewound.
    Exhausted,
}

/// A position over a store's entries.
#[derive(Debug, Clone, Default)]
pub struct Cursor {
    state: CursorState,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CursorState {
        self.state
    }

    pub fn rewind(&mut self) {
        self.state = CursorState::At(0);
    }

    /// Current position, checked against the live length.
    pub fn position(&self, len: usize) -> Option<usize> {
        let index = match self.state {
            CursorState::Unstarted => 0,
            CursorState::At(index) => index,
            CursorState::Exhausted => return None,
        };
        (index < len).then_some(index)
    }

    /// Move to the next position.
    pub fn advance(&mut self, len: usize) {
        self.state = match self.position(len) {
            Some(index) if index + 1 < len => CursorState::At(index + 1),
            _ => CursorState::Exhausted,
        };
    }
}

impl<V: Clone> Store<V> {
    /// Move the cursor to the first entry.
    pub fn rewind(&mut self) {
        self.cursor.rewind();
    }

    /// Advance the cursor.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        let len = self.count();
        self.cursor.advance(len);
    }

    /// Value at the cursor.
    pub fn current(&self) -> Option<V> {
        let array = self.read();
        let index = self.cursor.position(array.len())?;
        array.get_index(index).map(|(_, value)| value.clone())
    }

    /// Key at the cursor.
    pub fn key(&self) -> Option<Key> {
        let array = self.read();
        let index = self.cursor.position(array.len())?;
        array.get_index(index).map(|(key, _)| key.clone())
    }

    /// Whether the cursor points at an entry.
    pub fn valid(&self) -> bool {
        self.position().is_some()
    }

    /// Cursor position, `None` when not on an entry.
    pub fn position(&self) -> Option<usize> {
        self.cursor.position(self.count())
    }

    /// Iterate `(key, value)` from the current cursor position, advancing
    /// the cursor. Does not rewind.
    pub fn cursor_iter(&mut self) -> CursorIter<'_, V> {
        CursorIter { store: self }
    }
}

/// Iterator driving a store's cursor.
pub struct CursorIter<'a, V: Clone> {
    store: &'a mut Store<V>,
}

impl<V: Clone> Iterator for CursorIter<'_, V> {
    type Item = (Key, V);

    fn next(&mut self) -> Option<(Key, V)> {
        let entry = {
            let array = self.store.read();
            let index = self.store.cursor.position(array.len())?;
            array
                .get_index(index)
                .map(|(key, value)| (key.clone(), value.clone()))
        };
        self.store.next();
        entry
    }
}

impl<'a, V: Clone> IntoIterator for &'a mut Store<V> {
    type Item = (Key, V);
    type IntoIter = CursorIter<'a, V>;

    /// Rewinds, then iterates every entry.
    fn into_iter(self) -> CursorIter<'a, V> {
        self.rewind();
        self.cursor_iter()
    }
}
