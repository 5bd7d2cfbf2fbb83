//! Single-item selection within a list whose length can change underneath.

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected_index: Option<usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<usize> {
        self.selected_index
    }

    pub fn set(&mut self, index: Option<usize>) {
        self.selected_index = index;
    }

    pub fn clear(&mut self) {
        self.selected_index = None;
    }

    pub fn next(&mut self, len: usize) {
        if len == 0 {
            self.selected_index = None;
            return;
        }
        self.selected_index = Some(match self.selected_index {
            Some(idx) => (idx + 1).min(len - 1),
            None => 0,
        });
    }

    pub fn prev(&mut self, len: usize) {
        if len == 0 {
            self.selected_index = None;
            return;
        }
        self.selected_index = Some(self.selected_index.map_or(0, |idx| idx.saturating_sub(1)));
    }

    /// Keep the selection inside `0..len`, selecting the first item when
    /// something appears in a previously empty list.
    pub fn clamp(&mut self, len: usize) {
        self.selected_index = match (self.selected_index, len) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(idx), len) => Some(idx.min(len - 1)),
        };
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected_index == Some(index)
    }
}
