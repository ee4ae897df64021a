//! Cyclic selection over a fixed list

use serde::Serialize;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CarouselError {
    #[error("Carousel needs at least one item")]
    Empty,
}

/// Fixed, non-empty item list with one selected position.
/// `next`/`prev` wrap around at either end.
#[derive(Debug, Clone)]
pub struct Carousel<T> {
    items: Vec<T>,
    selected: usize,
}

impl<T> Carousel<T> {
    pub fn new(items: Vec<T>) -> Result<Self, CarouselError> {
        if items.is_empty() {
            return Err(CarouselError::Empty);
        }
        Ok(Self { items, selected: 0 })
    }

    pub fn next(&mut self) -> usize {
        self.selected = (self.selected + 1) % self.items.len();
        self.selected
    }

    pub fn prev(&mut self) -> usize {
        let len = self.items.len();
        self.selected = (self.selected + len - 1) % len;
        self.selected
    }

    /// Select `index` directly. Out-of-range indices clamp to the last item.
    pub fn jump_to(&mut self, index: usize) -> usize {
        if index >= self.items.len() {
            tracing::debug!(index, len = self.items.len(), "Clamping carousel jump");
        }
        self.selected = index.min(self.items.len() - 1);
        self.selected
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> &T {
        &self.items[self.selected]
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// One dot per item, the selected one flagged
    pub fn dots(&self) -> Vec<Dot> {
        (0..self.items.len())
            .map(|index| Dot {
                index,
                selected: index == self.selected,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dot {
    pub index: usize,
    pub selected: bool,
}
