use std::ops::Range;
use tui::{
    style::{Color, Modifier, Style},
    widgets::ListItem,
};

/// Selection within a list whose items live elsewhere.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cursor {
    current: usize,
}

impl Cursor {
    pub fn current(&self, length: usize) -> Option<usize> {
        (length > 0).then(|| self.current.min(length - 1))
    }

    pub fn move_up(&mut self, length: usize) {
        self.clamp(length);
        self.current = self.current.saturating_sub(1);
    }

    pub fn move_down(&mut self, length: usize) {
        self.clamp(length);
        if self.current + 1 < length {
            self.current += 1;
        }
    }

    pub fn move_top(&mut self) {
        self.current = 0;
    }

    pub fn move_bottom(&mut self, length: usize) {
        self.current = length.saturating_sub(1);
    }

    fn clamp(&mut self, length: usize) {
        self.current = self.current.min(length.saturating_sub(1));
    }
}

pub fn generate_items<T>(
    height: usize,
    current_index: Option<usize>,
    items: &[T],
    f: impl Fn(&T) -> String,
) -> Vec<ListItem<'static>> {
    let range = list_range(height, items.len(), current_index.unwrap_or(0));
    items[range.clone()]
        .iter()
        .zip(range)
        .map(|(item, i)| {
            let item = ListItem::new(f(item));
            if Some(i) == current_index {
                item.style(
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                item
            }
        })
        .collect()
}

/// Window of `height` items around `current_index`, keeping it centered
/// where possible.
fn list_range(height: usize, items_length: usize, current_index: usize) -> Range<usize> {
    if height >= items_length {
        0..items_length
    } else if current_index < height / 2 {
        0..height
    } else if current_index >= items_length - height / 2 {
        items_length - height..items_length
    } else {
        let start_index = current_index - (height / 2);
        start_index..start_index + height
    }
}
