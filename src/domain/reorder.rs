//! Drag-and-drop reordering.
//!
//! Reordering happens in two phases. While the pointer moves, a
//! [`DragSession`] rearranges its own copy of the rendered id sequence so the
//! view can redraw cheaply; the store is not touched. On drop the session is
//! turned into a [`PositionAssignment`] and committed once through
//! `CounterStore::reorder`.

use crate::domain::counter::CounterId;
use std::collections::HashMap;

/// New positions keyed by counter id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionAssignment {
    positions: HashMap<CounterId, i64>,
}

impl PositionAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assigns each id its index in `order`
    pub fn from_order(order: &[CounterId]) -> Self {
        order
            .iter()
            .enumerate()
            .map(|(index, id)| (*id, index as i64))
            .collect()
    }

    pub fn insert(&mut self, id: CounterId, position: i64) {
        self.positions.insert(id, position);
    }

    pub fn get(&self, id: &CounterId) -> Option<i64> {
        self.positions.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CounterId, &i64)> {
        self.positions.iter()
    }
}

impl FromIterator<(CounterId, i64)> for PositionAssignment {
    fn from_iter<I: IntoIterator<Item = (CounterId, i64)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

/// Vertical bounds of a rendered counter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementBox {
    pub id: CounterId,
    pub top: f64,
    pub height: f64,
}

impl ElementBox {
    pub fn new(id: CounterId, top: f64, height: f64) -> Self {
        Self { id, top, height }
    }
}

/// Finds the element the dragged counter should be inserted before
///
/// Picks the element whose vertical midpoint lies below `pointer_y` and is
/// closest to it, ignoring the dragged element itself. `None` means the
/// pointer is past every midpoint and the counter belongs at the end.
pub fn insertion_target(
    pointer_y: f64,
    boxes: &[ElementBox],
    dragged: CounterId,
) -> Option<CounterId> {
    boxes
        .iter()
        .filter(|b| b.id != dragged)
        .map(|b| (b.id, pointer_y - b.top - b.height / 2.0))
        .filter(|(_, offset)| *offset < 0.0)
        .fold(None, |closest: Option<(CounterId, f64)>, (id, offset)| match closest {
            Some((_, best)) if best >= offset => closest,
            _ => Some((id, offset)),
        })
        .map(|(id, _)| id)
}

/// In-progress drag over the rendered counters
#[derive(Debug, Clone)]
pub struct DragSession {
    order: Vec<CounterId>,
    dragged: CounterId,
}

impl DragSession {
    /// Begins dragging `dragged` over the given rendered order
    ///
    /// Returns `None` if the dragged id is not among the rendered ones.
    pub fn start(rendered: Vec<CounterId>, dragged: CounterId) -> Option<Self> {
        if !rendered.contains(&dragged) {
            return None;
        }
        Some(Self {
            order: rendered,
            dragged,
        })
    }

    pub fn dragged(&self) -> CounterId {
        self.dragged
    }

    /// The live order the view should display
    pub fn order(&self) -> &[CounterId] {
        &self.order
    }

    /// Moves the dragged counter before `insert_before`, or to the end on `None`
    ///
    /// An unknown target leaves the order unchanged.
    pub fn hover(&mut self, insert_before: Option<CounterId>) {
        if insert_before == Some(self.dragged) {
            return;
        }
        let Some(from) = self.order.iter().position(|id| *id == self.dragged) else {
            return;
        };

        match insert_before {
            None => {
                let id = self.order.remove(from);
                self.order.push(id);
            }
            Some(target) => {
                if !self.order.contains(&target) {
                    return;
                }
                let id = self.order.remove(from);
                // Target index is looked up after removal
                let to = self
                    .order
                    .iter()
                    .position(|other| *other == target)
                    .unwrap_or(self.order.len());
                self.order.insert(to, id);
            }
        }
    }

    /// Resolves the pointer position against the rendered boxes and hovers there
    pub fn hover_at(&mut self, pointer_y: f64, boxes: &[ElementBox]) {
        let target = insertion_target(pointer_y, boxes, self.dragged);
        self.hover(target);
    }

    /// Ends the drag, producing positions from the final order
    pub fn finish(self) -> PositionAssignment {
        PositionAssignment::from_order(&self.order)
    }
}
