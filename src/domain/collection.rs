use crate::domain::counter::{Counter, CounterId, CounterIdGenerator};
use crate::domain::reorder::PositionAssignment;
use crate::domain::snapshot::ExportSnapshot;
use crate::domain::sorting::sort_by_position;
use crate::error::{Result, TallyError};

/// Counts shown in the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionStats {
    pub total: usize,
    pub favorites: usize,
}

impl CollectionStats {
    /// e.g. `"1 counter"`, `"3 counters"`
    pub fn counter_label(&self) -> String {
        pluralize(self.total, "counter")
    }

    /// e.g. `"0 favorites"`
    pub fn favorite_label(&self) -> String {
        pluralize(self.favorites, "favorite")
    }
}

fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Message displayed when there is nothing to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub heading: &'static str,
    pub message: &'static str,
}

impl EmptyState {
    pub const NO_COUNTERS: Self = Self {
        heading: "No counters yet",
        message: "Create your first counter to get started!",
    };

    pub const NO_FAVORITES: Self = Self {
        heading: "No favorite counters",
        message: "Mark some counters as favorites to see them here!",
    };
}

/// In-memory counter collection
///
/// Holds every counter, the current-counter pointer and the favorites filter.
/// Nothing here touches storage; `CounterStore` wraps this type and persists
/// after each mutation. Every successful mutation bumps `revision`.
#[derive(Debug, Clone, Default)]
pub struct CollectionState {
    counters: Vec<Counter>,
    current_counter_id: Option<CounterId>,
    show_favorites_only: bool,
    revision: u64,
    ids: CounterIdGenerator,
}

impl CollectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a collection from persisted parts
    ///
    /// Duplicate ids keep their first occurrence. The current id is taken as
    /// is, even if it no longer matches a counter.
    pub fn from_parts(counters: Vec<Counter>, current_counter_id: Option<CounterId>) -> Self {
        let mut unique: Vec<Counter> = Vec::with_capacity(counters.len());
        for counter in counters {
            if unique.iter().any(|c| c.id == counter.id) {
                tracing::warn!(id = %counter.id, "Dropping counter with duplicate id");
                continue;
            }
            unique.push(counter);
        }

        let ids = CounterIdGenerator::seeded_above(unique.iter().map(|c| &c.id));
        Self {
            counters: unique,
            current_counter_id,
            show_favorites_only: false,
            revision: 0,
            ids,
        }
    }

    pub fn counters(&self) -> &[Counter] {
        &self.counters
    }

    pub fn current_counter_id(&self) -> Option<CounterId> {
        self.current_counter_id
    }

    /// Resolves the current pointer, `None` if unset or dangling
    pub fn current_counter(&self) -> Option<&Counter> {
        self.current_counter_id.and_then(|id| self.find(id))
    }

    pub fn show_favorites_only(&self) -> bool {
        self.show_favorites_only
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    pub fn find(&self, id: CounterId) -> Option<&Counter> {
        self.counters.iter().find(|c| c.id == id)
    }

    fn find_mut(&mut self, id: CounterId) -> Result<&mut Counter> {
        self.counters
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(TallyError::CounterNotFound(id))
    }

    /// Highest id not taken by any counter
    fn unused_id(&self) -> CounterId {
        // At most len + 1 candidates are checked
        (i64::MIN..=i64::MAX)
            .rev()
            .map(CounterId::new)
            .find(|id| self.find(*id).is_none())
            .unwrap_or(CounterId::new(i64::MIN))
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    /// Appends a new counter titled `"{prefix} {N+1}"` and makes it current
    pub fn add_counter(&mut self, title_prefix: &str) -> &Counter {
        let id = match self.ids.next_id() {
            Some(id) => id,
            None => self.unused_id(),
        };
        let title = format!("{} {}", title_prefix, self.counters.len() + 1);
        let position = self.counters.len() as i64;

        self.counters.push(Counter::new(id, title, position));
        self.current_counter_id = Some(id);
        self.bump();

        &self.counters[self.counters.len() - 1]
    }

    /// Removes a counter and repairs the current pointer
    ///
    /// If the removed counter was current, the first remaining counter takes
    /// over. An empty collection always ends with no current counter.
    pub fn delete_counter(&mut self, id: CounterId) -> Result<Counter> {
        let index = self
            .counters
            .iter()
            .position(|c| c.id == id)
            .ok_or(TallyError::CounterNotFound(id))?;
        let removed = self.counters.remove(index);

        if self.counters.is_empty() {
            self.current_counter_id = None;
        } else if self.current_counter_id == Some(id) {
            self.current_counter_id = Some(self.counters[0].id);
        }
        self.bump();

        Ok(removed)
    }

    /// Adds one and makes the counter current
    pub fn increment(&mut self, id: CounterId) -> Result<u64> {
        let value = self.find_mut(id)?.increment();
        self.current_counter_id = Some(id);
        self.bump();
        Ok(value)
    }

    /// Subtracts one unless at zero; the counter becomes current either way
    pub fn decrement(&mut self, id: CounterId) -> Result<u64> {
        let counter = self.find_mut(id)?;
        counter.decrement();
        let value = counter.value;
        self.current_counter_id = Some(id);
        self.bump();
        Ok(value)
    }

    /// Zeroes the counter and makes it current
    pub fn reset(&mut self, id: CounterId) -> Result<()> {
        self.find_mut(id)?.reset();
        self.current_counter_id = Some(id);
        self.bump();
        Ok(())
    }

    /// Flips the favorite flag without touching the current pointer
    pub fn toggle_favorite(&mut self, id: CounterId) -> Result<bool> {
        let favorite = self.find_mut(id)?.toggle_favorite();
        self.bump();
        Ok(favorite)
    }

    /// Renames without touching the current pointer
    pub fn rename(&mut self, id: CounterId, title: &str, placeholder: &str) -> Result<String> {
        let stored = self.find_mut(id)?.rename(title, placeholder).to_string();
        self.bump();
        Ok(stored)
    }

    /// Points at `id` without checking that it exists
    pub fn set_current(&mut self, id: CounterId) {
        self.current_counter_id = Some(id);
        self.bump();
    }

    pub fn reset_all(&mut self) {
        self.counters.iter_mut().for_each(Counter::reset);
        self.bump();
    }

    /// Applies new positions and re-sorts
    ///
    /// Ids in the assignment that match no counter are ignored; counters the
    /// assignment does not mention keep their position.
    pub fn reorder(&mut self, assignment: &PositionAssignment) {
        for counter in &mut self.counters {
            if let Some(position) = assignment.get(&counter.id) {
                counter.position = position;
            }
        }
        sort_by_position(&mut self.counters);
        self.bump();
    }

    pub fn set_show_favorites_only(&mut self, show: bool) {
        self.show_favorites_only = show;
        self.bump();
    }

    /// Flips the favorites filter and returns the new setting
    pub fn toggle_favorites_filter(&mut self) -> bool {
        self.set_show_favorites_only(!self.show_favorites_only);
        self.show_favorites_only
    }

    /// Counters to render: favorites only when the filter is on, always by position
    pub fn visible_counters(&self) -> Vec<&Counter> {
        let mut visible: Vec<&Counter> = self
            .counters
            .iter()
            .filter(|c| !self.show_favorites_only || c.is_favorite)
            .collect();
        visible.sort_by_key(|c| c.position);
        visible
    }

    /// The empty-state message, when the visible set is empty
    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.visible_counters().is_empty() {
            return None;
        }
        if self.show_favorites_only {
            Some(EmptyState::NO_FAVORITES)
        } else {
            Some(EmptyState::NO_COUNTERS)
        }
    }

    pub fn stats(&self) -> CollectionStats {
        CollectionStats {
            total: self.counters.len(),
            favorites: self.counters.iter().filter(|c| c.is_favorite).count(),
        }
    }

    pub fn snapshot(&self) -> ExportSnapshot {
        ExportSnapshot::new(self.counters.clone(), self.current_counter_id)
    }
}
