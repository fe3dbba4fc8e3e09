use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Title stored when a rename leaves nothing but whitespace
pub const UNTITLED_COUNTER: &str = "Untitled Counter";

/// Unique identifier for a counter
///
/// Ids are millisecond timestamps taken at creation time, bumped past the
/// previous id when two counters are created within the same millisecond.
/// They serialize as bare JSON numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterId(i64);

impl CounterId {
    pub fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for CounterId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl FromStr for CounterId {
    type Err = crate::error::TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| crate::error::TallyError::InvalidCounterId(s.to_string()))
    }
}

impl fmt::Display for CounterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strictly increasing source of counter ids
#[derive(Debug, Default, Clone)]
pub struct CounterIdGenerator {
    last: i64,
}

impl CounterIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a generator that will never hand out any of the given ids
    pub fn seeded_above<'a>(ids: impl IntoIterator<Item = &'a CounterId>) -> Self {
        let last = ids.into_iter().map(CounterId::get).max().unwrap_or(0);
        Self { last }
    }

    /// Generates the next id from the wall clock
    ///
    /// Returns `None` once `i64::MAX` has been handed out or seeded.
    pub fn next_id(&mut self) -> Option<CounterId> {
        self.next_id_at(Utc::now())
    }

    fn next_id_at(&mut self, now: DateTime<Utc>) -> Option<CounterId> {
        let next = now.timestamp_millis().max(self.last.checked_add(1)?);
        self.last = next;
        Some(CounterId(next))
    }
}

/// Trims a user supplied title, falling back to `placeholder` when empty
pub fn normalize_title(input: &str, placeholder: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}

/// A named tally
///
/// Field names serialize in camelCase (`isFavorite`, `createdAt`) which is
/// the layout of the persisted `multi-counters` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counter {
    pub id: CounterId,
    pub title: String,
    pub value: u64,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub position: i64,
}

impl Counter {
    /// Creates a zeroed, non-favorite counter
    pub fn new(id: CounterId, title: String, position: i64) -> Self {
        Self {
            id,
            title,
            value: 0,
            is_favorite: false,
            created_at: Utc::now(),
            position,
        }
    }

    /// Adds one and returns the new value
    pub fn increment(&mut self) -> u64 {
        self.value = self.value.saturating_add(1);
        self.value
    }

    /// Subtracts one unless already at zero. Returns whether the value changed.
    pub fn decrement(&mut self) -> bool {
        if self.value > 0 {
            self.value -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }

    /// Flips the favorite flag and returns the new flag
    pub fn toggle_favorite(&mut self) -> bool {
        self.is_favorite = !self.is_favorite;
        self.is_favorite
    }

    /// Stores the trimmed title, or `placeholder` when nothing is left
    pub fn rename(&mut self, title: &str, placeholder: &str) -> &str {
        self.title = normalize_title(title, placeholder);
        &self.title
    }
}
