use crate::{
    config::TallyConfig,
    domain::{
        CollectionState, CollectionStats, Counter, CounterId, EmptyState, ExportSnapshot,
        PositionAssignment,
    },
    error::Result,
    storage::KeyValueStore,
};
use tracing::{debug, error, info, warn};

/// The counter collection and its persistence
///
/// Every mutating operation updates the in-memory collection and then writes
/// the affected entries to storage before returning. Operations that target a
/// counter by id return `TallyError::CounterNotFound` when it does not exist,
/// in which case nothing is changed or written.
///
/// If a write fails the error is logged and returned; the in-memory change
/// stays applied and is written again by the next successful save.
pub struct CounterStore<S> {
    storage: S,
    config: TallyConfig,
    state: CollectionState,
}

impl<S: KeyValueStore> CounterStore<S> {
    /// Loads the collection using the default configuration
    ///
    /// Missing or corrupt entries are logged and replaced by an empty
    /// collection, so loading never fails.
    pub async fn load(storage: S) -> Self {
        let config = TallyConfig::default();
        let state = Self::load_state(&storage, &config).await;
        Self {
            storage,
            config,
            state,
        }
    }

    /// Loads the collection with custom storage keys and titles
    pub async fn load_with_config(storage: S, config: TallyConfig) -> Result<Self> {
        config.validate()?;
        let state = Self::load_state(&storage, &config).await;
        Ok(Self {
            storage,
            config,
            state,
        })
    }

    async fn load_state(storage: &S, config: &TallyConfig) -> CollectionState {
        let counters = Self::load_counters(storage, &config.counters_key).await;
        let current = Self::load_current_counter_id(storage, &config.current_counter_key).await;
        info!(
            counters = counters.len(),
            current = ?current.map(|id| id.get()),
            "Loaded counter collection"
        );
        CollectionState::from_parts(counters, current)
    }

    async fn load_counters(storage: &S, key: &str) -> Vec<Counter> {
        let stored = match storage.get(key).await {
            Ok(Some(stored)) if !stored.trim().is_empty() => stored,
            Ok(_) => return Vec::new(),
            Err(e) => {
                warn!(key, "Error loading counters, starting empty: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str(&stored) {
            Ok(counters) => counters,
            Err(e) => {
                warn!(key, "Discarding unparsable counters: {}", e);
                Vec::new()
            }
        }
    }

    async fn load_current_counter_id(storage: &S, key: &str) -> Option<CounterId> {
        let stored = match storage.get(key).await {
            Ok(Some(stored)) if !stored.trim().is_empty() => stored,
            Ok(_) => return None,
            Err(e) => {
                warn!(key, "Error loading current counter id: {}", e);
                return None;
            }
        };

        match stored.parse() {
            Ok(id) => Some(id),
            Err(e) => {
                warn!(key, "Discarding unparsable current counter id: {}", e);
                None
            }
        }
    }

    async fn save_counters(&self) -> Result<()> {
        let json = serde_json::to_string(self.state.counters())?;
        self.write(&self.config.counters_key, &json).await
    }

    async fn save_current_counter_id(&self) -> Result<()> {
        let value = self
            .state
            .current_counter_id()
            .map(|id| id.to_string())
            .unwrap_or_default();
        self.write(&self.config.current_counter_key, &value).await
    }

    async fn save_all(&self) -> Result<()> {
        self.save_counters().await?;
        self.save_current_counter_id().await
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        self.storage.set(key, value).await.map_err(|e| {
            error!(key, "Failed to write storage entry: {}", e);
            e
        })
    }

    /// Creates `"Counter {N+1}"` at the end of the list and makes it current
    pub async fn add_counter(&mut self) -> Result<Counter> {
        let counter = self
            .state
            .add_counter(&self.config.default_title_prefix)
            .clone();
        debug!(id = %counter.id, title = %counter.title, "Added counter");
        self.save_all().await?;
        Ok(counter)
    }

    /// Deletes a counter; a deleted current counter hands over to the first remaining one
    ///
    /// Confirmation is the caller's responsibility.
    pub async fn delete_counter(&mut self, id: CounterId) -> Result<()> {
        self.state.delete_counter(id)?;
        debug!(%id, current = ?self.state.current_counter_id(), "Deleted counter");
        self.save_all().await
    }

    /// Adds one, makes the counter current and returns the new value
    pub async fn increment_counter(&mut self, id: CounterId) -> Result<u64> {
        let value = self.state.increment(id)?;
        debug!(%id, value, "Incremented counter");
        self.save_all().await?;
        Ok(value)
    }

    /// Subtracts one unless at zero, makes the counter current and returns its value
    pub async fn decrement_counter(&mut self, id: CounterId) -> Result<u64> {
        let value = self.state.decrement(id)?;
        debug!(%id, value, "Decremented counter");
        self.save_all().await?;
        Ok(value)
    }

    pub async fn reset_counter(&mut self, id: CounterId) -> Result<()> {
        self.state.reset(id)?;
        debug!(%id, "Reset counter");
        self.save_all().await
    }

    /// Flips the favorite flag and returns it
    pub async fn toggle_favorite(&mut self, id: CounterId) -> Result<bool> {
        let favorite = self.state.toggle_favorite(id)?;
        debug!(%id, favorite, "Toggled favorite");
        self.save_counters().await?;
        Ok(favorite)
    }

    /// Stores the trimmed title (or the placeholder if blank) and returns it
    pub async fn rename_counter(&mut self, id: CounterId, title: &str) -> Result<String> {
        let stored = self.state.rename(id, title, &self.config.untitled_title)?;
        debug!(%id, title = %stored, "Renamed counter");
        self.save_counters().await?;
        Ok(stored)
    }

    /// Sets the current pointer without checking that `id` exists
    pub async fn set_current_counter(&mut self, id: CounterId) -> Result<()> {
        self.state.set_current(id);
        self.save_current_counter_id().await
    }

    /// Zeroes every counter with a single write
    ///
    /// Confirmation is the caller's responsibility.
    pub async fn reset_all_counters(&mut self) -> Result<()> {
        self.state.reset_all();
        debug!(counters = self.state.len(), "Reset all counters");
        self.save_counters().await
    }

    /// Commits positions from a finished drag and re-sorts the collection
    pub async fn reorder(&mut self, assignment: &PositionAssignment) -> Result<()> {
        self.state.reorder(assignment);
        debug!(assigned = assignment.len(), "Reordered counters");
        self.save_counters().await
    }

    /// Shows only favorites (or everything). The filter is never persisted.
    pub fn set_show_favorites_only(&mut self, show: bool) {
        self.state.set_show_favorites_only(show);
    }

    /// Flips the favorites filter and returns the new setting
    pub fn toggle_favorites_filter(&mut self) -> bool {
        self.state.toggle_favorites_filter()
    }

    /// Copies the collection for export. Does not write anything.
    pub fn export_snapshot(&self) -> ExportSnapshot {
        self.state.snapshot()
    }

    /// Builds the export download: `(file name, pretty JSON)`
    pub fn export_document(&self) -> Result<(String, String)> {
        let snapshot = self.export_snapshot();
        let json = snapshot.to_json()?;
        Ok((snapshot.file_name(&self.config.export_file_prefix), json))
    }

    pub fn state(&self) -> &CollectionState {
        &self.state
    }

    pub fn counters(&self) -> &[Counter] {
        self.state.counters()
    }

    pub fn find(&self, id: CounterId) -> Option<&Counter> {
        self.state.find(id)
    }

    pub fn current_counter_id(&self) -> Option<CounterId> {
        self.state.current_counter_id()
    }

    pub fn current_counter(&self) -> Option<&Counter> {
        self.state.current_counter()
    }

    pub fn show_favorites_only(&self) -> bool {
        self.state.show_favorites_only()
    }

    pub fn visible_counters(&self) -> Vec<&Counter> {
        self.state.visible_counters()
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        self.state.empty_state()
    }

    pub fn stats(&self) -> CollectionStats {
        self.state.stats()
    }

    pub fn revision(&self) -> u64 {
        self.state.revision()
    }

    pub fn config(&self) -> &TallyConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}
