pub mod collection;
pub mod counter;
pub mod reorder;
pub mod snapshot;
pub mod sorting;

pub use collection::{CollectionState, CollectionStats, EmptyState};
pub use counter::{normalize_title, Counter, CounterId, CounterIdGenerator, UNTITLED_COUNTER};
pub use reorder::{insertion_target, DragSession, ElementBox, PositionAssignment};
pub use snapshot::ExportSnapshot;
pub use sorting::sort_by_position;
