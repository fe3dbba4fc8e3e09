use std::collections::HashSet;

use tally_core::domain::counter::UNTITLED_COUNTER;
use tally_core::storage::FileStorage;
use tally_core::{
    CounterId, CounterStore, DragSession, ElementBox, MemoryStorage, PositionAssignment,
};
use tempfile::TempDir;

async fn store_with(n: usize) -> anyhow::Result<(CounterStore<MemoryStorage>, Vec<CounterId>)> {
    let mut store = CounterStore::load(MemoryStorage::new()).await;
    let mut ids = Vec::new();
    for _ in 0..n {
        ids.push(store.add_counter().await?.id);
    }
    Ok((store, ids))
}

fn order(store: &CounterStore<MemoryStorage>) -> Vec<CounterId> {
    store.visible_counters().iter().map(|c| c.id).collect()
}

#[tokio::test]
async fn test_fresh_storage_loads_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = CounterStore::load(FileStorage::new(temp_dir.path())).await;

    assert!(store.counters().is_empty());
    assert_eq!(store.current_counter_id(), None);
}

#[tokio::test]
async fn test_added_ids_are_pairwise_distinct() -> anyhow::Result<()> {
    let (store, ids) = store_with(25).await?;

    let unique: HashSet<CounterId> = ids.iter().copied().collect();
    assert_eq!(unique.len(), 25);
    assert_eq!(store.counters().len(), 25);
    Ok(())
}

#[tokio::test]
async fn test_values_never_negative() -> anyhow::Result<()> {
    let (mut store, ids) = store_with(2).await?;

    for _ in 0..3 {
        store.decrement_counter(ids[0]).await?;
    }
    store.increment_counter(ids[1]).await?;
    store.decrement_counter(ids[1]).await?;
    store.decrement_counter(ids[1]).await?;

    assert!(store.counters().iter().all(|c| c.value == 0));
    assert_eq!(store.current_counter_id(), Some(ids[1]));
    Ok(())
}

#[tokio::test]
async fn test_deleting_current_picks_remaining_counter() -> anyhow::Result<()> {
    let (mut store, ids) = store_with(3).await?;
    store.increment_counter(ids[1]).await?;

    store.delete_counter(ids[1]).await?;

    let current = store.current_counter_id().expect("a counter remains");
    assert!(store.find(current).is_some());
    assert_eq!(current, ids[0]);
    Ok(())
}

#[tokio::test]
async fn test_deleting_last_counter_clears_current() -> anyhow::Result<()> {
    let (mut store, ids) = store_with(2).await?;

    store.delete_counter(ids[0]).await?;
    store.delete_counter(ids[1]).await?;

    assert_eq!(store.current_counter_id(), None);
    assert!(store.current_counter().is_none());
    Ok(())
}

#[tokio::test]
async fn test_blank_rename_stores_placeholder() -> anyhow::Result<()> {
    let (mut store, ids) = store_with(1).await?;

    store.rename_counter(ids[0], "   ").await?;

    assert_eq!(store.find(ids[0]).unwrap().title, UNTITLED_COUNTER);
    Ok(())
}

#[tokio::test]
async fn test_reorder_assignment_sets_display_order() -> anyhow::Result<()> {
    let (mut store, ids) = store_with(3).await?;
    let assignment: PositionAssignment = [(ids[0], 2), (ids[1], 0), (ids[2], 1)]
        .into_iter()
        .collect();

    store.reorder(&assignment).await?;

    assert_eq!(order(&store), vec![ids[1], ids[2], ids[0]]);
    let stored: Vec<CounterId> = store.counters().iter().map(|c| c.id).collect();
    assert_eq!(stored, vec![ids[1], ids[2], ids[0]]);
    Ok(())
}

#[tokio::test]
async fn test_export_is_pure() -> anyhow::Result<()> {
    let (mut store, ids) = store_with(2).await?;
    store.increment_counter(ids[0]).await?;
    let revision = store.revision();

    let first = store.export_snapshot();
    let second = store.export_snapshot();

    assert_eq!(first.counters, second.counters);
    assert_eq!(first.current_counter_id, second.current_counter_id);
    assert_eq!(store.revision(), revision);
    Ok(())
}

#[tokio::test]
async fn test_favorites_scenario() -> anyhow::Result<()> {
    let (mut store, ids) = store_with(3).await?;

    store.increment_counter(ids[1]).await?;
    store.increment_counter(ids[1]).await?;
    store.toggle_favorite(ids[0]).await?;
    store.toggle_favorite(ids[1]).await?;
    store.set_show_favorites_only(true);

    let visible = store.visible_counters();
    let visible_ids: Vec<CounterId> = visible.iter().map(|c| c.id).collect();
    assert_eq!(visible_ids, vec![ids[0], ids[1]]);
    assert_eq!(visible[1].value, 2);

    let stats = store.stats();
    assert_eq!(stats.counter_label(), "3 counters");
    assert_eq!(stats.favorite_label(), "2 favorites");
    Ok(())
}

#[tokio::test]
async fn test_drag_and_drop_commits_once_on_drop() -> anyhow::Result<()> {
    let (mut store, ids) = store_with(3).await?;
    let revision = store.revision();
    let boxes: Vec<ElementBox> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| ElementBox::new(*id, i as f64 * 80.0, 80.0))
        .collect();

    let rendered = order(&store);
    let mut session = DragSession::start(rendered, ids[2]).expect("dragged counter is rendered");
    session.hover_at(200.0, &boxes);
    session.hover_at(100.0, &boxes);
    session.hover_at(5.0, &boxes);

    // Nothing committed while dragging
    assert_eq!(store.revision(), revision);
    assert_eq!(order(&store), ids);

    store.reorder(&session.finish()).await?;
    assert_eq!(order(&store), vec![ids[2], ids[0], ids[1]]);
    Ok(())
}

#[tokio::test]
async fn test_reorder_within_favorites_view() -> anyhow::Result<()> {
    let (mut store, ids) = store_with(4).await?;
    store.toggle_favorite(ids[1]).await?;
    store.toggle_favorite(ids[3]).await?;
    store.set_show_favorites_only(true);

    let mut session = DragSession::start(order(&store), ids[3]).unwrap();
    session.hover(Some(ids[1]));
    store.reorder(&session.finish()).await?;

    assert_eq!(order(&store), vec![ids[3], ids[1]]);

    store.set_show_favorites_only(false);
    assert_eq!(store.visible_counters().len(), 4);
    Ok(())
}

#[tokio::test]
async fn test_file_storage_round_trip() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;

    let (first, second) = {
        let mut store = CounterStore::load(FileStorage::new(temp_dir.path())).await;
        let first = store.add_counter().await?.id;
        let second = store.add_counter().await?.id;
        store.increment_counter(second).await?;
        store
            .reorder(&PositionAssignment::from_order(&[second, first]))
            .await?;
        store.reset_all_counters().await?;
        (first, second)
    };

    let store = CounterStore::load(FileStorage::new(temp_dir.path())).await;
    let ids: Vec<CounterId> = store.counters().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![second, first]);
    assert_eq!(store.current_counter_id(), Some(second));
    assert!(store.counters().iter().all(|c| c.value == 0));
    Ok(())
}

#[tokio::test]
async fn test_corrupt_file_is_discarded() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = FileStorage::new(temp_dir.path());
    storage.initialize().await?;
    std::fs::write(storage.root_path().join("multi-counters.value"), "{{{")?;
    std::fs::write(storage.root_path().join("current-counter-id.value"), "17")?;

    let mut store = CounterStore::load(storage).await;

    assert!(store.counters().is_empty());
    assert_eq!(store.current_counter_id(), Some(CounterId::new(17)));
    assert!(store.current_counter().is_none());

    let id = store.add_counter().await?.id;
    assert_eq!(store.current_counter_id(), Some(id));
    Ok(())
}
