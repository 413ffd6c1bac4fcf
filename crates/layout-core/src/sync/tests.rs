use std::rc::Rc;

use super::testing::{Call, FakeLayoutApi};
use super::*;
use crate::domain::{ItemId, ItemPatch, ItemType};
use crate::geometry::Cell;
use crate::store::ItemStore;

fn floor(id: u64, x: u32) -> LayoutItem {
    LayoutItem {
        id: ItemId::Persisted(id),
        name: format!("Floor {}", id),
        item_type: ItemType::Floor,
        parent_id: Some(1),
        position_x: x,
        position_y: 0,
        width: 3,
        height: 2,
        status: None,
    }
}

/// Store with two floors: one renamed, one removed, and one new floor
fn edited_store() -> ItemStore {
    let mut store = ItemStore::new();
    store.load(vec![floor(10, 0), floor(11, 3)]);
    store.update(ItemId::Persisted(10), &ItemPatch::rename("Ground")).unwrap();
    store.remove(ItemId::Persisted(11)).unwrap();
    let temp = store.next_temp_id();
    store
        .add(LayoutItem::new_temporary(temp, ItemType::Floor, ParentRef::Item(1), Cell::new(6, 0)))
        .unwrap();
    store
}

#[tokio::test]
async fn test_per_item_sends_one_call_per_change() {
    let api = Rc::new(FakeLayoutApi::with_items(vec![floor(10, 0), floor(11, 3)]));
    let client = SyncClient::new(api.clone(), SaveStrategy::PerItem);
    let plan = SavePlan::build(&edited_store(), ParentRef::Item(1)).unwrap();

    let report = client.execute(&plan).await;
    assert!(report.is_success());
    assert_eq!(
        report.mappings(),
        vec![IdMapping { temp_id: ItemId::Temporary(1), new_id: 111 }]
    );

    assert_eq!(api.count(|c| matches!(c, Call::Create(_))), 1);
    assert_eq!(api.count(|c| matches!(c, Call::Update(10, _))), 1);
    assert_eq!(api.count(|c| matches!(c, Call::Delete(11))), 1);
    assert_eq!(api.count(|c| matches!(c, Call::Bulk(_))), 0);
}

#[tokio::test]
async fn test_per_item_failure_does_not_stop_the_rest() {
    let api = Rc::new(FakeLayoutApi::with_items(vec![floor(10, 0), floor(11, 3)]));
    api.fail_ids.borrow_mut().insert(10);
    let client = SyncClient::new(api.clone(), SaveStrategy::PerItem);
    let plan = SavePlan::build(&edited_store(), ParentRef::Item(1)).unwrap();

    let report = client.execute(&plan).await;
    assert!(!report.is_success());
    let failed: Vec<_> = report.outcomes.iter().filter(|o| o.result.is_err()).collect();
    assert_eq!(failed.len(), 1);
    assert!(matches!(failed[0].op, PlannedOp::Update { id: 10, .. }));
    assert_eq!(api.count(|c| matches!(c, Call::Delete(11))), 1);
}

#[tokio::test]
async fn test_create_without_id_is_reported() {
    let api = Rc::new(FakeLayoutApi::with_items(vec![]));
    api.omit_created_id.set(true);
    let client = SyncClient::new(api.clone(), SaveStrategy::PerItem);

    let mut store = ItemStore::new();
    store.load(vec![]);
    let temp = store.next_temp_id();
    store
        .add(LayoutItem::new_temporary(temp, ItemType::Building, ParentRef::Root, Cell::new(0, 0)))
        .unwrap();
    let plan = SavePlan::build(&store, ParentRef::Root).unwrap();

    let report = client.execute(&plan).await;
    assert_eq!(
        report.outcomes[0].result,
        Err(LayoutError::MissingServerId(ItemId::Temporary(temp)))
    );
}

#[tokio::test]
async fn test_bulk_sends_whole_level() {
    let api = Rc::new(FakeLayoutApi::with_items(vec![floor(10, 0), floor(11, 3)]));
    let client = SyncClient::new(api.clone(), SaveStrategy::Bulk);
    let plan = SavePlan::build(&edited_store(), ParentRef::Item(1)).unwrap();

    let report = client.execute(&plan).await;
    assert!(report.is_success());
    assert_eq!(report.mappings().len(), 1);

    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        Call::Bulk(request) => {
            assert_eq!(request.parent_id, ParentRef::Item(1));
            assert_eq!(request.items.len(), 2);
        }
        other => panic!("expected bulk call, got {:?}", other),
    }
}

#[tokio::test]
async fn test_bulk_failure_marks_every_op() {
    let api = Rc::new(FakeLayoutApi::with_items(vec![floor(10, 0), floor(11, 3)]));
    api.fail_creates.set(true);
    let client = SyncClient::new(api, SaveStrategy::Bulk);
    let plan = SavePlan::build(&edited_store(), ParentRef::Item(1)).unwrap();

    let report = client.execute(&plan).await;
    assert_eq!(report.outcomes.len(), 3);
    assert!(report.outcomes.iter().all(|o| o.result.is_err()));
}

#[tokio::test]
async fn test_load_filters_by_parent() {
    let mut other = floor(20, 0);
    other.parent_id = Some(2);
    let api = Rc::new(FakeLayoutApi::with_items(vec![floor(10, 0), other]));
    let client = SyncClient::new(api, SaveStrategy::PerItem);

    let items = client.load(ParentRef::Item(1)).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, ItemId::Persisted(10));
}

#[test]
fn test_strategy_from_config_value() {
    let strategy: SaveStrategy = serde_json::from_str(r#""bulk""#).unwrap();
    assert_eq!(strategy, SaveStrategy::Bulk);
    assert_eq!(SaveStrategy::default(), SaveStrategy::PerItem);
}
