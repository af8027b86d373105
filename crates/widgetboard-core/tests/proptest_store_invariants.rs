//! Property-based invariant tests for the in-memory widget store.
//!
//! Random sequences of create/update/delete are replayed against the store
//! and against a naive reference model. After every step:
//!
//! 1. No two widgets share a z-index.
//! 2. `list_all` is strictly ascending and agrees with `size` and `get`.
//! 3. Created IDs strictly increase.
//! 4. Every widget's z-index matches the reference model.

use proptest::prelude::*;
use std::collections::BTreeMap;
use widgetboard_core::{InMemoryWidgetStore, StoreError, WidgetId, WidgetPatch, WidgetService};

#[derive(Debug, Clone)]
enum Op {
    Create(Option<i32>),
    Update(WidgetId, Option<i32>, Option<i64>),
    Delete(WidgetId),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => proptest::option::of(-8i32..8).prop_map(Op::Create),
        2 => (0u64..24, proptest::option::of(-8i32..8), proptest::option::of(-50i64..50))
            .prop_map(|(id, z, x)| Op::Update(id, z, x)),
        1 => (0u64..24).prop_map(Op::Delete),
    ]
}

/// Reference model: widget ID to z-index, with the shift done the slow way.
#[derive(Default)]
struct Model {
    z_indexes: BTreeMap<WidgetId, i32>,
}

impl Model {
    fn make_room(&mut self, z_index: i32) {
        if self.z_indexes.values().any(|&z| z == z_index) {
            for z in self.z_indexes.values_mut() {
                if *z >= z_index {
                    *z += 1;
                }
            }
        }
    }

    fn create(&mut self, id: WidgetId, z_index: Option<i32>) -> i32 {
        let z_index = z_index.unwrap_or_else(|| {
            self.z_indexes.values().max().map_or(0, |&max| max + 1)
        });
        self.make_room(z_index);
        self.z_indexes.insert(id, z_index);
        z_index
    }

    fn update(&mut self, id: WidgetId, z_index: Option<i32>) -> bool {
        let Some(current) = self.z_indexes.remove(&id) else {
            return false;
        };
        match z_index {
            Some(target) if target != current => {
                self.make_room(target);
                self.z_indexes.insert(id, target);
            }
            _ => {
                self.z_indexes.insert(id, current);
            }
        }
        true
    }
}

fn check_invariants(store: &InMemoryWidgetStore, model: &Model) -> Result<(), TestCaseError> {
    let all = store.list_all();

    prop_assert_eq!(all.len(), store.size());
    prop_assert!(
        all.windows(2).all(|pair| pair[0].z_index() < pair[1].z_index()),
        "list_all not strictly ascending: {:?}",
        all.iter().map(|w| w.z_index()).collect::<Vec<_>>()
    );
    for widget in &all {
        let found = store.get(widget.id());
        prop_assert_eq!(found.as_ref(), Some(widget));
    }

    let actual: BTreeMap<WidgetId, i32> = all.iter().map(|w| (w.id(), w.z_index())).collect();
    prop_assert_eq!(&actual, &model.z_indexes);
    Ok(())
}

proptest! {
    #[test]
    fn random_operations_keep_invariants(ops in proptest::collection::vec(op_strategy(), 1..60)) {
        let store = InMemoryWidgetStore::new();
        let mut model = Model::default();
        let mut last_id: Option<WidgetId> = None;

        for op in ops {
            match op {
                Op::Create(z_index) => {
                    let patch = WidgetPatch { z_index, ..WidgetPatch::default() };
                    let widget = store.create(patch).unwrap();
                    if let Some(last) = last_id {
                        prop_assert!(widget.id() > last);
                    }
                    last_id = Some(widget.id());
                    let expected_z = model.create(widget.id(), z_index);
                    prop_assert_eq!(widget.z_index(), expected_z);
                }
                Op::Update(id, z_index, x) => {
                    let patch = WidgetPatch { z_index, x, ..WidgetPatch::default() };
                    let result = store.update(id, patch);
                    if model.update(id, z_index) {
                        let widget = result.unwrap();
                        if let Some(x) = x {
                            prop_assert_eq!(widget.x, x);
                        }
                    } else {
                        prop_assert_eq!(result, Err(StoreError::NotFound(id)));
                    }
                }
                Op::Delete(id) => {
                    let before = store.size();
                    let existed = model.z_indexes.remove(&id).is_some();
                    store.delete(id);
                    prop_assert_eq!(store.size(), if existed { before - 1 } else { before });
                }
            }
            check_invariants(&store, &model)?;
        }
    }
}

proptest! {
    #[test]
    fn pages_partition_the_ordered_list(
        count in 0usize..30,
        offset in 0usize..40,
        limit in 0usize..40
    ) {
        let store = InMemoryWidgetStore::new();
        for _ in 0..count {
            store.create(WidgetPatch::new()).unwrap();
        }

        let all = store.list_all();
        let page = store.list_page(offset, limit);

        let expected_len = if offset >= count { 0 } else { limit.min(count - offset) };
        prop_assert_eq!(page.len(), expected_len);
        if expected_len > 0 {
            prop_assert_eq!(&page[..], &all[offset..offset + expected_len]);
        }
    }
}
