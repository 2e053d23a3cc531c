//! Property-based tests for payload, frame and combination invariants

use proptest::prelude::*;
use statuskit::{info, DictStatus, LeafStatus, Level, Status, StatusCode};
use std::collections::BTreeMap;

fn any_code() -> impl Strategy<Value = StatusCode> {
    proptest::sample::select(StatusCode::ALL.to_vec())
}

proptest! {
    #[test]
    fn set_then_get_returns_value(key in "[a-z]{1,8}", value in ".*") {
        let mut status = info(StatusCode::Ok, "");
        status.set_payload(&key, &value);
        prop_assert_eq!(status.payload(&key), value.as_str());
    }

    #[test]
    fn untouched_key_is_empty(keys in proptest::collection::btree_set("[a-z]{1,6}", 0..8)) {
        let mut status = LeafStatus::default();
        for key in &keys {
            status.set_payload(key, "v");
        }
        prop_assert_eq!(status.payload("UNSET-KEY"), "");
    }

    #[test]
    fn capture_appends_one_frame_per_call(n in 0usize..32) {
        let mut status = info(StatusCode::Internal, "boom");
        for i in 0..n {
            status.capture();
            prop_assert_eq!(status.frames().len(), i + 1);
        }
        prop_assert_eq!(status.frames().len(), n);
    }

    #[test]
    fn stopping_visitor_sees_one_entry(
        payload in proptest::collection::btree_map("[a-z]{1,6}", "[a-z]{0,6}", 0..10)
    ) {
        let mut status = info(StatusCode::Ok, "");
        for (k, v) in &payload {
            status.set_payload(k, v);
        }
        let mut visits = 0;
        status.walk_payload(&mut |_, _| {
            visits += 1;
            false
        });
        prop_assert_eq!(visits, usize::from(!payload.is_empty()));
    }

    #[test]
    fn default_combiner_picks_smallest_failing_key(
        children in proptest::collection::btree_map("[a-z]{1,4}", any_code(), 0..8)
    ) {
        let mut dict = DictStatus::new();
        for (key, code) in &children {
            dict.add_child(key.clone(), info(*code, key.clone()));
        }

        match children.iter().find(|(_, code)| **code != StatusCode::Ok) {
            Some((key, code)) => {
                prop_assert_eq!(dict.code(), *code);
                prop_assert_eq!(dict.message(), key.as_str());
            }
            None => {
                prop_assert!(dict.is_ok());
                prop_assert_eq!(dict.message(), "");
                prop_assert_eq!(dict.level(), Level::Info);
            }
        }
    }

    #[test]
    fn dict_walk_covers_every_child_entry(
        children in proptest::collection::btree_map(
            "[a-z]{1,4}",
            proptest::collection::btree_map("[a-z]{1,4}", "[0-9]{1,3}", 0..4),
            0..6,
        )
    ) {
        let mut dict = DictStatus::new();
        let mut expected = BTreeMap::new();
        for (name, payload) in &children {
            let mut child = info(StatusCode::Ok, "");
            for (k, v) in payload {
                child.set_payload(k, v);
                expected.insert(format!("{}/{}", name, k), v.clone());
            }
            dict.add_child(name.clone(), child);
        }

        let mut seen = 0;
        dict.walk_payload(&mut |_, _| {
            seen += 1;
            true
        });
        prop_assert_eq!(seen, expected.len());
    }
}
