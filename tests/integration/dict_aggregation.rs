//! Integration tests for DictStatus aggregation

use statuskit::{
    error, info, new_ok, Children, Combined, DictCombiner, DictStatus, Level, Status, StatusCode,
};
use std::cell::Cell;
use std::rc::Rc;

/// Worst severity wins; ties go to the later key.
struct WorstLevel;

impl DictCombiner for WorstLevel {
    fn combine(&self, children: &Children) -> Combined {
        match children.iter().max_by_key(|(_, child)| child.level()) {
            Some((key, _)) => Combined::Child(key.clone()),
            None => Combined::Status(Box::new(new_ok(""))),
        }
    }
}

/// Counts failing children into a synthesized summary.
struct Summary {
    calls: Rc<Cell<usize>>,
}

impl DictCombiner for Summary {
    fn combine(&self, children: &Children) -> Combined {
        self.calls.set(self.calls.get() + 1);
        let failed = children.values().filter(|c| !c.is_ok()).count();
        let status = if failed == 0 {
            new_ok("all shards healthy")
        } else {
            error(
                StatusCode::Unavailable,
                format!("{}/{} shards failed", failed, children.len()),
            )
        };
        Combined::Status(Box::new(status.with_payload("failed", failed.to_string())))
    }
}

fn shards() -> DictStatus {
    let mut dict = DictStatus::new();
    dict.add_child("shard-0", new_ok(""))
        .add_child("shard-1", error(StatusCode::Unavailable, "shard-1 offline"))
        .add_child("shard-2", new_ok("").with_payload("lag_ms", "12"));
    dict
}

#[test]
fn test_default_combiner_reports_failing_shard() {
    let dict = shards();
    assert_eq!(dict.code(), StatusCode::Unavailable);
    assert_eq!(dict.message(), "shard-1 offline");
    assert_eq!(dict.level(), Level::Error);
}

#[test]
fn test_custom_combiner_replaces_default() {
    let mut dict = shards();
    dict.set_combiner(WorstLevel);
    assert_eq!(dict.level(), Level::Error);
    assert_eq!(dict.message(), "shard-1 offline");
}

#[test]
fn test_synthesized_base_runs_once() {
    let calls = Rc::new(Cell::new(0));
    let mut dict = DictStatus::with_combiner(Summary {
        calls: calls.clone(),
    });
    dict.add_child("a", new_ok(""))
        .add_child("b", error(StatusCode::Internal, "x"))
        .add_child("c", error(StatusCode::Internal, "y"));

    assert_eq!(dict.message(), "2/3 shards failed");
    assert_eq!(dict.payload("failed"), "2");
    assert_eq!(dict.code(), StatusCode::Unavailable);
    dict.capture();
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_walk_payload_covers_base_and_children() {
    let mut dict = shards();
    dict.set_payload("region", "eu");

    let mut seen = Vec::new();
    dict.walk_payload(&mut |k, v| {
        seen.push(format!("{}={}", k, v));
        true
    });
    seen.sort();
    // shard-1 is the base, so its payload is walked twice
    assert_eq!(seen, vec!["lag_ms=12", "region=eu", "region=eu"]);
}

#[test]
fn test_walk_payload_triggers_combination() {
    let dict = shards();
    assert!(!dict.is_combined());
    dict.walk_payload(&mut |_, _| true);
    assert!(dict.is_combined());
}

#[test]
fn test_add_child_after_read_panics_without_adding() {
    let mut dict = shards();
    let _ = dict.code();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        dict.add_child("shard-3", info(StatusCode::Ok, ""));
    }));
    assert!(result.is_err());
    assert_eq!(dict.len(), 3);
    assert!(dict.child("shard-3").is_none());
}

#[test]
fn test_nested_dicts_fan_out_capture() {
    let mut region = DictStatus::new();
    region
        .add_child("shard-0", new_ok(""))
        .add_child("shard-1", new_ok(""));

    let mut cluster = DictStatus::new();
    cluster.add_child("eu", region);
    cluster.capture();

    let eu = cluster.child("eu").unwrap();
    assert!(eu.is_ok());
    // the nested dict's synthesized base got one frame
    assert_eq!(eu.frames().len(), 1);
    assert_eq!(cluster.frames().len(), 1);
}
