mod common;

use common::{codec, sample_record, worker};
use nodelock_license::{LicenseError, NodeRegistry};

#[test]
fn register_appends_node_and_increments_use_nodes() {
    let codec = codec();
    let registry = NodeRegistry::new(codec.clone());
    let bytes = codec.encode(&sample_record()).unwrap();

    let updated = registry.register(&bytes, worker(1)).unwrap();
    let record = codec.decode(&updated).unwrap();
    assert_eq!(record.use_nodes, 1);
    assert_eq!(record.node_list.len(), 1);
    assert_eq!(record.node_list[0], worker(1));
}

#[test]
fn registration_preserves_insertion_order() {
    let codec = codec();
    let registry = NodeRegistry::new(codec.clone());
    let mut bytes = codec.encode(&sample_record()).unwrap();
    for n in 1..=3 {
        bytes = registry.register(&bytes, worker(n)).unwrap();
    }
    let record = codec.decode(&bytes).unwrap();
    assert_eq!(
        record.node_list,
        vec![worker(1), worker(2), worker(3)]
    );
}

#[test]
fn registration_changes_embedded_key() {
    // The digest changes with every registration, so the artifact bytes
    // (and the key hidden in them) never repeat.
    let codec = codec();
    let registry = NodeRegistry::new(codec.clone());
    let bytes = codec.encode(&sample_record()).unwrap();
    let updated = registry.register(&bytes, worker(1)).unwrap();
    assert_ne!(bytes, updated);
    let first = codec.decode(&bytes).unwrap();
    let second = codec.decode(&updated).unwrap();
    assert_ne!(first.check_code, second.check_code);
}

#[test]
fn duplicate_nodes_are_not_rejected() {
    let codec = codec();
    let registry = NodeRegistry::new(codec.clone());
    let bytes = codec.encode(&sample_record()).unwrap();
    let once = registry.register(&bytes, worker(1)).unwrap();
    let twice = registry.register(&once, worker(1)).unwrap();
    let record = codec.decode(&twice).unwrap();
    assert_eq!(record.use_nodes, 2);
    assert_eq!(record.node_list, vec![worker(1), worker(1)]);
}

#[test]
fn full_grant_rejects_registration() {
    let codec = codec();
    let registry = NodeRegistry::new(codec.clone());
    let mut record = sample_record();
    record.use_nodes = record.allow_nodes;
    let bytes = codec.encode(&record).unwrap();

    let err = registry.register(&bytes, worker(9)).unwrap_err();
    assert!(matches!(
        err,
        LicenseError::CapacityExceeded { allow_nodes: 3 }
    ));
    // The stored artifact is untouched by the failed attempt.
    let unchanged = codec.decode(&bytes).unwrap();
    assert_eq!(unchanged.use_nodes, 3);
    assert!(unchanged.node_list.is_empty());
}

#[test]
fn tampered_artifact_rejects_registration() {
    let codec = codec();
    let registry = NodeRegistry::new(codec.clone());
    let mut bytes = codec.encode(&sample_record()).unwrap();
    let mid = bytes.len() / 2;
    bytes[mid] ^= 0x01;
    assert!(registry.register(&bytes, worker(1)).is_err());
}

/// The end-to-end grant scenario: a three-node grant with a century-long
/// window admits exactly three registrations.
#[test]
fn scenario_three_node_grant() {
    let codec = codec();
    let registry = NodeRegistry::new(codec.clone());
    let record = sample_record();
    let bytes = codec.encode(&record).unwrap();

    let decoded = codec.decode(&bytes).unwrap();
    assert_eq!(decoded.allow_nodes, 3);
    assert_eq!(decoded.use_nodes, 0);
    assert_eq!(decoded.start_time, "2024-01-01T00:00:00");
    assert_eq!(decoded.end_time, "2124-01-01T00:00:00");
    assert_eq!(decoded.mother_board_id, record.mother_board_id);

    let mut current = bytes;
    for n in 1..=3 {
        current = registry.register(&current, worker(n)).unwrap();
        assert_eq!(codec.decode(&current).unwrap().use_nodes, n);
    }

    let err = registry.register(&current, worker(4)).unwrap_err();
    assert!(matches!(err, LicenseError::CapacityExceeded { .. }));
    let final_record = codec.decode(&current).unwrap();
    assert_eq!(final_record.use_nodes, 3);
    assert_eq!(final_record.node_list.len(), 3);
}
