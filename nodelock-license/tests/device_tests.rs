mod common;

use common::FixedFingerprint;
use nodelock_license::{
    net_card_by_name, node_descriptor, Fingerprint, LicenseError, SystemFingerprint,
};

#[test]
fn system_fingerprint_never_panics() {
    // On machines without dmidecode (or without privileges) the probe
    // degrades to the empty "unavailable" string instead of failing.
    let _ = SystemFingerprint.motherboard_id();
}

#[test]
fn unknown_interface_lookup_returns_none() {
    assert!(net_card_by_name("nodelock-no-such-if0").is_none());
}

#[test]
fn node_descriptor_rejects_unknown_interface() {
    let provider = FixedFingerprint("SN-WORK-0001".into());
    let err = node_descriptor("nodelock-no-such-if0", &provider).unwrap_err();
    assert!(matches!(err, LicenseError::InterfaceNotFound(_)));
}

#[cfg(target_os = "linux")]
#[test]
fn net_card_listing_is_stably_numbered() {
    let cards = nodelock_license::list_net_cards();
    for (idx, card) in cards.iter().enumerate() {
        assert_eq!(card.id, idx + 1);
        assert!(!card.name.is_empty());
    }
}
