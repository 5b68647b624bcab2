//! Offline node-locked licensing for nodelock.
//!
//! This crate handles:
//! - The license envelope: checksum-protected, key-hidden SM4 encryption
//! - Node registration under a capacity-limited grant
//! - Hardware fingerprinting for machine binding
//! - A background monitor that enforces clock and license integrity
//!
//! # Design Principles
//!
//! - **Offline only**: no activation server is ever contacted; issuer and
//!   client exchange artifact files out of band
//! - **Fail closed**: any validation doubt reads as invalid, and the
//!   monitor's stop order is unconditional
//! - **Machine binding**: grants are tied to a motherboard fingerprint
//! - **Observable termination**: the monitor reports why it stopped
//!   instead of killing the process itself
//!
//! # Artifact Format
//!
//! A record is serialized to JSON, digested with SM3, encrypted with
//! SM4-CBC under the first 16 hex characters of its own digest, base64
//! framed, and the key is interleaved back into the ciphertext at
//! positions only the two roles know. `node.info` and `license.lic` share
//! this format and differ only in payload role.

mod clock;
mod codec;
mod device;
mod error;
mod issuer;
mod monitor;
mod registry;
mod store;
mod validity;

pub use clock::{Clock, SystemClock};
pub use codec::{verify_check_code, EnvelopeParams, LicenseCodec};
pub use device::{
    list_net_cards, net_card_by_name, node_descriptor, Fingerprint, NetCard, SystemFingerprint,
};
pub use error::{LicenseError, LicenseResult};
pub use issuer::{
    create_node_request, issue, issue_at, GrantTerm, IssueOptions, MIN_ALLOW_NODES,
    NODE_REQUEST_TTL_DAYS, PERMANENT_GRANT_YEARS,
};
pub use monitor::{
    EntropyRandom, IntegrityMonitor, MonitorHandle, RandomSource, TerminationReason,
    JITTER_SLOTS, SKEW_TOLERANCE_MINUTES, SLOT_MINUTES,
};
pub use registry::NodeRegistry;
pub use store::{read_artifact, write_artifact, LICENSE_FILE, NODE_REQUEST_FILE};
pub use validity::{DefaultValidity, ValidityCheck};
