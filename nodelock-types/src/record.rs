//! License grant records and registered node descriptors.

use crate::{timestamp, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A licensed grant bound to a management node.
///
/// Field order is load-bearing: the integrity code is a digest over the
/// JSON serialization, and serde_json emits fields in declaration order.
/// Reordering fields invalidates every previously issued artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LicenseRecord {
    /// Grant start, `YYYY-MM-DDTHH:MM:SS`, local time.
    pub start_time: String,
    /// Grant expiry, same layout. Ignored when `permanent_auth` is set.
    pub end_time: String,
    /// UTC offset of the requesting machine, stamped at request creation.
    pub client_time_zone: String,
    /// Stamped at issuance. Informational only.
    pub license_create_time: String,
    /// Maximum number of worker nodes this grant admits.
    pub allow_nodes: u32,
    /// Number of worker nodes registered so far.
    pub use_nodes: u32,
    /// MAC address of the authorized management node.
    pub mac_addr: String,
    /// Motherboard serial (or UUID fallback) of the management node.
    pub mother_board_id: String,
    /// Permanent grant: the expiry bound is not enforced.
    pub permanent_auth: bool,
    /// Opaque customer marker. No protocol meaning.
    pub customer_tag: String,
    /// Opaque module route prefix. No protocol meaning.
    pub model_route: String,
    /// Lowercase hex digest over this record with the field itself cleared.
    pub check_code: String,
    /// Registered workers, in registration order. Duplicates are not rejected.
    pub node_list: Vec<NodeInfo>,
}

impl LicenseRecord {
    /// Returns true when no further node can be registered.
    #[must_use]
    pub fn at_capacity(&self) -> bool {
        self.use_nodes >= self.allow_nodes
    }

    /// Returns how many more nodes the grant admits.
    #[must_use]
    pub fn remaining_capacity(&self) -> u32 {
        self.allow_nodes.saturating_sub(self.use_nodes)
    }

    /// Parses the grant start time.
    pub fn start(&self) -> Result<NaiveDateTime> {
        timestamp::parse(&self.start_time)
    }

    /// Parses the grant expiry time.
    pub fn end(&self) -> Result<NaiveDateTime> {
        timestamp::parse(&self.end_time)
    }

    /// Whether `at` falls inside the grant window.
    ///
    /// The start bound always applies. The end bound is skipped for
    /// permanent grants.
    pub fn window_contains(&self, at: NaiveDateTime) -> Result<bool> {
        if at < self.start()? {
            return Ok(false);
        }
        if self.permanent_auth {
            return Ok(true);
        }
        Ok(at <= self.end()?)
    }
}

/// A registered worker node. Immutable once appended to a grant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeInfo {
    /// Management-interface IP of the node.
    pub node_ip: String,
    /// Hostname of the node.
    pub node_name: String,
    /// Management-interface MAC of the node.
    pub node_mac: String,
    /// Motherboard serial (or UUID fallback) of the node.
    pub node_mother_board_id: String,
}
