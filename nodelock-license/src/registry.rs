//! Node registration against an existing license artifact.

use crate::codec::LicenseCodec;
use crate::error::{LicenseError, LicenseResult};
use nodelock_types::NodeInfo;
use tracing::info;

/// Registers worker nodes under an existing grant, enforcing capacity.
#[derive(Debug, Clone)]
pub struct NodeRegistry {
    codec: LicenseCodec,
}

impl NodeRegistry {
    /// Creates a registry over the given codec.
    #[must_use]
    pub fn new(codec: LicenseCodec) -> Self {
        Self { codec }
    }

    /// Appends `node` to the grant in `existing` and returns the re-sealed
    /// artifact bytes for the caller to persist.
    ///
    /// Fails with [`LicenseError::CapacityExceeded`] when the grant is
    /// already full; no mutation is visible on any failure path because the
    /// input bytes are never written back here. Re-encoding recomputes the
    /// integrity code, so the embedded symmetric key changes on every
    /// registration.
    ///
    /// Not transactional across processes: two registrars racing on the
    /// same file can silently lose one update.
    pub fn register(&self, existing: &[u8], node: NodeInfo) -> LicenseResult<Vec<u8>> {
        let mut record = self.codec.decode(existing)?;
        if record.at_capacity() {
            return Err(LicenseError::CapacityExceeded {
                allow_nodes: record.allow_nodes,
            });
        }
        record.node_list.push(node);
        record.use_nodes += 1;
        info!(
            use_nodes = record.use_nodes,
            allow_nodes = record.allow_nodes,
            "registered node"
        );
        self.codec.encode(&record)
    }
}
