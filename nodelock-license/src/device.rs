//! Machine fingerprinting and network-interface probes.
//!
//! The fingerprint binds a grant to the motherboard of the management
//! node. Probes shell out to platform utilities and degrade to an empty
//! string when the platform cannot be identified; an empty fingerprint is
//! a legitimate "unavailable" outcome, not an error, and only node-request
//! creation rejects it.

use crate::error::{LicenseError, LicenseResult};
use nodelock_types::NodeInfo;
use serde::{Deserialize, Serialize};

/// Provides the stable hardware identifier of the current machine.
///
/// Returning an empty string signals that no identifier is available on
/// this platform.
pub trait Fingerprint: Send + Sync {
    /// Returns the motherboard serial (or UUID fallback), or empty.
    fn motherboard_id(&self) -> String;
}

/// Fingerprint provider backed by the platform's hardware utilities.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFingerprint;

impl Fingerprint for SystemFingerprint {
    fn motherboard_id(&self) -> String {
        probe_motherboard_id()
    }
}

fn probe_motherboard_id() -> String {
    #[cfg(target_os = "linux")]
    {
        let output = std::process::Command::new("dmidecode")
            .args(["-t", "system"])
            .output()
            .ok()
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .unwrap_or_default();

        let serial = dmi_field(&output, "Serial Number:");
        if !serial.is_empty() && serial != "NotSpecified" {
            return serial;
        }
        dmi_field(&output, "UUID:")
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("wmic")
            .args(["baseboard", "get", "SerialNumber"])
            .output()
            .ok()
            .and_then(|o| String::from_utf8(o.stdout).ok())
            .map(|s| {
                s.replace("SerialNumber", "")
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .collect()
            })
            .unwrap_or_default()
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        String::new()
    }
}

/// Extracts and squeezes a `dmidecode` field value.
#[cfg(target_os = "linux")]
fn dmi_field(output: &str, label: &str) -> String {
    output
        .lines()
        .find_map(|line| line.trim_start().strip_prefix(label))
        .map(|value| value.chars().filter(|c| !c.is_whitespace()).collect())
        .unwrap_or_default()
}

/// A network interface on this machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetCard {
    /// 1-based enumeration index, stable within one listing.
    pub id: usize,
    /// Interface name.
    pub name: String,
    /// Hardware address, or empty for interfaces without one.
    pub mac: String,
    /// First IPv4 address, or empty when unconfigured.
    pub ip: String,
}

/// Lists the machine's network interfaces.
///
/// Interfaces the platform cannot enumerate yield an empty list.
#[must_use]
pub fn list_net_cards() -> Vec<NetCard> {
    #[cfg(target_os = "linux")]
    {
        let Ok(entries) = std::fs::read_dir("/sys/class/net") else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().into_string().ok())
            .collect();
        names.sort();
        names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let mac = std::fs::read_to_string(format!("/sys/class/net/{name}/address"))
                    .map(|s| s.trim().to_string())
                    .unwrap_or_default();
                let ip = first_ipv4(&name);
                NetCard {
                    id: idx + 1,
                    name,
                    mac,
                    ip,
                }
            })
            .collect()
    }

    #[cfg(not(target_os = "linux"))]
    {
        // Windows would enumerate adapters through the platform API.
        Vec::new()
    }
}

/// Looks up a network interface by name.
#[must_use]
pub fn net_card_by_name(name: &str) -> Option<NetCard> {
    list_net_cards().into_iter().find(|card| card.name == name)
}

#[cfg(target_os = "linux")]
fn first_ipv4(interface: &str) -> String {
    std::process::Command::new("ip")
        .args(["-o", "-4", "addr", "show", "dev", interface])
        .output()
        .ok()
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .and_then(|out| {
            out.lines()
                .next()
                .and_then(|line| line.split_whitespace().nth(3))
                .map(String::from)
        })
        .unwrap_or_default()
}

/// Builds the descriptor a worker node submits for registration.
///
/// `interface` names the management interface whose MAC and IP identify
/// the node on the network.
pub fn node_descriptor(interface: &str, provider: &dyn Fingerprint) -> LicenseResult<NodeInfo> {
    let card = net_card_by_name(interface)
        .ok_or_else(|| LicenseError::InterfaceNotFound(interface.to_string()))?;
    Ok(NodeInfo {
        node_ip: card.ip,
        node_name: get_hostname(),
        node_mac: card.mac,
        node_mother_board_id: provider.motherboard_id(),
    })
}

/// Gets the machine hostname.
fn get_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}
