//! Metric value objects.
//!
//! Every type here is a plain snapshot: cloned out of the source, never
//! mutated by the engine. All of them deserialize with defaults so partial
//! snapshot files load cleanly.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::IpAddr;

/// CPU usage snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuInfo {
    /// Aggregate usage across all cores, 0-100.
    pub usage_percent: f64,
    /// Per-core figures, in core order.
    pub cores: Vec<CoreInfo>,
}

/// A single CPU core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreInfo {
    /// Usage, 0-100.
    pub usage_percent: f64,
    /// Current frequency in MHz.
    pub frequency_mhz: f64,
}

impl CpuInfo {
    /// Average frequency across cores in MHz, or zero with no cores.
    pub fn average_frequency_mhz(&self) -> f64 {
        if self.cores.is_empty() {
            return 0.0;
        }
        self.cores.iter().map(|c| c.frequency_mhz).sum::<f64>() / self.cores.len() as f64
    }
}

/// Memory and swap usage in bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryInfo {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    /// Free plus reclaimable (buffers and page cache).
    pub available: u64,
    pub buffers: u64,
    pub cached: u64,
    pub swap_total: u64,
    pub swap_used: u64,
    pub swap_free: u64,
}

/// Uptime and load averages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UptimeInfo {
    /// Seconds since boot.
    pub seconds: u64,
    /// 1, 5 and 15 minute load averages.
    pub load: [f64; 3],
}

/// Network interfaces keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkInfo {
    pub interfaces: BTreeMap<String, InterfaceStats>,
}

/// Counters and addresses for one interface.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceStats {
    /// Total bytes received.
    pub rx_bytes: u64,
    /// Total bytes transmitted.
    pub tx_bytes: u64,
    /// Receive rate in bytes per second.
    pub rx_rate: u64,
    /// Transmit rate in bytes per second.
    pub tx_rate: u64,
    pub addresses: Vec<IpAddr>,
    /// Wireless network name, if any.
    pub essid: Option<String>,
}

impl InterfaceStats {
    /// First IPv4 address, the primary family for `addr` and `if_up`.
    pub fn primary_address(&self) -> Option<&IpAddr> {
        self.addresses.iter().find(|a| a.is_ipv4())
    }
}

/// Mounted filesystems keyed by mount point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilesystemInfo {
    pub mounts: BTreeMap<String, MountStats>,
}

/// Usage for one mount point, in bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountStats {
    pub fs_type: String,
    pub total: u64,
    pub used: u64,
    pub free: u64,
}

/// Disk throughput keyed by device name (e.g. "sda").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskIoInfo {
    pub devices: BTreeMap<String, DiskStats>,
}

/// Read/write rates in bytes per second.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiskStats {
    pub read_rate: u64,
    pub write_rate: u64,
}

impl DiskIoInfo {
    /// Sum of read and write rates across all devices.
    pub fn totals(&self) -> DiskStats {
        self.devices.values().fold(DiskStats::default(), |acc, d| DiskStats {
            read_rate: acc.read_rate.saturating_add(d.read_rate),
            write_rate: acc.write_rate.saturating_add(d.write_rate),
        })
    }
}

/// Hardware-monitor readings.
///
/// `sensors` maps a device name to readings keyed by type and index,
/// e.g. `"temp1"` or `"fan2"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HwmonInfo {
    pub sensors: BTreeMap<String, BTreeMap<String, f64>>,
    /// ACPI thermal zone temperature in degrees Celsius.
    pub acpi_temp: Option<f64>,
}

/// Process counts and top-N lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessInfo {
    pub total: u64,
    pub running: u64,
    pub threads: u64,
    pub running_threads: u64,
    /// Processes ordered by CPU usage, highest first.
    pub top_cpu: Vec<ProcessStat>,
    /// Processes ordered by memory usage, highest first.
    pub top_mem: Vec<ProcessStat>,
}

/// One sampled process.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessStat {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f64,
    pub mem_percent: f64,
    /// Resident memory in bytes.
    pub mem_bytes: u64,
}

/// All batteries in the system.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatteryInfo {
    pub batteries: Vec<Battery>,
}

impl BatteryInfo {
    /// Look up a battery by name; no name selects the first one.
    pub fn find(&self, name: Option<&str>) -> Option<&Battery> {
        match name {
            Some(name) => self.batteries.iter().find(|b| b.name == name),
            None => self.batteries.first(),
        }
    }
}

/// A single battery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Battery {
    /// Kernel name, e.g. "BAT0".
    pub name: String,
    pub percent: f64,
    pub status: BatteryStatus,
    /// Estimated seconds to full or empty.
    pub seconds_remaining: Option<u64>,
}

/// Charging state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatteryStatus {
    Charging,
    Discharging,
    Full,
    #[default]
    Unknown,
}

impl BatteryStatus {
    /// Lowercase word used by the `battery` directive.
    pub fn as_str(&self) -> &'static str {
        match self {
            BatteryStatus::Charging => "charging",
            BatteryStatus::Discharging => "discharging",
            BatteryStatus::Full => "full",
            BatteryStatus::Unknown => "unknown",
        }
    }
}

/// Mixer state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioInfo {
    pub volume_percent: f64,
    pub muted: bool,
}

/// Host identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemInfo {
    pub hostname: String,
    pub kernel: String,
    pub sysname: String,
    pub machine: String,
}
