//! File-backed metric snapshots.

use crate::error::{ConkyError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::types::{
    AudioInfo, BatteryInfo, CpuInfo, DiskIoInfo, FilesystemInfo, HwmonInfo, MemoryInfo,
    NetworkInfo, ProcessInfo, SystemInfo, UptimeInfo,
};
use super::MetricSource;

/// A complete set of metrics for one sampling instant.
///
/// Every section is optional in the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricSnapshot {
    pub cpu: CpuInfo,
    pub memory: MemoryInfo,
    pub uptime: UptimeInfo,
    pub network: NetworkInfo,
    pub filesystems: FilesystemInfo,
    pub disk_io: DiskIoInfo,
    pub hwmon: HwmonInfo,
    pub processes: ProcessInfo,
    pub battery: BatteryInfo,
    pub audio: AudioInfo,
    pub system: SystemInfo,
}

impl MetricSnapshot {
    /// Parse a snapshot from YAML text.
    pub fn from_yaml(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }

    /// Parse a snapshot from JSON text.
    pub fn from_json(text: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load a snapshot file, choosing the format by extension.
    ///
    /// `.json` files parse as JSON, anything else as YAML.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let is_json = path.extension().is_some_and(|e| e == "json");

        let parsed = if is_json {
            Self::from_json(&text).map_err(|e| e.to_string())
        } else {
            Self::from_yaml(&text).map_err(|e| e.to_string())
        };

        parsed.map_err(|message| ConkyError::SnapshotParseError {
            path: path.to_path_buf(),
            message,
        })
    }
}

/// A [`MetricSource`] that always reports the same snapshot.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    snapshot: MetricSnapshot,
}

impl StaticSource {
    /// Wrap a snapshot.
    pub fn new(snapshot: MetricSnapshot) -> Self {
        Self { snapshot }
    }

    /// Load a snapshot file (see [`MetricSnapshot::load`]).
    pub fn from_path(path: &Path) -> Result<Self> {
        Ok(Self::new(MetricSnapshot::load(path)?))
    }

    /// The wrapped snapshot.
    pub fn snapshot(&self) -> &MetricSnapshot {
        &self.snapshot
    }
}

impl MetricSource for StaticSource {
    fn cpu(&self) -> CpuInfo {
        self.snapshot.cpu.clone()
    }

    fn memory(&self) -> MemoryInfo {
        self.snapshot.memory.clone()
    }

    fn uptime(&self) -> UptimeInfo {
        self.snapshot.uptime.clone()
    }

    fn network(&self) -> NetworkInfo {
        self.snapshot.network.clone()
    }

    fn filesystems(&self) -> FilesystemInfo {
        self.snapshot.filesystems.clone()
    }

    fn disk_io(&self) -> DiskIoInfo {
        self.snapshot.disk_io.clone()
    }

    fn hwmon(&self) -> HwmonInfo {
        self.snapshot.hwmon.clone()
    }

    fn processes(&self) -> ProcessInfo {
        self.snapshot.processes.clone()
    }

    fn battery(&self) -> BatteryInfo {
        self.snapshot.battery.clone()
    }

    fn audio(&self) -> AudioInfo {
        self.snapshot.audio.clone()
    }

    fn system(&self) -> SystemInfo {
        self.snapshot.system.clone()
    }
}
