//! Metric source capability.
//!
//! The engine reads system metrics through [`MetricSource`], a read-only
//! interface returning immutable snapshots for the current sampling instant.
//! Sampling the operating system is left to implementors; this crate ships
//! [`StaticSource`], a snapshot loaded from a YAML or JSON file.

pub mod snapshot;
pub mod types;

pub use snapshot::{MetricSnapshot, StaticSource};
pub use types::{
    AudioInfo, Battery, BatteryInfo, BatteryStatus, CoreInfo, CpuInfo, DiskIoInfo, DiskStats,
    FilesystemInfo, HwmonInfo, InterfaceStats, MemoryInfo, MountStats, NetworkInfo, ProcessInfo,
    ProcessStat, SystemInfo, UptimeInfo,
};

/// Read-only accessors for the current metric snapshot.
///
/// Implementations must not block for long: every directive resolution
/// calls into the source on the caller's thread.
pub trait MetricSource: Send + Sync {
    /// CPU usage and frequencies.
    fn cpu(&self) -> CpuInfo;

    /// Memory and swap usage.
    fn memory(&self) -> MemoryInfo;

    /// Uptime and load averages.
    fn uptime(&self) -> UptimeInfo;

    /// Per-interface network counters and addresses.
    fn network(&self) -> NetworkInfo;

    /// Mounted filesystems keyed by mount point.
    fn filesystems(&self) -> FilesystemInfo;

    /// Per-device disk throughput.
    fn disk_io(&self) -> DiskIoInfo;

    /// Hardware-monitor sensor readings.
    fn hwmon(&self) -> HwmonInfo;

    /// Process counts and ranked process lists.
    fn processes(&self) -> ProcessInfo;

    /// Battery state.
    fn battery(&self) -> BatteryInfo;

    /// Mixer volume and mute state.
    fn audio(&self) -> AudioInfo;

    /// Host identity.
    fn system(&self) -> SystemInfo;
}
