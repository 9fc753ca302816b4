//! Disk quota
//!
//! Reports total/used/free space for the filesystem holding a user directory
//! and flags usage above the configured percentage.

use log::{info, warn};
use nix::sys::statvfs::{Statvfs, statvfs};
use std::path::{Path, PathBuf};

use crate::error::FileManagerError;
use crate::storage::validation::validate_name;

/// Raw space figures for one filesystem, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiskUsage {
    pub total: u64,
    pub used: u64,
    pub free: u64,
}

/// Source of disk usage figures, mockable in tests
pub trait DiskUsageProbe {
    fn usage(&self, path: &Path) -> Result<DiskUsage, FileManagerError>;
}

/// Probe backed by `statvfs(2)` on the path itself, so the figures belong to
/// whichever filesystem actually holds it.
///
/// `used` counts blocks in use (`f_blocks - f_bfree`); `free` is what an
/// unprivileged user can still allocate (`f_bavail`). Reserved blocks fall in
/// neither.
#[derive(Debug, Default)]
pub struct SystemDiskProbe;

impl DiskUsageProbe for SystemDiskProbe {
    fn usage(&self, path: &Path) -> Result<DiskUsage, FileManagerError> {
        let stat = statvfs(path).map_err(|errno| {
            FileManagerError::from_io(std::io::Error::from(errno), &path.to_string_lossy())
        })?;
        Ok(usage_from_statvfs(&stat))
    }
}

fn usage_from_statvfs(stat: &Statvfs) -> DiskUsage {
    let fragment = u64::from(stat.fragment_size());
    let blocks = u64::from(stat.blocks());
    let blocks_free = u64::from(stat.blocks_free());
    let blocks_available = u64::from(stat.blocks_available());

    DiskUsage {
        total: blocks.saturating_mul(fragment),
        used: blocks.saturating_sub(blocks_free).saturating_mul(fragment),
        free: blocks_available.saturating_mul(fragment),
    }
}

/// Quota check outcome for one user directory
#[derive(Debug, Clone)]
pub struct QuotaReport {
    pub username: String,
    pub path: PathBuf,
    pub usage: DiskUsage,
    pub warn_percent: u8,
}

impl QuotaReport {
    /// True when used space is strictly above `warn_percent` of total.
    pub fn is_near_limit(&self) -> bool {
        exceeds_threshold(self.usage, self.warn_percent)
    }
}

/// `used / total > percent / 100`, computed without floating point.
pub fn exceeds_threshold(usage: DiskUsage, percent: u8) -> bool {
    u128::from(usage.used) * 100 > u128::from(usage.total) * u128::from(percent)
}

/// Queries usage for the filesystem holding `<root>/<username>`.
pub fn check_quota(
    root: &Path,
    username: &str,
    warn_percent: u8,
    probe: &dyn DiskUsageProbe,
) -> Result<QuotaReport, FileManagerError> {
    validate_name(username)?;
    let path = root.join(username);
    if !path.is_dir() {
        return Err(FileManagerError::NotFound(username.into()));
    }

    let usage = probe.usage(&path)?;
    let report = QuotaReport {
        username: username.into(),
        path,
        usage,
        warn_percent,
    };

    if report.is_near_limit() {
        warn!(
            "User '{}' is above {}% disk usage ({} of {} bytes)",
            username, warn_percent, usage.used, usage.total
        );
    } else {
        info!(
            "Quota for '{}': {} used of {} bytes",
            username, usage.used, usage.total
        );
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use std::fs;
    use tempfile::TempDir;

    struct FixedProbe(DiskUsage);

    impl DiskUsageProbe for FixedProbe {
        fn usage(&self, _path: &Path) -> Result<DiskUsage, FileManagerError> {
            Ok(self.0)
        }
    }

    fn usage(total: u64, used: u64) -> DiskUsage {
        DiskUsage {
            total,
            used,
            free: total - used,
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        assert!(!exceeds_threshold(usage(1000, 899), 90));
        assert!(!exceeds_threshold(usage(1000, 900), 90));
        assert!(exceeds_threshold(usage(1000, 901), 90));
        assert!(exceeds_threshold(usage(u64::MAX, u64::MAX), 90));
        assert!(!exceeds_threshold(usage(0, 0), 90));
    }

    #[test]
    fn test_check_quota_warns_above_threshold() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("alice")).unwrap();

        let report =
            check_quota(dir.path(), "alice", 90, &FixedProbe(usage(100, 95))).unwrap();
        assert!(report.is_near_limit());
        assert_eq!(report.usage.free, 5);

        let report =
            check_quota(dir.path(), "alice", 90, &FixedProbe(usage(100, 90))).unwrap();
        assert!(!report.is_near_limit());
    }

    #[test]
    fn test_check_quota_missing_user() {
        let dir = TempDir::new().unwrap();
        let err = check_quota(dir.path(), "ghost", 90, &FixedProbe(usage(1, 0))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_system_disk_usage_matches_statvfs() {
        let dir = TempDir::new().unwrap();
        let found = SystemDiskProbe.usage(dir.path()).unwrap();
        let stat = statvfs(dir.path()).unwrap();
        let fragment = u64::from(stat.fragment_size());

        assert_eq!(found.total, u64::from(stat.blocks()) * fragment);
        assert!(found.used <= found.total);
        assert!(found.used + found.free <= found.total);
    }

    #[test]
    fn test_system_disk_usage_missing_path() {
        let dir = TempDir::new().unwrap();
        let err = SystemDiskProbe.usage(&dir.path().join("absent")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
