//! Module `manager`
//!
//! `FileManager` is the facade the shell talks to: one method per command,
//! each returning a typed result or a `FileManagerError`. Nothing here prints.

use std::path::Path;

use crate::config::{AppConfig, DEFAULT_QUOTA_WARN_PERCENT};
use crate::error::FileManagerError;
use crate::navigate::{self, CwdResult};
use crate::session::Session;
use crate::storage::quota::{self, DiskUsageProbe, QuotaReport, SystemDiskProbe};
use crate::storage::results::{
    ArchiveResult, DirectoryResult, ExtractResult, FileResult, ListResult, ReadResult,
    TransferResult, UserDirResult, WriteResult,
};
use crate::storage::{archive, operations};

/// File operations confined to one work root.
pub struct FileManager {
    session: Session,
    quota_warn_percent: u8,
    probe: Box<dyn DiskUsageProbe>,
}

impl FileManager {
    /// Builds a manager from loaded configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, FileManagerError> {
        let mut manager = Self::open(&config.work_dir)?;
        manager.quota_warn_percent = config.quota_warn_percent;
        Ok(manager)
    }

    /// Opens a manager on `work_root` with default settings.
    pub fn open(work_root: &Path) -> Result<Self, FileManagerError> {
        Ok(Self {
            session: Session::open(work_root)?,
            quota_warn_percent: DEFAULT_QUOTA_WARN_PERCENT,
            probe: Box::new(SystemDiskProbe),
        })
    }

    /// Replaces the disk usage source used by [`FileManager::disk_quota`].
    pub fn with_probe(mut self, probe: Box<dyn DiskUsageProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn work_root(&self) -> &Path {
        self.session.work_root()
    }

    pub fn current_dir(&self) -> &Path {
        self.session.current_dir()
    }

    /// Containment check for `candidate` resolved against the current directory.
    pub fn is_within_root(&self, candidate: &str) -> bool {
        crate::storage::is_within_root(self.work_root(), self.current_dir(), Path::new(candidate))
    }

    pub fn create_directory(&self, dir_name: &str) -> Result<DirectoryResult, FileManagerError> {
        operations::create_directory(self.work_root(), self.current_dir(), dir_name)
    }

    pub fn delete_directory(&self, dir_name: &str) -> Result<DirectoryResult, FileManagerError> {
        operations::delete_directory(self.work_root(), self.current_dir(), dir_name)
    }

    pub fn list_directory(&self) -> Result<ListResult, FileManagerError> {
        navigate::list_directory(self.current_dir())
    }

    /// Moves the session's current directory; the process cwd is untouched.
    pub fn change_directory(&mut self, dir_name: &str) -> Result<CwdResult, FileManagerError> {
        let result = navigate::change_directory(self.work_root(), self.current_dir(), dir_name)?;
        self.session.set_current_dir(result.new_path.clone());
        Ok(result)
    }

    pub fn create_file(&self, file_name: &str) -> Result<FileResult, FileManagerError> {
        operations::create_file(self.work_root(), self.current_dir(), file_name)
    }

    pub fn read_file(&self, file_name: &str) -> Result<ReadResult, FileManagerError> {
        operations::read_file(self.work_root(), self.current_dir(), file_name)
    }

    pub fn write_file(
        &self,
        file_name: &str,
        content: &str,
    ) -> Result<WriteResult, FileManagerError> {
        operations::write_file(self.work_root(), self.current_dir(), file_name, content)
    }

    pub fn delete_file(&self, file_name: &str) -> Result<FileResult, FileManagerError> {
        operations::delete_file(self.work_root(), self.current_dir(), file_name)
    }

    pub fn copy_file(&self, src: &str, dest: &str) -> Result<TransferResult, FileManagerError> {
        operations::copy_file(self.work_root(), self.current_dir(), src, dest)
    }

    pub fn move_file(&self, src: &str, dest: &str) -> Result<TransferResult, FileManagerError> {
        operations::move_file(self.work_root(), self.current_dir(), src, dest)
    }

    pub fn rename_file(
        &self,
        old_name: &str,
        new_name: &str,
    ) -> Result<TransferResult, FileManagerError> {
        operations::rename_file(self.work_root(), self.current_dir(), old_name, new_name)
    }

    /// Creates `<work_root>/<username>` unless it already exists.
    pub fn ensure_user_directory(&self, username: &str) -> Result<UserDirResult, FileManagerError> {
        operations::ensure_user_directory(self.work_root(), username)
    }

    pub fn create_archive(&self, src: &str, dest: &str) -> Result<ArchiveResult, FileManagerError> {
        archive::create_archive(self.work_root(), self.current_dir(), src, dest)
    }

    pub fn extract_archive(
        &self,
        src: &str,
        dest: &str,
    ) -> Result<ExtractResult, FileManagerError> {
        archive::extract_archive(self.work_root(), self.current_dir(), src, dest)
    }

    pub fn disk_quota(&self, username: &str) -> Result<QuotaReport, FileManagerError> {
        quota::check_quota(
            self.work_root(),
            username,
            self.quota_warn_percent,
            self.probe.as_ref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::storage::quota::DiskUsage;
    use std::fs;
    use tempfile::TempDir;

    struct FullDisk;

    impl DiskUsageProbe for FullDisk {
        fn usage(&self, _path: &Path) -> Result<DiskUsage, FileManagerError> {
            Ok(DiskUsage {
                total: 1000,
                used: 950,
                free: 50,
            })
        }
    }

    #[test]
    fn test_change_directory_threads_through_later_calls() {
        let dir = TempDir::new().unwrap();
        let mut manager = FileManager::open(&dir.path().join("work")).unwrap();
        let process_cwd = std::env::current_dir().unwrap();

        manager.create_directory("alpha").unwrap();
        manager.change_directory("alpha").unwrap();
        manager.create_file("inside.txt").unwrap();

        assert!(manager.work_root().join("alpha/inside.txt").is_file());
        assert_eq!(manager.list_directory().unwrap().names(), vec!["inside.txt"]);
        assert_eq!(std::env::current_dir().unwrap(), process_cwd);
    }

    #[test]
    fn test_user_directory_is_under_root_regardless_of_cwd() {
        let dir = TempDir::new().unwrap();
        let mut manager = FileManager::open(&dir.path().join("work")).unwrap();
        manager.create_directory("nested").unwrap();
        manager.change_directory("nested").unwrap();

        let result = manager.ensure_user_directory("bob").unwrap();
        assert_eq!(result.path, manager.work_root().join("bob"));
    }

    #[test]
    fn test_disk_quota_uses_injected_probe() {
        let dir = TempDir::new().unwrap();
        let manager = FileManager::open(&dir.path().join("work"))
            .unwrap()
            .with_probe(Box::new(FullDisk));

        manager.ensure_user_directory("carol").unwrap();
        let report = manager.disk_quota("carol").unwrap();
        assert!(report.is_near_limit());
        assert_eq!(report.warn_percent, DEFAULT_QUOTA_WARN_PERCENT);

        let err = manager.disk_quota("nobody").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_is_within_root_follows_current_dir() {
        let dir = TempDir::new().unwrap();
        let mut manager = FileManager::open(&dir.path().join("work")).unwrap();
        fs::create_dir(manager.work_root().join("sub")).unwrap();

        assert!(!manager.is_within_root(".."));
        manager.change_directory("sub").unwrap();
        assert!(manager.is_within_root(".."));
        assert!(!manager.is_within_root("../.."));
    }
}
