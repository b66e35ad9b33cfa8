//! Device communication — trait + pseudo-file backend.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Control file exposed by the `intel_nuc_led` kernel module.
pub const DEFAULT_DEVICE_PATH: &str = "/proc/acpi/nuc_led";

// ── Error type ──

/// Device communication errors.
///
/// String payloads follow the convention **"context: details"** where *context*
/// names the operation and path, and *details* is the underlying I/O error.
#[derive(Debug)]
pub enum DeviceError {
    NotFound(String),
    PermissionDenied(String),
    ReadFailed(String),
    WriteFailed(String),
}

impl fmt::Display for DeviceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceError::NotFound(path) => {
                write!(f, "LED control file not found: {path} (is nuc_led loaded?)")
            }
            DeviceError::PermissionDenied(path) => {
                write!(f, "Permission denied: {path}")
            }
            DeviceError::ReadFailed(e) => write!(f, "Failed to read device: {e}"),
            DeviceError::WriteFailed(e) => write!(f, "Failed to write device: {e}"),
        }
    }
}

impl std::error::Error for DeviceError {}

pub type Result<T> = std::result::Result<T, DeviceError>;

// ── Trait ──

/// Read/write access to the LED control surface.
pub trait DeviceIo {
    /// Read the full status text.
    fn read_status(&self) -> Result<String>;
    /// Write one command line.
    fn write_command(&self, command: &str) -> Result<()>;
}

impl<T: DeviceIo + ?Sized> DeviceIo for &T {
    fn read_status(&self) -> Result<String> {
        (**self).read_status()
    }

    fn write_command(&self, command: &str) -> Result<()> {
        (**self).write_command(command)
    }
}

// ── Pseudo-file backend ──

/// The kernel driver's control file (or any file standing in for it).
#[derive(Debug, Clone)]
pub struct FileDevice {
    path: PathBuf,
}

impl Default for FileDevice {
    fn default() -> Self {
        Self::new(DEFAULT_DEVICE_PATH)
    }
}

impl FileDevice {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileDevice { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn map_err(&self, e: std::io::Error, other: fn(String) -> DeviceError) -> DeviceError {
        let path = self.path.display().to_string();
        match e.kind() {
            ErrorKind::NotFound => DeviceError::NotFound(path),
            ErrorKind::PermissionDenied => DeviceError::PermissionDenied(path),
            _ => other(format!("{path}: {e}")),
        }
    }
}

impl DeviceIo for FileDevice {
    fn read_status(&self) -> Result<String> {
        log::debug!("reading {}", self.path.display());
        std::fs::read_to_string(&self.path).map_err(|e| self.map_err(e, DeviceError::ReadFailed))
    }

    fn write_command(&self, command: &str) -> Result<()> {
        log::debug!("writing {command:?} to {}", self.path.display());
        std::fs::write(&self.path, command).map_err(|e| self.map_err(e, DeviceError::WriteFailed))
    }
}

// ── Mock device (for testing) ──

pub mod mock {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// In-memory device for tests. `read_status` returns `status`;
    /// every `write_command` is recorded in `writes`.
    pub struct MockDevice {
        /// Text returned by `read_status`.
        pub status: RefCell<String>,
        /// Recorded commands, oldest first.
        pub writes: RefCell<Vec<String>>,
        /// Number of `read_status` calls.
        pub reads: Cell<usize>,
        /// If true, `read_status` returns an error.
        pub fail_read: Cell<bool>,
        /// If true, `write_command` returns an error.
        pub fail_write: Cell<bool>,
    }

    impl Default for MockDevice {
        fn default() -> Self {
            Self::new("")
        }
    }

    impl MockDevice {
        pub fn new(status: &str) -> Self {
            MockDevice {
                status: RefCell::new(status.to_string()),
                writes: RefCell::new(Vec::new()),
                reads: Cell::new(0),
                fail_read: Cell::new(false),
                fail_write: Cell::new(false),
            }
        }

        /// Replace the status text returned by subsequent reads.
        pub fn set_status(&self, status: &str) {
            *self.status.borrow_mut() = status.to_string();
        }

        /// Snapshot of all recorded writes.
        pub fn written(&self) -> Vec<String> {
            self.writes.borrow().clone()
        }
    }

    impl DeviceIo for MockDevice {
        fn read_status(&self) -> Result<String> {
            self.reads.set(self.reads.get() + 1);
            if self.fail_read.get() {
                return Err(DeviceError::ReadFailed("mock: read failure".into()));
            }
            Ok(self.status.borrow().clone())
        }

        fn write_command(&self, command: &str) -> Result<()> {
            if self.fail_write.get() {
                return Err(DeviceError::WriteFailed("mock: write failure".into()));
            }
            self.writes.borrow_mut().push(command.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockDevice;
    use super::*;

    #[test]
    fn file_device_reads_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nuc_led");
        std::fs::write(&path, "Ring LED Brightness: 10%\n").unwrap();

        let dev = FileDevice::new(&path);
        assert_eq!(dev.read_status().unwrap(), "Ring LED Brightness: 10%\n");
    }

    #[test]
    fn file_device_write_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nuc_led");
        std::fs::write(&path, "old status text").unwrap();

        let dev = FileDevice::new(&path);
        dev.write_command("ring,80,none,green").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ring,80,none,green");
    }

    #[test]
    fn file_device_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let dev = FileDevice::new(dir.path().join("absent"));
        let err = dev.read_status().unwrap_err();
        assert!(matches!(err, DeviceError::NotFound(_)));
        assert!(err.to_string().contains("absent"));
    }

    #[test]
    fn file_device_default_path() {
        assert_eq!(FileDevice::default().path(), Path::new(DEFAULT_DEVICE_PATH));
    }

    #[test]
    fn mock_records_writes_in_order() {
        let dev = MockDevice::new("");
        dev.write_command("a").unwrap();
        dev.write_command("b").unwrap();
        assert_eq!(dev.written(), vec!["a", "b"]);
    }

    #[test]
    fn mock_failures() {
        let dev = MockDevice::new("text");
        dev.fail_read.set(true);
        dev.fail_write.set(true);
        assert!(matches!(dev.read_status(), Err(DeviceError::ReadFailed(_))));
        assert!(matches!(
            dev.write_command("x"),
            Err(DeviceError::WriteFailed(_))
        ));
        assert!(dev.written().is_empty());
        assert_eq!(dev.reads.get(), 1);
    }

    #[test]
    fn reference_forwards_to_device() {
        fn roundtrip(io: impl DeviceIo) -> String {
            io.write_command("ring,1,none,off").unwrap();
            io.read_status().unwrap()
        }
        let dev = MockDevice::new("status");
        assert_eq!(roundtrip(&dev), "status");
        assert_eq!(dev.written(), vec!["ring,1,none,off"]);
    }
}
