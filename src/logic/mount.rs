//! Storage roots
//!
//! Detects the mount points offered as top-level locations in the root view,
//! and drops duplicates of one physical volume exposed under several paths.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::io;
use std::path::{Path, PathBuf};

use crate::config::MountConfig;
use crate::log_debug;

/// Environment variables that may carry colon-separated storage roots
pub const STORAGE_ENV_VARS: &[&str] = &[
    "EXTERNAL_STORAGE",
    "SECONDARY_STORAGE",
    "EXTERNAL_SDCARD_STORAGE",
    "EXTERNAL_SD_STORAGE",
    "EXTERNAL_STORAGE_DOCOMO",
];

/// One candidate storage root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountPoint {
    /// Label shown in the root view
    pub title: String,
    pub root: PathBuf,
    pub fs_type: String,
}

impl MountPoint {
    pub fn new(title: impl Into<String>, root: impl Into<PathBuf>, fs_type: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            root: root.into(),
            fs_type: fs_type.into(),
        }
    }

    /// Mount point titled by its own path
    pub fn from_path(root: impl Into<PathBuf>, fs_type: impl Into<String>) -> Self {
        let root = root.into();
        Self {
            title: root.display().to_string(),
            root,
            fs_type: fs_type.into(),
        }
    }
}

/// Capacity figures for the volume holding a path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VolumeSpace {
    pub total: u64,
    pub usable: u64,
}

/// Source of volume capacity figures
pub trait SpaceProbe {
    fn space(&self, path: &Path) -> io::Result<VolumeSpace>;
}

/// `statvfs(3)` backed probe
#[derive(Debug, Clone, Copy, Default)]
pub struct StatVfsProbe;

#[cfg(unix)]
impl SpaceProbe for StatVfsProbe {
    fn space(&self, path: &Path) -> io::Result<VolumeSpace> {
        use std::ffi::CString;
        use std::os::unix::ffi::OsStrExt;

        let c_path = CString::new(path.as_os_str().as_bytes())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        // SAFETY: statvfs only writes into the zeroed struct we pass
        let mut stat: libc::statvfs = unsafe { std::mem::zeroed() };
        let rc = unsafe { libc::statvfs(c_path.as_ptr(), &mut stat) };
        if rc != 0 {
            return Err(io::Error::last_os_error());
        }
        let frsize = stat.f_frsize as u64;
        Ok(VolumeSpace {
            total: stat.f_blocks as u64 * frsize,
            usable: stat.f_bavail as u64 * frsize,
        })
    }
}

#[cfg(not(unix))]
impl SpaceProbe for StatVfsProbe {
    fn space(&self, _path: &Path) -> io::Result<VolumeSpace> {
        Err(io::Error::new(io::ErrorKind::Unsupported, "statvfs unavailable"))
    }
}

/// Parse one `/proc/mounts` line into (mount point, fs type).
///
/// Octal escapes the kernel uses for blanks in paths (`\040`) are decoded.
pub fn parse_mount_line(line: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() < 3 {
        return None;
    }
    Some((unescape_mount_path(parts[1]), parts[2].to_string()))
}

fn unescape_mount_path(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() {
            let digits = &bytes[i + 1..i + 4];
            if digits.iter().all(|b| (b'0'..=b'7').contains(b)) {
                let value = digits
                    .iter()
                    .fold(0u32, |acc, b| acc * 8 + u32::from(b - b'0'));
                if let Ok(value) = u8::try_from(value) {
                    out.push(value);
                    i += 4;
                    continue;
                }
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// FUSE-style filesystems backing emulated/shared storage
pub fn is_emulated(fs_type: &str) -> bool {
    fs_type == "sdcardfs" || fs_type == "fuse"
}

/// Whether a mount line describes a user-facing storage root
pub fn is_accepted(mount_point: &str, fs_type: &str, config: &MountConfig) -> bool {
    if !config.fs_types.iter().any(|t| t == fs_type) {
        return false;
    }
    if config
        .excluded_prefixes
        .iter()
        .any(|prefix| mount_point.starts_with(prefix.as_str()))
    {
        return false;
    }
    !(mount_point.ends_with("/legacy") && is_emulated(fs_type))
}

/// Roots listed in the storage environment variables, in variable order
pub fn env_roots<F>(lookup: F) -> Vec<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    STORAGE_ENV_VARS
        .iter()
        .filter_map(|var| lookup(var))
        .flat_map(|value| {
            value
                .split(':')
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Heuristic fingerprint of a storage root: total and usable space plus the
/// names of its children (and sizes of child files). Two paths exposing the
/// same volume produce the same value; unrelated but identical-looking
/// folders can collide.
pub fn calc_hash(path: &Path, probe: &dyn SpaceProbe) -> u64 {
    let space = probe.space(path).unwrap_or_default();
    let mut signature = format!("{}{}", space.total, space.usable);

    if let Ok(read) = std::fs::read_dir(path) {
        let mut children: Vec<(String, Option<u64>)> = read
            .filter_map(|e| e.ok())
            .map(|e| {
                let name = e.file_name().to_string_lossy().into_owned();
                let size = e
                    .metadata()
                    .ok()
                    .filter(|m| m.is_file())
                    .map(|m| m.len());
                (name, size)
            })
            .collect();
        // read_dir order is filesystem-defined
        children.sort();
        for (name, size) in children {
            signature.push_str(&name);
            if let Some(size) = size {
                signature.push_str(&size.to_string());
            }
        }
    }

    let mut hasher = DefaultHasher::new();
    signature.hash(&mut hasher);
    hasher.finish()
}

/// Drop mount points whose fingerprint matches an earlier one (first seen wins)
pub fn dedupe_mount_points(points: Vec<MountPoint>, probe: &dyn SpaceProbe) -> Vec<MountPoint> {
    let mut seen_paths = HashSet::new();
    let mut seen_hashes = HashSet::new();
    let mut out = Vec::with_capacity(points.len());

    for point in points {
        if !seen_paths.insert(point.root.clone()) {
            continue;
        }
        let hash = calc_hash(&point.root, probe);
        if seen_hashes.insert(hash) {
            out.push(point);
        } else {
            log_debug(&format!(
                "dedupe_mount_points: {} duplicates an earlier root",
                point.root.display()
            ));
        }
    }
    out
}

/// Whether `path` is usable as a writable directory, creating it if missing
pub fn check_write_mount_point(path: &Path) -> bool {
    if path.is_dir() {
        return crate::storage::is_path_writable(path);
    }
    std::fs::create_dir(path).is_ok()
}

/// The storage roots of one picker session, computed once at construction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageRoots {
    roots: Vec<MountPoint>,
}

impl StorageRoots {
    pub fn from_points(points: Vec<MountPoint>) -> Self {
        Self { roots: points }
    }

    /// Enumerate roots: the home directory first, then accepted entries of
    /// the mount table, then environment roots; missing paths are skipped and
    /// duplicates of one volume collapsed.
    pub fn discover(config: &MountConfig, probe: &dyn SpaceProbe) -> Self {
        let mut candidates = Vec::new();

        if let Some(home) = dirs::home_dir() {
            candidates.push(MountPoint::new(config.home_title.clone(), home, ""));
        }

        match std::fs::read_to_string(&config.mount_table) {
            Ok(table) => {
                for line in table.lines() {
                    let (mount_point, fs_type) = match parse_mount_line(line) {
                        Some(parsed) => parsed,
                        None => continue,
                    };
                    if is_accepted(&mount_point, &fs_type, config) {
                        candidates.push(MountPoint::from_path(mount_point, fs_type));
                    }
                }
            }
            Err(e) => log_debug(&format!(
                "StorageRoots::discover: cannot read {}: {}",
                config.mount_table.display(),
                e
            )),
        }

        for root in env_roots(|var| std::env::var(var).ok()) {
            candidates.push(MountPoint::from_path(root, ""));
        }

        candidates.retain(|p| p.root.is_dir());
        let roots = dedupe_mount_points(candidates, probe);
        log_debug(&format!("StorageRoots::discover: {} roots", roots.len()));
        Self { roots }
    }

    pub fn roots(&self) -> &[MountPoint] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mount_line() {
        let line = "/dev/sdb1 /media/usb vfat rw,nosuid 0 0";
        assert_eq!(
            parse_mount_line(line),
            Some(("/media/usb".to_string(), "vfat".to_string()))
        );
        assert_eq!(parse_mount_line("garbage"), None);
    }

    #[test]
    fn test_parse_mount_line_decodes_spaces() {
        let line = "/dev/sdc1 /media/me/My\\040Disk exfat rw 0 0";
        assert_eq!(
            parse_mount_line(line).unwrap().0,
            "/media/me/My Disk".to_string()
        );
    }

    #[test]
    fn test_is_accepted_rules() {
        let config = MountConfig::default();
        assert!(is_accepted("/media/usb", "vfat", &config));
        assert!(!is_accepted("/proc", "proc", &config));
        assert!(!is_accepted("/mnt/asec/app", "vfat", &config));
        assert!(!is_accepted("/storage/emulated/legacy", "fuse", &config));
        assert!(is_accepted("/storage/emulated/0", "fuse", &config));
    }

    #[test]
    fn test_env_roots_split_on_colon() {
        let roots = env_roots(|var| match var {
            "EXTERNAL_STORAGE" => Some("/sdcard".to_string()),
            "SECONDARY_STORAGE" => Some("/ext1:/ext2:".to_string()),
            _ => None,
        });
        assert_eq!(
            roots,
            vec![
                PathBuf::from("/sdcard"),
                PathBuf::from("/ext1"),
                PathBuf::from("/ext2")
            ]
        );
    }

    #[test]
    fn test_check_write_mount_point_creates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("appdir");
        assert!(check_write_mount_point(&target));
        assert!(target.is_dir());
    }
}
