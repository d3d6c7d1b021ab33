use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::logic::listing::ListingOptions;
use crate::model::session::SessionOptions;
use crate::model::types::SelectMode;
use crate::SortMode;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub vim_mode: bool,
    pub icon_mode: String,
    pub mode: SelectMode,
    /// Allowed file name suffixes, e.g. [".txt", ".csv"]
    pub extension_filter: Vec<String>,
    /// Suffix -> icon name, checked in file order
    pub icon_map: IndexMap<String, String>,
    /// Show size and modification date next to each entry
    pub show_metadata: bool,
    /// Allow browsing into sub-directories
    pub explore: bool,
    /// Folder selection must be writable
    pub require_writable: bool,
    pub sort_mode: SortMode,
    pub sort_reverse: bool,
    /// zenity-compatible program used for the system picker
    pub picker_command: String,
    /// MIME types passed to the system picker
    pub mime_types: Vec<String>,
    /// Settings database location (defaults to the platform data dir)
    pub settings_db: Option<PathBuf>,
    pub mounts: MountConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vim_mode: false,
            icon_mode: default_icon_mode(),
            mode: SelectMode::OpenFile,
            extension_filter: Vec::new(),
            icon_map: IndexMap::new(),
            show_metadata: false,
            explore: true,
            require_writable: false,
            sort_mode: SortMode::Alphabetical,
            sort_reverse: false,
            picker_command: "zenity".to_string(),
            mime_types: Vec::new(),
            settings_db: None,
            mounts: MountConfig::default(),
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_icon_mode() -> String {
    "emoji".to_string()
}

/// Storage root detection settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MountConfig {
    /// Mount table to scan
    pub mount_table: PathBuf,
    /// Filesystem types offered as roots
    pub fs_types: Vec<String>,
    /// Mount paths never offered as roots
    pub excluded_prefixes: Vec<String>,
    /// Title of the home directory root
    pub home_title: String,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            mount_table: PathBuf::from("/proc/mounts"),
            fs_types: strings(&[
                "vfat", "tntfs", "exfat", "texfat", "sdcardfs", "fuse", "fuseblk", "ntfs",
                "ntfs3", "ext4", "btrfs", "xfs",
            ]),
            excluded_prefixes: strings(&[
                "/mnt/asec",
                "/firmware",
                "/mnt/secure",
                "/data/mac",
                "/boot",
                "/snap",
                "/var/lib/docker",
            ]),
            home_title: "Home".to_string(),
        }
    }
}

impl Config {
    /// Load config from `cli_path`, `<config dir>/filepick/config.yaml` or
    /// `./config.yaml`. Defaults are used when no file exists, but an
    /// explicit path that does not exist is an error.
    pub fn load(cli_path: Option<&str>) -> Result<(Self, Option<PathBuf>)> {
        match find_config_path(cli_path)? {
            Some(path) => {
                let config = Self::from_file(&path)?;
                Ok((config, Some(path)))
            }
            None => Ok((Self::default(), None)),
        }
    }

    pub fn listing_options(&self) -> ListingOptions {
        ListingOptions {
            extension_filter: self.extension_filter.clone(),
            icon_map: self.icon_map.clone(),
            include_metadata: self.show_metadata,
            explore: self.explore,
            sort_mode: self.sort_mode,
            reverse: self.sort_reverse,
            comparator: None,
        }
    }

    pub fn session_options(&self, suggested_name: Option<String>) -> SessionOptions {
        SessionOptions {
            mode: self.mode,
            listing: self.listing_options(),
            require_writable: self.require_writable,
            suggested_name,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }
}

fn find_config_path(cli_path: Option<&str>) -> Result<Option<PathBuf>> {
    if let Some(path) = cli_path {
        let p = PathBuf::from(path);
        if p.exists() {
            return Ok(Some(p));
        }
        anyhow::bail!("Config file not found at specified path: {}", path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("filepick").join("config.yaml");
        if config_path.exists() {
            return Ok(Some(config_path));
        }
    }

    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(Some(local_config));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let config = Config::from_yaml("").unwrap();
        assert!(config.explore);
        assert_eq!(config.picker_command, "zenity");
        assert_eq!(config.mode, SelectMode::OpenFile);
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let yaml = r#"
mode: save_file
extension_filter: [".csv"]
show_metadata: true
sort_mode: file_size
icon_map:
  ".tar.gz": tarball
  ".gz": archive
"#;
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.mode, SelectMode::SaveFile);
        assert_eq!(config.extension_filter, vec![".csv".to_string()]);
        assert!(config.show_metadata);
        assert_eq!(config.sort_mode, SortMode::FileSize);
        let keys: Vec<&str> = config.icon_map.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec![".tar.gz", ".gz"]);
        assert_eq!(config.mounts.mount_table, PathBuf::from("/proc/mounts"));
    }

    #[test]
    fn test_missing_explicit_path_is_error() {
        assert!(Config::load(Some("/definitely/not/here.yaml")).is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "vim_mode: true\n").unwrap();
        let (config, found) = Config::load(Some(path.to_str().unwrap())).unwrap();
        assert!(config.vim_mode);
        assert_eq!(found, Some(path));
    }
}
