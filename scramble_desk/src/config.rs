//! Paths, endpoints and policy values, resolved once at startup.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::{DeskError, Result};

pub const APP_NAME: &str = "ScrambleDesk";

const SUBDIRECTORIES: [&str; 5] = ["archive", "avatars", "fonts", "certificates", "templates"];
const UPLOAD_PORT: u16 = 2013;

/// Tunable constants of the progression rules.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Policy {
    /// Share of the preceding round's results that advance, truncated.
    pub advance_fraction: f64,
    /// Opening a group earlier than this before its scheduled start needs a second confirmation.
    pub early_open_threshold_minutes: i64,
    /// Rows on a display sheet are sized for `max(competitors, staff) * multiplier / 2` people.
    pub sheet_row_multiplier: usize,
}

impl Default for Policy {
    fn default() -> Self {
        Policy {
            advance_fraction: 0.75,
            early_open_threshold_minutes: 15,
            sheet_row_multiplier: 2,
        }
    }
}

/// Optional `config.toml` in the data directory.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    registry_url: Option<String>,
    policy: Policy,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    /// Working directory holding the scramble set PDFs and the passcode file.
    pub work_dir: PathBuf,
    pub registry_url: String,
    /// Address of the display server, set once with `--ip` and kept in `ip.txt`.
    pub server_ip: Option<String>,
    pub policy: Policy,
}

impl Config {
    /// Resolves the configuration. CLI values win over `config.toml`, which wins over defaults.
    pub fn load(data_dir: Option<PathBuf>, registry_url: Option<String>) -> Result<Config> {
        let data_dir = data_dir.unwrap_or_else(default_data_dir);
        let file = read_file_config(&data_dir.join("config.toml"))?;
        let server_ip = match fs::read_to_string(data_dir.join("ip.txt")) {
            Ok(ip) if !ip.trim().is_empty() => Some(ip.trim().to_string()),
            Ok(_) => None,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => return Err(err.into()),
        };
        let config = Config {
            data_dir,
            work_dir: PathBuf::from("."),
            registry_url: registry_url
                .or(file.registry_url)
                .unwrap_or_else(|| wca_wcif::WCA_URL.to_string()),
            server_ip,
            policy: file.policy,
        };
        debug!(?config, "configuration resolved");
        Ok(config)
    }

    /// Creates the data directory and its fixed subdirectories.
    pub fn prepare_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        for dir in SUBDIRECTORIES {
            fs::create_dir_all(self.data_dir.join(dir))?;
        }
        Ok(())
    }

    pub fn save_server_ip(&mut self, ip: &str) -> Result<()> {
        fs::write(self.ip_file(), ip.trim())?;
        self.server_ip = Some(ip.trim().to_string());
        Ok(())
    }

    pub fn ip_file(&self) -> PathBuf {
        self.data_dir.join("ip.txt")
    }

    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join("competition.json")
    }

    pub fn archive_dir(&self) -> PathBuf {
        self.data_dir.join("archive")
    }

    pub fn avatar_dir(&self) -> PathBuf {
        self.data_dir.join("avatars")
    }

    /// Converted avatar for a WCA id, falling back to `placeholder.jpg` in the data directory.
    /// `None` when neither file exists.
    pub fn avatar_image(&self, wca_id: Option<&str>) -> Option<PathBuf> {
        let avatar = wca_id.map(|id| self.avatar_dir().join(format!("{id}.jpg")));
        avatar.into_iter()
            .chain(std::iter::once(self.data_dir.join("placeholder.jpg")))
            .find(|path| path.is_file())
    }

    pub fn client_cert(&self) -> PathBuf {
        self.data_dir.join("certificates").join("client.crt")
    }

    pub fn client_key(&self) -> PathBuf {
        self.data_dir.join("certificates").join("client.key")
    }

    pub fn ca_cert(&self) -> PathBuf {
        self.data_dir.join("certificates").join("ca.crt")
    }

    pub fn intermission_template(&self) -> PathBuf {
        self.data_dir.join("templates").join("intermission.pdf")
    }

    /// Decrypted copy of the scramble set currently on display.
    pub fn active_scramble_set(&self) -> PathBuf {
        self.data_dir.join("active.pdf")
    }

    /// The rendered round or hand-in sheet that goes to the competitor list screen.
    pub fn profiles_sheet(&self) -> PathBuf {
        self.data_dir.join("profiles.pdf")
    }

    pub fn scramble_dir(&self, competition_name: &str) -> PathBuf {
        self.work_dir.join(format!("{competition_name} - Computer Display PDFs"))
    }

    pub fn passcode_file(&self, competition_name: &str) -> PathBuf {
        self.work_dir.join(format!("{competition_name} - Computer Display PDF Passcodes - SECRET.txt"))
    }

    pub fn scramble_url(&self) -> Result<String> {
        Ok(format!("https://{}:{}/upload", self.require_ip()?, UPLOAD_PORT))
    }

    pub fn competitor_list_url(&self) -> Result<String> {
        Ok(format!("https://{}:{}/group", self.require_ip()?, UPLOAD_PORT))
    }

    fn require_ip(&self) -> Result<&str> {
        self.server_ip.as_deref()
            .ok_or_else(|| DeskError::Config(format!("no display server address in {}; set one with --ip", self.ip_file().display())))
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_NAME))
        .unwrap_or_else(|| PathBuf::from(APP_NAME))
}

fn read_file_config(path: &Path) -> Result<FileConfig> {
    match fs::read_to_string(path) {
        Ok(text) => toml::from_str(&text)
            .map_err(|err| DeskError::Config(format!("{}: {err}", path.display()))),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(dir.path().to_path_buf()), None).unwrap();
        assert_eq!(config.policy, Policy::default());
        assert_eq!(config.registry_url, wca_wcif::WCA_URL);
        assert!(config.server_ip.is_none());
        assert!(matches!(config.scramble_url(), Err(DeskError::Config(_))));
    }

    #[test]
    fn config_file_and_ip() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "registry_url = \"http://localhost:3000\"\n\n[policy]\nadvance_fraction = 0.5\n").unwrap();
        fs::write(dir.path().join("ip.txt"), "10.0.0.7\n").unwrap();
        let config = Config::load(Some(dir.path().to_path_buf()), None).unwrap();
        assert_eq!(config.registry_url, "http://localhost:3000");
        assert_eq!(config.policy.advance_fraction, 0.5);
        assert_eq!(config.policy.early_open_threshold_minutes, 15);
        assert_eq!(config.scramble_url().unwrap(), "https://10.0.0.7:2013/upload");
        assert_eq!(config.competitor_list_url().unwrap(), "https://10.0.0.7:2013/group");

        let overridden = Config::load(Some(dir.path().to_path_buf()), Some("http://other".into())).unwrap();
        assert_eq!(overridden.registry_url, "http://other");
    }

    #[test]
    fn malformed_config_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("config.toml"), "[policy\n").unwrap();
        assert!(matches!(Config::load(Some(dir.path().to_path_buf()), None), Err(DeskError::Config(_))));
    }

    #[test]
    fn prepare_and_store_ip() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::load(Some(dir.path().join("desk")), None).unwrap();
        config.prepare_dirs().unwrap();
        assert!(config.avatar_dir().is_dir());
        assert!(config.archive_dir().is_dir());
        config.save_server_ip(" 192.168.1.20 ").unwrap();
        let reloaded = Config::load(Some(dir.path().join("desk")), None).unwrap();
        assert_eq!(reloaded.server_ip.as_deref(), Some("192.168.1.20"));
    }

    #[test]
    fn avatar_falls_back_to_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(dir.path().to_path_buf()), None).unwrap();
        config.prepare_dirs().unwrap();
        assert_eq!(config.avatar_image(Some("2019ANDE01")), None);

        fs::write(dir.path().join("placeholder.jpg"), b"jpeg").unwrap();
        assert_eq!(config.avatar_image(Some("2019ANDE01")), Some(dir.path().join("placeholder.jpg")));
        assert_eq!(config.avatar_image(None), Some(dir.path().join("placeholder.jpg")));

        fs::write(config.avatar_dir().join("2019ANDE01.jpg"), b"jpeg").unwrap();
        assert_eq!(config.avatar_image(Some("2019ANDE01")), Some(config.avatar_dir().join("2019ANDE01.jpg")));
    }

    #[test]
    fn scramble_paths_follow_competition_name() {
        let config = Config::load(Some(PathBuf::from("/nonexistent/desk")), None).unwrap();
        assert_eq!(config.scramble_dir("Nordic Open 2024"), PathBuf::from("./Nordic Open 2024 - Computer Display PDFs"));
        assert_eq!(config.passcode_file("Nordic Open 2024"), PathBuf::from("./Nordic Open 2024 - Computer Display PDF Passcodes - SECRET.txt"));
    }
}
