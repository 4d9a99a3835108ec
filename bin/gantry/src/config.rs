//! The gantry configuration file: user keys plus the channels the user works
//! with, keyed by alias.
//!
//! ```yaml
//! version: "1"
//! user:
//!   private-key: "9d61..."
//!   public-key: "d75a..."
//!   active-channel: counter
//! channels:
//!   - channel:
//!       channel-url: http://localhost:6299
//!       channel-id: "2f98..."
//!       channel-alias: counter
//! ```

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = ".gantry/config.yaml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Configuration {
    #[serde(default)]
    pub version: String,
    pub user: Option<UserConfig>,
    #[serde(default)]
    pub channels: Vec<ChannelEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UserConfig {
    pub private_key: String,
    pub public_key: String,
    pub active_channel: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelEntry {
    pub channel: ChannelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ChannelConfig {
    pub channel_url: Url,
    pub channel_id: String,
    pub channel_alias: String,
}

impl Configuration {
    /// Loads the configuration from `path`, or from `$HOME/.gantry/config.yaml`
    /// when no path is given. A missing default file yields an empty
    /// configuration; an explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = Self::default_path()?;
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration at {}", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("malformed configuration at {}", path.display()))
    }

    pub fn default_path() -> Result<PathBuf> {
        let home = std::env::var_os("HOME").context("HOME is not set")?;
        Ok(PathBuf::from(home).join(DEFAULT_CONFIG_PATH))
    }

    /// The channel whose alias matches the user's `active-channel`.
    pub fn active_channel(&self) -> Result<&ChannelConfig> {
        let user = self.user.as_ref().context("no user configured")?;
        self.channels
            .iter()
            .map(|entry| &entry.channel)
            .find(|channel| channel.channel_alias == user.active_channel)
            .ok_or_else(|| anyhow!("no channel with alias `{}` configured", user.active_channel))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const CONFIG: &str = r#"
version: "1"
user:
  private-key: "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60"
  public-key: "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
  active-channel: counter
channels:
  - channel:
      channel-url: http://localhost:6299
      channel-id: "2f98f46f6b0d0a9b6a87361f0b0a3d151e6c3b7df383915e0fbbd13d722836d5"
      channel-alias: counter
  - channel:
      channel-url: http://localhost:6300
      channel-id: "3b1c43a6c43bb1005f5ea2059b6a592ee086c4cedb9e25d87c0b8b975e47b245"
      channel-alias: staging
"#;

    #[test]
    fn active_channel_is_resolved_by_alias() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(CONFIG.as_bytes()).unwrap();

        let config = Configuration::from_file(file.path()).unwrap();
        let channel = config.active_channel().unwrap();

        assert_eq!(channel.channel_alias, "counter");
        assert_eq!(channel.channel_url.as_str(), "http://localhost:6299/");
    }

    #[test]
    fn unknown_active_alias_is_an_error() {
        let mut config: Configuration = serde_yaml::from_str(CONFIG).unwrap();
        config.user.as_mut().unwrap().active_channel = "missing".to_string();

        let err = config.active_channel().unwrap_err();
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn missing_user_is_an_error() {
        let config = Configuration::default();
        assert!(config.active_channel().is_err());
    }
}
