// crates/clipforge-server/src/config.rs
//
// Process-wide configuration, loaded once at startup. TOML file path comes
// from CLIPFORGE_CONFIG; every field has a default so the service runs with
// no file at all.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use clipforge_core::EditLimits;

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding uploaded media, one file per storage_id.
    pub storage_dir: PathBuf,
    pub limits: EditLimits,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_addr:   SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 5050),
            storage_dir: PathBuf::from("./storage"),
            limits:      EditLimits::default(),
        }
    }
}

impl ServiceConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Config from CLIPFORGE_CONFIG when set, defaults otherwise.
    pub fn from_env() -> anyhow::Result<Self> {
        match std::env::var_os("CLIPFORGE_CONFIG") {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg: ServiceConfig = toml::from_str(
            r#"
            bind_addr = "0.0.0.0:8080"

            [limits]
            allow_interpolation = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.bind_addr.port(), 8080);
        assert_eq!(cfg.storage_dir, PathBuf::from("./storage"));
        assert!(!cfg.limits.allow_interpolation);
        assert_eq!(cfg.limits.max_video_width, 4096);
    }

    #[test]
    fn empty_input_is_all_defaults() {
        let cfg: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.bind_addr, "127.0.0.1:5050".parse().unwrap());
        assert_eq!(cfg.limits.min_crop_width, 100);
    }
}
