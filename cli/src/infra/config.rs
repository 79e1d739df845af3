//! Infrastructure implementation of the `ProfileStore` port.

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::application::ports::ProfileStore;
use crate::domain::VmProfile;

/// Reads the VM profile from a YAML file on disk.
///
/// Uses the explicit path when one is given (`--profile` / `JHUB_PROFILE`),
/// otherwise `~/.jhub/profile.yaml`.
pub struct YamlProfileStore {
    explicit: Option<PathBuf>,
}

impl YamlProfileStore {
    #[must_use]
    pub fn new(explicit: Option<PathBuf>) -> Self {
        Self { explicit }
    }
}

impl ProfileStore for YamlProfileStore {
    fn load(&self) -> Result<VmProfile> {
        let path = self.path()?;
        if !path.exists() {
            // An explicitly named profile must exist.
            if self.explicit.is_some() {
                anyhow::bail!("profile {} does not exist", path.display());
            }
            return Ok(VmProfile::default());
        }
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let profile: VmProfile = serde_yaml::from_str(&content)
            .with_context(|| format!("cannot parse {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?profile, "loaded VM profile");
        Ok(profile)
    }

    fn path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.explicit {
            return Ok(path.clone());
        }
        let home =
            dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
        Ok(home.join(".jhub").join("profile.yaml"))
    }
}
