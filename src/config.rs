use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Result, ToolError};

/// Default location of the user mapping file.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Maps Plane user identifiers to the email addresses Linear expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct IdentityMap {
    users: HashMap<String, String>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the mapped email for `identifier`, or `identifier` itself when
    /// no mapping exists. A mapping to an empty string counts as no mapping.
    pub fn resolve<'a>(&'a self, identifier: &'a str) -> &'a str {
        self.users
            .get(identifier)
            .map(String::as_str)
            .filter(|email| !email.is_empty())
            .unwrap_or(identifier)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for IdentityMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            users: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    users: IdentityMap,
}

/// Loads the identity map from `path`.
///
/// A missing file is not an error: a warning is logged and an empty map is
/// returned. A file that exists but does not parse is fatal.
pub fn load_identity_map(path: &Path) -> Result<IdentityMap> {
    if !path.exists() {
        warn!(
            config = %path.display(),
            "Config file {} not found. Proceeding with empty user mappings.",
            path.display()
        );
        return Ok(IdentityMap::new());
    }

    let raw = fs::read_to_string(path)?;
    parse_identity_map(&raw).map_err(|source| ToolError::Config {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses the JSON body of a config file. An absent `users` key yields an
/// empty map.
pub fn parse_identity_map(raw: &str) -> std::result::Result<IdentityMap, serde_json::Error> {
    let config: ConfigFile = serde_json::from_str(raw)?;
    debug!(user_count = config.users.len(), "loaded user mappings");
    Ok(config.users)
}
