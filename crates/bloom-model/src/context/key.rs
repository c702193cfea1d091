use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::error::{ModelError, ModelResult};

/// Environment segment of a context key.
///
/// Names read as `<origin>_<target>`: `quay_hpcc` is the quay workstation
/// talking to the cluster, `hpcc_github` is the cluster talking to the VCS host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    OwnerGithub,
    OwnerHpcc,
    QuayHpcc,
    HpccGithub,
    QuayGithub,
}

impl Environment {
    pub const ALL: [Environment; 5] = [
        Environment::OwnerGithub,
        Environment::OwnerHpcc,
        Environment::QuayHpcc,
        Environment::HpccGithub,
        Environment::QuayGithub,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::OwnerGithub => "owner_github",
            Environment::OwnerHpcc => "owner_hpcc",
            Environment::QuayHpcc => "quay_hpcc",
            Environment::HpccGithub => "hpcc_github",
            Environment::QuayGithub => "quay_github",
        }
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::OwnerGithub
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        let norm = s.trim().to_ascii_lowercase();
        Environment::ALL
            .into_iter()
            .find(|env| env.as_str() == norm)
            .ok_or_else(|| ModelError::UnknownEnvironment(s.to_string()))
    }
}

/// Model segment of a context key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum ModelFamily {
    Granite,
    Deepseek,
    Qwen,
    Codellama,
}

impl ModelFamily {
    pub const ALL: [ModelFamily; 4] = [
        ModelFamily::Granite,
        ModelFamily::Deepseek,
        ModelFamily::Qwen,
        ModelFamily::Codellama,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelFamily::Granite => "granite",
            ModelFamily::Deepseek => "deepseek",
            ModelFamily::Qwen => "qwen",
            ModelFamily::Codellama => "codellama",
        }
    }

    /// Case-insensitive lookup that never fails: unknown names map to the
    /// default family.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl Default for ModelFamily {
    fn default() -> Self {
        ModelFamily::Granite
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelFamily {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        let norm = s.to_ascii_lowercase();
        ModelFamily::ALL
            .into_iter()
            .find(|m| m.as_str() == norm)
            .ok_or_else(|| ModelError::UnknownModelFamily(s.to_string()))
    }
}

/// Canonical context key, `"{environment}_{model}"`.
///
/// Derived keys always belong to the closed set of 20 combinations. Keys
/// supplied explicitly by a caller are trusted and kept verbatim, so the
/// wrapped string is not validated against that set.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(transparent)]
pub struct ContextKey(String);

impl ContextKey {
    /// Compose a key from its two segments.
    pub fn compose(env: Environment, model: ModelFamily) -> Self {
        Self(format!("{env}_{model}"))
    }

    /// Wrap a caller-supplied key without validation.
    pub fn explicit(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the key back into its segments, if it is one of the 20 known keys.
    pub fn parts(&self) -> Option<(Environment, ModelFamily)> {
        let (env, model) = self.0.rsplit_once('_')?;
        let env = Environment::ALL.into_iter().find(|e| e.as_str() == env)?;
        let model = ModelFamily::ALL.into_iter().find(|m| m.as_str() == model)?;
        Some((env, model))
    }

    /// `true` if the key belongs to the closed enumeration.
    pub fn is_known(&self) -> bool {
        self.parts().is_some()
    }

    /// Every known key, environment-major.
    pub fn all() -> impl Iterator<Item = ContextKey> {
        Environment::ALL.into_iter().flat_map(|env| {
            ModelFamily::ALL
                .into_iter()
                .map(move |model| ContextKey::compose(env, model))
        })
    }

    /// `true` if the raw key contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.0.contains(needle)
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ContextKey {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for ContextKey {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}
