use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[cfg(feature = "schema")]
use schemars::JsonSchema;

use crate::error::{ModelError, ModelResult};

/// External surface a context key is routed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum ActionClass {
    /// VCS host: sync helper script.
    Github,
    /// Cluster: connect helper script.
    Hpcc,
    /// Nothing to run.
    Local,
}

impl ActionClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionClass::Github => "github",
            ActionClass::Hpcc => "hpcc",
            ActionClass::Local => "local",
        }
    }
}

impl fmt::Display for ActionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionClass {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "github" => Ok(ActionClass::Github),
            "hpcc" => Ok(ActionClass::Hpcc),
            "local" => Ok(ActionClass::Local),
            other => Err(ModelError::UnknownActionClass(other.to_string())),
        }
    }
}
