use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Receiving side of a node: the surfaces that need owner/repo coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Receiver {
    Github,
    Hpcc,
}

impl FromStr for Receiver {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s {
            "github" => Ok(Receiver::Github),
            "hpcc" => Ok(Receiver::Hpcc),
            other => Err(ModelError::UnknownReceiver(other.to_string())),
        }
    }
}

impl fmt::Display for Receiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Receiver::Github => "github",
            Receiver::Hpcc => "hpcc",
        })
    }
}

/// Workstation a node list is narrowed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionClient {
    /// Matches node names containing `owner`.
    Macbook,
    /// Matches node names containing `quay`.
    Rockydesktop,
}

impl ActionClient {
    /// Substring a node name must contain for this client.
    pub fn marker(&self) -> &'static str {
        match self {
            ActionClient::Macbook => "owner",
            ActionClient::Rockydesktop => "quay",
        }
    }
}

impl FromStr for ActionClient {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s {
            "macbook" => Ok(ActionClient::Macbook),
            "rockydesktop" => Ok(ActionClient::Rockydesktop),
            other => Err(ModelError::UnknownActionClient(other.to_string())),
        }
    }
}

impl fmt::Display for ActionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ActionClient::Macbook => "macbook",
            ActionClient::Rockydesktop => "rockydesktop",
        })
    }
}
