//! Static agent catalog.
//!
//! Loaded once from a JSON document and then queried read-only; callers own
//! the value and pass it where it is needed.
use std::{fs, path::Path};

use bloom_model::{ActionClass, CatalogDocument, ContextKey, FilterAgent, NodeRecord, TriggerAgentSpec};
use tracing::debug;

use crate::{context::classify, error::CoreError};

#[derive(Debug, Clone, Default)]
pub struct AgentCatalog {
    doc: CatalogDocument,
}

impl AgentCatalog {
    /// Read and parse a catalog file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CoreError::CatalogIo {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json(&raw)?;
        debug!(path = %path.display(), agents = catalog.doc.filter_agents.len(), "agent catalog loaded");
        Ok(catalog)
    }

    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        Ok(Self {
            doc: serde_json::from_str(raw)?,
        })
    }

    pub fn document(&self) -> &CatalogDocument {
        &self.doc
    }

    pub fn by_id(&self, id: &str) -> Option<&FilterAgent> {
        self.doc.filter_agents.iter().find(|a| a.id == id)
    }

    /// Filter agent ids in document order.
    pub fn agent_ids(&self) -> Vec<&str> {
        self.doc.filter_agents.iter().map(|a| a.id.as_str()).collect()
    }

    pub fn trigger_agent(&self) -> &TriggerAgentSpec {
        &self.doc.trigger_agent
    }

    /// Narrow `nodes` to what `agent_id` should see for `context_key`.
    ///
    /// An agent restricted by `action_where` sees either all nodes (the key
    /// classifies to that class) or none. Unknown agents, unrestricted agents
    /// and calls without a key see the list unchanged.
    pub fn filter_nodes_for_agent(
        &self,
        nodes: &[NodeRecord],
        agent_id: &str,
        context_key: Option<&ContextKey>,
    ) -> Vec<NodeRecord> {
        let Some(agent) = self.by_id(agent_id) else {
            return nodes.to_vec();
        };
        let (Some(wanted), Some(key)) = (agent.action_where(), context_key) else {
            return nodes.to_vec();
        };

        let class = classify(Some(key));
        if class != ActionClass::Local && class.as_str() == wanted {
            nodes.to_vec()
        } else {
            Vec::new()
        }
    }
}
