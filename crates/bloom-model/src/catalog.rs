use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Static agent catalog document.
///
/// Both members are optional in the source JSON and default to empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default, rename = "blooming_directed_graph_filter_agents")]
    pub filter_agents: Vec<FilterAgent>,
    #[serde(default, rename = "blooming_directed_graph_trigger_process_agent")]
    pub trigger_agent: TriggerAgentSpec,
}

/// One filter agent entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterAgent {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub role: String,
    /// Free-form criteria of any JSON type; only `action_where` is read.
    /// `null` reads as empty.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Map::is_empty"
    )]
    pub filter_criteria: Map<String, Value>,
}

impl FilterAgent {
    /// The `action_where` criterion, if it is a non-empty string.
    pub fn action_where(&self) -> Option<&str> {
        self.filter_criteria
            .get("action_where")
            .and_then(Value::as_str)
            .filter(|w| !w.is_empty())
    }
}

fn null_as_empty<'de, D>(de: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Map<String, Value>>::deserialize(de)?.unwrap_or_default())
}

/// Descriptor of the trigger process agent itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerAgentSpec {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub inputs: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub actions: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_document_with_missing_members() {
        let doc: CatalogDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.filter_agents.is_empty());
        assert_eq!(doc.trigger_agent, TriggerAgentSpec::default());
    }

    #[test]
    fn parses_filter_agents_in_order() {
        let doc: CatalogDocument = serde_json::from_str(
            r#"{
                "blooming_directed_graph_filter_agents": [
                    {"id": "github", "name": "GitHub", "role": "vcs", "filter_criteria": {"action_where": "github"}},
                    {"id": "bash", "name": "Bash", "role": "shell"}
                ],
                "blooming_directed_graph_trigger_process_agent": {
                    "id": "trigger", "name": "Trigger", "inputs": ["cluster", "model"]
                }
            }"#,
        )
        .unwrap();

        let ids: Vec<_> = doc.filter_agents.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, ["github", "bash"]);
        assert_eq!(doc.filter_agents[0].action_where(), Some("github"));
        assert_eq!(doc.filter_agents[1].action_where(), None);
        assert_eq!(doc.trigger_agent.inputs, ["cluster", "model"]);
    }

    #[test]
    fn null_criteria_read_as_empty() {
        let doc: CatalogDocument = serde_json::from_str(
            r#"{"blooming_directed_graph_filter_agents": [{"id": "bash", "filter_criteria": null}]}"#,
        )
        .unwrap();

        assert!(doc.filter_agents[0].filter_criteria.is_empty());
        assert_eq!(doc.filter_agents[0].action_where(), None);
    }

    #[test]
    fn criteria_accept_non_string_values() {
        let doc: CatalogDocument = serde_json::from_str(
            r#"{"blooming_directed_graph_filter_agents": [
                {"id": "lang", "filter_criteria": {"languages": ["rust", "go"], "shell": true, "action_where": "hpcc"}},
                {"id": "odd", "filter_criteria": {"action_where": 7}}
            ]}"#,
        )
        .unwrap();

        let lang = &doc.filter_agents[0];
        assert_eq!(lang.filter_criteria["languages"], serde_json::json!(["rust", "go"]));
        assert_eq!(lang.action_where(), Some("hpcc"));
        assert_eq!(doc.filter_agents[1].action_where(), None);
    }
}
