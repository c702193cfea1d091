//! Node list filters.
//!
//! Every filter keeps the relative order of surviving nodes and is idempotent.
//! Dimension values that are not recognised leave the list untouched.
use std::str::FromStr;

use bloom_model::{ActionClient, NodeRecord, Receiver};
use regex::Regex;

use crate::error::CoreError;

/// Keep nodes that can receive a VCS or cluster action: both `owner` and
/// `repo` must be present.
pub fn filter_by_receiver(nodes: &[NodeRecord], receiver: &str) -> Vec<NodeRecord> {
    match Receiver::from_str(receiver) {
        Ok(Receiver::Github | Receiver::Hpcc) => {
            keep(nodes, |n| n.owner().is_some() && n.repo().is_some())
        }
        Err(_) => nodes.to_vec(),
    }
}

/// `github` matches node names case-sensitively, `hpcc` ignores case.
pub fn filter_by_action_where(nodes: &[NodeRecord], action_where: &str) -> Vec<NodeRecord> {
    match action_where {
        "github" => keep(nodes, |n| n.name.contains("github")),
        "hpcc" => keep(nodes, |n| n.name.to_lowercase().contains("hpcc")),
        _ => nodes.to_vec(),
    }
}

/// Keep nodes whose name carries the client's environment marker.
pub fn filter_by_action_client(nodes: &[NodeRecord], client: &str) -> Vec<NodeRecord> {
    match ActionClient::from_str(client) {
        Ok(client) => keep(nodes, |n| n.name.contains(client.marker())),
        Err(_) => nodes.to_vec(),
    }
}

/// Keep nodes whose name matches the pattern anywhere.
pub fn filter_by_repo_name(nodes: &[NodeRecord], pattern: &RepoPattern) -> Vec<NodeRecord> {
    keep(nodes, |n| pattern.is_match(&n.name))
}

/// Name pattern for [`filter_by_repo_name`].
#[derive(Debug, Clone)]
pub struct RepoPattern(Regex);

impl RepoPattern {
    /// Match a literal substring; regex metacharacters have no meaning.
    pub fn literal(text: &str) -> Result<Self, CoreError> {
        Ok(Self(Regex::new(&regex::escape(text))?))
    }

    /// Match a regular expression (unanchored).
    pub fn regex(pattern: &str) -> Result<Self, CoreError> {
        Ok(Self(Regex::new(pattern)?))
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.0.is_match(name)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

fn keep<F>(nodes: &[NodeRecord], pred: F) -> Vec<NodeRecord>
where
    F: Fn(&NodeRecord) -> bool,
{
    nodes.iter().filter(|n| pred(n)).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nodes() -> Vec<NodeRecord> {
        vec![
            NodeRecord::new("owner_github_api").with_owner("acme").with_repo("api"),
            NodeRecord::new("quay_HPCC_train").with_owner("lab").with_repo("train"),
            NodeRecord::new("owner_hpcc_eval").with_owner("lab"),
            NodeRecord::new("quay_github_web.v2").with_owner("acme").with_repo("web"),
            NodeRecord::new("scratch"),
        ]
    }

    fn names(nodes: &[NodeRecord]) -> Vec<&str> {
        nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn receiver_requires_owner_and_repo() {
        let out = filter_by_receiver(&nodes(), "github");
        assert_eq!(
            names(&out),
            ["owner_github_api", "quay_HPCC_train", "quay_github_web.v2"]
        );
        assert_eq!(filter_by_receiver(&nodes(), "hpcc"), out);
        assert_eq!(filter_by_receiver(&nodes(), "ftp"), nodes());
    }

    #[test]
    fn action_where_case_rules() {
        assert_eq!(
            names(&filter_by_action_where(&nodes(), "github")),
            ["owner_github_api", "quay_github_web.v2"]
        );
        assert_eq!(
            names(&filter_by_action_where(&nodes(), "hpcc")),
            ["quay_HPCC_train", "owner_hpcc_eval"]
        );
        assert_eq!(filter_by_action_where(&nodes(), "local"), nodes());
        assert_eq!(filter_by_action_where(&nodes(), "GITHUB"), nodes());
    }

    #[test]
    fn action_client_uses_marker() {
        assert_eq!(
            names(&filter_by_action_client(&nodes(), "macbook")),
            ["owner_github_api", "owner_hpcc_eval"]
        );
        assert_eq!(
            names(&filter_by_action_client(&nodes(), "rockydesktop")),
            ["quay_HPCC_train", "quay_github_web.v2"]
        );
        assert_eq!(filter_by_action_client(&nodes(), "thinkpad"), nodes());
    }

    #[test]
    fn literal_pattern_escapes_metacharacters() {
        let dot = RepoPattern::literal("web.v2").unwrap();
        assert_eq!(names(&filter_by_repo_name(&nodes(), &dot)), ["quay_github_web.v2"]);

        let any = RepoPattern::literal(".").unwrap();
        assert_eq!(names(&filter_by_repo_name(&nodes(), &any)), ["quay_github_web.v2"]);
    }

    #[test]
    fn regex_pattern_is_unanchored() {
        let re = RepoPattern::regex("^owner_.*(api|eval)$").unwrap();
        assert_eq!(
            names(&filter_by_repo_name(&nodes(), &re)),
            ["owner_github_api", "owner_hpcc_eval"]
        );
        assert!(RepoPattern::regex("(").is_err());
    }

    #[test]
    fn filters_are_idempotent_and_order_preserving() {
        let input = nodes();
        let pattern = RepoPattern::regex("_").unwrap();
        let filters: Vec<Box<dyn Fn(&[NodeRecord]) -> Vec<NodeRecord>>> = vec![
            Box::new(|n: &[NodeRecord]| filter_by_receiver(n, "github")),
            Box::new(|n: &[NodeRecord]| filter_by_action_where(n, "hpcc")),
            Box::new(|n: &[NodeRecord]| filter_by_action_client(n, "macbook")),
            Box::new(move |n: &[NodeRecord]| filter_by_repo_name(n, &pattern)),
        ];

        for f in &filters {
            let once = f(&input);
            let twice = f(&once);
            assert_eq!(once, twice);

            let positions: Vec<usize> = once
                .iter()
                .map(|n| input.iter().position(|m| m == n).unwrap())
                .collect();
            assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
        }
    }
}
