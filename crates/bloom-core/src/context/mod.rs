//! Context resolution and classification.
//!
//! Turns an explicit key or a (language, project, repository, cluster, model)
//! tuple into a canonical [`ContextKey`], and maps a key onto the
//! [`ActionClass`] that decides which helper gets planned.
use bloom_model::{ActionClass, ContextKey, ContextQuery, Environment, ModelFamily};
use tracing::trace;

/// Resolve a query into a context key.
///
/// Rules:
/// - a non-blank explicit key is returned verbatim, without validation;
/// - otherwise both `cluster` and `model` must be present (non-empty), or
///   resolution yields `None`;
/// - the environment segment comes from [`derive_environment`];
/// - the model segment is a case-insensitive lookup defaulting to `granite`.
pub fn resolve_context_key(query: &ContextQuery) -> Option<ContextKey> {
    if let Some(explicit) = query.explicit_key() {
        return Some(ContextKey::explicit(explicit));
    }

    let cluster = present(&query.cluster)?;
    let model = present(&query.model)?;
    let project = query.project.as_deref().unwrap_or_default();

    let env = derive_environment(cluster, project);
    let family = ModelFamily::from_name_or_default(model);
    let key = ContextKey::compose(env, family);

    trace!(%cluster, %project, %model, key = %key, "context key derived");
    Some(key)
}

/// Environment segment for a cluster/project pair.
///
/// Cluster and project are compared case-insensitively. Checks run in a
/// fixed order because project prefixes are not mutually exclusive:
/// - cluster contains `hpcc`: `owner_hpcc` for projects starting with `owner`, else `quay_hpcc`;
/// - cluster contains `github`: `hpcc_github` for `hpcc*`, then `quay_github` for `quay*`, else `owner_github`;
/// - anything else: `owner_github`.
pub fn derive_environment(cluster: &str, project: &str) -> Environment {
    let cluster = cluster.to_lowercase();
    let project = project.to_lowercase();

    if cluster.contains("hpcc") {
        if project.starts_with("owner") {
            Environment::OwnerHpcc
        } else {
            Environment::QuayHpcc
        }
    } else if cluster.contains("github") {
        if project.starts_with("hpcc") {
            Environment::HpccGithub
        } else if project.starts_with("quay") {
            Environment::QuayGithub
        } else {
            Environment::OwnerGithub
        }
    } else {
        Environment::default()
    }
}

/// Action class of a (possibly missing) key.
///
/// `github` is checked before `hpcc`, so `hpcc_github_*` keys are `github`.
pub fn classify(key: Option<&ContextKey>) -> ActionClass {
    match key {
        Some(k) if k.contains("github") => ActionClass::Github,
        Some(k) if k.contains("hpcc") => ActionClass::Hpcc,
        _ => ActionClass::Local,
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(project: &str, cluster: &str, model: &str) -> ContextQuery {
        ContextQuery::new()
            .with_project(project)
            .with_cluster(cluster)
            .with_model(model)
    }

    fn key(project: &str, cluster: &str, model: &str) -> Option<String> {
        resolve_context_key(&query(project, cluster, model)).map(|k| k.to_string())
    }

    #[test]
    fn all_blank_inputs_resolve_to_none_and_classify_local() {
        let q = ContextQuery {
            context_key: Some(String::new()),
            language: Some(String::new()),
            project: Some(String::new()),
            repository: Some(String::new()),
            cluster: Some(String::new()),
            model: Some(String::new()),
        };
        let resolved = resolve_context_key(&q);

        assert_eq!(resolved, None);
        assert_eq!(classify(resolved.as_ref()), ActionClass::Local);
    }

    #[test]
    fn explicit_key_wins_over_everything() {
        let q = query("owner-x", "hpcc01", "deepseek").with_context_key("quay_hpcc_qwen");
        assert_eq!(
            resolve_context_key(&q).map(|k| k.to_string()).as_deref(),
            Some("quay_hpcc_qwen")
        );

        let q = ContextQuery::new().with_context_key("anything-goes");
        assert_eq!(
            resolve_context_key(&q).map(|k| k.to_string()).as_deref(),
            Some("anything-goes")
        );
    }

    #[test]
    fn missing_cluster_or_model_fails_resolution() {
        let q = ContextQuery::new().with_cluster("hpcc01");
        assert_eq!(resolve_context_key(&q), None);

        let q = ContextQuery::new().with_model("qwen");
        assert_eq!(resolve_context_key(&q), None);
    }

    #[test]
    fn hpcc_cluster_checks_owner_prefix_only() {
        assert_eq!(key("OwnerRepo", "HPCC01", "Granite").as_deref(), Some("owner_hpcc_granite"));
        assert_eq!(key("quay-mirror", "hpcc01", "qwen").as_deref(), Some("quay_hpcc_qwen"));
        assert_eq!(key("hpcc-tools", "my-hpcc", "qwen").as_deref(), Some("quay_hpcc_qwen"));
    }

    #[test]
    fn github_cluster_checks_hpcc_then_quay_prefix() {
        assert_eq!(
            key("quay-mirror", "github-runner", "deepseek").as_deref(),
            Some("quay_github_deepseek")
        );
        assert_eq!(
            key("HPCC-bridge", "GitHub", "codellama").as_deref(),
            Some("hpcc_github_codellama")
        );
        assert_eq!(key("owner-api", "github", "qwen").as_deref(), Some("owner_github_qwen"));
        assert_eq!(key("misc", "github", "qwen").as_deref(), Some("owner_github_qwen"));
    }

    #[test]
    fn cluster_with_both_substrings_is_hpcc() {
        assert_eq!(derive_environment("hpcc-github", "owner"), Environment::OwnerHpcc);
    }

    #[test]
    fn unknown_cluster_and_model_fall_back_to_defaults() {
        assert_eq!(key("anything", "aws-east", "mistral").as_deref(), Some("owner_github_granite"));
    }

    #[test]
    fn missing_project_is_treated_as_empty() {
        let q = ContextQuery::new().with_cluster("hpcc").with_model("qwen");
        assert_eq!(
            resolve_context_key(&q).map(|k| k.to_string()).as_deref(),
            Some("quay_hpcc_qwen")
        );
    }

    #[test]
    fn classification_checks_github_before_hpcc() {
        let cls = |raw: &str| classify(Some(&ContextKey::explicit(raw)));

        assert_eq!(cls("hpcc_github_codellama"), ActionClass::Github);
        assert_eq!(cls("owner_hpcc_granite"), ActionClass::Hpcc);
        assert_eq!(cls("owner_github_qwen"), ActionClass::Github);
        assert_eq!(cls("custom"), ActionClass::Local);
        assert_eq!(classify(None), ActionClass::Local);
    }

    #[test]
    fn resolution_is_deterministic_over_the_whole_grid() {
        let clusters = ["hpcc01", "github-runner", "aws", ""];
        let projects = ["owner-a", "quay-b", "hpcc-c", "other", ""];
        let models = ["granite", "DeepSeek", "qwen", "codellama", "unknown", ""];

        for c in clusters {
            for p in projects {
                for m in models {
                    let q = query(p, c, m);
                    let first = resolve_context_key(&q);
                    let second = resolve_context_key(&q);
                    assert_eq!(first, second);
                    assert_eq!(classify(first.as_ref()), classify(second.as_ref()));

                    if let Some(k) = first {
                        assert!(k.is_known(), "derived key {k} must be in the key space");
                        assert_ne!(classify(Some(&k)), ActionClass::Local);
                    } else {
                        assert!(c.is_empty() || m.is_empty());
                    }
                }
            }
        }
    }
}
