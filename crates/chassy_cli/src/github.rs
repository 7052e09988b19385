//! GitHub Actions context plumbing.

use serde_json::{Map, Value};

/// Assemble the `githubContext` payload from the standard `GITHUB_*`
/// environment variables. Unset variables are omitted rather than sent as
/// nulls.
pub fn context_from_env() -> Value {
    context_from(|name| std::env::var(name).ok())
}

fn context_from(var: impl Fn(&str) -> Option<String>) -> Value {
    let fields = [
        ("repository", "GITHUB_REPOSITORY"),
        ("ref", "GITHUB_REF"),
        ("sha", "GITHUB_SHA"),
        ("runId", "GITHUB_RUN_ID"),
        ("runNumber", "GITHUB_RUN_NUMBER"),
        ("actor", "GITHUB_ACTOR"),
        ("eventName", "GITHUB_EVENT_NAME"),
        ("workflow", "GITHUB_WORKFLOW"),
    ];

    let mut context = Map::new();
    for (key, env_name) in fields {
        if let Some(value) = var(env_name) {
            context.insert(key.to_string(), Value::String(value));
        }
    }
    Value::Object(context)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_variables_are_mapped_to_camel_case_keys() {
        let context = context_from(|name| match name {
            "GITHUB_REPOSITORY" => Some("acme/edge".to_string()),
            "GITHUB_RUN_ID" => Some("12345".to_string()),
            _ => None,
        });

        assert_eq!(context["repository"], "acme/edge");
        assert_eq!(context["runId"], "12345");
        assert!(context.get("sha").is_none());
    }

    #[test]
    fn empty_environment_yields_an_empty_object() {
        let context = context_from(|_| None);
        assert_eq!(context, serde_json::json!({}));
    }
}
