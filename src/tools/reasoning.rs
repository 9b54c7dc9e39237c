//! Reasoning commands: `sequential_thinking`, `context_manager`.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::registry::{CommandResult, CommandSpec, ParamKind, ParamSpec};

use super::backend::Reasoning;

pub fn commands(reasoning: &Arc<dyn Reasoning>) -> Vec<CommandSpec> {
    let mut specs = Vec::new();

    let backend = reasoning.clone();
    specs.push(CommandSpec::new(
        "sequential_thinking",
        "Run step-by-step reasoning over an input",
        vec![
            ParamSpec::required("input", ParamKind::String).describe("text to reason about"),
            ParamSpec::optional("steps", ParamKind::Integer)
                .describe("number of reasoning steps")
                .default_value(1),
            ParamSpec::optional("context", ParamKind::String).describe("extra context"),
        ],
        move |args| {
            let input = args.str("input")?;
            let steps = args.integer("steps")?;
            let context = args.opt_str("context")?;
            let data = backend.sequential_thinking(input, steps, context)?;
            Ok(CommandResult::with_data(data).message(format!(
                "Performing sequential thinking on '{input}' with {steps} step(s)"
            )))
        },
    ));

    let backend = reasoning.clone();
    specs.push(CommandSpec::new(
        "context_manager",
        "Apply an action to a managed reasoning context",
        vec![
            ParamSpec::required("action", ParamKind::String).describe("action to apply"),
            ParamSpec::required("context_id", ParamKind::String).describe("context id"),
            ParamSpec::optional("content", ParamKind::Map)
                .describe("context payload")
                .default_value(Value::Object(Map::new())),
        ],
        move |args| {
            let action = args.str("action")?;
            let context_id = args.str("context_id")?;
            let content = args.map("content")?;
            let data = backend.context_manager(action, context_id, content)?;
            Ok(CommandResult::with_data(data).message(format!(
                "Context manager action '{action}' for context '{context_id}'"
            )))
        },
    ));

    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::tools::backend::DryRun;
    use serde_json::json;

    fn registry() -> Registry {
        let reasoning: Arc<dyn Reasoning> = Arc::new(DryRun);
        let mut reg = Registry::new();
        for spec in commands(&reasoning) {
            reg.register(spec).unwrap();
        }
        reg
    }

    fn bag(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn steps_default_to_one() {
        let result = registry()
            .dispatch("sequential_thinking", &bag(json!({"input":"plan the rollout"})))
            .unwrap();
        assert_eq!(result.data.as_ref().unwrap()["request"]["steps"], json!(1));
        assert_eq!(
            result.message.as_deref(),
            Some("Performing sequential thinking on 'plan the rollout' with 1 step(s)")
        );
    }

    #[test]
    fn context_content_defaults_to_empty_map() {
        let result = registry()
            .dispatch(
                "context_manager",
                &bag(json!({"action":"create","context_id":"ctx1"})),
            )
            .unwrap();
        assert_eq!(result.data.unwrap()["request"]["content"], json!({}));
    }

    #[test]
    fn context_manager_requires_action_and_id() {
        let err = registry()
            .dispatch("context_manager", &bag(json!({"action":"update"})))
            .unwrap_err();
        assert!(err.is_usage_error());
    }
}
