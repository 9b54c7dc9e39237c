//! AI gateway commands: completions, chat messages, embeddings, moderation.

use std::sync::Arc;

use crate::registry::{CommandResult, CommandSpec, ParamKind, ParamSpec};

use super::backend::AiGateway;

const DEFAULT_MODEL: &str = "claude-3-sonnet-20240229";
const DEFAULT_MAX_TOKENS: i64 = 1024;

fn model_param() -> ParamSpec {
    ParamSpec::optional("model", ParamKind::String)
        .describe("model identifier")
        .default_value(DEFAULT_MODEL)
}

fn sampling_params() -> Vec<ParamSpec> {
    vec![
        model_param(),
        ParamSpec::optional("max_tokens", ParamKind::Integer)
            .describe("response token budget")
            .default_value(DEFAULT_MAX_TOKENS),
        ParamSpec::optional("temperature", ParamKind::Number).describe("sampling temperature"),
        ParamSpec::optional("system", ParamKind::String).describe("system prompt"),
    ]
}

pub fn commands(ai: &Arc<dyn AiGateway>) -> Vec<CommandSpec> {
    let mut specs = Vec::new();

    let backend = ai.clone();
    let mut params = vec![ParamSpec::required("prompt", ParamKind::String).describe("user prompt")];
    params.extend(sampling_params());
    specs.push(CommandSpec::new(
        "claude_completion",
        "Generate a text completion for a prompt",
        params,
        move |args| {
            let prompt = args.str("prompt")?;
            let model = args.str("model")?;
            let max_tokens = args.integer("max_tokens")?;
            let temperature = args.opt_number("temperature")?;
            let system = args.opt_str("system")?;
            let data = backend.completion(prompt, model, max_tokens, temperature, system)?;
            Ok(CommandResult::with_data(data)
                .message(format!("Claude completion with prompt: {prompt}")))
        },
    ));

    let backend = ai.clone();
    let mut params =
        vec![ParamSpec::required("messages", ParamKind::List).describe("conversation turns")];
    params.extend(sampling_params());
    specs.push(CommandSpec::new(
        "claude_messages",
        "Run a multi-turn conversation",
        params,
        move |args| {
            let messages = args.list("messages")?;
            let model = args.str("model")?;
            let max_tokens = args.integer("max_tokens")?;
            let temperature = args.opt_number("temperature")?;
            let system = args.opt_str("system")?;
            let data = backend.messages(messages, model, max_tokens, temperature, system)?;
            Ok(CommandResult::with_data(data)
                .message(format!("Claude messages with {} turn(s)", messages.len())))
        },
    ));

    let backend = ai.clone();
    specs.push(CommandSpec::new(
        "embeddings_create",
        "Create an embedding vector for input text",
        vec![
            ParamSpec::required("input", ParamKind::String).describe("text to embed"),
            ParamSpec::optional("model", ParamKind::String).describe("embedding model"),
        ],
        move |args| {
            let input = args.str("input")?;
            let model = args.opt_str("model")?;
            let data = backend.embeddings(input, model)?;
            Ok(CommandResult::with_data(data).message("Creating embeddings"))
        },
    ));

    let backend = ai.clone();
    specs.push(CommandSpec::new(
        "content_moderation",
        "Moderate input text against content categories",
        vec![
            ParamSpec::required("input", ParamKind::String).describe("text to check"),
            ParamSpec::optional("categories", ParamKind::List).describe("categories to score"),
        ],
        move |args| {
            let input = args.str("input")?;
            let categories = args.opt_list("categories")?;
            let data = backend.moderation(input, categories.map(|v| v.as_slice()))?;
            Ok(CommandResult::with_data(data).message("Moderating content"))
        },
    ));

    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Registry;
    use crate::tools::backend::DryRun;
    use serde_json::{Map, Value, json};

    fn registry() -> Registry {
        let ai: Arc<dyn AiGateway> = Arc::new(DryRun);
        let mut reg = Registry::new();
        for spec in commands(&ai) {
            reg.register(spec).unwrap();
        }
        reg
    }

    fn bag(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn completion_fills_model_and_token_defaults() {
        let result = registry()
            .dispatch("claude_completion", &bag(json!({"prompt":"hello"})))
            .unwrap();
        let data = result.data.unwrap();
        assert_eq!(data["request"]["model"], json!(DEFAULT_MODEL));
        assert_eq!(data["request"]["max_tokens"], json!(DEFAULT_MAX_TOKENS));
        assert_eq!(data["request"]["temperature"], json!(null));
    }

    #[test]
    fn temperature_accepts_integer_and_float() {
        let reg = registry();
        for temp in [json!(1), json!(0.7)] {
            let result = reg
                .dispatch(
                    "claude_completion",
                    &bag(json!({"prompt":"hi","temperature": temp})),
                )
                .unwrap();
            assert!(result.success);
        }
    }

    #[test]
    fn messages_counts_turns() {
        let result = registry()
            .dispatch(
                "claude_messages",
                &bag(json!({"messages":[{"role":"user","content":"hi"}]})),
            )
            .unwrap();
        assert_eq!(
            result.message.as_deref(),
            Some("Claude messages with 1 turn(s)")
        );
    }
}
