//! Agent memory commands: `memory_store`, `memory_retrieve`, `memory_search`.

use std::sync::Arc;

use crate::registry::{CommandResult, CommandSpec, ParamKind, ParamSpec};

use super::backend::MemoryStore;

pub fn commands(memory: &Arc<dyn MemoryStore>) -> Vec<CommandSpec> {
    let mut specs = Vec::new();

    let backend = memory.clone();
    specs.push(CommandSpec::new(
        "memory_store",
        "Store a memory entry, optionally namespaced with a TTL",
        vec![
            ParamSpec::required("key", ParamKind::String).describe("memory key"),
            ParamSpec::required("value", ParamKind::String).describe("memory content"),
            ParamSpec::optional("namespace", ParamKind::String).describe("memory namespace"),
            ParamSpec::optional("ttl", ParamKind::Integer).describe("expiry in seconds"),
        ],
        move |args| {
            let key = args.str("key")?;
            let value = args.str("value")?;
            let namespace = args.opt_str("namespace")?;
            let ttl = args.opt_integer("ttl")?;
            let data = backend.store(key, value, namespace, ttl)?;
            Ok(CommandResult::with_data(data).message(format!("Storing memory '{key}'")))
        },
    ));

    let backend = memory.clone();
    specs.push(CommandSpec::new(
        "memory_retrieve",
        "Retrieve a memory entry by key",
        vec![
            ParamSpec::required("key", ParamKind::String).describe("memory key"),
            ParamSpec::optional("namespace", ParamKind::String).describe("memory namespace"),
        ],
        move |args| {
            let key = args.str("key")?;
            let namespace = args.opt_str("namespace")?;
            let data = backend.retrieve(key, namespace)?;
            Ok(CommandResult::with_data(data).message(format!("Retrieving memory '{key}'")))
        },
    ));

    let backend = memory.clone();
    specs.push(CommandSpec::new(
        "memory_search",
        "Search memory entries by free-text query",
        vec![
            ParamSpec::required("query", ParamKind::String).describe("search text"),
            ParamSpec::optional("namespace", ParamKind::String).describe("memory namespace"),
            ParamSpec::optional("limit", ParamKind::Integer)
                .describe("max results")
                .default_value(10),
        ],
        move |args| {
            let query = args.str("query")?;
            let namespace = args.opt_str("namespace")?;
            let limit = args.integer("limit")?;
            let data = backend.search(query, namespace, limit)?;
            Ok(CommandResult::with_data(data).message(format!("Searching memories for '{query}'")))
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
        let memory: Arc<dyn MemoryStore> = Arc::new(DryRun);
        let mut reg = Registry::new();
        for spec in commands(&memory) {
            reg.register(spec).unwrap();
        }
        reg
    }

    fn bag(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn search_limit_defaults_to_ten() {
        let result = registry()
            .dispatch("memory_search", &bag(json!({"query":"deploy notes"})))
            .unwrap();
        assert_eq!(result.data.unwrap()["request"]["limit"], json!(10));
    }

    #[test]
    fn store_passes_namespace_through() {
        let result = registry()
            .dispatch(
                "memory_store",
                &bag(json!({"key":"k","value":"v","namespace":"agents"})),
            )
            .unwrap();
        assert_eq!(result.data.unwrap()["request"]["namespace"], json!("agents"));
    }
}
