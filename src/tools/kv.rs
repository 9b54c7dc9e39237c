//! KV namespace commands: `get_kvs`, `kv_get`, `kv_put`, `kv_list`, `kv_delete`.

use std::sync::Arc;

use crate::registry::{CommandResult, CommandSpec, ParamKind, ParamSpec};

use super::backend::KvStore;

pub fn commands(kv: &Arc<dyn KvStore>) -> Vec<CommandSpec> {
    let mut specs = Vec::new();

    let backend = kv.clone();
    specs.push(CommandSpec::new(
        "get_kvs",
        "List all KV namespaces",
        vec![],
        move |_args| {
            let data = backend.list_namespaces()?;
            Ok(CommandResult::with_data(data).message("Listing KV namespaces"))
        },
    ));

    let backend = kv.clone();
    specs.push(CommandSpec::new(
        "kv_get",
        "Get the value stored under a key",
        vec![
            ParamSpec::required("namespaceId", ParamKind::String).describe("KV namespace id"),
            ParamSpec::required("key", ParamKind::String).describe("key to read"),
        ],
        move |args| {
            let namespace = args.str("namespaceId")?;
            let key = args.str("key")?;
            let data = backend.get(namespace, key)?;
            Ok(CommandResult::with_data(data).message(format!(
                "Getting value for key '{key}' from namespace '{namespace}'"
            )))
        },
    ));

    let backend = kv.clone();
    specs.push(CommandSpec::new(
        "kv_put",
        "Store a value under a key, optionally with a TTL",
        vec![
            ParamSpec::required("namespaceId", ParamKind::String).describe("KV namespace id"),
            ParamSpec::required("key", ParamKind::String).describe("key to write"),
            ParamSpec::required("value", ParamKind::String).describe("value to store"),
            ParamSpec::optional("expirationTtl", ParamKind::Integer)
                .describe("expiration in seconds"),
        ],
        move |args| {
            let namespace = args.str("namespaceId")?;
            let key = args.str("key")?;
            let value = args.str("value")?;
            let ttl = args.opt_integer("expirationTtl")?;
            let data = backend.put(namespace, key, value, ttl)?;
            let suffix = ttl.map(|t| format!(" with expiration {t}")).unwrap_or_default();
            Ok(CommandResult::with_data(data).message(format!(
                "Storing key '{key}' with value '{value}' into namespace '{namespace}'{suffix}"
            )))
        },
    ));

    let backend = kv.clone();
    specs.push(CommandSpec::new(
        "kv_list",
        "List keys in a namespace, optionally filtered by prefix",
        vec![
            ParamSpec::required("namespaceId", ParamKind::String).describe("KV namespace id"),
            ParamSpec::optional("prefix", ParamKind::String)
                .describe("key prefix filter")
                .default_value(""),
            ParamSpec::optional("limit", ParamKind::Integer).describe("max keys to return"),
        ],
        move |args| {
            let namespace = args.str("namespaceId")?;
            let prefix = args.str("prefix")?;
            let limit = args.opt_integer("limit")?;
            let data = backend.list_keys(namespace, prefix, limit)?;
            let suffix = limit.map(|l| format!(" and limit {l}")).unwrap_or_default();
            Ok(CommandResult::with_data(data).message(format!(
                "Listing keys in namespace '{namespace}' with prefix '{prefix}'{suffix}"
            )))
        },
    ));

    let backend = kv.clone();
    specs.push(CommandSpec::new(
        "kv_delete",
        "Delete a key from a namespace",
        vec![
            ParamSpec::required("namespaceId", ParamKind::String).describe("KV namespace id"),
            ParamSpec::required("key", ParamKind::String).describe("key to delete"),
        ],
        move |args| {
            let namespace = args.str("namespaceId")?;
            let key = args.str("key")?;
            let data = backend.delete(namespace, key)?;
            Ok(CommandResult::with_data(data).message(format!(
                "Deleting key '{key}' from namespace '{namespace}'"
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
    use serde_json::{Map, Value, json};

    fn registry() -> Registry {
        let kv: Arc<dyn KvStore> = Arc::new(DryRun);
        let mut reg = Registry::new();
        for spec in commands(&kv) {
            reg.register(spec).unwrap();
        }
        reg
    }

    fn bag(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn kv_get_round_trips_through_backend() {
        let result = registry()
            .dispatch("kv_get", &bag(json!({"namespaceId":"ns1","key":"k1"})))
            .unwrap();
        assert!(result.success);
        let data = result.data.unwrap();
        assert_eq!(data["action"], json!("kv.get"));
        assert_eq!(data["request"]["namespace"], json!("ns1"));
        assert_eq!(
            result.message.as_deref(),
            Some("Getting value for key 'k1' from namespace 'ns1'")
        );
    }

    #[test]
    fn kv_put_ttl_is_optional() {
        let reg = registry();
        let without = reg
            .dispatch(
                "kv_put",
                &bag(json!({"namespaceId":"ns1","key":"k","value":"v"})),
            )
            .unwrap();
        assert!(!without.message.unwrap().contains("expiration"));

        let with = reg
            .dispatch(
                "kv_put",
                &bag(json!({"namespaceId":"ns1","key":"k","value":"v","expirationTtl":60})),
            )
            .unwrap();
        assert!(with.message.unwrap().ends_with("with expiration 60"));
    }

    #[test]
    fn kv_list_prefix_defaults_to_empty() {
        let result = registry()
            .dispatch("kv_list", &bag(json!({"namespaceId":"ns1"})))
            .unwrap();
        assert_eq!(
            result.message.as_deref(),
            Some("Listing keys in namespace 'ns1' with prefix ''")
        );
        assert_eq!(result.data.unwrap()["request"]["prefix"], json!(""));
    }
}
