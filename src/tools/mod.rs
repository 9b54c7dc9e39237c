/*!
Built-in command catalog.

One module per service family, each exposing:
    pub fn commands(backend: &Arc<dyn Trait>) -> Vec<CommandSpec>

`builtin` assembles the full registry from a `Backends` bundle. Handlers
capture their backend client by Arc; the assembled registry is read-only
and can be shared across threads.
*/

pub mod ai;
pub mod analytics;
pub mod backend;
pub mod d1;
pub mod kv;
pub mod memory;
pub mod r2;
pub mod reasoning;
pub mod worker;

pub use backend::{Backends, DryRun};

use crate::registry::{DuplicateCommand, Registry};

/// Build the full built-in registry against the given backend clients.
pub fn builtin(backends: &Backends) -> Result<Registry, DuplicateCommand> {
    let mut registry = Registry::new();
    let families = [
        kv::commands(&backends.kv),
        r2::commands(&backends.r2),
        d1::commands(&backends.d1),
        worker::commands(&backends.workers),
        ai::commands(&backends.ai),
        analytics::commands(&backends.analytics),
        reasoning::commands(&backends.reasoning),
        memory::commands(&backends.memory),
    ];
    for spec in families.into_iter().flatten() {
        registry.register(spec)?;
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, json};

    #[test]
    fn builtin_registers_full_catalog() {
        let registry = builtin(&Backends::dry_run()).unwrap();
        assert_eq!(registry.len(), 30);

        for name in [
            "get_kvs",
            "kv_get",
            "kv_put",
            "kv_list",
            "kv_delete",
            "r2_list_buckets",
            "r2_create_bucket",
            "r2_delete_bucket",
            "r2_list_objects",
            "r2_get_object",
            "r2_put_object",
            "r2_delete_object",
            "d1_list_databases",
            "d1_create_database",
            "d1_delete_database",
            "d1_query",
            "worker_list",
            "worker_get",
            "worker_put",
            "worker_delete",
            "claude_completion",
            "claude_messages",
            "embeddings_create",
            "content_moderation",
            "analytics_get",
            "sequential_thinking",
            "context_manager",
            "memory_store",
            "memory_retrieve",
            "memory_search",
        ] {
            assert!(registry.get(name).is_some(), "missing command {name}");
        }
    }

    #[test]
    fn catalog_listing_is_sorted_and_unique() {
        let registry = builtin(&Backends::dry_run()).unwrap();
        let names: Vec<&str> = registry.list().iter().map(|(n, _)| *n).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(names, sorted);
    }

    #[test]
    fn no_arg_commands_reject_stray_parameters() {
        let registry = builtin(&Backends::dry_run()).unwrap();
        let mut raw = Map::new();
        raw.insert("bucket".to_string(), json!("b"));
        assert!(registry.dispatch("r2_list_buckets", &raw).is_err());
        assert!(registry.dispatch("r2_list_buckets", &Map::new()).is_ok());
    }
}
