/*!
`backend.rs`

Backend client traits injected into the built-in command handlers.

One trait per service family. Handlers capture an `Arc<dyn Trait>` at
registry-construction time; nothing in this crate performs the actual
network call. Wire protocols, credentials, and retries all live behind
these seams in the hosting application.

`DryRun` is the default client for the CLI and the fake for tests: every
method answers with a JSON echo of the request it would have sent.
*/

use std::sync::Arc;

use anyhow::Result;
use serde_json::{Map, Value, json};

/* -------------------------------------------------------------------------- */
/* Traits                                                                     */
/* -------------------------------------------------------------------------- */

/// Key-value namespace service.
pub trait KvStore: Send + Sync {
    fn list_namespaces(&self) -> Result<Value>;
    fn get(&self, namespace: &str, key: &str) -> Result<Value>;
    fn put(&self, namespace: &str, key: &str, value: &str, expiration_ttl: Option<i64>)
    -> Result<Value>;
    fn list_keys(&self, namespace: &str, prefix: &str, limit: Option<i64>) -> Result<Value>;
    fn delete(&self, namespace: &str, key: &str) -> Result<Value>;
}

/// Object-storage bucket service (R2-style).
pub trait ObjectStore: Send + Sync {
    fn list_buckets(&self) -> Result<Value>;
    fn create_bucket(&self, name: &str) -> Result<Value>;
    fn delete_bucket(&self, name: &str) -> Result<Value>;
    fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        delimiter: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Value>;
    fn get_object(&self, bucket: &str, key: &str) -> Result<Value>;
    fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content: &str,
        content_type: Option<&str>,
    ) -> Result<Value>;
    fn delete_object(&self, bucket: &str, key: &str) -> Result<Value>;
}

/// Serverless SQL database service (D1-style).
pub trait SqlDatabase: Send + Sync {
    fn list_databases(&self) -> Result<Value>;
    fn create_database(&self, name: &str) -> Result<Value>;
    fn delete_database(&self, database_id: &str) -> Result<Value>;
    fn query(&self, database_id: &str, query: &str, params: Option<&[Value]>) -> Result<Value>;
}

/// Worker-script deployment service.
pub trait WorkerHost: Send + Sync {
    fn list_workers(&self) -> Result<Value>;
    fn get_worker(&self, name: &str) -> Result<Value>;
    fn deploy(
        &self,
        name: &str,
        script: &str,
        bindings: Option<&Map<String, Value>>,
        compatibility_date: Option<&str>,
        compatibility_flags: Option<&[Value]>,
    ) -> Result<Value>;
    fn delete_worker(&self, name: &str) -> Result<Value>;
}

/// AI completion / embedding / moderation gateway.
pub trait AiGateway: Send + Sync {
    fn completion(
        &self,
        prompt: &str,
        model: &str,
        max_tokens: i64,
        temperature: Option<f64>,
        system: Option<&str>,
    ) -> Result<Value>;
    fn messages(
        &self,
        messages: &[Value],
        model: &str,
        max_tokens: i64,
        temperature: Option<f64>,
        system: Option<&str>,
    ) -> Result<Value>;
    fn embeddings(&self, input: &str, model: Option<&str>) -> Result<Value>;
    fn moderation(&self, input: &str, categories: Option<&[Value]>) -> Result<Value>;
}

/// Zone analytics service.
pub trait Analytics: Send + Sync {
    fn get(&self, zone_id: &str, since: &str, until: &str) -> Result<Value>;
}

/// Sequential reasoning / context management service.
pub trait Reasoning: Send + Sync {
    fn sequential_thinking(&self, input: &str, steps: i64, context: Option<&str>)
    -> Result<Value>;
    fn context_manager(
        &self,
        action: &str,
        context_id: &str,
        content: &Map<String, Value>,
    ) -> Result<Value>;
}

/// Agent memory / recall service.
pub trait MemoryStore: Send + Sync {
    fn store(&self, key: &str, value: &str, namespace: Option<&str>, ttl: Option<i64>)
    -> Result<Value>;
    fn retrieve(&self, key: &str, namespace: Option<&str>) -> Result<Value>;
    fn search(&self, query: &str, namespace: Option<&str>, limit: i64) -> Result<Value>;
}

/* -------------------------------------------------------------------------- */
/* Backend Bundle                                                             */
/* -------------------------------------------------------------------------- */

/// One client per family, handed to `tools::builtin` when the registry is
/// assembled. Clone is cheap (Arc per slot).
#[derive(Clone)]
pub struct Backends {
    pub kv: Arc<dyn KvStore>,
    pub r2: Arc<dyn ObjectStore>,
    pub d1: Arc<dyn SqlDatabase>,
    pub workers: Arc<dyn WorkerHost>,
    pub ai: Arc<dyn AiGateway>,
    pub analytics: Arc<dyn Analytics>,
    pub reasoning: Arc<dyn Reasoning>,
    pub memory: Arc<dyn MemoryStore>,
}

impl Backends {
    /// Every family answered by the `DryRun` echo client.
    pub fn dry_run() -> Self {
        let stub = Arc::new(DryRun);
        Backends {
            kv: stub.clone(),
            r2: stub.clone(),
            d1: stub.clone(),
            workers: stub.clone(),
            ai: stub.clone(),
            analytics: stub.clone(),
            reasoning: stub.clone(),
            memory: stub,
        }
    }
}

/* -------------------------------------------------------------------------- */
/* DryRun Client                                                              */
/* -------------------------------------------------------------------------- */

/// Echo client: returns the request it would have sent, as JSON.
pub struct DryRun;

fn echo(action: &str, request: Value) -> Result<Value> {
    Ok(json!({ "dry_run": true, "action": action, "request": request }))
}

impl KvStore for DryRun {
    fn list_namespaces(&self) -> Result<Value> {
        echo("kv.list_namespaces", json!({}))
    }

    fn get(&self, namespace: &str, key: &str) -> Result<Value> {
        echo("kv.get", json!({ "namespace": namespace, "key": key }))
    }

    fn put(
        &self,
        namespace: &str,
        key: &str,
        value: &str,
        expiration_ttl: Option<i64>,
    ) -> Result<Value> {
        echo(
            "kv.put",
            json!({
                "namespace": namespace,
                "key": key,
                "value": value,
                "expiration_ttl": expiration_ttl,
            }),
        )
    }

    fn list_keys(&self, namespace: &str, prefix: &str, limit: Option<i64>) -> Result<Value> {
        echo(
            "kv.list_keys",
            json!({ "namespace": namespace, "prefix": prefix, "limit": limit }),
        )
    }

    fn delete(&self, namespace: &str, key: &str) -> Result<Value> {
        echo("kv.delete", json!({ "namespace": namespace, "key": key }))
    }
}

impl ObjectStore for DryRun {
    fn list_buckets(&self) -> Result<Value> {
        echo("r2.list_buckets", json!({}))
    }

    fn create_bucket(&self, name: &str) -> Result<Value> {
        echo("r2.create_bucket", json!({ "name": name }))
    }

    fn delete_bucket(&self, name: &str) -> Result<Value> {
        echo("r2.delete_bucket", json!({ "name": name }))
    }

    fn list_objects(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        delimiter: Option<&str>,
        limit: Option<i64>,
    ) -> Result<Value> {
        echo(
            "r2.list_objects",
            json!({ "bucket": bucket, "prefix": prefix, "delimiter": delimiter, "limit": limit }),
        )
    }

    fn get_object(&self, bucket: &str, key: &str) -> Result<Value> {
        echo("r2.get_object", json!({ "bucket": bucket, "key": key }))
    }

    fn put_object(
        &self,
        bucket: &str,
        key: &str,
        content: &str,
        content_type: Option<&str>,
    ) -> Result<Value> {
        echo(
            "r2.put_object",
            json!({ "bucket": bucket, "key": key, "content": content, "content_type": content_type }),
        )
    }

    fn delete_object(&self, bucket: &str, key: &str) -> Result<Value> {
        echo("r2.delete_object", json!({ "bucket": bucket, "key": key }))
    }
}

impl SqlDatabase for DryRun {
    fn list_databases(&self) -> Result<Value> {
        echo("d1.list_databases", json!({}))
    }

    fn create_database(&self, name: &str) -> Result<Value> {
        echo("d1.create_database", json!({ "name": name }))
    }

    fn delete_database(&self, database_id: &str) -> Result<Value> {
        echo("d1.delete_database", json!({ "database_id": database_id }))
    }

    fn query(&self, database_id: &str, query: &str, params: Option<&[Value]>) -> Result<Value> {
        echo(
            "d1.query",
            json!({ "database_id": database_id, "query": query, "params": params }),
        )
    }
}

impl WorkerHost for DryRun {
    fn list_workers(&self) -> Result<Value> {
        echo("workers.list", json!({}))
    }

    fn get_worker(&self, name: &str) -> Result<Value> {
        echo("workers.get", json!({ "name": name }))
    }

    fn deploy(
        &self,
        name: &str,
        script: &str,
        bindings: Option<&Map<String, Value>>,
        compatibility_date: Option<&str>,
        compatibility_flags: Option<&[Value]>,
    ) -> Result<Value> {
        echo(
            "workers.deploy",
            json!({
                "name": name,
                "script_bytes": script.len(),
                "bindings": bindings,
                "compatibility_date": compatibility_date,
                "compatibility_flags": compatibility_flags,
            }),
        )
    }

    fn delete_worker(&self, name: &str) -> Result<Value> {
        echo("workers.delete", json!({ "name": name }))
    }
}

impl AiGateway for DryRun {
    fn completion(
        &self,
        prompt: &str,
        model: &str,
        max_tokens: i64,
        temperature: Option<f64>,
        system: Option<&str>,
    ) -> Result<Value> {
        echo(
            "ai.completion",
            json!({
                "prompt": prompt,
                "model": model,
                "max_tokens": max_tokens,
                "temperature": temperature,
                "system": system,
            }),
        )
    }

    fn messages(
        &self,
        messages: &[Value],
        model: &str,
        max_tokens: i64,
        temperature: Option<f64>,
        system: Option<&str>,
    ) -> Result<Value> {
        echo(
            "ai.messages",
            json!({
                "messages": messages,
                "model": model,
                "max_tokens": max_tokens,
                "temperature": temperature,
                "system": system,
            }),
        )
    }

    fn embeddings(&self, input: &str, model: Option<&str>) -> Result<Value> {
        echo("ai.embeddings", json!({ "input": input, "model": model }))
    }

    fn moderation(&self, input: &str, categories: Option<&[Value]>) -> Result<Value> {
        echo("ai.moderation", json!({ "input": input, "categories": categories }))
    }
}

impl Analytics for DryRun {
    fn get(&self, zone_id: &str, since: &str, until: &str) -> Result<Value> {
        echo(
            "analytics.get",
            json!({ "zone_id": zone_id, "since": since, "until": until }),
        )
    }
}

impl Reasoning for DryRun {
    fn sequential_thinking(
        &self,
        input: &str,
        steps: i64,
        context: Option<&str>,
    ) -> Result<Value> {
        echo(
            "reasoning.sequential_thinking",
            json!({ "input": input, "steps": steps, "context": context }),
        )
    }

    fn context_manager(
        &self,
        action: &str,
        context_id: &str,
        content: &Map<String, Value>,
    ) -> Result<Value> {
        echo(
            "reasoning.context_manager",
            json!({ "action": action, "context_id": context_id, "content": content }),
        )
    }
}

impl MemoryStore for DryRun {
    fn store(
        &self,
        key: &str,
        value: &str,
        namespace: Option<&str>,
        ttl: Option<i64>,
    ) -> Result<Value> {
        echo(
            "memory.store",
            json!({ "key": key, "value": value, "namespace": namespace, "ttl": ttl }),
        )
    }

    fn retrieve(&self, key: &str, namespace: Option<&str>) -> Result<Value> {
        echo("memory.retrieve", json!({ "key": key, "namespace": namespace }))
    }

    fn search(&self, query: &str, namespace: Option<&str>, limit: i64) -> Result<Value> {
        echo(
            "memory.search",
            json!({ "query": query, "namespace": namespace, "limit": limit }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_run_echoes_request_shape() {
        let v = KvStore::get(&DryRun, "ns1", "k1").unwrap();
        assert_eq!(v["dry_run"], json!(true));
        assert_eq!(v["action"], json!("kv.get"));
        assert_eq!(v["request"]["namespace"], json!("ns1"));
        assert_eq!(v["request"]["key"], json!("k1"));
    }

    #[test]
    fn bundle_is_cloneable_and_shared() {
        let backends = Backends::dry_run();
        let second = backends.clone();
        assert!(Arc::ptr_eq(&backends.kv, &second.kv));
    }
}
