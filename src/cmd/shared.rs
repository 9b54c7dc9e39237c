/*!
shared.rs - shared helpers for subcommands.

Focus:
  - coerce_value: raw CLI string -> typed JSON value using the declared kind
  - parse_param: KEY=VALUE splitting for --param
  - load_param_file: JSON or YAML bag from --param-file
  - build_raw_args: positional + file + --param merge, in precedence order

The registry core never sees raw strings: everything funnels through here
into one `serde_json::Map` before dispatch.
*/

use std::collections::HashMap;

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

use crate::registry::{CommandSpec, ParamKind};

/* ---- Coercion ---- */

/// Coerce a raw CLI string into a JSON value using the declared kind.
///
/// Values that do not parse are passed through as strings so the validator
/// reports a `TypeMismatch` naming the parameter, instead of this layer
/// inventing its own error text.
pub fn coerce_value(raw: &str, kind: ParamKind) -> Value {
    match kind {
        ParamKind::String => Value::String(raw.to_string()),
        ParamKind::Integer => raw
            .parse::<i64>()
            .map(|n| Value::Number(n.into()))
            .unwrap_or_else(|_| Value::String(raw.to_string())),
        ParamKind::Number => raw
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(raw.to_string())),
        ParamKind::Boolean => {
            let l = raw.to_ascii_lowercase();
            match l.as_str() {
                "true" | "1" | "yes" | "y" => Value::Bool(true),
                "false" | "0" | "no" | "n" => Value::Bool(false),
                _ => Value::String(raw.to_string()),
            }
        }
        ParamKind::List => {
            // Inline JSON wins; otherwise comma-split into strings.
            if raw.trim_start().starts_with('[')
                && let Ok(v @ Value::Array(_)) = serde_json::from_str::<Value>(raw)
            {
                return v;
            }
            Value::Array(
                raw.split(',')
                    .map(|s| Value::String(s.trim().to_string()))
                    .collect(),
            )
        }
        ParamKind::Map => {
            if let Ok(v @ Value::Object(_)) = serde_json::from_str::<Value>(raw) {
                v
            } else {
                Value::String(raw.to_string())
            }
        }
    }
}

/* ---- --param Parsing ---- */

/// Split one `KEY=VALUE` argument. The value may itself contain `=`.
pub fn parse_param(s: &str) -> Result<(String, String)> {
    match s.split_once('=') {
        Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.to_string())),
        _ => bail!("invalid --param '{}' (expected KEY=VALUE)", s),
    }
}

/* ---- Param Files ---- */

/// Load a parameter bag from a JSON or YAML file. The top level must be a
/// mapping; values keep their file-native types (no string coercion).
pub fn load_param_file(path: &str) -> Result<Map<String, Value>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read param file '{}'", path))?;

    let value: Value = if path.ends_with(".yaml") || path.ends_with(".yml") {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML param file '{}'", path))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON param file '{}'", path))?
    };

    match value {
        Value::Object(map) => Ok(map),
        other => bail!(
            "param file '{}' must contain a mapping at the top level, got {}",
            path,
            crate::registry::params::kind_name(&other)
        ),
    }
}

/* ---- Raw Bag Assembly ---- */

/// Merge the three CLI argument sources into one raw bag for dispatch.
///
/// Precedence (lowest to highest): param file, positionals, --param.
/// Positionals are mapped onto the command's parameters in declaration
/// order and coerced to the declared kind; --param keys are coerced when
/// declared, and passed through as strings when not (the strict validator
/// then rejects them by name).
pub fn build_raw_args(
    spec: &CommandSpec,
    positionals: &[String],
    params: &HashMap<String, String>,
    param_file: Option<&str>,
) -> Result<Map<String, Value>> {
    let mut raw = match param_file {
        Some(path) => load_param_file(path)?,
        None => Map::new(),
    };

    let declared = spec.params();
    if positionals.len() > declared.len() {
        bail!(
            "too many arguments for '{}': expected at most {}, got {} (usage: {})",
            spec.name(),
            declared.len(),
            positionals.len(),
            spec.usage()
        );
    }
    for (value, param) in positionals.iter().zip(declared) {
        raw.insert(param.name.clone(), coerce_value(value, param.kind));
    }

    for (key, value) in params {
        let coerced = match declared.iter().find(|p| p.name == *key) {
            Some(param) => coerce_value(value, param.kind),
            None => Value::String(value.clone()),
        };
        raw.insert(key.clone(), coerced);
    }

    Ok(raw)
}

/* ---- Tests ---- */

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{CommandResult, ParamSpec};
    use serde_json::json;

    fn kv_put_spec() -> CommandSpec {
        CommandSpec::new(
            "kv_put",
            "store a value",
            vec![
                ParamSpec::required("namespaceId", ParamKind::String),
                ParamSpec::required("key", ParamKind::String),
                ParamSpec::required("value", ParamKind::String),
                ParamSpec::optional("expirationTtl", ParamKind::Integer),
            ],
            |_| Ok(CommandResult::ok()),
        )
    }

    #[test]
    fn coerce_integer() {
        assert_eq!(coerce_value("42", ParamKind::Integer), json!(42));
        assert_eq!(
            coerce_value("x42", ParamKind::Integer),
            json!("x42"),
            "invalid integer remains string"
        );
    }

    #[test]
    fn coerce_boolean() {
        assert_eq!(coerce_value("true", ParamKind::Boolean), json!(true));
        assert_eq!(coerce_value("No", ParamKind::Boolean), json!(false));
        assert_eq!(coerce_value("maybe", ParamKind::Boolean), json!("maybe"));
    }

    #[test]
    fn coerce_list_comma_and_json() {
        assert_eq!(
            coerce_value("a,b, c", ParamKind::List),
            json!(["a", "b", "c"]),
            "comma splitting with trimming"
        );
        assert_eq!(coerce_value(r#"[1, "two"]"#, ParamKind::List), json!([1, "two"]));
    }

    #[test]
    fn coerce_map_inline_json() {
        assert_eq!(
            coerce_value(r#"{"KV":"ns1"}"#, ParamKind::Map),
            json!({"KV":"ns1"})
        );
        assert_eq!(coerce_value("not json", ParamKind::Map), json!("not json"));
    }

    #[test]
    fn parse_param_splits_on_first_equals() {
        assert_eq!(
            parse_param("query=a=b").unwrap(),
            ("query".to_string(), "a=b".to_string())
        );
        assert!(parse_param("noequals").is_err());
        assert!(parse_param("=value").is_err());
    }

    #[test]
    fn positionals_map_in_declaration_order() {
        let spec = kv_put_spec();
        let raw = build_raw_args(
            &spec,
            &["ns1".into(), "k1".into(), "v1".into(), "60".into()],
            &HashMap::new(),
            None,
        )
        .unwrap();
        assert_eq!(raw.get("namespaceId"), Some(&json!("ns1")));
        assert_eq!(raw.get("expirationTtl"), Some(&json!(60)));
    }

    #[test]
    fn too_many_positionals_is_an_error() {
        let spec = kv_put_spec();
        let err = build_raw_args(
            &spec,
            &["a".into(), "b".into(), "c".into(), "d".into(), "e".into()],
            &HashMap::new(),
            None,
        )
        .unwrap_err();
        assert!(err.to_string().contains("too many arguments"));
    }

    #[test]
    fn named_params_override_positionals() {
        let spec = kv_put_spec();
        let mut params = HashMap::new();
        params.insert("value".to_string(), "override".to_string());
        let raw = build_raw_args(
            &spec,
            &["ns1".into(), "k1".into(), "v1".into()],
            &params,
            None,
        )
        .unwrap();
        assert_eq!(raw.get("value"), Some(&json!("override")));
    }

    #[test]
    fn undeclared_named_param_stays_string() {
        let spec = kv_put_spec();
        let mut params = HashMap::new();
        params.insert("shard".to_string(), "3".to_string());
        let raw = build_raw_args(&spec, &[], &params, None).unwrap();
        // Left for the strict validator to reject by name.
        assert_eq!(raw.get("shard"), Some(&json!("3")));
    }

    #[test]
    fn param_file_yaml_round_trip() {
        let dir = std::env::temp_dir();
        let path = dir.join("cloudtool_params_test.yaml");
        std::fs::write(&path, "namespaceId: ns1\nexpirationTtl: 60\n").unwrap();

        let raw = load_param_file(path.to_str().unwrap()).unwrap();
        assert_eq!(raw.get("namespaceId"), Some(&json!("ns1")));
        assert_eq!(raw.get("expirationTtl"), Some(&json!(60)));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn param_file_must_be_a_mapping() {
        let dir = std::env::temp_dir();
        let path = dir.join("cloudtool_params_list.json");
        std::fs::write(&path, "[1,2,3]").unwrap();

        let err = load_param_file(path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("mapping at the top level"));

        let _ = std::fs::remove_file(&path);
    }
}
