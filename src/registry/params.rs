/*!
`params.rs`

Typed parameter schema + validator.

A command declares its arguments as an ordered list of `ParamSpec`s. The
validator checks one raw JSON bag against that list and produces a
`ValidatedArgs` map handlers can read through typed accessors.

Kind model (mirrors the JSON value space):
  string | integer | number | boolean | list | map

The only coercion subtlety lives here: `Integer` accepts whole JSON numbers
only, while `Number` accepts both integer and floating representations.

Unknown-key policy: STRICT. Keys the schema does not declare fail validation
with `UnknownParameter`. Callers that want pass-through extras must declare
a `Map` parameter and nest them.

Validation is pure: the raw bag is never mutated, and validating the same
bag twice yields identical results.
*/

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use super::errors::{ArgAccessError, ValidationError};

/* -------------------------------------------------------------------------- */
/* Kinds                                                                      */
/* -------------------------------------------------------------------------- */

/// Declared kind of a command parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    String,
    Integer,
    Number,
    Boolean,
    List,
    Map,
}

impl ParamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamKind::String => "string",
            ParamKind::Integer => "integer",
            ParamKind::Number => "number",
            ParamKind::Boolean => "boolean",
            ParamKind::List => "list",
            ParamKind::Map => "map",
        }
    }

    /// Whether a runtime JSON value satisfies this kind.
    ///
    /// `Integer` only matches numbers with an exact whole representation;
    /// `Number` matches any JSON number.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ParamKind::String => value.is_string(),
            ParamKind::Integer => value.is_i64() || value.is_u64(),
            ParamKind::Number => value.is_number(),
            ParamKind::Boolean => value.is_boolean(),
            ParamKind::List => value.is_array(),
            ParamKind::Map => value.is_object(),
        }
    }
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human name for the runtime kind of a JSON value (used in mismatch errors).
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

/* -------------------------------------------------------------------------- */
/* ParamSpec                                                                  */
/* -------------------------------------------------------------------------- */

/// Declarative description of one expected argument.
///
/// Invariant: a required parameter never carries a default. The builder keeps
/// this by construction — `default_value` marks the parameter optional.
#[derive(Debug, Clone, Serialize)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    pub description: String,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl ParamSpec {
    /// A mandatory parameter.
    pub fn required(name: impl Into<String>, kind: ParamKind) -> Self {
        ParamSpec {
            name: name.into(),
            kind,
            description: String::new(),
            required: true,
            default: None,
        }
    }

    /// An optional parameter with no default (omitted when absent).
    pub fn optional(name: impl Into<String>, kind: ParamKind) -> Self {
        ParamSpec {
            required: false,
            ..Self::required(name, kind)
        }
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    /// Attach a default, which also makes the parameter optional.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.required = false;
        self.default = Some(value.into());
        self
    }
}

/* -------------------------------------------------------------------------- */
/* ValidatedArgs                                                              */
/* -------------------------------------------------------------------------- */

/// Schema-conformant argument bag, produced only by `validate`.
///
/// Guaranteed to hold every required parameter and every defaulted parameter
/// of the schema it was validated against, each matching its declared kind.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ValidatedArgs(Map<String, Value>);

impl ValidatedArgs {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }

    /// Required-string accessor; `?`-friendly inside handlers.
    pub fn str(&self, name: &str) -> Result<&str, ArgAccessError> {
        self.require(name)?.as_str().ok_or(ArgAccessError::WrongKind {
            name: name.to_string(),
            wanted: "string",
        })
    }

    pub fn integer(&self, name: &str) -> Result<i64, ArgAccessError> {
        self.require(name)?.as_i64().ok_or(ArgAccessError::WrongKind {
            name: name.to_string(),
            wanted: "integer",
        })
    }

    pub fn number(&self, name: &str) -> Result<f64, ArgAccessError> {
        self.require(name)?.as_f64().ok_or(ArgAccessError::WrongKind {
            name: name.to_string(),
            wanted: "number",
        })
    }

    pub fn boolean(&self, name: &str) -> Result<bool, ArgAccessError> {
        self.require(name)?
            .as_bool()
            .ok_or(ArgAccessError::WrongKind {
                name: name.to_string(),
                wanted: "boolean",
            })
    }

    pub fn list(&self, name: &str) -> Result<&Vec<Value>, ArgAccessError> {
        self.require(name)?
            .as_array()
            .ok_or(ArgAccessError::WrongKind {
                name: name.to_string(),
                wanted: "list",
            })
    }

    pub fn map(&self, name: &str) -> Result<&Map<String, Value>, ArgAccessError> {
        self.require(name)?
            .as_object()
            .ok_or(ArgAccessError::WrongKind {
                name: name.to_string(),
                wanted: "map",
            })
    }

    /* Optional variants: absent is fine, wrong kind is not. */

    pub fn opt_str(&self, name: &str) -> Result<Option<&str>, ArgAccessError> {
        match self.get(name) {
            None => Ok(None),
            Some(_) => self.str(name).map(Some),
        }
    }

    pub fn opt_integer(&self, name: &str) -> Result<Option<i64>, ArgAccessError> {
        match self.get(name) {
            None => Ok(None),
            Some(_) => self.integer(name).map(Some),
        }
    }

    pub fn opt_number(&self, name: &str) -> Result<Option<f64>, ArgAccessError> {
        match self.get(name) {
            None => Ok(None),
            Some(_) => self.number(name).map(Some),
        }
    }

    pub fn opt_list(&self, name: &str) -> Result<Option<&Vec<Value>>, ArgAccessError> {
        match self.get(name) {
            None => Ok(None),
            Some(_) => self.list(name).map(Some),
        }
    }

    pub fn opt_map(&self, name: &str) -> Result<Option<&Map<String, Value>>, ArgAccessError> {
        match self.get(name) {
            None => Ok(None),
            Some(_) => self.map(name).map(Some),
        }
    }

    fn require(&self, name: &str) -> Result<&Value, ArgAccessError> {
        self.get(name)
            .ok_or_else(|| ArgAccessError::NotPresent(name.to_string()))
    }
}

/* -------------------------------------------------------------------------- */
/* Validation                                                                 */
/* -------------------------------------------------------------------------- */

/// Validate one raw argument bag against an ordered schema.
///
/// Walks the schema in declaration order: required-and-absent fails first,
/// then kinds are checked exactly; absent optionals are filled from their
/// default or omitted. A final strict pass rejects undeclared keys.
pub fn validate(
    specs: &[ParamSpec],
    raw: &Map<String, Value>,
) -> Result<ValidatedArgs, ValidationError> {
    let mut out = Map::with_capacity(specs.len());

    for spec in specs {
        match raw.get(&spec.name) {
            Some(value) => {
                if !spec.kind.matches(value) {
                    return Err(ValidationError::TypeMismatch {
                        name: spec.name.clone(),
                        expected: spec.kind,
                        actual: kind_name(value),
                    });
                }
                out.insert(spec.name.clone(), value.clone());
            }
            None if spec.required => {
                return Err(ValidationError::MissingRequired(spec.name.clone()));
            }
            None => {
                if let Some(default) = &spec.default {
                    out.insert(spec.name.clone(), default.clone());
                }
            }
        }
    }

    for key in raw.keys() {
        if !specs.iter().any(|s| s.name == *key) {
            return Err(ValidationError::UnknownParameter(key.clone()));
        }
    }

    Ok(ValidatedArgs(out))
}

/* --------------------------------- Tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap_or_default()
    }

    fn kv_get_spec() -> Vec<ParamSpec> {
        vec![
            ParamSpec::required("namespaceId", ParamKind::String),
            ParamSpec::required("key", ParamKind::String),
        ]
    }

    #[test]
    fn accepts_complete_required_bag() {
        let args = validate(&kv_get_spec(), &raw(json!({"namespaceId":"ns1","key":"k1"})))
            .expect("valid bag");
        assert_eq!(args.str("namespaceId").unwrap(), "ns1");
        assert_eq!(args.str("key").unwrap(), "k1");
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn missing_required_fails_by_name() {
        let err = validate(&kv_get_spec(), &raw(json!({"namespaceId":"ns1"}))).unwrap_err();
        assert_eq!(err, ValidationError::MissingRequired("key".into()));
    }

    #[test]
    fn default_fills_absent_optional() {
        let specs = vec![ParamSpec::optional("limit", ParamKind::Integer).default_value(100)];
        let args = validate(&specs, &raw(json!({}))).expect("default applies");
        assert_eq!(args.integer("limit").unwrap(), 100);
    }

    #[test]
    fn optional_without_default_is_omitted() {
        let specs = vec![
            ParamSpec::required("bucket", ParamKind::String),
            ParamSpec::optional("prefix", ParamKind::String),
        ];
        let args = validate(&specs, &raw(json!({"bucket":"b"}))).unwrap();
        assert!(!args.contains("prefix"));
        assert_eq!(args.opt_str("prefix").unwrap(), None);
    }

    #[test]
    fn default_value_clears_required_flag() {
        let spec = ParamSpec::required("limit", ParamKind::Integer).default_value(25);
        assert!(!spec.required);
        assert_eq!(spec.default, Some(json!(25)));
    }

    #[test]
    fn integer_rejects_float_number_accepts_both() {
        let int_spec = vec![ParamSpec::required("ttl", ParamKind::Integer)];
        let err = validate(&int_spec, &raw(json!({"ttl": 1.5}))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TypeMismatch {
                name: "ttl".into(),
                expected: ParamKind::Integer,
                actual: "number",
            }
        );
        assert!(validate(&int_spec, &raw(json!({"ttl": 60}))).is_ok());

        let num_spec = vec![ParamSpec::required("temperature", ParamKind::Number)];
        assert!(validate(&num_spec, &raw(json!({"temperature": 0.7}))).is_ok());
        assert!(validate(&num_spec, &raw(json!({"temperature": 1}))).is_ok());
    }

    #[test]
    fn string_kind_rejects_numeric_value() {
        let err = validate(
            &kv_get_spec(),
            &raw(json!({"namespaceId":"ns1","key": 7})),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::TypeMismatch {
                name: "key".into(),
                expected: ParamKind::String,
                actual: "integer",
            }
        );
    }

    #[test]
    fn null_reported_as_null_mismatch() {
        let err = validate(&kv_get_spec(), &raw(json!({"namespaceId": null, "key":"k"})))
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::TypeMismatch {
                name: "namespaceId".into(),
                expected: ParamKind::String,
                actual: "null",
            }
        );
    }

    #[test]
    fn strict_policy_rejects_undeclared_keys() {
        let err = validate(
            &kv_get_spec(),
            &raw(json!({"namespaceId":"ns1","key":"k1","shard":"s0"})),
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::UnknownParameter("shard".into()));
    }

    #[test]
    fn list_and_map_kinds_match_containers() {
        let specs = vec![
            ParamSpec::required("params", ParamKind::List),
            ParamSpec::required("bindings", ParamKind::Map),
        ];
        let args = validate(
            &specs,
            &raw(json!({"params": [1, "two"], "bindings": {"KV":"ns1"}})),
        )
        .unwrap();
        assert_eq!(args.list("params").unwrap().len(), 2);
        assert_eq!(args.map("bindings").unwrap().get("KV"), Some(&json!("ns1")));
    }

    #[test]
    fn validation_is_pure_and_idempotent() {
        let specs = vec![
            ParamSpec::required("key", ParamKind::String),
            ParamSpec::optional("limit", ParamKind::Integer).default_value(10),
        ];
        let bag = raw(json!({"key":"k"}));
        let before = bag.clone();

        let first = validate(&specs, &bag).unwrap();
        let second = validate(&specs, &bag).unwrap();
        assert_eq!(first, second);
        assert_eq!(bag, before, "raw bag must not be mutated");
    }

    #[test]
    fn accessor_wrong_kind_is_an_error_not_a_panic() {
        let specs = vec![ParamSpec::required("key", ParamKind::String)];
        let args = validate(&specs, &raw(json!({"key":"k"}))).unwrap();
        assert_eq!(
            args.integer("key"),
            Err(ArgAccessError::WrongKind {
                name: "key".into(),
                wanted: "integer",
            })
        );
        assert_eq!(
            args.str("absent"),
            Err(ArgAccessError::NotPresent("absent".into()))
        );
    }

    #[test]
    fn kind_names_cover_value_space() {
        assert_eq!(kind_name(&json!("s")), "string");
        assert_eq!(kind_name(&json!(3)), "integer");
        assert_eq!(kind_name(&json!(3.5)), "number");
        assert_eq!(kind_name(&json!(true)), "boolean");
        assert_eq!(kind_name(&json!([])), "list");
        assert_eq!(kind_name(&json!({})), "map");
        assert_eq!(kind_name(&Value::Null), "null");
    }
}
