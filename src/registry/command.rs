/*!
`command.rs`

Command specs, result envelope, and the dispatching registry.

Lifecycle is build -> serve: commands are registered while the registry is
exclusively owned, then the value is shared immutably. `dispatch` takes
`&self` and handlers are `Send + Sync`, so concurrent dispatch from many
callers needs no locking. There is no de-registration.

A handler is a plain function of `ValidatedArgs`. Whatever backend client it
talks to is captured at construction time (see `tools::builtin`), never read
from global state, which is what makes the whole registry testable against
fakes.
*/

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use super::errors::{DispatchError, DuplicateCommand};
use super::params::{ParamSpec, ValidatedArgs, validate};

/* -------------------------------------------------------------------------- */
/* Result Envelope                                                            */
/* -------------------------------------------------------------------------- */

/// Uniform outcome of a handler: either complete, or the handler errored.
#[derive(Debug, Clone, Serialize)]
pub struct CommandResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CommandResult {
    pub fn ok() -> Self {
        CommandResult {
            success: true,
            data: None,
            message: None,
        }
    }

    pub fn with_data(data: Value) -> Self {
        CommandResult {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn message(mut self, text: impl Into<String>) -> Self {
        self.message = Some(text.into());
        self
    }
}

/* -------------------------------------------------------------------------- */
/* CommandSpec                                                                */
/* -------------------------------------------------------------------------- */

/// Handler body invoked once arguments validate.
pub type Handler = Box<dyn Fn(&ValidatedArgs) -> anyhow::Result<CommandResult> + Send + Sync>;

/// A named, schema-described operation.
///
/// Parameter declaration order is meaningful: the CLI maps positional
/// arguments onto parameters in this order.
pub struct CommandSpec {
    name: String,
    description: String,
    params: Vec<ParamSpec>,
    handler: Handler,
}

impl CommandSpec {
    pub fn new<F>(
        name: impl Into<String>,
        description: impl Into<String>,
        params: Vec<ParamSpec>,
        handler: F,
    ) -> Self
    where
        F: Fn(&ValidatedArgs) -> anyhow::Result<CommandResult> + Send + Sync + 'static,
    {
        CommandSpec {
            name: name.into(),
            description: description.into(),
            params,
            handler: Box::new(handler),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    /// Usage line derived from the schema, `<x>` required, `[y]` optional,
    /// in declaration order. E.g. `kv_put <namespaceId> <key> <value> [expirationTtl]`.
    pub fn usage(&self) -> String {
        let mut usage = self.name.clone();
        for p in &self.params {
            if p.required {
                usage.push_str(&format!(" <{}>", p.name));
            } else {
                usage.push_str(&format!(" [{}]", p.name));
            }
        }
        usage
    }
}

impl std::fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSpec")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/* -------------------------------------------------------------------------- */
/* Registry                                                                   */
/* -------------------------------------------------------------------------- */

/// Immutable-after-construction map from command name to spec.
///
/// `BTreeMap` keeps `list()` sorted by name with no extra bookkeeping.
#[derive(Debug, Default)]
pub struct Registry {
    commands: BTreeMap<String, CommandSpec>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Register one command. Names are unique; a second registration under
    /// the same name is refused rather than silently replaced.
    pub fn register(&mut self, spec: CommandSpec) -> Result<(), DuplicateCommand> {
        if self.commands.contains_key(spec.name()) {
            return Err(DuplicateCommand(spec.name().to_string()));
        }
        self.commands.insert(spec.name().to_string(), spec);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.get(name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// `(name, description)` pairs, sorted by name.
    pub fn list(&self) -> Vec<(&str, &str)> {
        self.commands
            .values()
            .map(|c| (c.name(), c.description()))
            .collect()
    }

    /// Resolve, validate, execute.
    ///
    /// Handler failures come back as `HandlerFailed` with the original cause
    /// attached; they never propagate uncontrolled and never poison the
    /// registry for later calls.
    pub fn dispatch(
        &self,
        name: &str,
        raw: &Map<String, Value>,
    ) -> Result<CommandResult, DispatchError> {
        let spec = self
            .commands
            .get(name)
            .ok_or_else(|| DispatchError::UnknownCommand(name.to_string()))?;
        let args = validate(spec.params(), raw)?;
        (spec.handler)(&args).map_err(|source| DispatchError::HandlerFailed {
            name: name.to_string(),
            source,
        })
    }
}

/* --------------------------------- Tests ---------------------------------- */
