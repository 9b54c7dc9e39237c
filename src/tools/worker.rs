//! Worker deployment commands: `worker_list`, `worker_get`, `worker_put`, `worker_delete`.

use std::sync::Arc;

use crate::registry::{CommandResult, CommandSpec, ParamKind, ParamSpec};

use super::backend::WorkerHost;

pub fn commands(workers: &Arc<dyn WorkerHost>) -> Vec<CommandSpec> {
    let mut specs = Vec::new();

    let backend = workers.clone();
    specs.push(CommandSpec::new(
        "worker_list",
        "List all deployed workers",
        vec![],
        move |_args| {
            let data = backend.list_workers()?;
            Ok(CommandResult::with_data(data).message("Listing workers"))
        },
    ));

    let backend = workers.clone();
    specs.push(CommandSpec::new(
        "worker_get",
        "Get a worker's script and metadata",
        vec![ParamSpec::required("name", ParamKind::String).describe("worker name")],
        move |args| {
            let name = args.str("name")?;
            let data = backend.get_worker(name)?;
            Ok(CommandResult::with_data(data).message(format!("Getting worker '{name}'")))
        },
    ));

    let backend = workers.clone();
    specs.push(CommandSpec::new(
        "worker_put",
        "Deploy (create or update) a worker script",
        vec![
            ParamSpec::required("name", ParamKind::String).describe("worker name"),
            ParamSpec::required("script", ParamKind::String).describe("script source"),
            ParamSpec::optional("bindings", ParamKind::Map).describe("resource bindings"),
            ParamSpec::optional("compatibility_date", ParamKind::String)
                .describe("runtime compatibility date"),
            ParamSpec::optional("compatibility_flags", ParamKind::List)
                .describe("runtime compatibility flags"),
        ],
        move |args| {
            let name = args.str("name")?;
            let script = args.str("script")?;
            let bindings = args.opt_map("bindings")?;
            let date = args.opt_str("compatibility_date")?;
            let flags = args.opt_list("compatibility_flags")?;
            let data = backend.deploy(name, script, bindings, date, flags.map(|v| v.as_slice()))?;
            Ok(CommandResult::with_data(data).message(format!("Deploying worker '{name}'")))
        },
    ));

    let backend = workers.clone();
    specs.push(CommandSpec::new(
        "worker_delete",
        "Delete a deployed worker",
        vec![ParamSpec::required("name", ParamKind::String).describe("worker name")],
        move |args| {
            let name = args.str("name")?;
            let data = backend.delete_worker(name)?;
            Ok(CommandResult::with_data(data).message(format!("Deleting worker '{name}'")))
        },
    ));

    specs
}
