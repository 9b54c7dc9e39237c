//! D1 SQL database commands: database CRUD plus `d1_query`.

use std::sync::Arc;

use crate::registry::{CommandResult, CommandSpec, ParamKind, ParamSpec};

use super::backend::SqlDatabase;

pub fn commands(d1: &Arc<dyn SqlDatabase>) -> Vec<CommandSpec> {
    let mut specs = Vec::new();

    let backend = d1.clone();
    specs.push(CommandSpec::new(
        "d1_list_databases",
        "List all D1 databases",
        vec![],
        move |_args| {
            let data = backend.list_databases()?;
            Ok(CommandResult::with_data(data).message("Listing D1 databases"))
        },
    ));

    let backend = d1.clone();
    specs.push(CommandSpec::new(
        "d1_create_database",
        "Create a new D1 database",
        vec![ParamSpec::required("name", ParamKind::String).describe("database name")],
        move |args| {
            let name = args.str("name")?;
            let data = backend.create_database(name)?;
            Ok(CommandResult::with_data(data).message(format!("Creating D1 database: '{name}'")))
        },
    ));

    let backend = d1.clone();
    specs.push(CommandSpec::new(
        "d1_delete_database",
        "Delete a D1 database",
        vec![ParamSpec::required("databaseId", ParamKind::String).describe("database id")],
        move |args| {
            let database_id = args.str("databaseId")?;
            let data = backend.delete_database(database_id)?;
            Ok(CommandResult::with_data(data)
                .message(format!("Deleting D1 database: '{database_id}'")))
        },
    ));

    let backend = d1.clone();
    specs.push(CommandSpec::new(
        "d1_query",
        "Run a SQL query against a database",
        vec![
            ParamSpec::required("databaseId", ParamKind::String).describe("database id"),
            ParamSpec::required("query", ParamKind::String).describe("SQL text"),
            ParamSpec::optional("params", ParamKind::List).describe("positional bind values"),
        ],
        move |args| {
            let database_id = args.str("databaseId")?;
            let query = args.str("query")?;
            let params = args.opt_list("params")?;
            let data = backend.query(database_id, query, params.map(|v| v.as_slice()))?;
            Ok(CommandResult::with_data(data)
                .message(format!("Querying database '{database_id}': {query}")))
        },
    ));

    specs
}
