//! R2 object-storage commands: bucket CRUD plus object CRUD.

use std::sync::Arc;

use crate::registry::{CommandResult, CommandSpec, ParamKind, ParamSpec};

use super::backend::ObjectStore;

pub fn commands(r2: &Arc<dyn ObjectStore>) -> Vec<CommandSpec> {
    let mut specs = Vec::new();

    let backend = r2.clone();
    specs.push(CommandSpec::new(
        "r2_list_buckets",
        "List all R2 buckets",
        vec![],
        move |_args| {
            let data = backend.list_buckets()?;
            Ok(CommandResult::with_data(data).message("Listing R2 buckets"))
        },
    ));

    let backend = r2.clone();
    specs.push(CommandSpec::new(
        "r2_create_bucket",
        "Create a new R2 bucket",
        vec![ParamSpec::required("name", ParamKind::String).describe("bucket name")],
        move |args| {
            let name = args.str("name")?;
            let data = backend.create_bucket(name)?;
            Ok(CommandResult::with_data(data).message(format!("Creating R2 bucket: '{name}'")))
        },
    ));

    let backend = r2.clone();
    specs.push(CommandSpec::new(
        "r2_delete_bucket",
        "Delete an R2 bucket",
        vec![ParamSpec::required("name", ParamKind::String).describe("bucket name")],
        move |args| {
            let name = args.str("name")?;
            let data = backend.delete_bucket(name)?;
            Ok(CommandResult::with_data(data).message(format!("Deleting R2 bucket: '{name}'")))
        },
    ));

    let backend = r2.clone();
    specs.push(CommandSpec::new(
        "r2_list_objects",
        "List objects in a bucket",
        vec![
            ParamSpec::required("bucket", ParamKind::String).describe("bucket name"),
            ParamSpec::optional("prefix", ParamKind::String).describe("object key prefix"),
            ParamSpec::optional("delimiter", ParamKind::String).describe("grouping delimiter"),
            ParamSpec::optional("limit", ParamKind::Integer).describe("max objects to return"),
        ],
        move |args| {
            let bucket = args.str("bucket")?;
            let prefix = args.opt_str("prefix")?;
            let delimiter = args.opt_str("delimiter")?;
            let limit = args.opt_integer("limit")?;
            let data = backend.list_objects(bucket, prefix, delimiter, limit)?;
            Ok(CommandResult::with_data(data)
                .message(format!("Listing objects in bucket '{bucket}'")))
        },
    ));

    let backend = r2.clone();
    specs.push(CommandSpec::new(
        "r2_get_object",
        "Retrieve an object from a bucket",
        vec![
            ParamSpec::required("bucket", ParamKind::String).describe("bucket name"),
            ParamSpec::required("key", ParamKind::String).describe("object key"),
        ],
        move |args| {
            let bucket = args.str("bucket")?;
            let key = args.str("key")?;
            let data = backend.get_object(bucket, key)?;
            Ok(CommandResult::with_data(data).message(format!(
                "Retrieving object '{key}' from bucket '{bucket}'"
            )))
        },
    ));

    let backend = r2.clone();
    specs.push(CommandSpec::new(
        "r2_put_object",
        "Store an object into a bucket",
        vec![
            ParamSpec::required("bucket", ParamKind::String).describe("bucket name"),
            ParamSpec::required("key", ParamKind::String).describe("object key"),
            ParamSpec::required("content", ParamKind::String).describe("object body"),
            ParamSpec::optional("contentType", ParamKind::String).describe("MIME type"),
        ],
        move |args| {
            let bucket = args.str("bucket")?;
            let key = args.str("key")?;
            let content = args.str("content")?;
            let content_type = args.opt_str("contentType")?;
            let data = backend.put_object(bucket, key, content, content_type)?;
            Ok(CommandResult::with_data(data).message(format!(
                "Storing object '{key}' into bucket '{bucket}'"
            )))
        },
    ));

    let backend = r2.clone();
    specs.push(CommandSpec::new(
        "r2_delete_object",
        "Delete an object from a bucket",
        vec![
            ParamSpec::required("bucket", ParamKind::String).describe("bucket name"),
            ParamSpec::required("key", ParamKind::String).describe("object key"),
        ],
        move |args| {
            let bucket = args.str("bucket")?;
            let key = args.str("key")?;
            let data = backend.delete_object(bucket, key)?;
            Ok(CommandResult::with_data(data).message(format!(
                "Deleting object '{key}' from bucket '{bucket}'"
            )))
        },
    ));

    specs
}
