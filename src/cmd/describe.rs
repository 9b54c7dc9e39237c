/*!
`describe.rs`

Implements the `describe` subcommand: full parameter schema for one
command, for help surfaces and script authors.

JSON Output Shape:
{
  "status": "ok",
  "command": "kv_put",
  "usage": "kv_put <namespaceId> <key> <value> [expirationTtl]",
  "description": "...",
  "parameters": [
    { "name":"namespaceId", "kind":"string", "description":"...", "required":true },
    { "name":"expirationTtl", "kind":"integer", "description":"...", "required":false }
  ]
}
*/

use anyhow::Result;
use clap::Args;
use serde_json::json;

use crate::cmd::format::{Role, StyleOptions, color, emoji, table};
use crate::registry::Registry;

/// CLI arguments for `cloudtool describe <command>`
#[derive(Args, Debug)]
pub struct DescribeArgs {
    /// Command name to describe
    pub command: String,

    /// Output JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

/// Entry point for the describe subcommand.
pub fn execute_describe(args: DescribeArgs, registry: &Registry) -> Result<()> {
    let style = StyleOptions::detect();

    let Some(spec) = registry.get(&args.command) else {
        if args.json {
            eprintln!(
                "{}",
                json!({ "status": "error", "error": format!("Tool '{}' not recognized.", args.command) })
            );
        } else {
            eprintln!(
                "{} {}",
                emoji("error", &style),
                color(
                    Role::Error,
                    format!("Tool '{}' not recognized.", args.command),
                    &style
                )
            );
        }
        std::process::exit(2);
    };

    if args.json {
        let envelope = json!({
            "status": "ok",
            "command": spec.name(),
            "usage": spec.usage(),
            "description": spec.description(),
            "parameters": spec.params(),
        });
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    println!(
        "{} {}",
        emoji("tool", &style),
        color(Role::Primary, spec.name(), &style)
    );
    println!("{}", spec.description());
    println!("Usage: {}", spec.usage());

    if !spec.params().is_empty() {
        let rows: Vec<Vec<String>> = spec
            .params()
            .iter()
            .map(|p| {
                let required = if p.required { "yes" } else { "no" };
                let default = p
                    .default
                    .as_ref()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".to_string());
                vec![
                    p.name.clone(),
                    p.kind.to_string(),
                    required.to_string(),
                    default,
                    p.description.clone(),
                ]
            })
            .collect();
        println!();
        print!(
            "{}",
            table(
                &["PARAMETER", "KIND", "REQUIRED", "DEFAULT", "DESCRIPTION"],
                &rows,
                &style
            )
        );
    }
    Ok(())
}
