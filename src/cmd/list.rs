/*!
`list.rs`

Implements the `list` subcommand: every registered command with its usage
string and description, sorted by name (the registry guarantees the order).

JSON Output Shape:
{
  "status": "ok",
  "count": 27,
  "commands": [
    { "name": "claude_completion", "usage": "claude_completion <prompt> [model] ...", "description": "..." }
  ]
}
*/

use anyhow::Result;
use clap::Args;
use serde_json::json;

use crate::cmd::format::{Role, StyleOptions, color, emoji, table};
use crate::registry::Registry;

/// CLI arguments for `cloudtool list`
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

/// Entry point for the list subcommand.
pub fn execute_list(args: ListArgs, registry: &Registry) -> Result<()> {
    let entries: Vec<(String, String, String)> = registry
        .list()
        .into_iter()
        .map(|(name, description)| {
            let usage = registry
                .get(name)
                .map(|spec| spec.usage())
                .unwrap_or_else(|| name.to_string());
            (name.to_string(), usage, description.to_string())
        })
        .collect();

    if args.json {
        let commands: Vec<_> = entries
            .iter()
            .map(|(name, usage, description)| {
                json!({ "name": name, "usage": usage, "description": description })
            })
            .collect();
        let envelope = json!({
            "status": "ok",
            "count": commands.len(),
            "commands": commands,
        });
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    let style = StyleOptions::detect();
    println!(
        "{} {}",
        emoji("list", &style),
        color(Role::Primary, format!("Commands ({})", entries.len()), &style)
    );
    let rows: Vec<Vec<String>> = entries
        .into_iter()
        .map(|(_, usage, description)| vec![usage, description])
        .collect();
    print!("{}", table(&["USAGE", "DESCRIPTION"], &rows, &style));
    Ok(())
}
