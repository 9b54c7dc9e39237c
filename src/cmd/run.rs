/*!
`run.rs`

Implements the `run` subcommand: dispatch one registered command.

    cloudtool run kv_get ns1 mykey
    cloudtool run kv_put ns1 mykey myvalue --param expirationTtl=60
    cloudtool run worker_put --param-file deploy.yaml --json

Positional arguments map onto the command's declared parameters in
declaration order; `--param KEY=VALUE` overrides them and `--param-file`
(JSON or YAML) sits below both.

This module is presentation only. The registry returns structured errors
and this is the single place they become user-visible text:
  - unknown command          -> "Tool '<name>' not recognized."   (exit 2)
  - validation failure       -> error detail + "Usage: ..." line  (exit 2)
  - handler/backend failure  -> error with cause chain            (exit 1)

JSON Success Output:
{ "status":"ok", "command":"kv_get", "elapsed_ms":0, "result":{ ... } }

JSON Error Output:
{ "status":"error", "command":"kv_get", "error":"..." }
*/

use std::collections::HashMap;
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use serde_json::json;

use crate::cmd::format::{Role, StyleOptions, color, emoji};
use crate::cmd::shared::{build_raw_args, parse_param};
use crate::log_debug;
use crate::registry::{CommandSpec, DispatchError, Registry};

/* ---- Argument Struct ---- */

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Command name (see `cloudtool list`)
    pub command: String,

    /// Positional arguments, mapped to parameters in declaration order
    #[arg(value_name = "ARG")]
    pub args: Vec<String>,

    /// Provide parameter (KEY=VALUE), repeatable; overrides positionals
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Load parameters from file (JSON or YAML); lowest precedence
    #[arg(long = "param-file", value_name = "PATH")]
    pub param_file: Option<String>,

    /// Output JSON
    #[arg(long)]
    pub json: bool,
}

/* ---- Public Entry Point ---- */

pub fn execute_run(args: RunArgs, registry: &Registry) -> Result<()> {
    let style = StyleOptions::detect();

    let Some(spec) = registry.get(&args.command) else {
        fail(&args, &style, &not_recognized(&args.command), 2);
    };

    let mut params = HashMap::new();
    for pair in &args.params {
        let (k, v) = match parse_param(pair) {
            Ok(kv) => kv,
            Err(e) => fail(&args, &style, &e.to_string(), 2),
        };
        params.insert(k, v);
    }

    let raw = match build_raw_args(spec, &args.args, &params, args.param_file.as_deref()) {
        Ok(raw) => raw,
        Err(e) => fail(&args, &style, &e.to_string(), 2),
    };

    let started = Instant::now();
    let outcome = registry.dispatch(&args.command, &raw);
    log_debug!(
        "dispatch {} finished in {} ms",
        args.command,
        started.elapsed().as_millis()
    );

    match outcome {
        Ok(result) => {
            if args.json {
                let envelope = json!({
                    "status": "ok",
                    "command": args.command,
                    "elapsed_ms": started.elapsed().as_millis() as u64,
                    "result": result,
                });
                println!("{}", serde_json::to_string_pretty(&envelope)?);
            } else {
                if let Some(message) = &result.message {
                    println!("{} {}", emoji("success", &style), message);
                }
                if let Some(data) = &result.data {
                    println!(
                        "{}",
                        color(Role::Secondary, serde_json::to_string_pretty(data)?, &style)
                    );
                }
            }
            Ok(())
        }
        Err(err) => {
            // Validation failures also get the usage line, replacing the
            // old print-and-return-silently behavior with a real error.
            if !args.json && let Some(line) = usage_line(spec, &err) {
                eprintln!("{line}");
            }
            fail(&args, &style, &render_error(&err), exit_code(&err));
        }
    }
}

/* ---- Error Rendering ---- */

/// Error-stream text for a name no command is registered under.
fn not_recognized(name: &str) -> String {
    format!("Tool '{name}' not recognized.")
}

/// The `Usage:` line shown alongside validation failures; other dispatch
/// errors get no usage hint.
fn usage_line(spec: &CommandSpec, err: &DispatchError) -> Option<String> {
    matches!(err, DispatchError::Validation(_)).then(|| format!("Usage: {}", spec.usage()))
}

/// Full message for a dispatch error, including the handler's cause chain.
fn render_error(err: &DispatchError) -> String {
    match err {
        DispatchError::HandlerFailed { name, source } => {
            let mut msg = format!("command '{name}' failed: {source}");
            for cause in source.chain().skip(1) {
                msg.push_str(&format!("\n  caused by: {cause}"));
            }
            msg
        }
        other => other.to_string(),
    }
}

/// 2 for caller-fixable input problems, 1 for handler/backend faults.
fn exit_code(err: &DispatchError) -> i32 {
    if err.is_usage_error() { 2 } else { 1 }
}

fn fail(args: &RunArgs, style: &StyleOptions, message: &str, code: i32) -> ! {
    if args.json {
        let envelope = json!({
            "status": "error",
            "command": args.command,
            "error": message,
        });
        eprintln!("{}", envelope);
    } else {
        eprintln!("{} {}", emoji("error", style), color(Role::Error, message, style));
    }
    std::process::exit(code);
}

/* ---- Tests ---- */
