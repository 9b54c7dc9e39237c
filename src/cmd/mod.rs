/*!
Presentation layer for the CLI.

Directory Layout:
  src/cmd/
    mod.rs       (module declarations + re-exports)
    run.rs       (RunArgs      + execute_run)
    list.rs      (ListArgs     + execute_list)
    describe.rs  (DescribeArgs + execute_describe)
    shared.rs    (coercion, --param parsing, param-file loading)
    format.rs    (table / color formatting utilities)

Conventions:
  - Each subcommand module exposes exactly one public `execute_*` function
    taking its Args struct plus the shared `&Registry`, returning
    `anyhow::Result<()>`.
  - Only this layer prints. Registry and validator errors arrive as
    structured values and are rendered here.
*/

pub mod describe;
pub mod format;
pub mod list;
pub mod run;
pub mod shared;

pub use describe::{DescribeArgs, execute_describe};
pub use list::{ListArgs, execute_list};
pub use run::{RunArgs, execute_run};
