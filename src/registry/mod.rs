/*!
Registry core: typed parameter schemas, validation, and command dispatch.

Layout:
  params.rs  - ParamKind / ParamSpec / ValidatedArgs + validate()
  command.rs - CommandSpec / CommandResult / Registry
  errors.rs  - structured error enums (nothing here prints)

The core is presentation-free and backend-free: handlers receive validated
arguments and whatever client was injected when the registry was built.
*/

pub mod command;
pub mod errors;
pub mod params;

pub use command::{CommandResult, CommandSpec, Handler, Registry};
pub use errors::{ArgAccessError, DispatchError, DuplicateCommand, ValidationError};
pub use params::{ParamKind, ParamSpec, ValidatedArgs, validate};
