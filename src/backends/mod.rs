//! Front ends over the library
//!
//! ```text
//! text / bytecode
//!        |
//!        v
//!  shell (Builder) --> reduce --> bytecode on stdout
//! ```

pub mod shell;

pub use shell::{Shell, ShellConfig, ShellError, ShellResult};
