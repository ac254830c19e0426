//! Helper process behind the ExplorerGenie context-menu entries.
//!
//! The shell extension starts the helper with a single command line naming an action and the
//! selected paths. This crate decodes that command line ([`invocation`]) and carries out the
//! action: copying paths to the clipboard, or opening a configured tool at the selected path.
//!
//! Opening a tool goes through [`placeholder`] substitution and the executable/argument split
//! in [`external`], which yields an [`external::InvocationDescriptor`] for a process launcher.
//! The main entry point is [`Interpreter`].

pub mod action;
pub mod clipboard;
pub mod command;
pub mod env;
pub mod external;
mod interpreter;
pub mod invocation;
pub mod lexer;
pub mod paths;
pub mod placeholder;
pub mod settings;
pub mod tools;

pub use interpreter::Interpreter;
