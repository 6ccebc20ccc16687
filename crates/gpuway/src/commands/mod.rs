//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod serve;

pub(crate) use build::BuildCommand;
pub(crate) use serve::ServeCommand;
