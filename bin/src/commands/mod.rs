//! CLI command implementations.

pub(crate) mod markets;
pub(crate) mod reset;
pub(crate) mod run;
pub(crate) mod status;
