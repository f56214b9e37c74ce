//! CLI command implementations.

pub(crate) mod fields;
pub(crate) mod inspect;
pub(crate) mod scan;
