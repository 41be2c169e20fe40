pub(crate) mod build;
pub(crate) mod model;
pub(crate) mod runtime;
