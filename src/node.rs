pub(crate) mod panels;
pub(crate) mod style;
pub(crate) mod tree;
