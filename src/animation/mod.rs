pub(crate) mod ease;
pub mod ops;
pub(crate) mod param;
