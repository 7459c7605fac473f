pub(crate) mod beat;
pub(crate) mod error;
pub(crate) mod math;
