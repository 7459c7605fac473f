pub(crate) mod hierarchy;
pub(crate) mod layers;
pub(crate) mod track;
