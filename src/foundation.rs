pub(crate) mod align;
pub(crate) mod error;
pub(crate) mod fs;
