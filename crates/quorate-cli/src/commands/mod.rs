pub(crate) mod demo;
pub(crate) mod eval;
pub(crate) mod helpers;
pub(crate) mod plot;
pub(crate) mod sweep;
pub(crate) mod table;
