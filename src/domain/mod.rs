pub mod annotations;
pub mod errors;
pub mod logging;
pub mod overlay;
