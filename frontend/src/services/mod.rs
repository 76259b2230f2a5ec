pub mod api;
pub mod date_utils;
pub mod filters;
pub mod logging;
