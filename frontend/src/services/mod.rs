pub mod api;
pub mod dom;
pub mod logging;
pub mod page;
