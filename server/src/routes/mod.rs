pub mod api;
pub mod sessions;
