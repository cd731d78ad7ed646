// HTTP surface: one folder per feature, each with handler.rs and routes.rs

pub mod data;
pub mod fallback;
pub mod github;
pub mod pages;
pub mod status;
