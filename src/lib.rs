pub mod build;
pub mod config;
pub mod error;
pub mod library;
pub mod scorer;
// cmd and reports belong to the binary (main.rs).
