pub mod api;
pub mod catalog;
pub mod config;
pub mod consts;
pub mod deck;
pub mod error;
pub mod optimizer;
pub mod scorer;
pub mod session;
// cmd and reports are modules of the binary crate (main.rs).
