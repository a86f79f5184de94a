//! FFI surface for the mobile shell.

pub mod api;
