//! jsonsheet API Server module
//!
//! Accepts JSON uploads over HTTP and returns the converted workbook.
//! Run with `jsonsheet serve` or `jsonsheet-server`.

pub mod handlers;
pub mod server;

pub use server::{build_router, run_api_server, ApiConfig};
