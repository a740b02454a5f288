//! jsonsheet API Server binary
//!
//! HTTP front end for JSON → Excel conversion.

use clap::Parser;
use jsonsheet::api::{run_api_server, ApiConfig};
use jsonsheet::projector::{ProjectionOptions, DEFAULT_MAX_DEPTH};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jsonsheet-server")]
#[command(version)]
#[command(about = "jsonsheet API Server - upload JSON, download Excel")]
#[command(long_about = r#"
jsonsheet API Server

Endpoints:
  - POST /api/v1/convert        - Upload JSON (multipart field "file"), get .xlsx
  - POST /convert/json-to-excel - Same as above
  - GET  /health                - Health check
  - GET  /version               - Server version info
  - GET  /api/v1                - API documentation

Features:
  - Upload size limit (default 5 MiB)
  - Per-conversion timeout (default 30 s)
  - Optional static upload page (--static-dir)
  - CORS enabled for cross-origin requests
  - Graceful shutdown on SIGINT/SIGTERM

Example usage:
  jsonsheet-server                           # Start on localhost:8080
  jsonsheet-server --host 0.0.0.0 --port 3000

  curl -F "file=@company.json" -o company.xlsx \
    http://localhost:8080/api/v1/convert
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "JSONSHEET_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "JSONSHEET_PORT")]
    port: u16,

    /// Largest accepted upload, in bytes
    #[arg(long, default_value = "5242880", env = "JSONSHEET_MAX_UPLOAD_BYTES")]
    max_upload_bytes: usize,

    /// Seconds a single conversion may take
    #[arg(long, default_value = "30", env = "JSONSHEET_TIMEOUT_SECS")]
    timeout_secs: u64,

    /// Directory with a static upload page to serve
    #[arg(long, env = "JSONSHEET_STATIC_DIR")]
    static_dir: Option<PathBuf>,

    /// List top-level values that get no sheet of their own in a "Scalars" sheet
    #[arg(long)]
    scalars_sheet: bool,

    /// Deepest object nesting rendered in Field | Value sheets
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        max_upload_bytes: args.max_upload_bytes,
        timeout_secs: args.timeout_secs,
        static_dir: args.static_dir,
        options: ProjectionOptions {
            max_depth: args.max_depth,
            scalars_sheet: args.scalars_sheet,
            ..ProjectionOptions::default()
        },
    };

    run_api_server(config).await
}
