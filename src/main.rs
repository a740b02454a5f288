use clap::{Args, Parser, Subcommand};
use jsonsheet::api::{run_api_server, ApiConfig};
use jsonsheet::cli;
use jsonsheet::projector::{ProjectionOptions, DEFAULT_MAX_DEPTH, DEFAULT_TITLE};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "jsonsheet")]
#[command(about = "Convert JSON documents into multi-sheet Excel workbooks.")]
#[command(long_about = "jsonsheet - JSON → Excel (.xlsx)

Reads a document shaped like {\"key\": \"Title\", \"value\": {...}} and writes
one worksheet per object or array of objects found under \"value\".

COMMANDS:
  convert  - JSON file to Excel workbook
  inspect  - Print the sheets and rows of an Excel workbook
  serve    - Start the HTTP upload server

EXAMPLES:
  jsonsheet convert company.json                 # writes company.xlsx
  jsonsheet convert company.json out.xlsx --scalars-sheet
  jsonsheet inspect company.xlsx
  jsonsheet serve --port 3000")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Clone)]
struct ProjectionArgs {
    /// List top-level values that get no sheet of their own in a "Scalars" sheet
    #[arg(long)]
    scalars_sheet: bool,

    /// Deepest object nesting rendered in Field | Value sheets
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Workbook title when the document has no "key"
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,
}

impl From<ProjectionArgs> for ProjectionOptions {
    fn from(args: ProjectionArgs) -> Self {
        ProjectionOptions {
            max_depth: args.max_depth,
            scalars_sheet: args.scalars_sheet,
            default_title: args.title,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Convert a JSON file to an Excel .xlsx workbook.

SHEET RULES:
  Object under \"value\"            → Field | Value sheet, nested objects indented
  Array of objects under \"value\"  → Table sheet, one column per key seen
  Anything else                   → no sheet (see --scalars-sheet)

If the top-level JSON is an array, only its first element is converted.

EXAMPLE:
  jsonsheet convert company.json company.xlsx")]
    /// Convert a JSON file to Excel .xlsx
    Convert {
        /// Path to JSON file
        input: PathBuf,

        /// Output Excel file path (defaults to the input name with .xlsx)
        output: Option<PathBuf>,

        #[command(flatten)]
        projection: ProjectionArgs,

        /// Show verbose conversion steps
        #[arg(short, long)]
        verbose: bool,
    },

    /// Print the sheets and rows of an Excel .xlsx file
    Inspect {
        /// Path to Excel file (.xlsx)
        input: PathBuf,
    },

    /// Start the HTTP upload server
    Serve {
        /// Host address to bind to (use 0.0.0.0 for all interfaces)
        #[arg(short = 'H', long, default_value = "127.0.0.1", env = "JSONSHEET_HOST")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "8080", env = "JSONSHEET_PORT")]
        port: u16,

        /// Directory with a static upload page to serve
        #[arg(long, env = "JSONSHEET_STATIC_DIR")]
        static_dir: Option<PathBuf>,

        #[command(flatten)]
        projection: ProjectionArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            projection,
            verbose,
        } => cli::convert(input, output, projection.into(), verbose)?,

        Commands::Inspect { input } => cli::inspect(input)?,

        Commands::Serve {
            host,
            port,
            static_dir,
            projection,
        } => {
            let config = ApiConfig {
                host,
                port,
                static_dir,
                options: projection.into(),
                ..ApiConfig::default()
            };
            tokio::runtime::Runtime::new()?.block_on(run_api_server(config))?;
        }
    }

    Ok(())
}
