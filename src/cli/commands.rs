use crate::error::ConvertResult;
use crate::excel::{ExcelExporter, ExcelImporter};
use crate::projector::{ProjectionOptions, Projector};
use crate::types::{SheetMode, Workbook};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// Output path used when none is given: the input's stem with `.xlsx`
pub fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("xlsx")
}

/// Execute the convert command
pub fn convert(
    input: PathBuf,
    output: Option<PathBuf>,
    options: ProjectionOptions,
    verbose: bool,
) -> ConvertResult<()> {
    let output = output.unwrap_or_else(|| default_output_path(&input));

    println!("{}", "📄 jsonsheet - JSON → Excel".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    if verbose {
        println!("{}", "📖 Reading JSON file...".cyan());
    }

    let bytes = fs::read(&input)?;
    let workbook = Projector::new(options).project_workbook(&bytes)?;

    if verbose {
        print_summary(&workbook);
        println!("{}", "📊 Writing workbook...".cyan());
    }

    ExcelExporter::new(&workbook).export(&output)?;

    println!("{}", "✅ Conversion Complete!".bold().green());
    println!("   Workbook: {}", workbook.title.bright_yellow());
    println!("   Sheets:   {}", workbook.sheets.len());
    println!("   Excel file: {}\n", output.display());

    Ok(())
}

/// Execute the inspect command
pub fn inspect(input: PathBuf) -> ConvertResult<()> {
    println!("{}", "🔍 jsonsheet - Inspect".bold().green());
    println!("   File: {}\n", input.display());

    let workbook = ExcelImporter::new(&input).import()?;
    if workbook.sheets.is_empty() {
        println!("{}", "   (no sheets)".dimmed());
    }

    for sheet in &workbook.sheets {
        println!(
            "{} {} ({} rows)",
            "▸".cyan(),
            sheet.name.bold(),
            sheet.rows.len()
        );
        for row in &sheet.rows {
            println!("   {}", row.texts().join(" | "));
        }
        println!();
    }

    Ok(())
}

fn print_summary(workbook: &Workbook) {
    println!("   Title: {}", workbook.title);
    for sheet in &workbook.sheets {
        let kind = match sheet.mode {
            SheetMode::Table => "table",
            SheetMode::FieldTree => "field tree",
            SheetMode::Placeholder => "placeholder",
            SheetMode::Scalars => "scalars",
            SheetMode::Imported => "imported",
        };
        println!(
            "   - {} [{}]: {} rows",
            sheet.name,
            kind,
            sheet.data_rows().len()
        );
    }
    println!();
}
