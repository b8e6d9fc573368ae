pub mod export;
pub mod import;
pub mod verify;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use d2_tbl::ColorMap;
use miette::{Context, IntoDiagnostic, Result};

#[derive(clap::Subcommand)]
pub enum TblCommands {
    /// Export a TBL file to tab-delimited text or CSV
    Export(export::ExportArgs),
    /// Import tab-delimited text or CSV into a TBL file
    Import(import::ImportArgs),
    /// Check a TBL file's structure and integrity field
    Verify(verify::VerifyArgs),
}

impl TblCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            TblCommands::Export(export) => export.handle(),
            TblCommands::Import(import) => import.handle(),
            TblCommands::Verify(verify) => verify.handle(),
        }
    }
}

fn load_colors(path: Option<&PathBuf>) -> Result<ColorMap> {
    match path {
        Some(path) => {
            let f = File::open(path)
                .into_diagnostic()
                .context(format!("path: {}", path.display()))?;
            ColorMap::from_reader(BufReader::new(f))
                .into_diagnostic()
                .context(format!("reading custom colors from {}", path.display()))
        }
        None => Ok(ColorMap::default()),
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
}
