use clap::{Args, ValueEnum};
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, path::PathBuf};
use d2_tbl::TblReader;
use d2_txt::{Separator, TextTableWriter, TextWriterOptions};
use tracing::info;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Delimiter {
    /// Tab-delimited text
    #[default]
    Tab,
    /// CSV with a comma
    Comma,
    /// CSV with a semicolon
    Semicolon,
}

#[derive(Args)]
pub struct ExportArgs {
    /// An input TBL file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target text or CSV file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// A custom colors ini extending the built-in palette
    #[arg(short, long, value_name = "FILE")]
    colors: Option<PathBuf>,

    /// Column delimiter; defaults to comma for a .csv target, tab otherwise
    #[arg(short, long, value_enum)]
    delimiter: Option<Delimiter>,

    /// Write tab-delimited fields without double quotes
    #[arg(long, default_value_t = false)]
    unwrapped: bool,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ExportArgs {
    pub fn handle(&self) -> Result<()> {
        let colors = super::load_colors(self.colors.as_ref())?;

        let mut f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let tbl = TblReader::new(&mut f, &colors)?;
        info!("read {} records from {}", tbl.len(), self.file.display());

        let separator = match self.delimiter {
            Some(Delimiter::Tab) => Separator::Tab,
            Some(Delimiter::Comma) => Separator::Comma,
            Some(Delimiter::Semicolon) => Separator::Semicolon,
            None if super::is_csv(&self.output) => Separator::Comma,
            None => Separator::Tab,
        };

        let out = if !self.overwrite {
            File::create_new(&self.output)
                .into_diagnostic()
                .context(format!("creating {}", &self.output.display()))?
        } else {
            File::create(&self.output)
                .into_diagnostic()
                .context(format!("creating {}", &self.output.display()))?
        };

        TextTableWriter::new(
            out,
            TextWriterOptions::builder()
                .separator(separator)
                .wrap_strings(!self.unwrapped)
                .build(),
        )
        .write_table(tbl.table())?;

        info!("wrote {}", self.output.display());
        Ok(())
    }
}
