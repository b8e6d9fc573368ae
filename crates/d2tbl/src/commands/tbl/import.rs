use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use std::{fs::File, path::PathBuf};
use d2_tbl::TblWriter;
use d2_txt::TextTableReader;
use tracing::info;

#[derive(Args)]
pub struct ImportArgs {
    /// An input text or CSV file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target TBL file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// A custom colors ini extending the built-in palette
    #[arg(short, long, value_name = "FILE")]
    colors: Option<PathBuf>,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ImportArgs {
    pub fn handle(&self) -> Result<()> {
        let colors = super::load_colors(self.colors.as_ref())?;

        let f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let table = TextTableReader::new(f, super::is_csv(&self.file))?.into_table();
        info!("read {} records from {}", table.len(), self.file.display());

        let out = if !self.overwrite {
            File::create_new(&self.output)
                .into_diagnostic()
                .context(format!("creating {}", &self.output.display()))?
        } else {
            File::create(&self.output)
                .into_diagnostic()
                .context(format!("creating {}", &self.output.display()))?
        };

        TblWriter::new(out, &colors).write_table(&table)?;

        info!("wrote {}", self.output.display());
        Ok(())
    }
}
