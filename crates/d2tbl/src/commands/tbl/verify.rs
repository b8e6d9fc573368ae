use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use std::{fs::File, path::PathBuf};
use d2_tbl::{ColorMap, TblReader};

#[derive(Args)]
pub struct VerifyArgs {
    /// An input TBL file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl VerifyArgs {
    pub fn handle(&self) -> Result<()> {
        let mut f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", &self.file.display()))?;
        let tbl = TblReader::new(&mut f, &ColorMap::default())?;

        let header = tbl.header();
        println!("{}", self.file.display());
        println!("* records: {}", header.nodes_number);
        println!("* hash table size: {}", header.hash_table_size);
        println!("* version: {}", header.version);
        println!("* max hash tries: {}", header.hash_max_tries);
        println!("* file size: {}", header.file_size);
        println!("* checksum: {:#010X}", header.crc);

        if tbl.verify_integrity() {
            println!("checksum {}", "matches".green());
        } else {
            println!("checksum {}", "does not match".red());
        }

        Ok(())
    }
}
