pub mod tbl;

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Handle TBL files
    Tbl {
        #[command(subcommand)]
        command: tbl::TblCommands,
    },
}

impl Commands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            Commands::Tbl { command } => command.handle(),
        }
    }
}
