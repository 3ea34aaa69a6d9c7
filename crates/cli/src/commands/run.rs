use std::{io, path::PathBuf};

use clap::Parser;
use eyre::{Context, Result};
use ls8_loader::read_program;
use ls8_vm::arch::{ExecutionState, Machine};
use tracing::Level;

use crate::util::read_config_toml_or_default;

#[derive(Parser, Debug)]
#[command(name = "ls8", version, about = "Run an LS8 program image")]
pub struct RunCmd {
    #[arg(help = "Path to the program image, one binary byte per line")]
    pub program: PathBuf,

    #[arg(long, help = "Path to a machine config TOML file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Log a TRACE line with pc, upcoming bytes and registers per cycle")]
    pub trace: bool,

    #[arg(short, long, help = "Log loading and halting")]
    pub verbose: bool,
}

impl RunCmd {
    /// Level the subscriber must let through for the requested output.
    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else if self.trace {
            Level::INFO
        } else {
            Level::WARN
        }
    }

    pub fn run(&self) -> Result<ExecutionState> {
        let mut config = read_config_toml_or_default(self.config.as_deref())?;
        if self.trace {
            config = config.with_trace(true);
        }
        // A missing or malformed image is reported before a machine exists.
        let program = read_program(&self.program)?;

        let mut machine = Machine::with_config(config, io::stdout());
        machine
            .load(&program)
            .wrap_err_with(|| format!("loading {}", self.program.display()))?;
        let state = machine.run()?;
        tracing::debug!(pc = state.pc, cycles = state.cycles, "program finished");
        Ok(state)
    }
}
