use clap::Parser;
use eyre::Result;
use ls8_cli::{commands::RunCmd, util::setup_tracing_with_log_level};

fn main() -> Result<()> {
    let cmd = RunCmd::parse();
    setup_tracing_with_log_level(cmd.log_level());
    cmd.run()?;
    Ok(())
}
