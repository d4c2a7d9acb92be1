//
// lc3-vm, a virtual machine for the LC-3 (Little Computer 3) architecture.
// Copyright (C) 2024  Fares A. Bakhit
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//

mod debug;

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use lc3::{Machine, Termios};
use thiserror::Error;

const LICENSE: &str = "lc3-vm  Copyright (c) 2024  Fares A. Bakhit <fares@duck.com>";

/// Top-level CLI error: just a transparent wrapper, since every failure
/// that can occur here originates from [`lc3::Error`].
#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Vm(#[from] lc3::Error<std::io::Error>),
}

/// Virtual machine for the LC-3 (Little Computer 3) educational architecture.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Image file to load at 0x3000 and run.
    image: PathBuf,

    /// Print memory and register dumps to stderr before and after execution.
    #[arg(long)]
    dump: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    eprintln!("{LICENSE}");

    let cli = Cli::parse();
    match run(&cli).map_err(CliError::from) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<(), lc3::Error<std::io::Error>> {
    let mut machine = Machine::new(Termios::new()?);
    let mut file = File::open(&cli.image)?;
    machine.load_image(&mut file, 0)?;

    if cli.dump {
        debug::dump_registers(&machine);
    }

    machine.run()?;

    if cli.dump {
        debug::dump_memory_nonzero(&machine);
        debug::dump_registers(&machine);
    }

    Ok(())
}
