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

//! Emits hand-encoded LC-3 images without transcribing hex by hand.
//!
//! The programs themselves come straight from the repository's own test
//! scenarios; `sum` is the seven-word program from `sum.c`.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    /// ADD R0,R0,#1 ; HALT. Expect R0=1, CC=Positive.
    Add1,
    /// ADD R0,R0,#-1 ; HALT. Expect R0=0xFFFF, CC=Negative.
    Neg1,
    /// AND R0,R0,#0 ; HALT. Expect R0=0, CC=Zero.
    AndZero,
    /// Reads two decimal integers from stdin and prints their sum.
    Sum,
}

impl Preset {
    fn program(self) -> &'static [u16] {
        match self {
            Preset::Add1 => &[0x1021, 0xF025],
            Preset::Neg1 => &[0x103F, 0xF025],
            Preset::AndZero => &[0x5020, 0xF025],
            Preset::Sum => &[0xF026, 0x1220, 0xF026, 0x1240, 0x1060, 0xF027, 0xF025],
        }
    }

    fn default_path(self) -> &'static str {
        match self {
            Preset::Add1 => "add1.obj",
            Preset::Neg1 => "neg1.obj",
            Preset::AndZero => "and_zero.obj",
            Preset::Sum => "sum.obj",
        }
    }
}

/// Build a ready-to-run LC-3 image file from a named preset program.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Which preset program to emit.
    #[arg(value_enum)]
    preset: Preset,

    /// Output path. Defaults to a name derived from the preset.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let path = cli
        .output
        .unwrap_or_else(|| PathBuf::from(cli.preset.default_path()));

    match write_image(&path, cli.preset.program()) {
        Ok(written) => {
            println!("Written {written} bytes to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Cannot write to file {}: {err}", path.display());
            ExitCode::from(1)
        }
    }
}

fn write_image(path: &PathBuf, program: &[u16]) -> std::io::Result<usize> {
    let mut file = File::create(path)?;
    let mut written = 0;
    for &word in program {
        file.write_all(&word.to_ne_bytes())?;
        written += 2;
    }
    Ok(written)
}
