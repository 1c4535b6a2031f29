// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Command-line interface code. More specific options for `hamfield`
//! subcommands are contained in modules.
//!
//! Only 3 things should be public in this module: `Hamfield`,
//! `Hamfield::run`, and `HamfieldError`.

mod common;
mod error;
mod pattern;
mod sample;
mod skywave;
mod yagi;

pub(crate) use common::{display_warnings, InfoPrinter, Warn};
pub use error::HamfieldError;

use std::path::PathBuf;

use clap::{AppSettings, Args, Parser, Subcommand};
use log::info;

use crate::PROGRESS_BARS;

// Add build-time information from the "built" crate.
include!(concat!(env!("OUT_DIR"), "/built.rs"));

#[derive(Debug, Parser)]
#[clap(
    version,
    author,
    about = r#"Far-field radiation patterns and Yagi-Uda dimensioning for amateur-radio antennas
Source: https://github.com/hamfield/hamfield"#
)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
#[clap(disable_help_subcommand = true)]
#[clap(infer_subcommands = true)]
#[clap(propagate_version = true)]
#[clap(infer_long_args = true)]
pub struct Hamfield {
    #[clap(flatten)]
    global_opts: GlobalArgs,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct GlobalArgs {
    /// Don't draw progress bars.
    #[clap(long)]
    #[clap(global = true)]
    no_progress_bars: bool,

    /// The verbosity of the program. Increase by specifying multiple times
    /// (e.g. -vv). The default is to print only high-level information.
    #[clap(short, long, parse(from_occurrences))]
    #[clap(global = true)]
    verbosity: u8,

    /// Only verify that arguments were correctly ingested and print out
    /// high-level information.
    #[clap(long)]
    #[clap(global = true)]
    dry_run: bool,

    /// Save the input arguments into a new TOML file that can be used to
    /// reproduce this run.
    #[clap(long)]
    #[clap(global = true)]
    save_toml: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
#[clap(arg_required_else_help = true)]
enum Command {
    #[clap(alias = "design-yagi")]
    #[clap(about = r#"Dimension a Yagi-Uda antenna with the DL6WU/VK5DJ models."#)]
    Yagi(yagi::YagiArgs),

    #[clap(alias = "evaluate-pattern")]
    #[clap(about = r#"Generate far-field pattern values for an antenna type."#)]
    Pattern(pattern::PatternArgs),

    #[clap(alias = "sample")]
    #[clap(about = r#"Sample the animated field fabric over a grid and dump the
instance transform/colour buffers."#)]
    SampleField(sample::SampleFieldArgs),

    #[clap(about = r#"Trace an HF skywave hop path and report the MUF."#)]
    Skywave(skywave::SkywaveArgs),
}

impl Hamfield {
    pub fn run(self) -> Result<(), HamfieldError> {
        // Set up logging.
        let GlobalArgs {
            verbosity,
            dry_run,
            no_progress_bars,
            save_toml,
        } = self.global_opts;
        setup_logging(verbosity).expect("Failed to initialise logging.");
        // Enable progress bars if the user didn't say "no progress bars".
        if !no_progress_bars {
            PROGRESS_BARS.store(true);
        }

        // Print the version of hamfield and its build-time information.
        let sub_command = match &self.command {
            Command::Yagi(_) => "yagi",
            Command::Pattern(_) => "pattern",
            Command::SampleField(_) => "sample-field",
            Command::Skywave(_) => "skywave",
        };
        info!("hamfield {} {}", sub_command, env!("CARGO_PKG_VERSION"));
        display_build_info();

        if let Some(toml_file) = save_toml {
            use std::{
                fs::File,
                io::{BufWriter, Write},
            };

            let toml_str = match &self.command {
                Command::Yagi(args) => toml::to_string(args),
                Command::Pattern(args) => toml::to_string(args),
                Command::SampleField(args) => toml::to_string(args),
                Command::Skywave(args) => toml::to_string(args),
            }
            .expect("toml serialisation error");
            let mut f = BufWriter::new(File::create(toml_file)?);
            f.write_all(toml_str.as_bytes())?;
        }

        match self.command {
            Command::Yagi(args) => args.run(dry_run)?,
            Command::Pattern(args) => args.run(dry_run)?,
            Command::SampleField(args) => args.run(dry_run)?,
            Command::Skywave(args) => args.run()?,
        }

        info!("hamfield {} complete.", sub_command);
        Ok(())
    }
}

/// Activate a logger. All log messages are put onto `stdout`. `env_logger`
/// automatically only uses colours and fancy symbols if we're on a tty (e.g. a
/// terminal); piped output will be formatted sensibly. Source code lines are
/// displayed in log messages when verbosity >= 3.
fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stdout);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        2 => builder.filter_level(log::LevelFilter::Trace),
        _ => {
            builder.filter_level(log::LevelFilter::Trace);
            builder.format(|buf, record| {
                use std::io::Write;

                let timestamp = buf.timestamp();
                let level = record.level();
                let target = record.target();
                let line = record.line().unwrap_or(0);
                let message = record.args();

                writeln!(buf, "[{timestamp} {level} {target}:{line}] {message}")
            })
        }
    };
    builder.init();

    Ok(())
}

/// Write info-level log lines of how this executable was compiled.
fn display_build_info() {
    info!("Compiled {}", BUILT_TIME_UTC);
    info!("         with compiler {}", RUSTC_VERSION);
    info!("");
}
