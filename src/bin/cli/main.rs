//! CLI tool for the `mojic` emoji obfuscator.

mod commands;
mod exit_codes;
mod output;
mod password;
mod progress;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Mutex;

use exit_codes::ExitCode;

/// Temp file currently being written by an atomic rotate/reseed, if any.
/// The Ctrl+C handler removes it before the process exits.
static ACTIVE_TEMP_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Registers (or clears) the temp file the Ctrl+C handler should clean up.
pub fn set_active_temp(path: Option<PathBuf>) {
    *ACTIVE_TEMP_FILE.lock().unwrap() = path;
}

/// Obfuscates C source into password-seeded emoji and restores it exactly.
#[derive(Parser)]
#[command(name = "mojic")]
#[command(author, version, about = "Obfuscate C source into emoji, and back", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Suppress progress output
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Obfuscate a `.c`/`.h` file, or every such file under a directory tree
    Encode {
        /// File or, with --recursive, directory to encode
        path: PathBuf,

        /// Output path (single-file mode only); default `*.c` -> `*.mojic`
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Password (prompted with confirmation if not given)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Encode every `.c`/`.h` file under the given directory
        #[arg(short = 'r', long)]
        recursive: bool,

        /// Collapse blank-line runs and trailing whitespace before encoding
        #[arg(long)]
        minify: bool,
    },

    /// Restore a `.mojic` file, or every such file under a directory tree
    Decode {
        /// File or, with --recursive, directory to decode
        path: PathBuf,

        /// Output path (single-file mode only); default `*.mojic` -> `*.restored.c`
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Password (prompted without confirmation if not given)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Decode every `.mojic` file under the given directory
        #[arg(short = 'r', long)]
        recursive: bool,
    },

    /// Re-encrypt a `.mojic` file under a new password, in place
    Rotate {
        /// `.mojic` file to rotate
        path: PathBuf,

        /// Current password
        #[arg(long)]
        old_password: Option<String>,

        /// New password
        #[arg(long)]
        new_password: Option<String>,
    },

    /// Re-encrypt a `.mojic` file under its current password with a fresh
    /// salt, in place; produces a byte-different file with the same content
    Reseed {
        /// `.mojic` file to reseed
        path: PathBuf,

        /// Current password
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
}

fn main() {
    ctrlc::set_handler(|| {
        if let Some(path) = ACTIVE_TEMP_FILE.lock().unwrap().take() {
            let _ = std::fs::remove_file(&path);
        }
        eprintln!("\ninterrupted");
        std::process::exit(exit_codes::USER_INTERRUPT);
    })
    .ok();

    env_logger::init();

    let cli = Cli::parse();
    let exit_code = dispatch(cli);
    std::process::exit(exit_code.code());
}

fn dispatch(cli: Cli) -> ExitCode {
    match cli.command {
        Commands::Encode {
            path,
            output,
            password,
            recursive,
            minify,
        } => {
            let pwd = match password::for_encode(password) {
                Ok(pwd) => pwd,
                Err(err) => {
                    eprintln!("{err}");
                    return ExitCode::IoError;
                }
            };
            if let Err(err) = password::validate(pwd.as_str()) {
                eprintln!("{err}");
                return ExitCode::BadArgs;
            }
            commands::encode(commands::EncodeConfig {
                path: &path,
                output: output.as_deref(),
                password: pwd,
                recursive,
                minify,
                quiet: cli.quiet,
            })
        }

        Commands::Decode {
            path,
            output,
            password,
            recursive,
        } => {
            let pwd = match password::for_decode(password, "Password: ") {
                Ok(pwd) => pwd,
                Err(err) => {
                    eprintln!("{err}");
                    return ExitCode::IoError;
                }
            };
            commands::decode(commands::DecodeConfig {
                path: &path,
                output: output.as_deref(),
                password: pwd,
                recursive,
                quiet: cli.quiet,
            })
        }

        Commands::Rotate {
            path,
            old_password,
            new_password,
        } => {
            let old_pwd = match password::for_decode(old_password, "Current password: ") {
                Ok(pwd) => pwd,
                Err(err) => {
                    eprintln!("{err}");
                    return ExitCode::IoError;
                }
            };
            let new_pwd = match password::for_decode(new_password, "New password: ") {
                Ok(pwd) => pwd,
                Err(err) => {
                    eprintln!("{err}");
                    return ExitCode::IoError;
                }
            };
            if let Err(err) = password::validate(new_pwd.as_str()) {
                eprintln!("{err}");
                return ExitCode::BadArgs;
            }
            commands::rotate(commands::RotateConfig {
                path: &path,
                old_password: old_pwd,
                new_password: new_pwd,
                quiet: cli.quiet,
            })
        }

        Commands::Reseed { path, password } => {
            let pwd = match password::for_decode(password, "Password: ") {
                Ok(pwd) => pwd,
                Err(err) => {
                    eprintln!("{err}");
                    return ExitCode::IoError;
                }
            };
            commands::reseed(commands::ReseedConfig {
                path: &path,
                password: pwd,
                quiet: cli.quiet,
            })
        }
    }
}
