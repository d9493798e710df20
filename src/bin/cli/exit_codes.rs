//! Exit codes for the `mojic` CLI tool.

use mojic::Error;

/// Exit code constants
pub const SUCCESS: i32 = 0;
/// Operation completed with warnings (e.g. some files in a recursive walk failed)
pub const WARNING: i32 = 1;
/// Fatal error occurred
pub const FATAL_ERROR: i32 = 2;
/// `.mojic` file is malformed (bad header, invalid glyph, truncated footer)
pub const BAD_FILE: i32 = 3;
/// Wrong password
pub const WRONG_PASSWORD: i32 = 4;
/// I/O error
pub const IO_ERROR: i32 = 5;
/// Ctrl+C (128 + SIGINT)
pub const USER_INTERRUPT: i32 = 130;
/// Invalid command line arguments
pub const BAD_ARGS: i32 = 255;

/// Exit code enum for structured handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(dead_code)] // UserInterrupt reserved for signal handling
pub enum ExitCode {
    Success,
    Warning,
    FatalError,
    BadFile,
    WrongPassword,
    IoError,
    UserInterrupt,
    BadArgs,
}

impl ExitCode {
    /// Returns the numeric exit code
    pub fn code(self) -> i32 {
        match self {
            Self::Success => SUCCESS,
            Self::Warning => WARNING,
            Self::FatalError => FATAL_ERROR,
            Self::BadFile => BAD_FILE,
            Self::WrongPassword => WRONG_PASSWORD,
            Self::IoError => IO_ERROR,
            Self::UserInterrupt => USER_INTERRUPT,
            Self::BadArgs => BAD_ARGS,
        }
    }
}

/// Converts a mojic error to an exit code
pub fn error_to_exit_code(error: &Error) -> ExitCode {
    match error {
        Error::Io(_) => ExitCode::IoError,
        Error::WrongPassword => ExitCode::WrongPassword,
        Error::InvalidHeader(_)
        | Error::InvalidGlyph { .. }
        | Error::InvalidFooter { .. }
        | Error::FileTruncated { .. }
        | Error::FileTampered => ExitCode::BadFile,
        Error::KdfFailure(_) | Error::AlphabetUnderflow { .. } => ExitCode::FatalError,
        Error::PasswordTooShort { .. } => ExitCode::BadArgs,
        // Future error variants - required by #[non_exhaustive]
        _ => ExitCode::FatalError,
    }
}
