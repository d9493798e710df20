//! Password acquisition for CLI operations.

use mojic::error::Error;
use mojic::Password;
use rpassword::prompt_password;

/// Testable properties (see the crate's round-trip guarantee) require
/// passwords longer than 5 characters; the CLI enforces that before the
/// password ever reaches the engine.
const MIN_PASSWORD_LEN: usize = 5;

/// Validates a password's length against the CLI's minimum.
pub fn validate(raw: &str) -> Result<(), Error> {
    if raw.chars().count() <= MIN_PASSWORD_LEN {
        return Err(Error::PasswordTooShort {
            minimum: MIN_PASSWORD_LEN,
        });
    }
    Ok(())
}

/// Resolves the password to use for `encode`: from `--password` if given,
/// otherwise an interactive prompt with confirmation.
pub fn for_encode(provided: Option<String>) -> std::io::Result<Password> {
    let raw = match provided {
        Some(raw) => raw,
        None => loop {
            let first = prompt_password("Password: ")?;
            let second = prompt_password("Confirm password: ")?;
            if first != second {
                eprintln!("Passwords do not match, try again.");
                continue;
            }
            break first;
        },
    };
    Ok(Password::new(raw))
}

/// Resolves the password to use for `decode`, `rotate`'s old password, and
/// `reseed`: from the CLI flag if given, otherwise a single prompt with no
/// confirmation.
pub fn for_decode(provided: Option<String>, prompt: &str) -> std::io::Result<Password> {
    let raw = match provided {
        Some(raw) => raw,
        None => prompt_password(prompt)?,
    };
    Ok(Password::new(raw))
}
