//! Command implementations for the `mojic` CLI tool.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use mojic::progress::ProgressReporter;
use mojic::{CipherEngine, Error, Password};
use walkdir::WalkDir;

use crate::exit_codes::{error_to_exit_code, ExitCode};
use crate::output::{BatchSummary, FileOutcome};
use crate::progress::{BatchProgress, FileSpinner};

const SOURCE_EXTENSIONS: &[&str] = &["c", "h"];
const ENCODED_EXTENSIONS: &[&str] = &["mojic"];

/// Configuration for the `encode` command.
pub struct EncodeConfig<'a> {
    pub path: &'a Path,
    pub output: Option<&'a Path>,
    pub password: Password,
    pub recursive: bool,
    pub minify: bool,
    pub quiet: bool,
}

/// Configuration for the `decode` command.
pub struct DecodeConfig<'a> {
    pub path: &'a Path,
    pub output: Option<&'a Path>,
    pub password: Password,
    pub recursive: bool,
    pub quiet: bool,
}

/// Configuration for the `rotate` command.
pub struct RotateConfig<'a> {
    pub path: &'a Path,
    pub old_password: Password,
    pub new_password: Password,
    pub quiet: bool,
}

/// Configuration for the `reseed` command.
pub struct ReseedConfig<'a> {
    pub path: &'a Path,
    pub password: Password,
    pub quiet: bool,
}

/// Encodes one file, or every `.c`/`.h` file under a directory tree.
pub fn encode(config: EncodeConfig<'_>) -> ExitCode {
    let files = match collect_inputs(config.path, config.recursive, SOURCE_EXTENSIONS) {
        Ok(files) => files,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::IoError;
        }
    };
    if files.is_empty() {
        eprintln!("no .c/.h files found under {}", config.path.display());
        return ExitCode::Warning;
    }

    let single = files.len() == 1;
    let mut progress = BatchProgress::new(files.len() as u64, config.quiet);
    let mut summary = BatchSummary::new();

    for input_path in &files {
        let label = input_path.display().to_string();
        progress.on_entry_start(&label, 0);
        let result = encode_one(input_path, config.output, single, &config.password, config.minify);
        let success = result.is_ok();
        if let (true, Ok(ref output_path)) = (single, &result) {
            println!("{}", output_path.display());
        }
        summary.record(input_path, into_outcome(result));
        progress.on_entry_complete(&label, success);
    }
    progress.finish();

    eprint!("{}", summary.render());
    exit_code_for_summary(&summary)
}

/// Decodes one file, or every `.mojic` file under a directory tree.
pub fn decode(config: DecodeConfig<'_>) -> ExitCode {
    let files = match collect_inputs(config.path, config.recursive, ENCODED_EXTENSIONS) {
        Ok(files) => files,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::IoError;
        }
    };
    if files.is_empty() {
        eprintln!("no .mojic files found under {}", config.path.display());
        return ExitCode::Warning;
    }

    let single = files.len() == 1;
    let mut progress = BatchProgress::new(files.len() as u64, config.quiet);
    let mut summary = BatchSummary::new();

    for input_path in &files {
        let label = input_path.display().to_string();
        progress.on_entry_start(&label, 0);
        let result = decode_one(input_path, config.output, single, &config.password);
        let success = result.is_ok();
        if let (true, Ok(ref output_path)) = (single, &result) {
            println!("{}", output_path.display());
        }
        summary.record(input_path, into_outcome(result));
        progress.on_entry_complete(&label, success);
    }
    progress.finish();

    eprint!("{}", summary.render());
    exit_code_for_summary(&summary)
}

/// Decodes with the old password, re-encodes with the new password and a
/// fresh salt, atomically replacing the original file.
pub fn rotate(config: RotateConfig<'_>) -> ExitCode {
    let spinner = FileSpinner::new(&format!("rotating {}", config.path.display()), config.quiet);
    match rotate_inner(&config) {
        Ok(()) => {
            spinner.finish_with_message(format!("rotated {}", config.path.display()));
            ExitCode::Success
        }
        Err(err) => {
            spinner.abandon_with_message(err.to_string());
            eprintln!("{err}");
            error_to_exit_code(&err)
        }
    }
}

/// Decodes and re-encodes under the same password with a fresh salt,
/// atomically replacing the original file.
pub fn reseed(config: ReseedConfig<'_>) -> ExitCode {
    let spinner = FileSpinner::new(&format!("reseeding {}", config.path.display()), config.quiet);
    match reseed_inner(&config) {
        Ok(()) => {
            spinner.finish_with_message(format!("reseeded {}", config.path.display()));
            ExitCode::Success
        }
        Err(err) => {
            spinner.abandon_with_message(err.to_string());
            eprintln!("{err}");
            error_to_exit_code(&err)
        }
    }
}

fn rotate_inner(config: &RotateConfig<'_>) -> Result<(), Error> {
    let content = fs::read_to_string(config.path)?;
    let ((salt, auth_check), offset) = CipherEngine::decode_header(&content)?;

    let mut decoder = CipherEngine::new(config.old_password.clone());
    decoder.init(Some(salt), Some(auth_check))?;
    let plaintext = decoder.decode_stream(&content[offset..])?;

    let mut encoder = CipherEngine::new(config.new_password.clone());
    encoder.init(None, None)?;
    let header = encoder.encode_header();
    let body = encoder.encode_stream(&plaintext)?;

    write_atomic(config.path, format!("{header}{body}").as_bytes())?;
    Ok(())
}

fn reseed_inner(config: &ReseedConfig<'_>) -> Result<(), Error> {
    let content = fs::read_to_string(config.path)?;
    let ((salt, auth_check), offset) = CipherEngine::decode_header(&content)?;

    let mut decoder = CipherEngine::new(config.password.clone());
    decoder.init(Some(salt), Some(auth_check))?;
    let plaintext = decoder.decode_stream(&content[offset..])?;

    let mut encoder = CipherEngine::new(config.password.clone());
    encoder.init(None, None)?;
    let header = encoder.encode_header();
    let body = encoder.encode_stream(&plaintext)?;

    write_atomic(config.path, format!("{header}{body}").as_bytes())?;
    Ok(())
}

fn encode_one(
    path: &Path,
    output_override: Option<&Path>,
    override_active: bool,
    password: &Password,
    minify_source: bool,
) -> Result<PathBuf, Error> {
    let mut plaintext = fs::read(path)?;
    if minify_source {
        plaintext = minify(&plaintext);
    }

    let mut engine = CipherEngine::new(password.clone());
    engine.init(None, None)?;
    let header = engine.encode_header();
    let body = engine.encode_stream(&plaintext)?;

    let output_path = match (override_active, output_override) {
        (true, Some(explicit)) => explicit.to_path_buf(),
        _ => derive_encode_output(path),
    };
    write_atomic(&output_path, format!("{header}{body}").as_bytes())?;
    Ok(output_path)
}

fn decode_one(
    path: &Path,
    output_override: Option<&Path>,
    override_active: bool,
    password: &Password,
) -> Result<PathBuf, Error> {
    let content = fs::read_to_string(path)?;
    let ((salt, auth_check), offset) = CipherEngine::decode_header(&content)?;

    let mut engine = CipherEngine::new(password.clone());
    engine.init(Some(salt), Some(auth_check))?;
    let plaintext = engine.decode_stream(&content[offset..])?;

    let output_path = match (override_active, output_override) {
        (true, Some(explicit)) => explicit.to_path_buf(),
        _ => derive_decode_output(path),
    };
    write_atomic(&output_path, &plaintext)?;
    Ok(output_path)
}

/// `*.c` / `*.h` → `*.mojic`, preserving the original file name.
fn derive_encode_output(input: &Path) -> PathBuf {
    input.with_extension("mojic")
}

/// `*.mojic` → `*.restored.c`.
fn derive_decode_output(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{stem}.restored.c"))
}

/// If `path` is a file, returns just that file regardless of extension.
/// If it's a directory, requires `recursive` and walks it, keeping only
/// files whose extension is in `extensions`.
fn collect_inputs(path: &Path, recursive: bool, extensions: &[&str]) -> io::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !recursive {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is a directory; pass --recursive to process it", path.display()),
        ));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            let ext = entry.path().extension().and_then(|e| e.to_str()).unwrap_or("");
            extensions.iter().any(|&want| want.eq_ignore_ascii_case(ext))
        })
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    Ok(files)
}

/// Collapses runs of blank lines to at most one and strips trailing
/// whitespace from every line. A CLI-only transform over plaintext bytes;
/// the cipher engine never sees the distinction.
fn minify(bytes: &[u8]) -> Vec<u8> {
    let text = String::from_utf8_lossy(bytes);
    let mut out = String::with_capacity(text.len());
    let mut blank_run = 0u32;
    for line in text.lines() {
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        out.push_str(trimmed);
        out.push('\n');
    }
    out.into_bytes()
}

/// Writes `data` to a temp file beside `dest`, then renames it into place.
/// The original is untouched if either step fails. Registers the temp path
/// with the Ctrl+C handler so an interrupt mid-write leaves nothing behind.
fn write_atomic(dest: &Path, data: &[u8]) -> io::Result<()> {
    let tmp_path = temp_path_for(dest);
    crate::set_active_temp(Some(tmp_path.clone()));

    let result = fs::write(&tmp_path, data).and_then(|_| fs::rename(&tmp_path, dest));
    crate::set_active_temp(None);

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn temp_path_for(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    dest.with_file_name(name)
}

fn into_outcome(result: Result<PathBuf, Error>) -> FileOutcome {
    match result {
        Ok(_) => FileOutcome::Ok,
        Err(err) => FileOutcome::Err(err),
    }
}

fn exit_code_for_summary(summary: &BatchSummary) -> ExitCode {
    if summary.all_ok() {
        ExitCode::Success
    } else if summary.ok_count() > 0 {
        ExitCode::Warning
    } else {
        ExitCode::FatalError
    }
}
