//! Program images are text: one byte per line written as a base-2 literal, optionally followed
//! by a `#` comment. Blank and comment-only lines are skipped.
//!
//! ```text
//! 10000010 # LDI R0,8
//! 00000000
//! 00001000
//! ```

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;

const COMMENT: char = '#';

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{} not found", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: `{token}` is not an 8-bit binary literal")]
    InvalidByte { line: usize, token: String },
}

/// Decodes the text form of a program image. `line` in errors is 1-based.
pub fn parse_program(source: &str) -> Result<Vec<u8>, LoadError> {
    let mut program = Vec::new();
    for (i, line) in source.lines().enumerate() {
        let token = match line.split_once(COMMENT) {
            Some((code, _comment)) => code,
            None => line,
        }
        .trim();
        if token.is_empty() {
            continue;
        }
        let invalid = || LoadError::InvalidByte {
            line: i + 1,
            token: token.to_string(),
        };
        // `from_str_radix` alone would take a leading sign.
        if !token.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(invalid());
        }
        let byte = u8::from_str_radix(token, 2).map_err(|_| invalid())?;
        program.push(byte);
    }
    Ok(program)
}

/// Reads and decodes the program image at `path`.
pub fn read_program(path: impl AsRef<Path>) -> Result<Vec<u8>, LoadError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::FileNotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let program = parse_program(&source)?;
    tracing::debug!(path = %path.display(), len = program.len(), "read program image");
    Ok(program)
}
