use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{OutputError, Result};

/// `None` and `-` both name the standard stream.
fn file_path(path: Option<&Path>) -> Option<&Path> {
    path.filter(|path| path.as_os_str() != "-")
}

/// Open a path for reading; `None` or `-` reads standard input.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
    let Some(path) = file_path(path) else {
        return Ok(Box::new(io::stdin()));
    };
    let file = File::open(path).map_err(|source| OutputError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Box::new(BufReader::new(file)))
}

/// Open a path for writing; `None` or `-` writes standard output.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    let Some(path) = file_path(path) else {
        return Ok(Box::new(io::stdout()));
    };
    let file = File::create(path).map_err(|source| OutputError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Box::new(BufWriter::new(file)))
}
