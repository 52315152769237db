//! Generic JSON persistence helpers shared by the catalog loader and the
//! player store.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::core::constants::{RECORD_EXTENSION, TEMP_SUFFIX};

/// Lists `*.json` files directly inside `dir`, sorted by file name.
///
/// Sorting keeps scans deterministic across platforms; `read_dir` order is not.
pub fn json_files_in(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some(RECORD_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Serializes `data` as JSON indented with four spaces, the layout used by
/// records written before this crate existed.
pub fn to_pretty_json<T: Serialize>(data: &T) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut ser)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok(buf)
}

/// Reads and deserializes a JSON file. Decode failures come back as
/// `InvalidData`.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> io::Result<T> {
    let json = fs::read_to_string(path)?;
    serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Replaces `path` with `bytes` by writing a sibling temp file, flushing it to
/// disk and renaming it over the target. Readers see either the old record or
/// the new one, and a crash never leaves an empty record behind.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = temp_path_for(path);
    let written = File::create(&tmp).and_then(|mut file| {
        file.write_all(bytes)?;
        file.sync_all()
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    fs::rename(&tmp, path).inspect_err(|_| {
        let _ = fs::remove_file(&tmp);
    })
}

/// `<path>.tmp`; never ends in `.json`, so scans skip it.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}
