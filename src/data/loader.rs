use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};

use super::model::SpectralFile;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Directory listing
// ---------------------------------------------------------------------------

/// Regular files directly inside `dir`, sorted by path.
///
/// Sub-directories are skipped. Sorting makes "last matching file wins"
/// reproducible across platforms.
pub fn list_directory(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

// ---------------------------------------------------------------------------
// Delimited numeric text
// ---------------------------------------------------------------------------

/// Load every number of a delimited text file as one flat sequence.
///
/// Layout: no header row, any number of records, `delimiter` between fields.
/// Records are concatenated in file order. Blank lines and lines starting
/// with `#` are ignored; surrounding whitespace of a field is trimmed.
pub fn load_samples(path: &Path, delimiter: u8) -> Result<Vec<f64>, LoadError> {
    let file = fs::File::open(path)?;
    read_samples(file, delimiter)
}

/// Load `path` into a [`SpectralFile`].
pub fn load_file(path: &Path, delimiter: u8) -> Result<SpectralFile, LoadError> {
    let samples = load_samples(path, delimiter)?;
    Ok(SpectralFile::new(path, samples))
}

/// Same as [`load_samples`] over any reader.
pub fn read_samples<R: Read>(reader: R, delimiter: u8) -> Result<Vec<f64>, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    for (record_no, result) in reader.records().enumerate() {
        let record = result?;
        for (field_no, field) in record.iter().enumerate() {
            match field.parse::<f64>() {
                Ok(value) => samples.push(value),
                Err(_) => {
                    return Err(LoadError::NotANumber {
                        record: record_no,
                        field: field_no,
                        value: field.to_string(),
                    });
                }
            }
        }
    }
    Ok(samples)
}
