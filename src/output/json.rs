//! JSON readers and writers: flamebearer profiles in, reports out.

use crate::model::{Flamebearer, FlamebearerProfile};
use crate::utils::error::{OutputError, ParseError};
use log::{debug, info};
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Read a flamebearer profile document from a JSON file
///
/// **Public** - the raw wire document, levels still delta-encoded
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_profile(input_path: impl AsRef<Path>) -> Result<FlamebearerProfile, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading profile from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let profile: FlamebearerProfile =
        serde_json::from_reader(BufReader::new(file)).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Profile loaded: version {}, {:?}, {} levels",
        profile.version,
        profile.metadata.format,
        profile.flamebearer.levels.len()
    );

    Ok(profile)
}

/// Parse and decode a profile document held in memory
///
/// # Errors
/// * `ParseError::JsonError` - Document is not a flamebearer profile
/// * `ParseError::InvalidEncoding` - Levels fail to decode or validate
pub fn parse_flamebearer(json: &str) -> Result<Flamebearer, ParseError> {
    let profile: FlamebearerProfile = serde_json::from_str(json)?;
    Ok(Flamebearer::from_profile(profile)?)
}

/// Write any serializable report as pretty JSON
///
/// **Public** - used for hit-test reports and re-encoded profiles
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report<T: Serialize>(report: &T, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    super::validate_output_path(output_path)?;
    super::ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    info!(
        "Report written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
