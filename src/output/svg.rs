//! SVG flamegraph output writer.
//!
//! Writes rendered SVG documents to files with proper encoding.

use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Write SVG content to a file
///
/// **Public** - main entry point for SVG output
///
/// # Arguments
/// * `svg_content` - Document returned by `SvgSurface::finish`
/// * `output_path` - Path to output SVG file
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
/// * `OutputError::UnfinishedDocument` - The surface was never finished
///
/// # Example
/// ```ignore
/// let mut surface = SvgSurface::default();
/// engine.render(&mut surface)?;
/// write_svg(&surface.finish(), "flamegraph.svg")?;
/// ```
pub fn write_svg(svg_content: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing SVG to: {}", output_path.display());

    validate_svg_path(output_path)?;
    if !svg_content.trim_end().ends_with("</svg>") {
        return Err(OutputError::UnfinishedDocument(svg_content.len()));
    }
    super::ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(svg_content.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    let file_size = svg_content.len();
    info!(
        "SVG written successfully ({} bytes, {:.2} KB)",
        file_size,
        file_size as f64 / 1024.0
    );

    Ok(())
}

/// Validate output path for SVG
///
/// **Private** - internal validation
fn validate_svg_path(path: &Path) -> Result<(), OutputError> {
    super::validate_output_path(path)?;

    if let Some(ext) = path.extension() {
        if ext != "svg" {
            debug!("Warning: File does not have .svg extension: {}", path.display());
        }
    }

    Ok(())
}
