//! Export helpers — data URIs for inline previews, batch export of a chord
//! family or song, and ZIP packaging.
//!
//! A ZIP export holds one file per chord (`{name}.{ext}`) in input order,
//! followed by the composed strip.

use std::io::{Cursor, Write};
use std::sync::Arc;

use base64::Engine;
use serde::{Deserialize, Serialize};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::model::Chord;
use crate::renderer::{
    rasterize_png, render_chord, render_chord_to_svg, render_strip, render_strip_to_svg, Rasterizer,
    RenderOptions,
};

/// File stem used for the composed strip in an export.
pub const STRIP_FILE_STEM: &str = "strip";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Svg,
    Png,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Png => "png",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Png => "image/png",
        }
    }
}

/// One named file produced by an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

// ═══════════════════════════════════════════════════════════════════════
// Data URIs
// ═══════════════════════════════════════════════════════════════════════

pub fn data_uri(format: ExportFormat, bytes: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        format.mime_type(),
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

pub fn svg_data_uri(svg: &str) -> String {
    data_uri(ExportFormat::Svg, svg.as_bytes())
}

pub fn png_data_uri(png: &[u8]) -> String {
    data_uri(ExportFormat::Png, png)
}

// ═══════════════════════════════════════════════════════════════════════
// File naming
// ═══════════════════════════════════════════════════════════════════════

/// `{name}.{ext}` with path separators and other characters archive tools
/// choke on replaced by `_`. Empty names become `chord`.
pub fn file_name(name: &str, format: ExportFormat) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let stem = if stem.is_empty() || stem.chars().all(|c| c == '.') {
        "chord".to_string()
    } else {
        stem
    };
    format!("{stem}.{}", format.extension())
}

/// Make `name` unique among `taken` by appending `-2`, `-3`, ….
fn unique_name(name: String, taken: &[ExportFile]) -> String {
    if !taken.iter().any(|f| f.name == name) {
        return name;
    }
    let (stem, ext) = match name.rsplit_once('.') {
        Some((stem, ext)) => (stem.to_string(), format!(".{ext}")),
        None => (name.clone(), String::new()),
    };
    (2..)
        .map(|n| format!("{stem}-{n}{ext}"))
        .find(|candidate| !taken.iter().any(|f| &f.name == candidate))
        .unwrap_or(name)
}

// ═══════════════════════════════════════════════════════════════════════
// Batch export
// ═══════════════════════════════════════════════════════════════════════

/// Render every chord plus the strip of `strip_slots` into named files.
///
/// PNG exports build one rasterizer on the blocking pool and share it across
/// the batch.
pub async fn export_chords(
    chords: &[Chord],
    strip_slots: &[Option<Chord>],
    format: ExportFormat,
    options: &RenderOptions,
) -> Result<Vec<ExportFile>, String> {
    match format {
        ExportFormat::Svg => Ok(export_svg(chords, strip_slots, options)),
        ExportFormat::Png => {
            let rasterizer = tokio::task::spawn_blocking(Rasterizer::new)
                .await
                .map_err(|e| format!("Font loading task failed: {e}"))?;
            export_png(chords, strip_slots, options, Arc::new(rasterizer)).await
        }
    }
}

fn export_svg(chords: &[Chord], strip_slots: &[Option<Chord>], options: &RenderOptions) -> Vec<ExportFile> {
    let mut files: Vec<ExportFile> = Vec::with_capacity(chords.len() + 1);
    for chord in chords {
        let name = unique_name(file_name(&chord.name, ExportFormat::Svg), &files);
        files.push(ExportFile {
            name,
            bytes: render_chord_to_svg(chord, options).into_bytes(),
        });
    }
    let name = unique_name(format!("{STRIP_FILE_STEM}.svg"), &files);
    files.push(ExportFile {
        name,
        bytes: render_strip_to_svg(strip_slots, options).into_bytes(),
    });
    log::debug!("Exported {} SVG files", files.len());
    files
}

/// PNG export with a caller-supplied rasterizer.
///
/// Each file is rasterized and encoded on the blocking pool, one after
/// another; the returned files keep the input order with the strip last. The
/// first failure aborts the export.
pub async fn export_png(
    chords: &[Chord],
    strip_slots: &[Option<Chord>],
    options: &RenderOptions,
    rasterizer: Arc<Rasterizer>,
) -> Result<Vec<ExportFile>, String> {
    let mut files: Vec<ExportFile> = Vec::with_capacity(chords.len() + 1);
    for chord in chords {
        let bytes = rasterize_png(Arc::clone(&rasterizer), render_chord(chord, options), options.raster_scale)
            .await
            .map_err(|e| format!("Failed to render '{}': {e}", chord.name))?;
        let name = unique_name(file_name(&chord.name, ExportFormat::Png), &files);
        files.push(ExportFile { name, bytes });
    }
    let bytes = rasterize_png(rasterizer, render_strip(strip_slots, options), options.raster_scale).await?;
    let name = unique_name(format!("{STRIP_FILE_STEM}.png"), &files);
    files.push(ExportFile { name, bytes });
    log::debug!("Exported {} PNG files", files.len());
    Ok(files)
}

/// Package files into a ZIP archive, in order.
pub fn write_zip(files: &[ExportFile]) -> Result<Vec<u8>, String> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for file in files {
        writer
            .start_file(file.name.as_str(), options)
            .map_err(|e| format!("Failed to add '{}' to archive: {e}", file.name))?;
        writer
            .write_all(&file.bytes)
            .map_err(|e| format!("Failed to write '{}' to archive: {e}", file.name))?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| format!("Failed to finish archive: {e}"))?;
    Ok(cursor.into_inner())
}
