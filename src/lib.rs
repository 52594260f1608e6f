//! chordlib — guitar chord diagram rendering library for ChordBook.
//!
//! Renders chord records into fixed-size diagrams (title, open/muted markers,
//! nut or fret label, grid, barres, finger dots), composes them into strips
//! for a song, and lays strips out on a printed page.
//!
//! # Example
//! ```no_run
//! use chordlib::{library, render_chord_to_svg, RenderOptions};
//!
//! let chord = library::find("Am").unwrap();
//! let svg = render_chord_to_svg(&chord, &RenderOptions::default());
//! println!("{svg}");
//! ```

pub mod editor;
pub mod export;
pub mod library;
pub mod model;
pub mod renderer;
pub mod sheet;

#[cfg(target_os = "android")]
pub mod android;

pub use model::*;
pub use renderer::{
    compute_layout, read_svg, render_chord, render_chord_to_raster, render_chord_to_svg,
    render_strip, render_strip_to_raster, render_strip_to_svg, Background, Diagram,
    DiagramLayout, DrawCommand, Rasterizer, RenderOptions,
};
pub use sheet::{layout_strip, SheetConfig, SheetLayout};

/// Parse and validate a chord record from JSON, then render it to SVG.
pub fn render_chord_json_to_svg(chord_json: &str, options: &RenderOptions) -> Result<String, String> {
    let chord = Chord::from_json(chord_json)?;
    chord.validate()?;
    Ok(render_chord_to_svg(&chord, options))
}

/// Parse a JSON array of chord slots (`null` for an empty slot) and render
/// the strip to SVG.
pub fn render_strip_json_to_svg(slots_json: &str, options: &RenderOptions) -> Result<String, String> {
    let slots: Vec<Option<Chord>> =
        serde_json::from_str(slots_json).map_err(|e| format!("Invalid chord slots JSON: {e}"))?;
    for chord in slots.iter().flatten() {
        chord.validate()?;
    }
    Ok(render_strip_to_svg(&slots, options))
}

/// Parse render options from JSON. Missing fields take their defaults.
pub fn options_from_json(options_json: &str) -> Result<RenderOptions, String> {
    serde_json::from_str(options_json).map_err(|e| format!("Invalid render options JSON: {e}"))
}

/// Lay out `n` diagrams on a page and return the placement as JSON.
pub fn sheet_layout_json(n: usize, page_width_cm: f64) -> Result<String, String> {
    serde_json::to_string(&layout_strip(n, page_width_cm))
        .map_err(|e| format!("JSON serialization error: {e}"))
}

// ═══════════════════════════════════════════════════════════════════════
// C FFI — for iOS (static library) and Android (JNI)
// ═══════════════════════════════════════════════════════════════════════

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

/// Read an optional options string; null or unparsable input yields defaults.
unsafe fn options_arg(options: *const c_char) -> RenderOptions {
    if options.is_null() {
        return RenderOptions::default();
    }
    match unsafe { CStr::from_ptr(options) }.to_str() {
        Ok(json) => options_from_json(json).unwrap_or_else(|e| {
            log::warn!("{e}; using default render options");
            RenderOptions::default()
        }),
        Err(_) => RenderOptions::default(),
    }
}

fn into_c_string(result: Result<String, String>) -> *mut c_char {
    match result {
        Ok(svg) => match CString::new(svg) {
            Ok(c) => c.into_raw(),
            Err(e) => {
                log::error!("Output contains an interior NUL byte: {e}");
                std::ptr::null_mut()
            }
        },
        Err(e) => {
            log::error!("{e}");
            std::ptr::null_mut()
        }
    }
}

/// Render a chord record (JSON) and return SVG as a C string.
/// The caller must free the returned string with `chordlib_free_string`.
///
/// `options` is a JSON object of render options and may be null.
///
/// # Safety
/// `chord_json` must be a valid null-terminated UTF-8 C string. `options`
/// must be null or a valid null-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn chordlib_render_chord_svg(
    chord_json: *const c_char,
    options: *const c_char,
) -> *mut c_char {
    if chord_json.is_null() {
        return std::ptr::null_mut();
    }
    let json = match unsafe { CStr::from_ptr(chord_json) }.to_str() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };
    let options = unsafe { options_arg(options) };
    into_c_string(render_chord_json_to_svg(json, &options))
}

/// Render a strip from a JSON array of chord slots and return SVG as a C
/// string. The caller must free the returned string with
/// `chordlib_free_string`.
///
/// # Safety
/// `slots_json` must be a valid null-terminated UTF-8 C string. `options`
/// must be null or a valid null-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn chordlib_render_strip_svg(
    slots_json: *const c_char,
    options: *const c_char,
) -> *mut c_char {
    if slots_json.is_null() {
        return std::ptr::null_mut();
    }
    let json = match unsafe { CStr::from_ptr(slots_json) }.to_str() {
        Ok(s) => s,
        Err(_) => return std::ptr::null_mut(),
    };
    let options = unsafe { options_arg(options) };
    into_c_string(render_strip_json_to_svg(json, &options))
}

/// Compute the sheet layout for `n` diagrams and return it as a JSON C
/// string. The caller must free the returned string with
/// `chordlib_free_string`.
#[no_mangle]
pub extern "C" fn chordlib_sheet_layout(n: u32, page_width_cm: f64) -> *mut c_char {
    into_c_string(sheet_layout_json(n as usize, page_width_cm))
}

/// Free a string previously returned by chordlib functions.
///
/// # Safety
/// `ptr` must be a string previously returned by a chordlib function, or null.
#[no_mangle]
pub unsafe extern "C" fn chordlib_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        unsafe {
            let _ = CString::from_raw(ptr);
        }
    }
}
