//! JNI bindings for Android.
//!
//! These functions are called from Kotlin via the JNI bridge. Chords travel
//! as JSON records; a null return means the input could not be rendered.

use jni::objects::{JClass, JString};
use jni::sys::{jdouble, jint, jstring};
use jni::JNIEnv;

use crate::{options_from_json, render_chord_json_to_svg, render_strip_json_to_svg, sheet_layout_json};
use crate::renderer::RenderOptions;

fn options_arg(env: &mut JNIEnv, options: &JString) -> RenderOptions {
    if options.is_null() {
        return RenderOptions::default();
    }
    match env.get_string(options) {
        Ok(s) => {
            let json: String = s.into();
            options_from_json(&json).unwrap_or_else(|e| {
                log::warn!("{e}; using default render options");
                RenderOptions::default()
            })
        }
        Err(_) => RenderOptions::default(),
    }
}

fn into_jstring(env: &mut JNIEnv, result: Result<String, String>) -> jstring {
    match result {
        Ok(svg) => match env.new_string(&svg) {
            Ok(js) => js.into_raw(),
            Err(_) => std::ptr::null_mut(),
        },
        Err(e) => {
            log::error!("{e}");
            std::ptr::null_mut()
        }
    }
}

/// Render a chord record to SVG.
///
/// Called from Kotlin as:
///   external fun renderChord(chordJson: String, optionsJson: String?): String?
#[no_mangle]
pub extern "system" fn Java_com_chordbook_app_ChordLib_renderChord(
    mut env: JNIEnv,
    _class: JClass,
    chord_json: JString,
    options_json: JString,
) -> jstring {
    let json: String = match env.get_string(&chord_json) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };
    let options = options_arg(&mut env, &options_json);
    let result = render_chord_json_to_svg(&json, &options);
    into_jstring(&mut env, result)
}

/// Render a strip of chord slots to SVG.
///
/// Called from Kotlin as:
///   external fun renderStrip(slotsJson: String, optionsJson: String?): String?
#[no_mangle]
pub extern "system" fn Java_com_chordbook_app_ChordLib_renderStrip(
    mut env: JNIEnv,
    _class: JClass,
    slots_json: JString,
    options_json: JString,
) -> jstring {
    let json: String = match env.get_string(&slots_json) {
        Ok(s) => s.into(),
        Err(_) => return std::ptr::null_mut(),
    };
    let options = options_arg(&mut env, &options_json);
    let result = render_strip_json_to_svg(&json, &options);
    into_jstring(&mut env, result)
}

/// Sheet placement for `count` diagrams as JSON.
///
/// Called from Kotlin as:
///   external fun sheetLayout(count: Int, pageWidthCm: Double): String?
#[no_mangle]
pub extern "system" fn Java_com_chordbook_app_ChordLib_sheetLayout(
    mut env: JNIEnv,
    _class: JClass,
    count: jint,
    page_width_cm: jdouble,
) -> jstring {
    let result = sheet_layout_json(count.max(0) as usize, page_width_cm);
    into_jstring(&mut env, result)
}
