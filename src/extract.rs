//! Pulling symbol data out of icon source.
//!
//! This is a text scan, not an XML parse: the first `viewBox="..."` attribute
//! in the file wins, and the inner markup runs to the first `</svg>`. Icons with
//! a nested `<svg>` are not supported.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::SpriteError;

/// The parts of an icon needed to build a `<symbol>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvgFragment<'a> {
    /// The complete attribute, e.g. `viewBox="0 0 24 24"`
    pub view_box: &'a str,
    /// Everything between `<svg ...>` and `</svg>`
    pub inner: &'a str,
}

fn view_box_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"\s(viewBox="[0-9\-\s.]+")"#).expect("valid viewBox pattern"))
}

fn svg_body_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // ASCII-only case folding: `<\u{17F}vg>` is not an svg tag
    RE.get_or_init(|| {
        Regex::new(r"(?s)(?i-u:<svg)[^>]*>(.*?)(?i-u:</svg>)").expect("valid svg pattern")
    })
}

/// Extract the `viewBox` attribute and inner markup of icon `name` from `dir`.
///
/// `name` and `dir` are only used to report failures.
pub fn extract_fragment<'a>(
    source: &'a str,
    name: &str,
    dir: &Path,
) -> Result<SvgFragment<'a>, SpriteError> {
    let view_box = view_box_re()
        .captures(source)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| SpriteError::MalformedIcon {
            name: name.to_string(),
            dir: dir.to_path_buf(),
            reason: "no viewBox attribute".into(),
        })?;

    let inner = svg_body_re()
        .captures(source)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| SpriteError::MalformedIcon {
            name: name.to_string(),
            dir: dir.to_path_buf(),
            reason: "no <svg> element".into(),
        })?;

    Ok(SvgFragment {
        view_box: view_box.as_str(),
        inner: inner.as_str(),
    })
}
