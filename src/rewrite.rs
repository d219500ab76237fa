//! Rewriting `<icon-*>` tags into sprite references.

use std::sync::OnceLock;

use log::trace;
use regex::{Captures, Regex};

use crate::error::SpriteError;
use crate::registry::IconRegistry;

/// Matches `<icon-name class="...">` with an optional self-close and an optional
/// closing `</icon-...>` tag.
///
/// Case folding is ASCII-only, so the Kelvin sign or a long s never stands in
/// for a letter of a tag or icon name.
fn icon_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?i-u)<icon-([a-z0-9-]+)(?:(?u:\s)+class="([a-z0-9\-_ ]*)")?/?>(?:(?u:\s)*</icon-[a-z0-9-]+>)?"#,
        )
        .expect("valid icon tag pattern")
    })
}

/// Replace every icon tag in `document` with an `<svg><use/></svg>` reference.
///
/// In lazy mode each referenced icon is collected into the registry as it is
/// found. Text outside icon tags is copied unchanged.
pub fn rewrite_references(
    document: &str,
    registry: &mut IconRegistry,
) -> Result<String, SpriteError> {
    let mut out = String::with_capacity(document.len());
    let mut last = 0;

    for caps in icon_tag_re().captures_iter(document) {
        let whole = caps.get(0).expect("group 0 always matches");
        out.push_str(&document[last..whole.start()]);
        push_reference(&mut out, &caps, registry)?;
        last = whole.end();
    }

    out.push_str(&document[last..]);
    Ok(out)
}

fn push_reference(
    out: &mut String,
    caps: &Captures<'_>,
    registry: &mut IconRegistry,
) -> Result<(), SpriteError> {
    let name = &caps[1];
    let class = caps.get(2).map_or("", |m| m.as_str());

    if registry.options().inject_only_used_icons {
        registry.collect(name)?;
    }

    let options = registry.options();
    out.push_str("<svg class=\"");
    out.push_str(&(options.style)(name));
    if !class.is_empty() {
        out.push(' ');
        out.push_str(class);
    }
    out.push_str("\"><use xlink:href=\"");
    out.push_str(&(options.external)(name));
    out.push('#');
    out.push_str(&registry.symbol_id(name));
    out.push_str("\"></use></svg>");

    trace!("rewrote reference to icon {}", name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Options;
    use std::fs;

    fn registry_with(icons: &[&str], options: Options) -> (tempfile::TempDir, IconRegistry) {
        let dir = tempfile::tempdir().unwrap();
        for name in icons {
            fs::write(
                dir.path().join(format!("{name}.svg")),
                r#"<svg viewBox="0 0 8 8"><circle r="4"/></svg>"#,
            )
            .unwrap();
        }
        let registry = IconRegistry::new(dir.path(), options).unwrap();
        (dir, registry)
    }

    #[test]
    fn test_rewrite_paired_tag() {
        let (_dir, mut registry) = registry_with(&["home"], Options::default());
        let out = rewrite_references("<icon-home></icon-home>", &mut registry).unwrap();
        assert_eq!(
            out,
            r##"<svg class="icon"><use xlink:href="#icon-home"></use></svg>"##
        );
        assert!(registry.contains("home"));
    }

    #[test]
    fn test_class_passthrough() {
        let (_dir, mut registry) = registry_with(&["home"], Options::default());
        let out = rewrite_references(r#"<icon-home class="big"/>"#, &mut registry).unwrap();
        assert_eq!(
            out,
            r##"<svg class="icon big"><use xlink:href="#icon-home"></use></svg>"##
        );
    }

    #[test]
    fn test_empty_class_adds_no_space() {
        let (_dir, mut registry) = registry_with(&["home"], Options::default());
        let out = rewrite_references(r#"<icon-home class="">"#, &mut registry).unwrap();
        assert!(out.contains(r#"class="icon""#));
    }

    #[test]
    fn test_surrounding_text_untouched() {
        let (_dir, mut registry) = registry_with(&["home", "star"], Options::default());
        let doc = "<p>Go <icon-home/> now</p>\n<b>★</b> <icon-star>\n  </icon-star>!";
        let out = rewrite_references(doc, &mut registry).unwrap();
        assert_eq!(
            out,
            concat!(
                r##"<p>Go <svg class="icon"><use xlink:href="#icon-home"></use></svg> now</p>"##,
                "\n<b>★</b> ",
                r##"<svg class="icon"><use xlink:href="#icon-star"></use></svg>!"##,
            )
        );
    }

    #[test]
    fn test_document_without_tags() {
        let (_dir, mut registry) = registry_with(&["home"], Options::default());
        let doc = "<div class=\"icon-home\">no tags here</div>";
        assert_eq!(rewrite_references(doc, &mut registry).unwrap(), doc);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_callbacks_and_no_prefix() {
        let options = Options {
            prefix: None,
            ..Options::default()
        }
        .with_style(|name| format!("i i-{name}"))
        .with_external(|_| "/sprite.svg".to_string());
        let (_dir, mut registry) = registry_with(&["home"], options);
        let out = rewrite_references("<icon-home>", &mut registry).unwrap();
        assert_eq!(
            out,
            r#"<svg class="i i-home"><use xlink:href="/sprite.svg#home"></use></svg>"#
        );
    }

    #[test]
    fn test_case_insensitive() {
        let (_dir, mut registry) = registry_with(&["home"], Options::default());
        let out = rewrite_references(r#"<ICON-home CLASS="x"></Icon-home>"#, &mut registry).unwrap();
        assert_eq!(
            out,
            r##"<svg class="icon x"><use xlink:href="#icon-home"></use></svg>"##
        );
    }

    #[test]
    fn test_missing_icon_aborts() {
        let (_dir, mut registry) = registry_with(&["home"], Options::default());
        let err = rewrite_references("<icon-home/><icon-ghost/>", &mut registry).unwrap_err();
        assert!(matches!(err, SpriteError::IconNotFound { ref name, .. } if name == "ghost"));
    }

    #[test]
    fn test_eager_mode_skips_collection() {
        let options = Options {
            inject_only_used_icons: false,
            ..Options::default()
        };
        let (_dir, mut registry) = registry_with(&["home", "star"], options);
        let before = registry.sprite_markup().to_string();
        // unknown icons are not looked up in eager mode
        let out = rewrite_references("<icon-ghost/>", &mut registry).unwrap();
        assert!(out.contains("#icon-ghost"));
        assert_eq!(registry.sprite_markup(), before);
    }

    #[test]
    fn test_non_ascii_case_folds_are_not_tags() {
        let (_dir, mut registry) = registry_with(&["home"], Options::default());
        let doc = "<icon-\u{212A}ey/> <icon-home cla\u{17F}s=\"x\"/>";
        assert_eq!(rewrite_references(doc, &mut registry).unwrap(), doc);
        assert!(registry.is_empty());
    }
}
