//! iconsprite - SVG icon sprites for HTML
//!
//! iconsprite collects icons from a directory into a single inline sprite and
//! rewrites `<icon-name>` tags into `<svg><use xlink:href="#icon-name"></use></svg>`
//! references to it.
//!
//! A pass looks like this:
//!
//! ```no_run
//! use iconsprite::{IconRegistry, Options, inject_sprite, rewrite_references};
//!
//! let mut registry = IconRegistry::new("assets/icons", Options::default())?;
//! let page = rewrite_references("<!-- icons --><icon-home/>", &mut registry)?;
//! let (page, pass) = inject_sprite(&page, &mut registry);
//! pass.complete()?;
//! # Ok::<(), iconsprite::SpriteError>(())
//! ```

mod error;
mod extract;
mod inject;
mod options;
mod registry;
mod rewrite;

pub use error::*;
pub use extract::*;
pub use inject::*;
pub use options::*;
pub use registry::*;
pub use rewrite::*;

/// Run one complete pass over a batch of documents.
///
/// Every document is rewritten first, then the sprite is injected into each
/// document holding the placeholder, then the registry is reset. A failed
/// rewrite aborts the batch before anything is injected.
pub fn build_pass(
    documents: &[String],
    registry: &mut IconRegistry,
) -> Result<Vec<String>, SpriteError> {
    let rewritten = documents
        .iter()
        .map(|doc| rewrite_references(doc, registry))
        .collect::<Result<Vec<_>, _>>()?;

    let pass = InjectionPass::new(registry);
    let output = rewritten.iter().map(|doc| pass.inject(doc)).collect();
    pass.complete()?;
    Ok(output)
}
