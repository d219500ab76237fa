//! Injecting the collected sprite into documents.
//!
//! Injection is two-phase. [`inject_sprite`] renders the sprite and returns an
//! [`InjectionPass`] alongside the first result; the pass can inject the same
//! sprite into further documents of the batch, and [`InjectionPass::complete`]
//! resets the registry once the batch is done. The pass holds the registry
//! mutably, so nothing can be collected between rendering and reset.

use log::info;

use crate::error::SpriteError;
use crate::registry::IconRegistry;

/// Wrap symbol markup in the hidden inline container.
pub fn render_sprite(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len() + 34);
    out.push_str("<svg style=\"display:none;\">");
    out.push_str(markup);
    out.push_str("</svg>");
    out
}

/// Wrap symbol markup in a standalone SVG document, for sprites served as a
/// separate file and referenced through the `external` option.
pub fn render_standalone_sprite(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len() + 48);
    out.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\">");
    out.push_str(markup);
    out.push_str("</svg>");
    out
}

/// An injection in progress. Call [`InjectionPass::complete`] once every
/// document of the batch has been processed.
///
/// Dropping a pass without completing it leaves the registry as it was.
#[must_use = "the registry is only reset when the pass is completed"]
#[derive(Debug)]
pub struct InjectionPass<'a> {
    registry: &'a mut IconRegistry,
    sprite: String,
}

impl<'a> InjectionPass<'a> {
    pub fn new(registry: &'a mut IconRegistry) -> Self {
        let sprite = render_sprite(registry.sprite_markup());
        Self { registry, sprite }
    }

    /// The rendered hidden sprite.
    pub fn sprite(&self) -> &str {
        &self.sprite
    }

    pub fn registry(&self) -> &IconRegistry {
        &*self.registry
    }

    /// Replace the first occurrence of the placeholder with the sprite.
    /// Documents without the placeholder come back unchanged.
    pub fn inject(&self, document: &str) -> String {
        let placeholder = self.registry.options().placeholder.as_str();
        document.replacen(placeholder, &self.sprite, 1)
    }

    /// Finish the batch and reset the registry for the next pass.
    pub fn complete(self) -> Result<(), SpriteError> {
        info!(
            "sprite pass complete: {} icons, {} bytes",
            self.registry.len(),
            self.sprite.len()
        );
        self.registry.reset()
    }
}

/// Inject the registry's sprite into `document`.
pub fn inject_sprite<'a>(
    document: &str,
    registry: &'a mut IconRegistry,
) -> (String, InjectionPass<'a>) {
    let pass = InjectionPass::new(registry);
    let result = pass.inject(document);
    (result, pass)
}
