//! Registry configuration.

use std::fmt;
use std::sync::Arc;

/// A callback computing a string from an icon name.
pub type NameFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Sprite options.
///
/// Fields override the defaults one at a time, so the usual way to build a
/// configuration is struct update syntax:
///
/// ```
/// use iconsprite::Options;
///
/// let options = Options {
///     prefix: None,
///     ..Options::default()
/// };
/// assert!(options.inject_only_used_icons);
/// ```
#[derive(Clone)]
pub struct Options {
    /// Only collect icons that are referenced (default: true).
    /// When false, every icon in the directory is collected up front.
    pub inject_only_used_icons: bool,
    /// Prefix for symbol ids, joined with `-` (default: `icon`).
    /// `None` uses the bare icon name as the id.
    pub prefix: Option<String>,
    /// Literal token replaced by the sprite (default: `<!-- icons -->`)
    pub placeholder: String,
    /// Class of the wrapper `<svg>` emitted for each reference
    pub style: NameFn,
    /// Emitted before the `#` in `xlink:href`, for externally hosted sprites
    pub external: NameFn,
}

impl Options {
    pub fn with_style(mut self, style: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.style = Arc::new(style);
        self
    }

    pub fn with_external(
        mut self,
        external: impl Fn(&str) -> String + Send + Sync + 'static,
    ) -> Self {
        self.external = Arc::new(external);
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            inject_only_used_icons: true,
            prefix: Some("icon".to_string()),
            placeholder: "<!-- icons -->".to_string(),
            style: Arc::new(|_| "icon".to_string()),
            external: Arc::new(|_| String::new()),
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("inject_only_used_icons", &self.inject_only_used_icons)
            .field("prefix", &self.prefix)
            .field("placeholder", &self.placeholder)
            .finish_non_exhaustive()
    }
}
