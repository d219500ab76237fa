//! The icon registry: one icon directory and the sprite collected from it.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use log::{debug, info};

use crate::Options;
use crate::error::SpriteError;
use crate::extract::extract_fragment;

/// Collects icons from a directory into `<symbol>` markup.
///
/// A registry lives for one build pass. Every icon is collected at most once
/// per pass, in the order it was first requested, and [`IconRegistry::reset`]
/// starts the next pass from scratch.
#[derive(Debug)]
pub struct IconRegistry {
    dir: PathBuf,
    options: Options,
    collected: Vec<String>,
    seen: HashSet<String>,
    markup: String,
}

impl IconRegistry {
    /// Open an icon directory.
    ///
    /// In eager mode (`inject_only_used_icons: false`) every `*.svg` file in
    /// the directory is collected before this returns.
    pub fn new(dir: impl Into<PathBuf>, options: Options) -> Result<Self, SpriteError> {
        let dir = dir.into();
        if dir.as_os_str().is_empty() {
            return Err(SpriteError::Config("missing icon directory".into()));
        }
        if !dir.exists() {
            return Err(SpriteError::Config(format!(
                "icon directory not found ({})",
                dir.display()
            )));
        }
        if !dir.is_dir() {
            return Err(SpriteError::Config(format!(
                "icon path is not a directory ({})",
                dir.display()
            )));
        }

        let mut registry = Self {
            dir,
            options,
            collected: Vec::new(),
            seen: HashSet::new(),
            markup: String::new(),
        };
        registry.collect_all_if_eager()?;
        Ok(registry)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The `<symbol>` id used for an icon.
    pub fn symbol_id(&self, name: &str) -> String {
        match &self.options.prefix {
            Some(prefix) => format!("{prefix}-{name}"),
            None => name.to_string(),
        }
    }

    /// Concatenated `<symbol>` elements, in collection order.
    pub fn sprite_markup(&self) -> &str {
        &self.markup
    }

    /// Names collected so far, in collection order.
    pub fn collected(&self) -> impl Iterator<Item = &str> {
        self.collected.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.seen.contains(name)
    }

    pub fn len(&self) -> usize {
        self.collected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collected.is_empty()
    }

    /// Add `<dir>/<name>.svg` to the sprite. Already collected names are a no-op.
    ///
    /// On failure nothing is appended.
    pub fn collect(&mut self, name: &str) -> Result<(), SpriteError> {
        if self.seen.contains(name) {
            return Ok(());
        }

        let path = self.dir.join(format!("{name}.svg"));
        let bytes = fs::read(&path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                SpriteError::IconNotFound {
                    name: name.to_string(),
                    dir: self.dir.clone(),
                }
            } else {
                SpriteError::Io { path: path.clone(), source }
            }
        })?;

        // stray non-UTF-8 bytes are replaced rather than rejected
        let source = String::from_utf8_lossy(&bytes);
        let fragment = extract_fragment(&source, name, &self.dir)?;

        self.markup.push_str("<symbol id=\"");
        self.markup.push_str(&self.symbol_id(name));
        self.markup.push_str("\" ");
        self.markup.push_str(fragment.view_box);
        self.markup.push('>');
        self.markup.push_str(fragment.inner);
        self.markup.push_str("</symbol>");

        self.seen.insert(name.to_string());
        self.collected.push(name.to_string());
        debug!("collected icon {} from {}", name, path.display());
        Ok(())
    }

    /// Forget everything collected and return to the just-constructed state.
    pub fn reset(&mut self) -> Result<(), SpriteError> {
        info!(
            "resetting icon registry for {} ({} icons collected)",
            self.dir.display(),
            self.collected.len()
        );
        self.collected.clear();
        self.seen.clear();
        self.markup.clear();
        self.collect_all_if_eager()
    }

    fn collect_all_if_eager(&mut self) -> Result<(), SpriteError> {
        if self.options.inject_only_used_icons {
            return Ok(());
        }
        for name in icon_names(&self.dir)? {
            self.collect(&name)?;
        }
        Ok(())
    }
}

/// Names of the `*.svg` files directly inside `dir`, in enumeration order.
fn icon_names(dir: &Path) -> Result<Vec<String>, SpriteError> {
    let mut names = Vec::new();

    let walker = WalkBuilder::new(dir)
        .max_depth(Some(1))
        .standard_filters(false)
        .hidden(true)
        .follow_links(true)
        .build();

    for entry in walker {
        let entry = entry.map_err(|e| SpriteError::Io {
            path: dir.to_path_buf(),
            source: e.into_io_error().unwrap_or_else(|| io::Error::other("directory walk failed")),
        })?;
        let path = entry.path();
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            continue;
        }
        if path.extension().is_some_and(|e| e == "svg") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.push(stem.to_string());
            }
        }
    }

    Ok(names)
}
