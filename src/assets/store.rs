use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::{
    foundation::error::{SymbolFxError, SymbolFxResult},
    foundation::math::Fnv1a64,
};

/// Graphic substituted when an asset cannot be loaded.
pub const PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 100 100" data-placeholder="true"><rect x="4" y="4" width="92" height="92" rx="6" fill="none" stroke="#999999" stroke-width="4" stroke-dasharray="8 6"/><path d="M38 38 Q38 26 50 26 Q62 26 62 38 Q62 46 50 50 L50 60" fill="none" stroke="#999999" stroke-width="6"/><circle cx="50" cy="72" r="4" fill="#999999"/></svg>"##;

/// Where raw asset text comes from.
pub trait AssetSource {
    /// Read the raw SVG text for `key`.
    fn read(&self, key: &str) -> SymbolFxResult<String>;
}

/// Filesystem-backed source resolving keys relative to a root directory.
#[derive(Clone, Debug)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Resolve assets under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory used when resolving relative keys.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File under the root that `key` names. Either slash separates segments. Absolute keys and
    /// keys that climb above the root are refused.
    fn resolve(&self, key: &str) -> SymbolFxResult<PathBuf> {
        if key.starts_with(['/', '\\']) {
            return Err(SymbolFxError::asset(format!(
                "asset key '{key}' is absolute; keys are relative to the asset root"
            )));
        }
        let mut path = self.root.clone();
        let mut named = false;
        for segment in key.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => {
                    return Err(SymbolFxError::asset(format!(
                        "asset key '{key}' leaves the asset root"
                    )));
                }
                name => {
                    path.push(name);
                    named = true;
                }
            }
        }
        if !named {
            return Err(SymbolFxError::asset(format!(
                "asset key '{key}' names no file"
            )));
        }
        Ok(path)
    }
}

impl AssetSource for DirSource {
    fn read(&self, key: &str) -> SymbolFxResult<String> {
        let path = self.resolve(key)?;
        std::fs::read_to_string(&path)
            .with_context(|| format!("read asset text from '{}'", path.display()))
            .map_err(SymbolFxError::from)
    }
}

/// In-memory source, mostly for hosts that ship assets embedded and for tests.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    assets: HashMap<String, String>,
}

impl MemorySource {
    /// Empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `content` under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: impl Into<String>, content: impl Into<String>) {
        self.assets.insert(key.into(), content.into());
    }

    /// Builder-style [`MemorySource::insert`].
    pub fn with(mut self, key: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(key, content);
        self
    }
}

impl AssetSource for MemorySource {
    fn read(&self, key: &str) -> SymbolFxResult<String> {
        self.assets
            .get(key)
            .cloned()
            .ok_or_else(|| SymbolFxError::asset(format!("unknown asset key '{key}'")))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Stable hashed identifier of an asset key.
pub struct AssetId(pub(crate) u64);

impl AssetId {
    /// Hash an asset key.
    pub fn for_key(key: &str) -> Self {
        let mut hasher = Fnv1a64::new_default();
        hasher.write_u8(b'S');
        hasher.write_bytes(key.as_bytes());
        Self(hasher.finish())
    }

    /// Access raw 64-bit identifier.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug)]
/// Loaded asset: immutable once in the cache.
pub struct Asset {
    /// Key the asset was requested under.
    pub key: String,
    /// Hashed key.
    pub id: AssetId,
    /// Raw SVG text.
    pub content: Arc<str>,
    /// `true` when `content` is the built-in placeholder.
    pub placeholder: bool,
}

impl Asset {
    fn placeholder(key: &str) -> Self {
        Self {
            key: key.to_owned(),
            id: AssetId::for_key(key),
            content: Arc::from(PLACEHOLDER_SVG),
            placeholder: true,
        }
    }

    /// File stem of the key (`pumps/valve-01.svg` -> `valve-01`), used as classifier name hint.
    pub fn name_hint(&self) -> &str {
        let file = self.key.rsplit(['/', '\\']).next().unwrap_or(&self.key);
        file.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(file)
    }
}

/// Keyed store of raw asset text, loaded once per key.
///
/// Load failures are not cached: the placeholder is returned and the next request retries the
/// source.
pub struct AssetCache {
    source: Box<dyn AssetSource>,
    by_key: HashMap<String, Arc<Asset>>,
}

impl std::fmt::Debug for AssetCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetCache")
            .field("cached", &self.by_key.len())
            .finish()
    }
}

impl AssetCache {
    /// Cache reading from `source`.
    pub fn new(source: impl AssetSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            by_key: HashMap::new(),
        }
    }

    /// Return the cached asset, reading it from the source on first use.
    ///
    /// Never fails: an unreadable asset yields the placeholder graphic.
    pub fn load(&mut self, key: &str) -> Arc<Asset> {
        if let Some(asset) = self.by_key.get(key) {
            return Arc::clone(asset);
        }
        match self.source.read(key) {
            Ok(content) => {
                let asset = Arc::new(Asset {
                    key: key.to_owned(),
                    id: AssetId::for_key(key),
                    content: Arc::from(content),
                    placeholder: false,
                });
                self.by_key.insert(key.to_owned(), Arc::clone(&asset));
                asset
            }
            Err(err) => {
                tracing::warn!(asset = key, error = %err, "asset load failed, using placeholder");
                Arc::new(Asset::placeholder(key))
            }
        }
    }

    /// Previously loaded asset, without touching the source.
    pub fn get(&self, key: &str) -> Option<Arc<Asset>> {
        self.by_key.get(key).cloned()
    }

    /// Seed the cache with already-available content.
    pub fn preload(&mut self, key: &str, content: impl Into<String>) {
        let content: String = content.into();
        self.by_key.insert(
            key.to_owned(),
            Arc::new(Asset {
                key: key.to_owned(),
                id: AssetId::for_key(key),
                content: Arc::from(content),
                placeholder: false,
            }),
        );
    }

    /// Drop every cached entry.
    pub fn clear(&mut self) {
        self.by_key.clear();
    }

    /// Number of cached assets.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Return `true` when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
