//! Asset registry: the cache and ownership authority for loaded assets
//!
//! Assets are requested by file name, relative to the registry root. The first
//! request loads and caches the asset; later requests for the same name return
//! the same shared instance. A failed load caches nothing.
//!
//! Each asset kind has its own pool guarded by one lock held across the whole
//! lookup, parse, insert sequence, so concurrent requests for the same unseen
//! name load it once.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

use crate::atlas::TextureDictionary;
use crate::backend::AssetBackend;
use crate::config::AssetryConfig;
use crate::error::{AssetError, AssetKind, LoadError, ParseError};
use crate::loaders;
use crate::models::{Font, FrameAnimation, SceneDocument, SkeletalAnimation};

/// Cache of one asset kind, keyed by the requested file name.
struct Pool<T> {
    kind: AssetKind,
    entries: Mutex<HashMap<String, Arc<T>>>,
}

impl<T> Pool<T> {
    fn new(kind: AssetKind) -> Self {
        Self {
            kind,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Return the cached asset or run `load` and cache its result.
    ///
    /// The value is only inserted once `load` has fully succeeded.
    fn get_or_load<F>(&self, file_name: &str, load: F) -> Result<Arc<T>, AssetError>
    where
        F: FnOnce() -> Result<T, LoadError>,
    {
        let mut entries = self.entries.lock();

        if let Some(asset) = entries.get(file_name) {
            tracing::debug!(kind = %self.kind, file = file_name, "asset cache hit");
            return Ok(Arc::clone(asset));
        }

        let started = Instant::now();
        match load() {
            Ok(asset) => {
                let asset = Arc::new(asset);
                entries.insert(file_name.to_string(), Arc::clone(&asset));
                tracing::info!(
                    kind = %self.kind,
                    file = file_name,
                    elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
                    "loaded asset"
                );
                Ok(asset)
            }
            Err(source) => {
                tracing::warn!(kind = %self.kind, file = file_name, error = %source, "asset load failed");
                Err(AssetError::new(self.kind, file_name, source))
            }
        }
    }

    fn contains(&self, file_name: &str) -> bool {
        self.entries.lock().contains_key(file_name)
    }

    fn len(&self) -> usize {
        self.entries.lock().len()
    }

    fn clear(&mut self) {
        self.entries.get_mut().clear();
    }
}

/// Owns every asset loaded through it, one pool per [`AssetKind`].
///
/// Returned `Arc`s compare equal with [`Arc::ptr_eq`] for repeated requests
/// of the same file name.
pub struct AssetRegistry<B: AssetBackend> {
    root: PathBuf,
    backend: B,
    textures: Pool<B::Texture>,
    texture_dictionaries: Pool<TextureDictionary>,
    songs: Pool<B::Song>,
    sound_effects: Pool<B::SoundEffect>,
    fonts: Pool<Font>,
    skeletal_animations: Pool<SkeletalAnimation<B::Texture>>,
    frame_animations: Pool<FrameAnimation<B::Texture>>,
    scenes: Pool<SceneDocument>,
    skeleton_data: Pool<B::SkeletonData>,
    skeleton_animations: Pool<B::SkeletonAnimation>,
}

impl<B: AssetBackend> AssetRegistry<B> {
    /// Create an empty registry resolving file names against `root`.
    pub fn new(root: impl Into<PathBuf>, backend: B) -> Self {
        Self {
            root: root.into(),
            backend,
            textures: Pool::new(AssetKind::Texture),
            texture_dictionaries: Pool::new(AssetKind::TextureDictionary),
            songs: Pool::new(AssetKind::Song),
            sound_effects: Pool::new(AssetKind::SoundEffect),
            fonts: Pool::new(AssetKind::Font),
            skeletal_animations: Pool::new(AssetKind::SkeletalAnimation),
            frame_animations: Pool::new(AssetKind::FrameAnimation),
            scenes: Pool::new(AssetKind::Scene),
            skeleton_data: Pool::new(AssetKind::SkeletonData),
            skeleton_animations: Pool::new(AssetKind::SkeletonAnimation),
        }
    }

    /// Create an empty registry rooted at the configured asset directory.
    pub fn from_config(config: &AssetryConfig, backend: B) -> Self {
        Self::new(config.assets.root.clone(), backend)
    }

    /// Directory file names are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Full path of a file name under the root.
    pub fn resolve(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }

    /// Read a document's text. Bytes that are not UTF-8 are a parse failure.
    fn read_document(&self, file_name: &str) -> Result<String, LoadError> {
        let bytes = fs::read(self.resolve(file_name))?;
        Ok(String::from_utf8(bytes).map_err(ParseError::from)?)
    }

    // =========================================================================
    // Backend-decoded assets
    // =========================================================================

    pub fn load_texture(&self, file_name: &str) -> Result<Arc<B::Texture>, AssetError> {
        self.textures.get_or_load(file_name, || {
            self.backend
                .texture_from_file(&self.resolve(file_name))
                .map_err(LoadError::Backend)
        })
    }

    pub fn load_texture_dictionary(&self, file_name: &str) -> Result<Arc<TextureDictionary>, AssetError> {
        self.texture_dictionaries.get_or_load(file_name, || {
            self.backend
                .texture_dictionary_from_file(&self.resolve(file_name))
                .map_err(LoadError::Backend)
        })
    }

    pub fn load_song(&self, file_name: &str) -> Result<Arc<B::Song>, AssetError> {
        self.songs.get_or_load(file_name, || {
            self.backend
                .song_from_file(&self.resolve(file_name))
                .map_err(LoadError::Backend)
        })
    }

    pub fn load_sound_effect(&self, file_name: &str) -> Result<Arc<B::SoundEffect>, AssetError> {
        self.sound_effects.get_or_load(file_name, || {
            self.backend
                .sound_effect_from_file(&self.resolve(file_name))
                .map_err(LoadError::Backend)
        })
    }

    /// Load binary skeleton data whose attachments live in `dictionary`.
    pub fn load_skeleton_data(
        &self,
        file_name: &str,
        dictionary: &TextureDictionary,
    ) -> Result<Arc<B::SkeletonData>, AssetError> {
        self.skeleton_data.get_or_load(file_name, || {
            let mut reader = BufReader::new(File::open(self.resolve(file_name))?);
            self.backend
                .read_skeleton_data(&mut reader, dictionary)
                .map_err(LoadError::Backend)
        })
    }

    /// Load a binary skeleton animation for `skeleton`.
    ///
    /// Cached by file name only; the same file requested with a different
    /// skeleton returns the first result.
    pub fn load_skeleton_animation(
        &self,
        file_name: &str,
        skeleton: &B::SkeletonData,
    ) -> Result<Arc<B::SkeletonAnimation>, AssetError> {
        self.skeleton_animations.get_or_load(file_name, || {
            let mut reader = BufReader::new(File::open(self.resolve(file_name))?);
            self.backend
                .read_animation(&mut reader, skeleton)
                .map_err(LoadError::Backend)
        })
    }

    // =========================================================================
    // Parsed documents
    // =========================================================================

    /// Load a bitmap font metrics document.
    pub fn load_font(&self, file_name: &str) -> Result<Arc<Font>, AssetError> {
        self.fonts.get_or_load(file_name, || {
            loaders::parse_font(&self.read_document(file_name)?)
        })
    }

    /// Load a bone/keyframe animation drawn from `texture`, whose region
    /// names resolve in `dictionary`.
    pub fn load_skeletal_animation(
        &self,
        file_name: &str,
        texture: &Arc<B::Texture>,
        dictionary: &TextureDictionary,
    ) -> Result<Arc<SkeletalAnimation<B::Texture>>, AssetError> {
        self.skeletal_animations.get_or_load(file_name, || {
            loaders::parse_skeletal_animation(
                &self.read_document(file_name)?,
                Arc::clone(texture),
                dictionary,
            )
        })
    }

    /// Load a frame-sheet animation drawn from `texture`, whose frame names
    /// resolve in `dictionary`.
    pub fn load_frame_animation(
        &self,
        file_name: &str,
        texture: &Arc<B::Texture>,
        dictionary: &TextureDictionary,
    ) -> Result<Arc<FrameAnimation<B::Texture>>, AssetError> {
        self.frame_animations.get_or_load(file_name, || {
            loaders::parse_frame_animation(
                &self.read_document(file_name)?,
                Arc::clone(texture),
                dictionary,
            )
        })
    }

    /// Load a level/layer/item scene document.
    pub fn load_scene(&self, file_name: &str) -> Result<Arc<SceneDocument>, AssetError> {
        self.scenes.get_or_load(file_name, || {
            loaders::parse_scene(&self.read_document(file_name)?)
        })
    }

    // =========================================================================
    // Introspection and teardown
    // =========================================================================

    /// True if `file_name` is cached in the pool for `kind`.
    pub fn contains(&self, kind: AssetKind, file_name: &str) -> bool {
        match kind {
            AssetKind::Texture => self.textures.contains(file_name),
            AssetKind::TextureDictionary => self.texture_dictionaries.contains(file_name),
            AssetKind::Song => self.songs.contains(file_name),
            AssetKind::SoundEffect => self.sound_effects.contains(file_name),
            AssetKind::Font => self.fonts.contains(file_name),
            AssetKind::SkeletalAnimation => self.skeletal_animations.contains(file_name),
            AssetKind::FrameAnimation => self.frame_animations.contains(file_name),
            AssetKind::Scene => self.scenes.contains(file_name),
            AssetKind::SkeletonData => self.skeleton_data.contains(file_name),
            AssetKind::SkeletonAnimation => self.skeleton_animations.contains(file_name),
        }
    }

    /// Number of cached assets of one kind.
    pub fn count(&self, kind: AssetKind) -> usize {
        match kind {
            AssetKind::Texture => self.textures.len(),
            AssetKind::TextureDictionary => self.texture_dictionaries.len(),
            AssetKind::Song => self.songs.len(),
            AssetKind::SoundEffect => self.sound_effects.len(),
            AssetKind::Font => self.fonts.len(),
            AssetKind::SkeletalAnimation => self.skeletal_animations.len(),
            AssetKind::FrameAnimation => self.frame_animations.len(),
            AssetKind::Scene => self.scenes.len(),
            AssetKind::SkeletonData => self.skeleton_data.len(),
            AssetKind::SkeletonAnimation => self.skeleton_animations.len(),
        }
    }

    /// Total number of cached assets across all pools.
    pub fn len(&self) -> usize {
        AssetKind::ALL.iter().map(|&kind| self.count(kind)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Release every cached asset.
    ///
    /// Requires exclusive access, so no load can be in flight. Handles already
    /// given out stay valid until their holders drop them.
    pub fn clear(&mut self) {
        self.textures.clear();
        self.texture_dictionaries.clear();
        self.songs.clear();
        self.sound_effects.clear();
        self.fonts.clear();
        self.skeletal_animations.clear();
        self.frame_animations.clear();
        self.scenes.clear();
        self.skeleton_data.clear();
        self.skeleton_animations.clear();
        tracing::debug!(root = %self.root.display(), "asset registry cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NoBackend;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_pool_caches_only_success() {
        let pool: Pool<u32> = Pool::new(AssetKind::Font);
        let calls = AtomicUsize::new(0);

        let err = pool
            .get_or_load("a", || {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ParseError::MissingElement {
                    parent: "font".to_string(),
                    name: "chars".to_string(),
                }
                .into())
            })
            .unwrap_err();
        assert!(err.is_parse());
        assert_eq!(err.kind, AssetKind::Font);
        assert_eq!(err.file_name, "a");
        assert!(!pool.contains("a"));

        let first = pool
            .get_or_load("a", || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(7)
            })
            .unwrap();
        let second = pool
            .get_or_load("a", || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(8)
            })
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*second, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_pool_keys_are_not_canonicalized() {
        let pool: Pool<&str> = Pool::new(AssetKind::Scene);
        let a = pool.get_or_load("levels/one.xml", || Ok("one")).unwrap();
        let b = pool.get_or_load("levels/./one.xml", || Ok("other")).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn test_resolve_joins_root() {
        let registry = AssetRegistry::new("/game/assets", NoBackend);
        assert_eq!(registry.resolve("fonts/a.fnt"), PathBuf::from("/game/assets/fonts/a.fnt"));
        assert_eq!(registry.root(), Path::new("/game/assets"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let registry = AssetRegistry::new("/definitely/not/here", NoBackend);
        let err = registry.load_font("missing.fnt").unwrap_err();
        assert!(err.is_io());
        assert_eq!(err.kind, AssetKind::Font);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_non_utf8_document_is_parse_error() {
        let temp = tempfile::TempDir::new().expect("should create temp dir");
        let mut contents = br#"<font><common lineHeight="10"/><chars><char id="65" x=""#.to_vec();
        contents.push(0xFF);
        contents.extend_from_slice(br#""/></chars></font>"#);
        fs::write(temp.path().join("bad.fnt"), contents).expect("should write font");

        let registry = AssetRegistry::new(temp.path(), NoBackend);
        let err = registry.load_font("bad.fnt").unwrap_err();
        assert!(err.is_parse());
        assert!(!err.is_io());
        assert!(matches!(err.source, LoadError::Parse(ParseError::InvalidEncoding(_))));
        assert!(!registry.contains(AssetKind::Font, "bad.fnt"));
    }

    #[test]
    fn test_backend_failure_not_cached() {
        let registry = AssetRegistry::new("/unused", NoBackend);
        let err = registry.load_texture("atlas.png").unwrap_err();
        assert!(matches!(err.source, LoadError::Backend(_)));
        assert!(!registry.contains(AssetKind::Texture, "atlas.png"));
    }

    #[test]
    fn test_from_config_uses_root() {
        let mut config = AssetryConfig::default();
        config.assets.root = PathBuf::from("/data");
        let registry = AssetRegistry::from_config(&config, NoBackend);
        assert_eq!(registry.root(), Path::new("/data"));
    }
}
