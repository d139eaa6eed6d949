//! Mask program sources
//!
//! Programs are fragment snippets split into a declarations part (uniforms,
//! helpers) and a code part. Sources are loaded once per name and kept for
//! the lifetime of the cache; a failed load is remembered too, so a broken
//! install logs once instead of every activation.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const MAGNIFIER_CLIP: &str = "magnifier-clip";
pub const SPOTLIGHT: &str = "spotlight";

#[derive(Error, Debug)]
pub enum ProgramError {
    #[error("Unknown program: {0}")]
    UnknownProgram(String),

    #[error("Empty program source: {0}")]
    EmptySource(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type ProgramResult<T> = Result<T, ProgramError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    pub declarations: String,
    pub code: String,
}

impl ShaderSource {
    fn validated(name: &str, declarations: String, code: String) -> ProgramResult<Self> {
        if code.trim().is_empty() {
            return Err(ProgramError::EmptySource(name.to_string()));
        }
        Ok(Self { declarations, code })
    }
}

pub trait ShaderLoader {
    fn load(&self, name: &str) -> ProgramResult<ShaderSource>;
}

/// Sources compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinShaderLoader;

impl ShaderLoader for BuiltinShaderLoader {
    fn load(&self, name: &str) -> ProgramResult<ShaderSource> {
        let (declarations, code) = match name {
            MAGNIFIER_CLIP => (
                include_str!("../../shaders/magnifier-clip.glsl"),
                include_str!("../../shaders/magnifier-clip.frag"),
            ),
            SPOTLIGHT => (
                include_str!("../../shaders/spotlight.glsl"),
                include_str!("../../shaders/spotlight.frag"),
            ),
            other => return Err(ProgramError::UnknownProgram(other.to_string())),
        };
        ShaderSource::validated(name, declarations.to_string(), code.to_string())
    }
}

/// Reads `<dir>/<name>.glsl` (declarations) and `<dir>/<name>.frag` (code).
#[derive(Debug, Clone)]
pub struct FileShaderLoader {
    dir: PathBuf,
}

impl FileShaderLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ShaderLoader for FileShaderLoader {
    fn load(&self, name: &str) -> ProgramResult<ShaderSource> {
        let declarations = std::fs::read_to_string(self.dir.join(format!("{}.glsl", name)))?;
        let code = std::fs::read_to_string(self.dir.join(format!("{}.frag", name)))?;
        ShaderSource::validated(name, declarations, code)
    }
}

/// Per-engine cache of program sources.
pub struct ProgramCache {
    loader: Box<dyn ShaderLoader + Send>,
    sources: HashMap<String, Option<ShaderSource>>,
}

impl ProgramCache {
    pub fn new(loader: Box<dyn ShaderLoader + Send>) -> Self {
        Self {
            loader,
            sources: HashMap::new(),
        }
    }

    /// Source for `name`, loading it on first use.
    pub fn get(&mut self, name: &str) -> Option<&ShaderSource> {
        if !self.sources.contains_key(name) {
            let loaded = match self.loader.load(name) {
                Ok(source) => {
                    tracing::debug!("Loaded program {}", name);
                    Some(source)
                }
                Err(e) => {
                    tracing::warn!("Failed to load program {}: {}", name, e);
                    None
                }
            };
            self.sources.insert(name.to_string(), loaded);
        }
        self.sources.get(name).and_then(Option::as_ref)
    }

    /// Forget every cached source, including failures.
    pub fn clear(&mut self) {
        self.sources.clear();
    }
}

impl Default for ProgramCache {
    fn default() -> Self {
        Self::new(Box::new(BuiltinShaderLoader))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingLoader {
        calls: Arc<AtomicUsize>,
    }

    impl ShaderLoader for CountingLoader {
        fn load(&self, name: &str) -> ProgramResult<ShaderSource> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            BuiltinShaderLoader.load(name)
        }
    }

    #[test]
    fn test_builtin_sources_present() {
        for name in [MAGNIFIER_CLIP, SPOTLIGHT] {
            let source = BuiltinShaderLoader.load(name).unwrap();
            assert!(!source.code.trim().is_empty());
            assert!(!source.declarations.trim().is_empty());
        }
        assert!(matches!(
            BuiltinShaderLoader.load("blur"),
            Err(ProgramError::UnknownProgram(_))
        ));
    }

    #[test]
    fn test_spotlight_declares_its_uniforms() {
        let source = BuiltinShaderLoader.load(SPOTLIGHT).unwrap();
        for uniform in [
            "u_pos",
            "u_size",
            "u_opacity",
            "u_shape",
            "u_radius",
            "u_rotation",
            "u_resolution",
        ] {
            assert!(source.declarations.contains(uniform), "missing {}", uniform);
        }
    }

    #[test]
    fn test_cache_loads_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut cache = ProgramCache::new(Box::new(CountingLoader {
            calls: calls.clone(),
        }));

        assert!(cache.get(SPOTLIGHT).is_some());
        assert!(cache.get(SPOTLIGHT).is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Failures are cached as well.
        assert!(cache.get("missing").is_none());
        assert!(cache.get("missing").is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        cache.clear();
        assert!(cache.get(SPOTLIGHT).is_some());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_file_loader_reads_pair() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("custom.glsl"), "uniform float k;").unwrap();
        std::fs::write(dir.path().join("custom.frag"), "cogl_color_out *= k;").unwrap();

        let loader = FileShaderLoader::new(dir.path());
        let source = loader.load("custom").unwrap();
        assert_eq!(source.declarations, "uniform float k;");
        assert_eq!(source.code, "cogl_color_out *= k;");

        assert!(matches!(loader.load("absent"), Err(ProgramError::IoError(_))));

        std::fs::write(dir.path().join("blank.glsl"), "").unwrap();
        std::fs::write(dir.path().join("blank.frag"), "  \n").unwrap();
        assert!(matches!(loader.load("blank"), Err(ProgramError::EmptySource(_))));
    }
}
