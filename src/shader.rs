use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::error::{AppError, AppResult};

/// The shader used when no file is given on the command line.
pub const DEFAULT_SHADER: &str = include_str!("shaders/cube.wgsl");

/// WGSL source, either compiled into the binary or read from disk.
///
/// File-backed sources remember the file's modification time so the host loop
/// can pick up edits with [`ShaderSource::check_reload`].
pub struct ShaderSource {
    source: String,
    file: Option<WatchedFile>,
}

struct WatchedFile {
    path: PathBuf,
    last_modified: SystemTime,
}

impl ShaderSource {
    /// Source compiled into the binary. Never reloads.
    pub fn embedded(source: &str) -> Self {
        Self {
            source: source.to_string(),
            file: None,
        }
    }

    /// Load a shader from the given file path.
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let io_err = |source: std::io::Error| AppError::ShaderIo {
            path: path.clone(),
            source,
        };

        let source = fs::read_to_string(&path).map_err(io_err)?;
        let last_modified = fs::metadata(&path)
            .and_then(|m| m.modified())
            .map_err(io_err)?;

        Ok(Self {
            source,
            file: Some(WatchedFile {
                path,
                last_modified,
            }),
        })
    }

    /// Load from `path` if given, falling back to [`DEFAULT_SHADER`] when the
    /// file is missing or unreadable.
    pub fn from_file_or_default(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::from_file(path).unwrap_or_else(|e| {
                log::warn!("{e}; using the built-in shader");
                Self::embedded(DEFAULT_SHADER)
            }),
            None => Self::embedded(DEFAULT_SHADER),
        }
    }

    /// Check if the shader file has been modified and reload if so.
    /// Returns `true` if the source changed.
    pub fn check_reload(&mut self) -> bool {
        let Some(file) = &mut self.file else {
            return false;
        };

        let Ok(modified) = fs::metadata(&file.path).and_then(|m| m.modified()) else {
            return false;
        };

        if modified > file.last_modified {
            if let Ok(source) = fs::read_to_string(&file.path) {
                log::info!("Reloading shader: {}", file.path.display());
                self.source = source;
                file.last_modified = modified;
                return true;
            }
        }

        false
    }

    /// Get the current shader source.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.file.as_ref().map(|f| f.path.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn temp_shader(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("glprimer-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_embedded_never_reloads() {
        let mut shader = ShaderSource::embedded(DEFAULT_SHADER);
        assert!(shader.path().is_none());
        assert!(!shader.check_reload());
        assert!(shader.source().contains("fn vs"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = ShaderSource::from_file("/definitely/not/here.wgsl")
            .err()
            .unwrap();
        assert!(matches!(err, AppError::ShaderIo { .. }));
        assert!(err.to_string().contains("here.wgsl"));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let shader = ShaderSource::from_file_or_default(Some(Path::new("/nope.wgsl")));
        assert_eq!(shader.source(), DEFAULT_SHADER);
    }

    #[test]
    fn test_reload_after_modification() {
        let path = temp_shader("reload.wgsl", "// first");
        let mut shader = ShaderSource::from_file(&path).unwrap();
        assert_eq!(shader.source(), "// first");
        assert!(!shader.check_reload());

        // Push the mtime forward so coarse filesystem timestamps still differ.
        fs::write(&path, "// second").unwrap();
        let later = SystemTime::now() + Duration::from_secs(5);
        fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(later)
            .unwrap();

        assert!(shader.check_reload());
        assert_eq!(shader.source(), "// second");
        assert!(!shader.check_reload());

        fs::remove_file(&path).ok();
    }
}
