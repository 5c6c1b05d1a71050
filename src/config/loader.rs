//! Bomb file loader
//!
//! This module implements the loading pipeline:
//! 1. Size check
//! 2. UTF-8 BOM strip
//! 3. YAML parsing and deserialization to [`BombConfig`]
//! 4. Validation
//! 5. Freeze with `Arc`

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::schema::BombConfig;
use crate::config::validation::Validator;
use crate::error::{ConfigError, ValidationIssue};

// ============================================================================
// Public API
// ============================================================================

/// Options for the bomb loader.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Maximum bomb file size in bytes.
    pub max_bomb_size: usize,

    /// Treat validation warnings as errors.
    pub strict: bool,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            max_bomb_size: env_or("BOMBLAB_MAX_BOMB_SIZE", 1024 * 1024),
            strict: false,
        }
    }
}

/// Result of loading a bomb file.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated bomb.
    pub bomb: Arc<BombConfig>,

    /// Warnings encountered during validation.
    pub warnings: Vec<ValidationIssue>,
}

/// Bomb file loader.
#[derive(Debug, Default)]
pub struct BombLoader {
    options: LoaderOptions,
}

impl BombLoader {
    /// Creates a new loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Creates a new loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoaderOptions::default())
    }

    /// Loads and validates a bomb file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read or is too large
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load(&self, path: &Path) -> Result<LoadResult, ConfigError> {
        let metadata = std::fs::metadata(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        let file_size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if file_size > self.options.max_bomb_size {
            return Err(ConfigError::InvalidValue {
                field: "file_size".to_string(),
                value: format!("{file_size} bytes"),
                expected: format!("at most {} bytes", self.options.max_bomb_size),
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::MissingFile {
            path: path.to_path_buf(),
        })?;

        self.load_named(&raw, path)
    }

    /// Loads and validates a bomb from YAML text.
    ///
    /// # Errors
    ///
    /// Returns an error if YAML parsing or validation fails.
    pub fn load_from_str(&self, yaml: &str) -> Result<LoadResult, ConfigError> {
        self.load_named(yaml, Path::new("<string>"))
    }

    fn load_named(&self, raw: &str, origin: &Path) -> Result<LoadResult, ConfigError> {
        let text = raw.strip_prefix('\u{feff}').unwrap_or(raw);

        let bomb: BombConfig = serde_yaml::from_str(text).map_err(|e| ConfigError::ParseError {
            path: origin.to_path_buf(),
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })?;

        let result = Validator::new().validate(&bomb);
        let mut errors = result.errors;
        let mut warnings = result.warnings;
        if self.options.strict {
            errors.append(&mut warnings);
        }
        if !errors.is_empty() {
            return Err(ConfigError::ValidationError {
                path: origin.display().to_string(),
                errors,
            });
        }

        for warning in &warnings {
            tracing::warn!(path = %origin.display(), "{warning}");
        }
        tracing::debug!(
            path = %origin.display(),
            bomb_id = bomb.bomb_id,
            phases = %bomb.describe(),
            "bomb loaded"
        );

        Ok(LoadResult {
            bomb: Arc::new(bomb),
            warnings,
        })
    }
}

/// Loads a bomb file with default options.
///
/// # Errors
///
/// See [`BombLoader::load`].
pub fn load_bomb(path: impl Into<PathBuf>) -> Result<LoadResult, ConfigError> {
    BombLoader::with_defaults().load(&path.into())
}

fn env_or(var: &str, default: usize) -> usize {
    std::env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
