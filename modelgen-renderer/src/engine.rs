//! Tera loading engine — [`TemplateEngine`] and [`TemplateHandle`].
//!
//! Templates are loaded from an explicit directory passed with every lookup;
//! the engine holds no mutable loading-location state, so one engine can
//! serve lookups across arbitrary directories without lookups interfering
//! with each other.

use std::io;
use std::path::{Path, PathBuf};

use tera::Tera;

use modelgen_core::OutputEncoding;

use crate::error::RenderError;

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Loads templates by explicit directory + file name, honoring a requested
/// charset for the template source.
///
/// An optional default directory backs lookups that carry a bare file name.
/// Tera rethrows every evaluation fault, so failures always surface to the
/// caller instead of being swallowed into the output.
#[derive(Debug, Clone, Default)]
pub struct TemplateEngine {
    templates_dir: Option<PathBuf>,
    default_encoding: OutputEncoding,
}

impl TemplateEngine {
    /// Engine with no default directory; every lookup must name its own.
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a default directory for bare-name lookups.
    ///
    /// The directory is validated up front so a misconfiguration surfaces at
    /// construction rather than at the first lookup.
    pub fn with_templates_dir(dir: impl Into<PathBuf>) -> Result<Self, RenderError> {
        let mut engine = Self::new();
        engine.set_templates_dir(dir)?;
        Ok(engine)
    }

    /// Set the default directory for bare-name lookups.
    pub fn set_templates_dir(&mut self, dir: impl Into<PathBuf>) -> Result<(), RenderError> {
        let dir = dir.into();
        check_directory(&dir)?;
        self.templates_dir = Some(dir);
        Ok(())
    }

    /// Charset used when a lookup does not request one.
    pub fn default_encoding(&self) -> OutputEncoding {
        self.default_encoding
    }

    /// Load `name` from the engine's default directory.
    pub fn load(
        &self,
        name: &str,
        encoding: Option<OutputEncoding>,
    ) -> Result<TemplateHandle, RenderError> {
        let Some(dir) = self.templates_dir.as_deref() else {
            return Err(RenderError::Directory {
                path: PathBuf::new(),
                source: io::Error::other("no default template directory configured"),
            });
        };
        self.load_from(dir, name, encoding)
    }

    /// Load `name` from `dir`, decoding the source with `encoding` (or the
    /// engine default).
    ///
    /// Each call compiles a fresh template; handles are independent of the
    /// engine and of each other.
    pub fn load_from(
        &self,
        dir: &Path,
        name: &str,
        encoding: Option<OutputEncoding>,
    ) -> Result<TemplateHandle, RenderError> {
        check_directory(dir)?;

        let encoding = encoding.unwrap_or(self.default_encoding);
        let path = dir.join(name);
        let bytes = std::fs::read(&path).map_err(|source| RenderError::Load {
            path: path.clone(),
            source,
        })?;
        let source = encoding
            .decode(&bytes)
            .map_err(|e| RenderError::Load {
                path: path.clone(),
                source: io::Error::new(io::ErrorKind::InvalidData, e),
            })?;

        let mut tera = Tera::default();
        tera.add_raw_template(name, &source)
            .map_err(|source| RenderError::Parse {
                name: name.to_owned(),
                source,
            })?;

        Ok(TemplateHandle {
            tera,
            name: name.to_owned(),
            encoding,
        })
    }
}

fn check_directory(dir: &Path) -> Result<(), RenderError> {
    let meta = std::fs::metadata(dir).map_err(|source| RenderError::Directory {
        path: dir.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(RenderError::Directory {
            path: dir.to_path_buf(),
            source: io::Error::other("not a directory"),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// TemplateHandle
// ---------------------------------------------------------------------------

/// A compiled template bound to the charset its output should be written in.
#[derive(Debug)]
pub struct TemplateHandle {
    tera: Tera,
    name: String,
    encoding: OutputEncoding,
}

impl TemplateHandle {
    /// The file name the template was loaded under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Charset for both the template source and the rendered output.
    pub fn encoding(&self) -> OutputEncoding {
        self.encoding
    }

    /// Evaluate the template against `ctx`, returning the rendered text.
    pub fn evaluate(&self, ctx: &tera::Context) -> Result<String, RenderError> {
        self.tera
            .render(&self.name, ctx)
            .map_err(|source| RenderError::Evaluation {
                name: self.name.clone(),
                source,
            })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn write_template(dir: &TempDir, name: &str, content: &[u8]) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    fn context_with(key: &str, value: &str) -> tera::Context {
        let mut ctx = tera::Context::new();
        ctx.insert(key, value);
        ctx
    }

    #[test]
    fn loads_and_evaluates_a_template() {
        let dir = TempDir::new().unwrap();
        write_template(&dir, "greet.tera", b"hello {{ who }}");

        let engine = TemplateEngine::new();
        let handle = engine.load_from(dir.path(), "greet.tera", None).unwrap();
        let out = handle.evaluate(&context_with("who", "world")).unwrap();
        assert_eq!(out, "hello world");
    }

    #[test]
    fn missing_directory_fails_with_directory_error() {
        let engine = TemplateEngine::new();
        let err = engine
            .load_from(Path::new("/no/such/dir"), "a.tera", None)
            .unwrap_err();
        assert!(matches!(err, RenderError::Directory { .. }));
    }

    #[test]
    fn file_as_directory_fails_with_directory_error() {
        let dir = TempDir::new().unwrap();
        write_template(&dir, "plain.txt", b"x");

        let engine = TemplateEngine::new();
        let err = engine
            .load_from(&dir.path().join("plain.txt"), "a.tera", None)
            .unwrap_err();
        assert!(matches!(err, RenderError::Directory { .. }));
    }

    #[test]
    fn missing_template_fails_with_load_error() {
        let dir = TempDir::new().unwrap();
        let engine = TemplateEngine::new();
        let err = engine.load_from(dir.path(), "ghost.tera", None).unwrap_err();
        assert!(matches!(err, RenderError::Load { .. }));
    }

    #[test]
    fn template_syntax_error_fails_with_parse_error() {
        let dir = TempDir::new().unwrap();
        write_template(&dir, "broken.tera", b"{% for %}");

        let engine = TemplateEngine::new();
        let err = engine.load_from(dir.path(), "broken.tera", None).unwrap_err();
        assert!(matches!(err, RenderError::Parse { .. }));
    }

    #[test]
    fn undefined_variable_fails_with_evaluation_error() {
        let dir = TempDir::new().unwrap();
        write_template(&dir, "strict.tera", b"{{ missing_variable }}");

        let engine = TemplateEngine::new();
        let handle = engine.load_from(dir.path(), "strict.tera", None).unwrap();
        let err = handle.evaluate(&tera::Context::new()).unwrap_err();
        assert!(matches!(err, RenderError::Evaluation { .. }));
    }

    #[test]
    fn latin1_template_source_is_decoded() {
        let dir = TempDir::new().unwrap();
        // 0xE9 is 'é' in ISO-8859-1 and invalid as standalone UTF-8.
        write_template(&dir, "accent.tera", b"caf\xE9 {{ who }}");

        let engine = TemplateEngine::new();
        let handle = engine
            .load_from(dir.path(), "accent.tera", Some(OutputEncoding::Latin1))
            .unwrap();
        let out = handle.evaluate(&context_with("who", "crowd")).unwrap();
        assert_eq!(out, "café crowd");
    }

    #[test]
    fn invalid_utf8_source_fails_with_load_error() {
        let dir = TempDir::new().unwrap();
        write_template(&dir, "bad.tera", b"caf\xE9");

        let engine = TemplateEngine::new();
        let err = engine.load_from(dir.path(), "bad.tera", None).unwrap_err();
        assert!(matches!(err, RenderError::Load { .. }));
    }

    #[test]
    fn bare_name_lookup_uses_default_directory() {
        let dir = TempDir::new().unwrap();
        write_template(&dir, "named.tera", b"ok");

        let engine = TemplateEngine::with_templates_dir(dir.path()).unwrap();
        let handle = engine.load("named.tera", None).unwrap();
        assert_eq!(handle.evaluate(&tera::Context::new()).unwrap(), "ok");
    }

    #[test]
    fn bare_name_lookup_without_default_directory_fails() {
        let engine = TemplateEngine::new();
        let err = engine.load("orphan.tera", None).unwrap_err();
        assert!(matches!(err, RenderError::Directory { .. }));
    }

    #[test]
    fn default_directory_is_validated_at_construction() {
        let err = TemplateEngine::with_templates_dir("/no/such/dir").unwrap_err();
        assert!(matches!(err, RenderError::Directory { .. }));
    }

    #[test]
    fn handle_reports_requested_encoding() {
        let dir = TempDir::new().unwrap();
        write_template(&dir, "enc.tera", b"x");

        let engine = TemplateEngine::new();
        let handle = engine
            .load_from(dir.path(), "enc.tera", Some(OutputEncoding::Latin1))
            .unwrap();
        assert_eq!(handle.encoding(), OutputEncoding::Latin1);

        let default = engine.load_from(dir.path(), "enc.tera", None).unwrap();
        assert_eq!(default.encoding(), OutputEncoding::Utf8);
    }
}
