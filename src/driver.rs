//! File driver
//!
//! Reads templates, runs the generator and writes the results. Each output
//! is checked as JSON and written through a sibling temporary file, so a
//! failed run never leaves a half-written grammar behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::GeneratorConfig;
use crate::error::{GenError, Result};
use crate::syntax::GrammarGenerator;

/// Runs generation for configured languages
pub struct Driver {
    config: GeneratorConfig,
    generator: GrammarGenerator,
}

impl Driver {
    /// Build the driver; compiles the built-in tables before any I/O
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let generator = GrammarGenerator::with_builtins(config.validation)?;
        Ok(Self { config, generator })
    }

    /// Languages known to the generator
    pub fn available_languages(&self) -> Vec<&str> {
        self.generator.list_languages()
    }

    /// Generate the named languages, or every configured one when empty
    ///
    /// Returns the paths written, in order.
    pub fn run(&self, requested: &[String]) -> Result<Vec<PathBuf>> {
        let names = if requested.is_empty() {
            &self.config.languages
        } else {
            requested
        };
        for name in names {
            self.generator.get_language(name)?;
        }

        fs::create_dir_all(&self.config.syntaxes_dir)?;
        fs::create_dir_all(&self.config.languages_dir)?;

        let mut written = Vec::new();
        for name in names {
            let paths = self.generate_language(name).map_err(|e| e.in_language(name))?;
            written.extend(paths);
        }
        Ok(written)
    }

    fn generate_language(&self, name: &str) -> Result<Vec<PathBuf>> {
        let lang = self.generator.get_language(name)?;
        let mut written = Vec::new();

        let template = read_template(&self.config.templates_dir.join(lang.grammar_template()))?;
        let grammar = self.generator.generate_grammar(name, &template)?;
        let path = self.config.syntaxes_dir.join(lang.grammar_output());
        write_json(&path, &grammar)?;
        written.push(path);

        if lang.configuration {
            let template =
                read_template(&self.config.templates_dir.join(lang.configuration_template()))?;
            let configuration = self.generator.generate_configuration(name, &template)?;
            let path = self.config.languages_dir.join(lang.configuration_output());
            write_json(&path, &configuration)?;
            written.push(path);
        }

        Ok(written)
    }
}

/// Read a template, reporting a missing file by path
fn read_template(path: &Path) -> Result<String> {
    debug!("reading {}", path.display());
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => GenError::InputNotFound(path.to_path_buf()),
        _ => GenError::Io(e),
    })
}

/// Check the document parses, then write it atomically
fn write_json(path: &Path, contents: &str) -> Result<()> {
    serde_json::from_str::<serde_json::Value>(contents).map_err(GenError::InvalidOutput)?;

    let tmp = temp_path(path);
    if let Err(e) = fs::write(&tmp, contents).and_then(|_| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    info!("wrote {}", path.display());
    Ok(())
}

/// `dir/name` becomes `dir/.name.tmp`
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", name))
}
