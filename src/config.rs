//! Configuration file support
//!
//! Loads generator settings from `sbsyntax.toml` in the working directory,
//! or from a file given with `--config`. Every key is optional.
//!
//! Example:
//! ```text
//! # sbsyntax configuration
//! templates-dir = "templates"
//! syntaxes-dir = "syntaxes"
//! languages-dir = "languages"
//! languages = ["sbss", "sbml"]
//!
//! [validation]
//! list = "strict"
//! group = "strict"
//! inline-list = "lenient"
//! ```
//!
//! The attribute table and style map are compiled in and cannot be
//! changed here.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{GenError, Result};
use crate::syntax::{PairContext, Validation};

/// Default config file, looked up in the working directory
pub const CONFIG_FILE: &str = "sbsyntax.toml";

/// Value checking per pair context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct ValidationConfig {
    pub list: Validation,
    pub group: Validation,
    pub inline_list: Validation,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            list: Validation::Strict,
            group: Validation::Strict,
            inline_list: Validation::Lenient,
        }
    }
}

impl ValidationConfig {
    /// Validation for a pair context
    pub fn get(&self, context: PairContext) -> Validation {
        match context {
            PairContext::List => self.list,
            PairContext::Group => self.group,
            PairContext::InlineList => self.inline_list,
        }
    }

    /// Override validation for a pair context
    pub fn set(&mut self, context: PairContext, validation: Validation) {
        match context {
            PairContext::List => self.list = validation,
            PairContext::Group => self.group = validation,
            PairContext::InlineList => self.inline_list = validation,
        }
    }
}

/// Generator settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Directory holding `<lang>.tmLanguage.template.json` files
    pub templates_dir: PathBuf,
    /// Where grammars are written
    pub syntaxes_dir: PathBuf,
    /// Where editor configurations are written
    pub languages_dir: PathBuf,
    /// Languages generated when none are named on the command line
    pub languages: Vec<String>,
    pub validation: ValidationConfig,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            templates_dir: PathBuf::from("templates"),
            syntaxes_dir: PathBuf::from("syntaxes"),
            languages_dir: PathBuf::from("languages"),
            languages: vec!["sbss".to_string(), "sbml".to_string()],
            validation: ValidationConfig::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration
    ///
    /// An explicit path must exist. Without one, `sbsyntax.toml` is used if
    /// present and defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => match fs::read_to_string(path) {
                Ok(contents) => Self::parse(&contents),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    Err(GenError::InputNotFound(path.to_path_buf()))
                }
                Err(e) => Err(e.into()),
            },
            None => match fs::read_to_string(CONFIG_FILE) {
                Ok(contents) => Self::parse(&contents),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
                Err(e) => Err(e.into()),
            },
        }
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
