//! Generator registry for the supported client applications.
//!
//! The registry is built once and handed to whoever needs it; nothing in the
//! crate reaches for a global list of clients.

use super::targets::BUILTIN_TARGETS;
use super::{ClientContext, ConfigGenerator, DescriptorGenerator};
use crate::config::ConfigFormat;
use crate::error::{Error, Result};

/// Registry of available client generators.
#[derive(Debug)]
pub struct GeneratorRegistry {
    generators: Vec<Box<dyn ConfigGenerator>>,
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::with_default_generators()
    }
}

impl GeneratorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            generators: Vec::new(),
        }
    }

    /// Create a registry with a generator for every built-in client.
    pub fn with_default_generators() -> Self {
        let generators = BUILTIN_TARGETS
            .iter()
            .map(|target| Box::new(DescriptorGenerator::new(target)) as Box<dyn ConfigGenerator>)
            .collect();
        Self { generators }
    }

    /// Register a generator. A later registration with the same id shadows earlier ones.
    pub fn register(mut self, generator: Box<dyn ConfigGenerator>) -> Self {
        self.generators.retain(|g| g.id() != generator.id());
        self.generators.push(generator);
        self
    }

    /// Get all registered generators.
    pub fn all(&self) -> impl Iterator<Item = &dyn ConfigGenerator> {
        self.generators.iter().map(|g| g.as_ref())
    }

    /// Get a generator by app id.
    pub fn get(&self, id: &str) -> Option<&dyn ConfigGenerator> {
        self.all().find(|g| g.id() == id)
    }

    /// Like [`get`](Self::get), but an unknown id is an error.
    pub fn require(&self, id: &str) -> Result<&dyn ConfigGenerator> {
        self.get(id).ok_or_else(|| Error::UnknownApp { id: id.to_string() })
    }

    /// Generators whose client appears to be installed.
    pub fn installed(&self, ctx: &ClientContext) -> Vec<&dyn ConfigGenerator> {
        self.all().filter(|g| g.detect_installed(ctx)).collect()
    }

    /// Generators that write the given file format.
    pub fn by_format(&self, format: ConfigFormat) -> Vec<&dyn ConfigGenerator> {
        self.all().filter(|g| g.format() == format).collect()
    }

    /// List all app ids.
    pub fn ids(&self) -> Vec<&'static str> {
        self.all().map(|g| g.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }
}
