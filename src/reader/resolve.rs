//! Name resolution
//!
//! Names are resolved synchronously. Every resolution carries its own set of
//! names currently being expanded, and asking for one of them again is a
//! cycle error rather than an endless expansion.

use std::fs;
use std::path::{Path, PathBuf};

use hashbrown::{HashMap, HashSet};
use parking_lot::Mutex;
use tracing::debug;

use super::{is_name, parse, substitute_with, ReadError, ReadResult};
use crate::block::Block;

/// Maps a name to the block it stands for.
pub trait Resolver: Send + Sync {
    /// Resolve `name` into a block free of names.
    fn resolve(
        &self,
        name: &str,
    ) -> ReadResult<Block>;
}

/// Resolves nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoResolver;

impl Resolver for NoResolver {
    fn resolve(
        &self,
        name: &str,
    ) -> ReadResult<Block> {
        Err(ReadError::missing(name, "no resolver"))
    }
}

/// In-memory definitions. A definition may mention other names.
#[derive(Debug, Clone, Default)]
pub struct MapResolver {
    defs: HashMap<String, Block>,
}

impl MapResolver {
    /// Empty set of definitions.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define `name` as `body`, replacing any earlier definition.
    pub fn define(
        &mut self,
        name: &str,
        body: Block,
    ) {
        self.defs.insert(name.to_string(), body);
    }

    /// Define `name` from text.
    pub fn define_text(
        &mut self,
        name: &str,
        text: &str,
    ) -> ReadResult<()> {
        let body = parse(text)?;
        self.define(name, body);
        Ok(())
    }

    /// Number of definitions.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Whether there are no definitions.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    fn expand(
        &self,
        name: &str,
        in_flight: &mut HashSet<String>,
    ) -> ReadResult<Block> {
        if !in_flight.insert(name.to_string()) {
            return Err(ReadError::Cycle(name.to_string()));
        }
        let result = match self.defs.get(name) {
            Some(body) => substitute_with(body, &mut |inner| self.expand(inner, in_flight)),
            None => Err(ReadError::missing(name, "not defined")),
        };
        in_flight.remove(name);
        result
    }
}

impl Resolver for MapResolver {
    fn resolve(
        &self,
        name: &str,
    ) -> ReadResult<Block> {
        self.expand(name, &mut HashSet::new())
    }
}

/// Resolves a name from the same-named file under a root directory.
///
/// Successful resolutions are cached; failures are not, so a file created
/// later is picked up.
#[derive(Debug)]
pub struct FileResolver {
    root: PathBuf,
    cache: Mutex<HashMap<String, Block>>,
}

impl FileResolver {
    /// Resolve names against files in `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve names against the current directory.
    pub fn current_dir() -> Self {
        Self::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Directory names are looked up in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Forget every cached resolution.
    pub fn clear_cache(&self) {
        self.cache.lock().clear();
    }

    fn expand(
        &self,
        name: &str,
        in_flight: &mut HashSet<String>,
    ) -> ReadResult<Block> {
        if let Some(block) = self.cache.lock().get(name) {
            return Ok(block.clone());
        }
        if !is_name(name) {
            return Err(ReadError::missing(name, "not a valid name"));
        }
        if !in_flight.insert(name.to_string()) {
            return Err(ReadError::Cycle(name.to_string()));
        }
        let result = self.load(name, in_flight);
        in_flight.remove(name);
        let block = result?;
        debug!(name, "resolved from file");
        self.cache.lock().insert(name.to_string(), block.clone());
        Ok(block)
    }

    fn load(
        &self,
        name: &str,
        in_flight: &mut HashSet<String>,
    ) -> ReadResult<Block> {
        let path = self.root.join(name);
        let text =
            fs::read_to_string(&path).map_err(|e| ReadError::missing(name, e.to_string()))?;
        let body = parse(&text)?;
        substitute_with(&body, &mut |inner| self.expand(inner, in_flight))
    }
}

impl Resolver for FileResolver {
    fn resolve(
        &self,
        name: &str,
    ) -> ReadResult<Block> {
        self.expand(name, &mut HashSet::new())
    }
}
