//! Block paths and the factories behind them.
use std::collections::BTreeMap;

use crate::dtype::DType;
use crate::framework::BoxedBlock;
use crate::Result;

/// An argument to a block factory.
#[derive(Clone, Debug, PartialEq)]
pub enum BlockArg {
    DType(DType),
    Str(String),
}

impl From<DType> for BlockArg {
    fn from(value: DType) -> Self {
        BlockArg::DType(value)
    }
}

impl From<&str> for BlockArg {
    fn from(value: &str) -> Self {
        BlockArg::Str(value.to_string())
    }
}

impl From<String> for BlockArg {
    fn from(value: String) -> Self {
        BlockArg::Str(value)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("no block is registered at {0}")]
    UnknownPath(String),

    #[error("{0} is registered more than once")]
    Duplicate(String),

    #[error("{path} takes {expected} argument(s), got {got}")]
    WrongArity {
        path: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("argument {index} of {path} must be a {expected}")]
    WrongArgumentKind {
        path: &'static str,
        index: usize,
        expected: &'static str,
    },
}

type Factory = Box<dyn Fn(&[BlockArg]) -> Result<BoxedBlock> + Send + Sync>;

pub struct RegistryEntry {
    path: &'static str,
    arity: usize,
    factory: Factory,
}

impl RegistryEntry {
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// How many arguments the factory takes.
    pub fn arity(&self) -> usize {
        self.arity
    }
}

impl std::fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("path", &self.path)
            .field("arity", &self.arity)
            .finish_non_exhaustive()
    }
}

/// Accepts a dtype, or the name of one.
fn dtype_arg(args: &[BlockArg], index: usize) -> Result<DType> {
    match &args[index] {
        BlockArg::DType(d) => Ok(*d),
        BlockArg::Str(s) => Ok(s.parse::<DType>()?),
    }
}

fn str_arg<'a>(path: &'static str, args: &'a [BlockArg], index: usize) -> Result<&'a str> {
    match &args[index] {
        BlockArg::Str(s) => Ok(s.as_str()),
        BlockArg::DType(_) => Err(RegistryError::WrongArgumentKind {
            path,
            index,
            expected: "string",
        }
        .into()),
    }
}

/// Maps block paths to factories.
#[derive(Debug, Default)]
pub struct BlockRegistry {
    entries: BTreeMap<&'static str, RegistryEntry>,
}

impl BlockRegistry {
    pub fn new() -> BlockRegistry {
        Default::default()
    }

    /// A registry holding every block this crate provides.
    pub fn with_all_blocks() -> Result<BlockRegistry> {
        let mut registry = BlockRegistry::new();
        crate::blocks::register_all(&mut registry)?;
        Ok(registry)
    }

    /// Register a factory taking `arity` arguments.  The arity is checked before the factory runs.
    pub fn register(
        &mut self,
        path: &'static str,
        arity: usize,
        factory: impl Fn(&[BlockArg]) -> Result<BoxedBlock> + Send + Sync + 'static,
    ) -> Result<()> {
        if self.entries.contains_key(path) {
            return Err(RegistryError::Duplicate(path.to_string()).into());
        }

        log::trace!("Registering {} with {} argument(s)", path, arity);
        self.entries.insert(
            path,
            RegistryEntry {
                path,
                arity,
                factory: Box::new(factory),
            },
        );
        Ok(())
    }

    /// Register a block which takes no arguments.
    pub fn register_fixed(
        &mut self,
        path: &'static str,
        make: impl Fn(&'static str) -> BoxedBlock + Send + Sync + 'static,
    ) -> Result<()> {
        self.register(path, 0, move |_| Ok(make(path)))
    }

    pub fn register_with_dtype(
        &mut self,
        path: &'static str,
        make: impl Fn(&'static str, DType) -> Result<BoxedBlock> + Send + Sync + 'static,
    ) -> Result<()> {
        self.register(path, 1, move |args| make(path, dtype_arg(args, 0)?))
    }

    pub fn register_with_dtypes2(
        &mut self,
        path: &'static str,
        make: impl Fn(&'static str, DType, DType) -> Result<BoxedBlock> + Send + Sync + 'static,
    ) -> Result<()> {
        self.register(path, 2, move |args| {
            make(path, dtype_arg(args, 0)?, dtype_arg(args, 1)?)
        })
    }

    pub fn register_with_dtypes3(
        &mut self,
        path: &'static str,
        make: impl Fn(&'static str, DType, DType, DType) -> Result<BoxedBlock> + Send + Sync + 'static,
    ) -> Result<()> {
        self.register(path, 3, move |args| {
            make(
                path,
                dtype_arg(args, 0)?,
                dtype_arg(args, 1)?,
                dtype_arg(args, 2)?,
            )
        })
    }

    pub fn register_with_mode(
        &mut self,
        path: &'static str,
        make: impl Fn(&'static str, &str) -> Result<BoxedBlock> + Send + Sync + 'static,
    ) -> Result<()> {
        self.register(path, 1, move |args| make(path, str_arg(path, args, 0)?))
    }

    /// Build the block at `path`.
    pub fn make(&self, path: &str, args: &[BlockArg]) -> Result<BoxedBlock> {
        let entry = self
            .entries
            .get(path)
            .ok_or_else(|| RegistryError::UnknownPath(path.to_string()))?;

        if args.len() != entry.arity {
            return Err(RegistryError::WrongArity {
                path: entry.path,
                expected: entry.arity,
                got: args.len(),
            }
            .into());
        }

        (entry.factory)(args)
    }

    pub fn get(&self, path: &str) -> Option<&RegistryEntry> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Every registered path, in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
