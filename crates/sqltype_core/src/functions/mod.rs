pub mod builtin;
pub mod candidate;
pub mod documentation;

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use fmtutil::IntoDisplayableSlice;
use tracing::trace;

use crate::datatype::{DataType, DataTypeId};
use documentation::Documentation;

/// Function signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    /// Expected positional input argument types for this signature.
    pub positional_args: &'static [DataTypeId],

    /// Type of the variadic args if this function is variadic.
    ///
    /// If None, the function is not considered variadic.
    pub variadic_arg: Option<DataTypeId>,

    /// The return type.
    ///
    /// `Any` means the function returns the type of its `Any` arguments.
    pub return_type: DataTypeId,

    /// If all `Any` arguments (including variadic ones) must unify to a
    /// single type.
    pub homogeneous: bool,
}

impl Signature {
    pub const fn new(inputs: &'static [DataTypeId], return_type: DataTypeId) -> Self {
        Signature {
            positional_args: inputs,
            variadic_arg: None,
            return_type,
            homogeneous: false,
        }
    }

    pub const fn new_variadic(
        inputs: &'static [DataTypeId],
        variadic: DataTypeId,
        return_type: DataTypeId,
    ) -> Self {
        Signature {
            positional_args: inputs,
            variadic_arg: Some(variadic),
            return_type,
            homogeneous: false,
        }
    }

    /// Require all `Any` arguments to share one type.
    pub const fn homogeneous(mut self) -> Self {
        self.homogeneous = true;
        self
    }

    /// Check if this signature is a variadic signature.
    pub const fn is_variadic(&self) -> bool {
        self.variadic_arg.is_some()
    }

    /// Check if this signature accepts the given number of arguments.
    pub fn accepts_arity(&self, num_args: usize) -> bool {
        if self.is_variadic() {
            num_args >= self.positional_args.len()
        } else {
            num_args == self.positional_args.len()
        }
    }

    /// Get the expected type id for the argument at `idx`.
    pub fn arg_id(&self, idx: usize) -> Option<DataTypeId> {
        self.positional_args.get(idx).copied().or(self.variadic_arg)
    }

    /// Return if inputs given data types exactly satisfy the signature.
    pub fn exact_match(&self, inputs: &[DataType]) -> bool {
        if !self.accepts_arity(inputs.len()) {
            return false;
        }

        inputs.iter().enumerate().all(|(idx, have)| match self.arg_id(idx) {
            Some(expected) => have.matches_id(expected),
            None => false,
        })
    }

    /// Check if any argument of this signature expects a tuple.
    pub fn has_tuple_arg(&self) -> bool {
        self.positional_args.contains(&DataTypeId::Tuple)
            || self.variadic_arg == Some(DataTypeId::Tuple)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.positional_args.displayable())?;
        if let Some(variadic) = self.variadic_arg {
            if !self.positional_args.is_empty() {
                write!(f, ", ")?;
            }
            write!(f, "{variadic}...")?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionKind {
    Scalar,
    Aggregate,
}

/// A named set of signatures.
#[derive(Debug, Clone, Copy)]
pub struct FunctionSet {
    /// Name of the function.
    pub name: &'static str,
    /// Set of aliases for this function.
    pub aliases: &'static [&'static str],
    pub kind: FunctionKind,
    /// Documentation for the function.
    ///
    /// If a function has multiple signatures, then there should be one doc
    /// entry per signature.
    pub doc: &'static [&'static Documentation],
    /// Signatures in registration order.
    pub signatures: &'static [Signature],
}

impl FunctionSet {
    /// Find a signature that exactly matches the provided inputs.
    pub fn find_exact(&self, inputs: &[DataType]) -> Option<&'static Signature> {
        self.signatures.iter().find(|sig| sig.exact_match(inputs))
    }
}

/// The signature a function call was resolved to.
#[derive(Debug, Clone, Copy)]
pub struct PlannedFunction {
    pub set: &'static FunctionSet,
    pub signature: &'static Signature,
}

impl PlannedFunction {
    pub fn name(&self) -> &'static str {
        self.set.name
    }
}

impl PartialEq for PlannedFunction {
    fn eq(&self, other: &Self) -> bool {
        self.set.name == other.set.name && self.signature == other.signature
    }
}

/// Lookup table from function names to function sets.
///
/// Read only once built.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    by_name: HashMap<String, &'static FunctionSet>,
    sets: Vec<&'static FunctionSet>,
}

static BUILTIN_REGISTRY: LazyLock<FunctionRegistry> = LazyLock::new(|| {
    let mut registry = FunctionRegistry::new();
    for set in builtin::BUILTIN_FUNCTION_SETS.iter().copied() {
        registry.register(set);
    }
    registry
});

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry containing all builtin functions.
    pub fn builtin() -> &'static FunctionRegistry {
        &BUILTIN_REGISTRY
    }

    /// Create a registry with all builtin functions plus some extra sets.
    pub fn with_builtins(extra: impl IntoIterator<Item = &'static FunctionSet>) -> Self {
        let mut registry = FunctionRegistry::new();
        for set in builtin::BUILTIN_FUNCTION_SETS.iter().copied().chain(extra) {
            registry.register(set);
        }
        registry
    }

    /// Register a function set under its name and aliases.
    ///
    /// A set registered later replaces an earlier one with the same name,
    /// including all of the earlier set's aliases.
    pub fn register(&mut self, set: &'static FunctionSet) {
        trace!(name = set.name, "registering function set");
        self.by_name.retain(|_, existing| existing.name != set.name);
        self.sets.retain(|existing| existing.name != set.name);

        for name in std::iter::once(&set.name).chain(set.aliases) {
            self.by_name.insert(name.to_lowercase(), set);
        }
        self.sets.push(set);
    }

    /// Get a function set by name, case insensitive.
    pub fn get(&self, name: &str) -> Option<&'static FunctionSet> {
        self.by_name.get(&name.to_lowercase()).copied()
    }

    /// Iterate all sets in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static FunctionSet> + '_ {
        self.sets.iter().copied()
    }
}
