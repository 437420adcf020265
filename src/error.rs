use std::path::PathBuf;

use thiserror::Error;

use crate::loader::UnitId;

pub type Result<T> = std::result::Result<T, Error>;

/// Every variant carries the context needed to reproduce the condition:
/// the unit involved, the declaration name or the cycle path.
#[derive(Debug, Error)]
pub enum Error {
    #[error("unable to locate `{path}` under any source root")]
    PathResolution { path: String },

    /// Recoverable: the graph resolver drops the unit and keeps going.
    #[error("no source files in unit `{unit}`")]
    NoSourceFiles { unit: UnitId },

    #[error("syntax errors in `{}` (unit `{unit}`)", .file.display())]
    Syntax { unit: UnitId, file: PathBuf },

    #[error("i/o failure in unit `{unit}`: {source}")]
    Io {
        unit: UnitId,
        #[source]
        source: std::io::Error,
    },

    #[error("unresolved import cycle: {}", cycle_string(.path))]
    UnresolvedCycle { path: Vec<UnitId> },

    #[error("duplicate declaration of `{name}` in scope `{scope}`")]
    DuplicateDeclaration { name: String, scope: String },

    #[error("cannot build universe scope: unit `builtin` was not resolved")]
    MissingBuiltin,

    #[error(
        "invalid variadic parameter `{param}` of `{func}` (unit `{unit}`); \
         a variadic parameter must be in final position"
    )]
    MisplacedVariadic {
        unit: UnitId,
        func: String,
        param: String,
    },

    #[error("unsupported construct in unit `{unit}`: {kind}")]
    UnsupportedConstruct { unit: UnitId, kind: String },
}

impl Error {
    /// Only `NoSourceFiles` may be swallowed, and only by the resolver.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::NoSourceFiles { .. })
    }
}

fn cycle_string(path: &[UnitId]) -> String {
    path.iter()
        .map(UnitId::as_str)
        .collect::<Vec<_>>()
        .join(" -> ")
}
