
use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::path::{Component, Path, PathBuf};

use logos::Logos;

use crate::ast;
use crate::diag::Diag;
use crate::error::{Error, Result};
use crate::lexer::Token;
use crate::parser::Parser;

/// Canonical identifier of one compilation unit: a `/`-separated path
/// relative to a source root, or one of the synthetic identifiers `builtin`
/// and `C`. Relative spellings must go through `UnitLoader::canonicalize`
/// before entering the graph.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitId(String);

impl UnitId {
    pub fn new(id: impl Into<String>) -> Self {
        UnitId(id.into())
    }

    pub fn builtin() -> Self {
        UnitId("builtin".to_string())
    }

    pub fn foreign() -> Self {
        UnitId("C".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_builtin(&self) -> bool {
        self.0 == "builtin"
    }

    pub fn is_foreign(&self) -> bool {
        self.0 == "C"
    }

    pub fn is_relative(&self) -> bool {
        self.0 == "."
            || self.0 == ".."
            || self.0.starts_with("./")
            || self.0.starts_with("../")
    }
}

impl Display for UnitId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UnitId {
    fn from(id: &str) -> Self {
        UnitId(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub ast: ast::File,
}

/// One loaded compilation unit: its parsed files and the units it imports
/// directly. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    pub id: UnitId,
    pub dir: PathBuf,
    pub files: Vec<SourceFile>,
    pub imports: Vec<UnitId>,
}

impl Unit {
    /// A valid unit with no syntax trees, e.g. `C`.
    pub fn placeholder(id: UnitId) -> Self {
        Unit {
            id,
            dir: PathBuf::new(),
            files: vec![],
            imports: vec![],
        }
    }

    /// Empty units stay in the unit set but are skipped by the scheduler.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn decls(&self) -> impl Iterator<Item = &ast::Decl> {
        self.files.iter().flat_map(|file| file.ast.decls.iter())
    }
}

/// The loading boundary of the pipeline; the graph resolver only ever talks
/// to this trait. Loading performs no caching and no dedup, that is the
/// resolver's job.
pub trait UnitLoader {
    fn load(&self, id: &UnitId, importer_dir: Option<&Path>) -> Result<Unit>;

    /// Maps a possibly relative identifier spelling onto its canonical
    /// UnitId.
    fn canonicalize(&self, id: &UnitId, importer_dir: Option<&Path>) -> Result<UnitId> {
        let _ = importer_dir;
        Ok(id.clone())
    }
}

/// Which location anchors relative identifiers (`./x`, `../x`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveStrategy {
    /// The importing unit's directory; CLI patterns, which have no importer,
    /// fall back to the invocation directory.
    Importer,
    /// Always the process invocation directory.
    Invocation,
}

/// Loads units from `*.go` files under a set of source root directories.
pub struct FsLoader<'a> {
    roots: Vec<PathBuf>,
    invocation_dir: PathBuf,
    strategy: ResolveStrategy,
    diag: &'a Diag,
}

impl<'a> FsLoader<'a> {
    pub fn new(
        roots: Vec<PathBuf>,
        invocation_dir: PathBuf,
        strategy: ResolveStrategy,
        diag: &'a Diag,
    ) -> Self {
        let roots = roots
            .into_iter()
            .map(|root| {
                if root.is_absolute() {
                    normalize_path(&root)
                } else {
                    normalize_path(&invocation_dir.join(root))
                }
            })
            .collect();
        FsLoader {
            roots,
            invocation_dir,
            strategy,
            diag,
        }
    }

    /// The canonical unit path for an absolute directory: its path relative
    /// to the first source root that contains it.
    pub fn unit_path_for_dir(&self, dir: &Path) -> Result<UnitId> {
        for root in &self.roots {
            if let Ok(rel) = dir.strip_prefix(root) {
                let parts: Vec<String> = rel
                    .components()
                    .filter_map(|c| match c {
                        Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                        _ => None,
                    })
                    .collect();
                if !parts.is_empty() {
                    return Ok(UnitId::new(parts.join("/")));
                }
            }
        }
        Err(Error::PathResolution {
            path: dir.display().to_string(),
        })
    }

    // Vendored copies shadow the source roots, nearest importer directory
    // first.
    fn locate(&self, id: &UnitId, importer_dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(importer) = importer_dir {
            let mut dir = importer.to_path_buf();
            loop {
                let vendored = dir.join("vendor").join(id.as_str());
                if vendored.is_dir() {
                    return Ok(vendored);
                }
                if self.roots.iter().any(|root| dir == *root) {
                    break;
                }
                if !dir.pop() {
                    break;
                }
            }
        }
        for root in &self.roots {
            let dir = root.join(id.as_str());
            if dir.is_dir() {
                return Ok(dir);
            }
        }
        Err(Error::PathResolution {
            path: id.as_str().to_string(),
        })
    }

    fn parse_source(&self, unit: &UnitId, path: &Path) -> Result<ast::File> {
        self.diag
            .load(format!("   parsing file: {}", path.display()));
        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            unit: unit.clone(),
            source,
        })?;
        let lexer = Token::lexer(&contents).spanned().peekable();
        let mut parser = Parser::new(lexer, path.display().to_string());
        let file = parser.parse_file();
        if parser.report_errors(&contents) {
            return Err(Error::Syntax {
                unit: unit.clone(),
                file: path.to_path_buf(),
            });
        }
        Ok(file)
    }
}

impl UnitLoader for FsLoader<'_> {
    fn load(&self, id: &UnitId, importer_dir: Option<&Path>) -> Result<Unit> {
        self.diag.load(format!("loading unit: {}", id));
        if id.is_foreign() {
            // Foreign-function boundary, not modelled further.
            return Ok(Unit::placeholder(id.clone()));
        }
        let dir = self.locate(id, importer_dir)?;
        let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
            .map_err(|source| Error::Io {
                unit: id.clone(),
                source,
            })?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| is_source_file(path))
            .collect();
        paths.sort();
        if paths.is_empty() {
            return Err(Error::NoSourceFiles { unit: id.clone() });
        }

        let mut files = vec![];
        let mut imports = BTreeSet::new();
        for path in paths {
            let ast = self.parse_source(id, &path)?;
            for (import, _) in &ast.imports {
                imports.insert(UnitId::new(import.clone()));
            }
            files.push(SourceFile { path, ast });
        }
        Ok(Unit {
            id: id.clone(),
            dir,
            files,
            imports: imports.into_iter().collect(),
        })
    }

    fn canonicalize(&self, id: &UnitId, importer_dir: Option<&Path>) -> Result<UnitId> {
        if !id.is_relative() {
            return Ok(id.clone());
        }
        let base = match self.strategy {
            ResolveStrategy::Importer => importer_dir.unwrap_or(&self.invocation_dir),
            ResolveStrategy::Invocation => &self.invocation_dir,
        };
        let dir = normalize_path(&base.join(id.as_str()));
        self.unit_path_for_dir(&dir)
    }
}

fn is_source_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    // `_`- and `.`-prefixed files are build-system droppings, not sources.
    !name.starts_with('_')
        && !name.starts_with('.')
        && path.extension().is_some_and(|ext| ext == "go")
        && path.is_file()
}

// Lexical `.`/`..` elimination; never touches the filesystem.
fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
