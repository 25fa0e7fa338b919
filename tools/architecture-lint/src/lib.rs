//! Repo-local architectural lint for the Nomado page crate.
//!
//! The `frontend` crate is split into `domain` (models, services, ports),
//! `inbound` (the page UI) and `outbound` (HTTP client, file storage). Every
//! source file under those directories is parsed and each path it names is
//! checked against the rules for its layer:
//!
//! - `domain` must not name adapter modules or transport, filesystem,
//!   rendering, or binary-edge crates
//! - `inbound` must not name `outbound` or the crates `outbound` wraps
//! - `outbound` must not name `inbound` or the rendering crates
//!
//! Run it with `cargo run -p architecture-lint`.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;
use thiserror::Error;

/// Name of the crate being linted; `frontend::outbound` counts as internal.
const CRATE_NAME: &str = "frontend";

const LAYER_DIRS: [&str; 3] = ["domain", "inbound", "outbound"];

/// A single boundary violation discovered by the linter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `frontend/src`.
    pub file: PathBuf,
    /// Human-readable description of the violated rule.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.display(), self.message)
    }
}

/// Failure modes returned by the architecture lint.
#[derive(Debug, Error)]
pub enum ArchitectureLintError {
    /// Filesystem traversal or reading failed.
    #[error("I/O error while linting architecture: {0}")]
    Io(#[from] io::Error),
    /// A file could not be attributed to a layer or parsed as Rust.
    #[error("cannot lint {}: {message}", .file.display())]
    Parse { file: PathBuf, message: String },
    /// One or more boundary violations were found.
    #[error("{}", ViolationList(.0))]
    Violations(Vec<Violation>),
}

struct ViolationList<'a>(&'a [Violation]);

impl fmt::Display for ViolationList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Architecture boundary violations:")?;
        self.0
            .iter()
            .try_for_each(|violation| writeln!(f, "- {violation}"))
    }
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `frontend/src`.
    pub file: PathBuf,
    pub contents: String,
}

/// Lint the page crate sources on disk.
///
/// `frontend_dir` must be the `frontend/` directory at the repository root.
/// Files outside the three layer directories are not checked.
pub fn lint_frontend_sources(frontend_dir: &Path) -> Result<(), ArchitectureLintError> {
    let src_dir = frontend_dir.join("src");
    let mut sources = Vec::new();
    for layer in LAYER_DIRS {
        let root = src_dir.join(layer);
        if root.is_dir() {
            sources.extend(read_sources(&src_dir, &root)?);
        }
    }
    lint_sources(&sources)
}

/// Lint the provided Rust sources. Intended for unit and behaviour tests.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();
    for source in sources {
        let layer = Layer::of(&source.file).ok_or_else(|| ArchitectureLintError::Parse {
            file: source.file.clone(),
            message: "file is not under domain/, inbound/ or outbound/".to_owned(),
        })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(
            layer
                .check(&parsed)
                .into_iter()
                .map(|message| Violation {
                    file: source.file.clone(),
                    message,
                }),
        );
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

/// Which modules and crates a layer may not name.
struct LayerRules {
    modules: &'static [&'static str],
    crates: &'static [&'static str],
}

const DOMAIN_RULES: LayerRules = LayerRules {
    modules: &["inbound", "outbound"],
    crates: &[
        "actix_rt",
        "actix_web",
        "cap_std",
        "color_eyre",
        "dioxus",
        "dioxus_ssr",
        "ortho_config",
        "reqwest",
        "tracing_subscriber",
    ],
};

const INBOUND_RULES: LayerRules = LayerRules {
    modules: &["outbound"],
    crates: &["actix_rt", "actix_web", "cap_std", "reqwest"],
};

const OUTBOUND_RULES: LayerRules = LayerRules {
    modules: &["inbound"],
    crates: &["actix_rt", "actix_web", "color_eyre", "dioxus", "dioxus_ssr"],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Domain,
    Inbound,
    Outbound,
}

impl Layer {
    fn of(relative_path: &Path) -> Option<Self> {
        match relative_path.components().next()?.as_os_str().to_str()? {
            "domain" => Some(Self::Domain),
            "inbound" => Some(Self::Inbound),
            "outbound" => Some(Self::Outbound),
            _ => None,
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
        }
    }

    const fn rules(self) -> &'static LayerRules {
        match self {
            Self::Domain => &DOMAIN_RULES,
            Self::Inbound => &INBOUND_RULES,
            Self::Outbound => &OUTBOUND_RULES,
        }
    }

    /// Sorted, de-duplicated messages for every forbidden path in `file`.
    fn check(self, file: &syn::File) -> BTreeSet<String> {
        let rules = self.rules();
        let mut collector = PathCollector::default();
        collector.visit_file(file);

        let mut messages = BTreeSet::new();
        for path in &collector.paths {
            match PathRoot::classify(path) {
                Some(PathRoot::Internal(module)) if names(rules.modules, module) => {
                    messages.insert(format!(
                        "{} module must not depend on crate::{module}",
                        self.name()
                    ));
                }
                Some(PathRoot::External(krate)) if names(rules.crates, krate) => {
                    messages.insert(format!(
                        "{} module must not depend on external crate `{krate}`",
                        self.name()
                    ));
                }
                _ => {}
            }
        }
        messages
    }
}

/// What the first meaningful segment of a path refers to.
enum PathRoot<'a> {
    Internal(&'a str),
    External(&'a str),
}

impl<'a> PathRoot<'a> {
    fn classify(segments: &'a [String]) -> Option<Self> {
        let first = segments.first()?.as_str();
        if names(&LAYER_DIRS, first) {
            return Some(Self::Internal(first));
        }
        if first == CRATE_NAME {
            return segments.get(1).map(|module| Self::Internal(module.as_str()));
        }
        if is_relative(first) {
            return segments
                .iter()
                .map(String::as_str)
                .find(|segment| !is_relative(segment))
                .map(Self::Internal);
        }
        Some(Self::External(first))
    }
}

fn names(list: &[&str], name: &str) -> bool {
    list.iter().any(|entry| *entry == name)
}

fn is_relative(segment: &str) -> bool {
    matches!(segment, "crate" | "self" | "super")
}

/// Every path named in a file, from `use` trees and expressions alike.
#[derive(Default)]
struct PathCollector {
    paths: BTreeSet<Vec<String>>,
}

impl PathCollector {
    fn collect_use(&mut self, tree: &syn::UseTree, prefix: &mut Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.collect_use(&path.tree, prefix);
                prefix.pop();
            }
            syn::UseTree::Name(syn::UseName { ident })
            | syn::UseTree::Rename(syn::UseRename { ident, .. }) => {
                self.insert_with(prefix, ident.to_string());
            }
            syn::UseTree::Glob(_) => self.insert_with(prefix, "*".to_owned()),
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.collect_use(item, prefix);
                }
            }
        }
    }

    fn insert_with(&mut self, prefix: &[String], last: String) {
        let mut segments = prefix.to_vec();
        segments.push(last);
        self.paths.insert(segments);
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.insert(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.collect_use(&node.tree, &mut Vec::new());
    }
}

/// Read every `.rs` file below `root`, keyed relative to `src_dir`.
fn read_sources(src_dir: &Path, root: &Path) -> Result<Vec<LintSource>, ArchitectureLintError> {
    let mut pending = vec![root.to_path_buf()];
    let mut sources = Vec::new();
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "rs") {
                let file = path
                    .strip_prefix(src_dir)
                    .map_err(|err| ArchitectureLintError::Parse {
                        file: path.clone(),
                        message: err.to_string(),
                    })?
                    .to_path_buf();
                let contents = fs::read_to_string(&path)?;
                sources.push(LintSource { file, contents });
            }
        }
    }
    sources.sort_by(|a, b| a.file.cmp(&b.file));
    Ok(sources)
}
