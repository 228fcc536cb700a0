//! Dependency graph construction from extracted imports
//!
//! Each file maps to the set of external module roots it imports. Python
//! modules are truncated at the first dot (`a.b.c` → `a`); ECMAScript
//! modules at the first slash (`lodash/fp` → `lodash`). Relative imports
//! reference sibling files already tracked as nodes, not external packages,
//! and are excluded.

use std::collections::BTreeSet;

use crate::lang::{Lang, LangFamily};
use crate::schema::{DependencyGraph, FileRecord, StructureIndex};

/// Build the dependency graph for every collected file
///
/// Every file appears as a key, mapped to a possibly-empty deduplicated set;
/// files without a structure record (unsupported or unparsable) contribute
/// empty sets.
pub fn build_dependency_graph(index: &StructureIndex, files: &[FileRecord]) -> DependencyGraph {
    let mut graph = DependencyGraph::new();

    for file in files {
        let mut deps = BTreeSet::new();

        if let Some(structure) = index.modules.get(&file.path) {
            let family = Lang::from_path(&file.path).map(|l| l.family());
            for import in &structure.imports {
                if let Some(root) = module_root(&import.module, family) {
                    deps.insert(root);
                }
            }
        }

        graph.insert(file.path.clone(), deps);
    }

    graph
}

/// Truncate a module identifier to its external root, `None` for relative
/// or empty identifiers
fn module_root(module: &str, family: Option<LangFamily>) -> Option<String> {
    match family {
        Some(LangFamily::Python) => {
            // Relative imports (`.utils`) yield an empty first segment
            let root = module.split('.').next().unwrap_or_default();
            if root.is_empty() {
                None
            } else {
                Some(root.to_string())
            }
        }
        Some(LangFamily::EcmaScript) => {
            if module.starts_with('.') {
                return None;
            }
            let root = module.split('/').next().unwrap_or_default();
            if root.is_empty() {
                None
            } else {
                Some(root.to_string())
            }
        }
        None => None,
    }
}
