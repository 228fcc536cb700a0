//! Fixed-format structure digest

use crate::schema::StructureIndex;

/// How many module paths the digest lists before truncating
const MAX_LISTED_MODULES: usize = 10;

/// Compose a short textual digest of the analyzed structure
///
/// Counts followed by up to ten module paths in map order, with a
/// truncation note when more exist.
pub fn compose(structure: &StructureIndex) -> String {
    let mut parts = Vec::new();

    parts.push("Codebase Structure:".to_string());
    parts.push(format!("- {} files analyzed", structure.modules.len()));
    parts.push(format!("- {} classes", structure.classes.len()));
    parts.push(format!("- {} functions", structure.functions.len()));

    if !structure.modules.is_empty() {
        parts.push("\nMain Modules:".to_string());
        for file_path in structure.modules.keys().take(MAX_LISTED_MODULES) {
            parts.push(format!("  - {}", file_path));
        }
        if structure.modules.len() > MAX_LISTED_MODULES {
            parts.push(format!(
                "  ... and {} more",
                structure.modules.len() - MAX_LISTED_MODULES
            ));
        }
    }

    parts.join("\n")
}
