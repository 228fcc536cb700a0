//! Data model for codebase structure and knowledge graphs

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config;

// FNV-1a constants for 64-bit hash
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// Compute a stable FNV-1a hash (deterministic across runs and platforms)
///
/// Used for deriving snapshot cache keys from source identifiers.
pub fn fnv1a_hash(data: &str) -> u64 {
    let mut hash = FNV_OFFSET;
    for byte in data.bytes() {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// One collected source file
///
/// `path` is relative to the analysis root, `/`-separated, and unique within
/// a run. Content is decoded lossily; records are immutable after collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Relative path, POSIX-separated
    pub path: String,

    /// Raw text content (invalid UTF-8 sequences replaced)
    pub content: String,

    /// Size in bytes on disk
    pub size: u64,
}

/// A reference from one file to an external or internal module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRef {
    /// Module identifier (dotted or slash path)
    pub module: String,

    /// Imported symbol name, for `from M import X` style imports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Local alias, if the import was renamed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// A declared class with its methods and symbolic base references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRecord {
    /// Class name
    pub name: String,

    /// Method names in declaration order
    pub methods: Vec<String>,

    /// Base-class references as unresolved symbolic names
    pub bases: Vec<String>,

    /// Source line of the declaration (1-indexed)
    pub line: usize,
}

/// A declared top-level function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRecord {
    /// Function name
    pub name: String,

    /// Parameter names in declaration order
    pub args: Vec<String>,

    /// Source line of the declaration (1-indexed)
    pub line: usize,
}

/// Parsed structure of a single file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStructure {
    /// Relative path of the file this structure belongs to
    pub file_path: String,

    /// Declared classes by name (last declaration wins on collision)
    pub classes: BTreeMap<String, ClassRecord>,

    /// Declared top-level functions by name
    pub functions: BTreeMap<String, FunctionRecord>,

    /// Declared imports in source order
    pub imports: Vec<ImportRef>,
}

impl FileStructure {
    /// An empty structure record for a file with no extractable content
    pub fn empty(file_path: &str) -> Self {
        Self {
            file_path: file_path.to_string(),
            ..Default::default()
        }
    }
}

/// Aggregate structure of an analyzed codebase
///
/// `classes` and `functions` hold every per-file record under a qualified
/// `{file_path}::{name}` key. Every qualified key's file-path prefix is also
/// a key of `modules`. All maps iterate in sorted order; this is the pinned
/// deterministic order for downstream graph construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureIndex {
    /// Per-file structure records
    pub modules: BTreeMap<String, FileStructure>,

    /// All classes under qualified keys
    pub classes: BTreeMap<String, ClassRecord>,

    /// All top-level functions under qualified keys
    pub functions: BTreeMap<String, FunctionRecord>,

    /// Per-file import lists
    pub imports: BTreeMap<String, Vec<ImportRef>>,
}

impl StructureIndex {
    /// Insert one file's parsed structure, hoisting classes and functions
    /// into the global maps under qualified keys
    pub fn insert(&mut self, structure: FileStructure) {
        let file_path = structure.file_path.clone();

        for (name, class) in &structure.classes {
            self.classes
                .insert(format!("{}::{}", file_path, name), class.clone());
        }
        for (name, function) in &structure.functions {
            self.functions
                .insert(format!("{}::{}", file_path, name), function.clone());
        }
        self.imports.insert(file_path.clone(), structure.imports.clone());
        self.modules.insert(file_path, structure);
    }
}

/// Dependency graph: file path to the set of external module roots it imports
pub type DependencyGraph = BTreeMap<String, BTreeSet<String>>;

/// Node types in the knowledge graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    File,
    Class,
    Function,
    Module,
}

/// Edge relationships in the knowledge graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relationship {
    Contains,
    Inherits,
    Imports,
}

/// Node in the knowledge graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique id across the whole graph
    pub id: String,

    /// Display label
    pub label: String,

    /// Node type
    #[serde(rename = "type")]
    pub node_type: NodeType,

    /// Owning file, where applicable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,

    /// Opaque per-node metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Edge in the knowledge graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node id
    pub source: String,

    /// Target node id
    pub target: String,

    /// Relationship type
    pub relationship: Relationship,
}

/// Typed entity/relationship graph over files, classes and functions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Analysis request: exactly one of `repo_url`/`local_path` must be set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Remote repository URL to clone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,

    /// Local directory to analyze in place
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<PathBuf>,

    /// Include glob patterns
    #[serde(default = "config::default_include_patterns")]
    pub include: Vec<String>,

    /// Exclude glob patterns (checked before includes)
    #[serde(default = "config::default_exclude_patterns")]
    pub exclude: Vec<String>,

    /// Maximum file size in bytes; larger files are skipped
    #[serde(default = "config::default_max_file_size")]
    pub max_file_size: u64,
}

impl AnalysisRequest {
    /// Request for a local directory with default patterns and size ceiling
    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self {
            repo_url: None,
            local_path: Some(path.into()),
            include: config::default_include_patterns(),
            exclude: config::default_exclude_patterns(),
            max_file_size: config::default_max_file_size(),
        }
    }

    /// Request for a remote repository with default patterns and size ceiling
    pub fn remote(url: impl Into<String>) -> Self {
        Self {
            repo_url: Some(url.into()),
            local_path: None,
            include: config::default_include_patterns(),
            exclude: config::default_exclude_patterns(),
            max_file_size: config::default_max_file_size(),
        }
    }
}

/// Complete result of one analysis run
///
/// Mirrors the JSON document consumed by downstream presentation layers.
/// Round-trips through serde without loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Sorted relative paths of every collected file
    pub files: Vec<String>,

    /// File contents keyed by relative path
    pub file_contents: BTreeMap<String, String>,

    /// Parsed structure index
    pub structure: StructureIndex,

    /// Per-file external dependency sets
    pub dependencies: DependencyGraph,

    /// Human-readable structure digest
    pub summary: String,

    /// Root the analysis ran against (local path or clone directory)
    pub root_path: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fnv1a_is_stable() {
        assert_eq!(fnv1a_hash("repograph"), fnv1a_hash("repograph"));
        assert_ne!(fnv1a_hash("a"), fnv1a_hash("b"));
    }

    #[test]
    fn test_structure_index_hoists_qualified_keys() {
        let mut index = StructureIndex::default();
        let mut structure = FileStructure::empty("pkg/models.py");
        structure.classes.insert(
            "User".to_string(),
            ClassRecord {
                name: "User".to_string(),
                methods: vec!["save".to_string()],
                bases: vec![],
                line: 3,
            },
        );
        structure.functions.insert(
            "connect".to_string(),
            FunctionRecord {
                name: "connect".to_string(),
                args: vec!["url".to_string()],
                line: 20,
            },
        );
        index.insert(structure);

        assert!(index.modules.contains_key("pkg/models.py"));
        assert!(index.classes.contains_key("pkg/models.py::User"));
        assert!(index.functions.contains_key("pkg/models.py::connect"));
        // Every qualified key's file prefix is a modules entry
        for key in index.classes.keys().chain(index.functions.keys()) {
            let (file, _) = key.split_once("::").unwrap();
            assert!(index.modules.contains_key(file));
        }
    }

    #[test]
    fn test_import_ref_serialization_omits_empty_fields() {
        let import = ImportRef {
            module: "os".to_string(),
            name: None,
            alias: None,
        };
        let json = serde_json::to_string(&import).unwrap();
        assert_eq!(json, r#"{"module":"os"}"#);
    }

    #[test]
    fn test_analysis_request_defaults_from_json() {
        let request: AnalysisRequest =
            serde_json::from_str(r#"{"local_path": "/tmp/repo"}"#).unwrap();
        assert_eq!(request.max_file_size, 100_000);
        assert!(request.include.contains(&"*.py".to_string()));
        assert!(request.exclude.iter().any(|p| p.contains("node_modules")));
    }
}
