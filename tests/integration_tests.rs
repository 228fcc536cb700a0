//! Integration tests for repograph
//!
//! These tests verify end-to-end behavior across multiple modules, driving
//! the full analyze → dependency-graph → knowledge-graph pipeline over
//! temporary source trees.
//!
//! Tests use tempfile to create temporary directories with specific source
//! structures. This avoids bloating the repo with fixture files while
//! enabling realistic testing.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use repograph::{
    analyze, build_knowledge_graph, AnalysisRequest, AnalysisResult, NodeType, Relationship,
};

// ============================================================================
// TEST FIXTURE UTILITIES
// ============================================================================

/// Builder for creating test repository structures
struct TestRepo {
    dir: TempDir,
}

impl TestRepo {
    /// Create a new empty test repository
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Get the path to the test repository root
    fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add a source file with the given content
    fn add_file(&self, relative_path: &str, content: &str) -> &Self {
        let full_path = self.dir.path().join(relative_path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, content).expect("Failed to write file");
        self
    }

    /// Create the calculator fixture: a three-file Python application
    fn with_calculator_app(&self) -> &Self {
        self.add_file(
            "calculator.py",
            r#"import math


class Calculator:
    def __init__(self):
        self.history = []

    def add(self, a, b):
        result = a + b
        self.history.append(result)
        return result

    def power(self, base, exponent):
        return math.pow(base, exponent)


def calculate_area(radius):
    return math.pi * radius ** 2
"#,
        )
        .add_file(
            "main.py",
            r#"from calculator import Calculator, calculate_area


def main():
    calc = Calculator()
    print(calc.add(10, 5))
    print(calculate_area(5.0))


if __name__ == "__main__":
    main()
"#,
        )
        .add_file(
            "utils.py",
            r#"from typing import List


def format_number(num, decimals=2):
    return f"{num:.{decimals}f}"


def average(numbers):
    if not numbers:
        return 0.0
    return sum(numbers) / len(numbers)
"#,
        )
    }

    /// Analyze this repository with the given patterns
    fn analyze_with(&self, include: &[&str], exclude: &[&str]) -> AnalysisResult {
        let mut request = AnalysisRequest::local(self.path());
        if !include.is_empty() {
            request.include = include.iter().map(|s| s.to_string()).collect();
        }
        if !exclude.is_empty() {
            request.exclude = exclude.iter().map(|s| s.to_string()).collect();
        }
        analyze(&request).expect("analysis failed")
    }

    /// Analyze with default patterns
    fn analyze(&self) -> AnalysisResult {
        self.analyze_with(&[], &[])
    }
}

// ============================================================================
// FULL PIPELINE
// ============================================================================

#[test]
fn analyzes_calculator_app() {
    let repo = TestRepo::new();
    repo.with_calculator_app();

    let result = repo.analyze();

    assert_eq!(result.files, vec!["calculator.py", "main.py", "utils.py"]);
    assert_eq!(result.structure.modules.len(), 3);

    // Classes and functions under qualified keys
    assert!(result.structure.classes.contains_key("calculator.py::Calculator"));
    assert!(result
        .structure
        .functions
        .contains_key("calculator.py::calculate_area"));
    assert!(result.structure.functions.contains_key("main.py::main"));
    assert!(result.structure.functions.contains_key("utils.py::average"));

    let calculator = &result.structure.classes["calculator.py::Calculator"];
    assert_eq!(calculator.methods, vec!["__init__", "add", "power"]);

    // Dependency sets hold module roots
    assert!(result.dependencies["calculator.py"].contains("math"));
    assert!(result.dependencies["main.py"].contains("calculator"));
    assert!(result.dependencies["utils.py"].contains("typing"));

    assert!(result.summary.contains("- 3 files analyzed"));
    assert!(result.summary.contains("- 1 classes"));
}

#[test]
fn knowledge_graph_over_calculator_app() {
    let repo = TestRepo::new();
    repo.with_calculator_app();

    let result = repo.analyze();
    let graph = build_knowledge_graph(&result.structure, &result.dependencies);

    // Unique node ids
    let mut ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    ids.sort();
    let before = ids.len();
    ids.dedup();
    assert_eq!(ids.len(), before);

    // File nodes labeled by final path segment
    let file_node = graph
        .nodes
        .iter()
        .find(|n| n.id == "file:calculator.py")
        .unwrap();
    assert_eq!(file_node.label, "calculator.py");
    assert_eq!(file_node.node_type, NodeType::File);

    // Every contains edge runs from a file node to an entity in that file
    for edge in graph
        .edges
        .iter()
        .filter(|e| e.relationship == Relationship::Contains)
    {
        assert!(edge.source.starts_with("file:"));
        let file = edge.source.trim_start_matches("file:");
        let target_file = graph
            .nodes
            .iter()
            .find(|n| n.id == edge.target)
            .and_then(|n| n.file_path.clone())
            .unwrap();
        assert_eq!(file, target_file);
    }

    // main.py depends on "calculator", which resolves to calculator.py
    assert!(graph.edges.iter().any(|e| {
        e.relationship == Relationship::Imports
            && e.source == "file:main.py"
            && e.target == "file:calculator.py"
    }));
}

#[test]
fn result_round_trips_through_json() {
    let repo = TestRepo::new();
    repo.with_calculator_app();

    let result = repo.analyze();
    let json = serde_json::to_string(&result).unwrap();
    let back: AnalysisResult = serde_json::from_str(&json).unwrap();
    assert_eq!(result, back);

    // The graph built from the round-tripped result is identical too
    let graph = build_knowledge_graph(&result.structure, &result.dependencies);
    let graph_back = build_knowledge_graph(&back.structure, &back.dependencies);
    assert_eq!(graph, graph_back);
}

// ============================================================================
// SPEC SCENARIOS
// ============================================================================

#[test]
fn cross_file_inheritance_does_not_resolve() {
    let repo = TestRepo::new();
    repo.add_file("a.py", "class Base:\n    pass\n")
        .add_file("b.py", "class Child(Base):\n    pass\n");

    let result = repo.analyze();
    let graph = build_knowledge_graph(&result.structure, &result.dependencies);

    // Base lives in a.py, so class:b.py::Base does not exist and no
    // inherits edge is produced
    assert!(graph
        .edges
        .iter()
        .all(|e| e.relationship != Relationship::Inherits));
}

#[test]
fn relative_import_excluded_from_dependencies() {
    let repo = TestRepo::new();
    repo.add_file("a.py", "import os\nfrom .utils import helper\n")
        .add_file("utils.py", "def helper():\n    pass\n");

    let result = repo.analyze();
    let deps: Vec<&str> = result.dependencies["a.py"]
        .iter()
        .map(|s| s.as_str())
        .collect();
    assert_eq!(deps, vec!["os"]);
}

#[test]
fn oversized_file_absent_from_every_collection() {
    let repo = TestRepo::new();
    repo.add_file("small.py", "def tiny():\n    pass\n");
    let big_body = format!("def big():\n    x = \"{}\"\n", "a".repeat(500));
    repo.add_file("big.py", &big_body);

    let mut request = AnalysisRequest::local(repo.path());
    request.max_file_size = 100;
    let result = analyze(&request).expect("analysis failed");

    assert_eq!(result.files, vec!["small.py"]);
    assert!(!result.file_contents.contains_key("big.py"));
    assert!(!result.structure.modules.contains_key("big.py"));
    assert!(!result.dependencies.contains_key("big.py"));
}

#[test]
fn empty_tree_yields_empty_graph_and_zero_summary() {
    let repo = TestRepo::new();

    let result = repo.analyze();
    assert!(result.files.is_empty());
    assert!(result.summary.contains("0 files analyzed"));

    let graph = build_knowledge_graph(&result.structure, &result.dependencies);
    assert!(graph.nodes.is_empty());
    assert!(graph.edges.is_empty());
}

#[test]
fn exclude_dominates_include() {
    let repo = TestRepo::new();
    repo.add_file("pkg/mod.py", "def live():\n    pass\n")
        .add_file("pkg/__pycache__/mod.py", "def stale():\n    pass\n");

    let result = repo.analyze_with(&["**"], &["**/__pycache__/**"]);
    assert_eq!(result.files, vec!["pkg/mod.py"]);
}

#[test]
fn reruns_are_identical() {
    let repo = TestRepo::new();
    repo.with_calculator_app();

    let first = repo.analyze();
    let second = repo.analyze();
    assert_eq!(first, second);
}

// ============================================================================
// MIXED-LANGUAGE TREES
// ============================================================================

#[test]
fn mixed_python_and_typescript_tree() {
    let repo = TestRepo::new();
    repo.add_file(
        "backend/api.py",
        "import flask\n\nclass Server:\n    def start(self):\n        pass\n",
    )
    .add_file(
        "frontend/app.ts",
        "import { render } from 'react-dom';\n\nexport class App {}\n\nexport const boot = () => render();\n",
    )
    .add_file("frontend/vendor/lib.js", "import junk from 'junk';\n");

    let result = repo.analyze_with(&["**/*.py", "**/*.ts"], &["**/vendor/**"]);

    assert_eq!(result.files, vec!["backend/api.py", "frontend/app.ts"]);
    assert!(result.structure.classes.contains_key("backend/api.py::Server"));
    assert!(result.structure.classes.contains_key("frontend/app.ts::App"));
    assert!(result
        .structure
        .functions
        .contains_key("frontend/app.ts::boot"));

    assert!(result.dependencies["backend/api.py"].contains("flask"));
    assert!(result.dependencies["frontend/app.ts"].contains("react-dom"));
}

#[test]
fn unparsable_python_stays_listed_but_unparsed() {
    let repo = TestRepo::new();
    repo.add_file("ok.py", "def fine():\n    pass\n")
        .add_file("broken.py", "def broken(:\n");

    let result = repo.analyze();

    // Still collected and readable
    assert_eq!(result.files, vec!["broken.py", "ok.py"]);
    assert!(result.file_contents.contains_key("broken.py"));

    // But skipped from structural extraction entirely
    assert!(!result.structure.modules.contains_key("broken.py"));
    assert!(result.structure.modules.contains_key("ok.py"));

    // Dependency map still covers it with an empty set
    assert!(result.dependencies["broken.py"].is_empty());

    // No file node either: the graph follows the modules map
    let graph = build_knowledge_graph(&result.structure, &result.dependencies);
    assert!(graph.nodes.iter().all(|n| n.id != "file:broken.py"));
}

#[test]
fn unsupported_files_contribute_nothing_structural() {
    let repo = TestRepo::new();
    repo.add_file("data.txt", "not code\n")
        .add_file("app.py", "import data\n");

    let result = repo.analyze_with(&["**"], &[]);

    assert_eq!(result.files, vec!["app.py", "data.txt"]);
    let txt = &result.structure.modules["data.txt"];
    assert!(txt.classes.is_empty());
    assert!(txt.functions.is_empty());
    assert!(txt.imports.is_empty());

    // The unsupported file is still a node, and the substring heuristic can
    // resolve an import edge onto it
    let graph = build_knowledge_graph(&result.structure, &result.dependencies);
    assert!(graph.nodes.iter().any(|n| n.id == "file:data.txt"));
    assert!(graph.edges.iter().any(|e| {
        e.relationship == Relationship::Imports
            && e.source == "file:app.py"
            && e.target == "file:data.txt"
    }));
}
