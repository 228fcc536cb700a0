//! Knowledge graph construction
//!
//! Builds a typed node/edge graph from the structure index and dependency
//! graph. The build is a pure function of its inputs; node and edge
//! insertion order follows the sorted map order of the inputs, so identical
//! inputs produce identical graphs.
//!
//! Resolution is deliberately conservative: `inherits` edges resolve only to
//! same-file base classes (the qualified-key scheme never matches cross-file
//! or stdlib bases), and `imports` edges use the first path that contains
//! the dependency name as a substring or ends with `/{dep}.py`. Misses are
//! not errors; the edge is simply absent.

use std::collections::HashSet;

use serde_json::{json, Map, Value};

use crate::schema::{
    DependencyGraph, Edge, KnowledgeGraph, Node, NodeType, Relationship, StructureIndex,
};

/// Build the knowledge graph for an analyzed codebase
pub fn build_knowledge_graph(
    structure: &StructureIndex,
    dependencies: &DependencyGraph,
) -> KnowledgeGraph {
    let mut graph = KnowledgeGraph::default();
    let mut node_ids: HashSet<String> = HashSet::new();

    // File nodes
    for file_path in structure.modules.keys() {
        let node_id = format!("file:{}", file_path);
        if node_ids.insert(node_id.clone()) {
            graph.nodes.push(Node {
                id: node_id,
                label: file_label(file_path),
                node_type: NodeType::File,
                file_path: Some(file_path.clone()),
                metadata: Some(metadata(&[("path", json!(file_path))])),
            });
        }
    }

    // Class nodes with containment and inheritance edges
    for (class_key, class) in &structure.classes {
        let Some((file_path, _)) = class_key.split_once("::") else {
            continue;
        };
        let node_id = format!("class:{}", class_key);

        if node_ids.insert(node_id.clone()) {
            graph.nodes.push(Node {
                id: node_id.clone(),
                label: class.name.clone(),
                node_type: NodeType::Class,
                file_path: Some(file_path.to_string()),
                metadata: Some(metadata(&[
                    ("methods", json!(class.methods)),
                    ("bases", json!(class.bases)),
                ])),
            });
        }

        let file_node_id = format!("file:{}", file_path);
        if node_ids.contains(&file_node_id) {
            graph.edges.push(Edge {
                source: file_node_id,
                target: node_id.clone(),
                relationship: Relationship::Contains,
            });
        }

        // Only same-file bases ever resolve under the qualified-key scheme
        for base in &class.bases {
            let base_node_id = format!("class:{}::{}", file_path, base);
            if node_ids.contains(&base_node_id) {
                graph.edges.push(Edge {
                    source: node_id.clone(),
                    target: base_node_id,
                    relationship: Relationship::Inherits,
                });
            }
        }
    }

    // Function nodes with containment edges
    for (function_key, function) in &structure.functions {
        let Some((file_path, _)) = function_key.split_once("::") else {
            continue;
        };
        let node_id = format!("function:{}", function_key);

        if node_ids.insert(node_id.clone()) {
            graph.nodes.push(Node {
                id: node_id.clone(),
                label: function.name.clone(),
                node_type: NodeType::Function,
                file_path: Some(file_path.to_string()),
                metadata: Some(metadata(&[("args", json!(function.args))])),
            });
        }

        let file_node_id = format!("file:{}", file_path);
        if node_ids.contains(&file_node_id) {
            graph.edges.push(Edge {
                source: file_node_id,
                target: node_id,
                relationship: Relationship::Contains,
            });
        }
    }

    // Import edges: first-match resolution of dependency names to files
    for (file_path, deps) in dependencies {
        let file_node_id = format!("file:{}", file_path);
        if !node_ids.contains(&file_node_id) {
            continue;
        }

        for dep in deps {
            let suffix = format!("/{}.py", dep);
            let matched = structure
                .modules
                .keys()
                .find(|path| path.contains(dep.as_str()) || path.ends_with(&suffix));

            if let Some(other_file) = matched {
                let dep_node_id = format!("file:{}", other_file);
                if node_ids.contains(&dep_node_id) {
                    graph.edges.push(Edge {
                        source: file_node_id.clone(),
                        target: dep_node_id,
                        relationship: Relationship::Imports,
                    });
                }
            }
        }
    }

    graph
}

/// Assemble a metadata object from key/value pairs
fn metadata(pairs: &[(&str, Value)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

/// Final path segment used as the file node label
fn file_label(file_path: &str) -> String {
    file_path
        .rsplit('/')
        .next()
        .unwrap_or(file_path)
        .to_string()
}
