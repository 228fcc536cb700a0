//! Structural extraction from source files
//!
//! Python files are parsed with tree-sitter and walked for imports, classes
//! and top-level functions. ECMAScript files have no syntax tree here:
//! structure is recovered by pattern search over the raw text, which is
//! approximate by design (unusual syntax produces false negatives, and
//! methods are not distinguished from top-level functions). Unsupported
//! files yield an empty structure record.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;
use tree_sitter::Node;

use crate::lang::{Lang, LangFamily};
use crate::schema::{ClassRecord, FileRecord, FileStructure, FunctionRecord, ImportRef};

static JS_IMPORT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"import\s+(?:(?:\{[^}]*\}|\*\s+as\s+\w+|\w+)(?:\s*,\s*(?:\{[^}]*\}|\*\s+as\s+\w+|\w+))*\s+from\s+)?['"]([^'"]+)['"]"#,
    )
    .expect("import pattern is valid")
});

static JS_CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"class\s+(\w+)(?:\s+extends\s+(\w+))?").expect("class pattern is valid"));

static JS_FUNCTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:export\s+)?(?:async\s+)?function\s+(\w+)|(?:export\s+)?(?:async\s+)?const\s+(\w+)\s*=\s*(?:async\s+)?\([^)]*\)\s*=>",
    )
    .expect("function pattern is valid")
});

/// Extract the structure record for one file
///
/// Returns `None` only for Python sources that fail to parse; such files are
/// skipped from structural extraction entirely but stay in the raw file
/// list. Unsupported files produce an empty record.
pub fn extract(record: &FileRecord) -> Option<FileStructure> {
    match Lang::from_path(&record.path).map(|l| l.family()) {
        Some(LangFamily::Python) => extract_python(record),
        Some(LangFamily::EcmaScript) => Some(extract_ecmascript(record)),
        None => Some(FileStructure::empty(&record.path)),
    }
}

// ============================================================================
// Python: tree-sitter extraction
// ============================================================================

fn extract_python(record: &FileRecord) -> Option<FileStructure> {
    let language = Lang::Python.tree_sitter_language()?;
    let mut parser = tree_sitter::Parser::new();
    parser.set_language(&language).ok()?;

    let tree = parser.parse(&record.content, None)?;
    let root = tree.root_node();
    if root.has_error() {
        debug!(path = %record.path, "skipping file with syntax errors");
        return None;
    }

    let mut structure = FileStructure::empty(&record.path);

    // Imports and classes are collected at any nesting depth; functions only
    // when declared directly at module level
    visit_declarations(&root, &record.content, &mut structure);
    collect_top_level_functions(&root, &record.content, &mut structure);

    Some(structure)
}

fn visit_declarations(node: &Node, source: &str, out: &mut FileStructure) {
    match node.kind() {
        "import_statement" => record_import(node, source, out),
        "import_from_statement" => record_import_from(node, source, out),
        "class_definition" => record_class(node, source, out),
        _ => {}
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit_declarations(&child, source, out);
    }
}

/// `import a.b` and `import a.b as c`
fn record_import(node: &Node, source: &str, out: &mut FileStructure) {
    let mut cursor = node.walk();
    for name in node.children_by_field_name("name", &mut cursor) {
        match name.kind() {
            "dotted_name" => out.imports.push(ImportRef {
                module: node_text(&name, source),
                name: None,
                alias: None,
            }),
            "aliased_import" => {
                let module = name
                    .child_by_field_name("name")
                    .map(|n| node_text(&n, source))
                    .unwrap_or_default();
                let alias = name
                    .child_by_field_name("alias")
                    .map(|n| node_text(&n, source));
                out.imports.push(ImportRef {
                    module,
                    name: None,
                    alias,
                });
            }
            _ => {}
        }
    }
}

/// `from M import X`, `from M import X as Y`, `from M import *`
///
/// Relative imports keep their leading dots in the module string (`.utils`);
/// the dependency grapher excludes them when truncating to the module root.
fn record_import_from(node: &Node, source: &str, out: &mut FileStructure) {
    let module = node
        .child_by_field_name("module_name")
        .map(|n| node_text(&n, source))
        .unwrap_or_default();

    let mut cursor = node.walk();
    for name in node.children_by_field_name("name", &mut cursor) {
        match name.kind() {
            "dotted_name" => out.imports.push(ImportRef {
                module: module.clone(),
                name: Some(node_text(&name, source)),
                alias: None,
            }),
            "aliased_import" => {
                let imported = name
                    .child_by_field_name("name")
                    .map(|n| node_text(&n, source));
                let alias = name
                    .child_by_field_name("alias")
                    .map(|n| node_text(&n, source));
                out.imports.push(ImportRef {
                    module: module.clone(),
                    name: imported,
                    alias,
                });
            }
            _ => {}
        }
    }

    // `from m import *` carries the wildcard outside the name field
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "wildcard_import" {
            out.imports.push(ImportRef {
                module: module.clone(),
                name: Some("*".to_string()),
                alias: None,
            });
        }
    }
}

fn record_class(node: &Node, source: &str, out: &mut FileStructure) {
    let Some(name_node) = node.child_by_field_name("name") else {
        return;
    };
    let name = node_text(&name_node, source);

    let mut bases = Vec::new();
    if let Some(superclasses) = node.child_by_field_name("superclasses") {
        let mut cursor = superclasses.walk();
        for base in superclasses.named_children(&mut cursor) {
            // Identifiers and dotted attributes are symbolic base references;
            // keyword arguments (metaclass=...) are not bases
            match base.kind() {
                "identifier" | "attribute" => bases.push(node_text(&base, source)),
                _ => {}
            }
        }
    }

    let mut methods = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for child in body.children(&mut cursor) {
            if let Some(function) = as_function_definition(&child) {
                if let Some(method_name) = function.child_by_field_name("name") {
                    methods.push(node_text(&method_name, source));
                }
            }
        }
    }

    out.classes.insert(
        name.clone(),
        ClassRecord {
            name,
            methods,
            bases,
            line: node.start_position().row + 1,
        },
    );
}

fn collect_top_level_functions(root: &Node, source: &str, out: &mut FileStructure) {
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if let Some(function) = as_function_definition(&child) {
            record_function(&function, source, out);
        }
    }
}

fn record_function(node: &Node, source: &str, out: &mut FileStructure) {
    let Some(name_node) = node.child_by_field_name("name") else {
        return;
    };
    let name = node_text(&name_node, source);

    let mut args = Vec::new();
    if let Some(parameters) = node.child_by_field_name("parameters") {
        let mut cursor = parameters.walk();
        for param in parameters.named_children(&mut cursor) {
            match param.kind() {
                "identifier" => args.push(node_text(&param, source)),
                "default_parameter" | "typed_default_parameter" => {
                    if let Some(n) = param.child_by_field_name("name") {
                        args.push(node_text(&n, source));
                    }
                }
                "typed_parameter" => {
                    if let Some(n) = param.named_child(0) {
                        if n.kind() == "identifier" {
                            args.push(node_text(&n, source));
                        }
                    }
                }
                // Positional parameters only: stop at splats and the
                // keyword-only separator
                "list_splat_pattern" | "dictionary_splat_pattern" | "keyword_separator" => break,
                _ => {}
            }
        }
    }

    out.functions.insert(
        name.clone(),
        FunctionRecord {
            name,
            args,
            line: node.start_position().row + 1,
        },
    );
}

/// Unwrap decorated definitions so decorated functions count as functions
fn as_function_definition<'a>(node: &Node<'a>) -> Option<Node<'a>> {
    match node.kind() {
        "function_definition" => Some(*node),
        "decorated_definition" => {
            let mut cursor = node.walk();
            let found = node
                .children(&mut cursor)
                .find(|inner| inner.kind() == "function_definition");
            found
        }
        _ => None,
    }
}

fn node_text(node: &Node, source: &str) -> String {
    node.utf8_text(source.as_bytes()).unwrap_or("").to_string()
}

// ============================================================================
// ECMAScript: regex recovery
// ============================================================================

fn extract_ecmascript(record: &FileRecord) -> FileStructure {
    let mut structure = FileStructure::empty(&record.path);
    let content = &record.content;

    for capture in JS_IMPORT_RE.captures_iter(content) {
        if let Some(module) = capture.get(1) {
            structure.imports.push(ImportRef {
                module: module.as_str().to_string(),
                name: None,
                alias: None,
            });
        }
    }

    for capture in JS_CLASS_RE.captures_iter(content) {
        let Some(name) = capture.get(1) else { continue };
        let bases = capture
            .get(2)
            .map(|b| vec![b.as_str().to_string()])
            .unwrap_or_default();
        structure.classes.insert(
            name.as_str().to_string(),
            ClassRecord {
                name: name.as_str().to_string(),
                methods: Vec::new(),
                bases,
                line: line_of(content, name.start()),
            },
        );
    }

    for capture in JS_FUNCTION_RE.captures_iter(content) {
        let Some(name) = capture.get(1).or_else(|| capture.get(2)) else {
            continue;
        };
        structure.functions.insert(
            name.as_str().to_string(),
            FunctionRecord {
                name: name.as_str().to_string(),
                args: Vec::new(),
                line: line_of(content, name.start()),
            },
        );
    }

    structure
}

/// 1-indexed line of a byte offset
fn line_of(content: &str, offset: usize) -> usize {
    content[..offset].bytes().filter(|b| *b == b'\n').count() + 1
}
