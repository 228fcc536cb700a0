//! Language family detection for structural extraction

use std::path::Path;

use tree_sitter::Language;

/// Source languages recognized by the extractor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lang {
    Python,
    JavaScript,
    TypeScript,
    Jsx,
    Tsx,
}

impl Lang {
    /// Detect language from a relative file path, `None` for unsupported files
    pub fn from_path(path: &str) -> Option<Self> {
        let ext = Path::new(path).extension().and_then(|e| e.to_str())?;
        Self::from_extension(ext)
    }

    /// Detect language from file extension string
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "py" | "pyi" => Some(Self::Python),
            "js" | "mjs" | "cjs" => Some(Self::JavaScript),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "jsx" => Some(Self::Jsx),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }

    /// Get the canonical name of the language
    pub fn name(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Jsx => "jsx",
            Self::Tsx => "tsx",
        }
    }

    /// Get the language family for shared extraction logic
    pub fn family(&self) -> LangFamily {
        match self {
            Self::Python => LangFamily::Python,
            Self::JavaScript | Self::TypeScript | Self::Jsx | Self::Tsx => LangFamily::EcmaScript,
        }
    }

    /// Get the tree-sitter Language for parsing
    ///
    /// Only the Python family has a grammar; ECMAScript structure is
    /// recovered by pattern search over raw text.
    pub fn tree_sitter_language(&self) -> Option<Language> {
        match self.family() {
            LangFamily::Python => Some(tree_sitter_python::LANGUAGE.into()),
            LangFamily::EcmaScript => None,
        }
    }
}

/// Language families grouping extraction strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LangFamily {
    /// Python: syntax-tree extraction
    Python,
    /// JavaScript, TypeScript, JSX, TSX: regex recovery
    EcmaScript,
}

impl LangFamily {
    /// Get the canonical name of the language family
    pub fn name(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::EcmaScript => "ecmascript",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_detection() {
        assert_eq!(Lang::from_extension("py"), Some(Lang::Python));
        assert_eq!(Lang::from_extension("pyi"), Some(Lang::Python));
        assert_eq!(Lang::from_extension("js"), Some(Lang::JavaScript));
        assert_eq!(Lang::from_extension("ts"), Some(Lang::TypeScript));
        assert_eq!(Lang::from_extension("jsx"), Some(Lang::Jsx));
        assert_eq!(Lang::from_extension("tsx"), Some(Lang::Tsx));
    }

    #[test]
    fn test_language_from_path() {
        assert_eq!(Lang::from_path("src/components/App.tsx"), Some(Lang::Tsx));
        assert_eq!(Lang::from_path("services/analyzer.py"), Some(Lang::Python));
        assert_eq!(Lang::from_path("README.md"), None);
        assert_eq!(Lang::from_path("Makefile"), None);
    }

    #[test]
    fn test_language_families() {
        assert_eq!(Lang::Python.family(), LangFamily::Python);
        assert_eq!(Lang::JavaScript.family(), LangFamily::EcmaScript);
        assert_eq!(Lang::Tsx.family(), LangFamily::EcmaScript);
    }

    #[test]
    fn test_grammar_availability() {
        assert!(Lang::Python.tree_sitter_language().is_some());
        assert!(Lang::TypeScript.tree_sitter_language().is_none());
    }
}
