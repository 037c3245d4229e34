//! Language-specific configurations for boundary extraction
//!
//! Each entry pairs a tree-sitter grammar with the node kinds the boundary
//! walker treats as function definitions, declarations, and class bodies.

use lazy_static::lazy_static;
use std::collections::HashMap;
use tree_sitter::Language;

/// Configuration for a specific programming language
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// The language identifier (e.g., "cpp", "c")
    pub id: &'static str,
    /// File extensions associated with this language, lowercase
    pub extensions: &'static [&'static str],
    /// Tree-sitter grammar
    pub tree_sitter_language: Option<Language>,
    /// Nodes that define a function with a body
    pub definition_kinds: &'static [&'static str],
    /// Nodes that may declare functions without a body
    pub declaration_kinds: &'static [&'static str],
    /// Nodes whose `body` holds member declarations
    pub class_kinds: &'static [&'static str],
    /// Nodes whose named children are walked at the same scope
    pub container_kinds: &'static [&'static str],
}

impl LanguageConfig {
    /// Creates a new language configuration
    pub const fn new(id: &'static str) -> Self {
        Self {
            id,
            extensions: &[],
            tree_sitter_language: None,
            definition_kinds: &[],
            declaration_kinds: &[],
            class_kinds: &[],
            container_kinds: &[],
        }
    }

    /// Builder method to set extensions
    pub const fn with_extensions(mut self, extensions: &'static [&'static str]) -> Self {
        self.extensions = extensions;
        self
    }

    /// Builder method to set the tree-sitter grammar
    #[must_use]
    pub fn with_tree_sitter(mut self, language: Language) -> Self {
        self.tree_sitter_language = Some(language);
        self
    }

    /// Builder method to set function definition and declaration kinds
    pub const fn with_function_kinds(
        mut self,
        definitions: &'static [&'static str],
        declarations: &'static [&'static str],
    ) -> Self {
        self.definition_kinds = definitions;
        self.declaration_kinds = declarations;
        self
    }

    /// Builder method to set class-like kinds
    pub const fn with_class_kinds(mut self, kinds: &'static [&'static str]) -> Self {
        self.class_kinds = kinds;
        self
    }

    /// Builder method to set scope container kinds
    pub const fn with_container_kinds(mut self, kinds: &'static [&'static str]) -> Self {
        self.container_kinds = kinds;
        self
    }

    pub fn is_definition(&self, kind: &str) -> bool {
        self.definition_kinds.contains(&kind)
    }

    pub fn is_declaration(&self, kind: &str) -> bool {
        self.declaration_kinds.contains(&kind)
    }

    pub fn is_class(&self, kind: &str) -> bool {
        self.class_kinds.contains(&kind)
    }

    pub fn is_container(&self, kind: &str) -> bool {
        self.container_kinds.contains(&kind)
    }
}

lazy_static! {
    /// Registry of all supported language configurations
    pub static ref LANGUAGE_REGISTRY: HashMap<&'static str, LanguageConfig> = {
        let mut registry = HashMap::new();

        // C++ configuration
        registry.insert(
            "cpp",
            LanguageConfig::new("cpp")
                .with_extensions(&["cpp", "cxx", "cc", "c++", "hpp", "hxx", "hh", "h++"])
                .with_tree_sitter(tree_sitter_cpp::LANGUAGE.into())
                .with_function_kinds(
                    &["function_definition"],
                    &["declaration", "field_declaration"],
                )
                .with_class_kinds(&["class_specifier", "struct_specifier", "union_specifier"])
                .with_container_kinds(&[
                    "translation_unit",
                    "namespace_definition",
                    "declaration_list",
                    "linkage_specification",
                    "field_declaration_list",
                    "preproc_if",
                    "preproc_ifdef",
                    "preproc_else",
                    "preproc_elif",
                    "preproc_elifdef",
                ]),
        );

        // C configuration
        registry.insert(
            "c",
            LanguageConfig::new("c")
                .with_extensions(&["c", "h"])
                .with_tree_sitter(tree_sitter_c::LANGUAGE.into())
                .with_function_kinds(&["function_definition"], &["declaration"])
                .with_container_kinds(&[
                    "translation_unit",
                    "linkage_specification",
                    "declaration_list",
                    "preproc_if",
                    "preproc_ifdef",
                    "preproc_else",
                    "preproc_elif",
                    "preproc_elifdef",
                ]),
        );

        registry
    };

    /// Map of file extensions to language IDs
    pub static ref EXTENSION_MAP: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();

        for (lang_id, config) in LANGUAGE_REGISTRY.iter() {
            for ext in config.extensions {
                map.insert(*ext, *lang_id);
            }
        }

        map
    };
}

/// Gets a language configuration by ID
pub fn get_language_config(language_id: &str) -> Option<&'static LanguageConfig> {
    LANGUAGE_REGISTRY.get(language_id)
}

/// Gets a language ID from a file extension, ignoring case and a leading dot
pub fn get_language_from_extension(extension: &str) -> Option<&'static str> {
    let normalized = extension.trim_start_matches('.').to_ascii_lowercase();
    EXTENSION_MAP.get(normalized.as_str()).copied()
}
