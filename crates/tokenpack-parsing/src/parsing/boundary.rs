//! Function boundary discovery over tree-sitter syntax trees
//!
//! The walk keeps its own stack of pending nodes instead of recursing, and
//! pops them in pre-order, so boundaries come out in source order. Only
//! scope-level constructs are visited: namespaces, linkage blocks,
//! preprocessor conditionals, and class bodies. Function bodies are never
//! entered, which keeps lambdas and local declarations out of the result.
//!
//! Constructors, destructors, and conversion operators have no return type
//! in the grammar and are skipped on that basis. Function templates are
//! skipped whole; class templates are still walked for their members.

use crate::error::{ParsingError, ParsingResult};
use crate::parsing::languages::{
    LanguageConfig, get_language_config, get_language_from_extension,
};
use serde::Serialize;
use tree_sitter::{Node, Parser};

/// Whether a boundary is a free function or a class member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryKind {
    Function,
    Method,
}

/// Location of one function-like construct in a source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionBoundary {
    /// Unqualified declarator spelling (`Shape::area` is reported as `area`)
    pub name: String,
    pub kind: BoundaryKind,
    /// 1-based line of the first token
    pub start_line: usize,
    /// 0-based byte offset of the first token within its line
    pub start_column: usize,
    /// 1-based line of the last token
    pub end_line: usize,
}

/// Supplies function boundaries for one source text
pub trait BoundaryProvider: Send + Sync {
    /// Report every function-like construct in `source`, in source order
    ///
    /// # Errors
    /// Returns `ParsingError::Parse` when no syntax tree can be produced
    fn boundaries(&self, source: &str) -> ParsingResult<Vec<FunctionBoundary>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Namespace,
    Class,
}

/// Boundary provider backed by a tree-sitter grammar from the language registry
#[derive(Debug, Clone)]
pub struct TreeSitterBoundaryProvider {
    config: &'static LanguageConfig,
}

impl TreeSitterBoundaryProvider {
    /// Provider for a registered language id such as `cpp`
    ///
    /// # Errors
    /// Returns `ParsingError::LanguageUnsupported` for unknown ids
    pub fn for_language(language_id: &str) -> ParsingResult<Self> {
        let config = get_language_config(language_id)
            .ok_or_else(|| ParsingError::LanguageUnsupported(language_id.to_string()))?;
        Ok(Self { config })
    }

    /// Provider for the language that owns a file extension
    ///
    /// # Errors
    /// Returns `ParsingError::LanguageUnsupported` when no language claims `extension`
    pub fn for_extension(extension: &str) -> ParsingResult<Self> {
        let language_id = get_language_from_extension(extension).ok_or_else(|| {
            ParsingError::LanguageUnsupported(format!("no grammar for extension '{extension}'"))
        })?;
        Self::for_language(language_id)
    }

    pub const fn language(&self) -> &'static str {
        self.config.id
    }

    fn create_parser(&self) -> ParsingResult<Parser> {
        let language = self.config.tree_sitter_language.as_ref().ok_or_else(|| {
            ParsingError::TreeSitterError(format!("{} has no grammar", self.config.id))
        })?;

        let mut parser = Parser::new();
        parser
            .set_language(language)
            .map_err(|e| ParsingError::TreeSitterError(e.to_string()))?;
        Ok(parser)
    }

    fn definition(&self, node: Node<'_>, scope: Scope, source: &str) -> Option<FunctionBoundary> {
        node.child_by_field_name("type")?;
        let declarator = function_declarator(node.child_by_field_name("declarator")?)?;
        self.named_boundary(node, declarator, scope, source)
    }

    fn prototypes(&self, node: Node<'_>, scope: Scope, source: &str) -> Vec<FunctionBoundary> {
        if node.child_by_field_name("type").is_none() {
            return Vec::new();
        }

        let mut cursor = node.walk();
        let declarators: Vec<Node<'_>> = node
            .children_by_field_name("declarator", &mut cursor)
            .collect();

        declarators
            .into_iter()
            .filter_map(function_declarator)
            .filter_map(|declarator| self.named_boundary(node, declarator, scope, source))
            .collect()
    }

    fn named_boundary(
        &self,
        node: Node<'_>,
        declarator: Node<'_>,
        scope: Scope,
        source: &str,
    ) -> Option<FunctionBoundary> {
        let target = declarator.child_by_field_name("declarator")?;
        let name_node = unqualified_name(target);
        if name_node.kind() == "destructor_name" {
            return None;
        }

        let kind = if scope == Scope::Class || target.kind() == "qualified_identifier" {
            BoundaryKind::Method
        } else {
            BoundaryKind::Function
        };
        let name = name_node.utf8_text(source.as_bytes()).ok()?.to_string();

        let start = node.start_position();
        let end = node.end_position();
        tracing::trace!(
            language = self.config.id,
            name = %name,
            node = node.kind(),
            "Found function boundary"
        );

        Some(FunctionBoundary {
            name,
            kind,
            start_line: start.row.saturating_add(1),
            start_column: start.column,
            end_line: end.row.saturating_add(1),
        })
    }
}

impl BoundaryProvider for TreeSitterBoundaryProvider {
    fn boundaries(&self, source: &str) -> ParsingResult<Vec<FunctionBoundary>> {
        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParsingError::Parse("tree-sitter produced no syntax tree".to_string()))?;

        let root = tree.root_node();
        if root.has_error() {
            tracing::debug!(
                language = self.config.id,
                "Source has syntax errors, reporting the parts that parsed"
            );
        }

        let config = self.config;
        let mut found = Vec::new();
        let mut stack = vec![(root, Scope::Namespace)];

        while let Some((node, scope)) = stack.pop() {
            let kind = node.kind();

            if config.is_definition(kind) {
                found.extend(self.definition(node, scope, source));
            } else if config.is_declaration(kind) {
                found.extend(self.prototypes(node, scope, source));
                if let Some(ty) = node.child_by_field_name("type")
                    && config.is_class(ty.kind())
                {
                    stack.push((ty, scope));
                }
            } else if config.is_class(kind) {
                if let Some(body) = node.child_by_field_name("body") {
                    stack.push((body, Scope::Class));
                }
            } else if kind == "template_declaration" {
                push_children(&mut stack, node, scope, |child| config.is_class(child.kind()));
            } else if config.is_container(kind) {
                push_children(&mut stack, node, scope, |_| true);
            }
        }

        tracing::debug!(
            language = config.id,
            boundaries = found.len(),
            "Collected function boundaries"
        );
        Ok(found)
    }
}

/// Queue the named children of `node` so the first child is popped first
fn push_children<'tree>(
    stack: &mut Vec<(Node<'tree>, Scope)>,
    node: Node<'tree>,
    scope: Scope,
    keep: impl Fn(&Node<'tree>) -> bool,
) {
    let mut cursor = node.walk();
    let children: Vec<Node<'tree>> = node.named_children(&mut cursor).filter(keep).collect();
    stack.extend(children.into_iter().rev().map(|child| (child, scope)));
}

/// Follow pointer and reference declarators down to a function declarator
fn function_declarator(node: Node<'_>) -> Option<Node<'_>> {
    let mut current = node;
    loop {
        match current.kind() {
            "function_declarator" => {
                // `(*fp)(int)` declares a pointer to a function, not a function
                let inner = current.child_by_field_name("declarator")?;
                return (inner.kind() != "parenthesized_declarator").then_some(current);
            }
            "pointer_declarator" | "reference_declarator" | "attributed_declarator" => {
                current = inner_declarator(current)?;
            }
            _ => return None,
        }
    }
}

fn inner_declarator(node: Node<'_>) -> Option<Node<'_>> {
    if let Some(inner) = node.child_by_field_name("declarator") {
        return Some(inner);
    }
    // reference declarators carry their target as an unnamed field
    let mut cursor = node.walk();
    node.named_children(&mut cursor).last()
}

/// Strip scopes and template arguments: `a::B<int>::c` -> `c`
fn unqualified_name(node: Node<'_>) -> Node<'_> {
    let mut current = node;
    while matches!(
        current.kind(),
        "qualified_identifier" | "template_function" | "template_method"
    ) {
        match current.child_by_field_name("name") {
            Some(name) => current = name,
            None => break,
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cpp_boundaries(source: &str) -> Vec<FunctionBoundary> {
        TreeSitterBoundaryProvider::for_language("cpp")
            .unwrap()
            .boundaries(source)
            .unwrap()
    }

    fn names(boundaries: &[FunctionBoundary]) -> Vec<&str> {
        boundaries.iter().map(|b| b.name.as_str()).collect()
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        assert!(matches!(
            TreeSitterBoundaryProvider::for_language("cobol"),
            Err(ParsingError::LanguageUnsupported(_))
        ));
        assert!(TreeSitterBoundaryProvider::for_extension("rs").is_err());
    }

    #[test]
    fn test_extension_selects_grammar() {
        let provider = TreeSitterBoundaryProvider::for_extension("CPP").unwrap();
        assert_eq!(provider.language(), "cpp");
    }

    #[test]
    fn test_free_function_span() {
        let source = "int add(int a, int b) {\n    return a + b;\n}\n";
        let found = cpp_boundaries(source);

        assert_eq!(
            found,
            vec![FunctionBoundary {
                name: "add".to_string(),
                kind: BoundaryKind::Function,
                start_line: 1,
                start_column: 0,
                end_line: 3,
            }]
        );
    }

    #[test]
    fn test_pointer_and_reference_returns() {
        let source = "char *name_of(int id);\nconst Label &label();\n";
        assert_eq!(names(&cpp_boundaries(source)), vec!["name_of", "label"]);
    }

    #[test]
    fn test_variables_are_not_functions() {
        let source = "int (*handler)(int);\nint total = compute();\nint counter;\n";
        assert!(cpp_boundaries(source).is_empty());
    }

    #[test]
    fn test_lambdas_inside_bodies_are_ignored() {
        let source = "int run() {\n    auto f = [](int x) { return x; };\n    return f(1);\n}\n";
        assert_eq!(names(&cpp_boundaries(source)), vec!["run"]);
    }

    #[test]
    fn test_operator_method_keeps_spelling() {
        let source = "struct Point {\n    int x;\n    bool operator==(const Point &o) const { return x == o.x; }\n};\n";
        let found = cpp_boundaries(source);

        assert_eq!(names(&found), vec!["operator=="]);
        assert_eq!(found[0].kind, BoundaryKind::Method);
        assert_eq!(found[0].start_line, 3);
        assert_eq!(found[0].start_column, 4);
    }

    #[test]
    fn test_c_grammar() {
        let provider = TreeSitterBoundaryProvider::for_language("c").unwrap();
        let found = provider
            .boundaries("static int add(int a, int b) { return a + b; }\nvoid reset(void);\n")
            .unwrap();

        assert_eq!(names(&found), vec!["add", "reset"]);
        assert!(found.iter().all(|b| b.kind == BoundaryKind::Function));
    }

    #[test]
    fn test_empty_source_has_no_boundaries() {
        assert!(cpp_boundaries("").is_empty());
    }
}
