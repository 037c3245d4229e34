//! Boundary discovery on realistic C++ translation units

use tokenpack_parsing::{
    BoundaryKind, BoundaryProvider, SourceFile, TreeSitterBoundaryProvider, UnitExtractor,
};

const SHAPES: &str = r#"#include <vector>

namespace geo {

int area(int w, int h);

static int perimeter(int w, int h) {
    return 2 * (w + h);
}

class Shape {
public:
    Shape();
    ~Shape();
    virtual double size() const;
    int sides() const { return sides_; }
private:
    int sides_;
};

double Shape::size() const {
    return 0.0;
}

Shape::Shape() : sides_(0) {}

template <typename T>
T twice(T v) { return v + v; }

}  // namespace geo

int main() {
    auto f = [](int x) { return x; };
    return f(geo::perimeter(1, 2));
}
"#;

fn provider() -> TreeSitterBoundaryProvider {
    TreeSitterBoundaryProvider::for_language("cpp").unwrap()
}

#[test]
fn test_reports_functions_and_methods_in_source_order() {
    let found = provider().boundaries(SHAPES).unwrap();
    let summary: Vec<(&str, BoundaryKind, usize, usize)> = found
        .iter()
        .map(|b| (b.name.as_str(), b.kind, b.start_line, b.end_line))
        .collect();

    assert_eq!(
        summary,
        vec![
            ("area", BoundaryKind::Function, 5, 5),
            ("perimeter", BoundaryKind::Function, 7, 9),
            ("size", BoundaryKind::Method, 15, 15),
            ("sides", BoundaryKind::Method, 16, 16),
            ("size", BoundaryKind::Method, 21, 23),
            ("main", BoundaryKind::Function, 32, 35),
        ]
    );
}

#[test]
fn test_constructors_destructors_and_templates_are_skipped() {
    let found = provider().boundaries(SHAPES).unwrap();
    for skipped in ["Shape", "~Shape", "twice"] {
        assert!(
            found.iter().all(|b| b.name != skipped),
            "{skipped} should not be reported"
        );
    }
}

#[test]
fn test_member_columns_follow_indentation() {
    let found = provider().boundaries(SHAPES).unwrap();
    let sides = found.iter().find(|b| b.name == "sides").unwrap();
    assert_eq!(sides.start_column, 4);
}

#[test]
fn test_class_template_members_are_walked() {
    let source = "template <typename T>\nclass Box {\npublic:\n    T get() const { return value_; }\nprivate:\n    T value_;\n};\n";
    let found = provider().boundaries(source).unwrap();

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "get");
    assert_eq!(found[0].kind, BoundaryKind::Method);
}

#[test]
fn test_extern_c_and_preprocessor_blocks() {
    let source = "extern \"C\" {\nint c_entry(void);\n}\n#ifdef DEBUG\nvoid trace(const char *msg) {}\n#endif\n";
    let names: Vec<String> = provider()
        .boundaries(source)
        .unwrap()
        .into_iter()
        .map(|b| b.name)
        .collect();

    assert_eq!(names, vec!["c_entry", "trace"]);
}

#[test]
fn test_extracted_text_matches_original_layout() {
    let file = SourceFile::from_text("shapes.cpp", SHAPES);
    let units = UnitExtractor::new(provider()).extract(&file).unwrap();

    let perimeter = units.iter().find(|u| u.name == "perimeter").unwrap();
    assert_eq!(
        perimeter.text,
        "static int perimeter(int w, int h) {\n    return 2 * (w + h);\n}\n"
    );

    let sides = units.iter().find(|u| u.name == "sides").unwrap();
    assert_eq!(sides.text, "int sides() const { return sides_; }\n");
    assert_eq!(sides.file, "shapes.cpp");
}
