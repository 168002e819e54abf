//! Unit tests for synscan.

use std::path::Path;
use std::thread;

use rstest::rstest;

use crate::{
    DiagnosticKind, FileChecker, ScanError, ScanOptions, Scanner, SourcePosition,
    SupportedLanguage, scan,
};

fn summary(text: &str, language_id: i32) -> Vec<(u32, u32, DiagnosticKind)> {
    scan(text.as_bytes(), language_id)
        .expect("known language")
        .iter()
        .map(|d| (d.line(), d.column(), d.kind()))
        .collect()
}

// =============================================================================
// Scan Scenarios
// =============================================================================

#[test]
fn unterminated_string_inside_call_inside_block() {
    use DiagnosticKind::*;
    assert_eq!(
        summary("int main() { printf(\"hello); }", 1),
        [
            (1, 12, UnbalancedDelimiter),
            (1, 20, UnbalancedDelimiter),
            (1, 21, UnterminatedLiteral),
        ]
    );
}

#[test]
fn missing_parenthesis_is_reported_once_at_its_opener() {
    assert_eq!(
        summary("if (1 { return 0; }", 1),
        [(1, 4, DiagnosticKind::UnbalancedDelimiter)]
    );
}

#[test]
fn python_dedent_mismatch() {
    assert_eq!(
        summary("if x:\n    a = 1\n   b = 2\n", 4),
        [(3, 4, DiagnosticKind::IndentationMismatch)]
    );
}

#[rstest]
#[case(1, "int main(void) {\n  return (1 + 2) * a[3];\n}\n")]
#[case(2, "#include <vector>\nint f() { std::vector<int> v = {1, 2}; return v[0]; }\n")]
#[case(3, "class A {\n  void f(String[] a) { System.out.println(\"}\"); }\n}\n")]
#[case(4, "def f(x):\n    if x:\n        return [1, (2, 3)]\n    return {}\n")]
#[case(1, "")]
#[case(4, "")]
fn well_formed_sources_are_clean(#[case] language_id: i32, #[case] source: &str) {
    assert!(summary(source, language_id).is_empty());
}

#[rstest]
#[case(1, "/* ( */ int a; // {\n")]
#[case(2, "auto s = \"{[(\"; char c = '}';\n")]
#[case(3, "String s = \"\\\"(\"; /* ] */\n")]
#[case(4, "s = '(' + \"[\"  # {\nt = \"\"\"\n)\n\"\"\"\n")]
fn delimiters_in_literals_and_comments_are_ignored(
    #[case] language_id: i32,
    #[case] source: &str,
) {
    assert!(summary(source, language_id).is_empty());
}

#[rstest]
#[case(1, "int a; /* open", DiagnosticKind::UnterminatedComment)]
#[case(3, "char c = 'x;", DiagnosticKind::UnterminatedLiteral)]
#[case(4, "x = '''never", DiagnosticKind::UnterminatedLiteral)]
#[case(2, "}", DiagnosticKind::UnexpectedClosingDelimiter)]
fn single_defect_kinds(
    #[case] language_id: i32,
    #[case] source: &str,
    #[case] expected: DiagnosticKind,
) {
    let found = summary(source, language_id);
    assert_eq!(found.len(), 1, "{found:?}");
    assert!(found.iter().all(|(_, _, kind)| *kind == expected));
}

#[test]
fn multiple_defects_are_all_reported() {
    use DiagnosticKind::*;
    assert_eq!(
        summary("int a = (1;\nint b = 2];\nchar *s = \"x;\n", 1),
        [
            (1, 9, UnbalancedDelimiter),
            (2, 10, UnexpectedClosingDelimiter),
            (3, 11, UnterminatedLiteral),
        ]
    );
}

#[test]
fn hash_comment_is_not_a_comment_in_c() {
    assert_eq!(
        summary("#define X (\n", 1),
        [(1, 11, DiagnosticKind::UnbalancedDelimiter)]
    );
}

#[rstest]
#[case(1, "// note \\\n ( still comment\nint a;\n")]
#[case(2, "// a \\\r\n ]\nint b;\n")]
#[case(2, "long n = 1'000'000;\n")]
#[case(1, "int m = 0x7F'FF;\n")]
#[case(2, "const char *s = R\"(a\"b)\";\n")]
#[case(2, "auto j = R\"json({\"k\": [1, 2]})json\";\n")]
fn c_family_lexical_forms_are_clean(#[case] language_id: i32, #[case] source: &str) {
    assert!(summary(source, language_id).is_empty());
}

#[test]
fn java_text_blocks_read_as_unclosed_strings() {
    use DiagnosticKind::*;
    assert_eq!(
        summary("String s = \"\"\"\n  a\n  \"\"\";\n", 3),
        [(1, 14, UnterminatedLiteral), (3, 5, UnterminatedLiteral)]
    );
}

#[test]
fn stray_continuation_bytes_occupy_columns() {
    let found: Vec<_> = scan(b"\x80\x80(", 1)
        .expect("known language")
        .iter()
        .map(|d| (d.line(), d.column(), d.kind()))
        .collect();
    assert_eq!(found, [(1, 3, DiagnosticKind::UnbalancedDelimiter)]);
}

// =============================================================================
// Dispatcher Contract Tests
// =============================================================================

#[rstest]
#[case(0)]
#[case(5)]
#[case(i32::MIN)]
#[case(i32::MAX)]
fn unknown_language_is_an_error_not_a_clean_scan(#[case] id: i32) {
    assert_eq!(
        scan(b"}", id),
        Err(ScanError::UnknownLanguage { id })
    );
}

#[test]
fn repeated_scans_are_identical() {
    let source = b"def f():\n    x = (1,\n  y = '\n";
    let first = scan(source, 4).expect("scan");
    let second = scan(source, 4).expect("scan");
    assert_eq!(first, second);
}

#[test]
fn results_are_sorted_by_position() {
    let buffer = scan(b"} (\n] \"x\n{", 2).expect("scan");
    let positions: Vec<SourcePosition> = buffer.iter().map(|d| d.position()).collect();
    let mut sorted = positions.clone();
    sorted.sort();
    assert_eq!(positions, sorted);
    assert!(positions.len() >= 4);
}

#[test]
fn buffer_capacity_grows_past_default() {
    let source = "(".repeat(20);
    let buffer = scan(source.as_bytes(), 1).expect("scan");
    assert_eq!(buffer.len(), 20);
    assert!(buffer.capacity() >= buffer.len());
}

#[test]
fn concurrent_scans_do_not_interfere() {
    let scanner = Scanner::new();
    let inputs: [(&[u8], i32, usize); 4] = [
        (b"int main() { printf(\"hello); }", 1, 3),
        (b"if (1 { return 0; }", 2, 1),
        (b"class A {}", 3, 0),
        (b"if x:\n    a = 1\n   b = 2\n", 4, 1),
    ];

    thread::scope(|scope| {
        for (text, id, expected) in inputs {
            let scanner = &scanner;
            scope.spawn(move || {
                for _ in 0..50 {
                    let buffer = scanner.scan(text, id).expect("scan");
                    assert_eq!(buffer.len(), expected);
                }
            });
        }
    });
}

#[test]
fn tab_width_option_is_applied() {
    let scanner = Scanner::with_options(ScanOptions { tab_width: 4 }).expect("width");
    let found = scanner.scan_language(b"if x:\n\ta\n    b\n", SupportedLanguage::Python);
    assert_eq!(found.len(), 1);
    let diagnostic = found.as_slice().first().expect("diagnostic");
    assert_eq!(diagnostic.kind(), DiagnosticKind::InconsistentIndentation);
}

// =============================================================================
// File Checker Tests
// =============================================================================

#[rstest]
#[case("main.c", "int main() {}", true)]
#[case("main.c", "int main() {", false)]
#[case("lib.hpp", "struct S { int a[2]; };", true)]
#[case("App.java", "class App { void f( }", false)]
#[case("tool.py", "def f():\n    return 1\n", true)]
#[case("tool.py", "def f():\n    x = 1\n  return x\n", false)]
fn file_checker_detects_language(#[case] path: &str, #[case] source: &str, #[case] clean: bool) {
    let failures = FileChecker::new()
        .check_file(Path::new(path), source.as_bytes())
        .expect("supported extension");
    assert_eq!(failures.is_empty(), clean, "{failures:?}");
}
