use super::*;

#[test]
fn test_diagnostic_json() {
    let diag = Diagnostic::error(types::UNRESOLVED_NAME)
        .message("cannot resolve `x` to a variable declaration")
        .span(Span::new(PathBuf::from("main.bcc"), 10, 11, 1, 10, 1, 11))
        .build();

    let json = diag.to_json();
    assert!(json.contains("E1002"));
    assert!(json.contains("cannot resolve `x`"));
    assert!(json.contains("\"severity\":\"error\""));
}

#[test]
fn test_error_header() {
    let span = Span::at("src/main.bcc", 3, 7, 1);
    assert_eq!(span.error_header(), "src/main.bcc:3:7");
}

#[test]
fn test_span_deserializes_with_missing_fields() {
    let span: Span = serde_json::from_str(r#"{"file":"a.bcc","start_line":2}"#).unwrap();
    assert_eq!(span.file, PathBuf::from("a.bcc"));
    assert_eq!(span.start_line, 2);
    assert_eq!(span.start_col, 0);
}

#[test]
fn test_diagnostic_warning() {
    let diag = Diagnostic::warning(warnings::SHADOWED_BINDING)
        .message("`x` shadows a declaration in an outer scope")
        .build();
    assert!(!diag.is_error());
    assert_eq!(diag.severity, Severity::Warning);
}

#[test]
fn test_diagnostic_human_readable() {
    let diag = Diagnostic::error(types::NOT_CALLABLE)
        .message("the function call receiver should be a lambda, found `i32`")
        .span(Span::at("main.bcc", 1, 1, 3))
        .note(Note::new("only values of a lambda type can be called"))
        .build();

    let output = diag.to_human_readable("foo(1)");
    insta::assert_snapshot!(output, @r###"
    error[E1013]: the function call receiver should be a lambda, found `i32`
      --> main.bcc:1:1
       |
      1 | foo(1)
       | ^^^
       = note: only values of a lambda type can be called
    "###);
}

#[test]
fn test_human_readable_without_source_line() {
    let diag = Diagnostic::error(types::UNRESOLVED_NAME)
        .message("cannot resolve `y` to a variable declaration")
        .span(Span::at("main.bcc", 9, 1, 1))
        .build();

    let output = diag.to_human_readable("only one line");
    assert_eq!(
        output,
        "error[E1002]: cannot resolve `y` to a variable declaration\n  --> main.bcc:9:1\n"
    );
}

#[test]
fn test_diagnostic_bag_operations() {
    let mut bag = DiagnosticBag::new();
    assert!(bag.is_empty());
    assert_eq!(bag.len(), 0);

    bag.push(Diagnostic::error("E1002").message("error").build());
    bag.push(Diagnostic::warning("W0006").message("warning").build());

    assert!(!bag.is_empty());
    assert_eq!(bag.len(), 2);
    assert!(bag.has_errors());
    assert!(bag.has_warnings());
    assert_eq!(bag.error_count(), 1);
    assert_eq!(bag.warning_count(), 1);
}

#[test]
fn test_diagnostic_bag_preserves_order() {
    let mut bag = DiagnosticBag::new();
    bag.push(Diagnostic::error("E1002").message("first").build());
    bag.push(Diagnostic::error("E1013").message("second").build());

    let messages: Vec<_> = bag.take().into_iter().map(|d| d.message).collect();
    assert_eq!(messages, vec!["first", "second"]);
}

#[test]
fn test_diagnostic_bag_merge() {
    let mut bag1 = DiagnosticBag::new();
    bag1.push(Diagnostic::error("E1002").message("err1").build());

    let mut bag2 = DiagnosticBag::new();
    bag2.push(Diagnostic::warning("W0006").message("warn1").build());

    bag1.merge(bag2);
    assert_eq!(bag1.len(), 2);
    assert_eq!(bag1.error_count(), 1);
    assert_eq!(bag1.warning_count(), 1);
}

#[test]
fn test_diagnostic_bag_json() {
    let bag = DiagnosticBag::from(Diagnostic::error("E1900").message("lambda").build());

    let json = bag.to_json();
    assert!(json.starts_with('['));
    assert!(json.contains("E1900"));
}

#[test]
fn test_diagnostic_roundtrips_through_json() {
    let diag = Diagnostic::error(types::UNRESOLVED_NAME)
        .message("cannot resolve `f`")
        .span(Span::at("main.bcc", 2, 4, 1))
        .note(Note::new("`f` is declared as a type name").with_span(Span::at("main.bcc", 1, 6, 1)))
        .build();

    let back: Diagnostic = serde_json::from_str(&diag.to_json()).unwrap();
    pretty_assertions::assert_eq!(back, diag);
}
