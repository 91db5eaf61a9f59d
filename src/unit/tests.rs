use super::*;
use pretty_assertions::assert_eq;

const UNIT: &str = r#"{
    "file": "main.bcc",
    "declarations": [
        { "name": "x", "kind": "variable", "ty": { "type": "Secondary", "name": "i32" } },
        { "name": "Point", "kind": "type_name", "ty": { "type": "Secondary", "name": "Point" } },
        {
            "name": "f",
            "kind": "variable",
            "ty": {
                "type": "Lambda",
                "params": [{ "type": "Secondary", "name": "i32" }],
                "ret": { "type": "Secondary", "name": "bool" }
            }
        }
    ],
    "scopes": [
        {
            "parent": 0,
            "declarations": [
                { "name": "y", "kind": "variable", "ty": { "type": "Secondary", "name": "u8" } }
            ]
        }
    ],
    "expressions": [
        { "expr": { "type": "Variable", "name": "x" } },
        { "scope": 1, "expr": { "type": "Variable", "name": "y" } },
        { "expr": { "type": "Variable", "name": "y" } },
        {
            "scope": 1,
            "expr": {
                "type": "Call",
                "receiver": { "type": "Variable", "name": "f" },
                "args": [{ "type": "Variable", "name": "y" }]
            }
        }
    ]
}"#;

fn build(json: &str) -> Result<BoundUnit, UnitError> {
    CompilationUnit::parse(json, Path::new("unit.json"))?.build()
}

#[test]
fn test_parse_unit() {
    let unit = CompilationUnit::parse(UNIT, Path::new("unit.json")).unwrap();
    assert_eq!(unit.file, PathBuf::from("main.bcc"));
    assert_eq!(unit.declarations.len(), 3);
    assert_eq!(unit.scopes.len(), 1);
    assert_eq!(unit.expressions.len(), 4);
    assert_eq!(unit.expressions[0].scope, 0);
}

#[test]
fn test_parse_falls_back_to_path() {
    let unit = CompilationUnit::parse("{}", Path::new("empty.json")).unwrap();
    assert_eq!(unit.file, PathBuf::from("empty.json"));
    assert!(unit.expressions.is_empty());
}

#[test]
fn test_malformed_unit() {
    let err = CompilationUnit::parse("{ \"expressions\": 3 }", Path::new("bad.json")).unwrap_err();
    assert!(matches!(err, UnitError::Parse(_)));
    assert_eq!(err.code(), error_codes::unit::MALFORMED_UNIT);
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = CompilationUnit::load(&dir.path().join("missing.json")).unwrap_err();
    assert_eq!(err.code(), error_codes::unit::UNREADABLE_UNIT);
}

#[test]
fn test_load_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unit.json");
    std::fs::write(&path, r#"{ "expressions": [] }"#).unwrap();

    let unit = CompilationUnit::load(&path).unwrap();
    assert_eq!(unit.file, path);
}

#[test]
fn test_build_binds_expressions() {
    let unit = build(UNIT).unwrap();
    assert_eq!(unit.env.scope_count(), 2);
    assert_eq!(unit.expressions[0].scope(), Some(ScopeId(0)));
    assert_eq!(unit.expressions[1].scope(), Some(ScopeId(1)));
    assert!(unit.diagnostics.is_empty());
}

#[test]
fn test_check_unit() {
    let unit = build(UNIT).unwrap();
    let report = unit.check(&CheckConfig::default());

    assert_eq!(report.results.len(), 4);
    assert_eq!(report.results[0], Ok(Type::int(true, 32)));
    assert_eq!(report.results[1], Ok(Type::int(false, 8)));
    assert!(report.results[2].is_err());
    assert_eq!(report.results[3], Ok(Type::secondary("bool")));

    assert!(report.has_errors());
    assert_eq!(report.diagnostics.len(), 1);
    // The variable node carries no span, so the unit's file is filled in.
    assert_eq!(report.diagnostics.diagnostics()[0].span.file, PathBuf::from("main.bcc"));
}

#[test]
fn test_check_unit_fail_fast() {
    let unit = build(UNIT).unwrap();
    let report = unit.check(&CheckConfig { fail_fast: true });
    assert_eq!(report.results.len(), 3);
}

#[test]
fn test_dependencies() {
    let unit = build(UNIT).unwrap();
    let names: Vec<Vec<String>> = unit
        .dependencies()
        .into_iter()
        .map(|deps| deps.into_iter().map(|d| d.name).collect())
        .collect();

    assert_eq!(
        names,
        vec![
            vec!["x".to_string()],
            vec!["y".to_string()],
            vec!["y".to_string()],
            vec!["y".to_string()],
        ]
    );
}

#[test]
fn test_shadowing_warns() {
    let unit = build(
        r#"{
        "declarations": [{ "name": "x", "kind": "variable", "ty": { "type": "Secondary", "name": "i32" } }],
        "scopes": [{ "declarations": [{ "name": "x", "kind": "variable", "ty": { "type": "Secondary", "name": "u8" } }] }],
        "expressions": [{ "scope": 1, "expr": { "type": "Variable", "name": "x" } }]
    }"#,
    )
    .unwrap();

    assert_eq!(unit.diagnostics.warning_count(), 1);
    assert_eq!(
        unit.diagnostics.diagnostics()[0].code,
        error_codes::warnings::SHADOWED_BINDING
    );

    // Innermost declaration wins.
    let report = unit.check(&CheckConfig::default());
    assert_eq!(report.results[0], Ok(Type::int(false, 8)));
    assert!(!report.has_errors());
    assert_eq!(report.diagnostics.warning_count(), 1);
}

#[test]
fn test_duplicate_declaration() {
    let err = build(
        r#"{
        "declarations": [
            { "name": "x", "kind": "variable", "ty": { "type": "Secondary", "name": "i32" } },
            { "name": "x", "kind": "type_name", "ty": { "type": "Secondary", "name": "x" } }
        ]
    }"#,
    )
    .unwrap_err();

    assert!(matches!(&err, UnitError::Scope(ScopeError::Duplicate { name, .. }) if name == "x"));
    assert_eq!(err.code(), error_codes::unit::DUPLICATE_DECLARATION);
}

#[test]
fn test_unknown_parent_scope() {
    let err = build(r#"{ "scopes": [{ "parent": 4 }] }"#).unwrap_err();
    assert_eq!(err, UnitError::Scope(ScopeError::UnknownScope(ScopeId(4))));
    assert_eq!(err.code(), error_codes::unit::UNKNOWN_SCOPE);
}

#[test]
fn test_expression_in_unknown_scope() {
    let err = build(r#"{ "expressions": [{ "scope": 2, "expr": { "type": "Variable", "name": "x" } }] }"#)
        .unwrap_err();
    assert_eq!(err, UnitError::Scope(ScopeError::UnknownScope(ScopeId(2))));
}

#[test]
fn test_query_declaration_rejected() {
    let err = build(r#"{ "declarations": [{ "name": "q", "kind": "query" }] }"#).unwrap_err();
    assert!(matches!(err, UnitError::Scope(ScopeError::QueryDeclaration(_))));
    assert_eq!(err.code(), error_codes::unit::QUERY_DECLARATION);
    assert_eq!(
        err.to_diagnostic(Path::new("unit.json")).code,
        error_codes::unit::QUERY_DECLARATION
    );
}

#[test]
fn test_duplicate_diagnostic_without_spans_points_at_file() {
    let err = build(
        r#"{
        "file": "a.bcc",
        "declarations": [
            { "name": "x", "kind": "variable", "ty": { "type": "Secondary", "name": "i32" } },
            { "name": "x", "kind": "variable", "ty": { "type": "Secondary", "name": "i32" } }
        ]
    }"#,
    )
    .unwrap_err();

    let diag = err.to_diagnostic(Path::new("a.json"));
    assert_eq!(diag.span.error_header(), "a.json:1:1");
    assert_eq!(diag.notes[0].span.as_ref().unwrap().error_header(), "a.json:1:1");
}

#[test]
fn test_duplicate_diagnostic_points_at_second_declaration() {
    let err = build(
        r#"{
        "declarations": [
            {
                "span": { "file": "a.bcc", "start_line": 1, "start_col": 5 },
                "name": "x", "kind": "variable", "ty": { "type": "Secondary", "name": "i32" }
            },
            {
                "span": { "file": "a.bcc", "start_line": 3, "start_col": 7 },
                "name": "x", "kind": "type_name", "ty": { "type": "Secondary", "name": "x" }
            }
        ]
    }"#,
    )
    .unwrap_err();

    let diag = err.to_diagnostic(Path::new("a.json"));
    assert_eq!(diag.code, error_codes::unit::DUPLICATE_DECLARATION);
    assert_eq!(diag.span.error_header(), "a.bcc:3:7");
    assert_eq!(diag.notes[0].message, "previous declaration is here");
    assert_eq!(diag.notes[0].span.as_ref().unwrap().error_header(), "a.bcc:1:5");
}

#[test]
fn test_unit_error_diagnostic() {
    let err = UnitError::Parse("expected value".into());
    let diag = err.to_diagnostic(Path::new("bad.json"));
    assert_eq!(diag.code, error_codes::unit::MALFORMED_UNIT);
    assert_eq!(diag.span.file, PathBuf::from("bad.json"));
    assert!(diag.is_error());
}

#[test]
fn test_report_json() {
    let unit = build(UNIT).unwrap();
    let report = unit.check(&CheckConfig::default());
    let json: serde_json::Value = serde_json::from_str(&report.to_json()).unwrap();

    assert_eq!(json["file"], "main.bcc");
    assert_eq!(json["results"][0]["type"], "i32");
    assert_eq!(json["results"][2]["error"], "E1002");
    assert!(json["results"][2].get("type").is_none());
    assert_eq!(json["diagnostics"][0]["code"], "E1002");
}
