use super::*;

fn span() -> Span {
    Span::at("main.bcc", 1, 1, 1)
}

#[test]
fn test_lookup_in_root() {
    let mut env = Environment::new();
    let root = env.root();
    env.declare(root, Declaration::variable(span(), "x", Type::int(true, 32)))
        .unwrap();

    let found = env.find_declaration_by_name(root, "x").unwrap();
    assert_eq!(found.as_variable(), Some(&Type::int(true, 32)));
    assert!(env.find_declaration_by_name(root, "y").is_none());
}

#[test]
fn test_child_scope_sees_parent() {
    let mut env = Environment::new();
    let root = env.root();
    env.declare(root, Declaration::variable(span(), "x", Type::int(true, 32)))
        .unwrap();

    let child = env.child(root).unwrap();
    env.declare(child, Declaration::variable(span(), "y", Type::secondary("bool")))
        .unwrap();

    assert!(env.find_declaration_by_name(child, "x").is_some());
    assert!(env.find_declaration_by_name(child, "y").is_some());
    assert!(env.find_declaration_by_name(root, "y").is_none());
    assert_eq!(env.parent(child), Some(root));
    assert_eq!(env.parent(root), None);
    assert_eq!(env.scope_count(), 2);
}

#[test]
fn test_inner_declaration_wins() {
    let mut env = Environment::new();
    let root = env.root();
    env.declare(root, Declaration::variable(span(), "x", Type::int(true, 32)))
        .unwrap();
    let child = env.child(root).unwrap();
    env.declare(child, Declaration::variable(span(), "x", Type::secondary("bool")))
        .unwrap();

    let found = env.find_declaration_by_name(child, "x").unwrap();
    assert_eq!(found.as_variable(), Some(&Type::secondary("bool")));
    assert!(env.shadows(child, "x").is_some());
    assert!(env.shadows(root, "x").is_none());
}

#[test]
fn test_duplicate_in_same_scope() {
    let mut env = Environment::new();
    let root = env.root();
    env.declare(root, Declaration::variable(span(), "x", Type::int(true, 32)))
        .unwrap();

    let err = env
        .declare(
            root,
            Declaration::type_name(Span::at("main.bcc", 2, 1, 1), "x", Type::secondary("x")),
        )
        .unwrap_err();
    assert_eq!(
        err,
        ScopeError::Duplicate {
            name: "x".into(),
            span: Span::at("main.bcc", 2, 1, 1),
            previous: span(),
        }
    );
    assert_eq!(err.to_string(), "`x` is already declared in this scope");
}

#[test]
fn test_unknown_scope() {
    let mut env = Environment::new();
    let missing = ScopeId(7);

    assert!(!env.contains(missing));
    assert_eq!(env.child(missing), Err(ScopeError::UnknownScope(missing)));
    assert_eq!(
        env.declare(missing, Declaration::variable(span(), "x", Type::int(true, 32))),
        Err(ScopeError::UnknownScope(missing))
    );
    assert!(env.find_declaration_by_name(missing, "x").is_none());
    assert_eq!(
        ScopeError::UnknownScope(missing).to_string(),
        "scope #7 does not exist"
    );
}

#[test]
fn test_query_tokens_are_not_declarable() {
    let mut env = Environment::new();
    let root = env.root();
    let err = env.declare(root, Declaration::query(span(), "x")).unwrap_err();
    assert_eq!(err, ScopeError::QueryDeclaration("x".to_string()));
}

#[test]
fn test_as_variable_rejects_other_kinds() {
    let ty = Declaration::type_name(span(), "Point", Type::secondary("Point"));
    assert_eq!(ty.as_variable(), None);
    assert_eq!(ty.kind_name(), "type name");

    let query = Declaration::query(span(), "x");
    assert!(query.is_query());
    assert_eq!(query.as_variable(), None);
}

#[test]
fn test_declaration_json() {
    let json = r#"{"name":"f","kind":"variable","ty":{"type":"Secondary","name":"i32"}}"#;
    let decl: Declaration = serde_json::from_str(json).unwrap();
    assert_eq!(decl.name, "f");
    assert_eq!(decl.as_variable(), Some(&Type::int(true, 32)));
    assert_eq!(decl.span, Span::default());
}
