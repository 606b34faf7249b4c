use indoc::indoc;

use crate::{ClassTable, DeclError, Reflection, Type};

const ORM: &str = indoc! {r#"
    [
        {
            "name": "Model",
            "methods": {
                "query": { "static": true, "returns": "Builder<static>" }
            }
        },
        { "name": "Builder", "templates": ["TModel"] },
        { "name": "Relation", "templates": ["TRelatedModel", "TDeclaringModel"] },
        {
            "name": "HasMany",
            "templates": ["TRelatedModel", "TDeclaringModel"],
            "extends": "Relation<TRelatedModel, TDeclaringModel>"
        },
        {
            "name": "User",
            "extends": "Model",
            "implements": ["Authenticatable"],
            "methods": {
                "posts": { "returns": "HasMany<Post, $this>" },
                "query": { "static": true, "magic": true, "returns": "UserBuilder" }
            }
        },
        {
            "name": "Post",
            "extends": "Model",
            "methods": {
                "query": { "static": true, "returns": "PostBuilder" }
            }
        },
        { "name": "PostBuilder", "extends": "Builder<Post>" },
        { "name": "UserBuilder", "extends": "Builder<User>" },
        { "name": "Authenticatable" }
    ]
"#};

fn table() -> ClassTable {
    ClassTable::from_json(ORM).unwrap()
}

fn id(table: &ClassTable, name: &str) -> crate::ClassId {
    table.class_by_name(name).unwrap()
}

#[test]
fn classes_keep_declaration_order() {
    let table = table();
    let names: Vec<_> = table.iter().map(|c| table.class_name(c)).collect();
    assert_eq!(
        names,
        vec![
            "Model",
            "Builder",
            "Relation",
            "HasMany",
            "User",
            "Post",
            "PostBuilder",
            "UserBuilder",
            "Authenticatable",
        ]
    );
}

#[test]
fn leading_namespace_separator_is_ignored_in_lookup() {
    let table = table();
    assert_eq!(table.class_by_name("\\User"), table.class_by_name("User"));
    assert!(table.class_by_name("Missing").is_none());
}

#[test]
fn subclass_relation_is_reflexive_and_transitive() {
    let table = table();
    let user = id(&table, "User");
    let model = id(&table, "Model");

    assert!(table.is_subclass_of(user, user));
    assert!(table.is_subclass_of(user, model));
    assert!(table.is_subclass_of(user, id(&table, "Authenticatable")));
    assert!(!table.is_subclass_of(model, user));
}

#[test]
fn this_binds_to_the_called_class() {
    let table = table();
    let ty = table.method_return_type(id(&table, "User"), "posts").unwrap();
    assert_eq!(table.describe(&ty), "HasMany<Post, User>");
}

#[test]
fn static_binds_through_inheritance() {
    let table = table();
    let ty = table
        .native_method_return_type(id(&table, "Model"), "query")
        .unwrap();
    assert_eq!(table.describe(&ty), "Builder<Model>");
}

#[test]
fn magic_methods_are_visible_but_not_native() {
    let table = table();
    let user = id(&table, "User");

    let declared = table.method_return_type(user, "query").unwrap();
    assert_eq!(table.describe(&declared), "UserBuilder");

    let native = table.native_method_return_type(user, "query").unwrap();
    assert_eq!(table.describe(&native), "Builder<User>");
}

#[test]
fn own_method_shadows_inherited() {
    let table = table();
    let ty = table
        .native_method_return_type(id(&table, "Post"), "query")
        .unwrap();
    assert_eq!(table.describe(&ty), "PostBuilder");
}

#[test]
fn static_lookup_skips_instance_methods() {
    let table = ClassTable::from_json(indoc! {r#"
        [
            {
                "name": "Model",
                "methods": { "query": { "static": true, "returns": "static" } }
            },
            {
                "name": "Post",
                "extends": "Model",
                "methods": { "query": { "returns": "string" } }
            }
        ]
    "#})
    .unwrap();
    let post = id(&table, "Post");

    let native = table.native_method_return_type(post, "query").unwrap();
    assert_eq!(table.describe(&native), "string");

    let factory = table.native_static_method_return_type(post, "query").unwrap();
    assert_eq!(table.describe(&factory), "Post");

    assert_eq!(table.native_static_method_return_type(post, "posts"), None);
}

#[test]
fn magic_static_methods_are_not_native() {
    let table = table();
    let factory = table
        .native_static_method_return_type(id(&table, "User"), "query")
        .unwrap();
    assert_eq!(table.describe(&factory), "Builder<User>");
}

#[test]
fn has_method_sees_inherited_methods() {
    let table = table();
    assert!(table.has_method(id(&table, "Post"), "query"));
    assert!(!table.has_method(id(&table, "Post"), "posts"));
    assert!(table.method_return_type(id(&table, "Post"), "posts").is_none());
}

#[test]
fn template_type_follows_parent_arguments() {
    let table = table();
    let relation = id(&table, "Relation");
    let ty = table.method_return_type(id(&table, "User"), "posts").unwrap();

    let related = table.template_type(&ty, relation, "TRelatedModel").unwrap();
    assert_eq!(related, Type::object(id(&table, "Post")));

    let declaring = table.template_type(&ty, relation, "TDeclaringModel").unwrap();
    assert_eq!(declaring, Type::object(id(&table, "User")));

    assert!(table.template_type(&ty, relation, "TMissing").is_none());
}

#[test]
fn template_type_through_custom_builder() {
    let table = table();
    let builder = id(&table, "Builder");
    let ty = Type::object(id(&table, "PostBuilder"));

    let model = table.template_type(&ty, builder, "TModel").unwrap();
    assert_eq!(table.describe(&model), "Post");
}

#[test]
fn template_type_of_union_is_member_wise() {
    let table = table();
    let builder = id(&table, "Builder");
    let ty = Type::union([
        Type::object(id(&table, "PostBuilder")),
        Type::object(id(&table, "UserBuilder")),
        Type::Null,
    ]);

    let model = table.template_type(&ty, builder, "TModel").unwrap();
    assert_eq!(table.describe(&model), "Post|User");
}

#[test]
fn raw_generic_widens_to_mixed() {
    let table = table();
    let builder = id(&table, "Builder");
    let ty = Type::object(builder);

    assert_eq!(table.template_type(&ty, builder, "TModel"), Some(Type::Mixed));
}

#[test]
fn subtype_checks_every_member() {
    let table = table();
    let model = id(&table, "Model");
    let user = Type::object(id(&table, "User"));
    let post = Type::object(id(&table, "Post"));

    assert!(table.is_subtype_of(&Type::union([user.clone(), post]), model));
    assert!(!table.is_subtype_of(&Type::union([user, Type::Null]), model));
    assert!(!table.is_subtype_of(&Type::Mixed, model));
    assert!(!table.is_subtype_of(&Type::Never, model));
}

#[test]
fn resolve_type_has_no_static_context() {
    let table = table();
    let ty = table.resolve_type("Builder<User|Post>|'posts'").unwrap();
    assert_eq!(table.describe(&ty), "'posts'|Builder<Post|User>");

    assert_eq!(table.resolve_type("static").unwrap(), Type::Mixed);
}

#[test]
fn generic_flags() {
    let table = table();
    assert!(table.is_generic(id(&table, "Builder")));
    assert!(!table.is_generic(id(&table, "PostBuilder")));
    assert_eq!(
        table.templates(id(&table, "HasMany")),
        ["TRelatedModel", "TDeclaringModel"]
    );
}

#[test]
fn duplicate_class_is_rejected() {
    let err = ClassTable::from_json(r#"[{ "name": "User" }, { "name": "User" }]"#).unwrap_err();
    assert_eq!(err, DeclError::DuplicateClass("User".to_string()));
}

#[test]
fn unknown_class_is_rejected() {
    let json = indoc! {r#"
        [{ "name": "User", "methods": { "posts": { "returns": "HasMany<Post, $this>" } } }]
    "#};
    let err = ClassTable::from_json(json).unwrap_err();
    assert_eq!(err.to_string(), "`User::posts` refers to undeclared class `HasMany`");
}

#[test]
fn arity_mismatch_is_rejected() {
    let json = indoc! {r#"
        [
            { "name": "Builder", "templates": ["TModel"] },
            { "name": "User", "methods": { "query": { "returns": "Builder<User, User>" } } }
        ]
    "#};
    let err = ClassTable::from_json(json).unwrap_err();
    assert_eq!(
        err.to_string(),
        "`User::query` gives `Builder` 2 type arguments, expected 1"
    );
}

#[test]
fn template_parent_is_rejected() {
    let json = r#"[{ "name": "Box", "templates": ["T"], "extends": "T" }]"#;
    let err = ClassTable::from_json(json).unwrap_err();
    assert_eq!(
        err,
        DeclError::InvalidParent {
            class: "Box".to_string(),
            sig: "T".to_string(),
        }
    );
}

#[test]
fn inheritance_cycle_is_rejected() {
    let json = indoc! {r#"
        [
            { "name": "A", "extends": "C" },
            { "name": "B", "extends": "A" },
            { "name": "C", "extends": "B" }
        ]
    "#};
    let err = ClassTable::from_json(json).unwrap_err();
    assert_eq!(err, DeclError::InheritanceCycle("A".to_string()));
}

#[test]
fn invalid_signature_is_rejected() {
    let json = r#"[{ "name": "User", "methods": { "posts": { "returns": "HasMany<" } } }]"#;
    let err = ClassTable::from_json(json).unwrap_err();
    insta::assert_snapshot!(err, @"invalid type `HasMany<` in `User::posts`: expected type, got EOF at 8..8");
}

#[test]
fn malformed_json_is_rejected() {
    let err = ClassTable::from_json("{").unwrap_err();
    assert!(matches!(err, DeclError::Json(_)));
}
