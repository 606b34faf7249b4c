use relnarrow_core::{Reflection, Type};

use crate::synth::ClosureVariant;
use crate::test_utils::{blog, class};
use crate::walk::Walk;

fn builder_type(models: &[&str]) -> String {
    let project = blog();
    let extension = project.extension().unwrap();
    let models = models.iter().map(|name| class(&project, name));
    let ty = extension.synthesizer().builder_type(models);
    extension.describe(&ty)
}

#[test]
fn custom_builder_is_not_parameterized() {
    assert_eq!(builder_type(&["Post"]), "PostBuilder");
}

#[test]
fn models_sharing_the_base_builder_are_unioned() {
    assert_eq!(builder_type(&["User"]), "Builder<User>");
    assert_eq!(builder_type(&["Video", "User"]), "Builder<User|Video>");
}

#[test]
fn distinct_builders_are_kept_apart() {
    assert_eq!(builder_type(&["Post", "Video"]), "Builder<Video>|PostBuilder");
    assert_eq!(
        builder_type(&["Comment", "Post", "User", "Tag"]),
        "Builder<Tag|User>|CommentBuilder|PostBuilder"
    );
}

#[test]
fn duplicate_models_collapse() {
    assert_eq!(builder_type(&["Post", "Post"]), "PostBuilder");
    assert_eq!(builder_type(&["User", "User"]), "Builder<User>");
}

#[test]
fn fallback_contributes_declared_type() {
    assert_eq!(builder_type(&["Image"]), "ImageBuilder|VideoBuilder");
    assert_eq!(builder_type(&["Image", "Post"]), "ImageBuilder|PostBuilder|VideoBuilder");
}

#[test]
fn no_models_is_never() {
    assert_eq!(builder_type(&[]), "never");
}

#[test]
fn closure_requires_a_reached_model() {
    let project = blog();
    let extension = project.extension().unwrap();
    let mut walk = Walk::default();
    walk.relations.insert(Type::object(class(&project, "HasMany")));

    let mut synth = extension.synthesizer();
    assert_eq!(synth.closure_type(ClosureVariant::Narrow, &walk, "query"), None);
    assert_eq!(synth.closure_type(ClosureVariant::WithRelation, &walk, "query"), None);
}

#[test]
fn closure_variants() {
    let project = blog();
    let extension = project.extension().unwrap();
    let post = class(&project, "Post");
    let user = class(&project, "User");

    let mut walk = Walk::default();
    walk.relations.insert(Type::generic(
        class(&project, "BelongsTo"),
        vec![Type::object(user), Type::object(post)],
    ));
    walk.models.insert(user);

    let mut synth = extension.synthesizer();
    let narrow = synth.closure_type(ClosureVariant::Narrow, &walk, "query").unwrap();
    let combined = synth
        .closure_type(ClosureVariant::WithRelation, &walk, "query")
        .unwrap();

    insta::assert_snapshot!(extension.describe(&narrow), @"Closure(Builder<User>): mixed");
    insta::assert_snapshot!(
        extension.describe(&combined),
        @"Closure(BelongsTo<User, Post>|Builder<User>): mixed"
    );

    let Type::Closure(sig) = combined else {
        panic!("expected a closure");
    };
    assert_eq!(sig.params.len(), 1);
    let param = &sig.params[0];
    assert_eq!(param.name, "query");
    assert!(!param.optional && !param.variadic && !param.by_reference);
    assert_eq!(sig.return_type, Type::Mixed);
    assert_eq!(
        extension.reflection().template_type(
            &param.ty,
            class(&project, "Relation"),
            "TDeclaringModel"
        ),
        Some(Type::object(post))
    );
}
