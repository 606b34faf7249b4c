//! Shared fixtures.

use indoc::indoc;
use relnarrow_core::{ClassId, Type};

use crate::Project;

/// A small blog domain.
///
/// - `Post`, `Comment` have custom builders; `User`, `Video`, `Tag` use the
///   base one inherited from `Model::query`.
/// - `Comment::commentable` and `Tag::taggable` are polymorphic.
/// - `Image::query` returns a union of builders.
/// - `Gallery::query` is annotation-only, so the native one applies.
pub const BLOG: &str = indoc! {r#"
    {
        "classes": [
            {
                "name": "Model",
                "methods": {
                    "query": { "static": true, "returns": "Builder<static>" }
                }
            },
            {
                "name": "Builder",
                "templates": ["TModel"],
                "methods": {
                    "where": { "returns": "$this" },
                    "whereHas": { "returns": "$this" },
                    "orWhereHas": { "returns": "$this" },
                    "whereDoesntHave": { "returns": "$this" },
                    "withWhereHas": { "returns": "$this" }
                }
            },
            { "name": "Relation", "templates": ["TRelatedModel", "TDeclaringModel"] },
            {
                "name": "BelongsTo",
                "templates": ["TRelatedModel", "TDeclaringModel"],
                "extends": "Relation<TRelatedModel, TDeclaringModel>"
            },
            {
                "name": "HasMany",
                "templates": ["TRelatedModel", "TDeclaringModel"],
                "extends": "Relation<TRelatedModel, TDeclaringModel>"
            },
            {
                "name": "MorphTo",
                "templates": ["TRelatedModel", "TDeclaringModel"],
                "extends": "BelongsTo<TRelatedModel, TDeclaringModel>"
            },
            {
                "name": "User",
                "extends": "Model",
                "methods": {
                    "posts": { "returns": "HasMany<Post, $this>" },
                    "comments": { "returns": "HasMany<Comment, $this>" },
                    "galleries": { "returns": "HasMany<Gallery, $this>" },
                    "fullName": { "returns": "string" }
                }
            },
            { "name": "Admin", "extends": "Model" },
            {
                "name": "Post",
                "extends": "Model",
                "methods": {
                    "user": { "returns": "BelongsTo<User, $this>" },
                    "comments": { "returns": "HasMany<Comment, $this>" },
                    "query": { "static": true, "returns": "PostBuilder" }
                }
            },
            { "name": "PostBuilder", "extends": "Builder<Post>" },
            {
                "name": "Comment",
                "extends": "Model",
                "methods": {
                    "post": { "returns": "BelongsTo<Post, $this>" },
                    "commentable": { "returns": "MorphTo<Post|Video, $this>" },
                    "query": { "static": true, "returns": "CommentBuilder" }
                }
            },
            { "name": "CommentBuilder", "extends": "Builder<Comment>" },
            {
                "name": "Video",
                "extends": "Model",
                "methods": {
                    "comments": { "returns": "HasMany<Comment, $this>" }
                }
            },
            {
                "name": "Tag",
                "extends": "Model",
                "methods": {
                    "taggable": { "returns": "MorphTo<User|Video, $this>" }
                }
            },
            {
                "name": "Gallery",
                "extends": "Model",
                "methods": {
                    "images": { "returns": "HasMany<Image, $this>" },
                    "query": { "static": true, "magic": true, "returns": "GalleryBuilder" }
                }
            },
            { "name": "GalleryBuilder", "extends": "Builder<Gallery>" },
            {
                "name": "Image",
                "extends": "Model",
                "methods": {
                    "query": { "static": true, "returns": "ImageBuilder|VideoBuilder" }
                }
            },
            { "name": "ImageBuilder", "extends": "Builder<Image>" },
            { "name": "VideoBuilder", "extends": "Builder<Video>" }
        ]
    }
"#};

pub fn blog() -> Project {
    Project::from_json(BLOG).unwrap()
}

pub fn class(project: &Project, name: &str) -> ClassId {
    project
        .class(name)
        .unwrap_or_else(|| panic!("class `{name}` is not in the fixture"))
}

pub fn object(project: &Project, name: &str) -> Type {
    Type::object(class(project, name))
}

/// `Builder<Model1|Model2...>`
pub fn builder_of(project: &Project, models: &[&str]) -> Type {
    let models = models.iter().map(|m| object(project, m));
    Type::generic(class(project, "Builder"), vec![Type::union(models)])
}
