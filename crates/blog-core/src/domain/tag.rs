use super::AggregateRoot;
use super::value_objects::{CreationTimestamp, Identifier, TagColor, TagName, TagSlug};

/// Tag entity. Slug uniqueness is enforced by storage, not here.
#[derive(Debug, Clone)]
pub struct Tag {
    id: Identifier,
    name: TagName,
    slug: TagSlug,
    color: TagColor,
    created_at: CreationTimestamp,
}

impl Tag {
    pub fn create(name: TagName, slug: TagSlug, color: TagColor) -> Self {
        Self {
            id: Identifier::generate(),
            name,
            slug,
            color,
            created_at: CreationTimestamp::now(),
        }
    }

    /// Rebuild a tag from stored, already-validated parts.
    pub fn reconstitute(
        id: Identifier,
        name: TagName,
        slug: TagSlug,
        color: TagColor,
        created_at: CreationTimestamp,
    ) -> Self {
        Self {
            id,
            name,
            slug,
            color,
            created_at,
        }
    }

    /// Replace name, slug and color together.
    pub fn update_properties(&mut self, name: TagName, slug: TagSlug, color: TagColor) {
        self.name = name;
        self.slug = slug;
        self.color = color;
    }

    pub fn name(&self) -> &TagName {
        &self.name
    }

    pub fn slug(&self) -> &TagSlug {
        &self.slug
    }

    pub fn color(&self) -> &TagColor {
        &self.color
    }

    pub fn created_at(&self) -> CreationTimestamp {
        self.created_at
    }
}

impl AggregateRoot for Tag {
    const NAME: &'static str = "Tag";

    fn id(&self) -> Identifier {
        self.id
    }
}
