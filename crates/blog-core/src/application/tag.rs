use std::sync::Arc;

use async_trait::async_trait;

use super::{Handler, TagView, load};
use crate::domain::{AggregateRoot, Identifier, Tag, TagColor, TagName, TagSlug};
use crate::error::DomainResult;
use crate::ports::TagRepository;

/// Resolve name/slug/color input into value objects.
///
/// A missing slug is derived from the name; a missing color falls back to the
/// default preset. Colors may be given as a preset name or a hex code.
fn tag_properties(
    name: &str,
    slug: Option<&str>,
    color: Option<&str>,
) -> DomainResult<(TagName, TagSlug, TagColor)> {
    let name = TagName::from_string(name)?;
    let slug = match slug {
        Some(slug) => TagSlug::from_string(slug)?,
        None => TagSlug::from_name(name.as_str())?,
    };
    let color = match color {
        Some(color) => match TagColor::preset(color) {
            Some(preset) => preset,
            None => TagColor::from_string(color)?,
        },
        None => TagColor::default(),
    };
    Ok((name, slug, color))
}

#[derive(Debug, Clone)]
pub struct CreateTag {
    pub name: String,
    pub slug: Option<String>,
    pub color: Option<String>,
}

pub struct CreateTagHandler {
    tags: Arc<dyn TagRepository>,
}

impl CreateTagHandler {
    pub fn new(tags: Arc<dyn TagRepository>) -> Self {
        Self { tags }
    }
}

#[async_trait]
impl Handler<CreateTag> for CreateTagHandler {
    type Output = Identifier;

    async fn handle(&self, input: CreateTag) -> DomainResult<Identifier> {
        let (name, slug, color) =
            tag_properties(&input.name, input.slug.as_deref(), input.color.as_deref())?;

        let tag = Tag::create(name, slug, color);
        self.tags.save(&tag).await?;

        tracing::info!(tag_id = %tag.id(), slug = %tag.slug(), "Tag created");
        Ok(tag.id())
    }
}

#[derive(Debug, Clone)]
pub struct UpdateTag {
    pub tag_id: String,
    pub name: String,
    pub slug: Option<String>,
    pub color: Option<String>,
}

pub struct UpdateTagHandler {
    tags: Arc<dyn TagRepository>,
}

impl UpdateTagHandler {
    pub fn new(tags: Arc<dyn TagRepository>) -> Self {
        Self { tags }
    }
}

#[async_trait]
impl Handler<UpdateTag> for UpdateTagHandler {
    type Output = ();

    async fn handle(&self, input: UpdateTag) -> DomainResult<()> {
        let tag_id = Identifier::parse(&input.tag_id)?;
        let (name, slug, color) =
            tag_properties(&input.name, input.slug.as_deref(), input.color.as_deref())?;

        let mut tag: Tag = load(self.tags.as_ref(), tag_id).await?;
        tag.update_properties(name, slug, color);
        self.tags.save(&tag).await?;

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct DeleteTag {
    pub tag_id: String,
}

pub struct DeleteTagHandler {
    tags: Arc<dyn TagRepository>,
}

impl DeleteTagHandler {
    pub fn new(tags: Arc<dyn TagRepository>) -> Self {
        Self { tags }
    }
}

#[async_trait]
impl Handler<DeleteTag> for DeleteTagHandler {
    type Output = ();

    async fn handle(&self, input: DeleteTag) -> DomainResult<()> {
        let tag_id = Identifier::parse(&input.tag_id)?;

        let tag: Tag = load(self.tags.as_ref(), tag_id).await?;
        self.tags.delete(&tag).await?;

        tracing::info!(tag_id = %tag_id, "Tag deleted");
        Ok(())
    }
}

/// Look a tag up by its slug.
#[derive(Debug, Clone)]
pub struct GetTag {
    pub slug: String,
}

pub struct GetTagHandler {
    tags: Arc<dyn TagRepository>,
}

impl GetTagHandler {
    pub fn new(tags: Arc<dyn TagRepository>) -> Self {
        Self { tags }
    }
}

#[async_trait]
impl Handler<GetTag> for GetTagHandler {
    type Output = Option<TagView>;

    async fn handle(&self, input: GetTag) -> DomainResult<Option<TagView>> {
        let slug = TagSlug::from_string(&input.slug)?;
        let tag = self.tags.find_by_slug(&slug).await?;
        Ok(tag.as_ref().map(TagView::from))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListTags;

pub struct ListTagsHandler {
    tags: Arc<dyn TagRepository>,
}

impl ListTagsHandler {
    pub fn new(tags: Arc<dyn TagRepository>) -> Self {
        Self { tags }
    }
}

#[async_trait]
impl Handler<ListTags> for ListTagsHandler {
    type Output = Vec<TagView>;

    async fn handle(&self, _input: ListTags) -> DomainResult<Vec<TagView>> {
        let tags = self.tags.find_all().await?;
        Ok(tags.iter().map(TagView::from).collect())
    }
}
