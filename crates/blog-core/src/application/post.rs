use std::sync::Arc;

use async_trait::async_trait;

use super::{Handler, PostView, load};
use crate::domain::{AggregateRoot, Identifier, Post, PostContent, PostTitle};
use crate::error::DomainResult;
use crate::ports::{CommentRepository, PostRepository};

#[derive(Debug, Clone)]
pub struct CreatePost {
    pub title: String,
    pub content: String,
    pub author_id: String,
}

pub struct CreatePostHandler {
    posts: Arc<dyn PostRepository>,
}

impl CreatePostHandler {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl Handler<CreatePost> for CreatePostHandler {
    type Output = Identifier;

    async fn handle(&self, input: CreatePost) -> DomainResult<Identifier> {
        let title = PostTitle::from_string(&input.title)?;
        let content = PostContent::from_string(&input.content)?;
        let author_id = Identifier::parse(&input.author_id)?;

        let post = Post::create(title, content, author_id);
        self.posts.save(&post).await?;

        tracing::info!(post_id = %post.id(), author_id = %author_id, "Post created");
        Ok(post.id())
    }
}

#[derive(Debug, Clone)]
pub struct UpdatePostContent {
    pub post_id: String,
    pub title: String,
    pub content: String,
}

pub struct UpdatePostContentHandler {
    posts: Arc<dyn PostRepository>,
}

impl UpdatePostContentHandler {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl Handler<UpdatePostContent> for UpdatePostContentHandler {
    type Output = ();

    async fn handle(&self, input: UpdatePostContent) -> DomainResult<()> {
        let post_id = Identifier::parse(&input.post_id)?;
        let title = PostTitle::from_string(&input.title)?;
        let content = PostContent::from_string(&input.content)?;

        let mut post: Post = load(self.posts.as_ref(), post_id).await?;
        post.update_content(title, content)?;
        self.posts.save(&post).await?;

        tracing::debug!(post_id = %post_id, "Post content updated");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct PublishPost {
    pub post_id: String,
}

pub struct PublishPostHandler {
    posts: Arc<dyn PostRepository>,
}

impl PublishPostHandler {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl Handler<PublishPost> for PublishPostHandler {
    type Output = ();

    async fn handle(&self, input: PublishPost) -> DomainResult<()> {
        let post_id = Identifier::parse(&input.post_id)?;

        let mut post: Post = load(self.posts.as_ref(), post_id).await?;
        post.publish()?;
        self.posts.save(&post).await?;

        tracing::info!(post_id = %post_id, "Post published");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct ArchivePost {
    pub post_id: String,
}

pub struct ArchivePostHandler {
    posts: Arc<dyn PostRepository>,
}

impl ArchivePostHandler {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl Handler<ArchivePost> for ArchivePostHandler {
    type Output = ();

    async fn handle(&self, input: ArchivePost) -> DomainResult<()> {
        let post_id = Identifier::parse(&input.post_id)?;

        let mut post: Post = load(self.posts.as_ref(), post_id).await?;
        post.archive()?;
        self.posts.save(&post).await?;

        tracing::info!(post_id = %post_id, "Post archived");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct DeletePost {
    pub post_id: String,
}

/// Deletes a post together with its comments.
pub struct DeletePostHandler {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl DeletePostHandler {
    pub fn new(posts: Arc<dyn PostRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { posts, comments }
    }
}

#[async_trait]
impl Handler<DeletePost> for DeletePostHandler {
    type Output = ();

    async fn handle(&self, input: DeletePost) -> DomainResult<()> {
        let post_id = Identifier::parse(&input.post_id)?;

        let post: Post = load(self.posts.as_ref(), post_id).await?;
        let comments = self.comments.delete_by_post_id(post_id).await?;
        self.posts.delete(&post).await?;

        tracing::info!(post_id = %post_id, comments, "Post deleted");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct GetPost {
    pub post_id: String,
}

pub struct GetPostHandler {
    posts: Arc<dyn PostRepository>,
}

impl GetPostHandler {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl Handler<GetPost> for GetPostHandler {
    type Output = PostView;

    async fn handle(&self, input: GetPost) -> DomainResult<PostView> {
        let post_id = Identifier::parse(&input.post_id)?;
        let post: Post = load(self.posts.as_ref(), post_id).await?;
        Ok(PostView::from(&post))
    }
}

/// List posts. `author_id` narrows to one author; `published_only` hides
/// drafts and archived posts.
#[derive(Debug, Clone, Default)]
pub struct ListPosts {
    pub published_only: bool,
    pub author_id: Option<String>,
}

pub struct ListPostsHandler {
    posts: Arc<dyn PostRepository>,
}

impl ListPostsHandler {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }
}

#[async_trait]
impl Handler<ListPosts> for ListPostsHandler {
    type Output = Vec<PostView>;

    async fn handle(&self, input: ListPosts) -> DomainResult<Vec<PostView>> {
        let author_id = input
            .author_id
            .as_deref()
            .map(Identifier::parse)
            .transpose()?;

        let posts = match author_id {
            Some(author_id) => self.posts.find_by_author(author_id).await?,
            None if input.published_only => self.posts.find_published().await?,
            None => self.posts.find_all().await?,
        };

        Ok(posts
            .iter()
            .filter(|p| !input.published_only || p.status().is_published())
            .map(PostView::from)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::Store;
    use crate::domain::{Comment, CommentContent, PostStatus};
    use crate::error::DomainError;
    use crate::ports::BaseRepository;

    fn repo() -> Arc<Store<Post>> {
        Arc::new(Store::default())
    }

    fn create_command(author_id: &Identifier) -> CreatePost {
        CreatePost {
            title: "My First Post".to_string(),
            content: "Exactly twenty chars".to_string(),
            author_id: author_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_publish() {
        let store = repo();
        let author = Identifier::generate();

        let id = CreatePostHandler::new(store.clone())
            .handle(create_command(&author))
            .await
            .unwrap();

        let publish = PublishPostHandler::new(store.clone());
        publish
            .handle(PublishPost { post_id: id.to_string() })
            .await
            .unwrap();

        let view = GetPostHandler::new(store.clone())
            .handle(GetPost { post_id: id.to_string() })
            .await
            .unwrap();
        assert_eq!(view.status, PostStatus::Published.as_str());
        assert!(view.published_at.is_some());

        let second = publish.handle(PublishPost { post_id: id.to_string() }).await;
        assert!(matches!(second, Err(DomainError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_storage() {
        let store = repo();
        let result = CreatePostHandler::new(store.clone())
            .handle(CreatePost {
                title: "ab".to_string(),
                content: "Long enough content".to_string(),
                author_id: Identifier::generate().to_string(),
            })
            .await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_post_is_not_found() {
        let store = repo();
        let missing = Identifier::generate();

        let result = ArchivePostHandler::new(store.clone())
            .handle(ArchivePost { post_id: missing.to_string() })
            .await;

        match result {
            Err(DomainError::NotFound { entity_type, id }) => {
                assert_eq!(entity_type, "Post");
                assert_eq!(id, missing);
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_rejected_after_publish_is_not_saved() {
        let store = repo();
        let id = CreatePostHandler::new(store.clone())
            .handle(create_command(&Identifier::generate()))
            .await
            .unwrap();
        PublishPostHandler::new(store.clone())
            .handle(PublishPost { post_id: id.to_string() })
            .await
            .unwrap();
        let saves = store.save_count();

        let result = UpdatePostContentHandler::new(store.clone())
            .handle(UpdatePostContent {
                post_id: id.to_string(),
                title: "New title".to_string(),
                content: "Brand new content".to_string(),
            })
            .await;

        assert!(matches!(result, Err(DomainError::InvalidState(_))));
        assert_eq!(store.save_count(), saves);
    }

    #[tokio::test]
    async fn test_list_published_by_author() {
        let store = repo();
        let create = CreatePostHandler::new(store.clone());
        let alice = Identifier::generate();
        let bob = Identifier::generate();

        let first = create.handle(create_command(&alice)).await.unwrap();
        create.handle(create_command(&alice)).await.unwrap();
        create.handle(create_command(&bob)).await.unwrap();
        PublishPostHandler::new(store.clone())
            .handle(PublishPost { post_id: first.to_string() })
            .await
            .unwrap();

        let list = ListPostsHandler::new(store.clone());
        let all = list.handle(ListPosts::default()).await.unwrap();
        assert_eq!(all.len(), 3);

        let published = list
            .handle(ListPosts { published_only: true, author_id: None })
            .await
            .unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].id, first.to_string());

        let by_alice = list
            .handle(ListPosts { published_only: false, author_id: Some(alice.to_string()) })
            .await
            .unwrap();
        assert_eq!(by_alice.len(), 2);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = repo();
        let id = CreatePostHandler::new(store.clone())
            .handle(create_command(&Identifier::generate()))
            .await
            .unwrap();

        let comments = Arc::new(Store::<Comment>::default());
        let keep = Identifier::generate();
        for post_id in [id, id, keep] {
            comments
                .save(&Comment::create(
                    CommentContent::from_string("A comment").unwrap(),
                    post_id,
                    Identifier::generate(),
                ))
                .await
                .unwrap();
        }

        let delete = DeletePostHandler::new(store.clone(), comments.clone());
        delete.handle(DeletePost { post_id: id.to_string() }).await.unwrap();
        assert!(store.all().is_empty());
        let left = comments.all();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].post_id(), keep);

        let again = delete.handle(DeletePost { post_id: id.to_string() }).await;
        assert!(matches!(again, Err(DomainError::NotFound { .. })));
    }
}
