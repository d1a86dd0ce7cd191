use std::sync::Arc;

use async_trait::async_trait;

use super::{CommentView, Handler, load};
use crate::domain::{AggregateRoot, Comment, CommentContent, Identifier, Post};
use crate::error::DomainResult;
use crate::ports::{CommentRepository, PostRepository};

#[derive(Debug, Clone)]
pub struct CreateComment {
    pub post_id: String,
    pub author_id: String,
    pub content: String,
}

/// Adds a comment to an existing post.
pub struct CreateCommentHandler {
    comments: Arc<dyn CommentRepository>,
    posts: Arc<dyn PostRepository>,
}

impl CreateCommentHandler {
    pub fn new(comments: Arc<dyn CommentRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { comments, posts }
    }
}

#[async_trait]
impl Handler<CreateComment> for CreateCommentHandler {
    type Output = Identifier;

    async fn handle(&self, input: CreateComment) -> DomainResult<Identifier> {
        let content = CommentContent::from_string(&input.content)?;
        let post_id = Identifier::parse(&input.post_id)?;
        let author_id = Identifier::parse(&input.author_id)?;

        let _: Post = load(self.posts.as_ref(), post_id).await?;

        let comment = Comment::create(content, post_id, author_id);
        self.comments.save(&comment).await?;

        tracing::info!(comment_id = %comment.id(), post_id = %post_id, "Comment created");
        Ok(comment.id())
    }
}

#[derive(Debug, Clone)]
pub struct UpdateComment {
    pub comment_id: String,
    pub content: String,
}

pub struct UpdateCommentHandler {
    comments: Arc<dyn CommentRepository>,
}

impl UpdateCommentHandler {
    pub fn new(comments: Arc<dyn CommentRepository>) -> Self {
        Self { comments }
    }
}

#[async_trait]
impl Handler<UpdateComment> for UpdateCommentHandler {
    type Output = ();

    async fn handle(&self, input: UpdateComment) -> DomainResult<()> {
        let comment_id = Identifier::parse(&input.comment_id)?;
        let content = CommentContent::from_string(&input.content)?;

        let mut comment: Comment = load(self.comments.as_ref(), comment_id).await?;
        comment.update_content(content);
        self.comments.save(&comment).await?;

        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct DeleteComment {
    pub comment_id: String,
}

pub struct DeleteCommentHandler {
    comments: Arc<dyn CommentRepository>,
}

impl DeleteCommentHandler {
    pub fn new(comments: Arc<dyn CommentRepository>) -> Self {
        Self { comments }
    }
}

#[async_trait]
impl Handler<DeleteComment> for DeleteCommentHandler {
    type Output = ();

    async fn handle(&self, input: DeleteComment) -> DomainResult<()> {
        let comment_id = Identifier::parse(&input.comment_id)?;

        let comment: Comment = load(self.comments.as_ref(), comment_id).await?;
        self.comments.delete(&comment).await?;

        tracing::info!(comment_id = %comment_id, "Comment deleted");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct GetComment {
    pub comment_id: String,
}

pub struct GetCommentHandler {
    comments: Arc<dyn CommentRepository>,
}

impl GetCommentHandler {
    pub fn new(comments: Arc<dyn CommentRepository>) -> Self {
        Self { comments }
    }
}

#[async_trait]
impl Handler<GetComment> for GetCommentHandler {
    type Output = CommentView;

    async fn handle(&self, input: GetComment) -> DomainResult<CommentView> {
        let comment_id = Identifier::parse(&input.comment_id)?;
        let comment: Comment = load(self.comments.as_ref(), comment_id).await?;
        Ok(CommentView::from(&comment))
    }
}

#[derive(Debug, Clone)]
pub struct ListComments {
    pub post_id: String,
}

pub struct ListCommentsHandler {
    comments: Arc<dyn CommentRepository>,
}

impl ListCommentsHandler {
    pub fn new(comments: Arc<dyn CommentRepository>) -> Self {
        Self { comments }
    }
}

#[async_trait]
impl Handler<ListComments> for ListCommentsHandler {
    type Output = Vec<CommentView>;

    async fn handle(&self, input: ListComments) -> DomainResult<Vec<CommentView>> {
        let post_id = Identifier::parse(&input.post_id)?;
        let comments = self.comments.find_by_post_id(post_id).await?;
        Ok(comments.iter().map(CommentView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::Store;
    use crate::domain::{PostContent, PostTitle};
    use crate::error::DomainError;
    use crate::ports::BaseRepository;

    async fn seeded_post(posts: &Store<Post>) -> Identifier {
        let post = Post::create(
            PostTitle::from_string("Commented post").unwrap(),
            PostContent::from_string("Body of the commented post").unwrap(),
            Identifier::generate(),
        );
        posts.save(&post).await.unwrap();
        post.id()
    }

    #[tokio::test]
    async fn test_comment_lifecycle() {
        let posts = Arc::new(Store::<Post>::default());
        let comments = Arc::new(Store::<Comment>::default());
        let post_id = seeded_post(&posts).await;

        let create = CreateCommentHandler::new(comments.clone(), posts.clone());
        let author_id = Identifier::generate();
        let first = create
            .handle(CreateComment {
                post_id: post_id.to_string(),
                author_id: author_id.to_string(),
                content: "hi!".to_string(),
            })
            .await
            .unwrap();
        create
            .handle(CreateComment {
                post_id: post_id.to_string(),
                author_id: Identifier::generate().to_string(),
                content: "Second comment".to_string(),
            })
            .await
            .unwrap();

        UpdateCommentHandler::new(comments.clone())
            .handle(UpdateComment {
                comment_id: first.to_string(),
                content: "hi again".to_string(),
            })
            .await
            .unwrap();

        let listed = ListCommentsHandler::new(comments.clone())
            .handle(ListComments { post_id: post_id.to_string() })
            .await
            .unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, first.to_string());
        assert_eq!(listed[0].content, "hi again");

        let fetched = GetCommentHandler::new(comments.clone())
            .handle(GetComment { comment_id: first.to_string() })
            .await
            .unwrap();
        assert_eq!(fetched.author_id, author_id.to_string());
        assert_eq!(fetched.post_id, post_id.to_string());

        DeleteCommentHandler::new(comments.clone())
            .handle(DeleteComment { comment_id: first.to_string() })
            .await
            .unwrap();
        assert_eq!(comments.all().len(), 1);

        let gone = GetCommentHandler::new(comments.clone())
            .handle(GetComment { comment_id: first.to_string() })
            .await;
        assert!(matches!(gone, Err(DomainError::NotFound { entity_type: "Comment", .. })));
    }

    #[tokio::test]
    async fn test_comment_on_missing_post() {
        let posts = Arc::new(Store::<Post>::default());
        let comments = Arc::new(Store::<Comment>::default());

        let result = CreateCommentHandler::new(comments.clone(), posts)
            .handle(CreateComment {
                post_id: Identifier::generate().to_string(),
                author_id: Identifier::generate().to_string(),
                content: "Anyone there?".to_string(),
            })
            .await;

        assert!(matches!(result, Err(DomainError::NotFound { entity_type: "Post", .. })));
        assert_eq!(comments.save_count(), 0);
    }

    #[tokio::test]
    async fn test_short_comment_rejected() {
        let posts = Arc::new(Store::<Post>::default());
        let comments = Arc::new(Store::<Comment>::default());
        let post_id = seeded_post(&posts).await;

        let result = CreateCommentHandler::new(comments, posts)
            .handle(CreateComment {
                post_id: post_id.to_string(),
                author_id: Identifier::generate().to_string(),
                content: "hi".to_string(),
            })
            .await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
}
