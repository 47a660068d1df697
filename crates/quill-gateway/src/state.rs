use quill_service::{CommentService, PostService};

#[derive(Clone)]
pub struct AppState {
    posts: PostService,
    comments: CommentService,
}

impl AppState {
    pub fn new(posts: PostService, comments: CommentService) -> Self {
        Self { posts, comments }
    }

    pub fn posts(&self) -> &PostService {
        &self.posts
    }

    pub fn comments(&self) -> &CommentService {
        &self.comments
    }
}
