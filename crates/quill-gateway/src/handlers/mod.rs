pub mod comments;
pub mod health;
pub mod posts;

pub use comments::{
    create_comment_handler, delete_comment_handler, get_comment_handler, list_comments_handler,
    update_comment_handler,
};
pub use health::health_handler;
pub use posts::{
    create_post_handler, delete_post_handler, get_post_handler, list_posts_handler,
    update_post_handler,
};
