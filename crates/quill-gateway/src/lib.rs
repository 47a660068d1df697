//! HTTP gateway for the Quill blog.
//!
//! Exposes the JSON API under `/api/posts` and server-rendered HTML pages
//! under `/posts`, both composed from the same service layer.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;
pub mod web;
