//! Message formatting.

use crate::store::Post;

/// Render a post as a Markdown message: bold title, summary, then a link.
pub fn format_message(post: &Post) -> String {
    format!("*{}*\n{}\n[link]({})", post.title, post.summary, post.link)
}
