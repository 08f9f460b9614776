use utoipa::OpenApi;

use super::dto::{ChatRequest, ChatResponse};
use super::handlers::chat;

#[derive(OpenApi)]
#[openapi(
    info(title = "feedrelay API", version = "0.1.0"),
    paths(
        chat::list_chats,
        chat::create_chat,
        chat::get_chat,
        chat::update_chat,
        chat::delete_chat
    ),
    components(schemas(ChatRequest, ChatResponse)),
    tags((name = "chat", description = "Chat record endpoints"))
)]
pub struct ApiDoc;
