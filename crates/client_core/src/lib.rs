pub mod async_request;
pub mod backend;
pub mod catalog;
pub mod config;
pub mod conversation;
pub mod error;
pub mod transport;

pub use async_request::{AsyncRequest, Completion, RequestId};
pub use backend::{AssistantBackend, CatalogSource};
pub use catalog::{CatalogController, FetchApplied, FetchTag};
pub use config::{load_settings, Endpoints, Settings};
pub use conversation::{
    ConversationController, ReplyApplied, SendOutcome, SendRejection, FALLBACK_REPLY, GREETING,
};
pub use error::{CatalogError, RequestError};
pub use transport::HttpBackend;
