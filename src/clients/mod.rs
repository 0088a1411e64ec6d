//! Collaborators of the storefront core: the remote store service behind [`StoreApi`],
//! and the typed [`StorefrontClient`] that wraps the actor channel.

pub mod http;
pub mod mock;
pub mod store_api;
pub mod storefront_client;

pub use http::HttpStoreApi;
pub use store_api::*;
pub use storefront_client::StorefrontClient;
