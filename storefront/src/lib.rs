//! Headless client core for the storefront: configuration, structured
//! logging, credential storage, the authenticated [`Session`], a generic
//! cache-and-revalidate [`Fetch`] engine, and per-resource data hooks built
//! on top of it.

pub mod cart_store;
pub mod config;
pub mod fetch;
pub mod hooks;
pub mod logs;
pub mod session;
pub mod storage;

pub use config::{Config, get_api_client};
pub use fetch::{Fetch, FetchOptions, FetchState, FocusSignal};
pub use session::Session;
pub use storage::{FileStorage, MemoryStorage, Storage, TokenStorage, UserStorage};
