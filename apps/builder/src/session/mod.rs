// Form state controller: the session store, the typed mutation operations,
// and the JSON API handlers that expose them.

pub mod handlers;
pub mod ops;
pub mod store;

pub use store::SessionStore;
