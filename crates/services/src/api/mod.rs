mod client;
pub mod endpoints;
mod transport;

pub use client::ApiClient;
pub use endpoints::Collection;
pub use transport::{ApiRequest, ApiResponse, HttpMethod, HttpTransport, ReqwestTransport};
