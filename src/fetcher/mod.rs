pub mod http;
pub mod traits;

pub use http::HttpListingSource;
pub use traits::ListingSource;
