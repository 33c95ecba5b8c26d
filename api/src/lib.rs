//! This crate contains the wire contract shared by the browser client and the
//! upload proxy, plus the server-side proxy itself.

pub mod error_body;
pub mod geolocation;
#[cfg(not(target_arch = "wasm32"))]
pub mod proxy;
pub mod upload;

pub use error_body::ErrorBody;
pub use geolocation::GeoLocation;
pub use upload::ImageUpload;

/// Route the browser posts uploads to.
pub const GEOLOCATE_PATH: &str = "/api/v1/geolocate";

/// Path appended to the backend base URL when forwarding.
pub const BACKEND_GEOLOCATE_PATH: &str = "/geolocate";

/// Name of the multipart field carrying the image, on both hops.
pub const UPLOAD_FIELD: &str = "file";

/// Largest image accepted, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;
