pub mod error;
pub mod geobounds;
pub mod geopoint;

pub use error::GeoError;
pub use geobounds::GeoBounds;
pub use geopoint::GeoPoint;
