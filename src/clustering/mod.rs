pub mod config;
pub mod filter;
pub mod geo;
pub mod temporal;

pub use config::ClusterConfig;
pub use filter::accepted_captures;
pub use geo::{estimate_location, haversine_km, GeoFix};
pub use temporal::{earliest_timestamp, parse_capture_timestamp};
