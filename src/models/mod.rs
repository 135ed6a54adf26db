pub mod capture;
pub mod observation;

pub use capture::{Capture, ExifData};
pub use observation::{
    AnimalTag, ImageMetadata, ImageUpload, LocationEstimate, ObservationRecord,
    StoredObservation, UserRef, NO_RADIUS,
};
