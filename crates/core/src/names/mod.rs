//! Name resolution - account code to display name lookups.

mod names_service;

pub use names_service::NameDirectory;
