pub mod columns;
pub mod error;
pub mod geopoint;
pub mod manifest;
pub mod submissions;
pub mod table;

pub use error::{Odk2OdmError, Result};
