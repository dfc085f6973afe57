//! Profile data model: the JSON wire document and the decoded value the
//! engine works on.

pub mod flamebearer;
pub mod profile;

pub use flamebearer::{Flamebearer, Metadata, ProfileKind};
pub use profile::{FlamebearerData, FlamebearerProfile, ProfileMetadata, Units};
