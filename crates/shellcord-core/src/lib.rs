pub mod error;
pub mod id;
pub mod record;

pub use error::RecordError;
pub use id::{IntoScordId, ScordId};
pub use record::{CommandRecord, Record, TagRecord};
