pub mod hunk;
pub mod line;
pub mod patch;
pub mod record;

pub use hunk::Hunk;
pub use line::{Line, LineKind};
pub use patch::{FileDiff, Patch};
pub use record::{CanonicalRecord, RecordMeta};
