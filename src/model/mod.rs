//! Record model shared by the resolver, the engine and the reports.
//!
//! A [`Record`] is an open-ended, insertion-ordered map of field names to
//! JSON values. Identity across snapshots comes solely from the value of the
//! configured key field, read through [`record_key`].

mod key;
mod record;

pub use key::{record_key, RecordKey};
pub use record::{key_only, to_records, Record, RowState};
pub(crate) use record::json_type_name;
