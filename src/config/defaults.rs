//! Default option values for keyed-diff.

/// Default key field.
pub const DEFAULT_KEY: &str = "id";

/// Split output by row state unless told otherwise.
pub const DEFAULT_IS_SPLIT: bool = true;

/// Built-in change-detector used when none is supplied.
pub const DEFAULT_DETECTOR: &str = "fieldwise";

/// Count name for modified records.
pub const MODIFIED_COUNT: &str = "modifiedCount";

/// Count name for added records.
pub const ADDED_COUNT: &str = "addedCount";

/// Count name for deleted records.
pub const DELETED_COUNT: &str = "deletedCount";
