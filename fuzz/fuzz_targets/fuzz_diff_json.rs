#![no_main]
use keyed_diff::config::{CountFields, DiffOptions};
use libfuzzer_sys::fuzz_target;

/// Fuzz snapshot parsing and both diff entry points.
///
/// The input is split at the first NUL byte into a new and an old snapshot.
/// Whatever parses as a JSON array of objects is diffed both ways; nothing
/// may panic.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let (new_text, old_text) = s.split_once('\0').unwrap_or((s, "[]"));

    let (Ok(new), Ok(old)) = (
        keyed_diff::pipeline::parse_snapshot_str(new_text),
        keyed_diff::pipeline::parse_snapshot_str(old_text),
    ) else {
        return;
    };

    let options = DiffOptions::new().fields(CountFields::all());
    let _ = keyed_diff::diff(&new, &old, &options);
    let _ = keyed_diff::diff_with_sort(&new, &old, &options.clone().is_split(false));
    let _ = keyed_diff::diff::deletions_only(&old, &options);
});
