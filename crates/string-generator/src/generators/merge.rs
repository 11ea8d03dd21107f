//! Buffer capacity and ownership hand-off.

/// Reserve room for at least `additional` more bytes.
///
/// A reservation the allocator cannot satisfy is ignored.
pub fn grow(buf: &mut String, additional: usize) {
    let _ = buf.try_reserve(additional);
}

/// Splice `active` in front of `external` and return `external`'s allocation
/// as the new active buffer.
///
/// The result always reads as `active` followed by `external`. When `active`
/// is empty, `external` is handed back untouched.
pub fn merge_into(active: String, mut external: String) -> String {
    if active.is_empty() {
        return external;
    }

    let target = active.capacity().max(external.capacity());
    let additional = target.saturating_sub(external.len()).max(active.len());
    external.reserve(additional);
    external.insert_str(0, &active);
    external
}
