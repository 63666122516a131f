//! Deterministic illustration selection.
//!
//! The seed (a city id) always maps to the same manifest entry, so a city's
//! illustration is stable across reloads. Changing the manifest may remap
//! cities; that is accepted behavior.

/// Rolling hash of `seed`: hash = hash * 31 + char, wrapping in i32.
pub fn seed_hash(seed: &str) -> i32 {
    let mut hash: i32 = 0;
    for c in seed.chars() {
        hash = hash.wrapping_mul(31).wrapping_add(c as i32);
    }
    hash
}

/// Pick one filename from `manifest` for `seed`, or `None` when the
/// manifest is empty. Identical inputs always pick the same entry.
pub fn pick_filename<'a>(manifest: &'a [String], seed: &str) -> Option<&'a str> {
    if manifest.is_empty() {
        return None;
    }
    let index = seed_hash(seed).unsigned_abs() as usize % manifest.len();
    manifest.get(index).map(String::as_str)
}
