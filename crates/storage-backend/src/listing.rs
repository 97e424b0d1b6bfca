//! Delimiter listing emulation shared by all backends.

use cloud_storage_core::ObjectRecord;
use std::collections::BTreeMap;

/// Applies the prefix listing contract to `(key, size)` pairs.
///
/// Entries may arrive in any order and need not be pre-filtered by prefix.
/// The output is ordered by key.
pub fn list<'a, I>(entries: I, prefix: &str, recursive: bool) -> Vec<ObjectRecord>
where
    I: IntoIterator<Item = (&'a str, u64)>,
{
    let mut records: BTreeMap<String, u64> = BTreeMap::new();

    for (key, size) in entries {
        let Some(rest) = key.strip_prefix(prefix) else {
            continue;
        };

        if !recursive && let Some(slash) = rest.find('/') {
            let common = &key[..prefix.len() + slash + 1];
            records.entry(common.to_string()).or_insert(0);
            continue;
        }

        records.insert(key.to_string(), size);
    }

    records
        .into_iter()
        .map(|(key, size)| ObjectRecord::new(key, size))
        .collect()
}
