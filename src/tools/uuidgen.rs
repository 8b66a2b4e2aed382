//! UUID generator - random (v4) UUIDs from the OS CSPRNG

use tracing::debug;
use uuid::Uuid;

use crate::core::model::{Kind, ResultItem, ResultSet};

/// Generate `count` random v4 UUIDs, lowercase hyphenated unless `upper`
pub fn generate(count: usize, upper: bool) -> Vec<String> {
    (0..count)
        .map(|_| {
            let id = Uuid::new_v4().hyphenated().to_string();
            if upper {
                id.to_uppercase()
            } else {
                id
            }
        })
        .collect()
}

/// Run the uuid command
pub fn run_uuid(count: usize, upper: bool) -> ResultSet {
    let count = count.max(1);
    debug!(count, upper, "generating uuids");
    generate(count, upper)
        .into_iter()
        .map(|id| ResultItem::output(Kind::Uuid, "uuid.v4", id))
        .collect()
}
