use std::cmp::Ordering;
use std::sync::Arc;

use crate::installed::rank::{StateGroup, placement};
use crate::installed::section::Section;
use crate::types::ApplicationRecord;

/// Display order of an installed-list row.
///
/// Fields compare in declaration order:
///
/// 1. in-flight work first (installing, queued, removing, everything else)
/// 2. section, so rows never sort into a section they don't belong in
/// 3. component kind (OS update, desktop apps, web apps, runtimes, ...)
/// 4. removable before compulsory
/// 5. collated name, unnamed records first
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct SortKey {
    state_group: StateGroup,
    section: Section,
    kind_rank: u8,
    compulsory_rank: u8,
    name: Option<Arc<str>>,
}

impl SortKey {
    pub fn state_bucket(&self) -> u8 {
        self.state_group.bucket()
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn kind_bucket(&self) -> u8 {
        self.kind_rank
    }

    pub fn compulsory_bucket(&self) -> u8 {
        self.compulsory_rank
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

pub fn sort_key(record: &ApplicationRecord) -> SortKey {
    let placement = placement(record);
    SortKey {
        state_group: placement.state_group,
        section: placement.section,
        kind_rank: placement.kind_rank,
        compulsory_rank: placement.compulsory_rank,
        name: record.sort_name().cloned(),
    }
}

pub fn compare(a: &ApplicationRecord, b: &ApplicationRecord) -> Ordering {
    sort_key(a).cmp(&sort_key(b))
}

/// Stable sort: records with equal keys keep their relative order.
pub fn sort_records(records: &mut [ApplicationRecord]) {
    records.sort_by_cached_key(sort_key);

    debug_assert!(
        records
            .windows(2)
            .all(|pair| sort_key(&pair[0]).section() <= sort_key(&pair[1]).section()),
        "installed list sorted out of section order"
    );
}
