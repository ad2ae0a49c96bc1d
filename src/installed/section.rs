use serde::{Deserialize, Serialize};

use crate::installed::rank::placement;
use crate::types::ApplicationRecord;

/// Groups of the installed list, declared in display order.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    InstallingAndRemoving,
    RemovableApps,
    SystemApps,
    Addons,
}

pub fn section(record: &ApplicationRecord) -> Section {
    placement(record).section
}

/// What goes above a row in the list.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "type", content = "section", rename_all = "snake_case")]
pub enum Boundary {
    None,
    Divider,
    Header(Section),
}

impl Boundary {
    pub fn label<'a>(&self, labels: &'a SectionLabels) -> Option<&'a str> {
        match self {
            Boundary::Header(section) => Some(labels.label(*section)),
            Boundary::None | Boundary::Divider => None,
        }
    }
}

/// Decides the header for `current` given the row above it.
///
/// The top row is compared against an implied `RemovableApps` row, so a list
/// that opens with ordinary applications starts without a redundant title.
/// Only the immediate predecessor matters: a section that shows up again
/// after another one gets its header again.
pub fn section_boundary(previous: Section, current: Section, is_first_row: bool) -> Boundary {
    let before = if is_first_row {
        Section::RemovableApps
    } else {
        previous
    };

    if before != current {
        Boundary::Header(current)
    } else if !is_first_row {
        Boundary::Divider
    } else {
        Boundary::None
    }
}

/// Boundaries for consecutive rows of an already sorted list.
pub fn boundaries<I>(sections: I) -> Vec<Boundary>
where
    I: IntoIterator<Item = Section>,
{
    let mut previous: Option<Section> = None;
    sections
        .into_iter()
        .map(|current| {
            let boundary = match previous {
                Some(prev) => section_boundary(prev, current, false),
                None => section_boundary(current, current, true),
            };
            previous = Some(current);
            boundary
        })
        .collect()
}

/// Header texts, provided by whoever handles translations.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionLabels {
    pub installing_and_removing: String,
    pub removable_apps: String,
    pub system_apps: String,
    pub addons: String,
}

impl Default for SectionLabels {
    fn default() -> Self {
        Self {
            installing_and_removing: "In Progress".to_string(),
            removable_apps: "Applications".to_string(),
            system_apps: "System Applications".to_string(),
            addons: "Add-ons".to_string(),
        }
    }
}

impl SectionLabels {
    pub fn label(&self, section: Section) -> &str {
        match section {
            Section::InstallingAndRemoving => &self.installing_and_removing,
            Section::RemovableApps => &self.removable_apps,
            Section::SystemApps => &self.system_apps,
            Section::Addons => &self.addons,
        }
    }
}
