use crate::installed::section::Section;
use crate::types::{AppState, ApplicationRecord, ComponentKind, SpecialKind};

/// Ordering of the first key component: work in flight comes first.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum StateGroup {
    Installing = 1,
    QueuedForInstall = 2,
    Removing = 3,
    Settled = 4,
}

impl StateGroup {
    pub fn of(state: AppState) -> Self {
        match state {
            AppState::Installing => StateGroup::Installing,
            AppState::QueuedForInstall => StateGroup::QueuedForInstall,
            AppState::Removing => StateGroup::Removing,
            _ => StateGroup::Settled,
        }
    }

    pub fn bucket(self) -> u8 {
        self as u8
    }

    pub fn is_in_progress(self) -> bool {
        self != StateGroup::Settled
    }
}

pub(crate) const OS_UPDATE_RANK: u8 = 1;
pub(crate) const DESKTOP_APP_RANK: u8 = 2;
pub(crate) const WEB_APP_RANK: u8 = 3;
const RUNTIME_RANK: u8 = 4;
const ADDON_RANK: u8 = 5;
const CODEC_RANK: u8 = 6;
const FONT_RANK: u8 = 6;
const INPUT_METHOD_RANK: u8 = 7;
pub(crate) const DEFAULT_RANK: u8 = 8;

/// Rank of a component kind inside its state group.
pub fn kind_rank(kind: ComponentKind, special_kind: Option<SpecialKind>) -> u8 {
    match kind {
        ComponentKind::DesktopApp => DESKTOP_APP_RANK,
        ComponentKind::WebApp => WEB_APP_RANK,
        ComponentKind::Runtime => RUNTIME_RANK,
        ComponentKind::Addon => ADDON_RANK,
        ComponentKind::Codec => CODEC_RANK,
        ComponentKind::Font => FONT_RANK,
        ComponentKind::InputMethod => INPUT_METHOD_RANK,
        _ => {
            if special_kind == Some(SpecialKind::OsUpdate) {
                OS_UPDATE_RANK
            } else {
                DEFAULT_RANK
            }
        }
    }
}

pub fn compulsory_rank(compulsory: bool) -> u8 {
    if compulsory { 2 } else { 1 }
}

/// Everything the sort key and the section assignment derive from a record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Placement {
    pub(crate) state_group: StateGroup,
    pub(crate) section: Section,
    pub(crate) kind_rank: u8,
    pub(crate) compulsory_rank: u8,
}

/// The single ranking table behind both `sort_key` and `section`.
///
/// Kinds ranked at or above web apps are listed as applications; this is
/// also where the OS update pseudo-app joins the application sections.
pub(crate) fn placement(record: &ApplicationRecord) -> Placement {
    let state_group = StateGroup::of(record.state);
    let kind_rank = kind_rank(record.kind, record.special_kind);
    let compulsory = record.is_compulsory();

    let section = if state_group.is_in_progress() {
        Section::InstallingAndRemoving
    } else if kind_rank <= WEB_APP_RANK {
        if compulsory {
            Section::SystemApps
        } else {
            Section::RemovableApps
        }
    } else {
        Section::Addons
    };

    Placement {
        state_group,
        section,
        kind_rank,
        compulsory_rank: compulsory_rank(compulsory),
    }
}
