use thiserror::Error;
use tracing::{debug, warn};

use crate::installed::queue::RefreshQueue;
use crate::installed::section::{Boundary, Section, boundaries, section};
use crate::installed::sort::sort_key;
use crate::settings::AppSettings;
use crate::types::{AppState, ApplicationRecord, ComponentKind};

/// Ships a desktop file but no AppStream description; still an application.
const DESCRIPTIONLESS_APP_IDS: &[&str] = &["google-chrome.desktop"];

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("operation was cancelled")]
    Cancelled,
    #[error("{0}")]
    Failed(String),
}

#[derive(Clone, Debug)]
pub struct InstalledRow {
    pub record: ApplicationRecord,
    pub visible: bool,
    pub show_source: bool,
    pub show_installed_size: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct ListedRow<'a> {
    pub row: &'a InstalledRow,
    pub section: Section,
    pub boundary: Boundary,
}

#[derive(Debug, Default, Eq, PartialEq)]
pub struct FlushOutcome {
    pub refreshed: usize,
    pub removed: Vec<String>,
}

/// State behind the installed page list.
///
/// Rows are kept in display order as of the last load or flush; state
/// changes only take effect on ordering once `flush` runs.
#[derive(Debug)]
pub struct InstalledPage {
    rows: Vec<InstalledRow>,
    cache_valid: bool,
    waiting: bool,
    pending_apps_counter: usize,
    show_installed_size: bool,
    queue: RefreshQueue,
}

impl InstalledPage {
    pub fn new(settings: &AppSettings) -> Self {
        Self {
            rows: Vec::new(),
            cache_valid: false,
            waiting: false,
            pending_apps_counter: 0,
            show_installed_size: settings.show_installed_size,
            queue: RefreshQueue::new(),
        }
    }

    pub fn is_cache_valid(&self) -> bool {
        self.cache_valid
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    pub fn pending_apps_counter(&self) -> usize {
        self.pending_apps_counter
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn invalidate(&mut self) {
        self.cache_valid = false;
    }

    /// Starts a load unless one is already outstanding; old rows are dropped.
    pub fn begin_load(&mut self) -> bool {
        if self.waiting {
            return false;
        }
        self.waiting = true;
        self.rows.clear();
        self.queue.drain();
        true
    }

    pub fn reload(&mut self) -> bool {
        self.invalidate();
        self.begin_load()
    }

    /// Returns whether showing the page needs a fresh load.
    pub fn switch_to(&mut self) -> bool {
        if self.cache_valid {
            return false;
        }
        self.begin_load()
    }

    /// Applies the result of the backend query, then merges pending apps.
    ///
    /// Rows are sorted once, after the listing and the pending apps are in.
    /// Returns whether the pending counter changed.
    pub fn finish_load(
        &mut self,
        result: Result<Vec<ApplicationRecord>, LoadError>,
        pending: &[ApplicationRecord],
    ) -> bool {
        self.waiting = false;
        self.cache_valid = true;

        match result {
            Ok(list) => {
                debug!(count = list.len(), "installed apps loaded");
                for record in &list {
                    self.add_app(&list, record.clone());
                }
            }
            Err(LoadError::Cancelled) => {}
            Err(err) => warn!(%err, "failed to get installed apps"),
        }

        self.merge_pending(pending)
    }

    pub fn has_app(&self, unique_id: &str) -> bool {
        self.rows
            .iter()
            .any(|row| row.record.unique_id() == unique_id)
    }

    /// Adds rows for pending operations not yet listed.
    ///
    /// OS upgrades never show up here; the upgrade banner owns those.
    /// Returns whether the pending counter changed.
    pub fn merge_pending(&mut self, pending: &[ApplicationRecord]) -> bool {
        let mut count = 0;
        for record in pending {
            if record.kind == ComponentKind::OperatingSystem {
                continue;
            }
            if !self.has_app(&record.unique_id()) {
                self.add_app(pending, record.clone());
            }
            count += 1;
        }
        self.sort_rows();

        if count != self.pending_apps_counter {
            self.pending_apps_counter = count;
            return true;
        }
        false
    }

    /// Drops the row of a removed app. Returns whether one was listed.
    pub fn app_removed(&mut self, unique_id: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|row| row.record.unique_id() != unique_id);
        self.queue.remove(unique_id);
        before != self.rows.len()
    }

    /// Records a state change; ordering catches up on the next `flush`.
    pub fn notify_state_changed(&mut self, unique_id: &str, state: AppState) -> bool {
        let Some(row) = self
            .rows
            .iter_mut()
            .find(|row| row.record.unique_id() == unique_id)
        else {
            return false;
        };

        row.record.state = state;
        self.queue.push(unique_id);
        true
    }

    pub fn has_pending_refresh(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Re-sorts once for all queued notifications and drops rows whose new
    /// state no longer belongs on the page.
    pub fn flush(&mut self) -> FlushOutcome {
        let ids = self.queue.drain();
        if ids.is_empty() {
            return FlushOutcome::default();
        }

        let mut removed = Vec::new();
        self.rows.retain(|row| {
            let unique_id = row.record.unique_id();
            if !row.record.state.is_listable() && ids.contains(&unique_id) {
                debug!(app = %unique_id, state = row.record.state.as_str(), "unrevealing row");
                removed.push(unique_id);
                return false;
            }
            true
        });

        self.sort_rows();

        FlushOutcome {
            refreshed: ids.len(),
            removed,
        }
    }

    /// Rows in display order with their section and the boundary above them.
    ///
    /// Hidden rows take no part in boundaries.
    pub fn rows(&self) -> Vec<ListedRow<'_>> {
        let sections: Vec<Section> = self.rows.iter().map(|row| section(&row.record)).collect();
        let mut visible_boundaries = boundaries(
            self.rows
                .iter()
                .zip(&sections)
                .filter(|(row, _)| row.visible)
                .map(|(_, current)| *current),
        )
        .into_iter();

        self.rows
            .iter()
            .zip(sections)
            .map(|(row, current)| {
                let boundary = if row.visible {
                    visible_boundaries.next().unwrap_or(Boundary::None)
                } else {
                    Boundary::None
                };
                ListedRow {
                    row,
                    section: current,
                    boundary,
                }
            })
            .collect()
    }

    fn add_app(&mut self, listing: &[ApplicationRecord], record: ApplicationRecord) {
        let row = InstalledRow {
            show_source: has_component_fuzzy(listing, &record),
            show_installed_size: !record.is_compulsory() && self.show_installed_size,
            visible: is_actual_app(&record),
            record,
        };
        self.rows.push(row);
    }

    fn sort_rows(&mut self) {
        self.rows.sort_by_cached_key(|row| sort_key(&row.record));
    }
}

/// Whether another entry in `listing` is the same component from a
/// different origin.
fn has_component_fuzzy(listing: &[ApplicationRecord], record: &ApplicationRecord) -> bool {
    let unique_id = record.unique_id();
    listing
        .iter()
        .any(|other| other.id == record.id && other.unique_id() != unique_id)
}

fn is_actual_app(record: &ApplicationRecord) -> bool {
    if record.description.is_some() {
        return true;
    }
    if DESCRIPTIONLESS_APP_IDS.contains(&record.id.as_str()) {
        return true;
    }
    debug!(app = %record.unique_id(), "not an actual app");
    false
}
