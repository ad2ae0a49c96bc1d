use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::collate;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppState {
    Available,
    QueuedForInstall,
    Installing,
    Installed,
    Updatable,
    UpdatableLive,
    Removing,
    #[default]
    #[serde(other)]
    Unknown,
}

impl AppState {
    pub fn as_str(self) -> &'static str {
        match self {
            AppState::Unknown => "unknown",
            AppState::Available => "available",
            AppState::QueuedForInstall => "queued-for-install",
            AppState::Installing => "installing",
            AppState::Installed => "installed",
            AppState::Updatable => "updatable",
            AppState::UpdatableLive => "updatable-live",
            AppState::Removing => "removing",
        }
    }

    /// States the installed page keeps a row for once it has been added.
    pub fn is_listable(self) -> bool {
        matches!(
            self,
            AppState::Installing
                | AppState::Installed
                | AppState::Removing
                | AppState::Updatable
                | AppState::UpdatableLive
        )
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    DesktopApp,
    WebApp,
    Runtime,
    Addon,
    Codec,
    Font,
    InputMethod,
    OperatingSystem,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialKind {
    OsUpdate,
    #[serde(other)]
    Other,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct AppQuirks {
    /// System-protected, cannot be removed by the user.
    #[serde(default)]
    pub compulsory: bool,
    #[serde(default)]
    pub needs_reboot: bool,
}

/// One application entry as handed over by the package backend.
///
/// The collated form of `name` is computed once when the name is set, the
/// same way the listing filters cache lowercase text.
#[derive(Clone, Debug)]
pub struct ApplicationRecord {
    pub id: String,
    pub origin: Option<String>,
    pub state: AppState,
    pub kind: ComponentKind,
    pub special_kind: Option<SpecialKind>,
    pub quirks: AppQuirks,
    pub description: Option<String>,
    pub summary: Option<String>,
    pub version: Option<String>,
    pub homepage: Option<String>,
    pub progress: Option<u32>,
    pub installed_size: Option<u64>,
    name: Option<String>,
    sort_name: Option<Arc<str>>,
}

impl ApplicationRecord {
    pub fn new(id: impl Into<String>, state: AppState, kind: ComponentKind) -> Self {
        Self {
            id: id.into(),
            origin: None,
            state,
            kind,
            special_kind: None,
            quirks: AppQuirks::default(),
            description: None,
            summary: None,
            version: None,
            homepage: None,
            progress: None,
            installed_size: None,
            name: None,
            sort_name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.set_name(Some(name.into()));
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = Some(origin.into());
        self
    }

    pub fn with_special_kind(mut self, special_kind: SpecialKind) -> Self {
        self.special_kind = Some(special_kind);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn compulsory(mut self) -> Self {
        self.quirks.compulsory = true;
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn sort_name(&self) -> Option<&Arc<str>> {
        self.sort_name.as_ref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.sort_name = name.as_deref().map(collate::sort_key_cache);
        self.name = name;
    }

    pub fn is_compulsory(&self) -> bool {
        self.quirks.compulsory
    }

    /// Identity of this entry: the component id qualified by its origin.
    pub fn unique_id(&self) -> String {
        match self.origin.as_deref() {
            Some(origin) if !origin.is_empty() => format!("{}/{}", origin, self.id),
            _ => self.id.clone(),
        }
    }
}
