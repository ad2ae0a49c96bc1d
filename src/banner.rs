use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{AppState, ApplicationRecord};

#[derive(Debug, Error, Eq, PartialEq)]
pub enum BannerError {
    #[error("unexpected app state ‘{state}’ of app ‘{app}’")]
    UnexpectedState { state: &'static str, app: String },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerTitle {
    NowAvailable,
    WaitingToDownload,
    Downloading,
    ReadyToInstall,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "mode", content = "fraction", rename_all = "snake_case")]
pub enum BannerProgress {
    Hidden,
    Pulsing,
    Fraction(f64),
    /// Out-of-range report while downloading; the bar keeps what it showed.
    Unchanged,
}

/// Banner texts. Titles may use `{name}` and `{version}` placeholders.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BannerLabels {
    pub now_available: String,
    pub waiting_to_download: String,
    pub downloading: String,
    pub ready_to_install: String,
    pub install: String,
    pub restart_now: String,
    pub backup_warning: String,
    pub restart_warning: String,
}

impl Default for BannerLabels {
    fn default() -> Self {
        Self {
            now_available: "{name} {version} Now Available".to_string(),
            waiting_to_download: "Waiting to Download {name} {version}".to_string(),
            downloading: "Downloading {name} {version}".to_string(),
            ready_to_install: "{name} {version} Ready to be Installed".to_string(),
            install: "_Install".to_string(),
            restart_now: "_Restart Now".to_string(),
            backup_warning:
                "It is recommended that you back up your data and files before upgrading."
                    .to_string(),
            restart_warning: "Updates will be applied when the computer is restarted.".to_string(),
        }
    }
}

impl BannerLabels {
    pub fn title(&self, title: BannerTitle, name: &str, version: &str) -> String {
        let template = match title {
            BannerTitle::NowAvailable => &self.now_available,
            BannerTitle::WaitingToDownload => &self.waiting_to_download,
            BannerTitle::Downloading => &self.downloading,
            BannerTitle::ReadyToInstall => &self.ready_to_install,
        };
        template.replace("{name}", name).replace("{version}", version)
    }
}

/// What the OS upgrade banner shows for one upgrade record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UpgradeBanner {
    pub title: BannerTitle,
    pub title_text: String,
    pub summary: Option<String>,
    pub install_label: String,
    pub warning: String,
    pub show_warning: bool,
    pub show_download: bool,
    pub show_install: bool,
    pub show_cancel: bool,
    pub show_help: bool,
    pub progress: BannerProgress,
}

impl UpgradeBanner {
    /// Builds the banner, or `None` while the upgrade state is still unknown.
    pub fn for_upgrade(
        upgrade: &ApplicationRecord,
        labels: &BannerLabels,
    ) -> Result<Option<Self>, BannerError> {
        if upgrade.state == AppState::Unknown {
            return Ok(None);
        }

        let name = upgrade.name().unwrap_or_default();
        let version = upgrade.version.as_deref().unwrap_or_default();

        let title = match upgrade.state {
            AppState::Available => BannerTitle::NowAvailable,
            AppState::QueuedForInstall => BannerTitle::WaitingToDownload,
            AppState::Installing => BannerTitle::Downloading,
            AppState::Updatable => BannerTitle::ReadyToInstall,
            other => {
                return Err(BannerError::UnexpectedState {
                    state: other.as_str(),
                    app: upgrade.unique_id(),
                });
            }
        };

        let title_text = labels.title(title, name, version);

        // Distributions that reboot to deploy the upgrade get an explicit install step.
        let (install_label, warning) = if upgrade.quirks.needs_reboot {
            (&labels.install, &labels.backup_warning)
        } else {
            (&labels.restart_now, &labels.restart_warning)
        };

        Ok(Some(Self {
            title,
            title_text,
            summary: upgrade.summary.clone(),
            install_label: install_label.clone(),
            warning: warning.clone(),
            show_warning: title == BannerTitle::ReadyToInstall,
            show_download: title == BannerTitle::NowAvailable,
            show_install: title == BannerTitle::ReadyToInstall,
            show_cancel: matches!(
                title,
                BannerTitle::WaitingToDownload | BannerTitle::Downloading
            ),
            show_help: upgrade.homepage.is_some(),
            progress: progress_for(upgrade),
        }))
    }
}

fn progress_for(upgrade: &ApplicationRecord) -> BannerProgress {
    if upgrade.state != AppState::Installing {
        return BannerProgress::Hidden;
    }

    match upgrade.progress {
        None => BannerProgress::Pulsing,
        Some(percentage) if percentage <= 100 => {
            BannerProgress::Fraction(f64::from(percentage) / 100.0)
        }
        Some(_) => BannerProgress::Unchanged,
    }
}
