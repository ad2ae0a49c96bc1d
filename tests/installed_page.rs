use nebula_installed::installed::{Boundary, InstalledPage, Section, SectionLabels};
use nebula_installed::settings::AppSettings;
use nebula_installed::snapshot::parse_snapshot;
use nebula_installed::types::AppState;

const INSTALLED: &str = r#"{
    "version": 1,
    "generated_at": "2024-05-02T08:30:00Z",
    "records": [
        {"id": "org.gnome.Nautilus", "name": "Files", "state": "installed", "kind": "desktop_app",
         "description": "Access and organize files", "quirks": {"compulsory": true}},
        {"id": "org.gnome.Maps", "name": "Maps", "state": "updatable", "kind": "desktop_app",
         "description": "Find places around the world"},
        {"id": "org.gnome.Boxes", "name": "Boxes", "state": "installed", "kind": "desktop_app",
         "description": "Virtualization made simple"},
        {"id": "org.freedesktop.Platform", "name": "Freedesktop Platform", "state": "installed",
         "kind": "runtime"},
        {"id": "fonts-cantarell", "name": "Cantarell", "state": "installed", "kind": "font",
         "description": "Humanist sans serif"}
    ]
}"#;

const PENDING: &str = r#"{
    "version": 1,
    "records": [
        {"id": "org.gnome.Builder", "name": "Builder", "state": "queued_for_install",
         "kind": "desktop_app", "description": "An IDE for GNOME"},
        {"id": "org.fedoraproject.fedora", "name": "Fedora", "state": "queued_for_install",
         "kind": "operating_system"}
    ]
}"#;

fn headers(page: &InstalledPage, labels: &SectionLabels) -> Vec<(String, Option<String>)> {
    page.rows()
        .iter()
        .filter(|listed| listed.row.visible)
        .map(|listed| {
            (
                listed.row.record.id.clone(),
                listed.boundary.label(labels).map(str::to_string),
            )
        })
        .collect()
}

#[test]
fn snapshot_lists_like_the_installed_page() {
    let installed = parse_snapshot(INSTALLED).expect("installed snapshot");
    let pending = parse_snapshot(PENDING).expect("pending snapshot");

    let mut page = InstalledPage::new(&AppSettings::default());
    assert!(page.switch_to());
    assert!(page.finish_load(Ok(installed.records), &pending.records));
    assert_eq!(page.pending_apps_counter(), 1);

    let labels = SectionLabels::default();
    assert_eq!(
        headers(&page, &labels),
        vec![
            ("org.gnome.Builder".to_string(), Some("In Progress".to_string())),
            ("org.gnome.Boxes".to_string(), Some("Applications".to_string())),
            ("org.gnome.Maps".to_string(), None),
            ("org.gnome.Nautilus".to_string(), Some("System Applications".to_string())),
            ("fonts-cantarell".to_string(), Some("Add-ons".to_string())),
        ]
    );

    let runtime = page
        .rows()
        .into_iter()
        .find(|listed| listed.row.record.id == "org.freedesktop.Platform")
        .expect("runtime row");
    assert!(!runtime.row.visible);
    assert_eq!(runtime.section, Section::Addons);
    assert_eq!(runtime.boundary, Boundary::None);
}

#[test]
fn finished_install_moves_into_applications() {
    let installed = parse_snapshot(INSTALLED).expect("installed snapshot");
    let pending = parse_snapshot(PENDING).expect("pending snapshot");

    let mut page = InstalledPage::new(&AppSettings::default());
    page.begin_load();
    page.finish_load(Ok(installed.records), &pending.records);

    page.notify_state_changed("org.gnome.Builder", AppState::Installing);
    page.notify_state_changed("org.gnome.Builder", AppState::Installed);
    let outcome = page.flush();
    assert_eq!(outcome.refreshed, 1);
    assert!(outcome.removed.is_empty());

    let labels = SectionLabels::default();
    let listing = headers(&page, &labels);
    assert_eq!(listing[0], ("org.gnome.Boxes".to_string(), None));
    assert_eq!(listing[1], ("org.gnome.Builder".to_string(), None));

    assert!(page.merge_pending(&[]));
    assert_eq!(page.pending_apps_counter(), 0);
}

#[test]
fn cancelled_removal_leaves_the_page() {
    let installed = parse_snapshot(INSTALLED).expect("installed snapshot");

    let mut page = InstalledPage::new(&AppSettings::default());
    page.begin_load();
    page.finish_load(Ok(installed.records), &[]);

    page.notify_state_changed("org.gnome.Boxes", AppState::Removing);
    page.flush();
    assert_eq!(page.rows()[0].row.record.id, "org.gnome.Boxes");
    assert_eq!(page.rows()[0].section, Section::InstallingAndRemoving);

    page.notify_state_changed("org.gnome.Boxes", AppState::Available);
    let outcome = page.flush();
    assert_eq!(outcome.removed, vec!["org.gnome.Boxes".to_string()]);
    assert!(!page.has_app("org.gnome.Boxes"));
}
