use std::cmp::Ordering;

use proptest::prelude::*;

use nebula_installed::installed::{boundaries, compare, section, sort_key, sort_records};
use nebula_installed::{AppState, ApplicationRecord, Boundary, ComponentKind, Section, SpecialKind};

fn arb_state() -> impl Strategy<Value = AppState> {
    prop_oneof![
        Just(AppState::Unknown),
        Just(AppState::Available),
        Just(AppState::QueuedForInstall),
        Just(AppState::Installing),
        Just(AppState::Installed),
        Just(AppState::Updatable),
        Just(AppState::UpdatableLive),
        Just(AppState::Removing),
    ]
}

fn arb_kind() -> impl Strategy<Value = ComponentKind> {
    prop_oneof![
        Just(ComponentKind::DesktopApp),
        Just(ComponentKind::WebApp),
        Just(ComponentKind::Runtime),
        Just(ComponentKind::Addon),
        Just(ComponentKind::Codec),
        Just(ComponentKind::Font),
        Just(ComponentKind::InputMethod),
        Just(ComponentKind::OperatingSystem),
        Just(ComponentKind::Other),
    ]
}

fn arb_record() -> impl Strategy<Value = ApplicationRecord> {
    (
        "[a-z]{1,6}",
        arb_state(),
        arb_kind(),
        any::<bool>(),
        any::<bool>(),
        proptest::option::of("[A-Za-zÉé ]{0,8}"),
    )
        .prop_map(|(id, state, kind, os_update, compulsory, name)| {
            let mut record = ApplicationRecord::new(id, state, kind);
            if os_update {
                record = record.with_special_kind(SpecialKind::OsUpdate);
            }
            if compulsory {
                record = record.compulsory();
            }
            record.set_name(name);
            record
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Rows never sort ahead of a row from an earlier section.
    #[test]
    fn section_order_agrees_with_sort_order(a in arb_record(), b in arb_record()) {
        if section(&a) < section(&b) {
            prop_assert_eq!(compare(&a, &b), Ordering::Less);
        }
        if section(&b) < section(&a) {
            prop_assert_eq!(compare(&b, &a), Ordering::Less);
        }
    }

    #[test]
    fn classification_is_pure(record in arb_record()) {
        prop_assert_eq!(section(&record), section(&record.clone()));
        prop_assert_eq!(sort_key(&record), sort_key(&record.clone()));
    }

    #[test]
    fn comparator_is_antisymmetric(a in arb_record(), b in arb_record()) {
        prop_assert_eq!(compare(&a, &b), compare(&b, &a).reverse());
    }

    /// Records with equal keys keep their input order.
    #[test]
    fn sorting_is_stable(records in proptest::collection::vec(arb_record(), 0..24)) {
        let mut sorted: Vec<ApplicationRecord> = records
            .into_iter()
            .enumerate()
            .map(|(position, mut record)| {
                record.id = position.to_string();
                record
            })
            .collect();
        sort_records(&mut sorted);

        for pair in sorted.windows(2) {
            match compare(&pair[0], &pair[1]) {
                Ordering::Greater => prop_assert!(false, "rows out of order"),
                Ordering::Equal => {
                    let first: usize = pair[0].id.parse().expect("numeric id");
                    let second: usize = pair[1].id.parse().expect("numeric id");
                    prop_assert!(first < second);
                }
                Ordering::Less => {}
            }
        }

        let sections: Vec<Section> = sorted.iter().map(section).collect();
        let mut expected = sections.clone();
        expected.sort();
        prop_assert_eq!(sections, expected);
    }

    #[test]
    fn sorting_ignores_input_permutation(
        records in proptest::collection::vec(arb_record(), 0..24),
        shift in any::<usize>(),
    ) {
        let mut sorted = records.clone();
        sort_records(&mut sorted);

        let mut rotated = records;
        if !rotated.is_empty() {
            let len = rotated.len();
            rotated.rotate_left(shift % len);
        }
        sort_records(&mut rotated);

        let keys: Vec<_> = rotated.iter().map(sort_key).collect();
        let expected: Vec<_> = sorted.iter().map(sort_key).collect();
        prop_assert_eq!(keys, expected);
    }

    /// Headers only appear where the section changes, dividers only where
    /// it repeats.
    #[test]
    fn boundaries_follow_section_changes(
        records in proptest::collection::vec(arb_record(), 1..16),
    ) {
        let mut records = records;
        sort_records(&mut records);
        let sections: Vec<Section> = records.iter().map(section).collect();
        let result = boundaries(sections.iter().copied());

        prop_assert_eq!(result.len(), sections.len());
        for (index, boundary) in result.iter().enumerate() {
            match boundary {
                Boundary::Header(header) => {
                    prop_assert_eq!(*header, sections[index]);
                    if index > 0 {
                        prop_assert_ne!(sections[index - 1], sections[index]);
                    }
                }
                Boundary::Divider => {
                    prop_assert!(index > 0);
                    prop_assert_eq!(sections[index - 1], sections[index]);
                }
                Boundary::None => {
                    prop_assert_eq!(index, 0);
                    prop_assert_eq!(sections[0], Section::RemovableApps);
                }
            }
        }
    }
}

#[test]
fn installing_app_precedes_installed_app_despite_name() {
    let zed = ApplicationRecord::new("zed", AppState::Installing, ComponentKind::DesktopApp)
        .with_name("Zed");
    let apex = ApplicationRecord::new("apex", AppState::Installed, ComponentKind::DesktopApp)
        .with_name("Apex");
    assert_eq!(compare(&zed, &apex), Ordering::Less);
}

#[test]
fn os_update_sorts_right_after_work_in_progress() {
    let os_update = ApplicationRecord::new("os-update", AppState::Installed, ComponentKind::Other)
        .with_special_kind(SpecialKind::OsUpdate);
    assert_eq!(sort_key(&os_update).kind_bucket(), 1);

    let mut records = vec![
        ApplicationRecord::new("maps", AppState::Installed, ComponentKind::DesktopApp)
            .with_name("Maps"),
        ApplicationRecord::new("web", AppState::Installed, ComponentKind::WebApp).with_name("Docs"),
        os_update,
        ApplicationRecord::new("builder", AppState::Removing, ComponentKind::DesktopApp)
            .with_name("Builder"),
    ];
    sort_records(&mut records);
    let ids: Vec<_> = records.iter().map(|record| record.id.as_str()).collect();
    assert_eq!(ids, vec!["builder", "os-update", "maps", "web"]);
}
