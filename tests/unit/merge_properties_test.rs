use proptest::collection::vec;
use proptest::prelude::*;
use std::collections::BTreeSet;
use template_tools::merge::merge_permissions;
use template_tools::template::{PermissionLists, SettingsTemplate};

fn pattern() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Read", "Edit", "Glob", "Bash(git:*)", "Bash(npm:*)", "WebFetch"])
        .prop_map(str::to_string)
}

fn template() -> impl Strategy<Value = SettingsTemplate> {
    (
        0_u64..10,
        prop::option::of((vec(pattern(), 0..5), vec(pattern(), 0..3), vec(pattern(), 0..3))),
    )
        .prop_map(|(version, lists)| SettingsTemplate {
            source: None,
            version,
            permissions: lists.map(|(allow, deny, ask)| PermissionLists { allow, deny, ask }),
        })
}

fn without_deny(mut template: SettingsTemplate) -> SettingsTemplate {
    if let Some(permissions) = template.permissions.as_mut() {
        permissions.deny.clear();
    }
    template
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_allow_and_deny_are_disjoint(templates in vec(template(), 0..6)) {
            let merged = merge_permissions(&templates);
            for pattern in &merged.permissions.deny {
                prop_assert!(!merged.permissions.allow.contains(pattern));
            }
        }

        #[test]
        fn test_allow_is_first_seen_union_without_deny(templates in vec(template(), 0..6)) {
            let templates: Vec<SettingsTemplate> = templates.into_iter().map(without_deny).collect();
            let merged = merge_permissions(&templates);

            let mut expected: Vec<String> = Vec::new();
            for permissions in templates.iter().filter_map(|t| t.permissions.as_ref()) {
                for pattern in &permissions.allow {
                    if !expected.contains(pattern) {
                        expected.push(pattern.clone());
                    }
                }
            }
            prop_assert_eq!(merged.permissions.allow, expected);
        }

        #[test]
        fn test_version_is_maximum(templates in vec(template(), 0..6)) {
            let merged = merge_permissions(&templates);
            let expected = templates.iter().map(|t| t.version).max().unwrap_or(0);
            prop_assert_eq!(merged.version, expected);
        }

        #[test]
        fn test_deny_is_idempotent_under_duplication(t in template()) {
            let once = merge_permissions(std::slice::from_ref(&t));
            let twice = merge_permissions(&[t.clone(), t]);
            prop_assert_eq!(once.permissions.deny, twice.permissions.deny);
        }

        #[test]
        fn test_deny_is_sorted_and_unique(templates in vec(template(), 0..6)) {
            let merged = merge_permissions(&templates);
            let expected: Vec<String> = templates
                .iter()
                .filter_map(|t| t.permissions.as_ref())
                .flat_map(|p| p.deny.iter().cloned())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            prop_assert_eq!(merged.permissions.deny, expected);
        }

        #[test]
        fn test_allow_deny_independent_of_which_template_denies(
            first in template(),
            second in template(),
        ) {
            let forward = merge_permissions(&[first.clone(), second.clone()]);
            let backward = merge_permissions(&[second, first]);

            let forward_allow: BTreeSet<_> = forward.permissions.allow.into_iter().collect();
            let backward_allow: BTreeSet<_> = backward.permissions.allow.into_iter().collect();
            prop_assert_eq!(forward_allow, backward_allow);
            prop_assert_eq!(forward.permissions.deny, backward.permissions.deny);
        }
    }

    #[test]
    fn test_order_sensitivity_example() {
        let t1 = SettingsTemplate {
            source: Some("t1".into()),
            version: 0,
            permissions: Some(PermissionLists {
                allow: vec!["a".into(), "b".into()],
                ..PermissionLists::default()
            }),
        };
        let t2 = SettingsTemplate {
            source: Some("t2".into()),
            version: 0,
            permissions: Some(PermissionLists { deny: vec!["a".into()], ..PermissionLists::default() }),
        };

        for templates in [[t1.clone(), t2.clone()], [t2, t1]] {
            let merged = merge_permissions(&templates);
            assert_eq!(merged.permissions.allow, vec!["b"]);
            assert_eq!(merged.permissions.deny, vec!["a"]);
        }
    }
}
