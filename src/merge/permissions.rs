use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

use crate::template::SettingsTemplate;

/// Permission lists after merging
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MergedPermissions {
    pub allow: Vec<String>,
    pub deny: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ask: Vec<String>,
}

/// Settings document produced by merging templates
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MergedSettings {
    #[serde(rename = "_version")]
    pub version: u64,

    /// Names of the templates this document was generated from, in input order
    #[serde(rename = "_generated_from", default, skip_serializing_if = "Vec::is_empty")]
    pub generated_from: Vec<String>,

    pub permissions: MergedPermissions,
}

/// Append-only list that ignores repeated entries
#[derive(Debug, Default)]
struct OrderedSet {
    seen: HashSet<String>,
    items: Vec<String>,
}

impl OrderedSet {
    fn extend<'a>(&mut self, patterns: impl IntoIterator<Item = &'a String>) {
        for pattern in patterns {
            if self.seen.insert(pattern.clone()) {
                self.items.push(pattern.clone());
            }
        }
    }
}

/// Merges settings templates in precedence order.
///
/// allow and ask keep the position of each pattern's first occurrence. Once
/// every template is folded in, any allow pattern that is also denied by any
/// template is dropped, so deny wins no matter which template introduced it.
/// Patterns are compared by exact string equality only.
pub fn merge_permissions(templates: &[SettingsTemplate]) -> MergedSettings {
    let mut allow = OrderedSet::default();
    let mut ask = OrderedSet::default();
    let mut deny = BTreeSet::new();
    let mut max_version: u64 = 0;

    for template in templates {
        max_version = max_version.max(template.version);

        let Some(permissions) = &template.permissions else {
            continue;
        };

        deny.extend(permissions.deny.iter().cloned());
        allow.extend(&permissions.allow);
        ask.extend(&permissions.ask);
    }

    let before = allow.items.len();
    let filtered_allow: Vec<String> =
        allow.items.into_iter().filter(|pattern| !deny.contains(pattern)).collect();
    if filtered_allow.len() < before {
        debug!("Dropped {} allow pattern(s) overridden by deny", before - filtered_allow.len());
    }

    MergedSettings {
        version: max_version,
        generated_from: templates.iter().filter_map(|t| t.source.clone()).collect(),
        permissions: MergedPermissions {
            allow: filtered_allow,
            deny: deny.into_iter().collect(),
            ask: ask.items,
        },
    }
}
