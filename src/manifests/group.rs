//! Role grouping of mergeable fragments
//!
//! Scans a manifest set and collects every non-excluded document of the
//! target kind, keyed by the value of its role label. Fragments without the
//! label share the empty role.

use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};
use ztp_document::{Document, Format};

use crate::config::MergeSettings;
use crate::error::ManifestError;
use crate::fragment::ConfigFragment;

/// Fragments of one role, with the manifest names they came from
#[derive(Debug, Clone, Default)]
pub struct RoleGroup {
    pub sources: Vec<String>,
    pub fragments: Vec<ConfigFragment>,
}

/// All role groups found in a manifest set, ordered by role
pub type RoleGroups = BTreeMap<String, RoleGroup>;

/// Group the target-kind fragments of `documents` by role.
///
/// Nothing is mutated: a decode or projection failure leaves the caller's
/// set exactly as it was.
pub fn group_by_role(
    documents: &BTreeMap<String, String>,
    excluded: &BTreeSet<String>,
    settings: &MergeSettings,
) -> Result<RoleGroups, ManifestError> {
    let mut groups = RoleGroups::new();

    for (name, text) in documents {
        if excluded.contains(name) {
            debug!(document = %name, "manifest excluded from merge");
            continue;
        }

        let document = Document::decode(text, Format::Yaml).map_err(|source| {
            warn!(document = %name, error = %source, "could not decode manifest");
            ManifestError::Decode {
                name: name.clone(),
                source,
            }
        })?;

        if document.kind() != Some(settings.target_kind.as_str()) {
            continue;
        }

        let fragment: ConfigFragment = document.to_typed().map_err(|source| {
            warn!(document = %name, error = %source, "could not project manifest");
            ManifestError::TypeProjection {
                name: name.clone(),
                kind: settings.target_kind.clone(),
                source,
            }
        })?;

        let role = fragment.role(&settings.role_label).to_string();
        debug!(document = %name, role = %role, "grouped fragment");

        let group = groups.entry(role).or_default();
        group.sources.push(name.clone());
        group.fragments.push(fragment);
    }

    Ok(groups)
}
