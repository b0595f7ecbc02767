use std::{io::Read, str::FromStr};

use serde::Deserialize;
use vrinput_types::action_set::ActionSetUsage;

use crate::catalog::CatalogError;

/**
 * The JSON action manifest an application ships with
 *
 * Only the parts the scheduler cares about are modelled, bindings, localization and any other
 * keys are ignored
 */
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionManifest {
    #[serde(default)]
    pub action_sets: Vec<ManifestActionSet>,
    #[serde(default)]
    pub actions: Vec<ManifestAction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestActionSet {
    pub name: String,
    #[serde(default)]
    pub usage: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ManifestAction {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub requirement: Option<String>,
}

impl ActionManifest {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Actions declared under `set_path`, e.g. `/actions/default/in/grab` for `/actions/default`
    pub fn actions_in<'a>(&'a self, set_path: &'a str) -> impl Iterator<Item = &'a ManifestAction> {
        self.actions.iter().filter(move |action| {
            action
                .name
                .strip_prefix(set_path)
                .map_or(false, |rest| rest.starts_with('/'))
        })
    }
}

impl ManifestActionSet {
    /// Sets without a usage default to `leftright`
    pub fn usage(&self) -> Result<ActionSetUsage, CatalogError> {
        match &self.usage {
            Some(usage) => {
                ActionSetUsage::from_str(usage).map_err(|_| CatalogError::BadUsage {
                    path: self.name.clone(),
                    usage: usage.clone(),
                })
            }
            None => Ok(ActionSetUsage::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use vrinput_types::{ActionSetHandle, InputError, InputSourceHandle};

    use super::*;
    use crate::catalog::{Catalog, InputSources};

    const MANIFEST: &str = r#"{
        "default_bindings": [
            { "controller_type": "knuckles", "binding_url": "bindings_knuckles.json" }
        ],
        "actions": [
            { "name": "/actions/default/in/InteractUI", "type": "boolean" },
            { "name": "/actions/default/in/Pose", "type": "pose", "requirement": "mandatory" },
            { "name": "/actions/default/out/Haptic", "type": "vibration" },
            { "name": "/actions/defaultextra/in/Jump", "type": "boolean" },
            { "name": "/actions/buggy/in/Steering", "type": "vector2" }
        ],
        "action_sets": [
            { "name": "/actions/default", "usage": "leftright" },
            { "name": "/actions/defaultextra", "usage": "single" },
            { "name": "/actions/buggy" }
        ],
        "localization": []
    }"#;

    #[test]
    fn parses_manifest() {
        let manifest = ActionManifest::from_json(MANIFEST).unwrap();
        assert_eq!(manifest.action_sets.len(), 3);
        assert_eq!(manifest.actions.len(), 5);
        assert_eq!(manifest.actions[1].requirement.as_deref(), Some("mandatory"));
        assert_eq!(manifest.action_sets[2].usage().unwrap(), ActionSetUsage::LeftRight);

        let default = manifest
            .actions_in("/actions/default")
            .map(|action| action.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            default,
            [
                "/actions/default/in/InteractUI",
                "/actions/default/in/Pose",
                "/actions/default/out/Haptic"
            ]
        );
    }

    #[test]
    fn catalog_from_manifest() {
        let manifest = ActionManifest::from_reader(MANIFEST.as_bytes()).unwrap();
        let sources =
            InputSources::from_handles(InputSourceHandle(1), InputSourceHandle(2)).unwrap();

        let mut next = 100;
        let catalog = Catalog::from_manifest(&manifest, sources, |_| {
            next += 1;
            Ok(ActionSetHandle(next))
        })
        .unwrap();

        assert_eq!(catalog.len(), 3);
        let extra = catalog.find("defaultextra").unwrap();
        assert_eq!(catalog.action_set(extra).handle, ActionSetHandle(102));
        assert_eq!(catalog.action_set(extra).usage, ActionSetUsage::Single);

        let err = Catalog::from_manifest(&manifest, sources, |path| {
            if path == "/actions/buggy" {
                Err(InputError::NameNotFound)
            } else {
                Ok(ActionSetHandle(path.len() as u64))
            }
        })
        .unwrap_err();
        assert!(matches!(err, CatalogError::Resolve { .. }));
    }

    #[test]
    fn rejects_bad_manifests() {
        assert!(matches!(
            ActionManifest::from_json("{ \"action_sets\": 4 }"),
            Err(CatalogError::Manifest(_))
        ));

        let manifest = ActionManifest::from_json(
            r#"{ "action_sets": [ { "name": "/actions/a", "usage": "both" } ] }"#,
        )
        .unwrap();
        let sources =
            InputSources::from_handles(InputSourceHandle(1), InputSourceHandle(2)).unwrap();
        assert!(matches!(
            Catalog::from_manifest(&manifest, sources, |_| Ok(ActionSetHandle(1))),
            Err(CatalogError::BadUsage { .. })
        ));
    }
}
