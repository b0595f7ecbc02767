use once_cell::sync::Lazy;
use regex::Regex;
use strum::IntoEnumIterator;
use thiserror::Error;
use vrinput_types::{
    action_set::ActionSetUsage, input_source::InputSource, ActionSetHandle, InputError,
    InputSourceHandle,
};

use crate::{internal::types::HashMap, manifest::ActionManifest};

static ACTION_SET_PATH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^/actions/([A-Za-z0-9_\-]+)$"#).unwrap());

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Bad Action Set Path `{0}`")]
    BadActionSetPath(String),
    #[error("Bad Action Set Usage `{usage}` on `{path}`")]
    BadUsage { path: String, usage: String },
    #[error("Duplicate Action Set `{0}`")]
    DuplicateActionSet(String),
    #[error("Invalid Action Set Handle `{handle:X?}` for `{path}`")]
    InvalidActionSetHandle {
        path: String,
        handle: ActionSetHandle,
    },
    #[error("Invalid Input Source Handle `{handle:X?}` for `{path}`")]
    InvalidInputSourceHandle {
        path: &'static str,
        handle: InputSourceHandle,
    },
    #[error("Could not resolve `{path}`: {source}")]
    Resolve {
        path: String,
        #[source]
        source: InputError,
    },
    #[error("Bad Action Manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Dense index of an action set within the [Catalog] that created it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ActionSetId(u32);

impl ActionSetId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSet {
    pub handle: ActionSetHandle,
    pub full_path: String,
    pub short_name: String,
    pub usage: ActionSetUsage,
}

/// Native handles of every [InputSource]. `Any` is always the zero handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSources {
    handles: [InputSourceHandle; 3],
}

impl InputSources {
    pub fn new<F>(mut resolve: F) -> Result<Self, CatalogError>
    where
        F: FnMut(&str) -> Result<InputSourceHandle, InputError>,
    {
        let mut resolve = |source: InputSource| {
            resolve(source.path()).map_err(|source_err| CatalogError::Resolve {
                path: source.path().to_owned(),
                source: source_err,
            })
        };
        let left = resolve(InputSource::LeftHand)?;
        let right = resolve(InputSource::RightHand)?;
        Self::from_handles(left, right)
    }

    pub fn from_handles(
        left: InputSourceHandle,
        right: InputSourceHandle,
    ) -> Result<Self, CatalogError> {
        for (source, handle) in [(InputSource::LeftHand, left), (InputSource::RightHand, right)] {
            if handle == InputSourceHandle::ANY {
                return Err(CatalogError::InvalidInputSourceHandle {
                    path: source.path(),
                    handle,
                });
            }
        }
        if left == right {
            return Err(CatalogError::InvalidInputSourceHandle {
                path: InputSource::RightHand.path(),
                handle: right,
            });
        }

        Ok(Self {
            handles: [InputSourceHandle::ANY, left, right],
        })
    }

    pub fn handle(&self, source: InputSource) -> InputSourceHandle {
        self.handles[source.index()]
    }

    pub fn source_of(&self, handle: InputSourceHandle) -> Option<InputSource> {
        InputSource::iter().find(|source| self.handle(*source) == handle)
    }
}

/**
 * The immutable set of action sets the scheduler works over
 *
 * Built once at startup, either from an [ActionManifest] or by hand through [CatalogBuilder],
 * and shared behind an `Arc` afterwards
 */
#[derive(Debug, Clone)]
pub struct Catalog {
    sources: InputSources,
    action_sets: Vec<ActionSet>,
    by_path: HashMap<String, ActionSetId>,
}

impl Catalog {
    pub fn builder(sources: InputSources) -> CatalogBuilder {
        CatalogBuilder {
            catalog: Catalog {
                sources,
                action_sets: Vec::new(),
                by_path: HashMap::new(),
            },
        }
    }

    /// Resolves every action set declared in `manifest` through `resolve`
    pub fn from_manifest<F>(
        manifest: &ActionManifest,
        sources: InputSources,
        mut resolve: F,
    ) -> Result<Self, CatalogError>
    where
        F: FnMut(&str) -> Result<ActionSetHandle, InputError>,
    {
        let mut builder = Self::builder(sources);
        for action_set in &manifest.action_sets {
            let usage = action_set.usage()?;
            let handle = resolve(&action_set.name).map_err(|source| CatalogError::Resolve {
                path: action_set.name.clone(),
                source,
            })?;
            builder.add(&action_set.name, usage, handle)?;
        }
        Ok(builder.build())
    }

    pub fn sources(&self) -> &InputSources {
        &self.sources
    }

    pub fn len(&self) -> usize {
        self.action_sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.action_sets.is_empty()
    }

    pub fn contains(&self, id: ActionSetId) -> bool {
        id.index() < self.action_sets.len()
    }

    /// Panics if `id` came from a different, larger catalog
    pub fn action_set(&self, id: ActionSetId) -> &ActionSet {
        &self.action_sets[id.index()]
    }

    pub fn action_sets(&self) -> impl Iterator<Item = (ActionSetId, &ActionSet)> + '_ {
        self.action_sets
            .iter()
            .enumerate()
            .map(|(idx, action_set)| (ActionSetId(idx as u32), action_set))
    }

    pub fn ids(&self) -> impl Iterator<Item = ActionSetId> {
        (0..self.action_sets.len() as u32).map(ActionSetId)
    }

    /// Looks a set up by full path (`/actions/default`) or short name (`default`)
    pub fn find(&self, name: &str) -> Option<ActionSetId> {
        if let Some(id) = self.by_path.get(name) {
            return Some(*id);
        }
        self.action_sets()
            .find(|(_, action_set)| action_set.short_name == name)
            .map(|(id, _)| id)
    }
}

pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    pub fn add(
        &mut self,
        path: &str,
        usage: ActionSetUsage,
        handle: ActionSetHandle,
    ) -> Result<ActionSetId, CatalogError> {
        let short_name = ACTION_SET_PATH
            .captures(path)
            .and_then(|captures| captures.get(1))
            .ok_or_else(|| CatalogError::BadActionSetPath(path.to_owned()))?
            .as_str()
            .to_owned();

        if self.catalog.by_path.contains_key(path) {
            return Err(CatalogError::DuplicateActionSet(path.to_owned()));
        }

        if handle == ActionSetHandle::INVALID
            || self
                .catalog
                .action_sets
                .iter()
                .any(|action_set| action_set.handle == handle)
        {
            return Err(CatalogError::InvalidActionSetHandle {
                path: path.to_owned(),
                handle,
            });
        }

        let id = ActionSetId(self.catalog.action_sets.len() as u32);
        self.catalog.action_sets.push(ActionSet {
            handle,
            full_path: path.to_owned(),
            short_name,
            usage,
        });
        self.catalog.by_path.insert(path.to_owned(), id);
        Ok(id)
    }

    pub fn build(self) -> Catalog {
        self.catalog
    }
}
