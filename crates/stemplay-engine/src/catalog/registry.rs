use std::collections::HashMap;

use crate::api::types::GameId;
use crate::catalog::manifest::{CatalogManifest, GameDefinition, Subject};
use crate::error::CatalogError;

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// Read-only game catalog with id lookup.
#[derive(Debug, Clone)]
pub struct Catalog {
    manifest: CatalogManifest,
    /// GameId → (subject index, game index).
    index: HashMap<GameId, (usize, usize)>,
}

impl Catalog {
    pub fn from_manifest(manifest: CatalogManifest) -> Result<Self, CatalogError> {
        let mut index = HashMap::new();
        for (si, subject) in manifest.subjects.iter().enumerate() {
            for (gi, game) in subject.games.iter().enumerate() {
                if index.insert(game.id.clone(), (si, gi)).is_some() {
                    return Err(CatalogError::Duplicate(game.id.clone()));
                }
            }
        }
        Ok(Self { manifest, index })
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::from_manifest(CatalogManifest::from_json(json)?)
    }

    /// The catalog shipped with the engine.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    /// Look up a game by id. Unknown ids are an error, never a fallback game.
    pub fn lookup(&self, id: &str) -> Result<&GameDefinition, CatalogError> {
        let key = GameId::from(id);
        match self.index.get(&key) {
            Some(&(si, gi)) => Ok(&self.manifest.subjects[si].games[gi]),
            None => Err(CatalogError::NotFound(key)),
        }
    }

    /// The subject a game belongs to.
    pub fn subject_of(&self, id: &str) -> Option<&Subject> {
        self.index
            .get(&GameId::from(id))
            .map(|&(si, _)| &self.manifest.subjects[si])
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.manifest.subjects
    }

    /// Iterate over every game in catalog order.
    pub fn games(&self) -> impl Iterator<Item = &GameDefinition> {
        self.manifest.subjects.iter().flat_map(|s| s.games.iter())
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn manifest(&self) -> &CatalogManifest {
        &self.manifest
    }
}
