//! Ballot catalog: the categories and candidates loaded at startup.
//!
//! The catalog is a TOML file with one `[[categories]]` table per category
//! and nested `[[categories.candidates]]` tables. A built-in catalog ships
//! with the crate.

use std::path::Path;

use serde::Deserialize;

use crate::error::{CoreError, CoreResult};
use crate::model::{Candidate, Category, LeadershipWinner};
use crate::store::BallotStore;

const BUILTIN: &str = include_str!("../catalog.toml");

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub categories: Vec<CatalogCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub special: bool,
    #[serde(default)]
    pub is_leadership_prize: bool,
    #[serde(default)]
    pub winner: Option<LeadershipWinner>,
    #[serde(default)]
    pub candidates: Vec<CatalogCandidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogCandidate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub achievements: Vec<String>,
}

impl Catalog {
    /// The catalog compiled into the crate.
    pub fn builtin() -> CoreResult<Self> {
        Self::parse(BUILTIN)
    }

    /// Loads a catalog from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::FileNotFound`] if the file does not exist.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed or invalid.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => CoreError::FileNotFound(path.to_path_buf()),
            _ => CoreError::Io(e),
        })?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> CoreResult<Self> {
        let catalog: Self =
            toml::from_str(content).map_err(|e| CoreError::ConfigParse(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> CoreResult<()> {
        let leadership = self
            .categories
            .iter()
            .filter(|c| c.is_leadership_prize)
            .count();
        if leadership > 1 {
            return Err(CoreError::ConfigParse(
                "at most one leadership prize category is allowed".to_string(),
            ));
        }

        let mut ids = std::collections::HashSet::new();
        for category in &self.categories {
            if !ids.insert(category.id.as_str()) {
                return Err(CoreError::ConfigParse(format!(
                    "duplicate category id: {}",
                    category.id
                )));
            }
        }
        let mut candidate_ids = std::collections::HashSet::new();
        for candidate in self.categories.iter().flat_map(|c| &c.candidates) {
            if !candidate_ids.insert(candidate.id.as_str()) {
                return Err(CoreError::ConfigParse(format!(
                    "duplicate candidate id: {}",
                    candidate.id
                )));
            }
        }
        Ok(())
    }

    /// Splits the catalog into store records.
    pub fn into_records(self) -> (Vec<Category>, Vec<Candidate>) {
        let mut categories = Vec::with_capacity(self.categories.len());
        let mut candidates = Vec::new();
        for entry in self.categories {
            candidates.extend(entry.candidates.into_iter().map(|c| Candidate {
                id: c.id,
                category_id: entry.id.clone(),
                name: c.name,
                alias: c.alias,
                image: c.image,
                bio: c.bio,
                achievements: c.achievements,
            }));
            categories.push(Category {
                id: entry.id,
                name: entry.name,
                subtitle: entry.subtitle,
                special: entry.special,
                is_leadership_prize: entry.is_leadership_prize,
                winner: entry.winner,
            });
        }
        (categories, candidates)
    }

    /// Upserts every category and candidate into `store`.
    ///
    /// Returns the number of candidates written.
    pub async fn seed(self, store: &dyn BallotStore) -> CoreResult<usize> {
        let (categories, candidates) = self.into_records();
        for category in categories {
            store.upsert_category(category).await?;
        }
        let count = candidates.len();
        for candidate in candidates {
            store.upsert_candidate(candidate).await?;
        }
        tracing::info!(candidates = count, "catalog seeded");
        Ok(count)
    }
}
