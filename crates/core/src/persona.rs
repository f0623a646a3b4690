//! Persona catalog and the metric-tiered assignment engine.
//!
//! A profile's follower and post counts select a [`RankClass`] tier (first
//! matching threshold wins), then one persona is drawn uniformly at random
//! from the catalog entries of that tier. The random source is passed in by
//! the caller so selection is reproducible under a seeded generator.
//!
//! Tier thresholds, highest first:
//!
//! | Tier      | Rule                                  |
//! |-----------|---------------------------------------|
//! | Legendary | followers >= 10000 AND posts >= 500   |
//! | Epic      | followers >= 5000 AND posts >= 300    |
//! | Rare      | followers >= 1000 OR posts >= 100     |
//! | Common    | everything else                       |
//!
//! The Rare rule is an OR while the two upper tiers are ANDs. This matches
//! the product behaviour and must not be "normalized".

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Catalog shipped with the binary, used when no override file is configured.
const BUILTIN_CATALOG: &str = include_str!("../catalog/personas.json");

pub const LEGENDARY_MIN_FOLLOWERS: u64 = 10_000;
pub const LEGENDARY_MIN_POSTS: u64 = 500;
pub const EPIC_MIN_FOLLOWERS: u64 = 5_000;
pub const EPIC_MIN_POSTS: u64 = 300;
pub const RARE_MIN_FOLLOWERS: u64 = 1_000;
pub const RARE_MIN_POSTS: u64 = 100;

// ---------------------------------------------------------------------------
// RankClass
// ---------------------------------------------------------------------------

/// Persona tier. Ordering is Common < Rare < Epic < Legendary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RankClass {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl RankClass {
    /// All tiers, lowest first.
    pub const ALL: [RankClass; 4] = [
        RankClass::Common,
        RankClass::Rare,
        RankClass::Epic,
        RankClass::Legendary,
    ];

    /// Lowercase name as stored in the `users.persona_rank` column.
    pub fn as_str(self) -> &'static str {
        match self {
            RankClass::Common => "common",
            RankClass::Rare => "rare",
            RankClass::Epic => "epic",
            RankClass::Legendary => "legendary",
        }
    }

    /// Leaderboard sort priority; higher sorts first.
    pub fn priority(self) -> i32 {
        match self {
            RankClass::Common => 1,
            RankClass::Rare => 2,
            RankClass::Epic => 3,
            RankClass::Legendary => 4,
        }
    }

    /// Number of flame badges shown on a profile card.
    pub fn flame_count(self) -> u8 {
        match self {
            RankClass::Common => 1,
            RankClass::Rare => 2,
            RankClass::Epic => 3,
            RankClass::Legendary => 4,
        }
    }
}

impl fmt::Display for RankClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankClass {
    type Err = CoreError;

    /// Case-insensitive, so both `"legendary"` and `"Legendary"` parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RankClass::ALL
            .into_iter()
            .find(|rank| rank.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::Validation(format!("Unknown rank class '{s}'")))
    }
}

// ---------------------------------------------------------------------------
// Persona
// ---------------------------------------------------------------------------

/// A themed alien persona from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub rank_class: RankClass,
    pub archetype: String,
    pub special_ability: String,
    pub flavor_text: String,
}

/// Engagement metrics that drive tier eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileMetrics {
    pub followers: u64,
    pub posts: u64,
}

impl ProfileMetrics {
    /// Build metrics from signed storage values. Negative counts are
    /// clamped to zero.
    pub fn new(followers: i64, posts: i64) -> Self {
        Self {
            followers: u64::try_from(followers).unwrap_or(0),
            posts: u64::try_from(posts).unwrap_or(0),
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// On-disk catalog layout.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    default: Persona,
    personas: Vec<Persona>,
}

/// Immutable persona catalog, loaded once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct PersonaCatalog {
    personas: Vec<Persona>,
    default_persona: Persona,
}

impl PersonaCatalog {
    /// Build a catalog from its entries and the fallback persona.
    ///
    /// The fallback must be a Common persona with a name. Entry names must
    /// be non-empty and unique. An empty tier is allowed; assignment falls
    /// back to the default persona for it.
    pub fn new(personas: Vec<Persona>, default_persona: Persona) -> Result<Self, CoreError> {
        if default_persona.rank_class != RankClass::Common {
            return Err(CoreError::Validation(format!(
                "Default persona '{}' must be common, got {}",
                default_persona.name, default_persona.rank_class
            )));
        }
        if default_persona.name.trim().is_empty() {
            return Err(CoreError::Validation(
                "Default persona name must not be empty".into(),
            ));
        }

        let mut seen = HashSet::new();
        for persona in &personas {
            if persona.name.trim().is_empty() {
                return Err(CoreError::Validation(
                    "Persona names must not be empty".into(),
                ));
            }
            if !seen.insert(persona.name.as_str()) {
                return Err(CoreError::Validation(format!(
                    "Duplicate persona name '{}' in catalog",
                    persona.name
                )));
            }
        }

        Ok(Self {
            personas,
            default_persona,
        })
    }

    /// Parse a catalog from its JSON representation.
    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        let file: CatalogFile = serde_json::from_str(raw)
            .map_err(|e| CoreError::Validation(format!("Invalid persona catalog: {e}")))?;
        Self::new(file.personas, file.default)
    }

    /// The catalog compiled into the binary.
    pub fn builtin() -> Result<Self, CoreError> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn personas(&self) -> &[Persona] {
        &self.personas
    }

    pub fn default_persona(&self) -> &Persona {
        &self.default_persona
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }

    /// Entries of one tier, in catalog order.
    pub fn tier(&self, rank: RankClass) -> Vec<&Persona> {
        self.personas
            .iter()
            .filter(|p| p.rank_class == rank)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Assignment
// ---------------------------------------------------------------------------

/// Tier a profile is eligible for. First matching rule wins.
pub fn eligible_rank(metrics: ProfileMetrics) -> RankClass {
    let ProfileMetrics { followers, posts } = metrics;

    if followers >= LEGENDARY_MIN_FOLLOWERS && posts >= LEGENDARY_MIN_POSTS {
        RankClass::Legendary
    } else if followers >= EPIC_MIN_FOLLOWERS && posts >= EPIC_MIN_POSTS {
        RankClass::Epic
    } else if followers >= RARE_MIN_FOLLOWERS || posts >= RARE_MIN_POSTS {
        RankClass::Rare
    } else {
        RankClass::Common
    }
}

/// Pick a persona for the given metrics.
///
/// Draws uniformly from the eligible tier. When the catalog has no entry
/// for that tier the catalog's default persona is returned. Never fails.
pub fn assign_persona<R: Rng + ?Sized>(
    metrics: ProfileMetrics,
    catalog: &PersonaCatalog,
    rng: &mut R,
) -> Persona {
    let rank = eligible_rank(metrics);
    let pool = catalog.tier(rank);

    match pool.choose(rng) {
        Some(persona) => (*persona).clone(),
        None => catalog.default_persona().clone(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
