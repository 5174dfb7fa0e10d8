// src/taxonomy.rs
//! Topic taxonomy: ordered categories → topic titles + icon.
//!
//! Declaration order is significant. It breaks ties in `resolve_category`
//! and drives the explore pass, so the table is an ordered `Vec`, never a map.
//! Loaded once at startup (built-in seed or TOML override) and shared
//! read-only afterwards.

use anyhow::{bail, Context};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::normalize::{contains_either, normalize};

// --- env defaults & names ---
pub const DEFAULT_TAXONOMY_CONFIG_PATH: &str = "config/taxonomy.toml";
pub const ENV_TAXONOMY_CONFIG_PATH: &str = "TAXONOMY_CONFIG_PATH";

/// (key, icon, topics) in declaration order.
const BUILTIN: &[(&str, &str, &[&str])] = &[
    (
        "science",
        "🔬",
        &[
            "Volcanoes",
            "The Water Cycle",
            "Magnets",
            "States of Matter",
            "Photosynthesis",
            "The Human Body",
            "Electricity",
        ],
    ),
    (
        "space",
        "🚀",
        &[
            "Black Holes",
            "The Solar System",
            "The Moon",
            "Stars and Galaxies",
            "Mars Exploration",
            "Astronauts",
            "Comets and Asteroids",
        ],
    ),
    (
        "animals",
        "🦁",
        &[
            "Ocean Animals",
            "Dinosaurs",
            "Insects",
            "Birds",
            "Rainforest Animals",
            "Animal Habitats",
            "Endangered Species",
        ],
    ),
    (
        "history",
        "🏛️",
        &[
            "Ancient Egypt",
            "The Roman Empire",
            "Medieval Castles",
            "The Renaissance",
            "World War II",
            "The Industrial Revolution",
            "Ancient Greece",
        ],
    ),
    (
        "math",
        "➗",
        &[
            "Fractions",
            "Multiplication",
            "Geometry",
            "Algebra Basics",
            "Probability",
            "Measurement",
            "Patterns and Sequences",
        ],
    ),
    (
        "coding",
        "💻",
        &[
            "Intro to Programming",
            "Algorithms",
            "Web Development",
            "Game Design",
            "Robotics",
            "Artificial Intelligence",
            "Cybersecurity",
        ],
    ),
    (
        "art",
        "🎨",
        &[
            "Color Theory",
            "Drawing Basics",
            "Famous Painters",
            "Sculpture",
            "Photography",
            "Digital Art",
        ],
    ),
    (
        "music",
        "🎵",
        &[
            "Rhythm and Beat",
            "Musical Instruments",
            "Famous Composers",
            "Reading Music",
            "Songwriting",
            "Music Around the World",
        ],
    ),
    (
        "geography",
        "🌍",
        &[
            "Continents and Oceans",
            "Mountains",
            "Rivers and Lakes",
            "Deserts",
            "Maps and Compasses",
            "Countries and Capitals",
        ],
    ),
    (
        "nature",
        "🌳",
        &[
            "Trees and Forests",
            "Weather",
            "Seasons",
            "Ecosystems",
            "Climate Change",
            "Recycling",
        ],
    ),
    (
        "sports",
        "⚽",
        &[
            "Soccer",
            "Basketball",
            "The Olympics",
            "Swimming",
            "Team Sports",
            "Fitness and Exercise",
        ],
    ),
    (
        "cooking",
        "🍳",
        &[
            "Kitchen Safety",
            "Baking Basics",
            "Healthy Eating",
            "Foods Around the World",
            "Fruits and Vegetables",
            "Science of Cooking",
        ],
    ),
    (
        "health",
        "🩺",
        &[
            "Nutrition",
            "Sleep",
            "Hygiene",
            "First Aid",
            "Mental Health",
            "The Heart",
        ],
    ),
    (
        "languages",
        "🗣️",
        &[
            "Greetings Around the World",
            "Alphabets and Writing Systems",
            "Learning New Words",
            "Grammar Basics",
            "Sign Language",
        ],
    ),
    (
        "literature",
        "📚",
        &[
            "Fairy Tales",
            "Poetry",
            "Myths and Legends",
            "Famous Authors",
            "Writing Stories",
            "Comics and Graphic Novels",
        ],
    ),
    (
        "business",
        "💼",
        &[
            "Money Basics",
            "Saving and Budgeting",
            "Entrepreneurship",
            "How Markets Work",
            "Inventions",
            "Advertising",
        ],
    ),
];

static BUILTIN_TAXONOMY: Lazy<Taxonomy> = Lazy::new(|| {
    let categories = BUILTIN
        .iter()
        .map(|(key, icon, topics)| TopicCategory {
            key: key.to_string(),
            icon: icon.to_string(),
            topics: topics.iter().map(|t| t.to_string()).collect(),
        })
        .collect();
    Taxonomy::from_categories(categories).expect("built-in taxonomy is valid")
});

/* ----------------------------
Config schema (from TOML)
---------------------------- */

/// One category of the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCategory {
    pub key: String,
    pub icon: String,
    pub topics: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TaxonomyRoot {
    #[serde(default)]
    categories: Vec<TopicCategory>,
}

/* ----------------------------
Compiled taxonomy
---------------------------- */

/// Ordered taxonomy with pre-normalized keys and topics for matching.
#[derive(Debug, Clone)]
pub struct Taxonomy {
    categories: Vec<TopicCategory>,
    norm_keys: Vec<String>,
    norm_topics: Vec<Vec<String>>,
}

impl Taxonomy {
    /// The built-in 16-category table.
    pub fn builtin() -> &'static Taxonomy {
        &BUILTIN_TAXONOMY
    }

    /// Validate and index a category list. Order is preserved.
    pub fn from_categories(categories: Vec<TopicCategory>) -> anyhow::Result<Self> {
        if categories.is_empty() {
            bail!("taxonomy has no categories");
        }

        let mut seen = HashSet::new();
        let mut norm_keys = Vec::with_capacity(categories.len());
        let mut norm_topics = Vec::with_capacity(categories.len());

        for c in &categories {
            let k = normalize(&c.key);
            if k.is_empty() {
                bail!("taxonomy category with empty key");
            }
            if !seen.insert(k.clone()) {
                bail!("duplicate taxonomy category `{}`", c.key);
            }
            if c.topics.is_empty() {
                bail!("taxonomy category `{}` has no topics", c.key);
            }
            norm_keys.push(k);
            norm_topics.push(c.topics.iter().map(|t| normalize(t)).collect());
        }

        Ok(Self {
            categories,
            norm_keys,
            norm_topics,
        })
    }

    /// Load from a TOML string (`[[categories]]` tables).
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let root: TaxonomyRoot = toml::from_str(toml_str).context("parse taxonomy TOML")?;
        Self::from_categories(root.categories)
    }

    /// Load from `path`; a missing file falls back to the built-in table.
    /// A present but invalid file is an error.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            info!(
                target: "engine",
                path = %path.display(),
                "no taxonomy override, using built-in table"
            );
            return Ok(Self::builtin().clone());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading taxonomy from {}", path.display()))?;
        let t = Self::from_toml_str(&content)
            .with_context(|| format!("invalid taxonomy at {}", path.display()))?;
        info!(
            target: "engine",
            path = %path.display(),
            categories = t.categories.len(),
            "taxonomy loaded"
        );
        Ok(t)
    }

    pub fn categories(&self) -> &[TopicCategory] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Exact lookup by (normalized) category key.
    pub fn get(&self, key: &str) -> Option<&TopicCategory> {
        let k = normalize(key);
        self.norm_keys
            .iter()
            .position(|nk| *nk == k)
            .map(|i| &self.categories[i])
    }

    /// Map a free-text signal to a category.
    ///
    /// Priority: exact key → key containment (either direction) → topic
    /// containment (either direction). Within a step the first category in
    /// declaration order wins; there is no "best match" scoring.
    pub fn resolve_category(&self, signal: &str) -> Option<&TopicCategory> {
        let s = normalize(signal);
        if s.is_empty() {
            return None;
        }

        if let Some(c) = self.get(&s) {
            return Some(c);
        }

        if let Some(i) = self.norm_keys.iter().position(|k| contains_either(&s, k)) {
            return Some(&self.categories[i]);
        }

        self.norm_topics
            .iter()
            .position(|topics| topics.iter().any(|t| contains_either(&s, t)))
            .map(|i| &self.categories[i])
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin().clone()
    }
}
