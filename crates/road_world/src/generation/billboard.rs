//! Billboard catalog and roadside placement.
//!
//! The catalog is an ordered list of `(title, content)` pairs loaded once at
//! startup. An empty catalog is valid and simply produces no billboards.

use std::path::{Path, PathBuf};
use std::{fmt, io};

use bevy::math::Vec3;
use bevy::prelude::Resource;
use rand::Rng;
use serde::Deserialize;

use crate::coords::ChunkIndex;

/// Text shown on the back of every board.
pub const BACK_FACE_TITLE: &str = "OOPS";
pub const BACK_FACE_CONTENT: &str = "NOTHING HERE,\n TURN AROUND GO AHEAD";

/// One catalog record.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BillboardEntry {
  #[serde(default)]
  pub title: String,
  #[serde(default)]
  pub content: String,
}

impl BillboardEntry {
  pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
    Self {
      title: title.into(),
      content: content.into(),
    }
  }

  fn is_blank(&self) -> bool {
    self.title.trim().is_empty() && self.content.trim().is_empty()
  }
}

/// How a chunk picks its catalog entry.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum BillboardPolicy {
  /// Entry `index mod len`; neighbouring chunks rotate through the list.
  #[default]
  Sequential,
  /// Uniform pick from the chunk's seeded RNG.
  Random,
}

/// Placement parameters for roadside billboards.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct BillboardConfig {
  pub policy: BillboardPolicy,
  /// Chance that a chunk carries a billboard, in `[0, 1]`.
  pub placement_chance: f64,
  /// Distance from the road edge to the pillar.
  pub edge_offset: f32,
}

impl Default for BillboardConfig {
  fn default() -> Self {
    Self {
      policy: BillboardPolicy::Sequential,
      placement_chance: 0.5,
      edge_offset: 10.0,
    }
  }
}

/// Which side of the road a board stands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadSide {
  Left,
  Right,
}

impl RoadSide {
  /// Sign of the X offset for this side.
  pub fn sign(self) -> f32 {
    match self {
      RoadSide::Left => -1.0,
      RoadSide::Right => 1.0,
    }
  }
}

/// A billboard attached to a road chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct Billboard {
  pub entry: BillboardEntry,
  pub side: RoadSide,
  /// Base of the pillar in world space.
  pub position: Vec3,
}

/// Ordered billboard content shared by every chunk.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct BillboardCatalog {
  entries: Vec<BillboardEntry>,
}

#[derive(Deserialize)]
struct CatalogFile {
  #[serde(default)]
  billboard: Vec<BillboardEntry>,
}

impl BillboardCatalog {
  /// Builds a catalog, dropping blank entries.
  pub fn new(entries: Vec<BillboardEntry>) -> Self {
    let total = entries.len();
    let entries: Vec<_> = entries.into_iter().filter(|e| !e.is_blank()).collect();
    if entries.len() != total {
      bevy::log::warn!("Dropped {} blank billboard entries", total - entries.len());
    }
    Self { entries }
  }

  /// Parses a `[[billboard]]` TOML document.
  pub fn from_toml_str(source: &str) -> Result<Self, CatalogError> {
    let file: CatalogFile = toml::from_str(source)?;
    Ok(Self::new(file.billboard))
  }

  /// Reads and parses a catalog file.
  pub fn load(path: &Path) -> Result<Self, CatalogError> {
    let source = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_toml_str(&source)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn entries(&self) -> &[BillboardEntry] {
    &self.entries
  }

  /// Picks the entry for `index` under `policy`.
  ///
  /// Returns `None` for an empty catalog.
  pub fn select<R: Rng>(
    &self,
    policy: BillboardPolicy,
    index: ChunkIndex,
    rng: &mut R,
  ) -> Option<&BillboardEntry> {
    if self.entries.is_empty() {
      return None;
    }
    let slot = match policy {
      BillboardPolicy::Sequential => index.0.rem_euclid(self.entries.len() as i32) as usize,
      BillboardPolicy::Random => rng.random_range(0..self.entries.len()),
    };
    self.entries.get(slot)
  }
}

/// Error loading the billboard catalog.
#[derive(Debug)]
pub enum CatalogError {
  Io { path: PathBuf, source: io::Error },
  Parse(toml::de::Error),
}

impl From<toml::de::Error> for CatalogError {
  fn from(err: toml::de::Error) -> Self {
    Self::Parse(err)
  }
}

impl fmt::Display for CatalogError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Io { path, source } => write!(f, "cannot read {}: {}", path.display(), source),
      Self::Parse(e) => write!(f, "invalid billboard catalog: {}", e),
    }
  }
}

impl std::error::Error for CatalogError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::Parse(e) => Some(e),
    }
  }
}

/// Rolls placement for one chunk.
pub(crate) fn place<R: Rng>(
  catalog: &BillboardCatalog,
  config: &BillboardConfig,
  road_width: f32,
  index: ChunkIndex,
  chunk_offset: f32,
  rng: &mut R,
) -> Option<Billboard> {
  if catalog.is_empty() || !rng.random_bool(config.placement_chance.clamp(0.0, 1.0)) {
    return None;
  }
  let side = if rng.random_bool(0.5) {
    RoadSide::Right
  } else {
    RoadSide::Left
  };
  let entry = catalog.select(config.policy, index, rng)?;

  let x = side.sign() * (road_width / 2.0 + config.edge_offset);
  Some(Billboard {
    entry: entry.clone(),
    side,
    position: Vec3::new(x, 0.0, chunk_offset),
  })
}

#[cfg(test)]
mod tests {
  use rand::SeedableRng;
  use rand::rngs::StdRng;

  use super::*;

  fn catalog() -> BillboardCatalog {
    BillboardCatalog::new(vec![
      BillboardEntry::new("A", "first"),
      BillboardEntry::new("B", "second"),
      BillboardEntry::new("C", "third"),
    ])
  }

  #[test]
  fn parses_toml_and_drops_blank_entries() {
    let catalog = BillboardCatalog::from_toml_str(
      r#"
        [[billboard]]
        title = "Hello"
        content = "World"

        [[billboard]]
        title = "  "

        [[billboard]]
        content = "No title"
      "#,
    )
    .unwrap();

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.entries()[1], BillboardEntry::new("", "No title"));
  }

  #[test]
  fn malformed_toml_is_an_error() {
    let err = BillboardCatalog::from_toml_str("[[billboard]\ntitle = 1").unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)));
  }

  #[test]
  fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = BillboardCatalog::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
  }

  #[test]
  fn sequential_wraps_negative_indices() {
    let catalog = catalog();
    let mut rng = StdRng::seed_from_u64(0);
    let title = |i: i32, rng: &mut StdRng| {
      catalog
        .select(BillboardPolicy::Sequential, ChunkIndex(i), rng)
        .map(|e| e.title.clone())
    };
    assert_eq!(title(0, &mut rng).as_deref(), Some("A"));
    assert_eq!(title(4, &mut rng).as_deref(), Some("B"));
    assert_eq!(title(-1, &mut rng).as_deref(), Some("C"));
  }

  #[test]
  fn empty_catalog_places_nothing() {
    let config = BillboardConfig {
      placement_chance: 1.0,
      ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(3);
    for i in -20..20 {
      let placed = place(
        &BillboardCatalog::default(),
        &config,
        10.0,
        ChunkIndex(i),
        0.0,
        &mut rng,
      );
      assert!(placed.is_none());
    }
  }

  #[test]
  fn placed_board_stands_off_the_road_edge() {
    let config = BillboardConfig {
      placement_chance: 1.0,
      policy: BillboardPolicy::Random,
      ..Default::default()
    };
    let mut rng = StdRng::seed_from_u64(11);
    let board = place(&catalog(), &config, 10.0, ChunkIndex(2), 100.0, &mut rng).unwrap();
    assert_eq!(board.position.x.abs(), 15.0);
    assert_eq!(board.position.x.signum(), board.side.sign());
    assert_eq!(board.position.z, 100.0);
  }
}
