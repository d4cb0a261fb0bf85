//! Streaming window arithmetic.

use std::collections::BTreeSet;

use crate::coords::ChunkIndex;

/// Contiguous range of chunk indices kept alive around a center.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChunkWindow {
  pub center: ChunkIndex,
  /// Chunks kept on each side of the center.
  pub radius: i32,
}

impl ChunkWindow {
  pub fn new(center: ChunkIndex, radius: i32) -> Self {
    Self {
      center,
      radius: radius.max(0),
    }
  }

  pub fn first(&self) -> ChunkIndex {
    self.center - self.radius
  }

  pub fn last(&self) -> ChunkIndex {
    self.center + self.radius
  }

  /// Number of indices in the window, `2 * radius + 1`.
  pub fn len(&self) -> usize {
    (2 * self.radius + 1) as usize
  }

  pub fn contains(&self, index: ChunkIndex) -> bool {
    index >= self.first() && index <= self.last()
  }

  /// Indices in ascending order.
  pub fn indices(&self) -> impl Iterator<Item = ChunkIndex> + use<> {
    (self.first().0..=self.last().0).map(ChunkIndex)
  }
}

/// Computes which indices leave and enter when moving between windows.
///
/// Returns `(leaving, entering)`, each sorted ascending.
pub(crate) fn compute_index_changes(
  old: &ChunkWindow,
  new: &ChunkWindow,
) -> (Vec<ChunkIndex>, Vec<ChunkIndex>) {
  let old_set: BTreeSet<_> = old.indices().collect();
  let new_set: BTreeSet<_> = new.indices().collect();

  let leaving: Vec<_> = old_set.difference(&new_set).copied().collect();
  let entering: Vec<_> = new_set.difference(&old_set).copied().collect();

  (leaving, entering)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn window_is_symmetric_and_inclusive() {
    let window = ChunkWindow::new(ChunkIndex(0), 10);
    assert_eq!(window.len(), 21);
    assert_eq!(window.indices().count(), 21);
    assert!(window.contains(ChunkIndex(-10)));
    assert!(window.contains(ChunkIndex(10)));
    assert!(!window.contains(ChunkIndex(11)));
  }

  #[test]
  fn one_step_forward_swaps_one_index() {
    let old = ChunkWindow::new(ChunkIndex(0), 10);
    let new = ChunkWindow::new(ChunkIndex(1), 10);
    let (leaving, entering) = compute_index_changes(&old, &new);
    assert_eq!(leaving, vec![ChunkIndex(-10)]);
    assert_eq!(entering, vec![ChunkIndex(11)]);
  }

  #[test]
  fn disjoint_jump_replaces_everything() {
    let old = ChunkWindow::new(ChunkIndex(0), 2);
    let new = ChunkWindow::new(ChunkIndex(100), 2);
    let (leaving, entering) = compute_index_changes(&old, &new);
    assert_eq!(leaving.len(), 5);
    assert_eq!(entering.first(), Some(&ChunkIndex(98)));
    assert_eq!(entering.last(), Some(&ChunkIndex(102)));
  }

  #[test]
  fn growing_radius_only_enters() {
    let old = ChunkWindow::new(ChunkIndex(5), 1);
    let new = ChunkWindow::new(ChunkIndex(5), 3);
    let (leaving, entering) = compute_index_changes(&old, &new);
    assert!(leaving.is_empty());
    assert_eq!(entering.len(), 4);
  }
}
