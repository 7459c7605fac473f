use std::collections::HashMap;
use std::sync::RwLock;

use kurbo::Vec2;
use smallvec::SmallVec;

use crate::{
    foundation::beat::Beat,
    foundation::error::{ConvertError, ConvertResult},
    foundation::math::rotate_deg,
    timeline::layers::LayerStack,
};

/// Ancestor chain of a line, child first.
pub(crate) type Chain = SmallVec<[usize; 8]>;

type CacheKey = (usize, u64);

/// One judge line: its event layers and an optional parent line.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Line {
    /// Index of the parent line; `None` for a root line.
    pub parent: Option<usize>,
    /// Event layers animating this line.
    pub layers: LayerStack,
}

impl Line {
    /// Root line over `layers`.
    pub fn root(layers: LayerStack) -> Self {
        Self {
            parent: None,
            layers,
        }
    }

    /// Line nested under `parent`.
    pub fn child(parent: usize, layers: LayerStack) -> Self {
        Self {
            parent: Some(parent),
            layers,
        }
    }
}

#[derive(Debug, Default)]
struct ResolveCache {
    coverage: RwLock<HashMap<CacheKey, bool>>,
}

impl ResolveCache {
    fn coverage(&self, key: CacheKey) -> Option<bool> {
        self.coverage.read().ok()?.get(&key).copied()
    }

    fn store_coverage(&self, key: CacheKey, covered: bool) {
        if let Ok(mut map) = self.coverage.write() {
            map.insert(key, covered);
        }
    }
}

/// Judge lines forming a forest through parent links.
///
/// Queries are pure functions of the lines. XY coverage, which resampling asks for twice per
/// beat, is memoized per `(line, beat)`; every mutation drops the memo. The structure is `Sync`, so one hierarchy can serve a whole parallel batch.
#[derive(Debug, Default)]
pub struct LineHierarchy {
    lines: Vec<Line>,
    cache: ResolveCache,
}

impl Clone for LineHierarchy {
    fn clone(&self) -> Self {
        Self {
            lines: self.lines.clone(),
            cache: ResolveCache::default(),
        }
    }
}

impl LineHierarchy {
    /// Empty hierarchy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and validate a hierarchy.
    pub fn from_lines(lines: Vec<Line>) -> ConvertResult<Self> {
        let hierarchy = Self {
            lines,
            cache: ResolveCache::default(),
        };
        hierarchy.validate()?;
        Ok(hierarchy)
    }

    /// Append a line and return its index.
    ///
    /// The line is rejected (and not kept) when its parent is out of range or closes a loop.
    pub fn push(&mut self, line: Line) -> ConvertResult<usize> {
        let index = self.lines.len();
        self.lines.push(line);
        if let Err(err) = self.ancestry(index) {
            self.lines.pop();
            return Err(err);
        }
        self.invalidate();
        Ok(index)
    }

    /// Remove the line at `index`.
    ///
    /// Children of the removed line become roots, and parent links past `index` shift down.
    pub fn remove(&mut self, index: usize) -> Option<Line> {
        if index >= self.lines.len() {
            return None;
        }
        let line = self.lines.remove(index);
        for other in &mut self.lines {
            other.parent = match other.parent {
                Some(p) if p == index => None,
                Some(p) if p > index => Some(p - 1),
                p => p,
            };
        }
        self.invalidate();
        Some(line)
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.invalidate();
    }

    /// Lines in index order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Line at `index`.
    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Mutable access to a line. Drops the memo.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Line> {
        self.invalidate();
        self.lines.get_mut(index)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// `true` when there are no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop memoized query results.
    pub fn invalidate(&mut self) {
        self.cache = ResolveCache::default();
    }

    /// Check every parent link is in range and every chain reaches a root.
    pub fn validate(&self) -> ConvertResult<()> {
        (0..self.lines.len()).try_for_each(|i| self.ancestry(i).map(|_| ()))
    }

    /// `index` followed by its ancestors up to the root.
    pub(crate) fn ancestry(&self, index: usize) -> ConvertResult<Chain> {
        if index >= self.lines.len() {
            return Err(ConvertError::structure(
                index,
                format!("no such line ({} lines)", self.lines.len()),
            ));
        }
        let mut chain = Chain::new();
        chain.push(index);
        let mut current = index;
        while let Some(parent) = self.lines[current].parent {
            if parent >= self.lines.len() {
                return Err(ConvertError::structure(
                    current,
                    format!(
                        "parent index {parent} out of range ({} lines)",
                        self.lines.len()
                    ),
                ));
            }
            if chain.contains(&parent) {
                return Err(ConvertError::structure(
                    index,
                    format!("parent chain loops back to line {parent}"),
                ));
            }
            chain.push(parent);
            current = parent;
        }
        Ok(chain)
    }

    /// Absolute position of line `index` at `beat`.
    ///
    /// A child's summed offset is rotated by its parent's negated angle and added to the parent's
    /// absolute position; roots report their summed offset directly.
    pub fn position_at(&self, index: usize, beat: f64) -> ConvertResult<(f32, f32)> {
        let chain = self.ancestry(index)?;
        let mut pos = Vec2::ZERO;
        let mut parent: Option<&LayerStack> = None;
        for &i in chain.iter().rev() {
            let layers = &self.lines[i].layers;
            let offset = Vec2::new(
                f64::from(layers.x_at(beat)),
                f64::from(layers.y_at(beat)),
            );
            pos = match parent {
                None => offset,
                Some(p) => pos + rotate_deg(offset, -f64::from(p.angle_at(beat))),
            };
            parent = Some(layers);
        }

        Ok((pos.x as f32, pos.y as f32))
    }

    /// `true` when line `index` or any ancestor has an X or Y keyframe covering `beat`.
    pub fn has_xy_event_at(&self, index: usize, beat: f64) -> ConvertResult<bool> {
        let key = (index, beat.to_bits());
        if let Some(covered) = self.cache.coverage(key) {
            return Ok(covered);
        }

        let covered = self.ancestry(index)?.iter().any(|&i| {
            let layers = &self.lines[i].layers;
            layers.has_x_event_at(beat) || layers.has_y_event_at(beat)
        });
        self.cache.store_coverage(key, covered);
        Ok(covered)
    }

    /// Latest animated end beat over line `index` and every ancestor.
    pub fn chain_last_event_end(&self, index: usize) -> ConvertResult<Beat> {
        Ok(self
            .ancestry(index)?
            .iter()
            .map(|&i| self.lines[i].layers.last_event_end())
            .max_by(|a, b| a.to_f64().total_cmp(&b.to_f64()))
            .unwrap_or(Beat::ZERO))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/hierarchy.rs"]
mod tests;
