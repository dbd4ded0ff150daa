//! Spatial partitioning of world space into cubic regions, and the manager
//! that discovers unvisited regions around the observer.
//!
//! Space is split into axis-aligned cubes of edge `region_size`. Each region
//! is populated at most once per session: [`RegionManager::ensure_generated`]
//! records a region in the [`RegionIndex`] before handing its center to the
//! populate callback, and never hands the same key out again.

use rustc_hash::FxHashSet;

/// Neighborhood half-width in regions; 1 gives the 3×3×3 block.
pub const NEIGHBORHOOD_RADIUS: i64 = 1;

/// Integer coordinates of a cubic region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionKey {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl RegionKey {
    /// Creates a new region key.
    pub fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Returns the key offset by `(dx, dy, dz)` regions, saturating at the
    /// edge of the key space.
    pub fn offset(self, dx: i64, dy: i64, dz: i64) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            z: self.z.saturating_add(dz),
        }
    }
}

/// Key of the region containing `position`: `floor(axis / region_size)` per axis.
///
/// Coordinates beyond the `i64` range saturate to the outermost key.
pub fn region_key_of(position: glam::Vec3, region_size: f32) -> RegionKey {
    RegionKey {
        x: (position.x / region_size).floor() as i64,
        y: (position.y / region_size).floor() as i64,
        z: (position.z / region_size).floor() as i64,
    }
}

/// World-space center of a region: `key * region_size + region_size / 2` per axis.
pub fn region_center(key: RegionKey, region_size: f32) -> glam::Vec3 {
    let half = region_size * 0.5;
    glam::Vec3::new(
        key.x as f32 * region_size + half,
        key.y as f32 * region_size + half,
        key.z as f32 * region_size + half,
    )
}

/// Set of regions that have already been populated.
///
/// Grows monotonically; entries are never removed.
#[derive(Debug, Default)]
pub struct RegionIndex {
    generated: FxHashSet<RegionKey>,
}

impl RegionIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `key` has been populated.
    pub fn contains(&self, key: &RegionKey) -> bool {
        self.generated.contains(key)
    }

    /// Marks `key` as populated. Returns `false` if it already was.
    pub fn insert(&mut self, key: RegionKey) -> bool {
        self.generated.insert(key)
    }

    pub fn len(&self) -> usize {
        self.generated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generated.is_empty()
    }

    /// Iterates over every populated key, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &RegionKey> {
        self.generated.iter()
    }
}

/// Discovers regions around the observer and hands each new one to a populator exactly once.
#[derive(Debug)]
pub struct RegionManager {
    region_size: f32,
    index: RegionIndex,
}

impl RegionManager {
    /// Creates a manager for regions of edge `region_size` with the default
    /// 3×3×3 neighborhood.
    pub fn new(region_size: f32) -> Self {
        Self {
            region_size,
            index: RegionIndex::new(),
        }
    }

    /// Edge length of one region.
    pub fn region_size(&self) -> f32 {
        self.region_size
    }

    /// The set of already populated regions.
    pub fn index(&self) -> &RegionIndex {
        &self.index
    }

    /// Key of the region containing `position`.
    pub fn key_of(&self, position: glam::Vec3) -> RegionKey {
        region_key_of(position, self.region_size)
    }

    /// Populates every unvisited region in the observer's neighborhood.
    ///
    /// For each offset in `[-1, 1]³` around the observer's region, a key that
    /// is not yet in the index is inserted and then passed to `populate`
    /// together with its world-space center. Returns the number of regions
    /// populated by this call.
    pub fn ensure_generated<F>(&mut self, observer: glam::Vec3, mut populate: F) -> usize
    where
        F: FnMut(RegionKey, glam::Vec3),
    {
        let origin = self.key_of(observer);
        let r = NEIGHBORHOOD_RADIUS;
        let mut discovered = 0;

        for dx in -r..=r {
            for dy in -r..=r {
                for dz in -r..=r {
                    let key = origin.offset(dx, dy, dz);
                    if !self.index.insert(key) {
                        continue;
                    }
                    let center = region_center(key, self.region_size);
                    tracing::debug!(
                        "Generating region ({}, {}, {}) centered at ({:.1}, {:.1}, {:.1})",
                        key.x,
                        key.y,
                        key.z,
                        center.x,
                        center.y,
                        center.z
                    );
                    populate(key, center);
                    discovered += 1;
                }
            }
        }

        discovered
    }
}
