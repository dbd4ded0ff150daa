//! Stochastic population of a region with stars, clusters, suns, and nebulae.
//!
//! [`CelestialGenerator`] holds only fixed layout constants; every call
//! appends into a caller-owned [`CelestialBodies`] and draws from the shared
//! [`UniverseRng`].
//!
//! Cluster placement rejects a candidate center if any existing star (or any
//! previously accepted cluster center) lies within the minimum separation.
//! The star test is a linear scan over every star generated so far, so the
//! cost of populating a region grows with the session's total star count.
//! A spatial index would be faster but changes which candidates survive;
//! keep the scan unless that trade is deliberate.

use hexa_config::ParameterSet;

use crate::nebula::{Nebula, NebulaKind};
use crate::rng::UniverseRng;
use crate::star::{Glimmer, Star};
use crate::sun::Sun;

/// Scattered stars per region at density 1.0.
pub const SCATTERED_STARS_PER_REGION: usize = 80;

/// Scattered stars fill a sphere of this fraction of the region edge.
pub const SCATTER_RADIUS_FRACTION: f32 = 0.8;

/// Minimum distance between a new cluster center and any existing star.
pub const MIN_CLUSTER_DISTANCE: f32 = 100.0;

/// Clusters farther than this from the world origin use the sparse layout.
pub const FAR_CLUSTER_THRESHOLD: f32 = 2000.0;

/// Base nebula particle count range, before the particle density multiplier.
const NEBULA_PARTICLES: (i32, i32) = (2000, 5000);

/// Record of an accepted star cluster.
#[derive(Clone, Debug, PartialEq)]
pub struct StarCluster {
    pub center: glam::Vec3,
    pub radius: f32,
    pub member_count: usize,
    /// Whether the sparse far-from-origin layout was used.
    pub far: bool,
}

/// Every celestial body generated so far. Append-only.
#[derive(Debug, Default)]
pub struct CelestialBodies {
    pub stars: Vec<Star>,
    pub suns: Vec<Sun>,
    pub nebulae: Vec<Nebula>,
    pub clusters: Vec<StarCluster>,
    /// Cluster candidates dropped for being too close to existing content.
    pub rejected_clusters: u64,
}

impl CelestialBodies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if any star or accepted cluster center lies strictly
    /// closer than `min_distance` to `point`.
    pub fn is_crowded(&self, point: glam::Vec3, min_distance: f32) -> bool {
        self.stars
            .iter()
            .any(|star| star.position.distance(point) < min_distance)
            || self
                .clusters
                .iter()
                .any(|cluster| cluster.center.distance(point) < min_distance)
    }
}

/// Populates regions. Stateless between calls apart from its layout constants.
#[derive(Clone, Debug)]
pub struct CelestialGenerator {
    region_size: f32,
    min_cluster_distance: f32,
    far_cluster_threshold: f32,
}

impl CelestialGenerator {
    /// Create a generator for regions of edge `region_size`.
    pub fn new(region_size: f32) -> Self {
        Self {
            region_size,
            min_cluster_distance: MIN_CLUSTER_DISTANCE,
            far_cluster_threshold: FAR_CLUSTER_THRESHOLD,
        }
    }

    pub fn region_size(&self) -> f32 {
        self.region_size
    }

    pub fn min_cluster_distance(&self) -> f32 {
        self.min_cluster_distance
    }

    /// Populate one region: scattered stars, then a possible sun, then a
    /// possible nebula, then one or two cluster candidates.
    pub fn populate(
        &self,
        bodies: &mut CelestialBodies,
        region_center: glam::Vec3,
        params: &ParameterSet,
        rng: &mut UniverseRng,
    ) {
        let scattered = scaled_count(SCATTERED_STARS_PER_REGION, params.scattered_star_density());
        self.scatter_stars(
            bodies,
            region_center,
            scattered,
            self.region_size * SCATTER_RADIUS_FRACTION,
            params,
            rng,
        );

        self.maybe_place_sun(bodies, region_center, params, rng);
        self.maybe_place_nebula(bodies, region_center, params, rng);

        let candidates = rng.range_i32(1, 3);
        for _ in 0..candidates {
            let offset = glam::Vec3::new(rng.unit() - 0.5, rng.unit() - 0.5, rng.unit() - 0.5);
            let candidate = region_center + offset * self.region_size;
            self.try_place_cluster(bodies, candidate, params, rng);
        }
    }

    /// Append `count` glimmer-capable stars inside a sphere around `center`.
    pub fn scatter_stars(
        &self,
        bodies: &mut CelestialBodies,
        center: glam::Vec3,
        count: usize,
        radius: f32,
        params: &ParameterSet,
        rng: &mut UniverseRng,
    ) {
        bodies.stars.reserve(count);
        for _ in 0..count {
            let (position, _) = rng.point_in_sphere(center, radius);
            let size = rng.unit() * 0.15 + 0.05;
            let brightness = 0.85 + rng.unit() * 0.15;
            let glimmer = Glimmer::roll(rng, params);
            bodies
                .stars
                .push(Star::scattered(position, size, brightness, glimmer));
        }
    }

    /// Single Bernoulli draw against `sun_rarity`; on success places one sun
    /// at a uniform distance in `[sun_min_distance, sun_max_distance]` from
    /// `region_center` in a uniformly random direction. Returns whether a sun
    /// was placed.
    pub fn maybe_place_sun(
        &self,
        bodies: &mut CelestialBodies,
        region_center: glam::Vec3,
        params: &ParameterSet,
        rng: &mut UniverseRng,
    ) -> bool {
        if rng.unit() >= params.sun_rarity() {
            return false;
        }
        let distance = rng.range_f32(params.sun_min_distance(), params.sun_max_distance());
        let direction = rng.unit_sphere_direction();
        self.place_sun(bodies, region_center + direction * distance, params, rng);
        true
    }

    /// Place a sun at `position` with a size drawn from the configured range.
    pub fn place_sun(
        &self,
        bodies: &mut CelestialBodies,
        position: glam::Vec3,
        params: &ParameterSet,
        rng: &mut UniverseRng,
    ) {
        let size = rng.range_f32(params.sun_min_size(), params.sun_max_size());
        let sun = Sun::new(position, size, rng);
        tracing::info!(
            "Created a sun of size {:.0} at ({:.1}, {:.1}, {:.1})",
            size,
            position.x,
            position.y,
            position.z
        );
        bodies.suns.push(sun);
    }

    /// Single Bernoulli draw against `nebula_rarity`; on success places one
    /// nebula within a quarter region edge of `region_center` on each axis.
    pub fn maybe_place_nebula(
        &self,
        bodies: &mut CelestialBodies,
        region_center: glam::Vec3,
        params: &ParameterSet,
        rng: &mut UniverseRng,
    ) -> bool {
        if rng.unit() >= params.nebula_rarity() {
            return false;
        }
        let spread = self.region_size * 0.5;
        let offset = glam::Vec3::new(
            (rng.unit() - 0.5) * spread,
            (rng.unit() - 0.5) * spread,
            (rng.unit() - 0.5) * spread,
        );
        let center = region_center + offset;
        let radius = rng.range_f32(params.nebula_min_size(), params.nebula_max_size());
        let base = rng.range_i32(NEBULA_PARTICLES.0, NEBULA_PARTICLES.1) as usize;
        let particles = scaled_count(base, params.nebula_particle_density());
        let kind = NebulaKind::ALL[rng.index(NebulaKind::ALL.len())];

        let nebula = Nebula::generate(center, radius, particles, kind, rng);
        tracing::info!(
            "Created a {:?} nebula at ({:.1}, {:.1}, {:.1}) with {} particles",
            kind,
            center.x,
            center.y,
            center.z,
            nebula.particle_count()
        );
        bodies.nebulae.push(nebula);
        true
    }

    /// Accept or reject a cluster candidate.
    ///
    /// A rejected candidate produces no stars and is not relocated. Accepted
    /// candidates far from the origin get 50–99 members over a 50–150 radius;
    /// near ones get 20–49 members over a 10–30 radius. Member counts are
    /// scaled by the cluster density. Returns whether the cluster was placed.
    pub fn try_place_cluster(
        &self,
        bodies: &mut CelestialBodies,
        candidate: glam::Vec3,
        params: &ParameterSet,
        rng: &mut UniverseRng,
    ) -> bool {
        if bodies.is_crowded(candidate, self.min_cluster_distance) {
            bodies.rejected_clusters += 1;
            tracing::debug!(
                "Rejected cluster candidate at ({:.1}, {:.1}, {:.1})",
                candidate.x,
                candidate.y,
                candidate.z
            );
            return false;
        }

        let far = candidate.length() > self.far_cluster_threshold;
        let (count, radius) = if far {
            (rng.range_i32(50, 100), rng.unit() * 100.0 + 50.0)
        } else {
            (rng.range_i32(20, 50), rng.unit() * 20.0 + 10.0)
        };
        let count = scaled_count(count as usize, params.star_cluster_density());
        self.spawn_cluster(bodies, candidate, count, radius, rng);
        true
    }

    /// Append a cluster of `count` non-glimmering stars around `center`,
    /// with size and brightness falling off linearly toward the edge.
    pub fn spawn_cluster(
        &self,
        bodies: &mut CelestialBodies,
        center: glam::Vec3,
        count: usize,
        radius: f32,
        rng: &mut UniverseRng,
    ) {
        bodies.stars.reserve(count);
        for _ in 0..count {
            let (position, r) = rng.point_in_sphere(center, radius);
            // 0 at the center, 1 at the edge.
            let edge = r / radius;
            let size = (1.0 - edge * 0.5) * (rng.unit() * 0.2 + 0.1);
            let brightness = 1.0 - edge * 0.5;
            bodies.stars.push(Star::clustered(position, size, brightness));
        }
        bodies.clusters.push(StarCluster {
            center,
            radius,
            member_count: count,
            far: center.length() > self.far_cluster_threshold,
        });
        tracing::trace!("Spawned cluster of {} stars, radius {:.1}", count, radius);
    }
}

/// `base * density`, rounded, never below one.
fn scaled_count(base: usize, density: f32) -> usize {
    ((base as f32 * density).round() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::star::StarKind;
    use glam::Vec3;

    const SIZE: f32 = 2000.0;

    fn sparse_params() -> ParameterSet {
        let mut params = ParameterSet::default();
        params.set_scattered_star_density(0.1);
        params.set_star_cluster_density(0.1);
        params.set_nebula_rarity(0.001);
        params
    }

    #[test]
    fn test_populate_adds_scattered_stars_in_sphere() {
        let generator = CelestialGenerator::new(SIZE);
        let mut bodies = CelestialBodies::new();
        let mut rng = UniverseRng::seeded(1);
        let center = Vec3::new(1000.0, 1000.0, 1000.0);
        generator.populate(&mut bodies, center, &ParameterSet::default(), &mut rng);

        let scattered: Vec<&Star> = bodies.stars.iter().filter(|s| s.is_scattered()).collect();
        assert_eq!(scattered.len(), SCATTERED_STARS_PER_REGION);
        for star in scattered {
            assert!(star.position.distance(center) < SIZE * SCATTER_RADIUS_FRACTION + 1e-2);
            assert!((0.05..=0.2).contains(&star.size));
            assert!((0.85..=1.0).contains(&star.brightness));
        }
    }

    #[test]
    fn test_scattered_density_scales_count() {
        let generator = CelestialGenerator::new(SIZE);
        let mut params = ParameterSet::default();
        params.set_scattered_star_density(2.5);
        let mut bodies = CelestialBodies::new();
        let mut rng = UniverseRng::seeded(1);
        generator.populate(&mut bodies, Vec3::ZERO, &params, &mut rng);
        let scattered = bodies.stars.iter().filter(|s| s.is_scattered()).count();
        assert_eq!(scattered, 200);
    }

    #[test]
    fn test_cluster_stars_fall_off_from_center() {
        let generator = CelestialGenerator::new(SIZE);
        let mut bodies = CelestialBodies::new();
        let mut rng = UniverseRng::seeded(3);
        let center = Vec3::new(50.0, 0.0, 0.0);
        generator.spawn_cluster(&mut bodies, center, 300, 30.0, &mut rng);

        assert_eq!(bodies.stars.len(), 300);
        assert_eq!(bodies.clusters.len(), 1);
        for star in &bodies.stars {
            assert_eq!(star.kind, StarKind::Clustered);
            let edge = star.position.distance(center) / 30.0;
            assert!(edge < 1.0 + 1e-4);
            assert!((star.brightness - (1.0 - edge * 0.5)).abs() < 1e-3);
            assert!(star.size <= (1.0 - edge * 0.5) * 0.3 + 1e-4);
        }
    }

    #[test]
    fn test_candidate_near_existing_star_is_rejected() {
        let generator = CelestialGenerator::new(SIZE);
        let mut bodies = CelestialBodies::new();
        bodies.stars.push(Star::clustered(Vec3::new(500.0, 0.0, 0.0), 0.1, 1.0));
        let mut rng = UniverseRng::seeded(5);

        let placed = generator.try_place_cluster(
            &mut bodies,
            Vec3::new(560.0, 0.0, 0.0),
            &ParameterSet::default(),
            &mut rng,
        );
        assert!(!placed);
        assert_eq!(bodies.stars.len(), 1);
        assert_eq!(bodies.rejected_clusters, 1);

        let placed = generator.try_place_cluster(
            &mut bodies,
            Vec3::new(700.0, 0.0, 0.0),
            &ParameterSet::default(),
            &mut rng,
        );
        assert!(placed);
        assert!(bodies.stars.len() > 1);
    }

    #[test]
    fn test_rejected_candidate_consumes_no_draws() {
        let generator = CelestialGenerator::new(SIZE);
        let mut bodies = CelestialBodies::new();
        bodies.stars.push(Star::clustered(Vec3::ZERO, 0.1, 1.0));
        let mut rng = UniverseRng::seeded(6);
        let mut reference = UniverseRng::seeded(6);
        generator.try_place_cluster(&mut bodies, Vec3::X, &ParameterSet::default(), &mut rng);
        assert_eq!(rng.unit(), reference.unit());
    }

    #[test]
    fn test_far_and_near_cluster_layouts() {
        let generator = CelestialGenerator::new(SIZE);
        let params = ParameterSet::default();
        let mut rng = UniverseRng::seeded(7);

        for _ in 0..50 {
            let mut bodies = CelestialBodies::new();
            let candidate = Vec3::new(100.0, 0.0, 0.0);
            assert!(generator.try_place_cluster(&mut bodies, candidate, &params, &mut rng));
            let near = &bodies.clusters[0];
            assert!(!near.far);
            assert!((20..50).contains(&near.member_count));
            assert!((10.0..=30.0).contains(&near.radius));

            let mut bodies = CelestialBodies::new();
            let candidate = Vec3::new(5000.0, 0.0, 0.0);
            assert!(generator.try_place_cluster(&mut bodies, candidate, &params, &mut rng));
            let far = &bodies.clusters[0];
            assert!(far.far);
            assert!((50..100).contains(&far.member_count));
            assert!((50.0..=150.0).contains(&far.radius));
        }
    }

    #[test]
    fn test_accepted_cluster_centers_respect_min_distance() {
        let generator = CelestialGenerator::new(SIZE);
        let params = sparse_params();
        let mut bodies = CelestialBodies::new();
        let mut rng = UniverseRng::seeded(8);

        // Tiny regions force many candidates into the same neighborhood.
        let tight = CelestialGenerator::new(500.0);
        for i in 0..200 {
            let center = Vec3::new((i % 5) as f32 * 100.0, 0.0, (i / 5) as f32 * 40.0);
            tight.populate(&mut bodies, center, &params, &mut rng);
        }
        generator.populate(&mut bodies, Vec3::ZERO, &params, &mut rng);

        assert!(bodies.rejected_clusters > 0);
        for (i, a) in bodies.clusters.iter().enumerate() {
            for b in &bodies.clusters[i + 1..] {
                let d = a.center.distance(b.center);
                assert!(
                    d >= MIN_CLUSTER_DISTANCE,
                    "clusters {:?} and {:?} are {d} apart",
                    a.center,
                    b.center
                );
            }
        }
    }

    #[test]
    fn test_sun_gate_is_one_draw_per_region() {
        let generator = CelestialGenerator::new(SIZE);
        let mut params = ParameterSet::default();
        params.set_sun_rarity(0.0002);
        let mut rng = UniverseRng::seeded(2024);
        let n = 100_000;
        let mut bodies = CelestialBodies::new();
        for _ in 0..n {
            generator.maybe_place_sun(&mut bodies, Vec3::ZERO, &params, &mut rng);
        }
        // Expected 20, binomial sd ≈ 4.47; accept ±4 sd.
        let suns = bodies.suns.len();
        assert!((3..=38).contains(&suns), "suns = {suns}");
    }

    #[test]
    fn test_sun_rarity_holds_through_full_populate() {
        let generator = CelestialGenerator::new(SIZE);
        let mut params = sparse_params();
        params.set_sun_rarity(0.05);
        let mut rng = UniverseRng::seeded(99);
        let n = 2000;
        let mut suns = 0;
        for _ in 0..n {
            let mut bodies = CelestialBodies::new();
            generator.populate(&mut bodies, Vec3::ZERO, &params, &mut rng);
            assert!(bodies.suns.len() <= 1);
            assert!(bodies.nebulae.len() <= 1);
            suns += bodies.suns.len();
        }
        // Expected 100, sd ≈ 9.7.
        assert!((60..=140).contains(&suns), "suns = {suns}");
    }

    #[test]
    fn test_sun_placed_within_distance_band() {
        let generator = CelestialGenerator::new(SIZE);
        let mut params = ParameterSet::default();
        params.set_sun_rarity(0.05);
        let mut rng = UniverseRng::seeded(10);
        let mut bodies = CelestialBodies::new();
        let center = Vec3::new(-3000.0, 1000.0, 7000.0);
        while bodies.suns.len() < 50 {
            generator.maybe_place_sun(&mut bodies, center, &params, &mut rng);
        }
        for sun in &bodies.suns {
            let d = sun.position.distance(center);
            assert!((3999.0..=10001.0).contains(&d), "distance = {d}");
            assert!((500.0..=1000.0).contains(&sun.size), "size = {}", sun.size);
        }
    }

    #[test]
    fn test_nebula_placement_and_sizes() {
        let generator = CelestialGenerator::new(SIZE);
        let mut params = ParameterSet::default();
        params.set_nebula_rarity(0.2);
        params.set_nebula_particle_density(0.1);
        let mut rng = UniverseRng::seeded(11);
        let mut bodies = CelestialBodies::new();
        let center = Vec3::splat(1000.0);
        while bodies.nebulae.len() < 20 {
            generator.maybe_place_nebula(&mut bodies, center, &params, &mut rng);
        }
        for nebula in &bodies.nebulae {
            let offset = (nebula.center - center).abs();
            assert!(offset.max_element() <= SIZE * 0.25);
            assert!((500.0..=1500.0).contains(&nebula.radius));
            assert!((200..=500).contains(&nebula.particles.len()));
            assert_eq!(nebula.background.len(), nebula.particles.len() * 2);
        }
    }

    #[test]
    fn test_same_seed_populates_identically() {
        let generator = CelestialGenerator::new(SIZE);
        let params = ParameterSet::default();
        let run = |seed| {
            let mut bodies = CelestialBodies::new();
            let mut rng = UniverseRng::seeded(seed);
            generator.populate(&mut bodies, Vec3::splat(1000.0), &params, &mut rng);
            bodies.stars
        };
        assert_eq!(run(21), run(21));
    }

    #[test]
    fn test_scaled_count_never_zero() {
        assert_eq!(scaled_count(80, 1.0), 80);
        assert_eq!(scaled_count(20, 0.01), 1);
        assert_eq!(scaled_count(45, 0.1), 5);
    }
}
