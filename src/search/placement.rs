use rand::Rng;

use crate::core::geometry::{Bounds, Point};
use crate::error::PlacementError;

/// Rejection sampler for non-overlapping item positions.
#[derive(Clone, Debug)]
pub struct PlacementEngine {
    region: Bounds,
    min_distance: f64,
    max_attempts: u32,
}

impl PlacementEngine {
    /// `stage` is the full drawable area; candidates are drawn from it shrunk
    /// by `min_distance` on every side.
    pub fn new(stage: Bounds, min_distance: f64, max_attempts: u32) -> Result<Self, PlacementError> {
        let region = stage
            .inset(min_distance)
            .ok_or(PlacementError::EmptyRegion { min_distance })?;
        Ok(Self {
            region,
            min_distance,
            max_attempts: max_attempts.max(1),
        })
    }

    pub fn region(&self) -> Bounds {
        self.region
    }

    pub fn min_distance(&self) -> f64 {
        self.min_distance
    }

    /// Draws candidates (x then y, one draw each) until one clears every
    /// point in `occupied` by at least `min_distance`.
    pub fn pick<R: Rng + ?Sized>(
        &self,
        occupied: &[Point],
        rng: &mut R,
    ) -> Result<Point, PlacementError> {
        for _ in 0..self.max_attempts {
            let u = rng.random::<f64>();
            let v = rng.random::<f64>();
            let candidate = self.region.lerp(u, v);
            if nearest_distance(candidate, occupied) >= self.min_distance {
                return Ok(candidate);
            }
        }
        Err(PlacementError::Starved {
            occupied: occupied.len(),
            attempts: self.max_attempts,
            min_distance: self.min_distance,
        })
    }
}

/// Distance to the closest point; infinite when there is none.
pub fn nearest_distance(p: Point, others: &[Point]) -> f64 {
    others
        .iter()
        .map(|o| p.distance(*o))
        .fold(f64::INFINITY, f64::min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn first_candidate_wins_on_empty_stage() {
        let engine = PlacementEngine::new(Bounds::centered(80.0, 60.0), 10.0, 100).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let p = engine.pick(&[], &mut rng).unwrap();
        assert!(engine.region().contains(p));
    }

    #[test]
    fn keeps_distance_from_occupied() {
        let engine = PlacementEngine::new(Bounds::centered(80.0, 60.0), 10.0, 10_000).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let mut placed = Vec::new();
        for _ in 0..10 {
            let p = engine.pick(&placed, &mut rng).unwrap();
            assert!(nearest_distance(p, &placed) >= 10.0);
            placed.push(p);
        }
    }

    #[test]
    fn starves_instead_of_spinning() {
        // 2 x 2 cm region, an occupant in the middle covers all of it.
        let engine = PlacementEngine::new(Bounds::centered(22.0, 22.0), 10.0, 50).unwrap();
        let mut rng = StdRng::seed_from_u64(9);
        let err = engine.pick(&[Point::ORIGIN], &mut rng).unwrap_err();
        assert_eq!(
            err,
            PlacementError::Starved {
                occupied: 1,
                attempts: 50,
                min_distance: 10.0,
            }
        );
    }

    #[test]
    fn empty_region_is_rejected() {
        let err = PlacementEngine::new(Bounds::centered(12.0, 40.0), 10.0, 10).unwrap_err();
        assert_eq!(err, PlacementError::EmptyRegion { min_distance: 10.0 });
    }

    #[test]
    fn nearest_distance_of_nothing_is_infinite() {
        assert!(nearest_distance(Point::ORIGIN, &[]).is_infinite());
    }
}
