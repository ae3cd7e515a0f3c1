//! Tests for spawn positions.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use crate::spawner::{PlayArea, SpawnTargetRequest};
    use crate::DeterministicRng;

    #[test]
    fn test_random_points_stay_on_plane() {
        let area = PlayArea::new(10.0, 6.0);
        let mut rng = DeterministicRng::new(7);

        for _ in 0..500 {
            let point = area.random_point(&mut rng.rng);
            assert!(area.contains(point), "{:?} outside {:?}", point, area);
            assert_eq!(point.y, 0.0);
        }
    }

    #[test]
    fn test_same_seed_same_points() {
        let area = PlayArea::default();
        let mut first = DeterministicRng::new(42);
        let mut second = DeterministicRng::new(42);

        for _ in 0..50 {
            assert_eq!(
                area.random_point(&mut first.rng),
                area.random_point(&mut second.rng)
            );
        }
    }

    #[test]
    fn test_clamp_to_bounds() {
        let area = PlayArea::new(10.0, 10.0);

        assert_eq!(area.clamp(Vec3::new(12.0, 3.0, -7.5)), Vec3::new(5.0, 0.0, -5.0));
        assert_eq!(area.clamp(Vec3::new(1.0, 0.0, 2.0)), Vec3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn test_degenerate_area_spawns_at_origin_line() {
        let area = PlayArea::new(0.0, 4.0);
        let mut rng = DeterministicRng::new(1);

        let point = area.random_point(&mut rng.rng);
        assert_eq!(point.x, 0.0);
        assert!(point.z.abs() <= 2.0);
    }

    #[test]
    fn test_request_constructors() {
        assert_eq!(SpawnTargetRequest::random().position, None);
        assert_eq!(
            SpawnTargetRequest::at(Vec3::ONE).position,
            Some(Vec3::ONE)
        );
    }
}
