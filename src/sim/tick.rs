//! Fixed timestep simulation tick

use super::state::ConfettiState;

/// Advance every paper, then every ribbon, by one fixed step
pub fn tick(state: &mut ConfettiState, dt: f32) {
    let ConfettiState {
        bounds,
        papers,
        ribbons,
        palette,
        stats,
        rng,
        ..
    } = state;

    for paper in papers.iter_mut() {
        if paper.update(dt, bounds, rng) {
            stats.paper_recycles += 1;
        }
    }

    for ribbon in ribbons.iter_mut() {
        if ribbon.update(dt, bounds, palette, rng) {
            stats.ribbon_resets += 1;
            log::trace!(
                "Ribbon reset at x={:.1}, y={:.1}",
                ribbon.anchor.x,
                ribbon.anchor.y
            );
        }
    }

    stats.ticks += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Settings;
    use crate::sim::state::Bounds;
    use crate::sim::vector::distance;

    fn state(seed: u64) -> ConfettiState {
        ConfettiState::new(seed, &Settings::default(), Bounds::new(640.0, 480.0)).unwrap()
    }

    #[test]
    fn test_tick_counts() {
        let mut s = state(5);
        for _ in 0..10 {
            tick(&mut s, SIM_DT);
        }
        assert_eq!(s.stats.ticks, 10);
    }

    #[test]
    fn test_papers_stay_within_one_step_of_bounds() {
        let mut s = state(6);
        for _ in 0..3000 {
            tick(&mut s, SIM_DT);
            for paper in &s.papers {
                assert!(paper.position.y <= s.bounds.height);
            }
        }
        assert!(s.stats.paper_recycles > 0);
    }

    #[test]
    fn test_ribbons_reset_below_reset_line() {
        let mut s = state(7);
        for _ in 0..3000 {
            tick(&mut s, SIM_DT);
            for ribbon in &s.ribbons {
                assert!(ribbon.anchor.y <= ribbon.reset_line(&s.bounds));
            }
        }
        assert!(s.stats.ribbon_resets > 0);
    }

    #[test]
    fn test_resize_mid_flight_recycles_next_tick() {
        let mut s = state(8);
        let old_height = s.bounds.height;
        s.papers[0].position.y = 0.9 * old_height;

        s.set_bounds(Bounds::new(s.bounds.width, 0.5 * old_height));
        tick(&mut s, SIM_DT);

        assert_eq!(s.papers[0].position.y, 0.0);
    }

    #[test]
    fn test_ribbon_spacing_after_every_tick() {
        let mut s = state(9);
        for _ in 0..500 {
            tick(&mut s, SIM_DT);
            for ribbon in &s.ribbons {
                for pair in ribbon.particles.windows(2) {
                    let d = distance(pair[0].position, pair[1].position);
                    assert!((d - ribbon.particle_spacing).abs() < 1e-3);
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_evolution() {
        let mut a = state(10);
        let mut b = state(10);
        for _ in 0..200 {
            tick(&mut a, SIM_DT);
            tick(&mut b, SIM_DT);
        }
        assert_eq!(a.papers, b.papers);
        assert_eq!(a.ribbons, b.ribbons);
        assert_eq!(a.stats, b.stats);
    }
}
