mod common;

use blinksearch::core::geometry::{Bounds, Point};
use blinksearch::error::PlacementError;
use blinksearch::search::events::TrialEvent;
use blinksearch::search::placement::{PlacementEngine, nearest_distance};
use blinksearch::search::{FrameLoop, TaskParams};
use common::{RecordingRenderer, ScriptedInput, assert_separated};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

proptest! {
    #[test]
    fn picks_stay_inside_inset_region_and_apart(
        seed in any::<u64>(),
        width in 40.0f64..120.0,
        height in 40.0f64..120.0,
        min_distance in 2.0f64..8.0,
        count in 1usize..8,
    ) {
        let stage = Bounds::centered(width, height);
        let engine = PlacementEngine::new(stage, min_distance, 100_000).expect("room left");
        let inner = stage.inset(min_distance).expect("room left");
        let mut rng = StdRng::seed_from_u64(seed);
        let mut placed: Vec<Point> = Vec::new();
        for _ in 0..count {
            match engine.pick(&placed, &mut rng) {
                Ok(p) => {
                    prop_assert!(inner.contains(p));
                    prop_assert!(nearest_distance(p, &placed) >= min_distance);
                    placed.push(p);
                }
                Err(PlacementError::Starved { .. }) => break,
                Err(other) => prop_assert!(false, "unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn cycles_stay_well_formed_for_any_timing(
        seed in any::<u64>(),
        n_stimuli in 1usize..10,
        t_vis_min in 0.0f64..1.0,
        t_vis_span in 0.0f64..2.0,
        t_invis_min in 0.05f64..1.0,
        t_invis_span in 0.0f64..2.0,
        target_probability in 0.0f64..=1.0,
    ) {
        let params = TaskParams {
            n_stimuli,
            t_vis_min,
            t_vis_max: t_vis_min + t_vis_span,
            t_invis_min,
            t_invis_max: t_invis_min + t_invis_span,
            target_probability,
            target_wait_time: 0.5,
            ..TaskParams::default()
        };
        let mut lp = FrameLoop::new(&params, 5, seed, Vec::<TrialEvent>::new()).expect("valid");
        let mut renderer = RecordingRenderer::default();
        let mut input = ScriptedInput::idle();
        for _ in 0..400 {
            lp.step(&mut renderer, &mut input).expect("placement");
            for item in lp.items() {
                prop_assert!(item.visible_until < item.invisible_until);
            }
            assert_separated(lp.items(), params.min_distance);
        }
    }
}
