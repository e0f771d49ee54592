//! Property tests for the pyramid, the sampler and the timeseries.

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use supervox_core::sampling::{MipmapPyramid, sample_seeds};
use supervox_core::scene::{Frame, Timeseries};
use supervox_core::{DensityField, Grid, Point};

fn arb_field(max_side: usize) -> impl Strategy<Value = DensityField> {
    (1..=max_side, 1..=max_side).prop_flat_map(|(w, h)| {
        prop::collection::vec(-1.0f32..2.0, w * h)
            .prop_map(move |data| Grid::from_vec(w, h, data).unwrap())
    })
}

#[derive(Debug, Clone)]
enum Op {
    Add,
    Purge(i64),
}

fn arb_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            3 => Just(Op::Add),
            1 => (-5i64..40).prop_map(Op::Purge),
        ],
        0..60,
    )
}

proptest! {
    /// Every level holds the same total mass as the field.
    #[test]
    fn mipmap_conserves_mass(field in arb_field(40)) {
        let pyramid = MipmapPyramid::build(&field);
        let total = field.sum();
        let scale: f64 = field.iter().map(|v| v.abs() as f64).sum::<f64>() + 1.0;
        for level in pyramid.levels() {
            prop_assert!((level.sum() - total).abs() <= 1e-4 * scale);
        }
        let top = pyramid.level(pyramid.top());
        prop_assert_eq!(top.dimensions(), (1, 1));
    }

    /// Seeds always land inside the field on valid pixels.
    #[test]
    fn seeds_land_on_valid_pixels(field in arb_field(24), seed in any::<u64>()) {
        let (w, h) = field.dimensions();
        let rgbd = Grid::from_fn(w, h, |x, y| {
            if (x + y) % 3 == 0 {
                Point::INVALID
            } else {
                Point::new(glam::Vec3::ONE, glam::Vec3::Z, 1.0)
            }
        });
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        for s in sample_seeds(&rgbd, &field, &mut rng).unwrap() {
            let p = rgbd.get(s.x as usize, s.y as usize);
            prop_assert!(p.is_some_and(|p| p.valid), "seed {:?} on invalid pixel", s);
        }
    }

    /// Retained frames always cover `[begin, end)` without gaps.
    #[test]
    fn timeseries_stays_contiguous(ops in arb_ops()) {
        let mut series = Timeseries::new();
        for op in ops {
            match op {
                Op::Add => {
                    let rgbd = Grid::filled(1, 1, Point::INVALID);
                    let frame = Frame::new(series.end(), rgbd, Vec::new());
                    prop_assert!(series.add(frame).is_ok());
                }
                Op::Purge(k) => {
                    let purged = series.purge(k);
                    prop_assert!(series.begin() >= k);
                    prop_assert!(purged.iter().all(|f| f.time() < k));
                }
            }
            let times: Vec<i64> = series.frames().map(|f| f.time()).collect();
            let expected: Vec<i64> = (series.begin()..series.end()).collect();
            prop_assert_eq!(times, expected);
        }
    }
}
