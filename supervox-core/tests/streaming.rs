//! End-to-end runs of the streaming engine on synthetic frames.

use approx::assert_relative_eq;
use image::{Luma, Rgb, RgbImage};
use std::collections::HashMap;
use supervox_core::evaluation::compression_error;
use supervox_core::ingest::{DepthImage, RepeatStream, RgbdStream};
use supervox_core::{ContinuousSupervoxels, SupervoxelConfig};
use supervox_data::CameraIntrinsics;

/// A 64×48 camera whose supervoxels are 5.28 px across at depth 1000.
fn small_config() -> SupervoxelConfig {
    SupervoxelConfig {
        camera: CameraIntrinsics::new(0.001, 32.0, 24.0, 52.8),
        cluster_radius: 0.1,
        seed: 7,
        ..Default::default()
    }
}

fn run_uniform(
    engine: &mut ContinuousSupervoxels,
    steps: usize,
    mut each: impl FnMut(&ContinuousSupervoxels),
) {
    let mut stream = RepeatStream::uniform(64, 48, [0, 128, 128], 1000, steps);
    let (w, h) = stream.resolution();
    engine.start(w as usize, h as usize).unwrap();
    while let Some(frame) = stream.next_frame().unwrap() {
        engine.step(&frame.color, &frame.depth).unwrap();
        each(engine);
    }
}

#[test]
fn test_uniform_scene_stabilizes() {
    let mut engine = ContinuousSupervoxels::new(small_config()).unwrap();
    let mut active = Vec::new();
    run_uniform(&mut engine, 20, |e| active.push(e.num_active_clusters()));

    let new_per_frame: Vec<usize> = (0..20).map(|t| seeded_at(&engine, t)).collect();
    let first = new_per_frame[0];
    assert!(first > 10, "first frame seeded {} clusters", first);
    for (t, &n) in new_per_frame.iter().enumerate().skip(1) {
        assert!(n * 2 < first, "frame {} seeded {} of {}", t, n, first);
    }

    // Once the window is full the active count stops growing.
    let peak = active[10];
    assert!(active[11..].iter().all(|&n| n <= peak), "{:?}", active);
    assert_eq!(
        engine.all_clusters().len(),
        engine.num_active_clusters() + engine.num_inactive_clusters()
    );
}

fn seeded_at(engine: &ContinuousSupervoxels, time: i64) -> usize {
    engine.all_clusters().iter().filter(|c| c.time() == time).count()
}

#[test]
fn test_cluster_radius_follows_depth() {
    let config = small_config();
    let mut engine = ContinuousSupervoxels::new(config).unwrap();
    run_uniform(&mut engine, 3, |_| {});

    let z_over_f = config.camera.depth_to_z * 1000.0 / config.camera.focal_px;
    let expected = config.cluster_radius / z_over_f;
    assert_relative_eq!(expected, 5.28, epsilon = 1e-4);
    let clusters = engine.all_clusters();
    assert!(!clusters.is_empty());
    for c in &clusters {
        assert_relative_eq!(c.cluster_radius_px, expected, epsilon = 1e-4);
    }
}

#[test]
fn test_invalid_depth_produces_nothing() {
    let mut engine = ContinuousSupervoxels::new(small_config()).unwrap();
    engine.start(64, 64).unwrap();
    let color = RgbImage::from_pixel(64, 64, Rgb([255, 255, 255]));
    let depth = DepthImage::from_pixel(64, 64, Luma([0]));
    for _ in 0..5 {
        engine.step(&color, &depth).unwrap();
    }
    assert!(engine.all_clusters().is_empty());
    assert_eq!(engine.num_active_clusters(), 0);
    assert_eq!(engine.timeseries().len(), 5);
    assert_eq!(engine.last_density().map(|d| d.sum()), Some(0.0));
}

#[test]
fn test_purged_frame_is_frozen() {
    let mut engine = ContinuousSupervoxels::new(small_config()).unwrap();
    let window = small_config().window_len() as usize;
    run_uniform(&mut engine, window, |_| {});

    // Frame 0 is still retained after exactly one window of steps.
    assert_eq!(engine.timeseries().begin(), 0);
    assert_eq!(engine.num_inactive_clusters(), 0);
    let frame0 = engine.timeseries().frame(0).map(|f| f.clusters().len()).unwrap();
    assert!(frame0 > 0);

    let mut stream = RepeatStream::uniform(64, 48, [0, 128, 128], 1000, 6);
    let frame = stream.next_frame().unwrap().unwrap();
    engine.step(&frame.color, &frame.depth).unwrap();

    assert_eq!(engine.timeseries().begin(), 1);
    assert!(engine.timeseries().frame(0).is_none());
    assert!(engine.timeseries().clusters().all(|c| c.time() != 0));
    let inactive: Vec<_> = engine.inactive_clusters().to_vec();
    assert_eq!(inactive.len(), frame0);
    assert!(inactive.iter().all(|c| c.time() == 0));
    assert_eq!(
        engine.all_clusters().iter().filter(|c| c.time() == 0).count(),
        frame0
    );

    while let Some(frame) = stream.next_frame().unwrap() {
        engine.step(&frame.color, &frame.depth).unwrap();
    }
    assert_eq!(&engine.inactive_clusters()[..frame0], &inactive[..]);
}

#[test]
fn test_tombstones_never_revive() {
    let mut engine = ContinuousSupervoxels::new(small_config()).unwrap();
    engine.start(64, 48).unwrap();
    let mut seen: HashMap<(i64, usize), bool> = HashMap::new();

    // A bright square sweeping across a dark background at varying depth.
    for step in 0..24u32 {
        let x0 = (step * 3) % 48;
        let color = RgbImage::from_fn(64, 48, |x, y| {
            if (x0..x0 + 16).contains(&x) && (12..36).contains(&y) {
                Rgb([250, 240, 40])
            } else {
                Rgb([20, 30, 60])
            }
        });
        let depth = DepthImage::from_fn(64, 48, |x, _| {
            if (x0..x0 + 16).contains(&x) {
                Luma([800])
            } else if x % 7 == 0 {
                Luma([0])
            } else {
                Luma([1200])
            }
        });
        engine.step(&color, &depth).unwrap();

        for c in engine.all_clusters() {
            let key = (c.time(), c.id());
            if let Some(&was_valid) = seen.get(&key) {
                assert!(was_valid || !c.is_valid(), "cluster {:?} revived", key);
            }
            seen.insert(key, c.is_valid());
        }
    }
    assert!(!seen.is_empty());
}

#[test]
fn test_compression_error_of_active_frame() {
    let mut engine = ContinuousSupervoxels::new(small_config()).unwrap();
    run_uniform(&mut engine, 8, |_| {});

    let t = engine.active_time().unwrap();
    assert_eq!(t, 2);
    let frame = engine.timeseries().frame(t).unwrap();
    let e = compression_error(frame, engine.timeseries());
    // Uniform color leaves no color variance to compress.
    assert!(e.x.is_nan());
    assert!(e.y.is_finite() && e.y >= 0.0, "{:?}", e);
}

/// Full VGA run with the default camera; slow without optimizations.
#[test]
#[ignore]
fn test_vga_uniform_run() {
    let mut engine = ContinuousSupervoxels::new(SupervoxelConfig::default()).unwrap();
    let mut stream = RepeatStream::uniform(640, 480, [0, 128, 128], 1000, 20);
    engine.start(640, 480).unwrap();
    let mut active = Vec::new();
    while let Some(frame) = stream.next_frame().unwrap() {
        engine.step(&frame.color, &frame.depth).unwrap();
        active.push(engine.num_active_clusters());
    }
    let peak = active[10];
    assert!(active[11..].iter().all(|&n| n <= peak), "{:?}", active);
    let expected = 0.025 / (1.0 / 528.0);
    for c in engine.all_clusters() {
        assert_relative_eq!(c.cluster_radius_px, expected, epsilon = 1e-3);
    }
}
