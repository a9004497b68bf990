//! Integration tests for photo correlation and map building.
//!
//! A deterministic color encoder stands in for CLIP so no model files or
//! ONNX runtime are needed.

use image::{DynamicImage, Rgb, RgbImage};
use rand::SeedableRng;
use rand::rngs::StdRng;
use runview::color::HexColor;
use runview::config::{Config, Placement};
use runview::pipeline::{Correlator, build_map};
use runview::scene::{
    SceneCatalog, SceneCatalogEntry, SceneClassifier, SceneEncoder, ScenePrediction,
};
use runview::track::TrackPoint;
use runview::{Error, Result};
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// Descriptors are RGB axes, images embed as their summed color.
struct ColorEncoder;

impl SceneEncoder for ColorEncoder {
    fn encode_text(&self, text: &str) -> Result<Vec<f32>> {
        match text {
            "red" => Ok(vec![1.0, 0.0, 0.0]),
            "green" => Ok(vec![0.0, 1.0, 0.0]),
            "blue" => Ok(vec![0.0, 0.0, 1.0]),
            other => Err(Error::Inference {
                reason: format!("unknown descriptor {other}"),
            }),
        }
    }

    fn encode_image(&self, image: &DynamicImage) -> Result<Vec<f32>> {
        let mut sum = [0.0_f32; 3];
        for p in image.to_rgb8().pixels() {
            for (acc, v) in sum.iter_mut().zip(p.0) {
                *acc += f32::from(v);
            }
        }
        if sum.iter().all(|v| *v == 0.0) {
            return Err(Error::Inference {
                reason: "black image has no direction".to_string(),
            });
        }
        Ok(sum.to_vec())
    }
}

fn classifier() -> SceneClassifier {
    let entry = |d: &str, hex: &str, label: &str| SceneCatalogEntry {
        descriptor: d.to_string(),
        color: hex.parse::<HexColor>().unwrap(),
        label: label.to_string(),
    };
    let catalog = SceneCatalog::new(vec![
        entry("red", "#ff0000", "Red"),
        entry("green", "#00ff00", "Green"),
        entry("blue", "#0000ff", "Blue"),
    ])
    .unwrap();
    SceneClassifier::new(Box::new(ColorEncoder), catalog, 100.0).unwrap()
}

fn write_photo(dir: &Path, name: &str, rgb: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(32, 24, Rgb(rgb)).save(&path).unwrap();
    path
}

fn track(n: usize) -> Vec<TrackPoint> {
    (0..n)
        .map(|i| {
            let mut p = TrackPoint::new(37.5 + i as f64 * 1e-3, 127.0 + i as f64 * 1e-3);
            p.heart_rate = Some(120 + i as u32);
            p
        })
        .collect()
}

fn correlator(clf: &SceneClassifier, placement: Placement) -> Correlator<'_> {
    Correlator::new(clf, placement, 64)
}

#[test]
fn test_single_point_receives_every_photo() {
    let dir = TempDir::new().unwrap();
    let photos: Vec<_> = (0..5)
        .map(|i| write_photo(dir.path(), &format!("p{i}.png"), [200, 10, 10]))
        .collect();
    let clf = classifier();
    let track = track(1);

    let records =
        correlator(&clf, Placement::Random).correlate(&photos, &track, &mut StdRng::seed_from_u64(1));

    assert_eq!(records.len(), 5);
    for record in &records {
        assert_eq!(record.track_index, 0);
        assert_eq!([record.latitude, record.longitude], track[0].position());
        assert_eq!(record.prediction.label, "Red");
    }
}

#[test]
fn test_unsupported_extension_is_excluded() {
    let dir = TempDir::new().unwrap();
    let photos = vec![
        write_photo(dir.path(), "a.jpg", [10, 200, 10]),
        write_photo(dir.path(), "b.png", [10, 10, 200]),
        write_photo(dir.path(), "c.bmp", [200, 10, 10]),
    ];
    let clf = classifier();

    let records =
        correlator(&clf, Placement::Random).correlate(&photos, &track(10), &mut StdRng::seed_from_u64(2));

    let names: Vec<_> = records.iter().map(|r| r.filename.as_str()).collect();
    assert_eq!(names, vec!["a.jpg", "b.png"]);
    assert_eq!(records[0].prediction.label, "Green");
    assert_eq!(records[1].prediction.label, "Blue");
    assert!(records.iter().all(|r| r.thumbnail.is_some()));
}

#[test]
fn test_classification_failure_yields_sentinel_record() {
    let dir = TempDir::new().unwrap();
    let black = write_photo(dir.path(), "night.png", [0, 0, 0]);
    let corrupt = dir.path().join("broken.jpg");
    std::fs::write(&corrupt, b"not a jpeg").unwrap();
    let clf = classifier();

    let records = correlator(&clf, Placement::Random).correlate(
        &[black, corrupt],
        &track(10),
        &mut StdRng::seed_from_u64(3),
    );

    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record.prediction, ScenePrediction::unknown());
        assert_eq!(record.prediction.color.to_string(), "#808080");
    }
    // decodable image still gets a preview, the corrupt one does not
    assert!(records[0].thumbnail.is_some());
    assert!(records[1].thumbnail.is_none());
}

#[test]
fn test_more_photos_than_points_land_on_track() {
    let dir = TempDir::new().unwrap();
    let photos: Vec<_> = (0..8)
        .map(|i| write_photo(dir.path(), &format!("p{i}.png"), [10, 200, 10]))
        .collect();
    let clf = classifier();
    let track = track(3);

    let records =
        correlator(&clf, Placement::Random).correlate(&photos, &track, &mut StdRng::seed_from_u64(4));

    assert_eq!(records.len(), 8);
    for record in &records {
        assert!(record.track_index < 3);
        assert!(
            track
                .iter()
                .any(|p| p.position() == [record.latitude, record.longitude])
        );
    }
}

#[test]
fn test_fewer_photos_than_points_are_distinct() {
    let dir = TempDir::new().unwrap();
    let photos: Vec<_> = (0..4)
        .map(|i| write_photo(dir.path(), &format!("p{i}.jpg"), [10, 10, 200]))
        .collect();
    let clf = classifier();

    for seed in 0..10 {
        let records = correlator(&clf, Placement::Random).correlate(
            &photos,
            &track(6),
            &mut StdRng::seed_from_u64(seed),
        );
        let indices: HashSet<_> = records.iter().map(|r| r.track_index).collect();
        assert_eq!(indices.len(), 4);
    }
}

#[test]
fn test_empty_inputs_yield_no_records() {
    let dir = TempDir::new().unwrap();
    let photo = write_photo(dir.path(), "a.png", [200, 10, 10]);
    let clf = classifier();
    let mut rng = StdRng::seed_from_u64(5);

    let c = correlator(&clf, Placement::Random);
    assert!(c.correlate(&[photo], &[], &mut rng).is_empty());
    assert!(c.correlate(&[], &track(3), &mut rng).is_empty());
}

#[test]
fn test_nearest_time_uses_modification_time() {
    let dir = TempDir::new().unwrap();
    let base = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    let track: Vec<TrackPoint> = (0..10_u32)
        .map(|i| {
            let mut p = TrackPoint::new(37.5 + f64::from(i) * 1e-3, 127.0);
            p.timestamp = Some((base + Duration::from_secs(u64::from(i) * 60)).into());
            p
        })
        .collect();

    let photo = write_photo(dir.path(), "mid.png", [10, 200, 10]);
    File::options()
        .write(true)
        .open(&photo)
        .unwrap()
        .set_modified(base + Duration::from_secs(7 * 60 + 10))
        .unwrap();

    let clf = classifier();
    let records = correlator(&clf, Placement::NearestTime).correlate(
        &[photo],
        &track,
        &mut StdRng::seed_from_u64(6),
    );
    assert_eq!(records[0].track_index, 7);
    assert_eq!(records[0].timestamp, track[7].timestamp);
}

#[test]
fn test_record_time_comes_from_assigned_point() {
    let dir = TempDir::new().unwrap();
    let photo = write_photo(dir.path(), "a.png", [10, 200, 10]);
    let mut point = TrackPoint::new(37.5, 127.0);
    point.timestamp = Some("2024-05-01T06:00:00Z".parse().unwrap());
    let track = vec![point];
    let clf = classifier();

    let records = correlator(&clf, Placement::Random).correlate(
        &[photo],
        &track,
        &mut StdRng::seed_from_u64(9),
    );

    let record = &records[0];
    assert_eq!(record.timestamp, track[record.track_index].timestamp);
    assert!(record.captured_at.is_some());
    assert_ne!(record.captured_at, record.timestamp);
}

#[test]
fn test_nearest_time_falls_back_without_track_times() {
    let dir = TempDir::new().unwrap();
    let photo = write_photo(dir.path(), "a.png", [10, 200, 10]);
    let clf = classifier();

    let records = correlator(&clf, Placement::NearestTime).correlate(
        &[photo],
        &track(4),
        &mut StdRng::seed_from_u64(7),
    );
    assert_eq!(records.len(), 1);
    assert!(records[0].track_index < 4);
}

#[test]
fn test_build_map_places_markers_with_scene_colors() {
    let dir = TempDir::new().unwrap();
    let photos = vec![
        write_photo(dir.path(), "a.png", [200, 10, 10]),
        write_photo(dir.path(), "b.png", [10, 10, 200]),
    ];
    let clf = classifier();
    let config = Config::default();

    let (map, records) =
        build_map(&clf, &config, &photos, &track(20), &mut StdRng::seed_from_u64(8)).unwrap();

    assert_eq!(map.route.len(), 19);
    assert_eq!(map.markers.len(), 2);
    assert_eq!(records.len(), 2);
    assert_eq!(map.markers[0].color.to_string(), "#ff0000");
    assert_eq!(map.markers[1].color.to_string(), "#0000ff");
    assert!(map.markers[0].popup.text.starts_with("Red ("));
    assert!(map.markers[0].popup.thumbnail.is_some());
    let legend = map.legend.unwrap();
    assert_eq!((legend.min, legend.max), (120, 139));
}

#[test]
fn test_heic_photo_is_kept_as_unknown() {
    let dir = TempDir::new().unwrap();
    let heic = dir.path().join("IMG_0001.HEIC");
    std::fs::write(&heic, b"\0\0\0\x18ftypheic").unwrap();
    let clf = classifier();

    let records = correlator(&clf, Placement::Random).correlate(
        &[heic],
        &track(5),
        &mut StdRng::seed_from_u64(10),
    );

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].filename, "IMG_0001.HEIC");
    assert!(records[0].prediction.is_unknown());
    assert!(records[0].thumbnail.is_none());
}
