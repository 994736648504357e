//! Manifest-to-dataset regression test
//!
//! Writes synthetic scans and manifests to a temporary directory, builds
//! datasets from them and checks row counts, row lengths and labels.
//!
//! Run with:
//! ```
//! cargo test -p digits-recog --test pipeline_reg
//! ```

use digits_core::{Box, ImageFormat, Pix};
use digits_recog::{
    NUM_CLASSES, PipelineConfig, RecogError, SegmentedScan, argmax, build_dataset,
    build_dataset_with, load_manifest,
};
use digits_test::{RegParams, synth};
use std::fs;
use std::path::Path;

fn write_scan(dir: &Path, name: &str, pix: &Pix) -> String {
    let path = dir.join(name);
    digits_io::write_image(pix, &path, ImageFormat::Png).expect("write scan");
    path.to_string_lossy().into_owned()
}

fn write_manifest(dir: &Path, name: &str, lines: &[String]) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, lines.join("\n")).expect("write manifest");
    path
}

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("pipeline");
    let dir = tempfile::tempdir().expect("tempdir");

    // A light page with two separated dark strokes, labeled 3
    let page = synth::page(80, 50);
    let scan = synth::with_rect(&page, Box::new_unchecked(15, 10, 12, 20), synth::INK);
    let scan = synth::with_rect(&scan, Box::new_unchecked(45, 12, 10, 25), synth::INK);
    let sample = write_scan(dir.path(), "sample.png", &scan);
    let manifest_path = write_manifest(dir.path(), "train.txt", &[format!("3 {}", sample)]);

    let manifest = load_manifest(&manifest_path).expect("load manifest");
    rp.compare_values(1.0, manifest.len() as f64, 0.0);

    let config = PipelineConfig::default();
    let dataset = build_dataset(&manifest, &config).expect("build dataset");
    rp.compare_values(2.0, dataset.features().rows() as f64, 0.0);
    rp.compare_values(2.0, dataset.labels().rows() as f64, 0.0);
    for (features, label) in dataset.samples() {
        rp.compare_values(225.0, features.len() as f64, 0.0);
        rp.compare_values(NUM_CLASSES as f64, label.len() as f64, 0.0);
        rp.compare_values(3.0, argmax(label).unwrap_or(99) as f64, 0.0);
    }

    assert!(rp.cleanup(), "pipeline regression test failed");
}

/// Every glyph of a sheet inherits the sheet's label; a blank scan and
/// malformed lines contribute nothing.
#[test]
fn pipeline_reg_sheets() {
    let mut rp = RegParams::new("pipeline_sheets");
    let dir = tempfile::tempdir().expect("tempdir");

    let sevens = write_scan(dir.path(), "sevens.png", &synth::digit_sheet(&[7, 7, 7], 3));
    let twos = write_scan(dir.path(), "twos.png", &synth::digit_sheet(&[2, 2], 3));
    let blank = write_scan(dir.path(), "blank.png", &synth::page(60, 40));
    let manifest_path = write_manifest(
        dir.path(),
        "train.txt",
        &[
            format!("7 {}", sevens),
            "x not-a-label.png".to_string(),
            String::new(),
            format!("2 {}", twos),
            format!("5 {}", blank),
            "4".to_string(),
        ],
    );

    let manifest = load_manifest(&manifest_path).expect("load manifest");
    rp.compare_values(3.0, manifest.len() as f64, 0.0);
    rp.compare_values(2.0, manifest.skipped as f64, 0.0);

    let mut seen = Vec::new();
    let dataset = build_dataset_with(
        &manifest,
        &PipelineConfig::default(),
        |scan: &SegmentedScan<'_>, builder| {
            // The inspector sees the same normalized glyphs as the rows
            for b in scan.boxes {
                let glyph = builder.glyph(scan.pix, b)?.expect("box inside scan");
                assert_eq!((glyph.width(), glyph.height()), (15, 15));
            }
            seen.push((scan.index, scan.boxes.len()));
            Ok(())
        },
    )
    .expect("build dataset");

    rp.compare_values(5.0, dataset.len() as f64, 0.0);
    rp.compare_values(1.0, (seen == vec![(0, 3), (1, 2), (2, 0)]) as u8 as f64, 0.0);
    let labels: Vec<usize> = dataset
        .samples()
        .map(|(_, label)| argmax(label).unwrap_or(99))
        .collect();
    rp.compare_values(1.0, (labels == vec![7, 7, 7, 2, 2]) as u8 as f64, 0.0);

    assert!(rp.cleanup(), "pipeline sheets regression test failed");
}

/// An unreadable scan aborts the build with an error naming the path.
#[test]
fn pipeline_reg_unreadable_image() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("missing.png");
    let garbage = dir.path().join("garbage.png");
    fs::write(&garbage, b"not an image").expect("write garbage");

    for path in [&missing, &garbage] {
        let manifest_path = write_manifest(
            dir.path(),
            "bad.txt",
            &[format!("1 {}", path.to_string_lossy())],
        );
        let manifest = load_manifest(&manifest_path).expect("load manifest");
        match build_dataset(&manifest, &PipelineConfig::default()) {
            Err(RecogError::ImageUnreadable { path: p, .. }) => assert_eq!(&p, path),
            other => panic!("expected ImageUnreadable, got {:?}", other.map(|d| d.len())),
        }
    }

    let err = load_manifest(dir.path().join("no-such-manifest.txt")).unwrap_err();
    assert!(matches!(err, RecogError::ManifestUnreadable { .. }));
}
