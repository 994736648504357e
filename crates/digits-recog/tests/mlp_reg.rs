//! Digit classifier training regression test
//!
//! Trains the default network topology on synthetic digit sheets and
//! checks that it learns them, then evaluates on shifted copies.
//!
//! Run with:
//! ```
//! cargo test -p digits-recog --test mlp_reg
//! ```

use digits_core::Pix;
use digits_recog::{
    Classifier, Dataset, FeatureBuilder, FeatureOptions, Mlp, MlpParams, evaluate,
};
use digits_region::{SegmentOptions, segment_digits};
use digits_test::{RegParams, synth};

const DIGITS: [u8; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];

/// One row per glyph of a sheet of all ten digits, labeled in order
fn sheet_dataset(builder: &FeatureBuilder, sheet: &Pix) -> Dataset {
    let mut boxes = segment_digits(sheet, &SegmentOptions::default()).expect("segment");
    boxes.sort_by_position();
    assert_eq!(boxes.len(), DIGITS.len());

    let mut dataset = builder.empty_dataset();
    for (b, &digit) in boxes.iter().zip(&DIGITS) {
        let single = std::iter::once(*b).collect();
        builder
            .append(&mut dataset, sheet, &single, digit)
            .expect("append");
    }
    dataset
}

#[test]
fn mlp_reg() {
    let mut rp = RegParams::new("mlp");

    let builder = FeatureBuilder::new(FeatureOptions::default()).expect("builder");
    let train = sheet_dataset(&builder, &synth::digit_sheet(&DIGITS, 3));
    rp.compare_values(10.0, train.len() as f64, 0.0);

    let params = MlpParams {
        max_iterations: 200,
        epsilon: 0.0,
        ..Default::default()
    };
    let model = Mlp::train(train.features(), train.labels(), &params).expect("train");
    rp.compare_values(1.0, (model.layer_sizes() == vec![225, 168, 56, 10]) as u8 as f64, 0.0);
    rp.compare_values(200.0, model.report().iterations as f64, 0.0);

    let eval = evaluate(&model, &train).expect("evaluate train");
    let percent = eval.percent_correct().unwrap_or(0.0);
    eprintln!("Train: {} samples, {} misses, {:.1}%", eval.samples, eval.misses, percent);
    rp.compare_values(1.0, (percent >= 90.0) as u8 as f64, 0.0);

    // Scores cover every class
    let scores = model.predict(train.features().row(0).expect("row")).expect("predict");
    rp.compare_values(10.0, scores.len() as f64, 0.0);

    assert!(rp.cleanup(), "mlp regression test failed");
}
