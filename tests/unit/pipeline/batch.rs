use std::io::Cursor;

use super::*;
use crate::foundation::core::OutputFormat;

fn png_bytes(seed: u8) -> Vec<u8> {
    let mut img = image::RgbaImage::from_pixel(12, 12, image::Rgba([250, 250, 250, 255]));
    for y in 4..8 {
        for x in 2..(4 + seed as u32 % 6) {
            img.put_pixel(x, y, image::Rgba([seed, 40, 90, 255]));
        }
    }
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn zero_threads_is_rejected() {
    assert!(matches!(
        BatchOrchestrator::new(Some(0)),
        Err(ConvertError::Validation(_))
    ));
}

#[test]
fn explicit_thread_count_is_honored() {
    let orch = BatchOrchestrator::new(Some(3)).unwrap();
    assert_eq!(orch.threads(), 3);
    assert!(BatchOrchestrator::new(None).unwrap().threads() >= 1);
}

#[test]
fn outputs_follow_input_order_in_both_modes() {
    let inputs: Vec<Vec<u8>> = (0..6).map(|i| png_bytes(i * 20)).collect();
    let opts = ConvertOptions::for_format(OutputFormat::Svg);
    let orch = BatchOrchestrator::new(Some(4)).unwrap();

    let seq = orch
        .convert_batch(&inputs, &opts, BatchMode::Sequential)
        .unwrap();
    let par = orch
        .convert_batch(&inputs, &opts, BatchMode::Parallel)
        .unwrap();
    assert_eq!(seq.len(), 6);
    assert_eq!(seq, par);
    for (i, input) in inputs.iter().enumerate() {
        assert_eq!(seq[i], convert_image(input, &opts).unwrap());
    }
}

#[test]
fn failing_index_is_reported_in_both_modes() {
    let inputs = vec![png_bytes(1), b"corrupt".to_vec(), png_bytes(2)];
    let opts = ConvertOptions::default();
    let orch = BatchOrchestrator::new(Some(2)).unwrap();

    for mode in [BatchMode::Sequential, BatchMode::Parallel] {
        let err = orch.convert_batch(&inputs, &opts, mode).unwrap_err();
        assert_eq!(err.failed_index(), Some(1), "{mode:?}");
        assert!(matches!(
            err,
            ConvertError::BatchTask { ref source, .. } if matches!(**source, ConvertError::Decode(_))
        ));
    }
}

#[test]
fn lowest_failing_index_wins_in_parallel_mode() {
    let inputs = vec![
        png_bytes(1),
        png_bytes(2),
        b"bad".to_vec(),
        png_bytes(3),
        b"worse".to_vec(),
    ];
    let orch = BatchOrchestrator::new(Some(4)).unwrap();
    let err = orch
        .convert_batch(&inputs, &ConvertOptions::default(), BatchMode::Parallel)
        .unwrap_err();
    assert_eq!(err.failed_index(), Some(2));
}

#[test]
fn partial_results_keep_successes() {
    let inputs = vec![png_bytes(1), b"corrupt".to_vec(), png_bytes(2)];
    let opts = ConvertOptions::default();
    let orch = BatchOrchestrator::new(Some(2)).unwrap();

    let results = orch.convert_batch_partial(&inputs, &opts).unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(
        results[0].as_ref().unwrap(),
        &convert_image(&inputs[0], &opts).unwrap()
    );
    assert_eq!(results[1].as_ref().unwrap_err().failed_index(), Some(1));
    assert!(results[2].is_ok());
}

#[test]
fn invalid_options_fail_before_any_work() {
    let opts = ConvertOptions {
        tolerance: 0,
        ..ConvertOptions::default()
    };
    let orch = BatchOrchestrator::new(Some(1)).unwrap();
    let err = orch
        .convert_batch(&[png_bytes(1)], &opts, BatchMode::Parallel)
        .unwrap_err();
    assert!(matches!(err, ConvertError::Validation(_)));
    assert_eq!(err.failed_index(), None);
}

#[test]
fn empty_batch_yields_empty_output() {
    let orch = BatchOrchestrator::new(Some(1)).unwrap();
    let none: Vec<Vec<u8>> = Vec::new();
    for mode in [BatchMode::Sequential, BatchMode::Parallel] {
        assert!(
            orch.convert_batch(&none, &ConvertOptions::default(), mode)
                .unwrap()
                .is_empty()
        );
    }
}
