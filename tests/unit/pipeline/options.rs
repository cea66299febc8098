use super::*;

#[test]
fn defaults_follow_the_conversion_contract() {
    let opts = ConvertOptions::default();
    assert_eq!(opts.format, OutputFormat::Png);
    assert_eq!(opts.quality, 0.8);
    assert_eq!(opts.tolerance, 30);
    assert_eq!(opts.margin, Margin::Fixed(5));
    assert_eq!(opts.background, BackgroundMode::Single);
    assert_eq!(opts.strategy, VectorStrategy::BlockMerge);
    assert!(opts.canonicalize_svg);
    opts.validate().unwrap();
}

#[test]
fn json_fields_are_optional() {
    let opts = ConvertOptions::from_json_str(
        r#"{ "format": "SVG", "strategy": "run_merge", "margin": "proportional" }"#,
    );
    // format tags are lowercase in JSON
    assert!(opts.is_err());

    let opts = ConvertOptions::from_json_str(
        r#"{ "format": "svg", "strategy": "run_merge", "margin": { "fixed": 8 }, "background": "dual" }"#,
    )
    .unwrap();
    assert_eq!(opts.format, OutputFormat::Svg);
    assert_eq!(opts.strategy, VectorStrategy::RunMerge);
    assert_eq!(opts.margin, Margin::Fixed(8));
    assert_eq!(opts.background, BackgroundMode::Dual);
    assert_eq!(opts.quality, 0.8);

    let empty = ConvertOptions::from_json_str("{}").unwrap();
    assert_eq!(empty, ConvertOptions::default());
}

#[test]
fn unknown_fields_and_bad_json_are_rejected() {
    let err = ConvertOptions::from_json_str(r#"{ "fromat": "png" }"#).unwrap_err();
    assert!(err.to_string().contains("parse options JSON"));
    assert!(ConvertOptions::from_json_str("{").is_err());
}

#[test]
fn validation_rejects_degenerate_values() {
    let mut opts = ConvertOptions {
        tolerance: 0,
        ..ConvertOptions::default()
    };
    assert!(opts.validate().is_err());

    opts.tolerance = 30;
    opts.margin = Margin::Fixed(0);
    assert!(opts.validate().is_err());

    opts.margin = Margin::Proportional;
    opts.quality = 7.5;
    // quality is clamped at encode time, never rejected
    assert!(opts.validate().is_ok());
}

#[test]
fn missing_options_file_is_reported_with_path() {
    let err = ConvertOptions::from_path("does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("does/not/exist.json"));
}

#[test]
fn raster_opts_carry_quality_and_matte() {
    let opts = ConvertOptions {
        quality: 0.3,
        matte_rgb: [0, 10, 20],
        ..ConvertOptions::default()
    };
    let raster = opts.raster_opts();
    assert_eq!(raster.quality, 0.3);
    assert_eq!(raster.matte, Color::rgb(0, 10, 20));
}
