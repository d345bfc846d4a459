use binarize_core::{
    binarize, estimate_threshold, reduce_intensity, BinarizePipeline, GrayImage, GrayImageView,
    Histogram, OtsuParams, OtsuVariant, RgbImage, RgbImageView, ThresholdSource,
    DEFAULT_FALLBACK_THRESHOLD,
};

fn two_tone_rgb(w: usize, h: usize) -> RgbImage {
    // Dark left half with mild texture, bright right half.
    RgbImage::from_fn(w, h, |x, y| {
        if x < w / 2 {
            let v = 40 + ((x * 7 + y * 3) % 11) as u8;
            [v, v + 2, v.saturating_sub(2)]
        } else {
            let v = 190 + ((x * 5 + y) % 13) as u8;
            [v, v - 4, v + 4]
        }
    })
    .expect("synthetic image")
}

#[test]
fn two_clusters_split_between_them() {
    let img = GrayImage::new(2, 2, vec![10, 10, 200, 200]).unwrap();
    let hist = Histogram::from_gray(&img.view());
    assert_eq!(hist.count(10), 2);
    assert_eq!(hist.count(200), 2);

    let est = estimate_threshold(&img.view(), &OtsuParams::default());
    assert_eq!(est.source, ThresholdSource::Otsu);
    assert!((10..200).contains(&est.threshold));

    let bin = binarize(&img.view(), est.threshold);
    assert_eq!(bin.data, vec![0, 0, 255, 255]);
}

#[test]
fn uniform_image_uses_fallback() {
    let img = GrayImage::filled(4, 4, 128).unwrap();
    for variant in [OtsuVariant::Classic, OtsuVariant::FullRange] {
        let params = OtsuParams {
            variant,
            ..OtsuParams::default()
        };
        let est = estimate_threshold(&img.view(), &params);
        assert_eq!(est.source, ThresholdSource::Fallback);
        assert_eq!(est.threshold, DEFAULT_FALLBACK_THRESHOLD);

        // 128 > 127: the whole image is foreground.
        let bin = binarize(&img.view(), est.threshold);
        assert!(bin.data.iter().all(|&v| v == 255));
    }
}

fn single_bright_pixel(px: [u8; 3]) -> GrayImage {
    let mut data = vec![0u8; 27];
    data[3 * 4..3 * 4 + 3].copy_from_slice(&px);
    let img = RgbImageView::new(3, 3, &data).unwrap();
    reduce_intensity(&img)
}

#[test]
fn single_bright_pixel_reduces_to_channel_mean() {
    for (px, bright) in [([255, 0, 0], 85), ([255, 255, 255], 255)] {
        let gray = single_bright_pixel(px);
        assert_eq!((gray.width, gray.height), (3, 3));
        for y in 0..3 {
            for x in 0..3 {
                let expected = if (x, y) == (1, 1) { bright } else { 0 };
                assert_eq!(gray.get(x, y), expected, "{px:?} pixel ({x}, {y})");
            }
        }
    }
}

#[test]
fn histogram_total_matches_pixel_count() {
    let img = two_tone_rgb(37, 23);
    let gray = reduce_intensity(&img.view());
    let hist = Histogram::from_gray(&gray.view());
    assert_eq!(hist.total(), 37 * 23);
    assert_eq!(hist.counts().iter().sum::<u64>(), 37 * 23);
}

#[test]
fn pipeline_separates_halves() {
    let (w, h) = (40, 20);
    let img = two_tone_rgb(w, h);
    let out = BinarizePipeline::new(OtsuParams::default()).run(&img.view());

    assert_eq!(out.threshold.source, ThresholdSource::Otsu);
    assert!((1..=254).contains(&out.threshold.threshold));
    for y in 0..h {
        for x in 0..w {
            let expected = if x < w / 2 { 0 } else { 255 };
            assert_eq!(out.binary.get(x, y), expected, "pixel ({x}, {y})");
        }
    }
}

#[test]
fn pipeline_matches_individual_stages() {
    let img = two_tone_rgb(16, 9);
    let params = OtsuParams {
        variant: OtsuVariant::FullRange,
        ..OtsuParams::default()
    };
    let out = BinarizePipeline::new(params.clone()).run(&img.view());

    let gray = reduce_intensity(&img.view());
    let est = estimate_threshold(&gray.view(), &params);
    assert_eq!(out.intensity, gray);
    assert_eq!(out.threshold, est);
    assert_eq!(out.binary, binarize(&gray.view(), est.threshold));

    let again = BinarizePipeline::new(params).run_gray(&gray.view());
    assert_eq!(again.binary, out.binary);
}

#[test]
fn empty_rasters_pass_through() {
    let data: [u8; 0] = [];
    let rgb = RgbImageView::new(0, 5, &data).unwrap();
    let gray = reduce_intensity(&rgb);
    assert_eq!((gray.width, gray.height), (0, 5));

    let view = GrayImageView::new(0, 5, &data).unwrap();
    let est = estimate_threshold(&view, &OtsuParams::default());
    assert!(est.is_fallback());
    let bin = binarize(&view, est.threshold);
    assert_eq!((bin.width, bin.height), (0, 5));
}

#[test]
fn max_intensity_is_excluded_from_classic_scan() {
    // Many saturated pixels: both variants still separate dark from bright,
    // but only the full-range variant accounts for 255 in the class means.
    let mut data = vec![255u8; 60];
    data.extend(std::iter::repeat(20).take(30));
    data.extend(std::iter::repeat(120).take(10));
    let img = GrayImage::new(10, 10, data).unwrap();

    let classic = estimate_threshold(&img.view(), &OtsuParams::default());
    let full = estimate_threshold(
        &img.view(),
        &OtsuParams {
            variant: OtsuVariant::FullRange,
            ..OtsuParams::default()
        },
    );
    assert_eq!(classic.source, ThresholdSource::Otsu);
    assert_eq!(full.source, ThresholdSource::Otsu);
    assert_eq!(classic.threshold, 120);
    assert_eq!(full.threshold, 120);
    assert_ne!(classic.variance, full.variance);
}
