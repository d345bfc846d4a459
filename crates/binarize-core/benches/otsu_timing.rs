use binarize_core::{
    binarize, estimate_threshold, reduce_intensity, BinarizePipeline, OtsuParams, RgbImage,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn synthetic(w: usize, h: usize) -> RgbImage {
    RgbImage::from_fn(w, h, |x, y| {
        let base = if (x / 32 + y / 32) % 2 == 0 { 50 } else { 200 };
        let noise = ((x * 31 + y * 17) % 23) as u8;
        [base + noise, base, base + noise / 2]
    })
    .expect("synthetic image")
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("otsu_stages");
    for &(w, h) in &[(640usize, 480usize), (1920, 1080)] {
        let img = synthetic(w, h);
        let gray = reduce_intensity(&img.view());
        let params = OtsuParams::default();
        let label = format!("{w}x{h}");

        group.bench_with_input(BenchmarkId::new("reduce", &label), &img, |b, img| {
            b.iter(|| reduce_intensity(black_box(&img.view())))
        });
        group.bench_with_input(BenchmarkId::new("threshold", &label), &gray, |b, gray| {
            b.iter(|| estimate_threshold(black_box(&gray.view()), &params))
        });
        group.bench_with_input(BenchmarkId::new("binarize", &label), &gray, |b, gray| {
            b.iter(|| binarize(black_box(&gray.view()), 127))
        });
        group.bench_with_input(BenchmarkId::new("pipeline", &label), &img, |b, img| {
            let pipeline = BinarizePipeline::new(params.clone());
            b.iter(|| pipeline.run(black_box(&img.view())))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_stages);
criterion_main!(benches);
