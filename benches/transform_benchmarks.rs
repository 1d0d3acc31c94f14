use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use image::{DynamicImage, Rgba, RgbaImage};
use rgba_ops::{
    services::ImageIOService, BackgroundRemover, Inverter, PixelTransform, ThresholdMasker,
    TransformConfig, TransformKind, TransformProcessor,
};

fn synthetic_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let v = ((x ^ y) & 0xFF) as u8;
        Rgba([v, v.wrapping_mul(3), v.wrapping_add(40), if (x + y) % 7 == 0 { 0 } else { 255 }])
    })
}

fn bench_pixel_transforms(c: &mut Criterion) {
    let transforms: [(&str, Box<dyn PixelTransform>); 3] = [
        ("invert", Box::new(Inverter)),
        ("remove_background", Box::new(BackgroundRemover::default())),
        ("mask", Box::new(ThresholdMasker::default())),
    ];

    let mut group = c.benchmark_group("pixel_transforms");
    for size in [256_u32, 1024] {
        let image = synthetic_image(size, size);
        group.throughput(Throughput::Elements(u64::from(size) * u64::from(size)));

        for (name, transform) in &transforms {
            group.bench_with_input(BenchmarkId::new(*name, size), &image, |b, image| {
                b.iter(|| transform.apply(black_box(image)));
            });
        }
    }
    group.finish();
}

fn bench_in_memory_pipeline(c: &mut Criterion) {
    let png = ImageIOService::encode_png(&synthetic_image(512, 512))
        .expect("Failed to encode benchmark fixture");
    let decoded = DynamicImage::ImageRgba8(synthetic_image(512, 512));

    let mut group = c.benchmark_group("pipeline");
    group.sample_size(20);

    group.bench_function("process_bytes_mask", |b| {
        let mut processor =
            TransformProcessor::new(TransformConfig::for_kind(TransformKind::brightness_mask()));
        b.iter(|| processor.process_bytes(black_box(&png)));
    });

    group.bench_function("process_image_invert", |b| {
        let mut processor = TransformProcessor::new(TransformConfig::default());
        b.iter(|| processor.process_image(black_box(&decoded)));
    });

    group.bench_function("encode_png", |b| {
        let image = synthetic_image(512, 512);
        b.iter(|| ImageIOService::encode_png(black_box(&image)));
    });

    group.finish();
}

criterion_group!(benches, bench_pixel_transforms, bench_in_memory_pipeline);
criterion_main!(benches);
