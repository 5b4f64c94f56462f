use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use argus_image::{Image, ImageSize};
use argus_rectify::interpolation::InterpolationMode;
use argus_rectify::resample::remap_image;
use argus_rectify::{PinholeCamera, RemapTable};

fn cameras(width: usize, height: usize) -> (PinholeCamera, PinholeCamera) {
    let size = ImageSize { width, height };
    let cx = (width as f64 - 1.0) / 2.0;
    let cy = (height as f64 - 1.0) / 2.0;
    let input = PinholeCamera::new(width as f64 * 0.8, width as f64 * 0.8, cx, cy, size);
    let output = PinholeCamera::new(width as f64 * 0.6, width as f64 * 0.6, cx, cy, size);
    (input, output)
}

fn bench_build_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("BuildRemapTable");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);
        let (input, output) = cameras(*width, *height);

        group.bench_with_input(
            BenchmarkId::new("pinhole_pair", &parameter_string),
            &(&input, &output),
            |b, i| {
                let (input, output) = (i.0, i.1);
                b.iter(|| RemapTable::build(black_box(input), black_box(output)))
            },
        );
    }
    group.finish();
}

fn bench_remap_image(c: &mut Criterion) {
    let mut group = c.benchmark_group("RemapImage");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let image_size = ImageSize {
            width: *width,
            height: *height,
        };
        let image = Image::<u8, 3>::new(image_size, vec![0u8; width * height * 3]).unwrap();
        let image_f32 = image.cast_and_scale::<f32>(1.0 / 255.0).unwrap();

        let (input, output) = cameras(*width, *height);
        let table = RemapTable::build(&input, &output).unwrap();

        let dst = Image::<f32, 3>::from_size_val(image_size, 0.0).unwrap();

        group.bench_with_input(
            BenchmarkId::new("bilinear", &parameter_string),
            &(&image_f32, &dst, &table),
            |b, i| {
                let (src, mut dst, table) = (i.0, i.1.clone(), i.2);
                b.iter(|| {
                    remap_image(
                        black_box(src),
                        black_box(&mut dst),
                        black_box(table),
                        black_box(0.0),
                        black_box(InterpolationMode::Bilinear),
                    )
                })
            },
        );

        group.bench_with_input(
            BenchmarkId::new("nearest", &parameter_string),
            &(&image_f32, &dst, &table),
            |b, i| {
                let (src, mut dst, table) = (i.0, i.1.clone(), i.2);
                b.iter(|| {
                    remap_image(
                        black_box(src),
                        black_box(&mut dst),
                        black_box(table),
                        black_box(0.0),
                        black_box(InterpolationMode::Nearest),
                    )
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_build_table, bench_remap_image);
criterion_main!(benches);
