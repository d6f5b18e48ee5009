use criterion::{Criterion, black_box, criterion_group, criterion_main};
use vm_core::{BorderMode, Image};
use vm_filter::{Convolve2D, ConvolveHorizontal, ConvolveVertical, ImageFilter, Kernel1D, Kernel2D};

fn build_textured_u8(width: usize, height: usize) -> Image<u8> {
    let mut data = Vec::with_capacity(width * height);
    for i in 0..(width * height) {
        data.push((i % 251) as u8);
    }
    Image::from_vec(width, height, data).expect("valid image")
}

fn bench_separable_dog(c: &mut Criterion) {
    let img = build_textured_u8(1280, 1024);
    let view = img.as_view();
    let k = Kernel1D::dog(1.5).expect("valid sigma");
    let hx = ConvolveHorizontal::new(k.clone(), BorderMode::Clamp);
    let vy = ConvolveVertical::new(k, BorderMode::Clamp);
    let mut out = Image::new_fill(1280, 1024, 0.0f32);

    c.bench_function("convolve_h_dog_u8_1280x1024", |b| {
        b.iter(|| {
            hx.process(black_box(&view), &mut out).expect("same dims");
            black_box(out.data()[0]);
        });
    });

    c.bench_function("convolve_v_dog_u8_1280x1024", |b| {
        b.iter(|| {
            vy.process(black_box(&view), &mut out).expect("same dims");
            black_box(out.data()[0]);
        });
    });
}

fn bench_sobel_2d(c: &mut Criterion) {
    let img = build_textured_u8(640, 480);
    let view = img.as_view();
    let sobel = Convolve2D::new(Kernel2D::sobel_x(), BorderMode::Reflect101);
    let mut out = Image::new_fill(640, 480, 0.0f32);

    c.bench_function("convolve_2d_sobel_u8_640x480", |b| {
        b.iter(|| {
            sobel.process(black_box(&view), &mut out).expect("same dims");
            black_box(out.data()[0]);
        });
    });
}

criterion_group!(benches, bench_separable_dog, bench_sobel_2d);
criterion_main!(benches);
