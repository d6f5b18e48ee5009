use criterion::{Criterion, black_box, criterion_group, criterion_main};
use vm_core::Image;
use vm_deriv::{AnyDerivative, Axis, DerivativeConfig};
use vm_filter::Kernel1D;

fn build_slanted_u8(width: usize, height: usize) -> Image<u8> {
    let theta = 20.0f32.to_radians();
    let nx = theta.cos();
    let ny = theta.sin();
    let t = nx * (0.5 * width as f32) + ny * (0.5 * height as f32);

    let mut data = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let d = nx * x as f32 + ny * y as f32 - t;
            data[y * width + x] = if d >= 0.0 { 255 } else { 0 };
        }
    }

    Image::from_vec(width, height, data).expect("valid image")
}

fn bench_hessian_recompute(c: &mut Criterion) {
    let img = build_slanted_u8(640, 480);
    let kernel = Kernel1D::dog(1.0).expect("valid sigma");
    let mut deriv = AnyDerivative::from_kernel_1d(&kernel, &DerivativeConfig::default());

    c.bench_function("any_derivative_hessian_u8_640x480", |b| {
        b.iter(|| {
            deriv.set_input(black_box(img.as_view()));
            for axes in [[Axis::X, Axis::X], [Axis::X, Axis::Y], [Axis::Y, Axis::Y]] {
                let d = deriv.derivative(&axes).expect("valid order");
                black_box(d.data()[0]);
            }
        });
    });
}

fn bench_cached_lookup(c: &mut Criterion) {
    let img = build_slanted_u8(640, 480);
    let kernel = Kernel1D::central_difference();
    let mut deriv = AnyDerivative::from_kernel_1d(&kernel, &DerivativeConfig::default());
    deriv.set_input(img.as_view());
    deriv
        .derivative(&[Axis::X, Axis::Y, Axis::X])
        .expect("valid order");

    c.bench_function("any_derivative_cached_order3", |b| {
        b.iter(|| {
            let d = deriv
                .derivative(black_box(&[Axis::X, Axis::Y, Axis::X]))
                .expect("valid order");
            black_box(d.width());
        });
    });
}

criterion_group!(benches, bench_hessian_recompute, bench_cached_lookup);
criterion_main!(benches);
