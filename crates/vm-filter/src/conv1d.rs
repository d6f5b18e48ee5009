use vm_core::{BorderMode, fetch_f32};

/// Convolves one line of samples with an odd-length kernel.
///
/// `out[i] = sum_k signal[i + radius - k] * kernel[k]`, widening samples to
/// `f32`. Taps falling outside `signal` are extrapolated by `border`.
///
/// # Panics
/// Panics if `out.len() != signal.len()` or `kernel.len() != 2 * radius + 1`.
pub fn convolve_row<T: Copy + Into<f32>>(
    signal: &[T],
    kernel: &[f32],
    radius: usize,
    border: &BorderMode<f32>,
    out: &mut [f32],
) {
    assert_eq!(out.len(), signal.len(), "out must match signal length");
    assert_eq!(
        kernel.len(),
        2 * radius + 1,
        "kernel len must be 2*radius+1"
    );

    let n = signal.len();
    if n == 0 {
        return;
    }

    // Pixels in `[lo, hi)` see the full kernel footprint inside the signal.
    let (lo, hi) = if n > 2 * radius {
        (radius, n - radius)
    } else {
        (n, n)
    };

    for (i, out_i) in out.iter_mut().enumerate().take(lo) {
        *out_i = border_tap(signal, kernel, radius, i, border);
    }

    for (i, out_i) in out.iter_mut().enumerate().take(hi).skip(lo) {
        let window = &signal[i - radius..=i + radius];
        *out_i = window
            .iter()
            .zip(kernel.iter().rev())
            .map(|(&s, &kv)| s.into() * kv)
            .sum();
    }

    for (i, out_i) in out.iter_mut().enumerate().skip(hi) {
        *out_i = border_tap(signal, kernel, radius, i, border);
    }
}

#[inline]
fn border_tap<T: Copy + Into<f32>>(
    signal: &[T],
    kernel: &[f32],
    radius: usize,
    i: usize,
    border: &BorderMode<f32>,
) -> f32 {
    let mut acc = 0.0f32;
    for (k, &kv) in kernel.iter().enumerate() {
        let idx = i as isize + radius as isize - k as isize;
        acc += fetch_f32(signal, idx, border) * kv;
    }
    acc
}

#[cfg(test)]
mod tests {
    use vm_core::BorderMode;

    use crate::conv1d::convolve_row;

    #[test]
    fn identity_kernel_copies_signal() {
        let signal = [1u8, 2, 3, 4];
        let mut out = vec![0.0f32; signal.len()];
        convolve_row(&signal, &[1.0], 0, &BorderMode::Clamp, &mut out);
        assert_eq!(out, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn constant_border_box_sum() {
        let signal = [1.0f32, 2.0, 3.0];
        let mut out = vec![0.0f32; signal.len()];
        convolve_row(
            &signal,
            &[1.0, 1.0, 1.0],
            1,
            &BorderMode::Constant(0.0),
            &mut out,
        );
        assert_eq!(out, vec![3.0, 6.0, 5.0]);
    }

    #[test]
    fn kernel_is_flipped() {
        // [1, 0, -1] yields signal[i + 1] - signal[i - 1].
        let signal = [0.0f32, 1.0, 4.0, 9.0, 16.0];
        let mut out = vec![0.0f32; signal.len()];
        convolve_row(&signal, &[1.0, 0.0, -1.0], 1, &BorderMode::Clamp, &mut out);
        assert_eq!(out, vec![1.0, 4.0, 8.0, 12.0, 7.0]);
    }

    #[test]
    fn short_signal_uses_border_path_everywhere() {
        let signal = [2u16, 4];
        let mut out = vec![0.0f32; 2];
        convolve_row(
            &signal,
            &[1.0, 1.0, 1.0, 1.0, 1.0],
            2,
            &BorderMode::Reflect101,
            &mut out,
        );
        // Reflect101 on len 2 alternates 2,4,2,4,...
        assert_eq!(out, vec![14.0, 16.0]);
    }
}
