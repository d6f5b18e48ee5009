use serde::{Deserialize, Serialize};

/// Extrapolation policy for samples that fall outside an image line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderMode<T> {
    /// Repeat the nearest edge pixel.
    Clamp,
    /// Treat everything outside as the given value.
    Constant(T),
    /// Mirror around the edge pixel without repeating it (`dcb|abcd|cba`).
    Reflect101,
}

/// Maps a possibly out-of-range index onto `[0, len)`.
///
/// Returns `None` for `Constant` borders and for empty lines.
pub fn map_index<T>(i: isize, len: usize, mode: &BorderMode<T>) -> Option<usize> {
    if len == 0 {
        return None;
    }

    if i >= 0 && (i as usize) < len {
        return Some(i as usize);
    }

    match mode {
        BorderMode::Constant(_) => None,
        BorderMode::Clamp => Some(if i < 0 { 0 } else { len - 1 }),
        BorderMode::Reflect101 => {
            if len == 1 {
                return Some(0);
            }

            let period = (2 * len - 2) as isize;
            let r = i.rem_euclid(period) as usize;
            Some(if r < len { r } else { period as usize - r })
        }
    }
}

/// Reads `line[i]` widened to `f32`, extrapolating out-of-range indices.
///
/// An empty line yields the constant value, or `0.0` for the other modes.
#[inline]
pub fn fetch_f32<P: Copy + Into<f32>>(line: &[P], i: isize, mode: &BorderMode<f32>) -> f32 {
    match map_index(i, line.len(), mode) {
        Some(idx) => line[idx].into(),
        None => match mode {
            BorderMode::Constant(c) => *c,
            _ => 0.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::{BorderMode, fetch_f32, map_index};

    #[test]
    fn in_range_indices_pass_through_for_every_mode() {
        for mode in [
            BorderMode::Clamp,
            BorderMode::Constant(7.0f32),
            BorderMode::Reflect101,
        ] {
            for i in 0..4 {
                assert_eq!(map_index(i, 4, &mode), Some(i as usize));
            }
        }
    }

    #[test]
    fn clamp_saturates_at_both_ends() {
        let mode = BorderMode::<u8>::Clamp;
        assert_eq!(map_index(-9, 3, &mode), Some(0));
        assert_eq!(map_index(-1, 3, &mode), Some(0));
        assert_eq!(map_index(3, 3, &mode), Some(2));
        assert_eq!(map_index(40, 3, &mode), Some(2));
    }

    #[test]
    fn reflect101_mirrors_without_repeating_edge() {
        let mode = BorderMode::<u8>::Reflect101;

        for i in -5..=5 {
            assert_eq!(map_index(i, 1, &mode), Some(0));
        }

        // len 4: period 6, ... 2 1 | 0 1 2 3 | 2 1 0 1 ...
        let cases = [(-3, 3), (-2, 2), (-1, 1), (4, 2), (5, 1), (6, 0), (7, 1)];
        for (i, expected) in cases {
            assert_eq!(map_index(i, 4, &mode), Some(expected), "i = {i}");
        }
    }

    #[test]
    fn constant_and_empty_lines_do_not_map() {
        assert_eq!(map_index(-1, 5, &BorderMode::Constant(0u8)), None);
        assert_eq!(map_index(5, 5, &BorderMode::Constant(0u8)), None);
        assert_eq!(map_index(0, 0, &BorderMode::<u8>::Clamp), None);
    }

    #[test]
    fn fetch_widens_and_extrapolates() {
        let line = [10u8, 20, 30];
        assert_eq!(fetch_f32(&line, 1, &BorderMode::Clamp), 20.0);
        assert_eq!(fetch_f32(&line, -2, &BorderMode::Clamp), 10.0);
        assert_eq!(fetch_f32(&line, 3, &BorderMode::Reflect101), 20.0);
        assert_eq!(fetch_f32(&line, 3, &BorderMode::Constant(-1.0)), -1.0);
        assert_eq!(fetch_f32::<u8>(&[], 0, &BorderMode::Clamp), 0.0);
    }

    #[test]
    fn border_mode_serde_names() {
        let json = serde_json::to_string(&BorderMode::Constant(0.5f32)).expect("serialize");
        assert_eq!(json, r#"{"constant":0.5}"#);

        let mode: BorderMode<f32> = serde_json::from_str(r#""reflect101""#).expect("deserialize");
        assert_eq!(mode, BorderMode::Reflect101);
    }
}
