//! Linear min-max rescaling.
//!
//! Maps a sequence from its observed `[min, max]` range onto a target range. Useful for
//! bringing raw features into the output range of the activation before training.
//!
//! To rescale part of a buffer, pass the corresponding subslice. NaN or infinite entries are
//! rejected with [`Error::InvalidData`].

use crate::{Error, Result};

/// Rescale `data` in place to `[min, max]`.
pub fn rescale_in_place(data: &mut [f64], min: f64, max: f64) -> Result<()> {
    let map = RangeMap::fit(data, min, max)?;
    for v in data.iter_mut() {
        *v = map.apply(*v);
    }
    Ok(())
}

/// Rescale `data` to `[min, max]`, returning a new vector.
pub fn rescale_to_new(data: &[f64], min: f64, max: f64) -> Result<Vec<f64>> {
    let map = RangeMap::fit(data, min, max)?;
    Ok(data.iter().map(|&v| map.apply(v)).collect())
}

/// Rescale `data` to `[min, max]`, writing into `out`.
///
/// `out.len()` must equal `data.len()`.
pub fn rescale_into(data: &[f64], out: &mut [f64], min: f64, max: f64) -> Result<()> {
    Error::check_len("rescale output", data.len(), out.len())?;
    let map = RangeMap::fit(data, min, max)?;
    for (o, &v) in out.iter_mut().zip(data) {
        *o = map.apply(v);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
struct RangeMap {
    observed_min: f64,
    target_min: f64,
    factor: f64,
}

impl RangeMap {
    fn fit(data: &[f64], min: f64, max: f64) -> Result<Self> {
        if let Some(pos) = data.iter().position(|v| !v.is_finite()) {
            return Err(Error::InvalidData(format!(
                "cannot rescale non-finite value {} at index {pos}",
                data[pos]
            )));
        }

        let (observed_min, observed_max) = data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });

        let span = observed_max - observed_min;
        // Also covers empty input: span is -inf there.
        if !(span.is_finite() && span > 0.0) {
            return Err(Error::DegenerateRange {
                min: observed_min,
                max: observed_max,
            });
        }

        Ok(Self {
            observed_min,
            target_min: min,
            factor: (max - min) / span,
        })
    }

    #[inline]
    fn apply(self, v: f64) -> f64 {
        self.target_min + self.factor * (v - self.observed_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn maps_observed_range_onto_target() {
        let out = rescale_to_new(&[2.0, 4.0, 3.0, 6.0], 0.0, 1.0).unwrap();
        assert_eq!(out, vec![0.0, 0.5, 0.25, 1.0]);

        let out = rescale_to_new(&[0.0, 4.0], -1.0, 1.0).unwrap();
        assert_eq!(out, vec![-1.0, 1.0]);
    }

    #[test]
    fn in_place_and_into_agree_with_to_new() {
        let data = [5.0, -3.0, 0.5, 12.0];
        let expected = rescale_to_new(&data, 10.0, 20.0).unwrap();

        let mut in_place = data;
        rescale_in_place(&mut in_place, 10.0, 20.0).unwrap();
        assert_eq!(in_place.to_vec(), expected);

        let mut out = [0.0; 4];
        rescale_into(&data, &mut out, 10.0, 20.0).unwrap();
        assert_eq!(out.to_vec(), expected);
    }

    #[test]
    fn subslice_rescale_leaves_the_rest_untouched() {
        let mut data = [100.0, 1.0, 2.0, 3.0, 100.0];
        rescale_in_place(&mut data[1..4], 0.0, 1.0).unwrap();
        assert_eq!(data, [100.0, 0.0, 0.5, 1.0, 100.0]);
    }

    #[test]
    fn inverted_target_range_flips_order() {
        let out = rescale_to_new(&[0.0, 1.0, 4.0], 1.0, 0.0).unwrap();
        assert_relative_eq!(out[0], 1.0);
        assert_relative_eq!(out[1], 0.75);
        assert_relative_eq!(out[2], 0.0);
    }

    #[test]
    fn degenerate_ranges_are_errors() {
        assert!(matches!(
            rescale_to_new(&[3.0, 3.0, 3.0], 0.0, 1.0),
            Err(Error::DegenerateRange { min, max }) if min == 3.0 && max == 3.0
        ));
        assert!(matches!(
            rescale_to_new(&[], 0.0, 1.0),
            Err(Error::DegenerateRange { .. })
        ));

        let mut data = [1.0, 1.0];
        assert!(rescale_in_place(&mut data, 0.0, 1.0).is_err());
        assert_eq!(data, [1.0, 1.0]);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                rescale_to_new(&[bad, 0.0, 1.0], 0.0, 1.0),
                Err(Error::InvalidData(_))
            ));
        }

        let mut data = [0.0, f64::NAN, 1.0];
        assert!(matches!(
            rescale_in_place(&mut data, 0.0, 1.0),
            Err(Error::InvalidData(_))
        ));
        assert_eq!(data[0], 0.0);
        assert_eq!(data[2], 1.0);
    }

    #[test]
    fn rescale_into_checks_lengths() {
        let mut out = [0.0; 2];
        assert!(matches!(
            rescale_into(&[0.0, 1.0, 2.0], &mut out, 0.0, 1.0),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
