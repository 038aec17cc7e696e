//! Bootstrap resampling

use lazy_static::lazy_static;
use ndarray::{Axis, IxDyn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use stamox_core::{kernel, make_partial_pipe, Bound, Error, Functional, Result, Signature, Value};
use tracing::{debug, instrument};

/// Default number of bootstrap resamples
pub const DEFAULT_BOOTSTRAP_SAMPLES: usize = 1000;

lazy_static! {
    static ref BOOTSTRAP_SAMPLE: Functional = make_partial_pipe(kernel(
        Signature::new("bootstrap_sample")
            .required("x")
            .optional("num_samples", DEFAULT_BOOTSTRAP_SAMPLES)
            .required("key"),
        bootstrap_kernel,
    ));
}

/// Resample axis 0 with replacement: `bootstrap_sample(x, num_samples=1000, key)`
///
/// Returns an array of shape `(num_samples, n, ...)` where `n` is the length
/// of axis 0 of `x`. The same key always yields the same resamples.
///
/// ```rust
/// use stamox_basic::{bootstrap_sample, mean};
/// use stamox_core::{kwargs, PrngKey};
///
/// let h = bootstrap_sample().bind(kwargs! { num_samples = 3, key = PrngKey::new(0) }).unwrap()
///     >> mean().bind(kwargs! { axis = 1 }).unwrap();
/// let out = h.call1(vec![1.0, 2.0, 3.0, 4.0]).unwrap().into_array().unwrap();
/// assert_eq!(out.shape(), &[3]);
/// ```
pub fn bootstrap_sample() -> Functional {
    BOOTSTRAP_SAMPLE.clone()
}

#[instrument(skip(args), fields(kernel = "bootstrap_sample"))]
fn bootstrap_kernel(args: &Bound<'_>) -> Result<Value> {
    let x = args.array("x")?;
    let num_samples = args.usize("num_samples")?;
    let key = args.key("key")?;

    if x.ndim() == 0 || x.len_of(Axis(0)) == 0 {
        return Err(Error::empty_input());
    }
    if num_samples == 0 {
        return Err(Error::InvalidParameter("num_samples must be positive".to_string()));
    }

    let n = x.len_of(Axis(0));
    debug!("Generating {} bootstrap resamples of size {}", num_samples, n);

    let mut shape = Vec::with_capacity(x.ndim() + 1);
    shape.push(num_samples);
    shape.extend_from_slice(x.shape());
    let mut out = ndarray::ArrayD::<f64>::zeros(IxDyn(&shape));

    for (sample_key, mut dest) in key.split(num_samples).into_iter().zip(out.outer_iter_mut()) {
        let mut rng = ChaCha8Rng::seed_from_u64(sample_key.seed());
        for mut row in dest.outer_iter_mut() {
            let src = rng.gen_range(0..n);
            row.assign(&x.index_axis(Axis(0), src));
        }
    }

    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use stamox_core::{args, kwargs, PrngKey};

    #[test]
    fn test_shape_and_membership() {
        let x = array![[1.0, 10.0], [2.0, 20.0], [3.0, 30.0]];
        let out = bootstrap_sample()
            .call(args![x; num_samples = 4, key = PrngKey::new(7)])
            .unwrap()
            .into_array()
            .unwrap();
        assert_eq!(out.shape(), &[4, 3, 2]);
        for row in out.lanes(Axis(2)) {
            // rows are copied whole
            assert_eq!(row[1], row[0] * 10.0);
            assert!([1.0, 2.0, 3.0].contains(&row[0]));
        }
    }

    #[test]
    fn test_same_key_same_samples() {
        let f = bootstrap_sample()
            .bind(kwargs! { num_samples = 5, key = PrngKey::new(42) })
            .unwrap();
        let x: Vec<f64> = (0..20).map(f64::from).collect();
        assert_eq!(f.call1(x.clone()).unwrap(), f.call1(x.clone()).unwrap());

        let other = f.bind(kwargs! { key = PrngKey::new(43) }).unwrap();
        assert_ne!(f.call1(x.clone()).unwrap(), other.call1(x).unwrap());
    }

    #[test]
    fn test_key_is_required() {
        let err = bootstrap_sample().call1(vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(err, Error::MissingArgument { ref param, .. } if param == "key"));
    }

    #[test]
    fn test_zero_samples_rejected() {
        let err = bootstrap_sample()
            .call(args![vec![1.0]; num_samples = 0, key = PrngKey::new(0)])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }
}
