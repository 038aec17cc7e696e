//! Variance-stabilizing transforms

use lazy_static::lazy_static;
use ndarray::Zip;
use stamox_core::{kernel, partial_pipe_jit, Bound, Error, Functional, Result, Signature, Value};

lazy_static! {
    static ref BOXCOX: Functional = partial_pipe_jit(kernel(
        Signature::new("boxcox").required("x").required("lmbda"),
        boxcox_kernel,
    ));
    static ref Z_FISHER: Functional = partial_pipe_jit(kernel(
        Signature::new("z_fisher").required("rho"),
        z_fisher_kernel,
    ));
}

/// Box-Cox transform: `log(x)` where `lmbda == 0`, else `(x^lmbda - 1) / lmbda`
///
/// `lmbda` broadcasts against `x`.
pub fn boxcox() -> Functional {
    BOXCOX.clone()
}

/// Fisher z-transform `atanh(rho)`, with `rho` clipped to `[-1, 1]`
pub fn z_fisher() -> Functional {
    Z_FISHER.clone()
}

fn boxcox_kernel(args: &Bound<'_>) -> Result<Value> {
    let x = args.array("x")?;
    let lmbda = args.array("lmbda")?;
    let lmbda = lmbda
        .broadcast(x.raw_dim())
        .ok_or_else(|| Error::size_mismatch(x.len(), lmbda.len(), "boxcox lmbda"))?;
    let out = Zip::from(&x).and(&lmbda).map_collect(|&x, &l| {
        if l == 0.0 {
            x.ln()
        } else {
            (x.powf(l) - 1.0) / l
        }
    });
    Ok(out.into())
}

fn z_fisher_kernel(args: &Bound<'_>) -> Result<Value> {
    let rho = args.array("rho")?;
    Ok(rho.mapv(|r| r.clamp(-1.0, 1.0).atanh()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use stamox_core::{args, kwargs};

    fn to_vec(v: Value) -> Vec<f64> {
        v.into_array().unwrap().iter().copied().collect()
    }

    #[test]
    fn test_boxcox_log_case() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let out = to_vec(boxcox().call(args![x.clone(), vec![0.0; 5]]).unwrap());
        let expected = [0.0, 0.6931472, 1.0986123, 1.3862944, 1.6094378];
        for (a, e) in out.iter().zip(expected) {
            assert_relative_eq!(*a, e, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_boxcox_scalar_lambda_broadcasts() {
        let f = boxcox().bind(kwargs! { lmbda = 2.0 }).unwrap();
        let out = to_vec(f.call1(vec![1.0, 3.0]).unwrap());
        assert_eq!(out, vec![0.0, 4.0]);
    }

    #[test]
    fn test_boxcox_shape_mismatch() {
        let err = boxcox().call(args![vec![1.0, 2.0, 3.0], vec![1.0, 2.0]]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_z_fisher_reference() {
        let out = to_vec(z_fisher().call1(vec![0.1, 0.2, 0.3, 0.4, 0.5]).unwrap());
        let expected = [0.10033535, 0.20273255, 0.30951960, 0.42364893, 0.54930614];
        for (a, e) in out.iter().zip(expected) {
            assert_relative_eq!(*a, e, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_z_fisher_clips() {
        let out = to_vec(z_fisher().call1(vec![2.0, -3.0]).unwrap());
        assert_eq!(out, vec![f64::INFINITY, f64::NEG_INFINITY]);
    }

    #[test]
    fn test_transforms_are_compiled() {
        assert!(boxcox().is_compiled());
        assert!(z_fisher().is_compiled());
    }
}
