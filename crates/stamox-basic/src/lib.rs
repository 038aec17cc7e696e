//! Descriptive statistics, resampling and transforms
//!
//! Every kernel here is exposed as a partial pipe, so options can be bound
//! ahead of time and the result composed with `>>`:
//!
//! ```rust
//! use stamox_basic::{mean, sd};
//! use stamox_core::{kwargs, Pipeable};
//!
//! let x = ndarray::array![[1.0, 2.0], [3.0, 4.0]];
//! let col_means = (Pipeable::new(x) >> mean().bind(kwargs! { axis = 0 }).unwrap())
//!     .run()
//!     .unwrap();
//! assert_eq!(col_means.as_array().unwrap().sum(), 5.0);
//!
//! let spread = sd().call1(vec![1.0, 1.0, 1.0]).unwrap();
//! assert_eq!(spread.as_f64().unwrap(), 0.0);
//! ```

pub mod combination;
pub mod sample;
pub mod summary;
pub mod transform;

pub use combination::choose;
pub use sample::{bootstrap_sample, DEFAULT_BOOTSTRAP_SAMPLES};
pub use summary::{mean, median, sd, var};
pub use transform::{boxcox, z_fisher};
