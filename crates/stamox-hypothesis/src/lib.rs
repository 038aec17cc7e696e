//! Hypothesis tests producing pipeable result states
//!
//! Each test returns a [`StateFunc`](stamox_core::StateFunc) with named
//! fields (`statistic`, and `p_value`/`df` where defined). States can seed a
//! further pipeline with `>>`.

pub mod durbin_watson;

pub use durbin_watson::{durbin_watson, durbin_watson_test};
pub use t_test::{alternatives, t_test, Alternative};
