//! Bounded iterative Fibonacci.

use crate::error::{RangeError, MAX_FIBONACCI_INPUT};

/// Return the `n`-th Fibonacci number.
///
/// Runs in O(n) time and constant space. `F(93)` is the largest value that
/// fits in a `u64`; any larger `n` fails with [`RangeError`].
pub fn fibonacci(n: u32) -> Result<u64, RangeError> {
    if n <= 1 {
        return Ok(u64::from(n));
    }

    if n > MAX_FIBONACCI_INPUT {
        return Err(RangeError { n });
    }

    // The loop stops one step short; the final sum supplies F(n).
    let (mut prev, mut curr): (u64, u64) = (0, 1);
    for _ in 2..n {
        (prev, curr) = (curr, curr + prev);
    }

    Ok(prev + curr)
}
