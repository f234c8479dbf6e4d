//! Bit-reversal reordering of interleaved complex pairs.
//!
//! The iterative butterflies in [`crate::fft`] expect their input in
//! bit-reversed pair order. The permutation moves data only, so it is exact
//! for any element type and applying it twice restores the input.

use crate::fft::assert_len;

/// Reorders the `n / 2` interleaved `(re, im)` pairs of `data` so that the pair
/// at bit-reversed index `j` lands at index `i`.
///
/// Each pair is swapped at most once (only when `j > i`), so the operation is
/// its own inverse.
///
/// # Panics
///
/// Panics if `data.len()` is not a power of two or is smaller than
/// [`MIN_LEN`](crate::fft::MIN_LEN).
pub fn bit_reverse_permute<T>(data: &mut [T]) {
    let n = data.len();
    assert_len(n);

    // `i` and `j` are scalar offsets of pairs, so both advance in steps of two.
    let mut j = 0usize;
    for i in (0..n).step_by(2) {
        if j > i {
            data.swap(j, i);
            data.swap(j + 1, i + 1);
        }
        let mut m = n >> 1;
        while m >= 2 && j >= m {
            j -= m;
            m >>= 1;
        }
        j += m;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn pair_labels(pairs: usize) -> Vec<u32> {
        (0..pairs as u32).flat_map(|p| [10 * p, 10 * p + 1]).collect()
    }

    #[test]
    fn eight_pairs_follow_three_bit_reversal() {
        let mut data = pair_labels(8);
        bit_reverse_permute(&mut data);
        let order: Vec<u32> = data.chunks(2).map(|pair| pair[0] / 10).collect();
        assert_eq!(order, [0, 4, 2, 6, 1, 5, 3, 7]);
        assert!(data.chunks(2).all(|pair| pair[1] == pair[0] + 1));
    }

    #[test]
    fn single_pair_is_untouched() {
        let mut data = [3u8, 4];
        bit_reverse_permute(&mut data);
        assert_eq!(data, [3, 4]);
    }

    #[test]
    fn two_pairs_are_untouched() {
        let mut data = [1u8, 2, 3, 4];
        bit_reverse_permute(&mut data);
        assert_eq!(data, [1, 2, 3, 4]);
    }

    #[test]
    fn applying_twice_restores_input() {
        for log2 in 1..=12 {
            let original = pair_labels(1 << (log2 - 1));
            let mut data = original.clone();
            bit_reverse_permute(&mut data);
            bit_reverse_permute(&mut data);
            assert_eq!(data, original, "n = {}", 1 << log2);
        }
    }

    #[test]
    #[should_panic(expected = "power of two")]
    fn rejects_non_power_of_two() {
        let mut data = [0u8; 12];
        bit_reverse_permute(&mut data);
    }
}
