//! Bit-string helpers for crease sequences.
//!
//! A strip with `length` creases is a `u64` whose bit `i` (least significant
//! first) says whether crease `i` is folded. Everything here is plain integer
//! arithmetic; nothing goes through string formatting except [`format_bits`],
//! which exists for display only.

/// Longest strip representable with `u64` bit-strings while `2^length` still fits.
pub const MAX_STRIP_LENGTH: u32 = 63;

/// Number of folded creases.
#[inline]
pub fn popcount(bits: u64) -> u32 {
    bits.count_ones()
}

/// Position of the highest set bit plus one; `0` for `0`.
#[inline]
pub fn bit_length(bits: u64) -> u32 {
    u64::BITS - bits.leading_zeros()
}

/// Exclusive upper end of the bit-string space for a strip of `length` creases.
#[inline]
pub fn space_end(length: u32) -> u64 {
    debug_assert!(length <= MAX_STRIP_LENGTH);
    1u64 << length
}

/// Next candidate after `bits` once its fold budget is exhausted.
///
/// Every value strictly between `bits` and the result has the low bits of
/// `bits` plus something below them set, so its popcount is larger than
/// `popcount(bits)`. Shifting out the trailing zeros, incrementing and shifting
/// back carries through the lowest run of ones, which never raises the
/// popcount. Returns `None` for `0`: no other bit-string has zero folds.
#[inline]
pub fn skip_saturated(bits: u64) -> Option<u64> {
    if bits == 0 {
        return None;
    }
    // bit_length(bits) - bit_length(bits >> shift) == shift
    let shift = bits.trailing_zeros();
    (bits >> shift)
        .checked_add(1)
        .and_then(|run| run.checked_mul(1u64 << shift))
}

/// Zero-padded binary rendering, most significant crease first.
pub fn format_bits(bits: u64, length: u32) -> String {
    format!("{:0width$b}", bits, width = length as usize)
}

/// Mirror the crease order of a strip: crease `i` becomes crease `length - 1 - i`.
///
/// Bits at or above `length` are dropped.
pub fn reverse_bits(bits: u64, length: u32) -> u64 {
    if length == 0 {
        return 0;
    }
    let masked = if length >= u64::BITS {
        bits
    } else {
        bits & ((1u64 << length) - 1)
    };
    masked.reverse_bits() >> (u64::BITS - length)
}

/// Fold state of crease `index`. Creases past bit 63 are always flat.
#[inline]
pub fn is_folded(bits: u64, index: u32) -> bool {
    index < u64::BITS && (bits >> index) & 1 == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_length_matches_definition() {
        assert_eq!(bit_length(0), 0);
        assert_eq!(bit_length(1), 1);
        assert_eq!(bit_length(0b1011_0000), 8);
        assert_eq!(bit_length(u64::MAX), 64);
    }

    #[test]
    fn skip_jumps_past_lowest_run() {
        // 0b0110 -> 0b1000: everything in between has 3+ ones
        assert_eq!(skip_saturated(0b0110), Some(0b1000));
        assert_eq!(skip_saturated(0b0101), Some(0b0110));
        assert_eq!(skip_saturated(0b1000), Some(0b1_0000));
        assert_eq!(skip_saturated(0), None);
    }

    #[test]
    fn skip_never_raises_popcount() {
        for n in 1u64..4096 {
            let next = skip_saturated(n).unwrap();
            assert!(next > n);
            assert!(popcount(next) <= popcount(n), "n={n:b} next={next:b}");
            for between in (n + 1)..next {
                assert!(popcount(between) > popcount(n));
            }
        }
    }

    #[test]
    fn skip_at_top_of_range_fits() {
        let top = 1u64 << 62;
        assert_eq!(skip_saturated(top), Some(1u64 << 63));
        assert_eq!(skip_saturated(1u64 << 63), None);
    }

    #[test]
    fn format_pads_to_length() {
        assert_eq!(format_bits(0b101, 6), "000101");
        assert_eq!(format_bits(0, 0), "0");
        assert_eq!(format_bits(0b11, 1), "11");
    }

    #[test]
    fn reverse_within_length() {
        assert_eq!(reverse_bits(0b001, 3), 0b100);
        assert_eq!(reverse_bits(0b110, 3), 0b011);
        assert_eq!(reverse_bits(0b1, 1), 0b1);
        assert_eq!(reverse_bits(0b1111, 2), 0b11);
        assert_eq!(reverse_bits(5, 0), 0);
        assert_eq!(reverse_bits(1, 64), 1u64 << 63);
    }

    #[test]
    fn creases_beyond_the_word_are_flat() {
        assert!(is_folded(1u64 << 63, 63));
        assert!(!is_folded(u64::MAX, 64));
        assert!(!is_folded(u64::MAX, 200));
    }

    #[test]
    fn reverse_is_an_involution() {
        for length in 0..10u32 {
            for bits in 0..space_end(length) {
                assert_eq!(reverse_bits(reverse_bits(bits, length), length), bits);
            }
        }
    }
}
