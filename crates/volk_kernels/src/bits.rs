//! Bitwise kernels.
use crate::{map1, map2};

pub fn and_i32(out: &mut [i32], a: &[i32], b: &[i32]) {
    map2(out, a, b, |x, y| x & y);
}

pub fn or_i32(out: &mut [i32], a: &[i32], b: &[i32]) {
    map2(out, a, b, |x, y| x | y);
}

/// Reverse the bit order of every word.
pub fn reverse_u32(out: &mut [u32], input: &[u32]) {
    map1(out, input, u32::reverse_bits);
}

/// Count the set bits of a single word.
///
/// Unlike every other kernel here this does not take a vector.
pub fn popcnt_u64(value: u64) -> u64 {
    value.count_ones() as u64
}

/// Types whose byte order [byteswap] can reverse.
pub trait Byteswap: Copy {
    fn byteswapped(self) -> Self;
}

macro_rules! impl_byteswap {
    ($($t: ty),*) => {
        $(
            impl Byteswap for $t {
                fn byteswapped(self) -> Self {
                    self.swap_bytes()
                }
            }
        )*
    };
}

impl_byteswap!(u16, u32, u64);

/// Reverse the byte order of every element, in place.
pub fn byteswap<T: Byteswap>(vec: &mut [T]) {
    for x in vec.iter_mut() {
        *x = x.byteswapped();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn test_byteswap() {
        let mut shorts = [0x0102u16, 0xaabb];
        byteswap(&mut shorts);
        assert_eq!(shorts, [0x0201, 0xbbaa]);

        let mut longs = [0x0102030405060708u64];
        byteswap(&mut longs);
        assert_eq!(longs, [0x0807060504030201]);
    }

    #[test]
    fn test_reverse() {
        let mut out = [0u32; 3];
        reverse_u32(&mut out, &[1, 2, 0xf000_0000]);
        assert_eq!(out, [0x8000_0000, 0x4000_0000, 0x0000_000f]);
    }

    #[test]
    fn test_popcnt() {
        assert_eq!(popcnt_u64(0), 0);
        assert_eq!(popcnt_u64(0b1011), 3);
        assert_eq!(popcnt_u64(u64::MAX), 64);
    }

    proptest! {
        #[test]
        fn byteswap_is_an_involution(values in prop::collection::vec(any::<u32>(), 0..64)) {
            let mut swapped = values.clone();
            byteswap(&mut swapped);
            byteswap(&mut swapped);
            prop_assert_eq!(swapped, values);
        }

        #[test]
        fn reverse_is_an_involution(values in prop::collection::vec(any::<u32>(), 0..64)) {
            let mut once = vec![0u32; values.len()];
            let mut twice = vec![0u32; values.len()];
            reverse_u32(&mut once, &values);
            reverse_u32(&mut twice, &once);
            prop_assert_eq!(twice, values);
        }

        #[test]
        fn and_or_bound_each_other(a in any::<i32>(), b in any::<i32>()) {
            let mut and = [0i32];
            let mut or = [0i32];
            and_i32(&mut and, &[a], &[b]);
            or_i32(&mut or, &[a], &[b]);
            prop_assert_eq!(and[0] | or[0], or[0]);
            prop_assert_eq!(popcnt_u64(and[0] as u32 as u64) + popcnt_u64(or[0] as u32 as u64),
                popcnt_u64(a as u32 as u64) + popcnt_u64(b as u32 as u64));
        }
    }
}
