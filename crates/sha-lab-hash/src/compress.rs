//! The 64-round compression function.

#![forbid(unsafe_code)]

use crate::consts::{State, K};
use crate::schedule::Schedule;

/// Σ0
#[inline(always)]
pub fn big_sigma0(x: u32) -> u32 {
    x.rotate_right(2) ^ x.rotate_right(13) ^ x.rotate_right(22)
}

/// Σ1
#[inline(always)]
pub fn big_sigma1(x: u32) -> u32 {
    x.rotate_right(6) ^ x.rotate_right(11) ^ x.rotate_right(25)
}

#[inline(always)]
pub fn ch(e: u32, f: u32, g: u32) -> u32 {
    (e & f) ^ (!e & g)
}

#[inline(always)]
pub fn maj(a: u32, b: u32, c: u32) -> u32 {
    (a & b) ^ (a & c) ^ (b & c)
}

/// One round. Returns the shifted register array.
#[inline(always)]
pub fn round(registers: State, k: u32, w: u32) -> State {
    let [a, b, c, d, e, f, g, h] = registers;

    let temp1 = h
        .wrapping_add(big_sigma1(e))
        .wrapping_add(ch(e, f, g))
        .wrapping_add(k)
        .wrapping_add(w);
    let temp2 = big_sigma0(a).wrapping_add(maj(a, b, c));

    [temp1.wrapping_add(temp2), a, b, c, d.wrapping_add(temp1), e, f, g]
}

/// Run all 64 rounds starting from `state`.
///
/// Returns the final working registers; merging them into the state is
/// [`crate::accumulate::accumulate`]'s job.
pub fn compress(state: &State, schedule: &Schedule) -> State {
    K.iter()
        .zip(schedule.iter())
        .fold(*state, |registers, (&k, &w)| round(registers, k, w))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::H0;
    use crate::pad::pad;
    use crate::schedule::expand;

    #[test]
    fn test_ch_and_maj() {
        // ch picks f where e is set, g elsewhere
        assert_eq!(ch(0xffff0000, 0x12345678, 0x9abcdef0), 0x1234def0);
        // maj is the bitwise majority
        assert_eq!(maj(0b1100, 0b1010, 0b0110), 0b1110);
    }

    #[test]
    fn test_round_shifts_pipeline() {
        let registers = [1, 2, 3, 4, 5, 6, 7, 8];
        let next = round(registers, 0, 0);
        // b..d and f..h take the previous a..c and e..g
        assert_eq!(&next[1..4], &[1, 2, 3]);
        assert_eq!(&next[5..8], &[5, 6, 7]);
    }

    #[test]
    fn test_round_wraps_on_overflow() {
        let registers = [u32::MAX; 8];
        let next = round(registers, u32::MAX, u32::MAX);

        // ch(MAX, MAX, MAX) = MAX, Σ1(MAX) = MAX
        // temp1 = 5 × MAX mod 2^32 = 2^32 - 5
        let temp1 = 0xffff_fffbu32;
        // temp2 = Σ0(MAX) + maj(MAX,MAX,MAX) = 2 × MAX mod 2^32
        let temp2 = 0xffff_fffeu32;
        assert_eq!(next[0], temp1.wrapping_add(temp2));
        assert_eq!(next[4], u32::MAX.wrapping_add(temp1));
    }

    #[test]
    fn test_abc_final_registers() {
        // FIPS 180-4 "abc" example, working variables after round 63
        let padded = pad(b"abc");
        let w = expand(padded.blocks().next().unwrap());
        let registers = compress(&H0, &w);

        assert_eq!(
            registers,
            [
                0x506e3058, 0xd39a2165, 0x04d24d6c, 0xb85e2ce9,
                0x5ef50f24, 0xfb121210, 0x948d25b6, 0x961f4894,
            ]
        );
    }
}
