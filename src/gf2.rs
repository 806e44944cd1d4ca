//! Vectors and matrices over GF(2).
//!
//! Bits are stored LSB-first in `u64` words; addition is XOR and the inner product is AND
//! followed by a popcount. Bits past the logical length of a vector are always zero.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use rand_core::CryptoRngCore;

const WORD_BITS: usize = 64;

/// A fixed-length binary vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitVector {
    len: usize,
    words: Vec<u64>,
}

impl BitVector {
    /// Returns the all-zero vector of length `len`.
    pub fn zero(len: usize) -> BitVector {
        BitVector { len, words: vec![0; len.div_ceil(WORD_BITS)] }
    }

    /// Returns a vector with each bit drawn independently and uniformly.
    pub fn random<R: CryptoRngCore + ?Sized>(len: usize, rng: &mut R) -> BitVector {
        let mut v = BitVector::zero(len);
        for w in v.words.iter_mut() {
            *w = rng.next_u64();
        }
        v.clear_tail();
        v
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn get(&self, i: usize) -> bool {
        debug_assert!(i < self.len);
        self.words[i / WORD_BITS] >> (i % WORD_BITS) & 1 == 1
    }

    pub fn set(&mut self, i: usize, bit: bool) {
        debug_assert!(i < self.len);
        let mask = 1u64 << (i % WORD_BITS);
        if bit {
            self.words[i / WORD_BITS] |= mask;
        } else {
            self.words[i / WORD_BITS] &= !mask;
        }
    }

    pub fn flip(&mut self, i: usize) {
        debug_assert!(i < self.len);
        self.words[i / WORD_BITS] ^= 1u64 << (i % WORD_BITS);
    }

    /// Adds `other` to `self` over GF(2).
    pub fn xor_assign(&mut self, other: &BitVector) {
        debug_assert_eq!(self.len, other.len);
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a ^= b;
        }
    }

    /// Returns the Hamming weight of the vector.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns the positions of all set bits in ascending order.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(wi, &w)| {
            let mut w = w;
            core::iter::from_fn(move || {
                if w == 0 {
                    return None;
                }
                let bit = w.trailing_zeros() as usize;
                w &= w - 1;
                Some(wi * WORD_BITS + bit)
            })
        })
    }

    /// Copies the bits in `range` into a new vector.
    pub fn slice(&self, range: Range<usize>) -> BitVector {
        debug_assert!(range.end <= self.len);
        let mut out = BitVector::zero(range.len());
        for (j, i) in range.enumerate() {
            if self.get(i) {
                out.set(j, true);
            }
        }
        out
    }

    /// Returns `self || other`.
    pub fn concat(&self, other: &BitVector) -> BitVector {
        let mut out = BitVector::zero(self.len + other.len);
        for i in self.ones() {
            out.set(i, true);
        }
        for i in other.ones() {
            out.set(self.len + i, true);
        }
        out
    }

    /// Packs the vector into `ceil(len / 8)` bytes, LSB-first.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.len.div_ceil(8)];
        for (j, b) in out.iter_mut().enumerate() {
            *b = (self.words[j / 8] >> (j % 8 * 8)) as u8;
        }
        out
    }

    /// Unpacks a vector of `len` bits. Returns `None` if `b` has the wrong length or if any
    /// padding bit past `len` is set.
    pub fn from_bytes(len: usize, b: &[u8]) -> Option<BitVector> {
        if b.len() != len.div_ceil(8) {
            return None;
        }
        let mut v = BitVector::zero(len);
        for (j, &byte) in b.iter().enumerate() {
            v.words[j / 8] |= (byte as u64) << (j % 8 * 8);
        }
        let packed = v.words.clone();
        v.clear_tail();
        (packed == v.words).then_some(v)
    }

    /// Expands the vector to one byte per bit, each `0x00` or `0x01`.
    pub fn to_bit_bytes(&self) -> Vec<u8> {
        (0..self.len).map(|i| self.get(i) as u8).collect()
    }

    fn clear_tail(&mut self) {
        let rem = self.len % WORD_BITS;
        if rem != 0 {
            if let Some(last) = self.words.last_mut() {
                *last &= (1u64 << rem) - 1;
            }
        }
    }
}

/// A binary matrix stored as a list of rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitMatrix {
    cols: usize,
    rows: Vec<BitVector>,
}

impl BitMatrix {
    /// Returns the `k × k` identity matrix.
    pub fn identity(k: usize) -> BitMatrix {
        let rows = (0..k)
            .map(|i| {
                let mut r = BitVector::zero(k);
                r.set(i, true);
                r
            })
            .collect();
        BitMatrix { cols: k, rows }
    }

    /// Returns a matrix with every entry drawn independently and uniformly.
    pub fn random<R: CryptoRngCore + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> BitMatrix {
        let rows = (0..rows).map(|_| BitVector::random(cols, rng)).collect();
        BitMatrix { cols, rows }
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn row(&self, i: usize) -> &BitVector {
        &self.rows[i]
    }

    /// Returns `[self | other]`. Both matrices must have the same number of rows.
    pub fn hstack(&self, other: &BitMatrix) -> BitMatrix {
        debug_assert_eq!(self.nrows(), other.nrows());
        let rows = self.rows.iter().zip(&other.rows).map(|(a, b)| a.concat(b)).collect();
        BitMatrix { cols: self.cols + other.cols, rows }
    }

    /// Returns the sub-matrix made of the columns in `range`.
    pub fn columns(&self, range: Range<usize>) -> BitMatrix {
        let cols = range.len();
        let rows = self.rows.iter().map(|r| r.slice(range.clone())).collect();
        BitMatrix { cols, rows }
    }

    /// Computes the row-vector product `v · self` over GF(2).
    pub fn vec_mul(&self, v: &BitVector) -> BitVector {
        debug_assert_eq!(v.len(), self.nrows());
        let mut acc = BitVector::zero(self.cols);
        for i in v.ones() {
            acc.xor_assign(&self.rows[i]);
        }
        acc
    }

    /// Packs all entries row-major into `ceil(rows * cols / 8)` bytes, LSB-first.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![0u8; (self.nrows() * self.cols).div_ceil(8)];
        for (r, row) in self.rows.iter().enumerate() {
            for c in row.ones() {
                let idx = r * self.cols + c;
                out[idx / 8] |= 1 << (idx % 8);
            }
        }
        out
    }

    /// Unpacks a `rows × cols` matrix. Returns `None` on a length mismatch or set padding bits.
    pub fn from_bytes(rows: usize, cols: usize, b: &[u8]) -> Option<BitMatrix> {
        let bits = rows * cols;
        if b.len() != bits.div_ceil(8) {
            return None;
        }
        let rem = bits % 8;
        if rem != 0 && b[b.len() - 1] >> rem != 0 {
            return None;
        }
        let rows = (0..rows)
            .map(|r| {
                let mut row = BitVector::zero(cols);
                for c in 0..cols {
                    let idx = r * cols + c;
                    if b[idx / 8] >> (idx % 8) & 1 == 1 {
                        row.set(c, true);
                    }
                }
                row
            })
            .collect();
        Some(BitMatrix { cols, rows })
    }
}

#[cfg(test)]
mod tests {
    use rand_chacha::ChaChaRng;
    use rand_core::SeedableRng;

    use super::*;

    #[test]
    fn set_get_flip() {
        let mut v = BitVector::zero(70);
        v.set(0, true);
        v.set(69, true);
        v.flip(64);
        assert!(v.get(0) && v.get(64) && v.get(69));
        assert!(!v.get(1));
        assert_eq!(v.count_ones(), 3);
        assert_eq!(v.ones().collect::<Vec<_>>(), [0, 64, 69]);

        v.flip(64);
        v.set(0, false);
        assert_eq!(v.ones().collect::<Vec<_>>(), [69]);
    }

    #[test]
    fn random_clears_padding() {
        let mut rng = ChaChaRng::seed_from_u64(0xDEADBEEF);
        for len in [1, 7, 63, 65, 100] {
            let v = BitVector::random(len, &mut rng);
            assert!(v.ones().all(|i| i < len));
        }
    }

    #[test]
    fn slice_and_concat() {
        let mut rng = ChaChaRng::seed_from_u64(0xDEADBEEF);
        let v = BitVector::random(192, &mut rng);
        let (a, b) = (v.slice(0..128), v.slice(128..192));
        assert_eq!(a.len(), 128);
        assert_eq!(b.len(), 64);
        assert_eq!(a.concat(&b), v);
    }

    #[test]
    fn byte_packing() {
        let mut v = BitVector::zero(12);
        v.set(0, true);
        v.set(9, true);
        assert_eq!(v.to_bytes(), [0b0000_0001, 0b0000_0010]);
        assert_eq!(BitVector::from_bytes(12, &[0x01, 0x02]), Some(v));

        // padding bit 12 set
        assert_eq!(BitVector::from_bytes(12, &[0x01, 0x12]), None);
        assert_eq!(BitVector::from_bytes(12, &[0x01]), None);
    }

    #[test]
    fn bit_bytes() {
        let mut v = BitVector::zero(4);
        v.set(1, true);
        assert_eq!(v.to_bit_bytes(), [0, 1, 0, 0]);
    }

    #[test]
    fn identity_is_neutral() {
        let mut rng = ChaChaRng::seed_from_u64(0xDEADBEEF);
        let v = BitVector::random(40, &mut rng);
        assert_eq!(BitMatrix::identity(40).vec_mul(&v), v);
    }

    #[test]
    fn vec_mul_matches_inner_products() {
        let mut rng = ChaChaRng::seed_from_u64(0xDEADBEEF);
        let m = BitMatrix::random(20, 33, &mut rng);
        let v = BitVector::random(20, &mut rng);
        let p = m.vec_mul(&v);
        for c in 0..33 {
            let expected = (0..20).filter(|&r| v.get(r) && m.row(r).get(c)).count() % 2 == 1;
            assert_eq!(p.get(c), expected);
        }
    }

    #[test]
    fn hstack_then_columns() {
        let mut rng = ChaChaRng::seed_from_u64(0xDEADBEEF);
        let p = BitMatrix::random(8, 5, &mut rng);
        let g = BitMatrix::identity(8).hstack(&p);
        assert_eq!(g.ncols(), 13);
        assert_eq!(g.columns(0..8), BitMatrix::identity(8));
        assert_eq!(g.columns(8..13), p);
    }

    #[test]
    fn matrix_packing() {
        let mut rng = ChaChaRng::seed_from_u64(0xDEADBEEF);
        let m = BitMatrix::random(3, 5, &mut rng);
        let b = m.to_bytes();
        assert_eq!(b.len(), 2);
        assert_eq!(BitMatrix::from_bytes(3, 5, &b), Some(m));

        let mut bad = b.clone();
        bad[1] |= 0x80;
        assert_eq!(BitMatrix::from_bytes(3, 5, &bad), None);
        assert_eq!(BitMatrix::from_bytes(3, 6, &b), None);
    }
}
