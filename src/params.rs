use crate::error::{Error, Result};

/// A code parameter set: code length `n`, message dimension `k` and error weight `t`.
///
/// Parameters are validated on construction and never change for the lifetime of a keypair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Params {
    n: usize,
    k: usize,
    t: usize,
}

impl Params {
    /// The shipped parameter set: a `[192, 128]` code carrying 8 errors.
    pub const REFERENCE: Params = Params { n: 192, k: 128, t: 8 };

    /// Validates and returns a parameter set.
    pub fn new(n: usize, k: usize, t: usize) -> Result<Params> {
        if k == 0 {
            return Err(Error::InvalidParameters("k must be positive"));
        }
        if k >= n {
            return Err(Error::InvalidParameters("k must be less than n"));
        }
        if t > n {
            return Err(Error::InvalidParameters("t must not exceed n"));
        }
        // Headers store each dimension as a u32.
        if u32::try_from(n).is_err() {
            return Err(Error::InvalidParameters("n does not fit in 32 bits"));
        }
        if k.checked_mul(n).is_none() {
            return Err(Error::InvalidParameters("k × n overflows"));
        }
        Ok(Params { n, k, t })
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn t(&self) -> usize {
        self.t
    }

    /// Number of redundancy (parity) positions, `n - k`.
    pub fn redundancy(&self) -> usize {
        self.n - self.k
    }

    /// Byte length of a packed ciphertext.
    pub fn ciphertext_len(&self) -> usize {
        self.n.div_ceil(8)
    }

    /// Byte length of a serialized public key.
    pub fn public_key_len(&self) -> usize {
        crate::encoding::HEADER_LEN + (self.k * self.n).div_ceil(8)
    }

    /// Byte length of a serialized private key.
    pub fn private_key_len(&self) -> usize {
        self.public_key_len() + (self.k * self.redundancy()).div_ceil(8)
    }
}

impl Default for Params {
    fn default() -> Self {
        Params::REFERENCE
    }
}
