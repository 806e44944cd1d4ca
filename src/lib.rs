//! A simplified code-based key encapsulation mechanism modeled on McEliece.
//!
//! Keys wrap a systematic generator matrix `G = [I_k | P]` over GF(2). Encapsulation encodes a
//! random `k`-bit message, adds a weight-`t` error vector biased toward the redundancy positions,
//! and hashes the message into a shared secret. Decapsulation reads the message back from the
//! information positions, checks it against the parity positions, and falls back to a bounded
//! single-bit search over the first 16 information bits.
//!
//! This is not a secure KEM. There is no Goppa code, no secret scrambling or permutation, and the
//! public key carries the same information as the private key. The decoder only recovers the
//! message when the error weight sits in the redundancy positions; anything else produces a
//! different shared secret without reporting an error.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::vec::Vec;

use rand::seq::index;
use rand_core::CryptoRngCore;
use sha3::digest::{FixedOutput, Update};
use sha3::Sha3_256;
use tracing::debug;

pub use error::{Error, Result};
pub use gf2::{BitMatrix, BitVector};
pub use params::Params;

#[cfg(feature = "kem")]
pub use self::kem::*;

mod encoding;
mod error;
mod gf2;
mod params;

#[cfg(feature = "kem")]
mod kem;

/// A 32-byte shared secret.
pub type SharedSecret = [u8; 32];

/// Number of leading information bits the decoder probes with single-bit flips.
const PROBE_BITS: usize = 16;

/// A public key: the parameter set and the systematic generator matrix `[I_k | P]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    params: Params,
    g: BitMatrix,
}

impl PublicKey {
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Returns the `k × n` generator matrix.
    pub fn generator(&self) -> &BitMatrix {
        &self.g
    }

    fn check(&self) -> Result<()> {
        check_generator(&self.params, &self.g)
    }
}

/// A private key: the generator matrix and, redundantly, its parity block `P`.
///
/// It holds nothing the public key doesn't; see the crate documentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateKey {
    params: Params,
    g: BitMatrix,
    p: BitMatrix,
}

impl PrivateKey {
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Returns the `k × n` generator matrix.
    pub fn generator(&self) -> &BitMatrix {
        &self.g
    }

    /// Returns the `k × (n - k)` parity block.
    pub fn parity(&self) -> &BitMatrix {
        &self.p
    }

    /// Returns the matching public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey { params: self.params, g: self.g.clone() }
    }

    fn check(&self) -> Result<()> {
        check_generator(&self.params, &self.g)?;
        if self.p.nrows() != self.params.k() || self.p.ncols() != self.params.redundancy() {
            return Err(Error::InvalidKey("parity block dimensions do not match parameters"));
        }
        Ok(())
    }
}

fn check_generator(params: &Params, g: &BitMatrix) -> Result<()> {
    if g.nrows() != params.k() {
        return Err(Error::InvalidKey("generator matrix row count does not match k"));
    }
    if g.ncols() != params.n() {
        return Err(Error::InvalidKey("generator matrix column count does not match n"));
    }
    Ok(())
}

/// Generates a public key and a corresponding private key for the given parameters using the
/// given RNG.
///
/// Every entry of the parity block `P` is drawn independently and uniformly.
pub fn key_gen(params: &Params, mut rng: impl CryptoRngCore) -> (PublicKey, PrivateKey) {
    let p = BitMatrix::random(params.k(), params.redundancy(), &mut rng);
    let g = BitMatrix::identity(params.k()).hstack(&p);
    debug!(n = params.n(), k = params.k(), t = params.t(), "generated keypair");
    (PublicKey { params: *params, g: g.clone() }, PrivateKey { params: *params, g, p })
}

/// Generates a ciphertext and an associated shared secret from a public key and an RNG.
///
/// The ciphertext is `ceil(n / 8)` bytes. The shared secret must be kept secret.
pub fn encapsulate(pk: &PublicKey, mut rng: impl CryptoRngCore) -> Result<(Vec<u8>, SharedSecret)> {
    pk.check()?;
    let m = BitVector::random(pk.params.k(), &mut rng);
    let e = sample_error(&pk.params, &mut rng);
    Ok(encapsulate_with(pk, &m, &e))
}

/// Encodes `m` under `pk`, adds `e`, and derives the shared secret from `m`.
fn encapsulate_with(pk: &PublicKey, m: &BitVector, e: &BitVector) -> (Vec<u8>, SharedSecret) {
    let mut c = pk.g.vec_mul(m);
    c.xor_assign(e);
    (encoding::encode_ciphertext(&c), derive_secret(m))
}

/// Samples an `n`-bit error vector of weight exactly `t`.
///
/// As many errors as fit go into the redundancy positions `[k, n)`; the remainder go into the
/// information positions `[0, k)`. Positions within each part are distinct and uniform.
fn sample_error<R: CryptoRngCore + ?Sized>(params: &Params, rng: &mut R) -> BitVector {
    let in_redundancy = params.t().min(params.redundancy());
    let in_info = params.t() - in_redundancy;

    let mut e = BitVector::zero(params.n());
    for i in index::sample(rng, params.k(), in_info) {
        e.set(i, true);
    }
    for i in index::sample(rng, params.redundancy(), in_redundancy) {
        e.set(params.k() + i, true);
    }
    e
}

/// Recovers a shared secret from a private key and a ciphertext.
///
/// Fails only if the key is inconsistent or the ciphertext has the wrong length. A ciphertext
/// whose errors the decoder cannot correct yields a different shared secret, not an error.
pub fn decapsulate(sk: &PrivateKey, c: &[u8]) -> Result<SharedSecret> {
    sk.check()?;
    let c = encoding::decode_ciphertext(&sk.params, c)?;
    let m = decode(sk, &c);
    Ok(derive_secret(&m))
}

/// Decodes a received word into a `k`-bit message.
///
/// The received information bits are accepted as-is if they disagree with the received parity
/// bits in at most `t` positions. Otherwise each of the first 16 information bits is flipped in
/// turn, keeping the flip with the strictly lowest parity disagreement and stopping at zero.
fn decode(sk: &PrivateKey, c: &BitVector) -> BitVector {
    let (n, k) = (sk.params.n(), sk.params.k());
    let mut m = c.slice(0..k);

    let mut syndrome = sk.p.vec_mul(&m);
    syndrome.xor_assign(&c.slice(k..n));
    let weight = syndrome.count_ones();
    if weight <= sk.params.t() {
        debug!(weight, "accepted received information bits");
        return m;
    }

    // Flipping information bit i toggles row i of P in the syndrome.
    let (mut best, mut best_weight) = (None, weight);
    for i in 0..PROBE_BITS.min(k) {
        let mut s = syndrome.clone();
        s.xor_assign(sk.p.row(i));
        let w = s.count_ones();
        if w < best_weight {
            best = Some(i);
            best_weight = w;
            if w == 0 {
                break;
            }
        }
    }
    if let Some(i) = best {
        m.flip(i);
    }
    debug!(weight, best_weight, flipped = ?best, "probed information bits");
    m
}

/// Derives the shared secret as SHA3-256 over the message, one byte (`0` or `1`) per bit.
pub fn derive_secret(m: &BitVector) -> SharedSecret {
    let mut ss = [0u8; 32];
    Sha3_256::default().chain(m.to_bit_bytes()).finalize_into((&mut ss).into());
    ss
}
