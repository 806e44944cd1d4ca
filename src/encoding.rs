//! Byte encodings for keys and ciphertexts.
//!
//! Keys start with a fixed header followed by bit-packed matrices:
//!
//! ```text
//! kind: u8 | version: u8 | n: u32 LE | k: u32 LE | t: u32 LE | G (k × n bits) [| P (k × (n-k) bits)]
//! ```
//!
//! Each matrix is packed row-major, LSB-first, and padded with zero bits to a byte boundary.
//! Ciphertexts are the `n`-bit codeword packed the same way into `ceil(n / 8)` bytes.

use alloc::vec::Vec;

use crate::error::{Error, Result};
use crate::gf2::{BitMatrix, BitVector};
use crate::params::Params;
use crate::{PrivateKey, PublicKey};

/// Length of the key header in bytes.
pub const HEADER_LEN: usize = 14;

const KIND_PUBLIC: u8 = 0x01;
const KIND_PRIVATE: u8 = 0x02;
const VERSION: u8 = 0x01;

impl PublicKey {
    /// Returns the serialized public key.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.params.public_key_len());
        write_header(&mut out, KIND_PUBLIC, &self.params);
        out.extend_from_slice(&self.g.to_bytes());
        out
    }

    /// Parses a serialized public key, checking that its generator matrix is systematic.
    pub fn from_bytes(b: &[u8]) -> Result<PublicKey> {
        let (params, body) = read_header(b, KIND_PUBLIC)?;
        if body.len() != params.public_key_len() - HEADER_LEN {
            return Err(Error::MalformedKey("length does not match declared dimensions"));
        }
        let g = BitMatrix::from_bytes(params.k(), params.n(), body)
            .ok_or(Error::MalformedKey("nonzero padding bits"))?;
        check_systematic(&g, &params)?;
        Ok(PublicKey { params, g })
    }
}

impl PrivateKey {
    /// Returns the serialized private key.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.params.private_key_len());
        write_header(&mut out, KIND_PRIVATE, &self.params);
        out.extend_from_slice(&self.g.to_bytes());
        out.extend_from_slice(&self.p.to_bytes());
        out
    }

    /// Parses a serialized private key, checking that the stored parity block matches the
    /// generator matrix.
    pub fn from_bytes(b: &[u8]) -> Result<PrivateKey> {
        let (params, body) = read_header(b, KIND_PRIVATE)?;
        if body.len() != params.private_key_len() - HEADER_LEN {
            return Err(Error::MalformedKey("length does not match declared dimensions"));
        }
        let (g, p) = body.split_at(params.public_key_len() - HEADER_LEN);
        let g = BitMatrix::from_bytes(params.k(), params.n(), g)
            .ok_or(Error::MalformedKey("nonzero padding bits"))?;
        let p = BitMatrix::from_bytes(params.k(), params.redundancy(), p)
            .ok_or(Error::MalformedKey("nonzero padding bits"))?;
        check_systematic(&g, &params)?;
        if g.columns(params.k()..params.n()) != p {
            return Err(Error::InvalidKey("parity block does not match generator matrix"));
        }
        Ok(PrivateKey { params, g, p })
    }
}

/// Packs a codeword into ciphertext bytes.
pub(crate) fn encode_ciphertext(c: &BitVector) -> Vec<u8> {
    c.to_bytes()
}

/// Unpacks ciphertext bytes into an `n`-bit codeword.
pub(crate) fn decode_ciphertext(params: &Params, c: &[u8]) -> Result<BitVector> {
    if c.len() != params.ciphertext_len() {
        tracing::trace!(len = c.len(), expected = params.ciphertext_len(), "rejected ciphertext");
        return Err(Error::MalformedCiphertext("length does not match code length"));
    }
    BitVector::from_bytes(params.n(), c).ok_or(Error::MalformedCiphertext("nonzero padding bits"))
}

fn write_header(out: &mut Vec<u8>, kind: u8, params: &Params) {
    out.push(kind);
    out.push(VERSION);
    for v in [params.n(), params.k(), params.t()] {
        out.extend_from_slice(&(v as u32).to_le_bytes());
    }
}

fn read_header(b: &[u8], kind: u8) -> Result<(Params, &[u8])> {
    if b.len() < HEADER_LEN {
        return Err(Error::MalformedKey("truncated header"));
    }
    let (header, body) = b.split_at(HEADER_LEN);
    if header[0] != kind {
        tracing::trace!(kind = header[0], expected = kind, "rejected key");
        return Err(Error::MalformedKey("unexpected key kind"));
    }
    if header[1] != VERSION {
        return Err(Error::MalformedKey("unsupported version"));
    }
    let field = |at: usize| {
        u32::from_le_bytes([header[at], header[at + 1], header[at + 2], header[at + 3]]) as usize
    };
    let params = Params::new(field(2), field(6), field(10))
        .map_err(|_| Error::MalformedKey("invalid parameters in header"))?;
    Ok((params, body))
}

fn check_systematic(g: &BitMatrix, params: &Params) -> Result<()> {
    if g.columns(0..params.k()) != BitMatrix::identity(params.k()) {
        return Err(Error::InvalidKey("generator matrix is not in systematic form"));
    }
    Ok(())
}
