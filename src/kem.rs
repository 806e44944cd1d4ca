use kem::generic_array::typenum::{U24, U32};
use kem::generic_array::GenericArray;
use kem::{Decapsulator, EncappedKey, Encapsulator};
use rand_core::{CryptoRng, RngCore};

use crate::{Params, PrivateKey, PublicKey};

const CIPHERTEXT_LEN: usize = 24;

/// A public key for the reference `[192, 128]` parameter set.
#[derive(Debug)]
pub struct EncapsulatingKey {
    pk: PublicKey,
}

impl EncapsulatingKey {
    /// Parses a serialized public key, rejecting keys for any other parameter set.
    pub fn from_bytes(b: &[u8]) -> crate::Result<Self> {
        let pk = PublicKey::from_bytes(b)?;
        if pk.params() != &Params::REFERENCE {
            return Err(crate::Error::InvalidKey("not a reference parameter set key"));
        }
        Ok(EncapsulatingKey { pk })
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.pk
    }
}

/// A private key for the reference `[192, 128]` parameter set.
#[derive(Debug)]
pub struct DecapsulatingKey {
    sk: PrivateKey,
}

impl DecapsulatingKey {
    /// Parses a serialized private key, rejecting keys for any other parameter set.
    pub fn from_bytes(b: &[u8]) -> crate::Result<Self> {
        let sk = PrivateKey::from_bytes(b)?;
        if sk.params() != &Params::REFERENCE {
            return Err(crate::Error::InvalidKey("not a reference parameter set key"));
        }
        Ok(DecapsulatingKey { sk })
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.sk
    }

    pub fn encapsulating_key(&self) -> EncapsulatingKey {
        EncapsulatingKey { pk: self.sk.public_key() }
    }
}

impl Decapsulator<EncapsulatedKey> for DecapsulatingKey {
    fn try_decap(
        &self,
        encapped_key: &EncapsulatedKey,
    ) -> Result<kem::SharedSecret<EncapsulatedKey>, kem::Error> {
        crate::decapsulate(&self.sk, &encapped_key.ciphertext)
            .map(|ss| kem::SharedSecret::new(ss.into()))
            .map_err(|_| kem::Error)
    }
}

/// The KEM over the reference parameter set, `n = 192`, `k = 128`, `t = 8`.
#[derive(Debug)]
pub struct McEliece192;

impl McEliece192 {
    pub fn key_gen(rng: impl RngCore + CryptoRng) -> (EncapsulatingKey, DecapsulatingKey) {
        let (pk, sk) = crate::key_gen(&Params::REFERENCE, rng);
        (EncapsulatingKey { pk }, DecapsulatingKey { sk })
    }
}

impl Encapsulator<EncapsulatedKey> for McEliece192 {
    fn try_encap<R: rand_core::CryptoRng + rand_core::RngCore>(
        &self,
        csprng: &mut R,
        recip_pubkey: &<EncapsulatedKey as EncappedKey>::RecipientPublicKey,
    ) -> Result<(EncapsulatedKey, kem::SharedSecret<EncapsulatedKey>), kem::Error> {
        let (ct, ss) = crate::encapsulate(&recip_pubkey.pk, csprng).map_err(|_| kem::Error)?;
        let ciphertext = ct.try_into().map_err(|_| kem::Error)?;
        Ok((EncapsulatedKey { ciphertext }, kem::SharedSecret::new(ss.into())))
    }
}

#[derive(Debug)]
pub struct EncapsulatedKey {
    ciphertext: [u8; CIPHERTEXT_LEN],
}

impl AsRef<[u8]> for EncapsulatedKey {
    fn as_ref(&self) -> &[u8] {
        &self.ciphertext
    }
}

impl EncappedKey for EncapsulatedKey {
    type EncappedKeySize = U24;

    type SharedSecretSize = U32;

    type SenderPublicKey = EncapsulatingKey;

    type RecipientPublicKey = EncapsulatingKey;

    fn from_bytes(bytes: &GenericArray<u8, Self::EncappedKeySize>) -> Result<Self, kem::Error> {
        let mut key = EncapsulatedKey { ciphertext: [0u8; CIPHERTEXT_LEN] };
        key.ciphertext.copy_from_slice(bytes);
        Ok(key)
    }
}
