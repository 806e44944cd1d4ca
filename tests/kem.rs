//! End-to-end checks through the public API: keygen, key blobs, encapsulate, decapsulate.

use mceliece_kem::{decapsulate, encapsulate, key_gen, Error, Params, PrivateKey, PublicKey};
use rand_chacha::ChaChaRng;
use rand_core::SeedableRng;

fn setup(params: &Params, seed: u64) -> (PublicKey, PrivateKey, ChaChaRng) {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    let (pk, sk) = key_gen(params, &mut rng);
    (pk, sk, rng)
}

#[test]
fn reference_example() {
    let (pk, sk, mut rng) = setup(&Params::REFERENCE, 42);
    let (ct, secret1) = encapsulate(&pk, &mut rng).expect("should encapsulate");
    assert_eq!(secret1.len(), 32);
    assert_eq!(ct.len(), 24);
    let secret2 = decapsulate(&sk, &ct).expect("should decapsulate");
    assert_eq!(secret1, secret2);
}

#[test]
fn exchanged_as_blobs() {
    let (pk, sk, mut rng) = setup(&Params::REFERENCE, 7);
    let pk = PublicKey::from_bytes(&pk.to_bytes()).expect("should parse public key");
    let sk = PrivateKey::from_bytes(&sk.to_bytes()).expect("should parse private key");
    for _ in 0..10 {
        let (ct, k) = encapsulate(&pk, &mut rng).expect("should encapsulate");
        assert_eq!(decapsulate(&sk, &ct), Ok(k));
    }
}

#[test]
fn many_keypairs() {
    for seed in 0..32 {
        let (pk, sk, mut rng) = setup(&Params::REFERENCE, seed);
        let (ct, k) = encapsulate(&pk, &mut rng).expect("should encapsulate");
        assert_eq!(decapsulate(&sk, &ct), Ok(k), "seed {seed}");
    }
}

#[test]
fn independent_encapsulations() {
    let (pk, sk, mut rng) = setup(&Params::REFERENCE, 1);
    let (ct1, k1) = encapsulate(&pk, &mut rng).expect("should encapsulate");
    let (ct2, k2) = encapsulate(&pk, &mut rng).expect("should encapsulate");
    assert_ne!(k1, k2);
    assert_ne!(ct1, ct2);
    assert_eq!(decapsulate(&sk, &ct1), Ok(k1));
    assert_eq!(decapsulate(&sk, &ct2), Ok(k2));
}

#[test]
fn ciphertext_length_is_fixed() {
    for (n, k, t) in [(192, 128, 8), (192, 128, 0), (100, 60, 5), (13, 5, 3)] {
        let params = Params::new(n, k, t).expect("should be valid");
        let (pk, _, mut rng) = setup(&params, 3);
        for _ in 0..8 {
            let (ct, _) = encapsulate(&pk, &mut rng).expect("should encapsulate");
            assert_eq!(ct.len(), params.ciphertext_len());
            assert_eq!(ct.len(), n.div_ceil(8));
        }
    }
}

#[test]
fn zero_errors() {
    let params = Params::new(192, 128, 0).expect("should be valid");
    let (pk, sk, mut rng) = setup(&params, 9);
    for _ in 0..10 {
        let (ct, k) = encapsulate(&pk, &mut rng).expect("should encapsulate");
        assert_eq!(decapsulate(&sk, &ct), Ok(k));
    }
}

#[test]
fn errors_in_first_twenty_information_bits() {
    let (pk, sk, mut rng) = setup(&Params::REFERENCE, 11);
    let (mut ct, k) = encapsulate(&pk, &mut rng).expect("should encapsulate");
    // Bits 0..20 of the codeword are the first 20 information bits.
    ct[0] ^= 0xFF;
    ct[1] ^= 0xFF;
    ct[2] ^= 0x0F;
    let k_p = decapsulate(&sk, &ct).expect("should still produce a secret");
    assert_ne!(k, k_p);
}

#[test]
fn invalid_parameters() {
    assert!(matches!(Params::new(128, 128, 8), Err(Error::InvalidParameters(_))));
    assert!(matches!(Params::new(192, 128, 193), Err(Error::InvalidParameters(_))));
}

#[test]
fn malformed_inputs() {
    let (pk, sk, _) = setup(&Params::REFERENCE, 5);
    assert!(matches!(decapsulate(&sk, &[0u8; 192]), Err(Error::MalformedCiphertext(_))));

    let blob = pk.to_bytes();
    assert!(matches!(PublicKey::from_bytes(&blob[..blob.len() - 3]), Err(Error::MalformedKey(_))));
    assert!(matches!(PrivateKey::from_bytes(&blob), Err(Error::MalformedKey(_))));
    assert!(matches!(PublicKey::from_bytes(&[]), Err(Error::MalformedKey(_))));
}
