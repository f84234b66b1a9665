//! Ed25519 tests against RFC 8032 § 7.1.

use elliptic::{
    Error,
    eddsa::Eddsa,
    signature::{Signer, Verifier},
};
use hex_literal::hex;
use sha2::Sha512;

struct TestVector {
    secret: [u8; 32],
    public: [u8; 32],
    message: &'static [u8],
    signature: [u8; 64],
}

const VECTORS: &[TestVector] = &[
    TestVector {
        secret: hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60"),
        public: hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"),
        message: b"",
        signature: hex!(
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155"
            "5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
        ),
    },
    TestVector {
        secret: hex!("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb"),
        public: hex!("3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c"),
        message: &hex!("72"),
        signature: hex!(
            "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da"
            "085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00"
        ),
    },
];

#[test]
fn rfc8032_vectors() {
    let eddsa = Eddsa::<Sha512>::from_preset("ed25519").unwrap();

    for vector in VECTORS {
        let key = eddsa.key_from_secret(&vector.secret).unwrap();
        assert_eq!(key.public_bytes(), vector.public);
        assert_eq!(key.secret().unwrap(), vector.secret);

        let sig = key.sign(vector.message).unwrap();
        assert_eq!(sig.to_bytes(), vector.signature);
        assert!(key.verify(vector.message, &sig));

        let public = eddsa.key_from_public(&vector.public).unwrap();
        let parsed = eddsa.signature_from_bytes(&vector.signature).unwrap();
        assert_eq!(parsed, sig);
        assert!(public.verify(vector.message, &parsed));
        assert!(!public.verify(b"other message", &parsed));
    }
}

#[test]
fn public_keys_cannot_sign() {
    let eddsa = Eddsa::<Sha512>::from_preset("ed25519").unwrap();
    let public = eddsa.key_from_public(&VECTORS[0].public).unwrap();
    assert_eq!(public.sign(b"hello").unwrap_err(), Error::MissingKey);
    assert_eq!(public.secret().unwrap_err(), Error::MissingKey);
    assert_eq!(public.private_scalar().unwrap_err(), Error::MissingKey);
}

#[test]
fn signature_traits() {
    let eddsa = Eddsa::<Sha512>::from_preset("ed25519").unwrap();
    let key = eddsa.key_from_secret(&[0x42; 32]).unwrap();

    let sig = Signer::try_sign(&key, b"hello").unwrap();
    assert!(Verifier::verify(&key, b"hello", &sig).is_ok());
    assert!(Verifier::verify(&key, b"hellp", &sig).is_err());
}

#[test]
fn malformed_signatures() {
    let eddsa = Eddsa::<Sha512>::from_preset("ed25519").unwrap();
    let sig = VECTORS[1].signature;

    assert_eq!(
        eddsa.signature_from_bytes(&sig[..63]).unwrap_err(),
        Error::InvalidSignature
    );

    // S = 2^255 - 1 is not reduced.
    let mut unreduced = sig;
    unreduced[32..].fill(0xff);
    unreduced[63] = 0x7f;
    assert_eq!(
        eddsa.signature_from_bytes(&unreduced).unwrap_err(),
        Error::InvalidSignature
    );

    let mut flipped = sig;
    flipped[40] ^= 1;
    let key = eddsa.key_from_public(&VECTORS[1].public).unwrap();
    let flipped = eddsa.signature_from_bytes(&flipped).unwrap();
    assert!(!key.verify(&hex!("72"), &flipped));
}

#[test]
fn scalar_is_clamped() {
    let eddsa = Eddsa::<Sha512>::from_preset("ed25519").unwrap();
    for vector in VECTORS {
        let key = eddsa.key_from_secret(&vector.secret).unwrap();
        let a = key.private_scalar().unwrap();
        assert_eq!(a.bit_length(), 255);
        assert!(!a.bit(0) && !a.bit(1) && !a.bit(2));
        assert_eq!(key.message_prefix().unwrap().len(), 32);
    }
}
