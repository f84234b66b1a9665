//! Key agreement tests.

use elliptic::{BigInt, Error, Point, ecdh::Ecdh};
use hex_literal::hex;
use rand_core::OsRng;

#[test]
fn both_parties_agree() {
    for name in ["curve25519", "ed25519", "secp256k1", "p256", "brainpoolP256r1"] {
        let ecdh = Ecdh::from_preset(name).unwrap();
        let alice = ecdh.gen_key_pair(&mut OsRng).unwrap();
        let bob = ecdh.gen_key_pair(&mut OsRng).unwrap();

        let shared_a = alice.derive(bob.public_key()).unwrap();
        let shared_b = bob.derive(alice.public_key()).unwrap();
        assert_eq!(shared_a, shared_b, "{name}");

        // Through the encoded public keys as well.
        let bytes_a = alice.derive_bytes(&bob.public_bytes().unwrap()).unwrap();
        let bytes_b = bob.derive_bytes(&alice.public_bytes().unwrap()).unwrap();
        assert_eq!(bytes_a, bytes_b, "{name}");
        assert_eq!(bytes_a.len(), ecdh.curve().domain().field_bytes(), "{name}");
    }
}

/// RFC 7748 § 6.1
#[test]
fn x25519() {
    let ecdh = Ecdh::from_preset("curve25519").unwrap();
    let alice = ecdh
        .key_from_private(&hex!("77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a"))
        .unwrap();
    let bob = ecdh
        .key_from_private(&hex!("5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb"))
        .unwrap();

    let alice_public = hex!("8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a");
    let bob_public = hex!("de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f");
    assert_eq!(alice.public_bytes().unwrap(), alice_public);
    assert_eq!(bob.public_bytes().unwrap(), bob_public);

    let shared = hex!("4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742");
    assert_eq!(*alice.derive_bytes(&bob_public).unwrap(), shared);
    assert_eq!(*bob.derive_bytes(&alice_public).unwrap(), shared);
}

#[test]
fn rejects_off_curve_peer() {
    let ecdh = Ecdh::from_preset("secp256k1").unwrap();
    let bob = ecdh.gen_key_pair(&mut OsRng).unwrap();

    // (14, 16) lies on a twist of secp256k1 with small order factors.
    let mut mallory = [0u8; 65];
    mallory[0] = 0x04;
    mallory[32] = 14;
    mallory[64] = 16;
    assert_eq!(bob.derive_bytes(&mallory).unwrap_err(), Error::TwistSecurity);
    assert_eq!(
        ecdh.curve()
            .point(&BigInt::from(14u32), &BigInt::from(16u32))
            .unwrap_err(),
        Error::InvalidPoint
    );
}

#[test]
fn rejects_small_order_peers() {
    let ed25519 = Ecdh::from_preset("ed25519").unwrap();
    let key = ed25519.gen_key_pair(&mut OsRng).unwrap();
    let p = ed25519.curve().domain().p().clone();
    let order_two = ed25519.curve().point(&BigInt::zero(), &(p - 1u32)).unwrap();
    assert_eq!(key.derive(&order_two).unwrap_err(), Error::TwistSecurity);
    assert_eq!(
        key.derive(&ed25519.curve().identity()).unwrap_err(),
        Error::TwistSecurity
    );

    let x25519 = Ecdh::from_preset("curve25519").unwrap();
    let key = x25519.gen_key_pair(&mut OsRng).unwrap();
    assert_eq!(key.derive_bytes(&[0; 32]).unwrap_err(), Error::TwistSecurity);
    assert_eq!(key.derive_bytes(&[9; 31]).unwrap_err(), Error::TwistSecurity);
}

#[test]
fn rejects_peer_on_another_curve() {
    let p256 = Ecdh::from_preset("p256").unwrap();
    let k256 = Ecdh::from_preset("secp256k1").unwrap();
    let alice = p256.gen_key_pair(&mut OsRng).unwrap();
    let bob = k256.gen_key_pair(&mut OsRng).unwrap();

    let peer: &Point = bob.public_key();
    assert_eq!(alice.derive(peer).unwrap_err(), Error::TwistSecurity);
}
