//! ECDSA tests.

use elliptic::{
    BigInt, Error, PointFormat,
    curves::{Model, presets},
    digest::{Digest, core_api::BlockSizeUser},
    ecdsa::{Ecdsa, SignOptions, Signature},
};
use hex_literal::hex;
use proptest::prelude::*;
use rand_core::OsRng;
use sha2::{Sha224, Sha256, Sha384, Sha512};

const ENTROPY: [u8; 25] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25,
];

fn int(hex: &str) -> BigInt {
    BigInt::from_hex(hex).unwrap()
}

fn weierstrass_presets() -> impl Iterator<Item = &'static str> {
    presets::PRESETS.iter().map(|p| p.params.name).filter(|name| {
        presets::curve(name).unwrap().model() == Model::ShortWeierstrass
    })
}

#[test]
fn sign_and_verify_on_every_weierstrass_preset() {
    for name in weierstrass_presets() {
        let ecdsa = Ecdsa::<Sha256>::from_preset(name).unwrap();
        let key = ecdsa.gen_key_pair_with_entropy(&ENTROPY, None).unwrap();
        key.validate().unwrap();

        let digest = Sha256::digest(b"deadbeef");
        let sig = key.sign(&digest, &SignOptions::default()).unwrap();
        assert!(key.verify(&digest, &sig), "{name}");
        assert!(!key.verify(&Sha256::digest(b"deadbeee"), &sig), "{name}");

        let der = sig.to_der().unwrap();
        assert_eq!(Signature::from_der(&der).unwrap().r(), sig.r());
        assert_eq!(ecdsa.verify_der(&digest, &der, &key), Ok(true), "{name}");

        for format in [PointFormat::Compressed, PointFormat::Uncompressed] {
            let public = ecdsa.key_from_public_hex(&key.get_public_hex(format)).unwrap();
            assert_eq!(public.public_key(), key.public_key(), "{name}");
            assert!(public.verify(&digest, &sig), "{name}");
        }
    }
}

#[test]
fn tampered_signatures_fail() {
    let ecdsa = Ecdsa::<Sha256>::from_preset("p256").unwrap();
    let key = ecdsa.gen_key_pair(&mut OsRng).unwrap();
    let digest = Sha256::digest(b"hello");
    let sig = key.sign(&digest, &SignOptions::default()).unwrap();

    let flipped_r = Signature::new(sig.r() + 1u32, sig.s().clone());
    let flipped_s = Signature::new(sig.r().clone(), sig.s() + 1u32);
    assert!(!key.verify(&digest, &flipped_r));
    assert!(!key.verify(&digest, &flipped_s));

    let other = ecdsa.gen_key_pair(&mut OsRng).unwrap();
    assert!(!other.verify(&digest, &sig));

    let n = ecdsa.n().clone();
    assert!(!key.verify(&digest, &Signature::new(BigInt::zero(), sig.s().clone())));
    assert!(!key.verify(&digest, &Signature::new(sig.r().clone(), n)));
}

#[test]
fn canonical_signatures_have_low_s() {
    let ecdsa = Ecdsa::<Sha256>::from_preset("secp256k1").unwrap();
    let key = ecdsa.gen_key_pair_with_entropy(&ENTROPY, None).unwrap();
    let half_n = ecdsa.n() >> 1;
    let opts = SignOptions {
        canonical: true,
        ..Default::default()
    };

    for message in [&b"a"[..], b"b", b"c", b"d", b"e", b"f"] {
        let digest = Sha256::digest(message);
        let sig = key.sign(&digest, &opts).unwrap();
        assert!(*sig.s() <= half_n);
        assert!(key.verify(&digest, &sig));
    }
}

#[test]
fn personalization_changes_the_nonce() {
    let ecdsa = Ecdsa::<Sha256>::from_preset("secp256k1").unwrap();
    let key = ecdsa.gen_key_pair_with_entropy(&ENTROPY, None).unwrap();
    let digest = Sha256::digest(b"deadbeef");

    let plain = key.sign(&digest, &SignOptions::default()).unwrap();
    let personalized = key
        .sign(
            &digest,
            &SignOptions {
                pers: Some(&hex!("1234")[..]),
                ..Default::default()
            },
        )
        .unwrap();

    assert_ne!(plain.r(), personalized.r());
    assert!(key.verify(&digest, &personalized));
}

#[test]
fn deterministic_key_generation() {
    let ecdsa = Ecdsa::<Sha256>::from_preset("secp256k1").unwrap();
    let entropy = Sha256::digest(b"hello world");
    let key = ecdsa
        .gen_key_pair_with_entropy(&entropy, Some(&b"my.pers.string"[..]))
        .unwrap();
    assert_eq!(
        key.get_private_hex().unwrap().as_str(),
        "6160edb2b218b7f1394b9ca8eb65a72831032a1f2f3dc2d99291c2f7950ed887"
    );
}

#[test]
fn short_entropy_is_rejected() {
    let ecdsa = Ecdsa::<Sha256>::from_preset("p256").unwrap();
    assert_eq!(
        ecdsa.gen_key_pair_with_entropy(&[1; 23], None).unwrap_err(),
        Error::InvalidParameter
    );
}

#[test]
fn private_hex_width_follows_the_order() {
    for (name, width) in [("p192", 48), ("p256", 64), ("p384", 96), ("p521", 132)] {
        let ecdsa = Ecdsa::<Sha256>::from_preset(name).unwrap();
        let key = ecdsa.gen_key_pair(&mut OsRng).unwrap();
        assert_eq!(key.get_private_hex().unwrap().len(), width, "{name}");
    }
}

#[test]
fn non_weierstrass_curves_are_rejected() {
    for name in ["ed25519", "curve25519"] {
        assert_eq!(
            Ecdsa::<Sha256>::from_preset(name).unwrap_err(),
            Error::InvalidParameter
        );
    }
    assert_eq!(Ecdsa::<Sha256>::from_preset("p255").unwrap_err(), Error::UnknownCurve);
}

#[test]
fn invalid_public_keys() {
    let ecdsa = Ecdsa::<Sha256>::from_preset("secp256k1").unwrap();
    let x = "000000000000000000000000000000000000000000000000000000000000000e";
    let y = "0000000000000000000000000000000000000000000000000000000000000010";
    let off_curve = ["04", x, y].concat();
    assert_eq!(ecdsa.key_from_public_hex(&off_curve).unwrap_err(), Error::InvalidPoint);
    assert_eq!(
        ecdsa.curve().point(&BigInt::from(14u32), &BigInt::from(16u32)).unwrap_err(),
        Error::InvalidPoint
    );

    assert_eq!(ecdsa.key_from_public_hex("zz").unwrap_err(), Error::Encoding);
    assert_eq!(ecdsa.key_from_public_bytes(&[0x05; 33]).unwrap_err(), Error::Encoding);
}

fn rfc6979<D>(curve: &str, key: &str, public: (&str, &str), message: &str, r: &str, s: &str)
where
    D: Digest + BlockSizeUser + Clone,
{
    let ecdsa = Ecdsa::<D>::from_preset(curve).unwrap();
    let key = ecdsa.key_from_private_hex(key).unwrap();
    let digest = D::digest(message.as_bytes());

    let sig = key.sign(&digest, &SignOptions::default()).unwrap();
    assert_eq!(*sig.r(), int(r), "{curve} {message}");
    assert_eq!(*sig.s(), int(s), "{curve} {message}");

    let point = ecdsa.curve().point(&int(public.0), &int(public.1)).unwrap();
    assert_eq!(point.to_affine_point().as_ref(), Some(key.public_key()));

    let verifier = ecdsa.key_from_public(&point).unwrap();
    verifier.validate().unwrap();
    assert!(verifier.verify(&digest, &sig), "{curve} {message}");
}

#[test]
fn rfc6979_p192() {
    let key = "6fab034934e4c0fc9ae67f5b5659a9d7d1fefd187ee09fd4";
    let public = (
        "ac2c77f529f91689fea0ea5efec7f210d8eea0b9e047ed56",
        "3bc723e57670bd4887ebc732c523063d0a7c957bc97c1c43",
    );

    rfc6979::<Sha224>(
        "p192",
        key,
        public,
        "sample",
        "a1f00dad97aeec91c95585f36200c65f3c01812aa60378f5",
        "e07ec1304c7c6c9debbe980b9692668f81d4de7922a0f97a",
    );
    rfc6979::<Sha256>(
        "p192",
        key,
        public,
        "sample",
        "4b0b8ce98a92866a2820e20aa6b75b56382e0f9bfd5ecb55",
        "ccdb006926ea9565cbadc840829d8c384e06de1f1e381b85",
    );
    rfc6979::<Sha224>(
        "p192",
        key,
        public,
        "test",
        "6945a1c1d1b2206b8145548f633bb61cef04891baf26ed34",
        "b7fb7fdfc339c0b9bd61a9f5a8eaf9be58fc5cba2cb15293",
    );
    rfc6979::<Sha256>(
        "p192",
        key,
        public,
        "test",
        "3a718bd8b4926c3b52ee6bbe67ef79b18cb6eb62b1ad97ae",
        "5662e6848a4a19b1f1ae2f72acd4b8bbe50f1eac65d9124f",
    );
}

#[test]
fn rfc6979_p224() {
    let key = "f220266e1105bfe3083e03ec7a3a654651f45e37167e88600bf257c1";
    let public = (
        "00cf08da5ad719e42707fa431292dea11244d64fc51610d94b130d6c",
        "eeab6f3debe455e3dbf85416f7030cbd94f34f2d6f232c69f3c1385a",
    );

    rfc6979::<Sha224>(
        "p224",
        key,
        public,
        "sample",
        "1cdfe6662dde1e4a1ec4cdedf6a1f5a2fb7fbd9145c12113e6abfd3e",
        "a6694fd7718a21053f225d3f46197ca699d45006c06f871808f43ebc",
    );
    rfc6979::<Sha256>(
        "p224",
        key,
        public,
        "sample",
        "61aa3da010e8e8406c656bc477a7a7189895e7e840cdfe8ff42307ba",
        "bc814050dab5d23770879494f9e0a680dc1af7161991bde692b10101",
    );
    rfc6979::<Sha224>(
        "p224",
        key,
        public,
        "test",
        "c441ce8e261ded634e4cf84910e4c5d1d22c5cf3b732bb204dbef019",
        "902f42847a63bdc5f6046ada114953120f99442d76510150f372a3f4",
    );
    rfc6979::<Sha256>(
        "p224",
        key,
        public,
        "test",
        "ad04dde87b84747a243a631ea47a1ba6d1faa059149ad2440de6fba6",
        "178d49b1ae90e3d8b629be3db5683915f4e8c99fdf6e666cf37adcfd",
    );
}

#[test]
fn rfc6979_p256() {
    let key = "c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721";
    let public = (
        "60fed4ba255a9d31c961eb74c6356d68c049b8923b61fa6ce669622e60f29fb6",
        "7903fe1008b8bc99a41ae9e95628bc64f2f1b20c2d7e9f5177a3c294d4462299",
    );

    rfc6979::<Sha224>(
        "p256",
        key,
        public,
        "sample",
        "53b2fff5d1752b2c689df257c04c40a587fababb3f6fc2702f1343af7ca9aa3f",
        "b9afb64fdc03dc1a131c7d2386d11e349f070aa432a4acc918bea988bf75c74c",
    );
    rfc6979::<Sha256>(
        "p256",
        key,
        public,
        "sample",
        "efd48b2aacb6a8fd1140dd9cd45e81d69d2c877b56aaf991c34d0ea84eaf3716",
        "f7cb1c942d657c41d436c7a1b6e29f65f3e900dbb9aff4064dc4ab2f843acda8",
    );
    rfc6979::<Sha224>(
        "p256",
        key,
        public,
        "test",
        "c37edb6f0ae79d47c3c27e962fa269bb4f441770357e114ee511f662ec34a692",
        "c820053a05791e521fcaad6042d40aea1d6b1a540138558f47d0719800e18f2d",
    );
    rfc6979::<Sha256>(
        "p256",
        key,
        public,
        "test",
        "f1abb023518351cd71d881567b1ea663ed3efcf6c5132b354f28d3b0b7d38367",
        "019f4113742a2b14bd25926b49c649155f267e60d3814b4c0cc84250e46f0083",
    );
}

#[test]
fn rfc6979_p384() {
    let ecdsa = Ecdsa::<Sha384>::from_preset("p384").unwrap();
    let key = ecdsa
        .key_from_private_hex(concat!(
            "6b9d3dad2e1b8c1c05b19875b6659f4de23c3b667bf297ba",
            "9aa47740787137d896d5724e4c70a825f872c9ea60d2edf5",
        ))
        .unwrap();
    let public = key.public_key();
    let (x, y) = (public.x().unwrap(), public.y().unwrap());
    let x = x.to_hex_padded(96);
    let y = y.to_hex_padded(96);

    rfc6979::<Sha384>(
        "p384",
        key.get_private_hex().unwrap().as_str(),
        (&x, &y),
        "sample",
        concat!(
            "94edbb92a5ecb8aad4736e56c691916b3f88140666ce9fa7",
            "3d64c4ea95ad133c81a648152e44acf96e36dd1e80fabe46",
        ),
        concat!(
            "99ef4aeb15f178cea1fe40db2603138f130e740a19624526",
            "203b6351d0a3a94fa329c145786e679e7b82c71a38628ac8",
        ),
    );
    rfc6979::<Sha384>(
        "p384",
        key.get_private_hex().unwrap().as_str(),
        (&x, &y),
        "test",
        concat!(
            "8203b63d3c853e8d77227fb377bcf7b7b772e97892a80f36",
            "ab775d509d7a5feb0542a7f0812998da8f1dd3ca3cf023db",
        ),
        concat!(
            "ddd0760448d42d8a43af45af836fce4de8be06b485e9b61b",
            "827c2f13173923e06a739f040649a667bf3b828246baa5a5",
        ),
    );
}

#[test]
fn rfc6979_p521() {
    let ecdsa = Ecdsa::<Sha512>::from_preset("p521").unwrap();
    let key = ecdsa
        .key_from_private_hex(concat!(
            "0fad06daa62ba3b25d2fb40133da757205de67f5bb0018fee8c86e1b68c7e75c",
            "aa896eb32f1f47c70855836a6d16fcc1466f6d8fbec67db89ec0c08b0e996b83538",
        ))
        .unwrap();
    let public = key.public_key();
    let x = public.x().unwrap().to_hex_padded(132);
    let y = public.y().unwrap().to_hex_padded(132);
    let private = key.get_private_hex().unwrap();

    rfc6979::<Sha512>(
        "p521",
        private.as_str(),
        (&x, &y),
        "sample",
        concat!(
            "0c328fafcbd79dd77850370c46325d987cb525569fb63c5d3bc53950e6d4c5f1",
            "74e25a1ee9017b5d450606add152b534931d7d4e8455cc91f9b15bf05ec36e377fa",
        ),
        concat!(
            "0617cce7cf5064806c467f678d3b4080d6f1cc50af26ca209417308281b68af2",
            "82623eaa63e5b5c0723d8b8c37ff0777b1a20f8ccb1dccc43997f1ee0e44da4a67a",
        ),
    );
    rfc6979::<Sha512>(
        "p521",
        private.as_str(),
        (&x, &y),
        "test",
        concat!(
            "013e99020abf5cee7525d16b69b229652ab6bdf2affcaef38773b4b7d08725f1",
            "0cdb93482fdcc54edcee91eca4166b2a7c6265ef0ce2bd7051b7cef945babd47ee6d",
        ),
        concat!(
            "01fbd0013c674aa79cb39849527916ce301c66ea7ce8b80682786ad60f98f7e7",
            "8a19ca69eff5c57400e3b3a0ad66ce0978214d13baf4e9ac60752f7b155e2de4dce3",
        ),
    );
}

/// Widely published secp256k1 RFC 6979 vectors (as used by bitcoinjs and
/// python-ecdsa), signed with `d = 1` and `d = n - 1`.
#[test]
fn rfc6979_secp256k1() {
    let ecdsa = Ecdsa::<Sha256>::from_preset("secp256k1").unwrap();
    let n_minus_1 = ecdsa.n() - 1u32;
    let canonical = SignOptions {
        canonical: true,
        ..Default::default()
    };

    let vectors: [(BigInt, &[u8], &str, &str, &str, u8); 3] = [
        (
            BigInt::one(),
            b"Satoshi Nakamoto",
            "934b1ea10a4b3c1757e2b0c017d0b6143ce3c9a7e6a4a49860d7a6ab210ee3d8",
            "dbbd3162d46e9f9bef7feb87c16dc13b4f6568a87f4e83f728e2443ba586675c",
            "2442ce9d2b916064108014783e923ec36b49743e2ffa1c4496f01a512aafd9e5",
            0,
        ),
        (
            BigInt::one(),
            b"All those moments will be lost in time, like tears in rain. Time to die...",
            "8600dbd41e348fe5c9465ab92d23e3db8b98b873beecd930736488696438cb6b",
            "ab8019bbd8b6924cc4099fe625340ffb1eaac34bf4477daa39d0835429094520",
            "547fe64427496db33bf66019dacbf0039c04199abb0122918601db38a72cfc21",
            1,
        ),
        (
            n_minus_1,
            b"Satoshi Nakamoto",
            "fd567d121db66e382991534ada77a6bd3106f0a1098c231e47993447cd6af2d0",
            "94c632f14e4379fc1ea610a3df5a375152549736425ee17cebe10abbc2a2826c",
            "6b39cd0eb1bc8603e159ef5c20a5c8ad685a45b06ce9bebed3f153d10d93bed5",
            1,
        ),
    ];

    for (d, message, r, high_s, low_s, recovery_id) in vectors {
        let key = ecdsa.key_from_private(&d).unwrap();
        let digest = Sha256::digest(message);

        let sig = key.sign(&digest, &SignOptions::default()).unwrap();
        assert_eq!(*sig.r(), int(r));
        assert_eq!(*sig.s(), int(high_s));
        assert_eq!(sig.recovery_id(), Some(recovery_id));

        let low = key.sign(&digest, &canonical).unwrap();
        assert_eq!(*low.r(), int(r));
        assert_eq!(*low.s(), int(low_s));
        assert_eq!(low.recovery_id(), Some(recovery_id ^ 1));

        for sig in [&sig, &low] {
            assert!(key.verify(&digest, sig));
            let j = sig.recovery_id().unwrap();
            let recovered = ecdsa.recover_public_key(&digest, sig, j).unwrap();
            assert_eq!(&recovered, key.public_key());
        }
    }
}

/// Signatures with tiny `r` and `s`, some of which only verify when `x(R)`
/// is reduced modulo `n`.
#[test]
fn maxwell_trick() {
    let digest = hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
    let vectors: [(&str, &str, &str, bool); 8] = [
        (
            "p256",
            "3006020106020104",
            "041548fc88953e06cd34d4b300804c5322cb48c24aaaa4d07a541b0f0ccfeedeb0ae4991b90519ea405588bdf699f5e6d0c6b2d5217a5c16e8371062737aa1dae1",
            true,
        ),
        (
            "p256",
            "3006020106020104",
            "04ad8f60e4ec1ebdb6a260b559cb55b1e9d2c5ddd43a41a2d11b0741ef2567d84e166737664104ebbc337af3d861d3524cfbc761c12edae974a0759750c8324f9a",
            true,
        ),
        (
            "p256",
            "301502104319055358e8617b0c46353d039cdaae020104",
            "0445bd879143a64af5746e2e82aa65fd2ea07bba4e35594095a981b59984dacb219d59697387ac721b1f1eccf4b11f43ddc39e8367147abab3084142ed3ea170e4",
            true,
        ),
        (
            "p256",
            "301502104319055358e8617b0c46353d039cdaae020104",
            "040feb5df4cc78b35ec9c180cc0de5842f75f088b48456978ffa98e716d94883e1e6500b2a1f6c1d9d493428d7ae7d9a8a560fff30a3d14aa160be0c5e7edcd887",
            false,
        ),
        (
            "p384",
            "3006020103020104",
            "0425e299eea9927b39fa92417705391bf17e8110b4615e9eb5da471b57be0c30e7d89dbdc3e5da4eae029b300344d3851548b59ed8be668813905105e673319d59d32f574e180568463c6186864888f6c0b67b304441f82aab031279e48f047c31",
            true,
        ),
        (
            "p384",
            "3006020103020104",
            "04a328f65c22307188b4af65779c1d2ec821c6748c6bd8dc0e6a008135f048f832df501f7f3f79966b03d5bef2f187ec34d85f6a934af465656fb4eea8dd9176ab80fbb4a27a649f526a7dfe616091b78d293552bc093dfde9b31cae69d51d3afb",
            true,
        ),
        (
            "p384",
            "301d0218389cb27e0bc8d21fa7e5f24cb74f58851313e696333ad68e020104",
            "04242e8585eaa7a28cc6062cab4c9c5fd536f46b17be1728288a2cda5951df4941aed1d712defda023d10aca1c5ee01443e8beacd821f7efa27847418ab95ce2c514b2b6b395ee73417c83dbcad631421f360d84d64658c98a62d685b220f5aad4",
            true,
        ),
        (
            "p384",
            "301d0218389cb27e0bc8d21fa7e5f24cb74f58851313e696333ad68e020104",
            "04cdf865dd743fe1c23757ec5e65fd5e4038b472ded2af261e3d8343c595c8b69147df46379c7ca40e60e80170d34a1188dbb2b6f7d3934c23d2f78cfb0db3f3219959fad63c9b612ef2f20d679777b84192ce86e781c14b1bbb77eacd6e0520e2",
            false,
        ),
    ];

    for (curve, der, public, expected) in vectors {
        let ecdsa = Ecdsa::<Sha256>::from_preset(curve).unwrap();
        let key = ecdsa.key_from_public_hex(public).unwrap();
        let der = hex::decode(der).unwrap();
        assert_eq!(ecdsa.verify_der(&digest, &der, &key), Ok(expected), "{curve} {public}");
    }
}

/// Wycheproof `ecdsa_secp192r1_sha256` tcId 81: a digest wider than `n`.
#[test]
fn wide_digest_is_truncated() {
    let ecdsa = Ecdsa::<Sha256>::from_preset("p192").unwrap();
    let key = ecdsa
        .key_from_public_bytes(&hex!(
            "04cd35a0b18eeb8fcd87ff019780012828745f046e785deba28150de1be6cb4376523006beff30ff09b4049125ced29723"
        ))
        .unwrap();
    let digest = hex!("00000000690ed426ccf17803ebe2bd0884bcd58a1bb5e7477ead3645f356e7a9");
    let der = hex!(
        "303502186f20676c0d04fc40ea55d5702f798355787363a91e97a7e50219009d1c8c171b2b02e7d791c204c17cea4cf556a2034288885b"
    );
    assert_eq!(ecdsa.verify_der(&digest, &der, &key), Ok(true));
}

#[test]
fn malformed_der_is_an_error() {
    let ecdsa = Ecdsa::<Sha256>::from_preset("p256").unwrap();
    let key = ecdsa.gen_key_pair(&mut OsRng).unwrap();
    let digest = Sha256::digest(b"hello");
    let mut der = key.sign(&digest, &SignOptions::default()).unwrap().to_der().unwrap();

    der.push(0);
    assert_eq!(ecdsa.verify_der(&digest, &der, &key), Err(Error::InvalidSignature));
    assert_eq!(
        ecdsa.verify_der(&digest, &hex!("3006020106"), &key),
        Err(Error::InvalidSignature)
    );
}

#[test]
fn recover_public_key() {
    let ecdsa = Ecdsa::<Sha256>::from_preset("secp256k1").unwrap();
    let key = ecdsa.gen_key_pair(&mut OsRng).unwrap();
    let digest = [0u8, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10];

    for canonical in [false, true] {
        let opts = SignOptions {
            canonical,
            ..Default::default()
        };
        let sig = key.sign(&digest, &opts).unwrap();

        let j = ecdsa.key_recovery_param(&digest, &sig, key.public_key()).unwrap();
        let recovered = ecdsa.recover_public_key(&digest, &sig, j).unwrap();
        assert_eq!(&recovered, key.public_key());

        let j = sig.recovery_id().unwrap();
        let recovered = ecdsa.recover_public_key(&digest, &sig, j).unwrap();
        assert_eq!(&recovered, key.public_key());
    }
}

#[test]
fn recovery_failures() {
    let ecdsa = Ecdsa::<Sha256>::from_preset("secp256k1").unwrap();
    let digest = hex!("f75c6b18a72fabc0f0b888c3da58e004f0af1fe14f7ca5d8c897fe164925d5e9");
    let sig = Signature::new(
        int("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140"),
        int("8887321be575c8095f789dd4c743dfe42c1820f9231f98a962b210e3ac2452a3"),
    );
    assert_eq!(
        ecdsa.recover_public_key(&digest, &sig, 0).unwrap_err(),
        Error::InvalidSignature
    );
    assert_eq!(
        ecdsa.recover_public_key(&digest, &sig, 4).unwrap_err(),
        Error::InvalidParameter
    );

    let zero = Signature::new(BigInt::zero(), BigInt::one());
    assert_eq!(
        ecdsa.recover_public_key(&digest, &zero, 0).unwrap_err(),
        Error::InvalidSignature
    );

    let key = ecdsa.gen_key_pair(&mut OsRng).unwrap();
    let other = ecdsa.gen_key_pair(&mut OsRng).unwrap();
    let sig = key.sign(&digest, &SignOptions::default()).unwrap();
    assert_eq!(
        ecdsa.key_recovery_param(&digest, &sig, other.public_key()).unwrap_err(),
        Error::InvalidSignature
    );
}

#[test]
fn shared_secret_matches() {
    let ecdsa = Ecdsa::<Sha256>::from_preset("p256").unwrap();
    let alice = ecdsa.gen_key_pair(&mut OsRng).unwrap();
    let bob = ecdsa.gen_key_pair(&mut OsRng).unwrap();

    let alice_public = ecdsa
        .key_from_public_hex(&alice.get_public_hex(PointFormat::Compressed))
        .unwrap();
    let shared_a = alice.derive(&bob.public_key().clone().into()).unwrap();
    let shared_b = bob.derive(&alice_public.public_key().clone().into()).unwrap();
    assert_eq!(shared_a, shared_b);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn sign_verify_with_any_key(
        d in proptest::collection::vec(any::<u8>(), 32),
        message in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let ecdsa = Ecdsa::<Sha256>::from_preset("secp256k1").unwrap();
        let d = BigInt::from_be_bytes(&d);
        prop_assume!(!d.is_zero() && &d < ecdsa.n());

        let key = ecdsa.key_from_private(&d).unwrap();
        let sig = ecdsa.sign_message(&message, &key, &SignOptions::default()).unwrap();
        prop_assert!(ecdsa.verify_message(&message, &sig, &key));
    }
}

#[test]
fn thread_safety() {
    fn send_sync<T: Send + Sync>() {}
    fn send<T: Send>() {}

    send_sync::<Ecdsa<Sha256>>();
    send_sync::<Signature>();
    send_sync::<elliptic::Curve>();
    send::<elliptic::ecdsa::KeyPair<Sha256>>();
}
