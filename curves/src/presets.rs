//! Named curves and the [`Registry`] which holds built curves by name.

use crate::{
    Curve, Error, Result,
    curve::{CurveParams, EndoParams, ModelParams},
};
use alloc::{
    collections::BTreeMap,
    string::{String, ToString},
    vec::Vec,
};

/// Hash function a preset is conventionally paired with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-256
    Sha256,

    /// SHA-384
    Sha384,

    /// SHA-512
    Sha512,
}

/// A named curve with its conventional hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preset {
    /// Curve parameters.
    pub params: CurveParams,

    /// Conventional hash.
    pub hash: HashAlgorithm,
}

/// NIST P-192
pub const P192: Preset = Preset {
    params: CurveParams {
        name: "p192",
        model: ModelParams::ShortWeierstrass {
            a: "ffffffff ffffffff ffffffff fffffffe ffffffff fffffffc",
            b: "64210519 e59c80e7 0fa7e9ab 72243049 feb8deec c146b9b1",
        },
        p: "ffffffff ffffffff ffffffff fffffffe ffffffff ffffffff",
        n: "ffffffff ffffffff ffffffff 99def836 146bc9b1 b4d22831",
        h: "1",
        gx: "188da80e b03090f6 7cbf20eb 43a18800 f4ff0afd 82ff1012",
        gy: Some("07192b95 ffc8da78 631011ed 6b24cdd5 73f977a1 1e794811"),
        endo: None,
        precompute: false,
    },
    hash: HashAlgorithm::Sha256,
};

/// NIST P-224
pub const P224: Preset = Preset {
    params: CurveParams {
        name: "p224",
        model: ModelParams::ShortWeierstrass {
            a: "ffffffff ffffffff ffffffff fffffffe ffffffff ffffffff fffffffe",
            b: "b4050a85 0c04b3ab f5413256 5044b0b7 d7bfd8ba 270b3943 2355ffb4",
        },
        p: "ffffffff ffffffff ffffffff ffffffff 00000000 00000000 00000001",
        n: "ffffffff ffffffff ffffffff ffff16a2 e0b8f03e 13dd2945 5c5c2a3d",
        h: "1",
        gx: "b70e0cbd 6bb4bf7f 321390b9 4a03c1d3 56c21122 343280d6 115c1d21",
        gy: Some("bd376388 b5f723fb 4c22dfe6 cd4375a0 5a074764 44d58199 85007e34"),
        endo: None,
        precompute: false,
    },
    hash: HashAlgorithm::Sha256,
};

/// NIST P-256
pub const P256: Preset = Preset {
    params: CurveParams {
        name: "p256",
        model: ModelParams::ShortWeierstrass {
            a: "ffffffff 00000001 00000000 00000000 00000000 ffffffff ffffffff fffffffc",
            b: "5ac635d8 aa3a93e7 b3ebbd55 769886bc 651d06b0 cc53b0f6 3bce3c3e 27d2604b",
        },
        p: "ffffffff 00000001 00000000 00000000 00000000 ffffffff ffffffff ffffffff",
        n: "ffffffff 00000000 ffffffff ffffffff bce6faad a7179e84 f3b9cac2 fc632551",
        h: "1",
        gx: "6b17d1f2 e12c4247 f8bce6e5 63a440f2 77037d81 2deb33a0 f4a13945 d898c296",
        gy: Some("4fe342e2 fe1a7f9b 8ee7eb4a 7c0f9e16 2bce3357 6b315ece cbb64068 37bf51f5"),
        endo: None,
        precompute: false,
    },
    hash: HashAlgorithm::Sha256,
};

/// NIST P-384
pub const P384: Preset = Preset {
    params: CurveParams {
        name: "p384",
        model: ModelParams::ShortWeierstrass {
            a: "ffffffff ffffffff ffffffff ffffffff ffffffff ffffffff ffffffff
                fffffffe ffffffff 00000000 00000000 fffffffc",
            b: "b3312fa7 e23ee7e4 988e056b e3f82d19 181d9c6e fe814112 0314088f
                5013875a c656398d 8a2ed19d 2a85c8ed d3ec2aef",
        },
        p: "ffffffff ffffffff ffffffff ffffffff ffffffff ffffffff ffffffff
            fffffffe ffffffff 00000000 00000000 ffffffff",
        n: "ffffffff ffffffff ffffffff ffffffff ffffffff ffffffff c7634d81
            f4372ddf 581a0db2 48b0a77a ecec196a ccc52973",
        h: "1",
        gx: "aa87ca22 be8b0537 8eb1c71e f320ad74 6e1d3b62 8ba79b98 59f741e0 82542a38
             5502f25d bf55296c 3a545e38 72760ab7",
        gy: Some(
            "3617de4a 96262c6f 5d9e98bf 9292dc29 f8f41dbd 289a147c e9da3113 b5f0b8c0
             0a60b1ce 1d7e819d 7a431d7c 90ea0e5f",
        ),
        endo: None,
        precompute: false,
    },
    hash: HashAlgorithm::Sha384,
};

/// NIST P-521
pub const P521: Preset = Preset {
    params: CurveParams {
        name: "p521",
        model: ModelParams::ShortWeierstrass {
            a: "000001ff ffffffff ffffffff ffffffff ffffffff ffffffff
                ffffffff ffffffff ffffffff ffffffff ffffffff ffffffff
                ffffffff ffffffff ffffffff ffffffff fffffffc",
            b: "00000051 953eb961 8e1c9a1f 929a21a0 b68540ee a2da725b
                99b315f3 b8b48991 8ef109e1 56193951 ec7e937b 1652c0bd
                3bb1bf07 3573df88 3d2c34f1 ef451fd4 6b503f00",
        },
        p: "000001ff ffffffff ffffffff ffffffff ffffffff ffffffff
            ffffffff ffffffff ffffffff ffffffff ffffffff ffffffff
            ffffffff ffffffff ffffffff ffffffff ffffffff",
        n: "000001ff ffffffff ffffffff ffffffff ffffffff ffffffff
            ffffffff ffffffff fffffffa 51868783 bf2f966b 7fcc0148
            f709a5d0 3bb5c9b8 899c47ae bb6fb71e 91386409",
        h: "1",
        gx: "000000c6 858e06b7 0404e9cd 9e3ecb66 2395b442 9c648139
             053fb521 f828af60 6b4d3dba a14b5e77 efe75928 fe1dc127
             a2ffa8de 3348b3c1 856a429b f97e7e31 c2e5bd66",
        gy: Some(
            "00000118 39296a78 9a3bc004 5c8a5fb4 2c7d1bd9 98f54449
             579b4468 17afbd17 273e662c 97ee7299 5ef42640 c550b901
             3fad0761 353c7086 a272c240 88be9476 9fd16650",
        ),
        endo: None,
        precompute: false,
    },
    hash: HashAlgorithm::Sha512,
};

/// Curve25519 in Montgomery form (RFC 7748 section 4.1).
pub const CURVE25519: Preset = Preset {
    params: CurveParams {
        name: "curve25519",
        model: ModelParams::Montgomery { a: "76d06", b: "1" },
        p: "7fffffffffffffff ffffffffffffffff ffffffffffffffff ffffffffffffffed",
        n: "1000000000000000 0000000000000000 14def9dea2f79cd6 5812631a5cf5d3ed",
        h: "8",
        gx: "9",
        gy: None,
        endo: None,
        precompute: false,
    },
    hash: HashAlgorithm::Sha256,
};

/// Edwards25519 (RFC 8032 section 5.1).
pub const ED25519: Preset = Preset {
    params: CurveParams {
        name: "ed25519",
        model: ModelParams::TwistedEdwards {
            a: "-1",
            c: "1",
            // -121665 / 121666
            d: "52036cee2b6ffe73 8cc740797779e898 00700a4d4141d8ab 75eb4dca135978a3",
        },
        p: "7fffffffffffffff ffffffffffffffff ffffffffffffffff ffffffffffffffed",
        n: "1000000000000000 0000000000000000 14def9dea2f79cd6 5812631a5cf5d3ed",
        h: "8",
        gx: "216936d3cd6e53fec0a4e231fdd6dc5c692cc7609525a7b2c9562d608f25d51a",
        // 4/5
        gy: Some("6666666666666666666666666666666666666666666666666666666666666658"),
        endo: None,
        precompute: true,
    },
    hash: HashAlgorithm::Sha512,
};

/// brainpoolP256r1 (RFC 5639 section 3.4)
pub const BRAINPOOL_P256R1: Preset = Preset {
    params: CurveParams {
        name: "brainpoolP256r1",
        model: ModelParams::ShortWeierstrass {
            a: "7D5A0975 FC2C3057 EEF67530 417AFFE7 FB8055C1 26DC5C6C E94A4B44 F330B5D9",
            b: "26DC5C6C E94A4B44 F330B5D9 BBD77CBF 95841629 5CF7E1CE 6BCCDC18 FF8C07B6",
        },
        p: "A9FB57DB A1EEA9BC 3E660A90 9D838D72 6E3BF623 D5262028 2013481D 1F6E5377",
        n: "A9FB57DB A1EEA9BC 3E660A90 9D838D71 8C397AA3 B561A6F7 901E0E82 974856A7",
        h: "1",
        gx: "8BD2AEB9CB7E57CB2C4B482FFC81B7AFB9DE27E1E3BD23C23A4453BD9ACE3262",
        gy: Some("547EF835C3DAC4FD97F8461A14611DC9C27745132DED8E545C1D54C72F046997"),
        endo: None,
        precompute: false,
    },
    hash: HashAlgorithm::Sha256,
};

/// brainpoolP384r1 (RFC 5639 section 3.6)
pub const BRAINPOOL_P384R1: Preset = Preset {
    params: CurveParams {
        name: "brainpoolP384r1",
        model: ModelParams::ShortWeierstrass {
            a: "7BC382C6 3D8C150C 3C72080A CE05AFA0 C2BEA28E 4FB22787 139165EF BA91F90F
                8AA5814A 503AD4EB 04A8C7DD 22CE2826",
            b: "04A8C7DD 22CE2826 8B39B554 16F0447C 2FB77DE1 07DCD2A6 2E880EA5 3EEB62D5
                7CB43902 95DBC994 3AB78696 FA504C11",
        },
        p: "8CB91E82 A3386D28 0F5D6F7E 50E641DF 152F7109 ED5456B4 12B1DA19 7FB71123
            ACD3A729 901D1A71 87470013 3107EC53",
        n: "8CB91E82 A3386D28 0F5D6F7E 50E641DF 152F7109 ED5456B3 1F166E6C AC0425A7
            CF3AB6AF 6B7FC310 3B883202 E9046565",
        h: "1",
        gx: "1D1C64F068CF45FFA2A63A81B7C13F6B8847A3E77EF14FE3DB7FCAFE0CBD10
             E8E826E03436D646AAEF87B2E247D4AF1E",
        gy: Some(
            "8ABE1D7520F9C2A45CB1EB8E95CFD55262B70B29FEEC5864E19C054FF99129
             280E4646217791811142820341263C5315",
        ),
        endo: None,
        precompute: false,
    },
    hash: HashAlgorithm::Sha384,
};

/// brainpoolP512r1 (RFC 5639 section 3.7)
pub const BRAINPOOL_P512R1: Preset = Preset {
    params: CurveParams {
        name: "brainpoolP512r1",
        model: ModelParams::ShortWeierstrass {
            a: "7830A331 8B603B89 E2327145 AC234CC5 94CBDD8D 3DF91610 A83441CA EA9863BC
                2DED5D5A A8253AA1 0A2EF1C9 8B9AC8B5 7F1117A7 2BF2C7B9 E7C1AC4D 77FC94CA",
            b: "3DF91610 A83441CA EA9863BC 2DED5D5A A8253AA1 0A2EF1C9 8B9AC8B5 7F1117A7
                2BF2C7B9 E7C1AC4D 77FC94CA DC083E67 984050B7 5EBAE5DD 2809BD63 8016F723",
        },
        p: "AADD9DB8 DBE9C48B 3FD4E6AE 33C9FC07 CB308DB3 B3C9D20E D6639CCA 70330871
            7D4D9B00 9BC66842 AECDA12A E6A380E6 2881FF2F 2D82C685 28AA6056 583A48F3",
        n: "AADD9DB8 DBE9C48B 3FD4E6AE 33C9FC07 CB308DB3 B3C9D20E D6639CCA 70330870
            553E5C41 4CA92619 41866119 7FAC1047 1DB1D381 085DDADD B5879682 9CA90069",
        h: "1",
        gx: "81AEE4BDD82ED9645A21322E9C4C6A9385ED9F70B5D916C1B43B62EEF4D009
             8EFF3B1F78E2D0D48D50D1687B93B97D5F7C6D5047406A5E688B352209BCB9F822",
        gy: Some(
            "7DDE385D566332ECC0EABFA9CF7822FDF209F70024A57B1AA000C55B881F81
             11B2DCDE494A5F485E5BCA4BD88A2763AED1CA2B2FA8F0540678CD1E0F3AD80892",
        ),
        endo: None,
        precompute: false,
    },
    hash: HashAlgorithm::Sha512,
};

/// secp256k1, with its GLV endomorphism.
pub const SECP256K1: Preset = Preset {
    params: CurveParams {
        name: "secp256k1",
        model: ModelParams::ShortWeierstrass { a: "0", b: "7" },
        p: "ffffffff ffffffff ffffffff ffffffff ffffffff ffffffff fffffffe fffffc2f",
        n: "ffffffff ffffffff ffffffff fffffffe baaedce6 af48a03b bfd25e8c d0364141",
        h: "1",
        gx: "79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
        gy: Some("483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"),
        endo: Some(EndoParams {
            beta: "7ae96a2b657c07106e64479eac3434e99cf0497512f58995c1396c28719501ee",
            lambda: "5363ad4cc05c30e0a5261c028812645a122e22ea20816678df02967c1b23bd72",
            basis: [
                ("3086d221a7d46bcde86c90e49284eb15", "-e4437ed6010e88286f547fa90abfe4c3"),
                ("114ca50f7a8e2f3f657c1108d9d44cfd8", "3086d221a7d46bcde86c90e49284eb15"),
            ],
        }),
        precompute: true,
    },
    hash: HashAlgorithm::Sha256,
};

/// Every preset.
pub const PRESETS: &[Preset] = &[
    P192,
    P224,
    P256,
    P384,
    P521,
    CURVE25519,
    ED25519,
    BRAINPOOL_P256R1,
    BRAINPOOL_P384R1,
    BRAINPOOL_P512R1,
    SECP256K1,
];

/// Look up a preset by name.
pub fn preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.params.name == name)
}

/// Build a preset curve by name.
pub fn curve(name: &str) -> Result<Curve> {
    let preset = preset(name).ok_or(Error::UnknownCurve)?;
    Curve::new(&preset.params)
}

/// Curves by name.
///
/// A registry is an ordinary value: build one, load the curves an application
/// needs, then share it (or the [`Curve`] handles it returns).
#[derive(Clone, Debug, Default)]
pub struct Registry {
    curves: BTreeMap<String, Curve>,
}

impl Registry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every preset.
    pub fn with_presets() -> Result<Self> {
        let mut registry = Self::new();
        for preset in PRESETS {
            registry.load(&preset.params)?;
        }
        Ok(registry)
    }

    /// Build a curve and register it under its name, replacing any curve
    /// already registered under that name.
    pub fn load(&mut self, params: &CurveParams) -> Result<Curve> {
        let curve = Curve::new(params)?;
        log::debug!("registered curve {}", params.name);
        self.insert(params.name, curve.clone());
        Ok(curve)
    }

    /// Register an already built curve.
    pub fn insert(&mut self, name: &str, curve: Curve) {
        self.curves.insert(name.to_string(), curve);
    }

    /// Curve registered under `name`.
    pub fn get(&self, name: &str) -> Result<Curve> {
        self.curves.get(name).cloned().ok_or(Error::UnknownCurve)
    }

    /// Registered names, in order.
    pub fn names(&self) -> Vec<&str> {
        self.curves.keys().map(String::as_str).collect()
    }
}
