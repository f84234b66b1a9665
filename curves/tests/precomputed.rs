//! Precomputed tables and the curve registry.

use curves::{
    Curve, CurveParams, Error, PrecomputedTable, Registry,
    bignum::BigInt,
    presets::{self, ED25519, SECP256K1},
};

fn int(hex: &str) -> BigInt {
    BigInt::from_hex(hex).unwrap()
}

fn without_table(params: CurveParams) -> Curve {
    Curve::new(&CurveParams {
        precompute: false,
        ..params
    })
    .unwrap()
}

fn generator_table(curve: &Curve) -> PrecomputedTable {
    let table = match curve {
        Curve::ShortWeierstrass(curve) => curve.precomputed(),
        Curve::TwistedEdwards(curve) => curve.precomputed(),
        Curve::Montgomery(_) => None,
    };
    table.unwrap().to_table()
}

#[test]
fn generator_tables_are_built() {
    for params in [SECP256K1.params, ED25519.params] {
        let curve = Curve::new(&params).unwrap();
        let table = generator_table(&curve);

        let doubles = table.doubles.as_ref().unwrap();
        assert_eq!(doubles.step, 4);
        assert_eq!(doubles.points.len(), (curve.n().bit_length() + 1).div_ceil(4) + 1);

        let naf = table.naf.as_ref().unwrap();
        assert_eq!(naf.wnd, 8);
        assert_eq!(naf.points.len(), 1 << 6);

        // Both lists start with the generator.
        let g = curve.generator();
        let gx = g.x().unwrap();
        assert_eq!(int(&doubles.points[0][0]), gx);
        assert_eq!(int(&naf.points[0][0]), gx);
    }
}

#[test]
fn imported_table_matches() {
    for params in [SECP256K1.params, ED25519.params] {
        let exported = generator_table(&Curve::new(&params).unwrap());
        let plain = without_table(params);
        assert!(generator_table_is_absent(&plain));

        let imported = plain.with_precomputed(&exported).unwrap();
        assert_eq!(generator_table(&imported), exported);

        let k = int("6d1229a6b24c2e775c062870ad26bc261051e0198c67203167273c7c62538846");
        assert_eq!(imported.generator().mul(&k), plain.generator().mul(&k));
    }
}

fn generator_table_is_absent(curve: &Curve) -> bool {
    match curve {
        Curve::ShortWeierstrass(curve) => curve.precomputed().is_none(),
        Curve::TwistedEdwards(curve) => curve.precomputed().is_none(),
        Curve::Montgomery(_) => true,
    }
}

#[cfg(feature = "serde")]
#[test]
fn json_round_trip() {
    let curve = presets::curve("secp256k1").unwrap();
    let table = generator_table(&curve);

    let json = serde_json::to_string(&table).unwrap();
    assert!(json.starts_with("{\"doubles\":{\"step\":4,\"points\":[[\"79be667e"));

    let parsed: PrecomputedTable = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, table);
    assert!(without_table(SECP256K1.params).with_precomputed(&parsed).is_ok());
}

#[test]
fn tampered_tables_are_rejected() {
    let curve = without_table(SECP256K1.params);
    let table = generator_table(&Curve::new(&SECP256K1.params).unwrap());

    // Swap two entries: every point is still on the curve, but the chain breaks.
    let mut swapped = table.clone();
    swapped.naf.as_mut().unwrap().points.swap(1, 2);
    assert_eq!(curve.with_precomputed(&swapped).unwrap_err(), Error::InvalidParameter);

    // Off the curve.
    let mut moved = table.clone();
    moved.doubles.as_mut().unwrap().points[3][1] = "1".into();
    assert_eq!(curve.with_precomputed(&moved).unwrap_err(), Error::InvalidParameter);

    // Not a field element.
    let mut wide = table.clone();
    wide.doubles.as_mut().unwrap().points[3][1] = "1".repeat(65);
    assert_eq!(curve.with_precomputed(&wide).unwrap_err(), Error::InvalidPoint);

    // Wrong window length.
    let mut short = table.clone();
    short.naf.as_mut().unwrap().points.pop();
    assert_eq!(curve.with_precomputed(&short).unwrap_err(), Error::InvalidParameter);

    // Another base point.
    let other = curve.generator().double().precompute(257).unwrap();
    let other = other.to_affine_point().unwrap().precomputed().unwrap().to_table();
    assert_eq!(curve.with_precomputed(&other).unwrap_err(), Error::InvalidParameter);

    let x25519 = presets::curve("curve25519").unwrap();
    assert_eq!(x25519.with_precomputed(&table).unwrap_err(), Error::InvalidParameter);
}

#[test]
fn registry() {
    let mut registry = Registry::new();
    assert_eq!(registry.get("secp256k1").unwrap_err(), Error::UnknownCurve);

    let curve = registry.load(&SECP256K1.params).unwrap();
    assert_eq!(registry.get("secp256k1").unwrap(), curve);
    assert_eq!(registry.names(), ["secp256k1"]);

    registry.insert("bitcoin", curve.clone());
    assert_eq!(registry.names(), ["bitcoin", "secp256k1"]);
    assert_eq!(registry.get("bitcoin").unwrap(), curve);

    let all = Registry::with_presets().unwrap();
    for name in [
        "p192",
        "p224",
        "p256",
        "p384",
        "p521",
        "curve25519",
        "ed25519",
        "brainpoolP256r1",
        "brainpoolP384r1",
        "brainpoolP512r1",
        "secp256k1",
    ] {
        assert_eq!(all.get(name).unwrap().name(), name);
    }
    assert_eq!(presets::curve("secp255k1").unwrap_err(), Error::UnknownCurve);
}

#[test]
fn invalid_parameters() {
    // Generator off the curve.
    let bad = CurveParams {
        gy: Some("1"),
        ..presets::P256.params
    };
    assert!(Curve::new(&bad).is_err());

    // Wrong order.
    let bad = CurveParams {
        n: "ffffffff 00000000 ffffffff ffffffff bce6faad a7179e84 f3b9cac2 fc632553",
        ..presets::P256.params
    };
    assert_eq!(Curve::new(&bad).unwrap_err(), Error::InvalidParameter);

    // Not hex.
    let bad = CurveParams {
        p: "not a number",
        ..presets::P256.params
    };
    assert_eq!(Curve::new(&bad).unwrap_err(), Error::InvalidParameter);
}
