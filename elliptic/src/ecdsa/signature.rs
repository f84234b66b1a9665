//! ECDSA signatures and their ASN.1 DER encoding.

use crate::{Error, Result};
use alloc::vec::Vec;
use bignum::BigInt;
use der::{
    Decode, DecodeValue, Encode, EncodeValue, Header, Length, Reader, Sequence, Writer,
    asn1::UintRef,
};

/// ECDSA signature `(r, s)`, with the recovery id when it was produced by
/// signing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signature {
    r: BigInt,
    s: BigInt,
    recovery_id: Option<u8>,
}

impl Signature {
    /// Signature from its components.
    pub fn new(r: BigInt, s: BigInt) -> Self {
        Self {
            r,
            s,
            recovery_id: None,
        }
    }

    /// Attach a recovery id, see
    /// [`Ecdsa::recover_public_key`](super::Ecdsa::recover_public_key).
    pub fn with_recovery_id(mut self, recovery_id: u8) -> Self {
        self.recovery_id = Some(recovery_id);
        self
    }

    /// `r`
    pub fn r(&self) -> &BigInt {
        &self.r
    }

    /// `s`
    pub fn s(&self) -> &BigInt {
        &self.s
    }

    /// Recovery id, if known.
    pub fn recovery_id(&self) -> Option<u8> {
        self.recovery_id
    }

    /// Parse `SEQUENCE { INTEGER r, INTEGER s }`.
    ///
    /// Wrong tags or lengths, trailing bytes, negative values and
    /// non-minimal integers all fail with [`Error::InvalidSignature`].
    pub fn from_der(bytes: &[u8]) -> Result<Self> {
        let SignatureRef { r, s } = SignatureRef::from_der(bytes).map_err(|_| Error::InvalidSignature)?;
        Ok(Self::new(
            BigInt::from_be_bytes(r.as_bytes()),
            BigInt::from_be_bytes(s.as_bytes()),
        ))
    }

    /// Encode as `SEQUENCE { INTEGER r, INTEGER s }`.
    pub fn to_der(&self) -> Result<Vec<u8>> {
        if self.r.is_negative() || self.s.is_negative() {
            return Err(Error::InvalidSignature);
        }

        let (r, s) = (uint_bytes(&self.r), uint_bytes(&self.s));
        let sig = SignatureRef {
            r: UintRef::new(&r).map_err(|_| Error::InvalidSignature)?,
            s: UintRef::new(&s).map_err(|_| Error::InvalidSignature)?,
        };
        sig.to_der().map_err(|_| Error::InvalidSignature)
    }
}

/// Big-endian magnitude, with zero as a single byte.
fn uint_bytes(value: &BigInt) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    if bytes.is_empty() { alloc::vec![0] } else { bytes }
}

struct SignatureRef<'a> {
    r: UintRef<'a>,
    s: UintRef<'a>,
}

impl EncodeValue for SignatureRef<'_> {
    fn value_len(&self) -> der::Result<Length> {
        self.r.encoded_len()? + self.s.encoded_len()?
    }

    fn encode_value(&self, encoder: &mut impl Writer) -> der::Result<()> {
        self.r.encode(encoder)?;
        self.s.encode(encoder)?;
        Ok(())
    }
}

impl<'a> DecodeValue<'a> for SignatureRef<'a> {
    fn decode_value<R: Reader<'a>>(reader: &mut R, header: Header) -> der::Result<Self> {
        reader.read_nested(header.length, |reader| {
            Ok(Self {
                r: UintRef::decode(reader)?,
                s: UintRef::decode(reader)?,
            })
        })
    }
}

impl<'a> Sequence<'a> for SignatureRef<'a> {}

#[cfg(test)]
mod tests {
    use super::Signature;
    use crate::Error;
    use bignum::BigInt;
    use hex_literal::hex;

    #[test]
    fn der_round_trip() {
        let sig = Signature::new(BigInt::from(0x80u32), BigInt::from(0x7fu32));
        let der = sig.to_der().unwrap();
        // 0x80 needs a sign byte, 0x7f does not.
        assert_eq!(der, hex!("3007020200800201 7f"));
        assert_eq!(Signature::from_der(&der).unwrap(), sig);

        let zero = Signature::new(BigInt::zero(), BigInt::one());
        assert_eq!(zero.to_der().unwrap(), hex!("3006020100020101"));
    }

    #[test]
    fn rejects_malformed_der() {
        for der in [
            // Trailing byte.
            &hex!("30060201010201 0100")[..],
            // Non-minimal r.
            &hex!("300702020001020101")[..],
            // Negative r.
            &hex!("3006020181020101")[..],
            // Wrong outer tag.
            &hex!("3106020101020101")[..],
            // Outer length too short.
            &hex!("3005020101020101")[..],
            &[][..],
        ] {
            assert_eq!(Signature::from_der(der).unwrap_err(), Error::InvalidSignature);
        }
    }
}
