//! SEC1 point encoding.
//!
//! <https://www.secg.org/sec1-v2.pdf> section 2.3.3, plus the hybrid form of
//! X9.62.

use super::{AffinePoint, WeierstrassCurve};
use crate::{Error, Result, curve::be_bytes};
use alloc::{sync::Arc, vec, vec::Vec};
use bignum::BigInt;

/// SEC1 tag for the point at infinity.
const IDENTITY_TAG: u8 = 0x00;

/// SEC1 encoding format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointFormat {
    /// `04 || X || Y`
    #[default]
    Uncompressed,

    /// `02 || X` or `03 || X`, by the parity of `y`.
    Compressed,

    /// `06 || X || Y` or `07 || X || Y`, by the parity of `y`.
    Hybrid,
}

impl PointFormat {
    fn tag(self, odd: bool) -> u8 {
        let base = match self {
            PointFormat::Uncompressed => return 0x04,
            PointFormat::Compressed => 0x02,
            PointFormat::Hybrid => 0x06,
        };
        base | odd as u8
    }
}

impl AffinePoint {
    /// Encode as SEC1. The identity is the single byte `00`.
    pub fn to_sec1(&self, format: PointFormat) -> Vec<u8> {
        if self.infinity {
            return vec![IDENTITY_TAG];
        }

        let len = self.curve.domain.field_bytes();
        let y = self.y.retrieve();

        let mut out = Vec::with_capacity(1 + 2 * len);
        out.push(format.tag(y.is_odd()));
        out.extend_from_slice(&be_bytes(&self.x.retrieve(), len));
        if format != PointFormat::Compressed {
            out.extend_from_slice(&be_bytes(&y, len));
        }
        out
    }
}

impl WeierstrassCurve {
    /// Decode a SEC1 point.
    ///
    /// Unknown tags and lengths fail with [`Error::Encoding`], as does a
    /// hybrid tag whose parity disagrees with `y`. Coordinates which are not
    /// field elements or do not lie on the curve fail with
    /// [`Error::InvalidPoint`].
    pub fn decode_point(self: &Arc<Self>, bytes: &[u8]) -> Result<AffinePoint> {
        let len = self.domain.field_bytes();
        let (&tag, body) = bytes.split_first().ok_or(Error::Encoding)?;

        match tag {
            IDENTITY_TAG if body.is_empty() => Ok(AffinePoint::identity(self)),
            0x02 | 0x03 if body.len() == len => {
                self.point_from_x(&BigInt::from_be_bytes(body), tag == 0x03)
            }
            0x04 | 0x06 | 0x07 if body.len() == 2 * len => {
                let (x, y) = body.split_at(len);
                let x = BigInt::from_be_bytes(x);
                let y = BigInt::from_be_bytes(y);
                if tag != 0x04 && y.is_odd() != (tag == 0x07) {
                    return Err(Error::Encoding);
                }
                self.point(&x, &y)
            }
            _ => Err(Error::Encoding),
        }
    }
}
