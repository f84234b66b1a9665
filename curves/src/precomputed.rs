//! Tables of precomputed multiples of a base point.
//!
//! A [`Precomputed`] table is built once and never modified: the generator of
//! a curve gets its table while the curve is constructed, and
//! [`AffinePoint::precompute`](crate::AffinePoint::precompute) returns a new
//! point owning a new table.
//!
//! [`PrecomputedTable`] is the hex-string form used to import or export a
//! table, e.g. from JSON when the `serde` feature is enabled:
//!
//! ```json
//! {
//!   "doubles": { "step": 4, "points": [["79be...", "483a..."], ...] },
//!   "naf": { "wnd": 8, "points": [["79be...", "483a..."], ...] }
//! }
//! ```
//!
//! Both point lists start with the base point itself.

use crate::{Error, Result};
use alloc::{string::String, sync::Arc, vec::Vec};
use bignum::{BigInt, MontyForm, MontyParams};

/// Normalized `(x, y)` coordinates of a table entry, in Montgomery form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffineCoords {
    pub(crate) x: MontyForm,
    pub(crate) y: MontyForm,
}

impl AffineCoords {
    pub(crate) fn negate(&self) -> Self {
        Self {
            x: self.x.clone(),
            y: -&self.y,
        }
    }

    /// Image under `φ(x, y) = (βx, y)`.
    pub(crate) fn endo(&self, beta: &MontyForm) -> Self {
        Self {
            x: &self.x * beta,
            y: self.y.clone(),
        }
    }

    fn to_hex(&self, width: usize) -> [String; 2] {
        [
            self.x.retrieve().to_hex_padded(width),
            self.y.retrieve().to_hex_padded(width),
        ]
    }

    fn from_hex(pair: &[String; 2], field: &Arc<MontyParams>) -> Result<Self> {
        let coordinate = |hex: &str| -> Result<MontyForm> {
            let value = BigInt::from_hex(hex)?;
            if value.is_negative() || &value >= field.modulus() {
                return Err(Error::InvalidPoint);
            }
            Ok(MontyForm::new(&value, field))
        };

        Ok(Self {
            x: coordinate(&pair[0])?,
            y: coordinate(&pair[1])?,
        })
    }
}

/// Doubling chain `P, 2^step P, 2^(2 step) P, ...`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Doubles {
    pub(crate) step: usize,
    pub(crate) points: Vec<AffineCoords>,
}

impl Doubles {
    /// Number of doublings between consecutive entries.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Is the chain empty?
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Odd multiples `P, 3P, ..., (2^(wnd-1) - 1)P`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NafWindow {
    pub(crate) wnd: usize,
    pub(crate) points: Vec<AffineCoords>,
}

impl NafWindow {
    /// NAF width these multiples serve.
    pub fn wnd(&self) -> usize {
        self.wnd
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Is the window empty?
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Immutable table of multiples of a base point.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Precomputed {
    pub(crate) doubles: Option<Doubles>,
    pub(crate) naf: Option<NafWindow>,
}

impl Precomputed {
    /// Cached doubling chain, if any.
    pub fn doubles(&self) -> Option<&Doubles> {
        self.doubles.as_ref()
    }

    /// Cached odd multiples, if any.
    pub fn naf(&self) -> Option<&NafWindow> {
        self.naf.as_ref()
    }

    /// The same table for the negated base point.
    pub(crate) fn negate(&self) -> Self {
        Self {
            doubles: self.doubles.as_ref().map(|doubles| Doubles {
                step: doubles.step,
                points: doubles.points.iter().map(AffineCoords::negate).collect(),
            }),
            naf: self.naf.as_ref().map(|naf| NafWindow {
                wnd: naf.wnd,
                points: naf.points.iter().map(AffineCoords::negate).collect(),
            }),
        }
    }

    /// Every cached entry.
    pub(crate) fn entries(&self) -> impl Iterator<Item = &AffineCoords> {
        let doubles = self.doubles.iter().flat_map(|doubles| doubles.points.iter());
        let naf = self.naf.iter().flat_map(|naf| naf.points.iter());
        doubles.chain(naf)
    }

    /// Export as hex strings, zero-padded to the field size.
    pub fn to_table(&self) -> PrecomputedTable {
        let width = self
            .entries()
            .next()
            .map(|entry| entry.x.params().modulus().byte_length() * 2)
            .unwrap_or(0);

        PrecomputedTable {
            doubles: self.doubles.as_ref().map(|doubles| DoublesTable {
                step: doubles.step,
                points: doubles.points.iter().map(|p| p.to_hex(width)).collect(),
            }),
            naf: self.naf.as_ref().map(|naf| NafTable {
                wnd: naf.wnd,
                points: naf.points.iter().map(|p| p.to_hex(width)).collect(),
            }),
        }
    }

    /// Parse coordinates. Callers must still check the points against the
    /// curve.
    pub(crate) fn from_table(table: &PrecomputedTable, field: &Arc<MontyParams>) -> Result<Self> {
        let parse = |points: &[[String; 2]]| -> Result<Vec<AffineCoords>> {
            if points.is_empty() {
                return Err(Error::InvalidParameter);
            }
            points
                .iter()
                .map(|pair| AffineCoords::from_hex(pair, field))
                .collect()
        };

        let doubles = match &table.doubles {
            Some(doubles) if doubles.step == 0 => return Err(Error::InvalidParameter),
            Some(doubles) => Some(Doubles {
                step: doubles.step,
                points: parse(&doubles.points)?,
            }),
            None => None,
        };

        let naf = match &table.naf {
            Some(naf) if !(2..=16).contains(&naf.wnd) => return Err(Error::InvalidParameter),
            Some(naf) if naf.points.len() != 1 << (naf.wnd - 2) => {
                return Err(Error::InvalidParameter);
            }
            Some(naf) => Some(NafWindow {
                wnd: naf.wnd,
                points: parse(&naf.points)?,
            }),
            None => None,
        };

        Ok(Self { doubles, naf })
    }
}

/// Hex form of a [`Precomputed`] table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrecomputedTable {
    /// Doubling chain.
    pub doubles: Option<DoublesTable>,

    /// Odd multiples.
    pub naf: Option<NafTable>,
}

/// Hex form of [`Doubles`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoublesTable {
    /// Doublings between consecutive entries.
    pub step: usize,

    /// `[x, y]` hex pairs.
    pub points: Vec<[String; 2]>,
}

/// Hex form of [`NafWindow`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NafTable {
    /// NAF width.
    pub wnd: usize,

    /// `[x, y]` hex pairs.
    pub points: Vec<[String; 2]>,
}
