use std::fmt;

/// A negative integer as carried on the wire.
///
/// Major type 1 encodes the logical value `-1 - v` where `v` is an
/// unsigned 64-bit argument. The full range is therefore
/// `-1 ..= -2^64`, one unit wider than `i64` at the bottom:
///
/// ```text
///   v = 0                      →  -1
///   v = 0x7FFF_FFFF_FFFF_FFFF  →  -9223372036854775808  (i64::MIN)
///   v = 0xFFFF_FFFF_FFFF_FFFF  →  -18446744073709551616 (needs i128)
/// ```
///
/// The raw `v` is kept so nothing is lost; conversions widen instead of
/// wrapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NegativeInt(u64);

impl NegativeInt {
  /// Wrap the raw wire argument `v`.
  #[must_use]
  pub fn from_wire(v: u64) -> Self {
    Self(v)
  }

  /// The raw wire argument `v`.
  #[must_use]
  pub fn wire_value(self) -> u64 {
    self.0
  }

  /// The magnitude of the logical value, `v + 1`. Always fits `u128`.
  #[must_use]
  pub fn magnitude(self) -> u128 {
    u128::from(self.0) + 1
  }

  /// The exact logical value.
  #[must_use]
  pub fn to_i128(self) -> i128 {
    -1 - i128::from(self.0)
  }

  /// The logical value if it fits in `i64`.
  #[must_use]
  pub fn to_i64(self) -> Option<i64> {
    i64::try_from(self.to_i128()).ok()
  }
}

impl fmt::Display for NegativeInt {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "-{}", self.magnitude())
  }
}
