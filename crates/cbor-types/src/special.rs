/// Payload of a major-type-7 item: simple values and floats.
///
/// ```text
/// ┌──────────┬─────────────────────────────┐
/// │ Info     │ Meaning                     │
/// ├──────────┼─────────────────────────────┤
/// │ 0..=19   │ Simple(n)                   │
/// │ 20       │ False                       │
/// │ 21       │ True                        │
/// │ 22       │ Null                        │
/// │ 23       │ Undefined                   │
/// │ 24       │ Simple(next byte, >= 32)    │
/// │ 25       │ Half    (16-bit pattern)    │
/// │ 26       │ Single  (f32)               │
/// │ 27       │ Double  (f64)               │
/// │ 31       │ break (never a Special)     │
/// └──────────┴─────────────────────────────┘
/// ```
///
/// Half-precision values keep their raw bit pattern: the diagnostic
/// form prints the pattern, and [`Special::to_f64`] widens on demand.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Special {
  False,
  True,
  Null,
  Undefined,
  Simple(u8),
  Half(u16),
  Single(f32),
  Double(f64),
}

impl Special {
  /// The boolean value, if this is `True` or `False`.
  #[must_use]
  pub fn as_bool(self) -> Option<bool> {
    match self {
      Self::False => Some(false),
      Self::True => Some(true),
      _ => None,
    }
  }

  /// Numeric value of any of the three float widths.
  #[must_use]
  pub fn to_f64(self) -> Option<f64> {
    match self {
      Self::Half(bits) => Some(half_to_f64(bits)),
      Self::Single(v) => Some(f64::from(v)),
      Self::Double(v) => Some(v),
      _ => None,
    }
  }

  #[must_use]
  pub fn is_float(self) -> bool {
    matches!(self, Self::Half(_) | Self::Single(_) | Self::Double(_))
  }
}

/// Widen an IEEE 754 binary16 bit pattern.
///
/// Subnormals are `mantissa * 2^-24`; exponent 31 is infinity or NaN.
#[must_use]
pub fn half_to_f64(bits: u16) -> f64 {
  let exp = (bits >> 10) & 0x1F;
  let mant = f64::from(bits & 0x3FF);
  let value = match exp {
    0 => mant * 2f64.powi(-24),
    31 if mant == 0.0 => f64::INFINITY,
    31 => f64::NAN,
    _ => (mant + 1024.0) * 2f64.powi(i32::from(exp) - 25),
  };
  if bits & 0x8000 == 0 { value } else { -value }
}
