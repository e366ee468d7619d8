/// Length of a string or container: declared up front, or terminated by
/// a break code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Length {
  /// Byte count for strings, item count for arrays, pair count for maps.
  Definite(u64),
  Indefinite,
}

impl Length {
  #[must_use]
  pub fn is_known(self) -> bool {
    matches!(self, Self::Definite(_))
  }

  #[must_use]
  pub fn definite(self) -> Option<u64> {
    match self {
      Self::Definite(n) => Some(n),
      Self::Indefinite => None,
    }
  }
}
