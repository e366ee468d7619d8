use cbor_wire::{Argument, ArgumentWidth, Header, MajorType};

use crate::error::TypeError;
use crate::length::Length;
use crate::negative::NegativeInt;
use crate::special::Special;

/// What sits at the cursor right now: one variant per major type.
///
/// An `Item` is decoded from a single [`Header`] and never owns string
/// bytes or children. Strings and containers only carry their
/// [`Length`]; their contents are pulled separately through the item
/// cursor. Tags carry the tag number; the wrapped item follows in the
/// stream.
///
/// Matching on `Item` is exhaustive, so a renderer that forgets a major
/// type does not compile.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Item {
  Unsigned(u64),
  Negative(NegativeInt),
  ByteString(Length),
  TextString(Length),
  Array(Length),
  /// Length counts key/value pairs, not items.
  Map(Length),
  Tag(u64),
  Special(Special),
}

impl Item {
  /// Interpret a decoded header.
  ///
  /// # Errors
  ///
  /// - [`TypeError::UnexpectedBreak`] if the header is the break code.
  /// - [`TypeError::IllegalSimpleValue`] for `0xF8` followed by a byte
  ///   below 32.
  pub fn from_header(header: &Header) -> Result<Self, TypeError> {
    let length = || match header.argument {
      Argument::Value(n, _) => Length::Definite(n),
      Argument::Indefinite => Length::Indefinite,
    };

    let item = match header.major {
      MajorType::ByteString => Self::ByteString(length()),
      MajorType::TextString => Self::TextString(length()),
      MajorType::Array => Self::Array(length()),
      MajorType::Map => Self::Map(length()),
      MajorType::UnsignedInteger => Self::Unsigned(definite(header)),
      MajorType::NegativeInteger => Self::Negative(NegativeInt::from_wire(definite(header))),
      MajorType::Tag => Self::Tag(definite(header)),
      MajorType::SimpleOrFloat => Self::Special(special(header)?),
    };
    Ok(item)
  }

  #[must_use]
  pub fn major_type(&self) -> MajorType {
    match self {
      Self::Unsigned(_) => MajorType::UnsignedInteger,
      Self::Negative(_) => MajorType::NegativeInteger,
      Self::ByteString(_) => MajorType::ByteString,
      Self::TextString(_) => MajorType::TextString,
      Self::Array(_) => MajorType::Array,
      Self::Map(_) => MajorType::Map,
      Self::Tag(_) => MajorType::Tag,
      Self::Special(_) => MajorType::SimpleOrFloat,
    }
  }

  /// Arrays and maps.
  #[must_use]
  pub fn is_container(&self) -> bool {
    matches!(self, Self::Array(_) | Self::Map(_))
  }

  /// `false` only for indefinite-length strings and containers.
  #[must_use]
  pub fn is_length_known(&self) -> bool {
    match self {
      Self::ByteString(len) | Self::TextString(len) | Self::Array(len) | Self::Map(len) => {
        len.is_known()
      }
      _ => true,
    }
  }

  #[must_use]
  pub fn is_string(&self) -> bool {
    matches!(self, Self::ByteString(_) | Self::TextString(_))
  }
}

/// Integers and tags never reach here with an indefinite argument; the
/// header decoder rejects that combination.
fn definite(header: &Header) -> u64 {
  header.value().unwrap_or_default()
}

fn special(header: &Header) -> Result<Special, TypeError> {
  let Argument::Value(value, width) = header.argument else {
    return Err(TypeError::UnexpectedBreak { offset: header.offset });
  };

  // Argument values are bounded by their width, so the narrowing casts
  // below are lossless.
  #[allow(clippy::cast_possible_truncation)]
  let special = match (width, value) {
    (ArgumentWidth::Immediate, 20) => Special::False,
    (ArgumentWidth::Immediate, 21) => Special::True,
    (ArgumentWidth::Immediate, 22) => Special::Null,
    (ArgumentWidth::Immediate, 23) => Special::Undefined,
    (ArgumentWidth::Immediate, v) => Special::Simple(v as u8),
    (ArgumentWidth::One, v) if v < 32 => {
      return Err(TypeError::IllegalSimpleValue {
        offset: header.offset,
        value: v as u8,
      });
    }
    (ArgumentWidth::One, v) => Special::Simple(v as u8),
    (ArgumentWidth::Two, v) => Special::Half(v as u16),
    (ArgumentWidth::Four, v) => Special::Single(f32::from_bits(v as u32)),
    (ArgumentWidth::Eight, v) => Special::Double(f64::from_bits(v)),
  };
  Ok(special)
}

#[cfg(test)]
mod tests {
  use super::*;
  use cbor_wire::ByteCursor;

  fn item(bytes: &[u8]) -> Result<Item, TypeError> {
    let header = Header::read_from(&mut ByteCursor::new(bytes))?;
    Item::from_header(&header)
  }

  #[test]
  fn integers() {
    assert_eq!(item(&[0x0A]).unwrap(), Item::Unsigned(10));
    assert_eq!(
      item(&[0x38, 0xFF]).unwrap(),
      Item::Negative(NegativeInt::from_wire(255))
    );
  }

  #[test]
  fn strings_and_containers() {
    assert_eq!(item(&[0x45]).unwrap(), Item::ByteString(Length::Definite(5)));
    assert_eq!(item(&[0x7F]).unwrap(), Item::TextString(Length::Indefinite));
    assert_eq!(item(&[0x80]).unwrap(), Item::Array(Length::Definite(0)));
    assert_eq!(item(&[0xBF]).unwrap(), Item::Map(Length::Indefinite));
    assert!(item(&[0x9F]).unwrap().is_container());
    assert!(!item(&[0x9F]).unwrap().is_length_known());
    assert!(item(&[0x00]).unwrap().is_length_known());
    assert!(item(&[0x45]).unwrap().is_string());
    assert!(item(&[0x7F]).unwrap().is_string());
    assert!(!item(&[0x80]).unwrap().is_string());
    assert!(!item(&[0x0A]).unwrap().is_string());
  }

  #[test]
  fn tag_number() {
    assert_eq!(item(&[0xC1]).unwrap(), Item::Tag(1));
    assert_eq!(item(&[0xD9, 0xD9, 0xF7]).unwrap(), Item::Tag(55_799));
  }

  #[test]
  fn specials() {
    assert_eq!(item(&[0xF4]).unwrap(), Item::Special(Special::False));
    assert_eq!(item(&[0xF5]).unwrap(), Item::Special(Special::True));
    assert_eq!(item(&[0xF6]).unwrap(), Item::Special(Special::Null));
    assert_eq!(item(&[0xF7]).unwrap(), Item::Special(Special::Undefined));
    assert_eq!(item(&[0xF0]).unwrap(), Item::Special(Special::Simple(16)));
    assert_eq!(item(&[0xF8, 0xFF]).unwrap(), Item::Special(Special::Simple(255)));
    assert_eq!(item(&[0xF9, 0x3C, 0x00]).unwrap(), Item::Special(Special::Half(0x3C00)));
    assert_eq!(
      item(&[0xFA, 0x3F, 0xC0, 0x00, 0x00]).unwrap(),
      Item::Special(Special::Single(1.5))
    );
    assert_eq!(
      item(&[0xFB, 0x3F, 0xF1, 0x99, 0x99, 0x99, 0x99, 0x99, 0x9A]).unwrap(),
      Item::Special(Special::Double(1.1))
    );
  }

  #[test]
  fn low_two_byte_simple_rejected() {
    assert!(matches!(
      item(&[0xF8, 0x14]),
      Err(TypeError::IllegalSimpleValue { offset: 0, value: 20 })
    ));
  }

  #[test]
  fn break_is_not_an_item() {
    assert!(matches!(item(&[0xFF]), Err(TypeError::UnexpectedBreak { offset: 0 })));
  }
}
