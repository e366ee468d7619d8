use std::fmt::Write as _;

use cbor_types::Special;

/// Append the diagnostic form of a simple value or float.
///
/// ```text
/// ┌───────────────┬────────────────────────────────┐
/// │ Special       │ Output                         │
/// ├───────────────┼────────────────────────────────┤
/// │ False / True  │ false / true                   │
/// │ Null          │ null                           │
/// │ Undefined     │ undefined                      │
/// │ Simple(n)     │ simple(n)                      │
/// │ Half(bits)    │ __f16(hhhh)  raw bit pattern   │
/// │ Single(v)     │ 1.5f                           │
/// │ Double(v)     │ 1.5                            │
/// └───────────────┴────────────────────────────────┘
/// ```
///
/// Finite floats use the shortest text that reads back to the same
/// value, so `1.0` stays `1.0` and `0.1f32` is `0.1f`, not its widened
/// double expansion. Non-finite values are `Infinity`, `-Infinity` and
/// `NaN`.
pub fn write_special(out: &mut String, special: Special) {
    match special {
        Special::False => out.push_str("false"),
        Special::True => out.push_str("true"),
        Special::Null => out.push_str("null"),
        Special::Undefined => out.push_str("undefined"),
        Special::Simple(code) => {
            let _ = write!(out, "simple({code})");
        }
        Special::Half(bits) => {
            let _ = write!(out, "__f16({bits:04x})");
        }
        Special::Single(v) => {
            if v.is_finite() {
                let _ = write!(out, "{v:?}");
            } else {
                out.push_str(non_finite(v.is_nan(), v.is_sign_negative()));
            }
            out.push('f');
        }
        Special::Double(v) => {
            if v.is_finite() {
                let _ = write!(out, "{v:?}");
            } else {
                out.push_str(non_finite(v.is_nan(), v.is_sign_negative()));
            }
        }
    }
}

fn non_finite(nan: bool, negative: bool) -> &'static str {
    match (nan, negative) {
        (true, _) => "NaN",
        (false, false) => "Infinity",
        (false, true) => "-Infinity",
    }
}
