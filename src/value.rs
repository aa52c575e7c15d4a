use crate::statics;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, de};

/// A JSON number that keeps the integer/float distinction from the source text,
/// so integer fields are never rewritten as `5.0`.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonNumber {
    I64(i64),
    U64(u64),
    F64(f64),
}

impl JsonNumber {
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsonNumber::I64(v) => Some(*v),
            JsonNumber::U64(v) => i64::try_from(*v).ok(),
            JsonNumber::F64(_) => None,
        }
    }

    fn write_python(&self, out: &mut String) {
        match self {
            JsonNumber::I64(v) => out.push_str(&v.to_string()),
            JsonNumber::U64(v) => out.push_str(&v.to_string()),
            JsonNumber::F64(v) => write_python_float(out, *v),
        }
    }
}

/// An order-preserving JSON tree. The parameters document is held in this form
/// so keys the editor does not know about are written back untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Number(JsonNumber),
    String(String),
    Array(Vec<JsonValue>),
    Object(IndexMap<String, JsonValue>),
}

impl JsonValue {
    pub fn as_object(&self) -> Option<&IndexMap<String, JsonValue>> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut IndexMap<String, JsonValue>> {
        match self {
            JsonValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(values) => Some(values),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsonValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object().and_then(|m| m.get(key))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut JsonValue> {
        self.as_object_mut().and_then(|m| m.get_mut(key))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "bool",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Array(_) => "array",
            JsonValue::Object(_) => "object",
        }
    }

    /// Parse a document. Plain JSON is accepted, as are the JSON5 extensions
    /// hand-edited files tend to pick up (comments, trailing commas).
    pub fn parse(text: &str) -> anyhow::Result<JsonValue> {
        Ok(json5::from_str::<JsonValue>(text)?)
    }

    /// Serialize the way Python's `json.dump(value, f, indent=4)` does:
    /// - 4-space indentation
    /// - `,` item separator at line ends and `": "` between key and value
    /// - non-ASCII escaped (ensure_ascii), lowercase hex
    /// - empty containers stay on one line
    /// - no trailing newline
    pub fn to_pretty_json(&self) -> String {
        self.to_pretty_json_with_newline(statics::NL_LF)
    }

    pub fn to_pretty_json_with_newline(&self, newline: &str) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, 0, newline);
        out
    }

    fn write_pretty(&self, out: &mut String, indent: usize, newline: &str) {
        match self {
            JsonValue::Null => out.push_str("null"),
            JsonValue::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
            JsonValue::Number(n) => n.write_python(out),
            JsonValue::String(s) => write_escaped_string_ascii(out, s),
            JsonValue::Array(values) => {
                out.push('[');
                if !values.is_empty() {
                    out.push_str(newline);
                    for (i, v) in values.iter().enumerate() {
                        out.push_str(&" ".repeat(indent + 4));
                        v.write_pretty(out, indent + 4, newline);
                        if i + 1 != values.len() {
                            out.push(',');
                        }
                        out.push_str(newline);
                    }
                    out.push_str(&" ".repeat(indent));
                }
                out.push(']');
            }
            JsonValue::Object(map) => {
                out.push('{');
                if !map.is_empty() {
                    out.push_str(newline);
                    for (i, (k, v)) in map.iter().enumerate() {
                        out.push_str(&" ".repeat(indent + 4));
                        write_escaped_string_ascii(out, k);
                        out.push_str(": ");
                        v.write_pretty(out, indent + 4, newline);
                        if i + 1 != map.len() {
                            out.push(',');
                        }
                        out.push_str(newline);
                    }
                    out.push_str(&" ".repeat(indent));
                }
                out.push('}');
            }
        }
    }
}

/// Python `repr(float)` layout: shortest round-trip digits, fixed notation for
/// decimal exponents in `-4..16`, otherwise `d.ddde+XX` with at least two
/// exponent digits.
fn write_python_float(out: &mut String, v: f64) {
    if v.is_nan() {
        out.push_str("NaN");
        return;
    }
    if v.is_infinite() {
        if v.is_sign_negative() {
            out.push_str("-Infinity");
        } else {
            out.push_str("Infinity");
        }
        return;
    }

    let mut buf = ryu::Buffer::new();
    let formatted = buf.format_finite(v);
    let (negative, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, formatted),
    };

    let (mantissa, exp) = match unsigned.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (unsigned, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let all_digits = format!("{int_part}{frac_part}");
    let without_leading = all_digits.trim_start_matches('0');
    let leading_zeros = all_digits.len() - without_leading.len();
    let digits = without_leading.trim_end_matches('0');

    if digits.is_empty() {
        out.push_str(if negative { "-0.0" } else { "0.0" });
        return;
    }

    // Position of the decimal point, counted from the first significant digit.
    let point = int_part.len() as i32 + exp - leading_zeros as i32;
    let sci_exp = point - 1;

    if negative {
        out.push('-');
    }

    if (-4..16).contains(&sci_exp) {
        if point <= 0 {
            out.push_str("0.");
            out.push_str(&"0".repeat((-point) as usize));
            out.push_str(digits);
        } else if point as usize >= digits.len() {
            out.push_str(digits);
            out.push_str(&"0".repeat(point as usize - digits.len()));
            out.push_str(".0");
        } else {
            let (whole, frac) = digits.split_at(point as usize);
            out.push_str(whole);
            out.push('.');
            out.push_str(frac);
        }
        return;
    }

    let (first, rest) = digits.split_at(1);
    out.push_str(first);
    if !rest.is_empty() {
        out.push('.');
        out.push_str(rest);
    }
    out.push('e');
    out.push(if sci_exp < 0 { '-' } else { '+' });
    let magnitude = sci_exp.unsigned_abs();
    if magnitude < 10 {
        out.push('0');
    }
    out.push_str(&magnitude.to_string());
}

fn write_escaped_string_ascii(out: &mut String, s: &str) {
    use std::fmt::Write as _;

    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            ' '..='~' => out.push(ch),
            c => {
                let cp = c as u32;
                if cp <= 0xFFFF {
                    write!(out, "\\u{:04x}", cp).ok();
                } else {
                    // Encode as UTF-16 surrogate pair.
                    let u = cp - 0x1_0000;
                    let high = 0xD800 + ((u >> 10) & 0x3FF);
                    let low = 0xDC00 + (u & 0x3FF);
                    write!(out, "\\u{:04x}\\u{:04x}", high, low).ok();
                }
            }
        }
    }
    out.push('"');
}

impl<'de> Deserialize<'de> for JsonValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> de::Visitor<'de> for ValueVisitor {
            type Value = JsonValue;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a JSON value")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(JsonValue::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(JsonValue::Null)
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(JsonValue::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(JsonValue::Number(JsonNumber::I64(v)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(JsonValue::Number(JsonNumber::U64(v)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(JsonValue::Number(JsonNumber::F64(v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(JsonValue::String(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(JsonValue::String(v))
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut values = Vec::new();
                while let Some(value) = seq.next_element::<JsonValue>()? {
                    values.push(value);
                }
                Ok(JsonValue::Array(values))
            }

            fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut values = IndexMap::new();
                while let Some((key, value)) = map.next_entry::<String, JsonValue>()? {
                    values.insert(key, value);
                }
                Ok(JsonValue::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::{JsonNumber, JsonValue};
    use crate::statics;
    use indexmap::IndexMap;

    fn float(v: f64) -> String {
        JsonValue::Number(JsonNumber::F64(v)).to_pretty_json()
    }

    #[test]
    fn parse_keeps_integer_and_float_apart() {
        let v = JsonValue::parse(r#"{ "a": 5, "b": 5.0, "c": -3 }"#).unwrap();
        assert_eq!(v.get("a").and_then(JsonValue::as_i64), Some(5));
        assert_eq!(v.get("b").and_then(JsonValue::as_i64), None);
        assert_eq!(v.get("b").map(JsonValue::type_name), Some("number"));
        assert_eq!(v.get("c").and_then(JsonValue::as_i64), Some(-3));
    }

    #[test]
    fn parse_preserves_key_order() {
        let v = JsonValue::parse(r#"{ "z": 1, "a": 2, "m": 3 }"#).unwrap();
        let keys: Vec<&str> = v.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn pretty_json_matches_python_indent_four() {
        let v = JsonValue::parse(r#"{"a": [1, "x"], "b": {}, "c": [], "d": {"e": true}}"#).unwrap();
        let expected = "{\n    \"a\": [\n        1,\n        \"x\"\n    ],\n    \"b\": {},\n    \"c\": [],\n    \"d\": {\n        \"e\": true\n    }\n}";
        assert_eq!(v.to_pretty_json(), expected);
    }

    #[test]
    fn pretty_json_honours_newline() {
        let v = JsonValue::parse(r#"{"a": null}"#).unwrap();
        assert_eq!(
            v.to_pretty_json_with_newline(statics::NL_CRLF),
            "{\r\n    \"a\": null\r\n}"
        );
    }

    #[test]
    fn strings_are_ascii_escaped() {
        let v = JsonValue::String("caf\u{00E9} \"q\"\t\u{7f}".to_string());
        assert_eq!(v.to_pretty_json(), "\"caf\\u00e9 \\\"q\\\"\\t\\u007f\"");

        let v = JsonValue::String("😀".to_string());
        assert_eq!(v.to_pretty_json(), "\"\\ud83d\\ude00\"");
    }

    #[test]
    fn floats_use_python_repr_layout() {
        assert_eq!(float(1.0), "1.0");
        assert_eq!(float(0.5), "0.5");
        assert_eq!(float(-2.25), "-2.25");
        assert_eq!(float(100.0), "100.0");
        assert_eq!(float(0.0001), "0.0001");
        assert_eq!(float(1e-5), "1e-05");
        assert_eq!(float(2.5e-7), "2.5e-07");
        assert_eq!(float(1e16), "1e+16");
        assert_eq!(float(1.5e300), "1.5e+300");
        assert_eq!(float(-0.0), "-0.0");
        assert_eq!(float(f64::INFINITY), "Infinity");
        assert_eq!(float(f64::NAN), "NaN");
    }

    #[test]
    fn empty_object_is_compact() {
        let v = JsonValue::Object(IndexMap::new());
        assert_eq!(v.to_pretty_json(), "{}");
    }
}
