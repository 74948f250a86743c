use std::str::FromStr;

/// Anything that can be ordered or looked up by an identifier.
///
/// Bare scalars are their own key. Records expose their `id` field.
/// `None` means the value carries no usable identifier.
pub trait Keyed {
    type Key: Ord;

    fn key(&self) -> Option<Self::Key>;
}

/// Coerce a string-typed identifier into a key.
///
/// Surrounding whitespace is ignored; anything that does not parse is absent.
pub fn parse_key<K: FromStr>(raw: &str) -> Option<K> {
    raw.trim().parse().ok()
}

macro_rules! keyed_by_value {
    ($($ty:ty),*) => {
        $(
            impl Keyed for $ty {
                type Key = $ty;

                fn key(&self) -> Option<$ty> {
                    Some(*self)
                }
            }
        )*
    };
}

keyed_by_value!(i32, i64, u32, u64, usize, char);

impl Keyed for String {
    type Key = String;

    fn key(&self) -> Option<String> {
        Some(self.clone())
    }
}

impl<'a> Keyed for &'a str {
    type Key = &'a str;

    fn key(&self) -> Option<&'a str> {
        Some(*self)
    }
}

// Opaque payloads are keyed by their `id` field, numeric strings included
impl Keyed for serde_json::Value {
    type Key = i64;

    fn key(&self) -> Option<i64> {
        match self.get("id")? {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => parse_key(s),
            _ => None,
        }
    }
}
