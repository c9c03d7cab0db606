use num_enum::TryFromPrimitive;
use std::fmt;

/// Variant name for a known registry code, otherwise the raw character.
pub fn enum_name_or_char<T>(raw: u8) -> String
where
    T: TryFromPrimitive<Primitive = u8> + fmt::Debug,
{
    match T::try_from_primitive(raw) {
        Ok(variant) => format!("{:?}", variant),
        Err(_) => format!("{:?}", char::from(raw)),
    }
}

/// First byte of a one-character registry value such as "1".
pub fn single_code(value: &str) -> Option<u8> {
    match value.as_bytes() {
        [b] => Some(*b),
        _ => None,
    }
}
