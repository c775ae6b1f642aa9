use crate::types::ValueType;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use uuid::Uuid;

///
/// PropertyValue
///
/// Maps a Rust member type onto the semantic `ValueType` used for editor
/// resolution. The derive emits `<T as PropertyValue>::VALUE_TYPE` for every
/// member, so custom member types only need an impl of this trait.
///

pub trait PropertyValue {
    const VALUE_TYPE: ValueType;
}

macro_rules! impl_property_value {
    ($value_type:ident => $($ty:ty),* $(,)?) => {
        $(
            impl PropertyValue for $ty {
                const VALUE_TYPE: ValueType = ValueType::$value_type;
            }
        )*
    };
}

impl_property_value!(Bool => bool);
impl_property_value!(Integer => i8, i16, i32, i64, u8, u16, u32, u64, isize, usize);
impl_property_value!(Decimal => f32, f64);
impl_property_value!(Text => String, &'static str, char);
impl_property_value!(Date => NaiveDate);
impl_property_value!(DateTime => NaiveDateTime);
impl_property_value!(Reference => Uuid);
impl_property_value!(Json => serde_json::Value);
impl_property_value!(Tags => Vec<String>);

impl<Tz: TimeZone> PropertyValue for DateTime<Tz> {
    const VALUE_TYPE: ValueType = ValueType::DateTime;
}

impl<T: PropertyValue> PropertyValue for Option<T> {
    const VALUE_TYPE: ValueType = T::VALUE_TYPE;
}

impl<T: PropertyValue + ?Sized> PropertyValue for Box<T> {
    const VALUE_TYPE: ValueType = T::VALUE_TYPE;
}
