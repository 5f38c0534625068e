use serde::{
    ser::{
        Error as _, SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant,
        SerializeTuple, SerializeTupleStruct, SerializeTupleVariant,
    },
    Serialize, Serializer,
};

/// Walks a value without writing anything and fails on NaN or infinite
/// floats, which serde_json would otherwise write as `null`.
pub(crate) fn check_finite<T: ?Sized + Serialize>(value: &T) -> Result<(), serde_json::Error> {
    value.serialize(FiniteCheck)
}

#[derive(Copy, Clone)]
struct FiniteCheck;

fn non_finite(value: f64) -> serde_json::Error {
    serde_json::Error::custom(format_args!("float `{}` is not representable in json", value))
}

impl Serializer for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_bool(self, _v: bool) -> Result<(), Self::Error> {
        Ok(())
    }

    fn serialize_i8(self, _v: i8) -> Result<(), Self::Error> {
        Ok(())
    }

    fn serialize_i16(self, _v: i16) -> Result<(), Self::Error> {
        Ok(())
    }

    fn serialize_i32(self, _v: i32) -> Result<(), Self::Error> {
        Ok(())
    }

    fn serialize_i64(self, _v: i64) -> Result<(), Self::Error> {
        Ok(())
    }

    fn serialize_i128(self, _v: i128) -> Result<(), Self::Error> {
        Ok(())
    }

    fn serialize_u8(self, _v: u8) -> Result<(), Self::Error> {
        Ok(())
    }

    fn serialize_u16(self, _v: u16) -> Result<(), Self::Error> {
        Ok(())
    }

    fn serialize_u32(self, _v: u32) -> Result<(), Self::Error> {
        Ok(())
    }

    fn serialize_u64(self, _v: u64) -> Result<(), Self::Error> {
        Ok(())
    }

    fn serialize_u128(self, _v: u128) -> Result<(), Self::Error> {
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<(), Self::Error> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<(), Self::Error> {
        if v.is_finite() {
            Ok(())
        } else {
            Err(non_finite(v))
        }
    }

    fn serialize_char(self, _v: char) -> Result<(), Self::Error> {
        Ok(())
    }

    fn serialize_str(self, _v: &str) -> Result<(), Self::Error> {
        Ok(())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn serialize_none(self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<(), Self::Error> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<(), Self::Error> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        value.serialize(self)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self, Self::Error> {
        Ok(self)
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self, Self::Error> {
        Ok(self)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self, Self::Error> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, Self::Error> {
        Ok(self)
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self, Self::Error> {
        Ok(self)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self, Self::Error> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self, Self::Error> {
        Ok(self)
    }
}

impl SerializeSeq for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Self::Error> {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl SerializeTuple for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Self::Error> {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl SerializeTupleStruct for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Self::Error> {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl SerializeTupleVariant for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Self::Error> {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl SerializeMap for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<(), Self::Error> {
        key.serialize(*self)
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<(), Self::Error> {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl SerializeStruct for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl SerializeStructVariant for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> Result<(), Self::Error> {
        value.serialize(*self)
    }

    fn end(self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;

    #[test]
    fn finite_values_pass() {
        assert!(check_finite(&json!({"a": [1, 2.5, null, "x"], "b": {"c": -0.0}})).is_ok());
        assert!(check_finite(&(1u8, 2.0f32, Some(3.0f64))).is_ok());
        assert!(check_finite(&f64::MAX).is_ok());
    }

    #[test]
    fn non_finite_values_fail() {
        assert!(check_finite(&f64::NAN).is_err());
        assert!(check_finite(&f32::INFINITY).is_err());
        assert!(check_finite(&vec![1.0, f64::NEG_INFINITY]).is_err());
        assert!(check_finite(&Some(vec![Some(f64::NAN)])).is_err());

        let mut map = BTreeMap::new();
        map.insert("k", (0, f32::NAN));
        let err = check_finite(&map).unwrap_err();
        assert_eq!(err.to_string(), "float `NaN` is not representable in json");
    }
}
