use crate::errors::ReadConversionError;
use aws_sdk_dynamodb::{primitives::Blob, types::AttributeValue};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, str::FromStr};

/// One attribute value, mirroring the DynamoDB value universe.
///
/// Numbers are held as their decimal string representation, exactly as
/// DynamoDB transports them, so no precision is lost round-tripping values
/// the gateway never needs to interpret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableAttribute {
    String(String),
    Number(String),
    Bool(bool),
    Bytes(Vec<u8>),

    StringVec(Vec<String>),
    NumberVec(Vec<String>),
    ByteVec(Vec<Vec<u8>>),
    List(Vec<TableAttribute>),
    Map(HashMap<String, TableAttribute>),

    Null,
}

impl TableAttribute {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TableAttribute::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            TableAttribute::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TableAttribute::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Parse a `Number` attribute into any type implementing [`FromStr`].
    pub fn as_number<T: FromStr>(&self) -> Option<T> {
        match self {
            TableAttribute::Number(n) => n.parse().ok(),
            _ => None,
        }
    }
}

impl From<&str> for TableAttribute {
    fn from(value: &str) -> Self {
        TableAttribute::String(value.to_string())
    }
}

impl From<String> for TableAttribute {
    fn from(value: String) -> Self {
        TableAttribute::String(value)
    }
}

impl From<bool> for TableAttribute {
    fn from(value: bool) -> Self {
        TableAttribute::Bool(value)
    }
}

impl From<Vec<u8>> for TableAttribute {
    fn from(value: Vec<u8>) -> Self {
        TableAttribute::Bytes(value)
    }
}

impl From<&[u8]> for TableAttribute {
    fn from(value: &[u8]) -> Self {
        TableAttribute::Bytes(value.to_vec())
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for TableAttribute {
                fn from(value: $ty) -> Self {
                    TableAttribute::Number(value.to_string())
                }
            }
        )*
    };
}

impl_from_number!(i16, i32, i64, u16, u32, u64, usize, f32, f64);

impl From<TableAttribute> for AttributeValue {
    fn from(attribute: TableAttribute) -> Self {
        match attribute {
            TableAttribute::String(s) => AttributeValue::S(s),
            TableAttribute::Number(n) => AttributeValue::N(n),
            TableAttribute::Bool(b) => AttributeValue::Bool(b),
            TableAttribute::Bytes(b) => AttributeValue::B(Blob::new(b)),

            TableAttribute::StringVec(s) => AttributeValue::Ss(s),
            TableAttribute::NumberVec(n) => AttributeValue::Ns(n),
            TableAttribute::ByteVec(b) => {
                AttributeValue::Bs(b.into_iter().map(Blob::new).collect())
            }
            TableAttribute::List(l) => {
                AttributeValue::L(l.into_iter().map(AttributeValue::from).collect())
            }
            TableAttribute::Map(m) => {
                AttributeValue::M(m.into_iter().map(|(k, v)| (k, v.into())).collect())
            }

            TableAttribute::Null => AttributeValue::Null(true),
        }
    }
}

impl TryFrom<AttributeValue> for TableAttribute {
    type Error = ReadConversionError;

    fn try_from(value: AttributeValue) -> Result<Self, Self::Error> {
        Ok(match value {
            AttributeValue::S(s) => TableAttribute::String(s),
            AttributeValue::N(n) => TableAttribute::Number(n),
            AttributeValue::Bool(b) => TableAttribute::Bool(b),
            AttributeValue::B(b) => TableAttribute::Bytes(b.into_inner()),

            AttributeValue::Ss(s) => TableAttribute::StringVec(s),
            AttributeValue::Ns(n) => TableAttribute::NumberVec(n),
            AttributeValue::Bs(b) => {
                TableAttribute::ByteVec(b.into_iter().map(Blob::into_inner).collect())
            }
            AttributeValue::L(l) => TableAttribute::List(
                l.into_iter()
                    .map(TableAttribute::try_from)
                    .collect::<Result<_, _>>()?,
            ),
            AttributeValue::M(m) => TableAttribute::Map(
                m.into_iter()
                    .map(|(k, v)| Ok((k, TableAttribute::try_from(v)?)))
                    .collect::<Result<_, ReadConversionError>>()?,
            ),
            AttributeValue::Null(_) => TableAttribute::Null,

            _ => return Err(ReadConversionError::UnsupportedValue),
        })
    }
}
