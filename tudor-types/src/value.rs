//! Structured values and their binary layout.
//!
//! Print metadata and host call arguments are typed value trees. The binary
//! form follows the GVariant normal form for the subset of types used here:
//!
//! | sig   | layout                                               |
//! |-------|------------------------------------------------------|
//! | `b`   | one byte, `0` or `1`                                 |
//! | `y`   | one byte                                             |
//! | `s`   | UTF-8 bytes followed by a NUL                        |
//! | `ay`  | the raw bytes                                        |
//! | `(…)` | children back to back, then framing offsets          |
//!
//! Every type in the subset has alignment 1, so tuples never carry padding.
//! A tuple stores the end offset of each non-last variable-size child; the
//! offsets are appended in reverse order, each as many bytes wide as needed
//! to address the whole container.

use crate::{ValueError, ValueResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroize;

/// A structured value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Byte(u8),
    Str(String),
    Bytes(Vec<u8>),
    Tuple(Vec<Value>),
}

/// The type of a [`Value`], parsed from or rendered to a signature string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    Bool,
    Byte,
    Str,
    Bytes,
    Tuple(Vec<ValueType>),
}

impl ValueType {
    /// Parses a complete signature such as `"(ayyay)"`.
    pub fn parse(signature: &str) -> ValueResult<Self> {
        let mut rest = signature.as_bytes();
        let ty = Self::parse_one(&mut rest, signature)?;
        if !rest.is_empty() {
            return Err(ValueError::InvalidSignature(signature.to_string()));
        }
        Ok(ty)
    }

    fn parse_one(rest: &mut &[u8], signature: &str) -> ValueResult<Self> {
        let invalid = || ValueError::InvalidSignature(signature.to_string());
        let current: &[u8] = *rest;
        let (&first, tail) = current.split_first().ok_or_else(invalid)?;
        *rest = tail;

        match first {
            b'b' => Ok(Self::Bool),
            b'y' => Ok(Self::Byte),
            b's' => Ok(Self::Str),
            b'a' => match tail.split_first() {
                Some((b'y', tail)) => {
                    *rest = tail;
                    Ok(Self::Bytes)
                }
                _ => Err(invalid()),
            },
            b'(' => {
                let mut fields = Vec::new();
                loop {
                    let current: &[u8] = *rest;
                    match current.split_first() {
                        Some((b')', tail)) => {
                            *rest = tail;
                            return Ok(Self::Tuple(fields));
                        }
                        Some(_) => fields.push(Self::parse_one(rest, signature)?),
                        None => return Err(invalid()),
                    }
                }
            }
            _ => Err(invalid()),
        }
    }

    /// Renders the signature string.
    #[must_use]
    pub fn signature(&self) -> String {
        self.to_string()
    }

    /// Serialized size for fixed-size types, `None` for variable-size ones.
    #[must_use]
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            Self::Bool | Self::Byte => Some(1),
            Self::Str | Self::Bytes => None,
            // The unit tuple still occupies one byte.
            Self::Tuple(fields) if fields.is_empty() => Some(1),
            Self::Tuple(fields) => fields.iter().map(Self::fixed_size).sum(),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("b"),
            Self::Byte => f.write_str("y"),
            Self::Str => f.write_str("s"),
            Self::Bytes => f.write_str("ay"),
            Self::Tuple(fields) => {
                f.write_str("(")?;
                for field in fields {
                    write!(f, "{field}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl Value {
    /// Returns the type of this value.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::Bool(_) => ValueType::Bool,
            Self::Byte(_) => ValueType::Byte,
            Self::Str(_) => ValueType::Str,
            Self::Bytes(_) => ValueType::Bytes,
            Self::Tuple(fields) => ValueType::Tuple(fields.iter().map(Self::value_type).collect()),
        }
    }

    /// Returns the signature string of this value.
    #[must_use]
    pub fn signature(&self) -> String {
        self.value_type().signature()
    }

    /// Whether this value has exactly the given signature.
    #[must_use]
    pub fn is_of_type(&self, signature: &str) -> bool {
        self.signature() == signature
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_byte(&self) -> Option<u8> {
        match self {
            Self::Byte(y) => Some(*y),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<&[Value]> {
        match self {
            Self::Tuple(fields) => Some(fields),
            _ => None,
        }
    }

    /// Serializes the value into its binary form.
    ///
    /// Fails if a string holds an interior NUL, which the `s` layout cannot
    /// represent.
    pub fn to_bytes(&self) -> ValueResult<Vec<u8>> {
        let mut out = Vec::new();
        self.write(&mut out)?;
        Ok(out)
    }

    fn write(&self, out: &mut Vec<u8>) -> ValueResult<()> {
        match self {
            Self::Bool(b) => out.push(u8::from(*b)),
            Self::Byte(y) => out.push(*y),
            Self::Str(s) => {
                if s.contains('\0') {
                    return Err(ValueError::InteriorNul);
                }
                out.extend_from_slice(s.as_bytes());
                out.push(0);
            }
            Self::Bytes(bytes) => out.extend_from_slice(bytes),
            Self::Tuple(fields) => write_tuple(fields, out)?,
        }
        Ok(())
    }

    /// Deserializes a value of the given signature.
    pub fn parse_bytes(signature: &str, data: &[u8]) -> ValueResult<Self> {
        Self::from_bytes(&ValueType::parse(signature)?, data)
    }

    /// Deserializes a value of the given type. The whole of `data` must be
    /// consumed; anything not in normal form is rejected.
    pub fn from_bytes(ty: &ValueType, data: &[u8]) -> ValueResult<Self> {
        match ty {
            ValueType::Bool => match expect_one(data)? {
                0 => Ok(Self::Bool(false)),
                1 => Ok(Self::Bool(true)),
                other => Err(ValueError::InvalidBool(other)),
            },
            ValueType::Byte => Ok(Self::Byte(expect_one(data)?)),
            ValueType::Str => {
                let (&last, body) = data.split_last().ok_or(ValueError::BadStringTerminator)?;
                if last != 0 || body.contains(&0) {
                    return Err(ValueError::BadStringTerminator);
                }
                Ok(Self::Str(std::str::from_utf8(body)?.to_string()))
            }
            ValueType::Bytes => Ok(Self::Bytes(data.to_vec())),
            ValueType::Tuple(fields) => read_tuple(ty, fields, data),
        }
    }
}

fn expect_one(data: &[u8]) -> ValueResult<u8> {
    match data {
        [byte] => Ok(*byte),
        _ => Err(ValueError::SizeMismatch {
            expected: 1,
            actual: data.len(),
        }),
    }
}

/// Width in bytes of each framing offset for a container of `size` bytes.
fn offset_width(size: usize) -> usize {
    let size = size as u64;
    if size > u64::from(u32::MAX) {
        8
    } else if size > u64::from(u16::MAX) {
        4
    } else if size > u64::from(u8::MAX) {
        2
    } else if size > 0 {
        1
    } else {
        0
    }
}

/// Smallest offset width able to address a body plus its own offsets.
fn offset_width_for_body(body: usize, n_offsets: usize) -> usize {
    if n_offsets == 0 {
        return 0;
    }
    [1usize, 2, 4]
        .into_iter()
        .find(|width| {
            let limit = (1u128 << (width * 8)) - 1;
            (body as u128) + (n_offsets as u128) * (*width as u128) <= limit
        })
        .unwrap_or(8)
}

fn write_tuple(fields: &[Value], out: &mut Vec<u8>) -> ValueResult<()> {
    if fields.is_empty() {
        out.push(0);
        return Ok(());
    }

    let mut body = Vec::new();
    let mut offsets = Vec::new();
    let last = fields.len() - 1;
    for (i, field) in fields.iter().enumerate() {
        field.write(&mut body)?;
        if i != last && field.value_type().fixed_size().is_none() {
            offsets.push(body.len());
        }
    }

    let width = offset_width_for_body(body.len(), offsets.len());
    for offset in offsets.iter().rev() {
        body.extend_from_slice(&offset.to_le_bytes()[..width]);
    }
    out.extend_from_slice(&body);
    Ok(())
}

fn read_offset(data: &[u8], at: usize, width: usize) -> usize {
    let mut buf = [0u8; 8];
    buf[..width].copy_from_slice(&data[at..at + width]);
    u64::from_le_bytes(buf) as usize
}

fn read_tuple(ty: &ValueType, fields: &[ValueType], data: &[u8]) -> ValueResult<Value> {
    if let Some(expected) = ty.fixed_size() {
        if data.len() != expected {
            return Err(ValueError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
    }
    if fields.is_empty() {
        return match data {
            [0] => Ok(Value::Tuple(Vec::new())),
            [other] => Err(ValueError::InvalidUnit(*other)),
            _ => Err(ValueError::SizeMismatch {
                expected: 1,
                actual: data.len(),
            }),
        };
    }

    let last = fields.len() - 1;
    let n_offsets = fields[..last]
        .iter()
        .filter(|field| field.fixed_size().is_none())
        .count();
    let width = offset_width(data.len());
    let offsets_start = data
        .len()
        .checked_sub(n_offsets * width)
        .ok_or(ValueError::InvalidOffset {
            offset: n_offsets * width,
            len: data.len(),
        })?;

    let mut values = Vec::with_capacity(fields.len());
    let mut pos = 0;
    let mut next_offset = 0;
    for (i, field) in fields.iter().enumerate() {
        let end = match field.fixed_size() {
            Some(size) => pos + size,
            None if i == last => offsets_start,
            None => {
                next_offset += 1;
                read_offset(data, data.len() - next_offset * width, width)
            }
        };
        if end < pos || end > offsets_start {
            return Err(ValueError::InvalidOffset {
                offset: end,
                len: data.len(),
            });
        }
        values.push(Value::from_bytes(field, &data[pos..end])?);
        pos = end;
    }

    if pos != offsets_start {
        return Err(ValueError::SizeMismatch {
            expected: pos,
            actual: offsets_start,
        });
    }
    Ok(Value::Tuple(values))
}

impl Zeroize for Value {
    fn zeroize(&mut self) {
        match self {
            Self::Bool(b) => b.zeroize(),
            Self::Byte(y) => y.zeroize(),
            Self::Str(s) => s.zeroize(),
            Self::Bytes(bytes) => bytes.zeroize(),
            Self::Tuple(fields) => fields.zeroize(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<u8> for Value {
    fn from(y: u8) -> Self {
        Self::Byte(y)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(fields: Vec<Value>) -> Self {
        Self::Tuple(fields)
    }
}
