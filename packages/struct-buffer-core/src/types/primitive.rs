use std::fmt;

use crate::buffer::SharedBuffer;

/// Numeric domain of a primitive kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericDomain {
    Float,
    Signed,
    Unsigned,
}

/// Fixed-width numeric kind stored little-endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    F32,
    F64,
    I16,
    I32,
    I64,
    U16,
    U32,
    U64,
}

impl PrimitiveKind {
    /// Every supported kind, in registry order.
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::F32,
        PrimitiveKind::F64,
        PrimitiveKind::I16,
        PrimitiveKind::I32,
        PrimitiveKind::I64,
        PrimitiveKind::U16,
        PrimitiveKind::U32,
        PrimitiveKind::U64,
    ];

    /// Width in bytes.
    pub const fn size(self) -> usize {
        match self {
            PrimitiveKind::I16 | PrimitiveKind::U16 => 2,
            PrimitiveKind::F32 | PrimitiveKind::I32 | PrimitiveKind::U32 => 4,
            PrimitiveKind::F64 | PrimitiveKind::I64 | PrimitiveKind::U64 => 8,
        }
    }

    pub const fn domain(self) -> NumericDomain {
        match self {
            PrimitiveKind::F32 | PrimitiveKind::F64 => NumericDomain::Float,
            PrimitiveKind::I16 | PrimitiveKind::I32 | PrimitiveKind::I64 => NumericDomain::Signed,
            PrimitiveKind::U16 | PrimitiveKind::U32 | PrimitiveKind::U64 => {
                NumericDomain::Unsigned
            }
        }
    }

    /// Type identifier used in schema files (e.g. "f32", "u16").
    pub const fn name(self) -> &'static str {
        match self {
            PrimitiveKind::F32 => "f32",
            PrimitiveKind::F64 => "f64",
            PrimitiveKind::I16 => "i16",
            PrimitiveKind::I32 => "i32",
            PrimitiveKind::I64 => "i64",
            PrimitiveKind::U16 => "u16",
            PrimitiveKind::U32 => "u32",
            PrimitiveKind::U64 => "u64",
        }
    }

    /// Looks up a kind by its type identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Decodes one value at an absolute byte offset.
    ///
    /// The caller guarantees `offset + self.size() <= buffer.len()`.
    pub fn read(self, buffer: &SharedBuffer, offset: usize) -> Scalar {
        match self {
            PrimitiveKind::F32 => Scalar::F32(f32::from_le_bytes(buffer.read_array(offset))),
            PrimitiveKind::F64 => Scalar::F64(f64::from_le_bytes(buffer.read_array(offset))),
            PrimitiveKind::I16 => Scalar::I16(i16::from_le_bytes(buffer.read_array(offset))),
            PrimitiveKind::I32 => Scalar::I32(i32::from_le_bytes(buffer.read_array(offset))),
            PrimitiveKind::I64 => Scalar::I64(i64::from_le_bytes(buffer.read_array(offset))),
            PrimitiveKind::U16 => Scalar::U16(u16::from_le_bytes(buffer.read_array(offset))),
            PrimitiveKind::U32 => Scalar::U32(u32::from_le_bytes(buffer.read_array(offset))),
            PrimitiveKind::U64 => Scalar::U64(u64::from_le_bytes(buffer.read_array(offset))),
        }
    }

    /// Encodes `value` at an absolute byte offset after converting it to this kind.
    ///
    /// Same precondition as [`PrimitiveKind::read`].
    pub fn write(self, buffer: &SharedBuffer, offset: usize, value: Scalar) {
        match value.convert(self) {
            Scalar::F32(v) => buffer.write_array(offset, v.to_le_bytes()),
            Scalar::F64(v) => buffer.write_array(offset, v.to_le_bytes()),
            Scalar::I16(v) => buffer.write_array(offset, v.to_le_bytes()),
            Scalar::I32(v) => buffer.write_array(offset, v.to_le_bytes()),
            Scalar::I64(v) => buffer.write_array(offset, v.to_le_bytes()),
            Scalar::U16(v) => buffer.write_array(offset, v.to_le_bytes()),
            Scalar::U32(v) => buffer.write_array(offset, v.to_le_bytes()),
            Scalar::U64(v) => buffer.write_array(offset, v.to_le_bytes()),
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One numeric value tagged with its kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    F32(f32),
    F64(f64),
    I16(i16),
    I32(i32),
    I64(i64),
    U16(u16),
    U32(u32),
    U64(u64),
}

impl Scalar {
    pub fn kind(self) -> PrimitiveKind {
        match self {
            Scalar::F32(_) => PrimitiveKind::F32,
            Scalar::F64(_) => PrimitiveKind::F64,
            Scalar::I16(_) => PrimitiveKind::I16,
            Scalar::I32(_) => PrimitiveKind::I32,
            Scalar::I64(_) => PrimitiveKind::I64,
            Scalar::U16(_) => PrimitiveKind::U16,
            Scalar::U32(_) => PrimitiveKind::U32,
            Scalar::U64(_) => PrimitiveKind::U64,
        }
    }

    /// Converts to `kind` with native fixed-width semantics.
    ///
    /// Float to integer truncates toward zero and wraps modulo the target
    /// width; NaN and infinities become zero. Integer to integer keeps the low
    /// bits. Conversions to a float kind are plain numeric casts.
    pub fn convert(self, kind: PrimitiveKind) -> Scalar {
        if self.kind() == kind {
            return self;
        }
        match kind {
            PrimitiveKind::F32 => Scalar::F32(self.as_f64() as f32),
            PrimitiveKind::F64 => Scalar::F64(self.as_f64()),
            _ => {
                let bits = self.wrapped_bits();
                match kind {
                    PrimitiveKind::I16 => Scalar::I16(bits as u16 as i16),
                    PrimitiveKind::I32 => Scalar::I32(bits as u32 as i32),
                    PrimitiveKind::I64 => Scalar::I64(bits as i64),
                    PrimitiveKind::U16 => Scalar::U16(bits as u16),
                    PrimitiveKind::U32 => Scalar::U32(bits as u32),
                    _ => Scalar::U64(bits),
                }
            }
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Scalar::F32(v) => v as f64,
            Scalar::F64(v) => v,
            Scalar::I16(v) => v as f64,
            Scalar::I32(v) => v as f64,
            Scalar::I64(v) => v as f64,
            Scalar::U16(v) => v as f64,
            Scalar::U32(v) => v as f64,
            Scalar::U64(v) => v as f64,
        }
    }

    /// Returns the value as `i64`, wrapping unsigned values above `i64::MAX`.
    pub fn as_i64(self) -> i64 {
        self.wrapped_bits() as i64
    }

    /// Returns the value as `u64`, wrapping negative values.
    pub fn as_u64(self) -> u64 {
        self.wrapped_bits()
    }

    /// Low 64 bits of the value's two's-complement integer form.
    fn wrapped_bits(self) -> u64 {
        match self {
            Scalar::F32(v) => wrap_float(v as f64),
            Scalar::F64(v) => wrap_float(v),
            Scalar::I16(v) => v as i64 as u64,
            Scalar::I32(v) => v as i64 as u64,
            Scalar::I64(v) => v as u64,
            Scalar::U16(v) => v as u64,
            Scalar::U32(v) => v as u64,
            Scalar::U64(v) => v,
        }
    }
}

/// Truncates toward zero and reduces modulo 2^64.
fn wrap_float(value: f64) -> u64 {
    if !value.is_finite() {
        return 0;
    }
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
    const MODULUS: f64 = 18_446_744_073_709_551_616.0;
    let truncated = value.trunc();
    if (-I64_BOUND..I64_BOUND).contains(&truncated) {
        return truncated as i64 as u64;
    }
    // Magnitudes past 2^63 are multiples of 2^11, so the remainder is exact.
    truncated.rem_euclid(MODULUS) as u64
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::F32(v) => write!(f, "{}", v),
            Scalar::F64(v) => write!(f, "{}", v),
            Scalar::I16(v) => write!(f, "{}", v),
            Scalar::I32(v) => write!(f, "{}", v),
            Scalar::I64(v) => write!(f, "{}", v),
            Scalar::U16(v) => write!(f, "{}", v),
            Scalar::U32(v) => write!(f, "{}", v),
            Scalar::U64(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! impl_scalar_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Scalar {
                fn from(value: $ty) -> Self {
                    Scalar::$variant(value)
                }
            }
        )*
    };
}

impl_scalar_from! {
    f32 => F32,
    f64 => F64,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u16 => U16,
    u32 => U32,
    u64 => U64,
}
