//! Gene representation for the layout optimizer
//!
//! A gene is a fixed number of `GeneValue` fields (for diagram layouts, an x
//! and a y coordinate per node) plus the quality score from the last
//! evaluation. The field is the unit that is randomized, crossed over and
//! mutated, so every operation works on field indices rather than raw bytes.
//! Byte-level sizes from the configuration are converted once, when the pool
//! is created.

use crate::types::Quality;
use std::fmt::Debug;

/// A fixed width unsigned field inside a gene.
pub trait GeneValue: Copy + Clone + Debug + Default + PartialEq + Eq + Send + Sync + 'static {
    /// Width of one field in bytes.
    const WIDTH: usize;
    /// Largest value representable by the field.
    const MAX: u64;

    fn from_u64(value: u64) -> Self;
    fn to_u64(self) -> u64;
    fn append_le_bytes(self, out: &mut Vec<u8>);
}

macro_rules! impl_gene_value {
    ($($ty:ty),*) => {
        $(
            impl GeneValue for $ty {
                const WIDTH: usize = std::mem::size_of::<$ty>();
                const MAX: u64 = <$ty>::MAX as u64;

                fn from_u64(value: u64) -> Self {
                    value as $ty
                }

                fn to_u64(self) -> u64 {
                    self as u64
                }

                fn append_le_bytes(self, out: &mut Vec<u8>) {
                    out.extend_from_slice(&self.to_le_bytes());
                }
            }
        )*
    };
}

impl_gene_value!(u8, u16, u32);

/// One candidate solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gene<V: GeneValue> {
    fields: Vec<V>,
    quality: Quality,
}

impl<V: GeneValue> Gene<V> {
    /// A gene of `num_fields` zeroed fields.
    pub fn zeroed(num_fields: usize) -> Self {
        Self {
            fields: vec![V::default(); num_fields],
            quality: 0,
        }
    }

    pub fn from_fields(fields: Vec<V>) -> Self {
        Self { fields, quality: 0 }
    }

    pub fn fields(&self) -> &[V] {
        &self.fields
    }

    pub(crate) fn fields_mut(&mut self) -> &mut [V] {
        &mut self.fields
    }

    pub fn field(&self, index: usize) -> V {
        self.fields[index]
    }

    pub fn set_field(&mut self, index: usize, value: V) {
        self.fields[index] = value;
    }

    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    pub fn byte_len(&self) -> usize {
        self.fields.len() * V::WIDTH
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub(crate) fn set_quality(&mut self, quality: Quality) {
        self.quality = quality;
    }

    /// Little-endian byte encoding of the fields, `byte_len()` bytes long.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.byte_len());
        for value in &self.fields {
            value.append_le_bytes(&mut bytes);
        }
        bytes
    }

    /// Sum of all field values.
    pub fn field_sum(&self) -> u64 {
        self.fields.iter().map(|v| v.to_u64()).sum()
    }
}
