//! Compact term encoding.
//!
//! [`ObjectId`] is a 64-bit tagged union that encodes every RDF term the
//! engine handles. The high 8 bits select a type tag; the low 56 bits carry
//! the payload. The payload either inlines the value (small strings, ints,
//! floats, packed calendar components) or identifies it by id in an external
//! store (persistent dictionary or per-query temp store).
//!
//! **Equality semantics:** two `ObjectId`s with equal bits denote equal RDF
//! terms. This is term equality, stricter than SPARQL value equality; the
//! packers keep it sound by interning identical strings to identical ids.
//!
//! The tag byte is structured `[sub-type: 6 bits][storage: 2 bits]`, so a
//! family of storage flavors (inlined / extern / tmp) shares one sub-type
//! and sub-types coalesce further into generic buckets (any string flavor,
//! any temporal) for expressions that accept a family.

/// High byte: the type tag.
pub const TYPE_MASK: u64 = 0xFF00_0000_0000_0000;

/// Low 56 bits: the value payload.
pub const VALUE_MASK: u64 = 0x00FF_FFFF_FFFF_FFFF;

const TAG_SHIFT: u32 = 56;

// Storage flavor, low 2 bits of the tag byte.
const STORAGE_INLINED: u64 = 0b00;
const STORAGE_EXTERN: u64 = 0b01;
const STORAGE_TMP: u64 = 0b10;
const STORAGE_CLEAR: u64 = !(0b11u64 << TAG_SHIFT);

const fn tag(sub: u64, storage: u64) -> u64 {
    (sub | storage) << TAG_SHIFT
}

// Sub-type bytes (storage bits zero).
const SUB_NULL: u64 = 0x00;
const SUB_ANON: u64 = 0x04;
const SUB_STRING_SIMPLE: u64 = 0x08;
const SUB_STRING_XSD: u64 = 0x0C;
const SUB_STRING_DATATYPE: u64 = 0x10;
const SUB_STRING_LANG: u64 = 0x14;
const SUB_IRI: u64 = 0x18;
const SUB_INT_POS: u64 = 0x1C;
const SUB_INT_NEG: u64 = 0x20;
const SUB_FLOAT: u64 = 0x24;
const SUB_DOUBLE: u64 = 0x28;
const SUB_BOOL: u64 = 0x2C;
const SUB_DECIMAL: u64 = 0x30;
const SUB_DT_DATE: u64 = 0x34;
const SUB_DT_TIME: u64 = 0x38;
const SUB_DT_DATETIME: u64 = 0x3C;
const SUB_DT_DATETIMESTAMP: u64 = 0x40;
const SUB_PATH: u64 = 0x44;

// ---------------------------------------------------------------------------
// Full type tags
// ---------------------------------------------------------------------------

pub const MASK_NULL: u64 = tag(SUB_NULL, STORAGE_INLINED);

pub const MASK_ANON_INLINED: u64 = tag(SUB_ANON, STORAGE_INLINED);
pub const MASK_ANON_TMP: u64 = tag(SUB_ANON, STORAGE_TMP);

pub const MASK_STRING_SIMPLE_INLINED: u64 = tag(SUB_STRING_SIMPLE, STORAGE_INLINED);
pub const MASK_STRING_SIMPLE_EXTERN: u64 = tag(SUB_STRING_SIMPLE, STORAGE_EXTERN);
pub const MASK_STRING_SIMPLE_TMP: u64 = tag(SUB_STRING_SIMPLE, STORAGE_TMP);

pub const MASK_STRING_XSD_INLINED: u64 = tag(SUB_STRING_XSD, STORAGE_INLINED);
pub const MASK_STRING_XSD_EXTERN: u64 = tag(SUB_STRING_XSD, STORAGE_EXTERN);
pub const MASK_STRING_XSD_TMP: u64 = tag(SUB_STRING_XSD, STORAGE_TMP);

pub const MASK_STRING_DATATYPE_INLINED: u64 = tag(SUB_STRING_DATATYPE, STORAGE_INLINED);
pub const MASK_STRING_DATATYPE_EXTERN: u64 = tag(SUB_STRING_DATATYPE, STORAGE_EXTERN);
pub const MASK_STRING_DATATYPE_TMP: u64 = tag(SUB_STRING_DATATYPE, STORAGE_TMP);

pub const MASK_STRING_LANG_INLINED: u64 = tag(SUB_STRING_LANG, STORAGE_INLINED);
pub const MASK_STRING_LANG_EXTERN: u64 = tag(SUB_STRING_LANG, STORAGE_EXTERN);
pub const MASK_STRING_LANG_TMP: u64 = tag(SUB_STRING_LANG, STORAGE_TMP);

pub const MASK_IRI_INLINED: u64 = tag(SUB_IRI, STORAGE_INLINED);
pub const MASK_IRI_EXTERN: u64 = tag(SUB_IRI, STORAGE_EXTERN);
pub const MASK_IRI_TMP: u64 = tag(SUB_IRI, STORAGE_TMP);

pub const MASK_POSITIVE_INT: u64 = tag(SUB_INT_POS, STORAGE_INLINED);
pub const MASK_NEGATIVE_INT: u64 = tag(SUB_INT_NEG, STORAGE_INLINED);
pub const MASK_FLOAT: u64 = tag(SUB_FLOAT, STORAGE_INLINED);

pub const MASK_DOUBLE_EXTERN: u64 = tag(SUB_DOUBLE, STORAGE_EXTERN);
pub const MASK_DOUBLE_TMP: u64 = tag(SUB_DOUBLE, STORAGE_TMP);

pub const MASK_BOOL: u64 = tag(SUB_BOOL, STORAGE_INLINED);

pub const MASK_DECIMAL_INLINED: u64 = tag(SUB_DECIMAL, STORAGE_INLINED);
pub const MASK_DECIMAL_EXTERN: u64 = tag(SUB_DECIMAL, STORAGE_EXTERN);
pub const MASK_DECIMAL_TMP: u64 = tag(SUB_DECIMAL, STORAGE_TMP);

pub const MASK_DT_DATE: u64 = tag(SUB_DT_DATE, STORAGE_INLINED);
pub const MASK_DT_TIME: u64 = tag(SUB_DT_TIME, STORAGE_INLINED);
pub const MASK_DT_DATETIME: u64 = tag(SUB_DT_DATETIME, STORAGE_INLINED);
pub const MASK_DT_DATETIMESTAMP: u64 = tag(SUB_DT_DATETIMESTAMP, STORAGE_INLINED);

pub const MASK_PATH: u64 = tag(SUB_PATH, STORAGE_TMP);

// ---------------------------------------------------------------------------
// Sub-type masks (storage bits cleared), returned by `get_sub_type`
// ---------------------------------------------------------------------------

pub const MASK_ANON: u64 = SUB_ANON << TAG_SHIFT;
pub const MASK_STRING_SIMPLE: u64 = SUB_STRING_SIMPLE << TAG_SHIFT;
pub const MASK_STRING_XSD: u64 = SUB_STRING_XSD << TAG_SHIFT;
pub const MASK_STRING_DATATYPE: u64 = SUB_STRING_DATATYPE << TAG_SHIFT;
pub const MASK_STRING_LANG: u64 = SUB_STRING_LANG << TAG_SHIFT;
pub const MASK_IRI: u64 = SUB_IRI << TAG_SHIFT;
pub const MASK_INT_POS: u64 = SUB_INT_POS << TAG_SHIFT;
pub const MASK_INT_NEG: u64 = SUB_INT_NEG << TAG_SHIFT;
pub const MASK_FLOAT_SUB: u64 = SUB_FLOAT << TAG_SHIFT;
pub const MASK_DOUBLE: u64 = SUB_DOUBLE << TAG_SHIFT;
pub const MASK_BOOL_SUB: u64 = SUB_BOOL << TAG_SHIFT;
pub const MASK_DECIMAL: u64 = SUB_DECIMAL << TAG_SHIFT;
pub const MASK_PATH_SUB: u64 = SUB_PATH << TAG_SHIFT;

// ---------------------------------------------------------------------------
// Generic buckets, returned by `get_generic_type`
// ---------------------------------------------------------------------------

/// Any of the four string flavors (simple / xsd / datatyped / lang-tagged).
pub const MASK_STRING: u64 = 0xE0 << TAG_SHIFT;
/// Any numeric category (int / float / double / decimal).
pub const MASK_NUMERIC: u64 = 0xE4 << TAG_SHIFT;
/// Any temporal category (date / time / dateTime / dateTimeStamp).
pub const MASK_DT: u64 = 0xE8 << TAG_SHIFT;

// ---------------------------------------------------------------------------
// Payload field masks
// ---------------------------------------------------------------------------

/// String id portion of a datatyped/lang-tagged literal payload (bits 0..39).
pub const MASK_LITERAL: u64 = 0x0000_00FF_FFFF_FFFF;
/// Datatype/language id portion of a literal payload (bits 40..55).
pub const MASK_LITERAL_TAG: u64 = 0x00FF_FF00_0000_0000;
/// Prefix id portion of an IRI payload (bits 48..55).
pub const MASK_IRI_PREFIX: u64 = 0x00FF_0000_0000_0000;
/// Local-part id portion of an IRI payload (bits 0..47).
pub const MASK_IRI_CONTENT: u64 = 0x0000_FFFF_FFFF_FFFF;

/// High bit of a 16-bit datatype/language id: set means the id refers to the
/// per-query temp catalog, clear means the permanent catalog.
pub const MASK_TAG_MANAGER: u16 = 0x8000;

/// Inline byte budget for simple / xsd strings.
pub const STR_INLINE_BYTES: usize = 7;
/// Inline byte budget for IRI local parts (prefix id takes the top byte).
pub const IRI_INLINE_BYTES: usize = 6;
/// Inline byte budget for datatyped / lang-tagged literal bodies.
pub const STR_TAG_INLINE_BYTES: usize = 5;

const LITERAL_TAG_SHIFT: u32 = 40;
const IRI_PREFIX_SHIFT: u32 = 48;

/// 64-bit tagged encoding of an RDF term.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct ObjectId(pub u64);

impl ObjectId {
    /// The null value: unbound variable or SPARQL evaluation error.
    pub const NULL: Self = Self(MASK_NULL);

    /// Canonical boolean false.
    pub const BOOL_FALSE: Self = Self(MASK_BOOL);

    /// Canonical boolean true.
    pub const BOOL_TRUE: Self = Self(MASK_BOOL | 1);

    // ---- Accessors ----

    /// The full type tag (high byte, shifted into place).
    #[inline]
    pub fn get_type(self) -> u64 {
        self.0 & TYPE_MASK
    }

    /// The type tag with storage bits cleared: identifies the category
    /// regardless of where the content lives.
    #[inline]
    pub fn get_sub_type(self) -> u64 {
        self.0 & TYPE_MASK & STORAGE_CLEAR
    }

    /// Coalesce the sub-type into a broad bucket for family-accepting
    /// expressions: any string flavor is `MASK_STRING`, any temporal is
    /// `MASK_DT`, any numeric is `MASK_NUMERIC`; everything else is its own
    /// sub-type mask.
    pub fn get_generic_type(self) -> u64 {
        match self.get_sub_type() {
            MASK_STRING_SIMPLE | MASK_STRING_XSD | MASK_STRING_DATATYPE | MASK_STRING_LANG => {
                MASK_STRING
            }
            MASK_INT_POS | MASK_INT_NEG | MASK_FLOAT_SUB | MASK_DOUBLE | MASK_DECIMAL => {
                MASK_NUMERIC
            }
            sub if sub == MASK_DT_DATE
                || sub == MASK_DT_TIME
                || sub == MASK_DT_DATETIME
                || sub == MASK_DT_DATETIMESTAMP =>
            {
                MASK_DT
            }
            other => other,
        }
    }

    /// The 56-bit payload.
    #[inline]
    pub fn get_value(self) -> u64 {
        self.0 & VALUE_MASK
    }

    #[inline]
    pub fn is_null(self) -> bool {
        self.get_type() == MASK_NULL
    }

    // ---- Inline constructors (no store required) ----

    /// Encode a blank node by permanent id.
    #[inline]
    pub fn anon(id: u64) -> Self {
        Self(MASK_ANON_INLINED | (id & VALUE_MASK))
    }

    /// Encode a blank node allocated in the per-query temp store.
    #[inline]
    pub fn anon_tmp(id: u64) -> Self {
        Self(MASK_ANON_TMP | (id & VALUE_MASK))
    }

    /// Encode a signed integer. Returns `None` if the magnitude exceeds 56
    /// bits; callers fall back to the decimal encoding.
    pub fn int(value: i64) -> Option<Self> {
        if value >= 0 {
            let magnitude = value as u64;
            if magnitude > VALUE_MASK {
                return None;
            }
            Some(Self(MASK_POSITIVE_INT | magnitude))
        } else {
            let magnitude = value.unsigned_abs();
            if magnitude > VALUE_MASK {
                return None;
            }
            // One's complement of the magnitude within the word.
            Some(Self(MASK_NEGATIVE_INT | (!magnitude & VALUE_MASK)))
        }
    }

    /// Decode a positive or negative int.
    ///
    /// Only valid when the sub-type is `MASK_INT_POS` or `MASK_INT_NEG`.
    pub fn unpack_int(self) -> i64 {
        match self.get_sub_type() {
            MASK_INT_POS => self.get_value() as i64,
            _ => {
                let magnitude = (!self.0) & VALUE_MASK;
                -(magnitude as i64)
            }
        }
    }

    /// Encode an IEEE-754 binary32 little-endian into the low 4 bytes.
    pub fn float(value: f32) -> Self {
        let bytes = value.to_le_bytes();
        Self(MASK_FLOAT | u32::from_le_bytes(bytes) as u64)
    }

    /// Decode the binary32 payload.
    pub fn unpack_float(self) -> f32 {
        let raw = (self.0 & 0xFFFF_FFFF) as u32;
        f32::from_le_bytes(raw.to_le_bytes())
    }

    /// Encode a boolean.
    #[inline]
    pub fn bool(value: bool) -> Self {
        if value {
            Self::BOOL_TRUE
        } else {
            Self::BOOL_FALSE
        }
    }

    /// Decode a boolean payload.
    #[inline]
    pub fn unpack_bool(self) -> bool {
        self.get_value() != 0
    }

    /// Encode a path by id in the path manager.
    #[inline]
    pub fn path(id: u64) -> Self {
        Self(MASK_PATH | (id & VALUE_MASK))
    }

    // ---- Tagged-literal payload helpers ----

    /// The 16-bit datatype/language id of a datatyped or lang-tagged literal.
    #[inline]
    pub fn literal_tag_id(self) -> u16 {
        ((self.0 & MASK_LITERAL_TAG) >> LITERAL_TAG_SHIFT) as u16
    }

    /// The string id of an extern/tmp datatyped or lang-tagged literal.
    #[inline]
    pub fn literal_str_id(self) -> u64 {
        self.0 & MASK_LITERAL
    }

    /// The prefix id of an IRI payload.
    #[inline]
    pub fn iri_prefix_id(self) -> u8 {
        ((self.0 & MASK_IRI_PREFIX) >> IRI_PREFIX_SHIFT) as u8
    }

    /// The local-part string id of an extern/tmp IRI payload.
    #[inline]
    pub fn iri_content_id(self) -> u64 {
        self.0 & MASK_IRI_CONTENT
    }
}

impl std::fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self.get_type() {
            MASK_NULL => "NULL",
            MASK_ANON_INLINED => "ANON",
            MASK_ANON_TMP => "ANON_TMP",
            MASK_STRING_SIMPLE_INLINED => "STR_INL",
            MASK_STRING_SIMPLE_EXTERN => "STR_EXT",
            MASK_STRING_SIMPLE_TMP => "STR_TMP",
            MASK_STRING_XSD_INLINED => "STR_XSD_INL",
            MASK_STRING_XSD_EXTERN => "STR_XSD_EXT",
            MASK_STRING_XSD_TMP => "STR_XSD_TMP",
            MASK_STRING_DATATYPE_INLINED => "STR_DT_INL",
            MASK_STRING_DATATYPE_EXTERN => "STR_DT_EXT",
            MASK_STRING_DATATYPE_TMP => "STR_DT_TMP",
            MASK_STRING_LANG_INLINED => "STR_LANG_INL",
            MASK_STRING_LANG_EXTERN => "STR_LANG_EXT",
            MASK_STRING_LANG_TMP => "STR_LANG_TMP",
            MASK_IRI_INLINED => "IRI_INL",
            MASK_IRI_EXTERN => "IRI_EXT",
            MASK_IRI_TMP => "IRI_TMP",
            MASK_POSITIVE_INT => "INT_POS",
            MASK_NEGATIVE_INT => "INT_NEG",
            MASK_FLOAT => "FLOAT",
            MASK_DOUBLE_EXTERN => "DOUBLE_EXT",
            MASK_DOUBLE_TMP => "DOUBLE_TMP",
            MASK_BOOL => "BOOL",
            MASK_DECIMAL_INLINED => "DEC_INL",
            MASK_DECIMAL_EXTERN => "DEC_EXT",
            MASK_DECIMAL_TMP => "DEC_TMP",
            MASK_DT_DATE => "DATE",
            MASK_DT_TIME => "TIME",
            MASK_DT_DATETIME => "DATETIME",
            MASK_DT_DATETIMESTAMP => "DATETIMESTAMP",
            MASK_PATH => "PATH",
            _ => "UNKNOWN",
        };
        write!(f, "ObjectId({}, {:#x})", name, self.get_value())
    }
}

// ---------------------------------------------------------------------------
// Inliner
// ---------------------------------------------------------------------------

/// Small-string inlining into the low `N` payload bytes.
///
/// The first character occupies the highest inline byte; unused low bytes
/// are zero. A string is inlinable iff it fits the byte budget and contains
/// no NUL byte (zero bytes mark the end of the content).
pub mod inliner {
    use std::io::{self, Write};

    /// Pack up to `N` bytes into a payload word, or `None` if the string
    /// does not fit.
    pub fn inline_string<const N: usize>(s: &str) -> Option<u64> {
        let bytes = s.as_bytes();
        if bytes.len() > N || bytes.contains(&0) {
            return None;
        }
        let mut payload = 0u64;
        for (i, &b) in bytes.iter().enumerate() {
            payload |= (b as u64) << (8 * (N - 1 - i));
        }
        Some(payload)
    }

    /// Write the inlined content of a payload, skipping the zero padding.
    pub fn write_string_inlined<const N: usize>(
        w: &mut dyn Write,
        payload: u64,
    ) -> io::Result<()> {
        for i in (0..N).rev() {
            let b = ((payload >> (8 * i)) & 0xFF) as u8;
            if b != 0 {
                w.write_all(&[b])?;
            }
        }
        Ok(())
    }

    /// Decode the inlined content back into an owned string.
    pub fn unpack_string_inlined<const N: usize>(payload: u64) -> String {
        let mut bytes = Vec::with_capacity(N);
        for i in (0..N).rev() {
            let b = ((payload >> (8 * i)) & 0xFF) as u8;
            if b != 0 {
                bytes.push(b);
            }
        }
        // Inlined bytes are UTF-8 by construction.
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every full tag the codec can produce.
    const ALL_TAGS: &[u64] = &[
        MASK_NULL,
        MASK_ANON_INLINED,
        MASK_ANON_TMP,
        MASK_STRING_SIMPLE_INLINED,
        MASK_STRING_SIMPLE_EXTERN,
        MASK_STRING_SIMPLE_TMP,
        MASK_STRING_XSD_INLINED,
        MASK_STRING_XSD_EXTERN,
        MASK_STRING_XSD_TMP,
        MASK_STRING_DATATYPE_INLINED,
        MASK_STRING_DATATYPE_EXTERN,
        MASK_STRING_DATATYPE_TMP,
        MASK_STRING_LANG_INLINED,
        MASK_STRING_LANG_EXTERN,
        MASK_STRING_LANG_TMP,
        MASK_IRI_INLINED,
        MASK_IRI_EXTERN,
        MASK_IRI_TMP,
        MASK_POSITIVE_INT,
        MASK_NEGATIVE_INT,
        MASK_FLOAT,
        MASK_DOUBLE_EXTERN,
        MASK_DOUBLE_TMP,
        MASK_BOOL,
        MASK_DECIMAL_INLINED,
        MASK_DECIMAL_EXTERN,
        MASK_DECIMAL_TMP,
        MASK_DT_DATE,
        MASK_DT_TIME,
        MASK_DT_DATETIME,
        MASK_DT_DATETIMESTAMP,
        MASK_PATH,
    ];

    #[test]
    fn test_tag_injectivity() {
        for (i, &a) in ALL_TAGS.iter().enumerate() {
            assert_eq!(a & VALUE_MASK, 0, "tag {:#x} leaks into payload", a);
            for &b in &ALL_TAGS[i + 1..] {
                assert_ne!(a, b, "tags {:#x} and {:#x} collide", a, b);
            }
        }
    }

    #[test]
    fn test_int_round_trip() {
        for &v in &[0i64, 1, -1, 42, -42, 1_000_000, -1_000_000, i32::MAX as i64, i32::MIN as i64]
        {
            let oid = ObjectId::int(v).unwrap();
            assert_eq!(oid.unpack_int(), v, "round-trip failed for {}", v);
            let expected = if v >= 0 { MASK_INT_POS } else { MASK_INT_NEG };
            assert_eq!(oid.get_sub_type(), expected);
        }
    }

    #[test]
    fn test_int_range_limits() {
        let max = VALUE_MASK as i64;
        assert_eq!(ObjectId::int(max).unwrap().unpack_int(), max);
        assert_eq!(ObjectId::int(-max).unwrap().unpack_int(), -max);
        assert!(ObjectId::int(max + 1).is_none());
        assert!(ObjectId::int(-(max + 1)).is_none());
        assert!(ObjectId::int(i64::MIN).is_none());
    }

    #[test]
    fn test_negative_int_ones_complement() {
        // The decode path mirrors the printer: complement, mask, negate.
        let oid = ObjectId::int(-7).unwrap();
        let magnitude = (!oid.0) & VALUE_MASK;
        assert_eq!(magnitude, 7);
    }

    #[test]
    fn test_float_round_trip() {
        for &v in &[0.0f32, 1.0, -1.5, 3.14, f32::MAX, f32::MIN_POSITIVE] {
            let oid = ObjectId::float(v);
            assert_eq!(oid.unpack_float(), v);
            assert_eq!(oid.get_sub_type(), MASK_FLOAT_SUB);
        }
    }

    #[test]
    fn test_bool_encoding() {
        assert!(ObjectId::BOOL_TRUE.unpack_bool());
        assert!(!ObjectId::BOOL_FALSE.unpack_bool());
        assert_eq!(ObjectId::bool(true), ObjectId::BOOL_TRUE);
        assert_eq!(ObjectId::bool(false), ObjectId::BOOL_FALSE);
        assert_ne!(ObjectId::BOOL_TRUE, ObjectId::BOOL_FALSE);
    }

    #[test]
    fn test_null() {
        assert!(ObjectId::NULL.is_null());
        assert!(!ObjectId::BOOL_FALSE.is_null());
        assert!(!ObjectId::int(0).unwrap().is_null());
    }

    #[test]
    fn test_generic_type_buckets() {
        let strings = [
            ObjectId(MASK_STRING_SIMPLE_INLINED),
            ObjectId(MASK_STRING_XSD_EXTERN | 3),
            ObjectId(MASK_STRING_DATATYPE_TMP | 9),
            ObjectId(MASK_STRING_LANG_INLINED),
        ];
        for s in strings {
            assert_eq!(s.get_generic_type(), MASK_STRING);
        }

        let temporals = [
            ObjectId(MASK_DT_DATE),
            ObjectId(MASK_DT_TIME),
            ObjectId(MASK_DT_DATETIME),
            ObjectId(MASK_DT_DATETIMESTAMP),
        ];
        for t in temporals {
            assert_eq!(t.get_generic_type(), MASK_DT);
        }

        let numerics = [
            ObjectId::int(5).unwrap(),
            ObjectId::int(-5).unwrap(),
            ObjectId::float(1.0),
            ObjectId(MASK_DOUBLE_TMP | 1),
            ObjectId(MASK_DECIMAL_INLINED | 1),
        ];
        for n in numerics {
            assert_eq!(n.get_generic_type(), MASK_NUMERIC);
        }

        assert_eq!(ObjectId::anon(1).get_generic_type(), MASK_ANON);
        assert_eq!(ObjectId::anon_tmp(1).get_generic_type(), MASK_ANON);
        assert_eq!(ObjectId::BOOL_TRUE.get_generic_type(), MASK_BOOL_SUB);
        assert_eq!(ObjectId(MASK_IRI_EXTERN | 2).get_generic_type(), MASK_IRI);
    }

    #[test]
    fn test_sub_type_collapses_storage() {
        assert_eq!(
            ObjectId(MASK_STRING_SIMPLE_INLINED).get_sub_type(),
            ObjectId(MASK_STRING_SIMPLE_TMP | 5).get_sub_type()
        );
        assert_eq!(
            ObjectId(MASK_STRING_SIMPLE_EXTERN | 5).get_sub_type(),
            MASK_STRING_SIMPLE
        );
    }

    #[test]
    fn test_literal_tag_fields() {
        let oid = ObjectId(MASK_STRING_DATATYPE_EXTERN | (0x1234u64 << 40) | 0x56);
        assert_eq!(oid.literal_tag_id(), 0x1234);
        assert_eq!(oid.literal_str_id(), 0x56);
    }

    #[test]
    fn test_iri_fields() {
        let oid = ObjectId(MASK_IRI_EXTERN | (0xABu64 << 48) | 0x77);
        assert_eq!(oid.iri_prefix_id(), 0xAB);
        assert_eq!(oid.iri_content_id(), 0x77);
    }

    #[test]
    fn test_inline_string_round_trip() {
        for s in ["", "a", "hi", "seven77"] {
            let payload = inliner::inline_string::<7>(s).unwrap();
            assert_eq!(inliner::unpack_string_inlined::<7>(payload), s);

            let mut out = Vec::new();
            inliner::write_string_inlined::<7>(&mut out, payload).unwrap();
            assert_eq!(out, s.as_bytes());
        }
    }

    #[test]
    fn test_inline_string_budget() {
        assert!(inliner::inline_string::<7>("eight888").is_none());
        assert!(inliner::inline_string::<6>("seven77").is_none());
        assert!(inliner::inline_string::<5>("sixsix").is_none());
        assert!(inliner::inline_string::<5>("five5").is_some());
        // NUL bytes cannot inline.
        assert!(inliner::inline_string::<7>("a\0b").is_none());
    }

    #[test]
    fn test_inline_string_first_char_highest_byte() {
        let payload = inliner::inline_string::<7>("ab").unwrap();
        assert_eq!((payload >> 48) & 0xFF, b'a' as u64);
        assert_eq!((payload >> 40) & 0xFF, b'b' as u64);
    }

    #[test]
    fn test_bit_equality_is_term_equality() {
        assert_eq!(ObjectId::int(42).unwrap(), ObjectId::int(42).unwrap());
        assert_ne!(
            ObjectId::int(42).unwrap(),
            ObjectId(MASK_STRING_SIMPLE_INLINED | inliner::inline_string::<7>("42").unwrap())
        );
    }
}
