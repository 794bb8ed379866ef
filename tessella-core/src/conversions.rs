//! Store-aware packing and unpacking.
//!
//! `ObjectId` holds the store-independent constructors (ints, floats,
//! bools, inline forms). This module covers the categories whose content
//! lives in a store: it packs into the most compact representation
//! available, and values minted during a query always intern into the
//! per-query temp store, never the persistent dictionary.

use bigdecimal::BigDecimal;

use crate::catalog::Catalog;
use crate::decimal::{self, DecimalInlined};
use crate::dictionary::{self, StringDictionary};
use crate::error::{EngineError, Result};
use crate::object_id::{inliner, ObjectId};
use crate::object_id::{
    IRI_INLINE_BYTES, MASK_DECIMAL_EXTERN, MASK_DECIMAL_INLINED, MASK_DECIMAL_TMP,
    MASK_DOUBLE_EXTERN, MASK_DOUBLE_TMP, MASK_IRI_EXTERN, MASK_IRI_INLINED, MASK_IRI_TMP,
    MASK_LITERAL, MASK_STRING_DATATYPE_EXTERN, MASK_STRING_DATATYPE_INLINED,
    MASK_STRING_DATATYPE_TMP, MASK_STRING_LANG_EXTERN, MASK_STRING_LANG_INLINED,
    MASK_STRING_LANG_TMP, MASK_STRING_SIMPLE, MASK_STRING_SIMPLE_EXTERN,
    MASK_STRING_SIMPLE_INLINED, MASK_STRING_SIMPLE_TMP, MASK_STRING_XSD_EXTERN,
    MASK_STRING_XSD_INLINED, MASK_STRING_XSD_TMP, STR_INLINE_BYTES, STR_TAG_INLINE_BYTES,
};
use crate::tmp::TmpManager;

const LITERAL_TAG_SHIFT: u32 = 40;
const IRI_PREFIX_SHIFT: u32 = 48;

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

/// Pack a simple string literal: inline when it fits, else temp store.
pub fn pack_string_simple(s: &str, tmp: &TmpManager) -> ObjectId {
    match inliner::inline_string::<STR_INLINE_BYTES>(s) {
        Some(payload) => ObjectId(MASK_STRING_SIMPLE_INLINED | payload),
        None => ObjectId(MASK_STRING_SIMPLE_TMP | tmp.intern_str(s.as_bytes())),
    }
}

/// Pack a string with an explicit `xsd:string` datatype.
pub fn pack_string_xsd(s: &str, tmp: &TmpManager) -> ObjectId {
    match inliner::inline_string::<STR_INLINE_BYTES>(s) {
        Some(payload) => ObjectId(MASK_STRING_XSD_INLINED | payload),
        None => ObjectId(MASK_STRING_XSD_TMP | tmp.intern_str(s.as_bytes())),
    }
}

/// Pack a datatyped literal. `datatype_id` is the 16-bit id, manager flag
/// included when it points at the temp catalog.
pub fn pack_string_datatype(s: &str, datatype_id: u16, tmp: &TmpManager) -> ObjectId {
    let tag_bits = (datatype_id as u64) << LITERAL_TAG_SHIFT;
    match inliner::inline_string::<STR_TAG_INLINE_BYTES>(s) {
        Some(payload) => ObjectId(MASK_STRING_DATATYPE_INLINED | tag_bits | payload),
        None => {
            let id = tmp.intern_str(s.as_bytes()) & MASK_LITERAL;
            ObjectId(MASK_STRING_DATATYPE_TMP | tag_bits | id)
        }
    }
}

/// Pack a language-tagged literal.
pub fn pack_string_lang(s: &str, language_id: u16, tmp: &TmpManager) -> ObjectId {
    let tag_bits = (language_id as u64) << LITERAL_TAG_SHIFT;
    match inliner::inline_string::<STR_TAG_INLINE_BYTES>(s) {
        Some(payload) => ObjectId(MASK_STRING_LANG_INLINED | tag_bits | payload),
        None => {
            let id = tmp.intern_str(s.as_bytes()) & MASK_LITERAL;
            ObjectId(MASK_STRING_LANG_TMP | tag_bits | id)
        }
    }
}

/// Unpack the body of any string flavor (simple, xsd, datatyped,
/// lang-tagged) from whichever store holds it.
pub fn unpack_string(
    oid: ObjectId,
    dict: &dyn StringDictionary,
    tmp: &TmpManager,
) -> Result<String> {
    let bytes = match oid.get_type() {
        MASK_STRING_SIMPLE_INLINED | MASK_STRING_XSD_INLINED => {
            return Ok(inliner::unpack_string_inlined::<STR_INLINE_BYTES>(oid.get_value()))
        }
        MASK_STRING_DATATYPE_INLINED | MASK_STRING_LANG_INLINED => {
            return Ok(inliner::unpack_string_inlined::<STR_TAG_INLINE_BYTES>(
                oid.get_value() & MASK_LITERAL,
            ))
        }
        MASK_STRING_SIMPLE_EXTERN | MASK_STRING_XSD_EXTERN => {
            dictionary::resolve(dict, oid.get_value())?.to_vec()
        }
        MASK_STRING_DATATYPE_EXTERN | MASK_STRING_LANG_EXTERN => {
            dictionary::resolve(dict, oid.literal_str_id())?.to_vec()
        }
        MASK_STRING_SIMPLE_TMP | MASK_STRING_XSD_TMP => tmp.get_str(oid.get_value())?,
        MASK_STRING_DATATYPE_TMP | MASK_STRING_LANG_TMP => tmp.get_str(oid.literal_str_id())?,
        other => {
            return Err(EngineError::TypeTag {
                tag: (other >> 56) as u8,
                context: "unpack_string",
            })
        }
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Unpack a simple string, or `None` when the sub-type is not
/// `MASK_STRING_SIMPLE`. Type-guarded expressions use this.
pub fn unpack_string_simple(
    oid: ObjectId,
    dict: &dyn StringDictionary,
    tmp: &TmpManager,
) -> Result<Option<String>> {
    if oid.get_sub_type() != MASK_STRING_SIMPLE {
        return Ok(None);
    }
    unpack_string(oid, dict, tmp).map(Some)
}

// ---------------------------------------------------------------------------
// IRIs
// ---------------------------------------------------------------------------

/// Pack an IRI: split off the longest catalog prefix, then inline the local
/// part when it fits, else temp store.
pub fn pack_iri(iri: &str, catalog: &Catalog, tmp: &TmpManager) -> Result<ObjectId> {
    let (prefix_id, prefix) = catalog
        .find_prefix(iri)
        .ok_or_else(|| EngineError::Malformed(format!("no catalog prefix for IRI {:?}", iri)))?;
    let local = &iri[prefix.len()..];
    let prefix_bits = (prefix_id as u64) << IRI_PREFIX_SHIFT;

    match inliner::inline_string::<IRI_INLINE_BYTES>(local) {
        Some(payload) => Ok(ObjectId(MASK_IRI_INLINED | prefix_bits | payload)),
        None => {
            let id = tmp.intern_str(local.as_bytes());
            Ok(ObjectId(MASK_IRI_TMP | prefix_bits | id))
        }
    }
}

/// Unpack a full IRI (prefix resolved through the catalog).
pub fn unpack_iri(
    oid: ObjectId,
    catalog: &Catalog,
    dict: &dyn StringDictionary,
    tmp: &TmpManager,
) -> Result<String> {
    let prefix = catalog.prefix(oid.iri_prefix_id())?;
    let local = match oid.get_type() {
        MASK_IRI_INLINED => {
            inliner::unpack_string_inlined::<IRI_INLINE_BYTES>(oid.get_value())
        }
        MASK_IRI_EXTERN => {
            let bytes = dictionary::resolve(dict, oid.iri_content_id())?;
            String::from_utf8_lossy(bytes).into_owned()
        }
        MASK_IRI_TMP => {
            let bytes = tmp.get_str(oid.iri_content_id())?;
            String::from_utf8_lossy(&bytes).into_owned()
        }
        other => {
            return Err(EngineError::TypeTag { tag: (other >> 56) as u8, context: "unpack_iri" })
        }
    };
    Ok(format!("{}{}", prefix, local))
}

// ---------------------------------------------------------------------------
// Doubles
// ---------------------------------------------------------------------------

/// Pack a double minted during the query (8 little-endian bytes in the temp
/// store).
pub fn pack_double(value: f64, tmp: &TmpManager) -> ObjectId {
    let id = tmp.intern_str(&value.to_le_bytes());
    ObjectId(MASK_DOUBLE_TMP | id)
}

/// Unpack a double from either store.
pub fn unpack_double(
    oid: ObjectId,
    dict: &dyn StringDictionary,
    tmp: &TmpManager,
) -> Result<f64> {
    let bytes = match oid.get_type() {
        MASK_DOUBLE_EXTERN => dictionary::resolve(dict, oid.get_value())?.to_vec(),
        MASK_DOUBLE_TMP => tmp.get_str(oid.get_value())?,
        other => {
            return Err(EngineError::TypeTag {
                tag: (other >> 56) as u8,
                context: "unpack_double",
            })
        }
    };
    let arr: [u8; 8] = bytes
        .as_slice()
        .try_into()
        .map_err(|_| EngineError::Malformed(format!("double payload of {} bytes", bytes.len())))?;
    Ok(f64::from_le_bytes(arr))
}

// ---------------------------------------------------------------------------
// Decimals
// ---------------------------------------------------------------------------

/// Pack a decimal: inline fixed-point when it fits, else canonical text in
/// the temp store.
pub fn pack_decimal(value: &BigDecimal, tmp: &TmpManager) -> ObjectId {
    match decimal::inline_from_big_decimal(value) {
        Some(payload) => ObjectId(MASK_DECIMAL_INLINED | payload),
        None => {
            let id = tmp.intern_str(decimal::external_string(value).as_bytes());
            ObjectId(MASK_DECIMAL_TMP | id)
        }
    }
}

/// Unpack a decimal of any storage flavor.
pub fn unpack_decimal(
    oid: ObjectId,
    dict: &dyn StringDictionary,
    tmp: &TmpManager,
) -> Result<BigDecimal> {
    match oid.get_type() {
        MASK_DECIMAL_INLINED => Ok(DecimalInlined::new(oid.get_value()).to_big_decimal()),
        MASK_DECIMAL_EXTERN => {
            let bytes = dictionary::resolve(dict, oid.get_value())?;
            decimal::parse_external(&String::from_utf8_lossy(bytes))
        }
        MASK_DECIMAL_TMP => {
            let bytes = tmp.get_str(oid.get_value())?;
            decimal::parse_external(&String::from_utf8_lossy(&bytes))
        }
        other => Err(EngineError::TypeTag {
            tag: (other >> 56) as u8,
            context: "unpack_decimal",
        }),
    }
}
