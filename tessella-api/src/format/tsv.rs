//! SPARQL-TSV term rendering
//!
//! Renders any non-NULL `ObjectId` in its canonical N-Triples / SPARQL-TSV
//! form. Two write layers share the sink: the raw layer carries structure
//! (angle brackets, quotes, datatype suffixes) and the escaping layer
//! carries literal bodies, backslash-escaping the bytes TSV cannot hold
//! raw.

use std::io::{self, Write};

use tessella_core::object_id::{self, inliner, MASK_TAG_MANAGER};
use tessella_core::{conversions, decimal, DateTime, DecimalInlined, ObjectId};
use tessella_query::QueryContext;
use tessella_vocab::xsd;

use crate::error::{FormatError, Result};

/// Escaping writer: passes bytes through to the sink, backslash-escaping
/// tab, newline, carriage return, backslash, and double quote.
pub struct TsvEscape<'a> {
    inner: &'a mut dyn Write,
}

impl<'a> TsvEscape<'a> {
    pub fn new(inner: &'a mut dyn Write) -> Self {
        Self { inner }
    }
}

impl Write for TsvEscape<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for &b in buf {
            match b {
                b'\t' => self.inner.write_all(b"\\t")?,
                b'\n' => self.inner.write_all(b"\\n")?,
                b'\r' => self.inner.write_all(b"\\r")?,
                b'\\' => self.inner.write_all(b"\\\\")?,
                b'"' => self.inner.write_all(b"\\\"")?,
                _ => self.inner.write_all(&[b])?,
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Write literal-body bytes through the escaping layer.
fn write_escaped(out: &mut dyn Write, bytes: &[u8]) -> io::Result<()> {
    TsvEscape::new(out).write_all(bytes)
}

/// Write the canonical TSV form of `value`.
///
/// The driver elides NULL columns before calling the printer; an unknown
/// tag is a codec/printer desync and fails the query.
pub fn print_term(out: &mut dyn Write, ctx: &QueryContext<'_>, value: ObjectId) -> Result<()> {
    debug_assert!(!value.is_null(), "print_term called with NULL");

    match value.get_type() {
        object_id::MASK_NULL => {}

        object_id::MASK_ANON_INLINED => {
            let mut buf = itoa::Buffer::new();
            out.write_all(b"_:b")?;
            out.write_all(buf.format(value.get_value()).as_bytes())?;
        }
        object_id::MASK_ANON_TMP => {
            let mut buf = itoa::Buffer::new();
            out.write_all(b"_:c")?;
            out.write_all(buf.format(value.get_value()).as_bytes())?;
        }

        object_id::MASK_STRING_SIMPLE_INLINED => {
            out.write_all(b"\"")?;
            inliner::write_string_inlined::<{ object_id::STR_INLINE_BYTES }>(
                &mut TsvEscape::new(out),
                value.get_value(),
            )?;
            out.write_all(b"\"")?;
        }
        object_id::MASK_STRING_SIMPLE_EXTERN | object_id::MASK_STRING_SIMPLE_TMP => {
            let body = conversions::unpack_string(value, ctx.dict, ctx.tmp)?;
            out.write_all(b"\"")?;
            write_escaped(out, body.as_bytes())?;
            out.write_all(b"\"")?;
        }

        object_id::MASK_STRING_XSD_INLINED => {
            out.write_all(b"\"")?;
            inliner::write_string_inlined::<{ object_id::STR_INLINE_BYTES }>(
                &mut TsvEscape::new(out),
                value.get_value(),
            )?;
            write!(out, "\"^^<{}>", xsd::STRING)?;
        }
        object_id::MASK_STRING_XSD_EXTERN | object_id::MASK_STRING_XSD_TMP => {
            let body = conversions::unpack_string(value, ctx.dict, ctx.tmp)?;
            out.write_all(b"\"")?;
            write_escaped(out, body.as_bytes())?;
            write!(out, "\"^^<{}>", xsd::STRING)?;
        }

        object_id::MASK_STRING_DATATYPE_INLINED
        | object_id::MASK_STRING_DATATYPE_EXTERN
        | object_id::MASK_STRING_DATATYPE_TMP => {
            let body = conversions::unpack_string(value, ctx.dict, ctx.tmp)?;
            out.write_all(b"\"")?;
            write_escaped(out, body.as_bytes())?;
            out.write_all(b"\"")?;
            print_datatype(out, ctx, value.literal_tag_id())?;
        }

        object_id::MASK_STRING_LANG_INLINED
        | object_id::MASK_STRING_LANG_EXTERN
        | object_id::MASK_STRING_LANG_TMP => {
            let body = conversions::unpack_string(value, ctx.dict, ctx.tmp)?;
            out.write_all(b"\"")?;
            write_escaped(out, body.as_bytes())?;
            out.write_all(b"\"")?;
            print_language(out, ctx, value.literal_tag_id())?;
        }

        object_id::MASK_POSITIVE_INT | object_id::MASK_NEGATIVE_INT => {
            let mut buf = itoa::Buffer::new();
            out.write_all(buf.format(value.unpack_int()).as_bytes())?;
        }

        object_id::MASK_FLOAT => {
            let mut buf = ryu::Buffer::new();
            out.write_all(buf.format(value.unpack_float()).as_bytes())?;
        }

        object_id::MASK_DOUBLE_EXTERN | object_id::MASK_DOUBLE_TMP => {
            let d = conversions::unpack_double(value, ctx.dict, ctx.tmp)?;
            let mut buf = ryu::Buffer::new();
            out.write_all(buf.format(d).as_bytes())?;
        }

        object_id::MASK_BOOL => {
            let text = if value.unpack_bool() { "true" } else { "false" };
            write!(out, "{}^^<{}>", text, xsd::BOOLEAN)?;
        }

        object_id::MASK_IRI_INLINED => {
            out.write_all(b"<")?;
            out.write_all(ctx.catalog.prefix(value.iri_prefix_id())?.as_bytes())?;
            inliner::write_string_inlined::<{ object_id::IRI_INLINE_BYTES }>(
                out,
                value.get_value() & object_id::MASK_IRI_CONTENT,
            )?;
            out.write_all(b">")?;
        }
        object_id::MASK_IRI_EXTERN | object_id::MASK_IRI_TMP => {
            let iri = conversions::unpack_iri(value, ctx.catalog, ctx.dict, ctx.tmp)?;
            write!(out, "<{}>", iri)?;
        }

        object_id::MASK_DT_DATE
        | object_id::MASK_DT_TIME
        | object_id::MASK_DT_DATETIME
        | object_id::MASK_DT_DATETIMESTAMP => {
            let dt = DateTime::from_id(value)?;
            write!(out, "\"{}\"^^<{}>", dt.value_string(), dt.datatype_iri())?;
        }

        object_id::MASK_DECIMAL_INLINED => {
            let text = DecimalInlined::new(value.get_value()).value_string();
            out.write_all(text.as_bytes())?;
        }
        object_id::MASK_DECIMAL_EXTERN | object_id::MASK_DECIMAL_TMP => {
            let dec = conversions::unpack_decimal(value, ctx.dict, ctx.tmp)?;
            out.write_all(decimal::external_string(&dec).as_bytes())?;
        }

        object_id::MASK_PATH => {
            out.write_all(b"[")?;
            print_path(out, ctx, value.get_value())?;
            out.write_all(b"]")?;
        }

        other => {
            return Err(FormatError::UnknownTag { tag: (other >> 56) as u8 });
        }
    }
    Ok(())
}

/// `^^<iri>` suffix; the id's high bit selects the temp catalog.
fn print_datatype(out: &mut dyn Write, ctx: &QueryContext<'_>, datatype_id: u16) -> Result<()> {
    out.write_all(b"^^<")?;
    if datatype_id & MASK_TAG_MANAGER == 0 {
        out.write_all(ctx.catalog.datatype(datatype_id)?.as_bytes())?;
    } else {
        let iri = ctx.tmp.datatype(datatype_id & !MASK_TAG_MANAGER)?;
        out.write_all(iri.as_bytes())?;
    }
    out.write_all(b">")?;
    Ok(())
}

/// `@tag` suffix; the id's high bit selects the temp catalog.
fn print_language(out: &mut dyn Write, ctx: &QueryContext<'_>, language_id: u16) -> Result<()> {
    out.write_all(b"@")?;
    if language_id & MASK_TAG_MANAGER == 0 {
        out.write_all(ctx.catalog.language(language_id)?.as_bytes())?;
    } else {
        let tag = ctx.tmp.language(language_id & !MASK_TAG_MANAGER)?;
        out.write_all(tag.as_bytes())?;
    }
    Ok(())
}

/// Render a stored path: nodes in term form, edges space-separated with a
/// `^` prefix when inverse.
fn print_path(out: &mut dyn Write, ctx: &QueryContext<'_>, path_id: u64) -> Result<()> {
    let to_io = |e: FormatError| io::Error::new(io::ErrorKind::Other, e.to_string());

    let mut print_node = |w: &mut dyn Write, node: ObjectId| -> io::Result<()> {
        print_term(w, ctx, node).map_err(to_io)
    };
    // Only IRIs are possible edges, so no body escaping is needed.
    let mut print_edge = |w: &mut dyn Write, edge: ObjectId, inverse: bool| -> io::Result<()> {
        w.write_all(b" ")?;
        if inverse {
            w.write_all(b"^")?;
        }
        print_term(w, ctx, edge).map_err(to_io)?;
        w.write_all(b" ")
    };

    ctx.paths
        .print(out, path_id, &mut print_node, &mut print_edge)?;
    Ok(())
}
