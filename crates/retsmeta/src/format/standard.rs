//! STANDARD-XML rendering.
//!
//! Same header tag as COMPACT, then one element per entity holding one child
//! element per declared column. Embedded child sections sit inside the
//! parent's element.

use std::fmt::Write;

use super::{embedded, FormatContext};
use crate::metadata::{MetaObject, MetadataKind};

pub(super) fn write_section(
    out: &mut String,
    ctx: &FormatContext,
    kind: MetadataKind,
    objects: &[&MetaObject],
) {
    if objects.is_empty() {
        return;
    }

    let _ = write!(out, "<METADATA-{}", kind.wire_name());
    for (key, value) in ctx.header(kind) {
        let _ = write!(out, " {}=\"{}\"", key, escape(value));
    }
    let _ = writeln!(
        out,
        " Version=\"{}\" Date=\"{}\">",
        escape(ctx.version()),
        ctx.date_text()
    );

    let element = kind.element_name();
    for object in objects {
        let _ = writeln!(out, "<{}>", element);
        for spec in object.attribute_map().specs() {
            let _ = writeln!(out, "<{0}>{1}</{0}>", spec.name, escape(&ctx.cell(object, spec)));
        }
        for (child_kind, nested, children) in embedded(ctx, object) {
            write_section(out, &nested, child_kind, &children);
        }
        let _ = writeln!(out, "</{}>", element);
    }

    let _ = writeln!(out, "</METADATA-{}>", kind.wire_name());
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}
