//! COMPACT rendering.
//!
//! ```text
//! <METADATA-CLASS Resource="Property" Version="1.00.001" Date="...">
//! <COLUMNS>\tClassName\tStandardName\t...\t</COLUMNS>
//! <DATA>\tRES\tResidentialProperty\t...\t</DATA>
//! ...embedded child sections...
//! </METADATA-CLASS>
//! ```

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
    if kind == MetadataKind::System {
        write_system(out, ctx, objects);
        return;
    }

    write_open(out, ctx, kind);

    let columns = objects[0].attribute_map().specs();
    out.push_str("<COLUMNS>\t");
    for spec in columns {
        out.push_str(spec.name);
        out.push('\t');
    }
    out.push_str("</COLUMNS>\n");

    for object in objects {
        out.push_str("<DATA>\t");
        for spec in columns {
            out.push_str(&ctx.cell(object, spec));
            out.push('\t');
        }
        out.push_str("</DATA>\n");
    }

    write_children(out, ctx, objects);
    let _ = writeln!(out, "</METADATA-{}>", kind.wire_name());
}

fn write_open(out: &mut String, ctx: &FormatContext, kind: MetadataKind) {
    let _ = write!(out, "<METADATA-{}", kind.wire_name());
    for (key, value) in ctx.header(kind) {
        let _ = write!(out, " {}=\"{}\"", key, value);
    }
    let _ = writeln!(out, " Version=\"{}\" Date=\"{}\">", ctx.version(), ctx.date_text());
}

fn write_children(out: &mut String, ctx: &FormatContext, parents: &[&MetaObject]) {
    for parent in parents {
        for (kind, nested, children) in embedded(ctx, parent) {
            write_section(out, &nested, kind, &children);
        }
    }
}

/// The System section is a single tag rather than a table.
fn write_system(out: &mut String, ctx: &FormatContext, systems: &[&MetaObject]) {
    write_open(out, ctx, MetadataKind::System);
    for system in systems {
        let _ = write!(
            out,
            "<SYSTEM SystemID=\"{}\" SystemDescription=\"{}\"",
            system.attr_string("SystemID").unwrap_or_default(),
            system.attr_string("SystemDescription").unwrap_or_default()
        );
        if let Some(offset) = system.attr_string("TimeZoneOffset") {
            let _ = write!(out, " TimeZoneOffset=\"{}\"", offset);
        }
        out.push_str("/>\n");
        if let Some(comments) = system.attr_string("Comments") {
            let _ = writeln!(out, "<COMMENTS>{}</COMMENTS>", comments);
        }
    }
    write_children(out, ctx, systems);
    out.push_str("</METADATA-SYSTEM>\n");
}
