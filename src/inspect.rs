//! Structural report for loaded GDS libraries.
//!
//! A formatted read-and-print over the gds21 object graph: library header,
//! then per-cell element counts and one block per polygon, path, label, and
//! reference, all in the order the file stores them. No geometry is
//! transformed; the only failures are write errors from the sink.

use std::io::{self, Write};

use gds21::{
    GdsArrayRef, GdsBoundary, GdsElement, GdsLibrary, GdsPath, GdsPoint, GdsStrans, GdsStruct,
    GdsStructRef, GdsTextElem,
};

/// Writes the structural report for `lib` to `out`.
pub fn dump<W: Write>(lib: &GdsLibrary, out: &mut W) -> io::Result<()> {
    writeln!(out, "Library: {}", lib.name)?;
    writeln!(out, "Number of cells: {}", lib.structs.len())?;
    let names: Vec<&str> = lib.structs.iter().map(|s| s.name.as_str()).collect();
    writeln!(out, "Cells: {names:?}")?;
    writeln!(out)?;

    for strukt in &lib.structs {
        dump_struct(strukt, out)?;
        writeln!(out)?;
    }
    Ok(())
}

fn dump_struct<W: Write>(strukt: &GdsStruct, out: &mut W) -> io::Result<()> {
    let mut polygons = Vec::new();
    let mut paths = Vec::new();
    let mut labels = Vec::new();
    let mut refs = Vec::new();
    for elem in &strukt.elems {
        match elem {
            GdsElement::GdsBoundary(x) => polygons.push(x),
            GdsElement::GdsPath(x) => paths.push(x),
            GdsElement::GdsTextElem(x) => labels.push(x),
            GdsElement::GdsStructRef(x) => refs.push(Ref::Single(x)),
            GdsElement::GdsArrayRef(x) => refs.push(Ref::Array(x)),
            _ => (),
        }
    }

    writeln!(out, "Cell: {}", strukt.name)?;
    writeln!(out, "  Polygons: {}", polygons.len())?;
    writeln!(out, "  Paths: {}", paths.len())?;
    writeln!(out, "  Labels: {}", labels.len())?;
    writeln!(out, "  References: {}", refs.len())?;

    for poly in polygons {
        dump_polygon(poly, out)?;
    }
    for path in paths {
        dump_path(path, out)?;
    }
    for label in labels {
        dump_label(label, out)?;
    }
    for r in refs {
        match r {
            Ref::Single(x) => dump_struct_ref(x, out)?,
            Ref::Array(x) => dump_array_ref(x, out)?,
        }
    }
    Ok(())
}

/// The two reference flavors a cell may contain. Plain references carry a
/// single origin; array references additionally carry column/row counts and
/// spacing vectors.
enum Ref<'a> {
    Single(&'a GdsStructRef),
    Array(&'a GdsArrayRef),
}

fn dump_polygon<W: Write>(poly: &GdsBoundary, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "    Polygon - Layer {}, datatype {}",
        poly.layer, poly.datatype
    )?;
    writeln!(out, "      Points: {}", fmt_points(&poly.xy))
}

fn dump_path<W: Write>(path: &GdsPath, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "    Path - Layer {}, datatype {}",
        path.layer, path.datatype
    )?;
    writeln!(out, "      Points: {}", fmt_points(&path.xy))?;
    if let Some(width) = path.width {
        writeln!(out, "      Width: {width}")?;
    }
    if let Some(path_type) = path.path_type {
        writeln!(out, "      Path type: {path_type}")?;
    }
    Ok(())
}

fn dump_label<W: Write>(label: &GdsTextElem, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "    Label - Layer {}, texttype {}",
        label.layer, label.texttype
    )?;
    writeln!(
        out,
        "      Text: {}, Origin: {}",
        label.string,
        fmt_point(&label.xy)
    )
}

fn dump_struct_ref<W: Write>(sref: &GdsStructRef, out: &mut W) -> io::Result<()> {
    writeln!(out, "    Reference to cell: {}", sref.name)?;
    writeln!(out, "      Origin: {}", fmt_point(&sref.xy))?;
    dump_strans(sref.strans.as_ref(), out)
}

fn dump_array_ref<W: Write>(aref: &GdsArrayRef, out: &mut W) -> io::Result<()> {
    writeln!(out, "    Reference to cell: {}", aref.name)?;
    writeln!(out, "      Origin: {}", fmt_point(&aref.xy[0]))?;
    dump_strans(aref.strans.as_ref(), out)?;
    // Single-column arrays read like plain references; only report the
    // array geometry when there is more than one column.
    if aref.cols > 1 {
        writeln!(
            out,
            "      Array: {} columns x {} rows",
            aref.cols, aref.rows
        )?;
        // GDSII stores the array extent as two corner points; recover the
        // per-element spacing from them.
        let xstep = (aref.xy[1].x - aref.xy[0].x) / i32::from(aref.cols);
        let ystep = (aref.xy[2].y - aref.xy[0].y) / i32::from(aref.rows.max(1));
        writeln!(out, "      Spacing: ({xstep}, {ystep})")?;
    }
    Ok(())
}

fn dump_strans<W: Write>(strans: Option<&GdsStrans>, out: &mut W) -> io::Result<()> {
    let rotation = strans.and_then(|s| s.angle).unwrap_or(0.0);
    let mag = strans.and_then(|s| s.mag).unwrap_or(1.0);
    let reflected = strans.map(|s| s.reflected).unwrap_or(false);
    writeln!(out, "      Rotation: {rotation} degrees")?;
    writeln!(out, "      Magnification: {mag}")?;
    writeln!(out, "      X-reflection: {reflected}")
}

fn fmt_point(pt: &GdsPoint) -> String {
    format!("({}, {})", pt.x, pt.y)
}

fn fmt_points(pts: &[GdsPoint]) -> String {
    let mut s = String::from("[");
    for (i, pt) in pts.iter().enumerate() {
        if i > 0 {
            s.push_str(", ");
        }
        s.push_str(&fmt_point(pt));
    }
    s.push(']');
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(lib: &GdsLibrary) -> String {
        let mut buf = Vec::new();
        dump(lib, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn single_cell_lib() -> GdsLibrary {
        let mut lib = GdsLibrary::new("demo");
        let mut top = GdsStruct::new("TOP");
        top.elems.push(
            GdsBoundary {
                layer: 1,
                datatype: 0,
                xy: GdsPoint::vec(&[(0, 0), (10, 0), (10, 10), (0, 10)]),
                ..Default::default()
            }
            .into(),
        );
        lib.structs.push(top);
        lib
    }

    #[test]
    fn test_single_polygon_report() {
        let out = report(&single_cell_lib());
        assert!(out.contains("Library: demo"));
        assert!(out.contains("Number of cells: 1"));
        assert!(out.contains("Cells: [\"TOP\"]"));
        assert!(out.contains("Cell: TOP"));
        assert!(out.contains("Polygons: 1"));
        assert!(out.contains("Paths: 0"));
        assert!(out.contains("Polygon - Layer 1, datatype 0"));
        assert!(out.contains("Points: [(0, 0), (10, 0), (10, 10), (0, 10)]"));
    }

    #[test]
    fn test_label_and_path_report() {
        let mut lib = GdsLibrary::new("demo");
        let mut top = GdsStruct::new("TOP");
        top.elems.push(
            GdsPath {
                layer: 2,
                datatype: 1,
                width: Some(50),
                xy: GdsPoint::vec(&[(0, 0), (100, 0)]),
                ..Default::default()
            }
            .into(),
        );
        top.elems.push(
            GdsTextElem {
                string: "Ring Single".to_string(),
                layer: 1,
                texttype: 0,
                xy: GdsPoint::new(-50, -40),
                ..Default::default()
            }
            .into(),
        );
        lib.structs.push(top);

        let out = report(&lib);
        assert!(out.contains("Paths: 1"));
        assert!(out.contains("Labels: 1"));
        assert!(out.contains("Path - Layer 2, datatype 1"));
        assert!(out.contains("Points: [(0, 0), (100, 0)]"));
        assert!(out.contains("Width: 50"));
        assert!(out.contains("Label - Layer 1, texttype 0"));
        assert!(out.contains("Text: Ring Single, Origin: (-50, -40)"));
    }

    #[test]
    fn test_array_reference_emits_counts_and_spacing() {
        let mut lib = GdsLibrary::new("demo");
        let unit = GdsStruct::new("UNIT");
        let mut top = GdsStruct::new("TOP");
        top.elems.push(
            GdsArrayRef {
                name: "UNIT".to_string(),
                xy: [
                    GdsPoint::new(0, 0),
                    GdsPoint::new(381, 0),
                    GdsPoint::new(0, 254),
                ],
                cols: 3,
                rows: 2,
                ..Default::default()
            }
            .into(),
        );
        lib.structs.push(unit);
        lib.structs.push(top);

        let out = report(&lib);
        assert!(out.contains("References: 1"));
        assert!(out.contains("Reference to cell: UNIT"));
        assert!(out.contains("Array: 3 columns x 2 rows"));
        assert!(out.contains("Spacing: (127, 127)"));
    }

    #[test]
    fn test_single_column_array_omits_array_lines() {
        let mut lib = GdsLibrary::new("demo");
        let unit = GdsStruct::new("UNIT");
        let mut top = GdsStruct::new("TOP");
        top.elems.push(
            GdsArrayRef {
                name: "UNIT".to_string(),
                xy: [
                    GdsPoint::new(0, 0),
                    GdsPoint::new(0, 0),
                    GdsPoint::new(0, 635),
                ],
                cols: 1,
                rows: 5,
                ..Default::default()
            }
            .into(),
        );
        lib.structs.push(unit);
        lib.structs.push(top);

        let out = report(&lib);
        // A 1xN vertical array reads like a plain reference.
        assert!(out.contains("References: 1"));
        assert!(out.contains("Reference to cell: UNIT"));
        assert!(out.contains("Origin: (0, 0)"));
        assert!(!out.contains("Array:"));
        assert!(!out.contains("Spacing:"));
    }

    #[test]
    fn test_plain_reference_omits_array_lines() {
        let mut lib = GdsLibrary::new("demo");
        let unit = GdsStruct::new("UNIT");
        let mut top = GdsStruct::new("TOP");
        top.elems.push(
            GdsStructRef {
                name: "UNIT".to_string(),
                xy: GdsPoint::new(7, -3),
                strans: Some(GdsStrans {
                    reflected: true,
                    angle: Some(90.0),
                    mag: Some(2.0),
                    ..Default::default()
                }),
                ..Default::default()
            }
            .into(),
        );
        lib.structs.push(unit);
        lib.structs.push(top);

        let out = report(&lib);
        assert!(out.contains("Reference to cell: UNIT"));
        assert!(out.contains("Origin: (7, -3)"));
        assert!(out.contains("Rotation: 90 degrees"));
        assert!(out.contains("Magnification: 2"));
        assert!(out.contains("X-reflection: true"));
        assert!(!out.contains("Array:"));
        assert!(!out.contains("Spacing:"));
    }

    #[test]
    fn test_cells_reported_in_library_order() {
        let mut lib = GdsLibrary::new("demo");
        for name in ["B", "A", "C"] {
            lib.structs.push(GdsStruct::new(name));
        }
        let out = report(&lib);
        assert!(out.contains("Cells: [\"B\", \"A\", \"C\"]"));
        let b = out.find("Cell: B").unwrap();
        let a = out.find("Cell: A").unwrap();
        let c = out.find("Cell: C").unwrap();
        assert!(b < a && a < c);
    }
}
