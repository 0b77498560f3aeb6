//! KiCad footprint backend.
//!
//! Emits the s-expression `(module ...)` footprint format. Coordinates go
//! out in millimetres with the y axis flipped, KiCad's convention. This
//! backend covers the common subset: drilled pins, surface pads, silk
//! lines and arcs. Thermal polygons and macro or polygon apertures are
//! refused rather than approximated.

use std::fmt::Write as _;

use crate::error::{Error, Result};
use crate::geom::{Dim, Pt};
use crate::model::{
    Aperture, Footprint, Land, Overlay, PinGeometry, PinSpec, Silk, SmtPad, ThruPin,
};
use crate::render::{Backend, WarnSink};

const BACKEND: &str = "kicad";

/// The KiCad footprint backend.
pub struct KicadBackend;

impl Backend for KicadBackend {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn render(&self, footprint: &Footprint, warn: &mut WarnSink) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "(module \"{}\" (layer F.Cu)", footprint.name).ok();
        if !footprint.description.is_empty() {
            writeln!(out, "  (descr \"{}\")", footprint.description).ok();
        }
        for c in &footprint.comments {
            writeln!(out, "  (tags \"{c}\")").ok();
        }
        let r = &footprint.refdes;
        writeln!(
            out,
            "  (fp_text reference REF** (at {} {}) (layer F.SilkS)",
            mm(r.loc.x),
            mm(-r.loc.y)
        )
        .ok();
        writeln!(
            out,
            "    (effects (font (size {0} {0}) (thickness {1})))",
            mm(r.size),
            mm(r.pen)
        )
        .ok();
        writeln!(out, "  )").ok();
        for pin in footprint.pins() {
            match &pin.geometry {
                PinGeometry::Thru(thru) => render_thru(&mut out, pin, thru)?,
                PinGeometry::Smt(pad) => render_smt(&mut out, pin, pad)?,
                PinGeometry::Thermal(_) => {
                    return Err(Error::cannot_render("thermal polygon", BACKEND))
                }
            }
        }
        for silk in &footprint.silk {
            render_silk(&mut out, silk);
        }
        if !footprint.keepouts.is_empty() {
            warn("keep-out rectangles have no module representation; dropped");
        }
        out.push_str(")\n");
        Ok(out)
    }
}

fn mm(d: Dim) -> String {
    format!("{:.4}", d.as_mm())
}

fn at(p: Pt) -> String {
    format!("(at {} {})", mm(p.x), mm(-p.y))
}

fn shape_and_size(aperture: &Aperture) -> Result<(&'static str, Dim, Dim)> {
    match aperture {
        Aperture::Circle { diameter } => Ok(("circle", *diameter, *diameter)),
        Aperture::Rectangle { x, y } => Ok(("rect", *x, *y)),
        Aperture::Obround { x, y } => Ok(("oval", *x, *y)),
        other => Err(Error::cannot_render(
            format!("{} aperture", other.kind()),
            BACKEND,
        )),
    }
}

fn mask_margin(mask: &Overlay) -> Result<Option<Dim>> {
    match mask {
        Overlay::None => Ok(None),
        Overlay::Derived { bloat } => Ok(Some(*bloat)),
        Overlay::Drawn { .. } => Err(Error::cannot_render("drawn mask opening", BACKEND)),
    }
}

fn render_thru(out: &mut String, pin: &PinSpec, thru: &ThruPin) -> Result<()> {
    let hole = thru.hole();
    if hole.slot.is_some() {
        return Err(Error::cannot_render("plated slot", BACKEND));
    }
    if !thru.symmetric() {
        return Err(Error::cannot_render("per-side pin lands", BACKEND));
    }
    let land = thru.solder_land();
    let (shape, xs, ys) = shape_and_size(&land.aperture)?;
    let margin = mask_margin(thru.solder_mask())?;
    let loc = pin.loc + land.loc;
    write!(
        out,
        "  (pad \"{}\" thru_hole {} {} (size {} {}) (drill {}) (layers *.Cu *.Mask)",
        pin.name(),
        shape,
        at(loc),
        mm(xs),
        mm(ys),
        mm(hole.diameter)
    )
    .ok();
    finish_pad(out, land, margin);
    Ok(())
}

fn render_smt(out: &mut String, pin: &PinSpec, pad: &SmtPad) -> Result<()> {
    let (shape, xs, ys) = shape_and_size(&pad.land.aperture)?;
    let margin = mask_margin(&pad.mask)?;
    if matches!(pad.paste, Overlay::Drawn { .. }) {
        return Err(Error::cannot_render("drawn paste opening", BACKEND));
    }
    let layers = if pad.on_back {
        "B.Cu B.Paste B.Mask"
    } else {
        "F.Cu F.Paste F.Mask"
    };
    let loc = pin.loc + pad.land.loc;
    write!(
        out,
        "  (pad \"{}\" smd {} {} (size {} {}) (layers {})",
        pin.name(),
        shape,
        at(loc),
        mm(xs),
        mm(ys),
        layers
    )
    .ok();
    finish_pad(out, &pad.land, margin);
    Ok(())
}

fn finish_pad(out: &mut String, land: &Land, margin: Option<Dim>) {
    if land.clearance.is_positive() {
        write!(out, " (clearance {})", mm(land.clearance)).ok();
    }
    if let Some(m) = margin {
        if m.is_positive() {
            write!(out, " (solder_mask_margin {})", mm(m)).ok();
        }
    }
    out.push_str(")\n");
}

fn render_silk(out: &mut String, silk: &Silk) {
    match silk {
        Silk::Line { start, end, pen } => {
            writeln!(
                out,
                "  (fp_line (start {} {}) (end {} {}) (layer F.SilkS) (width {}))",
                mm(start.x),
                mm(-start.y),
                mm(end.x),
                mm(-end.y),
                mm(*pen)
            )
            .ok();
        }
        Silk::Arc {
            centre,
            radius,
            start_angle,
            arc_angle,
            pen,
        } => {
            // fp_arc takes the centre, one endpoint, and the swept angle.
            let start = *centre
                + Pt::new(*radius, radius.zero_like()).rotate(start_angle.to_radians());
            writeln!(
                out,
                "  (fp_arc (start {} {}) (end {} {}) (angle {}) (layer F.SilkS) (width {}))",
                mm(centre.x),
                mm(-centre.y),
                mm(start.x),
                mm(-start.y),
                -arc_angle,
                mm(*pen)
            )
            .ok();
        }
        Silk::Text {
            loc,
            text,
            pen,
            size,
            ..
        } => {
            writeln!(
                out,
                "  (fp_text user \"{}\" (at {} {}) (layer F.SilkS)",
                text,
                mm(loc.x),
                mm(-loc.y)
            )
            .ok();
            writeln!(
                out,
                "    (effects (font (size {0} {0}) (thickness {1})))",
                mm(*size),
                mm(*pen)
            )
            .ok();
            writeln!(out, "  )").ok();
        }
    }
}
