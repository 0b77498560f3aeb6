//! gEDA/PCB element backend.
//!
//! Emits the textual `Element[...]` footprint format used by gEDA PCB.
//! All coordinates go out in centimils with the y axis flipped, since PCB
//! grows y downward. Pad clearance in the file format is the full
//! copper-to-copper gap, twice the model's per-side clearance.
//!
//! The format has no native obround-through-pin or per-side pad shapes,
//! so an asymmetric or non-simple drilled pin is emitted as a minimal
//! `Pin[]` carrying the drill plus an explicit `Pad[]` for each side
//! whose land the minimal pin does not already cover.

use std::fmt;
use std::fmt::Write as _;

use bitflags::bitflags;

use crate::error::{Error, Result};
use crate::geom::{Dim, Pt};
use crate::model::{
    Aperture, Footprint, Land, Overlay, PinGeometry, PinSpec, SmtPad, ThermalPolygon, ThruPin,
};
use crate::render::{Backend, WarnSink};

const BACKEND: &str = "geda";
const INDENT: &str = "    ";

bitflags! {
    /// Pin/pad attribute flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    struct ObjFlags: u8 {
        const SQUARE = 1;
        const ONSOLDER = 2;
    }
}

impl fmt::Display for ObjFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, flag) in [("square", Self::SQUARE), ("onsolder", Self::ONSOLDER)] {
            if self.contains(flag) {
                if !first {
                    f.write_str(",")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// The gEDA PCB footprint backend.
pub struct GedaBackend;

impl Backend for GedaBackend {
    fn name(&self) -> &'static str {
        BACKEND
    }

    fn render(&self, footprint: &Footprint, warn: &mut WarnSink) -> Result<String> {
        let mut out = String::new();
        let refdes = &footprint.refdes;
        let tscale = ((refdes.size.as_mil() / 40.0) * 100.0).round() as i64;
        let trot = ((refdes.rotation.rem_euclid(360.0)) / 90.0) as i64;
        writeln!(
            out,
            "Element[\"\" \"\" \"\" \"\" 1000 1000 {} {} {} {} \"\"]",
            x_cm(refdes.loc),
            y_cm(refdes.loc),
            trot,
            tscale
        )
        .ok();
        out.push_str("(\n");
        if !footprint.description.is_empty() {
            comment(&mut out, &footprint.description);
        }
        for c in &footprint.comments {
            comment(&mut out, c);
        }
        for pin in footprint.pins() {
            match &pin.geometry {
                PinGeometry::Thru(thru) => render_thru(&mut out, pin, thru)?,
                PinGeometry::Smt(pad) => render_smt(&mut out, pin, pad, warn)?,
                PinGeometry::Thermal(t) => render_thermal(&mut out, pin, t, warn)?,
            }
        }
        for silk in &footprint.silk {
            render_silk(&mut out, silk, warn);
        }
        for keepout in &footprint.keepouts {
            render_keepout(&mut out, keepout);
        }
        out.push_str(")\n");
        Ok(out)
    }
}

fn x_cm(p: Pt) -> i64 {
    p.x.centimils()
}

// PCB's y axis points down.
fn y_cm(p: Pt) -> i64 {
    -p.y.centimils()
}

fn comment(out: &mut String, text: &str) {
    writeln!(out, "{INDENT}# {text}").ok();
}

fn thickness(aperture: &Aperture) -> Result<Dim> {
    aperture.thickness().ok_or_else(|| {
        Error::cannot_render(format!("{} aperture", aperture.kind()), BACKEND)
    })
}

/// Full mask-opening width for an opening over `aperture`. A closed layer
/// goes out as width zero.
fn mask_width(mask: &Overlay, aperture: &Aperture) -> Result<Dim> {
    if matches!(mask, Overlay::Drawn { .. }) {
        return Err(Error::cannot_render("drawn mask opening", BACKEND));
    }
    match mask.resolve(aperture)? {
        Some(opened) => thickness(&opened),
        None => Ok(Dim::mil(0.0)),
    }
}

#[allow(clippy::too_many_arguments)]
fn pin_line(
    out: &mut String,
    at: Pt,
    dia: Dim,
    clearance: Dim,
    mask: Dim,
    drill: Dim,
    name: &str,
    number: &str,
    flags: ObjFlags,
) {
    writeln!(
        out,
        "{INDENT}Pin[{} {} {} {} {} {} \"{}\" \"{}\" \"{}\"]",
        x_cm(at),
        y_cm(at),
        dia.centimils(),
        (clearance * 2.0).centimils(),
        mask.centimils(),
        drill.centimils(),
        name,
        number,
        flags
    )
    .ok();
}

/// Emits a land as a `Pad[]` line segment. Rectangles become square-ended
/// segments, obrounds round-ended ones, circles zero-length round
/// segments.
fn pad_line(
    out: &mut String,
    land: &Land,
    origin: Pt,
    mask: Dim,
    name: &str,
    number: &str,
    mut flags: ObjFlags,
) -> Result<()> {
    if matches!(land.aperture, Aperture::Polygon { .. } | Aperture::Macro(_)) {
        return Err(Error::cannot_render(
            format!("{} aperture", land.aperture.kind()),
            BACKEND,
        ));
    }
    if matches!(land.aperture, Aperture::Rectangle { .. }) {
        flags |= ObjFlags::SQUARE;
    }
    let (xs, ys) = land
        .aperture
        .extent()
        .ok_or_else(|| Error::cannot_render("macro aperture", BACKEND))?;
    let loc = origin + land.loc;
    let (p1, p2, width) = if xs > ys {
        let half = (xs - ys) / 2.0;
        (
            Pt::new(loc.x - half, loc.y),
            Pt::new(loc.x + half, loc.y),
            ys,
        )
    } else if ys > xs {
        let half = (ys - xs) / 2.0;
        (
            Pt::new(loc.x, loc.y - half),
            Pt::new(loc.x, loc.y + half),
            xs,
        )
    } else {
        (loc, loc, xs)
    };
    writeln!(
        out,
        "{INDENT}Pad[{} {} {} {} {} {} {} \"{}\" \"{}\" \"{}\"]",
        x_cm(p1),
        y_cm(p1),
        x_cm(p2),
        y_cm(p2),
        width.centimils(),
        (land.clearance * 2.0).centimils(),
        mask.centimils(),
        name,
        number,
        flags
    )
    .ok();
    Ok(())
}

/// True when the minimal drill-carrying pin does not already cover this
/// side's land.
fn side_needs_pad(land: &Land, min_thickness: Dim, hole_offset: Pt) -> bool {
    !(land.aperture.is_circle()
        && land.aperture.thickness() == Some(min_thickness)
        && land.loc == hole_offset)
}

fn render_thru(out: &mut String, pin: &PinSpec, thru: &ThruPin) -> Result<()> {
    let hole = thru.hole();
    if hole.slot.is_some() {
        return Err(Error::cannot_render("plated slot", BACKEND));
    }
    let hole_at = pin.loc + hole.offset;
    let solder = thru.solder_land();
    let comp = thru.comp_land();
    let name = pin.name();
    let number = pin.number.to_string();

    let simple = solder.aperture.is_simple() && comp.aperture.is_simple();
    if simple && thru.symmetric() && solder.loc == hole.offset {
        let dia = thickness(&solder.aperture)?;
        let mask = mask_width(thru.solder_mask(), &solder.aperture)?;
        let mut flags = ObjFlags::empty();
        if solder.aperture.is_square() {
            flags |= ObjFlags::SQUARE;
        }
        pin_line(
            out,
            hole_at,
            dia,
            solder.clearance,
            mask,
            hole.diameter,
            &name,
            &number,
            flags,
        );
        return Ok(());
    }

    // Minimal pin carries the drill and the smaller of everything; the
    // real land of each side goes out as a pad where it is not covered.
    let t_solder = thickness(&solder.aperture)?;
    let t_comp = thickness(&comp.aperture)?;
    let min_t = if t_solder < t_comp { t_solder } else { t_comp };
    let m_solder = mask_width(thru.solder_mask(), &solder.aperture)?;
    let m_comp = mask_width(thru.comp_mask(), &comp.aperture)?;
    let min_m = if m_solder < m_comp { m_solder } else { m_comp };
    let min_c = if solder.clearance < comp.clearance {
        solder.clearance
    } else {
        comp.clearance
    };
    pin_line(
        out,
        hole_at,
        min_t,
        min_c,
        min_m,
        hole.diameter,
        &name,
        &number,
        ObjFlags::empty(),
    );
    if side_needs_pad(solder, min_t, hole.offset) {
        pad_line(out, solder, pin.loc, m_solder, &name, &number, ObjFlags::ONSOLDER)?;
    }
    if side_needs_pad(comp, min_t, hole.offset) {
        pad_line(out, comp, pin.loc, m_comp, &name, &number, ObjFlags::empty())?;
    }
    Ok(())
}

fn render_smt(out: &mut String, pin: &PinSpec, pad: &SmtPad, warn: &mut WarnSink) -> Result<()> {
    if matches!(pad.paste, Overlay::Drawn { .. }) {
        warn("drawn paste opening has no gEDA representation; stencil follows the pad");
    }
    let mask = mask_width(&pad.mask, &pad.land.aperture)?;
    let mut flags = ObjFlags::empty();
    if pad.on_back {
        flags |= ObjFlags::ONSOLDER;
    }
    pad_line(
        out,
        &pad.land,
        pin.loc,
        mask,
        &pin.name(),
        &pin.number.to_string(),
        flags,
    )
}

fn render_thermal(
    out: &mut String,
    pin: &PinSpec,
    t: &ThermalPolygon,
    warn: &mut WarnSink,
) -> Result<()> {
    let name = pin.name();
    let number = pin.number.to_string();
    comment(out, "thermal pad");
    pad_line(
        out,
        &t.land,
        pin.loc,
        Dim::mil(0.0),
        &name,
        &number,
        ObjFlags::empty(),
    )?;
    for shape in &t.masks {
        let opening = Land::new(shape.aperture.clone(), Dim::mil(0.0), shape.loc);
        let width = thickness(&shape.aperture)?;
        pad_line(out, &opening, pin.loc, width, &name, &number, ObjFlags::empty())?;
    }
    if !t.pastes.is_empty() {
        warn("drawn paste openings have no gEDA representation; stencil follows the pad");
    }
    if let Some(back) = &t.back_land {
        pad_line(
            out,
            back,
            pin.loc,
            Dim::mil(0.0),
            &name,
            &number,
            ObjFlags::ONSOLDER,
        )?;
    }
    for via in &t.vias {
        pin_line(
            out,
            pin.loc + via.loc,
            via.drill + Dim::mil(20.0),
            t.land.clearance,
            Dim::mil(0.0),
            via.drill,
            &name,
            &number,
            ObjFlags::empty(),
        );
    }
    comment(out, "end thermal pad");
    Ok(())
}

fn render_silk(out: &mut String, silk: &crate::model::Silk, warn: &mut WarnSink) {
    use crate::model::Silk;
    match silk {
        Silk::Line { start, end, pen } => {
            writeln!(
                out,
                "{INDENT}ElementLine[{} {} {} {} {}]",
                x_cm(*start),
                y_cm(*start),
                x_cm(*end),
                y_cm(*end),
                pen.centimils()
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
            writeln!(
                out,
                "{INDENT}ElementArc[{} {} {} {} {} {} {}]",
                x_cm(*centre),
                y_cm(*centre),
                radius.centimils(),
                radius.centimils(),
                start_angle.round() as i64,
                arc_angle.round() as i64,
                pen.centimils()
            )
            .ok();
        }
        Silk::Text { loc, text, .. } => {
            warn("free silk text has no gEDA element representation");
            comment(out, &format!("silk text at {loc}: \"{text}\""));
        }
    }
}

/// A keep-out has no gEDA element primitive; draw it on silk as a
/// crossed box.
fn render_keepout(out: &mut String, keepout: &crate::model::KeepOutRect) {
    let pen = Dim::mil(10.0);
    let ll = keepout.ll;
    let ur = keepout.ur;
    let lr = Pt::new(ur.x, ll.y);
    let ul = Pt::new(ll.x, ur.y);
    comment(out, "keepout");
    for (a, b) in [(ll, lr), (lr, ur), (ur, ul), (ul, ll), (ll, ur), (ul, lr)] {
        writeln!(
            out,
            "{INDENT}ElementLine[{} {} {} {} {}]",
            x_cm(a),
            y_cm(a),
            x_cm(b),
            y_cm(b),
            pen.centimils()
        )
        .ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RefDes, Silk};

    fn refdes() -> RefDes {
        RefDes::new(Pt::origin(), Dim::mil(10.0), Dim::mil(40.0)).unwrap()
    }

    fn derived_mask() -> Overlay {
        Overlay::Derived {
            bloat: Dim::mil(4.0),
        }
    }

    fn render(fp: &Footprint) -> (String, Vec<String>) {
        let mut warnings = Vec::new();
        let mut sink = |w: &str| warnings.push(w.to_string());
        let text = GedaBackend.render(fp, &mut sink).unwrap();
        (text, warnings)
    }

    fn count(haystack: &str, prefix: &str) -> usize {
        haystack
            .lines()
            .filter(|l| l.trim_start().starts_with(prefix))
            .count()
    }

    #[test]
    fn symmetric_round_pin_is_one_pin_element() {
        let mut fp = Footprint::new("p", "", refdes());
        let thru =
            ThruPin::circle(Dim::inch(0.035), Dim::mil(60.0), Dim::mil(8.0), derived_mask())
                .unwrap();
        fp.add_pin(PinSpec::new(Pt::mil(100.0, 0.0), 1, PinGeometry::Thru(thru)))
            .unwrap();
        let (text, warnings) = render(&fp);
        assert_eq!(count(&text, "Pin["), 1);
        assert_eq!(count(&text, "Pad["), 0);
        assert!(warnings.is_empty());
        // 60 mil diameter, 16 mil full clearance, 68 mil mask, 35 mil drill.
        assert!(text.contains("Pin[10000 0 6000 1600 6800 3500 \"1\" \"1\" \"\"]"));
    }

    #[test]
    fn square_pin_gets_square_flag() {
        let mut fp = Footprint::new("p", "", refdes());
        let thru =
            ThruPin::square(Dim::inch(0.035), Dim::mil(60.0), Dim::mil(8.0), derived_mask())
                .unwrap();
        fp.add_pin(PinSpec::new(Pt::origin(), 1, PinGeometry::Thru(thru)))
            .unwrap();
        let (text, _) = render(&fp);
        assert!(text.contains("\"square\""));
    }

    #[test]
    fn asymmetric_pin_is_minimal_pin_plus_side_pads() {
        let mut fp = Footprint::new("p", "", refdes());
        let thru = ThruPin::obround_solder(
            Dim::inch(0.035),
            Dim::mil(60.0),
            Dim::mil(100.0),
            Pt::mil(0.0, 20.0),
            Dim::mil(8.0),
            derived_mask(),
        )
        .unwrap();
        fp.add_pin(PinSpec::new(Pt::origin(), 1, PinGeometry::Thru(thru)))
            .unwrap();
        let (text, _) = render(&fp);
        // Minimal pin for the drill, solder-side obround pad, and the
        // round component land matches the minimal pin so needs no pad.
        assert_eq!(count(&text, "Pin["), 1);
        assert_eq!(count(&text, "Pad["), 1);
        assert!(text.contains("onsolder"));
    }

    #[test]
    fn distinct_comp_land_pads_both_sides() {
        let mut fp = Footprint::new("p", "", refdes());
        let mut thru = ThruPin::obround_solder(
            Dim::inch(0.035),
            Dim::mil(60.0),
            Dim::mil(100.0),
            Pt::mil(0.0, 20.0),
            Dim::mil(8.0),
            derived_mask(),
        )
        .unwrap();
        thru.set_comp_land(
            Land::square(Dim::mil(70.0), Dim::mil(8.0), Pt::origin()).unwrap(),
        );
        fp.add_pin(PinSpec::new(Pt::origin(), 1, PinGeometry::Thru(thru)))
            .unwrap();
        let (text, _) = render(&fp);
        // Minimal pin for the drill, then one pad per side: the obround
        // on the solder side, the square on the component side.
        assert_eq!(count(&text, "Pin["), 1);
        assert_eq!(count(&text, "Pad["), 2);
        assert_eq!(text.matches("onsolder").count(), 1);
    }

    #[test]
    fn smt_pad_is_one_pad_element() {
        let mut fp = Footprint::new("p", "", refdes());
        let pad = SmtPad::obround(Dim::mil(8.0), Dim::mm(1.0), Dim::mm(0.4), Dim::mil(4.0))
            .unwrap();
        fp.add_pin(PinSpec::new(Pt::mm(0.0, 2.8), 1, PinGeometry::Smt(pad)))
            .unwrap();
        let (text, warnings) = render(&fp);
        assert_eq!(count(&text, "Pin["), 0);
        assert_eq!(count(&text, "Pad["), 1);
        assert!(warnings.is_empty());
        // 1mm x 0.4mm obround: stroke along x, width 0.4mm.
        assert!(!text.contains("square"));
    }

    #[test]
    fn back_side_pad_gets_onsolder() {
        let mut fp = Footprint::new("p", "", refdes());
        let mut pad =
            SmtPad::rectangle(Dim::mil(8.0), Dim::mm(1.0), Dim::mm(1.0), Dim::mil(4.0)).unwrap();
        pad.on_back = true;
        fp.add_pin(PinSpec::new(Pt::origin(), 1, PinGeometry::Smt(pad)))
            .unwrap();
        let (text, _) = render(&fp);
        assert!(text.contains("square,onsolder"));
    }

    #[test]
    fn macro_aperture_cannot_render() {
        let mut fp = Footprint::new("p", "", refdes());
        let land = Land::new(Aperture::Macro(Vec::new()), Dim::mil(8.0), Pt::origin());
        let pad = SmtPad::new(land);
        fp.add_pin(PinSpec::new(Pt::origin(), 1, PinGeometry::Smt(pad)))
            .unwrap();
        let mut sink = |_: &str| {};
        let err = GedaBackend.render(&fp, &mut sink).unwrap_err();
        assert!(err.to_string().contains("Cannot render"));
    }

    #[test]
    fn thermal_pad_brackets_with_comments() {
        let mut fp = Footprint::new("p", "", refdes());
        let t = ThermalPolygon::rectangle(
            Dim::mm(4.0),
            Dim::mm(4.0),
            Dim::mm(0.2),
            Some((Dim::mm(3.6), Dim::mm(3.6))),
            Some((2, 2, Dim::mm(0.3))),
        )
        .unwrap();
        fp.add_pin(PinSpec::named(Pt::origin(), 9, PinGeometry::Thermal(t), "THRM"))
            .unwrap();
        let (text, _) = render(&fp);
        assert!(text.contains("# thermal pad"));
        assert!(text.contains("# end thermal pad"));
        // Copper pad plus drawn mask pad, and 4 stitching vias.
        assert_eq!(count(&text, "Pad["), 2);
        assert_eq!(count(&text, "Pin["), 4);
        assert!(text.contains("\"THRM\""));
    }

    #[test]
    fn thermal_vias_carry_the_land_clearance() {
        let mut fp = Footprint::new("p", "", refdes());
        let t = ThermalPolygon::rectangle(
            Dim::mil(400.0),
            Dim::mil(400.0),
            Dim::mil(10.0),
            None,
            Some((1, 1, Dim::mil(20.0))),
        )
        .unwrap();
        fp.add_pin(PinSpec::named(Pt::origin(), 9, PinGeometry::Thermal(t), "THRM"))
            .unwrap();
        let (text, _) = render(&fp);
        // 40 mil via pad over a 20 mil drill, full clearance twice the
        // thermal land's 10 mil, tented over.
        assert!(text.contains("Pin[0 0 4000 2000 0 2000 \"THRM\" \"9\" \"\"]"));
    }

    #[test]
    fn silk_and_keepout_emit_lines() {
        let mut fp = Footprint::new("p", "", refdes());
        fp.silk
            .push(Silk::line(Pt::mm(-1.0, 0.0), Pt::mm(1.0, 0.0), Dim::mil(10.0)).unwrap());
        fp.silk
            .push(Silk::arc(Pt::origin(), Dim::mm(1.0), 0.0, 180.0, Dim::mil(10.0)).unwrap());
        fp.keepouts
            .push(crate::model::KeepOutRect::new(Pt::mm(-2.0, -2.0), Pt::mm(2.0, 2.0)).unwrap());
        let (text, _) = render(&fp);
        assert_eq!(count(&text, "ElementArc["), 1);
        // One silk line, four box sides, two diagonals.
        assert_eq!(count(&text, "ElementLine["), 7);
    }

    #[test]
    fn free_silk_text_degrades_to_comment_with_warning() {
        let mut fp = Footprint::new("p", "", refdes());
        fp.silk
            .push(Silk::text(Pt::origin(), "note", Dim::mil(10.0), Dim::mil(40.0)).unwrap());
        let (text, warnings) = render(&fp);
        assert_eq!(warnings.len(), 1);
        assert!(text.contains("# silk text"));
    }
}
