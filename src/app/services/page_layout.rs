//! Fitting a fixed-size preview onto a printed sheet.

use crate::app::domain::margin::MarginBox;

/// Area left on the sheet once the margin is taken off, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintableArea {
    pub width_pt: f64,
    pub height_pt: f64,
}

impl PrintableArea {
    /// `sheet` is what the printer reports as printable, `(width, height)`.
    pub fn within(sheet: (i32, i32), margin: &MarginBox) -> Self {
        Self {
            width_pt: (f64::from(sheet.0) - margin.left - margin.right).max(0.0),
            height_pt: (f64::from(sheet.1) - margin.top - margin.bottom).max(0.0),
        }
    }
}

/// How one view-sized slice of a page is placed on a sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetLayout {
    /// Uniform scale applied before drawing, never above 1.
    pub scale: f64,
    /// Drawing origin in scaled units, so the slice starts at the margin.
    pub origin_x: i32,
    pub origin_y: i32,
    /// Rows of the view that fill one sheet.
    pub slice_height: i32,
}

impl SheetLayout {
    /// Shrinks a `view` of `(width, height)` pixels so it fits inside the
    /// margin. A margin that leaves no room falls back to the whole sheet.
    pub fn fit(sheet: (i32, i32), margin: &MarginBox, view: (i32, i32)) -> Self {
        let view_w = f64::from(view.0.max(1));
        let view_h = f64::from(view.1.max(1));
        let mut area = PrintableArea::within(sheet, margin);
        let mut margin = *margin;
        if area.width_pt < 1.0 || area.height_pt < 1.0 {
            margin = MarginBox {
                top: 0.0,
                right: 0.0,
                bottom: 0.0,
                left: 0.0,
            };
            area = PrintableArea::within(sheet, &margin);
        }

        let scale = (area.width_pt / view_w)
            .min(area.height_pt / view_h)
            .clamp(f64::MIN_POSITIVE, 1.0);

        Self {
            scale,
            origin_x: (margin.left / scale).round() as i32,
            origin_y: (margin.top / scale).round() as i32,
            slice_height: view.1.max(1),
        }
    }
}
