use crate::errors::AppResult;
use crate::export::chart::{Axis, Bar, label_stride};
use crate::export::{export_error, notify_export_success};
use crate::ui::messages::info;
use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};
use std::fs;
use std::path::Path;

const BAR_RGB: (f32, f32, f32) = (0x2F as f32 / 255.0, 0x75 as f32 / 255.0, 0xB5 as f32 / 255.0);
const FRAC_1_SQRT_2: f32 = std::f32::consts::FRAC_1_SQRT_2;

/// Single-page PDF with one bar chart, drawn with the built-in Helvetica.
pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    page_w: f32,
    page_h: f32,
    margin_left: f32,
    margin_right: f32,
    margin_top: f32,
    margin_bottom: f32,

    next_id: i32,
    font_id: Ref,

    font_size: f32,
    label_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Approximate Helvetica advance width of `text` at `size`.
fn text_width(text: &str, size: f32) -> f32 {
    let units: f32 = text
        .chars()
        .map(|c| match c {
            '0'..='9' => 0.556,
            '-' | '.' | ' ' | ':' => 0.3,
            'A'..='Z' => 0.667,
            _ => 0.5,
        })
        .sum();
    units * size
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        let next_id = 4;

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        // A4 landscape
        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            page_w: 842.0,
            page_h: 595.0,
            margin_left: 80.0,
            margin_right: 40.0,
            margin_top: 70.0,
            margin_bottom: 110.0,

            next_id,
            font_id,

            font_size: 9.0,
            label_font_size: 11.0,
            title_font_size: 16.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);

        page.resources().fonts().pair(Name(b"F1"), self.font_id);

        self.current_content_id = Some(content_id);

        Content::new()
    }

    fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    /// Text with its baseline rotated by the unit vector `(cos, sin)`.
    #[allow(clippy::too_many_arguments)]
    fn draw_text_rotated(
        &self,
        content: &mut Content,
        x: f32,
        y: f32,
        cos: f32,
        sin: f32,
        size: f32,
        text: &str,
    ) {
        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([cos, sin, -sin, cos, x, y]);
        content.show(Str(text.as_bytes()));
        content.end_text();
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        self.draw_text_rotated(content, x, y, 1.0, 0.0, size, text);
    }

    fn draw_line(&self, content: &mut Content, from: (f32, f32), to: (f32, f32)) {
        content.move_to(from.0, from.1);
        content.line_to(to.0, to.1);
        content.stroke();
    }

    /// Title, axis captions, y grid and one filled bar per entry.
    pub fn write_bar_chart(&mut self, title: &str, x_label: &str, y_label: &str, bars: &[Bar]) {
        let mut content = self.new_page();

        let x0 = self.margin_left;
        let y0 = self.margin_bottom;
        let plot_w = self.page_w - self.margin_left - self.margin_right;
        let plot_h = self.page_h - self.margin_bottom - self.margin_top;

        // title, centered
        let tw = text_width(title, self.title_font_size);
        self.draw_text(
            &mut content,
            (self.page_w - tw) / 2.0,
            self.page_h - self.margin_top + 30.0,
            self.title_font_size,
            title,
        );

        let axis = Axis::fit(bars.iter().map(|b| b.value), 6);
        let y_of = |v: f64| y0 + axis.scale(v) as f32 * plot_h;

        // horizontal grid and tick labels
        content.save_state();
        content.set_line_width(0.5);
        for tick in axis.ticks() {
            let y = y_of(tick);
            content.set_stroke_rgb(0.85, 0.85, 0.85);
            self.draw_line(&mut content, (x0, y), (x0 + plot_w, y));

            let label = axis.tick_label(tick);
            let lw = text_width(&label, self.font_size);
            self.draw_text(&mut content, x0 - 6.0 - lw, y - 3.0, self.font_size, &label);
        }
        content.restore_state();

        // bars
        if !bars.is_empty() {
            let slot = plot_w / bars.len() as f32;
            let bar_w = (slot * 0.7).min(40.0);
            let zero_y = y_of(0.0);
            let stride = label_stride(bars.len(), 45);

            content.save_state();
            content.set_fill_rgb(BAR_RGB.0, BAR_RGB.1, BAR_RGB.2);
            for (i, bar) in bars.iter().enumerate() {
                let cx = x0 + slot * (i as f32 + 0.5);
                let top = y_of(bar.value);
                content.rect(cx - bar_w / 2.0, zero_y.min(top), bar_w, (top - zero_y).abs());
            }
            content.fill_nonzero();
            content.restore_state();

            // x tick labels at 45 degrees, ending at the tick
            for (i, bar) in bars.iter().enumerate().filter(|(i, _)| i % stride == 0) {
                let cx = x0 + slot * (i as f32 + 0.5);
                let w = text_width(&bar.label, self.font_size);
                let end_x = cx + 3.0;
                let end_y = y0 - 8.0;
                self.draw_text_rotated(
                    &mut content,
                    end_x - w * FRAC_1_SQRT_2,
                    end_y - w * FRAC_1_SQRT_2,
                    FRAC_1_SQRT_2,
                    FRAC_1_SQRT_2,
                    self.font_size,
                    &bar.label,
                );
            }
        } else {
            let msg = "No valid hours in this period";
            let mw = text_width(msg, self.label_font_size);
            self.draw_text(
                &mut content,
                x0 + (plot_w - mw) / 2.0,
                y0 + plot_h / 2.0,
                self.label_font_size,
                msg,
            );
        }

        // axes
        content.save_state();
        content.set_line_width(1.0);
        content.set_stroke_rgb(0.0, 0.0, 0.0);
        self.draw_line(&mut content, (x0, y0), (x0, y0 + plot_h));
        let zero_y = y_of(0.0);
        self.draw_line(&mut content, (x0, zero_y), (x0 + plot_w, zero_y));
        content.restore_state();

        // axis captions
        let xw = text_width(x_label, self.label_font_size);
        self.draw_text(
            &mut content,
            x0 + (plot_w - xw) / 2.0,
            20.0,
            self.label_font_size,
            x_label,
        );
        let yw = text_width(y_label, self.label_font_size);
        self.draw_text_rotated(
            &mut content,
            30.0,
            y0 + (plot_h - yw) / 2.0,
            0.0,
            1.0,
            self.label_font_size,
            y_label,
        );

        self.finalize_page(content);
    }

    pub fn to_bytes(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();
        self.pdf.finish()
    }

    pub fn save(self, path: &Path) -> std::io::Result<()> {
        fs::write(path, self.to_bytes())
    }
}

/// Bar chart of valid hours per day.
pub(crate) fn export_pdf(bars: &[Bar], path: &Path, title: &str) -> AppResult<()> {
    info(format!("Exporting chart to PDF: {}", path.display()));

    let mut pdf = PdfManager::new();
    pdf.write_bar_chart(title, "Date", "Hours", bars);
    pdf.save(path).map_err(export_error("PDF export error"))?;

    notify_export_success("PDF", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chart_document_is_a_single_page_pdf() {
        let bars = vec![
            Bar {
                label: "2024-03-04".into(),
                value: 8.0,
            },
            Bar {
                label: "2024-03-05".into(),
                value: -1.0,
            },
        ];
        let mut pdf = PdfManager::new();
        pdf.write_bar_chart("Hours per Day", "Date", "Hours", &bars);
        let bytes = pdf.to_bytes();

        assert!(bytes.starts_with(b"%PDF"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Count 1"));
        assert!(text.contains("Helvetica"));
    }

    #[test]
    fn label_width_grows_with_text() {
        assert!(text_width("2024-03-04", 9.0) > text_width("2024", 9.0));
    }
}
