//! Plots of the hue, lightness and saturation of a palette.
//!
//! The image has two parts: on top, the H, L, S curves (one point
//! per color, y from 0 to 1) and underneath a strip showing the
//! colors themselves.  A legend in the upper right corner names the
//! curves.

use std::{io::{self, BufRead},
          path::Path};
use ab_glyph::{point, Font, FontRef, InvalidFont, PxScale, ScaleFont};
use image::{Rgb, RgbImage};
use rgb::RGB8;
use thiserror::Error;
use tracing::{debug, info};
use crate::{dalton::{self, Deficiency},
            parse_color, Color, ParseError, RGBColor};

/// Error returned by [`save`].
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("no color to plot")]
    Empty,
    #[error("cannot write the plot: {0}")]
    Image(#[from] image::ImageError),
    #[error("cannot load the legend font: {0}")]
    Font(#[from] InvalidFont),
}

/// A line of the input that is not a color.
#[derive(Debug, Clone, PartialEq)]
pub struct BadLine {
    /// Line number, starting at 1.
    pub line: usize,
    pub error: ParseError,
}

/// Colors read by [`read_colors`].
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ReadColors {
    pub colors: Vec<Color>,
    pub bad_lines: Vec<BadLine>,
}

/// Read one color per line.  Surrounding whitespace is ignored and
/// so are blank lines.  Lines that cannot be parsed are recorded in
/// [`ReadColors::bad_lines`] and reading goes on.
pub fn read_colors(input: impl BufRead) -> io::Result<ReadColors> {
    let mut read = ReadColors::default();
    for (i, ln) in input.lines().enumerate() {
        let ln = ln?;
        let ln = ln.trim();
        if ln.is_empty() { continue }
        match parse_color(ln) {
            Ok(c) => read.colors.push(c),
            Err(error) => {
                debug!(line = i + 1, %error, "bad line");
                read.bad_lines.push(BadLine { line: i + 1, error })
            }
        }
    }
    Ok(read)
}

/// What to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotOptions {
    /// Add the curves of the colors seen by dichromats.
    pub dalton: bool,
    /// Add the NTSC brightness curve.
    pub ntsc: bool,
    pub width: u32,
    pub height: u32,
}

impl Default for PlotOptions {
    fn default() -> Self {
        PlotOptions { dalton: false, ntsc: false, width: 800, height: 600 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    /// Whether the pixel at arc length `s` along the curve is drawn.
    fn on(self, s: f64) -> bool {
        match self {
            LineStyle::Solid => true,
            LineStyle::Dashed => s.rem_euclid(13.) < 8.,
            LineStyle::Dotted => s.rem_euclid(5.) < 2.,
        }
    }
}

/// A curve of the plot.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub values: Vec<f64>,
    pub color: Rgb<u8>,
    pub style: LineStyle,
}

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const GRID: Rgb<u8> = Rgb([220, 220, 220]);
const NTSC_RED: Rgb<u8> = Rgb([255, 0, 0]);
const LEGEND_BORDER: Rgb<u8> = Rgb([204, 204, 204]);

/// DejaVu Sans, see `assets/fonts/DejaVuSans-LICENSE`.
const FONT: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

/// Matplotlib "tab" colors used for the simulated curves.
fn deficiency_color(d: Deficiency) -> Rgb<u8> {
    match d {
        Deficiency::Deutan => Rgb([31, 119, 180]),
        Deficiency::Protan => Rgb([255, 127, 14]),
        Deficiency::Tritan => Rgb([44, 160, 44]),
    }
}

fn hls_series(colors: &[Color], suffix: &str, color: Rgb<u8>) -> [Series; 3] {
    let hls: Vec<_> = colors.iter().map(|c| c.to_hls()).collect();
    let label = |c: &str| if suffix.is_empty() { c.to_string() }
                          else { format!("{c} {suffix}") };
    [Series { label: label("H"), values: hls.iter().map(|x| x.h).collect(),
              color, style: LineStyle::Solid },
     Series { label: label("L"), values: hls.iter().map(|x| x.l).collect(),
              color, style: LineStyle::Dashed },
     Series { label: label("S"), values: hls.iter().map(|x| x.s).collect(),
              color, style: LineStyle::Dotted }]
}

/// Return the curves to draw for `colors`.
pub fn series(colors: &[Color], opts: &PlotOptions) -> Vec<Series> {
    let mut series = Vec::from(hls_series(colors, "", BLACK));
    if opts.dalton {
        for d in Deficiency::ALL {
            let simulated = dalton::simulate_all(colors, d);
            series.extend(hls_series(&simulated, d.abbrev(),
                                     deficiency_color(d)));
        }
    }
    if opts.ntsc {
        series.push(Series {
            label: "NTSC".to_string(),
            values: colors.iter().map(|c| c.ntsc_brightness()).collect(),
            color: NTSC_RED,
            style: LineStyle::Solid });
    }
    series
}

/// Pixel area of the plot: the curves in `top ..= bottom`, the color
/// strip in `strip_top .. strip_bottom`, both in `left .. right`.
struct Frame {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    strip_top: u32,
    strip_bottom: u32,
    n: usize,
}

impl Frame {
    fn new(width: u32, height: u32, n: usize) -> Frame {
        let margin = (width.min(height) / 20).max(2) as f64;
        let inner = height as f64 - 2. * margin;
        let curves = 0.9 * inner;
        Frame { left: margin, right: width as f64 - margin,
                top: margin, bottom: margin + curves - margin / 2.,
                strip_top: (margin + curves) as u32,
                strip_bottom: (height as f64 - margin) as u32, n }
    }

    /// Abscissa of the color `i` (at the center of its band in the
    /// strip).
    fn x(&self, i: f64) -> f64 {
        self.left + (self.right - self.left) * (i + 0.5) / self.n as f64
    }

    fn y(&self, v: f64) -> f64 {
        self.bottom - (self.bottom - self.top) * v.clamp(0., 1.)
    }
}

fn put(img: &mut RgbImage, x: f64, y: f64, c: Rgb<u8>) {
    let (x, y) = (x.round(), y.round());
    if x >= 0. && y >= 0. && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, c)
    }
}

/// Draw a 2px wide segment, starting the line pattern at arc length
/// `s0`.  Return the arc length at the end of the segment.
fn segment(img: &mut RgbImage, (x0, y0): (f64, f64), (x1, y1): (f64, f64),
           s0: f64, c: Rgb<u8>, style: LineStyle) -> f64 {
    let (dx, dy) = (x1 - x0, y1 - y0);
    let len = dx.hypot(dy);
    let steps = dx.abs().max(dy.abs()).ceil().max(1.) as usize;
    for k in 0 ..= steps {
        let t = k as f64 / steps as f64;
        if style.on(s0 + t * len) {
            let (x, y) = (x0 + t * dx, y0 + t * dy);
            put(img, x, y, c);
            put(img, x, y + 1., c);
        }
    }
    s0 + len
}

fn hline(img: &mut RgbImage, f: &Frame, y: f64, c: Rgb<u8>) {
    let mut x = f.left;
    while x <= f.right { put(img, x, y, c); x += 1. }
}

fn vline(img: &mut RgbImage, f: &Frame, x: f64, c: Rgb<u8>) {
    let mut y = f.top;
    while y <= f.bottom { put(img, x, y, c); y += 1. }
}

fn text_width(font: &FontRef<'_>, px: f32, text: &str) -> f32 {
    let sf = font.as_scaled(PxScale::from(px));
    text.chars().map(|c| sf.h_advance(sf.glyph_id(c))).sum()
}

/// Draw `text` in `c` with its top left corner at `(x, y)`.
fn draw_text(img: &mut RgbImage, font: &FontRef<'_>, px: f32,
             (x, y): (f32, f32), text: &str, c: Rgb<u8>) {
    let sf = font.as_scaled(PxScale::from(px));
    let mut caret = point(x, y + sf.ascent());
    for ch in text.chars() {
        let mut glyph = sf.scaled_glyph(ch);
        glyph.position = caret;
        caret.x += sf.h_advance(glyph.id);
        // No outline for blanks.
        let Some(outline) = font.outline_glyph(glyph) else { continue };
        let bounds = outline.px_bounds();
        let (w, h) = img.dimensions();
        outline.draw(|gx, gy, cov| {
            let ix = bounds.min.x as i64 + gx as i64;
            let iy = bounds.min.y as i64 + gy as i64;
            if ix < 0 || iy < 0 || ix >= w as i64 || iy >= h as i64 { return }
            let p = img.get_pixel_mut(ix as u32, iy as u32);
            for k in 0 .. 3 {
                let v = p.0[k] as f32 * (1. - cov) + c.0[k] as f32 * cov;
                p.0[k] = v.round() as u8;
            }
        });
    }
}

const LEGEND_PAD: f64 = 6.;
const LEGEND_SAMPLE: f64 = 24.;

/// Placement of the legend box.  Entries fill the columns top to
/// bottom, one column after the other.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Legend {
    x: f64,
    y: f64,
    cols: usize,
    rows: usize,
    col_width: f64,
    row_height: f64,
    px: f32,
}

impl Legend {
    fn new(font: &FontRef<'_>, series: &[Series], f: &Frame, opts: &PlotOptions)
           -> Legend {
        let cols = if opts.dalton { 4 } else { 1 };
        let rows = series.len().div_ceil(cols);
        let px = (opts.height as f32 / 40.).clamp(9., 16.);
        let text = series.iter()
            .map(|s| text_width(font, px, &s.label) as f64)
            .fold(0., f64::max);
        let col_width = LEGEND_PAD + LEGEND_SAMPLE + LEGEND_PAD + text;
        let row_height = 1.4 * px as f64;
        let width = cols as f64 * col_width + LEGEND_PAD;
        Legend { x: (f.right - LEGEND_PAD - width).round(),
                 y: (f.top + LEGEND_PAD).round(),
                 cols, rows, col_width, row_height, px }
    }

    fn width(&self) -> f64 { self.cols as f64 * self.col_width + LEGEND_PAD }

    fn height(&self) -> f64 { self.rows as f64 * self.row_height + LEGEND_PAD }

    /// Top left corner of the entry `i`.
    fn entry(&self, i: usize) -> (f64, f64) {
        let (col, row) = (i / self.rows, i % self.rows);
        (self.x + col as f64 * self.col_width + LEGEND_PAD,
         self.y + row as f64 * self.row_height + LEGEND_PAD / 2.)
    }

    fn draw(&self, img: &mut RgbImage, font: &FontRef<'_>, series: &[Series]) {
        let (x1, y1) = (self.x + self.width(), self.y + self.height());
        let mut y = self.y;
        while y <= y1 {
            let mut x = self.x;
            while x <= x1 {
                let border = y == self.y || x == self.x || y + 1. > y1 || x + 1. > x1;
                put(img, x, y, if border { LEGEND_BORDER } else { WHITE });
                x += 1.;
            }
            y += 1.;
        }
        for (i, s) in series.iter().enumerate() {
            let (x, y) = self.entry(i);
            let ym = (y + self.row_height / 2.).round();
            segment(img, (x, ym), (x + LEGEND_SAMPLE, ym), 0., s.color, s.style);
            draw_text(img, font, self.px,
                      ((x + LEGEND_SAMPLE + LEGEND_PAD) as f32, y as f32),
                      &s.label, BLACK);
        }
    }
}

/// Render the plot of `colors`.
pub fn render(colors: &[Color], opts: &PlotOptions)
              -> Result<RgbImage, PlotError> {
    let mut img = RgbImage::from_pixel(opts.width, opts.height, WHITE);
    if colors.is_empty() { return Ok(img) }
    let font = FontRef::try_from_slice(FONT)?;
    let f = Frame::new(opts.width, opts.height, colors.len());
    // Grid
    for k in 0 ..= 10 {
        hline(&mut img, &f, f.y(k as f64 / 10.), GRID);
    }
    if colors.len() <= 64 {
        for i in 0 .. colors.len() { vline(&mut img, &f, f.x(i as f64), GRID) }
    }
    // Axes
    for y in [f.top, f.bottom] { hline(&mut img, &f, y, BLACK) }
    for x in [f.left, f.right] { vline(&mut img, &f, x, BLACK) }
    // Curves
    let series = series(colors, opts);
    for s in &series {
        debug!(label = %s.label, style = ?s.style, "curve");
        let pts: Vec<_> = s.values.iter().enumerate()
            .map(|(i, &v)| (f.x(i as f64), f.y(v))).collect();
        if let &[(x, y)] = pts.as_slice() {
            for (dx, dy) in [(-1., -1.), (0., -1.), (1., -1.), (-1., 0.),
                             (0., 0.), (1., 0.), (-1., 1.), (0., 1.), (1., 1.)] {
                put(&mut img, x + dx, y + dy, s.color);
            }
        }
        let mut arc = 0.;
        for w in pts.windows(2) {
            arc = segment(&mut img, w[0], w[1], arc, s.color, s.style);
        }
    }
    Legend::new(&font, &series, &f, opts).draw(&mut img, &font, &series);
    // Color strip
    let n = colors.len() as f64;
    let width = f.right - f.left;
    for (i, c) in colors.iter().enumerate() {
        let RGB8 { r, g, b } = RGB8::from_rgb(*c);
        let x0 = (f.left + width * i as f64 / n).round() as u32;
        let x1 = (f.left + width * (i + 1) as f64 / n).round() as u32;
        for x in x0 .. x1.max(x0 + 1) {
            for y in f.strip_top .. f.strip_bottom {
                if x < img.width() && y < img.height() {
                    img.put_pixel(x, y, Rgb([r, g, b]))
                }
            }
        }
    }
    Ok(img)
}

/// Render the plot of `colors` and save it to `path` (the format is
/// deduced from the extension, PNG is supported).
pub fn save(path: impl AsRef<Path>, colors: &[Color], opts: &PlotOptions)
            -> Result<(), PlotError> {
    if colors.is_empty() { return Err(PlotError::Empty) }
    let path = path.as_ref();
    render(colors, opts)?.save(path)?;
    info!(path = %path.display(), n_colors = colors.len(), "plot written");
    Ok(())
}
