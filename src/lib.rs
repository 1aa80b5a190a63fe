//! Color palette utilities.
//!
//! - [`parse_color`] reads colors written as `(r, g, b)`, `#rrggbb`
//!   or `#rgb`.
//! - [`diverging`] creates a diverging palette from HLS parameters.
//! - [`plot`] renders the hue, lightness and saturation curves of a
//!   palette, possibly as seen by color blind people (see [`dalton`]).
//!
//! Colors are [`RGB<f64>`](rgb::RGB) values with components in
//! \[0, 1\].  The [`RGBColor`] trait provides the conversions to and
//! from the HLS color space.

use rgb::{RGB, RGB8};

pub mod dalton;
pub mod diverging;
pub mod parse;
pub mod plot;
mod range;

pub use diverging::{diverging, diverging_hls, DivergingParams, ParamError};
pub use parse::{parse_color, ParseError};
pub use range::{linspace, Linspace};

/// Colors handled by this crate: red, green and blue in \[0, 1\].
pub type Color = RGB<f64>;

/// A color in the Hue-Lightness-Saturation space.  All components
/// are in \[0, 1\]; the hue is circular.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hls {
    pub h: f64,
    pub l: f64,
    pub s: f64,
}

impl Hls {
    #[inline]
    pub fn new(h: f64, l: f64, s: f64) -> Self { Hls { h, l, s } }
}

const ONE_THIRD: f64 = 1. / 3.;
const ONE_SIXTH: f64 = 1. / 6.;
const TWO_THIRD: f64 = 2. / 3.;

/// Specifies the methods a RGB color encoding must provide.
pub trait RGBColor: Sized {
    /// Return the red, green and blue components of the color (in
    /// \[0, 1\]).
    fn to_rgb(&self) -> Color;

    /// Create a color from its RGB components (in \[0, 1\]).
    fn from_rgb(rgb: Color) -> Self;

    /// Return the HLS coordinates of the color.
    ///
    /// # Example
    ///
    /// ```
    /// use cmaputil::{Color, RGBColor};
    /// let hls = Color::new(1., 0., 0.).to_hls();
    /// assert_eq!((hls.h, hls.l, hls.s), (0., 0.5, 1.));
    /// ```
    fn to_hls(&self) -> Hls {
        let RGB { r, g, b } = self.to_rgb();
        let maxc = r.max(g).max(b);
        let minc = r.min(g).min(b);
        let sumc = maxc + minc;
        let rangec = maxc - minc;
        let l = sumc / 2.;
        if minc == maxc { return Hls { h: 0., l, s: 0. } }
        let s = if l <= 0.5 { rangec / sumc }
                else { rangec / (2. - maxc - minc) };
        let rc = (maxc - r) / rangec;
        let gc = (maxc - g) / rangec;
        let bc = (maxc - b) / rangec;
        let h = if r == maxc { bc - gc }
                else if g == maxc { 2. + rc - bc }
                else { 4. + gc - rc };
        Hls { h: (h / 6.).rem_euclid(1.), l, s }
    }

    /// Create a color from its HLS coordinates.  Components outside
    /// \[0, 1\] are not rejected; the hue is taken modulo 1.
    fn from_hls(hls: Hls) -> Self {
        let Hls { h, l, s } = hls;
        if s == 0. { return Self::from_rgb(RGB { r: l, g: l, b: l }) }
        let m2 = if l <= 0.5 { l * (1. + s) } else { l + s - l * s };
        let m1 = 2. * l - m2;
        Self::from_rgb(RGB { r: hls_channel(m1, m2, h + ONE_THIRD),
                             g: hls_channel(m1, m2, h),
                             b: hls_channel(m1, m2, h - ONE_THIRD) })
    }

    /// Return the color as 6 lower-case hex digits (without `#`).
    /// Each channel is truncated, not rounded, to an integer in
    /// \[0, 255\].
    ///
    /// ```
    /// use cmaputil::{Color, RGBColor};
    /// assert_eq!(Color::new(1., 0.5, 0.).to_hex(), "ff7f00");
    /// ```
    fn to_hex(&self) -> String {
        let RGB8 { r, g, b } = to_rgb8(self.to_rgb());
        format!("{r:02x}{g:02x}{b:02x}")
    }

    /// NTSC brightness `0.3 R + 0.59 G + 0.11 B`.
    fn ntsc_brightness(&self) -> f64 {
        let RGB { r, g, b } = self.to_rgb();
        0.3 * r + 0.59 * g + 0.11 * b
    }

    /// Convert the color to grayscale (using its NTSC brightness).
    fn to_gray(&self) -> Self {
        let x = self.ntsc_brightness();
        Self::from_rgb(RGB { r: x, g: x, b: x })
    }
}

fn hls_channel(m1: f64, m2: f64, hue: f64) -> f64 {
    let hue = hue.rem_euclid(1.);
    if hue < ONE_SIXTH { m1 + (m2 - m1) * hue * 6. }
    else if hue < 0.5 { m2 }
    else if hue < TWO_THIRD { m1 + (m2 - m1) * (TWO_THIRD - hue) * 6. }
    else { m1 }
}

/// Scale to \[0, 255\] and truncate (`as` saturates out of range
/// values).
#[inline]
fn to_rgb8(c: Color) -> RGB8 {
    RGB8 { r: (c.r * 255.) as u8, g: (c.g * 255.) as u8, b: (c.b * 255.) as u8 }
}

impl RGBColor for Color {
    #[inline]
    fn to_rgb(&self) -> Color { *self }

    #[inline]
    fn from_rgb(c: Color) -> Self { c }
}

impl RGBColor for RGB8 {
    #[inline]
    fn to_rgb(&self) -> Color {
        RGB { r: self.r as f64 / 255., g: self.g as f64 / 255.,
              b: self.b as f64 / 255. }
    }

    #[inline]
    fn from_rgb(c: Color) -> Self { to_rgb8(c) }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool { (a - b).abs() <= 1e-12 }

    #[test]
    fn hls_primaries() {
        let cases = [((1., 0., 0.), 0.), ((0., 1., 0.), ONE_THIRD),
                     ((0., 0., 1.), TWO_THIRD)];
        for ((r, g, b), h) in cases {
            let hls = Color::new(r, g, b).to_hls();
            assert!(close(hls.h, h), "{hls:?}");
            assert_eq!(hls.l, 0.5);
            assert_eq!(hls.s, 1.);
        }
    }

    #[test]
    fn hls_gray() {
        let hls = Color::new(0.25, 0.25, 0.25).to_hls();
        assert_eq!(hls, Hls::new(0., 0.25, 0.));
        assert_eq!(Color::from_hls(hls), Color::new(0.25, 0.25, 0.25));
    }

    #[test]
    fn hls_back_and_forth() {
        for c in [Color::new(0.2, 0.4, 0.6), Color::new(0.9, 0.1, 0.3),
                  Color::new(0.5, 0.7, 0.2)] {
            let c1 = Color::from_hls(c.to_hls());
            assert!(close(c.r, c1.r) && close(c.g, c1.g) && close(c.b, c1.b),
                    "{c:?} ≉ {c1:?}");
        }
    }

    #[test]
    fn hex_truncates() {
        assert_eq!(Color::new(0.999, 0.5, 0.).to_hex(), "fe7f00");
        assert_eq!(Color::new(1., 1., 1.).to_hex(), "ffffff");
        assert_eq!(RGB8::new(255, 0, 255).to_hex(), "ff00ff");
    }

    #[test]
    fn ntsc() {
        assert!(close(Color::new(1., 1., 1.).ntsc_brightness(), 1.));
        assert!(close(Color::new(0., 1., 0.).ntsc_brightness(), 0.59));
        let g = Color::new(1., 0., 0.).to_gray();
        assert!(close(g.r, 0.3) && g.r == g.g && g.g == g.b);
    }
}
