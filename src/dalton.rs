//! Simulation of dichromacy (color blindness).
//!
//! Follows Viénot, Brettel & Mollon, “Digital video colourmaps for
//! checking the legibility of displays by dichromats”, Color Research
//! and Application 24 (1999): colors are converted to the LMS space
//! of the cone responses and projected onto the plane of colors a
//! dichromat can distinguish.
//!
//! See also
//! - http://vision.psychol.cam.ac.uk/jdmollon/papers/colourmaps.pdf
//! - https://daltonlens.org/opensource-cvd-simulation/

use rgb::{RGB, RGB8};
use crate::{Color, RGBColor};

/// Type of dichromacy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deficiency {
    /// Missing L cones (red).
    Protan,
    /// Missing M cones (green).
    Deutan,
    /// Missing S cones (blue).
    Tritan,
}

impl Deficiency {
    pub const ALL: [Deficiency; 3] =
        [Deficiency::Deutan, Deficiency::Protan, Deficiency::Tritan];

    /// Short name, as used in plot legends.
    pub fn abbrev(self) -> &'static str {
        match self {
            Deficiency::Protan => "Pro",
            Deficiency::Deutan => "Deu",
            Deficiency::Tritan => "Tri",
        }
    }
}

// Smith & Pokorny cone fundamentals for the sRGB primaries.
const LMS_FROM_RGB: [[f64; 3]; 3] = [
    [0.178824041258, 0.4351609057,   0.04119349692],
    [0.034556423182, 0.2715589231,   0.03867130836],
    [0.000299565576, 0.0018430896,   0.01467086136]];

const RGB_FROM_LMS: [[f64; 3]; 3] = [
    [ 8.094367408521, -13.050072037307,  11.671302506445],
    [-1.024822333157,   5.401782534565, -11.361158583218],
    [-0.036531900742,  -0.412151455586,  69.351300363639]];

#[inline]
fn mul(m: &[[f64; 3]; 3], v: [f64; 3]) -> [f64; 3] {
    let row = |i: usize| m[i][0] * v[0] + m[i][1] * v[1] + m[i][2] * v[2];
    [row(0), row(1), row(2)]
}

/// sRGB transfer function, inverse.
fn linearize(c: f64) -> f64 {
    if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) }
}

/// sRGB transfer function.
fn gamma(c: f64) -> f64 {
    let c = c.clamp(0., 1.);
    if c <= 0.0031308 { 12.92 * c } else { 1.055 * c.powf(1. / 2.4) - 0.055 }
}

/// Return the color `c` as perceived by a dichromat with
/// deficiency `d`.
///
/// As for 8-bit images, `c` is first truncated to 8 bits per channel
/// and the result is rounded to 8 bits per channel.
pub fn simulate(c: Color, d: Deficiency) -> Color {
    let c8 = RGB8::from_rgb(c).to_rgb();
    let lin = [linearize(c8.r), linearize(c8.g), linearize(c8.b)];
    let [l, m, s] = mul(&LMS_FROM_RGB, lin);
    // Projection onto the plane spanned by black, white and a primary
    // seen identically by normal and dichromat observers: blue for
    // protans and deutans, red for tritans.
    let lms = match d {
        Deficiency::Protan => [2.02344 * m - 2.52581 * s, m, s],
        Deficiency::Deutan => [l, 0.494207 * l + 1.24827 * s, s],
        Deficiency::Tritan => [l, m, -0.0122446 * l + 0.0720327 * m],
    };
    let [r, g, b] = mul(&RGB_FROM_LMS, lms);
    let round = |x: f64| (gamma(x) * 255.).round() / 255.;
    RGB { r: round(r), g: round(g), b: round(b) }
}

/// Simulate the deficiency `d` on all `colors`.
pub fn simulate_all(colors: &[Color], d: Deficiency) -> Vec<Color> {
    colors.iter().map(|&c| simulate(c, d)).collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    fn close(c0: Color, c1: Color) -> bool {
        let eps = 1. / 255. + 1e-12;
        (c0.r - c1.r).abs() <= eps && (c0.g - c1.g).abs() <= eps
            && (c0.b - c1.b).abs() <= eps
    }

    #[test]
    fn grays_unchanged() {
        for d in Deficiency::ALL {
            for x in [0u8, 51, 128, 200, 255] {
                let c = RGB8::new(x, x, x).to_rgb();
                let c1 = simulate(c, d);
                assert!(close(c, c1), "{d:?}: {c:?} ≉ {c1:?}");
            }
        }
    }

    #[test]
    fn red_green_confusion() {
        // Protanopes and deuteranopes see red and green as yellows.
        let red = Color::new(1., 0., 0.);
        let green = Color::new(0., 1., 0.);
        for d in [Deficiency::Protan, Deficiency::Deutan] {
            let (r, g) = (simulate(red, d), simulate(green, d));
            assert!(r.r == r.g && r.r > r.b, "{d:?}: {r:?}");
            assert!(g.r == g.g && g.r > g.b, "{d:?}: {g:?}");
        }
        // Tritanopes still see them differently.
        let (r, g) = (simulate(red, Deficiency::Tritan),
                      simulate(green, Deficiency::Tritan));
        assert!(r.r > g.r && r.g < g.g);
        // The blue primary is a fixed point for protans and deutans.
        for d in [Deficiency::Protan, Deficiency::Deutan] {
            assert_eq!(simulate(Color::new(0., 0., 1.), d),
                       Color::new(0., 0., 1.));
        }
    }

    #[test]
    fn in_unit_cube() {
        for d in Deficiency::ALL {
            for c in [Color::new(0., 0., 1.), Color::new(1., 0., 1.),
                      Color::new(0., 1., 1.), Color::new(0.3, 0.9, 0.1)] {
                let c = simulate(c, d);
                for x in [c.r, c.g, c.b] {
                    assert!((0. ..= 1.).contains(&x), "{d:?}: {c:?}");
                }
            }
        }
    }

    #[test]
    fn simulate_all_keeps_length() {
        let colors = [Color::new(0.1, 0.2, 0.3); 7];
        assert_eq!(simulate_all(&colors, Deficiency::Deutan).len(), 7);
    }
}
