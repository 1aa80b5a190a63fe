//! Diverging palettes built in the HLS color space.

use thiserror::Error;
use tracing::debug;
use crate::{linspace, Color, Hls, RGBColor};

/// Error returned by [`DivergingParams::validate`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParamError {
    #[error("the number of colors must be positive")]
    NoColors,
    #[error("{name} = {value} is not in [0, 1]")]
    OutOfRange { name: &'static str, value: f64 },
}

/// Parameters of a diverging palette.
///
/// The first half of the palette has hue `h_min` and saturation
/// `s_min`, the second half hue `h_max` and saturation `s_max`.  The
/// lightness goes linearly from `l_min` to `l_mid` and then from
/// `l_mid` to `l_max`.  When the number of colors is odd, the middle
/// color is the gray of lightness `l_mid`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DivergingParams {
    pub n_colors: usize,
    pub h_min: f64,
    pub h_max: f64,
    pub s_min: f64,
    pub s_max: f64,
    pub l_min: f64,
    pub l_mid: f64,
    /// Lightness of the last color.  `None` or a negative value means
    /// `l_min`.
    pub l_max: Option<f64>,
}

impl DivergingParams {
    /// The lightness of the last color.
    pub fn l_max(&self) -> f64 {
        match self.l_max {
            Some(l) if l >= 0. => l,
            _ => self.l_min,
        }
    }

    /// Check that there is at least one color and that all hues,
    /// saturations and lightnesses are in \[0, 1\].
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.n_colors == 0 { return Err(ParamError::NoColors) }
        for (name, value) in [("h_min", self.h_min), ("h_max", self.h_max),
                              ("s_min", self.s_min), ("s_max", self.s_max),
                              ("l_min", self.l_min), ("l_mid", self.l_mid),
                              ("l_max", self.l_max())] {
            if !(0. ..= 1.).contains(&value) {
                return Err(ParamError::OutOfRange { name, value })
            }
        }
        Ok(())
    }
}

/// Return the HLS coordinates of the diverging palette described by
/// `p`.  The parameters are not validated (see
/// [`DivergingParams::validate`]).
pub fn diverging_hls(p: &DivergingParams) -> Vec<Hls> {
    let odd = p.n_colors % 2;
    let half = p.n_colors / 2;
    let hs: Vec<(f64, f64)> =
        std::iter::repeat((p.h_min, p.s_min)).take(half)
        .chain(std::iter::repeat((0., 0.)).take(odd))
        .chain(std::iter::repeat((p.h_max, p.s_max)).take(half))
        .collect();
    // The middle lightness, present in both halves when the number
    // of colors is odd, is only kept once.
    let l: Vec<f64> = linspace(p.l_min, p.l_mid, half + odd)
        .chain(linspace(p.l_mid, p.l_max(), half + odd).skip(odd))
        .collect();
    assert_eq!(hs.len(), l.len());
    assert_eq!(hs.len(), p.n_colors);
    debug!(n_colors = p.n_colors, ?l, "diverging lightness");
    hs.into_iter().zip(l).map(|((h, s), l)| Hls { h, l, s }).collect()
}

/// Return the colors of the diverging palette described by `p`.
///
/// # Example
///
/// ```
/// use cmaputil::{diverging, DivergingParams, RGBColor};
/// let p = DivergingParams { n_colors: 4, h_min: 0., h_max: 0.6,
///                           s_min: 1., s_max: 1., l_min: 0.2,
///                           l_mid: 0.8, l_max: None };
/// let hex: Vec<_> = diverging(&p).iter().map(|c| c.to_hex()).collect();
/// assert_eq!(hex.len(), 4);
/// assert_eq!(hex[0], "660000");
/// ```
pub fn diverging(p: &DivergingParams) -> Vec<Color> {
    diverging_hls(p).into_iter().map(Color::from_hls).collect()
}
