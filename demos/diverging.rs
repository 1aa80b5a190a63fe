use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error};
use cmaputil::{diverging, Color, DivergingParams, RGBColor};

type Err = Box<dyn Error>;

fn table_of_colors(fh: &mut impl Write, colors: &[Color],
                   width: u32, comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 30px; \
                      background-color: #{}\"></td>",
                 c.to_hex())?;
    }
    writeln!(fh, "<td rowspan=\"2\" style=\"padding-left: 7px\">\
                  {comment}</td></tr><tr>")?;
    for c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 12px; \
                      background-color: #{}\"></td>",
                 c.to_gray().to_hex())?;
    }
    writeln!(fh, "</tr></table><br/>")?;
    Ok(())
}

fn palette(fh: &mut impl Write, n_colors: usize, (h_min, h_max): (f64, f64),
           (l_min, l_mid): (f64, f64), width: u32) -> Result<(), Err> {
    let p = DivergingParams { n_colors, h_min, h_max, s_min: 0.8, s_max: 0.8,
                              l_min, l_mid, l_max: None };
    p.validate()?;
    let comment = format!("{n_colors} colors, hue {h_min} → {h_max}, \
                           lightness {l_min} → {l_mid}");
    table_of_colors(fh, &diverging(&p), width, &comment)
}

fn main() -> Result<(), Err> {
    let mut fh = BufWriter::new(File::create("diverging.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>cmaputil: {}</title>\n\
                  </head>\n\
                  <body>",
             env::args().next().unwrap_or_default())?;
    writeln!(fh, "<h3>Red – blue</h3>")?;
    for n in [5, 8, 11] {
        palette(&mut fh, n, (0., 0.6), (0.3, 0.95), 43)?;
    }
    palette(&mut fh, 101, (0., 0.6), (0.3, 0.95), 4)?;

    writeln!(fh, "<h3>Other hues</h3>")?;
    for hues in [(0.08, 0.75), (0.83, 0.33), (0.12, 0.5)] {
        palette(&mut fh, 9, hues, (0.25, 0.9), 43)?;
    }

    writeln!(fh, "<h3>Dark middle</h3>")?;
    palette(&mut fh, 9, (0., 0.6), (0.7, 0.15), 43)?;

    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
