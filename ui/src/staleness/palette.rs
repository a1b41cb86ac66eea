//! Viridis colour scale. Perceptually uniform, so equal score steps read as
//! equal colour steps; 0 maps to deep purple (worst), 1 to yellow (best).

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

const VIRIDIS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 81, 139),
    (44, 113, 142),
    (33, 144, 141),
    (39, 173, 129),
    (92, 200, 99),
    (170, 220, 50),
    (253, 231, 37),
];

/// Maps `t` in [0, 1] onto the scale. Out-of-range input is clamped, NaN reads as 0.
pub fn viridis(t: f64) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let segments = (VIRIDIS.len() - 1) as f64;
    let x = t * segments;
    let i = x.floor() as usize;
    if i >= VIRIDIS.len() - 1 {
        let (r, g, b) = VIRIDIS[VIRIDIS.len() - 1];
        return Color::rgb(r, g, b);
    }
    let f = x - i as f64;
    let (r0, g0, b0) = VIRIDIS[i];
    let (r1, g1, b1) = VIRIDIS[i + 1];
    let lerp = |a: u8, b: u8| (f64::from(a) + f * (f64::from(b) - f64::from(a))).round() as u8;
    Color::rgb(lerp(r0, r1), lerp(g0, g1), lerp(b0, b1))
}

/// CSS gradient matching the scale, for the legend bar.
pub fn viridis_gradient_css() -> String {
    let last = (VIRIDIS.len() - 1) as f64;
    let stops = VIRIDIS
        .iter()
        .enumerate()
        .map(|(i, (r, g, b))| {
            let pct = i as f64 / last * 100.0;
            format!("{} {pct:.1}%", Color::rgb(*r, *g, *b))
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("linear-gradient(to right, {stops})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_the_scale() {
        assert_eq!(viridis(0.0).to_string(), "#440154");
        assert_eq!(viridis(1.0).to_string(), "#fde725");
        assert_eq!(viridis(-3.0), viridis(0.0));
        assert_eq!(viridis(f64::NAN), viridis(0.0));
    }

    #[test]
    fn midpoint_is_the_middle_stop() {
        assert_eq!(viridis(0.5), Color::rgb(33, 144, 141));
    }

    #[test]
    fn displays_as_css_hex() {
        assert_eq!(Color::rgb(68, 1, 84).to_string(), "#440154");
        assert_eq!(viridis(1.0).to_string(), "#fde725");
    }

    #[test]
    fn gradient_lists_every_stop() {
        let css = viridis_gradient_css();
        assert!(css.starts_with("linear-gradient(to right, #440154 0.0%"));
        assert!(css.ends_with("#fde725 100.0%)"));
    }
}
