//! Continuous colour scales.

use std::fmt;

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// The sequential "Reds" palette, lightest first.
pub const REDS: [Rgb; 9] = [
    Rgb(255, 245, 240),
    Rgb(254, 224, 210),
    Rgb(252, 187, 161),
    Rgb(252, 146, 114),
    Rgb(251, 106, 74),
    Rgb(239, 59, 44),
    Rgb(203, 24, 29),
    Rgb(165, 15, 21),
    Rgb(103, 0, 13),
];

/// Maps a numeric domain linearly onto a palette.
#[derive(Debug, Clone, Copy)]
pub struct ColorScale {
    pub min: f64,
    pub max: f64,
    stops: &'static [Rgb],
}

impl ColorScale {
    #[must_use]
    pub const fn reds(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            stops: &REDS,
        }
    }

    /// Colour of `value`. Values outside the domain take the end colours;
    /// when `min == max` every value takes the lightest colour.
    #[must_use]
    pub fn color_for(&self, value: f64) -> Rgb {
        let span = self.max - self.min;
        let t = if span > 0.0 && value.is_finite() {
            ((value - self.min) / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.at(t)
    }

    /// Colour at position `t` in `[0, 1]` along the palette.
    #[must_use]
    pub fn at(&self, t: f64) -> Rgb {
        let Some(first) = self.stops.first().copied() else {
            return Rgb(0, 0, 0);
        };
        let segments = self.stops.len() - 1;
        if segments == 0 {
            return first;
        }

        #[allow(clippy::cast_precision_loss)]
        let scaled = t.clamp(0.0, 1.0) * segments as f64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = (scaled.floor() as usize).min(segments - 1);
        #[allow(clippy::cast_precision_loss)]
        let local = scaled - index as f64;

        let a = self.stops[index];
        let b = self.stops[index + 1];
        Rgb(lerp(a.0, b.0, local), lerp(a.1, b.1, local), lerp(a.2, b.2, local))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (f64::from(b) - f64::from(a))
        .mul_add(t, f64::from(a))
        .round()
        .clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_hex() {
        assert_eq!(REDS[0].to_string(), "#fff5f0");
        assert_eq!(REDS[8].to_string(), "#67000d");
    }

    #[test]
    fn endpoints() {
        let scale = ColorScale::reds(0.0, 10.0);
        assert_eq!(scale.color_for(0.0), REDS[0]);
        assert_eq!(scale.color_for(10.0), REDS[8]);
        assert_eq!(scale.color_for(-5.0), REDS[0]);
        assert_eq!(scale.color_for(50.0), REDS[8]);
    }

    #[test]
    fn interpolates_between_stops() {
        let scale = ColorScale::reds(0.0, 8.0);
        assert_eq!(scale.color_for(4.0), REDS[4]);
        let mid = scale.color_for(0.5);
        assert_eq!(mid, Rgb(255, 235, 225));
    }

    #[test]
    fn degenerate_domain_is_lightest() {
        let scale = ColorScale::reds(0.0, 0.0);
        assert_eq!(scale.color_for(0.0), REDS[0]);
        assert_eq!(scale.color_for(3.0), REDS[0]);
    }
}
