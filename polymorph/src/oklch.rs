use std::f32::consts::PI;

use ratatui::style::Color;

/// Oklch color: perceptually uniform lightness, chroma, and hue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oklch {
    pub l: f32,
    pub c: f32,
    pub h: f32,
}

#[derive(Debug, Clone, Copy)]
struct Oklab {
    l: f32,
    a: f32,
    b: f32,
}

impl Oklch {
    pub fn from_srgb(r: u8, g: u8, b: u8) -> Self {
        let lab = linear_to_oklab([
            srgb_to_linear(r as f32 / 255.0),
            srgb_to_linear(g as f32 / 255.0),
            srgb_to_linear(b as f32 / 255.0),
        ]);

        let c = (lab.a * lab.a + lab.b * lab.b).sqrt();
        let h = if c < 1e-8 { 0.0 } else { lab.b.atan2(lab.a) };

        Self { l: lab.l, c, h }
    }

    pub fn to_srgb(self) -> (u8, u8, u8) {
        let lab = Oklab {
            l: self.l,
            a: self.c * self.h.cos(),
            b: self.c * self.h.sin(),
        };
        let [r, g, b] = oklab_to_linear(lab);

        let to_u8 = |c: f32| (linear_to_srgb(c.clamp(0.0, 1.0)) * 255.0 + 0.5) as u8;

        (to_u8(r), to_u8(g), to_u8(b))
    }

    /// `None` for colors without a concrete RGB value (`Reset`, `Indexed`).
    pub fn from_color(color: Color) -> Option<Self> {
        let (r, g, b) = match color {
            Color::Rgb(r, g, b) => (r, g, b),
            Color::Black => (0, 0, 0),
            Color::Red => (128, 0, 0),
            Color::Green => (0, 128, 0),
            Color::Yellow => (128, 128, 0),
            Color::Blue => (0, 0, 128),
            Color::Magenta => (128, 0, 128),
            Color::Cyan => (0, 128, 128),
            Color::Gray => (192, 192, 192),
            Color::DarkGray => (128, 128, 128),
            Color::LightRed => (255, 0, 0),
            Color::LightGreen => (0, 255, 0),
            Color::LightYellow => (255, 255, 0),
            Color::LightBlue => (0, 0, 255),
            Color::LightMagenta => (255, 0, 255),
            Color::LightCyan => (0, 255, 255),
            Color::White => (255, 255, 255),
            Color::Reset | Color::Indexed(_) => return None,
        };

        Some(Self::from_srgb(r, g, b))
    }

    pub fn to_color(self) -> Color {
        let (r, g, b) = self.to_srgb();
        Color::Rgb(r, g, b)
    }

    /// Hue interpolates via shortest arc.
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let mut dh = other.h - self.h;

        if dh > PI {
            dh -= 2.0 * PI;
        } else if dh < -PI {
            dh += 2.0 * PI;
        }

        Self {
            l: self.l + (other.l - self.l) * t,
            c: self.c + (other.c - self.c) * t,
            h: self.h + dh * t,
        }
    }
}

/// Blend two optional colors. `None` is fully transparent, which has no hue to
/// blend through, so mixes involving it snap at the midpoint. So do colors
/// without an RGB value.
pub fn mix(src: Option<Color>, dst: Option<Color>, t: f32) -> Option<Color> {
    if t <= 0.0 {
        return src;
    }
    if t >= 1.0 {
        return dst;
    }

    let lerped = src
        .and_then(Oklch::from_color)
        .zip(dst.and_then(Oklch::from_color))
        .map(|(a, b)| a.lerp(b, t).to_color());

    match lerped {
        Some(color) => Some(color),
        None if t < 0.5 => src,
        None => dst,
    }
}

/// Scale lightness by `factor` (0.0 = black, 1.0 = original). Terminals have no
/// alpha, so opacity is approximated by fading toward black.
pub fn fade(color: Color, factor: f32) -> Color {
    match Oklch::from_color(color) {
        Some(lch) => Oklch {
            l: lch.l * factor.clamp(0.0, 1.0),
            ..lch
        }
        .to_color(),
        None if factor >= 0.5 => color,
        None => Color::Reset,
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.0031308 {
        c * 12.92
    } else {
        1.055 * c.powf(1.0 / 2.4) - 0.055
    }
}

fn linear_to_oklab([r, g, b]: [f32; 3]) -> Oklab {
    let l = 0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b;
    let m = 0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b;
    let s = 0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b;

    let l = l.cbrt();
    let m = m.cbrt();
    let s = s.cbrt();

    Oklab {
        l: 0.2104542553 * l + 0.7936177850 * m - 0.0040720468 * s,
        a: 1.9779984951 * l - 2.4285922050 * m + 0.4505937099 * s,
        b: 0.0259040371 * l + 0.7827717662 * m - 0.8086757660 * s,
    }
}

fn oklab_to_linear(lab: Oklab) -> [f32; 3] {
    let Oklab { l, a, b } = lab;

    let l_ = l + 0.3963377774 * a + 0.2158037573 * b;
    let m_ = l - 0.1055613458 * a - 0.0638541728 * b;
    let s_ = l - 0.0894841775 * a - 1.2914855480 * b;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    [
        4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
        -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
        -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_round_trip(r: u8, g: u8, b: u8) {
        let (r2, g2, b2) = Oklch::from_srgb(r, g, b).to_srgb();

        assert!(
            r.abs_diff(r2) <= 1 && g.abs_diff(g2) <= 1 && b.abs_diff(b2) <= 1,
            "round-trip failed: ({r}, {g}, {b}) -> ({r2}, {g2}, {b2})"
        );
    }

    #[test]
    fn srgb_survives_conversion() {
        for (r, g, b) in [(255, 0, 0), (0, 255, 0), (0, 0, 255), (128, 64, 32), (1, 1, 1)] {
            assert_round_trip(r, g, b);
        }

        for v in (0..=255).step_by(51) {
            assert_round_trip(v, v, v);
        }
    }

    #[test]
    fn mix_endpoints_match_inputs() {
        let red = Some(Color::Rgb(255, 0, 0));
        let blue = Some(Color::Rgb(0, 0, 255));

        assert_eq!(mix(red, blue, 0.0), red);
        assert_eq!(mix(red, blue, 1.0), blue);
    }

    #[test]
    fn mix_midpoint_is_in_between() {
        let mid = mix(Some(Color::Rgb(255, 0, 0)), Some(Color::Rgb(0, 0, 255)), 0.5);

        match mid {
            Some(Color::Rgb(r, _, b)) => assert!(r < 255 && b < 255, "got {mid:?}"),
            other => panic!("expected Rgb color, got {other:?}"),
        }
    }

    #[test]
    fn mix_with_transparent_snaps_at_midpoint() {
        let red = Some(Color::Red);

        assert_eq!(mix(None, red, 0.4), None);
        assert_eq!(mix(None, red, 0.6), red);
        assert_eq!(mix(red, None, 0.6), None);
    }

    #[test]
    fn fade_scales_lightness() {
        match fade(Color::White, 1.0) {
            Color::Rgb(r, g, b) => assert!(r >= 254 && g >= 254 && b >= 254),
            other => panic!("expected Rgb color, got {other:?}"),
        }
        assert_eq!(fade(Color::White, 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(fade(Color::Reset, 0.2), Color::Reset);
        assert_eq!(fade(Color::Indexed(3), 0.8), Color::Indexed(3));
    }
}
