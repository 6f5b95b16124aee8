use rand::seq::SliceRandom;

use crate::hub::types::HexColor;

pub const PALETTE: [&str; 8] = [
    "#818cf8", "#34d399", "#f87171", "#fbbf24", "#60a5fa", "#a78bfa", "#f472b6", "#2dd4bf",
];

/// A display color for a new booking. Colors repeat.
pub fn generate_color() -> HexColor {
    let choice = PALETTE.choose(&mut rand::thread_rng()).copied().unwrap_or(PALETTE[0]);
    HexColor::parse(choice).unwrap_or_else(|_| HexColor::from_rgb([0x81, 0x8c, 0xf8]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_valid() {
        for color in PALETTE {
            assert!(HexColor::parse(color).is_ok(), "{color}");
        }
    }

    #[test]
    fn test_generated_colors_come_from_palette() {
        for _ in 0..32 {
            let color = generate_color();
            assert!(PALETTE.contains(&color.as_str()));
        }
    }
}
