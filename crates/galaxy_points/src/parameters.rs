use bevy::color::Srgba;

/// Inputs to one galaxy generation pass.
///
/// The generator trusts these values; range enforcement belongs to whoever edits them
/// (see [`GalaxyParameters::clamped`]).
#[derive(Clone, Debug, PartialEq)]
pub struct GalaxyParameters {
    pub count: u32,
    pub size: f32,
    pub radius: f32,
    pub branches: u32,
    /// Angular twist per unit of radius, in radians.
    pub spin: f32,
    pub randomness: f32,
    pub randomness_power: f32,
    pub inside_color: Srgba,
    pub outside_color: Srgba,
    /// Fixed seed for reproducible output. `None` draws a new one on every generation.
    pub seed: Option<u64>,
}

impl Default for GalaxyParameters {
    fn default() -> Self {
        Self {
            count: 100_000,
            size: 0.01,
            radius: 5.0,
            branches: 3,
            spin: 1.0,
            randomness: 0.2,
            randomness_power: 3.0,
            inside_color: Srgba::rgb_u8(0xff, 0x60, 0x30),
            outside_color: Srgba::rgb_u8(0x1b, 0x39, 0x84),
            seed: None,
        }
    }
}

impl GalaxyParameters {
    pub const MIN: Self = Self {
        count: 100,
        size: 0.01,
        radius: 0.1,
        branches: 2,
        spin: -5.0,
        randomness: 0.0,
        randomness_power: 1.0,
        inside_color: Srgba::BLACK,
        outside_color: Srgba::BLACK,
        seed: None,
    };
    pub const MAX: Self = Self {
        count: 1_000_000,
        size: 0.1,
        radius: 20.0,
        branches: 20,
        spin: 5.0,
        randomness: 5.0,
        randomness_power: 10.0,
        inside_color: Srgba::WHITE,
        outside_color: Srgba::WHITE,
        seed: None,
    };

    pub const COUNT_STEP: u32 = 100;
    pub const SIZE_STEP: f32 = 0.001;
    pub const RADIUS_STEP: f32 = 0.1;
    pub const FINE_STEP: f32 = 0.001;

    /// Copy with every numeric field pulled into `MIN..=MAX`. Colors and seed pass through.
    pub fn clamped(&self) -> Self {
        let (min, max) = (Self::MIN, Self::MAX);
        Self {
            count: self.count.clamp(min.count, max.count),
            size: self.size.clamp(min.size, max.size),
            radius: self.radius.clamp(min.radius, max.radius),
            branches: self.branches.clamp(min.branches, max.branches),
            spin: self.spin.clamp(min.spin, max.spin),
            randomness: self.randomness.clamp(min.randomness, max.randomness),
            randomness_power: self
                .randomness_power
                .clamp(min.randomness_power, max.randomness_power),
            inside_color: self.inside_color,
            outside_color: self.outside_color,
            seed: self.seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_within_range() {
        let params = GalaxyParameters::default();
        assert_eq!(params.clamped(), params);
    }

    #[test]
    fn clamped_pulls_values_into_range() {
        let params = GalaxyParameters {
            count: 5,
            size: 1.0,
            radius: -3.0,
            branches: 0,
            spin: 12.0,
            randomness: -1.0,
            randomness_power: 0.5,
            seed: Some(7),
            ..Default::default()
        }
        .clamped();

        assert_eq!(params.count, 100);
        assert_eq!(params.size, 0.1);
        assert_eq!(params.radius, 0.1);
        assert_eq!(params.branches, 2);
        assert_eq!(params.spin, 5.0);
        assert_eq!(params.randomness, 0.0);
        assert_eq!(params.randomness_power, 1.0);
        assert_eq!(params.seed, Some(7));
    }
}
