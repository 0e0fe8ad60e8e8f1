/// Node render size in pixels, `floor(ln(degree) + 6)`, used as the circle
/// diameter.
///
/// Not meaningful for degree 0; callers only evaluate it for nodes that are
/// drawn, which always have neighbors.
pub fn render_radius(degree: usize) -> f64 {
    ((degree as f64).ln() + 6.0).floor()
}

/// Log-scaled single-channel intensity for edge weights.
///
/// The scale is `ln((max - min)^(1/255))`, so the heaviest edge lands near 255.
/// A graph whose weights are all equal has a zero scale and yields
/// non-finite intensities; those are passed through untouched.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeShading {
    min_weight: f64,
    normalizer: f64,
}

impl EdgeShading {
    pub fn new(min_weight: f64, max_weight: f64) -> Self {
        Self {
            min_weight,
            normalizer: (max_weight - min_weight).powf(1.0 / 255.0).ln(),
        }
    }

    pub fn intensity(&self, weight: f64) -> f64 {
        ((weight - self.min_weight + 1.0).ln() / self.normalizer).floor()
    }

    /// Intensity as a color channel; the float cast saturates NaN to 0.
    pub fn channel(&self, weight: f64) -> u8 {
        self.intensity(weight) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_radius_grows_with_degree() {
        assert_eq!(render_radius(1), 6.0);
        assert_eq!(render_radius(2), 6.0);
        assert_eq!(render_radius(3), 7.0);
        assert_eq!(render_radius(8), 8.0);
        assert_eq!(render_radius(100), 10.0);
    }

    #[test]
    fn test_intensity_spans_channel() {
        let shading = EdgeShading::new(1.0, 101.0);
        assert_eq!(shading.intensity(1.0), 0.0);
        assert_eq!(shading.channel(1.0), 0);
        // ln(101) / (ln(100) / 255) is a little above 255.
        assert!(shading.intensity(101.0) >= 255.0);
        assert_eq!(shading.channel(101.0), 255);

        let middle = shading.intensity(11.0);
        assert!(middle > 0.0 && middle < 255.0);
    }

    #[test]
    fn test_degenerate_range_is_not_clamped() {
        let shading = EdgeShading::new(5.0, 5.0);
        assert_eq!(shading.normalizer, f64::NEG_INFINITY);
        let value = shading.intensity(6.0);
        assert!(value == 0.0 || !value.is_finite());

        let below = EdgeShading::new(5.0, 10.0).intensity(3.0);
        assert!(below.is_nan());
        assert_eq!(EdgeShading::new(5.0, 10.0).channel(3.0), 0);
    }
}
