use super::model::Bounds;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Screen-space rectangle given by two drag corners in any order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    pub min: (f64, f64),
    pub max: (f64, f64),
}

impl ScreenRect {
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            min: (a.0.min(b.0), a.1.min(b.1)),
            max: (a.0.max(b.0), a.1.max(b.1)),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.0 - self.min.0
    }

    pub fn height(&self) -> f64 {
        self.max.1 - self.min.1
    }
}

/// Maps the visible graph rectangle onto a pixel viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
    visible: Bounds,
    full: Bounds,
}

fn project(value: f64, start: f64, end: f64, extent: f64) -> f64 {
    let span = end - start;
    if span == 0.0 {
        return extent / 2.0;
    }
    (value - start) * extent / span
}

fn unproject(pixel: f64, start: f64, end: f64, extent: f64) -> f64 {
    start + pixel * (end - start) / extent
}

impl ViewTransform {
    pub fn new(full: Bounds) -> Self {
        Self {
            visible: full,
            full,
        }
    }

    pub fn visible(&self) -> Bounds {
        self.visible
    }

    pub fn to_screen(&self, point: (f64, f64), viewport: Viewport) -> (f64, f64) {
        (
            project(point.0, self.visible.min_x, self.visible.max_x, viewport.width),
            project(point.1, self.visible.min_y, self.visible.max_y, viewport.height),
        )
    }

    pub fn to_graph(&self, pixel: (f64, f64), viewport: Viewport) -> (f64, f64) {
        (
            unproject(pixel.0, self.visible.min_x, self.visible.max_x, viewport.width),
            unproject(pixel.1, self.visible.min_y, self.visible.max_y, viewport.height),
        )
    }

    /// Narrows the visible rectangle to the graph area under `rect`.
    ///
    /// Rectangles without area and empty viewports leave the view untouched.
    pub fn zoom_to(&mut self, rect: ScreenRect, viewport: Viewport) -> bool {
        let rect = ScreenRect::from_corners(rect.min, rect.max);
        if viewport.is_empty() || rect.width() <= 0.0 || rect.height() <= 0.0 {
            return false;
        }

        let (min_x, min_y) = self.to_graph(rect.min, viewport);
        let (max_x, max_y) = self.to_graph(rect.max, viewport);
        self.visible = Bounds {
            min_x,
            min_y,
            max_x,
            max_y,
        };
        true
    }

    /// Scales the view about a screen point; factors above 1 zoom in.
    pub fn zoom_about(&mut self, pixel: (f64, f64), factor: f64, viewport: Viewport) -> bool {
        if viewport.is_empty() || !(factor > 0.0) || factor == 1.0 {
            return false;
        }

        let (anchor_x, anchor_y) = self.to_graph(pixel, viewport);
        let scale = 1.0 / factor;
        self.visible = Bounds {
            min_x: anchor_x - (anchor_x - self.visible.min_x) * scale,
            min_y: anchor_y - (anchor_y - self.visible.min_y) * scale,
            max_x: anchor_x + (self.visible.max_x - anchor_x) * scale,
            max_y: anchor_y + (self.visible.max_y - anchor_y) * scale,
        };
        true
    }

    /// Moves the view so graph content follows a pointer drag of `delta` pixels.
    pub fn pan_by(&mut self, delta: (f64, f64), viewport: Viewport) -> bool {
        if viewport.is_empty() || (delta.0 == 0.0 && delta.1 == 0.0) {
            return false;
        }

        let shift_x = delta.0 * self.visible.width() / viewport.width;
        let shift_y = delta.1 * self.visible.height() / viewport.height;
        self.visible.min_x -= shift_x;
        self.visible.max_x -= shift_x;
        self.visible.min_y -= shift_y;
        self.visible.max_y -= shift_y;
        true
    }

    pub fn reset(&mut self) {
        self.visible = self.full;
    }

    pub fn is_reset(&self) -> bool {
        self.visible == self.full
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 900.0,
        height: 800.0,
    };

    fn bounds(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Bounds {
        Bounds {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    fn assert_close(actual: (f64, f64), expected: (f64, f64)) {
        assert!(
            (actual.0 - expected.0).abs() < 1e-9 && (actual.1 - expected.1).abs() < 1e-9,
            "{actual:?} != {expected:?}"
        );
    }

    #[test]
    fn test_to_screen_maps_corners() {
        let view = ViewTransform::new(bounds(100.0, 50.0, 1000.0, 850.0));
        assert_close(view.to_screen((100.0, 50.0), VIEWPORT), (0.0, 0.0));
        assert_close(view.to_screen((1000.0, 850.0), VIEWPORT), (900.0, 800.0));
        assert_close(view.to_screen((550.0, 450.0), VIEWPORT), (450.0, 400.0));
    }

    #[test]
    fn test_to_graph_inverts_to_screen() {
        let view = ViewTransform::new(bounds(-20.0, 3.0, 480.0, 77.0));
        let point = (123.0, 45.0);
        assert_close(view.to_graph(view.to_screen(point, VIEWPORT), VIEWPORT), point);
    }

    #[test]
    fn test_zero_span_projects_to_center() {
        let view = ViewTransform::new(bounds(5.0, 0.0, 5.0, 10.0));
        assert_close(view.to_screen((5.0, 10.0), VIEWPORT), (450.0, 800.0));
    }

    #[test]
    fn test_zoom_to_normalizes_corners() {
        let mut view = ViewTransform::new(bounds(0.0, 0.0, 900.0, 800.0));
        let dragged_up_left = ScreenRect {
            min: (600.0, 400.0),
            max: (300.0, 200.0),
        };
        assert!(view.zoom_to(dragged_up_left, VIEWPORT));
        assert_eq!(view.visible(), bounds(300.0, 200.0, 600.0, 400.0));

        // The zoomed region now fills the viewport.
        assert_close(view.to_screen((300.0, 200.0), VIEWPORT), (0.0, 0.0));
        assert_close(view.to_screen((600.0, 400.0), VIEWPORT), (900.0, 800.0));
    }

    #[test]
    fn test_zoom_to_composes() {
        let mut view = ViewTransform::new(bounds(0.0, 0.0, 1800.0, 1600.0));
        view.zoom_to(
            ScreenRect::from_corners((0.0, 0.0), (450.0, 400.0)),
            VIEWPORT,
        );
        view.zoom_to(
            ScreenRect::from_corners((450.0, 400.0), (900.0, 800.0)),
            VIEWPORT,
        );
        assert_eq!(view.visible(), bounds(450.0, 400.0, 900.0, 800.0));
    }

    #[test]
    fn test_zoom_to_ignores_flat_rects() {
        let mut view = ViewTransform::new(bounds(0.0, 0.0, 10.0, 10.0));
        let flat = ScreenRect::from_corners((10.0, 10.0), (10.0, 300.0));
        assert!(!view.zoom_to(flat, VIEWPORT));
        let empty = Viewport {
            width: 0.0,
            height: 100.0,
        };
        assert!(!view.zoom_to(ScreenRect::from_corners((0.0, 0.0), (5.0, 5.0)), empty));
        assert!(view.is_reset());
    }

    #[test]
    fn test_reset_restores_full_extent() {
        let full = bounds(-10.0, -10.0, 10.0, 10.0);
        let mut view = ViewTransform::new(full);
        view.zoom_to(ScreenRect::from_corners((10.0, 20.0), (200.0, 300.0)), VIEWPORT);
        view.pan_by((30.0, -12.0), VIEWPORT);
        view.zoom_about((100.0, 100.0), 1.5, VIEWPORT);
        assert!(!view.is_reset());

        view.reset();
        assert_eq!(view.visible(), full);
    }

    #[test]
    fn test_zoom_about_keeps_anchor_fixed() {
        let mut view = ViewTransform::new(bounds(0.0, 0.0, 900.0, 800.0));
        let anchor = (300.0, 100.0);
        let before = view.to_graph(anchor, VIEWPORT);
        assert!(view.zoom_about(anchor, 2.0, VIEWPORT));
        assert_close(view.to_graph(anchor, VIEWPORT), before);
        assert!((view.visible().width() - 450.0).abs() < 1e-9);
        assert!(!view.zoom_about(anchor, 0.0, VIEWPORT));
    }

    #[test]
    fn test_pan_moves_content_with_pointer() {
        let mut view = ViewTransform::new(bounds(0.0, 0.0, 900.0, 800.0));
        let before = view.to_screen((100.0, 100.0), VIEWPORT);
        assert!(view.pan_by((25.0, -40.0), VIEWPORT));
        let after = view.to_screen((100.0, 100.0), VIEWPORT);
        assert_close(after, (before.0 + 25.0, before.1 - 40.0));
        assert!(!view.pan_by((0.0, 0.0), VIEWPORT));
    }
}
