// ── Window geometry ───────────────────────────────────────────────────────────
//
// Pure arithmetic used by the size-negotiation handler and by `center()`.
// No Win32 imports; the platform backend converts to and from `RECT`/`POINT`.

/// Baseline DPI at which one logical pixel equals one device pixel.
pub const BASE_DPI: u32 = 96;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Edge-based rectangle, laid out like Win32 `RECT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle with its top-left corner at `origin`.
    pub fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(
            origin.x,
            origin.y,
            origin.x.saturating_add(size.width),
            origin.y.saturating_add(size.height),
        )
    }

    pub fn width(&self) -> i32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> i32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    pub fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }
}

// ── DPI ───────────────────────────────────────────────────────────────────────

/// Per-axis factor from logical to device pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DpiScale {
    pub x: f64,
    pub y: f64,
}

impl DpiScale {
    pub fn from_dpi(dpi_x: u32, dpi_y: u32) -> Self {
        Self {
            x: f64::from(dpi_x) / f64::from(BASE_DPI),
            y: f64::from(dpi_y) / f64::from(BASE_DPI),
        }
    }

    pub fn uniform(dpi: u32) -> Self {
        Self::from_dpi(dpi, dpi)
    }
}

impl Default for DpiScale {
    fn default() -> Self {
        Self::uniform(BASE_DPI)
    }
}

// ── Size constraints ──────────────────────────────────────────────────────────

/// Min/max window size in logical pixels.  Zero means "unset"; a bound only
/// applies when both its width and height are positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizeConstraints {
    pub min_width: i32,
    pub min_height: i32,
    pub max_width: i32,
    pub max_height: i32,
}

impl SizeConstraints {
    pub fn min(&self) -> Option<Size> {
        (self.min_width > 0 && self.min_height > 0)
            .then(|| Size::new(self.min_width, self.min_height))
    }

    pub fn max(&self) -> Option<Size> {
        (self.max_width > 0 && self.max_height > 0)
            .then(|| Size::new(self.max_width, self.max_height))
    }
}

/// Device-pixel limits written into `MINMAXINFO`.  `None` leaves the OS
/// default in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackLimits {
    pub min_track: Option<Size>,
    pub max_size: Option<Size>,
    pub max_track: Option<Size>,
}

/// Size of the non-client chrome: outer window extent minus client extent.
///
/// `client` is a client rectangle, so its origin is always (0, 0).
pub fn chrome_overhead(outer: Rect, client: Rect) -> Size {
    Size::new(
        outer.width().saturating_sub(client.right),
        outer.height().saturating_sub(client.bottom),
    )
}

fn scale_bound(logical: Size, scale: DpiScale, chrome: Size) -> Size {
    // Truncation toward zero, matching an integer assignment from a double.
    // The float-to-int cast saturates; so does adding the chrome.
    Size::new(
        ((f64::from(logical.width) * scale.x) as i32).saturating_add(chrome.width),
        ((f64::from(logical.height) * scale.y) as i32).saturating_add(chrome.height),
    )
}

/// Convert logical min/max bounds into outer-window device pixels.
pub fn track_limits(constraints: &SizeConstraints, scale: DpiScale, chrome: Size) -> TrackLimits {
    let min = constraints.min().map(|s| scale_bound(s, scale, chrome));
    let max = constraints.max().map(|s| scale_bound(s, scale, chrome));
    TrackLimits {
        min_track: min,
        max_size: max,
        max_track: max,
    }
}

// ── Centering ─────────────────────────────────────────────────────────────────

/// Top-left position that centres a window of `window` extent inside `work`.
///
/// A window larger than the work area is pinned to the work-area origin on
/// that axis, so the result never lies above or left of the work area.
pub fn centered_origin(work: Rect, window: Size) -> Point {
    let axis = |start: i32, avail: i32, extent: i32| {
        let offset = ((i64::from(avail) - i64::from(extent)) / 2).max(0);
        clamp_i32(i64::from(start) + offset)
    };
    Point::new(
        axis(work.left, work.width(), window.width),
        axis(work.top, work.height(), window.height),
    )
}

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

// ── Show state ────────────────────────────────────────────────────────────────

/// Placement state of the window as reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowState {
    Hidden,
    Normal,
    Minimized,
    Maximized,
    /// Any other `SW_*` value.
    Other(u32),
}

impl ShowState {
    /// Decode a `WINDOWPLACEMENT::showCmd` value.
    pub fn from_show_cmd(cmd: u32) -> Self {
        match cmd {
            0 => Self::Hidden,
            1 => Self::Normal,
            2 => Self::Minimized,
            3 => Self::Maximized,
            other => Self::Other(other),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_bounds_produce_no_limits() {
        let limits = track_limits(&SizeConstraints::default(), DpiScale::default(), Size::new(16, 39));
        assert_eq!(limits, TrackLimits::default());
    }

    #[test]
    fn half_set_bound_is_ignored() {
        let c = SizeConstraints {
            min_width: 400,
            ..Default::default()
        };
        assert_eq!(c.min(), None);
        assert_eq!(track_limits(&c, DpiScale::default(), Size::default()).min_track, None);
    }

    #[test]
    fn bounds_scale_with_dpi_and_add_chrome() {
        let c = SizeConstraints {
            min_width: 400,
            min_height: 300,
            max_width: 1000,
            max_height: 800,
        };
        let limits = track_limits(&c, DpiScale::uniform(144), Size::new(16, 39));
        assert_eq!(limits.min_track, Some(Size::new(616, 489)));
        assert_eq!(limits.max_size, Some(Size::new(1516, 1239)));
        assert_eq!(limits.max_track, limits.max_size);
    }

    #[test]
    fn fractional_scale_truncates() {
        let c = SizeConstraints {
            min_width: 101,
            min_height: 101,
            ..Default::default()
        };
        // 101 * 1.25 = 126.25
        let limits = track_limits(&c, DpiScale::uniform(120), Size::default());
        assert_eq!(limits.min_track, Some(Size::new(126, 126)));
    }

    #[test]
    fn chrome_is_outer_minus_client() {
        let outer = Rect::new(100, 50, 916, 689);
        let client = Rect::new(0, 0, 800, 600);
        assert_eq!(chrome_overhead(outer, client), Size::new(16, 39));
    }

    #[test]
    fn centres_in_primary_work_area() {
        let work = Rect::new(0, 0, 1920, 1040);
        assert_eq!(centered_origin(work, Size::new(800, 600)), Point::new(560, 220));
    }

    #[test]
    fn centres_relative_to_offset_monitor() {
        let work = Rect::new(1920, 0, 3840, 1080);
        assert_eq!(centered_origin(work, Size::new(1000, 500)), Point::new(2380, 290));
    }

    #[test]
    fn oversized_window_never_goes_negative() {
        let work = Rect::new(0, 0, 1280, 720);
        let p = centered_origin(work, Size::new(2000, 900));
        assert_eq!(p, Point::new(0, 0));

        let work = Rect::new(-1280, 40, 0, 760);
        let p = centered_origin(work, Size::new(1500, 300));
        assert_eq!(p, Point::new(-1280, 250));
    }

    #[test]
    fn show_cmd_decoding() {
        assert_eq!(ShowState::from_show_cmd(3), ShowState::Maximized);
        assert_eq!(ShowState::from_show_cmd(2), ShowState::Minimized);
        assert_eq!(ShowState::from_show_cmd(1), ShowState::Normal);
        assert_eq!(ShowState::from_show_cmd(0), ShowState::Hidden);
        assert_eq!(ShowState::from_show_cmd(9), ShowState::Other(9));
    }

    #[test]
    fn huge_bounds_saturate_instead_of_wrapping() {
        let c = SizeConstraints {
            min_width: i32::MAX,
            min_height: i32::MAX,
            max_width: i32::MAX,
            max_height: i32::MAX,
        };
        let limits = track_limits(&c, DpiScale::uniform(192), Size::new(16, 39));
        let max = Size::new(i32::MAX, i32::MAX);
        assert_eq!(limits.min_track, Some(max));
        assert_eq!(limits.max_track, Some(max));
    }

    #[test]
    fn rect_at_the_edge_of_the_coordinate_space_saturates() {
        let r = Rect::from_origin_size(Point::new(i32::MAX - 10, 5), Size::new(800, 600));
        assert_eq!(r.right, i32::MAX);
        assert_eq!(r.bottom, 605);

        let wide = Rect::new(i32::MIN, 0, i32::MAX, 10);
        assert_eq!(wide.width(), i32::MAX);
    }

    #[test]
    fn centering_in_an_extreme_work_area_stays_in_range() {
        let work = Rect::new(i32::MAX - 100, 0, i32::MAX, 100);
        let p = centered_origin(work, Size::new(i32::MIN, 10));
        assert_eq!(p, Point::new(i32::MAX, 45));
    }

    #[test]
    fn rect_helpers() {
        let r = Rect::from_origin_size(Point::new(10, 20), Size::new(300, 200));
        assert_eq!(r, Rect::new(10, 20, 310, 220));
        assert_eq!(r.size(), Size::new(300, 200));
        assert_eq!(r.origin(), Point::new(10, 20));
    }
}
