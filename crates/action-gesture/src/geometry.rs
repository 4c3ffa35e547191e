//! Pure swipe geometry.
//!
//! Every function here is deterministic and side-effect free: given a
//! viewport and a gesture description it returns absolute coordinates, or
//! `InvalidGeometry` when the inputs make no sense. All returned coordinates
//! lie within `[0, width) x [0, height)`; callers never clamp.

use fingertip_core_types::{Direction, ElementRect, SwipeGesture, Viewport};

use crate::errors::GestureError;

/// Distance from the screen edge where edge-navigation swipes start.
const EDGE_INSET: i32 = 50;

/// Whole-screen directional swipe.
///
/// The moving axis spans a window centred on the screen midpoint of width
/// `distance_ratio x axis_length`; the perpendicular axis is pinned to the
/// midpoint. Up/Left travel backward along their axis.
pub fn compute_swipe(
    viewport: Viewport,
    direction: Direction,
    distance_ratio: f64,
    duration_ms: u64,
) -> Result<SwipeGesture, GestureError> {
    validate_viewport(viewport)?;
    if !(distance_ratio > 0.0 && distance_ratio <= 1.0) {
        return Err(GestureError::InvalidGeometry(format!(
            "distance ratio {distance_ratio} outside (0, 1]"
        )));
    }

    let (center_x, center_y) = viewport.center();
    let half = distance_ratio / 2.0;
    let sign = direction.sign() as f64;

    let gesture = if direction.is_vertical() {
        let axis = viewport.height as f64;
        let start = (axis * (0.5 - sign * half)) as i32;
        let end = (axis * (0.5 + sign * half)) as i32;
        SwipeGesture::new(
            center_x,
            clamp_y(viewport, start),
            center_x,
            clamp_y(viewport, end),
            duration_ms,
        )
    } else {
        let axis = viewport.width as f64;
        let start = (axis * (0.5 - sign * half)) as i32;
        let end = (axis * (0.5 + sign * half)) as i32;
        SwipeGesture::new(
            clamp_x(viewport, start),
            center_y,
            clamp_x(viewport, end),
            center_y,
            duration_ms,
        )
    };
    Ok(gesture)
}

/// Element-relative swipe: anchored on the element centre, travelling
/// `min(width, height) / 3` regardless of any distance ratio.
pub fn compute_element_swipe(
    viewport: Viewport,
    rect: ElementRect,
    direction: Direction,
    duration_ms: u64,
) -> Result<SwipeGesture, GestureError> {
    validate_viewport(viewport)?;
    let travel = (rect.min_side() / 3) as i32;
    let (center_x, center_y) = rect.center();
    let sign = direction.sign();

    let (start_x, start_y, end_x, end_y) = if direction.is_vertical() {
        (
            center_x,
            center_y - sign * travel,
            center_x,
            center_y + sign * travel,
        )
    } else {
        (
            center_x - sign * travel,
            center_y,
            center_x + sign * travel,
            center_y,
        )
    };

    Ok(SwipeGesture::new(
        clamp_x(viewport, start_x),
        clamp_y(viewport, start_y),
        clamp_x(viewport, end_x),
        clamp_y(viewport, end_y),
        duration_ms,
    ))
}

/// Pull-to-refresh: drag from the top quarter of the screen down to the
/// three-quarter line.
pub fn compute_pull_to_refresh(
    viewport: Viewport,
    duration_ms: u64,
) -> Result<SwipeGesture, GestureError> {
    validate_viewport(viewport)?;
    let x = (viewport.width / 2) as i32;
    let start_y = (viewport.height / 4) as i32;
    let end_y = (viewport.height as f64 * 0.75) as i32;
    Ok(SwipeGesture::new(
        x,
        clamp_y(viewport, start_y),
        x,
        clamp_y(viewport, end_y),
        duration_ms,
    ))
}

/// Edge swipe from the left border toward the screen centre - the
/// drawer-open / back-navigation gesture.
pub fn compute_edge_swipe(
    viewport: Viewport,
    duration_ms: u64,
) -> Result<SwipeGesture, GestureError> {
    validate_viewport(viewport)?;
    let start_x = clamp_x(viewport, EDGE_INSET);
    let y = (viewport.height / 2) as i32;
    let end_x = (viewport.width / 2) as i32;
    Ok(SwipeGesture::new(start_x, y, end_x, y, duration_ms))
}

fn validate_viewport(viewport: Viewport) -> Result<(), GestureError> {
    if !viewport.is_valid() {
        return Err(GestureError::InvalidGeometry(format!(
            "viewport {viewport} has a non-positive dimension"
        )));
    }
    Ok(())
}

fn clamp_x(viewport: Viewport, x: i32) -> i32 {
    x.clamp(0, viewport.width as i32 - 1)
}

fn clamp_y(viewport: Viewport, y: i32) -> i32 {
    y.clamp(0, viewport.height as i32 - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHONE: Viewport = Viewport {
        width: 1080,
        height: 2280,
    };

    #[test]
    fn swipe_up_half_screen() {
        let gesture = compute_swipe(PHONE, Direction::Up, 0.5, 1000).unwrap();
        assert_eq!(
            gesture,
            SwipeGesture::new(540, 1710, 540, 570, 1000)
        );
    }

    #[test]
    fn swipe_down_mirrors_up() {
        let gesture = compute_swipe(PHONE, Direction::Down, 0.5, 1000).unwrap();
        assert_eq!(gesture, SwipeGesture::new(540, 570, 540, 1710, 1000));
    }

    #[test]
    fn horizontal_swipes_pin_vertical_midpoint() {
        let left = compute_swipe(PHONE, Direction::Left, 0.4, 800).unwrap();
        assert_eq!(left, SwipeGesture::new(756, 1140, 324, 1140, 800));

        let right = compute_swipe(PHONE, Direction::Right, 0.4, 800).unwrap();
        assert_eq!(right, SwipeGesture::new(324, 1140, 756, 1140, 800));
    }

    #[test]
    fn full_ratio_clamps_inside_viewport() {
        let gesture = compute_swipe(PHONE, Direction::Up, 1.0, 500).unwrap();
        assert_eq!(gesture.start_y, 2279);
        assert_eq!(gesture.end_y, 0);
    }

    #[test]
    fn coordinates_stay_in_bounds_for_all_inputs() {
        let viewports = [
            Viewport::new(320, 480),
            Viewport::new(1080, 2280),
            Viewport::new(2280, 1080),
            Viewport::new(1, 1),
        ];
        let ratios = [0.1, 0.3, 0.5, 0.9, 1.0];
        let directions = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        for viewport in viewports {
            for ratio in ratios {
                for direction in directions {
                    let g = compute_swipe(viewport, direction, ratio, 100).unwrap();
                    for x in [g.start_x, g.end_x] {
                        assert!(x >= 0 && x < viewport.width as i32, "{viewport} {direction} {ratio}");
                    }
                    for y in [g.start_y, g.end_y] {
                        assert!(y >= 0 && y < viewport.height as i32, "{viewport} {direction} {ratio}");
                    }
                }
            }
        }
    }

    #[test]
    fn identical_inputs_identical_output() {
        let a = compute_swipe(PHONE, Direction::Left, 0.37, 900).unwrap();
        let b = compute_swipe(PHONE, Direction::Left, 0.37, 900).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_out_of_range_ratio() {
        for ratio in [0.0, -0.5, 1.01, f64::NAN] {
            let result = compute_swipe(PHONE, Direction::Up, ratio, 1000);
            assert!(matches!(result, Err(GestureError::InvalidGeometry(_))));
        }
    }

    #[test]
    fn rejects_degenerate_viewport() {
        let result = compute_swipe(Viewport::new(0, 2280), Direction::Up, 0.5, 1000);
        assert!(matches!(result, Err(GestureError::InvalidGeometry(_))));
    }

    #[test]
    fn element_swipe_travels_third_of_short_side() {
        let rect = ElementRect::new(100, 200, 300, 120);
        let gesture = compute_element_swipe(PHONE, rect, Direction::Up, 800).unwrap();
        // centre (250, 260), travel 120 / 3 = 40
        assert_eq!(gesture, SwipeGesture::new(250, 300, 250, 220, 800));
    }

    #[test]
    fn element_swipe_is_clamped_to_screen() {
        let rect = ElementRect::new(-40, -40, 120, 90);
        let gesture = compute_element_swipe(PHONE, rect, Direction::Left, 800).unwrap();
        assert!(gesture.start_x >= 0 && gesture.start_y >= 0);
        assert!(gesture.end_x >= 0 && gesture.end_y >= 0);
    }

    #[test]
    fn pull_to_refresh_drags_down() {
        let gesture = compute_pull_to_refresh(PHONE, 1500).unwrap();
        assert_eq!(gesture, SwipeGesture::new(540, 570, 540, 1710, 1500));
    }

    #[test]
    fn edge_swipe_reaches_screen_centre() {
        let gesture = compute_edge_swipe(PHONE, 500).unwrap();
        assert_eq!(gesture, SwipeGesture::new(50, 1140, 540, 1140, 500));
    }

    #[test]
    fn edge_swipe_on_tiny_screen_stays_in_bounds() {
        let tiny = Viewport::new(40, 40);
        let gesture = compute_edge_swipe(tiny, 500).unwrap();
        assert!(gesture.start_x < 40);
    }
}
