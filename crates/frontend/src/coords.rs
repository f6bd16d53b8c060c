use smokes_shared::canvas::{self, CanvasPoint, IMAGE_SIZE};
use smokes_shared::models::PercentPoint;

/// Left, top and width of the map container's bounding rect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerBox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
}

impl From<&web_sys::DomRect> for ContainerBox {
    fn from(rect: &web_sys::DomRect) -> Self {
        ContainerBox {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
        }
    }
}

/// Convert client (viewport) coordinates to container-relative pixel coordinates.
pub fn client_to_container(
    client_x: f64,
    client_y: f64,
    rect_left: f64,
    rect_top: f64,
) -> (f64, f64) {
    (client_x - rect_left, client_y - rect_top)
}

/// Pure function: convert container-relative coordinates to canvas space,
/// undoing the zoom/pan CSS transform. Usable in unit tests (no web_sys dependency).
///
/// The radar is square and renders at `width:100%`, so both axes share the
/// scale factor `IMAGE_SIZE / container_w`. Canvas `u` grows upward, hence
/// the flip on the vertical axis. Points outside the image are returned as-is;
/// `canvas::to_percent` clamps them.
pub fn container_to_canvas(
    container_x: f64,
    container_y: f64,
    container_w: f64,
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
) -> Option<CanvasPoint> {
    if container_w <= 0.0 || zoom <= 0.0 {
        return None;
    }

    // Undo CSS transform: translate(pan_x, pan_y) scale(zoom)
    let rendered_x = (container_x - pan_x) / zoom;
    let rendered_y = (container_y - pan_y) / zoom;

    let scale = IMAGE_SIZE / container_w;
    Some(CanvasPoint {
        u: IMAGE_SIZE - rendered_y * scale,
        v: rendered_x * scale,
    })
}

/// Client position to a clamped percent point, given the container's
/// bounding box and the current zoom/pan.
pub fn client_to_percent(
    client_x: f64,
    client_y: f64,
    rect: ContainerBox,
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
) -> Option<PercentPoint> {
    let (container_x, container_y) = client_to_container(client_x, client_y, rect.left, rect.top);
    container_to_canvas(container_x, container_y, rect.width, zoom, pan_x, pan_y)
        .map(|p| canvas::to_percent(p.u, p.v))
}

/// CSS `left` / `top` (in % of the rendered image) for a canvas point.
pub fn canvas_to_css_percent(p: CanvasPoint) -> (f64, f64) {
    let left = p.v / IMAGE_SIZE * 100.0;
    let top = (IMAGE_SIZE - p.u) / IMAGE_SIZE * 100.0;
    (left, top)
}

/// CSS `left` / `top` for a stored smoke position.
pub fn marker_css_position(p: PercentPoint) -> (f64, f64) {
    canvas_to_css_percent(canvas::point_to_canvas(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_to_container_origin() {
        let (x, y) = client_to_container(100.0, 200.0, 100.0, 200.0);
        assert!((x - 0.0).abs() < 1e-9);
        assert!((y - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_client_to_container_offset() {
        let (x, y) = client_to_container(450.0, 350.0, 320.0, 50.0);
        assert!((x - 130.0).abs() < 1e-9);
        assert!((y - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_container_to_canvas_no_zoom() {
        // 800px wide container: rendered (200, 400) is canvas v=256, u=1024-512
        let p = container_to_canvas(200.0, 400.0, 800.0, 1.0, 0.0, 0.0).unwrap();
        assert!((p.v - 256.0).abs() < 1e-9);
        assert!((p.u - 512.0).abs() < 1e-9);
    }

    #[test]
    fn test_container_to_canvas_with_zoom_and_pan() {
        // zoom 2, pan (-100, -50): container (300, 750) -> rendered (200, 400)
        let p = container_to_canvas(300.0, 750.0, 800.0, 2.0, -100.0, -50.0).unwrap();
        assert!((p.v - 256.0).abs() < 1e-9);
        assert!((p.u - 512.0).abs() < 1e-9);
    }

    #[test]
    fn test_container_to_canvas_invalid_container() {
        assert!(container_to_canvas(400.0, 300.0, 0.0, 1.0, 0.0, 0.0).is_none());
        assert!(container_to_canvas(400.0, 300.0, 800.0, 0.0, 0.0, 0.0).is_none());
    }

    #[test]
    fn test_outside_click_clamps_in_percent_space() {
        let p = container_to_canvas(-100.0, 2000.0, 800.0, 1.0, 0.0, 0.0).unwrap();
        let pct = canvas::to_percent(p.u, p.v);
        assert_eq!(pct, PercentPoint { x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_marker_lands_where_it_was_clicked() {
        // Click at rendered (600, 120) in an 800px container, then render the stored point.
        let p = container_to_canvas(600.0, 120.0, 800.0, 1.0, 0.0, 0.0).unwrap();
        let stored = canvas::to_percent(p.u, p.v);
        let (left, top) = marker_css_position(stored);
        assert!((left - 75.0).abs() < 0.01);
        assert!((top - 15.0).abs() < 0.01);
    }

    #[test]
    fn test_scenario_point_renders_at_centre_row() {
        let (left, top) = marker_css_position(PercentPoint { x: 25.0, y: 50.0 });
        assert!((left - 25.0).abs() < 1e-9);
        assert!((top - 50.0).abs() < 1e-9);
    }
}
