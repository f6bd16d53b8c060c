use dioxus::html::geometry::WheelDelta;
use dioxus::html::input_data::MouseButton;
use dioxus::prelude::*;
use smokes_shared::glyph::{build_glyph, pending_glyph, Glyph};
use smokes_shared::highlight::is_highlighted;
use smokes_shared::models::{PercentPoint, Smoke, SmokeId};

use crate::coords;

const MAP_CONTAINER_ID: &str = "radar-map-container";

/// A finished tap on bare radar becomes a pick only in pick mode. Pans
/// release as `None` and never reach here as a point.
fn tap_pick(
    pick_mode: bool,
    tap: Option<Point>,
    view: Viewport,
    rect: coords::ContainerBox,
) -> Option<PercentPoint> {
    if !pick_mode {
        return None;
    }
    let (client_x, client_y) = tap?;
    coords::client_to_percent(client_x, client_y, rect, view.zoom, view.pan_x, view.pan_y)
}

/// Pointer travel, in pixels, before a mouse press turns into a pan.
const DRAG_THRESHOLD: f64 = 3.0;
/// Same for a finger; touches wobble more.
const TOUCH_DRAG_THRESHOLD: f64 = 8.0;

const ZOOM_MIN: f64 = 1.0;
const ZOOM_MAX: f64 = 8.0;
const ZOOM_STEP: f64 = 1.1;
const BUTTON_ZOOM_STEP: f64 = 1.5;

type Point = (f64, f64);

fn container_rect() -> Option<web_sys::DomRect> {
    let document = web_sys::window()?.document()?;
    let element = document.get_element_by_id(MAP_CONTAINER_ID)?;
    Some(element.get_bounding_client_rect())
}

/// Wheel deltas come in pixels, lines or pages; only the sign and rough size matter.
fn wheel_delta_y(delta: WheelDelta) -> f64 {
    match delta {
        WheelDelta::Pixels(d) => d.y,
        WheelDelta::Lines(d) => d.y * 40.0,
        WheelDelta::Pages(d) => d.y * 400.0,
    }
}

fn distance(a: Point, b: Point) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

fn midpoint(a: Point, b: Point) -> Point {
    ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0)
}

// ---------------------------------------------------------------------------
// Viewport
// ---------------------------------------------------------------------------

/// CSS zoom and pan applied to the radar, in container pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Viewport {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl Viewport {
    fn transform_style(&self) -> String {
        format!(
            "transform: translate({}px, {}px) scale({}); transform-origin: 0 0;",
            self.pan_x, self.pan_y, self.zoom
        )
    }

    fn panned(self, dx: f64, dy: f64) -> Viewport {
        Viewport {
            pan_x: self.pan_x + dx,
            pan_y: self.pan_y + dy,
            ..self
        }
    }

    /// Keep the radar covering the container.
    ///
    /// The radar is square at `width: 100%`, so its rendered height is the
    /// container width and can exceed the container height even at 1×.
    fn clamped(self, width: f64, height: f64) -> Viewport {
        let content = width * self.zoom;
        let min_x = -(content - width).max(0.0);
        let min_y = -(content - height).max(0.0);
        Viewport {
            pan_x: self.pan_x.clamp(min_x, 0.0),
            pan_y: self.pan_y.clamp(min_y, 0.0),
            ..self
        }
    }

    /// Zoom to `target` (limited to the zoom range) keeping the container
    /// point `(cx, cy)` over the same spot of the radar.
    fn zoomed_at(self, cx: f64, cy: f64, target: f64, width: f64, height: f64) -> Viewport {
        let zoom = target.clamp(ZOOM_MIN, ZOOM_MAX);
        let content_x = (cx - self.pan_x) / self.zoom;
        let content_y = (cy - self.pan_y) / self.zoom;
        Viewport {
            zoom,
            pan_x: cx - content_x * zoom,
            pan_y: cy - content_y * zoom,
        }
        .clamped(width, height)
    }
}

fn fit_to_container(view: Viewport) -> Viewport {
    match container_rect() {
        Some(rect) => view.clamped(rect.width(), rect.height()),
        None => view,
    }
}

// ---------------------------------------------------------------------------
// Gestures
// ---------------------------------------------------------------------------

/// What the pointer is doing over the radar.
///
/// A press only becomes a pan after travelling past its threshold; a press
/// released before that is a tap, which is what picking listens for.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
enum Gesture {
    #[default]
    Idle,
    Press {
        start: Point,
        origin: Viewport,
        threshold: f64,
        panning: bool,
    },
    Pinch {
        start_distance: f64,
        center: Point,
        origin: Viewport,
    },
}

impl Gesture {
    fn press(start: Point, origin: Viewport, threshold: f64) -> Gesture {
        Gesture::Press {
            start,
            origin,
            threshold,
            panning: false,
        }
    }

    fn pinch(a: Point, b: Point, origin: Viewport) -> Gesture {
        Gesture::Pinch {
            start_distance: distance(a, b),
            center: midpoint(a, b),
            origin,
        }
    }

    fn is_panning(&self) -> bool {
        matches!(self, Gesture::Press { panning: true, .. })
    }

    /// Follow the pointer. Returns the viewport to show once the press is a pan.
    fn drag_to(&mut self, current: Point) -> Option<Viewport> {
        let Gesture::Press {
            start,
            origin,
            threshold,
            panning,
        } = self
        else {
            return None;
        };
        if !*panning && distance(*start, current) > *threshold {
            *panning = true;
        }
        (*panning).then(|| origin.panned(current.0 - start.0, current.1 - start.1))
    }

    /// Zoom level and anchor for the current finger positions.
    fn pinch_to(&self, a: Point, b: Point) -> Option<(f64, Point, Viewport)> {
        match *self {
            Gesture::Pinch {
                start_distance,
                center,
                origin,
            } if start_distance >= 1.0 => {
                Some((origin.zoom * distance(a, b) / start_distance, center, origin))
            }
            _ => None,
        }
    }

    /// End the gesture. Returns where it started when it was a tap.
    fn release(&mut self) -> Option<Point> {
        let tap = match *self {
            Gesture::Press {
                start,
                panning: false,
                ..
            } => Some(start),
            _ => None,
        };
        *self = Gesture::Idle;
        tap
    }
}

fn touch_points(evt: &Event<TouchData>) -> Vec<Point> {
    evt.data()
        .touches()
        .iter()
        .map(|t| {
            let c = t.client_coordinates();
            (c.x, c.y)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

/// Everything needed to draw one smoke on the radar.
#[derive(Debug, Clone, PartialEq)]
struct MarkerView {
    id: SmokeId,
    title: String,
    left: f64,
    top: f64,
    glyph: Glyph,
}

fn marker_views(smokes: &[Smoke], highlighted: Option<SmokeId>) -> Vec<MarkerView> {
    smokes
        .iter()
        .map(|s| {
            let (left, top) = coords::marker_css_position(s.position());
            MarkerView {
                id: s.id,
                title: s.title.clone(),
                left,
                top,
                glyph: build_glyph(s.category, is_highlighted(highlighted, s.id)),
            }
        })
        .collect()
}

/// Wrapper style: zero-size anchor at the point, counter-scaled so glyphs
/// keep their screen size at any zoom.
fn anchor_style(left: f64, top: f64, zoom: f64, z_order: i32) -> String {
    format!(
        "left:{left}%;top:{top}%;transform:scale({});z-index:{z_order};",
        1.0 / zoom
    )
}

fn glyph_style(glyph: &Glyph) -> String {
    format!(
        "width:{size}px;height:{size}px;left:-{anchor}px;top:-{anchor}px;background:{color};font-size:{font}px;",
        size = glyph.size_px,
        anchor = glyph.anchor_offset_px,
        color = glyph.color,
        font = glyph.size_px * 0.6,
    )
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// Pannable, zoomable radar with smoke markers.
///
/// Renders exactly the smokes it is given; filtering happens upstream. Key
/// this component by `image_url` so a new radar gets a fresh viewport.
#[component]
pub fn MapViewer(
    image_url: String,
    smokes: Vec<Smoke>,
    pending_point: Option<PercentPoint>,
    pick_mode: bool,
    highlighted: Option<SmokeId>,
    on_marker_click: EventHandler<SmokeId>,
    on_pick: EventHandler<PercentPoint>,
    on_marker_enter: EventHandler<SmokeId>,
    on_marker_leave: EventHandler<SmokeId>,
) -> Element {
    let mut view = use_signal(Viewport::default);
    let mut gesture = use_signal(Gesture::default);

    let mut zoom_by = move |factor: f64| {
        let Some(rect) = container_rect() else { return };
        let (w, h) = (rect.width(), rect.height());
        let current = *view.read();
        view.set(current.zoomed_at(w / 2.0, h / 2.0, current.zoom * factor, w, h));
    };

    let pick_at = move |tap: Option<Point>| {
        let Some(rect) = container_rect() else { return };
        let current = *view.read();
        if let Some(point) = tap_pick(pick_mode, tap, current, coords::ContainerBox::from(&rect)) {
            on_pick.call(point);
        }
    };

    let current = *view.read();
    let cur_zoom = current.zoom;
    let transform_style = current.transform_style();
    let container_class = match (gesture.read().is_panning(), pick_mode) {
        (true, _) => "map-container dragging",
        (false, true) => "map-container picking",
        (false, false) => "map-container",
    };

    let markers = marker_views(&smokes, highlighted);
    let pending = pending_point.map(|p| {
        let (left, top) = coords::marker_css_position(p);
        (left, top, pending_glyph())
    });

    rsx! {
        div {
            id: MAP_CONTAINER_ID,
            class: "{container_class}",

            onwheel: move |evt: Event<WheelData>| {
                evt.prevent_default();
                let factor = if wheel_delta_y(evt.data().delta()) < 0.0 { ZOOM_STEP } else { 1.0 / ZOOM_STEP };
                let Some(rect) = container_rect() else { return };
                let client = evt.data().client_coordinates();
                let (cx, cy) = coords::client_to_container(client.x, client.y, rect.left(), rect.top());
                let before = *view.read();
                let after = before.zoomed_at(cx, cy, before.zoom * factor, rect.width(), rect.height());
                if after != before {
                    view.set(after);
                }
            },

            onmousedown: move |evt: Event<MouseData>| {
                if evt.trigger_button() != Some(MouseButton::Primary) {
                    return;
                }
                let client = evt.client_coordinates();
                let origin = *view.read();
                gesture.set(Gesture::press((client.x, client.y), origin, DRAG_THRESHOLD));
            },

            onmousemove: move |evt: Event<MouseData>| {
                let client = evt.client_coordinates();
                let before = *gesture.peek();
                let mut after = before;
                let moved = after.drag_to((client.x, client.y));
                if after != before {
                    gesture.set(after);
                }
                if let Some(next) = moved {
                    view.set(fit_to_container(next));
                }
            },

            // Markers swallow their own presses, so a tap here is on bare radar.
            onmouseup: move |evt: Event<MouseData>| {
                let tap = gesture.write().release();
                let client = evt.client_coordinates();
                pick_at(tap.map(|_| (client.x, client.y)));
            },

            onmouseleave: move |_| gesture.set(Gesture::Idle),

            ondoubleclick: move |evt: Event<MouseData>| {
                evt.prevent_default();
                view.set(Viewport::default());
            },

            ontouchstart: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let points = touch_points(&evt);
                let origin = *view.read();
                match points.as_slice() {
                    [one] => gesture.set(Gesture::press(*one, origin, TOUCH_DRAG_THRESHOLD)),
                    [a, b, ..] => gesture.set(Gesture::pinch(*a, *b, origin)),
                    [] => {}
                }
            },

            ontouchmove: move |evt: Event<TouchData>| {
                evt.prevent_default();
                let points = touch_points(&evt);
                match points.as_slice() {
                    [a, b, ..] => {
                        let pinch = gesture.read().pinch_to(*a, *b);
                        let Some((target, center, origin)) = pinch else { return };
                        let Some(rect) = container_rect() else { return };
                        let (cx, cy) = coords::client_to_container(center.0, center.1, rect.left(), rect.top());
                        view.set(origin.zoomed_at(cx, cy, target, rect.width(), rect.height()));
                    }
                    [one] => {
                        let before = *gesture.peek();
                        let mut after = before;
                        let moved = after.drag_to(*one);
                        if after != before {
                            gesture.set(after);
                        }
                        if let Some(next) = moved {
                            view.set(fit_to_container(next));
                        }
                    }
                    [] => {}
                }
            },

            ontouchend: move |evt: Event<TouchData>| {
                evt.prevent_default();
                // A pinch ends only once every finger has lifted.
                if !evt.data().touches().is_empty() {
                    return;
                }
                let tap = gesture.write().release();
                pick_at(tap);
            },

            ontouchcancel: move |_evt: Event<TouchData>| gesture.set(Gesture::Idle),

            div {
                class: "map-inner",
                style: "{transform_style}",

                img { src: "{image_url}", draggable: "false", alt: "Radar" }

                for m in markers {
                    div {
                        key: "{m.id}",
                        class: "marker-anchor",
                        style: anchor_style(m.left, m.top, cur_zoom, m.glyph.z_order),
                        div {
                            class: if is_highlighted(highlighted, m.id) { "smoke-glyph highlighted" } else { "smoke-glyph" },
                            style: glyph_style(&m.glyph),
                            title: "{m.title}",
                            // Swallow the press so the radar never sees a pick
                            onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),
                            onmouseup: move |evt: Event<MouseData>| evt.stop_propagation(),
                            ontouchstart: move |evt: Event<TouchData>| evt.stop_propagation(),
                            ontouchend: move |evt: Event<TouchData>| evt.stop_propagation(),
                            onclick: move |evt: Event<MouseData>| {
                                evt.stop_propagation();
                                on_marker_click.call(m.id);
                            },
                            onmouseenter: move |_| on_marker_enter.call(m.id),
                            onmouseleave: move |_| on_marker_leave.call(m.id),
                            "{m.glyph.icon}"
                        }
                    }
                }

                if let Some((left, top, glyph)) = pending {
                    div {
                        class: "marker-anchor pending",
                        style: anchor_style(left, top, cur_zoom, glyph.z_order),
                        div {
                            class: "smoke-glyph pending",
                            style: glyph_style(&glyph),
                            "{glyph.icon}"
                        }
                    }
                }
            }

            // Outside the transform so the buttons stay put
            div {
                class: "zoom-controls",
                onmousedown: move |evt: Event<MouseData>| evt.stop_propagation(),
                onmouseup: move |evt: Event<MouseData>| evt.stop_propagation(),
                ondoubleclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                ontouchstart: move |evt: Event<TouchData>| evt.stop_propagation(),
                ontouchend: move |evt: Event<TouchData>| evt.stop_propagation(),
                button {
                    "aria-label": "Zoom in",
                    disabled: cur_zoom >= ZOOM_MAX,
                    onclick: move |_| zoom_by(BUTTON_ZOOM_STEP),
                    "+"
                }
                button {
                    "aria-label": "Zoom out",
                    disabled: cur_zoom <= ZOOM_MIN,
                    onclick: move |_| zoom_by(1.0 / BUTTON_ZOOM_STEP),
                    "−"
                }
            }

            if pick_mode {
                div { class: "pick-hint", "Click on the radar to place the smoke" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smokes_shared::glyph::{BASE_SIZE_PX, HIGHLIGHT_Z_ORDER};
    use smokes_shared::models::{Author, Category};

    fn smoke(id: SmokeId, x: f64, y: f64) -> Smoke {
        Smoke {
            id,
            title: format!("smoke {id}"),
            video_url: "https://youtu.be/x".to_string(),
            timestamp: 1,
            category: Category::Molotov,
            x_percent: x,
            y_percent: y,
            floor: None,
            score: 0,
            author: Author {
                id: 1,
                display_name: "a".to_string(),
                avatar_url: None,
            },
            created_at: None,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // --- viewport ---

    #[test]
    fn test_zoom_keeps_anchor_over_same_radar_point() {
        let view = Viewport::default().zoomed_at(200.0, 100.0, 2.0, 800.0, 800.0);
        assert!(approx(view.zoom, 2.0));
        assert!(approx((200.0 - view.pan_x) / view.zoom, 200.0));
        assert!(approx((100.0 - view.pan_y) / view.zoom, 100.0));
    }

    #[test]
    fn test_clamp_never_reveals_left_or_top_edge() {
        let view = Viewport { zoom: 1.0, pan_x: 50.0, pan_y: 50.0 }.clamped(800.0, 600.0);
        assert_eq!((view.pan_x, view.pan_y), (0.0, 0.0));
    }

    #[test]
    fn test_square_radar_can_scroll_in_short_container() {
        // 800 wide shows an 800 tall radar in a 600 tall box
        let view = Viewport { zoom: 1.0, pan_x: 0.0, pan_y: -150.0 }.clamped(800.0, 600.0);
        assert!(approx(view.pan_y, -150.0));
        let view = Viewport { zoom: 1.0, pan_x: 0.0, pan_y: -500.0 }.clamped(800.0, 600.0);
        assert!(approx(view.pan_y, -200.0));
    }

    #[test]
    fn test_zoom_range_is_enforced() {
        let view = Viewport::default().zoomed_at(400.0, 400.0, 100.0, 800.0, 800.0);
        assert!(approx(view.zoom, ZOOM_MAX));
        let zoomed = Viewport { zoom: 3.0, pan_x: -400.0, pan_y: -400.0 };
        let view = zoomed.zoomed_at(400.0, 400.0, 0.01, 800.0, 800.0);
        assert_eq!(view, Viewport::default());
    }

    #[test]
    fn test_transform_style_translates_then_scales() {
        let style = Viewport { zoom: 2.0, pan_x: -10.0, pan_y: -20.0 }.transform_style();
        assert!(style.contains("translate(-10px, -20px) scale(2)"));
    }

    // --- gestures ---

    #[test]
    fn test_short_press_is_a_tap() {
        let mut g = Gesture::press((10.0, 10.0), Viewport::default(), DRAG_THRESHOLD);
        assert_eq!(g.drag_to((12.0, 11.0)), None);
        assert!(!g.is_panning());
        assert_eq!(g.release(), Some((10.0, 10.0)));
        assert_eq!(g, Gesture::Idle);
    }

    #[test]
    fn test_press_past_threshold_pans_and_never_taps() {
        let origin = Viewport { zoom: 2.0, pan_x: -100.0, pan_y: -100.0 };
        let mut g = Gesture::press((10.0, 10.0), origin, DRAG_THRESHOLD);
        let next = g.drag_to((30.0, 5.0)).expect("panning");
        assert!(approx(next.pan_x, -80.0));
        assert!(approx(next.pan_y, -105.0));
        // Coming back near the start keeps panning.
        assert!(g.drag_to((11.0, 10.0)).is_some());
        assert!(g.is_panning());
        assert_eq!(g.release(), None);
    }

    #[test]
    fn test_touch_threshold_is_looser() {
        let mut g = Gesture::press((0.0, 0.0), Viewport::default(), TOUCH_DRAG_THRESHOLD);
        assert_eq!(g.drag_to((5.0, 5.0)), None);
        assert_eq!(g.release(), Some((0.0, 0.0)));
    }

    #[test]
    fn test_pinch_scales_from_start_zoom() {
        let origin = Viewport { zoom: 2.0, pan_x: 0.0, pan_y: 0.0 };
        let g = Gesture::pinch((0.0, 0.0), (100.0, 0.0), origin);
        let (target, center, from) = g.pinch_to((0.0, 0.0), (150.0, 0.0)).expect("pinching");
        assert!(approx(target, 3.0));
        assert_eq!(center, (50.0, 0.0));
        assert_eq!(from, origin);
    }

    #[test]
    fn test_pinch_is_never_a_tap() {
        let mut g = Gesture::pinch((0.0, 0.0), (0.5, 0.0), Viewport::default());
        assert_eq!(g.pinch_to((0.0, 0.0), (10.0, 0.0)), None);
        assert_eq!(g.release(), None);
    }

    // --- markers ---

    #[test]
    fn test_marker_views_preserve_order_and_position() {
        let smokes = vec![smoke(3, 25.0, 50.0), smoke(1, 75.0, 15.0)];
        let views = marker_views(&smokes, None);
        assert_eq!(views.iter().map(|m| m.id).collect::<Vec<_>>(), vec![3, 1]);
        assert!(approx(views[0].left, 25.0));
        assert!(approx(views[0].top, 50.0));
        assert!(approx(views[1].left, 75.0));
        assert!(approx(views[1].top, 85.0));
    }

    #[test]
    fn test_marker_views_highlight_only_matching_id() {
        let smokes = vec![smoke(1, 10.0, 10.0), smoke(2, 20.0, 20.0)];
        let views = marker_views(&smokes, Some(2));
        assert_eq!(views[0].glyph.size_px, BASE_SIZE_PX);
        assert_eq!(views[1].glyph.z_order, HIGHLIGHT_Z_ORDER);
        assert_eq!(views[1].glyph.anchor_offset_px, views[1].glyph.size_px / 2.0);
    }

    #[test]
    fn test_empty_smokes_render_no_markers() {
        assert!(marker_views(&[], Some(4)).is_empty());
    }

    #[test]
    fn test_anchor_style_counter_scales() {
        let style = anchor_style(25.0, 50.0, 2.0, 400);
        assert!(style.contains("left:25%"));
        assert!(style.contains("top:50%"));
        assert!(style.contains("scale(0.5)"));
        assert!(style.contains("z-index:400"));
    }

    #[test]
    fn test_glyph_style_offsets_by_anchor() {
        let style = glyph_style(&build_glyph(Category::Smoke, false));
        assert!(style.contains("width:24px"));
        assert!(style.contains("left:-12px"));
        assert!(style.contains("top:-12px"));
        assert!(style.contains("background:#3b82f6"));
    }

    const BOX: coords::ContainerBox = coords::ContainerBox {
        left: 100.0,
        top: 50.0,
        width: 400.0,
    };

    #[test]
    fn test_centre_tap_in_pick_mode_picks_centre() {
        let point = tap_pick(true, Some((300.0, 250.0)), Viewport::default(), BOX).unwrap();
        assert_eq!(point, PercentPoint { x: 50.0, y: 50.0 });
    }

    #[test]
    fn test_tap_outside_pick_mode_is_ignored() {
        assert!(tap_pick(false, Some((300.0, 250.0)), Viewport::default(), BOX).is_none());
    }

    #[test]
    fn test_tap_pick_undoes_zoom_and_pan() {
        let view = Viewport {
            zoom: 2.0,
            pan_x: -200.0,
            pan_y: -200.0,
        };
        // container (100, 300) -> rendered (150, 250) -> canvas v=384, u=384
        let point = tap_pick(true, Some((200.0, 350.0)), view, BOX).unwrap();
        assert_eq!(point, PercentPoint { x: 37.5, y: 37.5 });
    }

    #[test]
    fn test_pan_release_never_picks() {
        let mut gesture = Gesture::press((300.0, 250.0), Viewport::default(), DRAG_THRESHOLD);
        gesture.drag_to((340.0, 250.0));
        let tap = gesture.release();
        assert!(tap_pick(true, tap, Viewport::default(), BOX).is_none());
    }

    #[test]
    fn test_marker_press_leaves_radar_idle() {
        // Markers stop propagation, so the radar only ever sees the release.
        let mut gesture = Gesture::Idle;
        let tap = gesture.release();
        assert!(tap_pick(true, tap, Viewport::default(), BOX).is_none());
    }
}
