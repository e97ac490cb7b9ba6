use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect as ImageRect;
use orthoroute_common::geom::{Axis, Point, Rect};
use orthoroute_common::util::config::RenderConfig;
use orthoroute_router::Router;
use orthoroute_router::grid::CellState;
use std::path::Path;

const PADDING: f64 = 16.0;
const TICK: f32 = 4.0;

const BLOCKED: Rgba<u8> = Rgba([150, 50, 50, 255]);
const PRIVATE: Rgba<u8> = Rgba([255, 140, 20, 255]);
const SEGMENT: Rgba<u8> = Rgba([120, 120, 120, 255]);

/// Per-axis markers for one cell: blocked axes first, then privately held
/// ones. Free public axes get nothing.
fn cell_ticks(state: CellState) -> Vec<(Axis, Rgba<u8>)> {
    let mut ticks = Vec::new();
    for axis in [Axis::Horizontal, Axis::Vertical] {
        if state.contains(CellState::block(axis)) {
            ticks.push((axis, BLOCKED));
        } else if state.contains(CellState::BUSY) && !state.contains(CellState::public(axis)) {
            ticks.push((axis, PRIVATE));
        }
    }
    ticks
}

/// World-to-image mapping with the y axis flipped so that +y points up.
struct Viewport {
    origin: Point<f64>,
    scale: f64,
    height: f64,
}

impl Viewport {
    fn fit(bounds: Rect, width: u32, height: u32) -> Self {
        let span_x = bounds.width().max(1.0);
        let span_y = bounds.height().max(1.0);
        let scale_x = (width as f64 - 2.0 * PADDING) / span_x;
        let scale_y = (height as f64 - 2.0 * PADDING) / span_y;
        Self {
            origin: bounds.min,
            scale: scale_x.min(scale_y).max(f64::MIN_POSITIVE),
            height: height as f64,
        }
    }

    fn map(&self, p: Point<f64>) -> (f32, f32) {
        let x = PADDING + (p.x - self.origin.x) * self.scale;
        let y = self.height - PADDING - (p.y - self.origin.y) * self.scale;
        (x as f32, y as f32)
    }

    fn rect(&self, r: &Rect) -> ImageRect {
        let (x0, y0) = self.map(Point::new(r.min.x, r.max.y));
        let (x1, y1) = self.map(Point::new(r.max.x, r.min.y));
        ImageRect::at(x0 as i32, y0 as i32)
            .of_size(((x1 - x0) as u32).max(1), ((y1 - y0) as u32).max(1))
    }
}

/// Renders the state of `router` after its last pass.
pub fn draw_routing(router: &Router, filename: &Path, config: &RenderConfig) -> anyhow::Result<()> {
    let (width, height) = (config.width.max(64), config.height.max(64));
    let mut img = RgbaImage::from_pixel(width, height, Rgba([18, 18, 22, 255]));

    let registry = router.coordinates_registry();
    let (xs, ys) = (registry.x_coordinates(), registry.y_coordinates());
    let (Some(&x0), Some(&x1), Some(&y0), Some(&y1)) = (xs.first(), xs.last(), ys.first(), ys.last())
    else {
        log::warn!("Nothing to render: the routing grid is empty");
        img.save(filename)?;
        return Ok(());
    };
    let view = Viewport::fit(
        Rect::new(Point::new(x0, y0), Point::new(x1, y1)),
        width,
        height,
    );

    for rect in router.obstacles().blocked() {
        let r = view.rect(rect);
        draw_filled_rect_mut(&mut img, r, Rgba([60, 60, 72, 255]));
        draw_hollow_rect_mut(&mut img, r, Rgba([110, 110, 125, 255]));
    }

    if config.draw_cells {
        for (coord, state) in router.cells().iter() {
            let (px, py) = view.map(registry.to_world(coord));
            if state.contains(CellState::BUSY) {
                let dot = ImageRect::at(px as i32 - 1, py as i32 - 1).of_size(3, 3);
                draw_filled_rect_mut(&mut img, dot, Rgba([200, 200, 200, 255]));
            }
            for (axis, color) in cell_ticks(state) {
                let (a, b) = match axis {
                    Axis::Horizontal => ((px - TICK, py), (px + TICK, py)),
                    Axis::Vertical => ((px, py - TICK), (px, py + TICK)),
                };
                draw_line_segment_mut(&mut img, a, b, color);
            }
        }
    }

    for seg in router.obstacles().segments() {
        let (a, b) = (view.map(seg.p1), view.map(seg.p2));
        draw_line_segment_mut(&mut img, (a.0 + 1.0, a.1 + 1.0), (b.0 + 1.0, b.1 + 1.0), SEGMENT);
    }

    let palette = [
        Rgba([0, 150, 255, 255]),
        Rgba([0, 220, 120, 255]),
        Rgba([190, 90, 255, 255]),
        Rgba([0, 230, 230, 255]),
        Rgba([255, 215, 0, 255]),
    ];
    let failed = Rgba([255, 30, 70, 255]);

    for (i, route) in router.routing_result().iter().enumerate() {
        let found = route.is_route_found();
        let color = if found {
            palette[i % palette.len()]
        } else {
            failed
        };
        for seg in route.segments() {
            let (a, b) = (view.map(seg.p1), view.map(seg.p2));
            draw_line_segment_mut(&mut img, a, b, color);
            if !found {
                for d in [-1.0, 1.0] {
                    draw_line_segment_mut(&mut img, (a.0 + d, a.1), (b.0 + d, b.1), color);
                    draw_line_segment_mut(&mut img, (a.0, a.1 + d), (b.0, b.1 + d), color);
                }
            }
        }
        for p in [route.source, route.target()] {
            let (px, py) = view.map(p);
            let pin = ImageRect::at(px as i32 - 2, py as i32 - 2).of_size(5, 5);
            draw_filled_rect_mut(&mut img, pin, Rgba([255, 255, 255, 255]));
        }
    }

    img.save(filename)?;
    log::info!("Wrote {}x{} image to {:?}", width, height, filename);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_show_which_axis_is_held() {
        assert!(cell_ticks(CellState::PUBLIC).is_empty());

        let mut straight = CellState::PUBLIC | CellState::BUSY;
        straight.remove(CellState::HORIZONTAL_PUBLIC);
        assert_eq!(cell_ticks(straight), vec![(Axis::Horizontal, PRIVATE)]);

        let bend = CellState::BUSY;
        assert_eq!(
            cell_ticks(bend),
            vec![(Axis::Horizontal, PRIVATE), (Axis::Vertical, PRIVATE)]
        );

        let blocked = CellState::PUBLIC | CellState::VERTICAL_BLOCK;
        assert_eq!(cell_ticks(blocked), vec![(Axis::Vertical, BLOCKED)]);
    }

    #[test]
    fn viewport_flips_y_and_keeps_aspect() {
        let view = Viewport::fit(
            Rect::new(Point::new(0.0, 0.0), Point::new(10.0, 5.0)),
            132,
            132,
        );
        assert_eq!(view.map(Point::new(0.0, 0.0)), (16.0, 116.0));
        assert_eq!(view.map(Point::new(10.0, 5.0)), (116.0, 66.0));
    }
}
