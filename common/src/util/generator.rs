use super::scene::{ConnectionSpec, ObstacleSpec, Scene};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SLOT: i32 = 40;
const MIN_SIDE: i32 = 8;
const MAX_SIDE: i32 = 20;
const PIN_PITCH: i32 = 2;

struct Component {
    x: i32,
    y: i32,
    w: i32,
    h: i32,
}

impl Component {
    fn pin_rows(&self) -> i32 {
        (self.h / PIN_PITCH - 1).max(1)
    }
}

/// Builds a reproducible random schematic: components laid out in a jittered
/// grid of slots (so bodies never overlap), inputs on the left edge and
/// outputs on the right edge, wired output-to-input across components.
pub fn generate_scene(seed: u64, num_components: usize, num_connections: usize) -> Scene {
    let mut rng = StdRng::seed_from_u64(seed);
    let num_components = num_components.max(2);
    let columns = (num_components as f64).sqrt().ceil() as i32;

    log::info!(
        "Generating scene: {} components, {} connections, seed {}",
        num_components,
        num_connections,
        seed
    );

    let mut components = Vec::with_capacity(num_components);
    for i in 0..num_components as i32 {
        let w = snap(rng.gen_range(MIN_SIDE..=MAX_SIDE));
        let h = snap(rng.gen_range(MIN_SIDE..=MAX_SIDE));
        let jitter_x = snap(rng.gen_range(0..=(SLOT - MAX_SIDE) / 2));
        let jitter_y = snap(rng.gen_range(0..=(SLOT - MAX_SIDE) / 2));
        components.push(Component {
            x: (i % columns) * SLOT + jitter_x,
            y: (i / columns) * SLOT + jitter_y,
            w,
            h,
        });
    }

    let obstacles = components
        .iter()
        .enumerate()
        .map(|(i, c)| ObstacleSpec {
            name: Some(format!("U{}", i)),
            x: c.x as f64,
            y: c.y as f64,
            width: c.w as f64,
            height: c.h as f64,
        })
        .collect();

    let mut connections = Vec::with_capacity(num_connections);
    for _ in 0..num_connections {
        let src = rng.gen_range(0..components.len());
        let mut dst = rng.gen_range(0..components.len() - 1);
        if dst >= src {
            dst += 1;
        }
        let (s, d) = (&components[src], &components[dst]);
        let out_row = rng.gen_range(1..=s.pin_rows());
        let in_row = rng.gen_range(1..=d.pin_rows());
        connections.push(ConnectionSpec {
            from: [(s.x + s.w) as f64, (s.y + out_row * PIN_PITCH) as f64],
            to: [d.x as f64, (d.y + in_row * PIN_PITCH) as f64],
        });
    }

    Scene {
        obstacles,
        connections,
    }
}

fn snap(v: i32) -> i32 {
    (v / PIN_PITCH) * PIN_PITCH
}
