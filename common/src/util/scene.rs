use crate::geom::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Router input as exchanged with the outside world: component footprints and
/// an ordered list of pin-to-pin connections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub obstacles: Vec<ObstacleSpec>,
    #[serde(default)]
    pub connections: Vec<ConnectionSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionSpec {
    pub from: [f64; 2],
    pub to: [f64; 2],
}

impl ObstacleSpec {
    pub fn rect(&self) -> Rect {
        Rect::from_xywh(self.x, self.y, self.width, self.height)
    }
}

impl ConnectionSpec {
    pub fn endpoints(&self) -> (Point<f64>, Point<f64>) {
        (Point::from(self.from), Point::from(self.to))
    }
}

impl Scene {
    pub fn rects(&self) -> Vec<Rect> {
        self.obstacles.iter().map(ObstacleSpec::rect).collect()
    }

    pub fn endpoints(&self) -> Vec<(Point<f64>, Point<f64>)> {
        self.connections.iter().map(ConnectionSpec::endpoints).collect()
    }

    pub fn bounds(&self) -> Option<Rect> {
        let rects = self.rects().into_iter();
        let pins = self.endpoints().into_iter().flat_map(|(a, b)| {
            [a, b].into_iter().map(|p| Rect::new(p, p))
        });
        rects.chain(pins).reduce(|acc, r| acc.union(&r))
    }
}
