use tracing::debug;

use crate::domain::Coordinate;
use crate::map::{MapSurface, MarkerSpec, START_POINT_ICON};

pub const START_POINT_LABEL: &str = "Your start point.";

/// Holds at most one user-picked coordinate and its marker.
#[derive(Debug)]
pub struct StartPointSelector<M> {
    current: Option<(Coordinate, M)>,
}

impl<M> Default for StartPointSelector<M> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<M> StartPointSelector<M> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the start point to `coordinate`, replacing the previous marker.
    pub fn on_surface_click<S>(&mut self, surface: &mut S, coordinate: Coordinate) -> Coordinate
    where
        S: MapSurface<Marker = M>,
    {
        self.clear(surface);
        let marker = surface.place_marker(MarkerSpec {
            position: coordinate,
            icon: START_POINT_ICON,
            label: START_POINT_LABEL.to_owned(),
        });
        debug!("Start point set to {}", coordinate);
        self.current = Some((coordinate, marker));
        coordinate
    }

    pub fn clear<S>(&mut self, surface: &mut S)
    where
        S: MapSurface<Marker = M>,
    {
        if let Some((_, marker)) = self.current.take() {
            surface.remove_marker(marker);
        }
    }

    #[must_use]
    pub fn point(&self) -> Option<Coordinate> {
        self.current.as_ref().map(|(coordinate, _)| *coordinate)
    }
}
