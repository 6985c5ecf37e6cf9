use thiserror::Error;

use crate::calendar::category::category_color;
use crate::calendar::{AgendaRoute, CivicEvent, Coordinates};
use crate::ui::locale::LocaleFormatter;

pub const FALLBACK_CENTER: Coordinates = Coordinates::new(19.432608, -99.133209);
pub const DEFAULT_ZOOM: u8 = 5;

#[derive(Debug, Error, PartialEq)]
pub enum MapError {
    #[error("Map surface was already disposed")]
    SurfaceDisposed,
    #[error("Map surface could not be created: {0}")]
    SurfaceUnavailable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub category: String,
    pub name: String,
    pub moment: String,
    pub address: Option<String>,
    pub agenda: AgendaRoute,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub event_id: String,
    pub position: Coordinates,
    pub color: &'static str,
    pub popup: Popup,
}

/// A drawable map owned by one panel.
#[cfg_attr(test, mockall::automock)]
pub trait MapSurface {
    fn clear_markers(&mut self);

    fn add_marker(&mut self, marker: &Marker);

    fn set_view(&mut self, center: Coordinates, animate: bool);

    fn remove(&mut self);
}

pub fn build_markers(events: &[CivicEvent], formatter: &LocaleFormatter) -> Vec<Marker> {
    events
        .iter()
        .filter_map(|event| {
            let position = event.coordinates()?;
            Some(Marker {
                event_id: event.id.clone(),
                position,
                color: category_color(&event.category),
                popup: Popup {
                    category: event.category.clone(),
                    name: event.name.clone(),
                    moment: formatter.format_event_moment(event.starts_at.as_deref()),
                    address: event.address.clone(),
                    agenda: AgendaRoute::for_event(event),
                },
            })
        })
        .collect()
}

/// First coordinate-bearing event, or the fixed fallback.
pub fn focal_center(events: &[CivicEvent]) -> Coordinates {
    events
        .iter()
        .find_map(CivicEvent::coordinates)
        .unwrap_or(FALLBACK_CENTER)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    Pending,
    Mounted,
    Disposed,
}

/// Keeps one map surface in step with the filtered event set.
///
/// The surface is created once by `mount`, rebuilt marker-by-marker whenever the
/// marker set changes, recentred when the focal center changes, and removed exactly
/// once by `teardown` (also run on drop).
pub struct MapSynchronizer<S: MapSurface> {
    surface: Option<S>,
    state: SurfaceState,
    markers: Vec<Marker>,
    center: Coordinates,
    applied: bool,
}

impl<S: MapSurface> MapSynchronizer<S> {
    pub fn new() -> Self {
        Self {
            surface: None,
            state: SurfaceState::Pending,
            markers: Vec::new(),
            center: FALLBACK_CENTER,
            applied: false,
        }
    }

    pub fn state(&self) -> SurfaceState {
        self.state
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn center(&self) -> Coordinates {
        self.center
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Creates the surface on first call; later calls are no-ops.
    pub fn mount<F>(&mut self, create: F) -> Result<(), MapError>
    where
        F: FnOnce(Coordinates, u8) -> Result<S, MapError>,
    {
        match self.state {
            SurfaceState::Mounted => return Ok(()),
            SurfaceState::Disposed => return Err(MapError::SurfaceDisposed),
            SurfaceState::Pending => {}
        }

        let mut surface = create(self.center, DEFAULT_ZOOM)?;
        tracing::info!("Map surface created");

        surface.clear_markers();
        for marker in &self.markers {
            surface.add_marker(marker);
        }
        self.applied = true;

        self.surface = Some(surface);
        self.state = SurfaceState::Mounted;
        Ok(())
    }

    /// Recomputes markers and focal center from the filtered events and pushes the
    /// differences to the surface. Before mounting, the result is kept for `mount`.
    pub fn sync(&mut self, filtered: &[CivicEvent], formatter: &LocaleFormatter) {
        if self.state == SurfaceState::Disposed {
            return;
        }

        let markers = build_markers(filtered, formatter);
        let center = focal_center(filtered);

        let markers_changed = markers != self.markers || !self.applied;
        let center_changed = center != self.center;

        self.markers = markers;
        self.center = center;

        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        if markers_changed {
            surface.clear_markers();
            for marker in &self.markers {
                surface.add_marker(marker);
            }
            self.applied = true;
            tracing::debug!("Rebuilt {} map markers", self.markers.len());
        }

        if center_changed {
            surface.set_view(center, true);
        }
    }

    pub fn teardown(&mut self) {
        if self.state == SurfaceState::Disposed {
            return;
        }

        if let Some(mut surface) = self.surface.take() {
            surface.remove();
            tracing::info!("Map surface disposed");
        }
        self.state = SurfaceState::Disposed;
    }
}

impl<S: MapSurface> Default for MapSynchronizer<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MapSurface> Drop for MapSynchronizer<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}
