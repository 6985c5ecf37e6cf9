use std::time::{Duration, Instant};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols,
    text::Span,
    widgets::{
        canvas::{Canvas, Map, MapResolution},
        Block, Borders,
    },
    Frame,
};

use civic_pulse::{
    calendar::Coordinates,
    ui::{
        map_view::{MapSurface, Marker},
        theme::{parse_hex_color, Theme},
    },
};

const PAN_DURATION: Duration = Duration::from_millis(450);

/// World map drawn on a ratatui canvas. Markers are printed at their coordinates
/// and the viewport eases towards a new center when asked to animate.
pub struct CanvasMap {
    markers: Vec<Marker>,
    zoom: u8,
    from: Coordinates,
    target: Coordinates,
    pan_started: Option<Instant>,
    removed: bool,
}

impl CanvasMap {
    pub fn new(center: Coordinates, zoom: u8) -> Self {
        Self {
            markers: Vec::new(),
            zoom,
            from: center,
            target: center,
            pan_started: None,
            removed: false,
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.pan_started
            .is_some_and(|started| now.duration_since(started) < PAN_DURATION)
    }

    pub fn view_center(&self, now: Instant) -> Coordinates {
        let Some(started) = self.pan_started else {
            return self.target;
        };

        let progress = now.duration_since(started).as_secs_f64() / PAN_DURATION.as_secs_f64();
        if progress >= 1.0 {
            return self.target;
        }
        let eased = 1.0 - (1.0 - progress).powi(3);
        Coordinates::new(
            self.from.latitude + (self.target.latitude - self.from.latitude) * eased,
            self.from.longitude + (self.target.longitude - self.from.longitude) * eased,
        )
    }

    /// Longitude and latitude bounds of the viewport around `center`.
    pub fn bounds(&self, center: Coordinates) -> ([f64; 2], [f64; 2]) {
        let half_width = 360.0 / 2f64.powi(i32::from(self.zoom));
        let half_height = half_width / 2.0;
        (
            [center.longitude - half_width, center.longitude + half_width],
            [center.latitude - half_height, center.latitude + half_height],
        )
    }

    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme, now: Instant) {
        let (x_bounds, y_bounds) = self.bounds(self.view_center(now));
        let outline = theme.map_outline;

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.border))
                    .title(format!(" Mapa ({} eventos) ", self.markers.len())),
            )
            .marker(symbols::Marker::Braille)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(|ctx| {
                ctx.draw(&Map {
                    color: outline,
                    resolution: MapResolution::High,
                });
                ctx.layer();
                for marker in &self.markers {
                    let style = Style::default()
                        .fg(parse_hex_color(marker.color))
                        .add_modifier(Modifier::BOLD);
                    ctx.print(
                        marker.position.longitude,
                        marker.position.latitude,
                        Span::styled("●", style),
                    );
                }
            });

        f.render_widget(canvas, area);
    }
}

impl MapSurface for CanvasMap {
    fn clear_markers(&mut self) {
        self.markers.clear();
    }

    fn add_marker(&mut self, marker: &Marker) {
        self.markers.push(marker.clone());
    }

    fn set_view(&mut self, center: Coordinates, animate: bool) {
        if animate {
            self.from = self.view_center(Instant::now());
            self.pan_started = Some(Instant::now());
        } else {
            self.from = center;
            self.pan_started = None;
        }
        self.target = center;
    }

    fn remove(&mut self) {
        self.markers.clear();
        self.removed = true;
    }
}
