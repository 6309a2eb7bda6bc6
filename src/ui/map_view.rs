use crate::data::{ClimbState, Difficulty, MapSettings, Peak};
use crate::ui::{CLIMBED_COLOR, UNCLIMBED_COLOR, bold_fg, panel};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{
        Clear, Paragraph,
        canvas::{Canvas, Map, MapResolution},
    },
};
use tracing::{debug, info};

/// Smallest inner area the canvas is drawn into.
const MIN_CANVAS_WIDTH: u16 = 12;
const MIN_CANVAS_HEIGHT: u16 = 6;

const POPUP_WIDTH: u16 = 30;
const POPUP_HEIGHT: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    Climbed,
    Unclimbed,
}

impl MarkerStyle {
    pub fn for_status(climbed: bool) -> Self {
        if climbed { MarkerStyle::Climbed } else { MarkerStyle::Unclimbed }
    }

    /// Climbed markers are large and filled, the rest small and muted.
    pub fn glyph(self) -> &'static str {
        match self {
            MarkerStyle::Climbed => "●",
            MarkerStyle::Unclimbed => "·",
        }
    }

    pub fn style(self) -> Style {
        match self {
            MarkerStyle::Climbed => bold_fg(CLIMBED_COLOR),
            MarkerStyle::Unclimbed => Style::default()
                .fg(UNCLIMBED_COLOR)
                .add_modifier(Modifier::DIM),
        }
    }
}

/// Info box bound to a marker.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub rank: u32,
    pub name: String,
    pub height: u32,
    pub difficulty: Difficulty,
    pub climbed: bool,
}

impl Popup {
    pub fn status_text(&self) -> &'static str {
        if self.climbed { "✓ Summited" } else { "Not yet summited" }
    }

    pub fn lines(&self) -> Vec<Line<'static>> {
        let status_style = if self.climbed {
            bold_fg(CLIMBED_COLOR)
        } else {
            Style::default().fg(UNCLIMBED_COLOR)
        };
        vec![
            Line::from(vec![
                Span::styled(format!("#{} ", self.rank), Style::default().fg(Color::DarkGray)),
                Span::styled(self.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ]),
            Line::from(format!("Elevation: {}m", self.height)),
            Line::from(format!("Difficulty: {}", self.difficulty)),
            Line::from(Span::styled(self.status_text(), status_style)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapMarker {
    pub peak_id: String,
    pub lat: f64,
    pub lng: f64,
    pub style: MarkerStyle,
    pub popup: Popup,
}

impl MapMarker {
    fn for_peak(peak: &Peak, climbed: bool) -> Self {
        MapMarker {
            peak_id: peak.id.clone(),
            lat: peak.lat,
            lng: peak.lng,
            style: MarkerStyle::for_status(climbed),
            popup: Popup {
                rank: peak.rank,
                name: peak.name.clone(),
                height: peak.height,
                difficulty: peak.difficulty,
                climbed,
            },
        }
    }
}

/// The stateful map object: viewport plus its marker layer.
#[derive(Debug)]
struct MapWidget {
    viewport: MapSettings,
    markers: Vec<MapMarker>,
}

impl MapWidget {
    fn new(viewport: MapSettings) -> Self {
        MapWidget {
            viewport,
            markers: Vec::new(),
        }
    }

    /// Canvas bounds for `area`, keeping roughly square degrees on screen.
    /// Terminal cells are about twice as tall as they are wide, and a degree
    /// of longitude shrinks with latitude.
    fn bounds(&self, area: Rect) -> ([f64; 2], [f64; 2]) {
        let v = &self.viewport;
        let half_lat = v.span_deg / 2.0;
        let aspect = f64::from(area.width.max(1)) / (2.0 * f64::from(area.height.max(1)));
        let shrink = v.center_lat.to_radians().cos().max(0.1);
        let half_lng = half_lat * aspect / shrink;
        (
            [v.center_lng - half_lng, v.center_lng + half_lng],
            [v.center_lat - half_lat, v.center_lat + half_lat],
        )
    }
}

/// Map panel with a single long-lived widget.
///
/// `mount` creates the widget at most once, `unmount` releases it and its
/// markers at most once. While unmounted the panel draws a static frame and
/// `sync` does nothing.
#[derive(Debug)]
pub struct MapView {
    viewport: MapSettings,
    widget: Option<MapWidget>,
    selected: Option<String>,
}

impl MapView {
    pub fn new(viewport: MapSettings) -> Self {
        MapView {
            viewport,
            widget: None,
            selected: None,
        }
    }

    /// Returns true when a widget was created by this call.
    pub fn mount(&mut self) -> bool {
        if self.widget.is_some() {
            return false;
        }
        self.widget = Some(MapWidget::new(self.viewport.clone()));
        info!("map widget mounted");
        true
    }

    /// Returns true when a widget was released by this call.
    pub fn unmount(&mut self) -> bool {
        match self.widget.take() {
            Some(widget) => {
                info!(markers = widget.markers.len(), "map widget released");
                true
            }
            None => false,
        }
    }

    /// Rebuilds the marker layer from scratch: one marker per peak.
    pub fn sync(&mut self, peaks: &[Peak], state: &ClimbState) {
        let Some(widget) = self.widget.as_mut() else {
            return;
        };
        widget.markers.clear();
        widget
            .markers
            .extend(peaks.iter().map(|p| MapMarker::for_peak(p, state.contains(&p.id))));
        debug!(markers = widget.markers.len(), "map markers rebuilt");
    }

    /// Opens the popup of the given peak, closing any other.
    pub fn select(&mut self, peak_id: Option<&str>) {
        self.selected = peak_id.map(str::to_string);
    }

    pub fn markers(&self) -> &[MapMarker] {
        match &self.widget {
            Some(w) => &w.markers,
            None => &[],
        }
    }

    pub fn popup(&self) -> Option<&Popup> {
        let id = self.selected.as_deref()?;
        self.markers()
            .iter()
            .find(|m| m.peak_id == id)
            .map(|m| &m.popup)
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let legend = Line::from(vec![
            Span::styled(MarkerStyle::Climbed.glyph(), MarkerStyle::Climbed.style()),
            Span::raw(" climbed  "),
            Span::styled(MarkerStyle::Unclimbed.glyph(), MarkerStyle::Unclimbed.style()),
            Span::raw(" to go "),
        ]);
        let block = panel(" Terrain Map ").title_bottom(legend.right_aligned());
        let inner = block.inner(area);

        let widget = match &self.widget {
            Some(w) if inner.width >= MIN_CANVAS_WIDTH && inner.height >= MIN_CANVAS_HEIGHT => w,
            _ => {
                let p = Paragraph::new("Map unavailable")
                    .style(Style::default().fg(Color::DarkGray))
                    .block(block);
                f.render_widget(p, area);
                return;
            }
        };

        let (x_bounds, y_bounds) = widget.bounds(inner);
        let markers = &widget.markers;
        let canvas = Canvas::default()
            .block(block)
            .marker(symbols::Marker::Braille)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(|ctx| {
                ctx.draw(&Map {
                    color: Color::DarkGray,
                    resolution: MapResolution::High,
                });
                ctx.layer();
                // Climbed markers go last so they stay visible where cells overlap.
                for style in [MarkerStyle::Unclimbed, MarkerStyle::Climbed] {
                    for m in markers.iter().filter(|m| m.style == style) {
                        ctx.print(m.lng, m.lat, Span::styled(style.glyph(), style.style()));
                    }
                }
            });
        f.render_widget(canvas, area);

        if let Some(popup) = self.popup() {
            let rect = Rect {
                x: inner.x + 1,
                y: inner.y,
                width: POPUP_WIDTH.min(inner.width.saturating_sub(1)),
                height: POPUP_HEIGHT.min(inner.height),
            };
            f.render_widget(Clear, rect);
            f.render_widget(Paragraph::new(popup.lines()).block(panel("")), rect);
        }
    }
}

#[cfg(test)]
impl MapView {
    pub fn is_mounted(&self) -> bool {
        self.widget.is_some()
    }

    pub fn count_by_style(&self, style: MarkerStyle) -> usize {
        self.markers().iter().filter(|m| m.style == style).count()
    }
}

impl Drop for MapView {
    fn drop(&mut self) {
        self.unmount();
    }
}
