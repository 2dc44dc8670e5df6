//! Render adapter boundary
//!
//! The tree model knows nothing about drawing. A [`RenderAdapter`] owns
//! the side map from node key to backend handle, paints a [`Layout`]
//! through a [`RenderSurface`], and recolours nodes as search events
//! arrive.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use thiserror::Error;

use crate::layout::{Edge, Layout, NodePlacement};
use crate::search::SearchEvent;
use crate::tree::{BalancedTree, Key, VisualState};

/// Colour parse failure
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid colour {0:?}, expected #rrggbb")]
pub struct ParseColorError(String);

/// 24-bit colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Color {
    /// Colour from components
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(err());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        Ok(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Colours for each visual state plus chrome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Untouched node fill
    pub default_fill: Color,
    /// Visited node fill
    pub visited_fill: Color,
    /// Matched node fill
    pub found_fill: Color,
    /// Node outline, edges and labels
    pub foreground: Color,
    /// Canvas background
    pub background: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            default_fill: Color::rgb(0x00, 0x7a, 0xcc),
            visited_fill: Color::rgb(0xff, 0xa5, 0x00),
            found_fill: Color::rgb(0x00, 0xff, 0x00),
            foreground: Color::rgb(0xff, 0xff, 0xff),
            background: Color::rgb(0x2d, 0x2d, 0x2d),
        }
    }
}

impl Palette {
    /// Fill for a visual state
    pub fn fill(&self, state: VisualState) -> Color {
        match state {
            VisualState::Default => self.default_fill,
            VisualState::Visited => self.visited_fill,
            VisualState::Found => self.found_fill,
        }
    }
}

/// Drawing backend
pub trait RenderSurface {
    /// Backend identifier for a drawn node
    type Handle: Copy + Eq + Hash + fmt::Debug;

    /// Remove everything drawn so far
    fn clear(&mut self, background: Color);

    /// Draw one connector
    fn draw_edge(&mut self, edge: &Edge, color: Color);

    /// Draw one node circle with its key label
    fn draw_node(
        &mut self,
        placement: &NodePlacement,
        fill: Color,
        outline: Color,
        label_size: u32,
    ) -> Self::Handle;

    /// Recolour a previously drawn node
    fn set_fill(&mut self, handle: Self::Handle, fill: Color);
}

/// Paints trees and applies search events to a surface
#[derive(Debug)]
pub struct RenderAdapter<S: RenderSurface> {
    surface: S,
    palette: Palette,
    handles: HashMap<Key, S::Handle>,
}

impl<S: RenderSurface> RenderAdapter<S> {
    /// Adapter with the default palette
    pub fn new(surface: S) -> Self {
        Self::with_palette(surface, Palette::default())
    }

    /// Adapter with a custom palette
    pub fn with_palette(surface: S, palette: Palette) -> Self {
        Self {
            surface,
            palette,
            handles: HashMap::new(),
        }
    }

    /// Full repaint: edges first so nodes sit on top
    pub fn paint(&mut self, layout: &Layout, tree: &BalancedTree) {
        self.surface.clear(self.palette.background);
        self.handles.clear();

        for edge in &layout.edges {
            self.surface.draw_edge(edge, self.palette.foreground);
        }

        let label_size = layout.label_font_size();
        for placement in &layout.nodes {
            let state = tree.visual_state_of(placement.key).unwrap_or_default();
            let handle = self.surface.draw_node(
                placement,
                self.palette.fill(state),
                self.palette.foreground,
                label_size,
            );
            self.handles.insert(placement.key, handle);
        }
    }

    /// Recolour for one search event
    ///
    /// Events for keys that were never painted are ignored.
    pub fn apply(&mut self, event: &SearchEvent) {
        let (key, state) = match event {
            SearchEvent::Step { key, state } => (*key, *state),
            SearchEvent::Finished(outcome) if outcome.found => (outcome.target, VisualState::Found),
            SearchEvent::Finished(_) => return,
        };
        if let Some(&handle) = self.handles.get(&key) {
            self.surface.set_fill(handle, self.palette.fill(state));
        }
    }

    /// Recolour every painted node back to the default fill
    pub fn reset_fills(&mut self) {
        let fill = self.palette.default_fill;
        for &handle in self.handles.values() {
            self.surface.set_fill(handle, fill);
        }
    }

    /// Backend handle for a key
    pub fn handle_of(&self, key: Key) -> Option<S::Handle> {
        self.handles.get(&key).copied()
    }

    /// Palette in use
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Underlying surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable underlying surface
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}

/// One recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Canvas cleared
    Clear(Color),
    /// Connector drawn
    Edge(Edge, Color),
    /// Node drawn
    Node {
        /// Assigned handle
        handle: usize,
        /// Node placement
        placement: NodePlacement,
        /// Fill colour
        fill: Color,
        /// Label point size
        label_size: u32,
    },
    /// Node recoloured
    Fill {
        /// Target handle
        handle: usize,
        /// New fill
        fill: Color,
    },
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawCommand::Clear(color) => write!(f, "clear {}", color),
            DrawCommand::Edge(edge, color) => write!(
                f,
                "line {}->{} ({:.1}, {:.1}) -> ({:.1}, {:.1}) {}",
                edge.parent, edge.child, edge.from_x, edge.from_y, edge.to_x, edge.to_y, color
            ),
            DrawCommand::Node {
                handle,
                placement,
                fill,
                label_size,
            } => write!(
                f,
                "node #{} key={} at ({:.1}, {:.1}) r={:.1} fill={} label={}pt",
                handle, placement.key, placement.x, placement.y, placement.radius, fill, label_size
            ),
            DrawCommand::Fill { handle, fill } => write!(f, "fill #{} {}", handle, fill),
        }
    }
}

/// Surface that records commands as text
#[derive(Debug, Default, Clone)]
pub struct TextSurface {
    commands: Vec<DrawCommand>,
    next_handle: usize,
}

impl TextSurface {
    /// Empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Every command since creation
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Remove and return recorded commands
    pub fn drain(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl RenderSurface for TextSurface {
    type Handle = usize;

    fn clear(&mut self, background: Color) {
        self.next_handle = 0;
        self.commands.push(DrawCommand::Clear(background));
    }

    fn draw_edge(&mut self, edge: &Edge, color: Color) {
        self.commands.push(DrawCommand::Edge(*edge, color));
    }

    fn draw_node(
        &mut self,
        placement: &NodePlacement,
        fill: Color,
        _outline: Color,
        label_size: u32,
    ) -> usize {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.commands.push(DrawCommand::Node {
            handle,
            placement: *placement,
            fill,
            label_size,
        });
        handle
    }

    fn set_fill(&mut self, handle: usize, fill: Color) {
        self.commands.push(DrawCommand::Fill { handle, fill });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::compute_layout;
    use crate::search::{Search, SearchMode};

    #[test]
    fn test_color_round_trip() {
        let color: Color = "#ffa500".parse().unwrap();
        assert_eq!(color, Color::rgb(255, 165, 0));
        assert_eq!(color.to_string(), "#ffa500");
        assert!("ffa500".parse::<Color>().is_err());
        assert!("#ffa5".parse::<Color>().is_err());
        assert!("#gga500".parse::<Color>().is_err());
    }

    #[test]
    fn test_paint_draws_edges_before_nodes() {
        let tree = BalancedTree::from_sorted(&[1, 2, 3]);
        let layout = compute_layout(&tree, 300.0, 300.0).unwrap();
        let mut adapter = RenderAdapter::new(TextSurface::new());

        adapter.paint(&layout, &tree);

        let commands = adapter.surface().commands();
        assert_eq!(commands.len(), 1 + 2 + 3);
        assert!(matches!(commands[0], DrawCommand::Clear(_)));
        assert!(matches!(commands[1], DrawCommand::Edge(..)));
        assert!(matches!(commands[2], DrawCommand::Edge(..)));
        assert!(commands[3..]
            .iter()
            .all(|c| matches!(c, DrawCommand::Node { fill, .. } if *fill == Palette::default().default_fill)));
        assert_eq!(adapter.handle_of(2), Some(0));
        assert_eq!(adapter.handle_of(9), None);
    }

    #[test]
    fn test_search_events_recolour_nodes() {
        let mut tree = BalancedTree::from_sorted(&[1, 2, 3]);
        let layout = compute_layout(&tree, 300.0, 300.0).unwrap();
        let mut adapter = RenderAdapter::new(TextSurface::new());
        adapter.paint(&layout, &tree);
        adapter.surface_mut().drain();

        let events: Vec<SearchEvent> = Search::start(&mut tree, 3, SearchMode::Binary)
            .events(&mut tree)
            .collect();
        for event in &events {
            adapter.apply(event);
        }

        let palette = Palette::default();
        let root = adapter.handle_of(2).unwrap();
        let target = adapter.handle_of(3).unwrap();
        assert_eq!(
            adapter.surface().commands(),
            &[
                DrawCommand::Fill { handle: root, fill: palette.visited_fill },
                DrawCommand::Fill { handle: target, fill: palette.visited_fill },
                DrawCommand::Fill { handle: target, fill: palette.found_fill },
            ]
        );
    }
}
