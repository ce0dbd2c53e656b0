//! Vector glyphs drawn by the control and the process-wide glyph table.
//!
//! The direction arrow and the separator are small vector paths tessellated
//! into triangles with [`lyon_tessellation`]. Both are template glyphs: the
//! host tints them with the colour the control resolves for them.
//!
//! Every control shares one [`GlyphTable`]. Entries are held weakly, so a
//! glyph is rebuilt on demand once the last control holding it is dropped.

use std::{
    collections::HashMap,
    sync::{Arc, OnceLock, Weak},
};

use bytemuck::{Pod, Zeroable};
use lyon_geom::point;
use lyon_path::{Path, Winding, builder::BorderRadii, math::Box2D};
use lyon_tessellation::{
    BuffersBuilder, FillOptions, FillTessellator, FillVertex, LineCap, LineJoin, StrokeOptions,
    StrokeTessellator, StrokeVertex, VertexBuffers,
};
use parking_lot::RwLock;
use thiserror::Error;
use tracing::{debug, warn};

use crate::rect::{EdgeInsets, Size};

const TESSELLATION_TOLERANCE: f32 = 0.01;

/// Identifies a shared glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlyphKey {
    /// Chevron shown beside the selected reversible segment.
    DirectionArrow,
    /// Rounded bar drawn between segments.
    Separator,
}

/// How a glyph fills an area larger than its natural size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizingMode {
    /// Stretch the region between the caps.
    #[default]
    Stretch,
    /// Repeat the region between the caps.
    Tile,
}

/// A triangle vertex in glyph space, in points from the glyph's top-left.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct GlyphVertex {
    /// Position of the vertex.
    pub position: [f32; 2],
}

/// Tessellated glyph geometry ready for the host renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphData {
    /// Natural size of the glyph.
    pub size: Size,
    /// Fixed edge regions when the glyph is resized.
    pub cap_insets: EdgeInsets,
    /// How the region between the caps fills extra space.
    pub resizing_mode: ResizingMode,
    /// Whether the host should ignore the glyph's colour and tint it.
    pub template: bool,
    /// Triangle vertices.
    pub vertices: Vec<GlyphVertex>,
    /// Triangle indices into `vertices`.
    pub indices: Vec<u16>,
}

/// Errors that can occur while building a glyph.
#[derive(Debug, Error)]
pub enum GlyphError {
    /// Tessellation of the path geometry failed.
    #[error("tessellation error: {0}")]
    Tessellation(#[from] lyon_tessellation::TessellationError),
    /// No renderable geometry was produced.
    #[error("glyph {0:?} produced no renderable geometry")]
    EmptyGeometry(GlyphKey),
}

impl GlyphKey {
    /// Builds the glyph from its vector description.
    pub fn build(self) -> Result<GlyphData, GlyphError> {
        match self {
            GlyphKey::DirectionArrow => build_direction_arrow(),
            GlyphKey::Separator => build_separator(),
        }
    }
}

fn build_direction_arrow() -> Result<GlyphData, GlyphError> {
    let mut builder = Path::builder();
    builder.begin(point(7.25, 0.75));
    builder.line_to(point(4.0, 3.25));
    builder.line_to(point(0.75, 0.75));
    builder.end(false);
    let path = builder.build();

    let options = StrokeOptions::default()
        .with_line_width(1.5)
        .with_line_cap(LineCap::Round)
        .with_line_join(LineJoin::Round)
        .with_tolerance(TESSELLATION_TOLERANCE);

    let mut buffers: VertexBuffers<GlyphVertex, u16> = VertexBuffers::new();
    StrokeTessellator::new().tessellate_path(
        &path,
        &options,
        &mut BuffersBuilder::new(&mut buffers, |vertex: StrokeVertex| GlyphVertex {
            position: vertex.position().to_array(),
        }),
    )?;

    finish(
        GlyphKey::DirectionArrow,
        buffers,
        Size::new(8.0, 4.0),
        EdgeInsets::ZERO,
        ResizingMode::Stretch,
    )
}

fn build_separator() -> Result<GlyphData, GlyphError> {
    let mut builder = Path::builder();
    builder.add_rounded_rectangle(
        &Box2D::new(point(0.0, 0.0), point(1.0, 3.0)),
        &BorderRadii::new(0.5),
        Winding::Positive,
    );
    let path = builder.build();

    let options = FillOptions::default().with_tolerance(TESSELLATION_TOLERANCE);
    let mut buffers: VertexBuffers<GlyphVertex, u16> = VertexBuffers::new();
    FillTessellator::new().tessellate_path(
        &path,
        &options,
        &mut BuffersBuilder::new(&mut buffers, |vertex: FillVertex| GlyphVertex {
            position: vertex.position().to_array(),
        }),
    )?;

    finish(
        GlyphKey::Separator,
        buffers,
        Size::new(1.0, 3.0),
        EdgeInsets::new(1.0, 0.0, 1.0, 0.0),
        ResizingMode::Tile,
    )
}

fn finish(
    key: GlyphKey,
    buffers: VertexBuffers<GlyphVertex, u16>,
    size: Size,
    cap_insets: EdgeInsets,
    resizing_mode: ResizingMode,
) -> Result<GlyphData, GlyphError> {
    if buffers.vertices.is_empty() || buffers.indices.is_empty() {
        return Err(GlyphError::EmptyGeometry(key));
    }

    Ok(GlyphData {
        size,
        cap_insets,
        resizing_mode,
        template: true,
        vertices: buffers.vertices,
        indices: buffers.indices,
    })
}

/// A key to glyph map whose entries live only as long as someone holds them.
#[derive(Debug, Default)]
pub struct GlyphTable {
    entries: RwLock<HashMap<GlyphKey, Weak<GlyphData>>>,
}

static SHARED_GLYPHS: OnceLock<GlyphTable> = OnceLock::new();

impl GlyphTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The table shared by every control in the process.
    pub fn shared() -> &'static GlyphTable {
        SHARED_GLYPHS.get_or_init(GlyphTable::new)
    }

    /// Returns the glyph for `key`, building it on first use or after every
    /// previous holder dropped it.
    ///
    /// Build failures are logged and yield `None`; the control then simply
    /// draws without that glyph.
    pub fn get(&self, key: GlyphKey) -> Option<Arc<GlyphData>> {
        if let Some(glyph) = self.entries.read().get(&key).and_then(Weak::upgrade) {
            return Some(glyph);
        }

        let mut entries = self.entries.write();
        // Another caller may have filled the slot between the two locks.
        if let Some(glyph) = entries.get(&key).and_then(Weak::upgrade) {
            return Some(glyph);
        }

        match key.build() {
            Ok(glyph) => {
                let glyph = Arc::new(glyph);
                entries.retain(|_, entry| entry.strong_count() > 0);
                entries.insert(key, Arc::downgrade(&glyph));
                debug!("Built {key:?} glyph");
                Some(glyph)
            }
            Err(err) => {
                warn!("Failed to build {key:?} glyph: {err}");
                None
            }
        }
    }

    /// Number of entries that are still held by someone.
    pub fn live_count(&self) -> usize {
        self.entries
            .read()
            .values()
            .filter(|entry| entry.strong_count() > 0)
            .count()
    }
}
