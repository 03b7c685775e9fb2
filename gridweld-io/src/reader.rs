//! Model group document reader
//!
//! The reader is lenient about content and strict about structure. Parts are
//! collected in document order from the root and from nested `Model3DGroup` and
//! `*.Children` containers. Other unknown elements are skipped, missing mesh
//! attributes become empty lists and unreadable colors fall back to
//! [`Color::TRANSPARENT`]. XML syntax errors, a missing `Model3DGroup` root or a
//! document that ends before the root closes are errors.

use crate::error::IoError;
use crate::text::{parse_indices, parse_points, parse_vectors};
use crate::xaml::*;
use gridweld_core::{Color, GeometryPart, Mesh, ModelGroup, NoProgress, ProgressObserver, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

type ReadResult<T> = std::result::Result<T, IoError>;

/// Pull parser yielding owned events
pub(crate) struct EventSource<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
}

impl<R: BufRead> EventSource<R> {
    pub(crate) fn new(inner: R) -> Self {
        let mut reader = Reader::from_reader(inner);
        reader.trim_text(true);
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    pub(crate) fn next_event(&mut self) -> ReadResult<Event<'static>> {
        self.buf.clear();
        let event = self
            .reader
            .read_event_into(&mut self.buf)
            .map_err(IoError::xml)?;
        Ok(event.into_owned())
    }

    fn position(&self) -> u64 {
        self.reader.buffer_position() as u64
    }
}

fn is(e: &BytesStart<'_>, name: &str) -> bool {
    e.local_name().as_ref() == name.as_bytes()
}

fn truncated(inside: &str) -> IoError {
    IoError::InvalidFormat {
        format: format!("document ended inside <{}>", inside),
    }
}

/// Deserializes a `Model3DGroup` document into a [`ModelGroup`]
pub struct ModelGroupReader;

impl ModelGroupReader {
    /// Read a group from any buffered byte source
    pub fn read<R: BufRead>(reader: R) -> Result<ModelGroup> {
        let group = read_group(&mut EventSource::new(reader), &NoProgress, 0)?;
        Ok(group)
    }

    /// Read the file at `path`, reporting `(bytes consumed, file length)` after each part
    pub fn read_from_file<P: AsRef<Path>>(
        path: P,
        progress: &dyn ProgressObserver,
    ) -> Result<ModelGroup> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => IoError::FileNotFound {
                path: path.display().to_string(),
            },
            _ => IoError::Io(e),
        })?;
        let total = file.metadata()?.len();

        let group = read_group(&mut EventSource::new(BufReader::new(file)), progress, total)?;
        log::debug!("Read {} parts from {}", group.len(), path.display());
        Ok(group)
    }
}

fn read_group<R: BufRead>(
    source: &mut EventSource<R>,
    progress: &dyn ProgressObserver,
    total: u64,
) -> ReadResult<ModelGroup> {
    let root_has_content = loop {
        match source.next_event()? {
            Event::Start(e) if is(&e, ROOT) => break true,
            Event::Empty(e) if is(&e, ROOT) => break false,
            Event::Eof => {
                return Err(IoError::InvalidFormat {
                    format: format!("no <{}> element", ROOT),
                })
            }
            _ => {}
        }
    };

    let mut group = ModelGroup::new();
    if !root_has_content {
        return Ok(group);
    }

    // Nesting depth of `Model3DGroup` / `*.Children` containers below the root
    let mut depth = 0usize;
    loop {
        match source.next_event()? {
            Event::Start(e) if is(&e, PART) => {
                group.push(read_part(source)?);
                progress.on_progress(source.position(), total);
            }
            Event::Empty(e) if is(&e, PART) => {
                group.push(GeometryPart::default());
                progress.on_progress(source.position(), total);
            }
            Event::Start(e) if is_container(&e) => depth += 1,
            Event::Start(_) => skip_element(source)?,
            Event::End(_) if depth == 0 => return Ok(group),
            Event::End(_) => depth -= 1,
            Event::Eof => return Err(truncated(ROOT)),
            _ => {}
        }
    }
}

/// Elements whose children may hold further parts
fn is_container(e: &BytesStart<'_>) -> bool {
    is(e, ROOT) || e.local_name().as_ref().ends_with(CHILDREN_SUFFIX.as_bytes())
}

/// Consume events up to and including the end of the element just opened
fn skip_element<R: BufRead>(source: &mut EventSource<R>) -> ReadResult<()> {
    let mut depth = 0usize;
    loop {
        match source.next_event()? {
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => return Ok(()),
            Event::End(_) => depth -= 1,
            Event::Eof => return Err(truncated(ROOT)),
            _ => {}
        }
    }
}

fn read_part<R: BufRead>(source: &mut EventSource<R>) -> ReadResult<GeometryPart> {
    let mut part = GeometryPart::default();
    loop {
        match source.next_event()? {
            Event::Start(e) if is(&e, GEOMETRY) => part.mesh = read_geometry(source)?,
            Event::Start(e) if is(&e, MATERIAL) => part.front_color = read_material(source)?,
            Event::Start(e) if is(&e, BACK_MATERIAL) => part.back_color = read_material(source)?,
            Event::Start(_) => skip_element(source)?,
            Event::End(_) => return Ok(part),
            Event::Eof => return Err(truncated(PART)),
            _ => {}
        }
    }
}

fn read_geometry<R: BufRead>(source: &mut EventSource<R>) -> ReadResult<Mesh> {
    let mut mesh = Mesh::default();
    loop {
        match source.next_event()? {
            Event::Empty(e) if is(&e, MESH) => mesh = mesh_from_attributes(&e)?,
            Event::Start(e) if is(&e, MESH) => {
                mesh = mesh_from_attributes(&e)?;
                skip_element(source)?;
            }
            Event::Start(_) => skip_element(source)?,
            Event::End(_) => return Ok(mesh),
            Event::Eof => return Err(truncated(GEOMETRY)),
            _ => {}
        }
    }
}

fn mesh_from_attributes(e: &BytesStart<'_>) -> ReadResult<Mesh> {
    let mut mesh = Mesh::default();
    for attr in e.attributes() {
        let attr = attr.map_err(IoError::xml)?;
        let value = attr.unescape_value().map_err(IoError::xml)?;
        match attr.key.local_name().as_ref() {
            k if k == POSITIONS.as_bytes() => mesh.positions = parse_points(&value),
            k if k == NORMALS.as_bytes() => mesh.normals = parse_vectors(&value),
            k if k == TRIANGLE_INDICES.as_bytes() => {
                mesh.triangle_indices = parse_indices(&value)
            }
            _ => {}
        }
    }
    Ok(mesh)
}

/// Scan a material element for the first brush color it carries
fn read_material<R: BufRead>(source: &mut EventSource<R>) -> ReadResult<Color> {
    let mut color = None;
    let mut depth = 0usize;
    loop {
        match source.next_event()? {
            Event::Start(e) => {
                if color.is_none() {
                    color = brush_color(&e);
                }
                depth += 1;
            }
            Event::Empty(e) => {
                if color.is_none() {
                    color = brush_color(&e);
                }
            }
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            Event::Eof => return Err(truncated(MATERIAL)),
            _ => {}
        }
    }
    Ok(color.unwrap_or(Color::TRANSPARENT))
}

/// Color of a `SolidColorBrush`, or of a material's `Brush` shorthand attribute.
///
/// Returns `None` for elements that carry no brush; a brush whose color does not
/// parse yields [`Color::TRANSPARENT`].
fn brush_color(e: &BytesStart<'_>) -> Option<Color> {
    let attribute = if is(e, SOLID_BRUSH) {
        COLOR
    } else if is(e, DIFFUSE) {
        BRUSH
    } else {
        return None;
    };

    let value = match e.try_get_attribute(attribute) {
        Ok(Some(attr)) => attr.unescape_value().ok().map(|v| v.into_owned()),
        Ok(None) if is(e, DIFFUSE) => return None,
        _ => None,
    };

    Some(
        value
            .and_then(|v| Color::parse(&v).ok())
            .unwrap_or(Color::TRANSPARENT),
    )
}
