//! Interaction state machine.
//!
//! The [`Editor`] turns pointer, keyboard and command input into document
//! mutations, paints through a [`Painter`] and writes every mutation through
//! to its [`DocumentStore`].

use crate::blink::{BlinkPhase, CARET_GLYPH, Caret, CaretBlink, Instant};
use crate::canvas::CanvasDocument;
use crate::config::EditorConfig;
use crate::hit_test;
use crate::input::{KeyEvent, PointerEvent, TextEdit};
use crate::render::{self, Painter};
use crate::shapes::{Element, Ellipse, PenStroke, Rectangle};
use crate::storage::{BlobStore, DocumentStore, StorageResult};
use crate::tools::{Grab, ShapeDraft, TextPlacement, ToolKind, ToolState, ToolStyle};
use kurbo::{Point, Size, Vec2};
use std::time::Duration;

/// A destructive operation waiting for confirmation.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingDelete {
    /// An element dragged off the canvas.
    Element { index: usize, element: Element },
    /// Empty the whole document.
    ClearAll,
}

/// Drawing surface controller.
pub struct Editor<S: BlobStore> {
    store: DocumentStore<S>,
    style: ToolStyle,
    state: ToolState,
    blink_interval: Duration,
    pointer_down: bool,
    pending: Option<PendingDelete>,
    blink: Option<CaretBlink>,
}

fn caret_at(style: &ToolStyle, position: Point) -> Caret {
    Caret {
        position,
        font_size: style.font_size,
        font_family: style.font_family.clone(),
        color: style.color.clone(),
    }
}

/// Whether `point` lies on a surface of `size`, edges included.
fn on_surface(point: Point, size: Size) -> bool {
    point.x >= 0.0 && point.x <= size.width && point.y >= 0.0 && point.y <= size.height
}

/// Resize the element a drag created, erasing its previous frame first.
fn resize_draft(
    doc: &mut CanvasDocument,
    index: usize,
    extent: Vec2,
    painter: &mut dyn Painter,
) {
    let Some(element) = doc.get_mut(index) else {
        return;
    };
    if !render::erase_footprint(painter, element) {
        return;
    }
    match &mut *element {
        Element::Rect(rect) => {
            rect.width = extent.x;
            rect.height = extent.y;
        }
        Element::Ellipse(ellipse) => {
            ellipse.width = extent.x;
            ellipse.height = extent.y;
        }
        Element::PenStroke(_) | Element::Text(_) => return,
    }
    render::draw_element(painter, element);
}

/// Advance a rectangle or ellipse drag to `position`.
fn drag_shape(
    draft: &mut ShapeDraft,
    position: Point,
    doc: &mut CanvasDocument,
    painter: &mut dyn Painter,
    create: impl FnOnce(Point, Vec2) -> Element,
) {
    let Some(anchor) = draft.anchor else {
        return;
    };
    let extent = position - anchor;
    if let Some(index) = draft.index {
        resize_draft(doc, index, extent, painter);
        return;
    }
    let element = create(anchor, extent);
    render::draw_element(painter, &element);
    let index = doc.push(element);
    log::debug!("Started {} at index {}", doc.elements[index].kind().name(), index);
    draft.index = Some(index);
}

impl<S: BlobStore> Editor<S> {
    /// Load the document from `storage` and start in select mode.
    ///
    /// The caller should [`redraw`](Self::redraw) once a painter is ready.
    pub fn open(storage: S, config: &EditorConfig) -> StorageResult<Self> {
        let store = DocumentStore::open(storage, &config.storage_key, &config.background)?;
        Ok(Self::with_store(store, config))
    }

    pub fn with_store(store: DocumentStore<S>, config: &EditorConfig) -> Self {
        Self {
            store,
            style: config.style.clone(),
            state: ToolState::default(),
            blink_interval: config.blink_interval(),
            pointer_down: false,
            pending: None,
            blink: None,
        }
    }

    pub fn document(&self) -> &CanvasDocument {
        self.store.document()
    }

    pub fn store(&self) -> &DocumentStore<S> {
        &self.store
    }

    pub fn tool(&self) -> ToolKind {
        self.state.kind()
    }

    pub fn tool_state(&self) -> &ToolState {
        &self.state
    }

    pub fn style(&self) -> &ToolStyle {
        &self.style
    }

    /// Style for elements created from now on.
    pub fn style_mut(&mut self) -> &mut ToolStyle {
        &mut self.style
    }

    pub fn pending_delete(&self) -> Option<&PendingDelete> {
        self.pending.as_ref()
    }

    /// The live caret blink, if any.
    pub fn caret_blink(&self) -> Option<&CaretBlink> {
        self.blink.as_ref()
    }

    /// Clear the surface and paint the whole document.
    pub fn redraw(&self, painter: &mut dyn Painter) {
        render::full_redraw(painter, self.store.document());
    }

    /// Switch tools, dropping the previous tool's transient state.
    ///
    /// The pointer stays down across the switch, so the next pointer-up still
    /// redraws and persists whatever the interrupted gesture produced.
    pub fn set_tool(&mut self, tool: ToolKind, painter: &mut dyn Painter) {
        if matches!(self.state, ToolState::Text(_)) {
            self.blink = None;
            render::full_redraw(painter, self.store.document());
        }
        log::debug!("Tool {:?} -> {:?}", self.state.kind(), tool);
        self.state = ToolState::enter(tool);
    }

    /// Feed a pointer event.
    pub fn handle_pointer(
        &mut self,
        event: PointerEvent,
        now: Instant,
        painter: &mut dyn Painter,
    ) -> StorageResult<()> {
        match event {
            PointerEvent::Down { position } => {
                self.pointer_pressed(position, now, painter);
                Ok(())
            }
            PointerEvent::Move { position } => self.pointer_moved(position, painter),
            PointerEvent::Up { .. } | PointerEvent::Leave { .. } => {
                self.pointer_released(painter)
            }
        }
    }

    fn pointer_pressed(&mut self, position: Point, now: Instant, painter: &mut dyn Painter) {
        if self.pending.is_some() {
            log::trace!("Ignoring pointer down while a delete is pending");
            return;
        }
        self.pointer_down = true;
        match &mut self.state {
            ToolState::Rectangle(draft) | ToolState::Ellipse(draft) => {
                draft.anchor = Some(position);
                draft.index = None;
            }
            ToolState::Pen(pen) => pen.previous = Some(position),
            ToolState::Text(entry) => {
                if self.blink.take().is_some_and(|b| b.is_shown()) {
                    render::full_redraw(painter, self.store.document());
                }
                entry.placement = Some(TextPlacement {
                    anchor: position,
                    buffer: String::new(),
                });
                self.blink = Some(CaretBlink::start(
                    caret_at(&self.style, position),
                    self.blink_interval,
                    now,
                ));
            }
            ToolState::Select(select) => {
                let elements = &self.store.document().elements;
                let hit = hit_test::resolve(position, elements, painter.size().height);
                select.grab = hit.map(|hit| {
                    log::debug!(
                        "Grabbed {} at index {}",
                        hit.element.kind().name(),
                        hit.index
                    );
                    Grab {
                        index: hit.index,
                        offset: hit.offset,
                    }
                });
            }
        }
    }

    fn pointer_moved(&mut self, position: Point, painter: &mut dyn Painter) -> StorageResult<()> {
        if !self.pointer_down || self.pending.is_some() {
            return Ok(());
        }
        match &mut self.state {
            ToolState::Rectangle(draft) => {
                let style = &self.style;
                let doc = self.store.document_mut();
                drag_shape(draft, position, doc, painter, |anchor, extent| {
                    Element::Rect(Rectangle::new(
                        anchor,
                        extent.x,
                        extent.y,
                        &style.color,
                        style.line_width,
                    ))
                });
                Ok(())
            }
            ToolState::Ellipse(draft) => {
                let Some(anchor) = draft.anchor else {
                    return Ok(());
                };
                let extent = position - anchor;
                if !Ellipse::accepts_extent(extent.x, extent.y, self.style.line_width) {
                    return Ok(());
                }
                let style = &self.style;
                let doc = self.store.document_mut();
                drag_shape(draft, position, doc, painter, |center, extent| {
                    Element::Ellipse(Ellipse::new(
                        center,
                        extent.x,
                        extent.y,
                        &style.color,
                        style.line_width,
                    ))
                });
                Ok(())
            }
            ToolState::Pen(pen) => {
                let Some(previous) = pen.previous else {
                    return Ok(());
                };
                let segment = Element::PenStroke(PenStroke::new(
                    previous,
                    position,
                    &self.style.color,
                    self.style.line_width,
                ));
                render::draw_element(painter, &segment);
                self.store.document_mut().push(segment);
                pen.previous = Some(position);
                self.store.persist()
            }
            ToolState::Text(_) => Ok(()),
            ToolState::Select(select) => {
                let grab = select.grab;
                match grab {
                    Some(grab) => self.move_grabbed(grab, position, painter),
                    None => Ok(()),
                }
            }
        }
    }

    fn move_grabbed(
        &mut self,
        grab: Grab,
        position: Point,
        painter: &mut dyn Painter,
    ) -> StorageResult<()> {
        let Some(element) = self.store.document().get(grab.index) else {
            return Ok(());
        };
        let target = position - grab.offset;
        if !on_surface(element.reference_point_at(target), painter.size()) {
            log::debug!(
                "{} at index {} left the canvas, awaiting delete confirmation",
                element.kind().name(),
                grab.index
            );
            self.pending = Some(PendingDelete::Element {
                index: grab.index,
                element: element.clone(),
            });
            return Ok(());
        }

        let previous = element.clone();
        let doc = self.store.document_mut();
        if let Some(element) = doc.get_mut(grab.index) {
            element.set_anchor(target);
        }
        if render::erase_footprint(painter, &previous) {
            if let Some(element) = doc.get(grab.index) {
                render::draw_element(painter, element);
            }
        } else {
            render::full_redraw(painter, doc);
        }
        self.store.persist()
    }

    fn pointer_released(&mut self, painter: &mut dyn Painter) -> StorageResult<()> {
        if !std::mem::replace(&mut self.pointer_down, false) {
            return Ok(());
        }
        match &mut self.state {
            ToolState::Rectangle(draft) | ToolState::Ellipse(draft) => draft.disarm(),
            ToolState::Pen(pen) => pen.previous = None,
            ToolState::Select(select) => {
                if self.pending.is_none() {
                    select.grab = None;
                }
            }
            ToolState::Text(_) => {}
        }
        render::full_redraw(painter, self.store.document());
        self.store.persist()
    }

    /// Feed a keyboard event. Only key presses in text mode with an active
    /// placement have any effect.
    pub fn handle_key(
        &mut self,
        event: &KeyEvent,
        now: Instant,
        painter: &mut dyn Painter,
    ) -> StorageResult<()> {
        let KeyEvent::Pressed(key) = event else {
            return Ok(());
        };
        let ToolState::Text(entry) = &mut self.state else {
            return Ok(());
        };
        let Some(placement) = entry.placement.as_mut() else {
            return Ok(());
        };
        if !TextEdit::from_key(key).apply(&mut placement.buffer) {
            return Ok(());
        }

        self.blink = None;
        let key = self.style.text_key(placement.anchor);
        let doc = self.store.document_mut();
        if placement.buffer.is_empty() {
            if let Some(index) = doc.find_text(&key) {
                doc.remove(index);
                log::debug!("Removed emptied text at index {}", index);
            }
        } else {
            doc.upsert_text(&key, &placement.buffer, &*painter);
        }
        render::full_redraw(painter, doc);
        if !placement.buffer.is_empty() {
            painter.fill_text(
                &placement.buffer,
                placement.anchor,
                key.font_size,
                &key.font_family,
                &key.color,
            );
        }

        let advance =
            painter.measure_text_advance(&placement.buffer, key.font_size, &key.font_family);
        let caret = caret_at(
            &self.style,
            Point::new(placement.anchor.x + advance, placement.anchor.y),
        );
        self.blink = Some(CaretBlink::start(caret, self.blink_interval, now));
        self.store.persist()
    }

    /// Drive the caret blink.
    pub fn tick(&mut self, now: Instant, painter: &mut dyn Painter) {
        let Some(blink) = self.blink.as_mut() else {
            return;
        };
        match blink.poll(now) {
            Some(BlinkPhase::Show) => {
                log::trace!("Caret shown");
                let caret = blink.caret();
                painter.fill_text(
                    CARET_GLYPH,
                    caret.position,
                    caret.font_size,
                    &caret.font_family,
                    &caret.color,
                );
            }
            Some(BlinkPhase::Hide) => {
                log::trace!("Caret hidden");
                render::full_redraw(painter, self.store.document());
            }
            None => {}
        }
    }

    /// Remove the most recent element and return to select mode.
    ///
    /// Returns `false` when the document is empty.
    pub fn undo(&mut self, painter: &mut dyn Painter) -> StorageResult<bool> {
        let doc = self.store.document_mut();
        let Some(removed) = doc.pop() else {
            log::debug!("Nothing to undo");
            return Ok(false);
        };
        if render::erase_footprint(painter, &removed) {
            render::repaint(painter, doc);
        } else {
            render::full_redraw(painter, doc);
        }
        log::debug!("Undid {}", removed.kind().name());
        self.set_tool(ToolKind::Select, painter);
        self.store.persist()?;
        Ok(true)
    }

    /// Ask to empty the document. Takes effect on [`confirm_delete`](Self::confirm_delete).
    pub fn request_clear_all(&mut self) {
        log::debug!("Clear all requested");
        self.pending = Some(PendingDelete::ClearAll);
    }

    /// Carry out the pending delete, if any.
    pub fn confirm_delete(&mut self, painter: &mut dyn Painter) -> StorageResult<()> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        match pending {
            PendingDelete::Element { index, element } => {
                let doc = self.store.document_mut();
                // The list may have shifted since the delete was requested.
                let position = if doc.get(index).is_some_and(|e| e.id() == element.id()) {
                    Some(index)
                } else {
                    doc.elements.iter().position(|e| e.id() == element.id())
                };
                if let Some(removed) = position.and_then(|i| doc.remove(i)) {
                    if render::erase_footprint(painter, &removed) {
                        render::repaint(painter, doc);
                    } else {
                        render::full_redraw(painter, doc);
                    }
                    log::debug!("Deleted {}", removed.kind().name());
                }
                self.release_grab();
            }
            PendingDelete::ClearAll => {
                self.store.document_mut().clear();
                render::full_redraw(painter, self.store.document());
                log::debug!("Cleared document");
                self.set_tool(ToolKind::Select, painter);
            }
        }
        self.store.persist()
    }

    /// Drop the pending delete without touching the document.
    pub fn cancel_delete(&mut self) {
        if self.pending.take().is_some() {
            log::debug!("Delete cancelled");
        }
        self.release_grab();
    }

    fn release_grab(&mut self) {
        if let ToolState::Select(select) = &mut self.state {
            select.grab = None;
        }
    }

    /// Change the background color, repaint and persist.
    pub fn set_background(
        &mut self,
        color: &str,
        painter: &mut dyn Painter,
    ) -> StorageResult<()> {
        let doc = self.store.document_mut();
        doc.background = color.to_string();
        render::repaint(painter, doc);
        self.store.persist()
    }

    /// Encode the painted surface.
    pub fn export_image(&self, painter: &dyn Painter) -> Vec<u8> {
        painter.export_image()
    }
}
