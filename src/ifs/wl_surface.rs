use {
    crate::{
        client::Client,
        fixed::Fixed,
        object::{Interface, Object, ObjectId},
        rect::{Rect, Region},
        utils::{
            clonecell::CloneCell,
            event_listener::{EventListener, EventSource},
            rc_eq::rc_eq,
        },
    },
    std::{
        cell::{Cell, RefCell},
        rc::{Rc, Weak},
    },
    thiserror::Error,
};

pub const INTERFACE: Interface = Interface("wl_surface");

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SurfaceRole {
    None,
    Cursor,
    DndIcon,
}

impl SurfaceRole {
    fn name(self) -> &'static str {
        match self {
            SurfaceRole::None => "none",
            SurfaceRole::Cursor => "cursor",
            SurfaceRole::DndIcon => "dnd_icon",
        }
    }
}

/// Notified synchronously while a surface is being destroyed.
pub trait SurfaceDestroyListener {
    fn surface_destroyed(&self, surface: &Rc<WlSurface>);
}

/// The per-role commit hook of a surface.
pub trait SurfaceRoleHandler {
    fn configure(&self, surface: &Rc<WlSurface>, dx: i32, dy: i32, width: i32, height: i32);
}

#[derive(Copy, Clone, Default)]
struct PendingAttach {
    buffer: Option<(i32, i32)>,
    dx: i32,
    dy: i32,
}

pub struct WlSurface {
    pub id: ObjectId,
    pub client: Rc<Client>,
    position: Cell<(i32, i32)>,
    size: Cell<(i32, i32)>,
    input_region: RefCell<Option<Region>>,
    mapped: Cell<bool>,
    buffer: Cell<Option<(i32, i32)>>,
    pending: Cell<PendingAttach>,
    role: Cell<SurfaceRole>,
    role_handler: CloneCell<Option<Rc<dyn SurfaceRoleHandler>>>,
    destroyed: Cell<bool>,
    pub destroy_event: EventSource<dyn SurfaceDestroyListener>,
}

impl WlSurface {
    pub fn new(id: ObjectId, client: &Rc<Client>) -> Rc<Self> {
        Rc::new(Self {
            id,
            client: client.clone(),
            position: Cell::new((0, 0)),
            size: Cell::new((0, 0)),
            input_region: RefCell::new(None),
            mapped: Cell::new(false),
            buffer: Cell::new(None),
            pending: Default::default(),
            role: Cell::new(SurfaceRole::None),
            role_handler: Default::default(),
            destroyed: Cell::new(false),
            destroy_event: Default::default(),
        })
    }

    pub fn position(&self) -> (i32, i32) {
        self.position.get()
    }

    pub fn set_position(&self, x: i32, y: i32) {
        self.position.set((x, y));
    }

    pub fn set_size(&self, width: i32, height: i32) {
        self.size.set((width.max(0), height.max(0)));
    }

    pub fn extents(&self) -> Rect {
        let (x, y) = self.position.get();
        let (width, height) = self.size.get();
        Rect::new_sized(x, y, width, height).unwrap_or_default()
    }

    /// `None` accepts input everywhere inside the surface.
    pub fn set_input_region(&self, region: Option<Region>) {
        *self.input_region.borrow_mut() = region;
    }

    pub fn clear_input_region(&self) {
        self.set_input_region(Some(Region::default()));
    }

    /// Hit-tests a surface-local point.
    pub fn accepts_input(&self, x: i32, y: i32) -> bool {
        let (width, height) = self.size.get();
        if x < 0 || y < 0 || x >= width || y >= height {
            return false;
        }
        match &*self.input_region.borrow() {
            Some(region) => region.contains(x, y),
            None => true,
        }
    }

    pub fn from_global(&self, x: Fixed, y: Fixed) -> (Fixed, Fixed) {
        let (sx, sy) = self.position.get();
        (x - sx, y - sy)
    }

    pub fn is_mapped(&self) -> bool {
        self.mapped.get()
    }

    pub(crate) fn set_mapped(&self, mapped: bool) {
        self.mapped.set(mapped);
    }

    pub fn has_buffer(&self) -> bool {
        self.buffer.get().is_some()
    }

    pub fn buffer_size(&self) -> Option<(i32, i32)> {
        self.buffer.get()
    }

    pub fn attach(&self, buffer: Option<(i32, i32)>, dx: i32, dy: i32) {
        self.pending.set(PendingAttach { buffer, dx, dy });
    }

    pub fn commit(self: &Rc<Self>) {
        let pending = self.pending.take();
        self.buffer.set(pending.buffer);
        let (width, height) = pending.buffer.unwrap_or((0, 0));
        match self.role_handler.get() {
            Some(handler) => handler.configure(self, pending.dx, pending.dy, width, height),
            None => self.set_size(width, height),
        }
    }

    pub fn role(&self) -> SurfaceRole {
        self.role.get()
    }

    pub fn check_role(&self, role: SurfaceRole) -> Result<(), WlSurfaceError> {
        let old = self.role.get();
        if old != SurfaceRole::None {
            return Err(WlSurfaceError::IncompatibleRole {
                id: self.id,
                old,
                new: role,
            });
        }
        Ok(())
    }

    pub fn set_role(
        &self,
        role: SurfaceRole,
        handler: Rc<dyn SurfaceRoleHandler>,
    ) -> Result<(), WlSurfaceError> {
        self.check_role(role)?;
        self.role.set(role);
        self.role_handler.set(Some(handler));
        Ok(())
    }

    pub fn unset_role(&self) {
        self.role.set(SurfaceRole::None);
        self.role_handler.take();
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.get()
    }

    /// Runs the destroy listeners. Afterwards no seat references the surface.
    pub fn destroy(self: &Rc<Self>) {
        if self.destroyed.replace(true) {
            return;
        }
        self.mapped.set(false);
        for listener in self.destroy_event.iter() {
            listener.surface_destroyed(self);
        }
        self.destroy_event.clear();
        self.role_handler.take();
    }
}

impl Object for WlSurface {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn interface(&self) -> Interface {
        INTERFACE
    }
}

/// A surface reference that is cleared when the surface is destroyed.
pub struct SurfaceSlot {
    surface: CloneCell<Option<Rc<WlSurface>>>,
    listener: EventListener<dyn SurfaceDestroyListener>,
}

impl SurfaceSlot {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|slf: &Weak<Self>| Self {
            surface: Default::default(),
            listener: EventListener::new(slf.clone()),
        })
    }

    pub fn get(&self) -> Option<Rc<WlSurface>> {
        self.surface.get()
    }

    pub fn set(&self, surface: Option<&Rc<WlSurface>>) {
        self.listener.detach();
        if let Some(surface) = surface {
            self.listener.attach(&surface.destroy_event);
        }
        self.surface.set(surface.cloned());
    }

    pub fn take(&self) -> Option<Rc<WlSurface>> {
        self.listener.detach();
        self.surface.take()
    }

    pub fn is(&self, surface: &Rc<WlSurface>) -> bool {
        match self.surface.get() {
            Some(s) => rc_eq(&s, surface),
            None => false,
        }
    }
}

impl SurfaceDestroyListener for SurfaceSlot {
    fn surface_destroyed(&self, surface: &Rc<WlSurface>) {
        if self.is(surface) {
            self.take();
        }
    }
}

#[derive(Debug, Error)]
pub enum WlSurfaceError {
    #[error("Surface {} cannot be assigned the role {} because it already has the role {}", .id, .new.name(), .old.name())]
    IncompatibleRole {
        id: ObjectId,
        old: SurfaceRole,
        new: SurfaceRole,
    },
}
