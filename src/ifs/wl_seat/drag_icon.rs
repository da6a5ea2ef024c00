use {
    crate::{
        fixed::Fixed,
        ifs::{
            wl_seat::WlSeatGlobal,
            wl_surface::{SurfaceDestroyListener, SurfaceRole, SurfaceRoleHandler, WlSurface},
        },
        object::INVALID_OBJECT,
        tree::Layer,
        utils::{clonecell::CloneCell, errorfmt::ErrorFmt, event_listener::EventListener, rc_eq::rc_eq},
    },
    std::{
        cell::Cell,
        rc::{Rc, Weak},
    },
};

/// The icon that follows the pointer during drag and drop.
///
/// The data device publishes the icon with `set_pending`. The seat adopts it
/// on the next update.
pub struct DragIcon {
    slf: Weak<Self>,
    pending: CloneCell<Option<Rc<WlSurface>>>,
    pending_listener: EventListener<dyn SurfaceDestroyListener>,
    surface: CloneCell<Option<Rc<WlSurface>>>,
    surface_listener: EventListener<dyn SurfaceDestroyListener>,
    x: Cell<Fixed>,
    y: Cell<Fixed>,
}

impl DragIcon {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|slf: &Weak<Self>| Self {
            slf: slf.clone(),
            pending: Default::default(),
            pending_listener: EventListener::new(slf.clone()),
            surface: Default::default(),
            surface_listener: EventListener::new(slf.clone()),
            x: Default::default(),
            y: Default::default(),
        })
    }

    pub fn surface(&self) -> Option<Rc<WlSurface>> {
        self.surface.get()
    }

    pub fn pending(&self) -> Option<Rc<WlSurface>> {
        self.pending.get()
    }

    pub(super) fn set_pending(&self, icon: Option<&Rc<WlSurface>>) {
        self.pending_listener.detach();
        if let Some(icon) = icon {
            self.pending_listener.attach(&icon.destroy_event);
        }
        self.pending.set(icon.cloned());
    }

    pub(super) fn update(&self, seat: &Rc<WlSeatGlobal>, dx: Fixed, dy: Fixed) {
        let current = self.surface.get();
        let pending = self.pending.get();
        let changed = match (&current, &pending) {
            (None, None) => return,
            (Some(current), Some(pending)) => !rc_eq(current, pending),
            _ => false,
        };
        if pending.is_none() || changed {
            self.release(seat);
            if !changed {
                return;
            }
        }
        if self.surface.get().is_none() {
            let Some(pending) = pending else {
                return;
            };
            if !self.setup(seat, &pending) {
                return;
            }
        }
        self.map(seat);
        if dx == Fixed::ZERO && dy == Fixed::ZERO {
            return;
        }
        self.move_to(self.x.get() + dx, self.y.get() + dy);
    }

    fn setup(&self, seat: &Rc<WlSeatGlobal>, surface: &Rc<WlSurface>) -> bool {
        let Some(slf) = self.slf.upgrade() else {
            return false;
        };
        if let Err(e) = surface.set_role(SurfaceRole::DndIcon, slf) {
            surface
                .client
                .protocol_error(&**surface, INVALID_OBJECT, &ErrorFmt(e).to_string());
            self.set_pending(None);
            return false;
        }
        self.surface_listener.attach(&surface.destroy_event);
        self.surface.set(Some(surface.clone()));
        let (x, y) = match seat.pointer() {
            Some(p) => p.position(),
            None => (Fixed::ZERO, Fixed::ZERO),
        };
        self.move_to(x, y);
        true
    }

    pub(super) fn release(&self, seat: &Rc<WlSeatGlobal>) {
        let Some(surface) = self.surface.take() else {
            return;
        };
        if surface.is_mapped() {
            seat.state.tree.unmap(&surface);
        }
        surface.unset_role();
        surface.clear_input_region();
        self.surface_listener.detach();
    }

    fn map(&self, seat: &Rc<WlSeatGlobal>) {
        let Some(surface) = self.surface.get() else {
            return;
        };
        if surface.is_mapped() || !surface.has_buffer() {
            return;
        }
        match seat.sprite.surface() {
            Some(sprite) if sprite.is_mapped() => {
                seat.state.tree.map_below(Layer::Cursor, &surface, &sprite)
            }
            _ => seat.state.tree.map(Layer::Cursor, &surface),
        }
        surface.clear_input_region();
    }

    fn move_to(&self, x: Fixed, y: Fixed) {
        self.x.set(x);
        self.y.set(y);
        if let Some(surface) = self.surface.get() {
            surface.set_position(x.round_down(), y.round_down());
        }
    }
}

impl SurfaceRoleHandler for DragIcon {
    fn configure(&self, surface: &Rc<WlSurface>, dx: i32, dy: i32, width: i32, height: i32) {
        surface.set_size(width, height);
        self.move_to(self.x.get() + dx, self.y.get() + dy);
    }
}

impl SurfaceDestroyListener for DragIcon {
    fn surface_destroyed(&self, surface: &Rc<WlSurface>) {
        if self.surface.get().is_some_and(|s| rc_eq(&s, surface)) {
            self.surface_listener.detach();
            self.surface.take();
        }
        if self.pending.get().is_some_and(|s| rc_eq(&s, surface)) {
            self.pending_listener.detach();
            self.pending.take();
        }
    }
}
