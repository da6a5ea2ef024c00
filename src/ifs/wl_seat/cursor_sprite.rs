use {
    crate::{
        fixed::Fixed,
        ifs::{
            wl_seat::WlSeatGlobal,
            wl_surface::{
                SurfaceDestroyListener, SurfaceRole, SurfaceRoleHandler, WlSurface, WlSurfaceError,
            },
        },
        tree::Layer,
        utils::{clonecell::CloneCell, event_listener::EventListener, rc_eq::rc_eq},
    },
    std::{
        cell::Cell,
        rc::{Rc, Weak},
    },
};

/// The client-provided cursor image of a seat.
pub struct CursorSprite {
    seat: Weak<WlSeatGlobal>,
    slf: Weak<Self>,
    surface: CloneCell<Option<Rc<WlSurface>>>,
    hotspot_x: Cell<i32>,
    hotspot_y: Cell<i32>,
    destroy_listener: EventListener<dyn SurfaceDestroyListener>,
}

impl CursorSprite {
    pub fn new(seat: &Weak<WlSeatGlobal>, hotspot: (i32, i32)) -> Rc<Self> {
        Rc::new_cyclic(|slf: &Weak<Self>| Self {
            seat: seat.clone(),
            slf: slf.clone(),
            surface: Default::default(),
            hotspot_x: Cell::new(hotspot.0),
            hotspot_y: Cell::new(hotspot.1),
            destroy_listener: EventListener::new(slf.clone()),
        })
    }

    pub fn surface(&self) -> Option<Rc<WlSurface>> {
        self.surface.get()
    }

    pub fn hotspot(&self) -> (i32, i32) {
        (self.hotspot_x.get(), self.hotspot_y.get())
    }

    fn is(&self, surface: &Rc<WlSurface>) -> bool {
        self.surface.get().is_some_and(|s| rc_eq(&s, surface))
    }

    pub(super) fn set(
        &self,
        surface: Option<&Rc<WlSurface>>,
        hotspot_x: i32,
        hotspot_y: i32,
    ) -> Result<(), WlSurfaceError> {
        if let Some(surface) = surface
            && !self.is(surface)
        {
            surface.check_role(SurfaceRole::Cursor)?;
        }
        self.unmap();
        let Some(surface) = surface else {
            return Ok(());
        };
        let Some(slf) = self.slf.upgrade() else {
            return Ok(());
        };
        surface.set_role(SurfaceRole::Cursor, slf)?;
        self.destroy_listener.attach(&surface.destroy_event);
        self.surface.set(Some(surface.clone()));
        self.hotspot_x.set(hotspot_x);
        self.hotspot_y.set(hotspot_y);
        if let Some((width, height)) = surface.buffer_size() {
            self.configure(surface, 0, 0, width, height);
        }
        Ok(())
    }

    pub(super) fn unmap(&self) {
        let Some(surface) = self.surface.take() else {
            return;
        };
        if surface.is_mapped()
            && let Some(seat) = self.seat.upgrade()
        {
            seat.state.tree.unmap(&surface);
        }
        self.destroy_listener.detach();
        surface.unset_role();
    }

    /// Places the sprite so that its hotspot is at the pointer position.
    pub(super) fn follow(&self, x: Fixed, y: Fixed) {
        if let Some(surface) = self.surface.get() {
            surface.set_position(
                x.round_down().wrapping_sub(self.hotspot_x.get()),
                y.round_down().wrapping_sub(self.hotspot_y.get()),
            );
        }
    }
}

impl SurfaceRoleHandler for CursorSprite {
    fn configure(&self, surface: &Rc<WlSurface>, dx: i32, dy: i32, width: i32, height: i32) {
        if width == 0 {
            return;
        }
        let Some(seat) = self.seat.upgrade() else {
            return;
        };
        self.hotspot_x.set(self.hotspot_x.get().wrapping_sub(dx));
        self.hotspot_y.set(self.hotspot_y.get().wrapping_sub(dy));
        let (x, y) = match seat.pointer() {
            Some(p) => p.position(),
            None => (Fixed::ZERO, Fixed::ZERO),
        };
        surface.set_size(width, height);
        self.follow(x, y);
        surface.clear_input_region();
        if !surface.is_mapped() {
            seat.state.tree.map(Layer::Cursor, surface);
        }
    }
}

impl SurfaceDestroyListener for CursorSprite {
    fn surface_destroyed(&self, surface: &Rc<WlSurface>) {
        if self.is(surface) {
            self.destroy_listener.detach();
            self.surface.take();
        }
    }
}
