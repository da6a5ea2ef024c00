use {
    crate::{
        client::ClientId,
        fixed::Fixed,
        ifs::{
            wl_seat::{WlSeatGlobal, touch_owner::TouchOwnerHolder, wl_touch::WlTouch},
            wl_surface::{SurfaceDestroyListener, WlSurface},
        },
        tree::find_binding_for_surface,
        utils::{
            bindings::Bindings,
            clonecell::CloneCell,
            event_listener::EventListener,
            rc_eq::{opt_rc_eq, rc_eq},
        },
    },
    std::{
        cell::Cell,
        rc::{Rc, Weak},
    },
};

/// The touchscreen of a seat.
///
/// All touch points of a session share the focus picked by the first one.
pub struct SeatTouch {
    pub(super) seat: CloneCell<Option<Weak<WlSeatGlobal>>>,
    pub(super) bindings: Bindings<WlTouch>,
    pub(super) owner: TouchOwnerHolder,
    focus: CloneCell<Option<Rc<WlSurface>>>,
    focus_resource: CloneCell<Option<Rc<WlTouch>>>,
    focus_listener: EventListener<dyn SurfaceDestroyListener>,
    grab_x: Cell<Fixed>,
    grab_y: Cell<Fixed>,
}

impl SeatTouch {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|slf: &Weak<Self>| Self {
            seat: Default::default(),
            bindings: Default::default(),
            owner: Default::default(),
            focus: Default::default(),
            focus_resource: Default::default(),
            focus_listener: EventListener::new(slf.clone()),
            grab_x: Default::default(),
            grab_y: Default::default(),
        })
    }

    pub fn seat(&self) -> Option<Rc<WlSeatGlobal>> {
        self.seat.get().and_then(|s| s.upgrade())
    }

    pub fn focus(&self) -> Option<Rc<WlSurface>> {
        self.focus.get()
    }

    pub fn focus_resource(&self) -> Option<Rc<WlTouch>> {
        self.focus_resource.get()
    }

    /// The global position of the most recent touch event.
    pub fn grab_position(&self) -> (Fixed, Fixed) {
        (self.grab_x.get(), self.grab_y.get())
    }

    pub(super) fn set_grab_position(&self, x: Fixed, y: Fixed) {
        self.grab_x.set(x);
        self.grab_y.set(y);
    }

    pub fn binding_for(&self, surface: &WlSurface) -> Option<Rc<WlTouch>> {
        find_binding_for_surface(&self.bindings, surface)
    }

    /// Surfaces whose owner does not listen on the touchscreen cannot be
    /// focused.
    pub(super) fn set_focus(&self, surface: Option<&Rc<WlSurface>>) {
        if opt_rc_eq(&self.focus.get(), &surface.cloned()) {
            return;
        }
        self.focus_listener.detach();
        self.focus.take();
        self.focus_resource.take();
        let Some(surface) = surface else {
            return;
        };
        let Some(resource) = self.binding_for(surface) else {
            log::warn!(
                "Client {} has no touch object for surface {}",
                surface.client.id,
                surface.id,
            );
            return;
        };
        self.focus_listener.attach(&surface.destroy_event);
        self.focus.set(Some(surface.clone()));
        self.focus_resource.set(Some(resource));
    }

    pub(super) fn add_binding(&self, obj: &Rc<WlTouch>) {
        self.bindings.add(&obj.seat.client, obj);
    }

    pub(super) fn remove_binding(&self, obj: &WlTouch) {
        self.bindings.remove(&obj.seat.client, obj);
        if let Some(res) = self.focus_resource.get() {
            if std::ptr::eq(&*res, obj) {
                self.focus_resource.take();
            }
        }
    }

    pub(super) fn remove_client(&self, client: ClientId) {
        self.bindings.remove_client(client);
        if let Some(res) = self.focus_resource.get() {
            if res.seat.client.id == client {
                self.focus_resource.take();
            }
        }
    }

    pub(super) fn detach(&self) {
        self.owner.revert_to_default();
        self.focus_listener.detach();
        self.focus.take();
        self.focus_resource.take();
        self.bindings.clear();
        self.seat.take();
    }
}

impl SurfaceDestroyListener for SeatTouch {
    fn surface_destroyed(&self, surface: &Rc<WlSurface>) {
        if self.focus.get().is_some_and(|f| rc_eq(&f, surface)) {
            self.focus_listener.detach();
            self.focus.take();
            self.focus_resource.take();
        }
    }
}
