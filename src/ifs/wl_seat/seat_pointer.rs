use {
    crate::{
        client::ClientId,
        fixed::Fixed,
        ifs::{
            wl_seat::{SeatEvent, WlSeatGlobal, pointer_owner::PointerOwnerHolder, wl_pointer::WlPointer},
            wl_surface::{SurfaceDestroyListener, WlSurface},
        },
        tree::find_binding_for_surface,
        utils::{
            bindings::Bindings,
            clonecell::CloneCell,
            event_listener::EventListener,
            rc_eq::{opt_rc_eq, rc_eq},
            vecset::VecSet,
        },
    },
    std::{
        cell::{Cell, RefCell},
        rc::{Rc, Weak},
    },
};

/// The pointer of a seat.
pub struct SeatPointer {
    pub(super) seat: CloneCell<Option<Weak<WlSeatGlobal>>>,
    pub(super) bindings: Bindings<WlPointer>,
    pub(super) owner: PointerOwnerHolder,
    focus: CloneCell<Option<Rc<WlSurface>>>,
    focus_resource: CloneCell<Option<Rc<WlPointer>>>,
    focus_serial: Cell<u32>,
    focus_listener: EventListener<dyn SurfaceDestroyListener>,
    current: CloneCell<Option<Rc<WlSurface>>>,
    current_x: Cell<Fixed>,
    current_y: Cell<Fixed>,
    current_listener: EventListener<dyn SurfaceDestroyListener>,
    x: Cell<Fixed>,
    y: Cell<Fixed>,
    buttons: RefCell<VecSet<u32>>,
    grab_button: Cell<u32>,
    grab_time: Cell<u32>,
    grab_x: Cell<Fixed>,
    grab_y: Cell<Fixed>,
    grab_serial: Cell<u32>,
}

impl SeatPointer {
    pub fn new(x: i32, y: i32) -> Rc<Self> {
        Rc::new_cyclic(|slf: &Weak<Self>| Self {
            seat: Default::default(),
            bindings: Default::default(),
            owner: Default::default(),
            focus: Default::default(),
            focus_resource: Default::default(),
            focus_serial: Cell::new(0),
            focus_listener: EventListener::new(slf.clone()),
            current: Default::default(),
            current_x: Default::default(),
            current_y: Default::default(),
            current_listener: EventListener::new(slf.clone()),
            x: Cell::new(Fixed::from_int(x)),
            y: Cell::new(Fixed::from_int(y)),
            buttons: Default::default(),
            grab_button: Cell::new(0),
            grab_time: Cell::new(0),
            grab_x: Default::default(),
            grab_y: Default::default(),
            grab_serial: Cell::new(0),
        })
    }

    pub fn seat(&self) -> Option<Rc<WlSeatGlobal>> {
        self.seat.get().and_then(|s| s.upgrade())
    }

    pub fn position(&self) -> (Fixed, Fixed) {
        (self.x.get(), self.y.get())
    }

    pub(super) fn set_position(&self, x: Fixed, y: Fixed) {
        self.x.set(x);
        self.y.set(y);
    }

    pub fn focus(&self) -> Option<Rc<WlSurface>> {
        self.focus.get()
    }

    pub fn focus_resource(&self) -> Option<Rc<WlPointer>> {
        self.focus_resource.get()
    }

    pub fn focus_serial(&self) -> u32 {
        self.focus_serial.get()
    }

    /// The pointer position relative to the focus.
    pub fn focus_local(&self) -> (Fixed, Fixed) {
        match self.focus.get() {
            Some(focus) => focus.from_global(self.x.get(), self.y.get()),
            None => self.position(),
        }
    }

    /// The surface physically below the pointer.
    pub fn current(&self) -> (Option<Rc<WlSurface>>, Fixed, Fixed) {
        (self.current.get(), self.current_x.get(), self.current_y.get())
    }

    pub(super) fn set_current(&self, surface: Option<&Rc<WlSurface>>) {
        self.current_listener.detach();
        if let Some(surface) = surface {
            self.current_listener.attach(&surface.destroy_event);
        }
        self.current.set(surface.cloned());
    }

    pub(super) fn set_current_position(&self, x: Fixed, y: Fixed) {
        self.current_x.set(x);
        self.current_y.set(y);
    }

    pub fn button_count(&self) -> u32 {
        self.buttons.borrow().len() as u32
    }

    pub fn is_pressed(&self, button: u32) -> bool {
        self.buttons.borrow().contains(&button)
    }

    /// Returns false if the button is already down.
    pub(super) fn press(&self, button: u32, time: u32) -> bool {
        let mut buttons = self.buttons.borrow_mut();
        if buttons.contains(&button) {
            return false;
        }
        if buttons.is_empty() {
            self.grab_button.set(button);
            self.grab_time.set(time);
            self.grab_x.set(self.x.get());
            self.grab_y.set(self.y.get());
        }
        buttons.insert(button)
    }

    /// Returns false if the button is not down.
    pub(super) fn release(&self, button: u32) -> bool {
        self.buttons.borrow_mut().remove(&button)
    }

    pub fn grab_button(&self) -> u32 {
        self.grab_button.get()
    }

    pub fn grab_time(&self) -> u32 {
        self.grab_time.get()
    }

    pub fn grab_position(&self) -> (Fixed, Fixed) {
        (self.grab_x.get(), self.grab_y.get())
    }

    pub fn grab_serial(&self) -> u32 {
        self.grab_serial.get()
    }

    pub(super) fn set_grab_serial(&self, serial: u32) {
        self.grab_serial.set(serial);
    }

    pub fn binding_for(&self, surface: &WlSurface) -> Option<Rc<WlPointer>> {
        find_binding_for_surface(&self.bindings, surface)
    }

    pub fn set_focus(
        &self,
        seat: &Rc<WlSeatGlobal>,
        surface: Option<&Rc<WlSurface>>,
        sx: Fixed,
        sy: Fixed,
    ) {
        let old = self.focus.get();
        let surface_changed = !opt_rc_eq(&old, &surface.cloned());
        if surface_changed {
            if let (Some(res), Some(old)) = (self.focus_resource.get(), &old) {
                let serial = seat.state.serials.next();
                res.send_leave(serial, old.id);
            }
            self.focus_listener.detach();
            if let Some(surface) = surface {
                self.focus_listener.attach(&surface.destroy_event);
            }
        }
        let resource = surface.and_then(|s| self.binding_for(s));
        if let (Some(res), Some(surface)) = (&resource, surface) {
            let resource_changed = match self.focus_resource.get() {
                Some(old) => !rc_eq(&old, res),
                None => true,
            };
            if surface_changed || resource_changed {
                let serial = seat.state.serials.next();
                if let Some(kb) = seat.keyboard() {
                    kb.forward_modifiers(surface, serial);
                }
                res.send_enter(serial, surface.id, sx, sy);
                self.focus_serial.set(serial);
            }
        }
        self.focus_resource.set(resource);
        self.focus.set(surface.cloned());
        seat.emit(SeatEvent::PointerFocusChanged(surface.cloned()));
    }

    pub(super) fn add_binding(&self, obj: &Rc<WlPointer>) {
        self.bindings.add(&obj.seat.client, obj);
    }

    pub(super) fn remove_binding(&self, obj: &WlPointer) {
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

    /// Drops all references without notifying clients.
    pub(super) fn detach(&self) {
        self.owner.revert_to_default();
        self.focus_listener.detach();
        self.current_listener.detach();
        self.focus.take();
        self.focus_resource.take();
        self.current.take();
        self.bindings.clear();
        self.buttons.borrow_mut().clear();
        self.seat.take();
    }
}

impl SurfaceDestroyListener for SeatPointer {
    fn surface_destroyed(&self, surface: &Rc<WlSurface>) {
        if self.current.get().is_some_and(|c| rc_eq(&c, surface)) {
            self.current_listener.detach();
            self.current.take();
        }
        if self.focus.get().is_some_and(|f| rc_eq(&f, surface)) {
            self.focus_listener.detach();
            self.focus.take();
            self.focus_resource.take();
            if let Some(seat) = self.seat() {
                seat.emit(SeatEvent::PointerFocusChanged(None));
            }
        }
    }
}
