use {
    crate::{
        client::ClientId,
        ifs::{
            wl_seat::{SeatEvent, WlSeatGlobal, kb_owner::KbOwnerHolder, wl_keyboard::WlKeyboard},
            wl_surface::{SurfaceDestroyListener, WlSurface},
        },
        keyboard::ModifierState,
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

/// The keyboard of a seat.
pub struct SeatKeyboard {
    pub(super) seat: CloneCell<Option<Weak<WlSeatGlobal>>>,
    pub(super) bindings: Bindings<WlKeyboard>,
    pub(super) owner: KbOwnerHolder,
    focus: CloneCell<Option<Rc<WlSurface>>>,
    focus_resource: CloneCell<Option<Rc<WlKeyboard>>>,
    focus_serial: Cell<u32>,
    focus_listener: EventListener<dyn SurfaceDestroyListener>,
    keys: RefCell<VecSet<u32>>,
    modifiers: Cell<ModifierState>,
    grab_key: Cell<u32>,
    grab_time: Cell<u32>,
}

impl SeatKeyboard {
    pub fn new() -> Rc<Self> {
        Rc::new_cyclic(|slf: &Weak<Self>| Self {
            seat: Default::default(),
            bindings: Default::default(),
            owner: Default::default(),
            focus: Default::default(),
            focus_resource: Default::default(),
            focus_serial: Cell::new(0),
            focus_listener: EventListener::new(slf.clone()),
            keys: Default::default(),
            modifiers: Default::default(),
            grab_key: Cell::new(0),
            grab_time: Cell::new(0),
        })
    }

    pub fn seat(&self) -> Option<Rc<WlSeatGlobal>> {
        self.seat.get().and_then(|s| s.upgrade())
    }

    pub fn focus(&self) -> Option<Rc<WlSurface>> {
        self.focus.get()
    }

    pub fn focus_resource(&self) -> Option<Rc<WlKeyboard>> {
        self.focus_resource.get()
    }

    pub fn focus_serial(&self) -> u32 {
        self.focus_serial.get()
    }

    pub fn keys(&self) -> Vec<u32> {
        self.keys.borrow().to_vec()
    }

    pub fn is_pressed(&self, key: u32) -> bool {
        self.keys.borrow().contains(&key)
    }

    pub(super) fn press(&self, key: u32, time: u32) -> bool {
        self.grab_key.set(key);
        self.grab_time.set(time);
        self.keys.borrow_mut().insert(key)
    }

    pub(super) fn release(&self, key: u32) -> bool {
        self.keys.borrow_mut().remove(&key)
    }

    pub(super) fn set_keys(&self, keys: &[u32]) {
        let mut set = self.keys.borrow_mut();
        set.clear();
        set.extend(keys.iter().copied());
    }

    pub(super) fn take_keys(&self) -> Vec<u32> {
        self.keys.borrow_mut().take()
    }

    pub fn modifiers(&self) -> ModifierState {
        self.modifiers.get()
    }

    pub(super) fn set_modifiers(&self, mods: ModifierState) {
        self.modifiers.set(mods);
    }

    pub fn grab_key(&self) -> u32 {
        self.grab_key.get()
    }

    pub fn grab_time(&self) -> u32 {
        self.grab_time.get()
    }

    pub fn binding_for(&self, surface: &WlSurface) -> Option<Rc<WlKeyboard>> {
        find_binding_for_surface(&self.bindings, surface)
    }

    /// Sends the modifiers to the owner of `surface` unless it already has
    /// the keyboard focus.
    pub(super) fn forward_modifiers(&self, surface: &Rc<WlSurface>, serial: u32) {
        if self.focus.get().is_some_and(|f| rc_eq(&f, surface)) {
            return;
        }
        if let Some(res) = self.binding_for(surface) {
            res.send_modifiers(serial, &self.modifiers.get());
        }
    }

    pub fn set_focus(&self, seat: &Rc<WlSeatGlobal>, surface: Option<&Rc<WlSurface>>) {
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
                res.send_modifiers(serial, &self.modifiers.get());
                res.send_enter(serial, surface.id, self.keys());
                self.focus_serial.set(serial);
            }
        }
        self.focus_resource.set(resource);
        self.focus.set(surface.cloned());
        seat.emit(SeatEvent::KeyboardFocusChanged(surface.cloned()));
    }

    pub(super) fn add_binding(&self, obj: &Rc<WlKeyboard>) {
        self.bindings.add(&obj.seat.client, obj);
    }

    pub(super) fn remove_binding(&self, obj: &WlKeyboard) {
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
        self.keys.borrow_mut().clear();
        self.seat.take();
    }
}

impl SurfaceDestroyListener for SeatKeyboard {
    fn surface_destroyed(&self, surface: &Rc<WlSurface>) {
        if self.focus.get().is_some_and(|f| rc_eq(&f, surface)) {
            self.focus_listener.detach();
            self.focus.take();
            self.focus_resource.take();
            if let Some(seat) = self.seat() {
                seat.emit(SeatEvent::KeyboardFocusChanged(None));
            }
        }
    }
}
