mod cursor_sprite;
mod drag_icon;
mod event_handling;
pub mod kb_owner;
pub mod pointer_owner;
pub mod seat_keyboard;
pub mod seat_pointer;
pub mod seat_touch;
pub mod touch_owner;
pub mod wl_keyboard;
pub mod wl_pointer;
pub mod wl_touch;

use {
    crate::{
        client::{Client, ClientId},
        fixed::Fixed,
        ifs::{
            wl_seat::{
                cursor_sprite::CursorSprite,
                drag_icon::DragIcon,
                kb_owner::KeyboardGrab,
                pointer_owner::PointerGrab,
                seat_keyboard::SeatKeyboard,
                seat_pointer::SeatPointer,
                seat_touch::SeatTouch,
                touch_owner::TouchGrab,
                wl_keyboard::{REPEAT_INFO_SINCE, WlKeyboard},
                wl_pointer::WlPointer,
                wl_touch::WlTouch,
            },
            wl_surface::{SurfaceSlot, WlSurface, WlSurfaceError},
        },
        kbvm::KbvmError,
        keyboard::{Keymap, LedsListener, ModifierAdapter},
        object::{Interface, Object, ObjectId},
        state::State,
        utils::{
            bindings::Bindings, clonecell::CloneCell, event_listener::EventSource, rc_eq::rc_eq,
        },
        wire::wl_seat::*,
    },
    std::{
        cell::Cell,
        rc::{Rc, Weak},
    },
    thiserror::Error,
};

linear_ids!(SeatIds, SeatId);

pub const POINTER: u32 = 1;
pub const KEYBOARD: u32 = 2;
pub const TOUCH: u32 = 4;

pub const SEAT_NAME_SINCE: u32 = 2;

/// Notifications about state changes of a seat.
#[derive(Clone)]
pub enum SeatEvent {
    PointerFocusChanged(Option<Rc<WlSurface>>),
    KeyboardFocusChanged(Option<Rc<WlSurface>>),
    CapabilitiesChanged(u32),
    Activate(Rc<WlSurface>),
    Destroyed,
}

pub trait SeatEventListener {
    fn seat_event(&self, seat: &Rc<WlSeatGlobal>, event: &SeatEvent);
}

pub struct WlSeatGlobal {
    pub id: SeatId,
    name: String,
    pub state: Rc<State>,
    pointer: CloneCell<Option<Rc<SeatPointer>>>,
    keyboard: CloneCell<Option<Rc<SeatKeyboard>>>,
    touch: CloneCell<Option<Rc<SeatTouch>>>,
    kb_state: CloneCell<Option<Rc<ModifierAdapter>>>,
    modifier_state: Cell<u32>,
    leds_listener: CloneCell<Option<Rc<dyn LedsListener>>>,
    saved_kbd_focus: Rc<SurfaceSlot>,
    sprite: Rc<CursorSprite>,
    drag_icon: Rc<DragIcon>,
    num_tp: Cell<u32>,
    repeat_rate: Cell<(i32, i32)>,
    bindings: Bindings<WlSeat>,
    pub events: EventSource<dyn SeatEventListener>,
    released: Cell<bool>,
}

impl WlSeatGlobal {
    pub fn new(id: SeatId, name: &str, state: &Rc<State>) -> Rc<Self> {
        Rc::new_cyclic(|slf: &Weak<Self>| Self {
            id,
            name: name.to_string(),
            state: state.clone(),
            pointer: Default::default(),
            keyboard: Default::default(),
            touch: Default::default(),
            kb_state: Default::default(),
            modifier_state: Cell::new(0),
            leds_listener: Default::default(),
            saved_kbd_focus: SurfaceSlot::new(),
            sprite: CursorSprite::new(slf, state.config.cursor_hotspot),
            drag_icon: DragIcon::new(),
            num_tp: Cell::new(0),
            repeat_rate: Cell::new((state.config.repeat_rate, state.config.repeat_delay)),
            bindings: Default::default(),
            events: Default::default(),
            released: Cell::new(false),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capabilities(&self) -> u32 {
        let mut caps = 0;
        if self.pointer.get().is_some() {
            caps |= POINTER;
        }
        if self.keyboard.get().is_some() {
            caps |= KEYBOARD;
        }
        if self.touch.get().is_some() {
            caps |= TOUCH;
        }
        caps
    }

    pub fn pointer(&self) -> Option<Rc<SeatPointer>> {
        self.pointer.get()
    }

    pub fn keyboard(&self) -> Option<Rc<SeatKeyboard>> {
        self.keyboard.get()
    }

    pub fn touch(&self) -> Option<Rc<SeatTouch>> {
        self.touch.get()
    }

    pub fn init_pointer(self: &Rc<Self>) {
        if self.pointer.get().is_some() {
            return;
        }
        let (x, y) = self.state.config.pointer_start;
        if let Err(e) = self.set_pointer(Some(SeatPointer::new(x, y))) {
            log::error!("Could not add a pointer to seat {}: {}", self.id, e);
        }
    }

    pub fn set_pointer(self: &Rc<Self>, pointer: Option<Rc<SeatPointer>>) -> Result<(), SeatError> {
        match pointer {
            Some(pointer) => {
                if self.pointer.get().is_some() {
                    return Err(SeatError::DeviceAlreadyPresent(self.id, "pointer"));
                }
                if let Some(other) = pointer.seat() {
                    return Err(SeatError::DeviceInUse("pointer", other.id));
                }
                pointer.seat.set(Some(Rc::downgrade(self)));
                self.pointer.set(Some(pointer));
            }
            None => {
                let Some(old) = self.pointer.take() else {
                    return Ok(());
                };
                self.sprite.unmap();
                old.detach();
            }
        }
        self.send_updated_caps();
        Ok(())
    }

    /// Adds a keyboard using `keymap` or the configured keymap.
    pub fn init_keyboard(self: &Rc<Self>, keymap: Option<Rc<dyn Keymap>>) -> Result<(), SeatError> {
        if self.keyboard.get().is_some() {
            return Ok(());
        }
        let keymap = match keymap {
            Some(keymap) => keymap,
            None => self.state.default_keymap()?,
        };
        self.kb_state.set(Some(Rc::new(ModifierAdapter::new(&keymap))));
        self.set_keyboard(Some(SeatKeyboard::new()))
    }

    pub fn set_keyboard(self: &Rc<Self>, kb: Option<Rc<SeatKeyboard>>) -> Result<(), SeatError> {
        match kb {
            Some(kb) => {
                if self.keyboard.get().is_some() {
                    return Err(SeatError::DeviceAlreadyPresent(self.id, "keyboard"));
                }
                if let Some(other) = kb.seat() {
                    return Err(SeatError::DeviceInUse("keyboard", other.id));
                }
                if self.kb_state.get().is_none() {
                    let keymap = self.state.default_keymap()?;
                    self.kb_state.set(Some(Rc::new(ModifierAdapter::new(&keymap))));
                }
                kb.seat.set(Some(Rc::downgrade(self)));
                self.keyboard.set(Some(kb));
            }
            None => {
                let Some(old) = self.keyboard.take() else {
                    return Ok(());
                };
                old.detach();
                self.modifier_state.set(0);
            }
        }
        self.send_updated_caps();
        Ok(())
    }

    pub fn init_touch(self: &Rc<Self>) {
        if self.touch.get().is_some() {
            return;
        }
        if let Err(e) = self.set_touch(Some(SeatTouch::new())) {
            log::error!("Could not add a touchscreen to seat {}: {}", self.id, e);
        }
    }

    pub fn set_touch(self: &Rc<Self>, touch: Option<Rc<SeatTouch>>) -> Result<(), SeatError> {
        match touch {
            Some(touch) => {
                if self.touch.get().is_some() {
                    return Err(SeatError::DeviceAlreadyPresent(self.id, "touchscreen"));
                }
                if let Some(other) = touch.seat() {
                    return Err(SeatError::DeviceInUse("touchscreen", other.id));
                }
                touch.seat.set(Some(Rc::downgrade(self)));
                self.touch.set(Some(touch));
            }
            None => {
                let Some(old) = self.touch.take() else {
                    return Ok(());
                };
                old.detach();
                self.num_tp.set(0);
            }
        }
        self.send_updated_caps();
        Ok(())
    }

    pub fn keymap(&self) -> Option<Rc<dyn Keymap>> {
        self.kb_state.get().map(|s| s.keymap().clone())
    }

    /// The ctrl/alt/super/shift bitmask of the depressed and latched modifiers.
    pub fn modifier_state(&self) -> u32 {
        self.modifier_state.get()
    }

    pub fn leds(&self) -> u32 {
        self.kb_state.get().map(|s| s.leds()).unwrap_or_default()
    }

    pub fn set_leds_listener(&self, listener: Option<Rc<dyn LedsListener>>) {
        self.leds_listener.set(listener);
    }

    pub fn repeat_info(&self) -> (i32, i32) {
        self.repeat_rate.get()
    }

    pub fn set_repeat_info(&self, rate: i32, delay: i32) {
        self.repeat_rate.set((rate, delay));
    }

    /// The number of touch points currently down.
    pub fn touch_points(&self) -> u32 {
        self.num_tp.get()
    }

    pub fn saved_keyboard_focus(&self) -> Option<Rc<WlSurface>> {
        self.saved_kbd_focus.get()
    }

    pub fn emit(self: &Rc<Self>, event: SeatEvent) {
        for listener in self.events.iter() {
            listener.seat_event(self, &event);
        }
    }

    fn send_updated_caps(self: &Rc<Self>) {
        let caps = self.capabilities();
        for binding in self.bindings.all() {
            binding.send_capabilities(caps);
        }
        self.emit(SeatEvent::CapabilitiesChanged(caps));
    }

    pub fn set_pointer_focus(self: &Rc<Self>, surface: Option<&Rc<WlSurface>>, x: Fixed, y: Fixed) {
        if let Some(pointer) = self.pointer() {
            pointer.set_focus(self, surface, x, y);
        }
    }

    pub fn set_keyboard_focus(self: &Rc<Self>, surface: Option<&Rc<WlSurface>>) {
        if let Some(kb) = self.keyboard() {
            kb.set_focus(self, surface);
        }
    }

    pub fn activate(self: &Rc<Self>, surface: &Rc<WlSurface>) {
        self.set_keyboard_focus(Some(surface));
        self.emit(SeatEvent::Activate(surface.clone()));
    }

    /// Re-runs the hit-test at the pointer position and lets the active grab
    /// decide whether the focus follows.
    pub fn repick(self: &Rc<Self>) {
        let Some(pointer) = self.pointer() else {
            return;
        };
        let (x, y) = pointer.position();
        let (surface, sx, sy) = match self.state.tree.pick_surface(x, y) {
            Some(found) => (Some(found.surface), found.x, found.y),
            None => (None, Fixed::ZERO, Fixed::ZERO),
        };
        pointer.set_current_position(sx, sy);
        let (current, _, _) = pointer.current();
        let changed = match (&current, &surface) {
            (Some(a), Some(b)) => !rc_eq(a, b),
            (None, None) => false,
            _ => true,
        };
        if changed {
            pointer.set_current(surface.as_ref());
            pointer.owner.get().focus(self, surface.as_ref(), sx, sy);
        }
    }

    pub(crate) fn surface_unmapped(self: &Rc<Self>, surface: &Rc<WlSurface>) {
        if let Some(kb) = self.keyboard()
            && kb.focus().is_some_and(|f| rc_eq(&f, surface))
        {
            kb.set_focus(self, None);
        }
        if let Some(pointer) = self.pointer()
            && pointer.focus().is_some_and(|f| rc_eq(&f, surface))
        {
            pointer.set_focus(self, None, Fixed::ZERO, Fixed::ZERO);
        }
        self.repick();
    }

    pub fn start_pointer_grab(self: &Rc<Self>, grab: Rc<dyn PointerGrab>) {
        let Some(pointer) = self.pointer() else {
            return;
        };
        pointer.owner.set(grab.clone());
        let (current, x, y) = pointer.current();
        if let Some(current) = &current {
            grab.focus(self, Some(current), x, y);
        }
    }

    pub fn end_pointer_grab(self: &Rc<Self>) {
        let Some(pointer) = self.pointer() else {
            return;
        };
        let grab = pointer.owner.revert_to_default();
        let (current, x, y) = pointer.current();
        grab.focus(self, current.as_ref(), x, y);
    }

    pub fn start_keyboard_grab(&self, grab: Rc<dyn KeyboardGrab>) {
        if let Some(kb) = self.keyboard() {
            kb.owner.set(grab);
        }
    }

    pub fn end_keyboard_grab(&self) {
        if let Some(kb) = self.keyboard() {
            kb.owner.revert_to_default();
        }
    }

    pub fn start_touch_grab(&self, grab: Rc<dyn TouchGrab>) {
        if let Some(touch) = self.touch() {
            touch.owner.set(grab);
        }
    }

    pub fn end_touch_grab(&self) {
        if let Some(touch) = self.touch() {
            touch.owner.revert_to_default();
        }
    }

    pub fn cursor(&self) -> Option<Rc<WlSurface>> {
        self.sprite.surface()
    }

    pub fn cursor_hotspot(&self) -> (i32, i32) {
        self.sprite.hotspot()
    }

    pub(super) fn set_cursor(
        &self,
        surface: Option<&Rc<WlSurface>>,
        hotspot_x: i32,
        hotspot_y: i32,
    ) -> Result<(), WlSurfaceError> {
        self.sprite.set(surface, hotspot_x, hotspot_y)
    }

    /// Publishes the icon of a drag that is in progress or `None` once the
    /// drag has ended.
    pub fn set_drag_icon(self: &Rc<Self>, icon: Option<&Rc<WlSurface>>) {
        self.drag_icon.set_pending(icon);
        self.update_drag_surface(Fixed::ZERO, Fixed::ZERO);
    }

    pub fn drag_icon(&self) -> Option<Rc<WlSurface>> {
        self.drag_icon.surface()
    }

    pub fn update_drag_surface(self: &Rc<Self>, dx: Fixed, dy: Fixed) {
        self.drag_icon.update(self, dx, dy);
    }

    pub fn bind(self: &Rc<Self>, client: &Rc<Client>, id: ObjectId, version: u32) -> Rc<WlSeat> {
        let obj = Rc::new(WlSeat {
            id,
            client: client.clone(),
            global: self.clone(),
            version,
        });
        self.bindings.add(client, &obj);
        obj.send_capabilities(self.capabilities());
        if version >= SEAT_NAME_SINCE {
            obj.send_name(&self.name);
        }
        obj
    }

    pub fn remove_client(&self, client: ClientId) {
        self.bindings.remove_client(client);
        if let Some(pointer) = self.pointer() {
            pointer.remove_client(client);
        }
        if let Some(kb) = self.keyboard() {
            kb.remove_client(client);
        }
        if let Some(touch) = self.touch() {
            touch.remove_client(client);
        }
    }

    pub fn release(self: &Rc<Self>) {
        if self.released.replace(true) {
            return;
        }
        log::info!("Releasing seat {}", self.id);
        self.sprite.unmap();
        self.drag_icon.set_pending(None);
        self.drag_icon.release(self);
        if let Some(pointer) = self.pointer.take() {
            pointer.detach();
        }
        if let Some(kb) = self.keyboard.take() {
            kb.detach();
        }
        if let Some(touch) = self.touch.take() {
            touch.detach();
        }
        self.kb_state.take();
        self.saved_kbd_focus.take();
        self.emit(SeatEvent::Destroyed);
        self.bindings.clear();
        self.events.clear();
    }
}

/// The `wl_seat` object of one client.
pub struct WlSeat {
    pub id: ObjectId,
    pub client: Rc<Client>,
    pub global: Rc<WlSeatGlobal>,
    pub version: u32,
}

impl WlSeat {
    fn send_capabilities(&self, capabilities: u32) {
        self.client.event(Capabilities {
            self_id: self.id,
            capabilities,
        })
    }

    fn send_name(&self, name: &str) {
        self.client.event(Name {
            self_id: self.id,
            name: name.to_string(),
        })
    }

    /// Without a pointer the object is inert.
    pub fn get_pointer(self: &Rc<Self>, id: ObjectId) -> Rc<WlPointer> {
        let p = Rc::new(WlPointer::new(id, self));
        if let Some(pointer) = self.global.pointer() {
            pointer.add_binding(&p);
            if let Some(focus) = pointer.focus()
                && focus.client.id == self.client.id
            {
                let (x, y) = pointer.focus_local();
                pointer.set_focus(&self.global, Some(&focus), x, y);
            }
        }
        p
    }

    pub fn get_keyboard(self: &Rc<Self>, id: ObjectId) -> Rc<WlKeyboard> {
        let p = Rc::new(WlKeyboard::new(id, self));
        if let Some(kb) = self.global.keyboard() {
            kb.add_binding(&p);
            if let Some(keymap) = self.global.keymap() {
                p.send_keymap(&keymap.fd());
            }
            if self.version >= REPEAT_INFO_SINCE {
                let (rate, delay) = self.global.repeat_info();
                p.send_repeat_info(rate, delay);
            }
            if let Some(focus) = kb.focus()
                && focus.client.id == self.client.id
            {
                kb.set_focus(&self.global, Some(&focus));
            }
        }
        p
    }

    pub fn get_touch(self: &Rc<Self>, id: ObjectId) -> Rc<WlTouch> {
        let p = Rc::new(WlTouch::new(id, self));
        if let Some(touch) = self.global.touch() {
            touch.add_binding(&p);
        }
        p
    }

    pub fn release(&self) {
        self.global.bindings.remove(&self.client, self);
    }
}

impl Object for WlSeat {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn interface(&self) -> Interface {
        INTERFACE
    }
}

#[derive(Debug, Error)]
pub enum SeatError {
    #[error("Could not load the keymap")]
    KbvmError(#[source] Box<KbvmError>),
    #[error("Seat {0} already has a {1}")]
    DeviceAlreadyPresent(SeatId, &'static str),
    #[error("The {0} already belongs to seat {1}")]
    DeviceInUse(&'static str, SeatId),
}
efrom!(SeatError, KbvmError);
