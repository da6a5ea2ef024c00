use {
    crate::{
        backend::{InputEvent, KeyState, KeyStateUpdate, ScrollAxis, TouchKind},
        fixed::Fixed,
        ifs::wl_seat::{WlSeatGlobal, seat_pointer::SeatPointer},
        keyboard::ModifierState,
    },
    isnt::std_1::primitive::IsntSliceExt,
    std::rc::Rc,
};

impl WlSeatGlobal {
    pub fn event(self: &Rc<Self>, event: InputEvent) {
        match event {
            InputEvent::Motion { time, dx, dy } => self.notify_motion(time, dx, dy),
            InputEvent::MotionAbsolute { time, x, y } => self.notify_motion_absolute(time, x, y),
            InputEvent::Button {
                time,
                button,
                state,
            } => self.notify_button(time, button, state),
            InputEvent::Axis { time, axis, value } => self.notify_axis(time, axis, value),
            InputEvent::Key {
                time,
                key,
                state,
                update,
            } => self.notify_key(time, key, state, update),
            InputEvent::Touch {
                time,
                id,
                x,
                y,
                kind,
            } => self.notify_touch(time, id, x, y, kind),
            InputEvent::PointerFocus { output, x, y } => self.notify_pointer_focus(output, x, y),
            InputEvent::KeyboardFocusIn { keys, update } => {
                self.notify_keyboard_focus_in(&keys, update)
            }
            InputEvent::KeyboardFocusOut => self.notify_keyboard_focus_out(),
        }
    }

    fn move_pointer(self: &Rc<Self>, pointer: &Rc<SeatPointer>, x: Fixed, y: Fixed) {
        let old = pointer.position();
        let (x, y) = self.state.clip_motion(old, (x, y));
        self.update_drag_surface(x - old.0, y - old.1);
        pointer.set_position(x, y);
        self.repick();
        self.sprite.follow(x, y);
    }

    fn pointer_motion(self: &Rc<Self>, pointer: &Rc<SeatPointer>, time: u32, x: Fixed, y: Fixed) {
        self.state.idle().wake();
        self.move_pointer(pointer, x, y);
        let (x, y) = pointer.focus_local();
        pointer.owner.get().motion(self, time, x, y);
    }

    pub fn notify_motion(self: &Rc<Self>, time: u32, dx: Fixed, dy: Fixed) {
        let Some(pointer) = self.pointer() else {
            return;
        };
        let (x, y) = pointer.position();
        self.pointer_motion(&pointer, time, x + dx, y + dy);
    }

    pub fn notify_motion_absolute(self: &Rc<Self>, time: u32, x: Fixed, y: Fixed) {
        let Some(pointer) = self.pointer() else {
            return;
        };
        self.pointer_motion(&pointer, time, x, y);
    }

    pub fn notify_button(self: &Rc<Self>, time: u32, button: u32, state: KeyState) {
        let Some(pointer) = self.pointer() else {
            return;
        };
        let serial = self.state.serials.next();
        match state {
            KeyState::Pressed => {
                if !pointer.press(button, time) {
                    log::debug!("Ignoring press of button {} that is already down", button);
                    return;
                }
                if let Some(focus) = pointer.focus() {
                    self.state.ping(&focus, serial);
                }
                self.state.idle().inhibit();
            }
            KeyState::Released => {
                if !pointer.release(button) {
                    log::debug!("Ignoring release of button {} that is not down", button);
                    return;
                }
                self.state.idle().release();
            }
        }
        let consumed = match self.state.input_bindings.get() {
            Some(b) => b.button(self, time, button, state),
            None => false,
        };
        if !consumed || !pointer.owner.is_default() {
            pointer.owner.get().button(self, time, button, state);
        }
        if pointer.button_count() == 1 {
            pointer.set_grab_serial(self.state.serials.last());
        }
    }

    pub fn notify_axis(self: &Rc<Self>, time: u32, axis: ScrollAxis, value: Fixed) {
        let Some(pointer) = self.pointer() else {
            return;
        };
        if let Some(focus) = pointer.focus() {
            let serial = self.state.serials.next();
            self.state.ping(&focus, serial);
        }
        self.state.idle().wake();
        if value == Fixed::ZERO {
            return;
        }
        if let Some(b) = self.state.input_bindings.get()
            && b.axis(self, time, axis, value)
        {
            return;
        }
        if let Some(res) = pointer.focus_resource() {
            res.send_axis(time, axis as u32, value);
        }
    }

    pub fn notify_key(
        self: &Rc<Self>,
        time: u32,
        key: u32,
        state: KeyState,
        update: KeyStateUpdate,
    ) {
        let Some(kb) = self.keyboard() else {
            return;
        };
        let serial = self.state.serials.next();
        let filtered = kb.owner.filters_keys();
        let changed = match state {
            KeyState::Pressed => kb.press(key, time),
            KeyState::Released => kb.release(key),
        };
        if changed {
            match state {
                KeyState::Pressed => {
                    if let Some(focus) = kb.focus() {
                        self.state.ping(&focus, serial);
                    }
                    self.state.idle().inhibit();
                }
                KeyState::Released => self.state.idle().release(),
            }
        } else if filtered {
            return;
        }
        let mut grab = kb.owner.get();
        if filtered {
            if let Some(b) = self.state.input_bindings.get()
                && b.key(self, time, key, state)
            {
                if update == KeyStateUpdate::Automatic {
                    self.update_modifier_state(self.state.serials.last(), key, state);
                }
                return;
            }
            grab = kb.owner.get();
        }
        grab.key(self, time, key, state);
        if update == KeyStateUpdate::Automatic {
            self.update_modifier_state(self.state.serials.last(), key, state);
        }
    }

    fn update_modifier_state(self: &Rc<Self>, serial: u32, key: u32, state: KeyState) {
        if let Some(kb_state) = self.kb_state.get() {
            kb_state.feed_key(key, state);
        }
        self.notify_modifiers(serial);
    }

    /// Overwrites the modifier components, for devices that do their own
    /// modifier tracking.
    pub fn notify_modifier_mask(self: &Rc<Self>, serial: u32, mods: ModifierState) {
        if let Some(kb_state) = self.kb_state.get() {
            kb_state.set_mask(mods);
        }
        self.notify_modifiers(serial);
    }

    /// Re-serializes the keymap state and forwards changes to the keyboard
    /// grab.
    pub fn notify_modifiers(self: &Rc<Self>, serial: u32) {
        let (Some(kb), Some(kb_state)) = (self.keyboard(), self.kb_state.get()) else {
            return;
        };
        let update = kb_state.serialize(&kb.modifiers());
        kb.set_modifiers(update.mods);
        self.modifier_state.set(update.modifier_state);
        if update.leds_changed
            && let Some(listener) = self.leds_listener.get()
        {
            listener.leds_changed(update.leds);
        }
        if update.changed {
            kb.owner.get().modifiers(self, serial, update.mods);
        }
    }

    pub fn notify_pointer_focus(self: &Rc<Self>, output: Option<usize>, x: Fixed, y: Fixed) {
        match output {
            Some(_) => {
                if let Some(pointer) = self.pointer() {
                    self.move_pointer(&pointer, x, y);
                }
                self.state.focus.set(true);
            }
            None => self.state.focus.set(false),
        }
    }

    /// `keys` are the keys that are down at the time the focus is regained.
    pub fn notify_keyboard_focus_in(self: &Rc<Self>, keys: &[u32], update: KeyStateUpdate) {
        let Some(kb) = self.keyboard() else {
            return;
        };
        let serial = self.state.serials.next();
        kb.set_keys(keys);
        let keys = kb.keys();
        for &key in &keys {
            self.state.idle().inhibit();
            if update == KeyStateUpdate::Automatic {
                self.update_modifier_state(serial, key, KeyState::Pressed);
            }
        }
        if keys.is_not_empty()
            && let Some(b) = self.state.input_bindings.get()
        {
            for &key in &keys {
                b.key(self, 0, key, KeyState::Pressed);
            }
        }
        if let Some(surface) = self.saved_kbd_focus.take() {
            kb.set_focus(self, Some(&surface));
        }
    }

    pub fn notify_keyboard_focus_out(self: &Rc<Self>) {
        let Some(kb) = self.keyboard() else {
            return;
        };
        let serial = self.state.serials.next();
        for key in kb.take_keys() {
            self.state.idle().release();
            self.update_modifier_state(serial, key, KeyState::Released);
        }
        self.modifier_state.set(0);
        if let Some(focus) = kb.focus() {
            self.saved_kbd_focus.set(Some(&focus));
        }
        kb.set_focus(self, None);
        if !kb.owner.is_default() {
            kb.owner.get().cancel(self);
            kb.owner.revert_to_default();
        }
    }

    pub fn notify_touch(
        self: &Rc<Self>,
        time: u32,
        id: i32,
        x: Fixed,
        y: Fixed,
        kind: TouchKind,
    ) {
        let Some(touch) = self.touch() else {
            return;
        };
        touch.set_grab_position(x, y);
        match kind {
            TouchKind::Down => {
                self.state.idle().inhibit();
                let num_tp = self.num_tp.get() + 1;
                self.num_tp.set(num_tp);
                let (sx, sy) = if num_tp == 1 {
                    let found = self.state.tree.pick_surface(x, y);
                    touch.set_focus(found.as_ref().map(|f| &f.surface));
                    match found {
                        Some(f) => (f.x, f.y),
                        None => (x, y),
                    }
                } else if let Some(focus) = touch.focus() {
                    focus.from_global(x, y)
                } else {
                    log::warn!(
                        "Touch down with {} points down but no surface focused",
                        num_tp,
                    );
                    return;
                };
                touch.owner.get().down(self, time, id, sx, sy);
            }
            TouchKind::Motion => {
                let Some(focus) = touch.focus() else {
                    log::debug!("Dropping motion of touch point {} without touch focus", id);
                    return;
                };
                let (sx, sy) = focus.from_global(x, y);
                touch.owner.get().motion(self, time, id, sx, sy);
            }
            TouchKind::Up => {
                let num_tp = self.num_tp.get();
                if num_tp == 0 {
                    log::warn!("Touch up for point {} without touch points down", id);
                    return;
                }
                self.state.idle().release();
                self.num_tp.set(num_tp - 1);
                touch.owner.get().up(self, time, id);
                if num_tp == 1 {
                    touch.set_focus(None);
                }
            }
        }
    }
}
