use {
    crate::backend::KeyState,
    std::{
        cell::{Cell, RefCell},
        rc::Rc,
    },
    uapi::OwnedFd,
};

pub const MODIFIER_CTRL: u32 = 1 << 0;
pub const MODIFIER_ALT: u32 = 1 << 1;
pub const MODIFIER_SUPER: u32 = 1 << 2;
pub const MODIFIER_SHIFT: u32 = 1 << 3;

pub const LED_NUM_LOCK: u32 = 1 << 0;
pub const LED_CAPS_LOCK: u32 = 1 << 1;
pub const LED_SCROLL_LOCK: u32 = 1 << 2;

/// The serialized modifier state as sent in `wl_keyboard.modifiers`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ModifierState {
    pub mods_depressed: u32,
    pub mods_latched: u32,
    pub mods_locked: u32,
    pub group: u32,
}

/// The masks of the modifiers that bindings care about.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ModMasks {
    pub ctrl: u32,
    pub alt: u32,
    pub super_: u32,
    pub shift: u32,
}

impl ModMasks {
    pub fn binding_modifiers(&self, mods: &ModifierState) -> u32 {
        let lookup = mods.mods_depressed | mods.mods_latched;
        let mut res = 0;
        if lookup & self.ctrl != 0 {
            res |= MODIFIER_CTRL;
        }
        if lookup & self.alt != 0 {
            res |= MODIFIER_ALT;
        }
        if lookup & self.super_ != 0 {
            res |= MODIFIER_SUPER;
        }
        if lookup & self.shift != 0 {
            res |= MODIFIER_SHIFT;
        }
        res
    }
}

#[derive(Clone)]
pub struct KeymapFd {
    pub map: Rc<OwnedFd>,
    pub len: usize,
}

/// A compiled keymap.
pub trait Keymap {
    fn fd(&self) -> KeymapFd;
    fn mod_masks(&self) -> ModMasks;
    fn create_state(self: Rc<Self>) -> Box<dyn KeymapState>;
}

/// The mutable key and modifier state of one keyboard.
pub trait KeymapState {
    /// Feeds an evdev key transition into the state machine.
    fn update_key(&mut self, key: u32, state: KeyState);
    /// Overwrites the modifier components, for devices that track them on their own.
    fn update_mask(&mut self, mods: ModifierState);
    fn serialize(&self) -> ModifierState;
    fn leds(&self) -> u32;
}

pub trait LedsListener {
    fn leds_changed(&self, leds: u32);
}

/// The outcome of re-serializing the keymap state.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ModifierUpdate {
    pub mods: ModifierState,
    pub changed: bool,
    pub modifier_state: u32,
    pub leds: u32,
    pub leds_changed: bool,
}

pub struct ModifierAdapter {
    keymap: Rc<dyn Keymap>,
    state: RefCell<Box<dyn KeymapState>>,
    leds: Cell<u32>,
}

impl ModifierAdapter {
    pub fn new(keymap: &Rc<dyn Keymap>) -> Self {
        Self {
            keymap: keymap.clone(),
            state: RefCell::new(keymap.clone().create_state()),
            leds: Cell::new(0),
        }
    }

    pub fn keymap(&self) -> &Rc<dyn Keymap> {
        &self.keymap
    }

    pub fn feed_key(&self, key: u32, state: KeyState) {
        self.state.borrow_mut().update_key(key, state);
    }

    pub fn set_mask(&self, mods: ModifierState) {
        self.state.borrow_mut().update_mask(mods);
    }

    /// Serializes the current state and compares it against `prev`.
    pub fn serialize(&self, prev: &ModifierState) -> ModifierUpdate {
        let state = self.state.borrow();
        let mods = state.serialize();
        let leds = state.leds();
        let prev_leds = self.leds.replace(leds);
        ModifierUpdate {
            mods,
            changed: mods != *prev,
            modifier_state: self.keymap.mod_masks().binding_modifiers(&mods),
            leds,
            leds_changed: leds != prev_leds,
        }
    }

    pub fn update(&self, prev: &ModifierState, key: u32, state: KeyState) -> ModifierUpdate {
        self.feed_key(key, state);
        self.serialize(prev)
    }

    pub fn leds(&self) -> u32 {
        self.leds.get()
    }
}
