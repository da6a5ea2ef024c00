use {
    crate::{
        backend::KeyState,
        it::test_error::TestResult,
        keyboard::{Keymap, KeymapFd, KeymapState, LED_CAPS_LOCK, ModMasks, ModifierState},
    },
    std::{io::Write, rc::Rc},
    uapi::c,
};

pub const BTN_LEFT: u32 = 0x110;
pub const BTN_RIGHT: u32 = 0x111;

pub const KEY_ESC: u32 = 1;
pub const KEY_A: u32 = 30;
pub const KEY_S: u32 = 31;
pub const KEY_LEFTCTRL: u32 = 29;
pub const KEY_LEFTSHIFT: u32 = 42;
pub const KEY_CAPSLOCK: u32 = 58;

pub const SHIFT_MASK: u32 = 1;
pub const LOCK_MASK: u32 = 2;
pub const CONTROL_MASK: u32 = 4;

/// A keymap with hard-wired shift, control and caps lock keys.
pub struct TestKeymap {
    fd: KeymapFd,
}

impl TestKeymap {
    pub fn new() -> TestResult<Rc<Self>> {
        let text = b"xkb_keymap { };\n\0";
        let mut memfd = uapi::memfd_create("test-keymap", c::MFD_CLOEXEC)?;
        memfd.write_all(text)?;
        Ok(Rc::new(Self {
            fd: KeymapFd {
                map: Rc::new(memfd),
                len: text.len(),
            },
        }))
    }
}

impl Keymap for TestKeymap {
    fn fd(&self) -> KeymapFd {
        self.fd.clone()
    }

    fn mod_masks(&self) -> ModMasks {
        ModMasks {
            ctrl: CONTROL_MASK,
            alt: 0,
            super_: 0,
            shift: SHIFT_MASK,
        }
    }

    fn create_state(self: Rc<Self>) -> Box<dyn KeymapState> {
        Box::new(TestKeymapState::default())
    }
}

#[derive(Default)]
struct TestKeymapState {
    mods: ModifierState,
}

impl KeymapState for TestKeymapState {
    fn update_key(&mut self, key: u32, state: KeyState) {
        let mask = match key {
            KEY_LEFTCTRL => CONTROL_MASK,
            KEY_LEFTSHIFT => SHIFT_MASK,
            KEY_CAPSLOCK => {
                if state == KeyState::Pressed {
                    self.mods.mods_locked ^= LOCK_MASK;
                }
                return;
            }
            _ => return,
        };
        match state {
            KeyState::Pressed => self.mods.mods_depressed |= mask,
            KeyState::Released => self.mods.mods_depressed &= !mask,
        }
    }

    fn update_mask(&mut self, mods: ModifierState) {
        self.mods = mods;
    }

    fn serialize(&self) -> ModifierState {
        self.mods
    }

    fn leds(&self) -> u32 {
        match self.mods.mods_locked & LOCK_MASK {
            0 => 0,
            _ => LED_CAPS_LOCK,
        }
    }
}
