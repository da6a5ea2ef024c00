use {
    crate::{
        ifs::wl_seat::WlSeat,
        keyboard::{KeymapFd, ModifierState},
        object::{Interface, Object, ObjectId},
        wire::wl_keyboard::*,
    },
    std::rc::Rc,
};

pub const NO_KEYMAP: u32 = 0;
pub const XKB_V1: u32 = 1;

pub const REPEAT_INFO_SINCE: u32 = 4;

pub struct WlKeyboard {
    pub id: ObjectId,
    pub seat: Rc<WlSeat>,
}

impl WlKeyboard {
    pub fn new(id: ObjectId, seat: &Rc<WlSeat>) -> Self {
        Self {
            id,
            seat: seat.clone(),
        }
    }

    pub fn send_keymap(&self, keymap: &KeymapFd) {
        self.seat.client.event(Keymap {
            self_id: self.id,
            format: XKB_V1,
            fd: keymap.map.clone(),
            size: keymap.len as u32,
        })
    }

    pub fn send_enter(&self, serial: u32, surface: ObjectId, keys: Vec<u32>) {
        self.seat.client.event(Enter {
            self_id: self.id,
            serial,
            surface,
            keys,
        })
    }

    pub fn send_leave(&self, serial: u32, surface: ObjectId) {
        self.seat.client.event(Leave {
            self_id: self.id,
            serial,
            surface,
        })
    }

    pub fn send_key(&self, serial: u32, time: u32, key: u32, state: u32) {
        self.seat.client.event(Key {
            self_id: self.id,
            serial,
            time,
            key,
            state,
        })
    }

    pub fn send_modifiers(&self, serial: u32, mods: &ModifierState) {
        self.seat.client.event(Modifiers {
            self_id: self.id,
            serial,
            mods_depressed: mods.mods_depressed,
            mods_latched: mods.mods_latched,
            mods_locked: mods.mods_locked,
            group: mods.group,
        })
    }

    pub fn send_repeat_info(&self, rate: i32, delay: i32) {
        self.seat.client.event(RepeatInfo {
            self_id: self.id,
            rate,
            delay,
        })
    }

    pub fn release(&self) {
        if let Some(kb) = self.seat.global.keyboard() {
            kb.remove_binding(self);
        }
    }
}

impl Object for WlKeyboard {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn interface(&self) -> Interface {
        INTERFACE
    }
}
