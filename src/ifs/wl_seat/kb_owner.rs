use {
    crate::{
        backend::KeyState,
        ifs::wl_seat::WlSeatGlobal,
        keyboard::ModifierState,
        utils::{clonecell::CloneCell, rc_eq::rc_eq},
    },
    std::rc::Rc,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum GrabKind {
    Default,
    InputMethod,
    Custom,
}

/// Overrides the routing of keyboard events while installed.
pub trait KeyboardGrab {
    fn kind(&self) -> GrabKind {
        GrabKind::Custom
    }
    fn key(&self, seat: &Rc<WlSeatGlobal>, time: u32, key: u32, state: KeyState);
    fn modifiers(&self, seat: &Rc<WlSeatGlobal>, serial: u32, mods: ModifierState);
    /// Called when the grab is ended by the seat instead of its owner.
    fn cancel(&self, seat: &Rc<WlSeatGlobal>) {
        let _ = seat;
    }
}

pub struct KbOwnerHolder {
    default: Rc<DefaultKeyboardGrab>,
    owner: CloneCell<Rc<dyn KeyboardGrab>>,
}

impl Default for KbOwnerHolder {
    fn default() -> Self {
        let default = Rc::new(DefaultKeyboardGrab);
        Self {
            owner: CloneCell::new(default.clone()),
            default,
        }
    }
}

impl KbOwnerHolder {
    pub fn get(&self) -> Rc<dyn KeyboardGrab> {
        self.owner.get()
    }

    pub fn is_default(&self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.owner.get()), Rc::as_ptr(&self.default))
    }

    /// Whether raw key events are filtered and offered to the bindings first.
    pub fn filters_keys(&self) -> bool {
        matches!(self.owner.get().kind(), GrabKind::Default | GrabKind::InputMethod)
    }

    pub fn set(&self, grab: Rc<dyn KeyboardGrab>) {
        self.owner.set(grab);
    }

    pub fn revert_to_default(&self) {
        self.owner.set(self.default.clone());
    }
}

struct DefaultKeyboardGrab;

impl KeyboardGrab for DefaultKeyboardGrab {
    fn kind(&self) -> GrabKind {
        GrabKind::Default
    }

    fn key(&self, seat: &Rc<WlSeatGlobal>, time: u32, key: u32, state: KeyState) {
        let Some(kb) = seat.keyboard() else {
            return;
        };
        if let Some(res) = kb.focus_resource() {
            let serial = seat.state.serials.next();
            res.send_key(serial, time, key, state.wire());
        }
    }

    fn modifiers(&self, seat: &Rc<WlSeatGlobal>, serial: u32, mods: ModifierState) {
        let Some(kb) = seat.keyboard() else {
            return;
        };
        let Some(res) = kb.focus_resource() else {
            return;
        };
        res.send_modifiers(serial, &mods);
        let Some(pointer) = seat.pointer() else {
            return;
        };
        let Some(pointer_focus) = pointer.focus() else {
            return;
        };
        if let Some(kb_focus) = kb.focus() {
            if rc_eq(&kb_focus, &pointer_focus) {
                return;
            }
        }
        if let Some(pr) = kb.binding_for(&pointer_focus) {
            if !rc_eq(&pr, &res) {
                pr.send_modifiers(serial, &mods);
            }
        }
    }
}
