use {
    crate::{
        backend::KeyState,
        fixed::Fixed,
        ifs::{wl_seat::WlSeatGlobal, wl_surface::WlSurface},
        utils::clonecell::CloneCell,
    },
    std::rc::Rc,
};

/// Overrides the routing of pointer events while installed.
///
/// Coordinates passed to `motion` are local to the pointer focus, or global
/// if nothing is focused.
pub trait PointerGrab {
    fn focus(&self, seat: &Rc<WlSeatGlobal>, surface: Option<&Rc<WlSurface>>, x: Fixed, y: Fixed);
    fn motion(&self, seat: &Rc<WlSeatGlobal>, time: u32, x: Fixed, y: Fixed);
    fn button(&self, seat: &Rc<WlSeatGlobal>, time: u32, button: u32, state: KeyState);
}

pub struct PointerOwnerHolder {
    default: Rc<DefaultPointerGrab>,
    owner: CloneCell<Rc<dyn PointerGrab>>,
}

impl Default for PointerOwnerHolder {
    fn default() -> Self {
        let default = Rc::new(DefaultPointerGrab);
        Self {
            owner: CloneCell::new(default.clone()),
            default,
        }
    }
}

impl PointerOwnerHolder {
    pub fn get(&self) -> Rc<dyn PointerGrab> {
        self.owner.get()
    }

    pub fn is_default(&self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.owner.get()), Rc::as_ptr(&self.default))
    }

    pub fn set(&self, grab: Rc<dyn PointerGrab>) {
        self.owner.set(grab);
    }

    pub fn revert_to_default(&self) -> Rc<dyn PointerGrab> {
        self.owner.set(self.default.clone());
        self.default.clone()
    }
}

struct DefaultPointerGrab;

impl PointerGrab for DefaultPointerGrab {
    fn focus(&self, seat: &Rc<WlSeatGlobal>, surface: Option<&Rc<WlSurface>>, x: Fixed, y: Fixed) {
        let Some(pointer) = seat.pointer() else {
            return;
        };
        if pointer.button_count() > 0 {
            return;
        }
        pointer.set_focus(seat, surface, x, y);
    }

    fn motion(&self, seat: &Rc<WlSeatGlobal>, time: u32, x: Fixed, y: Fixed) {
        let Some(pointer) = seat.pointer() else {
            return;
        };
        if let Some(res) = pointer.focus_resource() {
            res.send_motion(time, x, y);
        }
    }

    fn button(&self, seat: &Rc<WlSeatGlobal>, time: u32, button: u32, state: KeyState) {
        let Some(pointer) = seat.pointer() else {
            return;
        };
        if let Some(res) = pointer.focus_resource() {
            let serial = seat.state.serials.next();
            res.send_button(serial, time, button, state.wire());
        }
        if pointer.button_count() == 0 && state == KeyState::Released {
            let (current, x, y) = pointer.current();
            pointer.set_focus(seat, current.as_ref(), x, y);
        }
    }
}
