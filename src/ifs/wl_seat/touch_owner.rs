use {
    crate::{
        fixed::Fixed,
        ifs::wl_seat::WlSeatGlobal,
        utils::clonecell::CloneCell,
    },
    std::rc::Rc,
};

/// Overrides the routing of touch events while installed.
///
/// Coordinates are local to the touch focus of the session.
pub trait TouchGrab {
    fn down(&self, seat: &Rc<WlSeatGlobal>, time: u32, id: i32, x: Fixed, y: Fixed);
    fn up(&self, seat: &Rc<WlSeatGlobal>, time: u32, id: i32);
    fn motion(&self, seat: &Rc<WlSeatGlobal>, time: u32, id: i32, x: Fixed, y: Fixed);
}

pub struct TouchOwnerHolder {
    default: Rc<DefaultTouchGrab>,
    owner: CloneCell<Rc<dyn TouchGrab>>,
}

impl Default for TouchOwnerHolder {
    fn default() -> Self {
        let default = Rc::new(DefaultTouchGrab);
        Self {
            owner: CloneCell::new(default.clone()),
            default,
        }
    }
}

impl TouchOwnerHolder {
    pub fn get(&self) -> Rc<dyn TouchGrab> {
        self.owner.get()
    }

    pub fn is_default(&self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.owner.get()), Rc::as_ptr(&self.default))
    }

    pub fn set(&self, grab: Rc<dyn TouchGrab>) {
        self.owner.set(grab);
    }

    pub fn revert_to_default(&self) {
        self.owner.set(self.default.clone());
    }
}

struct DefaultTouchGrab;

impl TouchGrab for DefaultTouchGrab {
    fn down(&self, seat: &Rc<WlSeatGlobal>, time: u32, id: i32, x: Fixed, y: Fixed) {
        let Some(touch) = seat.touch() else {
            return;
        };
        let (Some(res), Some(focus)) = (touch.focus_resource(), touch.focus()) else {
            return;
        };
        let serial = seat.state.serials.next();
        res.send_down(serial, time, focus.id, id, x, y);
    }

    fn up(&self, seat: &Rc<WlSeatGlobal>, time: u32, id: i32) {
        let Some(touch) = seat.touch() else {
            return;
        };
        if let Some(res) = touch.focus_resource() {
            let serial = seat.state.serials.next();
            res.send_up(serial, time, id);
        }
    }

    fn motion(&self, seat: &Rc<WlSeatGlobal>, time: u32, id: i32, x: Fixed, y: Fixed) {
        let Some(touch) = seat.touch() else {
            return;
        };
        if let Some(res) = touch.focus_resource() {
            res.send_motion(time, id, x, y);
        }
    }
}
