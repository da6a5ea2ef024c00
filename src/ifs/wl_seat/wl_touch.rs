use {
    crate::{
        fixed::Fixed,
        ifs::wl_seat::WlSeat,
        object::{Interface, Object, ObjectId},
        wire::wl_touch::*,
    },
    std::rc::Rc,
};

pub struct WlTouch {
    pub id: ObjectId,
    pub seat: Rc<WlSeat>,
}

impl WlTouch {
    pub fn new(id: ObjectId, seat: &Rc<WlSeat>) -> Self {
        Self {
            id,
            seat: seat.clone(),
        }
    }

    pub fn send_down(&self, serial: u32, time: u32, surface: ObjectId, id: i32, x: Fixed, y: Fixed) {
        self.seat.client.event(Down {
            self_id: self.id,
            serial,
            time,
            surface,
            id,
            x,
            y,
        })
    }

    pub fn send_up(&self, serial: u32, time: u32, id: i32) {
        self.seat.client.event(Up {
            self_id: self.id,
            serial,
            time,
            id,
        })
    }

    pub fn send_motion(&self, time: u32, id: i32, x: Fixed, y: Fixed) {
        self.seat.client.event(Motion {
            self_id: self.id,
            time,
            id,
            x,
            y,
        })
    }

    pub fn release(&self) {
        if let Some(touch) = self.seat.global.touch() {
            touch.remove_binding(self);
        }
    }
}

impl Object for WlTouch {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn interface(&self) -> Interface {
        INTERFACE
    }
}
