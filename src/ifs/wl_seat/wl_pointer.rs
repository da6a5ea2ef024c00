use {
    crate::{
        fixed::Fixed,
        ifs::{
            wl_seat::WlSeat,
            wl_surface::{WlSurface, WlSurfaceError},
        },
        object::{INVALID_OBJECT, Interface, Object, ObjectId},
        utils::errorfmt::ErrorFmt,
        wire::wl_pointer::*,
    },
    std::rc::Rc,
    thiserror::Error,
};

pub const RELEASED: u32 = 0;
pub const PRESSED: u32 = 1;

pub struct WlPointer {
    pub id: ObjectId,
    pub seat: Rc<WlSeat>,
}

impl WlPointer {
    pub fn new(id: ObjectId, seat: &Rc<WlSeat>) -> Self {
        Self {
            id,
            seat: seat.clone(),
        }
    }

    pub fn send_enter(&self, serial: u32, surface: ObjectId, x: Fixed, y: Fixed) {
        self.seat.client.event(Enter {
            self_id: self.id,
            serial,
            surface,
            surface_x: x,
            surface_y: y,
        })
    }

    pub fn send_leave(&self, serial: u32, surface: ObjectId) {
        self.seat.client.event(Leave {
            self_id: self.id,
            serial,
            surface,
        })
    }

    pub fn send_motion(&self, time: u32, x: Fixed, y: Fixed) {
        self.seat.client.event(Motion {
            self_id: self.id,
            time,
            surface_x: x,
            surface_y: y,
        })
    }

    pub fn send_button(&self, serial: u32, time: u32, button: u32, state: u32) {
        self.seat.client.event(Button {
            self_id: self.id,
            serial,
            time,
            button,
            state,
        })
    }

    pub fn send_axis(&self, time: u32, axis: u32, value: Fixed) {
        self.seat.client.event(Axis {
            self_id: self.id,
            time,
            axis,
            value,
        })
    }

    /// `wl_pointer.set_cursor`. Errors are fatal for the client.
    pub fn set_cursor(
        &self,
        serial: u32,
        surface: Option<&Rc<WlSurface>>,
        hotspot_x: i32,
        hotspot_y: i32,
    ) {
        if let Err(e) = self.set_cursor_(serial, surface, hotspot_x, hotspot_y) {
            let obj: &dyn Object = match surface {
                Some(s) => &**s,
                None => self,
            };
            self.seat
                .client
                .protocol_error(obj, INVALID_OBJECT, &ErrorFmt(e).to_string());
        }
    }

    fn set_cursor_(
        &self,
        serial: u32,
        surface: Option<&Rc<WlSurface>>,
        hotspot_x: i32,
        hotspot_y: i32,
    ) -> Result<(), WlPointerError> {
        let Some(pointer) = self.seat.global.pointer() else {
            return Ok(());
        };
        let Some(focus) = pointer.focus() else {
            log::debug!("Ignoring wl_pointer.set_cursor without pointer focus");
            return Ok(());
        };
        if focus.client.id != self.seat.client.id {
            log::debug!(
                "Ignoring wl_pointer.set_cursor from client {} without pointer focus",
                self.seat.client.id,
            );
            return Ok(());
        }
        let focus_serial = pointer.focus_serial();
        if focus_serial.wrapping_sub(serial) > u32::MAX / 2 {
            log::warn!(
                "Ignoring wl_pointer.set_cursor with serial {} newer than the enter serial {}",
                serial,
                focus_serial,
            );
            return Ok(());
        }
        self.seat.global.set_cursor(surface, hotspot_x, hotspot_y)?;
        Ok(())
    }

    pub fn release(&self) {
        if let Some(pointer) = self.seat.global.pointer() {
            pointer.remove_binding(self);
        }
    }
}

impl Object for WlPointer {
    fn id(&self) -> ObjectId {
        self.id
    }

    fn interface(&self) -> Interface {
        INTERFACE
    }
}

#[derive(Debug, Error)]
pub enum WlPointerError {
    #[error(transparent)]
    WlSurfaceError(Box<WlSurfaceError>),
}
efrom!(WlPointerError, WlSurfaceError);
