use std::fmt::{Display, Formatter};

pub const WL_DISPLAY_ID: ObjectId = ObjectId(1);

/// `wl_display.error` code for requests on an object in the wrong state.
pub const INVALID_OBJECT: u32 = 0;

#[derive(Debug, Copy, Clone, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub struct ObjectId(u32);

impl ObjectId {
    pub const NONE: Self = ObjectId(0);

    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl Display for ObjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Interface(pub &'static str);

impl Interface {
    pub fn name(self) -> &'static str {
        self.0
    }
}

pub trait Object: 'static {
    fn id(&self) -> ObjectId;
    fn interface(&self) -> Interface;
}
