//! Typed server-to-client messages of the interfaces the seat speaks.

use {
    crate::{
        client::EventFormatter,
        fixed::Fixed,
        object::{Interface, ObjectId},
    },
    std::rc::Rc,
    uapi::OwnedFd,
};

macro_rules! events {
    ($(
        $iface:ident {
            $($name:ident => $variant:ident { $($field:ident: $ty:ty),* $(,)? },)*
        }
    )*) => {
        $(
            pub mod $iface {
                #[allow(unused_imports)]
                use super::*;

                pub const INTERFACE: Interface = Interface(stringify!($iface));

                $(
                    #[derive(Debug, Clone)]
                    pub struct $name {
                        pub self_id: ObjectId,
                        $(pub $field: $ty,)*
                    }

                    impl EventFormatter for $name {
                        fn id(&self) -> ObjectId {
                            self.self_id
                        }

                        fn interface(&self) -> Interface {
                            INTERFACE
                        }

                        fn into_wire(self) -> WireEvent {
                            WireEvent::$variant(self)
                        }
                    }
                )*
            }
        )*

        #[derive(Debug, Clone)]
        pub enum WireEvent {
            $($($variant($iface::$name),)*)*
        }
    };
}

events! {
    wl_display {
        Error => DisplayError { object_id: ObjectId, code: u32, message: String },
    }
    wl_seat {
        Capabilities => SeatCapabilities { capabilities: u32 },
        Name => SeatName { name: String },
    }
    wl_pointer {
        Enter => PointerEnter { serial: u32, surface: ObjectId, surface_x: Fixed, surface_y: Fixed },
        Leave => PointerLeave { serial: u32, surface: ObjectId },
        Motion => PointerMotion { time: u32, surface_x: Fixed, surface_y: Fixed },
        Button => PointerButton { serial: u32, time: u32, button: u32, state: u32 },
        Axis => PointerAxis { time: u32, axis: u32, value: Fixed },
    }
    wl_keyboard {
        Keymap => KeyboardKeymap { format: u32, fd: Rc<OwnedFd>, size: u32 },
        Enter => KeyboardEnter { serial: u32, surface: ObjectId, keys: Vec<u32> },
        Leave => KeyboardLeave { serial: u32, surface: ObjectId },
        Key => KeyboardKey { serial: u32, time: u32, key: u32, state: u32 },
        Modifiers => KeyboardModifiers {
            serial: u32,
            mods_depressed: u32,
            mods_latched: u32,
            mods_locked: u32,
            group: u32,
        },
        RepeatInfo => KeyboardRepeatInfo { rate: i32, delay: i32 },
    }
    wl_touch {
        Down => TouchDown { serial: u32, time: u32, surface: ObjectId, id: i32, x: Fixed, y: Fixed },
        Up => TouchUp { serial: u32, time: u32, id: i32 },
        Motion => TouchMotion { time: u32, id: i32, x: Fixed, y: Fixed },
    }
}

impl WireEvent {
    pub fn target(&self) -> ObjectId {
        macro_rules! target {
            ($($variant:ident,)*) => {
                match self {
                    $(WireEvent::$variant(e) => e.self_id,)*
                }
            };
        }
        target! {
            DisplayError,
            SeatCapabilities,
            SeatName,
            PointerEnter,
            PointerLeave,
            PointerMotion,
            PointerButton,
            PointerAxis,
            KeyboardKeymap,
            KeyboardEnter,
            KeyboardLeave,
            KeyboardKey,
            KeyboardModifiers,
            KeyboardRepeatInfo,
            TouchDown,
            TouchUp,
            TouchMotion,
        }
    }
}
