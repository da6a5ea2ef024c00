use crate::fixed::Fixed;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Released,
    Pressed,
}

impl KeyState {
    pub fn wire(self) -> u32 {
        match self {
            KeyState::Released => 0,
            KeyState::Pressed => 1,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ScrollAxis {
    Vertical = 0,
    Horizontal = 1,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TouchKind {
    Down,
    Motion,
    Up,
}

/// Whether key events also drive the keymap state machine.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyStateUpdate {
    Automatic,
    None,
}

/// Raw device input as delivered by the device layer.
#[derive(Debug, Clone)]
pub enum InputEvent {
    Motion {
        time: u32,
        dx: Fixed,
        dy: Fixed,
    },
    MotionAbsolute {
        time: u32,
        x: Fixed,
        y: Fixed,
    },
    Button {
        time: u32,
        button: u32,
        state: KeyState,
    },
    Axis {
        time: u32,
        axis: ScrollAxis,
        value: Fixed,
    },
    Key {
        time: u32,
        key: u32,
        state: KeyState,
        update: KeyStateUpdate,
    },
    Touch {
        time: u32,
        id: i32,
        x: Fixed,
        y: Fixed,
        kind: TouchKind,
    },
    PointerFocus {
        output: Option<usize>,
        x: Fixed,
        y: Fixed,
    },
    KeyboardFocusIn {
        keys: Vec<u32>,
        update: KeyStateUpdate,
    },
    KeyboardFocusOut,
}
