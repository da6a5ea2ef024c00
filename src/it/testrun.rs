use {
    crate::{
        backend::{KeyState, KeyStateUpdate, TouchKind},
        config::SeatConfig,
        fixed::Fixed,
        ifs::wl_seat::WlSeatGlobal,
        it::{
            test_client::TestClient,
            test_error::TestResult,
            test_keymap::TestKeymap,
        },
        kbvm::KbvmContext,
        keyboard::Keymap,
        rect::Rect,
        state::{IdleCounter, State},
    },
    std::rc::Rc,
};

pub struct TestRun {
    pub state: Rc<State>,
    pub seat: Rc<WlSeatGlobal>,
    pub keymap: Rc<TestKeymap>,
    pub idle: Rc<IdleCounter>,
}

impl TestRun {
    /// A desktop with one 800x600 output and a seat with all devices.
    pub fn new() -> TestResult<Rc<Self>> {
        Self::with_config(SeatConfig::default())
    }

    pub fn with_config(config: SeatConfig) -> TestResult<Rc<Self>> {
        let state = State::with_kbvm(config, KbvmContext::isolated());
        let idle = Rc::new(IdleCounter::default());
        state.idle.set(idle.clone());
        let keymap = TestKeymap::new()?;
        state.set_default_keymap(&(keymap.clone() as Rc<dyn Keymap>));
        if let Some(output) = Rect::new_sized(0, 0, 800, 600) {
            state.outputs.borrow_mut().push(output);
        }
        let seat = state.create_default_seat();
        seat.init_pointer();
        seat.init_keyboard(None)?;
        seat.init_touch();
        Ok(Rc::new(Self {
            state,
            seat,
            keymap,
            idle,
        }))
    }

    pub fn create_client(self: &Rc<Self>) -> Rc<TestClient> {
        TestClient::new(self)
    }

    pub fn move_to(&self, x: i32, y: i32) {
        self.seat
            .notify_motion_absolute(0, Fixed::from_int(x), Fixed::from_int(y));
    }

    pub fn pointer_position(&self) -> (i32, i32) {
        match self.seat.pointer() {
            Some(p) => {
                let (x, y) = p.position();
                (x.round_down(), y.round_down())
            }
            None => (0, 0),
        }
    }

    pub fn key(&self, key: u32, state: KeyState) {
        self.seat.notify_key(0, key, state, KeyStateUpdate::Automatic);
    }

    pub fn button(&self, button: u32, state: KeyState) {
        self.seat.notify_button(0, button, state);
    }

    pub fn touch(&self, id: i32, x: i32, y: i32, kind: TouchKind) {
        self.seat
            .notify_touch(0, id, Fixed::from_int(x), Fixed::from_int(y), kind);
    }
}
