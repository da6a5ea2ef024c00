use {
    crate::{
        backend::{KeyState, ScrollAxis},
        client::{Client, ClientId, ClientSink, Clients},
        config::SeatConfig,
        fixed::Fixed,
        ifs::{
            wl_seat::{SeatIds, WlSeatGlobal},
            wl_surface::WlSurface,
        },
        kbvm::{KbvmContext, KbvmError},
        keyboard::Keymap,
        object::ObjectId,
        rect::Rect,
        tree::SurfaceTree,
        utils::{clonecell::CloneCell, copyhashmap::CopyHashMap, event_listener::EventSource, numcell::NumCell},
    },
    std::{
        cell::{Cell, RefCell},
        rc::Rc,
    },
};

/// The display-wide serial generator.
#[derive(Default)]
pub struct Serials {
    last: Cell<u32>,
}

impl Serials {
    pub fn next(&self) -> u32 {
        let serial = self.last.get().wrapping_add(1);
        self.last.set(serial);
        serial
    }

    pub fn last(&self) -> u32 {
        self.last.get()
    }
}

pub trait IdleTracker {
    fn wake(&self);
    fn inhibit(&self);
    fn release(&self);
}

/// Counts outstanding inhibitors. Releasing also counts as activity.
#[derive(Default)]
pub struct IdleCounter {
    pub inhibitors: NumCell<u32>,
    pub wakes: NumCell<u64>,
}

impl IdleTracker for IdleCounter {
    fn wake(&self) {
        self.wakes.fetch_add(1);
    }

    fn inhibit(&self) {
        self.inhibitors.fetch_add(1);
    }

    fn release(&self) {
        if self.inhibitors.get() == 0 {
            log::warn!("Idle inhibitor released more often than it was taken");
        } else {
            self.inhibitors.fetch_sub(1);
        }
        self.wake();
    }
}

/// Compositor shortcuts. Returning `true` consumes the event.
pub trait InputBindings {
    fn key(&self, seat: &Rc<WlSeatGlobal>, time: u32, key: u32, state: KeyState) -> bool {
        let _ = (seat, time, key, state);
        false
    }

    fn button(&self, seat: &Rc<WlSeatGlobal>, time: u32, button: u32, state: KeyState) -> bool {
        let _ = (seat, time, button, state);
        false
    }

    fn axis(&self, seat: &Rc<WlSeatGlobal>, time: u32, axis: ScrollAxis, value: Fixed) -> bool {
        let _ = (seat, time, axis, value);
        false
    }
}

pub trait PingHandler {
    fn ping(&self, surface: &Rc<WlSurface>, serial: u32);
}

pub trait SeatCreatedListener {
    fn seat_created(&self, seat: &Rc<WlSeatGlobal>);
}

pub struct State {
    pub config: SeatConfig,
    pub serials: Serials,
    pub clients: Clients,
    pub tree: SurfaceTree,
    pub surfaces: CopyHashMap<(ClientId, ObjectId), Rc<WlSurface>>,
    pub outputs: RefCell<Vec<Rect>>,
    pub focus: Cell<bool>,
    pub seat_ids: SeatIds,
    pub seats: RefCell<Vec<Rc<WlSeatGlobal>>>,
    pub idle: CloneCell<Rc<dyn IdleTracker>>,
    pub input_bindings: CloneCell<Option<Rc<dyn InputBindings>>>,
    pub ping_handler: CloneCell<Option<Rc<dyn PingHandler>>>,
    pub seat_created: EventSource<dyn SeatCreatedListener>,
    pub kbvm: KbvmContext,
    default_keymap: CloneCell<Option<Rc<dyn Keymap>>>,
}

impl State {
    pub fn new(config: SeatConfig) -> Rc<Self> {
        Self::with_kbvm(config, KbvmContext::default())
    }

    pub fn with_kbvm(config: SeatConfig, kbvm: KbvmContext) -> Rc<Self> {
        Rc::new(Self {
            config,
            serials: Default::default(),
            clients: Default::default(),
            tree: Default::default(),
            surfaces: Default::default(),
            outputs: Default::default(),
            focus: Cell::new(false),
            seat_ids: Default::default(),
            seats: Default::default(),
            idle: CloneCell::new(Rc::new(IdleCounter::default())),
            input_bindings: Default::default(),
            ping_handler: Default::default(),
            seat_created: Default::default(),
            kbvm,
            default_keymap: Default::default(),
        })
    }

    /// The keymap described by the configuration. Compiled on first use.
    pub fn default_keymap(&self) -> Result<Rc<dyn Keymap>, KbvmError> {
        if let Some(map) = self.default_keymap.get() {
            return Ok(map);
        }
        let map: Rc<dyn Keymap> = self.kbvm.compile(&self.config.keymap)?;
        self.default_keymap.set(Some(map.clone()));
        Ok(map)
    }

    pub fn set_default_keymap(&self, keymap: &Rc<dyn Keymap>) {
        self.default_keymap.set(Some(keymap.clone()));
    }

    pub fn create_seat(self: &Rc<Self>, name: &str) -> Rc<WlSeatGlobal> {
        let seat = WlSeatGlobal::new(self.seat_ids.next(), name, self);
        log::info!("Created seat {} ({})", seat.id, name);
        self.seats.borrow_mut().push(seat.clone());
        for listener in self.seat_created.iter() {
            listener.seat_created(&seat);
        }
        seat
    }

    /// Creates the seat named by the configuration.
    pub fn create_default_seat(self: &Rc<Self>) -> Rc<WlSeatGlobal> {
        self.create_seat(&self.config.name)
    }

    pub fn remove_seat(&self, seat: &Rc<WlSeatGlobal>) {
        self.seats.borrow_mut().retain(|s| s.id != seat.id);
        seat.release();
    }

    pub fn seats(&self) -> Vec<Rc<WlSeatGlobal>> {
        self.seats.borrow().clone()
    }

    pub fn connect_client(&self, sink: Rc<dyn ClientSink>) -> Rc<Client> {
        self.clients.spawn(sink)
    }

    pub fn create_surface(&self, client: &Rc<Client>, id: ObjectId) -> Rc<WlSurface> {
        let surface = WlSurface::new(id, client);
        self.surfaces.set((client.id, id), surface.clone());
        surface
    }

    /// Removes the surface from the stacking order. Seats focused on it get a
    /// leave and then re-pick.
    pub fn unmap_surface(&self, surface: &Rc<WlSurface>) {
        self.tree.unmap(surface);
        for seat in self.seats() {
            seat.surface_unmapped(surface);
        }
    }

    pub fn destroy_surface(&self, surface: &Rc<WlSurface>) {
        self.surfaces.remove(&(surface.client.id, surface.id));
        surface.destroy();
        self.unmap_surface(surface);
    }

    pub fn destroy_client(&self, client: &Rc<Client>) {
        for seat in self.seats() {
            seat.remove_client(client.id);
        }
        let surfaces: Vec<_> = self
            .surfaces
            .values()
            .into_iter()
            .filter(|s| s.client.id == client.id)
            .collect();
        for surface in surfaces {
            self.destroy_surface(&surface);
        }
        self.clients.remove(client.id);
    }

    pub fn repick(&self) {
        for seat in self.seats() {
            seat.repick();
        }
    }

    /// Re-evaluates the drag icons of all seats, e.g. after an icon commit.
    pub fn update_drag_surfaces(&self) {
        for seat in self.seats() {
            seat.update_drag_surface(Fixed::ZERO, Fixed::ZERO);
        }
    }

    /// Keeps the pointer on the outputs. A position outside of all outputs
    /// is clamped to the output that contains the old position.
    pub fn clip_motion(&self, old: (Fixed, Fixed), new: (Fixed, Fixed)) -> (Fixed, Fixed) {
        let outputs = self.outputs.borrow();
        let (x, y) = (new.0.round_down(), new.1.round_down());
        let (old_x, old_y) = (old.0.round_down(), old.1.round_down());
        let mut valid = false;
        let mut prev = None;
        for output in outputs.iter() {
            if output.contains(x, y) {
                valid = true;
            }
            if output.contains(old_x, old_y) {
                prev = Some(*output);
            }
        }
        let (mut fx, mut fy) = new;
        if valid {
            return (fx, fy);
        }
        let Some(prev) = prev else {
            return (fx, fy);
        };
        if x < prev.x1() {
            fx = Fixed::from_int(prev.x1());
        } else if x >= prev.x2() {
            fx = Fixed::from_int(prev.x2() - 1);
        }
        if y < prev.y1() {
            fy = Fixed::from_int(prev.y1());
        } else if y >= prev.y2() {
            fy = Fixed::from_int(prev.y2() - 1);
        }
        (fx, fy)
    }

    pub fn idle(&self) -> Rc<dyn IdleTracker> {
        self.idle.get()
    }

    pub fn ping(&self, surface: &Rc<WlSurface>, serial: u32) {
        if let Some(handler) = self.ping_handler.get() {
            handler.ping(surface, serial);
        }
    }
}
