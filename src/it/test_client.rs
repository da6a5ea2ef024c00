use {
    crate::{
        client::{Client, ClientId, ClientSink},
        ifs::{
            wl_seat::{WlSeat, wl_keyboard::WlKeyboard, wl_pointer::WlPointer, wl_touch::WlTouch},
            wl_surface::WlSurface,
        },
        it::testrun::TestRun,
        object::ObjectId,
        tree::Layer,
        utils::numcell::NumCell,
        wire::WireEvent,
    },
    std::{
        cell::{Cell, RefCell},
        rc::Rc,
    },
};

/// Records everything the compositor sends to a client.
#[derive(Default)]
pub struct TestSink {
    pub events: RefCell<Vec<WireEvent>>,
    pub shutdown: Cell<bool>,
}

impl ClientSink for TestSink {
    fn event(&self, _client: ClientId, event: WireEvent) {
        self.events.borrow_mut().push(event);
    }

    fn shutdown(&self, _client: ClientId) {
        self.shutdown.set(true);
    }
}

pub struct TestClient {
    pub run: Rc<TestRun>,
    pub client: Rc<Client>,
    pub sink: Rc<TestSink>,
    ids: NumCell<u32>,
}

/// The objects a client creates to listen on the test seat.
pub struct TestSeat {
    pub seat: Rc<WlSeat>,
    pub pointer: Rc<WlPointer>,
    pub keyboard: Rc<WlKeyboard>,
    pub touch: Rc<WlTouch>,
}

impl TestClient {
    pub fn new(run: &Rc<TestRun>) -> Rc<Self> {
        let sink = Rc::new(TestSink::default());
        let client = run.state.connect_client(sink.clone());
        Rc::new(Self {
            run: run.clone(),
            client,
            sink,
            ids: NumCell::new(2),
        })
    }

    pub fn new_id(&self) -> ObjectId {
        ObjectId::from_raw(self.ids.fetch_add(1))
    }

    pub fn bind_seat(&self) -> Rc<WlSeat> {
        self.run.seat.bind(&self.client, self.new_id(), 7)
    }

    /// Binds the seat and requests all three devices.
    pub fn bind_devices(&self) -> TestSeat {
        let seat = self.bind_seat();
        TestSeat {
            pointer: seat.get_pointer(self.new_id()),
            keyboard: seat.get_keyboard(self.new_id()),
            touch: seat.get_touch(self.new_id()),
            seat,
        }
    }

    pub fn create_surface(&self) -> Rc<WlSurface> {
        self.run.state.create_surface(&self.client, self.new_id())
    }

    /// Creates a surface with a buffer of the given size and maps it at the
    /// top of the stacking order.
    pub fn map_surface(&self, x: i32, y: i32, width: i32, height: i32) -> Rc<WlSurface> {
        let surface = self.create_surface();
        surface.set_position(x, y);
        surface.attach(Some((width, height)), 0, 0);
        surface.commit();
        self.run.state.tree.map(Layer::Surfaces, &surface);
        surface
    }

    pub fn events(&self) -> Vec<WireEvent> {
        self.sink.events.borrow().clone()
    }

    pub fn is_shut_down(&self) -> bool {
        self.sink.shutdown.get()
    }

    pub fn disconnect(&self) {
        self.run.state.destroy_client(&self.client);
    }
}
