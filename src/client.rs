use {
    crate::{
        object::{Interface, Object, ObjectId, WL_DISPLAY_ID},
        utils::copyhashmap::CopyHashMap,
        wire::{WireEvent, wl_display},
    },
    std::{cell::Cell, fmt::Debug, rc::Rc},
};

linear_ids!(ClientIds, ClientId, u64);

/// A typed message that can be delivered to a client.
pub trait EventFormatter: Debug {
    fn id(&self) -> ObjectId;
    fn interface(&self) -> Interface;
    fn into_wire(self) -> WireEvent;
}

/// The transport of one client connection.
pub trait ClientSink {
    fn event(&self, client: ClientId, event: WireEvent);
    fn shutdown(&self, client: ClientId);
}

pub struct Clients {
    ids: ClientIds,
    clients: CopyHashMap<ClientId, Rc<Client>>,
}

impl Default for Clients {
    fn default() -> Self {
        Self {
            ids: Default::default(),
            clients: Default::default(),
        }
    }
}

impl Clients {
    pub fn spawn(&self, sink: Rc<dyn ClientSink>) -> Rc<Client> {
        let client = Rc::new(Client {
            id: self.ids.next(),
            sink,
            dead: Cell::new(false),
        });
        log::info!("Client {} connected", client.id);
        self.clients.set(client.id, client.clone());
        client
    }

    pub fn get(&self, id: ClientId) -> Option<Rc<Client>> {
        self.clients.get(&id)
    }

    pub fn remove(&self, id: ClientId) -> Option<Rc<Client>> {
        let client = self.clients.remove(&id)?;
        log::info!("Removing client {}", id);
        client.dead.set(true);
        Some(client)
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn clear(&self) {
        self.clients.lock().clear();
    }
}

pub struct Client {
    pub id: ClientId,
    sink: Rc<dyn ClientSink>,
    dead: Cell<bool>,
}

impl Client {
    pub fn event<T: EventFormatter>(&self, event: T) {
        if self.dead.get() {
            return;
        }
        if log::log_enabled!(log::Level::Trace) {
            self.log_event(&event);
        }
        self.sink.event(self.id, event.into_wire());
    }

    pub fn log_event<T: EventFormatter>(&self, event: &T) {
        log::trace!(
            "Client {} <= {}@{}.{:?}",
            self.id,
            event.interface().name(),
            event.id(),
            event,
        );
    }

    /// Reports a fatal protocol error. The connection is shut down and no
    /// further events are delivered.
    pub fn protocol_error(&self, obj: &dyn Object, code: u32, message: &str) {
        log::error!(
            "Client {}: protocol error on {}@{}: {}",
            self.id,
            obj.interface().name(),
            obj.id(),
            message,
        );
        if self.dead.replace(true) {
            return;
        }
        self.sink.event(
            self.id,
            wl_display::Error {
                self_id: WL_DISPLAY_ID,
                object_id: obj.id(),
                code,
                message: message.to_string(),
            }
            .into_wire(),
        );
        self.sink.shutdown(self.id);
    }

    pub fn is_dead(&self) -> bool {
        self.dead.get()
    }
}
