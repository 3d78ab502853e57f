//! An event hub dispatching to clonable subscriber callbacks.
//!
//! Each subscriber is a [`SmallFn`], so small closures sit inline in the
//! registry's vector and the hub can be cloned wholesale to snapshot a
//! subscriber list.

use std::{cell::RefCell, rc::Rc};

use smallfn::{S8, SmallFn};

type Callback = SmallFn<dyn Fn(&'static str), S8>;

#[derive(Clone, Default)]
struct Hub {
    subscribers: Vec<Callback>,
}

impl Hub {
    fn subscribe(&mut self, callback: Callback) {
        self.subscribers.push(callback);
    }

    fn publish(&self, event: &'static str) {
        for subscriber in &self.subscribers {
            subscriber.call((event,));
        }
    }
}

fn main() {
    let mut hub = Hub::default();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&seen);
    hub.subscribe(SmallFn::new(move |event| sink.borrow_mut().push(event)));
    hub.subscribe(SmallFn::new(|event| println!("observed: {event}")));

    // A snapshot keeps delivering even after the original moves on.
    let snapshot = hub.clone();

    hub.publish("started");
    snapshot.publish("snapshot-only");
    hub.publish("stopped");

    println!("recorded by sink: {:?}", seen.borrow());
}
