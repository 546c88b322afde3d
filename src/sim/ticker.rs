//! Per-frame driver
//!
//! The ticker runs only while something is animating. Each frame it advances
//! the simulation and, if anything was in motion, hands the context to every
//! subscriber in registration order (typically the renderer).

/// Something that animates over time
pub trait Animate {
    /// Advance by `dt` milliseconds; returns whether anything was in motion
    fn advance(&mut self, dt: f32) -> bool;
}

/// Handle returned by [`Ticker::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

pub type FrameCallback<C> = Box<dyn FnMut(&C, f32)>;

struct Subscriber<C> {
    id: SubscriptionId,
    callback: FrameCallback<C>,
}

pub struct Ticker<C> {
    subscribers: Vec<Subscriber<C>>,
    next_id: u32,
    running: bool,
}

impl<C> Default for Ticker<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for Ticker<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ticker")
            .field("subscribers", &self.subscribers.len())
            .field("running", &self.running)
            .finish()
    }
}

impl<C> Ticker<C> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 1,
            running: false,
        }
    }

    /// Register a per-frame callback
    pub fn subscribe(&mut self, callback: impl FnMut(&C, f32) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            callback: Box::new(callback),
        });
        id
    }

    /// Remove a callback; returns whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    /// Ask for frames until the context stops animating
    pub fn request_frames(&mut self) {
        self.running = true;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<C: Animate> Ticker<C> {
    /// Drive one frame; returns whether the frame was rendered
    pub fn frame(&mut self, ctx: &mut C, dt: f32) -> bool {
        if !self.running {
            return false;
        }
        if !ctx.advance(dt) {
            self.running = false;
            return false;
        }
        for subscriber in &mut self.subscribers {
            (subscriber.callback)(ctx, dt);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Animates for a fixed number of frames
    struct Countdown(u32);

    impl Animate for Countdown {
        fn advance(&mut self, _dt: f32) -> bool {
            if self.0 == 0 {
                return false;
            }
            self.0 -= 1;
            true
        }
    }

    #[test]
    fn test_idle_until_requested() {
        let mut ticker = Ticker::new();
        let mut ctx = Countdown(3);
        assert!(!ticker.frame(&mut ctx, 16.0));
        assert_eq!(ctx.0, 3);
    }

    #[test]
    fn test_stops_when_nothing_moves() {
        let mut ticker = Ticker::new();
        let mut ctx = Countdown(2);
        ticker.request_frames();
        assert!(ticker.frame(&mut ctx, 16.0));
        assert!(ticker.frame(&mut ctx, 16.0));
        assert!(!ticker.frame(&mut ctx, 16.0));
        assert!(!ticker.is_running());
    }

    #[test]
    fn test_subscribers_run_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut ticker = Ticker::new();
        let first = {
            let log = log.clone();
            ticker.subscribe(move |_: &Countdown, _| log.borrow_mut().push("first"))
        };
        {
            let log = log.clone();
            ticker.subscribe(move |c: &Countdown, _| log.borrow_mut().push(if c.0 == 0 { "last" } else { "second" }));
        }

        let mut ctx = Countdown(2);
        ticker.request_frames();
        ticker.frame(&mut ctx, 16.0);
        assert!(ticker.unsubscribe(first));
        assert!(!ticker.unsubscribe(first));
        ticker.frame(&mut ctx, 16.0);

        assert_eq!(*log.borrow(), vec!["first", "second", "last"]);
        assert_eq!(ticker.subscriber_count(), 1);
    }
}
