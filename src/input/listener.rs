//! Host Listener Registration
//!
//! The host owns event subscription. A coordinator only describes which
//! listeners it needs and hands them to a [`ListenerRegistry`] on grab and
//! ungrab.

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::Mutex;

/// Raw host event kinds a coordinator listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HostEventKind {
    /// Mouse button press
    MouseDown,
    /// Mouse button release
    MouseUp,
    /// Mouse motion
    MouseMove,
    /// Wheel scroll
    Wheel,
    /// Touch press
    TouchStart,
    /// Touch release
    TouchEnd,
    /// Touch motion
    TouchMove,
    /// Click, used to swallow paste-button clicks on the surface
    Click,
    /// Context menu request
    ContextMenu,
}

/// Where a listener is attached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListenerScope {
    /// The target surface element
    Target,
    /// The top-level window, to catch releases outside the surface
    Window,
    /// The document, to catch events the target element misses
    Document,
}

/// A single listener registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Listener {
    /// Event kind
    pub kind: HostEventKind,
    /// Attachment point
    pub scope: ListenerScope,
}

impl Listener {
    /// Create a listener
    pub const fn new(kind: HostEventKind, scope: ListenerScope) -> Self {
        Self { kind, scope }
    }
}

const MOUSE_LISTENERS: [Listener; 5] = [
    Listener::new(HostEventKind::MouseDown, ListenerScope::Target),
    Listener::new(HostEventKind::MouseUp, ListenerScope::Window),
    Listener::new(HostEventKind::MouseUp, ListenerScope::Target),
    Listener::new(HostEventKind::MouseMove, ListenerScope::Target),
    Listener::new(HostEventKind::Wheel, ListenerScope::Target),
];

const TOUCH_LISTENERS: [Listener; 4] = [
    Listener::new(HostEventKind::TouchStart, ListenerScope::Target),
    Listener::new(HostEventKind::TouchEnd, ListenerScope::Window),
    Listener::new(HostEventKind::TouchEnd, ListenerScope::Target),
    Listener::new(HostEventKind::TouchMove, ListenerScope::Target),
];

const SUPPRESSORS: [Listener; 2] = [
    Listener::new(HostEventKind::Click, ListenerScope::Document),
    Listener::new(HostEventKind::ContextMenu, ListenerScope::Document),
];

/// Listeners attached on grab, in attach order
pub fn grab_listeners(touch_capable: bool) -> Vec<Listener> {
    let mut listeners = Vec::with_capacity(11);
    if touch_capable {
        listeners.extend_from_slice(&TOUCH_LISTENERS);
    }
    listeners.extend_from_slice(&MOUSE_LISTENERS);
    listeners.extend_from_slice(&SUPPRESSORS);
    listeners
}

/// Host-side event subscription
pub trait ListenerRegistry {
    /// Start delivering events for `listener`
    fn attach(&mut self, listener: Listener);

    /// Stop delivering events for `listener`
    fn detach(&mut self, listener: Listener);
}

impl<R: ListenerRegistry + ?Sized> ListenerRegistry for Arc<Mutex<R>> {
    fn attach(&mut self, listener: Listener) {
        self.lock().attach(listener);
    }

    fn detach(&mut self, listener: Listener) {
        self.lock().detach(listener);
    }
}

/// Registry that only records which listeners are attached
#[derive(Debug, Clone, Default)]
pub struct ListenerSet {
    attached: BTreeSet<Listener>,
}

impl ListenerSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a listener is attached
    pub fn contains(&self, listener: &Listener) -> bool {
        self.attached.contains(listener)
    }

    /// Whether any listener for `kind` is attached
    pub fn listens_for(&self, kind: HostEventKind) -> bool {
        self.attached.iter().any(|l| l.kind == kind)
    }

    /// Number of attached listeners
    pub fn len(&self) -> usize {
        self.attached.len()
    }

    /// Whether nothing is attached
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }
}

impl ListenerRegistry for ListenerSet {
    fn attach(&mut self, listener: Listener) {
        self.attached.insert(listener);
    }

    fn detach(&mut self, listener: Listener) {
        self.attached.remove(&listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mouse_only_listeners() {
        let listeners = grab_listeners(false);
        assert_eq!(listeners.len(), 7);
        assert!(!listeners.iter().any(|l| l.kind == HostEventKind::TouchStart));
        assert!(listeners.contains(&Listener::new(
            HostEventKind::MouseUp,
            ListenerScope::Window
        )));
    }

    #[test]
    fn test_touch_listeners() {
        let listeners = grab_listeners(true);
        assert_eq!(listeners.len(), 11);
        assert_eq!(
            listeners[0],
            Listener::new(HostEventKind::TouchStart, ListenerScope::Target)
        );
    }

    #[test]
    fn test_suppressors_attach_to_document() {
        for listener in grab_listeners(false)
            .iter()
            .filter(|l| matches!(l.kind, HostEventKind::Click | HostEventKind::ContextMenu))
        {
            assert_eq!(listener.scope, ListenerScope::Document);
        }
    }

    #[test]
    fn test_listener_set() {
        let mut set = ListenerSet::new();
        for listener in grab_listeners(false) {
            set.attach(listener);
        }
        assert_eq!(set.len(), 7);
        assert!(set.listens_for(HostEventKind::Wheel));
        assert!(set.contains(&Listener::new(HostEventKind::MouseUp, ListenerScope::Window)));
        assert!(!set.contains(&Listener::new(HostEventKind::MouseUp, ListenerScope::Document)));

        for listener in grab_listeners(false) {
            set.detach(listener);
        }
        assert!(set.is_empty());
    }

    #[test]
    fn test_shared_registry() {
        let shared = Arc::new(Mutex::new(ListenerSet::new()));
        let mut handle = shared.clone();

        handle.attach(Listener::new(HostEventKind::Wheel, ListenerScope::Target));
        assert!(shared.lock().listens_for(HostEventKind::Wheel));

        handle.detach(Listener::new(HostEventKind::Wheel, ListenerScope::Target));
        assert!(shared.lock().is_empty());
    }
}
