use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonitorId(u64);

/// Capability to intercept keys before they reach text editing.
///
/// Whoever installs a monitor must remove it when done with it; the row
/// controller does so when dropped.
pub trait KeyMonitor {
    fn install(&mut self) -> MonitorId;
    fn remove(&mut self, id: MonitorId);
}

#[derive(Debug, Default)]
struct MonitorTable {
    next: u64,
    installed: Vec<MonitorId>,
}

/// Key monitor for the terminal event loop. Clones share one table, so the
/// loop can ask whether interception is live while the controller owns its
/// own handle.
#[derive(Debug, Clone, Default)]
pub struct LocalKeyMonitor {
    table: Rc<RefCell<MonitorTable>>,
}

impl LocalKeyMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while at least one monitor is installed
    pub fn is_active(&self) -> bool {
        !self.table.borrow().installed.is_empty()
    }

    pub fn installed_count(&self) -> usize {
        self.table.borrow().installed.len()
    }
}

impl KeyMonitor for LocalKeyMonitor {
    fn install(&mut self) -> MonitorId {
        let mut table = self.table.borrow_mut();
        let id = MonitorId(table.next);
        table.next += 1;
        table.installed.push(id);
        id
    }

    fn remove(&mut self, id: MonitorId) {
        self.table.borrow_mut().installed.retain(|m| *m != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn install_and_remove_through_a_clone() {
        let observer = LocalKeyMonitor::new();
        let mut handle = observer.clone();
        assert!(!observer.is_active());

        let a = handle.install();
        let b = handle.install();
        assert_ne!(a, b);
        assert_eq!(observer.installed_count(), 2);

        handle.remove(a);
        assert!(observer.is_active());
        handle.remove(b);
        assert!(!observer.is_active());
    }

    #[test]
    fn removing_twice_is_harmless() {
        let mut monitor = LocalKeyMonitor::new();
        let id = monitor.install();
        monitor.remove(id);
        monitor.remove(id);
        assert_eq!(monitor.installed_count(), 0);
    }
}
