//! Port-mapped I/O dispatch.
//!
//! Real port decoding examines only a subset of the address lines: a
//! device responds when every line named by its select mask reads low.
//! Modelling exact-equality instead would misroute most legitimate
//! device addresses, so dispatch uses the coverage rule
//! `(!port & mask) == mask`.
//!
//! Devices are kept in a priority-ordered list, consulted in
//! registration order. When two masks both cover a port, the first
//! registered device wins. Deterministic, unlike hash-map iteration.

/// Value read from a port no device claims: an undriven bus floats high.
pub const FLOATING_BUS: u8 = 0xFF;

/// A device addressable through the I/O bus.
pub trait IoDevice {
    /// Read a byte from the given port.
    fn read(&mut self, port: u16) -> u8;

    /// Write a byte to the given port.
    fn write(&mut self, port: u16, value: u8);
}

/// Mask-dispatched I/O device registry.
#[derive(Default)]
pub struct IoBus {
    devices: Vec<(u16, Box<dyn IoDevice>)>,
}

impl IoBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a device under a port-select mask.
    ///
    /// Devices registered earlier take priority on overlapping masks.
    pub fn register(&mut self, mask: u16, device: Box<dyn IoDevice>) {
        self.devices.push((mask, device));
    }

    /// True when `mask` selects `port`: every masked address line is low.
    #[must_use]
    pub const fn selects(mask: u16, port: u16) -> bool {
        (!port & mask) == mask
    }

    /// Read from the first device selecting `port`, or the floating bus.
    pub fn read(&mut self, port: u16) -> u8 {
        for (mask, device) in &mut self.devices {
            if Self::selects(*mask, port) {
                return device.read(port);
            }
        }
        FLOATING_BUS
    }

    /// Write to the first device selecting `port`; no-op if unclaimed.
    pub fn write(&mut self, port: u16, value: u8) {
        for (mask, device) in &mut self.devices {
            if Self::selects(*mask, port) {
                device.write(port, value);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records writes and answers reads with a fixed byte.
    struct Probe {
        response: u8,
        writes: Rc<RefCell<Vec<(u16, u8)>>>,
    }

    impl Probe {
        fn new(response: u8) -> (Self, Rc<RefCell<Vec<(u16, u8)>>>) {
            let writes = Rc::new(RefCell::new(Vec::new()));
            (
                Self {
                    response,
                    writes: Rc::clone(&writes),
                },
                writes,
            )
        }
    }

    impl IoDevice for Probe {
        fn read(&mut self, _port: u16) -> u8 {
            self.response
        }

        fn write(&mut self, port: u16, value: u8) {
            self.writes.borrow_mut().push((port, value));
        }
    }

    #[test]
    fn coverage_rule() {
        // Mask 0x0001: selected whenever A0 is low.
        assert!(IoBus::selects(0x0001, 0x00FE));
        assert!(IoBus::selects(0x0001, 0xFFFE));
        assert!(!IoBus::selects(0x0001, 0x00FF));
        assert!(!IoBus::selects(0x0001, 0xFFFF));

        // A wider mask needs all of its lines low.
        assert!(IoBus::selects(0x00E0, 0xFF1F));
        assert!(!IoBus::selects(0x00E0, 0xFF3F));
    }

    #[test]
    fn read_routes_every_covered_address() {
        let mut bus = IoBus::new();
        let (probe, _) = Probe::new(0x5A);
        bus.register(0x0001, Box::new(probe));

        // Every even port routes to the device; odd ports float.
        assert_eq!(bus.read(0x00FE), 0x5A);
        assert_eq!(bus.read(0xFEFE), 0x5A);
        assert_eq!(bus.read(0x7FFE), 0x5A);
        assert_eq!(bus.read(0x00FF), FLOATING_BUS);
        assert_eq!(bus.read(0xFFFF), FLOATING_BUS);
    }

    #[test]
    fn write_dispatch_and_unmatched_noop() {
        let mut bus = IoBus::new();
        let (probe, writes) = Probe::new(0xFF);
        bus.register(0x0001, Box::new(probe));

        bus.write(0x00FE, 0x07);
        bus.write(0x00FF, 0x42); // odd port: nobody home
        assert_eq!(*writes.borrow(), vec![(0x00FE, 0x07)]);
    }

    #[test]
    fn empty_bus_floats() {
        let mut bus = IoBus::new();
        assert_eq!(bus.read(0x0000), FLOATING_BUS);
        bus.write(0x0000, 0x12); // silently ignored
    }

    #[test]
    fn overlapping_masks_resolve_in_registration_order() {
        let mut bus = IoBus::new();
        let (first, first_writes) = Probe::new(0x11);
        let (second, second_writes) = Probe::new(0x22);
        // Both masks cover port 0x00FC.
        bus.register(0x0001, Box::new(first));
        bus.register(0x0003, Box::new(second));

        assert_eq!(bus.read(0x00FC), 0x11);
        bus.write(0x00FC, 0xAB);
        assert_eq!(first_writes.borrow().len(), 1);
        assert!(second_writes.borrow().is_empty());

        // A port only the second mask's device could claim still goes to
        // the first device if its mask covers it too; priority is total.
        assert_eq!(bus.read(0xFFFC), 0x11);
    }
}
