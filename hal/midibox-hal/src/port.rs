//! MIDI port identifiers

/// A physical MIDI port
///
/// Each port carries its own byte stream; parsers are bound to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MidiPort {
    /// Serial MIDI (DIN socket) by UART index
    Uart(u8),
    /// USB MIDI by virtual cable number
    Usb(u8),
}

impl MidiPort {
    /// Returns true for serial DIN ports
    pub fn is_uart(&self) -> bool {
        matches!(self, MidiPort::Uart(_))
    }

    /// Index of the UART or USB cable
    pub fn index(&self) -> u8 {
        match self {
            MidiPort::Uart(n) | MidiPort::Usb(n) => *n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_identity() {
        assert_ne!(MidiPort::Uart(0), MidiPort::Usb(0));
        assert_eq!(MidiPort::Uart(1), MidiPort::Uart(1));
        assert!(MidiPort::Uart(1).is_uart());
        assert!(!MidiPort::Usb(1).is_uart());
        assert_eq!(MidiPort::Usb(3).index(), 3);
    }
}
