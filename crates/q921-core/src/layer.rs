//! Boundaries to the layers above and below the data link.
//!
//! Layer 1 is whatever moves octets onto the D-channel (an HDLC controller,
//! a TDM span driver, a test capture). Layer 3 is the Q.931 call-control
//! consumer of information fields. Any per-direction context lives in the
//! implementing type.

/// Physical-layer transmit endpoint.
pub trait Layer1 {
    /// Transmit failure reported back to the frame builder.
    type Error: std::error::Error + 'static;

    /// Hand a complete frame (header reservation included) to the wire.
    ///
    /// Returns the number of bytes accepted.
    fn transmit(&mut self, frame: &[u8]) -> Result<usize, Self::Error>;
}

/// Network-layer delivery endpoint.
pub trait Layer3 {
    /// Delivery failure. The dispatcher logs it and carries on.
    type Error: std::error::Error + 'static;

    /// Deliver the information field of an accepted I-frame.
    fn deliver(&mut self, info: &[u8]) -> Result<(), Self::Error>;
}

impl<T: Layer1 + ?Sized> Layer1 for &mut T {
    type Error = T::Error;

    fn transmit(&mut self, frame: &[u8]) -> Result<usize, Self::Error> {
        (**self).transmit(frame)
    }
}

impl<T: Layer3 + ?Sized> Layer3 for &mut T {
    type Error = T::Error;

    fn deliver(&mut self, info: &[u8]) -> Result<(), Self::Error> {
        (**self).deliver(info)
    }
}
