/// Trait for radio front-ends that can be switched and leveled at runtime.
pub trait RadioControl {
    /// Error type for control operations.
    type Error;

    /// Bring the receiver into normal operation.
    fn power_on(&mut self) -> Result<(), Self::Error>;

    /// Put the receiver into standby.
    fn standby(&mut self) -> Result<(), Self::Error>;

    /// Set the output volume (0.0 = silent, 1.0 = full scale).
    fn volume(&mut self, level: f32) -> Result<(), Self::Error>;
}
