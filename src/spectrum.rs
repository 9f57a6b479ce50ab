//! Spectrum source boundary.

/// Produces the current byte spectrum on demand.
///
/// Bin order is low to high frequency, values 0..=255, and the length is
/// fixed for the lifetime of the source.
pub trait SpectrumSource {
    /// Number of bins in every spectrum this source produces
    fn bin_count(&self) -> usize;

    /// Latest spectrum, or `None` while no audio is flowing
    /// (paused, no track loaded, or track finished).
    fn read_spectrum(&mut self) -> Option<&[u8]>;
}
