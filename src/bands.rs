//! Band extraction: splitting a byte spectrum into bass and treble and
//! reducing each band to one energy scalar.

use crate::error::{PipelineError, Result};

/// Where a spectrum is cut into bass and treble.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitConvention {
    /// Cut at `len/2 - 1`; the final bin is not part of either band.
    /// Visual tuning constants were chosen against this split.
    #[default]
    Reference,

    /// Cut at `len/2`; every bin belongs to exactly one band.
    Even,
}

/// Bass and treble halves of one spectrum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bands<'a> {
    pub bass: &'a [u8],
    pub treble: &'a [u8],
}

/// Split `spectrum` into bass and treble bands.
///
/// With [`SplitConvention::Reference`] and a spectrum of length `n`:
/// bass is `[0, n/2 - 1)` and treble is `[n/2 - 1, n - 1)`.
/// Fails with `InvalidInput` when `n < 2`.
pub fn extract_bands(spectrum: &[u8], split: SplitConvention) -> Result<Bands<'_>> {
    let len = spectrum.len();
    if len < 2 {
        return Err(PipelineError::InvalidInput(format!(
            "spectrum needs at least 2 bins, got {}",
            len
        )));
    }

    let (bass, treble) = match split {
        SplitConvention::Reference => {
            let mid = len / 2 - 1;
            (&spectrum[..mid], &spectrum[mid..len - 1])
        }
        SplitConvention::Even => spectrum.split_at(len / 2),
    };

    Ok(Bands { bass, treble })
}

/// Band energy: arithmetic mean of the band divided again by its length.
///
/// A constant band of value `k` yields `k / len`. The second division
/// dampens longer bands; mapping ranges downstream assume it.
pub fn band_energy(band: &[u8]) -> Result<f64> {
    if band.is_empty() {
        return Err(PipelineError::InvalidInput(
            "cannot compute energy of an empty band".to_string(),
        ));
    }

    let len = band.len() as f64;
    let total: u64 = band.iter().map(|&b| b as u64).sum();
    let average = total as f64 / len;

    Ok(average / len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_split_drops_last_bin() {
        let spectrum: Vec<u8> = (0..=255).collect();
        let bands = extract_bands(&spectrum, SplitConvention::Reference).unwrap();

        assert_eq!(bands.bass.len(), 127);
        assert_eq!(bands.treble.len(), 128);
        assert_eq!(bands.bass.len() + bands.treble.len(), spectrum.len() - 1);

        assert_eq!(bands.bass.first(), Some(&0));
        assert_eq!(bands.bass.last(), Some(&126));
        assert_eq!(bands.treble.first(), Some(&127));
        assert_eq!(bands.treble.last(), Some(&254));
    }

    #[test]
    fn test_even_split_covers_every_bin() {
        let spectrum: Vec<u8> = (0..=255).collect();
        let bands = extract_bands(&spectrum, SplitConvention::Even).unwrap();

        assert_eq!(bands.bass.len(), 128);
        assert_eq!(bands.treble.len(), 128);
        assert_eq!(bands.treble.last(), Some(&255));
    }

    #[test]
    fn test_split_rejects_short_spectrum() {
        assert!(matches!(
            extract_bands(&[], SplitConvention::Reference),
            Err(PipelineError::InvalidInput(_))
        ));
        assert!(matches!(
            extract_bands(&[7], SplitConvention::Even),
            Err(PipelineError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_two_bin_spectrum_has_empty_bass() {
        // mid = 0, so bass is empty and its energy is an error, not NaN
        let bands = extract_bands(&[10, 20], SplitConvention::Reference).unwrap();
        assert!(bands.bass.is_empty());
        assert_eq!(bands.treble, &[10]);
        assert!(band_energy(bands.bass).is_err());
    }

    #[test]
    fn test_band_energy_of_silence_is_zero() {
        assert_eq!(band_energy(&[0; 128]).unwrap(), 0.0);
    }

    #[test]
    fn test_band_energy_of_constant_band() {
        for (k, len) in [(255u8, 127usize), (255, 128), (100, 10), (1, 1)] {
            let band = vec![k; len];
            let energy = band_energy(&band).unwrap();
            assert!((energy - k as f64 / len as f64).abs() < 1e-12);
        }
    }

    #[test]
    fn test_band_energy_rejects_empty_band() {
        assert!(matches!(
            band_energy(&[]),
            Err(PipelineError::InvalidInput(_))
        ));
    }
}
