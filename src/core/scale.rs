use crate::error::{ExtractError, ExtractResult};

/// Linear mapping between a numeric domain and a pixel extent `[0, extent]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ExtractResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ExtractError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64, extent: f64) -> ExtractResult<f64> {
        validate_extent(extent)?;
        if !value.is_finite() {
            return Err(ExtractError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(normalized * extent)
    }

    pub fn pixel_to_domain(self, pixel: f64, extent: f64) -> ExtractResult<f64> {
        validate_extent(extent)?;
        if !pixel.is_finite() {
            return Err(ExtractError::InvalidData("pixel must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = pixel / extent;
        Ok(self.domain_start + normalized * span)
    }
}

fn validate_extent(extent: f64) -> ExtractResult<()> {
    if !extent.is_finite() || extent <= 0.0 {
        return Err(ExtractError::InvalidData(
            "pixel extent must be finite and > 0".to_owned(),
        ));
    }
    Ok(())
}

/// Orders `[start, end]` and widens a zero-width range by `min_span`.
pub(crate) fn normalize_range(start: f64, end: f64, min_span: f64) -> ExtractResult<(f64, f64)> {
    if !start.is_finite() || !end.is_finite() {
        return Err(ExtractError::InvalidData(
            "scale range must be finite".to_owned(),
        ));
    }

    if start == end {
        let half = min_span / 2.0;
        return Ok((start - half, end + half));
    }

    Ok((start.min(end), start.max(end)))
}
