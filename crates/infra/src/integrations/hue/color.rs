//! RGB to CIE 1931 xy chromaticity conversion
//!
//! The bridge-proxy expects colors as xy coordinates. The transform is the
//! standard linear one; it is undefined for pure black (R+G+B = 0), which
//! is rejected instead of sending NaN to the vendor.

use hearth_domain::{HearthError, Result, Rgb};

/// Convert an RGB triple to CIE xy chromaticity.
pub fn rgb_to_xy(color: Rgb) -> Result<(f64, f64)> {
    let r = f64::from(color.r);
    let g = f64::from(color.g);
    let b = f64::from(color.b);
    let sum = r + g + b;

    if sum == 0.0 {
        return Err(HearthError::InvalidInput(
            "cannot convert pure black to xy chromaticity".into(),
        ));
    }

    let x = (0.4124 * r + 0.3576 * g + 0.1805 * b) / sum;
    let y = (0.2126 * r + 0.7152 * g + 0.0722 * b) / sum;
    Ok((x, y))
}
