//! Grid-square classification of a final position fix

use nalgebra::Vector3;

use crate::error::{Error, Result};

/// Grid layout for classifying a position into a lettered/numbered cell.
///
/// The grid is a square region centered on the origin in the x/z plane,
/// `axis_count_per_side` cells to a side, each `cell_size` units wide,
/// spanning `[-origin_offset, +origin_offset]` on both axes. Ascending x
/// maps to ascending letters; ascending z maps to descending numbers
/// (the northernmost row is numbered highest), so `axis_numbers` is
/// stored highest-first.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use dead_reckon::{GridSpec, classify};
///
/// let spec = GridSpec::default();
/// let label = classify(&Vector3::new(0.0, 0.0, 0.0), &spec).unwrap();
/// assert_eq!(label, "J11");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GridSpec {
    /// Width of one cell, in position units.
    pub cell_size: f32,
    /// Half-width of the region; both axes span `[-origin_offset, +origin_offset]`.
    pub origin_offset: f32,
    /// Number of cells along each axis.
    pub axis_count_per_side: usize,
    /// Cell letters for the x axis, ascending x order.
    pub axis_letters: Vec<char>,
    /// Cell numbers for the z axis, stored highest-first so ascending z
    /// walks them downward.
    pub axis_numbers: Vec<u32>,
}

impl Default for GridSpec {
    /// 20 cells of 250 units spanning -2500..2500, letters A-T,
    /// numbers 20 down to 1.
    fn default() -> Self {
        Self {
            cell_size: 250.0,
            origin_offset: 2500.0,
            axis_count_per_side: 20,
            axis_letters: ('A'..='T').collect(),
            axis_numbers: (1..=20).rev().collect(),
        }
    }
}

impl GridSpec {
    /// Check the spec before classification.
    ///
    /// # Errors
    /// [`Error::InvalidConfiguration`] when `cell_size` is not a positive
    /// finite number or either label sequence's length differs from
    /// `axis_count_per_side`.
    pub fn validate(&self) -> Result<()> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(Error::InvalidConfiguration {
                reason: format!("cell_size must be positive, got {}", self.cell_size),
            });
        }
        if self.axis_letters.len() != self.axis_count_per_side {
            return Err(Error::InvalidConfiguration {
                reason: format!(
                    "axis_letters has {} entries, expected {}",
                    self.axis_letters.len(),
                    self.axis_count_per_side
                ),
            });
        }
        if self.axis_numbers.len() != self.axis_count_per_side {
            return Err(Error::InvalidConfiguration {
                reason: format!(
                    "axis_numbers has {} entries, expected {}",
                    self.axis_numbers.len(),
                    self.axis_count_per_side
                ),
            });
        }
        Ok(())
    }
}

/// Classify a position into a grid cell label.
///
/// Uses the x and z axes of the position; y (vertical) is ignored. Cells
/// are half-open `(left, right]` intervals with the bottom edge closed
/// into the first cell, so both region edges classify to the outermost
/// cells rather than falling out of range.
///
/// # Errors
/// * [`Error::InvalidConfiguration`] when the spec fails validation.
/// * [`Error::OutOfRange`] when the position exceeds the region bounds on
///   either axis. No partial label is ever returned.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use dead_reckon::{GridSpec, classify, Error};
///
/// let spec = GridSpec::default();
/// assert_eq!(classify(&Vector3::new(-2500.0, 0.0, 2500.0), &spec).unwrap(), "A1");
/// assert!(matches!(
///     classify(&Vector3::new(2600.0, 0.0, 0.0), &spec),
///     Err(Error::OutOfRange { axis: 'x', .. })
/// ));
/// ```
pub fn classify(position: &Vector3<f32>, spec: &GridSpec) -> Result<String> {
    spec.validate()?;

    let x_index = bucket(position.x, 'x', spec)?;
    let z_index = bucket(position.z, 'z', spec)?;

    let letter = spec.axis_letters[x_index];
    let number = spec.axis_numbers[z_index];

    Ok(format!("{letter}{number}"))
}

/// Map a coordinate to a cell index along one axis.
fn bucket(value: f32, axis: char, spec: &GridSpec) -> Result<usize> {
    if !value.is_finite() || value < -spec.origin_offset || value > spec.origin_offset {
        return Err(Error::OutOfRange {
            axis,
            value,
            min: -spec.origin_offset,
            max: spec.origin_offset,
        });
    }

    // (left, right] intervals: a coordinate on a cell boundary belongs to
    // the lower cell. The bottom edge would land at index -1, so it is
    // folded into the first cell.
    let index = ((value + spec.origin_offset) / spec.cell_size).ceil() as isize - 1;
    let max_index = spec.axis_count_per_side as isize - 1;
    Ok(index.clamp(0, max_index) as usize)
}
