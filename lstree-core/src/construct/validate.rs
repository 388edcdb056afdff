//! Entry validation for construction inputs.

use crate::error::InputError;

/// Checks lengths, densities, and the level grid before any work starts.
///
/// Graph-shape problems (out-of-range neighbours, asymmetric edges) are
/// reported while the neighbour graph is compressed.
pub(crate) fn validate_inputs(
    adjacency: &[Vec<usize>],
    density: &[f64],
    levels: &[f64],
) -> Result<(), InputError> {
    if adjacency.len() != density.len() {
        return Err(InputError::LengthMismatch {
            adjacency: adjacency.len(),
            density: density.len(),
        });
    }

    if let Some((index, &value)) = density
        .iter()
        .enumerate()
        .find(|(_, value)| !value.is_finite() || **value < 0.0)
    {
        return Err(InputError::InvalidDensity { index, value });
    }

    validate_levels(levels)?;

    if density.is_empty() {
        return Ok(());
    }

    let Some(&max_level) = levels.last() else {
        return Err(InputError::EmptyLevels {
            point_count: density.len(),
        });
    };

    if let Some((index, &value)) = density
        .iter()
        .enumerate()
        .find(|(_, value)| **value > max_level)
    {
        return Err(InputError::UncoveredDensity {
            index,
            density: value,
            max_level,
        });
    }

    Ok(())
}

fn validate_levels(levels: &[f64]) -> Result<(), InputError> {
    if let Some((index, &value)) = levels
        .iter()
        .enumerate()
        .find(|(_, level)| !level.is_finite())
    {
        return Err(InputError::NonFiniteLevel { index, value });
    }

    for (offset, pair) in levels.windows(2).enumerate() {
        if let [previous, current] = *pair
            && current <= previous
        {
            return Err(InputError::NonAscendingLevels {
                index: offset + 1,
                previous,
                current,
            });
        }
    }
    Ok(())
}
