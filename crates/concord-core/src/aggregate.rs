//! Collective index aggregation.
//!
//! Reduces the states sampled in one round to a single scalar: the
//! arithmetic mean of `focus * coherence * (1 - stress)` across all
//! agents. The empty-population case is an explicit policy (index 0),
//! not a fault, so zero-agent rounds flow through the pipeline normally.

use concord_types::AgentState;

use crate::error::CoreError;

/// Compute the collective index over a sequence of agent states.
///
/// Every state is range-checked before it is folded into the mean; a
/// single out-of-range signal rejects the whole aggregation. An empty
/// sequence yields `0.0` by policy.
///
/// For valid inputs the result is always in `[0, 1]`.
///
/// # Errors
///
/// Returns [`CoreError::ValueOutOfRange`] if any state carries a signal
/// outside `[0, 1]`.
pub fn collective_index<'a, I>(states: I) -> Result<f64, CoreError>
where
    I: IntoIterator<Item = &'a AgentState>,
{
    let mut sum = 0.0;
    let mut count = 0.0;
    for state in states {
        if let Some((field, value)) = state.range_violation() {
            return Err(CoreError::ValueOutOfRange { field, value });
        }
        sum += state.signal_product();
        count += 1.0;
    }

    if count < 1.0 {
        return Ok(0.0);
    }
    Ok(sum / count)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_is_exactly_zero() {
        let states: Vec<AgentState> = Vec::new();
        assert_eq!(collective_index(&states).unwrap(), 0.0);
    }

    #[test]
    fn single_state_mean_is_its_product() {
        let state = AgentState::new(0.2, 0.5, 0.5);
        let index = collective_index([&state]).unwrap();
        assert!((index - 0.2).abs() < 1e-12);
    }

    #[test]
    fn mean_over_multiple_states() {
        // Products: 1.0 * 1.0 * (1 - 0.0) = 1.0 and 0.0 (focus = 0).
        let high = AgentState::new(0.0, 1.0, 1.0);
        let low = AgentState::new(0.3, 0.0, 0.9);
        let index = collective_index([&high, &low]).unwrap();
        assert!((index - 0.5).abs() < 1e-12);
    }

    #[test]
    fn index_is_bounded_for_extreme_valid_inputs() {
        let corners = [
            AgentState::new(0.0, 0.0, 0.0),
            AgentState::new(1.0, 1.0, 1.0),
            AgentState::new(0.0, 1.0, 1.0),
            AgentState::new(1.0, 0.0, 0.0),
        ];
        let index = collective_index(corners.iter()).unwrap();
        assert!((0.0..=1.0).contains(&index));
    }

    #[test]
    fn out_of_range_state_is_rejected() {
        let good = AgentState::new(0.5, 0.5, 0.5);
        let bad = AgentState::new(0.5, 1.5, 0.5);
        let result = collective_index([&good, &bad]);
        assert!(matches!(
            result,
            Err(CoreError::ValueOutOfRange { field: "focus", .. })
        ));
    }

    #[test]
    fn nan_state_is_rejected() {
        let bad = AgentState::new(f64::NAN, 0.5, 0.5);
        assert!(collective_index([&bad]).is_err());
    }
}
