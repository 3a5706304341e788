//! Mode finding on top of [`ChainingMap`].

use crate::{ChainingMap, error::MapError};

/// Finds the most frequent elements of `elements`.
///
/// Returns every element reaching the highest count, in no particular order, together with
/// that count. Occurrences are counted in a default [`ChainingMap`], resized once up front
/// when the input has more elements than the map has buckets.
///
/// # Errors
///
/// Returns [`MapError::EmptyInput`] if `elements` is empty.
///
/// # Examples
///
/// ```
/// use chainprobe::find_mode;
///
/// let (mut modes, frequency) = find_mode(&["apple", "apple", "grape", "melon", "melon", "peach"])?;
/// modes.sort();
/// assert_eq!(modes, ["apple", "melon"]);
/// assert_eq!(frequency, 2);
/// # Ok::<(), chainprobe::MapError>(())
/// ```
pub fn find_mode<S: AsRef<str>>(elements: &[S]) -> Result<(Vec<String>, usize), MapError> {
    if elements.is_empty() {
        return Err(MapError::EmptyInput);
    }

    let mut counts: ChainingMap<usize> = ChainingMap::default();
    if elements.len() > counts.capacity() {
        counts.resize_table(elements.len());
    }

    let mut frequency = 0;
    for element in elements {
        let element = element.as_ref();
        let count = counts.get(element).map_or(1, |count| count.saturating_add(1));
        counts.put(element, count);
        frequency = frequency.max(count);
    }

    let modes = counts
        .iter()
        .filter(|&(_, &count)| count == frequency)
        .map(|(key, _)| key.to_owned())
        .collect();

    Ok((modes, frequency))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    fn sorted_mode(elements: &[&str]) -> Result<(Vec<String>, usize), MapError> {
        let (mut modes, frequency) = find_mode(elements)?;
        modes.sort();
        Ok((modes, frequency))
    }

    #[test]
    fn test_two_modes() -> Result<(), MapError> {
        let (modes, frequency) =
            sorted_mode(&["apple", "apple", "grape", "melon", "melon", "peach"])?;
        assert_eq!(modes, ["apple", "melon"]);
        assert_eq!(frequency, 2);
        Ok(())
    }

    #[test]
    fn test_single_mode() -> Result<(), MapError> {
        let (modes, frequency) =
            sorted_mode(&["Arch", "Manjaro", "Manjaro", "Mint", "Mint", "Mint", "Ubuntu"])?;
        assert_eq!(modes, ["Mint"]);
        assert_eq!(frequency, 3);
        Ok(())
    }

    #[test]
    fn test_all_distinct() -> Result<(), MapError> {
        let (modes, frequency) = sorted_mode(&["one", "two", "three", "four", "five"])?;
        assert_eq!(modes, ["five", "four", "one", "three", "two"]);
        assert_eq!(frequency, 1);
        Ok(())
    }

    #[test]
    fn test_single_element() -> Result<(), MapError> {
        assert_eq!(sorted_mode(&["2"])?, (vec!["2".to_string()], 1));
        Ok(())
    }

    #[test]
    fn test_input_longer_than_default_capacity() -> Result<(), MapError> {
        let elements: Vec<String> = (0..100).map(|i| format!("e{}", i % 7)).collect();
        let (mut modes, frequency) = find_mode(&elements)?;
        modes.sort();
        assert_eq!(modes, ["e0", "e1"]);
        assert_eq!(frequency, 15);
        Ok(())
    }

    #[test]
    fn test_empty_input() {
        let elements: [&str; 0] = [];
        assert_eq!(find_mode(&elements), Err(MapError::EmptyInput));
    }

    proptest! {
        #[test]
        fn prop_mode_matches_reference_count(elements in proptest::collection::vec("[a-e]{1,2}", 1..200)) {
            let mut reference: HashMap<&str, usize> = HashMap::new();
            for element in &elements {
                *reference.entry(element.as_str()).or_default() += 1;
            }
            let expected_frequency = reference.values().copied().max().unwrap_or(0);
            let mut expected: Vec<String> = reference
                .iter()
                .filter(|&(_, &count)| count == expected_frequency)
                .map(|(key, _)| (*key).to_string())
                .collect();
            expected.sort();

            let (mut modes, frequency) = find_mode(&elements).map_err(|err| TestCaseError::fail(err.to_string()))?;
            modes.sort();
            prop_assert_eq!(frequency, expected_frequency);
            prop_assert_eq!(modes, expected);
        }
    }
}
