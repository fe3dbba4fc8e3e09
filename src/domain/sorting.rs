use crate::domain::counter::Counter;

/// Sorts counters into canonical display order
///
/// The sort is stable, so counters sharing a position keep their
/// relative order in the slice.
pub fn sort_by_position(counters: &mut [Counter]) {
    counters.sort_by_key(|c| c.position);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::counter::CounterId;

    fn counter(id: i64, title: &str, position: i64) -> Counter {
        Counter::new(CounterId::new(id), title.to_string(), position)
    }

    #[test]
    fn test_sort_by_position() {
        let mut counters = vec![counter(1, "A", 2), counter(2, "B", 0), counter(3, "C", 1)];

        sort_by_position(&mut counters);

        let ids: Vec<i64> = counters.iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_by_position_keeps_ties_stable() {
        let mut counters = vec![
            counter(1, "A", 1),
            counter(2, "B", 0),
            counter(3, "C", 1),
            counter(4, "D", 0),
        ];

        sort_by_position(&mut counters);

        let ids: Vec<i64> = counters.iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_sort_by_position_tolerates_gaps_and_negatives() {
        let mut counters = vec![counter(1, "A", 100), counter(2, "B", -5), counter(3, "C", 7)];

        sort_by_position(&mut counters);

        let ids: Vec<i64> = counters.iter().map(|c| c.id.get()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
