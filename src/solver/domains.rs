/// Chronological record of domain removals, undone in reverse order when
/// backtracking past a mark.
pub(crate) type Trail = Vec<(usize, u8)>;

/// Per-row candidate columns for the propagating solvers.
///
/// Removals go through the trail so a search node can restore exactly the
/// values it pruned, the same mark-and-rewind discipline the assignment
/// history uses elsewhere in the search.
pub(crate) struct Domains {
    allowed: Vec<Vec<bool>>,
}

impl Domains {
    /// All columns available for every row.
    pub(crate) fn full(size: usize) -> Self {
        Domains {
            allowed: vec![vec![true; size]; size],
        }
    }

    pub(crate) fn size(&self) -> usize {
        self.allowed.len()
    }

    pub(crate) fn contains(&self, row: usize, col: u8) -> bool {
        self.allowed[row][col as usize]
    }

    /// Removes a value, recording the removal on the trail.
    pub(crate) fn remove(&mut self, row: usize, col: u8, trail: &mut Trail) {
        if self.allowed[row][col as usize] {
            self.allowed[row][col as usize] = false;
            trail.push((row, col));
        }
    }

    /// Shrinks a row's domain to a single value.
    pub(crate) fn restrict_to(&mut self, row: usize, col: u8, trail: &mut Trail) {
        for other in 0..self.allowed[row].len() as u8 {
            if other != col {
                self.remove(row, other, trail);
            }
        }
    }

    /// Undoes every removal made after the given trail mark.
    pub(crate) fn restore_from(&mut self, trail: &mut Trail, mark: usize) {
        while trail.len() > mark {
            let (row, col) = trail.pop().unwrap();
            self.allowed[row][col as usize] = true;
        }
    }

    pub(crate) fn count(&self, row: usize) -> usize {
        self.allowed[row].iter().filter(|&&v| v).count()
    }

    pub(crate) fn is_empty(&self, row: usize) -> bool {
        self.allowed[row].iter().all(|&v| !v)
    }

    pub(crate) fn values(&self, row: usize) -> impl Iterator<Item = u8> + '_ {
        self.allowed[row]
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v)
            .map(|(col, _)| col as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_and_rewind() {
        let mut domains = Domains::full(4);
        let mut trail = Trail::new();

        let mark = trail.len();
        domains.remove(1, 2, &mut trail);
        domains.remove(1, 2, &mut trail); // second removal records nothing
        domains.restrict_to(0, 3, &mut trail);

        assert!(!domains.contains(1, 2));
        assert_eq!(domains.count(1), 3);
        assert_eq!(domains.count(0), 1);
        assert_eq!(domains.values(0).collect::<Vec<_>>(), vec![3]);

        domains.restore_from(&mut trail, mark);
        assert_eq!(domains.count(0), 4);
        assert_eq!(domains.count(1), 4);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_values_yields_only_remaining_columns() {
        let mut domains = Domains::full(5);
        let mut trail = Trail::new();
        domains.remove(2, 0, &mut trail);
        domains.remove(2, 3, &mut trail);

        assert_eq!(domains.values(2).collect::<Vec<_>>(), vec![1, 2, 4]);
        assert_eq!(domains.values(0).count(), 5);
    }

    #[test]
    fn test_emptied_row_is_detected() {
        let mut domains = Domains::full(2);
        let mut trail = Trail::new();
        domains.remove(0, 0, &mut trail);
        assert!(!domains.is_empty(0));
        domains.remove(0, 1, &mut trail);
        assert!(domains.is_empty(0));
    }
}
