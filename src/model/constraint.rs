use super::VarId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Le,
    Ge,
    Eq,
}

/// A linear inequality over program variables: sum of coeff * var, compared
/// against a constant right-hand side.
#[derive(Clone, Debug, PartialEq)]
pub struct Constraint {
    terms: Vec<(VarId, f64)>,
    comparison: Comparison,
    rhs: f64,
}

impl Constraint {
    pub(crate) fn new(terms: Vec<(VarId, f64)>, comparison: Comparison, rhs: f64) -> Constraint {
        // Zero coefficients carry no information and sparse backends dislike them
        let terms: Vec<_> = terms.into_iter().filter(|(_, c)| *c != 0.0).collect();
        debug_assert_distinct(&terms);
        Constraint {
            terms,
            comparison,
            rhs,
        }
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }

    pub fn comparison(&self) -> Comparison {
        self.comparison
    }

    pub fn rhs(&self) -> f64 {
        self.rhs
    }
}

#[cfg(debug_assertions)]
fn debug_assert_distinct(terms: &[(VarId, f64)]) {
    let mut seen = fnv::FnvHashSet::default();
    for (var, _) in terms {
        if !seen.insert(*var) {
            panic!("{:?} appears twice in one constraint", var);
        }
    }
}

#[cfg(not(debug_assertions))]
fn debug_assert_distinct(_terms: &[(VarId, f64)]) {}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Minimize,
    Maximize,
}

/// The single linear objective of the program.
#[derive(Clone, Debug, PartialEq)]
pub struct Objective {
    direction: Direction,
    terms: Vec<(VarId, f64)>,
}

impl Objective {
    pub(crate) fn new(direction: Direction, terms: Vec<(VarId, f64)>) -> Objective {
        Objective { direction, terms }
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn terms(&self) -> &[(VarId, f64)] {
        &self.terms
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_zero_coefficients_are_dropped() {
        let c = Constraint::new(
            vec![(VarId(0), 1.0), (VarId(1), 0.0), (VarId(2), -2.0)],
            Comparison::Le,
            3.0,
        );
        assert_eq!(c.terms(), &[(VarId(0), 1.0), (VarId(2), -2.0)]);
        assert_eq!(c.comparison(), Comparison::Le);
        assert_eq!(c.rhs(), 3.0);
    }

    #[test]
    #[should_panic]
    fn test_duplicate_term_panics_in_debug() {
        Constraint::new(
            vec![(VarId(0), 1.0), (VarId(0), 1.0)],
            Comparison::Ge,
            1.0,
        );
    }
}
