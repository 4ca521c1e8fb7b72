//! Clauses, formulas and cardinality helpers shared by the puzzle encodings

use itertools::Itertools;
use std::collections::HashSet;

/// Represents a SAT clause (disjunction of literals)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub literals: Vec<i32>, // Positive for variable, negative for negation
}

impl Clause {
    /// Create a new clause from literals
    pub fn new(literals: Vec<i32>) -> Self {
        Self { literals }
    }

    /// Create a unit clause (single literal)
    pub fn unit(literal: i32) -> Self {
        Self { literals: vec![literal] }
    }

    /// Create a binary clause (two literals)
    pub fn binary(lit1: i32, lit2: i32) -> Self {
        Self { literals: vec![lit1, lit2] }
    }

    /// Check if clause is empty (unsatisfiable)
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// Largest variable mentioned by this clause, 0 for the empty clause
    pub fn max_variable(&self) -> i32 {
        self.literals.iter().map(|lit| lit.abs()).max().unwrap_or(0)
    }

    /// Evaluate the clause against the set of true variables.
    pub fn is_satisfied_by(&self, true_variables: &HashSet<i32>) -> bool {
        self.literals
            .iter()
            .any(|&lit| true_variables.contains(&lit.abs()) == (lit > 0))
    }
}

/// Collect the variables a model assigns true.
///
/// Variables absent from the model count as false.
pub fn true_variables(model: &[i32]) -> HashSet<i32> {
    model.iter().copied().filter(|&lit| lit > 0).collect()
}

/// `at least one of literals` as a single clause
pub fn at_least_one(literals: &[i32]) -> Clause {
    Clause::new(literals.to_vec())
}

/// `at most one of literals`, pairwise encoding
pub fn at_most_one(literals: &[i32]) -> Vec<Clause> {
    literals
        .iter()
        .tuple_combinations()
        .map(|(&a, &b)| Clause::binary(-a, -b))
        .collect()
}

/// `exactly one of literals`
pub fn exactly_one(literals: &[i32]) -> Vec<Clause> {
    let mut clauses = Vec::with_capacity(1 + literals.len() * literals.len().saturating_sub(1) / 2);
    clauses.push(at_least_one(literals));
    clauses.extend(at_most_one(literals));
    clauses
}

/// An ordered CNF formula, split into named sections for reporting
#[derive(Debug, Clone, Default)]
pub struct Formula {
    clauses: Vec<Clause>,
    sections: Vec<(&'static str, usize)>,
    max_variable: i32,
}

impl Formula {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one clause to the current (last) section
    pub fn push(&mut self, clause: Clause) {
        self.max_variable = self.max_variable.max(clause.max_variable());
        self.clauses.push(clause);
        if let Some(last) = self.sections.last_mut() {
            last.1 += 1;
        } else {
            self.sections.push(("unnamed", 1));
        }
    }

    /// Append a named group of clauses
    pub fn add_section<I>(&mut self, name: &'static str, clauses: I)
    where
        I: IntoIterator<Item = Clause>,
    {
        self.sections.push((name, 0));
        for clause in clauses {
            self.push(clause);
        }
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn max_variable(&self) -> i32 {
        self.max_variable
    }

    /// Clause counts per section, in insertion order
    pub fn sections(&self) -> &[(&'static str, usize)] {
        &self.sections
    }

    /// Check every clause against a model
    pub fn is_satisfied_by(&self, model: &[i32]) -> bool {
        let true_vars = true_variables(model);
        self.clauses.iter().all(|clause| clause.is_satisfied_by(&true_vars))
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Formula: {} clauses over {} variables", self.len(), self.max_variable)?;
        for (name, count) in &self.sections {
            writeln!(f, "  {:<24} {}", name, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clause_creation() {
        let clause = Clause::new(vec![1, -2, 3]);
        assert_eq!(clause.literals, vec![1, -2, 3]);
        assert!(!clause.is_empty());
        assert_eq!(clause.max_variable(), 3);

        let unit_clause = Clause::unit(5);
        assert_eq!(unit_clause.literals, vec![5]);
    }

    #[test]
    fn test_at_most_one_is_pairwise() {
        let clauses = at_most_one(&[1, 2, 3, 4]);
        assert_eq!(clauses.len(), 6);
        assert!(clauses.contains(&Clause::binary(-1, -2)));
        assert!(clauses.contains(&Clause::binary(-3, -4)));
    }

    #[test]
    fn test_exactly_one() {
        let clauses = exactly_one(&[7, 8, 9]);
        assert_eq!(clauses.len(), 4);
        assert_eq!(clauses[0], Clause::new(vec![7, 8, 9]));
        assert!(at_most_one(&[7]).is_empty());
    }

    #[test]
    fn test_clause_evaluation() {
        let clause = Clause::new(vec![1, -2]);
        assert!(clause.is_satisfied_by(&true_variables(&[1, 2])));
        assert!(clause.is_satisfied_by(&true_variables(&[-1, -2])));
        assert!(!clause.is_satisfied_by(&true_variables(&[-1, 2])));
        assert!(!clause.is_satisfied_by(&true_variables(&[2, -1])));
        // unassigned variables are false
        assert!(clause.is_satisfied_by(&true_variables(&[])));
    }

    #[test]
    fn test_formula_sections() {
        let mut formula = Formula::new();
        formula.add_section("units", vec![Clause::unit(1), Clause::unit(-4)]);
        formula.add_section("pairs", at_most_one(&[1, 2, 3]));

        assert_eq!(formula.len(), 5);
        assert_eq!(formula.max_variable(), 4);
        assert_eq!(formula.sections(), &[("units", 2), ("pairs", 3)]);
        assert!(formula.is_satisfied_by(&[1, -2, -3, -4]));
        assert!(!formula.is_satisfied_by(&[1, 2, -3, -4]));
    }
}
